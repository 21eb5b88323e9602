//! Request-scoped context passed to callbacks

use crate::format::{DEFAULT_LOCALE, FormatContext};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which persistence operation is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistMode {
	/// A new record is inserted
	Create,
	/// An existing record is updated
	Edit,
}

impl fmt::Display for PersistMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PersistMode::Create => f.write_str("create"),
			PersistMode::Edit => f.write_str("edit"),
		}
	}
}

/// Details of the admin request being handled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
	/// Locale negotiated for the request
	pub locale: String,
	/// Request path
	pub path: String,
	/// Authenticated staff member, when known
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<String>,
}

impl RequestContext {
	/// Create a context for a request path
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			locale: DEFAULT_LOCALE.to_string(),
			path: path.into(),
			user: None,
		}
	}

	/// Set the locale
	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = locale.into();
		self
	}

	/// Set the authenticated user
	pub fn with_user(mut self, user: impl Into<String>) -> Self {
		self.user = Some(user.into());
		self
	}

	/// Formatting context derived from the request
	pub fn format_context(&self) -> FormatContext {
		FormatContext::new(self.locale.clone())
	}
}

impl Default for RequestContext {
	fn default() -> Self {
		Self::new("/admin")
	}
}
