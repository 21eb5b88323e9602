//! Field formatting for admin views

use crate::record::value_text;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Default locale used when a request carries none
pub const DEFAULT_LOCALE: &str = "en";

/// Request-scoped formatting context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatContext {
	/// BCP 47 locale tag (`en`, `fr-FR`, ...)
	pub locale: String,
}

impl FormatContext {
	/// Create a context for a locale
	pub fn new(locale: impl Into<String>) -> Self {
		Self {
			locale: locale.into(),
		}
	}
}

impl Default for FormatContext {
	fn default() -> Self {
		Self::new(DEFAULT_LOCALE)
	}
}

/// A rendered cell or label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Renderable {
	/// Plain text
	Text { text: String },
	/// Emphasized text with an optional CSS class
	Strong {
		text: String,
		#[serde(skip_serializing_if = "Option::is_none")]
		class: Option<String>,
	},
}

impl Renderable {
	/// Plain text
	pub fn text(text: impl Into<String>) -> Self {
		Renderable::Text { text: text.into() }
	}

	/// Emphasized text
	pub fn strong(text: impl Into<String>) -> Self {
		Renderable::Strong {
			text: text.into(),
			class: None,
		}
	}

	/// Emphasized text with a CSS class
	pub fn strong_with_class(text: impl Into<String>, class: impl Into<String>) -> Self {
		Renderable::Strong {
			text: text.into(),
			class: Some(class.into()),
		}
	}

	/// The text content regardless of styling
	pub fn as_text(&self) -> &str {
		match self {
			Renderable::Text { text } | Renderable::Strong { text, .. } => text,
		}
	}
}

impl fmt::Display for Renderable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_text())
	}
}

type FormatFn = dyn Fn(&Value, &FormatContext) -> Renderable + Send + Sync;

/// Per-field formatter
///
/// # Examples
///
/// ```
/// use arcade_admin_core::format::{FormatContext, Formatter, Renderable};
/// use serde_json::json;
///
/// let formatter = Formatter::new(|value, _| {
///     Renderable::text(if value.as_bool() == Some(true) { "Yes" } else { "No" })
/// });
///
/// assert_eq!(formatter.format(&json!(true), &FormatContext::default()).as_text(), "Yes");
/// ```
#[derive(Clone)]
pub struct Formatter(Arc<FormatFn>);

impl Formatter {
	/// Wrap a formatting closure
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Value, &FormatContext) -> Renderable + Send + Sync + 'static,
	{
		Self(Arc::new(f))
	}

	/// Format a value
	pub fn format(&self, value: &Value, context: &FormatContext) -> Renderable {
		(self.0)(value, context)
	}
}

impl fmt::Debug for Formatter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Formatter(..)")
	}
}

/// Parse a JSON date value (RFC 3339, naive timestamp or plain date)
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
	let raw = value.as_str()?;
	if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
		return Some(dt.date_naive());
	}
	if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
		return Some(dt.date());
	}
	NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Format the date part of a value for a locale.
///
/// `null` renders empty and unparseable input renders `Invalid Date`.
pub fn locale_date(value: &Value, context: &FormatContext) -> String {
	if value.is_null() {
		return String::new();
	}
	let Some(date) = parse_date(value) else {
		return "Invalid Date".to_string();
	};
	let language = context
		.locale
		.split(['-', '_'])
		.next()
		.unwrap_or(DEFAULT_LOCALE)
		.to_lowercase();
	let pattern = match (language.as_str(), context.locale.as_str()) {
		(_, "en-GB") => "%d/%m/%Y",
		("en", _) => "%-m/%-d/%Y",
		("fr" | "es" | "it" | "pt", _) => "%d/%m/%Y",
		("de" | "ru" | "pl", _) => "%-d.%-m.%Y",
		("ja" | "zh", _) => "%Y/%-m/%-d",
		_ => "%Y-%m-%d",
	};
	date.format(pattern).to_string()
}

/// Render a value without a configured formatter
pub fn default_render(value: &Value) -> Renderable {
	Renderable::text(value_text(value))
}
