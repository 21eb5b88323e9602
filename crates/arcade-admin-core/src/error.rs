//! Error types for the admin registry

use std::fmt;
use thiserror::Error;

/// A single problem found while checking a registry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
	/// Model the problem belongs to (empty for site-level problems)
	pub model: String,
	/// Human-readable description
	pub message: String,
}

impl ConfigIssue {
	/// Create a new configuration issue
	pub fn new(model: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			model: model.into(),
			message: message.into(),
		}
	}
}

impl fmt::Display for ConfigIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.model.is_empty() {
			write!(f, "{}", self.message)
		} else {
			write!(f, "{}: {}", self.model, self.message)
		}
	}
}

fn join_issues(issues: &[ConfigIssue]) -> String {
	issues
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}

/// Admin registry error type
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AdminError {
	/// Model not registered with admin
	#[error("Model '{0}' is not registered with admin")]
	ModelNotRegistered(String),

	/// Record lookup returned nothing
	#[error("Record '{id}' not found in model '{model}'")]
	RecordNotFound { model: String, id: String },

	/// Permission denied
	#[error("Permission denied: {0}")]
	PermissionDenied(String),

	/// Invalid action
	#[error("Invalid action: {0}")]
	InvalidAction(String),

	/// The registry configuration is inconsistent
	#[error("Invalid admin configuration: {}", join_issues(.0))]
	Configuration(Vec<ConfigIssue>),

	/// Validation error
	#[error("Validation error: {0}")]
	Validation(String),

	/// Error raised by the backing store
	#[error("Store error: {0}")]
	Store(String),

	/// Error raised by a lifecycle hook
	#[error("Hook error: {0}")]
	Hook(String),

	/// Error raised by an upload handler
	#[error("Upload error: {0}")]
	Upload(String),

	/// Settings could not be loaded
	#[error("Settings error: {0}")]
	Settings(String),
}

/// Result type for admin registry operations
pub type AdminResult<T> = Result<T, AdminError>;
