//! Field validation for edit forms
//!
//! Validators return a [`FieldError`] instead of failing the request; the
//! rendering layer shows the message next to the field. Submissions are also
//! checked against the form's field allowlist and size limits before any
//! validator runs.

use crate::error::{AdminError, AdminResult};
use crate::record::Record;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Maximum number of fields in a submission
const MAX_FIELDS: usize = 100;

/// Maximum string length for a single field value (in bytes)
const MAX_STRING_LENGTH: usize = 1_000_000; // 1MB

/// Message key used when a required field is missing
pub const REQUIRED_KEY: &str = "form.field.required";

/// Validation failure for one field
///
/// Always carries a non-empty message or i18n key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldError(String);

impl FieldError {
	/// Create an error; an empty message is replaced by `"Invalid value"`
	pub fn new(message: impl Into<String>) -> Self {
		let message = message.into();
		if message.trim().is_empty() {
			Self("Invalid value".to_string())
		} else {
			Self(message)
		}
	}

	/// The message or i18n key
	pub fn message(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Outcome of a single validator
pub type ValidationResult = Result<(), FieldError>;

/// Field errors keyed by field name, in form order
pub type FieldErrors = IndexMap<String, FieldError>;

type SyncFn = dyn Fn(&Value) -> ValidationResult + Send + Sync;
type AsyncFn = dyn Fn(Value) -> BoxFuture<'static, ValidationResult> + Send + Sync;

/// Synchronous or asynchronous field validator
#[derive(Clone)]
pub enum Validator {
	/// Runs inline
	Sync(Arc<SyncFn>),
	/// Awaited, e.g. for uniqueness lookups
	Async(Arc<AsyncFn>),
}

impl Validator {
	/// Wrap a synchronous closure
	pub fn sync<F>(f: F) -> Self
	where
		F: Fn(&Value) -> ValidationResult + Send + Sync + 'static,
	{
		Validator::Sync(Arc::new(f))
	}

	/// Wrap an asynchronous closure
	pub fn async_fn<F>(f: F) -> Self
	where
		F: Fn(Value) -> BoxFuture<'static, ValidationResult> + Send + Sync + 'static,
	{
		Validator::Async(Arc::new(f))
	}

	/// Run the validator; absent values are passed as `null`
	pub async fn validate(&self, value: Option<&Value>) -> ValidationResult {
		let value = value.cloned().unwrap_or(Value::Null);
		match self {
			Validator::Sync(f) => f(&value),
			Validator::Async(f) => f(value).await,
		}
	}
}

impl fmt::Debug for Validator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Validator::Sync(_) => f.write_str("Validator::Sync(..)"),
			Validator::Async(_) => f.write_str("Validator::Async(..)"),
		}
	}
}

/// Check whether a submitted value counts as present for `required` fields
pub fn is_present(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => false,
		Some(Value::String(s)) => !s.trim().is_empty(),
		Some(_) => true,
	}
}

/// Accepts empty input or syntactically valid JSON text
///
/// Values that are already structured JSON are accepted as they are.
pub fn json_text() -> Validator {
	Validator::sync(|value| match value {
		Value::Null => Ok(()),
		Value::String(s) if s.is_empty() => Ok(()),
		Value::String(s) => serde_json::from_str::<Value>(s)
			.map(|_| ())
			.map_err(|_| FieldError::new("Invalid JSON")),
		_ => Ok(()),
	})
}

/// Requires a string longer than `min` characters
pub fn longer_than(min: usize, message: &'static str) -> Validator {
	Validator::sync(move |value| match value.as_str() {
		Some(s) if s.chars().count() > min => Ok(()),
		_ => Err(FieldError::new(message)),
	})
}

/// Requires a string containing `needle`
pub fn contains(needle: &'static str, message: &'static str) -> Validator {
	Validator::sync(move |value| match value.as_str() {
		Some(s) if s.contains(needle) => Ok(()),
		_ => Err(FieldError::new(message)),
	})
}

/// Validates a submission against the form's field allowlist and size limits.
///
/// # Errors
///
/// Returns `AdminError::Validation` for unknown fields, too many fields or
/// oversized strings.
pub fn validate_submission_shape(data: &Record, allowed_fields: &[&str]) -> AdminResult<()> {
	if data.len() > MAX_FIELDS {
		return Err(AdminError::Validation(format!(
			"Too many fields in request: {} (max {})",
			data.len(),
			MAX_FIELDS
		)));
	}

	for (field_name, value) in data {
		if !allowed_fields.contains(&field_name.as_str()) {
			return Err(AdminError::Validation(format!(
				"Field '{}' is not editable",
				field_name
			)));
		}
		if let Value::String(s) = value
			&& s.len() > MAX_STRING_LENGTH
		{
			return Err(AdminError::Validation(format!(
				"Field '{}' exceeds maximum length of {} bytes",
				field_name, MAX_STRING_LENGTH
			)));
		}
	}

	Ok(())
}
