//! Record representation shared by the store, callbacks and views
//!
//! Records are JSON objects. Relations are embedded documents: a to-one
//! relation is a nested object and a to-many relation an array of objects.

use serde_json::{Map, Value};

/// A single model record
pub type Record = Map<String, Value>;

/// Record identifier as received from the admin UI
pub type RecordId = String;

/// Read a field as display text.
///
/// Missing fields and `null` read as the empty string, strings are returned
/// verbatim and every other value uses its JSON text.
pub fn text(record: &Record, field: &str) -> String {
	record.get(field).map(value_text).unwrap_or_default()
}

/// Convert a value to display text (`null` becomes the empty string)
pub fn value_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Return the first field that holds a non-empty value.
///
/// Used by labels that fall back across several optional columns.
pub fn first_present(record: &Record, fields: &[&str]) -> String {
	fields
		.iter()
		.map(|field| text(record, field))
		.find(|s| !s.is_empty())
		.unwrap_or_default()
}

/// Resolve a dotted path (`author.name`) through embedded to-one relations
pub fn lookup_path<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
	let mut segments = path.split('.');
	let mut current = record.get(segments.next()?)?;
	for segment in segments {
		current = current.as_object()?.get(segment)?;
	}
	Some(current)
}

/// Build a record from a JSON value, ignoring anything that is not an object
pub fn from_value(value: Value) -> Option<Record> {
	match value {
		Value::Object(map) => Some(map),
		_ => None,
	}
}
