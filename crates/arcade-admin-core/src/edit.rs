//! Edit view configuration
//!
//! An edit view is an ordered list of form entries: model fields, virtual
//! custom fields and informational notices. Options attach validation,
//! formatting, input components and upload handling to individual fields.

use crate::format::Formatter;
use crate::hooks::PersistHooks;
use crate::record::Record;
use crate::upload::UploadHandler;
use crate::validation::Validator;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Style key applied to the form container
pub const FORM_STYLE_KEY: &str = "_form";

/// One entry of an edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditEntry {
	/// Model field or custom field
	Field { name: String },
	/// Informational block without an input
	Notice {
		id: String,
		title: String,
		#[serde(skip_serializing_if = "Option::is_none")]
		description: Option<String>,
	},
}

impl EditEntry {
	/// A field entry
	pub fn field(name: impl Into<String>) -> Self {
		EditEntry::Field { name: name.into() }
	}

	/// A notice entry
	pub fn notice(id: impl Into<String>, title: impl Into<String>, description: &str) -> Self {
		EditEntry::Notice {
			id: id.into(),
			title: title.into(),
			description: Some(description.to_string()).filter(|d| !d.is_empty()),
		}
	}

	/// Field name or notice id, used as the style key
	pub fn key(&self) -> &str {
		match self {
			EditEntry::Field { name } => name,
			EditEntry::Notice { id, .. } => id,
		}
	}
}

impl From<&str> for EditEntry {
	fn from(name: &str) -> Self {
		EditEntry::field(name)
	}
}

/// Input format override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldFormat {
	/// File upload
	File,
	/// JSON editor
	Json,
	/// Rich text editor producing HTML
	RichtextHtml,
}

/// How a to-many relation is shown in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationDisplay {
	/// Ordered list of related records
	List,
	/// Multi-select of related records
	Select,
}

type OptionLabelFn = dyn Fn(&Record) -> String + Send + Sync;

/// Options for a single form field
#[derive(Clone, Default)]
pub struct FieldOptions {
	/// Field must be present on submit
	pub required: bool,
	/// Submit-time validator
	pub validate: Option<Validator>,
	/// Formatter used for the field's current value
	pub formatter: Option<Formatter>,
	/// Text shown below the input
	pub helper_text: Option<String>,
	/// Tooltip on the label
	pub tooltip: Option<String>,
	/// Custom input component name
	pub input: Option<String>,
	/// Input format override
	pub format: Option<FieldFormat>,
	/// Relation display mode
	pub display: Option<RelationDisplay>,
	/// Field on the join record holding the position
	pub order_field: Option<String>,
	/// Field searched when picking related records
	pub relationship_search_field: Option<String>,
	/// Label for related records in pickers
	pub relation_option_formatter: Option<Arc<OptionLabelFn>>,
	/// Upload handler for file fields
	pub upload: Option<Arc<dyn UploadHandler>>,
}

impl FieldOptions {
	/// Create empty options
	pub fn new() -> Self {
		Self::default()
	}

	/// Mark the field as required
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Set the validator
	pub fn validate(mut self, validator: Validator) -> Self {
		self.validate = Some(validator);
		self
	}

	/// Set the formatter
	pub fn formatter(mut self, formatter: Formatter) -> Self {
		self.formatter = Some(formatter);
		self
	}

	/// Set helper text
	pub fn helper_text(mut self, text: impl Into<String>) -> Self {
		self.helper_text = Some(text.into());
		self
	}

	/// Set tooltip
	pub fn tooltip(mut self, text: impl Into<String>) -> Self {
		self.tooltip = Some(text.into());
		self
	}

	/// Set the custom input component
	pub fn input(mut self, component: impl Into<String>) -> Self {
		self.input = Some(component.into());
		self
	}

	/// Set the input format
	pub fn format(mut self, format: FieldFormat) -> Self {
		self.format = Some(format);
		self
	}

	/// Set the relation display mode
	pub fn display(mut self, display: RelationDisplay) -> Self {
		self.display = Some(display);
		self
	}

	/// Set the order field
	pub fn order_field(mut self, field: impl Into<String>) -> Self {
		self.order_field = Some(field.into());
		self
	}

	/// Set the relationship search field
	pub fn relationship_search_field(mut self, field: impl Into<String>) -> Self {
		self.relationship_search_field = Some(field.into());
		self
	}

	/// Set the related-record label function
	pub fn relation_option_formatter<F>(mut self, f: F) -> Self
	where
		F: Fn(&Record) -> String + Send + Sync + 'static,
	{
		self.relation_option_formatter = Some(Arc::new(f));
		self
	}

	/// Set the upload handler
	pub fn upload(mut self, handler: impl UploadHandler + 'static) -> Self {
		self.upload = Some(Arc::new(handler));
		self
	}
}

impl fmt::Debug for FieldOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldOptions")
			.field("required", &self.required)
			.field("validate", &self.validate)
			.field("helper_text", &self.helper_text)
			.field("tooltip", &self.tooltip)
			.field("input", &self.input)
			.field("format", &self.format)
			.field("display", &self.display)
			.field("order_field", &self.order_field)
			.field("relationship_search_field", &self.relationship_search_field)
			.field("upload", &self.upload.is_some())
			.finish_non_exhaustive()
	}
}

/// Edit view configuration
#[derive(Clone, Default)]
pub struct EditViewSpec {
	display: Vec<EditEntry>,
	styles: IndexMap<String, String>,
	fields: IndexMap<String, FieldOptions>,
	custom_fields: IndexMap<String, FieldOptions>,
	hooks: Option<Arc<dyn PersistHooks>>,
}

impl EditViewSpec {
	/// Create an empty edit view
	pub fn new() -> Self {
		Self::default()
	}

	/// Set form entries, in order
	pub fn display<I, E>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = E>,
		E: Into<EditEntry>,
	{
		self.display = entries.into_iter().map(Into::into).collect();
		self
	}

	/// Set a style class for an entry key (or [`FORM_STYLE_KEY`])
	pub fn style(mut self, key: impl Into<String>, class: impl Into<String>) -> Self {
		self.styles.insert(key.into(), class.into());
		self
	}

	/// Set options for a model field
	pub fn field(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
		self.fields.insert(name.into(), options);
		self
	}

	/// Declare a virtual field that is not stored on the model
	pub fn custom_field(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
		self.custom_fields.insert(name.into(), options);
		self
	}

	/// Set persistence hooks
	pub fn hooks(mut self, hooks: impl PersistHooks + 'static) -> Self {
		self.hooks = Some(Arc::new(hooks));
		self
	}

	/// Form entries
	pub fn entries(&self) -> &[EditEntry] {
		&self.display
	}

	/// Names of the field entries, in order
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.display.iter().filter_map(|entry| match entry {
			EditEntry::Field { name } => Some(name.as_str()),
			EditEntry::Notice { .. } => None,
		})
	}

	/// Style class for an entry key
	pub fn style_for(&self, key: &str) -> Option<&str> {
		self.styles.get(key).map(String::as_str)
	}

	/// All style keys
	pub fn style_keys(&self) -> impl Iterator<Item = &str> {
		self.styles.keys().map(String::as_str)
	}

	/// Options for a model or custom field
	pub fn options_for(&self, name: &str) -> Option<&FieldOptions> {
		self.custom_fields.get(name).or_else(|| self.fields.get(name))
	}

	/// Names of fields with options
	pub fn configured_fields(&self) -> impl Iterator<Item = &str> {
		self.fields.keys().map(String::as_str)
	}

	/// Check whether a field is virtual
	pub fn is_custom_field(&self, name: &str) -> bool {
		self.custom_fields.contains_key(name)
	}

	/// Names of virtual fields
	pub fn custom_field_names(&self) -> impl Iterator<Item = &str> {
		self.custom_fields.keys().map(String::as_str)
	}

	/// Persistence hooks
	pub fn persist_hooks(&self) -> Option<&Arc<dyn PersistHooks>> {
		self.hooks.as_ref()
	}
}

impl fmt::Debug for EditViewSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EditViewSpec")
			.field("display", &self.display)
			.field("styles", &self.styles)
			.field("fields", &self.fields)
			.field("custom_fields", &self.custom_fields)
			.field("hooks", &self.hooks.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_entries_keep_order_and_keys() {
		let edit = EditViewSpec::new().display([
			EditEntry::field("id"),
			EditEntry::notice("email-notice", "Email is mandatory", ""),
			EditEntry::field("email"),
		]);

		let keys: Vec<_> = edit.entries().iter().map(EditEntry::key).collect();
		assert_eq!(keys, vec!["id", "email-notice", "email"]);
		assert_eq!(edit.field_names().collect::<Vec<_>>(), vec!["id", "email"]);
	}

	#[test]
	fn test_custom_field_options_take_precedence() {
		let edit = EditViewSpec::new()
			.field("newPassword", FieldOptions::new().tooltip("model"))
			.custom_field("newPassword", FieldOptions::new().required());

		let options = edit.options_for("newPassword").unwrap();
		assert!(options.required);
		assert!(options.tooltip.is_none());
		assert!(edit.is_custom_field("newPassword"));
	}

	#[test]
	fn test_field_format_serialization() {
		assert_eq!(
			serde_json::to_value(FieldFormat::RichtextHtml).unwrap(),
			serde_json::json!("richtext-html")
		);
	}
}
