//! Model descriptors
//!
//! A descriptor states how one model appears in the admin: its label
//! function, list and edit views, permitted operations and actions.

use crate::actions::{Action, ActionSummary};
use crate::edit::EditViewSpec;
use crate::list::{ExportSpec, ListViewSpec};
use crate::record::{Record, value_text};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Operation a model permits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
	/// Update existing records
	Edit,
	/// Delete records
	Delete,
	/// Create records
	Create,
}

impl Permission {
	/// Every permission
	pub const ALL: [Permission; 3] = [Permission::Edit, Permission::Delete, Permission::Create];
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Permission::Edit => f.write_str("edit"),
			Permission::Delete => f.write_str("delete"),
			Permission::Create => f.write_str("create"),
		}
	}
}

type LabelFn = dyn Fn(&Record) -> String + Send + Sync;

/// Admin configuration for one model
///
/// # Examples
///
/// ```
/// use arcade_admin_core::model::{ModelDescriptor, Permission};
/// use arcade_admin_core::record::text;
///
/// let descriptor = ModelDescriptor::new("Category")
///     .title("Categories")
///     .icon("InboxStackIcon")
///     .to_string_with(|category| text(category, "name"));
///
/// assert_eq!(descriptor.name(), "Category");
/// assert!(descriptor.allows(Permission::Delete));
/// ```
#[derive(Clone)]
pub struct ModelDescriptor {
	name: String,
	title: Option<String>,
	icon: Option<String>,
	permissions: Option<Vec<Permission>>,
	aliases: IndexMap<String, String>,
	list: Option<ListViewSpec>,
	edit: Option<EditViewSpec>,
	actions: Vec<Action>,
	to_string: Option<Arc<LabelFn>>,
}

impl ModelDescriptor {
	/// Create a descriptor with no views configured
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			title: None,
			icon: None,
			permissions: None,
			aliases: IndexMap::new(),
			list: None,
			edit: None,
			actions: Vec::new(),
			to_string: None,
		}
	}

	/// Set the display title
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Set the icon identifier
	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	/// Restrict the permitted operations
	pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
		self.permissions = Some(permissions.into_iter().collect());
		self
	}

	/// Set a human-readable label for a field
	pub fn alias(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
		self.aliases.insert(field.into(), label.into());
		self
	}

	/// Set the list view
	pub fn list(mut self, list: ListViewSpec) -> Self {
		self.list = Some(list);
		self
	}

	/// Set the edit view
	pub fn edit(mut self, edit: EditViewSpec) -> Self {
		self.edit = Some(edit);
		self
	}

	/// Add an action
	pub fn action(mut self, action: impl Into<Action>) -> Self {
		self.actions.push(action.into());
		self
	}

	/// Set the record label function
	pub fn to_string_with<F>(mut self, f: F) -> Self
	where
		F: Fn(&Record) -> String + Send + Sync + 'static,
	{
		self.to_string = Some(Arc::new(f));
		self
	}

	/// Model name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Display title (defaults to the model name)
	pub fn display_title(&self) -> &str {
		self.title.as_deref().unwrap_or(&self.name)
	}

	/// Icon identifier
	pub fn icon_name(&self) -> Option<&str> {
		self.icon.as_deref()
	}

	/// Check whether an operation is permitted; no explicit list permits all
	pub fn allows(&self, permission: Permission) -> bool {
		self.permissions
			.as_ref()
			.is_none_or(|permissions| permissions.contains(&permission))
	}

	/// Permitted operations
	pub fn permitted(&self) -> Vec<Permission> {
		Permission::ALL
			.into_iter()
			.filter(|p| self.allows(*p))
			.collect()
	}

	/// Field aliases
	pub fn aliases(&self) -> &IndexMap<String, String> {
		&self.aliases
	}

	/// Label for a field: its alias or the field name
	pub fn label_for<'a>(&'a self, field: &'a str) -> &'a str {
		self.aliases.get(field).map(String::as_str).unwrap_or(field)
	}

	/// List view
	pub fn list_view(&self) -> Option<&ListViewSpec> {
		self.list.as_ref()
	}

	/// Edit view
	pub fn edit_view(&self) -> Option<&EditViewSpec> {
		self.edit.as_ref()
	}

	/// Actions in declaration order
	pub fn actions(&self) -> &[Action] {
		&self.actions
	}

	/// Find an action by id
	pub fn find_action(&self, id: &str) -> Option<&Action> {
		self.actions.iter().find(|action| action.id() == id)
	}

	/// Label a record.
	///
	/// Without a label function the primary key value is used.
	pub fn label(&self, record: &Record, pk_field: &str) -> String {
		match &self.to_string {
			Some(f) => f(record),
			None => record.get(pk_field).map(value_text).unwrap_or_default(),
		}
	}

	/// Serializable summary for the renderer
	pub fn summary(&self) -> ModelSummary {
		ModelSummary {
			name: self.name.clone(),
			title: self.display_title().to_string(),
			icon: self.icon.clone(),
			permissions: self.permitted(),
			aliases: self.aliases.clone(),
			list: self.list.as_ref().map(|list| ListSummary {
				display: list.display_fields().to_vec(),
				search: list.search_fields().to_vec(),
				copy: list.copy_fields().to_vec(),
				formatted: list.formatted_fields().map(str::to_string).collect(),
				filters: list.filters().len(),
				exports: list.exports().to_vec(),
			}),
			edit: self.edit.as_ref().map(|edit| EditSummary {
				display: edit.entries().iter().map(|e| e.key().to_string()).collect(),
				custom_fields: edit.custom_field_names().map(str::to_string).collect(),
				hooks: edit.persist_hooks().is_some(),
			}),
			actions: self.actions.iter().map(Action::summary).collect(),
		}
	}
}

impl fmt::Debug for ModelDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelDescriptor")
			.field("name", &self.name)
			.field("title", &self.title)
			.field("icon", &self.icon)
			.field("permissions", &self.permissions)
			.field("aliases", &self.aliases)
			.field("list", &self.list)
			.field("edit", &self.edit)
			.field("actions", &self.actions)
			.field("to_string", &self.to_string.is_some())
			.finish()
	}
}

/// List view summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSummary {
	/// Displayed fields
	pub display: Vec<String>,
	/// Searchable fields
	pub search: Vec<String>,
	/// Copyable fields
	pub copy: Vec<String>,
	/// Fields with formatters
	pub formatted: Vec<String>,
	/// Number of filter sources
	pub filters: usize,
	/// Export links
	pub exports: Vec<ExportSpec>,
}

/// Edit view summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditSummary {
	/// Entry keys in order
	pub display: Vec<String>,
	/// Virtual fields
	pub custom_fields: Vec<String>,
	/// Whether persistence hooks are configured
	pub hooks: bool,
}

/// Model summary handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
	/// Model name
	pub name: String,
	/// Display title
	pub title: String,
	/// Icon identifier
	#[serde(skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	/// Permitted operations
	pub permissions: Vec<Permission>,
	/// Field aliases
	pub aliases: IndexMap<String, String>,
	/// List view
	#[serde(skip_serializing_if = "Option::is_none")]
	pub list: Option<ListSummary>,
	/// Edit view
	#[serde(skip_serializing_if = "Option::is_none")]
	pub edit: Option<EditSummary>,
	/// Actions
	pub actions: Vec<ActionSummary>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::from_value;
	use serde_json::json;

	#[test]
	fn test_permissions_default_to_all() {
		let descriptor = ModelDescriptor::new("Game");
		assert_eq!(descriptor.permitted(), Permission::ALL.to_vec());
	}

	#[test]
	fn test_restricted_permissions() {
		let descriptor = ModelDescriptor::new("Report").permissions([Permission::Edit]);

		assert!(descriptor.allows(Permission::Edit));
		assert!(!descriptor.allows(Permission::Create));
		assert!(!descriptor.allows(Permission::Delete));
	}

	#[test]
	fn test_label_falls_back_to_primary_key() {
		let descriptor = ModelDescriptor::new("Game");
		let record = from_value(json!({ "game_id": 12, "title": "Pong" })).unwrap();

		assert_eq!(descriptor.label(&record, "game_id"), "12");
	}

	#[test]
	fn test_label_for_uses_alias() {
		let descriptor = ModelDescriptor::new("User").alias("birthDate", "Date of birth");

		assert_eq!(descriptor.label_for("birthDate"), "Date of birth");
		assert_eq!(descriptor.label_for("email"), "email");
	}
}
