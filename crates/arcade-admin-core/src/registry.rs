//! Model registry
//!
//! [`RegistryBuilder`] collects schemas, model descriptors and the sidebar,
//! checks them against each other and produces an immutable
//! [`AdminRegistry`].

use crate::edit::{EditEntry, FORM_STYLE_KEY};
use crate::error::{AdminError, AdminResult, ConfigIssue};
use crate::filters::FilterSource;
use crate::model::{ModelDescriptor, ModelSummary};
use crate::record::Record;
use crate::schema::{ModelSchema, SchemaSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Color scheme of the admin UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
	/// Dark theme
	#[default]
	Dark,
	/// Light theme
	Light,
}

impl fmt::Display for ColorScheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ColorScheme::Dark => f.write_str("dark"),
			ColorScheme::Light => f.write_str("light"),
		}
	}
}

impl FromStr for ColorScheme {
	type Err = AdminError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"dark" => Ok(ColorScheme::Dark),
			"light" => Ok(ColorScheme::Light),
			other => Err(AdminError::Settings(format!(
				"unknown color scheme '{}'",
				other
			))),
		}
	}
}

/// Site-wide options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOptions {
	/// Site title
	pub title: String,
	/// Default color scheme
	pub default_color_scheme: ColorScheme,
}

impl SiteOptions {
	/// Create site options with the default color scheme
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			default_color_scheme: ColorScheme::default(),
		}
	}

	/// Set the default color scheme
	pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
		self.default_color_scheme = scheme;
		self
	}
}

/// Sidebar section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
	/// Section heading; untitled groups render without one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Model names in display order
	pub models: Vec<String>,
}

impl SidebarGroup {
	/// Untitled group
	pub fn untitled<I, S>(models: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			title: None,
			models: models.into_iter().map(Into::into).collect(),
		}
	}

	/// Titled group
	pub fn titled<I, S>(title: impl Into<String>, models: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			title: Some(title.into()),
			..Self::untitled(models)
		}
	}
}

/// Builder for [`AdminRegistry`]
///
/// # Examples
///
/// ```
/// use arcade_admin_core::list::ListViewSpec;
/// use arcade_admin_core::model::ModelDescriptor;
/// use arcade_admin_core::registry::{RegistryBuilder, SiteOptions};
/// use arcade_admin_core::schema::{FieldDef, FieldKind, ModelSchema};
///
/// let registry = RegistryBuilder::new(SiteOptions::new("Admin"))
///     .schema(
///         ModelSchema::new("Category")
///             .field(FieldDef::new("id", FieldKind::Int).primary_key())
///             .field(FieldDef::new("name", FieldKind::String)),
///     )
///     .model(ModelDescriptor::new("Category").list(ListViewSpec::new().display(["name"])))
///     .build()
///     .unwrap();
///
/// assert!(registry.get("Category").is_some());
/// ```
#[derive(Debug)]
pub struct RegistryBuilder {
	site: SiteOptions,
	schemas: SchemaSet,
	models: IndexMap<String, ModelDescriptor>,
	sidebar: Vec<SidebarGroup>,
	issues: Vec<ConfigIssue>,
}

impl RegistryBuilder {
	/// Start a registry for a site
	pub fn new(site: SiteOptions) -> Self {
		Self {
			site,
			schemas: SchemaSet::new(),
			models: IndexMap::new(),
			sidebar: Vec::new(),
			issues: Vec::new(),
		}
	}

	/// Add a model schema
	pub fn schema(mut self, schema: ModelSchema) -> Self {
		self.schemas.insert(schema);
		self
	}

	/// Add several model schemas
	pub fn schemas(mut self, schemas: impl IntoIterator<Item = ModelSchema>) -> Self {
		for schema in schemas {
			self.schemas.insert(schema);
		}
		self
	}

	/// Register a model descriptor
	pub fn model(mut self, descriptor: ModelDescriptor) -> Self {
		let name = descriptor.name().to_string();
		if self.models.contains_key(&name) {
			self.issues
				.push(ConfigIssue::new(name.as_str(), "model registered more than once"));
		}
		self.models.insert(name, descriptor);
		self
	}

	/// Add a sidebar group
	pub fn sidebar(mut self, group: SidebarGroup) -> Self {
		self.sidebar.push(group);
		self
	}

	/// Check the configuration and build the registry.
	///
	/// # Errors
	///
	/// Returns `AdminError::Configuration` listing every problem found.
	pub fn build(self) -> AdminResult<AdminRegistry> {
		let mut issues = self.issues;
		for descriptor in self.models.values() {
			check_descriptor(descriptor, &self.schemas, &mut issues);
		}
		for group in &self.sidebar {
			for model in &group.models {
				if !self.models.contains_key(model) {
					issues.push(ConfigIssue::new(
						"",
						format!("sidebar references unregistered model '{}'", model),
					));
				}
			}
		}

		if !issues.is_empty() {
			return Err(AdminError::Configuration(issues));
		}

		tracing::debug!(
			models = self.models.len(),
			groups = self.sidebar.len(),
			"admin registry built"
		);
		Ok(AdminRegistry {
			site: self.site,
			schemas: self.schemas,
			models: self.models,
			sidebar: self.sidebar,
		})
	}
}

fn check_descriptor(descriptor: &ModelDescriptor, schemas: &SchemaSet, issues: &mut Vec<ConfigIssue>) {
	let model = descriptor.name();
	let Some(schema) = schemas.get(model) else {
		issues.push(ConfigIssue::new(model, "no schema registered for model"));
		return;
	};
	let mut report = |message: String| issues.push(ConfigIssue::new(model, message));
	let custom: HashSet<&str> = descriptor
		.edit_view()
		.map(|edit| edit.custom_field_names().collect())
		.unwrap_or_default();

	if let Some(list) = descriptor.list_view() {
		for field in list.display_fields() {
			if !schema.has_field(field) {
				report(format!("unknown list display field '{}'", field));
			}
		}
		for path in list.search_fields() {
			if schemas.resolve_path(model, path).is_none() {
				report(format!("unknown list search field '{}'", path));
			}
		}
		for field in list.copy_fields() {
			if !schema.has_field(field) {
				report(format!("unknown list copy field '{}'", field));
			}
		}
		for field in list.formatted_fields() {
			if !schema.has_field(field) {
				report(format!("unknown list formatter field '{}'", field));
			}
		}
		for source in list.filters() {
			if let FilterSource::Static(filter) = source {
				for path in filter.value.unknown_fields(schemas, model) {
					report(format!("filter '{}' uses unknown field '{}'", filter.name, path));
				}
			}
		}
	}

	if let Some(edit) = descriptor.edit_view() {
		let mut notices = HashSet::new();
		let mut keys = HashSet::new();
		for entry in edit.entries() {
			match entry {
				EditEntry::Field { name } => {
					if !schema.has_field(name) && !custom.contains(name.as_str()) {
						report(format!("unknown edit display field '{}'", name));
					}
				}
				EditEntry::Notice { id, .. } => {
					if !notices.insert(id.as_str()) {
						report(format!("duplicate notice id '{}'", id));
					}
				}
			}
			keys.insert(entry.key());
		}
		for field in edit.configured_fields() {
			if !schema.has_field(field) {
				report(format!("options set for unknown edit field '{}'", field));
			}
		}
		for key in edit.style_keys() {
			if key != FORM_STYLE_KEY && !keys.contains(key) {
				report(format!("style key '{}' does not name a displayed entry", key));
			}
		}
	}

	for field in descriptor.aliases().keys() {
		if !schema.has_field(field) && !custom.contains(field.as_str()) {
			report(format!("alias for unknown field '{}'", field));
		}
	}

	let mut action_ids = HashSet::new();
	for action in descriptor.actions() {
		if !action_ids.insert(action.id()) {
			report(format!("duplicate action id '{}'", action.id()));
		}
	}
}

/// Immutable registry of admin models
#[derive(Debug)]
pub struct AdminRegistry {
	site: SiteOptions,
	schemas: SchemaSet,
	models: IndexMap<String, ModelDescriptor>,
	sidebar: Vec<SidebarGroup>,
}

impl AdminRegistry {
	/// Site options
	pub fn site(&self) -> &SiteOptions {
		&self.site
	}

	/// Model schemas
	pub fn schemas(&self) -> &SchemaSet {
		&self.schemas
	}

	/// Get a model descriptor
	pub fn get(&self, model: &str) -> Option<&ModelDescriptor> {
		self.models.get(model)
	}

	/// Get a model descriptor or fail
	///
	/// # Errors
	///
	/// Returns `AdminError::ModelNotRegistered` for unknown models.
	pub fn require(&self, model: &str) -> AdminResult<&ModelDescriptor> {
		self.get(model)
			.ok_or_else(|| AdminError::ModelNotRegistered(model.to_string()))
	}

	/// Registered model descriptors, in registration order
	pub fn models(&self) -> impl Iterator<Item = &ModelDescriptor> {
		self.models.values()
	}

	/// Registered model names
	pub fn model_names(&self) -> impl Iterator<Item = &str> {
		self.models.keys().map(String::as_str)
	}

	/// Sidebar groups
	pub fn sidebar(&self) -> &[SidebarGroup] {
		&self.sidebar
	}

	/// Primary key field of a model
	pub fn primary_key(&self, model: &str) -> &str {
		self.schemas
			.get(model)
			.map(ModelSchema::primary_key)
			.unwrap_or("id")
	}

	/// Label a record of `model` with its configured `to_string`
	pub fn label_of(&self, model: &str, record: &Record) -> String {
		let pk = self.primary_key(model);
		match self.get(model) {
			Some(descriptor) => descriptor.label(record, pk),
			None => record.get(pk).map(crate::record::value_text).unwrap_or_default(),
		}
	}

	/// Serializable description of the whole site
	pub fn describe(&self) -> SiteSummary {
		SiteSummary {
			site: self.site.clone(),
			sidebar: self.sidebar.clone(),
			models: self.models.values().map(ModelDescriptor::summary).collect(),
		}
	}
}

/// Site description handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
	/// Site options
	#[serde(flatten)]
	pub site: SiteOptions,
	/// Sidebar groups
	pub sidebar: Vec<SidebarGroup>,
	/// Model summaries
	pub models: Vec<ModelSummary>,
}
