//! Request-time resolution of the registry into views
//!
//! [`AdminSite`] ties the immutable registry to a store and the settings.
//! Each method handles one admin request: it reads the configuration,
//! evaluates callbacks and returns plain serializable values for the
//! rendering engine.

use crate::actions::{Action, ActionOutcome, ActionSummary, DialogAction};
use crate::context::{PersistMode, RequestContext};
use crate::edit::{EditEntry, EditViewSpec, FORM_STYLE_KEY, FieldFormat, FieldOptions, RelationDisplay};
use crate::error::{AdminError, AdminResult};
use crate::filters::{NamedFilter, Predicate, apply_selection, combine_active, resolve_sources};
use crate::format::{FormatContext, Renderable, default_render};
use crate::list::{ExportSpec, ListViewSpec};
use crate::model::{ModelDescriptor, Permission};
use crate::record::{Record, RecordId, value_text};
use crate::registry::{AdminRegistry, SiteSummary};
use crate::schema::ModelSchema;
use crate::settings::AdminSettings;
use crate::store::{AdminStore, FindQuery};
use crate::upload::UploadInfo;
use crate::validation::{FieldError, FieldErrors, REQUIRED_KEY, is_present, validate_submission_shape};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// Parameters of a list request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
	/// 1-based page number
	pub page: usize,
	/// Page size override
	pub page_size: Option<usize>,
	/// Search term
	pub search: Option<String>,
	/// Names of the filters to apply; `None` keeps the configured flags
	pub filters: Option<Vec<String>>,
}

impl Default for ListQuery {
	fn default() -> Self {
		Self {
			page: 1,
			page_size: None,
			search: None,
			filters: None,
		}
	}
}

impl ListQuery {
	/// First page, no search, configured filters
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the page number
	pub fn page(mut self, page: usize) -> Self {
		self.page = page;
		self
	}

	/// Set the page size
	pub fn page_size(mut self, page_size: usize) -> Self {
		self.page_size = Some(page_size);
		self
	}

	/// Set the search term
	pub fn search(mut self, term: impl Into<String>) -> Self {
		self.search = Some(term.into());
		self
	}

	/// Select filters by name
	pub fn filters<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.filters = Some(names.into_iter().map(Into::into).collect());
		self
	}
}

/// List column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColumn {
	/// Field name
	pub field: String,
	/// Alias or field name
	pub label: String,
	/// Whether the cell has a copy button
	pub copy: bool,
}

/// Rendered list cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCell {
	/// Field name
	pub field: String,
	/// Stored value
	pub value: Value,
	/// Rendered value
	pub rendered: Renderable,
}

/// List row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRow {
	/// Primary key value
	pub id: RecordId,
	/// Record label
	pub label: String,
	/// Cells in column order
	pub cells: Vec<ResolvedCell>,
	/// Dialog actions available for this record
	pub actions: Vec<String>,
}

/// Resolved list view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedList {
	/// Model name
	pub model: String,
	/// Display title
	pub title: String,
	/// Columns
	pub columns: Vec<ResolvedColumn>,
	/// Rows of the current page
	pub rows: Vec<ResolvedRow>,
	/// Number of records matching filters and search
	pub total: u64,
	/// 1-based page number
	pub page: usize,
	/// Page size
	pub page_size: usize,
	/// Every filter with its active flag
	pub filters: Vec<NamedFilter>,
	/// Applied search term
	#[serde(skip_serializing_if = "Option::is_none")]
	pub search: Option<String>,
	/// Export links
	pub exports: Vec<ExportSpec>,
	/// Model actions
	pub actions: Vec<ActionSummary>,
}

/// Related record offered in a relation picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationChoice {
	/// Primary key of the related record
	pub id: RecordId,
	/// Option label
	pub label: String,
}

/// Resolved form field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
	/// Field name
	pub name: String,
	/// Alias or field name
	pub label: String,
	/// Current value (`null` on create)
	pub value: Value,
	/// Current value through the field formatter
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rendered: Option<Renderable>,
	/// Style class
	#[serde(skip_serializing_if = "Option::is_none")]
	pub class: Option<String>,
	/// Value must be provided
	pub required: bool,
	/// Virtual field not stored on the model
	pub custom: bool,
	/// Text below the input
	#[serde(skip_serializing_if = "Option::is_none")]
	pub helper_text: Option<String>,
	/// Label tooltip
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tooltip: Option<String>,
	/// Custom input component
	#[serde(skip_serializing_if = "Option::is_none")]
	pub input: Option<String>,
	/// Input format
	#[serde(skip_serializing_if = "Option::is_none")]
	pub format: Option<FieldFormat>,
	/// Relation display mode
	#[serde(skip_serializing_if = "Option::is_none")]
	pub display: Option<RelationDisplay>,
	/// Join-record position field
	#[serde(skip_serializing_if = "Option::is_none")]
	pub order_field: Option<String>,
	/// Field searched by the relation picker
	#[serde(skip_serializing_if = "Option::is_none")]
	pub relationship_search_field: Option<String>,
	/// Options of the relation picker
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub choices: Vec<RelationChoice>,
	/// Whether uploads are accepted
	pub upload: bool,
}

/// Resolved form entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEntry {
	/// Input
	Field(FormField),
	/// Informational block
	Notice {
		id: String,
		title: String,
		#[serde(skip_serializing_if = "Option::is_none")]
		description: Option<String>,
		#[serde(skip_serializing_if = "Option::is_none")]
		class: Option<String>,
	},
}

/// Resolved edit or create form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedForm {
	/// Model name
	pub model: String,
	/// Display title
	pub title: String,
	/// Create or edit
	pub mode: PersistMode,
	/// Record being edited
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<RecordId>,
	/// Label of the record being edited
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Class of the form container
	#[serde(skip_serializing_if = "Option::is_none")]
	pub form_class: Option<String>,
	/// Entries in display order
	pub entries: Vec<FormEntry>,
	/// Dialog actions available for the record
	pub actions: Vec<ActionSummary>,
	/// Saving is not permitted
	pub read_only: bool,
}

/// Result of a form submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
	/// Record written; carries the record returned by `after_db`
	Saved(Record),
	/// Validation failed; nothing was written
	Invalid(FieldErrors),
}

/// Dialog opened for a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogView {
	/// Dialog action
	pub action: ActionSummary,
	/// Record label
	pub label: String,
	/// Record the dialog operates on
	pub record: Record,
}

/// Admin site bound to a store
#[derive(Clone)]
pub struct AdminSite {
	registry: Arc<AdminRegistry>,
	store: Arc<dyn AdminStore>,
	settings: AdminSettings,
}

impl AdminSite {
	/// Create a site
	pub fn new(registry: Arc<AdminRegistry>, store: Arc<dyn AdminStore>, settings: AdminSettings) -> Self {
		Self {
			registry,
			store,
			settings,
		}
	}

	/// Model registry
	pub fn registry(&self) -> &AdminRegistry {
		&self.registry
	}

	/// Backing store
	pub fn store(&self) -> &Arc<dyn AdminStore> {
		&self.store
	}

	/// Settings
	pub fn settings(&self) -> &AdminSettings {
		&self.settings
	}

	/// Serializable description of the site
	pub fn describe(&self) -> SiteSummary {
		self.registry.describe()
	}

	fn model(&self, model: &str) -> AdminResult<(&ModelDescriptor, &ModelSchema)> {
		let descriptor = self.registry.require(model)?;
		let schema = self
			.registry
			.schemas()
			.get(model)
			.ok_or_else(|| AdminError::ModelNotRegistered(model.to_string()))?;
		Ok((descriptor, schema))
	}

	fn format_context(&self, request: &RequestContext) -> FormatContext {
		if request.locale.is_empty() {
			FormatContext::new(self.settings.default_locale.clone())
		} else {
			request.format_context()
		}
	}

	/// Resolve the list view of a model.
	///
	/// Dynamic filter sources are evaluated here, on every call.
	///
	/// # Errors
	///
	/// Returns `AdminError::ModelNotRegistered` for unknown models and
	/// propagates filter resolver and store errors.
	pub async fn list_view(
		&self,
		model: &str,
		query: &ListQuery,
		request: &RequestContext,
	) -> AdminResult<ResolvedList> {
		let (descriptor, schema) = self.model(model)?;
		let list: Cow<'_, ListViewSpec> = match descriptor.list_view() {
			Some(list) => Cow::Borrowed(list),
			None => Cow::Owned(ListViewSpec::new().display(schema.fields().map(|f| f.name.clone()))),
		};

		let mut filters = resolve_sources(list.filters()).await?;
		apply_selection(&mut filters, query.filters.as_deref());
		let search = query
			.search
			.as_deref()
			.map(str::trim)
			.filter(|term| !term.is_empty());
		let searched = search.and_then(|term| search_predicate(&list, term).map(|p| (term, p)));
		let search = searched.as_ref().map(|(term, _)| term.to_string());
		let predicate = [combine_active(&filters), searched.map(|(_, p)| p)]
			.into_iter()
			.flatten()
			.reduce(|left, right| Predicate::and(vec![left, right]));

		let page = query.page.max(1);
		let page_size = query.page_size.unwrap_or(self.settings.page_size).max(1);
		let total = self.store.count(model, predicate.as_ref()).await?;
		let records = self
			.store
			.find_many(
				model,
				&FindQuery::new()
					.filter(predicate)
					.page((page - 1).saturating_mul(page_size), page_size),
			)
			.await?;
		tracing::debug!(model, total, page, rows = records.len(), "list view resolved");

		let format = self.format_context(request);
		let pk = schema.primary_key();
		let columns = list
			.display_fields()
			.iter()
			.map(|field| ResolvedColumn {
				field: field.clone(),
				label: descriptor.label_for(field).to_string(),
				copy: list.is_copyable(field),
			})
			.collect();
		let rows = records
			.iter()
			.map(|record| ResolvedRow {
				id: record.get(pk).map(value_text).unwrap_or_default(),
				label: descriptor.label(record, pk),
				cells: list
					.display_fields()
					.iter()
					.map(|field| self.render_cell(schema, &list, field, record, &format))
					.collect(),
				actions: allowed_dialogs(descriptor, record)
					.map(|dialog| dialog.id().to_string())
					.collect(),
			})
			.collect();

		Ok(ResolvedList {
			model: model.to_string(),
			title: descriptor.display_title().to_string(),
			columns,
			rows,
			total,
			page,
			page_size,
			filters,
			search,
			exports: list.exports().to_vec(),
			actions: descriptor.actions().iter().map(Action::summary).collect(),
		})
	}

	fn render_cell(
		&self,
		schema: &ModelSchema,
		list: &ListViewSpec,
		field: &str,
		record: &Record,
		format: &FormatContext,
	) -> ResolvedCell {
		let value = record.get(field).cloned().unwrap_or(Value::Null);
		let rendered = match list.formatter_for(field) {
			Some(formatter) => formatter.format(&value, format),
			None => self.render_value(schema, field, &value),
		};
		ResolvedCell {
			field: field.to_string(),
			value,
			rendered,
		}
	}

	// Relations render through the target model's label.
	fn render_value(&self, schema: &ModelSchema, field: &str, value: &Value) -> Renderable {
		let Some(target) = schema.get(field).and_then(|f| f.kind.relation_target()) else {
			return default_render(value);
		};
		match value {
			Value::Object(related) => Renderable::text(self.registry.label_of(target, related)),
			Value::Array(items) => Renderable::text(
				items
					.iter()
					.filter_map(Value::as_object)
					.map(|related| self.registry.label_of(target, related))
					.collect::<Vec<_>>()
					.join(", "),
			),
			other => default_render(other),
		}
	}

	/// Resolve the create form (`id` = `None`) or the edit form of a record
	///
	/// # Errors
	///
	/// Returns `AdminError::PermissionDenied` for a create form on a model
	/// that does not permit creation and `AdminError::RecordNotFound` for
	/// unknown ids.
	pub async fn edit_form(
		&self,
		model: &str,
		id: Option<&str>,
		request: &RequestContext,
	) -> AdminResult<ResolvedForm> {
		let (descriptor, schema) = self.model(model)?;
		let pk = schema.primary_key();
		let record = match id {
			Some(id) => Some(self.store.find_one(model, pk, id).await?.ok_or_else(|| {
				AdminError::RecordNotFound {
					model: model.to_string(),
					id: id.to_string(),
				}
			})?),
			None if descriptor.allows(Permission::Create) => None,
			None => {
				return Err(AdminError::PermissionDenied(format!(
					"Cannot create {} records",
					model
				)));
			}
		};
		let edit: Cow<'_, EditViewSpec> = match descriptor.edit_view() {
			Some(edit) => Cow::Borrowed(edit),
			None => Cow::Owned(
				EditViewSpec::new().display(schema.fields().map(|f| EditEntry::field(f.name.clone()))),
			),
		};

		let format = self.format_context(request);
		let mut entries = Vec::with_capacity(edit.entries().len());
		for entry in edit.entries() {
			let class = edit.style_for(entry.key()).map(str::to_string);
			match entry {
				EditEntry::Notice {
					id,
					title,
					description,
				} => entries.push(FormEntry::Notice {
					id: id.clone(),
					title: title.clone(),
					description: description.clone(),
					class,
				}),
				EditEntry::Field { name } => {
					let field = self
						.form_field(descriptor, schema, &edit, name, record.as_ref(), &format)
						.await?;
					entries.push(FormEntry::Field(FormField { class, ..field }));
				}
			}
		}

		let (mode, read_only, actions) = match &record {
			Some(record) => (
				PersistMode::Edit,
				!descriptor.allows(Permission::Edit),
				allowed_dialogs(descriptor, record)
					.map(|dialog| Action::Dialog(dialog.clone()).summary())
					.collect(),
			),
			None => (PersistMode::Create, false, Vec::new()),
		};

		Ok(ResolvedForm {
			model: model.to_string(),
			title: descriptor.display_title().to_string(),
			mode,
			id: id.map(str::to_string),
			label: record.as_ref().map(|record| descriptor.label(record, pk)),
			form_class: edit.style_for(FORM_STYLE_KEY).map(str::to_string),
			entries,
			actions,
			read_only,
		})
	}

	async fn form_field(
		&self,
		descriptor: &ModelDescriptor,
		schema: &ModelSchema,
		edit: &EditViewSpec,
		name: &str,
		record: Option<&Record>,
		format: &FormatContext,
	) -> AdminResult<FormField> {
		let default_options = FieldOptions::default();
		let options = edit.options_for(name).unwrap_or(&default_options);
		let custom = edit.is_custom_field(name);
		let value = if custom {
			Value::Null
		} else {
			record
				.and_then(|record| record.get(name))
				.cloned()
				.unwrap_or(Value::Null)
		};
		let rendered = options
			.formatter
			.as_ref()
			.filter(|_| !value.is_null())
			.map(|formatter| formatter.format(&value, format));

		let mut choices = Vec::new();
		if let Some(target) = schema.get(name).and_then(|f| f.kind.relation_target()) {
			let target_pk = self.registry.primary_key(target);
			let related = self
				.store
				.find_many(target, &FindQuery::new().take(self.settings.page_size))
				.await?;
			choices = related
				.iter()
				.map(|related| RelationChoice {
					id: related.get(target_pk).map(value_text).unwrap_or_default(),
					label: match &options.relation_option_formatter {
						Some(label) => label(related),
						None => self.registry.label_of(target, related),
					},
				})
				.collect();
		}

		Ok(FormField {
			name: name.to_string(),
			label: descriptor.label_for(name).to_string(),
			value,
			rendered,
			class: None,
			required: options.required,
			custom,
			helper_text: options.helper_text.clone(),
			tooltip: options.tooltip.clone(),
			input: options.input.clone(),
			format: options.format,
			display: options.display,
			order_field: options.order_field.clone(),
			relationship_search_field: options.relationship_search_field.clone(),
			choices,
			upload: options.upload.is_some(),
		})
	}

	/// Validate and persist a form submission.
	///
	/// Runs the permission check, the required and validator checks (every
	/// failure is collected), `before_db`, the store write with virtual
	/// fields removed, and `after_db`. In edit mode the record is identified
	/// by the primary key in `data`.
	///
	/// # Errors
	///
	/// Validation failures are returned as [`SubmitOutcome::Invalid`].
	/// Permission, shape, hook and store failures abort with `AdminError`.
	pub async fn submit(
		&self,
		model: &str,
		mode: PersistMode,
		data: Record,
		request: &RequestContext,
	) -> AdminResult<SubmitOutcome> {
		let (descriptor, schema) = self.model(model)?;
		let required_permission = match mode {
			PersistMode::Create => Permission::Create,
			PersistMode::Edit => Permission::Edit,
		};
		if !descriptor.allows(required_permission) {
			return Err(AdminError::PermissionDenied(format!(
				"Cannot {} {} records",
				mode, model
			)));
		}

		let edit = descriptor.edit_view();
		let mut allowed: Vec<&str> = schema.fields().map(|f| f.name.as_str()).collect();
		allowed.extend(edit.into_iter().flat_map(|e| e.custom_field_names()));
		validate_submission_shape(&data, &allowed)?;

		if let Some(edit) = edit {
			let errors = validate_fields(edit, mode, &data).await;
			if !errors.is_empty() {
				tracing::debug!(model, invalid = errors.len(), "submission rejected");
				return Ok(SubmitOutcome::Invalid(errors));
			}
		}

		let hooks = edit.and_then(EditViewSpec::persist_hooks);
		let mut data = match hooks {
			Some(hooks) => hooks.before_db(data, mode, request).await?,
			None => data,
		};
		if let Some(edit) = edit {
			data.retain(|field, _| !edit.is_custom_field(field));
		}

		let pk = schema.primary_key();
		let stored = match mode {
			PersistMode::Create => self.store.create(model, pk, data).await?,
			PersistMode::Edit => {
				let id = data
					.get(pk)
					.map(value_text)
					.filter(|id| !id.is_empty())
					.ok_or_else(|| AdminError::Validation(format!("Missing '{}' for edit", pk)))?;
				self.store.update(model, pk, &id, data).await?
			}
		};
		let response = match hooks {
			Some(hooks) => hooks.after_db(stored, mode, request).await?,
			None => stored,
		};
		tracing::info!(model, %mode, "record saved");
		Ok(SubmitOutcome::Saved(response))
	}

	/// Run a server action over selected ids.
	///
	/// Handler errors become [`ActionOutcome::Error`] carrying the action's
	/// error message.
	///
	/// # Errors
	///
	/// Returns `AdminError::InvalidAction` for unknown ids and dialog actions.
	pub async fn run_action(
		&self,
		model: &str,
		action_id: &str,
		ids: &[RecordId],
	) -> AdminResult<ActionOutcome> {
		let descriptor = self.registry.require(model)?;
		let action = descriptor.find_action(action_id).ok_or_else(|| {
			AdminError::InvalidAction(format!("Action '{}' not found on model '{}'", action_id, model))
		})?;
		let Action::Server(action) = action else {
			return Err(AdminError::InvalidAction(format!(
				"Action '{}' opens a dialog and cannot be executed",
				action_id
			)));
		};

		tracing::info!(model, action = action_id, count = ids.len(), "executing action");
		match action.execute(ids).await {
			Ok(outcome) => Ok(outcome),
			Err(e) => {
				tracing::warn!(model, action = action_id, error = %e, "action failed");
				Ok(ActionOutcome::error(
					action
						.error_message()
						.map(str::to_string)
						.unwrap_or_else(|| e.to_string()),
				))
			}
		}
	}

	/// Open a dialog action for a record
	///
	/// # Errors
	///
	/// Returns `AdminError::PermissionDenied` if the dialog's predicate
	/// rejects the record.
	pub async fn dialog(&self, model: &str, action_id: &str, record_id: &str) -> AdminResult<DialogView> {
		let (descriptor, schema) = self.model(model)?;
		let Some(Action::Dialog(dialog)) = descriptor.find_action(action_id) else {
			return Err(AdminError::InvalidAction(format!(
				"Dialog '{}' not found on model '{}'",
				action_id, model
			)));
		};
		let pk = schema.primary_key();
		let record = self
			.store
			.find_one(model, pk, record_id)
			.await?
			.ok_or_else(|| AdminError::RecordNotFound {
				model: model.to_string(),
				id: record_id.to_string(),
			})?;
		if !dialog.can_execute(&record) {
			tracing::warn!(model, action = action_id, id = record_id, "dialog rejected for record");
			return Err(AdminError::PermissionDenied(format!(
				"Dialog '{}' is not available for record '{}'",
				action_id, record_id
			)));
		}

		Ok(DialogView {
			action: Action::Dialog(dialog.clone()).summary(),
			label: descriptor.label(&record, pk),
			record,
		})
	}

	/// Delete records
	///
	/// # Errors
	///
	/// Returns `AdminError::PermissionDenied` if the model does not permit
	/// deletion.
	pub async fn delete(&self, model: &str, ids: &[RecordId]) -> AdminResult<u64> {
		let (descriptor, schema) = self.model(model)?;
		if !descriptor.allows(Permission::Delete) {
			return Err(AdminError::PermissionDenied(format!(
				"Cannot delete {} records",
				model
			)));
		}
		let deleted = self.store.delete_many(model, schema.primary_key(), ids).await?;
		tracing::info!(model, deleted, "records deleted");
		Ok(deleted)
	}

	/// Hand an uploaded file to the field's upload handler
	///
	/// # Errors
	///
	/// Returns `AdminError::Upload` if the field has no handler and
	/// propagates handler errors.
	pub async fn upload(
		&self,
		model: &str,
		field: &str,
		bytes: Vec<u8>,
		info: UploadInfo,
		request: &RequestContext,
	) -> AdminResult<String> {
		let descriptor = self.registry.require(model)?;
		let handler = descriptor
			.edit_view()
			.and_then(|edit| edit.options_for(field))
			.and_then(|options| options.upload.as_ref())
			.ok_or_else(|| {
				AdminError::Upload(format!("Field '{}' of '{}' does not accept uploads", field, model))
			})?;
		handler.upload(bytes, info, request).await
	}
}

fn allowed_dialogs<'a>(
	descriptor: &'a ModelDescriptor,
	record: &'a Record,
) -> impl Iterator<Item = &'a DialogAction> + 'a {
	descriptor.actions().iter().filter_map(move |action| match action {
		Action::Dialog(dialog) if dialog.can_execute(record) => Some(dialog),
		_ => None,
	})
}

fn search_predicate(list: &ListViewSpec, term: &str) -> Option<Predicate> {
	let mut clauses: Vec<Predicate> = list
		.search_fields()
		.iter()
		.map(|field| Predicate::contains(field.clone(), term))
		.collect();
	match clauses.len() {
		0 => None,
		1 => clauses.pop(),
		_ => Some(Predicate::or(clauses)),
	}
}

// Create validates every displayed field; edit only the submitted ones.
async fn validate_fields(edit: &EditViewSpec, mode: PersistMode, data: &Record) -> FieldErrors {
	let mut errors = FieldErrors::new();
	for name in edit.field_names() {
		let Some(options) = edit.options_for(name) else {
			continue;
		};
		let value = data.get(name);
		if options.required && !is_present(value) {
			errors.insert(name.to_string(), FieldError::new(REQUIRED_KEY));
			continue;
		}
		if let Some(validator) = &options.validate
			&& (mode == PersistMode::Create || value.is_some())
			&& let Err(error) = validator.validate(value).await
		{
			errors.insert(name.to_string(), error);
		}
	}
	errors
}
