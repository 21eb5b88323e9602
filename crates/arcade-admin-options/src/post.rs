//! Post and category admin

use arcade_admin_core::actions::{Action, ActionOutcome, DialogAction, ServerAction};
use arcade_admin_core::context::{PersistMode, RequestContext};
use arcade_admin_core::edit::{EditViewSpec, FieldFormat, FieldOptions, RelationDisplay};
use arcade_admin_core::error::AdminResult;
use arcade_admin_core::filters::{FilterResolver, FilterSource, NamedFilter, Predicate};
use arcade_admin_core::format::{Formatter, Renderable};
use arcade_admin_core::hooks::PersistHooks;
use arcade_admin_core::icons;
use arcade_admin_core::list::{ExportFormat, ExportSpec, ListViewSpec};
use arcade_admin_core::model::{ModelDescriptor, Permission};
use arcade_admin_core::record::{Record, RecordId, text};
use arcade_admin_core::store::{AdminStore, FindQuery};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

/// Number of categories offered as list filters
pub const CATEGORY_FILTER_LIMIT: usize = 5;

/// Group shared by the category filters
pub const CATEGORY_FILTER_GROUP: &str = "by_category_id";

/// Marks the selected posts as published
pub struct PublishAction {
	store: Arc<dyn AdminStore>,
}

impl PublishAction {
	/// Create the action over a store
	pub fn new(store: Arc<dyn AdminStore>) -> Self {
		Self { store }
	}
}

#[async_trait]
impl ServerAction for PublishAction {
	fn id(&self) -> &str {
		"publish"
	}

	fn title(&self) -> &str {
		"actions.post.publish.title"
	}

	fn icon(&self) -> Option<&str> {
		Some(icons::CHECK)
	}

	fn success_message(&self) -> Option<&str> {
		Some("actions.post.publish.success")
	}

	fn error_message(&self) -> Option<&str> {
		Some("actions.post.publish.error")
	}

	async fn execute(&self, ids: &[RecordId]) -> AdminResult<ActionOutcome> {
		let Ok(numeric) = ids
			.iter()
			.map(|id| id.trim().parse::<i64>())
			.collect::<Result<Vec<_>, _>>()
		else {
			return Ok(ActionOutcome::error("actions.post.publish.error"));
		};

		tracing::info!("Publishing {} posts", ids.len());
		let keys: Vec<RecordId> = numeric.iter().map(i64::to_string).collect();
		let mut patch = Record::new();
		patch.insert("published".to_string(), Value::Bool(true));
		self.store.update_many("Post", "id", &keys, patch).await?;

		Ok(ActionOutcome::success("actions.post.publish.success"))
	}
}

/// Logs every post write
#[derive(Debug, Clone, Copy, Default)]
pub struct PostHooks;

#[async_trait]
impl PersistHooks for PostHooks {
	async fn before_db(
		&self,
		data: Record,
		mode: PersistMode,
		request: &RequestContext,
	) -> AdminResult<Record> {
		let data_json = Value::Object(data.clone());
		tracing::info!(%mode, path = %request.path, data = %data_json, "intercept beforedb");
		Ok(data)
	}

	async fn after_db(
		&self,
		response: Record,
		mode: PersistMode,
		request: &RequestContext,
	) -> AdminResult<Record> {
		let response_json = Value::Object(response.clone());
		tracing::info!(%mode, path = %request.path, response = %response_json, "intercept afterdb");
		Ok(response)
	}
}

/// One filter per category, read from the store when the list is shown
pub struct CategoryFilters {
	store: Arc<dyn AdminStore>,
}

impl CategoryFilters {
	/// Create the resolver over a store
	pub fn new(store: Arc<dyn AdminStore>) -> Self {
		Self { store }
	}
}

#[async_trait]
impl FilterResolver for CategoryFilters {
	async fn resolve(&self) -> AdminResult<Vec<NamedFilter>> {
		let query = FindQuery::new()
			.select(["id", "name"])
			.take(CATEGORY_FILTER_LIMIT);
		let categories = self.store.find_many("Category", &query).await?;

		Ok(categories
			.iter()
			.map(|category| {
				let id = category.get("id").cloned().unwrap_or(Value::Null);
				NamedFilter::new(
					text(category, "name"),
					Predicate::some("categories", Predicate::equals("id", id)),
				)
				.with_group(CATEGORY_FILTER_GROUP)
			})
			.collect())
	}
}

/// Dialog adding a tag to a post
pub fn add_tag_dialog() -> DialogAction {
	DialogAction::new("add-tag", "actions.post.add-tag.title", "AddTagDialog").with_icon(icons::TAG)
}

fn list(store: Arc<dyn AdminStore>) -> ListViewSpec {
	ListViewSpec::new()
		.export(ExportSpec::new(ExportFormat::Csv, "/api/posts/export?format=csv"))
		.export(ExportSpec::new(ExportFormat::Json, "/api/posts/export?format=json"))
		.display(["id", "title", "published", "author", "categories", "rate", "tags"])
		.filter(NamedFilter::new("Published", Predicate::equals("published", true)))
		.filter(NamedFilter::new("Unpublished", Predicate::equals("published", false)))
		.filter(FilterSource::dynamic(CategoryFilters::new(store)))
		.search(["title", "content", "tags", "author.name"])
		.formatter(
			"author",
			Formatter::new(|author, _| {
				Renderable::strong(author.as_object().map(|a| text(a, "name")).unwrap_or_default())
			}),
		)
		.formatter(
			"published",
			Formatter::new(|value, _| {
				Renderable::text(if value == &json!(true) { "Published" } else { "Unpublished" })
			}),
		)
}

fn edit() -> EditViewSpec {
	EditViewSpec::new()
		.field("content", FieldOptions::new().format(FieldFormat::RichtextHtml))
		.field(
			"categories",
			FieldOptions::new()
				.relation_option_formatter(|category| {
					format!("{} Cat.{}", text(category, "name"), text(category, "id"))
				})
				.display(RelationDisplay::List)
				.order_field("order")
				.relationship_search_field("category"),
		)
		.display([
			"id",
			"title",
			"content",
			"published",
			"categories",
			"author",
			"rate",
			"tags",
		])
		.hooks(PostHooks)
}

/// Post descriptor
pub fn descriptor(store: Arc<dyn AdminStore>) -> ModelDescriptor {
	ModelDescriptor::new("Post")
		.to_string_with(|post| text(post, "title"))
		.title("Posts")
		.icon(icons::NEWSPAPER)
		.permissions([Permission::Edit, Permission::Delete, Permission::Create])
		.action(Action::server(PublishAction::new(store.clone())))
		.action(add_tag_dialog())
		.list(list(store))
		.edit(edit())
}

/// Category descriptor
pub fn category_descriptor() -> ModelDescriptor {
	ModelDescriptor::new("Category")
		.title("Categories")
		.icon(icons::INBOX_STACK)
		.to_string_with(|category| text(category, "name"))
		.list(ListViewSpec::new().display(["name", "posts"]))
		.edit(
			EditViewSpec::new().display(["name", "posts"]).field(
				"posts",
				FieldOptions::new()
					.display(RelationDisplay::List)
					.relationship_search_field("post")
					.order_field("order"),
			),
		)
}
