//! # Arcade Admin Core
//!
//! Declarative model registry for the arcade administration backend.
//!
//! ## Overview
//!
//! Every data model is described once by a [`ModelDescriptor`]: how its
//! records are labelled, which fields the list and edit views show, how
//! they are formatted and validated, which bulk and dialog actions exist and
//! which hooks run around a write. Descriptors are checked against the model
//! schemas by [`RegistryBuilder::build`] and frozen into an
//! [`AdminRegistry`].
//!
//! At request time an [`AdminSite`] resolves the registry against an
//! [`AdminStore`] into plain serializable views for the rendering engine.
//!
//! ## Features
//!
//! - List views with search, static and dynamic filters, formatters and exports
//! - Edit forms with notices, custom fields, validators and upload handlers
//! - Server actions over selected ids and record-gated dialog actions
//! - `before_db` / `after_db` persistence hooks
//! - Layered settings (defaults, TOML file, `ARCADE_ADMIN_*` environment)
//!
//! ## Quick Start
//!
//! ```
//! use arcade_admin_core::{
//!     AdminSettings, AdminSite, ListQuery, ListViewSpec, MemoryStore, ModelDescriptor,
//!     RegistryBuilder, RequestContext,
//! };
//! use arcade_admin_core::schema::{FieldDef, FieldKind, ModelSchema};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let settings = AdminSettings::default();
//! let registry = RegistryBuilder::new(settings.site_options())
//!     .schema(
//!         ModelSchema::new("Category")
//!             .field(FieldDef::new("id", FieldKind::Int).primary_key())
//!             .field(FieldDef::new("name", FieldKind::String)),
//!     )
//!     .model(ModelDescriptor::new("Category").list(ListViewSpec::new().display(["name"])))
//!     .build()
//!     .unwrap();
//!
//! let store = MemoryStore::new();
//! store.seed("Category", vec![json!({ "id": 1, "name": "Tech" })]);
//!
//! let site = AdminSite::new(Arc::new(registry), Arc::new(store), settings);
//! let list = site
//!     .list_view("Category", &ListQuery::new(), &RequestContext::default())
//!     .await
//!     .unwrap();
//! assert_eq!(list.rows[0].cells[0].rendered.as_text(), "Tech");
//! # }
//! ```

pub mod actions;
pub mod context;
pub mod edit;
pub mod error;
pub mod filters;
pub mod format;
pub mod hooks;
pub mod icons;
pub mod list;
pub mod model;
pub mod record;
pub mod registry;
pub mod resolve;
pub mod schema;
pub mod settings;
pub mod store;
pub mod upload;
pub mod validation;

pub use actions::{Action, ActionOutcome, DialogAction, ServerAction};
pub use context::{PersistMode, RequestContext};
pub use edit::{EditEntry, EditViewSpec, FieldOptions};
pub use error::{AdminError, AdminResult, ConfigIssue};
pub use filters::{FilterResolver, FilterSource, NamedFilter, Predicate};
pub use format::{FormatContext, Formatter, Renderable};
pub use hooks::PersistHooks;
pub use list::{ExportFormat, ExportSpec, ListViewSpec};
pub use model::{ModelDescriptor, Permission};
pub use record::{Record, RecordId};
pub use registry::{AdminRegistry, ColorScheme, RegistryBuilder, SidebarGroup, SiteOptions};
pub use resolve::{AdminSite, ListQuery, ResolvedForm, ResolvedList, SubmitOutcome};
pub use settings::AdminSettings;
pub use store::{AdminStore, FindQuery, MemoryStore};
pub use upload::{StaticUrlUpload, UploadHandler, UploadInfo};
pub use validation::{FieldError, Validator};
