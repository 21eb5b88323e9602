//! # Arcade Admin
//!
//! Declarative admin model registry for the arcade content backend.
//!
//! Each model is described once (list columns, filters, formatters, form
//! layout, validators, persistence hooks and actions) and the registry
//! resolves those descriptions into list views, forms and action outcomes
//! for the rendering layer.
//!
//! ## Feature Flags
//!
//! - `options` (default) - the concrete arcade model configuration
//! - `core` - registry types only
//!
//! ## Quick Example
//!
//! ```rust
//! use arcade_admin::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = Arc::new(MemoryStore::new());
//! store.seed("User", vec![serde_json::json!({
//!     "id": 1,
//!     "name": "Ada Lovelace",
//!     "email": "ada@example.com",
//!     "role": "ADMIN",
//! })]);
//!
//! let site = arcade_admin::options::admin_site(store, AdminSettings::default()).unwrap();
//! let users = site
//!     .list_view("User", &ListQuery::new(), &RequestContext::default())
//!     .await
//!     .unwrap();
//!
//! assert_eq!(users.total, 1);
//! # }
//! ```

pub use arcade_admin_core::{
	actions, context, edit, error, filters, format, hooks, icons, list, model, record, registry,
	resolve, schema, settings, store, upload, validation,
};

#[cfg(feature = "options")]
pub use arcade_admin_options as options;

/// Commonly used types
pub mod prelude {
	pub use arcade_admin_core::{
		Action, ActionOutcome, AdminError, AdminRegistry, AdminResult, AdminSettings, AdminSite,
		AdminStore, ColorScheme, DialogAction, EditEntry, EditViewSpec, ExportFormat, ExportSpec,
		FieldOptions, FilterResolver, FilterSource, FindQuery, Formatter, ListQuery, ListViewSpec,
		MemoryStore, ModelDescriptor, NamedFilter, PersistHooks, PersistMode, Permission,
		Predicate, Record, RecordId, RegistryBuilder, Renderable, RequestContext, ServerAction,
		SidebarGroup, SiteOptions, SubmitOutcome, UploadHandler, Validator,
	};

	// External
	pub use async_trait::async_trait;
}
