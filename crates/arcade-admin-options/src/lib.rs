//! # Arcade Admin Options
//!
//! Admin configuration of every arcade model: the blog models (`User`,
//! `Post`, `Category`) and the catalogue models (`Game`, `Account`,
//! `Profile`, ...).
//!
//! ## Example
//!
//! ```
//! use arcade_admin_core::{AdminSettings, MemoryStore};
//! use std::sync::Arc;
//!
//! let registry = arcade_admin_options::build_registry(
//!     Arc::new(MemoryStore::new()),
//!     &AdminSettings::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(registry.site().title, "⚡️ My Admin");
//! assert!(registry.get("Post").is_some());
//! ```

pub mod arcade;
pub mod post;
pub mod schemas;
pub mod user;

use arcade_admin_core::error::AdminResult;
use arcade_admin_core::registry::{AdminRegistry, RegistryBuilder, SidebarGroup};
use arcade_admin_core::resolve::AdminSite;
use arcade_admin_core::settings::AdminSettings;
use arcade_admin_core::store::AdminStore;
use std::sync::Arc;

/// Models listed in the sidebar, in order
pub const SIDEBAR_MODELS: [&str; 13] = [
	"User",
	"Game",
	"Account",
	"Profile",
	"PlayerLaunchGame",
	"Blockchain",
	"GameTag",
	"GameTagRelation",
	"GameSection",
	"GameSectionRelation",
	"GamePlatform",
	"GamePlatformRelation",
	"GameMedia",
];

/// Build the arcade registry.
///
/// `store` backs the post publish action and the category filters.
///
/// # Errors
///
/// Returns `AdminError::Configuration` if a descriptor does not match the
/// schemas.
pub fn build_registry(store: Arc<dyn AdminStore>, settings: &AdminSettings) -> AdminResult<AdminRegistry> {
	RegistryBuilder::new(settings.site_options())
		.schemas(schemas::all())
		.model(user::descriptor(&settings.avatar_upload_url))
		.model(post::descriptor(store))
		.model(post::category_descriptor())
		.model(arcade::game())
		.model(arcade::account())
		.model(arcade::profile())
		.model(arcade::player_launch_game())
		.model(arcade::blockchain())
		.model(arcade::game_tag())
		.model(arcade::game_tag_relation())
		.model(arcade::game_section())
		.model(arcade::game_section_relation())
		.model(arcade::game_platform())
		.model(arcade::game_platform_relation())
		.model(arcade::game_media())
		.sidebar(SidebarGroup::untitled(SIDEBAR_MODELS))
		.build()
}

/// Build the registry and bind it to `store`
///
/// # Errors
///
/// See [`build_registry`].
pub fn admin_site(store: Arc<dyn AdminStore>, settings: AdminSettings) -> AdminResult<AdminSite> {
	let registry = build_registry(store.clone(), &settings)?;
	Ok(AdminSite::new(Arc::new(registry), store, settings))
}
