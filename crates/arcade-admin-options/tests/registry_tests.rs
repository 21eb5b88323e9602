//! Registry construction tests for the arcade models

use arcade_admin_core::model::Permission;
use arcade_admin_core::registry::ColorScheme;
use arcade_admin_core::settings::AdminSettings;
use arcade_admin_core::store::{AdminStore, MemoryStore};
use arcade_admin_options::{SIDEBAR_MODELS, build_registry, schemas};
use rstest::rstest;
use std::sync::Arc;

fn registry() -> arcade_admin_core::registry::AdminRegistry {
	let store: Arc<dyn AdminStore> = Arc::new(MemoryStore::new());
	build_registry(store, &AdminSettings::default()).unwrap()
}

#[rstest]
fn test_registry_builds_with_site_defaults() {
	// Act
	let registry = registry();

	// Assert
	assert_eq!(registry.site().title, "⚡️ My Admin");
	assert_eq!(registry.site().default_color_scheme, ColorScheme::Dark);
	assert_eq!(registry.model_names().count(), 15);
}

#[rstest]
fn test_sidebar_lists_catalogue_models() {
	let registry = registry();

	let sidebar = registry.sidebar();

	assert_eq!(sidebar.len(), 1);
	assert_eq!(sidebar[0].title, None);
	assert_eq!(sidebar[0].models, SIDEBAR_MODELS.map(String::from).to_vec());
	assert!(!sidebar[0].models.iter().any(|m| m == "Post" || m == "Category"));
}

#[rstest]
fn test_configured_fields_exist_on_schemas() {
	// Arrange
	let registry = registry();
	let schemas = schemas::all();

	// Act / Assert
	for descriptor in registry.models() {
		let schema = schemas.get(descriptor.name()).unwrap();
		let Some(list) = descriptor.list_view() else {
			continue;
		};
		for field in list.display_fields().iter().chain(list.copy_fields()) {
			assert!(
				schema.has_field(field),
				"{}.{} is not a schema field",
				descriptor.name(),
				field
			);
		}
		for path in list.search_fields() {
			assert!(
				schemas.resolve_path(descriptor.name(), path).is_some(),
				"{}.{} does not resolve",
				descriptor.name(),
				path
			);
		}
	}
}

#[rstest]
#[case("User", "Users", "UsersIcon")]
#[case("Post", "Posts", "NewspaperIcon")]
#[case("Category", "Categories", "InboxStackIcon")]
#[case("Game", "Game", "RocketLaunchIcon")]
#[case("GameMedia", "Game Media", "PhotoIcon")]
fn test_model_titles_and_icons(#[case] model: &str, #[case] title: &str, #[case] icon: &str) {
	let registry = registry();

	let descriptor = registry.require(model).unwrap();

	assert_eq!(descriptor.display_title(), title);
	assert_eq!(descriptor.icon_name(), Some(icon));
}

#[rstest]
#[case("User")]
#[case("Post")]
fn test_blog_models_permit_everything(#[case] model: &str) {
	let registry = registry();

	let descriptor = registry.require(model).unwrap();

	for permission in Permission::ALL {
		assert!(descriptor.allows(permission));
	}
}

#[rstest]
fn test_settings_title_flows_into_site() {
	// Arrange
	let settings = AdminSettings {
		title: "Arcade Backoffice".to_string(),
		default_color_scheme: ColorScheme::Light,
		..AdminSettings::default()
	};
	let store: Arc<dyn AdminStore> = Arc::new(MemoryStore::new());

	// Act
	let registry = build_registry(store, &settings).unwrap();
	let described = serde_json::to_value(registry.describe()).unwrap();

	// Assert
	assert_eq!(described["title"], "Arcade Backoffice");
	assert_eq!(described["default_color_scheme"], "light");
	assert_eq!(described["models"].as_array().unwrap().len(), 15);
}
