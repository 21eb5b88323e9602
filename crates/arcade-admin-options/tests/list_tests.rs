//! List views of the arcade models

mod common;

use arcade_admin_core::context::RequestContext;
use arcade_admin_core::format::Renderable;
use arcade_admin_core::list::ExportFormat;
use arcade_admin_core::resolve::{AdminSite, ListQuery, ResolvedList};
use arcade_admin_core::settings::AdminSettings;
use arcade_admin_core::store::{AdminStore, MemoryStore};
use common::site;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

fn cell<'a>(list: &'a ResolvedList, row: usize, field: &str) -> &'a Renderable {
	&list.rows[row]
		.cells
		.iter()
		.find(|cell| cell.field == field)
		.unwrap()
		.rendered
}

#[rstest]
#[tokio::test]
async fn test_user_list_columns_and_formatters(site: (AdminSite, Arc<MemoryStore>)) {
	// Arrange
	let (site, _) = site;

	// Act
	let list = site
		.list_view("User", &ListQuery::new(), &RequestContext::default())
		.await
		.unwrap();

	// Assert
	let labels: Vec<_> = list.columns.iter().map(|c| c.label.as_str()).collect();
	assert_eq!(labels, ["ID", "Full name", "email", "posts", "role", "Date of birth"]);
	assert!(list.columns.iter().find(|c| c.field == "email").unwrap().copy);
	assert_eq!(
		cell(&list, 0, "role"),
		&Renderable::strong_with_class("ADMIN", "dark:text-white")
	);
	assert_eq!(cell(&list, 0, "birthDate").as_text(), "1/15/1990");
	assert_eq!(cell(&list, 1, "birthDate").as_text(), "");
	assert_eq!(list.exports[0].format, ExportFormat::Csv);
	assert_eq!(list.exports[0].url, "/api/users/export");
}

#[rstest]
#[case("en", "1/15/1990")]
#[case("fr", "15/01/1990")]
#[tokio::test]
async fn test_birth_date_follows_request_locale(
	site: (AdminSite, Arc<MemoryStore>),
	#[case] locale: &str,
	#[case] expected: &str,
) {
	let (site, _) = site;
	let request = RequestContext::default().with_locale(locale);

	let list = site.list_view("User", &ListQuery::new(), &request).await.unwrap();

	assert_eq!(cell(&list, 0, "birthDate").as_text(), expected);
}

#[rstest]
#[case(vec!["is Admin"], 1)]
#[case(vec!["@premieroctet.com"], 1)]
#[case(vec!["is Admin", "@premieroctet.com"], 1)]
#[case(vec![], 3)]
#[tokio::test]
async fn test_user_static_filters(
	site: (AdminSite, Arc<MemoryStore>),
	#[case] selected: Vec<&str>,
	#[case] expected: u64,
) {
	let (site, _) = site;

	let list = site
		.list_view("User", &ListQuery::new().filters(selected), &RequestContext::default())
		.await
		.unwrap();

	assert_eq!(list.total, expected);
}

#[rstest]
#[case("grace", vec!["2"])]
#[case("AUTHOR", vec!["3"])]
#[case("example.com", vec!["2", "3"])]
#[case("nobody", vec![])]
#[tokio::test]
async fn test_user_search(
	site: (AdminSite, Arc<MemoryStore>),
	#[case] term: &str,
	#[case] expected: Vec<&str>,
) {
	let (site, _) = site;

	let list = site
		.list_view("User", &ListQuery::new().search(term), &RequestContext::default())
		.await
		.unwrap();

	let ids: Vec<_> = list.rows.iter().map(|row| row.id.as_str()).collect();
	assert_eq!(ids, expected);
}

#[rstest]
#[tokio::test]
async fn test_post_list_renders_author_and_state(site: (AdminSite, Arc<MemoryStore>)) {
	// Arrange
	let (site, _) = site;

	// Act
	let list = site
		.list_view("Post", &ListQuery::new(), &RequestContext::default())
		.await
		.unwrap();

	// Assert
	assert_eq!(cell(&list, 0, "author"), &Renderable::strong("Ada Lovelace"));
	assert_eq!(cell(&list, 0, "published").as_text(), "Published");
	assert_eq!(cell(&list, 1, "published").as_text(), "Unpublished");
	assert_eq!(cell(&list, 1, "categories").as_text(), "Travel, Food");
	assert_eq!(list.exports.len(), 2);
	let filters: Vec<_> = list.filters.iter().map(|f| f.name.as_str()).collect();
	assert_eq!(
		filters,
		["Published", "Unpublished", "Tech", "Travel", "Food", "Music", "Sports"]
	);
	let actions: Vec<_> = list.actions.iter().map(|a| a.id.as_str()).collect();
	assert_eq!(actions, ["publish", "add-tag"]);
}

#[rstest]
#[case("ada", vec!["1", "3"])]
#[case("wip", vec!["3"])]
#[case("ownership", vec!["1"])]
#[tokio::test]
async fn test_post_search_reaches_author_and_tags(
	site: (AdminSite, Arc<MemoryStore>),
	#[case] term: &str,
	#[case] expected: Vec<&str>,
) {
	let (site, _) = site;

	let list = site
		.list_view("Post", &ListQuery::new().search(term), &RequestContext::default())
		.await
		.unwrap();

	let ids: Vec<_> = list.rows.iter().map(|row| row.id.as_str()).collect();
	assert_eq!(ids, expected);
}

#[rstest]
#[tokio::test]
async fn test_post_list_paginates(site: (AdminSite, Arc<MemoryStore>)) {
	let (site, _) = site;
	let query = ListQuery::new().page(2).page_size(2);

	let list = site.list_view("Post", &query, &RequestContext::default()).await.unwrap();

	assert_eq!(list.total, 3);
	assert_eq!(list.rows.len(), 1);
	assert_eq!(list.rows[0].id, "3");
}

#[rstest]
#[tokio::test]
async fn test_category_filters_follow_the_store_after_build() {
	// Arrange
	let store = Arc::new(MemoryStore::new());
	store.seed("Post", common::posts());
	let dyn_store: Arc<dyn AdminStore> = store.clone();
	let site = arcade_admin_options::admin_site(dyn_store, AdminSettings::default()).unwrap();
	let names = |list: &ResolvedList| -> Vec<String> {
		list.filters.iter().map(|f| f.name.clone()).collect()
	};

	// Act
	let before = site
		.list_view("Post", &ListQuery::new(), &RequestContext::default())
		.await
		.unwrap();
	store.seed("Category", vec![json!({ "id": 2, "name": "Travel" })]);
	let after = site
		.list_view("Post", &ListQuery::new(), &RequestContext::default())
		.await
		.unwrap();

	// Assert
	assert_eq!(names(&before), ["Published", "Unpublished"]);
	assert_eq!(names(&after), ["Published", "Unpublished", "Travel"]);
}

#[rstest]
#[case(vec!["Tech", "Food"], vec!["1", "2"])]
#[case(vec!["Travel"], vec!["2"])]
#[case(vec!["Music", "Sports"], vec![])]
#[case(vec!["Published", "Tech", "Travel"], vec!["1"])]
#[tokio::test]
async fn test_category_filters_select_posts(
	site: (AdminSite, Arc<MemoryStore>),
	#[case] selected: Vec<&str>,
	#[case] expected: Vec<&str>,
) {
	let (site, _) = site;
	let query = ListQuery::new().filters(selected.clone());

	let list = site.list_view("Post", &query, &RequestContext::default()).await.unwrap();

	let ids: Vec<_> = list.rows.iter().map(|row| row.id.as_str()).collect();
	assert_eq!(ids, expected);
	let active: Vec<_> = list
		.filters
		.iter()
		.filter(|f| f.active)
		.map(|f| f.name.as_str())
		.collect();
	assert_eq!(active, selected);
}

#[rstest]
#[tokio::test]
async fn test_category_named_like_a_static_filter_is_skipped() {
	// Arrange
	let store = MemoryStore::new();
	store.seed("Post", common::posts());
	store.seed("Category", vec![json!({ "id": 3, "name": "Published" })]);
	let site = arcade_admin_options::admin_site(Arc::new(store), AdminSettings::default()).unwrap();

	// Act
	let list = site
		.list_view(
			"Post",
			&ListQuery::new().filters(["Published"]),
			&RequestContext::default(),
		)
		.await
		.unwrap();

	// Assert
	let names: Vec<_> = list.filters.iter().map(|f| f.name.as_str()).collect();
	assert_eq!(names, ["Published", "Unpublished"]);
	let ids: Vec<_> = list.rows.iter().map(|row| row.id.as_str()).collect();
	assert_eq!(ids, ["1"]);
}

#[rstest]
#[tokio::test]
async fn test_game_list_uses_aliases(site: (AdminSite, Arc<MemoryStore>)) {
	let (site, _) = site;

	let list = site
		.list_view("Game", &ListQuery::new().search("kart"), &RequestContext::default())
		.await
		.unwrap();

	let labels: Vec<_> = list.columns.iter().map(|c| c.label.as_str()).collect();
	assert_eq!(labels, ["ID", "Title", "Description", "Deeplink"]);
	assert_eq!(list.rows.len(), 1);
	assert_eq!(list.rows[0].label, "Pixel Kart");
}
