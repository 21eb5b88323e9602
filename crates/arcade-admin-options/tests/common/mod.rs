//! Shared fixtures for the arcade admin integration tests

#![allow(dead_code)]

use arcade_admin_core::resolve::AdminSite;
use arcade_admin_core::settings::AdminSettings;
use arcade_admin_core::store::{AdminStore, MemoryStore};
use rstest::fixture;
use serde_json::{Value, json};
use std::sync::Arc;

pub fn categories() -> Vec<Value> {
	["Tech", "Travel", "Food", "Music", "Sports", "Books", "Games"]
		.iter()
		.enumerate()
		.map(|(i, name)| json!({ "id": i + 1, "name": name }))
		.collect()
}

pub fn users() -> Vec<Value> {
	vec![
		json!({
			"id": 1,
			"name": "Ada Lovelace",
			"email": "ada@premieroctet.com",
			"role": "ADMIN",
			"birthDate": "1990-01-15T00:00:00.000Z",
		}),
		json!({
			"id": 2,
			"name": "Grace Hopper",
			"email": "grace@example.com",
			"role": "USER",
			"birthDate": null,
		}),
		json!({
			"id": 3,
			"name": "Linus",
			"email": "linus@example.com",
			"role": "AUTHOR",
		}),
	]
}

pub fn posts() -> Vec<Value> {
	vec![
		json!({
			"id": 1,
			"title": "Hello Rust",
			"content": "<p>ownership</p>",
			"published": true,
			"authorId": 1,
			"author": { "id": 1, "name": "Ada Lovelace", "email": "ada@premieroctet.com" },
			"categories": [{ "id": 1, "name": "Tech" }],
			"rate": 4.5,
			"tags": ["rust", "intro"],
		}),
		json!({
			"id": 2,
			"title": "Lisbon in spring",
			"content": null,
			"published": false,
			"authorId": 2,
			"author": { "id": 2, "name": "Grace Hopper", "email": "grace@example.com" },
			"categories": [{ "id": 2, "name": "Travel" }, { "id": 3, "name": "Food" }],
			"rate": null,
			"tags": [],
		}),
		json!({
			"id": 3,
			"title": "Draft",
			"published": false,
			"authorId": 1,
			"author": { "id": 1, "name": "Ada Lovelace", "email": "ada@premieroctet.com" },
			"categories": [],
			"tags": ["wip"],
		}),
	]
}

pub fn games() -> Vec<Value> {
	vec![
		json!({ "game_id": 1, "title": "Space Miner", "description": "Dig asteroids", "deeplink_url": "arcade://space-miner" }),
		json!({ "game_id": 2, "title": "Pixel Kart", "description": null, "deeplink_url": null }),
	]
}

#[fixture]
pub fn store() -> Arc<MemoryStore> {
	let store = MemoryStore::new();
	store.seed("User", users());
	store.seed("Post", posts());
	store.seed("Category", categories());
	store.seed("Game", games());
	Arc::new(store)
}

#[fixture]
pub fn site(store: Arc<MemoryStore>) -> (AdminSite, Arc<MemoryStore>) {
	let dyn_store: Arc<dyn AdminStore> = store.clone();
	let site = arcade_admin_options::admin_site(dyn_store, AdminSettings::default())
		.expect("arcade registry builds");
	(site, store)
}
