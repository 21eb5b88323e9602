//! Model schemas of the arcade database

use arcade_admin_core::schema::{FieldDef, FieldKind, ModelSchema, SchemaSet};

fn timestamps(schema: ModelSchema) -> ModelSchema {
	schema
		.field(FieldDef::new("created_at", FieldKind::DateTime))
		.field(FieldDef::new("updated_at", FieldKind::DateTime))
}

fn int_key(name: &str) -> FieldDef {
	FieldDef::new(name, FieldKind::Int).primary_key()
}

pub fn user() -> ModelSchema {
	ModelSchema::new("User")
		.field(int_key("id"))
		.field(FieldDef::new("email", FieldKind::String))
		.field(FieldDef::new("name", FieldKind::String).optional())
		.field(FieldDef::new("hashedPassword", FieldKind::String).optional())
		.field(FieldDef::new("role", FieldKind::enumeration(&["USER", "ADMIN", "AUTHOR"])))
		.field(FieldDef::new("posts", FieldKind::relation_many("Post")))
		.field(FieldDef::new("birthDate", FieldKind::DateTime).optional())
		.field(FieldDef::new("avatar", FieldKind::String).optional())
		.field(FieldDef::new("metadata", FieldKind::Json).optional())
		.field(FieldDef::new("createdAt", FieldKind::DateTime))
		.field(FieldDef::new("updatedAt", FieldKind::DateTime))
}

pub fn post() -> ModelSchema {
	ModelSchema::new("Post")
		.field(int_key("id"))
		.field(FieldDef::new("title", FieldKind::String))
		.field(FieldDef::new("content", FieldKind::String).optional())
		.field(FieldDef::new("published", FieldKind::Bool))
		.field(FieldDef::new("author", FieldKind::relation("User")))
		.field(FieldDef::new("authorId", FieldKind::Int))
		.field(FieldDef::new("categories", FieldKind::relation_many("Category")))
		.field(FieldDef::new("rate", FieldKind::Float).optional())
		.field(FieldDef::new("tags", FieldKind::StringList))
}

pub fn category() -> ModelSchema {
	ModelSchema::new("Category")
		.field(int_key("id"))
		.field(FieldDef::new("name", FieldKind::String))
		.field(FieldDef::new("posts", FieldKind::relation_many("Post")))
		.field(FieldDef::new("createdAt", FieldKind::DateTime))
		.field(FieldDef::new("updatedAt", FieldKind::DateTime))
}

pub fn game() -> ModelSchema {
	timestamps(
		ModelSchema::new("Game")
			.field(int_key("game_id"))
			.field(FieldDef::new("title", FieldKind::String))
			.field(FieldDef::new("description", FieldKind::String).optional())
			.field(FieldDef::new("deeplink_url", FieldKind::String).optional()),
	)
}

pub fn account() -> ModelSchema {
	timestamps(
		ModelSchema::new("Account")
			.field(FieldDef::new("account_id", FieldKind::String).primary_key())
			.field(FieldDef::new("arcade_username", FieldKind::String).optional())
			.field(FieldDef::new("wallet_address", FieldKind::String).optional())
			.field(FieldDef::new("email", FieldKind::String).optional())
			.field(FieldDef::new("id_token", FieldKind::String).optional())
			.field(FieldDef::new("verifier_id", FieldKind::String).optional()),
	)
}

pub fn profile() -> ModelSchema {
	timestamps(
		ModelSchema::new("Profile")
			.field(int_key("profile_id"))
			.field(FieldDef::new("account_id", FieldKind::String))
			.field(FieldDef::new("display_picture", FieldKind::String).optional())
			.field(FieldDef::new("x_handle", FieldKind::String).optional())
			.field(FieldDef::new("discord_handle", FieldKind::String).optional())
			.field(FieldDef::new("telegram_handle", FieldKind::String).optional())
			.field(FieldDef::new("is_receive_notification", FieldKind::Bool)),
	)
}

pub fn player_launch_game() -> ModelSchema {
	timestamps(
		ModelSchema::new("PlayerLaunchGame")
			.field(int_key("player_game_id"))
			.field(FieldDef::new("account_id", FieldKind::String))
			.field(FieldDef::new("game_id", FieldKind::Int))
			.field(FieldDef::new("timestamp_of_last_launch", FieldKind::DateTime)),
	)
}

pub fn blockchain() -> ModelSchema {
	timestamps(
		ModelSchema::new("Blockchain")
			.field(int_key("blockchain_id"))
			.field(FieldDef::new("blockchain_name", FieldKind::String))
			.field(FieldDef::new("blockchain_logo", FieldKind::String).optional()),
	)
}

pub fn game_tag() -> ModelSchema {
	timestamps(
		ModelSchema::new("GameTag")
			.field(int_key("game_tag_id"))
			.field(FieldDef::new("game_tag_description", FieldKind::String)),
	)
}

pub fn game_tag_relation() -> ModelSchema {
	timestamps(
		ModelSchema::new("GameTagRelation")
			.field(int_key("id"))
			.field(FieldDef::new("game_id", FieldKind::Int))
			.field(FieldDef::new("game_tag_id", FieldKind::Int)),
	)
}

pub fn game_section() -> ModelSchema {
	timestamps(
		ModelSchema::new("GameSection")
			.field(int_key("game_section_id"))
			.field(FieldDef::new("title", FieldKind::String))
			.field(FieldDef::new("order_index", FieldKind::Int)),
	)
}

pub fn game_section_relation() -> ModelSchema {
	timestamps(
		ModelSchema::new("GameSectionRelation")
			.field(int_key("id"))
			.field(FieldDef::new("game_id", FieldKind::Int))
			.field(FieldDef::new("game_section_id", FieldKind::Int))
			.field(FieldDef::new("game_order_in_section", FieldKind::Int)),
	)
}

pub fn game_platform() -> ModelSchema {
	timestamps(
		ModelSchema::new("GamePlatform")
			.field(int_key("game_platform_id"))
			.field(FieldDef::new("game_platform_name", FieldKind::String))
			.field(FieldDef::new("game_platform_logo", FieldKind::String).optional()),
	)
}

pub fn game_platform_relation() -> ModelSchema {
	timestamps(
		ModelSchema::new("GamePlatformRelation")
			.field(int_key("id"))
			.field(FieldDef::new("game_id", FieldKind::Int))
			.field(FieldDef::new("game_platform_id", FieldKind::Int)),
	)
}

pub fn game_media() -> ModelSchema {
	timestamps(
		ModelSchema::new("GameMedia")
			.field(int_key("medium_id"))
			.field(FieldDef::new("game_id", FieldKind::Int))
			.field(FieldDef::new("medium_url", FieldKind::String))
			.field(FieldDef::new("file_type", FieldKind::String)),
	)
}

/// Every schema of the arcade database
pub fn all() -> SchemaSet {
	[
		user(),
		post(),
		category(),
		game(),
		account(),
		profile(),
		player_launch_game(),
		blockchain(),
		game_tag(),
		game_tag_relation(),
		game_section(),
		game_section_relation(),
		game_platform(),
		game_platform_relation(),
		game_media(),
	]
	.into_iter()
	.collect()
}
