//! Arcade catalogue admin: games, accounts, profiles and their relations

use arcade_admin_core::edit::EditViewSpec;
use arcade_admin_core::icons;
use arcade_admin_core::list::ListViewSpec;
use arcade_admin_core::model::ModelDescriptor;
use arcade_admin_core::record::{Record, first_present, text};

fn views(descriptor: ModelDescriptor, list: &[&str], edit: &[&str]) -> ModelDescriptor {
	descriptor
		.list(ListViewSpec::new().display(list.iter().copied()))
		.edit(EditViewSpec::new().display(edit.iter().copied()))
}

fn pair(record: &Record, left: &str, right: &str) -> String {
	format!("{} - {}", text(record, left), text(record, right))
}

pub fn game() -> ModelDescriptor {
	ModelDescriptor::new("Game")
		.to_string_with(|game| text(game, "title"))
		.title("Game")
		.icon(icons::ROCKET_LAUNCH)
		.alias("game_id", "ID")
		.alias("title", "Title")
		.alias("description", "Description")
		.alias("deeplink_url", "Deeplink")
		.list(
			ListViewSpec::new()
				.display(["game_id", "title", "description", "deeplink_url"])
				.search(["title"])
				.copy(["title"]),
		)
}

pub fn account() -> ModelDescriptor {
	views(
		ModelDescriptor::new("Account")
			.title("Accounts")
			.icon(icons::USER)
			.to_string_with(|account| first_present(account, &["arcade_username", "email", "wallet_address"])),
		&["arcade_username", "wallet_address", "email", "created_at"],
		&[
			"arcade_username",
			"wallet_address",
			"email",
			"id_token",
			"verifier_id",
			"created_at",
			"updated_at",
		],
	)
}

pub fn profile() -> ModelDescriptor {
	views(
		ModelDescriptor::new("Profile")
			.title("Profiles")
			.icon(icons::USER_CIRCLE)
			.to_string_with(|profile| first_present(profile, &["x_handle", "discord_handle", "telegram_handle"])),
		&[
			"account_id",
			"x_handle",
			"discord_handle",
			"telegram_handle",
			"is_receive_notification",
			"created_at",
		],
		&[
			"account_id",
			"display_picture",
			"x_handle",
			"discord_handle",
			"telegram_handle",
			"is_receive_notification",
			"created_at",
			"updated_at",
		],
	)
}

pub fn player_launch_game() -> ModelDescriptor {
	views(
		ModelDescriptor::new("PlayerLaunchGame")
			.title("Player Launch Games")
			.icon(icons::FIRE)
			.to_string_with(|launch| text(launch, "player_game_id")),
		&["account_id", "game_id", "timestamp_of_last_launch", "created_at"],
		&["account_id", "game_id", "timestamp_of_last_launch", "created_at", "updated_at"],
	)
}

pub fn blockchain() -> ModelDescriptor {
	views(
		ModelDescriptor::new("Blockchain")
			.title("Blockchains")
			.icon(icons::CUBE)
			.to_string_with(|chain| text(chain, "blockchain_name")),
		&["blockchain_name", "created_at", "updated_at"],
		&["blockchain_name", "blockchain_logo", "created_at", "updated_at"],
	)
}

pub fn game_tag() -> ModelDescriptor {
	views(
		ModelDescriptor::new("GameTag")
			.title("Game Tags")
			.icon(icons::TAG)
			.to_string_with(|tag| text(tag, "game_tag_description")),
		&["game_tag_description", "created_at", "updated_at"],
		&["game_tag_description", "created_at", "updated_at"],
	)
}

pub fn game_tag_relation() -> ModelDescriptor {
	views(
		ModelDescriptor::new("GameTagRelation")
			.title("Game Tag Relations")
			.icon(icons::LINK)
			.to_string_with(|relation| pair(relation, "game_id", "game_tag_id")),
		&["game_id", "game_tag_id", "created_at", "updated_at"],
		&["game_id", "game_tag_id", "created_at", "updated_at"],
	)
}

pub fn game_section() -> ModelDescriptor {
	views(
		ModelDescriptor::new("GameSection")
			.title("Game Sections")
			.icon(icons::SQUARE_2_STACK)
			.to_string_with(|section| text(section, "title")),
		&["title", "order_index", "created_at", "updated_at"],
		&["title", "order_index", "created_at", "updated_at"],
	)
}

pub fn game_section_relation() -> ModelDescriptor {
	let fields = [
		"game_id",
		"game_section_id",
		"game_order_in_section",
		"created_at",
		"updated_at",
	];
	views(
		ModelDescriptor::new("GameSectionRelation")
			.title("Game Section Relations")
			.icon(icons::LINK)
			.to_string_with(|relation| pair(relation, "game_id", "game_section_id")),
		&fields,
		&fields,
	)
}

pub fn game_platform() -> ModelDescriptor {
	views(
		ModelDescriptor::new("GamePlatform")
			.title("Game Platforms")
			.icon(icons::CUBE_TRANSPARENT)
			.to_string_with(|platform| text(platform, "game_platform_name")),
		&["game_platform_name", "created_at", "updated_at"],
		&["game_platform_name", "game_platform_logo", "created_at", "updated_at"],
	)
}

pub fn game_platform_relation() -> ModelDescriptor {
	views(
		ModelDescriptor::new("GamePlatformRelation")
			.title("Game Platform Relations")
			.icon(icons::LINK)
			.to_string_with(|relation| pair(relation, "game_id", "game_platform_id")),
		&["game_id", "game_platform_id", "created_at", "updated_at"],
		&["game_id", "game_platform_id", "created_at", "updated_at"],
	)
}

pub fn game_media() -> ModelDescriptor {
	let fields = ["game_id", "medium_url", "file_type", "created_at", "updated_at"];
	views(
		ModelDescriptor::new("GameMedia")
			.title("Game Media")
			.icon(icons::PHOTO)
			.to_string_with(|media| pair(media, "game_id", "file_type")),
		&fields,
		&fields,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use arcade_admin_core::record::from_value;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!({ "arcade_username": "neo", "email": "neo@zion.io" }), "neo")]
	#[case(json!({ "arcade_username": null, "email": "neo@zion.io" }), "neo@zion.io")]
	#[case(json!({ "email": "", "wallet_address": "0xabc" }), "0xabc")]
	#[case(json!({}), "")]
	fn test_account_label_falls_back(#[case] record: serde_json::Value, #[case] expected: &str) {
		let data = from_value(record).unwrap();

		assert_eq!(account().label(&data, "account_id"), expected);
	}

	#[test]
	fn test_relation_labels() {
		let media = from_value(json!({ "game_id": 7, "file_type": "video" })).unwrap();

		assert_eq!(game_media().label(&media, "medium_id"), "7 - video");
	}

	#[test]
	fn test_game_has_no_edit_view() {
		assert!(game().edit_view().is_none());
	}
}
