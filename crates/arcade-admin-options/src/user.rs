//! User admin

use arcade_admin_core::actions::{Action, ActionOutcome, DialogAction, ServerAction};
use arcade_admin_core::context::{PersistMode, RequestContext};
use arcade_admin_core::edit::{EditEntry, EditViewSpec, FORM_STYLE_KEY, FieldFormat, FieldOptions, RelationDisplay};
use arcade_admin_core::error::{AdminError, AdminResult};
use arcade_admin_core::filters::{NamedFilter, Predicate};
use arcade_admin_core::format::{Formatter, Renderable, locale_date};
use arcade_admin_core::hooks::PersistHooks;
use arcade_admin_core::icons;
use arcade_admin_core::list::{ExportFormat, ExportSpec, ListViewSpec};
use arcade_admin_core::model::{ModelDescriptor, Permission};
use arcade_admin_core::record::{Record, RecordId, text, value_text};
use arcade_admin_core::upload::StaticUrlUpload;
use arcade_admin_core::validation::{self, Validator};
use async_trait::async_trait;
use serde_json::Value;

/// Virtual password input, hashed into `hashedPassword`
pub const NEW_PASSWORD_FIELD: &str = "newPassword";

/// Stored password hash
pub const HASHED_PASSWORD_FIELD: &str = "hashedPassword";

/// Validator of the `name` field
pub fn name_validator() -> Validator {
	validation::longer_than(2, "form.user.name.error")
}

/// Validator of the `email` field
pub fn email_validator() -> Validator {
	validation::contains("@", "form.user.email.error")
}

/// Validator of the `metadata` field
pub fn metadata_validator() -> Validator {
	validation::json_text()
}

/// Hash a password with Argon2
///
/// # Errors
///
/// Returns `AdminError::Hook` if hashing fails.
pub fn hash_password(password: &str) -> AdminResult<String> {
	use argon2::{
		Argon2,
		password_hash::{PasswordHasher as _, SaltString},
	};
	use rand::RngCore;

	let mut salt_bytes = [0u8; 16];
	rand::thread_rng().fill_bytes(&mut salt_bytes);
	let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AdminError::Hook(e.to_string()))?;

	Argon2::default()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| AdminError::Hook(e.to_string()))
}

/// Check a password against a hash produced by [`hash_password`]
pub fn verify_password(password: &str, hash: &str) -> bool {
	use argon2::{
		Argon2,
		password_hash::{PasswordHash, PasswordVerifier},
	};

	PasswordHash::new(hash)
		.map(|parsed| {
			Argon2::default()
				.verify_password(password.as_bytes(), &parsed)
				.is_ok()
		})
		.unwrap_or(false)
}

/// Derives `hashedPassword` from a non-empty `newPassword`
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHooks;

#[async_trait]
impl PersistHooks for PasswordHooks {
	async fn before_db(
		&self,
		mut data: Record,
		_mode: PersistMode,
		_request: &RequestContext,
	) -> AdminResult<Record> {
		if let Some(Value::String(password)) = data.get(NEW_PASSWORD_FIELD)
			&& !password.is_empty()
		{
			let hashed = hash_password(password)?;
			data.insert(HASHED_PASSWORD_FIELD.to_string(), Value::String(hashed));
		}
		Ok(data)
	}
}

/// Sends an e-mail to the selected users
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitEmailAction;

#[async_trait]
impl ServerAction for SubmitEmailAction {
	fn id(&self) -> &str {
		"submit-email"
	}

	fn title(&self) -> &str {
		"actions.user.email.title"
	}

	fn icon(&self) -> Option<&str> {
		Some(icons::ENVELOPE)
	}

	fn success_message(&self) -> Option<&str> {
		Some("actions.user.email.success")
	}

	fn error_message(&self) -> Option<&str> {
		Some("actions.user.email.error")
	}

	async fn execute(&self, ids: &[RecordId]) -> AdminResult<ActionOutcome> {
		tracing::info!("Sending email to {} users", ids.len());
		Ok(ActionOutcome::success("Email sent successfully"))
	}
}

fn list() -> ListViewSpec {
	ListViewSpec::new()
		.export(ExportSpec::new(ExportFormat::Csv, "/api/users/export"))
		.display(["id", "name", "email", "posts", "role", "birthDate"])
		.search(["name", "email", "role"])
		.copy(["email"])
		.filter(NamedFilter::new("is Admin", Predicate::equals("role", "ADMIN")))
		.filter(NamedFilter::new(
			"@premieroctet.com",
			Predicate::ends_with("email", "@premieroctet.com"),
		))
		.formatter(
			"role",
			Formatter::new(|role, _| Renderable::strong_with_class(value_text(role), "dark:text-white")),
		)
		.formatter(
			"birthDate",
			Formatter::new(|date, context| Renderable::text(locale_date(date, context))),
		)
}

fn edit(avatar_upload_url: &str) -> EditViewSpec {
	EditViewSpec::new()
		.display([
			EditEntry::field("id"),
			EditEntry::field("name"),
			EditEntry::notice("email-notice", "Email is mandatory", "You must add an email from now on"),
			EditEntry::field("email"),
			EditEntry::field("posts"),
			EditEntry::field("role"),
			EditEntry::field("birthDate"),
			EditEntry::field("avatar"),
			EditEntry::field("metadata"),
			EditEntry::field(NEW_PASSWORD_FIELD),
		])
		.style(FORM_STYLE_KEY, "grid-cols-3 gap-4 md:grid-cols-4")
		.style("id", "col-span-2 row-start-1")
		.style("name", "col-span-2 row-start-1")
		.style("email-notice", "col-span-4 row-start-2")
		.style("email", "col-span-4 md:col-span-2 row-start-3")
		.style(NEW_PASSWORD_FIELD, "col-span-3 row-start-4")
		.style("posts", "col-span-4 md:col-span-2 row-start-5")
		.style("role", "col-span-4 md:col-span-3 row-start-6")
		.style("birthDate", "col-span-3 row-start-7")
		.style("avatar", "col-span-4 row-start-8")
		.style("metadata", "col-span-4 row-start-9")
		.field("name", FieldOptions::new().required().validate(name_validator()))
		.field(
			"email",
			FieldOptions::new()
				.validate(email_validator())
				.helper_text("Must be a valid email address")
				.tooltip("Make sure to include the @"),
		)
		.field("birthDate", FieldOptions::new().input("DatePicker"))
		.field(
			"posts",
			FieldOptions::new()
				.display(RelationDisplay::List)
				.order_field("order"),
		)
		.field(
			"avatar",
			FieldOptions::new()
				.format(FieldFormat::File)
				.upload(StaticUrlUpload::new(avatar_upload_url)),
		)
		.field(
			"metadata",
			FieldOptions::new()
				.format(FieldFormat::Json)
				.validate(metadata_validator()),
		)
		.custom_field(
			NEW_PASSWORD_FIELD,
			FieldOptions::new().input("PasswordInput").required(),
		)
		.hooks(PasswordHooks)
}

/// Dialog showing user details, offered for admins only
pub fn details_dialog() -> DialogAction {
	DialogAction::new("user-details", "actions.user.details.title", "UserDetailsDialog")
		.with_icon(icons::EYE)
		.with_depth(3)
		.with_can_execute(|user| user.get("role").and_then(Value::as_str) == Some("ADMIN"))
}

/// User descriptor
pub fn descriptor(avatar_upload_url: &str) -> ModelDescriptor {
	ModelDescriptor::new("User")
		.to_string_with(|user| format!("{} ({})", text(user, "name"), text(user, "email")))
		.permissions([Permission::Edit, Permission::Delete, Permission::Create])
		.title("Users")
		.icon(icons::USERS)
		.alias("id", "ID")
		.alias("name", "Full name")
		.alias("birthDate", "Date of birth")
		.alias(NEW_PASSWORD_FIELD, "Password")
		.list(list())
		.edit(edit(avatar_upload_url))
		.action(Action::server(SubmitEmailAction))
		.action(details_dialog())
}

#[cfg(test)]
mod tests {
	use super::*;
	use arcade_admin_core::format::FormatContext;
	use arcade_admin_core::record::from_value;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!("Ada Lovelace"), true)]
	#[case(json!("Ada"), true)]
	#[case(json!("Al"), false)]
	#[case(json!(null), false)]
	#[tokio::test]
	async fn test_name_validator(#[case] name: Value, #[case] valid: bool) {
		let result = name_validator().validate(Some(&name)).await;

		assert_eq!(result.is_ok(), valid);
		if let Err(error) = result {
			assert_eq!(error.message(), "form.user.name.error");
		}
	}

	#[test]
	fn test_hash_password_roundtrip() {
		let hash = hash_password("hunter22").unwrap();

		assert!(hash.starts_with("$argon2"));
		assert!(verify_password("hunter22", &hash));
		assert!(!verify_password("hunter23", &hash));
	}

	#[tokio::test]
	async fn test_password_hook_skips_empty_password() {
		let data = from_value(json!({ "name": "Ada", "newPassword": "" })).unwrap();

		let data = PasswordHooks
			.before_db(data, PersistMode::Edit, &RequestContext::default())
			.await
			.unwrap();

		assert!(!data.contains_key(HASHED_PASSWORD_FIELD));
	}

	#[test]
	fn test_label_and_formatters() {
		// Arrange
		let descriptor = descriptor("https://cdn.test/avatar.png");
		let user = from_value(json!({ "id": 1, "name": "Ada", "email": "ada@example.com" })).unwrap();
		let list = descriptor.list_view().unwrap();
		let context = FormatContext::new("en");

		// Act
		let role = list.formatter_for("role").unwrap().format(&json!("ADMIN"), &context);
		let birth = list
			.formatter_for("birthDate")
			.unwrap()
			.format(&json!("1990-01-15T00:00:00.000Z"), &context);

		// Assert
		assert_eq!(descriptor.label(&user, "id"), "Ada (ada@example.com)");
		assert_eq!(role, Renderable::strong_with_class("ADMIN", "dark:text-white"));
		assert_eq!(birth.as_text(), "1/15/1990");
	}
}
