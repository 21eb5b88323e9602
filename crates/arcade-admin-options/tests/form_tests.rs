//! Edit forms and submissions of the arcade models

mod common;

use arcade_admin_core::context::{PersistMode, RequestContext};
use arcade_admin_core::error::AdminError;
use arcade_admin_core::record::{Record, from_value};
use arcade_admin_core::resolve::{AdminSite, FormEntry, SubmitOutcome};
use arcade_admin_core::store::MemoryStore;
use arcade_admin_core::upload::UploadInfo;
use arcade_admin_core::validation::REQUIRED_KEY;
use arcade_admin_options::user::{
	HASHED_PASSWORD_FIELD, NEW_PASSWORD_FIELD, email_validator, metadata_validator, verify_password,
};
use common::site;
use rstest::rstest;
use serde_json::{Value, json};
use serial_test::serial;
use std::sync::{Arc, Mutex};

fn record(value: Value) -> Record {
	from_value(value).unwrap()
}

#[rstest]
#[case(json!("ada@example.com"), true)]
#[case(json!("@"), true)]
#[case(json!("ada.example.com"), false)]
#[case(json!(""), false)]
#[case(json!(null), false)]
#[tokio::test]
async fn test_email_validator(#[case] email: Value, #[case] valid: bool) {
	let result = email_validator().validate(Some(&email)).await;

	assert_eq!(result.is_ok(), valid);
	if let Err(error) = result {
		assert_eq!(error.message(), "form.user.email.error");
	}
}

#[rstest]
#[case(json!(""), true)]
#[case(json!(null), true)]
#[case(json!("{\"theme\":\"dark\"}"), true)]
#[case(json!("[1, 2, 3]"), true)]
#[case(json!({ "theme": "dark" }), true)]
#[case(json!("{theme: dark}"), false)]
#[case(json!("{\"unterminated\": "), false)]
#[tokio::test]
async fn test_metadata_validator(#[case] metadata: Value, #[case] valid: bool) {
	let result = metadata_validator().validate(Some(&metadata)).await;

	assert_eq!(result.is_ok(), valid);
	if let Err(error) = result {
		assert_eq!(error.message(), "Invalid JSON");
	}
}

#[rstest]
#[tokio::test]
async fn test_user_create_hashes_password(site: (AdminSite, Arc<MemoryStore>)) {
	// Arrange
	let (site, store) = site;
	let data = record(json!({
		"name": "Margaret Hamilton",
		"email": "margaret@example.com",
		"role": "USER",
		"metadata": "{\"team\":\"apollo\"}",
		"newPassword": "moonlanding",
	}));

	// Act
	let outcome = site
		.submit("User", PersistMode::Create, data, &RequestContext::default())
		.await
		.unwrap();

	// Assert
	let SubmitOutcome::Saved(saved) = outcome else {
		panic!("expected a saved record, got {:?}", outcome);
	};
	assert_eq!(saved["id"], json!(4));
	assert!(!saved.contains_key(NEW_PASSWORD_FIELD));
	let hash = saved[HASHED_PASSWORD_FIELD].as_str().unwrap();
	assert!(verify_password("moonlanding", hash));
	assert_eq!(store.records("User").len(), 4);
}

#[rstest]
#[tokio::test]
async fn test_user_create_collects_every_error(site: (AdminSite, Arc<MemoryStore>)) {
	// Arrange
	let (site, store) = site;
	let data = record(json!({
		"name": "Al",
		"email": "not-an-email",
		"metadata": "{broken",
	}));

	// Act
	let outcome = site
		.submit("User", PersistMode::Create, data, &RequestContext::default())
		.await
		.unwrap();

	// Assert
	let SubmitOutcome::Invalid(errors) = outcome else {
		panic!("expected validation errors, got {:?}", outcome);
	};
	assert_eq!(errors["name"].message(), "form.user.name.error");
	assert_eq!(errors["email"].message(), "form.user.email.error");
	assert_eq!(errors["metadata"].message(), "Invalid JSON");
	assert_eq!(errors[NEW_PASSWORD_FIELD].message(), REQUIRED_KEY);
	assert_eq!(store.records("User").len(), 3);
}

#[rstest]
#[tokio::test]
async fn test_user_edit_requires_password(site: (AdminSite, Arc<MemoryStore>)) {
	// Arrange
	let (site, store) = site;
	let data = record(json!({
		"id": 2,
		"name": "Grace B. Hopper",
		"newPassword": "",
	}));

	// Act
	let outcome = site
		.submit("User", PersistMode::Edit, data, &RequestContext::default())
		.await
		.unwrap();

	// Assert
	assert!(matches!(outcome, SubmitOutcome::Invalid(ref errors) if errors.contains_key(NEW_PASSWORD_FIELD)));
	assert_eq!(store.records("User")[1]["name"], json!("Grace Hopper"));
}

#[rstest]
#[tokio::test]
async fn test_user_edit_updates_record(site: (AdminSite, Arc<MemoryStore>)) {
	// Arrange
	let (site, store) = site;
	let data = record(json!({
		"id": 2,
		"name": "Grace B. Hopper",
		"newPassword": "cobol1959",
	}));

	// Act
	let outcome = site
		.submit("User", PersistMode::Edit, data, &RequestContext::default())
		.await
		.unwrap();

	// Assert
	assert!(matches!(outcome, SubmitOutcome::Saved(_)));
	let stored = &store.records("User")[1];
	assert_eq!(stored["name"], json!("Grace B. Hopper"));
	assert_eq!(stored["email"], json!("grace@example.com"));
	assert!(verify_password("cobol1959", stored[HASHED_PASSWORD_FIELD].as_str().unwrap()));
}

#[rstest]
#[tokio::test]
async fn test_unknown_field_is_rejected(site: (AdminSite, Arc<MemoryStore>)) {
	let (site, _) = site;
	let data = record(json!({ "title": "x", "isAdmin": true }));

	let result = site
		.submit("Post", PersistMode::Create, data, &RequestContext::default())
		.await;

	assert!(matches!(result, Err(AdminError::Validation(_))));
}

#[rstest]
#[tokio::test]
async fn test_user_form_layout(site: (AdminSite, Arc<MemoryStore>)) {
	// Arrange
	let (site, _) = site;

	// Act
	let form = site
		.edit_form("User", Some("1"), &RequestContext::default())
		.await
		.unwrap();

	// Assert
	assert_eq!(form.form_class.as_deref(), Some("grid-cols-3 gap-4 md:grid-cols-4"));
	assert_eq!(form.label.as_deref(), Some("Ada Lovelace (ada@premieroctet.com)"));
	let FormEntry::Notice { id, title, class, .. } = &form.entries[2] else {
		panic!("expected the email notice third");
	};
	assert_eq!(id, "email-notice");
	assert_eq!(title, "Email is mandatory");
	assert_eq!(class.as_deref(), Some("col-span-4 row-start-2"));
	let password = form
		.entries
		.iter()
		.find_map(|entry| match entry {
			FormEntry::Field(field) if field.name == NEW_PASSWORD_FIELD => Some(field),
			_ => None,
		})
		.unwrap();
	assert!(password.custom);
	assert!(password.required);
	assert_eq!(password.label, "Password");
	assert_eq!(password.input.as_deref(), Some("PasswordInput"));
}

#[rstest]
#[tokio::test]
async fn test_post_form_category_choices(site: (AdminSite, Arc<MemoryStore>)) {
	let (site, _) = site;

	let form = site
		.edit_form("Post", Some("1"), &RequestContext::default())
		.await
		.unwrap();

	let categories = form
		.entries
		.iter()
		.find_map(|entry| match entry {
			FormEntry::Field(field) if field.name == "categories" => Some(field),
			_ => None,
		})
		.unwrap();
	assert_eq!(categories.choices[0].label, "Tech Cat.1");
	assert_eq!(categories.choices.len(), 7);
	assert_eq!(categories.order_field.as_deref(), Some("order"));
}

#[rstest]
#[tokio::test]
async fn test_avatar_upload_returns_configured_url(site: (AdminSite, Arc<MemoryStore>)) {
	let (site, _) = site;

	let url = site
		.upload(
			"User",
			"avatar",
			vec![0x89, 0x50, 0x4e, 0x47],
			UploadInfo::new("avatar.png").with_mime_type("image/png"),
			&RequestContext::default(),
		)
		.await
		.unwrap();

	assert_eq!(url, site.settings().avatar_upload_url);
}

#[rstest]
#[tokio::test]
#[serial(post_hooks)]
async fn test_post_hooks_log_both_phases(site: (AdminSite, Arc<MemoryStore>)) {
	use tracing_subscriber::layer::SubscriberExt as _;
	use tracing_subscriber::util::SubscriberInitExt as _;

	// Arrange
	/// A tracing layer that captures log messages to a Vec<String>
	struct LogCapture {
		logs: Arc<Mutex<Vec<String>>>,
	}

	impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
		fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
			struct MessageVisitor {
				message: String,
				fields: Vec<String>,
			}

			impl tracing::field::Visit for MessageVisitor {
				fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
					if field.name() == "message" {
						self.message = format!("{:?}", value);
					} else {
						self.fields.push(format!("{}={:?}", field.name(), value));
					}
				}
			}

			let mut visitor = MessageVisitor {
				message: String::new(),
				fields: Vec::new(),
			};
			event.record(&mut visitor);
			self.logs.lock().unwrap().push(format!(
				"[{}] {} {}",
				event.metadata().level(),
				visitor.message,
				visitor.fields.join(" ")
			));
		}
	}

	let logs = Arc::new(Mutex::new(Vec::new()));
	let _guard = tracing_subscriber::registry()
		.with(LogCapture { logs: logs.clone() })
		.set_default();
	let (site, store) = site;
	let data = record(json!({
		"title": "Fresh post",
		"published": false,
		"authorId": 3,
		"tags": [],
	}));

	// Act
	let outcome = site
		.submit("Post", PersistMode::Create, data, &RequestContext::new("/admin/post"))
		.await
		.unwrap();

	// Assert
	assert!(matches!(outcome, SubmitOutcome::Saved(ref post) if post["id"] == json!(4)));
	assert_eq!(store.records("Post").len(), 4);
	let captured = logs.lock().unwrap();
	let before = captured.iter().position(|log| log.contains("intercept beforedb"));
	let after = captured.iter().position(|log| log.contains("intercept afterdb"));
	assert!(
		matches!((before, after), (Some(b), Some(a)) if b < a),
		"expected both hook logs in order, got: {:?}",
		*captured
	);
	let before_log = &captured[before.unwrap()];
	assert!(before_log.starts_with("[INFO]"));
	assert!(before_log.contains("path=/admin/post"));
	assert!(before_log.contains(r#""title":"Fresh post""#));
	assert!(captured[after.unwrap()].contains(r#""id":4"#));
}
