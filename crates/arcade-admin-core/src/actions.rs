//! Admin actions
//!
//! Server actions run a bulk operation over a set of selected record ids.
//! Dialog actions open a UI component and may be restricted to records that
//! satisfy a predicate.

use crate::error::AdminResult;
use crate::record::{Record, RecordId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Result of executing a server action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionOutcome {
	/// Action completed
	Success { message: String },
	/// Action failed
	Error { message: String },
}

impl ActionOutcome {
	/// Successful outcome
	pub fn success(message: impl Into<String>) -> Self {
		ActionOutcome::Success {
			message: message.into(),
		}
	}

	/// Failed outcome
	pub fn error(message: impl Into<String>) -> Self {
		ActionOutcome::Error {
			message: message.into(),
		}
	}

	/// Check if the action was successful
	pub fn is_success(&self) -> bool {
		matches!(self, ActionOutcome::Success { .. })
	}

	/// Get the message from the result
	pub fn message(&self) -> &str {
		match self {
			ActionOutcome::Success { message } | ActionOutcome::Error { message } => message,
		}
	}
}

/// Trait for server actions
///
/// # Examples
///
/// ```
/// use arcade_admin_core::actions::{ActionOutcome, ServerAction};
/// use arcade_admin_core::error::AdminResult;
/// use async_trait::async_trait;
///
/// struct ArchiveAction;
///
/// #[async_trait]
/// impl ServerAction for ArchiveAction {
///     fn id(&self) -> &str {
///         "archive"
///     }
///
///     fn title(&self) -> &str {
///         "actions.archive.title"
///     }
///
///     async fn execute(&self, ids: &[String]) -> AdminResult<ActionOutcome> {
///         Ok(ActionOutcome::success(format!("Archived {} items", ids.len())))
///     }
/// }
/// ```
#[async_trait]
pub trait ServerAction: Send + Sync {
	/// Action identifier, unique per model
	fn id(&self) -> &str;

	/// Title or i18n key displayed in the UI
	fn title(&self) -> &str;

	/// Icon identifier
	fn icon(&self) -> Option<&str> {
		None
	}

	/// Message key shown when the action succeeds
	fn success_message(&self) -> Option<&str> {
		None
	}

	/// Message key shown when the action fails
	fn error_message(&self) -> Option<&str> {
		None
	}

	/// Execute the action on selected items
	async fn execute(&self, ids: &[RecordId]) -> AdminResult<ActionOutcome>;
}

type CanExecuteFn = dyn Fn(&Record) -> bool + Send + Sync;

/// Action that opens a dialog component
#[derive(Clone)]
pub struct DialogAction {
	id: String,
	title: String,
	icon: Option<String>,
	component: String,
	depth: Option<u8>,
	can_execute: Option<Arc<CanExecuteFn>>,
}

impl DialogAction {
	/// Create a dialog action rendering `component`
	pub fn new(id: impl Into<String>, title: impl Into<String>, component: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			title: title.into(),
			icon: None,
			component: component.into(),
			depth: None,
			can_execute: None,
		}
	}

	/// Set the icon
	pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	/// Set how many relation levels the dialog loads
	pub fn with_depth(mut self, depth: u8) -> Self {
		self.depth = Some(depth);
		self
	}

	/// Restrict the action to records matching `predicate`
	pub fn with_can_execute<F>(mut self, predicate: F) -> Self
	where
		F: Fn(&Record) -> bool + Send + Sync + 'static,
	{
		self.can_execute = Some(Arc::new(predicate));
		self
	}

	/// Action identifier
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Title or i18n key
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Icon identifier
	pub fn icon(&self) -> Option<&str> {
		self.icon.as_deref()
	}

	/// Component name
	pub fn component(&self) -> &str {
		&self.component
	}

	/// Relation depth
	pub fn depth(&self) -> Option<u8> {
		self.depth
	}

	/// Check whether the action is gated by a predicate
	pub fn is_gated(&self) -> bool {
		self.can_execute.is_some()
	}

	/// Check whether the action is available for a record
	pub fn can_execute(&self, record: &Record) -> bool {
		self.can_execute
			.as_ref()
			.map(|predicate| predicate(record))
			.unwrap_or(true)
	}
}

impl fmt::Debug for DialogAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DialogAction")
			.field("id", &self.id)
			.field("title", &self.title)
			.field("icon", &self.icon)
			.field("component", &self.component)
			.field("depth", &self.depth)
			.field("gated", &self.is_gated())
			.finish()
	}
}

/// Action registered on a model
#[derive(Clone)]
pub enum Action {
	/// Runs on the server over selected ids
	Server(Arc<dyn ServerAction>),
	/// Opens a dialog
	Dialog(DialogAction),
}

impl Action {
	/// Wrap a server action
	pub fn server(action: impl ServerAction + 'static) -> Self {
		Action::Server(Arc::new(action))
	}

	/// Action identifier
	pub fn id(&self) -> &str {
		match self {
			Action::Server(action) => action.id(),
			Action::Dialog(action) => action.id(),
		}
	}

	/// Serializable description of the action
	pub fn summary(&self) -> ActionSummary {
		match self {
			Action::Server(action) => ActionSummary {
				kind: ActionKind::Server,
				id: action.id().to_string(),
				title: action.title().to_string(),
				icon: action.icon().map(str::to_string),
				success_message: action.success_message().map(str::to_string),
				error_message: action.error_message().map(str::to_string),
				component: None,
				depth: None,
				gated: false,
			},
			Action::Dialog(action) => ActionSummary {
				kind: ActionKind::Dialog,
				id: action.id.clone(),
				title: action.title.clone(),
				icon: action.icon.clone(),
				success_message: None,
				error_message: None,
				component: Some(action.component.clone()),
				depth: action.depth,
				gated: action.is_gated(),
			},
		}
	}
}

impl From<DialogAction> for Action {
	fn from(action: DialogAction) -> Self {
		Action::Dialog(action)
	}
}

impl fmt::Debug for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Action::Server(action) => f.debug_tuple("Server").field(&action.id()).finish(),
			Action::Dialog(action) => f.debug_tuple("Dialog").field(action).finish(),
		}
	}
}

/// Kind of action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
	/// Server action
	Server,
	/// Dialog action
	Dialog,
}

/// Action description handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSummary {
	/// Action kind
	#[serde(rename = "type")]
	pub kind: ActionKind,
	/// Identifier
	pub id: String,
	/// Title or i18n key
	pub title: String,
	/// Icon identifier
	#[serde(skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	/// Success message key
	#[serde(skip_serializing_if = "Option::is_none")]
	pub success_message: Option<String>,
	/// Error message key
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_message: Option<String>,
	/// Dialog component
	#[serde(skip_serializing_if = "Option::is_none")]
	pub component: Option<String>,
	/// Dialog relation depth
	#[serde(skip_serializing_if = "Option::is_none")]
	pub depth: Option<u8>,
	/// Whether availability depends on the record
	pub gated: bool,
}
