//! Upload handlers for file fields

use crate::context::RequestContext;
use crate::error::AdminResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata of an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadInfo {
	/// Original file name
	pub name: String,
	/// MIME type reported by the browser
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mime_type: Option<String>,
}

impl UploadInfo {
	/// Create upload metadata
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			mime_type: None,
		}
	}

	/// Set the MIME type
	pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
		self.mime_type = Some(mime_type.into());
		self
	}
}

/// Stores an uploaded file and returns the value to persist (usually a URL)
#[async_trait]
pub trait UploadHandler: Send + Sync {
	/// Store `bytes` and return the stored location
	async fn upload(
		&self,
		bytes: Vec<u8>,
		info: UploadInfo,
		request: &RequestContext,
	) -> AdminResult<String>;
}

/// Handler that ignores the payload and always returns a fixed URL
#[derive(Debug, Clone)]
pub struct StaticUrlUpload {
	url: String,
}

impl StaticUrlUpload {
	/// Create a handler returning `url`
	pub fn new(url: impl Into<String>) -> Self {
		Self { url: url.into() }
	}
}

#[async_trait]
impl UploadHandler for StaticUrlUpload {
	async fn upload(
		&self,
		bytes: Vec<u8>,
		info: UploadInfo,
		_request: &RequestContext,
	) -> AdminResult<String> {
		tracing::debug!(file = %info.name, size = bytes.len(), "upload accepted");
		Ok(self.url.clone())
	}
}
