//! Lifecycle hooks run around persistence writes

use crate::context::{PersistMode, RequestContext};
use crate::error::AdminResult;
use crate::record::Record;
use async_trait::async_trait;

/// Hooks invoked immediately before and after a store write.
///
/// Both methods pass their input through unchanged by default.
///
/// # Examples
///
/// ```
/// use arcade_admin_core::context::{PersistMode, RequestContext};
/// use arcade_admin_core::error::AdminResult;
/// use arcade_admin_core::hooks::PersistHooks;
/// use arcade_admin_core::record::Record;
/// use async_trait::async_trait;
///
/// struct Stamp;
///
/// #[async_trait]
/// impl PersistHooks for Stamp {
///     async fn before_db(
///         &self,
///         mut data: Record,
///         _mode: PersistMode,
///         _request: &RequestContext,
///     ) -> AdminResult<Record> {
///         data.insert("stamped".to_string(), true.into());
///         Ok(data)
///     }
/// }
/// ```
#[async_trait]
pub trait PersistHooks: Send + Sync {
	/// Transform submitted data before it is written.
	///
	/// The returned record keeps the shape of `data`; it may add derived
	/// fields.
	async fn before_db(
		&self,
		data: Record,
		_mode: PersistMode,
		_request: &RequestContext,
	) -> AdminResult<Record> {
		Ok(data)
	}

	/// Observe or transform the stored record after the write
	async fn after_db(
		&self,
		response: Record,
		_mode: PersistMode,
		_request: &RequestContext,
	) -> AdminResult<Record> {
		Ok(response)
	}
}
