//! Vendor script loading contract.
//!
//! Vendor SDKs attach themselves to the page once their script has run. Rather
//! than reading a global afterwards, a [`ScriptLoader`] returns the loaded SDK
//! handle directly, so the handle can be injected into whatever needs it.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::CheckoutResult;

/// Options for loading a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOptions {
	/// Load with the `async` attribute
	pub is_async: bool,
	/// Extra `data-*` attributes set on the script tag
	pub attributes: BTreeMap<String, String>,
}

/// Loads a vendor script and returns the SDK handle it exposes.
#[async_trait]
pub trait ScriptLoader<S>: Send + Sync
where
	S: ?Sized + Send + Sync,
{
	async fn load_script(
		&self,
		src: &str,
		options: &ScriptOptions,
	) -> CheckoutResult<std::sync::Arc<S>>;
}
