//! Slot identity and the teardown capability of cached modules.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_core::VendorError;

/// Identity of a cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey(Cow<'static, str>);

impl SlotKey {
	/// Creates a key from a static name.
	pub const fn new(name: &'static str) -> Self {
		Self(Cow::Borrowed(name))
	}

	/// Creates a key from a runtime string.
	pub fn from_string(name: impl Into<String>) -> Self {
		Self(Cow::Owned(name.into()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SlotKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&'static str> for SlotKey {
	fn from(name: &'static str) -> Self {
		Self::new(name)
	}
}

/// Cleanup operation exposed by every vendor module.
#[async_trait]
pub trait Teardown: Send + Sync {
	async fn teardown(&self) -> Result<(), VendorError>;
}

#[async_trait]
impl<T: Teardown + ?Sized> Teardown for Arc<T> {
	async fn teardown(&self) -> Result<(), VendorError> {
		(**self).teardown().await
	}
}
