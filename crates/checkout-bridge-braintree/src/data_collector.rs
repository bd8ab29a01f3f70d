//! Data collector handle.

use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_cache::Teardown;
use checkout_bridge_core::VendorError;

use crate::modules::BraintreeDataCollectorModule;

/// Vendor code reported when Kount is not enabled for the merchant.
pub const DATA_COLLECTOR_KOUNT_NOT_ENABLED: &str = "DATA_COLLECTOR_KOUNT_NOT_ENABLED";

/// Device data gathered for a payment, if any.
///
/// When Kount is disabled for the merchant the collector still resolves, with
/// no device data and nothing to tear down.
pub struct BraintreeDataCollector {
	pub device_data: Option<String>,
	module: Option<Arc<dyn BraintreeDataCollectorModule>>,
}

impl BraintreeDataCollector {
	pub fn new(module: Arc<dyn BraintreeDataCollectorModule>) -> Self {
		Self {
			device_data: Some(module.device_data()),
			module: Some(module),
		}
	}

	/// Collector standing in for a disabled Kount integration.
	pub fn disabled() -> Self {
		Self {
			device_data: None,
			module: None,
		}
	}

	pub fn is_enabled(&self) -> bool {
		self.module.is_some()
	}
}

#[async_trait]
impl Teardown for BraintreeDataCollector {
	async fn teardown(&self) -> Result<(), VendorError> {
		match &self.module {
			Some(module) => module.teardown().await,
			None => Ok(()),
		}
	}
}
