//! Braintree script loading contract.

use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_core::VendorError;

use crate::modules::{
	BraintreeClient, BraintreeDataCollectorModule, BraintreeHostedFields, BraintreeThreeDSecure,
	BraintreeVenmoCheckout, BraintreeVisaCheckout, ClientConfig, DataCollectorConfig,
	HostedFieldsConfig, ThreeDSecureConfig, VenmoCheckoutConfig, VisaCheckoutConfig,
};

/// Factory exposed by a loaded Braintree module script.
#[async_trait]
pub trait ModuleCreator<C, M>: Send + Sync
where
	C: Send + 'static,
{
	async fn create(&self, config: C) -> Result<M, VendorError>;
}

pub type ClientCreator = dyn ModuleCreator<ClientConfig, Arc<dyn BraintreeClient>>;
pub type ThreeDSecureCreator =
	dyn ModuleCreator<ThreeDSecureConfig, Arc<dyn BraintreeThreeDSecure>>;
pub type DataCollectorCreator =
	dyn ModuleCreator<DataCollectorConfig, Arc<dyn BraintreeDataCollectorModule>>;
pub type VisaCheckoutCreator =
	dyn ModuleCreator<VisaCheckoutConfig, Arc<dyn BraintreeVisaCheckout>>;
pub type VenmoCheckoutCreator =
	dyn ModuleCreator<VenmoCheckoutConfig, Arc<dyn BraintreeVenmoCheckout>>;
pub type HostedFieldsCreator =
	dyn ModuleCreator<HostedFieldsConfig, Arc<dyn BraintreeHostedFields>>;

/// Loads Braintree module scripts.
///
/// Each method loads the script of one module and returns its creator. A
/// rejected load is reported with the vendor error that caused it.
#[async_trait]
pub trait BraintreeScriptLoader: Send + Sync {
	async fn load_client(&self) -> Result<Arc<ClientCreator>, VendorError>;

	async fn load_3ds(&self) -> Result<Arc<ThreeDSecureCreator>, VendorError>;

	async fn load_data_collector(&self) -> Result<Arc<DataCollectorCreator>, VendorError>;

	async fn load_visa_checkout(&self) -> Result<Arc<VisaCheckoutCreator>, VendorError>;

	async fn load_venmo_checkout(&self) -> Result<Arc<VenmoCheckoutCreator>, VendorError>;

	async fn load_hosted_fields(&self) -> Result<Arc<HostedFieldsCreator>, VendorError>;
}
