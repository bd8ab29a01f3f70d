//! Braintree module contracts and their creation configs.
//!
//! Every module can be torn down, so every module trait has [`Teardown`] as a
//! supertrait and `Arc<dyn Module>` can be stored in the module cache as is.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_cache::Teardown;
use checkout_bridge_conf::PaymentMethodUsage;
use checkout_bridge_core::VendorError;
use serde::{Deserialize, Serialize};

/// A request sent through the Braintree client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BraintreeRequest {
	pub method: String,
	pub endpoint: String,
	pub data: serde_json::Value,
}

/// Result of tokenizing a payment instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizePayload {
	pub nonce: String,
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub details: serde_json::Value,
}

/// Authenticated Braintree API client.
#[async_trait]
pub trait BraintreeClient: Teardown {
	async fn request(&self, request: BraintreeRequest) -> Result<serde_json::Value, VendorError>;
}

/// Card verification request for 3-D Secure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSecureVerifyOptions {
	pub amount: f64,
	pub nonce: String,
	pub bin: Option<String>,
	#[serde(default)]
	pub challenge_requested: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPayload {
	pub nonce: String,
	pub liability_shifted: bool,
	pub liability_shift_possible: bool,
}

#[async_trait]
pub trait BraintreeThreeDSecure: Teardown {
	async fn verify_card(
		&self,
		options: ThreeDSecureVerifyOptions,
	) -> Result<VerifyPayload, VendorError>;

	async fn cancel_verify_card(&self) -> Result<(), VendorError>;
}

/// Vendor data collector gathering device data for fraud checks.
pub trait BraintreeDataCollectorModule: Teardown {
	fn device_data(&self) -> String;
}

#[async_trait]
pub trait BraintreeVisaCheckout: Teardown {
	async fn tokenize(&self, payment: serde_json::Value) -> Result<TokenizePayload, VendorError>;
}

#[async_trait]
pub trait BraintreeVenmoCheckout: Teardown {
	/// Whether the current browser can complete a Venmo payment.
	fn is_browser_supported(&self) -> bool;

	async fn tokenize(&self) -> Result<TokenizePayload, VendorError>;
}

#[async_trait]
pub trait BraintreeHostedFields: Teardown {
	async fn tokenize(&self) -> Result<TokenizePayload, VendorError>;
}

// Creation configs

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
	pub authorization: String,
}

#[derive(Clone)]
pub struct ThreeDSecureConfig {
	pub client: Arc<dyn BraintreeClient>,
	pub version: u8,
}

#[derive(Clone)]
pub struct DataCollectorConfig {
	pub client: Arc<dyn BraintreeClient>,
	pub kount: bool,
	/// Set only for the PayPal collector
	pub paypal: Option<bool>,
}

#[derive(Clone)]
pub struct VisaCheckoutConfig {
	pub client: Arc<dyn BraintreeClient>,
}

#[derive(Clone)]
pub struct VenmoCheckoutConfig {
	pub client: Arc<dyn BraintreeClient>,
	pub allow_desktop: bool,
	pub mobile_web_fallback: Option<bool>,
	pub payment_method_usage: PaymentMethodUsage,
}

/// Hosted field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostedFieldType {
	Number,
	Cvv,
	ExpirationDate,
	CardholderName,
	PostalCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedFieldOptions {
	/// Selector of the element hosting the field
	pub container: String,
	pub placeholder: Option<String>,
}

/// Caller options for [`crate::BraintreeSdk::create_hosted_fields`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedFieldsOptions {
	pub fields: BTreeMap<HostedFieldType, HostedFieldOptions>,
	/// CSS rules keyed by selector
	pub styles: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

#[derive(Clone)]
pub struct HostedFieldsConfig {
	pub client: Arc<dyn BraintreeClient>,
	pub fields: BTreeMap<HostedFieldType, HostedFieldOptions>,
	pub styles: Option<BTreeMap<String, BTreeMap<String, String>>>,
}
