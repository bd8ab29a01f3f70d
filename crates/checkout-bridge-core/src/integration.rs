//! Host checkout service contract.
//!
//! Strategies only see the host checkout through [`PaymentIntegrationService`].
//! State accessors are synchronous snapshots; the `*_or_throw` helpers turn a
//! missing snapshot into the matching [`MissingDataKind`].

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, CheckoutResult, MissingDataKind};

/// Currency of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
	/// ISO 4217 code
	pub code: String,
}

/// Physical line item of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalItem {
	pub id: String,
	pub quantity: u32,
}

/// Line items grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItems {
	pub physical_items: Vec<PhysicalItem>,
}

/// Shopping cart snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
	pub id: String,
	pub currency: Currency,
	pub line_items: LineItems,
}

/// Checkout snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
	pub id: String,
	pub outstanding_balance: f64,
}

/// Customer snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
	/// Set once the shopper has identified themselves
	pub email: Option<String>,
}

/// Provider-specific customer state kept by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProviderCustomer {
	/// Stripe Link authentication result, if Stripe has reported one
	pub stripe_link_authentication_state: Option<bool>,
}

/// Postal address used for billing and shipping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
	pub first_name: String,
	pub last_name: String,
	pub email: Option<String>,
	pub phone: String,
	pub company: String,
	pub address1: String,
	pub address2: String,
	pub city: String,
	pub country_code: String,
	pub postal_code: String,
	pub state_or_province_code: String,
}

/// Alias kept for readability at call sites dealing with billing.
pub type BillingAddress = Address;

/// Shipping option offered for a consignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
	pub id: String,
	pub description: String,
	pub cost: f64,
	pub is_recommended: bool,
}

/// Consignment snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consignment {
	pub id: String,
	pub selected_shipping_option: Option<ShippingOption>,
	pub available_shipping_options: Vec<ShippingOption>,
}

/// Payment method configuration as provided by the storefront.
///
/// `initialization_data` is vendor specific; each integration deserializes its
/// own typed view of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
	pub id: String,
	pub gateway: Option<String>,
	pub client_token: Option<String>,
	pub initialization_data: Option<serde_json::Value>,
}

/// Customer sign-in credentials.
///
/// **Security Note**: no `Debug` implementation, so the password cannot end up
/// in a log line.
#[derive(Clone)]
pub struct CustomerCredentials {
	pub email: String,
	pub password: String,
}

/// Per-request options forwarded to the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
	pub timeout_ms: Option<u64>,
	pub params: HashMap<String, String>,
}

impl RequestOptions {
	/// Options carrying a single `params` entry.
	pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
		let mut params = HashMap::new();
		params.insert(key.into(), value.into());
		Self {
			timeout_ms: None,
			params,
		}
	}
}

/// Host checkout service consumed by every strategy.
#[async_trait]
pub trait PaymentIntegrationService: Send + Sync {
	// State snapshots

	fn cart(&self) -> Option<Cart>;

	fn checkout(&self) -> Option<Checkout>;

	fn customer(&self) -> Option<Customer>;

	fn billing_address(&self) -> Option<Address>;

	fn consignments(&self) -> Vec<Consignment>;

	fn payment_provider_customer(&self) -> Option<PaymentProviderCustomer>;

	fn payment_method(&self, method_id: &str, gateway_id: Option<&str>) -> Option<PaymentMethod>;

	// Actions

	async fn load_default_checkout(&self) -> CheckoutResult<()>;

	async fn load_checkout(&self, checkout_id: &str) -> CheckoutResult<()>;

	async fn load_payment_method(
		&self,
		method_id: &str,
		options: RequestOptions,
	) -> CheckoutResult<()>;

	async fn update_billing_address(&self, address: Address) -> CheckoutResult<()>;

	async fn update_shipping_address(&self, address: Address) -> CheckoutResult<()>;

	async fn select_shipping_option(&self, option_id: &str) -> CheckoutResult<()>;

	async fn submit_order(&self, options: RequestOptions) -> CheckoutResult<()>;

	async fn delete_consignment(&self, consignment_id: &str) -> CheckoutResult<()>;

	async fn sign_in_customer(
		&self,
		credentials: CustomerCredentials,
		options: Option<RequestOptions>,
	) -> CheckoutResult<()>;

	async fn sign_out_customer(&self, options: Option<RequestOptions>) -> CheckoutResult<()>;

	fn update_payment_provider_customer(&self, customer: PaymentProviderCustomer);

	// Helpers

	fn cart_or_throw(&self) -> CheckoutResult<Cart> {
		self.cart()
			.ok_or(CheckoutError::MissingData(MissingDataKind::MissingCart))
	}

	fn checkout_or_throw(&self) -> CheckoutResult<Checkout> {
		self.checkout()
			.ok_or(CheckoutError::MissingData(MissingDataKind::MissingCheckout))
	}

	fn customer_or_throw(&self) -> CheckoutResult<Customer> {
		self.customer()
			.ok_or(CheckoutError::MissingData(MissingDataKind::MissingCustomer))
	}

	fn payment_provider_customer_or_throw(&self) -> CheckoutResult<PaymentProviderCustomer> {
		self.payment_provider_customer()
			.ok_or(CheckoutError::MissingData(MissingDataKind::MissingCustomer))
	}

	fn payment_method_or_throw(
		&self,
		method_id: &str,
		gateway_id: Option<&str>,
	) -> CheckoutResult<PaymentMethod> {
		self.payment_method(method_id, gateway_id)
			.ok_or(CheckoutError::MissingData(MissingDataKind::MissingPaymentMethod))
	}
}
