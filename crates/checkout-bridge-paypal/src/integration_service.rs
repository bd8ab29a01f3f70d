//! BigCommerce Payments integration service contract.
//!
//! Order creation, order updates and payment submission talk to the
//! BigCommerce backend and are provided by the host; strategies only see this
//! trait.

use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_core::{Cart, CheckoutResult, PaymentMethod, ShippingOption};

use crate::sdk::{PayPalMessagesSdk, PayPalSdk};
use crate::types::BuyNowCartRequestBody;

/// Produces the body of the buy now cart request, if the product form is valid.
pub type BuyNowCartRequestBodyProvider =
	Arc<dyn Fn() -> Option<BuyNowCartRequestBody> + Send + Sync>;

/// Options of the buy now flow (checkout started from a product page).
#[derive(Clone, Default)]
pub struct BuyNowInitializeOptions {
	pub get_buy_now_cart_request_body: Option<BuyNowCartRequestBodyProvider>,
}

#[async_trait]
pub trait PayPalIntegrationService: Send + Sync {
	/// Loads the PayPal SDK for `method_id` and keeps it for
	/// [`PayPalIntegrationService::paypal_sdk_or_throw`].
	async fn load_paypal_sdk(
		&self,
		method_id: &str,
		currency_code: &str,
		initializes_on_checkout_page: bool,
	) -> CheckoutResult<Arc<dyn PayPalSdk>>;

	fn paypal_sdk_or_throw(&self) -> CheckoutResult<Arc<dyn PayPalSdk>>;

	/// Creates a PayPal order and returns its id.
	async fn create_order(&self, provider_id: &str) -> CheckoutResult<String>;

	async fn tokenize_payment(&self, method_id: &str, order_id: Option<&str>) -> CheckoutResult<()>;

	async fn create_buy_now_cart_or_throw(
		&self,
		options: &BuyNowInitializeOptions,
	) -> CheckoutResult<Cart>;

	/// Pushes the current checkout totals to the PayPal order.
	async fn update_order(&self) -> CheckoutResult<()>;

	async fn submit_payment(&self, method_id: &str, order_id: &str) -> CheckoutResult<()>;

	/// Selected shipping option, or the one with `option_id`, or the
	/// recommended one.
	fn shipping_option_or_throw(&self, option_id: Option<&str>) -> CheckoutResult<ShippingOption>;

	fn remove_element(&self, element_id: &str);
}

/// Loads the PayPal SDK with the messages component.
#[async_trait]
pub trait PayPalMessagesLoader: Send + Sync {
	async fn get_paypal_messages(
		&self,
		method: &PaymentMethod,
		currency_code: &str,
	) -> CheckoutResult<Arc<dyn PayPalMessagesSdk>>;
}
