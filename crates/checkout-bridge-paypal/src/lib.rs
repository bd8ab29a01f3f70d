//! # checkout-bridge PayPal
//!
//! BigCommerce Payments (PayPal) integration.
//!
//! - [`PayPalScriptLoader`] builds the PayPal SDK URL from a payment method's
//!   initialization data, loads the SDK once and keeps the handle
//! - [`PayLaterButtonStrategy`] renders the Pay Later button and the cart
//!   messaging banner
//! - [`style`] normalizes button and banner styles
//!
//! ## Example
//!
//! ```rust
//! use checkout_bridge_conf::PayPalSettings;
//! use checkout_bridge_core::PaymentMethod;
//! use checkout_bridge_paypal::loader::build_sdk_script;
//! use serde_json::json;
//!
//! let method = PaymentMethod {
//! 	id: "bigcommerce_payments".to_string(),
//! 	initialization_data: Some(json!({ "clientId": "abc", "intent": "capture" })),
//! 	..Default::default()
//! };
//!
//! let script = build_sdk_script(&PayPalSettings::default(), &method, "USD", true).unwrap();
//! assert!(script.url.as_str().starts_with("https://www.paypal.com/sdk/js?client-id=abc"));
//! ```

pub mod address;
pub mod integration_service;
pub mod loader;
pub mod paylater;
pub mod sdk;
pub mod style;
pub mod types;

pub use integration_service::{
	BuyNowCartRequestBodyProvider, BuyNowInitializeOptions, PayPalIntegrationService,
	PayPalMessagesLoader,
};
pub use loader::{PayPalScriptLoader, SdkScript};
pub use paylater::{
	PayLaterButtonInitializeOptions, PayLaterButtonOptions, PayLaterButtonStrategy,
	PayLaterCallback,
};
pub use sdk::{
	ApproveCallbackActions, ButtonCallbacks, FundingSource, MessagingOptions, PayPalButtons,
	PayPalButtonsOptions, PayPalMessages, PayPalMessagesSdk, PayPalSdk,
};
