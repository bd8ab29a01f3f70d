//! Mock implementations for checkout-bridge testing.
//!
//! Every mock keeps its state in memory, records the calls it receives and
//! can be configured to fail so that error paths can be exercised.

pub mod braintree;
pub mod host;
pub mod paypal;
pub mod stripe;

pub use braintree::{
	MockBraintreeModule, MockBraintreeScriptLoader, MockModuleBehavior, MockModuleCreator,
};
pub use host::{IntegrationCall, MockDomHost, MockPaymentIntegrationService, MockScriptLoader};
pub use paypal::{
	MockApproveCallbackActions, MockPayPalIntegrationService, MockPayPalMessagesLoader,
	MockPayPalMessagesSdk, MockPayPalSdk, PayPalCall,
};
pub use stripe::{MockStripeClient, MockStripeElement, MockStripeElements, MockStripeScriptLoader};
