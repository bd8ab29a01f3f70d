//! Strategy registries wired with the bundled integrations.
//!
//! Each registry resolves a strategy by payment method id from the services
//! the host provides for that integration.

#[cfg(any(feature = "paypal", feature = "stripe"))]
use std::sync::Arc;

#[cfg(any(feature = "paypal", feature = "stripe"))]
use checkout_bridge_core::{PaymentIntegrationService, RegistryError, StrategyRegistry};

#[cfg(feature = "paypal")]
use checkout_bridge_core::DomHost;
#[cfg(feature = "paypal")]
use checkout_bridge_paypal::types::PAY_LATER_METHOD_ID;
#[cfg(feature = "paypal")]
use checkout_bridge_paypal::{
	PayLaterButtonStrategy, PayPalIntegrationService, PayPalMessagesLoader,
};

#[cfg(feature = "stripe")]
use checkout_bridge_stripe::{StripeScriptLoader, StripeUpeCustomerStrategy};

/// Method id the Stripe UPE customer strategy is registered under.
#[cfg(feature = "stripe")]
pub const STRIPE_UPE_METHOD_ID: &str = "stripeupe";

/// Services a BigCommerce Payments button strategy is built from.
#[cfg(feature = "paypal")]
#[derive(Clone)]
pub struct PayPalButtonHost {
	pub payment_integration: Arc<dyn PaymentIntegrationService>,
	pub paypal_integration: Arc<dyn PayPalIntegrationService>,
	pub messages_loader: Arc<dyn PayPalMessagesLoader>,
	pub dom: Arc<dyn DomHost>,
}

#[cfg(feature = "paypal")]
pub type PayPalButtonRegistry = StrategyRegistry<PayPalButtonHost, PayLaterButtonStrategy>;

/// Registry resolving the Pay Later button strategy.
#[cfg(feature = "paypal")]
pub fn paypal_button_strategies() -> Result<PayPalButtonRegistry, RegistryError> {
	let registry = PayPalButtonRegistry::new();
	registry.register(
		&[PAY_LATER_METHOD_ID],
		Arc::new(|host: Arc<PayPalButtonHost>| {
			Arc::new(PayLaterButtonStrategy::new(
				host.payment_integration.clone(),
				host.paypal_integration.clone(),
				host.messages_loader.clone(),
				host.dom.clone(),
			))
		}),
	)?;
	Ok(registry)
}

/// Services a Stripe customer strategy is built from.
#[cfg(feature = "stripe")]
#[derive(Clone)]
pub struct StripeCustomerHost {
	pub payment_integration: Arc<dyn PaymentIntegrationService>,
	pub script_loader: Arc<dyn StripeScriptLoader>,
}

#[cfg(feature = "stripe")]
pub type StripeCustomerRegistry = StrategyRegistry<StripeCustomerHost, StripeUpeCustomerStrategy>;

/// Registry resolving the Stripe UPE customer strategy.
#[cfg(feature = "stripe")]
pub fn stripe_customer_strategies() -> Result<StripeCustomerRegistry, RegistryError> {
	let registry = StripeCustomerRegistry::new();
	registry.register(
		&[STRIPE_UPE_METHOD_ID],
		Arc::new(|host: Arc<StripeCustomerHost>| {
			Arc::new(StripeUpeCustomerStrategy::new(
				host.payment_integration.clone(),
				host.script_loader.clone(),
			))
		}),
	)?;
	Ok(registry)
}
