//! # checkout-bridge
//!
//! Payment SDK strategies behind a fixed checkout strategy interface.
//!
//! Every vendor SDK, script loader, DOM host and host checkout service is
//! consumed through a trait, so the integrations run unchanged against the
//! browser bindings of the host or against the in-memory doubles used in tests.
//!
//! ## Feature Flags
//!
//! - `braintree` - Braintree SDK creator (enables `cache`)
//! - `paypal` - BigCommerce Payments SDK loader and Pay Later button
//! - `stripe` - Stripe UPE customer step
//! - `cache` - the lazy vendor module cache on its own
//! - `full` (default) - all of the above
//!
//! ## Quick Example
//!
//! ```rust
//! use checkout_bridge::conf::SettingsLoader;
//! use checkout_bridge::core::instrument::supported_instrument;
//!
//! let settings = SettingsLoader::new().without_env().load().unwrap();
//! assert_eq!(settings.paypal.sdk_url.as_str(), "https://www.paypal.com/sdk/js");
//!
//! let instrument = supported_instrument("stripeupe.card").unwrap();
//! assert_eq!(instrument.provider, "stripeupe");
//! ```

pub mod strategies;

pub use checkout_bridge_conf as conf;
pub use checkout_bridge_core as core;

#[cfg(feature = "braintree")]
pub use checkout_bridge_braintree as braintree;
#[cfg(feature = "cache")]
pub use checkout_bridge_cache as cache;
#[cfg(feature = "paypal")]
pub use checkout_bridge_paypal as paypal;
#[cfg(feature = "stripe")]
pub use checkout_bridge_stripe as stripe;

pub use checkout_bridge_core::{
	CheckoutButtonStrategy, CheckoutError, CheckoutResult, CustomerStrategy,
	PaymentIntegrationService, StrategyRegistry,
};

/// Loads the settings and installs the global tracing subscriber.
///
/// Sources are merged as described in [`conf::SettingsLoader`].
///
/// # Errors
///
/// Fails when a source cannot be read or parsed, or when a global subscriber
/// is already installed.
pub fn bootstrap() -> Result<conf::BridgeSettings, conf::SettingsError> {
	let settings = conf::SettingsLoader::new().load()?;
	conf::init_tracing(&settings.logging)?;
	tracing::debug!(level = %settings.logging.level, "checkout-bridge settings loaded");
	Ok(settings)
}
