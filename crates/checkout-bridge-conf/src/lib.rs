//! # checkout-bridge settings
//!
//! Layered configuration for the checkout integrations.
//!
//! Sources are merged in priority order (environment variables > settings file
//! > defaults). Environment variables use the `CHECKOUT_BRIDGE__` prefix and a
//! double underscore between path segments:
//!
//! ```text
//! CHECKOUT_BRIDGE__BRAINTREE__THREE_D_SECURE_VERSION=2
//! CHECKOUT_BRIDGE__PAYPAL__SDK_URL=https://www.sandbox.paypal.com/sdk/js
//! CHECKOUT_BRIDGE__LOGGING__LEVEL=debug
//! ```
//!
//! ## Example
//!
//! ```rust
//! use checkout_bridge_conf::{BridgeSettings, SettingsLoader};
//!
//! let settings = SettingsLoader::new().without_env().load().unwrap();
//! assert_eq!(settings, BridgeSettings::default());
//! ```

pub mod logging;
pub mod settings;
pub mod sources;

pub use logging::init_tracing;
pub use settings::{
	BraintreeSettings, BridgeSettings, LogFormat, LoggingSettings, PayPalSettings,
	PaymentMethodUsage, VenmoDefaults,
};
pub use sources::{SettingsError, SettingsLoader};
