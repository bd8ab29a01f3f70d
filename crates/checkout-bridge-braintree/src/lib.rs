//! # checkout-bridge Braintree
//!
//! Lazy access to the Braintree web SDK modules.
//!
//! [`BraintreeSdk`] is initialized with a client token and hands out the
//! Braintree modules (client, 3-D Secure, data collectors, Visa Checkout,
//! Venmo) on demand. Each module is loaded and created at most once per SDK
//! instance; [`BraintreeSdk::teardown`] releases every module that was created.
//!
//! The vendor SDK itself is reached through a [`BraintreeScriptLoader`], which
//! loads a module script and returns its [`ModuleCreator`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_bridge_braintree::{BraintreeSdk, DataCollectorOptions};
//!
//! let sdk = BraintreeSdk::new(loader);
//! sdk.initialize("client-token");
//!
//! let three_d_secure = sdk.get_3ds().await?;
//! let collector = sdk.get_data_collector(DataCollectorOptions::default()).await?;
//! println!("device data: {:?}", collector.device_data);
//!
//! sdk.teardown().await?;
//! ```

pub mod data_collector;
pub mod loader;
pub mod modules;
pub mod sdk;

pub use checkout_bridge_conf::{BraintreeSettings, PaymentMethodUsage};
pub use data_collector::{BraintreeDataCollector, DATA_COLLECTOR_KOUNT_NOT_ENABLED};
pub use loader::{
	BraintreeScriptLoader, ClientCreator, DataCollectorCreator, HostedFieldsCreator,
	ModuleCreator, ThreeDSecureCreator, VenmoCheckoutCreator, VisaCheckoutCreator,
};
pub use modules::{
	BraintreeClient, BraintreeDataCollectorModule, BraintreeHostedFields, BraintreeRequest,
	BraintreeThreeDSecure, BraintreeVenmoCheckout, BraintreeVisaCheckout, ClientConfig,
	DataCollectorConfig, HostedFieldOptions, HostedFieldType, HostedFieldsConfig,
	HostedFieldsOptions, ThreeDSecureConfig, ThreeDSecureVerifyOptions, TokenizePayload,
	VenmoCheckoutConfig, VerifyPayload, VisaCheckoutConfig,
};
pub use sdk::{
	BraintreeSdk, DataCollectorOptions, VenmoCallbacks, VenmoCheckoutOptions, VenmoErrorCallback,
	VenmoSuccessCallback,
};
