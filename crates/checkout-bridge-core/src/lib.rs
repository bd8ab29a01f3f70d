//! # checkout-bridge core
//!
//! Contracts shared by every checkout-bridge integration.
//!
//! A payment integration never talks to the browser or to the storefront API
//! directly. Everything it needs is injected through the traits defined here:
//!
//! - [`PaymentIntegrationService`] - the host checkout service (state, checkout
//!   loading, address updates, order submission, customer session)
//! - [`ScriptLoader`] - loads a vendor script and hands back the SDK handle
//! - [`DomHost`] - the handful of DOM operations strategies perform
//!
//! Strategies implement [`CheckoutButtonStrategy`] or [`CustomerStrategy`] and
//! are made resolvable by method id through a [`StrategyRegistry`].
//!
//! ## Example
//!
//! ```rust
//! use checkout_bridge_core::instrument::supported_instrument;
//!
//! let instrument = supported_instrument("braintreepaypal").unwrap();
//! assert_eq!(instrument.provider, "braintree");
//! assert_eq!(instrument.method, "paypal");
//! ```

pub mod dom;
pub mod error;
pub mod instrument;
pub mod integration;
pub mod registry;
pub mod script;
pub mod strategy;
pub mod vendor;

pub use dom::DomHost;
pub use error::{CheckoutError, CheckoutResult, MissingDataKind, NotInitializedKind};
pub use integration::{
	Address, BillingAddress, Cart, Checkout, Consignment, Currency, Customer,
	CustomerCredentials, LineItems, PaymentIntegrationService, PaymentMethod,
	PaymentProviderCustomer, PhysicalItem, RequestOptions, ShippingOption,
};
pub use registry::{RegistryError, StrategyFactory, StrategyRegistry};
pub use script::{ScriptLoader, ScriptOptions};
pub use strategy::{
	CheckoutButtonStrategy, ContinueWithCheckoutCallback, CustomerStrategy,
	ExecutePaymentMethodCheckoutOptions,
};
pub use vendor::VendorError;
