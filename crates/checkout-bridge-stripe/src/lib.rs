//! # checkout-bridge Stripe
//!
//! Stripe UPE (Unified Payment Element) customer step integration.
//!
//! [`StripeUpeCustomerStrategy`] mounts the Stripe Link authentication element
//! for guests, keeps the payment provider customer in sync with the Link
//! authentication state and delegates sign in / sign out to the host checkout.
//! Stripe.js is reached through a [`StripeScriptLoader`].

pub mod client;
pub mod types;
pub mod upe_customer;

pub use client::{
	StripeClient, StripeElement, StripeElements, StripeEventHandler, StripeScriptLoader,
};
pub use types::{
	STRIPE_CLIENT_API_VERSION, STRIPE_CLIENT_BETAS, StripeAppearanceOptions, StripeElementEvent,
	StripeElementOptions, StripeElementType, StripeElementsOptions, StripeEvent, StripeFormStyles,
	StripeInitializationData,
};
pub use upe_customer::{
	EmailChangeCallback, LoadingCallback, StripeUpeCustomerInitializeOptions,
	StripeUpeCustomerOptions, StripeUpeCustomerStrategy, StylesProvider,
};
