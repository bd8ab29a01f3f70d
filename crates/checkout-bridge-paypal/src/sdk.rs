//! PayPal JS SDK contracts.
//!
//! The loaded SDK handle is injected as an `Arc<dyn PayPalSdk>`; nothing is
//! read from a page global.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_core::CheckoutResult;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::types::{
	ApproveCallbackPayload, OrderDetails, PayPalButtonStyleOptions, PayPalMessagesStyleOptions,
	ShippingAddressChangeCallbackPayload, ShippingOptionChangeCallbackPayload,
};

/// Funding sources a PayPal button can be rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingSource {
	PayPal,
	PayLater,
	Credit,
	Card,
	Venmo,
}

impl FundingSource {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::PayPal => "paypal",
			Self::PayLater => "paylater",
			Self::Credit => "credit",
			Self::Card => "card",
			Self::Venmo => "venmo",
		}
	}
}

impl fmt::Display for FundingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Order actions available inside the approve callback.
#[async_trait]
pub trait ApproveCallbackActions: Send + Sync {
	async fn order_details(&self) -> CheckoutResult<OrderDetails>;
}

pub type CreateOrderCallback =
	Arc<dyn Fn() -> BoxFuture<'static, CheckoutResult<String>> + Send + Sync>;
pub type ApproveCallback = Arc<
	dyn Fn(
			ApproveCallbackPayload,
			Arc<dyn ApproveCallbackActions>,
		) -> BoxFuture<'static, CheckoutResult<bool>>
		+ Send
		+ Sync,
>;
pub type ActionCallback = Arc<dyn Fn() -> BoxFuture<'static, CheckoutResult<()>> + Send + Sync>;
pub type ShippingAddressChangeCallback = Arc<
	dyn Fn(ShippingAddressChangeCallbackPayload) -> BoxFuture<'static, CheckoutResult<()>>
		+ Send
		+ Sync,
>;
pub type ShippingOptionsChangeCallback = Arc<
	dyn Fn(ShippingOptionChangeCallbackPayload) -> BoxFuture<'static, CheckoutResult<()>>
		+ Send
		+ Sync,
>;

/// Callbacks wired into a PayPal button.
///
/// Bundles are combined with [`ButtonCallbacks::merge`]; a field set in the
/// overriding bundle replaces the same field of the base bundle.
#[derive(Clone, Default)]
pub struct ButtonCallbacks {
	pub create_order: Option<CreateOrderCallback>,
	pub on_approve: Option<ApproveCallback>,
	pub on_click: Option<ActionCallback>,
	pub on_cancel: Option<ActionCallback>,
	pub on_shipping_address_change: Option<ShippingAddressChangeCallback>,
	pub on_shipping_options_change: Option<ShippingOptionsChangeCallback>,
}

impl ButtonCallbacks {
	pub fn merge(self, overrides: ButtonCallbacks) -> Self {
		Self {
			create_order: overrides.create_order.or(self.create_order),
			on_approve: overrides.on_approve.or(self.on_approve),
			on_click: overrides.on_click.or(self.on_click),
			on_cancel: overrides.on_cancel.or(self.on_cancel),
			on_shipping_address_change: overrides
				.on_shipping_address_change
				.or(self.on_shipping_address_change),
			on_shipping_options_change: overrides
				.on_shipping_options_change
				.or(self.on_shipping_options_change),
		}
	}
}

/// Options for rendering one PayPal button.
#[derive(Clone)]
pub struct PayPalButtonsOptions {
	pub funding_source: FundingSource,
	pub style: PayPalButtonStyleOptions,
	pub callbacks: ButtonCallbacks,
}

/// Rendered button handle.
pub trait PayPalButtons: Send + Sync {
	fn is_eligible(&self) -> bool;

	/// Renders into the element matched by `container` (a CSS selector).
	fn render(&self, container: &str);
}

/// The loaded PayPal SDK.
pub trait PayPalSdk: Send + Sync {
	fn buttons(&self, options: PayPalButtonsOptions) -> Box<dyn PayPalButtons>;
}

/// Options of the Pay Later messaging banner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagingOptions {
	pub amount: f64,
	pub placement: String,
	pub style: PayPalMessagesStyleOptions,
}

pub trait PayPalMessages: Send + Sync {
	fn render(&self, container: &str);
}

/// The PayPal SDK loaded with the messages component.
pub trait PayPalMessagesSdk: Send + Sync {
	fn messages(&self, options: MessagingOptions) -> Box<dyn PayPalMessages>;
}
