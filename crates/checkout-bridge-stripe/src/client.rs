//! Stripe.js contracts.

use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_core::CheckoutResult;
use futures::future::BoxFuture;

use crate::types::{
	StripeElementEvent, StripeElementOptions, StripeElementType, StripeElementsOptions,
	StripeEvent, StripeInitializationData,
};

/// Listener attached to a Stripe element.
pub type StripeEventHandler =
	Arc<dyn Fn(StripeEvent) -> BoxFuture<'static, CheckoutResult<()>> + Send + Sync>;

/// A mounted or mountable Stripe element.
pub trait StripeElement: Send + Sync {
	fn on(&self, event: StripeElementEvent, handler: StripeEventHandler);

	/// Mounts into the element matched by `selector`.
	fn mount(&self, selector: &str);

	fn unmount(&self);
}

/// A group of elements sharing one client secret.
pub trait StripeElements: Send + Sync {
	fn get_element(&self, kind: StripeElementType) -> Option<Arc<dyn StripeElement>>;

	fn create(
		&self,
		kind: StripeElementType,
		options: StripeElementOptions,
	) -> Arc<dyn StripeElement>;
}

/// The Stripe.js client.
pub trait StripeClient: Send + Sync {
	fn elements(&self, options: StripeElementsOptions) -> Arc<dyn StripeElements>;
}

/// Loads Stripe.js and creates clients and element groups.
#[async_trait]
pub trait StripeScriptLoader: Send + Sync {
	async fn get_stripe_client(
		&self,
		initialization_data: &StripeInitializationData,
		betas: &[&str],
		api_version: &str,
	) -> CheckoutResult<Arc<dyn StripeClient>>;

	async fn get_elements(
		&self,
		client: Arc<dyn StripeClient>,
		options: StripeElementsOptions,
	) -> CheckoutResult<Arc<dyn StripeElements>> {
		Ok(client.elements(options))
	}
}
