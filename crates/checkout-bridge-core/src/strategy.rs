//! Strategy interfaces dictated by the host checkout framework.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CheckoutResult;
use crate::integration::{CustomerCredentials, RequestOptions};

/// Strategy rendering a wallet or pay-later button outside the payment step.
#[async_trait]
pub trait CheckoutButtonStrategy: Send + Sync {
	/// Integration specific initialization options
	type Options: Send;

	async fn initialize(&self, options: Self::Options) -> CheckoutResult<()>;

	async fn deinitialize(&self) -> CheckoutResult<()>;
}

/// Callback continuing the regular checkout flow.
pub type ContinueWithCheckoutCallback = Arc<dyn Fn() + Send + Sync>;

/// Options for [`CustomerStrategy::execute_payment_method_checkout`].
#[derive(Clone, Default)]
pub struct ExecutePaymentMethodCheckoutOptions {
	pub continue_with_checkout_callback: Option<ContinueWithCheckoutCallback>,
}

/// Strategy driving the customer (email / sign-in) step.
#[async_trait]
pub trait CustomerStrategy: Send + Sync {
	/// Integration specific initialization options
	type Options: Send;

	async fn initialize(&self, options: Self::Options) -> CheckoutResult<()>;

	async fn deinitialize(&self) -> CheckoutResult<()>;

	async fn sign_in(
		&self,
		credentials: CustomerCredentials,
		options: Option<RequestOptions>,
	) -> CheckoutResult<()>;

	async fn sign_out(&self, options: Option<RequestOptions>) -> CheckoutResult<()>;

	async fn execute_payment_method_checkout(
		&self,
		options: Option<ExecutePaymentMethodCheckoutOptions>,
	) -> CheckoutResult<()>;
}
