//! Stripe UPE customer strategy.
//!
//! Mounts Stripe's link authentication element in the customer step so a
//! returning Link customer can authenticate with their email.

use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_core::{
	CheckoutError, CheckoutResult, CustomerCredentials, CustomerStrategy,
	ExecutePaymentMethodCheckoutOptions, MissingDataKind, PaymentIntegrationService,
	PaymentProviderCustomer, RequestOptions,
};
use futures::FutureExt;
use parking_lot::Mutex;

use crate::client::{StripeElements, StripeEventHandler, StripeScriptLoader};
use crate::types::{
	STRIPE_CLIENT_API_VERSION, STRIPE_CLIENT_BETAS, StripeAppearanceOptions, StripeDefaultValues,
	StripeElementEvent, StripeElementOptions, StripeElementType, StripeElementsOptions,
	StripeEvent, StripeFormMode, StripeFormStyles, StripeInitializationData,
};

pub type EmailChangeCallback = Arc<dyn Fn(bool, String) + Send + Sync>;
pub type StylesProvider = Arc<dyn Fn() -> Option<StripeFormStyles> + Send + Sync>;
pub type LoadingCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Stripe UPE customer step options.
#[derive(Clone, Default)]
pub struct StripeUpeCustomerOptions {
	/// Id of the element hosting the link authentication element
	pub container: Option<String>,
	pub gateway_id: Option<String>,
	pub method_id: Option<String>,
	/// Receives `(authenticated, email)` on every change of the element
	pub on_email_change: Option<EmailChangeCallback>,
	pub get_styles: Option<StylesProvider>,
	pub is_loading: Option<LoadingCallback>,
}

#[derive(Clone, Default)]
pub struct StripeUpeCustomerInitializeOptions {
	pub stripeupe: Option<StripeUpeCustomerOptions>,
}

pub struct StripeUpeCustomerStrategy {
	payment_integration: Arc<dyn PaymentIntegrationService>,
	script_loader: Arc<dyn StripeScriptLoader>,
	elements: Mutex<Option<Arc<dyn StripeElements>>>,
}

impl StripeUpeCustomerStrategy {
	pub fn new(
		payment_integration: Arc<dyn PaymentIntegrationService>,
		script_loader: Arc<dyn StripeScriptLoader>,
	) -> Self {
		Self {
			payment_integration,
			script_loader,
			elements: Mutex::new(None),
		}
	}

	fn email_change_handler(
		&self,
		on_email_change: EmailChangeCallback,
		is_loading: Option<LoadingCallback>,
		link_authentication_state: Option<bool>,
		consignment_id: Option<String>,
	) -> StripeEventHandler {
		let payment_integration = self.payment_integration.clone();

		Arc::new(move |event: StripeEvent| {
			let payment_integration = payment_integration.clone();
			let on_email_change = on_email_change.clone();
			let is_loading = is_loading.clone();
			let consignment_id = consignment_id.clone();

			async move {
				let authenticated = event
					.authenticated
					.ok_or(CheckoutError::MissingData(MissingDataKind::MissingCustomer))?;

				payment_integration.update_payment_provider_customer(PaymentProviderCustomer {
					stripe_link_authentication_state: Some(authenticated),
				});

				if event.complete {
					on_email_change(authenticated, event.value.email);
				} else {
					on_email_change(false, String::new());
				}

				if let Some(is_loading) = &is_loading {
					is_loading(false);
				}

				// A customer authenticating for the first time gets Link's saved
				// shipping address, so the existing consignment is dropped.
				if link_authentication_state.is_none()
					&& authenticated
					&& let Some(consignment_id) = consignment_id
				{
					tracing::debug!(
						%consignment_id,
						"deleting consignment after Link authentication"
					);
					payment_integration.delete_consignment(&consignment_id).await?;
				}

				Ok::<(), CheckoutError>(())
			}
			.boxed()
		})
	}
}

fn required<T>(value: Option<T>, key: &str) -> CheckoutResult<T> {
	value.ok_or_else(|| CheckoutError::missing_option(key))
}

fn required_text(value: Option<String>, key: &str) -> CheckoutResult<String> {
	required(value.filter(|text| !text.is_empty()), key)
}

#[async_trait]
impl CustomerStrategy for StripeUpeCustomerStrategy {
	type Options = StripeUpeCustomerInitializeOptions;

	async fn initialize(&self, options: Self::Options) -> CheckoutResult<()> {
		let stripeupe = required(options.stripeupe, "options")?;
		let container = required_text(stripeupe.container, "container")?;
		let gateway_id = required_text(stripeupe.gateway_id, "gatewayId")?;
		let method_id = required_text(stripeupe.method_id, "methodId")?;
		let on_email_change = required(stripeupe.on_email_change, "onEmailChange")?;

		self.payment_integration
			.load_payment_method(&gateway_id, RequestOptions::with_param("method", &method_id))
			.await?;

		let payment_method = self
			.payment_integration
			.payment_method_or_throw(&method_id, Some(&gateway_id))?;
		let client_token = payment_method
			.client_token
			.clone()
			.filter(|token| !token.is_empty())
			.ok_or(CheckoutError::MissingData(MissingDataKind::MissingPaymentToken))?;
		let initialization_data: StripeInitializationData = payment_method
			.initialization_data
			.clone()
			.and_then(|data| serde_json::from_value(data).ok())
			.ok_or(CheckoutError::MissingData(MissingDataKind::MissingPaymentToken))?;

		let email = self.payment_integration.customer_or_throw()?.email;
		let link_authentication_state = self
			.payment_integration
			.payment_provider_customer_or_throw()?
			.stripe_link_authentication_state;

		if email.as_deref().is_some_and(|email| !email.is_empty()) {
			tracing::debug!(
				%method_id,
				"customer already identified; skipping link authentication"
			);
			return Ok(());
		}

		let appearance = stripeupe
			.get_styles
			.as_ref()
			.and_then(|get_styles| get_styles())
			.map(|styles| StripeAppearanceOptions::from(&styles))
			.unwrap_or_default();

		let client = self
			.script_loader
			.get_stripe_client(
				&initialization_data,
				&STRIPE_CLIENT_BETAS,
				STRIPE_CLIENT_API_VERSION,
			)
			.await?;
		let elements = self
			.script_loader
			.get_elements(
				client,
				StripeElementsOptions {
					client_secret: client_token,
					appearance,
				},
			)
			.await?;
		*self.elements.lock() = Some(elements.clone());

		let consignment_id = self
			.payment_integration
			.consignments()
			.first()
			.map(|consignment| consignment.id.clone());
		let element_options = StripeElementOptions {
			default_values: self
				.payment_integration
				.billing_address()
				.and_then(|address| address.email)
				.filter(|email| !email.is_empty())
				.map(|email| StripeDefaultValues {
					mode: StripeFormMode::Shipping,
					email,
				}),
		};

		let link_authentication_element = elements
			.get_element(StripeElementType::LinkAuthentication)
			.unwrap_or_else(|| {
				elements.create(StripeElementType::LinkAuthentication, element_options)
			});

		link_authentication_element.on(
			StripeElementEvent::Change,
			self.email_change_handler(
				on_email_change,
				stripeupe.is_loading,
				link_authentication_state,
				consignment_id,
			),
		);
		link_authentication_element.mount(&format!("#{}", container));

		Ok(())
	}

	async fn deinitialize(&self) -> CheckoutResult<()> {
		let elements = self.elements.lock().clone();
		if let Some(element) = elements
			.and_then(|elements| elements.get_element(StripeElementType::LinkAuthentication))
		{
			element.unmount();
		}
		Ok(())
	}

	async fn sign_in(
		&self,
		credentials: CustomerCredentials,
		options: Option<RequestOptions>,
	) -> CheckoutResult<()> {
		self.payment_integration
			.sign_in_customer(credentials, options)
			.await
	}

	async fn sign_out(&self, options: Option<RequestOptions>) -> CheckoutResult<()> {
		self.payment_integration.sign_out_customer(options).await
	}

	async fn execute_payment_method_checkout(
		&self,
		options: Option<ExecutePaymentMethodCheckoutOptions>,
	) -> CheckoutResult<()> {
		if let Some(continue_with_checkout) =
			options.and_then(|options| options.continue_with_checkout_callback)
		{
			continue_with_checkout();
		}
		Ok(())
	}
}
