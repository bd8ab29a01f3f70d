//! Pay Later checkout button strategy.
//!
//! Renders a PayPal Pay Later button (falling back to PayPal Credit when Pay
//! Later is not eligible) and, when the merchant enabled it, the cart
//! messaging banner.

use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_core::{
	CheckoutButtonStrategy, CheckoutError, CheckoutResult, DomHost, MissingDataKind,
	PaymentIntegrationService, RequestOptions,
};
use futures::FutureExt;

use crate::address::{
	address_from_partial, billing_address_from_order_details, shipping_address_from_order_details,
};
use crate::integration_service::{
	BuyNowInitializeOptions, PayPalIntegrationService, PayPalMessagesLoader,
};
use crate::loader::initialization_data;
use crate::sdk::{
	ApproveCallbackActions, ButtonCallbacks, FundingSource, MessagingOptions, PayPalButtonsOptions,
	PayPalMessagesSdk,
};
use crate::style::{messages_style_from_bnpl_config, valid_button_style};
use crate::types::{
	ApproveCallbackPayload, PAY_LATER_METHOD_ID, PartialAddress, PayPalBnplConfigurationItem,
	PayPalButtonStyleOptions, ShippingAddressChangeCallbackPayload,
	ShippingOptionChangeCallbackPayload,
};

/// Data attributes the content service sets on the banner container.
const LEGACY_BANNER_ATTRIBUTES: [&str; 4] = [
	"data-pp-style-logo-type",
	"data-pp-style-logo-position",
	"data-pp-style-text-color",
	"data-pp-style-text-size",
];

const CART_BANNER_ID: &str = "cart";

pub type PayLaterCallback = Arc<dyn Fn() + Send + Sync>;

/// Pay Later specific options.
#[derive(Clone, Default)]
pub struct PayLaterButtonOptions {
	/// Present when the button starts a buy now flow from a product page
	pub buy_now_initialize_options: Option<BuyNowInitializeOptions>,
	/// Required in the buy now flow, where no cart exists yet
	pub currency_code: Option<String>,
	pub messaging_container_id: Option<String>,
	pub style: Option<PayPalButtonStyleOptions>,
	pub on_complete: Option<PayLaterCallback>,
	pub on_eligibility_failure: Option<PayLaterCallback>,
}

#[derive(Clone, Default)]
pub struct PayLaterButtonInitializeOptions {
	pub method_id: Option<String>,
	pub container_id: Option<String>,
	pub bigcommerce_payments_paylater: Option<PayLaterButtonOptions>,
}

struct PayLaterInner {
	payment_integration: Arc<dyn PaymentIntegrationService>,
	paypal_integration: Arc<dyn PayPalIntegrationService>,
	messages_loader: Arc<dyn PayPalMessagesLoader>,
	dom: Arc<dyn DomHost>,
}

pub struct PayLaterButtonStrategy {
	inner: Arc<PayLaterInner>,
}

impl PayLaterButtonStrategy {
	pub fn new(
		payment_integration: Arc<dyn PaymentIntegrationService>,
		paypal_integration: Arc<dyn PayPalIntegrationService>,
		messages_loader: Arc<dyn PayPalMessagesLoader>,
		dom: Arc<dyn DomHost>,
	) -> Self {
		Self {
			inner: Arc::new(PayLaterInner {
				payment_integration,
				paypal_integration,
				messages_loader,
				dom,
			}),
		}
	}

	fn render_button(
		&self,
		container_id: &str,
		method_id: &str,
		options: &PayLaterButtonOptions,
	) -> CheckoutResult<()> {
		let inner = &self.inner;
		let sdk = inner.paypal_integration.paypal_sdk_or_throw()?;
		let method = inner
			.payment_integration
			.payment_method_or_throw(method_id, None)?;
		let is_hosted_checkout_enabled = initialization_data(&method)
			.map(|data| data.is_hosted_checkout_enabled)
			.unwrap_or(false);

		let mut callbacks = self.default_callbacks(method_id);
		if let Some(buy_now) = &options.buy_now_initialize_options {
			callbacks = callbacks.merge(self.buy_now_callbacks(buy_now.clone()));
		}
		if is_hosted_checkout_enabled {
			callbacks = callbacks
				.merge(self.hosted_checkout_callbacks(method_id, options.on_complete.clone()));
		}

		let style = valid_button_style(options.style.as_ref());
		let mut has_rendered_button = false;

		for funding_source in [FundingSource::PayLater, FundingSource::Credit] {
			if has_rendered_button {
				break;
			}

			let button = sdk.buttons(PayPalButtonsOptions {
				funding_source,
				style: style.clone(),
				callbacks: callbacks.clone(),
			});

			if button.is_eligible() {
				button.render(&format!("#{}", container_id));
				has_rendered_button = true;
				tracing::debug!(%funding_source, container_id, "rendered Pay Later button");
			} else if let Some(on_eligibility_failure) = &options.on_eligibility_failure {
				on_eligibility_failure();
			}
		}

		if !has_rendered_button {
			tracing::debug!(container_id, "no eligible funding source; removing button container");
			inner.paypal_integration.remove_element(container_id);
		}

		Ok(())
	}

	fn default_callbacks(&self, method_id: &str) -> ButtonCallbacks {
		let create_order_inner = self.inner.clone();
		let approve_inner = self.inner.clone();
		let method_id = method_id.to_string();

		ButtonCallbacks {
			create_order: Some(Arc::new(move || {
				let inner = create_order_inner.clone();
				async move { inner.paypal_integration.create_order(PAY_LATER_METHOD_ID).await }
					.boxed()
			})),
			on_approve: Some(Arc::new(
				move |payload: ApproveCallbackPayload, _: Arc<dyn ApproveCallbackActions>| {
					let inner = approve_inner.clone();
					let method_id = method_id.clone();
					async move {
						inner
							.paypal_integration
							.tokenize_payment(&method_id, payload.order_id.as_deref())
							.await?;
						Ok::<_, CheckoutError>(true)
					}
					.boxed()
				},
			)),
			..Default::default()
		}
	}

	fn buy_now_callbacks(&self, buy_now: BuyNowInitializeOptions) -> ButtonCallbacks {
		let click_inner = self.inner.clone();
		let cancel_inner = self.inner.clone();

		ButtonCallbacks {
			on_click: Some(Arc::new(move || {
				let inner = click_inner.clone();
				let buy_now = buy_now.clone();
				async move { inner.handle_buy_now_click(&buy_now).await }.boxed()
			})),
			on_cancel: Some(Arc::new(move || {
				let inner = cancel_inner.clone();
				async move { inner.payment_integration.load_default_checkout().await }.boxed()
			})),
			..Default::default()
		}
	}

	fn hosted_checkout_callbacks(
		&self,
		method_id: &str,
		on_complete: Option<PayLaterCallback>,
	) -> ButtonCallbacks {
		let address_inner = self.inner.clone();
		let option_inner = self.inner.clone();
		let approve_inner = self.inner.clone();
		let method_id = method_id.to_string();

		ButtonCallbacks {
			on_shipping_address_change: Some(Arc::new(
				move |payload: ShippingAddressChangeCallbackPayload| {
					let inner = address_inner.clone();
					async move { inner.on_shipping_address_change(payload).await }.boxed()
				},
			)),
			on_shipping_options_change: Some(Arc::new(
				move |payload: ShippingOptionChangeCallbackPayload| {
					let inner = option_inner.clone();
					async move { inner.on_shipping_options_change(payload).await }.boxed()
				},
			)),
			on_approve: Some(Arc::new(
				move |payload: ApproveCallbackPayload, actions: Arc<dyn ApproveCallbackActions>| {
					let inner = approve_inner.clone();
					let method_id = method_id.clone();
					let on_complete = on_complete.clone();
					async move {
						inner
							.on_hosted_checkout_approve(payload, actions, &method_id, on_complete)
							.await
					}
					.boxed()
				},
			)),
			..Default::default()
		}
	}
}

impl PayLaterInner {
	async fn handle_buy_now_click(&self, buy_now: &BuyNowInitializeOptions) -> CheckoutResult<()> {
		let cart = self
			.paypal_integration
			.create_buy_now_cart_or_throw(buy_now)
			.await?;
		self.payment_integration.load_checkout(&cart.id).await
	}

	async fn on_hosted_checkout_approve(
		&self,
		payload: ApproveCallbackPayload,
		actions: Arc<dyn ApproveCallbackActions>,
		method_id: &str,
		on_complete: Option<PayLaterCallback>,
	) -> CheckoutResult<bool> {
		let order_id = payload
			.order_id
			.ok_or(CheckoutError::MissingData(MissingDataKind::MissingOrderId))?;

		let cart = self.payment_integration.cart_or_throw()?;
		let order_details = actions.order_details().await?;

		let billing_address = billing_address_from_order_details(&order_details);
		self.payment_integration
			.update_billing_address(billing_address)
			.await?;

		if !cart.line_items.physical_items.is_empty() {
			let shipping_address = shipping_address_from_order_details(&order_details);
			self.payment_integration
				.update_shipping_address(shipping_address)
				.await?;
			self.paypal_integration.update_order().await?;
		}

		self.payment_integration
			.submit_order(RequestOptions::with_param("methodId", method_id))
			.await?;
		self.paypal_integration
			.submit_payment(method_id, &order_id)
			.await?;

		if let Some(on_complete) = on_complete {
			on_complete();
		}

		Ok(true)
	}

	async fn on_shipping_address_change(
		&self,
		payload: ShippingAddressChangeCallbackPayload,
	) -> CheckoutResult<()> {
		let shipping = payload.shipping_address;
		let address = address_from_partial(PartialAddress {
			city: shipping.city,
			country_code: shipping.country_code,
			postal_code: shipping.postal_code,
			state_or_province_code: shipping.state,
		});

		// Billing gets the same address so the backend can quote the order.
		self.payment_integration
			.update_billing_address(address.clone())
			.await?;
		self.payment_integration
			.update_shipping_address(address)
			.await?;

		let shipping_option = self.paypal_integration.shipping_option_or_throw(None)?;
		self.payment_integration
			.select_shipping_option(&shipping_option.id)
			.await?;
		self.paypal_integration.update_order().await
	}

	async fn on_shipping_options_change(
		&self,
		payload: ShippingOptionChangeCallbackPayload,
	) -> CheckoutResult<()> {
		let shipping_option = self
			.paypal_integration
			.shipping_option_or_throw(Some(&payload.selected_shipping_option.id))?;
		self.payment_integration
			.select_shipping_option(&shipping_option.id)
			.await?;
		self.paypal_integration.update_order().await
	}

	fn render_messages(
		&self,
		messages_sdk: &dyn PayPalMessagesSdk,
		messaging_container_id: &str,
		banner: &PayPalBnplConfigurationItem,
	) -> CheckoutResult<()> {
		let checkout = self.payment_integration.checkout_or_throw()?;
		let messages = messages_sdk.messages(MessagingOptions {
			amount: checkout.outstanding_balance,
			placement: CART_BANNER_ID.to_string(),
			style: messages_style_from_bnpl_config(banner),
		});
		messages.render(&format!("#{}", messaging_container_id));
		Ok(())
	}
}

#[async_trait]
impl CheckoutButtonStrategy for PayLaterButtonStrategy {
	type Options = PayLaterButtonInitializeOptions;

	async fn initialize(&self, options: Self::Options) -> CheckoutResult<()> {
		let method_id = options
			.method_id
			.filter(|id| !id.is_empty())
			.ok_or_else(|| CheckoutError::missing_option("options.methodId"))?;
		let container_id = options
			.container_id
			.filter(|id| !id.is_empty())
			.ok_or_else(|| CheckoutError::missing_option("options.containerId"))?;
		let paylater = options
			.bigcommerce_payments_paylater
			.ok_or_else(|| CheckoutError::missing_option("options.bigcommerce_payments_paylater"))?;

		let provided_currency_code = paylater
			.currency_code
			.clone()
			.filter(|code| !code.is_empty());

		let currency_code = match &paylater.buy_now_initialize_options {
			Some(buy_now) => {
				let currency_code = provided_currency_code.ok_or_else(|| {
					CheckoutError::missing_option(
						"options.bigcommerce_payments_paylater.currencyCode",
					)
				})?;
				if buy_now.get_buy_now_cart_request_body.is_none() {
					return Err(CheckoutError::InvalidArgument(
						"\"options.bigcommerce_payments_paylater.buyNowInitializeOptions.getBuyNowCartRequestBody\" argument is not provided or it is not a function.".to_string(),
					));
				}
				// No checkout session exists before the buy now cart is created.
				currency_code
			}
			None => {
				self.inner.payment_integration.load_default_checkout().await?;
				self.inner.payment_integration.cart_or_throw()?.currency.code
			}
		};

		self.inner
			.paypal_integration
			.load_paypal_sdk(&method_id, &currency_code, false)
			.await?;

		self.render_button(&container_id, &method_id, &paylater)?;

		let Some(messaging_container_id) = paylater
			.messaging_container_id
			.as_deref()
			.filter(|id| !id.is_empty() && self.inner.dom.has_element(id))
		else {
			return Ok(());
		};

		let method = self
			.inner
			.payment_integration
			.payment_method_or_throw(&method_id, None)?;
		let data = initialization_data(&method).unwrap_or_default();
		let Some(banner) = data
			.paypal_bnpl_configuration
			.iter()
			.find(|item| item.id == CART_BANNER_ID)
			.filter(|item| item.status)
		else {
			return Ok(());
		};

		for attribute in LEGACY_BANNER_ATTRIBUTES {
			self.inner
				.dom
				.remove_attribute(messaging_container_id, attribute);
		}

		let messages_sdk = self
			.inner
			.messages_loader
			.get_paypal_messages(&method, &currency_code)
			.await?;
		self.inner
			.render_messages(messages_sdk.as_ref(), messaging_container_id, banner)
	}

	async fn deinitialize(&self) -> CheckoutResult<()> {
		Ok(())
	}
}
