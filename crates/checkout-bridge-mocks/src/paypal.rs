//! Mock PayPal SDK and BigCommerce Payments integration service.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_core::{
	Cart, CheckoutError, CheckoutResult, MissingDataKind, PaymentIntegrationService,
	PaymentMethod, ShippingOption,
};
use checkout_bridge_paypal::types::OrderDetails;
use checkout_bridge_paypal::{
	ApproveCallbackActions, BuyNowInitializeOptions, FundingSource, MessagingOptions,
	PayPalButtons, PayPalButtonsOptions, PayPalIntegrationService, PayPalMessages,
	PayPalMessagesLoader, PayPalMessagesSdk, PayPalSdk,
};
use parking_lot::{Mutex, RwLock};

use crate::host::MockPaymentIntegrationService;

type Renders = Arc<Mutex<Vec<(FundingSource, String)>>>;

/// PayPal SDK whose buttons are eligible unless configured otherwise.
#[derive(Default)]
pub struct MockPayPalSdk {
	ineligible: RwLock<Vec<FundingSource>>,
	button_options: Mutex<Vec<PayPalButtonsOptions>>,
	renders: Renders,
}

impl MockPayPalSdk {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_eligible(&self, funding_source: FundingSource, eligible: bool) {
		let mut ineligible = self.ineligible.write();
		ineligible.retain(|source| *source != funding_source);
		if !eligible {
			ineligible.push(funding_source);
		}
	}

	/// Options of every button created so far.
	pub fn button_options(&self) -> Vec<PayPalButtonsOptions> {
		self.button_options.lock().clone()
	}

	/// `(funding source, container)` of every rendered button.
	pub fn rendered(&self) -> Vec<(FundingSource, String)> {
		self.renders.lock().clone()
	}
}

impl PayPalSdk for MockPayPalSdk {
	fn buttons(&self, options: PayPalButtonsOptions) -> Box<dyn PayPalButtons> {
		let funding_source = options.funding_source;
		self.button_options.lock().push(options);
		Box::new(MockPayPalButtons {
			funding_source,
			eligible: !self.ineligible.read().contains(&funding_source),
			renders: self.renders.clone(),
		})
	}
}

struct MockPayPalButtons {
	funding_source: FundingSource,
	eligible: bool,
	renders: Renders,
}

impl PayPalButtons for MockPayPalButtons {
	fn is_eligible(&self) -> bool {
		self.eligible
	}

	fn render(&self, container: &str) {
		self.renders
			.lock()
			.push((self.funding_source, container.to_string()));
	}
}

/// Approve actions returning fixed order details.
pub struct MockApproveCallbackActions {
	pub order_details: OrderDetails,
}

#[async_trait]
impl ApproveCallbackActions for MockApproveCallbackActions {
	async fn order_details(&self) -> CheckoutResult<OrderDetails> {
		Ok(self.order_details.clone())
	}
}

/// Backend call recorded by [`MockPayPalIntegrationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayPalCall {
	LoadPayPalSdk {
		method_id: String,
		currency_code: String,
		initializes_on_checkout_page: bool,
	},
	CreateOrder(String),
	TokenizePayment {
		method_id: String,
		order_id: Option<String>,
	},
	CreateBuyNowCart,
	UpdateOrder,
	SubmitPayment {
		method_id: String,
		order_id: String,
	},
	RemoveElement(String),
}

/// BigCommerce Payments integration service backed by a [`MockPayPalSdk`].
///
/// Shipping options are read from the consignments of the host mock.
pub struct MockPayPalIntegrationService {
	sdk: Arc<MockPayPalSdk>,
	host: Arc<MockPaymentIntegrationService>,
	loaded: RwLock<bool>,
	calls: Mutex<Vec<PayPalCall>>,
	order_id: String,
}

impl MockPayPalIntegrationService {
	pub fn new(sdk: Arc<MockPayPalSdk>, host: Arc<MockPaymentIntegrationService>) -> Self {
		Self {
			sdk,
			host,
			loaded: RwLock::new(false),
			calls: Mutex::new(Vec::new()),
			order_id: "ORDER_ID".to_string(),
		}
	}

	pub fn order_id(&self) -> &str {
		&self.order_id
	}

	pub fn calls(&self) -> Vec<PayPalCall> {
		self.calls.lock().clone()
	}

	fn record(&self, call: PayPalCall) {
		self.calls.lock().push(call);
	}
}

#[async_trait]
impl PayPalIntegrationService for MockPayPalIntegrationService {
	async fn load_paypal_sdk(
		&self,
		method_id: &str,
		currency_code: &str,
		initializes_on_checkout_page: bool,
	) -> CheckoutResult<Arc<dyn PayPalSdk>> {
		self.record(PayPalCall::LoadPayPalSdk {
			method_id: method_id.to_string(),
			currency_code: currency_code.to_string(),
			initializes_on_checkout_page,
		});
		*self.loaded.write() = true;
		Ok(self.sdk.clone() as Arc<dyn PayPalSdk>)
	}

	fn paypal_sdk_or_throw(&self) -> CheckoutResult<Arc<dyn PayPalSdk>> {
		if *self.loaded.read() {
			Ok(self.sdk.clone() as Arc<dyn PayPalSdk>)
		} else {
			Err(CheckoutError::MissingData(MissingDataKind::MissingSdk))
		}
	}

	async fn create_order(&self, provider_id: &str) -> CheckoutResult<String> {
		self.record(PayPalCall::CreateOrder(provider_id.to_string()));
		Ok(self.order_id.clone())
	}

	async fn tokenize_payment(
		&self,
		method_id: &str,
		order_id: Option<&str>,
	) -> CheckoutResult<()> {
		self.record(PayPalCall::TokenizePayment {
			method_id: method_id.to_string(),
			order_id: order_id.map(str::to_string),
		});
		Ok(())
	}

	async fn create_buy_now_cart_or_throw(
		&self,
		options: &BuyNowInitializeOptions,
	) -> CheckoutResult<Cart> {
		self.record(PayPalCall::CreateBuyNowCart);
		let body = options
			.get_buy_now_cart_request_body
			.as_ref()
			.and_then(|provider| provider())
			.ok_or_else(|| {
				CheckoutError::InvalidArgument("buy now cart request body is missing".to_string())
			})?;

		let mut cart = MockPaymentIntegrationService::default_cart();
		cart.id = format!("buy-now-{}", body.line_items.len());
		Ok(cart)
	}

	async fn update_order(&self) -> CheckoutResult<()> {
		self.record(PayPalCall::UpdateOrder);
		Ok(())
	}

	async fn submit_payment(&self, method_id: &str, order_id: &str) -> CheckoutResult<()> {
		self.record(PayPalCall::SubmitPayment {
			method_id: method_id.to_string(),
			order_id: order_id.to_string(),
		});
		Ok(())
	}

	fn shipping_option_or_throw(&self, option_id: Option<&str>) -> CheckoutResult<ShippingOption> {
		let consignment = self
			.host
			.consignments()
			.into_iter()
			.next()
			.ok_or(CheckoutError::MissingData(MissingDataKind::MissingShippingOption))?;

		let available = &consignment.available_shipping_options;
		let found = match option_id {
			Some(id) => available.iter().find(|option| option.id == id).cloned(),
			None => consignment
				.selected_shipping_option
				.clone()
				.or_else(|| available.iter().find(|option| option.is_recommended).cloned()),
		};
		found.ok_or(CheckoutError::MissingData(MissingDataKind::MissingShippingOption))
	}

	fn remove_element(&self, element_id: &str) {
		self.record(PayPalCall::RemoveElement(element_id.to_string()));
	}
}

/// Messages SDK recording banner options and render targets.
#[derive(Default)]
pub struct MockPayPalMessagesSdk {
	options: Mutex<Vec<MessagingOptions>>,
	renders: Arc<Mutex<Vec<String>>>,
}

impl MockPayPalMessagesSdk {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn options(&self) -> Vec<MessagingOptions> {
		self.options.lock().clone()
	}

	/// Containers the banner was rendered into.
	pub fn rendered(&self) -> Vec<String> {
		self.renders.lock().clone()
	}
}

impl PayPalMessagesSdk for MockPayPalMessagesSdk {
	fn messages(&self, options: MessagingOptions) -> Box<dyn PayPalMessages> {
		self.options.lock().push(options);
		Box::new(MockPayPalMessages {
			renders: self.renders.clone(),
		})
	}
}

struct MockPayPalMessages {
	renders: Arc<Mutex<Vec<String>>>,
}

impl PayPalMessages for MockPayPalMessages {
	fn render(&self, container: &str) {
		self.renders.lock().push(container.to_string());
	}
}

/// Messages loader handing out a [`MockPayPalMessagesSdk`].
pub struct MockPayPalMessagesLoader {
	sdk: Arc<MockPayPalMessagesSdk>,
	/// Loads per `(method id, currency)`
	loads: Mutex<HashMap<(String, String), usize>>,
}

impl MockPayPalMessagesLoader {
	pub fn new(sdk: Arc<MockPayPalMessagesSdk>) -> Self {
		Self {
			sdk,
			loads: Mutex::new(HashMap::new()),
		}
	}

	pub fn load_count(&self) -> usize {
		self.loads.lock().values().sum()
	}

	pub fn loads_for(&self, method_id: &str, currency_code: &str) -> usize {
		self.loads
			.lock()
			.get(&(method_id.to_string(), currency_code.to_string()))
			.copied()
			.unwrap_or(0)
	}
}

#[async_trait]
impl PayPalMessagesLoader for MockPayPalMessagesLoader {
	async fn get_paypal_messages(
		&self,
		method: &PaymentMethod,
		currency_code: &str,
	) -> CheckoutResult<Arc<dyn PayPalMessagesSdk>> {
		*self
			.loads
			.lock()
			.entry((method.id.clone(), currency_code.to_string()))
			.or_insert(0) += 1;
		Ok(self.sdk.clone() as Arc<dyn PayPalMessagesSdk>)
	}
}
