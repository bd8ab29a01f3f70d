//! Mock host checkout service, DOM and script loader.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use checkout_bridge_core::{
	Address, Cart, Checkout, CheckoutError, CheckoutResult, Consignment, Currency, Customer,
	CustomerCredentials, DomHost, LineItems, PaymentIntegrationService, PaymentMethod,
	PaymentProviderCustomer, PhysicalItem, RequestOptions, ScriptLoader, ScriptOptions,
};
use parking_lot::{Mutex, RwLock};

/// Action recorded by [`MockPaymentIntegrationService`].
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationCall {
	LoadDefaultCheckout,
	LoadCheckout(String),
	LoadPaymentMethod {
		method_id: String,
		options: RequestOptions,
	},
	UpdateBillingAddress(Address),
	UpdateShippingAddress(Address),
	SelectShippingOption(String),
	SubmitOrder(RequestOptions),
	DeleteConsignment(String),
	/// Only the email is kept; credentials are never recorded in full
	SignInCustomer(String),
	SignOutCustomer(Option<RequestOptions>),
}

struct HostState {
	cart: Option<Cart>,
	checkout: Option<Checkout>,
	customer: Option<Customer>,
	billing_address: Option<Address>,
	consignments: Vec<Consignment>,
	payment_provider_customer: Option<PaymentProviderCustomer>,
	payment_methods: Vec<PaymentMethod>,
}

/// In-memory host checkout service.
///
/// Starts with a USD cart holding one physical item, a checkout with an
/// outstanding balance of 100, an anonymous customer and no payment methods.
pub struct MockPaymentIntegrationService {
	state: RwLock<HostState>,
	calls: Mutex<Vec<IntegrationCall>>,
	fail_next: RwLock<bool>,
}

impl MockPaymentIntegrationService {
	pub fn new() -> Self {
		Self {
			state: RwLock::new(HostState {
				cart: Some(Self::default_cart()),
				checkout: Some(Checkout {
					id: "checkout-1".to_string(),
					outstanding_balance: 100.0,
				}),
				customer: Some(Customer::default()),
				billing_address: None,
				consignments: Vec::new(),
				payment_provider_customer: Some(PaymentProviderCustomer::default()),
				payment_methods: Vec::new(),
			}),
			calls: Mutex::new(Vec::new()),
			fail_next: RwLock::new(false),
		}
	}

	/// Cart the mock starts with.
	pub fn default_cart() -> Cart {
		Cart {
			id: "cart-1".to_string(),
			currency: Currency {
				code: "USD".to_string(),
			},
			line_items: LineItems {
				physical_items: vec![PhysicalItem {
					id: "item-1".to_string(),
					quantity: 1,
				}],
			},
		}
	}

	/// Configures whether actions should fail.
	///
	/// # Arguments
	///
	/// * `fail` - If true, every action returns a service error
	pub fn set_fail_next(&self, fail: bool) {
		*self.fail_next.write() = fail;
	}

	pub fn set_cart(&self, cart: Option<Cart>) {
		self.state.write().cart = cart;
	}

	pub fn set_checkout(&self, checkout: Option<Checkout>) {
		self.state.write().checkout = checkout;
	}

	pub fn set_customer(&self, customer: Option<Customer>) {
		self.state.write().customer = customer;
	}

	pub fn set_billing_address(&self, address: Option<Address>) {
		self.state.write().billing_address = address;
	}

	pub fn set_consignments(&self, consignments: Vec<Consignment>) {
		self.state.write().consignments = consignments;
	}

	pub fn set_payment_provider_customer(&self, customer: Option<PaymentProviderCustomer>) {
		self.state.write().payment_provider_customer = customer;
	}

	pub fn add_payment_method(&self, method: PaymentMethod) {
		self.state.write().payment_methods.push(method);
	}

	/// Every action received so far, in order.
	pub fn calls(&self) -> Vec<IntegrationCall> {
		self.calls.lock().clone()
	}

	fn record(&self, call: IntegrationCall) -> CheckoutResult<()> {
		self.calls.lock().push(call);
		if *self.fail_next.read() {
			return Err(CheckoutError::Service("Mock configured to fail".to_string()));
		}
		Ok(())
	}
}

impl Default for MockPaymentIntegrationService {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl PaymentIntegrationService for MockPaymentIntegrationService {
	fn cart(&self) -> Option<Cart> {
		self.state.read().cart.clone()
	}

	fn checkout(&self) -> Option<Checkout> {
		self.state.read().checkout.clone()
	}

	fn customer(&self) -> Option<Customer> {
		self.state.read().customer.clone()
	}

	fn billing_address(&self) -> Option<Address> {
		self.state.read().billing_address.clone()
	}

	fn consignments(&self) -> Vec<Consignment> {
		self.state.read().consignments.clone()
	}

	fn payment_provider_customer(&self) -> Option<PaymentProviderCustomer> {
		self.state.read().payment_provider_customer.clone()
	}

	fn payment_method(&self, method_id: &str, gateway_id: Option<&str>) -> Option<PaymentMethod> {
		self.state
			.read()
			.payment_methods
			.iter()
			.find(|method| {
				method.id == method_id
					&& gateway_id.is_none_or(|gateway| method.gateway.as_deref() == Some(gateway))
			})
			.cloned()
	}

	async fn load_default_checkout(&self) -> CheckoutResult<()> {
		self.record(IntegrationCall::LoadDefaultCheckout)
	}

	async fn load_checkout(&self, checkout_id: &str) -> CheckoutResult<()> {
		self.record(IntegrationCall::LoadCheckout(checkout_id.to_string()))
	}

	async fn load_payment_method(
		&self,
		method_id: &str,
		options: RequestOptions,
	) -> CheckoutResult<()> {
		self.record(IntegrationCall::LoadPaymentMethod {
			method_id: method_id.to_string(),
			options,
		})
	}

	async fn update_billing_address(&self, address: Address) -> CheckoutResult<()> {
		self.record(IntegrationCall::UpdateBillingAddress(address.clone()))?;
		self.state.write().billing_address = Some(address);
		Ok(())
	}

	async fn update_shipping_address(&self, address: Address) -> CheckoutResult<()> {
		self.record(IntegrationCall::UpdateShippingAddress(address))
	}

	async fn select_shipping_option(&self, option_id: &str) -> CheckoutResult<()> {
		self.record(IntegrationCall::SelectShippingOption(option_id.to_string()))
	}

	async fn submit_order(&self, options: RequestOptions) -> CheckoutResult<()> {
		self.record(IntegrationCall::SubmitOrder(options))
	}

	async fn delete_consignment(&self, consignment_id: &str) -> CheckoutResult<()> {
		self.record(IntegrationCall::DeleteConsignment(consignment_id.to_string()))?;
		self.state
			.write()
			.consignments
			.retain(|consignment| consignment.id != consignment_id);
		Ok(())
	}

	async fn sign_in_customer(
		&self,
		credentials: CustomerCredentials,
		_options: Option<RequestOptions>,
	) -> CheckoutResult<()> {
		self.record(IntegrationCall::SignInCustomer(credentials.email.clone()))?;
		self.state.write().customer = Some(Customer {
			email: Some(credentials.email),
		});
		Ok(())
	}

	async fn sign_out_customer(&self, options: Option<RequestOptions>) -> CheckoutResult<()> {
		self.record(IntegrationCall::SignOutCustomer(options))?;
		self.state.write().customer = Some(Customer::default());
		Ok(())
	}

	fn update_payment_provider_customer(&self, customer: PaymentProviderCustomer) {
		self.state.write().payment_provider_customer = Some(customer);
	}
}

/// Page with a fixed set of element ids.
#[derive(Default)]
pub struct MockDomHost {
	elements: Mutex<HashSet<String>>,
	removed_attributes: Mutex<Vec<(String, String)>>,
	removed_elements: Mutex<Vec<String>>,
}

impl MockDomHost {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
		let host = Self::new();
		host.elements
			.lock()
			.extend(ids.into_iter().map(str::to_string));
		host
	}

	/// `(element id, attribute)` pairs removed so far.
	pub fn removed_attributes(&self) -> Vec<(String, String)> {
		self.removed_attributes.lock().clone()
	}

	pub fn removed_elements(&self) -> Vec<String> {
		self.removed_elements.lock().clone()
	}
}

impl DomHost for MockDomHost {
	fn has_element(&self, id: &str) -> bool {
		self.elements.lock().contains(id)
	}

	fn remove_element(&self, id: &str) {
		self.elements.lock().remove(id);
		self.removed_elements.lock().push(id.to_string());
	}

	fn remove_attribute(&self, id: &str, attribute: &str) {
		self.removed_attributes
			.lock()
			.push((id.to_string(), attribute.to_string()));
	}
}

/// Script loader handing out a fixed SDK handle.
pub struct MockScriptLoader<S: ?Sized> {
	sdk: Arc<S>,
	loads: Mutex<Vec<(String, ScriptOptions)>>,
	error: Mutex<Option<String>>,
}

impl<S: ?Sized + Send + Sync> MockScriptLoader<S> {
	pub fn new(sdk: Arc<S>) -> Self {
		Self {
			sdk,
			loads: Mutex::new(Vec::new()),
			error: Mutex::new(None),
		}
	}

	/// Makes every following load fail with `message`.
	pub fn fail_with(&self, message: impl Into<String>) {
		*self.error.lock() = Some(message.into());
	}

	/// `(src, options)` of every load so far.
	pub fn loads(&self) -> Vec<(String, ScriptOptions)> {
		self.loads.lock().clone()
	}

	pub fn load_count(&self) -> usize {
		self.loads.lock().len()
	}
}

#[async_trait]
impl<S: ?Sized + Send + Sync> ScriptLoader<S> for MockScriptLoader<S> {
	async fn load_script(&self, src: &str, options: &ScriptOptions) -> CheckoutResult<Arc<S>> {
		self.loads.lock().push((src.to_string(), options.clone()));
		if let Some(message) = self.error.lock().clone() {
			return Err(CheckoutError::Service(message));
		}
		Ok(self.sdk.clone())
	}
}
