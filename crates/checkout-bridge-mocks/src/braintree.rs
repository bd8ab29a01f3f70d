//! Mock Braintree module scripts.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use checkout_bridge_braintree::{
	BraintreeClient, BraintreeDataCollectorModule, BraintreeHostedFields, BraintreeRequest,
	BraintreeScriptLoader, BraintreeThreeDSecure, BraintreeVenmoCheckout, BraintreeVisaCheckout,
	ClientConfig, ClientCreator, DataCollectorConfig, DataCollectorCreator, HostedFieldsConfig,
	HostedFieldsCreator, ModuleCreator, ThreeDSecureConfig, ThreeDSecureCreator,
	ThreeDSecureVerifyOptions, TokenizePayload, VenmoCheckoutConfig, VenmoCheckoutCreator,
	VerifyPayload, VisaCheckoutConfig, VisaCheckoutCreator,
};
use checkout_bridge_cache::Teardown;
use checkout_bridge_core::VendorError;
use parking_lot::Mutex;
use serde_json::json;

/// Behavior of the modules a [`MockModuleCreator`] creates.
#[derive(Debug, Clone)]
pub struct MockModuleBehavior {
	pub device_data: String,
	pub browser_supported: bool,
	pub teardown_error: Option<VendorError>,
}

impl Default for MockModuleBehavior {
	fn default() -> Self {
		Self {
			device_data: "mock-device-data".to_string(),
			browser_supported: true,
			teardown_error: None,
		}
	}
}

/// A created Braintree module.
///
/// Implements every module contract, so one type stands in for the client,
/// 3-D Secure, data collector and the wallets.
#[derive(Debug)]
pub struct MockBraintreeModule {
	behavior: MockModuleBehavior,
	teardowns: AtomicUsize,
}

impl MockBraintreeModule {
	pub fn new(behavior: MockModuleBehavior) -> Self {
		Self {
			behavior,
			teardowns: AtomicUsize::new(0),
		}
	}

	/// Number of times the module was torn down.
	pub fn teardown_count(&self) -> usize {
		self.teardowns.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Teardown for MockBraintreeModule {
	async fn teardown(&self) -> Result<(), VendorError> {
		self.teardowns.fetch_add(1, Ordering::SeqCst);
		match &self.behavior.teardown_error {
			Some(err) => Err(err.clone()),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl BraintreeClient for MockBraintreeModule {
	async fn request(&self, request: BraintreeRequest) -> Result<serde_json::Value, VendorError> {
		Ok(json!({ "endpoint": request.endpoint }))
	}
}

#[async_trait]
impl BraintreeThreeDSecure for MockBraintreeModule {
	async fn verify_card(
		&self,
		options: ThreeDSecureVerifyOptions,
	) -> Result<VerifyPayload, VendorError> {
		Ok(VerifyPayload {
			nonce: format!("verified-{}", options.nonce),
			liability_shifted: true,
			liability_shift_possible: true,
		})
	}

	async fn cancel_verify_card(&self) -> Result<(), VendorError> {
		Ok(())
	}
}

impl BraintreeDataCollectorModule for MockBraintreeModule {
	fn device_data(&self) -> String {
		self.behavior.device_data.clone()
	}
}

#[async_trait]
impl BraintreeVisaCheckout for MockBraintreeModule {
	async fn tokenize(&self, payment: serde_json::Value) -> Result<TokenizePayload, VendorError> {
		Ok(TokenizePayload {
			nonce: "visa-nonce".to_string(),
			kind: "VisaCheckoutCard".to_string(),
			details: payment,
		})
	}
}

#[async_trait]
impl BraintreeVenmoCheckout for MockBraintreeModule {
	fn is_browser_supported(&self) -> bool {
		self.behavior.browser_supported
	}

	async fn tokenize(&self) -> Result<TokenizePayload, VendorError> {
		Ok(TokenizePayload {
			nonce: "venmo-nonce".to_string(),
			kind: "VenmoAccount".to_string(),
			details: serde_json::Value::Null,
		})
	}
}

#[async_trait]
impl BraintreeHostedFields for MockBraintreeModule {
	async fn tokenize(&self) -> Result<TokenizePayload, VendorError> {
		Ok(TokenizePayload {
			nonce: "card-nonce".to_string(),
			kind: "CreditCard".to_string(),
			details: serde_json::Value::Null,
		})
	}
}

/// Module factory recording every config it is called with.
pub struct MockModuleCreator<C, M> {
	configs: Mutex<Vec<C>>,
	created: Mutex<Vec<Arc<MockBraintreeModule>>>,
	behavior: Mutex<MockModuleBehavior>,
	error: Mutex<Option<VendorError>>,
	wrap: fn(Arc<MockBraintreeModule>) -> M,
}

impl<C: Clone, M> MockModuleCreator<C, M> {
	/// Creates a factory handing out modules converted with `wrap`.
	pub fn new(wrap: fn(Arc<MockBraintreeModule>) -> M) -> Self {
		Self {
			configs: Mutex::new(Vec::new()),
			created: Mutex::new(Vec::new()),
			behavior: Mutex::new(MockModuleBehavior::default()),
			error: Mutex::new(None),
			wrap,
		}
	}

	/// Behavior of modules created from now on.
	pub fn set_behavior(&self, behavior: MockModuleBehavior) {
		*self.behavior.lock() = behavior;
	}

	/// Makes every following creation reject with `err`.
	pub fn fail_with(&self, err: VendorError) {
		*self.error.lock() = Some(err);
	}

	/// Lets following creations succeed again.
	pub fn succeed(&self) {
		*self.error.lock() = None;
	}

	/// Number of creation attempts, failed ones included.
	pub fn create_count(&self) -> usize {
		self.configs.lock().len()
	}

	pub fn configs(&self) -> Vec<C> {
		self.configs.lock().clone()
	}

	pub fn last_config(&self) -> Option<C> {
		self.configs.lock().last().cloned()
	}

	/// Every module created so far, in order.
	pub fn created(&self) -> Vec<Arc<MockBraintreeModule>> {
		self.created.lock().clone()
	}
}

#[async_trait]
impl<C, M> ModuleCreator<C, M> for MockModuleCreator<C, M>
where
	C: Send + 'static,
	M: Send + Sync + 'static,
{
	async fn create(&self, config: C) -> Result<M, VendorError> {
		self.configs.lock().push(config);
		if let Some(err) = self.error.lock().clone() {
			return Err(err);
		}

		let module = Arc::new(MockBraintreeModule::new(self.behavior.lock().clone()));
		self.created.lock().push(module.clone());
		Ok((self.wrap)(module))
	}
}

pub type MockClientCreator = MockModuleCreator<ClientConfig, Arc<dyn BraintreeClient>>;
pub type MockThreeDSecureCreator =
	MockModuleCreator<ThreeDSecureConfig, Arc<dyn BraintreeThreeDSecure>>;
pub type MockDataCollectorCreator =
	MockModuleCreator<DataCollectorConfig, Arc<dyn BraintreeDataCollectorModule>>;
pub type MockVisaCheckoutCreator =
	MockModuleCreator<VisaCheckoutConfig, Arc<dyn BraintreeVisaCheckout>>;
pub type MockVenmoCheckoutCreator =
	MockModuleCreator<VenmoCheckoutConfig, Arc<dyn BraintreeVenmoCheckout>>;
pub type MockHostedFieldsCreator =
	MockModuleCreator<HostedFieldsConfig, Arc<dyn BraintreeHostedFields>>;

/// Braintree script loader backed by mock module factories.
///
/// Module scripts are named `client`, `3ds`, `dataCollector`, `visaCheckout`,
/// `venmoCheckout` and `hostedFields`. Every load yields to the runtime once,
/// so concurrent callers really do overlap.
pub struct MockBraintreeScriptLoader {
	pub client: Arc<MockClientCreator>,
	pub three_d_secure: Arc<MockThreeDSecureCreator>,
	pub data_collector: Arc<MockDataCollectorCreator>,
	pub visa_checkout: Arc<MockVisaCheckoutCreator>,
	pub venmo_checkout: Arc<MockVenmoCheckoutCreator>,
	pub hosted_fields: Arc<MockHostedFieldsCreator>,
	loads: Mutex<HashMap<&'static str, usize>>,
	load_errors: Mutex<HashMap<&'static str, VendorError>>,
}

impl MockBraintreeScriptLoader {
	pub fn new() -> Self {
		Self {
			client: Arc::new(MockModuleCreator::new(|module| module as Arc<dyn BraintreeClient>)),
			three_d_secure: Arc::new(MockModuleCreator::new(|module| {
				module as Arc<dyn BraintreeThreeDSecure>
			})),
			data_collector: Arc::new(MockModuleCreator::new(|module| {
				module as Arc<dyn BraintreeDataCollectorModule>
			})),
			visa_checkout: Arc::new(MockModuleCreator::new(|module| {
				module as Arc<dyn BraintreeVisaCheckout>
			})),
			venmo_checkout: Arc::new(MockModuleCreator::new(|module| {
				module as Arc<dyn BraintreeVenmoCheckout>
			})),
			hosted_fields: Arc::new(MockModuleCreator::new(|module| {
				module as Arc<dyn BraintreeHostedFields>
			})),
			loads: Mutex::new(HashMap::new()),
			load_errors: Mutex::new(HashMap::new()),
		}
	}

	/// Number of times the script of `module` was loaded.
	pub fn load_count(&self, module: &str) -> usize {
		self.loads.lock().get(module).copied().unwrap_or(0)
	}

	/// Makes loading the script of `module` reject with `err`.
	pub fn fail_load(&self, module: &'static str, err: VendorError) {
		self.load_errors.lock().insert(module, err);
	}

	/// Every module created by any factory, in no particular order.
	pub fn created_modules(&self) -> Vec<Arc<MockBraintreeModule>> {
		let mut modules = self.client.created();
		modules.extend(self.three_d_secure.created());
		modules.extend(self.data_collector.created());
		modules.extend(self.visa_checkout.created());
		modules.extend(self.venmo_checkout.created());
		modules.extend(self.hosted_fields.created());
		modules
	}

	async fn record_load(&self, module: &'static str) -> Result<(), VendorError> {
		*self.loads.lock().entry(module).or_insert(0) += 1;
		tokio::task::yield_now().await;
		match self.load_errors.lock().get(module) {
			Some(err) => Err(err.clone()),
			None => Ok(()),
		}
	}
}

impl Default for MockBraintreeScriptLoader {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl BraintreeScriptLoader for MockBraintreeScriptLoader {
	async fn load_client(&self) -> Result<Arc<ClientCreator>, VendorError> {
		self.record_load("client").await?;
		Ok(self.client.clone() as Arc<ClientCreator>)
	}

	async fn load_3ds(&self) -> Result<Arc<ThreeDSecureCreator>, VendorError> {
		self.record_load("3ds").await?;
		Ok(self.three_d_secure.clone() as Arc<ThreeDSecureCreator>)
	}

	async fn load_data_collector(&self) -> Result<Arc<DataCollectorCreator>, VendorError> {
		self.record_load("dataCollector").await?;
		Ok(self.data_collector.clone() as Arc<DataCollectorCreator>)
	}

	async fn load_visa_checkout(&self) -> Result<Arc<VisaCheckoutCreator>, VendorError> {
		self.record_load("visaCheckout").await?;
		Ok(self.visa_checkout.clone() as Arc<VisaCheckoutCreator>)
	}

	async fn load_venmo_checkout(&self) -> Result<Arc<VenmoCheckoutCreator>, VendorError> {
		self.record_load("venmoCheckout").await?;
		Ok(self.venmo_checkout.clone() as Arc<VenmoCheckoutCreator>)
	}

	async fn load_hosted_fields(&self) -> Result<Arc<HostedFieldsCreator>, VendorError> {
		self.record_load("hostedFields").await?;
		Ok(self.hosted_fields.clone() as Arc<HostedFieldsCreator>)
	}
}
