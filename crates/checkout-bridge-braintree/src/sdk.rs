//! Braintree SDK creator.

use std::sync::Arc;

use checkout_bridge_cache::{ModuleCache, ModuleError, ModuleResult, SlotKey, Teardown};
use checkout_bridge_conf::{BraintreeSettings, PaymentMethodUsage};
use checkout_bridge_core::VendorError;

use crate::data_collector::{BraintreeDataCollector, DATA_COLLECTOR_KOUNT_NOT_ENABLED};
use crate::loader::BraintreeScriptLoader;
use crate::modules::{
	BraintreeClient, BraintreeHostedFields, BraintreeThreeDSecure, BraintreeVenmoCheckout,
	BraintreeVisaCheckout, ClientConfig, DataCollectorConfig, HostedFieldsConfig,
	HostedFieldsOptions, ThreeDSecureConfig, VenmoCheckoutConfig, VisaCheckoutConfig,
};

const CLIENT: SlotKey = SlotKey::new("client");
const THREE_D_SECURE: SlotKey = SlotKey::new("3ds");
const DATA_COLLECTOR_DEFAULT: SlotKey = SlotKey::new("dataCollector:default");
const DATA_COLLECTOR_PAYPAL: SlotKey = SlotKey::new("dataCollector:paypal");
const VISA_CHECKOUT: SlotKey = SlotKey::new("visaCheckout");
const VENMO_CHECKOUT: SlotKey = SlotKey::new("venmoCheckout");
const HOSTED_FIELDS: SlotKey = SlotKey::new("hostedFields");

/// Options for [`BraintreeSdk::get_data_collector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataCollectorOptions {
	/// Collect device data for a PayPal payment
	pub paypal: bool,
}

impl DataCollectorOptions {
	fn slot_key(&self) -> SlotKey {
		if self.paypal {
			DATA_COLLECTOR_PAYPAL
		} else {
			DATA_COLLECTOR_DEFAULT
		}
	}
}

/// Caller overrides of the Venmo creation defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenmoCheckoutOptions {
	pub allow_desktop: Option<bool>,
	pub mobile_web_fallback: Option<bool>,
	pub payment_method_usage: Option<PaymentMethodUsage>,
}

pub type VenmoSuccessCallback = Arc<dyn Fn(&Arc<dyn BraintreeVenmoCheckout>) + Send + Sync>;
pub type VenmoErrorCallback = Arc<dyn Fn(&ModuleError) + Send + Sync>;

/// Callbacks notified when the Venmo module is created.
///
/// They only fire for the call that performs the creation; a call served from
/// the cache returns the module without invoking them.
#[derive(Clone, Default)]
pub struct VenmoCallbacks {
	pub on_success: Option<VenmoSuccessCallback>,
	pub on_error: Option<VenmoErrorCallback>,
}

struct SdkInner {
	cache: ModuleCache,
	loader: Arc<dyn BraintreeScriptLoader>,
	settings: BraintreeSettings,
}

/// Lazily creates and memoizes Braintree modules.
///
/// Cloning is cheap and every clone shares the same modules.
#[derive(Clone)]
pub struct BraintreeSdk {
	inner: Arc<SdkInner>,
}

impl BraintreeSdk {
	pub fn new(loader: Arc<dyn BraintreeScriptLoader>) -> Self {
		Self::with_settings(loader, BraintreeSettings::default())
	}

	pub fn with_settings(
		loader: Arc<dyn BraintreeScriptLoader>,
		settings: BraintreeSettings,
	) -> Self {
		Self {
			inner: Arc::new(SdkInner {
				cache: ModuleCache::new(),
				loader,
				settings,
			}),
		}
	}

	/// Stores the client token. Nothing is loaded until a module is requested.
	pub fn initialize(&self, client_token: impl Into<String>) {
		self.inner.cache.initialize(client_token);
	}

	pub fn is_initialized(&self) -> bool {
		self.inner.cache.is_initialized()
	}

	pub fn settings(&self) -> &BraintreeSettings {
		&self.inner.settings
	}

	pub async fn get_client(&self) -> ModuleResult<Arc<dyn BraintreeClient>> {
		let loader = self.inner.loader.clone();
		self.inner
			.cache
			.get_or_create(CLIENT, move |authorization| async move {
				let creator = loader
					.load_client()
					.await
					.map_err(|source| creation_failed(CLIENT, source))?;
				creator
					.create(ClientConfig { authorization })
					.await
					.map_err(|source| creation_failed(CLIENT, source))
			})
			.await
	}

	pub async fn get_3ds(&self) -> ModuleResult<Arc<dyn BraintreeThreeDSecure>> {
		let sdk = self.clone();
		self.inner
			.cache
			.get_or_create(THREE_D_SECURE, move |_| async move {
				let client = sdk.get_client().await?;
				let creator = sdk
					.inner
					.loader
					.load_3ds()
					.await
					.map_err(|source| creation_failed(THREE_D_SECURE, source))?;
				creator
					.create(ThreeDSecureConfig {
						client,
						version: sdk.inner.settings.three_d_secure_version,
					})
					.await
					.map_err(|source| creation_failed(THREE_D_SECURE, source))
			})
			.await
	}

	/// Returns the default or PayPal data collector.
	///
	/// The two variants live in separate slots. A merchant without Kount gets a
	/// collector with no device data instead of an error.
	pub async fn get_data_collector(
		&self,
		options: DataCollectorOptions,
	) -> ModuleResult<Arc<BraintreeDataCollector>> {
		let key = options.slot_key();
		let sdk = self.clone();
		self.inner
			.cache
			.get_or_create(key.clone(), move |_| async move {
				let client = sdk.get_client().await?;
				let creator = sdk
					.inner
					.loader
					.load_data_collector()
					.await
					.map_err(|source| creation_failed(key.clone(), source))?;
				let config = DataCollectorConfig {
					client,
					kount: sdk.inner.settings.kount,
					paypal: options.paypal.then_some(true),
				};

				match creator.create(config).await {
					Ok(module) => Ok(Arc::new(BraintreeDataCollector::new(module))),
					Err(source) if source.has_code(DATA_COLLECTOR_KOUNT_NOT_ENABLED) => {
						tracing::debug!(
							slot = %key,
							"kount is not enabled; continuing without device data"
						);
						Ok(Arc::new(BraintreeDataCollector::disabled()))
					}
					Err(source) => Err(creation_failed(key, source)),
				}
			})
			.await
	}

	pub async fn get_visa_checkout(&self) -> ModuleResult<Arc<dyn BraintreeVisaCheckout>> {
		let sdk = self.clone();
		self.inner
			.cache
			.get_or_create(VISA_CHECKOUT, move |_| async move {
				let client = sdk.get_client().await?;
				let creator = sdk
					.inner
					.loader
					.load_visa_checkout()
					.await
					.map_err(|source| creation_failed(VISA_CHECKOUT, source))?;
				creator
					.create(VisaCheckoutConfig { client })
					.await
					.map_err(|source| creation_failed(VISA_CHECKOUT, source))
			})
			.await
	}

	/// Returns the Venmo module, created with the configured defaults
	/// overridden field by field by `options`.
	///
	/// # Errors
	///
	/// [`ModuleError::NotSupported`] when the created module reports that the
	/// browser cannot complete a Venmo payment. The module is torn down and
	/// not cached in that case.
	pub async fn get_venmo_checkout(
		&self,
		callbacks: VenmoCallbacks,
		options: Option<VenmoCheckoutOptions>,
	) -> ModuleResult<Arc<dyn BraintreeVenmoCheckout>> {
		let sdk = self.clone();
		self.inner
			.cache
			.get_or_create(VENMO_CHECKOUT, move |_| async move {
				let result = sdk.create_venmo_checkout(options.unwrap_or_default()).await;
				match &result {
					Ok(venmo) => {
						if let Some(on_success) = &callbacks.on_success {
							on_success(venmo);
						}
					}
					Err(err) => {
						if let Some(on_error) = &callbacks.on_error {
							on_error(err);
						}
					}
				}
				result
			})
			.await
	}

	async fn create_venmo_checkout(
		&self,
		options: VenmoCheckoutOptions,
	) -> ModuleResult<Arc<dyn BraintreeVenmoCheckout>> {
		let client = self.get_client().await?;
		let creator = self
			.inner
			.loader
			.load_venmo_checkout()
			.await
			.map_err(|source| creation_failed(VENMO_CHECKOUT, source))?;

		let defaults = &self.inner.settings.venmo;
		let config = VenmoCheckoutConfig {
			client,
			allow_desktop: options.allow_desktop.unwrap_or(defaults.allow_desktop),
			mobile_web_fallback: options.mobile_web_fallback,
			payment_method_usage: options
				.payment_method_usage
				.unwrap_or(defaults.payment_method_usage),
		};

		let venmo = creator
			.create(config)
			.await
			.map_err(|source| creation_failed(VENMO_CHECKOUT, source))?;

		if !venmo.is_browser_supported() {
			if let Err(err) = venmo.teardown().await {
				tracing::warn!(
					slot = %VENMO_CHECKOUT,
					error = %err,
					"failed to tear down unsupported module"
				);
			}
			return Err(ModuleError::NotSupported {
				key: VENMO_CHECKOUT,
				reason: "browser does not support Venmo checkout".to_string(),
			});
		}

		Ok(venmo)
	}

	/// Creates a hosted fields instance on top of the cached client.
	///
	/// Hosted fields are bound to the form they render into, so every call
	/// creates a new instance.
	pub async fn create_hosted_fields(
		&self,
		options: HostedFieldsOptions,
	) -> ModuleResult<Arc<dyn BraintreeHostedFields>> {
		let client = self.get_client().await?;
		let creator = self
			.inner
			.loader
			.load_hosted_fields()
			.await
			.map_err(|source| creation_failed(HOSTED_FIELDS, source))?;

		creator
			.create(HostedFieldsConfig {
				client,
				fields: options.fields,
				styles: options.styles,
			})
			.await
			.map_err(|source| creation_failed(HOSTED_FIELDS, source))
	}

	/// Tears down every module created so far.
	pub async fn teardown(&self) -> ModuleResult<()> {
		self.inner.cache.teardown().await
	}
}

fn creation_failed(key: SlotKey, source: VendorError) -> ModuleError {
	ModuleError::VendorCreationFailed { key, source }
}
