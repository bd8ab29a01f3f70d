//! Integration tests for the Braintree SDK module creator.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use checkout_bridge_braintree::{
	BraintreeSdk, BraintreeSettings, BraintreeVenmoCheckout, DATA_COLLECTOR_KOUNT_NOT_ENABLED,
	DataCollectorOptions, HostedFieldOptions, HostedFieldType, HostedFieldsOptions,
	PaymentMethodUsage, VenmoCallbacks, VenmoCheckoutOptions,
};
use checkout_bridge_cache::{ModuleError, SlotKey};
use checkout_bridge_core::VendorError;
use checkout_bridge_mocks::{MockBraintreeScriptLoader, MockModuleBehavior};
use rstest::*;

struct Fixture {
	loader: Arc<MockBraintreeScriptLoader>,
	sdk: BraintreeSdk,
}

#[fixture]
fn harness() -> Fixture {
	let loader = Arc::new(MockBraintreeScriptLoader::new());
	let sdk = BraintreeSdk::new(loader.clone());
	sdk.initialize("client-token");
	Fixture { loader, sdk }
}

fn same_allocation<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
	std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

fn counter() -> (Arc<AtomicUsize>, Arc<dyn Fn() + Send + Sync>) {
	let count = Arc::new(AtomicUsize::new(0));
	let handle = count.clone();
	(count, Arc::new(move || {
		handle.fetch_add(1, Ordering::SeqCst);
	}))
}

#[rstest]
#[tokio::test]
async fn test_client_is_created_with_the_client_token(harness: Fixture) {
	// Act
	let _client = harness.sdk.get_client().await.unwrap();

	// Assert
	let config = harness.loader.client.last_config().unwrap();
	assert_eq!(config.authorization, "client-token");
	assert_eq!(harness.loader.load_count("client"), 1);
}

#[rstest]
#[tokio::test]
async fn test_accessors_reject_before_initialize() {
	// Arrange
	let loader = Arc::new(MockBraintreeScriptLoader::new());
	let sdk = BraintreeSdk::new(loader.clone());

	// Act
	let client = sdk.get_client().await;
	let three_d_secure = sdk.get_3ds().await;

	// Assert
	assert_eq!(client.err(), Some(ModuleError::Uninitialized));
	assert_eq!(three_d_secure.err(), Some(ModuleError::Uninitialized));
	assert_eq!(loader.load_count("client"), 0);
	assert!(!sdk.is_initialized());
}

#[rstest]
#[tokio::test]
async fn test_concurrent_3ds_requests_share_one_module(harness: Fixture) {
	// Act
	let (first, second) = tokio::join!(harness.sdk.get_3ds(), harness.sdk.get_3ds());

	// Assert
	let (first, second) = (first.unwrap(), second.unwrap());
	assert!(same_allocation(&first, &second));
	assert_eq!(harness.loader.load_count("3ds"), 1);
	assert_eq!(harness.loader.three_d_secure.create_count(), 1);
	assert_eq!(harness.loader.load_count("client"), 1);
	assert_eq!(harness.loader.client.create_count(), 1);
}

#[rstest]
#[tokio::test]
async fn test_3ds_is_created_on_top_of_the_cached_client(harness: Fixture) {
	// Arrange
	let client = harness.sdk.get_client().await.unwrap();

	// Act
	let _three_d_secure = harness.sdk.get_3ds().await.unwrap();

	// Assert
	let config = harness.loader.three_d_secure.last_config().unwrap();
	assert!(same_allocation(&config.client, &client));
	assert_eq!(config.version, 2);
	assert_eq!(harness.loader.client.create_count(), 1);
}

#[rstest]
#[tokio::test]
async fn test_cached_module_is_returned_without_loading_again(harness: Fixture) {
	// Arrange
	let first = harness.sdk.get_visa_checkout().await.unwrap();

	// Act
	let second = harness.sdk.get_visa_checkout().await.unwrap();

	// Assert
	assert!(same_allocation(&first, &second));
	assert_eq!(harness.loader.load_count("visaCheckout"), 1);
	assert_eq!(harness.loader.visa_checkout.create_count(), 1);
}

#[rstest]
#[tokio::test]
async fn test_client_failure_fails_dependent_module(harness: Fixture) {
	// Arrange
	harness
		.loader
		.client
		.fail_with(VendorError::with_code("CLIENT_AUTHORIZATION_INVALID", "bad token"));

	// Act
	let result = harness.sdk.get_3ds().await;

	// Assert
	let err = result.err().unwrap();
	assert!(matches!(
		&err,
		ModuleError::VendorCreationFailed { key, .. } if *key == SlotKey::new("client")
	));
	assert!(err.vendor_error().unwrap().has_code("CLIENT_AUTHORIZATION_INVALID"));
	assert_eq!(harness.loader.load_count("3ds"), 0);
}

#[rstest]
#[tokio::test]
async fn test_script_load_failure_is_reported_for_the_module(harness: Fixture) {
	// Arrange
	harness
		.loader
		.fail_load("visaCheckout", VendorError::new("script blocked"));

	// Act
	let result = harness.sdk.get_visa_checkout().await;

	// Assert
	assert_eq!(
		result.err(),
		Some(ModuleError::VendorCreationFailed {
			key: SlotKey::new("visaCheckout"),
			source: VendorError::new("script blocked"),
		})
	);
	assert_eq!(harness.loader.visa_checkout.create_count(), 0);
}

#[rstest]
#[tokio::test]
async fn test_failed_creation_is_retried_on_next_access(harness: Fixture) {
	// Arrange
	harness
		.loader
		.three_d_secure
		.fail_with(VendorError::with_code("THREEDS_NOT_ENABLED", ""));
	assert!(harness.sdk.get_3ds().await.is_err());
	harness.loader.three_d_secure.succeed();

	// Act
	let result = harness.sdk.get_3ds().await;

	// Assert
	assert!(result.is_ok());
	assert_eq!(harness.loader.three_d_secure.create_count(), 2);
	assert_eq!(harness.loader.client.create_count(), 1);
}

#[rstest]
#[tokio::test]
async fn test_default_and_paypal_data_collectors_are_separate(harness: Fixture) {
	// Act
	let default = harness
		.sdk
		.get_data_collector(DataCollectorOptions::default())
		.await
		.unwrap();
	let paypal = harness
		.sdk
		.get_data_collector(DataCollectorOptions { paypal: true })
		.await
		.unwrap();
	let paypal_again = harness
		.sdk
		.get_data_collector(DataCollectorOptions { paypal: true })
		.await
		.unwrap();

	// Assert
	assert!(!Arc::ptr_eq(&default, &paypal));
	assert!(Arc::ptr_eq(&paypal, &paypal_again));
	assert_eq!(default.device_data.as_deref(), Some("mock-device-data"));

	let configs = harness.loader.data_collector.configs();
	assert_eq!(configs.len(), 2);
	assert!(configs[0].kount);
	assert_eq!(configs[0].paypal, None);
	assert_eq!(configs[1].paypal, Some(true));
}

#[rstest]
#[tokio::test]
async fn test_kount_not_enabled_resolves_without_device_data(harness: Fixture) {
	// Arrange
	harness.loader.data_collector.fail_with(VendorError::with_code(
		DATA_COLLECTOR_KOUNT_NOT_ENABLED,
		"Kount is not enabled for this merchant",
	));

	// Act
	let collector = harness
		.sdk
		.get_data_collector(DataCollectorOptions::default())
		.await
		.unwrap();
	let again = harness
		.sdk
		.get_data_collector(DataCollectorOptions::default())
		.await
		.unwrap();

	// Assert
	assert_eq!(collector.device_data, None);
	assert!(!collector.is_enabled());
	assert!(Arc::ptr_eq(&collector, &again));
	assert_eq!(harness.loader.data_collector.create_count(), 1);
	assert!(harness.sdk.teardown().await.is_ok());
}

#[rstest]
#[tokio::test]
async fn test_other_data_collector_errors_propagate(harness: Fixture) {
	// Arrange
	harness
		.loader
		.data_collector
		.fail_with(VendorError::with_code("OTHER_RANDOM_ERROR", ""));

	// Act
	let result = harness
		.sdk
		.get_data_collector(DataCollectorOptions { paypal: true })
		.await;

	// Assert
	assert_eq!(
		result.err(),
		Some(ModuleError::VendorCreationFailed {
			key: SlotKey::new("dataCollector:paypal"),
			source: VendorError::with_code("OTHER_RANDOM_ERROR", ""),
		})
	);
}

#[rstest]
#[tokio::test]
async fn test_kount_setting_is_forwarded() {
	// Arrange
	let loader = Arc::new(MockBraintreeScriptLoader::new());
	let settings = BraintreeSettings {
		kount: false,
		..Default::default()
	};
	let sdk = BraintreeSdk::with_settings(loader.clone(), settings);
	sdk.initialize("client-token");

	// Act
	sdk.get_data_collector(DataCollectorOptions::default())
		.await
		.unwrap();

	// Assert
	assert!(!loader.data_collector.last_config().unwrap().kount);
}

#[rstest]
#[tokio::test]
async fn test_venmo_options_override_defaults_field_by_field(harness: Fixture) {
	// Arrange
	let options = VenmoCheckoutOptions {
		allow_desktop: None,
		mobile_web_fallback: Some(true),
		payment_method_usage: Some(PaymentMethodUsage::SingleUse),
	};

	// Act
	harness
		.sdk
		.get_venmo_checkout(VenmoCallbacks::default(), Some(options))
		.await
		.unwrap();

	// Assert
	let config = harness.loader.venmo_checkout.last_config().unwrap();
	assert!(config.allow_desktop);
	assert_eq!(config.mobile_web_fallback, Some(true));
	assert_eq!(config.payment_method_usage, PaymentMethodUsage::SingleUse);
}

#[rstest]
#[tokio::test]
async fn test_venmo_defaults_without_options(harness: Fixture) {
	// Act
	harness
		.sdk
		.get_venmo_checkout(VenmoCallbacks::default(), None)
		.await
		.unwrap();

	// Assert
	let config = harness.loader.venmo_checkout.last_config().unwrap();
	assert!(config.allow_desktop);
	assert_eq!(config.mobile_web_fallback, None);
	assert_eq!(config.payment_method_usage, PaymentMethodUsage::MultiUse);
}

#[rstest]
#[tokio::test]
async fn test_venmo_success_callback_fires_only_on_creation(harness: Fixture) {
	// Arrange
	let (successes, on_success) = counter();
	let callbacks = VenmoCallbacks {
		on_success: Some(Arc::new(move |_venmo: &Arc<dyn BraintreeVenmoCheckout>| on_success())),
		on_error: None,
	};

	// Act
	let first = harness
		.sdk
		.get_venmo_checkout(callbacks.clone(), None)
		.await
		.unwrap();
	let second = harness
		.sdk
		.get_venmo_checkout(callbacks, None)
		.await
		.unwrap();

	// Assert
	assert!(same_allocation(&first, &second));
	assert_eq!(successes.load(Ordering::SeqCst), 1);
	assert_eq!(harness.loader.venmo_checkout.create_count(), 1);
}

#[rstest]
#[tokio::test]
async fn test_unsupported_venmo_browser_is_torn_down_and_not_cached(harness: Fixture) {
	// Arrange
	harness.loader.venmo_checkout.set_behavior(MockModuleBehavior {
		browser_supported: false,
		..Default::default()
	});
	let (errors, on_error) = counter();
	let callbacks = VenmoCallbacks {
		on_success: None,
		on_error: Some(Arc::new(move |_err: &ModuleError| on_error())),
	};

	// Act
	let first = harness.sdk.get_venmo_checkout(callbacks.clone(), None).await;
	let second = harness.sdk.get_venmo_checkout(callbacks, None).await;

	// Assert
	assert!(matches!(
		first.err(),
		Some(ModuleError::NotSupported { key, .. }) if key == SlotKey::new("venmoCheckout")
	));
	assert!(second.is_err());
	assert_eq!(errors.load(Ordering::SeqCst), 2);
	assert_eq!(harness.loader.venmo_checkout.create_count(), 2);
	assert!(
		harness
			.loader
			.venmo_checkout
			.created()
			.iter()
			.all(|module| module.teardown_count() == 1)
	);
}

#[rstest]
#[tokio::test]
async fn test_hosted_fields_are_created_per_call(harness: Fixture) {
	// Arrange
	let options = HostedFieldsOptions {
		fields: [(
			HostedFieldType::Number,
			HostedFieldOptions {
				container: "#card-number".to_string(),
				placeholder: Some("Card number".to_string()),
			},
		)]
		.into(),
		styles: None,
	};

	// Act
	let first = harness.sdk.create_hosted_fields(options.clone()).await.unwrap();
	let second = harness.sdk.create_hosted_fields(options).await.unwrap();

	// Assert
	assert!(!same_allocation(&first, &second));
	assert_eq!(harness.loader.hosted_fields.create_count(), 2);
	assert_eq!(harness.loader.client.create_count(), 1);
	let config = harness.loader.hosted_fields.last_config().unwrap();
	assert_eq!(config.fields[&HostedFieldType::Number].container, "#card-number");
}

#[rstest]
#[tokio::test]
async fn test_hosted_fields_failure_propagates(harness: Fixture) {
	// Arrange
	harness
		.loader
		.hosted_fields
		.fail_with(VendorError::with_code("HOSTED_FIELDS_TIMEOUT", ""));

	// Act
	let result = harness
		.sdk
		.create_hosted_fields(HostedFieldsOptions::default())
		.await;

	// Assert
	assert!(matches!(
		result.err(),
		Some(ModuleError::VendorCreationFailed { key, source })
			if key == SlotKey::new("hostedFields") && source.has_code("HOSTED_FIELDS_TIMEOUT")
	));
}

#[rstest]
#[tokio::test]
async fn test_teardown_only_reaches_created_modules(harness: Fixture) {
	// Arrange
	harness.sdk.get_client().await.unwrap();
	harness.sdk.get_3ds().await.unwrap();

	// Act
	harness.sdk.teardown().await.unwrap();

	// Assert
	let created = harness.loader.created_modules();
	assert_eq!(created.len(), 2);
	assert!(created.iter().all(|module| module.teardown_count() == 1));
	assert_eq!(harness.loader.load_count("dataCollector"), 0);
	assert_eq!(harness.loader.load_count("visaCheckout"), 0);
	assert_eq!(harness.loader.load_count("venmoCheckout"), 0);
}

#[rstest]
#[tokio::test]
async fn test_modules_are_recreated_after_teardown(harness: Fixture) {
	// Arrange
	let before = harness.sdk.get_client().await.unwrap();
	harness.sdk.teardown().await.unwrap();

	// Act
	let after = harness.sdk.get_client().await.unwrap();

	// Assert
	assert!(!same_allocation(&before, &after));
	assert_eq!(harness.loader.client.create_count(), 2);
	assert!(harness.sdk.is_initialized());
}

#[rstest]
#[tokio::test]
async fn test_teardown_failures_are_aggregated(harness: Fixture) {
	// Arrange
	harness.loader.client.set_behavior(MockModuleBehavior {
		teardown_error: Some(VendorError::new("client teardown failed")),
		..Default::default()
	});
	harness.sdk.get_3ds().await.unwrap();

	// Act
	let result = harness.sdk.teardown().await;

	// Assert
	match result {
		Err(ModuleError::Teardown { failures }) => {
			assert_eq!(failures.len(), 1);
			assert_eq!(failures[0].key, SlotKey::new("client"));
		}
		other => panic!("unexpected teardown result: {:?}", other),
	}
	assert_eq!(harness.loader.three_d_secure.created()[0].teardown_count(), 1);
}
