//! Integration tests for the Pay Later checkout button strategy.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use checkout_bridge_core::{
	CheckoutButtonStrategy, CheckoutError, Consignment, MissingDataKind, PaymentMethod,
	RequestOptions, ShippingOption,
};
use checkout_bridge_mocks::{
	IntegrationCall, MockApproveCallbackActions, MockDomHost, MockPayPalIntegrationService,
	MockPayPalMessagesLoader, MockPayPalMessagesSdk, MockPayPalSdk, MockPaymentIntegrationService,
	PayPalCall,
};
use checkout_bridge_paypal::types::{
	ApproveCallbackPayload, BuyNowCartLineItem, BuyNowCartRequestBody, OrderDetails,
	PAY_LATER_METHOD_ID, PayPalAddress, Payer, PayerName, PurchaseUnit, PurchaseUnitShipping,
	ShippingAddressChangeCallbackPayload, ShippingChangeAddress, ShippingName,
};
use checkout_bridge_paypal::{
	ApproveCallbackActions, ButtonCallbacks, BuyNowInitializeOptions, FundingSource,
	PayLaterButtonInitializeOptions, PayLaterButtonOptions, PayLaterButtonStrategy,
};
use rstest::*;
use serde_json::{Value, json};

const CONTAINER_ID: &str = "paylater-button";
const BANNER_CONTAINER_ID: &str = "paylater-banner";

struct Fixture {
	host: Arc<MockPaymentIntegrationService>,
	sdk: Arc<MockPayPalSdk>,
	paypal: Arc<MockPayPalIntegrationService>,
	messages_sdk: Arc<MockPayPalMessagesSdk>,
	messages_loader: Arc<MockPayPalMessagesLoader>,
	dom: Arc<MockDomHost>,
	strategy: PayLaterButtonStrategy,
}

fn initialization_data(overrides: Value) -> Value {
	let mut data = json!({
		"clientId": "abc",
		"merchantId": "JTS4DY7XFSQZE",
		"intent": "capture",
		"isHostedCheckoutEnabled": false,
		"paypalBNPLConfiguration": [
			{
				"id": "cart",
				"name": "Cart",
				"status": true,
				"styles": {
					"logo-type": "inline",
					"logo-position": "right",
					"text-color": "black",
					"text-size": "12"
				}
			}
		]
	});
	if let (Value::Object(data), Value::Object(overrides)) = (&mut data, overrides) {
		data.extend(overrides);
	}
	data
}

fn build(initialization_data: Value, dom: MockDomHost) -> Fixture {
	let host = Arc::new(MockPaymentIntegrationService::new());
	host.add_payment_method(PaymentMethod {
		id: PAY_LATER_METHOD_ID.to_string(),
		gateway: None,
		client_token: Some("foo".to_string()),
		initialization_data: Some(initialization_data),
	});

	let sdk = Arc::new(MockPayPalSdk::new());
	let paypal = Arc::new(MockPayPalIntegrationService::new(sdk.clone(), host.clone()));
	let messages_sdk = Arc::new(MockPayPalMessagesSdk::new());
	let messages_loader = Arc::new(MockPayPalMessagesLoader::new(messages_sdk.clone()));
	let dom = Arc::new(dom);
	let strategy = PayLaterButtonStrategy::new(
		host.clone(),
		paypal.clone(),
		messages_loader.clone(),
		dom.clone(),
	);

	Fixture {
		host,
		sdk,
		paypal,
		messages_sdk,
		messages_loader,
		dom,
		strategy,
	}
}

#[fixture]
fn harness() -> Fixture {
	build(
		initialization_data(json!({})),
		MockDomHost::with_elements([BANNER_CONTAINER_ID]),
	)
}

#[fixture]
fn hosted() -> Fixture {
	build(
		initialization_data(json!({ "isHostedCheckoutEnabled": true })),
		MockDomHost::new(),
	)
}

fn paylater_options(paylater: PayLaterButtonOptions) -> PayLaterButtonInitializeOptions {
	PayLaterButtonInitializeOptions {
		method_id: Some(PAY_LATER_METHOD_ID.to_string()),
		container_id: Some(CONTAINER_ID.to_string()),
		bigcommerce_payments_paylater: Some(paylater),
	}
}

fn default_options() -> PayLaterButtonInitializeOptions {
	paylater_options(PayLaterButtonOptions {
		messaging_container_id: Some(BANNER_CONTAINER_ID.to_string()),
		..Default::default()
	})
}

fn buy_now_options() -> BuyNowInitializeOptions {
	BuyNowInitializeOptions {
		get_buy_now_cart_request_body: Some(Arc::new(|| {
			Some(BuyNowCartRequestBody {
				line_items: vec![BuyNowCartLineItem {
					product_id: 1,
					quantity: 2,
					option_selections: Vec::new(),
				}],
				source: "button".to_string(),
			})
		})),
	}
}

fn counter() -> (Arc<AtomicUsize>, Arc<dyn Fn() + Send + Sync>) {
	let count = Arc::new(AtomicUsize::new(0));
	let handle = count.clone();
	(count, Arc::new(move || {
		handle.fetch_add(1, Ordering::SeqCst);
	}))
}

fn rendered_callbacks(sdk: &MockPayPalSdk) -> ButtonCallbacks {
	sdk.button_options()
		.first()
		.map(|options| options.callbacks.clone())
		.unwrap()
}

fn order_details() -> OrderDetails {
	OrderDetails {
		payer: Payer {
			name: PayerName {
				given_name: "John".to_string(),
				surname: "Doe".to_string(),
			},
			email_address: Some("john@example.com".to_string()),
			phone: None,
			address: PayPalAddress {
				address_line_1: Some("1 Main St".to_string()),
				admin_area_2: Some("San Jose".to_string()),
				country_code: Some("US".to_string()),
				..Default::default()
			},
		},
		purchase_units: vec![PurchaseUnit {
			shipping: Some(PurchaseUnitShipping {
				name: ShippingName {
					full_name: "Jane Roe".to_string(),
				},
				address: PayPalAddress {
					address_line_1: Some("2 Side St".to_string()),
					admin_area_2: Some("Austin".to_string()),
					country_code: Some("US".to_string()),
					..Default::default()
				},
			}),
		}],
	}
}

fn approve_actions() -> Arc<dyn ApproveCallbackActions> {
	Arc::new(MockApproveCallbackActions {
		order_details: order_details(),
	})
}

fn consignment() -> Consignment {
	let option = |id: &str, is_recommended: bool| ShippingOption {
		id: id.to_string(),
		description: id.to_string(),
		cost: 5.0,
		is_recommended,
	};
	Consignment {
		id: "consignment-1".to_string(),
		selected_shipping_option: None,
		available_shipping_options: vec![option("standard", false), option("express", true)],
	}
}

#[rstest]
#[case::missing_method_id(
	PayLaterButtonInitializeOptions { method_id: None, ..default_options() },
	"options.methodId"
)]
#[case::missing_container_id(
	PayLaterButtonInitializeOptions { container_id: Some(String::new()), ..default_options() },
	"options.containerId"
)]
#[case::missing_paylater_options(
	PayLaterButtonInitializeOptions { bigcommerce_payments_paylater: None, ..default_options() },
	"options.bigcommerce_payments_paylater"
)]
#[case::buy_now_without_currency(
	paylater_options(PayLaterButtonOptions {
		buy_now_initialize_options: Some(buy_now_options()),
		..Default::default()
	}),
	"currencyCode"
)]
#[case::buy_now_without_request_body(
	paylater_options(PayLaterButtonOptions {
		buy_now_initialize_options: Some(BuyNowInitializeOptions::default()),
		currency_code: Some("USD".to_string()),
		..Default::default()
	}),
	"getBuyNowCartRequestBody"
)]
#[tokio::test]
async fn test_invalid_options_are_rejected(
	harness: Fixture,
	#[case] options: PayLaterButtonInitializeOptions,
	#[case] expected: &str,
) {
	// Act
	let result = harness.strategy.initialize(options).await;

	// Assert
	match result {
		Err(CheckoutError::InvalidArgument(message)) => assert!(message.contains(expected)),
		other => panic!("unexpected result: {:?}", other),
	}
	assert!(harness.paypal.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_initialize_loads_checkout_and_sdk_with_cart_currency(harness: Fixture) {
	// Act
	harness.strategy.initialize(default_options()).await.unwrap();

	// Assert
	assert_eq!(harness.host.calls()[0], IntegrationCall::LoadDefaultCheckout);
	assert_eq!(
		harness.paypal.calls()[0],
		PayPalCall::LoadPayPalSdk {
			method_id: PAY_LATER_METHOD_ID.to_string(),
			currency_code: "USD".to_string(),
			initializes_on_checkout_page: false,
		}
	);
}

#[rstest]
#[tokio::test]
async fn test_buy_now_flow_uses_provided_currency(harness: Fixture) {
	// Arrange
	let options = paylater_options(PayLaterButtonOptions {
		buy_now_initialize_options: Some(buy_now_options()),
		currency_code: Some("EUR".to_string()),
		..Default::default()
	});

	// Act
	harness.strategy.initialize(options).await.unwrap();

	// Assert
	assert!(!harness.host.calls().contains(&IntegrationCall::LoadDefaultCheckout));
	assert!(matches!(
		&harness.paypal.calls()[0],
		PayPalCall::LoadPayPalSdk { currency_code, .. } if currency_code == "EUR"
	));
}

#[rstest]
#[tokio::test]
async fn test_pay_later_button_is_rendered_when_eligible(harness: Fixture) {
	// Act
	harness.strategy.initialize(default_options()).await.unwrap();

	// Assert
	assert_eq!(
		harness.sdk.rendered(),
		vec![(FundingSource::PayLater, format!("#{}", CONTAINER_ID))]
	);
	let options = harness.sdk.button_options();
	assert_eq!(options.len(), 1);
	assert_eq!(options[0].style.height, Some(40));
}

#[rstest]
#[tokio::test]
async fn test_credit_button_is_rendered_when_pay_later_is_not_eligible(harness: Fixture) {
	// Arrange
	harness.sdk.set_eligible(FundingSource::PayLater, false);
	let (failures, on_eligibility_failure) = counter();
	let options = paylater_options(PayLaterButtonOptions {
		on_eligibility_failure: Some(on_eligibility_failure),
		..Default::default()
	});

	// Act
	harness.strategy.initialize(options).await.unwrap();

	// Assert
	assert_eq!(
		harness.sdk.rendered(),
		vec![(FundingSource::Credit, format!("#{}", CONTAINER_ID))]
	);
	assert_eq!(failures.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn test_container_is_removed_when_nothing_is_eligible(harness: Fixture) {
	// Arrange
	harness.sdk.set_eligible(FundingSource::PayLater, false);
	harness.sdk.set_eligible(FundingSource::Credit, false);
	let (failures, on_eligibility_failure) = counter();
	let options = paylater_options(PayLaterButtonOptions {
		on_eligibility_failure: Some(on_eligibility_failure),
		..Default::default()
	});

	// Act
	harness.strategy.initialize(options).await.unwrap();

	// Assert
	assert!(harness.sdk.rendered().is_empty());
	assert_eq!(failures.load(Ordering::SeqCst), 2);
	assert!(
		harness
			.paypal
			.calls()
			.contains(&PayPalCall::RemoveElement(CONTAINER_ID.to_string()))
	);
}

#[rstest]
#[tokio::test]
async fn test_default_callbacks_create_and_tokenize_the_order(harness: Fixture) {
	// Arrange
	harness.strategy.initialize(default_options()).await.unwrap();
	let callbacks = rendered_callbacks(&harness.sdk);

	// Act
	let order_id = (callbacks.create_order.unwrap())().await.unwrap();
	let approved = (callbacks.on_approve.unwrap())(
		ApproveCallbackPayload {
			order_id: Some(order_id.clone()),
		},
		approve_actions(),
	)
	.await
	.unwrap();

	// Assert
	assert!(approved);
	assert_eq!(order_id, "ORDER_ID");
	let calls = harness.paypal.calls();
	assert!(calls.contains(&PayPalCall::CreateOrder(PAY_LATER_METHOD_ID.to_string())));
	assert!(calls.contains(&PayPalCall::TokenizePayment {
		method_id: PAY_LATER_METHOD_ID.to_string(),
		order_id: Some("ORDER_ID".to_string()),
	}));
	assert!(callbacks.on_shipping_address_change.is_none());
}

#[rstest]
#[tokio::test]
async fn test_buy_now_callbacks_create_cart_and_restore_checkout(harness: Fixture) {
	// Arrange
	let options = paylater_options(PayLaterButtonOptions {
		buy_now_initialize_options: Some(buy_now_options()),
		currency_code: Some("USD".to_string()),
		..Default::default()
	});
	harness.strategy.initialize(options).await.unwrap();
	let callbacks = rendered_callbacks(&harness.sdk);

	// Act
	(callbacks.on_click.unwrap())().await.unwrap();
	(callbacks.on_cancel.unwrap())().await.unwrap();

	// Assert
	assert!(harness.paypal.calls().contains(&PayPalCall::CreateBuyNowCart));
	assert_eq!(
		harness.host.calls(),
		vec![
			IntegrationCall::LoadCheckout("buy-now-1".to_string()),
			IntegrationCall::LoadDefaultCheckout,
		]
	);
}

#[rstest]
#[tokio::test]
async fn test_hosted_checkout_approve_submits_the_order(hosted: Fixture) {
	// Arrange
	let (completions, on_complete) = counter();
	let options = paylater_options(PayLaterButtonOptions {
		on_complete: Some(on_complete),
		..Default::default()
	});
	hosted.strategy.initialize(options).await.unwrap();
	let callbacks = rendered_callbacks(&hosted.sdk);

	// Act
	let approved = (callbacks.on_approve.unwrap())(
		ApproveCallbackPayload {
			order_id: Some("ORDER_ID".to_string()),
		},
		approve_actions(),
	)
	.await
	.unwrap();

	// Assert
	assert!(approved);
	assert_eq!(completions.load(Ordering::SeqCst), 1);

	let host_calls = hosted.host.calls();
	let billing = host_calls.iter().find_map(|call| match call {
		IntegrationCall::UpdateBillingAddress(address) => Some(address.clone()),
		_ => None,
	});
	let shipping = host_calls.iter().find_map(|call| match call {
		IntegrationCall::UpdateShippingAddress(address) => Some(address.clone()),
		_ => None,
	});
	assert_eq!(billing.unwrap().email.as_deref(), Some("john@example.com"));
	assert_eq!(shipping.unwrap().first_name, "Jane");
	assert_eq!(
		host_calls.last(),
		Some(&IntegrationCall::SubmitOrder(RequestOptions::with_param(
			"methodId",
			PAY_LATER_METHOD_ID
		)))
	);

	let paypal_calls = hosted.paypal.calls();
	assert!(paypal_calls.contains(&PayPalCall::UpdateOrder));
	assert_eq!(
		paypal_calls.last(),
		Some(&PayPalCall::SubmitPayment {
			method_id: PAY_LATER_METHOD_ID.to_string(),
			order_id: "ORDER_ID".to_string(),
		})
	);
}

#[rstest]
#[tokio::test]
async fn test_hosted_checkout_approve_requires_order_id(hosted: Fixture) {
	// Arrange
	hosted
		.strategy
		.initialize(paylater_options(PayLaterButtonOptions::default()))
		.await
		.unwrap();
	let callbacks = rendered_callbacks(&hosted.sdk);

	// Act
	let result =
		(callbacks.on_approve.unwrap())(ApproveCallbackPayload::default(), approve_actions()).await;

	// Assert
	assert!(matches!(
		result,
		Err(CheckoutError::MissingData(MissingDataKind::MissingOrderId))
	));
}

#[rstest]
#[tokio::test]
async fn test_hosted_shipping_address_change_selects_recommended_option(hosted: Fixture) {
	// Arrange
	hosted.host.set_consignments(vec![consignment()]);
	hosted
		.strategy
		.initialize(paylater_options(PayLaterButtonOptions::default()))
		.await
		.unwrap();
	let callbacks = rendered_callbacks(&hosted.sdk);

	// Act
	(callbacks.on_shipping_address_change.unwrap())(ShippingAddressChangeCallbackPayload {
		order_id: "ORDER_ID".to_string(),
		shipping_address: ShippingChangeAddress {
			city: "Austin".to_string(),
			country_code: "US".to_string(),
			postal_code: "78701".to_string(),
			state: "TX".to_string(),
		},
	})
	.await
	.unwrap();

	// Assert
	let host_calls = hosted.host.calls();
	assert!(host_calls.iter().any(|call| matches!(
		call,
		IntegrationCall::UpdateShippingAddress(address)
			if address.city == "Austin" && address.state_or_province_code == "TX"
	)));
	assert!(host_calls.contains(&IntegrationCall::SelectShippingOption("express".to_string())));
	assert_eq!(hosted.paypal.calls().last(), Some(&PayPalCall::UpdateOrder));
}

#[rstest]
#[tokio::test]
async fn test_banner_is_rendered_with_merchant_styles(harness: Fixture) {
	// Act
	harness.strategy.initialize(default_options()).await.unwrap();

	// Assert
	assert_eq!(harness.messages_loader.loads_for(PAY_LATER_METHOD_ID, "USD"), 1);
	assert_eq!(
		harness.messages_sdk.rendered(),
		vec![format!("#{}", BANNER_CONTAINER_ID)]
	);

	let options = harness.messages_sdk.options();
	assert_eq!(options[0].placement, "cart");
	assert_eq!(options[0].amount, 100.0);
	let logo = options[0].style.logo.clone().unwrap();
	assert_eq!(logo.kind.as_deref(), Some("inline"));
	assert_eq!(options[0].style.text.clone().unwrap().size, Some(12));

	let removed = harness.dom.removed_attributes();
	assert_eq!(removed.len(), 4);
	assert!(removed.iter().all(|(id, _)| id == BANNER_CONTAINER_ID));
}

#[rstest]
#[tokio::test]
async fn test_banner_is_skipped_without_container() {
	// Arrange
	let harness = build(initialization_data(json!({})), MockDomHost::new());

	// Act
	harness.strategy.initialize(default_options()).await.unwrap();

	// Assert
	assert_eq!(harness.messages_loader.load_count(), 0);
	assert!(harness.dom.removed_attributes().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_banner_is_skipped_when_disabled_by_merchant() {
	// Arrange
	let data = initialization_data(json!({
		"paypalBNPLConfiguration": [{ "id": "cart", "status": false }]
	}));
	let harness = build(data, MockDomHost::with_elements([BANNER_CONTAINER_ID]));

	// Act
	harness.strategy.initialize(default_options()).await.unwrap();

	// Assert
	assert_eq!(harness.messages_loader.load_count(), 0);
	assert!(harness.messages_sdk.rendered().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_deinitialize_succeeds(harness: Fixture) {
	assert!(harness.strategy.deinitialize().await.is_ok());
}
