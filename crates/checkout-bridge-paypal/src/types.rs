//! BigCommerce Payments data types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Method id of the card payment method; the only one loading card funding.
pub const CREDIT_CARDS_METHOD_ID: &str = "bigcommerce_payments_creditcards";

/// Method id of the Pay Later payment method.
pub const PAY_LATER_METHOD_ID: &str = "bigcommerce_payments_paylater";

/// Initialization data delivered with a BigCommerce Payments method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayPalInitializationData {
	pub client_id: Option<String>,
	pub merchant_id: Option<String>,
	pub attribution_id: Option<String>,
	pub intent: Option<String>,
	pub buyer_country: Option<String>,
	pub is_developer_mode_applicable: bool,
	pub is_hosted_checkout_enabled: bool,
	#[serde(rename = "isPayPalCreditAvailable")]
	pub is_paypal_credit_available: bool,
	pub is_venmo_enabled: bool,
	pub available_alternative_payment_methods: Vec<String>,
	pub enabled_alternative_payment_methods: Vec<String>,
	#[serde(rename = "paypalBNPLConfiguration")]
	pub paypal_bnpl_configuration: Vec<PayPalBnplConfigurationItem>,
}

/// Merchant configuration of one Pay Later messaging placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPalBnplConfigurationItem {
	/// Placement id (`cart`, `checkout`, `product`, ...)
	pub id: String,
	pub name: String,
	pub status: bool,
	/// Raw style settings (`logo-type`, `text-size`, ...)
	pub styles: BTreeMap<String, String>,
}

/// Button style as requested by the storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPalButtonStyleOptions {
	pub color: Option<String>,
	pub label: Option<String>,
	pub layout: Option<String>,
	pub shape: Option<String>,
	pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPalMessagesLogo {
	#[serde(rename = "type")]
	pub kind: Option<String>,
	pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPalMessagesText {
	pub color: Option<String>,
	pub size: Option<u32>,
}

/// Style of the Pay Later messaging banner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPalMessagesStyleOptions {
	pub color: Option<String>,
	pub layout: Option<String>,
	pub logo: Option<PayPalMessagesLogo>,
	pub ratio: Option<String>,
	pub text: Option<PayPalMessagesText>,
}

/// Payload handed to the approve callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveCallbackPayload {
	#[serde(rename = "orderID")]
	pub order_id: Option<String>,
}

/// Address as reported by PayPal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPalAddress {
	pub address_line_1: Option<String>,
	pub address_line_2: Option<String>,
	/// State or province
	pub admin_area_1: Option<String>,
	/// City
	pub admin_area_2: Option<String>,
	pub postal_code: Option<String>,
	pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayerName {
	pub given_name: String,
	pub surname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payer {
	pub name: PayerName,
	pub email_address: Option<String>,
	pub phone: Option<String>,
	pub address: PayPalAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingName {
	pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseUnitShipping {
	pub name: ShippingName,
	pub address: PayPalAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseUnit {
	pub shipping: Option<PurchaseUnitShipping>,
}

/// Order details fetched from PayPal after approval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDetails {
	pub payer: Payer,
	pub purchase_units: Vec<PurchaseUnit>,
}

/// Shipping address PayPal reports while the buyer edits it in the popup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingChangeAddress {
	pub city: String,
	pub country_code: String,
	pub postal_code: String,
	pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressChangeCallbackPayload {
	pub order_id: String,
	pub shipping_address: ShippingChangeAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedShippingOption {
	pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOptionChangeCallbackPayload {
	pub order_id: String,
	pub selected_shipping_option: SelectedShippingOption,
}

/// Partial address used while the buyer is still in the PayPal popup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialAddress {
	pub city: String,
	pub country_code: String,
	pub postal_code: String,
	pub state_or_province_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyNowCartLineItem {
	pub product_id: u64,
	pub quantity: u32,
	#[serde(default)]
	pub option_selections: Vec<BuyNowOptionSelection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyNowOptionSelection {
	pub option_id: u64,
	pub option_value: String,
}

/// Body of the request creating a buy now cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyNowCartRequestBody {
	pub line_items: Vec<BuyNowCartLineItem>,
	pub source: String,
}
