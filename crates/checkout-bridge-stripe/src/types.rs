//! Stripe data types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Beta features requested when creating the Stripe client.
pub const STRIPE_CLIENT_BETAS: [&str; 5] = [
	"payment_intent_beta_3",
	"alipay_pm_beta_1",
	"link_default_integration_beta_1",
	"shipping_address_element_beta_1",
	"address_element_beta_1",
];

pub const STRIPE_CLIENT_API_VERSION: &str = "2020-03-02;alipay_beta=v1;link_beta=v1";

/// Initialization data of a Stripe payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeInitializationData {
	pub stripe_publishable_key: String,
	#[serde(default)]
	pub stripe_connected_account: Option<String>,
}

/// Checkout form styles supplied by the storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripeFormStyles {
	pub field_background: Option<String>,
	pub field_border: Option<String>,
	pub field_error_text: Option<String>,
	pub field_inner_shadow: Option<String>,
	pub field_placeholder_text: Option<String>,
	pub field_text: Option<String>,
	pub label_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeAppearanceVariables {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color_primary: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color_background: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color_text: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color_danger: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color_text_secondary: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color_text_placeholder: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeAppearanceRule {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub border_color: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub box_shadow: Option<String>,
}

/// Stripe Elements appearance. An empty value keeps Stripe's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeAppearanceOptions {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub variables: Option<StripeAppearanceVariables>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rules: Option<BTreeMap<String, StripeAppearanceRule>>,
}

impl From<&StripeFormStyles> for StripeAppearanceOptions {
	fn from(styles: &StripeFormStyles) -> Self {
		let rule = StripeAppearanceRule {
			border_color: styles.field_border.clone(),
			color: styles.field_text.clone(),
			box_shadow: styles.field_inner_shadow.clone(),
		};

		Self {
			variables: Some(StripeAppearanceVariables {
				color_primary: styles.field_inner_shadow.clone(),
				color_background: styles.field_background.clone(),
				color_text: styles.label_text.clone(),
				color_danger: styles.field_error_text.clone(),
				color_text_secondary: styles.label_text.clone(),
				color_text_placeholder: styles.field_placeholder_text.clone(),
			}),
			rules: Some(BTreeMap::from([(".Input".to_string(), rule)])),
		}
	}
}

/// Options of a Stripe Elements group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeElementsOptions {
	pub client_secret: String,
	pub appearance: StripeAppearanceOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StripeElementType {
	/// Link authentication (email) element
	LinkAuthentication,
	Payment,
	Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripeFormMode {
	Shipping,
	Billing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeDefaultValues {
	pub mode: StripeFormMode,
	pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeElementOptions {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_values: Option<StripeDefaultValues>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripeElementEvent {
	Change,
	Ready,
	Focus,
	Blur,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeEventValue {
	#[serde(default)]
	pub email: String,
}

/// Change event of the link authentication element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeEvent {
	pub complete: bool,
	/// Absent when the event did not come from a link authentication element
	pub authenticated: Option<bool>,
	#[serde(default)]
	pub value: StripeEventValue,
}
