//! BigCommerce Payments PayPal SDK loader.
//!
//! Builds the SDK script URL from a payment method's initialization data,
//! loads it once and keeps the resulting handle for later callers.

use std::collections::BTreeMap;
use std::sync::Arc;

use checkout_bridge_conf::PayPalSettings;
use checkout_bridge_core::{
	CheckoutError, CheckoutResult, MissingDataKind, PaymentMethod, ScriptLoader, ScriptOptions,
};
use parking_lot::RwLock;
use url::Url;

use crate::sdk::PayPalSdk;
use crate::types::{CREDIT_CARDS_METHOD_ID, PayPalInitializationData};

const BASE_COMPONENTS: [&str; 4] = ["buttons", "hosted-fields", "payment-fields", "legal"];

/// Script URL and tag options for one SDK load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkScript {
	pub url: Url,
	pub options: ScriptOptions,
}

/// Reads the typed initialization data of a payment method.
pub fn initialization_data(method: &PaymentMethod) -> CheckoutResult<PayPalInitializationData> {
	let raw = method
		.initialization_data
		.clone()
		.ok_or(CheckoutError::MissingData(MissingDataKind::MissingInitializationData))?;
	serde_json::from_value(raw).map_err(|err| {
		tracing::debug!(method_id = %method.id, error = %err, "unreadable initialization data");
		CheckoutError::MissingData(MissingDataKind::MissingInitializationData)
	})
}

/// Builds the SDK script for `method`.
///
/// # Errors
///
/// `MissingData(MissingInitializationData)` when the method has no
/// initialization data or no client id.
pub fn build_sdk_script(
	settings: &PayPalSettings,
	method: &PaymentMethod,
	currency_code: &str,
	initializes_on_checkout_page: bool,
) -> CheckoutResult<SdkScript> {
	let data = initialization_data(method)?;
	let client_id = data
		.client_id
		.as_deref()
		.filter(|id| !id.is_empty())
		.ok_or(CheckoutError::MissingData(MissingDataKind::MissingInitializationData))?;

	let enable_card = method.id == CREDIT_CARDS_METHOD_ID;
	let enable_credit = data.is_paypal_credit_available;
	let enable_venmo = data.is_venmo_enabled;

	let mut enable_funding: Vec<&str> = Vec::new();
	let mut disable_funding: Vec<&str> = Vec::new();

	if enable_card {
		enable_funding.push("card");
	} else {
		disable_funding.push("card");
	}
	if enable_credit {
		enable_funding.extend(["credit", "paylater"]);
	} else {
		disable_funding.extend(["credit", "paylater"]);
	}
	if enable_venmo {
		enable_funding.push("venmo");
	} else {
		disable_funding.push("venmo");
	}

	let available = &data.available_alternative_payment_methods;
	let enabled = &data.enabled_alternative_payment_methods;
	if data.is_hosted_checkout_enabled {
		disable_funding.extend(available.iter().map(String::as_str));
	} else {
		enable_funding.extend(enabled.iter().map(String::as_str));
		disable_funding.extend(
			available
				.iter()
				.filter(|apm| !enabled.contains(apm))
				.map(String::as_str),
		);
	}

	// Hosted checkout finishes the order inside the PayPal popup.
	let commit = data.is_hosted_checkout_enabled || initializes_on_checkout_page;
	let mut components: Vec<&str> = BASE_COMPONENTS.to_vec();
	if initializes_on_checkout_page {
		components.push("card-fields");
	}

	let mut url = Url::parse(&settings.sdk_url).map_err(|err| {
		CheckoutError::ClientUnavailable(format!("invalid PayPal SDK url: {}", err))
	})?;
	{
		let mut query = url.query_pairs_mut();
		query.append_pair("client-id", client_id);
		if let Some(merchant_id) = non_empty(&data.merchant_id) {
			query.append_pair("merchant-id", merchant_id);
		}
		if !enable_funding.is_empty() {
			query.append_pair("enable-funding", &enable_funding.join(","));
		}
		if !disable_funding.is_empty() {
			query.append_pair("disable-funding", &disable_funding.join(","));
		}
		query.append_pair("commit", if commit { "true" } else { "false" });
		query.append_pair("components", &components.join(","));
		query.append_pair("currency", currency_code);
		if let Some(intent) = non_empty(&data.intent) {
			query.append_pair("intent", intent);
		}
		if data.is_developer_mode_applicable
			&& let Some(buyer_country) = non_empty(&data.buyer_country)
		{
			query.append_pair("buyer-country", buyer_country);
		}
	}

	let mut attributes = BTreeMap::new();
	if let Some(client_token) = non_empty(&method.client_token) {
		attributes.insert("data-client-token".to_string(), client_token.to_string());
	}
	if let Some(attribution_id) = non_empty(&data.attribution_id) {
		attributes.insert(
			"data-partner-attribution-id".to_string(),
			attribution_id.to_string(),
		);
	}

	Ok(SdkScript {
		url,
		options: ScriptOptions {
			is_async: true,
			attributes,
		},
	})
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|value| !value.is_empty())
}

/// Loads the PayPal SDK and keeps the loaded handle.
pub struct PayPalScriptLoader {
	script_loader: Arc<dyn ScriptLoader<dyn PayPalSdk>>,
	settings: PayPalSettings,
	sdk: RwLock<Option<Arc<dyn PayPalSdk>>>,
}

impl PayPalScriptLoader {
	pub fn new(script_loader: Arc<dyn ScriptLoader<dyn PayPalSdk>>) -> Self {
		Self::with_settings(script_loader, PayPalSettings::default())
	}

	pub fn with_settings(
		script_loader: Arc<dyn ScriptLoader<dyn PayPalSdk>>,
		settings: PayPalSettings,
	) -> Self {
		Self {
			script_loader,
			settings,
			sdk: RwLock::new(None),
		}
	}

	/// Returns the PayPal SDK for `method`, loading it on first use.
	///
	/// A previously loaded SDK is returned as is unless `force_load` is set.
	///
	/// # Errors
	///
	/// - `MissingData(MissingInitializationData)` for incomplete method data
	/// - `ClientUnavailable` when the script fails to load
	pub async fn get_paypal_sdk(
		&self,
		method: &PaymentMethod,
		currency_code: &str,
		initializes_on_checkout_page: bool,
		force_load: bool,
	) -> CheckoutResult<Arc<dyn PayPalSdk>> {
		if !force_load && let Some(sdk) = self.sdk.read().clone() {
			tracing::trace!(method_id = %method.id, "reusing loaded PayPal SDK");
			return Ok(sdk);
		}

		let script = build_sdk_script(
			&self.settings,
			method,
			currency_code,
			initializes_on_checkout_page,
		)?;
		tracing::debug!(method_id = %method.id, url = %script.url, "loading PayPal SDK");

		let sdk = self
			.script_loader
			.load_script(script.url.as_str(), &script.options)
			.await
			.map_err(|err| match err {
				CheckoutError::ClientUnavailable(_) => err,
				other => CheckoutError::ClientUnavailable(other.to_string()),
			})?;

		*self.sdk.write() = Some(sdk.clone());
		Ok(sdk)
	}

	/// The loaded SDK, if any.
	pub fn sdk(&self) -> Option<Arc<dyn PayPalSdk>> {
		self.sdk.read().clone()
	}

	pub fn sdk_or_throw(&self) -> CheckoutResult<Arc<dyn PayPalSdk>> {
		self.sdk()
			.ok_or(CheckoutError::MissingData(MissingDataKind::MissingSdk))
	}

	/// Forgets the loaded SDK.
	pub fn reset(&self) {
		*self.sdk.write() = None;
	}
}
