//! Payment methods that support stored instruments.

use serde::Serialize;

/// Provider and method of a vaultable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupportedInstrument {
	pub provider: &'static str,
	pub method: &'static str,
}

const fn instrument(provider: &'static str, method: &'static str) -> SupportedInstrument {
	SupportedInstrument { provider, method }
}

/// Method id to instrument table.
pub static SUPPORTED_INSTRUMENTS: &[(&str, SupportedInstrument)] = &[
	("mollie.credit_card", instrument("mollie", "credit_card")),
	("adyenv2.scheme", instrument("adyenv2", "scheme")),
	("adyenv3.scheme", instrument("adyenv3", "scheme")),
	("adyenv2.bcmc", instrument("adyenv2", "bcmc")),
	("adyenv2.ideal", instrument("adyenv2", "ideal")),
	("adyenv2.sepadirectdebit", instrument("adyenv2", "sepadirectdebit")),
	("adyenv2.directEbanking", instrument("adyenv2", "directEbanking")),
	("adyenv2.giropay", instrument("adyenv2", "giropay")),
	("barclays", instrument("barclays", "credit_card")),
	("braintree", instrument("braintree", "credit_card")),
	("braintreepaypal", instrument("braintree", "paypal")),
	("braintreeach", instrument("braintree", "ach")),
	("authorizenet", instrument("authorizenet", "credit_card")),
	("elavon", instrument("elavon", "credit_card")),
	("checkoutcom", instrument("checkoutcom", "credit_card")),
	("checkoutcom.credit_card", instrument("checkoutcom", "credit_card")),
	("checkoutcom.card", instrument("checkoutcom", "card")),
	("sagepay", instrument("sagepay", "credit_card")),
	("stripe", instrument("stripe", "credit_card")),
	("stripev3.card", instrument("stripev3", "card")),
	("stripeupe.card", instrument("stripeupe", "card")),
	("cybersource", instrument("cybersource", "credit_card")),
	("cybersourcev2", instrument("cybersourcev2", "credit_card")),
	("bnz", instrument("bnz", "credit_card")),
	("converge", instrument("converge", "credit_card")),
	("bluesnapv2", instrument("bluesnapv2", "credit_card")),
	("bluesnapdirect.credit_card", instrument("bluesnapdirect", "credit_card")),
	("bluesnapdirect.ecp", instrument("bluesnapdirect", "ecp")),
	(
		"bluesnapdirect.sepa_direct_debit",
		instrument("bluesnapdirect", "sepa_direct_debit"),
	),
	("orbital", instrument("orbital", "credit_card")),
	("paymetric", instrument("paymetric", "credit_card")),
	("bolt", instrument("bolt", "credit_card")),
	("barclaycard.credit_card", instrument("barclaycard", "credit_card")),
	("moneris", instrument("moneris", "credit_card")),
	("cba_mpgs", instrument("cba_mpgs", "credit_card")),
	("worldpayaccess", instrument("worldpayaccess", "credit_card")),
	("squarev2", instrument("squarev2", "credit_card")),
	("paypalcommercecreditcards", instrument("paypalcommerce", "credit_card")),
	("paypalcommerce", instrument("paypalcommerce", "paypal")),
	(
		"bigcommerce_payments_creditcards",
		instrument("bigcommerce_payments", "credit_card"),
	),
	("bigcommerce_payments", instrument("bigcommerce_payments", "paypal")),
	("tdonlinemart", instrument("tdonlinemart", "credit_card")),
];

/// Looks up the instrument for a method id.
///
/// Method ids of multi-option gateways use the `gateway.method` form.
pub fn supported_instrument(method_id: &str) -> Option<SupportedInstrument> {
	SUPPORTED_INSTRUMENTS
		.iter()
		.find(|(id, _)| *id == method_id)
		.map(|(_, instrument)| *instrument)
}

/// Returns true when instruments of `method_id` can be vaulted.
pub fn is_instrument_supported(method_id: &str) -> bool {
	supported_instrument(method_id).is_some()
}
