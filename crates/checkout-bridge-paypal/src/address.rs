//! Conversions from PayPal order data to checkout addresses.

use checkout_bridge_core::Address;

use crate::types::{OrderDetails, PartialAddress, PayPalAddress};

/// Billing address built from the PayPal payer.
pub fn billing_address_from_order_details(details: &OrderDetails) -> Address {
	let payer = &details.payer;
	let mut address = from_paypal_address(&payer.address);
	address.first_name = payer.name.given_name.clone();
	address.last_name = payer.name.surname.clone();
	address.email = payer.email_address.clone();
	address.phone = payer.phone.clone().unwrap_or_default();
	address
}

/// Shipping address built from the first purchase unit.
///
/// The recipient's full name is split on the first space.
pub fn shipping_address_from_order_details(details: &OrderDetails) -> Address {
	let Some(shipping) = details
		.purchase_units
		.first()
		.and_then(|unit| unit.shipping.as_ref())
	else {
		return Address::default();
	};

	let mut address = from_paypal_address(&shipping.address);
	let (first_name, last_name) = match shipping.name.full_name.trim().split_once(' ') {
		Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
		None => (shipping.name.full_name.trim().to_string(), String::new()),
	};
	address.first_name = first_name;
	address.last_name = last_name;
	address
}

/// Complete address from the fields PayPal shares during shipping changes.
pub fn address_from_partial(partial: PartialAddress) -> Address {
	Address {
		city: partial.city,
		country_code: partial.country_code,
		postal_code: partial.postal_code,
		state_or_province_code: partial.state_or_province_code,
		..Address::default()
	}
}

fn from_paypal_address(address: &PayPalAddress) -> Address {
	let field = |value: &Option<String>| value.clone().unwrap_or_default();
	Address {
		address1: field(&address.address_line_1),
		address2: field(&address.address_line_2),
		city: field(&address.admin_area_2),
		country_code: field(&address.country_code),
		postal_code: field(&address.postal_code),
		state_or_province_code: field(&address.admin_area_1),
		..Address::default()
	}
}
