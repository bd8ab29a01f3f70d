//! Button and messaging style normalization.

use crate::types::{
	PayPalBnplConfigurationItem, PayPalButtonStyleOptions, PayPalMessagesLogo,
	PayPalMessagesStyleOptions, PayPalMessagesText,
};

pub const DEFAULT_BUTTON_HEIGHT: u32 = 40;
pub const MIN_BUTTON_HEIGHT: u32 = 25;
pub const MAX_BUTTON_HEIGHT: u32 = 55;

/// Returns a style PayPal accepts.
///
/// The height defaults to 40 and is clamped to `25..=55`; every other field is
/// passed through.
///
/// # Examples
///
/// ```
/// use checkout_bridge_paypal::style::valid_button_style;
/// use checkout_bridge_paypal::types::PayPalButtonStyleOptions;
///
/// let style = valid_button_style(Some(&PayPalButtonStyleOptions {
/// 	height: Some(100),
/// 	..Default::default()
/// }));
/// assert_eq!(style.height, Some(55));
/// ```
pub fn valid_button_style(style: Option<&PayPalButtonStyleOptions>) -> PayPalButtonStyleOptions {
	let style = style.cloned().unwrap_or_default();
	let height = style
		.height
		.unwrap_or(DEFAULT_BUTTON_HEIGHT)
		.clamp(MIN_BUTTON_HEIGHT, MAX_BUTTON_HEIGHT);

	PayPalButtonStyleOptions {
		height: Some(height),
		..style
	}
}

/// Maps the merchant's banner settings onto the messages SDK style.
pub fn messages_style_from_bnpl_config(
	config: &PayPalBnplConfigurationItem,
) -> PayPalMessagesStyleOptions {
	let styles = &config.styles;
	let get = |key: &str| styles.get(key).filter(|value| !value.is_empty()).cloned();

	let logo_type = get("logo-type");
	let logo_position = get("logo-position");
	let text_color = get("text-color");
	let text_size = get("text-size").and_then(|size| size.parse::<u32>().ok());

	PayPalMessagesStyleOptions {
		color: get("color"),
		layout: get("layout"),
		logo: (logo_type.is_some() || logo_position.is_some()).then(|| PayPalMessagesLogo {
			kind: logo_type,
			position: logo_position,
		}),
		ratio: get("ratio"),
		text: (text_color.is_some() || text_size.is_some()).then(|| PayPalMessagesText {
			color: text_color,
			size: text_size,
		}),
	}
}
