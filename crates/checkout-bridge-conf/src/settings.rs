//! Settings structures for the checkout integrations.
//!
//! Every field has a default, so a partial settings file (or none at all)
//! always yields a complete [`BridgeSettings`].

use serde::{Deserialize, Serialize};

/// Root settings object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
	pub braintree: BraintreeSettings,
	pub paypal: PayPalSettings,
	pub logging: LoggingSettings,
}

/// Creation parameters for Braintree modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BraintreeSettings {
	/// 3D Secure protocol version requested from the vendor
	pub three_d_secure_version: u8,
	/// Enables Kount fraud data on data collectors
	pub kount: bool,
	pub venmo: VenmoDefaults,
}

impl Default for BraintreeSettings {
	fn default() -> Self {
		Self {
			three_d_secure_version: 2,
			kount: true,
			venmo: VenmoDefaults::default(),
		}
	}
}

/// Venmo creation defaults, overridable per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenmoDefaults {
	pub allow_desktop: bool,
	pub payment_method_usage: PaymentMethodUsage,
}

impl Default for VenmoDefaults {
	fn default() -> Self {
		Self {
			allow_desktop: true,
			payment_method_usage: PaymentMethodUsage::MultiUse,
		}
	}
}

/// Whether a tokenized Venmo account may be vaulted for later charges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodUsage {
	#[default]
	MultiUse,
	SingleUse,
}

impl PaymentMethodUsage {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::MultiUse => "multi_use",
			Self::SingleUse => "single_use",
		}
	}
}

/// PayPal SDK loading settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPalSettings {
	/// Base URL of the PayPal JS SDK
	pub sdk_url: String,
}

impl Default for PayPalSettings {
	fn default() -> Self {
		Self {
			sdk_url: "https://www.paypal.com/sdk/js".to_string(),
		}
	}
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Compact,
	Json,
}

/// Logging settings consumed by [`crate::init_tracing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// `EnvFilter` directive used when `RUST_LOG` is unset
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		// Act
		let settings = BridgeSettings::default();

		// Assert
		assert_eq!(settings.braintree.three_d_secure_version, 2);
		assert!(settings.braintree.kount);
		assert!(settings.braintree.venmo.allow_desktop);
		assert_eq!(
			settings.braintree.venmo.payment_method_usage,
			PaymentMethodUsage::MultiUse
		);
		assert_eq!(settings.paypal.sdk_url, "https://www.paypal.com/sdk/js");
		assert_eq!(settings.logging.level, "info");
	}

	#[rstest]
	fn test_partial_document_keeps_remaining_defaults() {
		// Arrange
		let json = serde_json::json!({
			"braintree": { "kount": false },
			"logging": { "format": "json" }
		});

		// Act
		let settings: BridgeSettings = serde_json::from_value(json).unwrap();

		// Assert
		assert!(!settings.braintree.kount);
		assert_eq!(settings.braintree.three_d_secure_version, 2);
		assert_eq!(settings.logging.format, LogFormat::Json);
		assert_eq!(settings.logging.level, "info");
	}

	#[rstest]
	#[case(PaymentMethodUsage::MultiUse, "multi_use")]
	#[case(PaymentMethodUsage::SingleUse, "single_use")]
	fn test_payment_method_usage_names(#[case] usage: PaymentMethodUsage, #[case] expected: &str) {
		assert_eq!(usage.as_str(), expected);
		assert_eq!(serde_json::to_value(usage).unwrap(), expected);
	}
}
