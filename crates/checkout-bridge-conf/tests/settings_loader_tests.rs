//! Layering of defaults, settings files and environment overrides.

use checkout_bridge_conf::settings::{LogFormat, PaymentMethodUsage};
use checkout_bridge_conf::{BridgeSettings, SettingsError, SettingsLoader};
use rstest::rstest;
use serial_test::serial;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

fn write_settings(dir: &TempDir, content: &str) -> std::path::PathBuf {
	let path = dir.path().join("checkout.toml");
	let mut file = File::create(&path).unwrap();
	writeln!(file, "{}", content).unwrap();
	path
}

#[rstest]
fn test_missing_file_yields_defaults() {
	// Arrange
	let dir = TempDir::new().unwrap();

	// Act
	let settings = SettingsLoader::new()
		.without_env()
		.with_file(dir.path().join("absent.toml"))
		.load()
		.unwrap();

	// Assert
	assert_eq!(settings, BridgeSettings::default());
}

#[rstest]
fn test_file_overrides_defaults() {
	// Arrange
	let dir = TempDir::new().unwrap();
	let path = write_settings(
		&dir,
		r#"
[braintree]
three_d_secure_version = 1

[braintree.venmo]
payment_method_usage = "single_use"

[logging]
format = "compact"
"#,
	);

	// Act
	let settings = SettingsLoader::new()
		.without_env()
		.with_file(path)
		.load()
		.unwrap();

	// Assert
	assert_eq!(settings.braintree.three_d_secure_version, 1);
	assert!(settings.braintree.kount);
	assert!(settings.braintree.venmo.allow_desktop);
	assert_eq!(
		settings.braintree.venmo.payment_method_usage,
		PaymentMethodUsage::SingleUse
	);
	assert_eq!(settings.logging.format, LogFormat::Compact);
	assert_eq!(settings.paypal.sdk_url, "https://www.paypal.com/sdk/js");
}

#[rstest]
fn test_malformed_file_is_an_error() {
	// Arrange
	let dir = TempDir::new().unwrap();
	let path = write_settings(&dir, "[braintree\nkount = ");

	// Act
	let result = SettingsLoader::new().without_env().with_file(path).load();

	// Assert
	assert!(matches!(result, Err(SettingsError::Toml(_))));
}

#[rstest]
#[serial(checkout_bridge_env)]
fn test_env_overrides_file() {
	// Arrange
	let dir = TempDir::new().unwrap();
	let path = write_settings(
		&dir,
		r#"
[paypal]
sdk_url = "https://file.example/sdk/js"

[braintree]
kount = true
"#,
	);
	// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		std::env::set_var(
			"CHECKOUT_BRIDGE__PAYPAL__SDK_URL",
			"https://www.sandbox.paypal.com/sdk/js",
		);
		std::env::set_var("CHECKOUT_BRIDGE__BRAINTREE__KOUNT", "false");
	}

	// Act
	let settings = SettingsLoader::new().with_file(path).load();

	// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		std::env::remove_var("CHECKOUT_BRIDGE__PAYPAL__SDK_URL");
		std::env::remove_var("CHECKOUT_BRIDGE__BRAINTREE__KOUNT");
	}

	// Assert
	let settings = settings.unwrap();
	assert_eq!(settings.paypal.sdk_url, "https://www.sandbox.paypal.com/sdk/js");
	assert!(!settings.braintree.kount);
}
