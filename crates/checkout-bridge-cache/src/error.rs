//! Module cache errors.

use checkout_bridge_core::{CheckoutError, VendorError};
use thiserror::Error;

use crate::module::SlotKey;

/// Result type for module cache operations.
pub type ModuleResult<T> = Result<T, ModuleError>;

/// Errors raised while creating or tearing down cached modules.
///
/// Every waiter of a failed slot receives its own copy of the error, hence
/// `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModuleError {
	/// A module was requested before an authorization token was stored.
	#[error("module cache is not initialized; an authorization token is required")]
	Uninitialized,

	/// The vendor factory rejected.
	#[error("failed to create module '{key}': {source}")]
	VendorCreationFailed {
		key: SlotKey,
		#[source]
		source: VendorError,
	},

	/// The module is not supported in the current environment.
	#[error("module '{key}' is not supported: {reason}")]
	NotSupported { key: SlotKey, reason: String },

	/// A slot was requested with a type other than the one it was created with.
	#[error("module '{key}' was created with a different type")]
	TypeMismatch { key: SlotKey },

	/// One or more resolved modules failed to tear down.
	#[error("{} module(s) failed to tear down", .failures.len())]
	Teardown { failures: Vec<TeardownFailure> },
}

impl ModuleError {
	/// Vendor error behind a [`ModuleError::VendorCreationFailed`].
	pub fn vendor_error(&self) -> Option<&VendorError> {
		match self {
			Self::VendorCreationFailed { source, .. } => Some(source),
			_ => None,
		}
	}
}

impl From<ModuleError> for CheckoutError {
	fn from(err: ModuleError) -> Self {
		match err {
			ModuleError::VendorCreationFailed { source, .. } => CheckoutError::Vendor(source),
			ModuleError::NotSupported { reason, .. } => CheckoutError::NotSupported(reason),
			other => CheckoutError::ModuleCache(other.to_string()),
		}
	}
}

/// Teardown failure of a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownFailure {
	pub key: SlotKey,
	pub source: VendorError,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_vendor_creation_failed_display() {
		let err = ModuleError::VendorCreationFailed {
			key: SlotKey::new("3ds"),
			source: VendorError::with_code("THREEDS_NOT_ENABLED", "3DS is disabled"),
		};
		assert_eq!(
			err.to_string(),
			"failed to create module '3ds': THREEDS_NOT_ENABLED: 3DS is disabled"
		);
		assert!(err.vendor_error().unwrap().has_code("THREEDS_NOT_ENABLED"));
	}

	#[rstest]
	fn test_teardown_display_counts_failures() {
		let failure = TeardownFailure {
			key: SlotKey::new("client"),
			source: VendorError::new("gone"),
		};
		let err = ModuleError::Teardown {
			failures: vec![failure.clone(), failure],
		};
		assert_eq!(err.to_string(), "2 module(s) failed to tear down");
		assert!(err.vendor_error().is_none());
	}

	#[rstest]
	fn test_vendor_failure_converts_to_checkout_vendor_error() {
		// Arrange
		let err = ModuleError::VendorCreationFailed {
			key: SlotKey::new("client"),
			source: VendorError::with_code("CLIENT_AUTHORIZATION_INVALID", ""),
		};

		// Act
		let converted = CheckoutError::from(err);

		// Assert
		match converted {
			CheckoutError::Vendor(source) => {
				assert!(source.has_code("CLIENT_AUTHORIZATION_INVALID"))
			}
			other => panic!("unexpected conversion: {:?}", other),
		}
		assert!(matches!(
			CheckoutError::from(ModuleError::Uninitialized),
			CheckoutError::ModuleCache(_)
		));
	}
}
