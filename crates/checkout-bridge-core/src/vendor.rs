//! Errors reported by third-party payment SDKs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An error raised by a vendor SDK.
///
/// Vendor SDKs reject with loosely structured objects; the only field the
/// integrations inspect is the machine-readable `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorError {
	/// Vendor error code (e.g. `DATA_COLLECTOR_KOUNT_NOT_ENABLED`)
	pub code: Option<String>,
	/// Human readable message
	pub message: String,
}

impl VendorError {
	/// Creates an error carrying only a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			code: None,
			message: message.into(),
		}
	}

	/// Creates an error carrying a vendor code.
	///
	/// # Examples
	///
	/// ```
	/// use checkout_bridge_core::VendorError;
	///
	/// let err = VendorError::with_code("OTHER_RANDOM_ERROR", "boom");
	/// assert!(err.has_code("OTHER_RANDOM_ERROR"));
	/// ```
	pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code: Some(code.into()),
			message: message.into(),
		}
	}

	/// Returns true when the error carries exactly `code`.
	pub fn has_code(&self, code: &str) -> bool {
		self.code.as_deref() == Some(code)
	}
}

impl fmt::Display for VendorError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.code {
			Some(code) if self.message.is_empty() => write!(f, "{}", code),
			Some(code) => write!(f, "{}: {}", code, self.message),
			None => write!(f, "{}", self.message),
		}
	}
}

impl std::error::Error for VendorError {}
