//! Error types shared by checkout strategies.

use thiserror::Error;

use crate::vendor::VendorError;

/// Result type for strategy operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Errors surfaced by checkout strategies to the host framework.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckoutError {
	/// A required option was not provided or is malformed.
	#[error("Unable to proceed because {0}")]
	InvalidArgument(String),

	/// Data the strategy depends on is missing from the checkout state.
	#[error("missing data: {0}")]
	MissingData(MissingDataKind),

	/// A component was used before being initialized.
	#[error("not initialized: {0}")]
	NotInitialized(NotInitializedKind),

	/// The vendor feature is not supported in the current environment.
	#[error("not supported: {0}")]
	NotSupported(String),

	/// The payment method client script could not be loaded.
	#[error("payment method client is unavailable: {0}")]
	ClientUnavailable(String),

	/// Error forwarded from a vendor SDK.
	#[error(transparent)]
	Vendor(#[from] VendorError),

	/// A vendor module could not be provided by the module cache.
	#[error("module unavailable: {0}")]
	ModuleCache(String),

	/// Error forwarded from the host checkout service.
	#[error("checkout service error: {0}")]
	Service(String),
}

impl CheckoutError {
	/// Builds an [`CheckoutError::InvalidArgument`] for a missing option path.
	///
	/// # Examples
	///
	/// ```
	/// use checkout_bridge_core::CheckoutError;
	///
	/// let err = CheckoutError::missing_option("options.methodId");
	/// assert_eq!(
	/// 	err.to_string(),
	/// 	"Unable to proceed because \"options.methodId\" argument is not provided."
	/// );
	/// ```
	pub fn missing_option(path: &str) -> Self {
		Self::InvalidArgument(format!("\"{}\" argument is not provided.", path))
	}
}

/// Kinds of missing checkout data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MissingDataKind {
	MissingCart,
	MissingCheckout,
	MissingCustomer,
	MissingOrderId,
	MissingPaymentMethod,
	MissingPaymentToken,
	MissingShippingOption,
	MissingInitializationData,
	MissingSdk,
}

impl std::fmt::Display for MissingDataKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let text = match self {
			Self::MissingCart => "cart",
			Self::MissingCheckout => "checkout",
			Self::MissingCustomer => "customer",
			Self::MissingOrderId => "order id",
			Self::MissingPaymentMethod => "payment method",
			Self::MissingPaymentToken => "payment token",
			Self::MissingShippingOption => "shipping option",
			Self::MissingInitializationData => "initialization data",
			Self::MissingSdk => "vendor sdk",
		};
		write!(f, "{}", text)
	}
}

/// Components that must be initialized before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NotInitializedKind {
	PaymentNotInitialized,
	CustomerNotInitialized,
	CheckoutButtonNotInitialized,
}

impl std::fmt::Display for NotInitializedKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let text = match self {
			Self::PaymentNotInitialized => "payment strategy",
			Self::CustomerNotInitialized => "customer strategy",
			Self::CheckoutButtonNotInitialized => "checkout button strategy",
		};
		write!(f, "{}", text)
	}
}
