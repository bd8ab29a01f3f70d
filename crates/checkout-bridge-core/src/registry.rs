//! Strategy registry
//!
//! Integrations register a factory under every method id they serve; the host
//! resolves a strategy by the id of the payment method being rendered.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

/// Factory building a strategy from the host service.
pub type StrategyFactory<H, S> = Arc<dyn Fn(Arc<H>) -> Arc<S> + Send + Sync>;

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
	#[error("strategy already registered for method id: {0}")]
	AlreadyRegistered(String),

	#[error("no strategy registered for method id: {0}")]
	NotFound(String),
}

/// Registry of strategy factories keyed by method id.
pub struct StrategyRegistry<H: ?Sized, S: ?Sized> {
	factories: RwLock<HashMap<String, StrategyFactory<H, S>>>,
}

impl<H: ?Sized, S: ?Sized> StrategyRegistry<H, S> {
	pub fn new() -> Self {
		Self {
			factories: RwLock::new(HashMap::new()),
		}
	}

	/// Registers `factory` under every id in `method_ids`.
	///
	/// Nothing is registered when any of the ids is already taken.
	///
	/// # Examples
	///
	/// ```
	/// use checkout_bridge_core::StrategyRegistry;
	/// use std::sync::Arc;
	///
	/// let registry: StrategyRegistry<str, String> = StrategyRegistry::new();
	/// registry
	/// 	.register(&["googlepaystripe", "googlepaystripeupe"], Arc::new(|host: Arc<str>| {
	/// 		Arc::new(format!("strategy for {}", host))
	/// 	}))
	/// 	.unwrap();
	///
	/// assert!(registry.contains("googlepaystripeupe"));
	/// ```
	pub fn register(
		&self,
		method_ids: &[&str],
		factory: StrategyFactory<H, S>,
	) -> Result<(), RegistryError> {
		let mut factories = self.factories.write();
		if let Some(taken) = method_ids.iter().find(|id| factories.contains_key(**id)) {
			return Err(RegistryError::AlreadyRegistered((*taken).to_string()));
		}
		for id in method_ids {
			factories.insert((*id).to_string(), factory.clone());
		}
		tracing::debug!(ids = ?method_ids, "registered checkout strategy");
		Ok(())
	}

	/// Builds the strategy registered for `method_id`.
	pub fn resolve(&self, method_id: &str, host: Arc<H>) -> Result<Arc<S>, RegistryError> {
		let factory = self
			.factories
			.read()
			.get(method_id)
			.cloned()
			.ok_or_else(|| RegistryError::NotFound(method_id.to_string()))?;
		Ok(factory(host))
	}

	pub fn contains(&self, method_id: &str) -> bool {
		self.factories.read().contains_key(method_id)
	}

	/// Registered method ids, sorted.
	pub fn method_ids(&self) -> Vec<String> {
		let mut ids: Vec<_> = self.factories.read().keys().cloned().collect();
		ids.sort();
		ids
	}
}

impl<H: ?Sized, S: ?Sized> Default for StrategyRegistry<H, S> {
	fn default() -> Self {
		Self::new()
	}
}
