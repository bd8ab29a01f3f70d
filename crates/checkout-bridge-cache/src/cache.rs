//! The module cache.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared, join_all};
use parking_lot::{Mutex, RwLock};

use crate::error::{ModuleError, ModuleResult, TeardownFailure};
use crate::module::{SlotKey, Teardown};

/// A created module, type-erased for storage.
///
/// `value` and `teardown` point at the same allocation.
#[derive(Clone)]
struct ResolvedModule {
	value: Arc<dyn Any + Send + Sync>,
	teardown: Arc<dyn Teardown>,
}

type SlotFuture = Shared<BoxFuture<'static, ModuleResult<ResolvedModule>>>;

enum SlotState {
	/// Creation in flight. `generation` tells a stale completion apart from the
	/// current occupant after a teardown or a failed attempt.
	Pending { generation: u64, future: SlotFuture },
	Resolved(ResolvedModule),
}

/// Lazily creates and memoizes vendor modules.
///
/// One cache belongs to one checkout strategy instance: it is created on
/// `initialize`, holds the authorization token of that strategy and is swept
/// with [`ModuleCache::teardown`] on `deinitialize`.
pub struct ModuleCache {
	authorization: RwLock<Option<String>>,
	slots: Mutex<HashMap<SlotKey, SlotState>>,
	next_generation: AtomicU64,
}

impl ModuleCache {
	/// Creates an empty, uninitialized cache.
	pub fn new() -> Self {
		Self {
			authorization: RwLock::new(None),
			slots: Mutex::new(HashMap::new()),
			next_generation: AtomicU64::new(0),
		}
	}

	/// Stores the authorization token used by factories.
	///
	/// No module is created here; the token is consumed by the first accessor
	/// that needs it.
	pub fn initialize(&self, authorization: impl Into<String>) {
		*self.authorization.write() = Some(authorization.into());
	}

	pub fn is_initialized(&self) -> bool {
		self.authorization.read().is_some()
	}

	/// The stored authorization token.
	pub fn authorization(&self) -> ModuleResult<String> {
		self.authorization
			.read()
			.clone()
			.ok_or(ModuleError::Uninitialized)
	}

	/// Returns the module stored under `key`, creating it with `factory` when
	/// the slot is empty.
	///
	/// The factory receives the authorization token and is only invoked for an
	/// empty slot. Its future is recorded before anything is awaited, so callers
	/// arriving while creation is in flight wait on the same result instead of
	/// starting another creation. A failed creation is reported to every waiter
	/// and leaves the slot empty.
	///
	/// The factory runs under the slot table lock and must only build its
	/// future; all work belongs inside that future.
	///
	/// # Errors
	///
	/// - [`ModuleError::Uninitialized`] when no token has been stored
	/// - whatever the factory rejects with
	/// - [`ModuleError::TypeMismatch`] when `key` holds a module of another type
	pub async fn get_or_create<T, F, Fut>(&self, key: SlotKey, factory: F) -> ModuleResult<T>
	where
		T: Teardown + Clone + 'static,
		F: FnOnce(String) -> Fut,
		Fut: Future<Output = ModuleResult<T>> + Send + 'static,
	{
		let authorization = self.authorization()?;

		let (generation, future) = {
			let mut slots = self.slots.lock();
			match slots.get(&key) {
				Some(SlotState::Resolved(module)) => {
					tracing::trace!(slot = %key, "reusing resolved module");
					return downcast(&key, module);
				}
				Some(SlotState::Pending { generation, future }) => {
					tracing::trace!(slot = %key, "joining in-flight module creation");
					(*generation, future.clone())
				}
				None => {
					let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
					let creation = factory(authorization);
					let future = async move {
						let module = Arc::new(creation.await?);
						Ok(ResolvedModule {
							value: module.clone(),
							teardown: module,
						})
					}
					.boxed()
					.shared();
					slots.insert(
						key.clone(),
						SlotState::Pending {
							generation,
							future: future.clone(),
						},
					);
					tracing::debug!(slot = %key, "creating module");
					(generation, future)
				}
			}
		};

		let outcome = future.await;
		self.settle(&key, generation, &outcome);
		downcast(&key, &outcome?)
	}

	/// Records the outcome of a creation if the slot still holds it.
	fn settle(&self, key: &SlotKey, generation: u64, outcome: &ModuleResult<ResolvedModule>) {
		let mut slots = self.slots.lock();
		let is_current = matches!(
			slots.get(key),
			Some(SlotState::Pending { generation: current, .. }) if *current == generation
		);
		if !is_current {
			return;
		}

		match outcome {
			Ok(module) => {
				slots.insert(key.clone(), SlotState::Resolved(module.clone()));
				tracing::debug!(slot = %key, "module created");
			}
			Err(err) => {
				slots.remove(key);
				tracing::debug!(slot = %key, error = %err, "module creation failed; slot cleared");
			}
		}
	}

	/// Returns true when `key` holds a created module.
	pub fn is_resolved(&self, key: &SlotKey) -> bool {
		match self.slots.lock().get(key) {
			Some(SlotState::Resolved(_)) => true,
			Some(SlotState::Pending { future, .. }) => matches!(future.peek(), Some(Ok(_))),
			None => false,
		}
	}

	/// Keys of every created module, sorted.
	pub fn resolved_keys(&self) -> Vec<SlotKey> {
		let slots = self.slots.lock();
		let mut keys: Vec<_> = slots
			.iter()
			.filter(|(_, state)| resolved_module(state).is_some())
			.map(|(key, _)| key.clone())
			.collect();
		keys.sort();
		keys
	}

	/// Tears down every created module and empties the cache.
	///
	/// Slots that were never requested are not touched and nothing is created.
	/// Slots still in flight are awaited and torn down once created; a creation
	/// that fails has nothing to tear down. All teardowns run concurrently; a
	/// failing one does not stop the others, and every failure is reported in
	/// [`ModuleError::Teardown`].
	pub async fn teardown(&self) -> ModuleResult<()> {
		let drained: Vec<(SlotKey, SlotState)> = self.slots.lock().drain().collect();

		tracing::debug!(count = drained.len(), "tearing down modules");

		let results = join_all(drained.into_iter().map(|(key, state)| async move {
			let module = match state {
				SlotState::Resolved(module) => module,
				SlotState::Pending { future, .. } => match future.await {
					Ok(module) => module,
					Err(err) => {
						tracing::debug!(
							slot = %key,
							error = %err,
							"in-flight creation failed; nothing to tear down"
						);
						return (key, Ok(()));
					}
				},
			};
			let result = module.teardown.teardown().await;
			(key, result)
		}))
		.await;

		let failures: Vec<TeardownFailure> = results
			.into_iter()
			.filter_map(|(key, result)| {
				result.err().map(|source| {
					tracing::warn!(slot = %key, error = %source, "module teardown failed");
					TeardownFailure { key, source }
				})
			})
			.collect();

		if failures.is_empty() {
			Ok(())
		} else {
			Err(ModuleError::Teardown { failures })
		}
	}
}

impl Default for ModuleCache {
	fn default() -> Self {
		Self::new()
	}
}

fn resolved_module(state: &SlotState) -> Option<&ResolvedModule> {
	match state {
		SlotState::Resolved(module) => Some(module),
		SlotState::Pending { future, .. } => match future.peek() {
			Some(Ok(module)) => Some(module),
			_ => None,
		},
	}
}

fn downcast<T: Clone + Send + Sync + 'static>(
	key: &SlotKey,
	module: &ResolvedModule,
) -> ModuleResult<T> {
	module
		.value
		.clone()
		.downcast::<T>()
		.map(|value| (*value).clone())
		.map_err(|_| ModuleError::TypeMismatch { key: key.clone() })
}
