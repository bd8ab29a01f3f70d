//! # checkout-bridge cache
//!
//! Lazily created, memoized vendor SDK modules.
//!
//! Vendor SDKs hand out their modules (API client, 3-D Secure, data collector,
//! wallets) through asynchronous factories that load a script and then create
//! the module. A [`ModuleCache`] makes sure each module is created at most once
//! per cache, whoever asks for it and however many callers race on it, and
//! tears every created module down again when the checkout strategy is disposed.
//!
//! ## Slots
//!
//! Each module lives in a slot identified by a [`SlotKey`]. A slot is either
//! pending (creation in flight, shared by every waiter) or resolved. A failed
//! creation empties the slot so the next access retries.
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use checkout_bridge_cache::{ModuleCache, SlotKey, Teardown};
//! use checkout_bridge_core::VendorError;
//! use std::sync::Arc;
//!
//! struct Client {
//! 	authorization: String,
//! }
//!
//! #[async_trait]
//! impl Teardown for Client {
//! 	async fn teardown(&self) -> Result<(), VendorError> {
//! 		Ok(())
//! 	}
//! }
//!
//! # async fn example() -> Result<(), checkout_bridge_cache::ModuleError> {
//! let cache = ModuleCache::new();
//! cache.initialize("client-token");
//!
//! let client: Arc<Client> = cache
//! 	.get_or_create(SlotKey::new("client"), |authorization| async move {
//! 		Ok(Arc::new(Client { authorization }))
//! 	})
//! 	.await?;
//! assert_eq!(client.authorization, "client-token");
//!
//! cache.teardown().await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod module;

pub use cache::ModuleCache;
pub use error::{ModuleError, ModuleResult, TeardownFailure};
pub use module::{SlotKey, Teardown};
