//! Mock Stripe.js.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use checkout_bridge_core::{CheckoutError, CheckoutResult};
use checkout_bridge_stripe::{
	StripeClient, StripeElement, StripeElementEvent, StripeElementOptions, StripeElementType,
	StripeElements, StripeElementsOptions, StripeEvent, StripeEventHandler,
	StripeInitializationData,
	StripeScriptLoader,
};
use parking_lot::Mutex;

/// Element recording its listeners and mount targets.
#[derive(Default)]
pub struct MockStripeElement {
	handlers: Mutex<Vec<(StripeElementEvent, StripeEventHandler)>>,
	mounts: Mutex<Vec<String>>,
	unmounts: AtomicUsize,
}

impl MockStripeElement {
	pub fn new() -> Self {
		Self::default()
	}

	/// Selectors the element was mounted into.
	pub fn mounts(&self) -> Vec<String> {
		self.mounts.lock().clone()
	}

	pub fn unmount_count(&self) -> usize {
		self.unmounts.load(Ordering::SeqCst)
	}

	pub fn handler_count(&self, event: StripeElementEvent) -> usize {
		self.handlers
			.lock()
			.iter()
			.filter(|(registered, _)| *registered == event)
			.count()
	}

	/// Delivers `payload` to every listener of `event`, stopping at the first
	/// failing listener.
	pub async fn emit(
		&self,
		event: StripeElementEvent,
		payload: StripeEvent,
	) -> CheckoutResult<()> {
		let handlers: Vec<StripeEventHandler> = self
			.handlers
			.lock()
			.iter()
			.filter(|(registered, _)| *registered == event)
			.map(|(_, handler)| handler.clone())
			.collect();

		for handler in handlers {
			handler(payload.clone()).await?;
		}
		Ok(())
	}
}

impl StripeElement for MockStripeElement {
	fn on(&self, event: StripeElementEvent, handler: StripeEventHandler) {
		self.handlers.lock().push((event, handler));
	}

	fn mount(&self, selector: &str) {
		self.mounts.lock().push(selector.to_string());
	}

	fn unmount(&self) {
		self.unmounts.fetch_add(1, Ordering::SeqCst);
	}
}

/// Elements group holding at most one element of each kind.
pub struct MockStripeElements {
	element: Arc<MockStripeElement>,
	existing: Mutex<Vec<StripeElementType>>,
	created: Mutex<Vec<(StripeElementType, StripeElementOptions)>>,
}

impl MockStripeElements {
	pub fn new(element: Arc<MockStripeElement>) -> Self {
		Self {
			element,
			existing: Mutex::new(Vec::new()),
			created: Mutex::new(Vec::new()),
		}
	}

	/// Marks an element of `kind` as already created.
	pub fn with_existing(self, kind: StripeElementType) -> Self {
		self.existing.lock().push(kind);
		self
	}

	/// `(kind, options)` of every element created through this group.
	pub fn created(&self) -> Vec<(StripeElementType, StripeElementOptions)> {
		self.created.lock().clone()
	}
}

impl StripeElements for MockStripeElements {
	fn get_element(&self, kind: StripeElementType) -> Option<Arc<dyn StripeElement>> {
		self.existing
			.lock()
			.contains(&kind)
			.then(|| self.element.clone() as Arc<dyn StripeElement>)
	}

	fn create(
		&self,
		kind: StripeElementType,
		options: StripeElementOptions,
	) -> Arc<dyn StripeElement> {
		self.created.lock().push((kind, options));
		self.existing.lock().push(kind);
		self.element.clone() as Arc<dyn StripeElement>
	}
}

pub struct MockStripeClient {
	elements: Arc<MockStripeElements>,
	options: Mutex<Vec<StripeElementsOptions>>,
}

impl MockStripeClient {
	pub fn new(elements: Arc<MockStripeElements>) -> Self {
		Self {
			elements,
			options: Mutex::new(Vec::new()),
		}
	}

	/// Options of every elements group requested so far.
	pub fn elements_options(&self) -> Vec<StripeElementsOptions> {
		self.options.lock().clone()
	}
}

impl StripeClient for MockStripeClient {
	fn elements(&self, options: StripeElementsOptions) -> Arc<dyn StripeElements> {
		self.options.lock().push(options);
		self.elements.clone() as Arc<dyn StripeElements>
	}
}

/// Stripe script loader handing out a [`MockStripeClient`].
pub struct MockStripeScriptLoader {
	client: Arc<MockStripeClient>,
	requests: Mutex<Vec<(StripeInitializationData, Vec<String>, String)>>,
	error: Mutex<Option<String>>,
}

impl MockStripeScriptLoader {
	pub fn new(client: Arc<MockStripeClient>) -> Self {
		Self {
			client,
			requests: Mutex::new(Vec::new()),
			error: Mutex::new(None),
		}
	}

	pub fn fail_with(&self, message: impl Into<String>) {
		*self.error.lock() = Some(message.into());
	}

	/// `(initialization data, betas, api version)` of every client request.
	pub fn requests(&self) -> Vec<(StripeInitializationData, Vec<String>, String)> {
		self.requests.lock().clone()
	}
}

#[async_trait]
impl StripeScriptLoader for MockStripeScriptLoader {
	async fn get_stripe_client(
		&self,
		initialization_data: &StripeInitializationData,
		betas: &[&str],
		api_version: &str,
	) -> CheckoutResult<Arc<dyn StripeClient>> {
		self.requests.lock().push((
			initialization_data.clone(),
			betas.iter().map(|beta| beta.to_string()).collect(),
			api_version.to_string(),
		));
		if let Some(message) = self.error.lock().clone() {
			return Err(CheckoutError::ClientUnavailable(message));
		}
		Ok(self.client.clone() as Arc<dyn StripeClient>)
	}
}
