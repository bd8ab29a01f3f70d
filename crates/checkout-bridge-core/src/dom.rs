//! DOM operations used by strategies.

/// Minimal view of the page hosting the checkout.
pub trait DomHost: Send + Sync {
	/// Returns true when an element with `id` exists.
	fn has_element(&self, id: &str) -> bool;

	/// Removes the element with `id`, if present.
	fn remove_element(&self, id: &str);

	/// Removes `attribute` from the element with `id`, if present.
	fn remove_attribute(&self, id: &str, attribute: &str);
}
