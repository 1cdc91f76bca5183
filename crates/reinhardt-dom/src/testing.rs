//! In-memory host for native tests
//!
//! [`MockDom`] installs a small document (`<html>`, `<head>`, `<body>`) as
//! the host global of the current thread, so every operation of this crate
//! can run under `cargo test` without a browser.
//!
//! The mock models the parts of the DOM the adapter touches: attributes,
//! class lists, inline style declarations, `dataset`, a selector subset,
//! and event dispatch with capture, target and bubble phases. Misuse the
//! browser would answer with an exception panics with a [`HostError`].
//!
//! ## Example
//!
//! ```
//! use reinhardt_dom::testing::MockDom;
//! use reinhardt_dom::{Document, HtmlElement, Window};
//!
//! let dom = MockDom::new();
//! let document = dom.window().document();
//! let item = document.create_element("li");
//! item.set_id("first");
//! document.body().append_child(&item);
//!
//! assert_eq!(document.get_element_by_id("first").tag_name(), "LI");
//! ```
//!
//! Markup written through `innerHTML` is stored as-is and read back
//! verbatim; it is not parsed into elements.

mod error;
mod realm;
mod selector;
mod value;

use std::rc::Rc;

pub use error::HostError;
pub use realm::HTML_NAMESPACE;
pub use value::{MockCallback, MockObject, MockValue};

use crate::capability::Underlying;
use crate::listener::ListenerHandle;
use crate::node::Node;
use realm::Realm;

/// A [`Node`] over the mock host.
pub type MockNode = Node<MockValue>;

/// Event construction options, as the `EventInit` dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventInit {
	/// Whether the event propagates back up through the ancestors.
	pub bubbles: bool,
	/// Whether `preventDefault` cancels the event.
	pub cancelable: bool,
}

/// A mock document installed as this thread's host global.
///
/// Dropping it uninstalls the host. Values obtained from it stay usable
/// but `HostValue::global` faults until another `MockDom` is created.
pub struct MockDom {
	realm: Rc<Realm>,
}

impl MockDom {
	/// Creates an empty document and installs it on the current thread.
	///
	/// A newer `MockDom` replaces an older one as the global.
	pub fn new() -> Self {
		let realm = Realm::new();
		realm::install(&realm);
		Self { realm }
	}

	/// Returns the window.
	pub fn window(&self) -> MockNode {
		Node::new(self.realm.object(value::ObjectKind::Window))
	}

	/// Returns the document.
	pub fn document(&self) -> MockNode {
		Node::new(self.realm.object(value::ObjectKind::Document))
	}

	/// Creates an event with explicit `bubbles` and `cancelable` flags.
	///
	/// [`new_event`](crate::new_event) creates the non-bubbling,
	/// non-cancelable kind only.
	pub fn create_event(&self, event_type: &str, init: EventInit) -> MockNode {
		Node::new(
			self.realm
				.create_event(event_type, init.bubbles, init.cancelable),
		)
	}

	/// Counts the listeners registered on `target` for `event`, in both phases.
	pub fn listener_count<T>(&self, target: &T, event: &str) -> usize
	where
		T: Underlying<Host = MockValue>,
	{
		self.realm
			.target_of(target.underlying())
			.map_or(0, |target| self.realm.listener_count(target, event))
	}

	/// Returns true if the bridge of `handle` is registered on `target`.
	pub fn is_registered<T>(&self, target: &T, handle: &ListenerHandle<MockValue>) -> bool
	where
		T: Underlying<Host = MockValue>,
	{
		let Some(target) = self.realm.target_of(target.underlying()) else {
			return false;
		};
		let Some(function) = handle
			.bridge()
			.and_then(|bridge| self.realm.function_of(&bridge))
		else {
			return false;
		};
		self.realm
			.is_registered(target, handle.event(), handle.use_capture(), function)
	}

	/// Counts the callbacks that have not been released.
	///
	/// Forgotten callbacks stay live.
	pub fn live_callbacks(&self) -> usize {
		self.realm.live_functions()
	}
}

impl Default for MockDom {
	fn default() -> Self {
		Self::new()
	}
}

impl Drop for MockDom {
	fn drop(&mut self) {
		realm::uninstall(&self.realm);
	}
}

impl std::fmt::Debug for MockDom {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockDom")
			.field("live_callbacks", &self.live_callbacks())
			.finish()
	}
}
