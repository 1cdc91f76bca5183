//! Root entry points
//!
//! The window is obtained from the host global object; everything else is
//! reached from it.
//!
//! ```ignore
//! use reinhardt_dom::{Document, HtmlElement, Window, window};
//!
//! let document = window::<JsValue>().document();
//! let greeting = document.create_element("p");
//! greeting.set_text_content("Hello");
//! document.body().append_child(&greeting);
//! ```

use crate::host::HostValue;
use crate::node::Node;

/// Returns the window, wrapping the host global object.
pub fn window<V: HostValue>() -> Node<V> {
	Node::new(V::global())
}

/// Constructs a host event through the global `Event` constructor.
///
/// The event does not bubble and is not cancelable, as with `new Event(type)`.
pub fn new_event<V: HostValue>(event_type: &str) -> Node<V> {
	Node::new(V::global().get("Event").construct(&[V::from(event_type)]))
}

/// Returns a wrapper around the host `null`.
pub fn null<V: HostValue>() -> Node<V> {
	Node::new(V::null())
}

/// Returns a wrapper around the host `undefined`.
pub fn undefined<V: HostValue>() -> Node<V> {
	Node::new(V::undefined())
}
