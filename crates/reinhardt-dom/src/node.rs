//! Node wrapper
//!
//! [`Node`] is the single concrete type behind every capability trait. It
//! holds nothing but the wrapped host value: each accessor re-reads the host
//! and every node-valued result is a freshly constructed wrapper.

use crate::capability::{
	Class, Document, Event, EventSource, EventTarget, HtmlElement, Nullable, Queryer, Style,
	Underlying, Window,
};
use crate::host::HostValue;
use crate::listener::ListenerHandle;

/// A stateless view over one host object.
///
/// Two `Node`s obtained for the same logical element are not guaranteed to
/// be identical values; use [`Node::is_same_node`] to ask the host. Do not
/// keep a `Node` across tree mutations that may invalidate it without
/// re-checking [`Nullable::is_null`].
#[derive(Clone, Debug)]
pub struct Node<V> {
	value: V,
}

impl<V: HostValue> Node<V> {
	/// Wraps a host value.
	pub fn new(value: V) -> Self {
		Self { value }
	}

	/// Unwraps the host value.
	pub fn into_inner(self) -> V {
		self.value
	}

	/// Returns `None` when the wrapped value is null or undefined.
	pub fn present(self) -> Option<Self> {
		if self.value.is_null() || self.value.is_undefined() {
			None
		} else {
			Some(self)
		}
	}

	/// Asks the host whether both wrappers refer to the same node.
	pub fn is_same_node(&self, other: &Node<V>) -> bool {
		self.value
			.call("isSameNode", &[other.value.clone()])
			.as_bool()
			.unwrap_or(false)
	}

	fn wrap(&self, name: &str) -> Self {
		Self::new(self.value.get(name))
	}

	fn read_string(&self, name: &str) -> String {
		self.value.get(name).as_string().unwrap_or_default()
	}

	/// Copies a host-native sequence into wrappers.
	fn materialize(list: V) -> Vec<Self> {
		(0..list.length())
			.map(|index| Self::new(list.index(index)))
			.collect()
	}
}

/// The zero value wraps `undefined`.
impl<V: HostValue> Default for Node<V> {
	fn default() -> Self {
		Self::new(V::undefined())
	}
}

impl<V: HostValue> From<V> for Node<V> {
	fn from(value: V) -> Self {
		Self::new(value)
	}
}

impl<V: HostValue> Nullable for Node<V> {
	fn is_null(&self) -> bool {
		self.value.is_null()
	}

	fn is_undefined(&self) -> bool {
		self.value.is_undefined()
	}
}

impl<V: HostValue> Underlying for Node<V> {
	type Host = V;

	fn underlying(&self) -> &V {
		&self.value
	}
}

impl<V: HostValue> Queryer for Node<V> {
	fn query_selector(&self, query: &str) -> Node<V> {
		Self::new(self.value.call("querySelector", &[V::from(query)]))
	}

	fn query_selector_all(&self, query: &str) -> Vec<Node<V>> {
		Self::materialize(self.value.call("querySelectorAll", &[V::from(query)]))
	}
}

impl<V: HostValue> Class for Node<V> {
	fn add(&self, classes: &[&str]) {
		for class in classes {
			self.value.call("add", &[V::from(*class)]);
		}
	}

	fn remove(&self, classes: &[&str]) {
		for class in classes {
			self.value.call("remove", &[V::from(*class)]);
		}
	}

	fn contains(&self, class: &str) -> bool {
		self.value
			.call("contains", &[V::from(class)])
			.as_bool()
			.unwrap_or(false)
	}
}

impl<V: HostValue> Style for Node<V> {
	fn set_property(&self, property: &str, value: &str, priority: &str) {
		self.value.call(
			"setProperty",
			&[V::from(property), V::from(value), V::from(priority)],
		);
	}

	fn property(&self, property: &str) -> String {
		self.value
			.call("getPropertyValue", &[V::from(property)])
			.as_string()
			.unwrap_or_default()
	}

	fn remove_property(&self, property: &str) {
		self.value.call("removeProperty", &[V::from(property)]);
	}
}

impl<V: HostValue> Event for Node<V> {
	fn prevent_default(&self) {
		self.value.call("preventDefault", &[]);
	}

	fn stop_propagation(&self) {
		self.value.call("stopPropagation", &[]);
	}

	fn event_type(&self) -> String {
		self.read_string("type")
	}

	fn default_prevented(&self) -> bool {
		self.value
			.get("defaultPrevented")
			.as_bool()
			.unwrap_or(false)
	}
}

impl<V: HostValue> EventTarget for Node<V> {
	fn add_event_listener<F>(
		&self,
		event: &str,
		use_capture: bool,
		mut callback: F,
	) -> ListenerHandle<V>
	where
		F: FnMut(Node<V>) + 'static,
	{
		ListenerHandle::register(&self.value, event, use_capture, move |raw| {
			callback(Node::new(raw))
		})
	}

	fn remove_event_listener(&self, event: &str, use_capture: bool, handle: ListenerHandle<V>) {
		handle.release(event, use_capture);
	}
}

impl<V: HostValue> EventSource for Node<V> {
	fn dispatch_event<E>(&self, event: &E) -> bool
	where
		E: Event<Host = V>,
	{
		self.value
			.call("dispatchEvent", &[event.underlying().clone()])
			.as_bool()
			.unwrap_or(true)
	}
}

impl<V: HostValue> HtmlElement for Node<V> {
	fn id(&self) -> String {
		self.read_string("id")
	}

	fn set_id(&self, id: &str) {
		self.value.set("id", V::from(id));
	}

	fn tag_name(&self) -> String {
		self.read_string("tagName")
	}

	fn class(&self) -> Node<V> {
		self.wrap("classList")
	}

	fn style(&self) -> Node<V> {
		self.wrap("style")
	}

	fn set_inner_html(&self, html: &str) {
		self.value.set("innerHTML", V::from(html));
	}

	fn inner_html(&self) -> String {
		self.read_string("innerHTML")
	}

	fn text_content(&self) -> String {
		self.read_string("textContent")
	}

	fn set_text_content(&self, text: &str) {
		self.value.set("textContent", V::from(text));
	}

	fn set_attribute(&self, attribute: &str, value: &str) {
		self.value
			.call("setAttribute", &[V::from(attribute), V::from(value)]);
	}

	fn attribute(&self, attribute: &str) -> Option<String> {
		self.value
			.call("getAttribute", &[V::from(attribute)])
			.as_string()
	}

	fn remove_attribute(&self, attribute: &str) {
		self.value.call("removeAttribute", &[V::from(attribute)]);
	}

	fn append_child<C>(&self, child: &C)
	where
		C: Underlying<Host = V>,
	{
		self.value
			.call("appendChild", &[child.underlying().clone()]);
	}

	fn remove_child<C>(&self, child: &C)
	where
		C: Underlying<Host = V>,
	{
		self.value
			.call("removeChild", &[child.underlying().clone()]);
	}

	fn child_elements(&self) -> Vec<Node<V>> {
		Self::materialize(self.value.get("children"))
	}

	fn parent_element(&self) -> Node<V> {
		self.wrap("parentElement")
	}

	fn set_data(&self, name: &str, value: &str) {
		self.value.get("dataset").set(name, V::from(value));
	}

	fn data(&self, name: &str) -> Option<String> {
		self.value.get("dataset").get(name).as_string()
	}
}

impl<V: HostValue> Window for Node<V> {
	fn document(&self) -> Node<V> {
		self.wrap("document")
	}
}

impl<V: HostValue> Document for Node<V> {
	fn get_element_by_id(&self, id: &str) -> Node<V> {
		Self::new(self.value.call("getElementById", &[V::from(id)]))
	}

	fn body(&self) -> Node<V> {
		self.wrap("body")
	}

	fn document_element(&self) -> Node<V> {
		self.wrap("documentElement")
	}

	fn create_element(&self, tag: &str) -> Node<V> {
		Self::new(self.value.call("createElement", &[V::from(tag)]))
	}

	fn create_element_ns(&self, ns: &str, tag: &str) -> Node<V> {
		Self::new(
			self.value
				.call("createElementNS", &[V::from(ns), V::from(tag)]),
		)
	}
}
