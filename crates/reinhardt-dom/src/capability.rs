//! Capability traits
//!
//! Each trait is a narrow contract over one slice of the host DOM API.
//! [`Node`] implements all of them; callers should depend on the narrowest
//! trait they need so other node kinds can satisfy a subset.
//!
//! Method names mirror the host API one-to-one (`add` is `classList.add`,
//! `set_property` is `style.setProperty`, ...). No semantic translation
//! happens in between.

use crate::host::HostValue;
use crate::listener::ListenerHandle;
use crate::node::Node;

/// Null/undefined testing.
///
/// Implemented for `Option<T>` as well, so an absent receiver can be tested
/// without unwrapping: `None` reports null but not undefined.
pub trait Nullable {
	/// Returns true if the wrapped host value is `null`.
	fn is_null(&self) -> bool;

	/// Returns true if the wrapped host value is `undefined`.
	fn is_undefined(&self) -> bool;
}

impl<T: Nullable> Nullable for Option<T> {
	fn is_null(&self) -> bool {
		self.as_ref().is_none_or(Nullable::is_null)
	}

	fn is_undefined(&self) -> bool {
		self.as_ref().is_some_and(Nullable::is_undefined)
	}
}

/// Access to the wrapped host value.
pub trait Underlying: Nullable {
	/// The host interop value type.
	type Host: HostValue;

	/// Returns the wrapped host value.
	fn underlying(&self) -> &Self::Host;
}

/// Selector queries.
pub trait Queryer: Underlying {
	/// Returns the first matching descendant. The result may be null.
	fn query_selector(&self, query: &str) -> Node<Self::Host>;

	/// Returns every matching descendant in document order.
	///
	/// The `Vec` is a snapshot taken at call time.
	fn query_selector_all(&self, query: &str) -> Vec<Node<Self::Host>>;
}

/// An element's class list (`DOMTokenList`).
pub trait Class: Underlying {
	/// Adds each class in order. No rollback if one entry faults.
	fn add(&self, classes: &[&str]);

	/// Removes each class in order. No rollback if one entry faults.
	fn remove(&self, classes: &[&str]);

	/// Returns true if the class is present.
	fn contains(&self, class: &str) -> bool;
}

/// An element's inline style (`CSSStyleDeclaration`).
pub trait Style: Underlying {
	/// Sets a property. `priority` is passed through as-is (`""` or `"important"`).
	fn set_property(&self, property: &str, value: &str, priority: &str);

	/// Returns the property value, empty when unset.
	fn property(&self, property: &str) -> String;

	/// Removes a property.
	fn remove_property(&self, property: &str);
}

/// A host event.
pub trait Event: Underlying {
	/// Cancels the event's default action (`preventDefault`).
	fn prevent_default(&self);

	/// Stops propagation to further targets (`stopPropagation`).
	fn stop_propagation(&self);

	/// Returns the event type, e.g. `"click"`.
	fn event_type(&self) -> String;

	/// Returns true once a cancelable event was canceled.
	fn default_prevented(&self) -> bool;
}

/// Objects that receive events.
pub trait EventTarget: Underlying {
	/// Registers `callback` for `event`.
	///
	/// The callback runs synchronously from the host's dispatch with the
	/// event wrapped as a [`Node`]. The returned handle owns the bridge
	/// between host and closure: pass it to
	/// [`remove_event_listener`](EventTarget::remove_event_listener) or drop
	/// it to unregister.
	#[must_use = "dropping the handle removes the listener immediately"]
	fn add_event_listener<F>(
		&self,
		event: &str,
		use_capture: bool,
		callback: F,
	) -> ListenerHandle<Self::Host>
	where
		F: FnMut(Node<Self::Host>) + 'static;

	/// Unregisters the bridge from the host, then releases it.
	///
	/// The host is told the target, name and flag recorded in `handle`, so
	/// the bridge is never released while still registered.
	fn remove_event_listener(
		&self,
		event: &str,
		use_capture: bool,
		handle: ListenerHandle<Self::Host>,
	);
}

/// Objects that dispatch events.
pub trait EventSource: Underlying {
	/// Dispatches `event` to this target.
	///
	/// Returns false if a listener canceled a cancelable event.
	fn dispatch_event<E>(&self, event: &E) -> bool
	where
		E: Event<Host = Self::Host>;
}

/// Element accessors.
pub trait HtmlElement: EventTarget + EventSource + Queryer {
	/// Returns the `id` property.
	fn id(&self) -> String;

	/// Sets the `id` property.
	fn set_id(&self, id: &str);

	/// Returns the `tagName` property.
	fn tag_name(&self) -> String;

	/// Returns a fresh view of the `classList`.
	fn class(&self) -> Node<Self::Host>;

	/// Returns a fresh view of the inline `style`.
	fn style(&self) -> Node<Self::Host>;

	/// Sets `innerHTML`. The markup is not validated.
	fn set_inner_html(&self, html: &str);

	/// Returns `innerHTML`.
	fn inner_html(&self) -> String;

	/// Returns `textContent`.
	fn text_content(&self) -> String;

	/// Sets `textContent`, replacing all children.
	fn set_text_content(&self, text: &str);

	/// Calls `setAttribute`.
	fn set_attribute(&self, attribute: &str, value: &str);

	/// Calls `getAttribute`; `None` when the attribute is absent.
	fn attribute(&self, attribute: &str) -> Option<String>;

	/// Calls `removeAttribute`.
	fn remove_attribute(&self, attribute: &str);

	/// Calls `appendChild`. Appending an attached node moves it.
	fn append_child<C>(&self, child: &C)
	where
		C: Underlying<Host = Self::Host>;

	/// Calls `removeChild`.
	fn remove_child<C>(&self, child: &C)
	where
		C: Underlying<Host = Self::Host>;

	/// Returns a snapshot of the element children.
	fn child_elements(&self) -> Vec<Node<Self::Host>>;

	/// Returns the parent element. The result may be null.
	fn parent_element(&self) -> Node<Self::Host>;

	/// Writes `dataset[name]`, i.e. the `data-*` attribute.
	fn set_data(&self, name: &str, value: &str);

	/// Reads `dataset[name]`; `None` when absent.
	fn data(&self, name: &str) -> Option<String>;
}

/// The browser window.
pub trait Window: EventTarget + EventSource {
	/// Returns the `document` property.
	fn document(&self) -> Node<Self::Host>;
}

/// The document root.
pub trait Document: EventTarget + EventSource + Queryer {
	/// Calls `getElementById`. The result may be null.
	fn get_element_by_id(&self, id: &str) -> Node<Self::Host>;

	/// Returns the `body` element.
	fn body(&self) -> Node<Self::Host>;

	/// Returns the root element (`<html>`).
	fn document_element(&self) -> Node<Self::Host>;

	/// Creates a detached element.
	fn create_element(&self, tag: &str) -> Node<Self::Host>;

	/// Creates a detached element in namespace `ns`.
	fn create_element_ns(&self, ns: &str, tag: &str) -> Node<Self::Host>;
}
