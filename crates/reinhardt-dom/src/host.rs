//! Host interop boundary
//!
//! [`HostValue`] is the only way this crate touches host objects: an opaque
//! reference offering named property access, method invocation, indexed
//! access for host-native sequences and native callback construction.
//!
//! Two implementations ship with the crate:
//!
//! - `wasm_bindgen::JsValue` (see [`web`](crate::web), wasm32 only)
//! - [`MockValue`](crate::testing::MockValue), an in-memory host used by native tests
//!
//! Implementations report misuse (dereferencing null, calling a
//! non-function, host exceptions) as an unrecoverable fault. There is no
//! error channel at this boundary.

/// Opaque reference to one host object.
///
/// A value may be the host's `null`, its `undefined`, a primitive or a live
/// object. Identity is host-defined.
pub trait HostValue: Clone + for<'a> From<&'a str> + From<bool> + 'static {
	/// Native callback produced by [`HostValue::callback`].
	type Callback: HostCallback<Self>;

	/// Returns the host global object.
	fn global() -> Self;

	/// Returns the host `null` singleton.
	fn null() -> Self;

	/// Returns the host `undefined` singleton.
	fn undefined() -> Self;

	/// Returns true if this value is the host `null`.
	fn is_null(&self) -> bool;

	/// Returns true if this value is the host `undefined`.
	fn is_undefined(&self) -> bool;

	/// Reads the named property.
	fn get(&self, name: &str) -> Self;

	/// Writes the named property.
	fn set(&self, name: &str, value: Self);

	/// Invokes the named method with `self` as receiver.
	fn call(&self, method: &str, args: &[Self]) -> Self;

	/// Invokes this value as a constructor (`new self(...args)`).
	fn construct(&self, args: &[Self]) -> Self;

	/// Reads the element at `index` of a host-native sequence.
	fn index(&self, index: usize) -> Self;

	/// Returns the `length` of a host-native sequence, 0 when absent.
	fn length(&self) -> usize;

	/// Returns the string content if this value is a host string.
	fn as_string(&self) -> Option<String>;

	/// Returns the boolean content if this value is a host boolean.
	fn as_bool(&self) -> Option<bool>;

	/// Wraps a closure into a host-invokable function.
	///
	/// The host passes the first call argument to `f`. The returned callback
	/// stays invokable until [`HostCallback::release`] is called.
	fn callback<F>(f: F) -> Self::Callback
	where
		F: FnMut(Self) + 'static;
}

/// A native function registered with the host.
pub trait HostCallback<V>: 'static {
	/// Returns the host function value, suitable for passing to host methods.
	fn as_value(&self) -> V;

	/// Frees the closure. Invoking the host function afterwards is a host fault.
	fn release(self);

	/// Leaks the closure so it stays invokable for the rest of the program.
	fn forget(self)
	where
		Self: Sized,
	{
		std::mem::forget(self);
	}
}
