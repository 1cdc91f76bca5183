//! Browser host backed by `wasm-bindgen`
//!
//! Implements [`HostValue`] for [`JsValue`] with `js_sys::Reflect` and
//! `js_sys::Function`. JavaScript exceptions raised by the host are
//! rethrown with [`wasm_bindgen::throw_val`], so a host fault unwinds
//! straight back into the JavaScript caller.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue, throw_str, throw_val};

use crate::host::{HostCallback, HostValue};
use crate::node::Node;

/// A DOM node in the browser.
pub type Element = Node<JsValue>;

/// A closure exposed to JavaScript as a function.
pub struct JsCallback {
	closure: Closure<dyn FnMut(JsValue)>,
}

impl HostCallback<JsValue> for JsCallback {
	fn as_value(&self) -> JsValue {
		self.closure.as_ref().clone()
	}

	fn release(self) {
		drop(self.closure);
	}

	fn forget(self) {
		self.closure.forget();
	}
}

impl HostValue for JsValue {
	type Callback = JsCallback;

	fn global() -> Self {
		js_sys::global().into()
	}

	fn null() -> Self {
		JsValue::NULL
	}

	fn undefined() -> Self {
		JsValue::UNDEFINED
	}

	fn is_null(&self) -> bool {
		JsValue::is_null(self)
	}

	fn is_undefined(&self) -> bool {
		JsValue::is_undefined(self)
	}

	fn get(&self, name: &str) -> Self {
		Reflect::get(self, &JsValue::from_str(name)).unwrap_or_else(|err| throw_val(err))
	}

	fn set(&self, name: &str, value: Self) {
		if let Err(err) = Reflect::set(self, &JsValue::from_str(name), &value) {
			throw_val(err);
		}
	}

	fn call(&self, method: &str, args: &[Self]) -> Self {
		let Ok(function) = HostValue::get(self, method).dyn_into::<Function>() else {
			throw_str(&format!("{method} is not a function"));
		};
		function
			.apply(self, &arguments(args))
			.unwrap_or_else(|err| throw_val(err))
	}

	fn construct(&self, args: &[Self]) -> Self {
		let Some(constructor) = self.dyn_ref::<Function>() else {
			throw_str("value is not a constructor");
		};
		Reflect::construct(constructor, &arguments(args)).unwrap_or_else(|err| throw_val(err))
	}

	fn index(&self, index: usize) -> Self {
		Reflect::get(self, &JsValue::from(index as u32)).unwrap_or_else(|err| throw_val(err))
	}

	fn length(&self) -> usize {
		HostValue::get(self, "length")
			.as_f64()
			.map_or(0, |length| length as usize)
	}

	fn as_string(&self) -> Option<String> {
		JsValue::as_string(self)
	}

	fn as_bool(&self) -> Option<bool> {
		JsValue::as_bool(self)
	}

	fn callback<F>(f: F) -> JsCallback
	where
		F: FnMut(JsValue) + 'static,
	{
		JsCallback {
			closure: Closure::<dyn FnMut(JsValue)>::new(f),
		}
	}
}

fn arguments(args: &[JsValue]) -> Array {
	args.iter().collect()
}

/// Returns the browser window.
pub fn window() -> Element {
	crate::window()
}

/// Routes Rust panics to `console.error` with a readable message.
#[cfg(feature = "console_error_panic_hook")]
pub fn install_panic_hook() {
	console_error_panic_hook::set_once();
}
