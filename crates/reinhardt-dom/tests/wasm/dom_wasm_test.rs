//! Browser tests for the `JsValue` host
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use reinhardt_dom::web::{Element, window};
use reinhardt_dom::{
	Class, Document, EventSource, EventTarget, HtmlElement, Nullable, Queryer, Style, Window,
	new_event,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Appends a fresh `<div>` with `id` to the body.
fn mount(id: &str) -> Element {
	let document = window().document();
	let element = document.create_element("div");
	element.set_id(id);
	document.body().append_child(&element);
	element
}

fn unmount(element: &Element) {
	window().document().body().remove_child(element);
}

#[wasm_bindgen_test]
fn test_wasm_element_accessors() {
	let element = mount("wasm-accessors");

	element.set_attribute("title", "Greeting");
	element.set_data("x", "1");
	element.set_text_content("hello");

	assert_eq!(element.tag_name(), "DIV");
	assert_eq!(element.attribute("data-x"), Some("1".to_string()));
	assert_eq!(element.data("x"), Some("1".to_string()));
	assert_eq!(element.attribute("missing"), None);
	assert_eq!(element.inner_html(), "hello");
	assert!(
		window()
			.document()
			.get_element_by_id("wasm-accessors")
			.is_same_node(&element)
	);

	unmount(&element);
	assert!(element.parent_element().is_null());
}

#[wasm_bindgen_test]
fn test_wasm_class_and_style() {
	let element = mount("wasm-style");

	element.class().add(&["a", "b"]);
	element.class().remove(&["a"]);
	element.style().set_property("color", "red", "");

	assert!(!element.class().contains("a"));
	assert!(element.class().contains("b"));
	assert_eq!(element.style().property("color"), "red");

	unmount(&element);
}

#[wasm_bindgen_test]
fn test_wasm_query_snapshot() {
	let element = mount("wasm-query");
	element.set_inner_html("<p class=\"item\">1</p><p class=\"item\">2</p>");

	let found = element.query_selector_all(".item");
	element.set_inner_html("");

	assert_eq!(found.len(), 2);
	assert!(element.query_selector(".item").is_null());

	unmount(&element);
}

#[wasm_bindgen_test]
fn test_wasm_listener_lifecycle() {
	let element = mount("wasm-listener");
	let count = Rc::new(Cell::new(0));
	let counter = Rc::clone(&count);
	let handle = element.add_event_listener("ping", false, move |_| counter.set(counter.get() + 1));

	element.dispatch_event(&new_event::<JsValue>("ping"));
	element.dispatch_event(&new_event::<JsValue>("ping"));
	assert_eq!(count.get(), 2);

	element.remove_event_listener("ping", false, handle);
	element.dispatch_event(&new_event::<JsValue>("ping"));
	assert_eq!(count.get(), 2);

	unmount(&element);
}

#[wasm_bindgen_test]
fn test_wasm_dropped_handle_stops_delivery() {
	let element = mount("wasm-drop");
	let count = Rc::new(Cell::new(0));
	let counter = Rc::clone(&count);
	let handle = element.add_event_listener("ping", false, move |_| counter.set(counter.get() + 1));

	drop(handle);
	element.dispatch_event(&new_event::<JsValue>("ping"));

	assert_eq!(count.get(), 0);
	unmount(&element);
}
