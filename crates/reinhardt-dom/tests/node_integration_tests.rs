//! Node wrapper integration tests against the mock host
//!
//! Success Criteria:
//! 1. Element accessors read and write the host on every call
//! 2. Tree mutation and queries reflect the live document
//! 3. Class, style and dataset views follow host semantics
//! 4. Null and undefined wrappers are distinguishable
//! 5. Host misuse surfaces as a fault
//!
//! Test Categories:
//! - Happy Path: 13 tests
//! - Error Path: 5 tests
//! - Edge Cases: 8 tests
//! - Decision Table: 1 test

use reinhardt_dom::testing::{HTML_NAMESPACE, MockDom, MockNode, MockValue};
use reinhardt_dom::{
	Class, Document, HostValue, HtmlElement, Nullable, Queryer, Style, Underlying, Window, null,
	undefined, window,
};
use rstest::*;

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn dom() -> MockDom {
	MockDom::new()
}

/// `body > section#intro.card > (p.lead, p.lead, span)`
fn article(document: &MockNode) -> MockNode {
	let section = document.create_element("section");
	section.set_id("intro");
	section.class().add(&["card"]);
	for tag in ["p", "p", "span"] {
		let child = document.create_element(tag);
		if tag == "p" {
			child.class().add(&["lead"]);
		}
		section.append_child(&child);
	}
	document.body().append_child(&section);
	section
}

// ============================================================================
// Happy Path Tests
// ============================================================================

#[rstest]
fn test_create_element_is_detached(dom: MockDom) {
	let document = dom.document();

	let div = document.create_element("div");

	assert!(!div.is_null());
	assert_eq!(div.tag_name(), "DIV");
	assert!(div.parent_element().is_null());
	assert!(document.get_element_by_id("").is_null());
}

#[rstest]
fn test_id_reflects_attribute(dom: MockDom) {
	let div = dom.document().create_element("div");

	div.set_id("main");

	assert_eq!(div.id(), "main");
	assert_eq!(div.attribute("id"), Some("main".to_string()));
}

#[rstest]
fn test_attribute_lifecycle(dom: MockDom) {
	let div = dom.document().create_element("div");
	assert_eq!(div.attribute("title"), None);

	div.set_attribute("title", "Greeting");
	assert_eq!(div.attribute("title"), Some("Greeting".to_string()));

	div.remove_attribute("title");
	assert_eq!(div.attribute("title"), None);
}

#[rstest]
fn test_data_reflects_data_attribute(dom: MockDom) {
	let div = dom.document().create_element("div");

	div.set_data("x", "1");
	div.set_attribute("data-user-id", "7");

	assert_eq!(div.attribute("data-x"), Some("1".to_string()));
	assert_eq!(div.data("userId"), Some("7".to_string()));
	assert_eq!(div.data("missing"), None);
}

#[rstest]
fn test_append_child_attaches_then_moves(dom: MockDom) {
	let document = dom.document();
	let body = document.body();
	let list = document.create_element("ul");
	let other = document.create_element("ol");
	let item = document.create_element("li");
	body.append_child(&list);
	body.append_child(&other);

	list.append_child(&item);
	assert!(item.parent_element().is_same_node(&list));

	other.append_child(&item);
	assert!(list.child_elements().is_empty());
	assert!(item.parent_element().is_same_node(&other));
	assert_eq!(body.child_elements().len(), 2);
}

#[rstest]
fn test_remove_child_detaches(dom: MockDom) {
	let document = dom.document();
	let list = document.create_element("ul");
	let item = document.create_element("li");
	list.append_child(&item);

	list.remove_child(&item);

	assert!(item.parent_element().is_null());
	assert!(list.child_elements().is_empty());
}

#[rstest]
fn test_text_content_is_escaped_in_markup(dom: MockDom) {
	let div = dom.document().create_element("div");

	div.set_text_content("<b>hi</b> & bye");

	assert_eq!(div.text_content(), "<b>hi</b> & bye");
	assert_eq!(div.inner_html(), "&lt;b&gt;hi&lt;/b&gt; &amp; bye");
}

#[rstest]
fn test_inner_html_serializes_children(dom: MockDom) {
	let document = dom.document();
	let list = document.create_element("ul");
	let item = document.create_element("li");
	let rule = document.create_element("hr");
	item.set_attribute("title", "say \"hi\"");
	item.set_text_content("one");
	list.append_child(&item);
	list.append_child(&rule);

	assert_eq!(
		list.inner_html(),
		"<li title=\"say &quot;hi&quot;\">one</li><hr>"
	);
	assert_eq!(list.text_content(), "one");
}

#[rstest]
fn test_query_selector_scopes(dom: MockDom) {
	let document = dom.document();
	let section = article(&document);

	assert!(document.query_selector("#intro").is_same_node(&section));
	assert!(
		document
			.query_selector("body > section.card")
			.is_same_node(&section)
	);
	assert!(
		document
			.query_selector("html")
			.is_same_node(&document.document_element())
	);
	assert_eq!(document.query_selector_all("p.lead").len(), 2);
	assert_eq!(section.query_selector_all("*").len(), 3);
	// Element queries only search descendants.
	assert!(section.query_selector("section").is_null());
}

#[rstest]
fn test_query_selector_all_is_a_snapshot(dom: MockDom) {
	let document = dom.document();
	let section = article(&document);
	let found = document.query_selector_all("p");

	section.append_child(&document.create_element("p"));

	assert_eq!(found.len(), 2);
	assert_eq!(document.query_selector_all("p").len(), 3);
}

#[rstest]
fn test_child_elements_in_order(dom: MockDom) {
	let document = dom.document();
	let section = article(&document);

	let tags: Vec<String> = section
		.child_elements()
		.iter()
		.map(HtmlElement::tag_name)
		.collect();

	assert_eq!(tags, ["P", "P", "SPAN"]);
}

#[rstest]
fn test_class_add_remove_contains(dom: MockDom) {
	let div = dom.document().create_element("div");

	div.class().add(&["a", "b"]);
	assert!(div.class().contains("a"));
	assert!(div.class().contains("b"));

	div.class().remove(&["a"]);
	assert!(!div.class().contains("a"));
	assert_eq!(div.attribute("class"), Some("b".to_string()));
}

#[rstest]
fn test_style_property_lifecycle(dom: MockDom) {
	let div = dom.document().create_element("div");
	let style = div.style();

	style.set_property("color", "red", "");
	assert_eq!(style.property("color"), "red");
	// A fresh view reads the same declaration.
	assert_eq!(div.style().property("COLOR"), "red");

	style.remove_property("color");
	assert_eq!(style.property("color"), "");
}

// ============================================================================
// Error Path Tests
// ============================================================================

#[rstest]
#[should_panic(expected = "NotFoundError")]
fn test_remove_child_of_stranger_faults(dom: MockDom) {
	let document = dom.document();
	let list = document.create_element("ul");
	let item = document.create_element("li");

	list.remove_child(&item);
}

#[rstest]
#[should_panic(expected = "HierarchyRequestError")]
fn test_append_ancestor_faults(dom: MockDom) {
	let document = dom.document();
	let outer = document.create_element("div");
	let inner = document.create_element("div");
	outer.append_child(&inner);

	inner.append_child(&outer);
}

#[rstest]
#[should_panic(expected = "SyntaxError")]
fn test_invalid_selector_faults(dom: MockDom) {
	dom.document().query_selector("div:hover");
}

#[rstest]
#[should_panic(expected = "must not be empty")]
fn test_empty_class_faults(dom: MockDom) {
	dom.document().create_element("div").class().add(&[""]);
}

#[rstest]
#[should_panic(expected = "cannot access property 'classList' of null")]
fn test_accessor_on_null_faults(dom: MockDom) {
	let missing = dom.document().get_element_by_id("missing");

	missing.class();
}

// ============================================================================
// Edge Cases
// ============================================================================

#[rstest]
fn test_null_and_undefined_are_distinct() {
	let null = null::<MockValue>();
	let undefined = undefined::<MockValue>();

	assert!(null.is_null());
	assert!(!null.is_undefined());
	assert!(undefined.is_undefined());
	assert!(!undefined.is_null());
	assert!(MockNode::default().is_undefined());
}

#[rstest]
fn test_absent_option_reports_null() {
	let missing: Option<MockNode> = None;
	let present = Some(null::<MockValue>());

	assert!(missing.is_null());
	assert!(!missing.is_undefined());
	assert!(present.is_null());
}

#[rstest]
fn test_present_filters_null(dom: MockDom) {
	let document = dom.document();
	article(&document);

	assert!(document.get_element_by_id("missing").present().is_none());
	assert!(document.get_element_by_id("intro").present().is_some());
}

#[rstest]
fn test_class_duplicates_and_missing_attribute(dom: MockDom) {
	let div = dom.document().create_element("div");

	div.class().remove(&["ghost"]);
	assert_eq!(div.attribute("class"), None);

	div.class().add(&["a", "a"]);
	assert_eq!(div.attribute("class"), Some("a".to_string()));
}

#[rstest]
fn test_style_priority_and_empty_value(dom: MockDom) {
	let style = dom.document().create_element("div").style();
	let priority = |property: &str| {
		style
			.underlying()
			.call("getPropertyPriority", &[MockValue::from(property)])
			.to_js_string()
	};

	style.set_property("margin", "0", "important");
	assert_eq!(priority("margin"), "important");

	// Unknown priorities leave the declaration untouched.
	style.set_property("margin", "4px", "urgent");
	assert_eq!(style.property("margin"), "0");

	style.set_property("margin", "", "");
	assert_eq!(style.property("margin"), "");
}

#[rstest]
fn test_set_text_content_replaces_children(dom: MockDom) {
	let document = dom.document();
	let section = article(&document);
	let first = section.child_elements().remove(0);

	section.set_text_content("empty");

	assert!(section.child_elements().is_empty());
	assert!(first.parent_element().is_null());
	assert!(document.query_selector("p").is_null());
}

#[rstest]
fn test_inner_html_is_kept_verbatim(dom: MockDom) {
	let div = dom.document().create_element("div");

	div.set_inner_html("<p>x</p>");

	assert_eq!(div.inner_html(), "<p>x</p>");
	assert_eq!(div.text_content(), "x");
	assert!(div.child_elements().is_empty());
}

#[rstest]
fn test_create_element_ns_keeps_case(dom: MockDom) {
	let document = dom.document();

	let svg = document.create_element_ns("http://www.w3.org/2000/svg", "svg");
	let div = document.create_element_ns(HTML_NAMESPACE, "div");

	assert_eq!(svg.tag_name(), "svg");
	assert_eq!(div.tag_name(), "DIV");
}

// ============================================================================
// Decision Table: facade entry points
// ============================================================================

#[rstest]
fn test_window_document_facade(dom: MockDom) {
	let window = window::<MockValue>();
	let document = window.document();

	assert!(document.is_same_node(&dom.document()));
	assert_eq!(document.document_element().tag_name(), "HTML");
	assert_eq!(document.body().tag_name(), "BODY");
	assert!(
		document
			.body()
			.parent_element()
			.is_same_node(&document.document_element())
	);

	let detached = document.create_element("div");
	detached.set_id("later");
	assert!(document.get_element_by_id("later").is_null());

	document.body().append_child(&detached);
	assert!(document.get_element_by_id("later").is_same_node(&detached));
}
