//! Property-based tests for class list and dataset behavior
//!
//! Uses proptest to verify properties that should hold for all valid inputs.

#[cfg(not(target_arch = "wasm32"))]
mod property_tests {
	use std::collections::HashSet;

	use proptest::prelude::*;
	use proptest::proptest;
	use reinhardt_dom::testing::MockDom;
	use reinhardt_dom::{Class, Document, HtmlElement};

	proptest! {
		/// Property: every added class is contained until it is removed
		#[test]
		fn prop_added_classes_are_contained(
			classes in prop::collection::vec("[a-z][a-z0-9_-]{0,7}", 1..8)
		) {
			let dom = MockDom::new();
			let element = dom.document().create_element("div");
			let classes: Vec<&str> = classes.iter().map(String::as_str).collect();

			element.class().add(&classes);
			for class in &classes {
				prop_assert!(element.class().contains(class));
			}

			element.class().remove(&classes);
			for class in &classes {
				prop_assert!(!element.class().contains(class));
			}
		}

		/// Property: adding the same classes twice never duplicates a token
		#[test]
		fn prop_class_attribute_has_unique_tokens(
			classes in prop::collection::vec("[a-z]{1,4}", 1..12)
		) {
			let dom = MockDom::new();
			let element = dom.document().create_element("div");
			let classes: Vec<&str> = classes.iter().map(String::as_str).collect();

			element.class().add(&classes);
			element.class().add(&classes);

			let attribute = element.attribute("class").unwrap_or_default();
			let tokens: Vec<&str> = attribute.split(' ').collect();
			let unique: HashSet<&str> = tokens.iter().copied().collect();
			prop_assert_eq!(tokens.len(), unique.len());
			prop_assert_eq!(unique, classes.iter().copied().collect::<HashSet<_>>());
		}

		/// Property: a dataset entry reads back through data-* reflection
		#[test]
		fn prop_data_round_trips(
			name in "[a-z][a-zA-Z]{0,8}",
			value in ".{0,16}"
		) {
			let dom = MockDom::new();
			let element = dom.document().create_element("div");

			element.set_data(&name, &value);

			prop_assert_eq!(element.data(&name), Some(value.clone()));
			if name.chars().all(|c| c.is_ascii_lowercase()) {
				prop_assert_eq!(element.attribute(&format!("data-{name}")), Some(value));
			}
		}
	}
}
