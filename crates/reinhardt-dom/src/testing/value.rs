//! Values of the mock host and their [`HostValue`] implementation.

use std::rc::Rc;

use super::error::{HostError, fault};
use super::realm::{self, EventId, FunctionId, NodeId, Realm};
use crate::host::{HostCallback, HostValue};

/// A value living in a [`MockDom`](super::MockDom).
///
/// Mirrors the JavaScript value space the adapter relies on: `undefined`,
/// `null`, primitives and references to host objects.
#[derive(Clone, Debug, Default)]
pub enum MockValue {
	/// JavaScript `undefined`.
	#[default]
	Undefined,
	/// JavaScript `null`.
	Null,
	/// A boolean.
	Bool(bool),
	/// A number.
	Number(f64),
	/// A string.
	String(String),
	/// A reference to a host object.
	Object(MockObject),
}

/// A reference to one object of a mock host.
#[derive(Clone)]
pub struct MockObject {
	pub(crate) realm: Rc<Realm>,
	pub(crate) kind: ObjectKind,
}

/// What a [`MockObject`] refers to.
#[derive(Clone, Debug)]
pub(crate) enum ObjectKind {
	Window,
	Document,
	Element(NodeId),
	ClassList(NodeId),
	Style(NodeId),
	Dataset(NodeId),
	/// A snapshot sequence (`HTMLCollection`, `NodeList`).
	Collection(Rc<[MockValue]>),
	Event(EventId),
	EventConstructor,
	Function(FunctionId),
}

impl ObjectKind {
	/// The interface name a browser would report for this object.
	pub(crate) fn interface(&self) -> &'static str {
		match self {
			ObjectKind::Window => "Window",
			ObjectKind::Document => "HTMLDocument",
			ObjectKind::Element(_) => "Element",
			ObjectKind::ClassList(_) => "DOMTokenList",
			ObjectKind::Style(_) => "CSSStyleDeclaration",
			ObjectKind::Dataset(_) => "DOMStringMap",
			ObjectKind::Collection(_) => "NodeList",
			ObjectKind::Event(_) => "Event",
			ObjectKind::EventConstructor | ObjectKind::Function(_) => "Function",
		}
	}

	fn same_as(&self, other: &ObjectKind) -> bool {
		match (self, other) {
			(ObjectKind::Window, ObjectKind::Window)
			| (ObjectKind::Document, ObjectKind::Document)
			| (ObjectKind::EventConstructor, ObjectKind::EventConstructor) => true,
			(ObjectKind::Element(a), ObjectKind::Element(b))
			| (ObjectKind::ClassList(a), ObjectKind::ClassList(b))
			| (ObjectKind::Style(a), ObjectKind::Style(b))
			| (ObjectKind::Dataset(a), ObjectKind::Dataset(b))
			| (ObjectKind::Event(a), ObjectKind::Event(b))
			| (ObjectKind::Function(a), ObjectKind::Function(b)) => a == b,
			(ObjectKind::Collection(a), ObjectKind::Collection(b)) => Rc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl std::fmt::Debug for MockObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("MockObject").field(&self.kind).finish()
	}
}

/// Strict equality: primitives by value, objects by identity.
impl PartialEq for MockValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(MockValue::Undefined, MockValue::Undefined)
			| (MockValue::Null, MockValue::Null) => true,
			(MockValue::Bool(a), MockValue::Bool(b)) => a == b,
			(MockValue::Number(a), MockValue::Number(b)) => a == b,
			(MockValue::String(a), MockValue::String(b)) => a == b,
			(MockValue::Object(a), MockValue::Object(b)) => {
				Rc::ptr_eq(&a.realm, &b.realm) && a.kind.same_as(&b.kind)
			}
			_ => false,
		}
	}
}

impl MockValue {
	/// JavaScript `ToString`.
	pub fn to_js_string(&self) -> String {
		match self {
			MockValue::Undefined => "undefined".to_owned(),
			MockValue::Null => "null".to_owned(),
			MockValue::Bool(value) => value.to_string(),
			MockValue::Number(value) if value.fract() == 0.0 && value.is_finite() => {
				format!("{value:.0}")
			}
			MockValue::Number(value) => value.to_string(),
			MockValue::String(value) => value.clone(),
			MockValue::Object(object) => format!("[object {}]", object.kind.interface()),
		}
	}

	/// JavaScript `ToBoolean`.
	pub fn is_truthy(&self) -> bool {
		match self {
			MockValue::Undefined | MockValue::Null => false,
			MockValue::Bool(value) => *value,
			MockValue::Number(value) => *value != 0.0 && !value.is_nan(),
			MockValue::String(value) => !value.is_empty(),
			MockValue::Object(_) => true,
		}
	}

	fn receiver(&self) -> &'static str {
		match self {
			MockValue::Undefined => "undefined",
			MockValue::Null => "null",
			MockValue::Bool(_) => "Boolean",
			MockValue::Number(_) => "Number",
			MockValue::String(_) => "String",
			MockValue::Object(object) => object.kind.interface(),
		}
	}

	fn dereference(&self, property: &str) -> Option<&MockObject> {
		match self {
			MockValue::Undefined | MockValue::Null => fault(HostError::NullDereference {
				receiver: self.receiver(),
				property: property.to_owned(),
			}),
			MockValue::Object(object) => Some(object),
			_ => None,
		}
	}
}

impl From<&str> for MockValue {
	fn from(value: &str) -> Self {
		MockValue::String(value.to_owned())
	}
}

impl From<String> for MockValue {
	fn from(value: String) -> Self {
		MockValue::String(value)
	}
}

impl From<bool> for MockValue {
	fn from(value: bool) -> Self {
		MockValue::Bool(value)
	}
}

impl From<f64> for MockValue {
	fn from(value: f64) -> Self {
		MockValue::Number(value)
	}
}

impl HostValue for MockValue {
	type Callback = MockCallback;

	fn global() -> Self {
		realm::current().object(ObjectKind::Window)
	}

	fn null() -> Self {
		MockValue::Null
	}

	fn undefined() -> Self {
		MockValue::Undefined
	}

	fn is_null(&self) -> bool {
		matches!(self, MockValue::Null)
	}

	fn is_undefined(&self) -> bool {
		matches!(self, MockValue::Undefined)
	}

	fn get(&self, name: &str) -> Self {
		match (self.dereference(name), self) {
			(Some(object), _) => object.realm.get(&object.kind, name),
			(None, MockValue::String(value)) if name == "length" => {
				MockValue::Number(value.encode_utf16().count() as f64)
			}
			(None, _) => MockValue::Undefined,
		}
	}

	fn set(&self, name: &str, value: Self) {
		match self.dereference(name) {
			Some(object) => object.realm.set(&object.kind, name, &value),
			None => fault(HostError::UnsupportedProperty {
				receiver: self.receiver(),
				property: name.to_owned(),
			}),
		}
	}

	fn call(&self, method: &str, args: &[Self]) -> Self {
		match self.dereference(method) {
			Some(object) => object.realm.call(&object.kind, method, args),
			None => fault(HostError::NotAFunction {
				receiver: self.receiver(),
				method: method.to_owned(),
			}),
		}
	}

	fn construct(&self, args: &[Self]) -> Self {
		match self {
			MockValue::Object(object) => object.realm.construct(&object.kind, args),
			_ => fault(HostError::NotAConstructor(self.receiver())),
		}
	}

	fn index(&self, index: usize) -> Self {
		match self.dereference("index") {
			Some(MockObject {
				kind: ObjectKind::Collection(items),
				..
			}) => items.get(index).cloned().unwrap_or_default(),
			_ => MockValue::Undefined,
		}
	}

	fn length(&self) -> usize {
		match self.get("length") {
			MockValue::Number(length) if length >= 0.0 => length as usize,
			_ => 0,
		}
	}

	fn as_string(&self) -> Option<String> {
		match self {
			MockValue::String(value) => Some(value.clone()),
			_ => None,
		}
	}

	fn as_bool(&self) -> Option<bool> {
		match self {
			MockValue::Bool(value) => Some(*value),
			_ => None,
		}
	}

	fn callback<F>(f: F) -> MockCallback
	where
		F: FnMut(MockValue) + 'static,
	{
		let realm = realm::current();
		let id = realm.register_function(Box::new(f));
		MockCallback { realm, id }
	}
}

/// A closure registered as a mock host function.
pub struct MockCallback {
	realm: Rc<Realm>,
	id: FunctionId,
}

impl HostCallback<MockValue> for MockCallback {
	fn as_value(&self) -> MockValue {
		self.realm.object(ObjectKind::Function(self.id))
	}

	fn release(self) {
		self.realm.release_function(self.id);
	}
}

impl std::fmt::Debug for MockCallback {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockCallback")
			.field("id", &self.id)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(MockValue::Undefined, "undefined")]
	#[case(MockValue::Null, "null")]
	#[case(MockValue::Bool(true), "true")]
	#[case(MockValue::Number(1.0), "1")]
	#[case(MockValue::Number(1.5), "1.5")]
	#[case(MockValue::from("data"), "data")]
	fn test_to_js_string(#[case] value: MockValue, #[case] expected: &str) {
		assert_eq!(value.to_js_string(), expected);
	}

	#[rstest]
	#[case(MockValue::Undefined, false)]
	#[case(MockValue::Null, false)]
	#[case(MockValue::Bool(false), false)]
	#[case(MockValue::Number(0.0), false)]
	#[case(MockValue::Number(f64::NAN), false)]
	#[case(MockValue::from(""), false)]
	#[case(MockValue::from("0"), true)]
	#[case(MockValue::Number(-1.0), true)]
	fn test_is_truthy(#[case] value: MockValue, #[case] expected: bool) {
		assert_eq!(value.is_truthy(), expected);
	}

	#[rstest]
	fn test_primitive_property_reads() {
		assert_eq!(MockValue::from("héllo").length(), 5);
		assert_eq!(MockValue::Bool(true).get("anything"), MockValue::Undefined);
		assert!(MockValue::Number(3.0).index(0).is_undefined());
	}

	#[rstest]
	#[should_panic(expected = "cannot access property 'id' of null")]
	fn test_null_dereference_faults() {
		MockValue::Null.get("id");
	}

	#[rstest]
	#[should_panic(expected = "cannot access property 'appendChild' of undefined")]
	fn test_undefined_call_faults() {
		MockValue::Undefined.call("appendChild", &[]);
	}

	#[rstest]
	#[should_panic(expected = "no mock host is installed")]
	fn test_global_without_host_faults() {
		MockValue::global();
	}
}
