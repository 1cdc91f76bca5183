//! The in-memory document behind a [`MockDom`](super::MockDom).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::error::{HostError, fault};
use super::selector::{ElementTree, SelectorList};
use super::value::{MockObject, MockValue, ObjectKind};

pub(crate) type NodeId = usize;
pub(crate) type EventId = usize;
pub(crate) type FunctionId = usize;

/// The HTML namespace; elements in it report an upper-case `tagName`.
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

thread_local! {
	static CURRENT: RefCell<Option<Rc<Realm>>> = const { RefCell::new(None) };
}

/// Makes `realm` the host global of this thread.
pub(crate) fn install(realm: &Rc<Realm>) {
	CURRENT.with(|current| *current.borrow_mut() = Some(Rc::clone(realm)));
}

/// Clears the host global if it is still `realm`.
pub(crate) fn uninstall(realm: &Rc<Realm>) {
	CURRENT.with(|current| {
		let mut current = current.borrow_mut();
		if current
			.as_ref()
			.is_some_and(|installed| Rc::ptr_eq(installed, realm))
		{
			*current = None;
		}
	});
}

/// Returns the host global of this thread.
pub(crate) fn current() -> Rc<Realm> {
	CURRENT
		.with(|current| current.borrow().clone())
		.unwrap_or_else(|| fault(HostError::NoGlobal))
}

/// An object that can receive events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Target {
	Window,
	Document,
	Element(NodeId),
}

type Closure = Rc<RefCell<Box<dyn FnMut(MockValue)>>>;

pub(crate) struct Realm {
	state: RefCell<State>,
}

struct State {
	elements: Vec<ElementData>,
	root: NodeId,
	head: NodeId,
	body: NodeId,
	events: Vec<EventData>,
	/// `None` once released.
	functions: Vec<Option<Closure>>,
	listeners: HashMap<Target, Vec<Listener>>,
}

struct ElementData {
	namespace: String,
	local_name: String,
	attributes: Vec<(String, String)>,
	style: Vec<Declaration>,
	content: Content,
	children: Vec<NodeId>,
	parent: Option<NodeId>,
}

/// Character content set through `textContent` or `innerHTML`.
///
/// Markup is stored verbatim; the mock host does not parse it into elements.
enum Content {
	Text(String),
	Markup(String),
}

struct Declaration {
	property: String,
	value: String,
	important: bool,
}

struct EventData {
	event_type: String,
	bubbles: bool,
	cancelable: bool,
	canceled: bool,
	stopped: bool,
	stopped_immediately: bool,
	dispatching: bool,
	target: Option<Target>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Listener {
	event: String,
	capture: bool,
	function: FunctionId,
}

impl ElementData {
	fn new(namespace: &str, local_name: &str) -> Self {
		Self {
			namespace: namespace.to_owned(),
			local_name: local_name.to_owned(),
			attributes: Vec::new(),
			style: Vec::new(),
			content: Content::Text(String::new()),
			children: Vec::new(),
			parent: None,
		}
	}

	fn is_html(&self) -> bool {
		self.namespace == HTML_NAMESPACE
	}

	fn tag_name(&self) -> String {
		if self.is_html() {
			self.local_name.to_ascii_uppercase()
		} else {
			self.local_name.clone()
		}
	}

	fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(attribute, _)| attribute == name)
			.map(|(_, value)| value.as_str())
	}

	fn set_attribute(&mut self, name: &str, value: String) {
		match self
			.attributes
			.iter_mut()
			.find(|(attribute, _)| attribute == name)
		{
			Some((_, existing)) => *existing = value,
			None => self.attributes.push((name.to_owned(), value)),
		}
	}

	fn remove_attribute(&mut self, name: &str) {
		self.attributes.retain(|(attribute, _)| attribute != name);
	}

	/// Attribute names are lower-cased on HTML elements.
	fn attribute_name(&self, name: &str) -> String {
		if self.is_html() {
			name.to_ascii_lowercase()
		} else {
			name.to_owned()
		}
	}

	fn class_tokens(&self) -> Vec<String> {
		let mut tokens: Vec<String> = Vec::new();
		for token in self
			.attribute("class")
			.unwrap_or_default()
			.split_ascii_whitespace()
		{
			if !tokens.iter().any(|existing| existing == token) {
				tokens.push(token.to_owned());
			}
		}
		tokens
	}
}

impl ElementTree for State {
	fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.elements[node].parent
	}

	fn local_name(&self, node: NodeId) -> &str {
		&self.elements[node].local_name
	}

	fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
		self.elements[node].attribute(name)
	}
}

impl State {
	fn new() -> Self {
		let mut state = Self {
			elements: Vec::new(),
			root: 0,
			head: 0,
			body: 0,
			events: Vec::new(),
			functions: Vec::new(),
			listeners: HashMap::new(),
		};
		state.root = state.create_element(HTML_NAMESPACE, "html");
		state.head = state.create_element(HTML_NAMESPACE, "head");
		state.body = state.create_element(HTML_NAMESPACE, "body");
		state.append(state.root, state.head);
		state.append(state.root, state.body);
		state
	}

	fn create_element(&mut self, namespace: &str, local_name: &str) -> NodeId {
		self.elements.push(ElementData::new(namespace, local_name));
		self.elements.len() - 1
	}

	fn append(&mut self, parent: NodeId, child: NodeId) {
		self.detach(child);
		self.elements[parent].children.push(child);
		self.elements[child].parent = Some(parent);
	}

	fn detach(&mut self, node: NodeId) {
		if let Some(parent) = self.elements[node].parent.take() {
			self.elements[parent]
				.children
				.retain(|&child| child != node);
		}
	}

	fn replace_content(&mut self, node: NodeId, content: Content) {
		for child in std::mem::take(&mut self.elements[node].children) {
			self.elements[child].parent = None;
		}
		self.elements[node].content = content;
	}

	fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
		let mut cursor = Some(node);
		while let Some(current) = cursor {
			if current == ancestor {
				return true;
			}
			cursor = self.elements[current].parent;
		}
		false
	}

	fn is_connected(&self, node: NodeId) -> bool {
		self.is_inclusive_ancestor(self.root, node)
	}

	/// Descendants of `node` in tree order, excluding `node`.
	fn descendants(&self, node: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		self.collect_descendants(node, &mut out);
		out
	}

	fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
		for &child in &self.elements[node].children {
			out.push(child);
			self.collect_descendants(child, out);
		}
	}

	/// Elements in tree order under the document, starting with the root.
	fn document_elements(&self) -> Vec<NodeId> {
		let mut out = vec![self.root];
		self.collect_descendants(self.root, &mut out);
		out
	}

	fn text_content(&self, node: NodeId) -> String {
		let element = &self.elements[node];
		let mut text = match &element.content {
			Content::Text(text) => text.clone(),
			Content::Markup(markup) => strip_tags(markup),
		};
		for &child in &element.children {
			text.push_str(&self.text_content(child));
		}
		text
	}

	fn inner_html(&self, node: NodeId) -> String {
		let mut out = String::new();
		self.write_content(node, &mut out);
		out
	}

	fn write_content(&self, node: NodeId, out: &mut String) {
		let element = &self.elements[node];
		match &element.content {
			Content::Text(text) => escape_into(text, false, out),
			Content::Markup(markup) => out.push_str(markup),
		}
		for &child in &element.children {
			self.write_element(child, out);
		}
	}

	fn write_element(&self, node: NodeId, out: &mut String) {
		let element = &self.elements[node];
		out.push('<');
		out.push_str(&element.local_name);
		for (name, value) in &element.attributes {
			out.push(' ');
			out.push_str(name);
			out.push_str("=\"");
			escape_into(value, true, out);
			out.push('"');
		}
		out.push('>');
		if element.is_html() && VOID_ELEMENTS.contains(&element.local_name.as_str()) {
			return;
		}
		self.write_content(node, out);
		out.push_str("</");
		out.push_str(&element.local_name);
		out.push('>');
	}

	/// Targets from the outermost ancestor down to `target`.
	fn propagation_path(&self, target: Target) -> Vec<Target> {
		match target {
			Target::Window => vec![Target::Window],
			Target::Document => vec![Target::Window, Target::Document],
			Target::Element(node) => {
				let mut path = vec![Target::Element(node)];
				let mut top = node;
				while let Some(parent) = self.elements[top].parent {
					path.push(Target::Element(parent));
					top = parent;
				}
				if top == self.root {
					path.push(Target::Document);
					path.push(Target::Window);
				}
				path.reverse();
				path
			}
		}
	}
}

impl Realm {
	pub(crate) fn new() -> Rc<Self> {
		Rc::new(Self {
			state: RefCell::new(State::new()),
		})
	}

	pub(crate) fn object(self: &Rc<Self>, kind: ObjectKind) -> MockValue {
		MockValue::Object(MockObject {
			realm: Rc::clone(self),
			kind,
		})
	}

	fn element(self: &Rc<Self>, node: NodeId) -> MockValue {
		self.object(ObjectKind::Element(node))
	}

	pub(crate) fn target_value(self: &Rc<Self>, target: Target) -> MockValue {
		match target {
			Target::Window => self.object(ObjectKind::Window),
			Target::Document => self.object(ObjectKind::Document),
			Target::Element(node) => self.element(node),
		}
	}

	/// Resolves `value` to an object of this realm.
	pub(crate) fn own<'v>(self: &Rc<Self>, value: &'v MockValue) -> Option<&'v ObjectKind> {
		match value {
			MockValue::Object(object) if Rc::ptr_eq(&object.realm, self) => Some(&object.kind),
			MockValue::Object(_) => fault(HostError::ForeignRealm),
			_ => None,
		}
	}

	pub(crate) fn target_of(self: &Rc<Self>, value: &MockValue) -> Option<Target> {
		match self.own(value)? {
			ObjectKind::Window => Some(Target::Window),
			ObjectKind::Document => Some(Target::Document),
			ObjectKind::Element(node) => Some(Target::Element(*node)),
			_ => None,
		}
	}

	pub(crate) fn get(self: &Rc<Self>, kind: &ObjectKind, name: &str) -> MockValue {
		match kind {
			ObjectKind::Window => match name {
				"window" | "self" => self.object(ObjectKind::Window),
				"document" => self.object(ObjectKind::Document),
				"Event" => self.object(ObjectKind::EventConstructor),
				_ => MockValue::Undefined,
			},
			ObjectKind::Document => {
				let state = self.state.borrow();
				match name {
					"documentElement" => self.element(state.root),
					"head" => self.element(state.head),
					"body" => self.element(state.body),
					_ => MockValue::Undefined,
				}
			}
			ObjectKind::Element(node) => self.element_property(*node, name),
			ObjectKind::ClassList(node) => {
				let state = self.state.borrow();
				let element = &state.elements[*node];
				match name {
					"length" => MockValue::Number(element.class_tokens().len() as f64),
					"value" => MockValue::from(element.attribute("class").unwrap_or_default()),
					_ => MockValue::Undefined,
				}
			}
			ObjectKind::Style(node) => match name {
				"length" => {
					MockValue::Number(self.state.borrow().elements[*node].style.len() as f64)
				}
				_ => MockValue::Undefined,
			},
			ObjectKind::Dataset(node) => self.state.borrow().elements[*node]
				.attribute(&dataset_attribute(name))
				.map_or(MockValue::Undefined, MockValue::from),
			ObjectKind::Collection(items) => match name {
				"length" => MockValue::Number(items.len() as f64),
				_ => MockValue::Undefined,
			},
			ObjectKind::Event(id) => self.event_property(*id, name),
			ObjectKind::EventConstructor | ObjectKind::Function(_) => MockValue::Undefined,
		}
	}

	fn element_property(self: &Rc<Self>, node: NodeId, name: &str) -> MockValue {
		let state = self.state.borrow();
		let element = &state.elements[node];
		match name {
			"id" => MockValue::from(element.attribute("id").unwrap_or_default()),
			"className" => MockValue::from(element.attribute("class").unwrap_or_default()),
			"tagName" | "nodeName" => MockValue::String(element.tag_name()),
			"localName" => MockValue::from(element.local_name.as_str()),
			"namespaceURI" => MockValue::from(element.namespace.as_str()),
			"innerHTML" => MockValue::String(state.inner_html(node)),
			"textContent" => MockValue::String(state.text_content(node)),
			"isConnected" => MockValue::Bool(state.is_connected(node)),
			"childElementCount" => MockValue::Number(element.children.len() as f64),
			"classList" => self.object(ObjectKind::ClassList(node)),
			"style" => self.object(ObjectKind::Style(node)),
			"dataset" => self.object(ObjectKind::Dataset(node)),
			"children" => self.object(ObjectKind::Collection(
				element
					.children
					.iter()
					.map(|&child| self.element(child))
					.collect(),
			)),
			"parentElement" => element
				.parent
				.map_or(MockValue::Null, |parent| self.element(parent)),
			_ => MockValue::Undefined,
		}
	}

	fn event_property(self: &Rc<Self>, id: EventId, name: &str) -> MockValue {
		let state = self.state.borrow();
		let event = &state.events[id];
		match name {
			"type" => MockValue::from(event.event_type.as_str()),
			"bubbles" => MockValue::Bool(event.bubbles),
			"cancelable" => MockValue::Bool(event.cancelable),
			"defaultPrevented" => MockValue::Bool(event.canceled),
			"target" => event
				.target
				.map_or(MockValue::Null, |target| self.target_value(target)),
			_ => MockValue::Undefined,
		}
	}

	pub(crate) fn set(self: &Rc<Self>, kind: &ObjectKind, name: &str, value: &MockValue) {
		let mut state = self.state.borrow_mut();
		match (kind, name) {
			(ObjectKind::Element(node), "id") => {
				state.elements[*node].set_attribute("id", value.to_js_string());
			}
			(ObjectKind::Element(node), "className") => {
				state.elements[*node].set_attribute("class", value.to_js_string());
			}
			(ObjectKind::Element(node), "innerHTML") => {
				state.replace_content(*node, Content::Markup(value.to_js_string()));
			}
			(ObjectKind::Element(node), "textContent") => {
				state.replace_content(*node, Content::Text(value.to_js_string()));
			}
			(ObjectKind::Dataset(node), _) => {
				state.elements[*node].set_attribute(&dataset_attribute(name), value.to_js_string());
			}
			_ => fault(HostError::UnsupportedProperty {
				receiver: kind.interface(),
				property: name.to_owned(),
			}),
		}
	}

	pub(crate) fn call(
		self: &Rc<Self>,
		kind: &ObjectKind,
		method: &str,
		args: &[MockValue],
	) -> MockValue {
		let target = match kind {
			ObjectKind::Window => Some(Target::Window),
			ObjectKind::Document => Some(Target::Document),
			ObjectKind::Element(node) => Some(Target::Element(*node)),
			_ => None,
		};
		if let Some(target) = target {
			match method {
				"addEventListener" => return self.add_listener(target, args),
				"removeEventListener" => return self.remove_listener(target, args),
				"dispatchEvent" => return self.dispatch(target, args),
				"isSameNode" => {
					let other = args.first().and_then(|value| self.target_of(value));
					return MockValue::Bool(other == Some(target) && target != Target::Window);
				}
				_ => {}
			}
		}
		match kind {
			ObjectKind::Document => self.call_document(method, args),
			ObjectKind::Element(node) => self.call_element(*node, method, args),
			ObjectKind::ClassList(node) => self.call_class_list(*node, method, args),
			ObjectKind::Style(node) => self.call_style(*node, method, args),
			ObjectKind::Event(id) => self.call_event(*id, method),
			_ => not_a_function(kind, method),
		}
	}

	pub(crate) fn construct(self: &Rc<Self>, kind: &ObjectKind, args: &[MockValue]) -> MockValue {
		match kind {
			ObjectKind::EventConstructor => {
				let event_type = string_arg("Event", args, 0);
				self.create_event(&event_type, false, false)
			}
			_ => fault(HostError::NotAConstructor(kind.interface())),
		}
	}

	fn call_document(self: &Rc<Self>, method: &str, args: &[MockValue]) -> MockValue {
		match method {
			"getElementById" => {
				let id = string_arg(method, args, 0);
				let state = self.state.borrow();
				state
					.document_elements()
					.into_iter()
					.find(|&node| state.elements[node].attribute("id") == Some(id.as_str()))
					.map_or(MockValue::Null, |node| self.element(node))
			}
			"querySelector" => self.query_first(None, &string_arg(method, args, 0)),
			"querySelectorAll" => self.query_all(None, &string_arg(method, args, 0)),
			"createElement" => {
				let tag = string_arg(method, args, 0).to_ascii_lowercase();
				let node = self.state.borrow_mut().create_element(HTML_NAMESPACE, &tag);
				self.element(node)
			}
			"createElementNS" => {
				let namespace = match args.first() {
					Some(MockValue::Null) | None => String::new(),
					Some(value) => value.to_js_string(),
				};
				let tag = string_arg(method, args, 1);
				let node = self.state.borrow_mut().create_element(&namespace, &tag);
				self.element(node)
			}
			_ => not_a_function(&ObjectKind::Document, method),
		}
	}

	fn call_element(self: &Rc<Self>, node: NodeId, method: &str, args: &[MockValue]) -> MockValue {
		match method {
			"querySelector" => self.query_first(Some(node), &string_arg(method, args, 0)),
			"querySelectorAll" => self.query_all(Some(node), &string_arg(method, args, 0)),
			"appendChild" => {
				let child = self.element_arg(method, args);
				let mut state = self.state.borrow_mut();
				if state.is_inclusive_ancestor(child, node) {
					fault(HostError::HierarchyRequest);
				}
				state.append(node, child);
				args[0].clone()
			}
			"removeChild" => {
				let child = self.element_arg(method, args);
				let mut state = self.state.borrow_mut();
				if state.elements[child].parent != Some(node) {
					fault(HostError::NotAChild);
				}
				state.detach(child);
				args[0].clone()
			}
			"setAttribute" => {
				let value = string_arg(method, args, 1);
				let mut state = self.state.borrow_mut();
				let element = &mut state.elements[node];
				let name = element.attribute_name(&string_arg(method, args, 0));
				element.set_attribute(&name, value);
				MockValue::Undefined
			}
			"getAttribute" => {
				let state = self.state.borrow();
				let element = &state.elements[node];
				element
					.attribute(&element.attribute_name(&string_arg(method, args, 0)))
					.map_or(MockValue::Null, MockValue::from)
			}
			"hasAttribute" => {
				let state = self.state.borrow();
				let element = &state.elements[node];
				let name = element.attribute_name(&string_arg(method, args, 0));
				MockValue::Bool(element.attribute(&name).is_some())
			}
			"removeAttribute" => {
				let mut state = self.state.borrow_mut();
				let element = &mut state.elements[node];
				let name = element.attribute_name(&string_arg(method, args, 0));
				element.remove_attribute(&name);
				MockValue::Undefined
			}
			_ => not_a_function(&ObjectKind::Element(node), method),
		}
	}

	fn call_class_list(
		self: &Rc<Self>,
		node: NodeId,
		method: &str,
		args: &[MockValue],
	) -> MockValue {
		match method {
			"contains" => {
				let token = string_arg(method, args, 0);
				let state = self.state.borrow();
				MockValue::Bool(state.elements[node].class_tokens().contains(&token))
			}
			"add" | "remove" => {
				let tokens: Vec<String> = args.iter().map(MockValue::to_js_string).collect();
				for token in &tokens {
					validate_token(token);
				}
				let mut state = self.state.borrow_mut();
				let element = &mut state.elements[node];
				let mut set = element.class_tokens();
				if method == "add" {
					for token in tokens {
						if !set.contains(&token) {
							set.push(token);
						}
					}
				} else {
					set.retain(|existing| !tokens.contains(existing));
				}
				// The update steps leave a missing attribute missing when the set is empty.
				if element.attribute("class").is_some() || !set.is_empty() {
					element.set_attribute("class", set.join(" "));
				}
				MockValue::Undefined
			}
			_ => not_a_function(&ObjectKind::ClassList(node), method),
		}
	}

	fn call_style(self: &Rc<Self>, node: NodeId, method: &str, args: &[MockValue]) -> MockValue {
		let property = property_name(&string_arg(method, args, 0));
		let mut state = self.state.borrow_mut();
		let style = &mut state.elements[node].style;
		let position = style
			.iter()
			.position(|declaration| declaration.property == property);
		match method {
			"setProperty" => {
				let value = args.get(1).map(MockValue::to_js_string).unwrap_or_default();
				let priority = args.get(2).map(MockValue::to_js_string).unwrap_or_default();
				if value.is_empty() {
					if let Some(position) = position {
						style.remove(position);
					}
					return MockValue::Undefined;
				}
				let important = priority.eq_ignore_ascii_case("important");
				if !priority.is_empty() && !important {
					return MockValue::Undefined;
				}
				match position {
					Some(position) => {
						style[position].value = value;
						style[position].important = important;
					}
					None => style.push(Declaration {
						property,
						value,
						important,
					}),
				}
				MockValue::Undefined
			}
			"getPropertyValue" => MockValue::String(
				position.map_or_else(String::new, |position| style[position].value.clone()),
			),
			"getPropertyPriority" => MockValue::from(
				if position.is_some_and(|position| style[position].important) {
					"important"
				} else {
					""
				},
			),
			"removeProperty" => MockValue::String(
				position.map_or_else(String::new, |position| style.remove(position).value),
			),
			_ => not_a_function(&ObjectKind::Style(node), method),
		}
	}

	fn call_event(self: &Rc<Self>, id: EventId, method: &str) -> MockValue {
		let mut state = self.state.borrow_mut();
		let event = &mut state.events[id];
		match method {
			"preventDefault" => event.canceled |= event.cancelable,
			"stopPropagation" => event.stopped = true,
			"stopImmediatePropagation" => {
				event.stopped = true;
				event.stopped_immediately = true;
			}
			_ => not_a_function(&ObjectKind::Event(id), method),
		}
		MockValue::Undefined
	}

	fn query_first(self: &Rc<Self>, scope: Option<NodeId>, selector: &str) -> MockValue {
		self.query(scope, selector)
			.first()
			.map_or(MockValue::Null, |&node| self.element(node))
	}

	fn query_all(self: &Rc<Self>, scope: Option<NodeId>, selector: &str) -> MockValue {
		let items = self
			.query(scope, selector)
			.into_iter()
			.map(|node| self.element(node))
			.collect();
		self.object(ObjectKind::Collection(items))
	}

	fn query(&self, scope: Option<NodeId>, selector: &str) -> Vec<NodeId> {
		let selectors = SelectorList::parse(selector).unwrap_or_else(|error| fault(error));
		let state = self.state.borrow();
		let candidates = match scope {
			Some(node) => state.descendants(node),
			None => state.document_elements(),
		};
		candidates
			.into_iter()
			.filter(|&node| selectors.matches(&*state, node))
			.collect()
	}

	fn element_arg(self: &Rc<Self>, method: &str, args: &[MockValue]) -> NodeId {
		match args.first().and_then(|value| self.own(value)) {
			Some(ObjectKind::Element(node)) => *node,
			_ => fault(HostError::InvalidArgument(format!(
				"{method}: parameter 1 is not of type 'Node'"
			))),
		}
	}

	pub(crate) fn create_event(
		self: &Rc<Self>,
		event_type: &str,
		bubbles: bool,
		cancelable: bool,
	) -> MockValue {
		let mut state = self.state.borrow_mut();
		state.events.push(EventData {
			event_type: event_type.to_owned(),
			bubbles,
			cancelable,
			canceled: false,
			stopped: false,
			stopped_immediately: false,
			dispatching: false,
			target: None,
		});
		let id = state.events.len() - 1;
		drop(state);
		self.object(ObjectKind::Event(id))
	}

	pub(crate) fn register_function(&self, function: Box<dyn FnMut(MockValue)>) -> FunctionId {
		let mut state = self.state.borrow_mut();
		state.functions.push(Some(Rc::new(RefCell::new(function))));
		state.functions.len() - 1
	}

	pub(crate) fn release_function(&self, id: FunctionId) {
		let released = self
			.state
			.borrow_mut()
			.functions
			.get_mut(id)
			.and_then(Option::take);
		// Dropped outside the borrow: the closure may own values of this realm.
		drop(released);
	}

	pub(crate) fn live_functions(&self) -> usize {
		self.state
			.borrow()
			.functions
			.iter()
			.filter(|slot| slot.is_some())
			.count()
	}

	pub(crate) fn listener_count(&self, target: Target, event: &str) -> usize {
		self.state
			.borrow()
			.listeners
			.get(&target)
			.map_or(0, |listeners| {
				listeners
					.iter()
					.filter(|listener| listener.event == event)
					.count()
			})
	}

	pub(crate) fn is_registered(
		&self,
		target: Target,
		event: &str,
		capture: bool,
		function: FunctionId,
	) -> bool {
		let listener = Listener {
			event: event.to_owned(),
			capture,
			function,
		};
		self.state
			.borrow()
			.listeners
			.get(&target)
			.is_some_and(|listeners| listeners.contains(&listener))
	}

	pub(crate) fn function_of(self: &Rc<Self>, value: &MockValue) -> Option<FunctionId> {
		match self.own(value)? {
			ObjectKind::Function(id) => Some(*id),
			_ => None,
		}
	}

	/// Parses `(type, callback, capture)`; `None` for a null callback.
	fn listener_args(self: &Rc<Self>, method: &str, args: &[MockValue]) -> Option<Listener> {
		let event = string_arg(method, args, 0);
		let function = match args.get(1) {
			None | Some(MockValue::Null) | Some(MockValue::Undefined) => return None,
			Some(value) => self.function_of(value).unwrap_or_else(|| {
				fault(HostError::InvalidArgument(format!(
					"{method}: parameter 2 is not of type 'EventListener'"
				)))
			}),
		};
		let capture = args.get(2).is_some_and(MockValue::is_truthy);
		Some(Listener {
			event,
			capture,
			function,
		})
	}

	fn add_listener(self: &Rc<Self>, target: Target, args: &[MockValue]) -> MockValue {
		if let Some(listener) = self.listener_args("addEventListener", args) {
			let mut state = self.state.borrow_mut();
			let listeners = state.listeners.entry(target).or_default();
			if !listeners.contains(&listener) {
				listeners.push(listener);
			}
		}
		MockValue::Undefined
	}

	fn remove_listener(self: &Rc<Self>, target: Target, args: &[MockValue]) -> MockValue {
		if let Some(listener) = self.listener_args("removeEventListener", args) {
			let mut state = self.state.borrow_mut();
			if let Some(listeners) = state.listeners.get_mut(&target) {
				listeners.retain(|existing| *existing != listener);
			}
		}
		MockValue::Undefined
	}

	fn dispatch(self: &Rc<Self>, target: Target, args: &[MockValue]) -> MockValue {
		let event_value = args.first().cloned().unwrap_or_default();
		let id = match self.own(&event_value) {
			Some(ObjectKind::Event(id)) => *id,
			_ => fault(HostError::InvalidArgument(
				"dispatchEvent: parameter 1 is not of type 'Event'".to_owned(),
			)),
		};
		let (path, bubbles) = {
			let mut state = self.state.borrow_mut();
			let event = &mut state.events[id];
			if event.dispatching {
				fault(HostError::InvalidArgument(
					"dispatchEvent: the event is already being dispatched".to_owned(),
				));
			}
			event.dispatching = true;
			event.target = Some(target);
			let bubbles = event.bubbles;
			(state.propagation_path(target), bubbles)
		};
		let ancestors = &path[..path.len() - 1];

		for &current in ancestors {
			self.invoke_listeners(current, id, &event_value, true);
		}
		self.invoke_listeners(target, id, &event_value, true);
		self.invoke_listeners(target, id, &event_value, false);
		if bubbles {
			for &current in ancestors.iter().rev() {
				self.invoke_listeners(current, id, &event_value, false);
			}
		}

		let mut state = self.state.borrow_mut();
		let event = &mut state.events[id];
		event.dispatching = false;
		event.stopped = false;
		event.stopped_immediately = false;
		MockValue::Bool(!event.canceled)
	}

	/// Invokes the listeners of `current` whose capture flag equals `capture`.
	fn invoke_listeners(&self, current: Target, id: EventId, event: &MockValue, capture: bool) {
		let snapshot: Vec<Listener> = {
			let state = self.state.borrow();
			if state.events[id].stopped {
				return;
			}
			let event_type = &state.events[id].event_type;
			state
				.listeners
				.get(&current)
				.map(|listeners| {
					listeners
						.iter()
						.filter(|listener| {
							&listener.event == event_type && listener.capture == capture
						})
						.cloned()
						.collect()
				})
				.unwrap_or_default()
		};

		for listener in snapshot {
			let closure = {
				let state = self.state.borrow();
				if state.events[id].stopped_immediately {
					break;
				}
				// Listeners removed earlier in this dispatch are skipped.
				if !state
					.listeners
					.get(&current)
					.is_some_and(|listeners| listeners.contains(&listener))
				{
					continue;
				}
				match state.functions.get(listener.function) {
					Some(Some(closure)) => Rc::clone(closure),
					_ => fault(HostError::ReleasedCallback(listener.function)),
				}
			};
			let mut function = closure.borrow_mut();
			(*function)(event.clone());
		}
	}
}

fn not_a_function(kind: &ObjectKind, method: &str) -> ! {
	fault(HostError::NotAFunction {
		receiver: kind.interface(),
		method: method.to_owned(),
	})
}

fn string_arg(method: &str, args: &[MockValue], index: usize) -> String {
	match args.get(index) {
		Some(value) => value.to_js_string(),
		None => fault(HostError::InvalidArgument(format!(
			"{method}: {} argument(s) required, but only {} present",
			index + 1,
			args.len()
		))),
	}
}

fn validate_token(token: &str) {
	if token.is_empty() {
		fault(HostError::EmptyToken);
	}
	if token.chars().any(|c| c.is_ascii_whitespace()) {
		fault(HostError::InvalidToken(token.to_owned()));
	}
}

/// CSS property names are ASCII case-insensitive except custom properties.
fn property_name(property: &str) -> String {
	if property.starts_with("--") {
		property.to_owned()
	} else {
		property.to_ascii_lowercase()
	}
}

/// Maps a `dataset` key to its attribute: `fooBar` is `data-foo-bar`.
fn dataset_attribute(name: &str) -> String {
	let mut attribute = String::from("data-");
	for c in name.chars() {
		if c.is_ascii_uppercase() {
			attribute.push('-');
			attribute.push(c.to_ascii_lowercase());
		} else {
			attribute.push(c);
		}
	}
	attribute
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'"' if attribute => out.push_str("&quot;"),
			'<' if !attribute => out.push_str("&lt;"),
			'>' if !attribute => out.push_str("&gt;"),
			'\u{a0}' => out.push_str("&nbsp;"),
			c => out.push(c),
		}
	}
}

fn strip_tags(markup: &str) -> String {
	let mut text = String::with_capacity(markup.len());
	let mut in_tag = false;
	for c in markup.chars() {
		match c {
			'<' => in_tag = true,
			'>' if in_tag => in_tag = false,
			c if !in_tag => text.push(c),
			_ => {}
		}
	}
	text
}
