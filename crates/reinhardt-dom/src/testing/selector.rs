//! Selector subset understood by the mock host.
//!
//! Supported: type and universal selectors, `#id`, `.class`, `[attr]`,
//! `[attr=value]` (bare or quoted value), compound selectors, the descendant
//! (` `) and child (`>`) combinators and `,` groups. Anything else is a
//! `SyntaxError`, as a browser would report for invalid input.

use std::iter::Peekable;
use std::str::Chars;

use super::error::HostError;
use super::realm::NodeId;

/// Read access to the element tree needed for matching.
pub(crate) trait ElementTree {
	fn parent(&self, node: NodeId) -> Option<NodeId>;
	fn local_name(&self, node: NodeId) -> &str;
	fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;
}

/// A parsed, comma-separated selector list.
#[derive(Debug)]
pub(crate) struct SelectorList(Vec<Complex>);

#[derive(Debug)]
struct Complex {
	/// Each combinator relates the previous compound to this one; the first is unused.
	parts: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
	Descendant,
	Child,
}

#[derive(Debug, Default)]
struct Compound {
	tag: Option<String>,
	id: Option<String>,
	classes: Vec<String>,
	attributes: Vec<AttributeMatch>,
}

#[derive(Debug)]
struct AttributeMatch {
	name: String,
	value: Option<String>,
}

impl SelectorList {
	pub(crate) fn parse(input: &str) -> Result<Self, HostError> {
		let invalid = || HostError::InvalidSelector(input.to_owned());
		let groups = split_groups(input).ok_or_else(invalid)?;
		groups
			.into_iter()
			.map(|group| parse_complex(group).ok_or_else(invalid))
			.collect::<Result<Vec<_>, _>>()
			.map(Self)
	}

	pub(crate) fn matches(&self, tree: &impl ElementTree, node: NodeId) -> bool {
		self.0.iter().any(|complex| complex.matches(tree, node))
	}
}

impl Complex {
	fn matches(&self, tree: &impl ElementTree, node: NodeId) -> bool {
		self.matches_at(tree, node, self.parts.len() - 1)
	}

	fn matches_at(&self, tree: &impl ElementTree, node: NodeId, index: usize) -> bool {
		let (combinator, compound) = &self.parts[index];
		if !compound.matches(tree, node) {
			return false;
		}
		if index == 0 {
			return true;
		}
		match combinator {
			Combinator::Child => tree
				.parent(node)
				.is_some_and(|parent| self.matches_at(tree, parent, index - 1)),
			Combinator::Descendant => {
				let mut cursor = tree.parent(node);
				while let Some(ancestor) = cursor {
					if self.matches_at(tree, ancestor, index - 1) {
						return true;
					}
					cursor = tree.parent(ancestor);
				}
				false
			}
		}
	}
}

impl Compound {
	fn matches(&self, tree: &impl ElementTree, node: NodeId) -> bool {
		if let Some(tag) = &self.tag
			&& !tree.local_name(node).eq_ignore_ascii_case(tag)
		{
			return false;
		}
		if let Some(id) = &self.id
			&& tree.attribute(node, "id") != Some(id.as_str())
		{
			return false;
		}
		let classes = tree.attribute(node, "class").unwrap_or_default();
		if !self
			.classes
			.iter()
			.all(|class| classes.split_ascii_whitespace().any(|token| token == class))
		{
			return false;
		}
		self.attributes.iter().all(|attribute| {
			match (tree.attribute(node, &attribute.name), &attribute.value) {
				(Some(actual), Some(expected)) => actual == expected,
				(Some(_), None) => true,
				(None, _) => false,
			}
		})
	}
}

/// Splits on top-level commas, ignoring commas inside brackets or quotes.
fn split_groups(input: &str) -> Option<Vec<&str>> {
	let mut groups = Vec::new();
	let mut start = 0;
	let mut depth = 0usize;
	let mut quote = None;
	for (offset, c) in input.char_indices() {
		match (quote, c) {
			(Some(open), c) if c == open => quote = None,
			(Some(_), _) => {}
			(None, '"' | '\'') => quote = Some(c),
			(None, '[') => depth += 1,
			(None, ']') => depth = depth.checked_sub(1)?,
			(None, ',') if depth == 0 => {
				groups.push(input[start..offset].trim());
				start = offset + 1;
			}
			_ => {}
		}
	}
	groups.push(input[start..].trim());
	(quote.is_none() && depth == 0).then_some(groups)
}

fn parse_complex(source: &str) -> Option<Complex> {
	let mut chars = source.chars().peekable();
	let mut parts = Vec::new();
	let mut combinator = Combinator::Descendant;
	loop {
		skip_whitespace(&mut chars);
		match chars.peek() {
			None => break,
			Some('>') => {
				chars.next();
				if parts.is_empty() || combinator == Combinator::Child {
					return None;
				}
				combinator = Combinator::Child;
				continue;
			}
			Some(_) => {}
		}
		let compound = parse_compound(&mut chars)?;
		parts.push((combinator, compound));
		combinator = Combinator::Descendant;
	}
	// A dangling `>` or an empty group is invalid.
	(!parts.is_empty() && combinator == Combinator::Descendant).then_some(Complex { parts })
}

fn parse_compound(chars: &mut Peekable<Chars<'_>>) -> Option<Compound> {
	let mut compound = Compound::default();
	let mut empty = true;
	if chars.peek() == Some(&'*') {
		chars.next();
		empty = false;
	} else if let Some(name) = identifier(chars) {
		compound.tag = Some(name.to_ascii_lowercase());
		empty = false;
	}
	while let Some(&c) = chars.peek() {
		match c {
			'#' => {
				chars.next();
				compound.id = Some(identifier(chars)?);
			}
			'.' => {
				chars.next();
				compound.classes.push(identifier(chars)?);
			}
			'[' => {
				chars.next();
				compound.attributes.push(attribute(chars)?);
			}
			c if c.is_whitespace() || c == '>' => break,
			_ => return None,
		}
		empty = false;
	}
	(!empty).then_some(compound)
}

fn attribute(chars: &mut Peekable<Chars<'_>>) -> Option<AttributeMatch> {
	skip_whitespace(chars);
	let name = identifier(chars)?.to_ascii_lowercase();
	skip_whitespace(chars);
	match chars.next()? {
		']' => Some(AttributeMatch { name, value: None }),
		'=' => {
			skip_whitespace(chars);
			let value = match chars.peek()? {
				'"' | '\'' => quoted(chars)?,
				_ => identifier(chars)?,
			};
			skip_whitespace(chars);
			(chars.next()? == ']').then_some(AttributeMatch {
				name,
				value: Some(value),
			})
		}
		_ => None,
	}
}

fn quoted(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
	let quote = chars.next()?;
	let mut value = String::new();
	loop {
		match chars.next()? {
			c if c == quote => return Some(value),
			c => value.push(c),
		}
	}
}

fn identifier(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
	let mut name = String::new();
	while let Some(&c) = chars.peek() {
		if c.is_alphanumeric() || c == '-' || c == '_' {
			name.push(c);
			chars.next();
		} else {
			break;
		}
	}
	(!name.is_empty()).then_some(name)
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
	while chars.peek().is_some_and(|c| c.is_whitespace()) {
		chars.next();
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use rstest::rstest;

	use super::*;

	/// `html > body > (section.card#intro[data-kind=note] > p.lead)`
	struct Fixture {
		names: Vec<&'static str>,
		parents: Vec<Option<NodeId>>,
		attributes: Vec<HashMap<&'static str, &'static str>>,
	}

	impl Fixture {
		fn new() -> Self {
			Self {
				names: vec!["html", "body", "section", "p"],
				parents: vec![None, Some(0), Some(1), Some(2)],
				attributes: vec![
					HashMap::new(),
					HashMap::new(),
					HashMap::from([
						("id", "intro"),
						("class", "card wide"),
						("data-kind", "note"),
					]),
					HashMap::from([("class", "lead")]),
				],
			}
		}
	}

	impl ElementTree for Fixture {
		fn parent(&self, node: NodeId) -> Option<NodeId> {
			self.parents[node]
		}

		fn local_name(&self, node: NodeId) -> &str {
			self.names[node]
		}

		fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
			self.attributes[node].get(name).copied()
		}
	}

	#[rstest]
	#[case("section", 2, true)]
	#[case("SECTION", 2, true)]
	#[case("*", 0, true)]
	#[case("#intro", 2, true)]
	#[case(".card", 2, true)]
	#[case(".card.wide", 2, true)]
	#[case(".card.narrow", 2, false)]
	#[case("section#intro.card", 2, true)]
	#[case("[data-kind]", 2, true)]
	#[case("[data-kind=note]", 2, true)]
	#[case("[data-kind='note']", 2, true)]
	#[case("[data-kind=\"other\"]", 2, false)]
	#[case("body p", 3, true)]
	#[case("html p.lead", 3, true)]
	#[case("body > p", 3, false)]
	#[case("section > p", 3, true)]
	#[case("body > section > p", 3, true)]
	#[case("div, p", 3, true)]
	#[case("div, span", 3, false)]
	fn test_selector_matching(
		#[case] selector: &str,
		#[case] node: NodeId,
		#[case] expected: bool,
	) {
		let tree = Fixture::new();
		let list = SelectorList::parse(selector).unwrap();
		assert_eq!(list.matches(&tree, node), expected);
	}

	#[rstest]
	#[case("")]
	#[case("  ")]
	#[case("div,")]
	#[case("> p")]
	#[case("div >")]
	#[case("div > > p")]
	#[case("#")]
	#[case(".")]
	#[case("[data-kind")]
	#[case("[data-kind='note]")]
	#[case("div:hover")]
	fn test_invalid_selectors(#[case] selector: &str) {
		assert_eq!(
			SelectorList::parse(selector).unwrap_err(),
			HostError::InvalidSelector(selector.to_owned())
		);
	}
}
