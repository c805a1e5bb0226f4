//! Match results: capture maps binding pattern variables to matched values.

use rustc_hash::FxHashMap;
use serde_json::Value;

/// A single captured value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Capture<'a> {
    /// A whole AST subnode (or the literal value of a `Literal` node).
    Node(&'a Value),
    /// A string taken from a node field: an identifier name or an operator.
    Str(&'a str),
    /// A contiguous run of call arguments captured by a `??name` marker.
    Slice(&'a [Value]),
    /// The pattern variable matched a field that is absent on the node.
    Missing,
}

impl<'a> Capture<'a> {
    pub fn as_node(&self) -> Option<&'a Value> {
        match self {
            Capture::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Capture::Str(text) => Some(text),
            Capture::Node(node) => node.as_str(),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> Option<&'a [Value]> {
        match self {
            Capture::Slice(nodes) => Some(nodes),
            _ => None,
        }
    }
}

/// Bindings produced by a successful match.
///
/// The empty map means "matched, nothing captured"; failure to match is
/// represented by the absence of a map (`None`), never by an empty one.
/// Merging is left-to-right with last-write-wins on duplicate names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Captures<'a> {
    bindings: FxHashMap<String, Capture<'a>>,
}

impl<'a> Captures<'a> {
    pub fn new() -> Self {
        Captures::default()
    }

    /// A map holding a single binding.
    pub(crate) fn of(name: impl Into<String>, capture: Capture<'a>) -> Self {
        let mut captures = Captures::new();
        captures.bind(name, capture);
        captures
    }

    pub fn bind(&mut self, name: impl Into<String>, capture: Capture<'a>) {
        self.bindings.insert(name.into(), capture);
    }

    /// Folds `other` into `self`; bindings from `other` win on conflict.
    #[must_use]
    pub fn merge(mut self, other: Captures<'a>) -> Captures<'a> {
        self.bindings.extend(other.bindings);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Capture<'a>> {
        self.bindings.get(name)
    }

    pub fn node(&self, name: &str) -> Option<&'a Value> {
        self.get(name)?.as_node()
    }

    pub fn str(&self, name: &str) -> Option<&'a str> {
        self.get(name)?.as_str()
    }

    pub fn slice(&self, name: &str) -> Option<&'a [Value]> {
        self.get(name)?.as_slice()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Capture<'a>)> {
        self.bindings.iter().map(|(name, capture)| (name.as_str(), capture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn merge_is_last_write_wins() {
        let left_node = json!({"type": "Identifier", "name": "a"});
        let right_node = json!({"type": "Identifier", "name": "b"});

        let left = Captures::of("x", Capture::Node(&left_node));
        let mut right = Captures::of("x", Capture::Node(&right_node));
        right.bind("y", Capture::Str("+"));

        let merged = left.merge(right);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.node("x"), Some(&right_node));
        assert_eq!(merged.str("y"), Some("+"));
    }

    #[test]
    fn empty_map_is_a_successful_result() {
        let captures = Captures::new();
        assert!(captures.is_empty());
        assert_eq!(captures.get("anything"), None);
    }

    #[test]
    fn node_capture_exposes_string_values() {
        let literal = json!("foobar");
        let captures = Captures::of("value", Capture::Node(&literal));
        assert_eq!(captures.str("value"), Some("foobar"));
    }
}
