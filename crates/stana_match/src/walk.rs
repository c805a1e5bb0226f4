//! Depth-first traversal over ESTree JSON.
//!
//! Every object in the tree is visited; arrays are transparent and their
//! elements visit individually. The `loc` and `range` annotation fields are
//! never descended into.

use serde_json::Value;

/// Visitor verdict for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Descend into this node's children.
    Continue,
    /// Keep walking, but skip this node's children.
    Skip,
    /// Abort the whole traversal.
    Stop,
}

/// Walks `root` depth-first, calling `visitor` on every object node.
///
/// The visitor receives references that live as long as `root`, so captures
/// taken from visited nodes may be collected outside the walk.
pub fn walk<'a, F>(root: &'a Value, visitor: &mut F)
where
    F: FnMut(&'a Value) -> Visit,
{
    let _ = walk_value(root, visitor);
}

// Returns false once the visitor said Stop.
fn walk_value<'a, F>(value: &'a Value, visitor: &mut F) -> bool
where
    F: FnMut(&'a Value) -> Visit,
{
    match value {
        Value::Array(items) => items.iter().all(|item| walk_value(item, visitor)),
        Value::Object(_) => walk_node(value, visitor),
        _ => true,
    }
}

fn walk_node<'a, F>(node: &'a Value, visitor: &mut F) -> bool
where
    F: FnMut(&'a Value) -> Visit,
{
    match visitor(node) {
        Visit::Stop => return false,
        Visit::Skip => return true,
        Visit::Continue => {}
    }
    let Some(fields) = node.as_object() else {
        return true;
    };
    for (key, child) in fields {
        if key == "loc" || key == "range" {
            continue;
        }
        if !walk_value(child, visitor) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn program() -> Value {
        json!({
            "type": "Program",
            "loc": {"start": {"type": "Bogus"}},
            "body": [{
                "type": "ExpressionStatement",
                "expression": {
                    "type": "CallExpression",
                    "callee": {"type": "Identifier", "name": "alert"},
                    "arguments": [{"type": "Literal", "value": "hi"}],
                },
            }],
        })
    }

    fn visited_types(root: &Value, verdict: impl Fn(&Value) -> Visit) -> Vec<String> {
        let mut types = Vec::new();
        let mut visitor = |node: &Value| {
            if let Some(ty) = node.get("type").and_then(Value::as_str) {
                types.push(ty.to_string());
            }
            verdict(node)
        };
        walk(root, &mut visitor);
        types
    }

    #[test]
    fn visits_every_node_outside_loc() {
        let mut types = visited_types(&program(), |_| Visit::Continue);
        types.sort();
        assert_eq!(
            types,
            vec!["CallExpression", "ExpressionStatement", "Identifier", "Literal", "Program"]
        );
        assert!(!types.contains(&"Bogus".to_string()), "loc subtree must not be visited");
    }

    #[test]
    fn skip_prunes_a_subtree() {
        let types = visited_types(&program(), |node| {
            if node.get("type").and_then(Value::as_str) == Some("CallExpression") {
                Visit::Skip
            } else {
                Visit::Continue
            }
        });
        assert!(types.contains(&"CallExpression".to_string()));
        assert!(!types.contains(&"Identifier".to_string()));
        assert!(!types.contains(&"Literal".to_string()));
    }

    #[test]
    fn stop_aborts_the_walk() {
        let types = visited_types(&program(), |node| {
            if node.get("type").and_then(Value::as_str) == Some("ExpressionStatement") {
                Visit::Stop
            } else {
                Visit::Continue
            }
        });
        assert_eq!(types, vec!["Program", "ExpressionStatement"]);
    }
}
