//! The compiled-matcher type and node-access helpers.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::capture::Captures;

/// A node argument during matching. `None` models an absent field
/// (JavaScript `undefined`); `Some(Value::Null)` models a `null` node.
pub type NodeArg<'a> = Option<&'a Value>;

type MatchFn = dyn for<'a> Fn(NodeArg<'a>) -> Option<Captures<'a>> + Send + Sync;

/// A compiled pattern: a pure function from an AST node to either a capture
/// map or failure.
///
/// Matchers hold no mutable state; they are cheap to clone (shared behind an
/// `Arc`) and safe to apply concurrently from any number of threads.
#[derive(Clone)]
pub struct Matcher {
    run: Arc<MatchFn>,
}

impl Matcher {
    /// Wraps a raw matching closure. This is the escape hatch for custom
    /// operators registered on a [`Context`](crate::Context).
    pub fn from_fn(
        run: impl for<'a> Fn(NodeArg<'a>) -> Option<Captures<'a>> + Send + Sync + 'static,
    ) -> Self {
        Matcher { run: Arc::new(run) }
    }

    /// The universal matcher: accepts any node, captures nothing.
    pub fn any() -> Self {
        Matcher::from_fn(|_| Some(Captures::new()))
    }

    /// Applies the matcher to `node`, returning captures on success.
    pub fn captures<'a>(&self, node: &'a Value) -> Option<Captures<'a>> {
        (self.run)(Some(node))
    }

    pub fn is_match(&self, node: &Value) -> bool {
        self.captures(node).is_some()
    }

    /// Applies to a possibly-absent field value.
    pub fn apply<'a>(&self, node: NodeArg<'a>) -> Option<Captures<'a>> {
        (self.run)(node)
    }

    /// Succeeds with no captures exactly when `self` fails.
    pub(crate) fn negate(self) -> Matcher {
        Matcher::from_fn(move |node| match self.apply(node) {
            Some(_) => None,
            None => Some(Captures::new()),
        })
    }

    /// Whether two matchers share the same compiled closure.
    pub(crate) fn same_as(&self, other: &Matcher) -> bool {
        Arc::ptr_eq(&self.run, &other.run)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Matcher(..)")
    }
}

/// The node's `type` discriminant, if it has one.
pub(crate) fn node_type(node: &Value) -> Option<&str> {
    node.get("type")?.as_str()
}

pub(crate) fn has_type(node: &Value, ty: &str) -> bool {
    node_type(node) == Some(ty)
}

/// A named child field. Absent fields come back as `None`, which downstream
/// matchers treat as `undefined` and fail on gracefully.
pub(crate) fn field<'a>(node: &'a Value, name: &str) -> Option<&'a Value> {
    node.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn any_matches_everything() {
        let any = Matcher::any();
        assert!(any.is_match(&json!(null)));
        assert!(any.is_match(&json!(42)));
        assert!(any.is_match(&json!({"type": "Identifier", "name": "x"})));
        assert!(any.apply(None).is_some());
    }

    #[test]
    fn negate_inverts_and_drops_captures() {
        let never = Matcher::from_fn(|_| None);
        assert!(never.clone().negate().is_match(&json!(1)));

        let always = Matcher::any();
        assert!(!always.negate().is_match(&json!(1)));
    }

    #[test]
    fn node_helpers_tolerate_shapeless_values() {
        assert_eq!(node_type(&json!(null)), None);
        assert_eq!(node_type(&json!({"type": 3})), None);
        assert!(!has_type(&json!([1, 2]), "Identifier"));
        assert_eq!(field(&json!(null), "callee"), None);
    }
}
