//! Matcher contexts: layered operator registries.
//!
//! Lookups consult a context's own table first, then its ancestors, then the
//! fixed builtin table — so user registrations may shadow ancestors and
//! builtins but never silently replace them for anyone else.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::Value;
use stana_sexpr::Sexpr;

use crate::cache;
use crate::capture::Captures;
use crate::compile;
use crate::errors::PatternError;
use crate::matcher::Matcher;

/// Constructor for an operator: receives the per-call compiler scope and the
/// unevaluated operand patterns, and decides which of them to compile.
pub type MatcherCtor =
    Arc<dyn Fn(&Compiler<'_>, &[Sexpr]) -> Result<Matcher, PatternError> + Send + Sync>;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

fn next_context_id() -> u64 {
    NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// An extensible matcher universe.
///
/// Registration requires exclusive access (`&mut`), so a context is frozen
/// before it can be shared or used concurrently. [`Context::derive`] layers a
/// fresh table over a snapshot of this one.
pub struct Context {
    id: u64,
    parent: Option<Arc<Context>>,
    own: FxHashMap<String, MatcherCtor>,
}

impl Clone for Context {
    /// A clone carries the same operator tables but its own cache identity:
    /// the clone can be mutated further, so it must never share compiled
    /// matchers with holders of the original.
    fn clone(&self) -> Self {
        Context {
            id: next_context_id(),
            parent: self.parent.clone(),
            own: self.own.clone(),
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Context { id: next_context_id(), parent: None, own: FxHashMap::default() }
    }

    /// A new context whose lookups fall back to this one.
    pub fn derive(&self) -> Context {
        Context {
            id: next_context_id(),
            parent: Some(Arc::new(self.clone())),
            own: FxHashMap::default(),
        }
    }

    /// Registers `name` in this context's own table.
    ///
    /// Fails if the name is already present here; names in ancestors or in
    /// the builtin table may be shadowed freely.
    pub fn register<F>(&mut self, name: impl Into<String>, ctor: F) -> Result<(), PatternError>
    where
        F: Fn(&Compiler<'_>, &[Sexpr]) -> Result<Matcher, PatternError> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.own.contains_key(&name) {
            return Err(PatternError::DuplicateOperator { name });
        }
        self.own.insert(name, Arc::new(ctor));
        Ok(())
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<MatcherCtor> {
        if let Some(ctor) = self.own.get(name) {
            return Some(ctor.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    /// All names registered here and in ancestors (suggestion candidates).
    pub(crate) fn registered_names(&self, out: &mut Vec<String>) {
        out.extend(self.own.keys().cloned());
        if let Some(parent) = &self.parent {
            parent.registered_names(out);
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Compiles an already-parsed pattern against this context.
    pub fn compile(&self, pattern: &Sexpr) -> Result<Matcher, PatternError> {
        Compiler { context: self, positional: &[] }.compile(pattern)
    }

    /// Compiled matcher for `pattern` from the process-wide cache.
    pub fn matcher(&self, pattern: &str) -> Result<Matcher, PatternError> {
        cache::global().matcher(self, pattern)
    }

    /// Matches `node` against `pattern` (cached compilation).
    pub fn match_node<'a>(
        &self,
        pattern: &str,
        node: &'a Value,
    ) -> Result<Option<Captures<'a>>, PatternError> {
        Ok(self.matcher(pattern)?.captures(node))
    }

    /// Like [`Context::matcher`], with externally supplied matchers
    /// addressable as `$0`, `$1`, … inside the pattern.
    ///
    /// Positional matchers are scoped to this one compile call, so the
    /// result is not cached.
    pub fn create_matcher(
        &self,
        pattern: &str,
        positional: &[Matcher],
    ) -> Result<Matcher, PatternError> {
        let parsed = stana_sexpr::parse(pattern)?;
        Compiler { context: self, positional }.compile(&parsed)
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

/// The scope of one top-level compile call: the active context plus the
/// positional matchers supplied alongside the pattern text.
///
/// Operator constructors receive this and call back into [`Compiler::compile`]
/// for their operand sub-patterns, which keeps user-registered operators
/// composable with nested patterns.
pub struct Compiler<'c> {
    pub(crate) context: &'c Context,
    pub(crate) positional: &'c [Matcher],
}

impl Compiler<'_> {
    pub fn compile(&self, pattern: &Sexpr) -> Result<Matcher, PatternError> {
        compile::compile(self, pattern)
    }

    pub fn context(&self) -> &Context {
        self.context
    }

    pub(crate) fn positional(&self, index: usize) -> Result<Matcher, PatternError> {
        self.positional.get(index).cloned().ok_or(PatternError::PositionalOutOfRange {
            index,
            available: self.positional.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::errors::assert_arity;

    fn empty_object_ctor(
        _cc: &Compiler<'_>,
        rands: &[Sexpr],
    ) -> Result<Matcher, PatternError> {
        assert_arity("empty-object", rands, 0)?;
        Ok(Matcher::from_fn(|node| {
            let node = node?;
            let properties = node.get("properties")?.as_array()?;
            (node.get("type")?.as_str() == Some("ObjectExpression") && properties.is_empty())
                .then(Captures::new)
        }))
    }

    #[test]
    fn registered_operators_compile() {
        let mut ctx = Context::new();
        ctx.register("empty-object", empty_object_ctor).unwrap();

        let matcher = ctx
            .compile(&stana_sexpr::parse("(empty-object)").unwrap())
            .unwrap();
        assert!(matcher.is_match(&json!({"type": "ObjectExpression", "properties": []})));
        assert!(!matcher.is_match(&json!({
            "type": "ObjectExpression",
            "properties": [{"type": "Property"}]
        })));
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut ctx = Context::new();
        ctx.register("empty-object", empty_object_ctor).unwrap();
        let err = ctx.register("empty-object", empty_object_ctor).unwrap_err();
        assert_eq!(
            err,
            PatternError::DuplicateOperator { name: "empty-object".to_string() }
        );
    }

    #[test]
    fn derived_context_sees_parent_operators_and_may_shadow() {
        let mut parent = Context::new();
        parent.register("empty-object", empty_object_ctor).unwrap();

        let mut child = parent.derive();
        // Inherited.
        assert!(child.lookup("empty-object").is_some());

        // Shadowing an inherited name is allowed; it is not a duplicate.
        child
            .register("empty-object", |_cc, _rands| Ok(Matcher::any()))
            .unwrap();
        let matcher = child
            .compile(&stana_sexpr::parse("(empty-object)").unwrap())
            .unwrap();
        assert!(matcher.is_match(&json!(null)));
    }

    #[test]
    fn builtins_can_be_shadowed_per_context() {
        let mut ctx = Context::new();
        ctx.register("call", |_cc, _rands| Ok(Matcher::any())).unwrap();

        let matcher = ctx.compile(&stana_sexpr::parse("(call)").unwrap()).unwrap();
        assert!(matcher.is_match(&json!({"type": "Identifier", "name": "not-a-call"})));
    }

    #[test]
    fn contexts_have_distinct_identities() {
        let a = Context::new();
        let b = Context::new();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), a.derive().id());
        assert_ne!(a.id(), a.clone().id());
    }
}
