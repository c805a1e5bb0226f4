//! Logical combinators over whole patterns.
//!
//! `and` folds capture maps left to right, so later sub-patterns win on
//! duplicate names. `or` returns the first match. `nand`/`nor` are the
//! negated forms and, like `not`, never produce captures.

use stana_sexpr::Sexpr;

use crate::builtins::compile_rand;
use crate::capture::Captures;
use crate::context::Compiler;
use crate::errors::{assert_arity, PatternError};
use crate::matcher::Matcher;

/// `(and p...)`: all must match. `(and)` matches anything.
pub(crate) fn and(cc: &Compiler<'_>, rands: &[Sexpr]) -> Result<Matcher, PatternError> {
    let matchers: Vec<Matcher> =
        rands.iter().map(|rand| cc.compile(rand)).collect::<Result<_, _>>()?;

    Ok(Matcher::from_fn(move |node| {
        matchers
            .iter()
            .try_fold(Captures::new(), |acc, matcher| Some(acc.merge(matcher.apply(node)?)))
    }))
}

/// `(or p...)`: first match wins. `(or)` never matches.
pub(crate) fn or(cc: &Compiler<'_>, rands: &[Sexpr]) -> Result<Matcher, PatternError> {
    let matchers: Vec<Matcher> =
        rands.iter().map(|rand| cc.compile(rand)).collect::<Result<_, _>>()?;

    Ok(Matcher::from_fn(move |node| {
        matchers.iter().find_map(|matcher| matcher.apply(node))
    }))
}

/// `(not p)`: matches when `p` does not, discarding captures.
pub(crate) fn not(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
) -> Result<Matcher, PatternError> {
    assert_arity(name, rands, 1)?;
    Ok(compile_rand(cc, rands, 0)?.negate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn compiled(pattern: &str) -> Matcher {
        Context::new().compile(&stana_sexpr::parse(pattern).unwrap()).unwrap()
    }

    fn foo() -> Value {
        json!({"type": "Identifier", "name": "foo"})
    }

    #[test]
    fn and_requires_all_branches() {
        assert!(compiled("(and (ident) foo)").is_match(&foo()));
        assert!(!compiled("(and (ident) bar)").is_match(&foo()));
        assert!(compiled("(and)").is_match(&foo()));
    }

    #[test]
    fn and_merges_captures_last_wins() {
        let node = foo();
        let captures = compiled("(and ?first ?second)").captures(&node).unwrap();
        assert_eq!(captures.len(), 2);
        assert_eq!(captures.node("first"), captures.node("second"));
    }

    #[test]
    fn or_returns_first_matching_branch() {
        let node = foo();
        let captures = compiled("(or (string ?s) (ident ?name))").captures(&node).unwrap();
        assert_eq!(captures.str("name"), Some("foo"));
        assert_eq!(captures.get("s"), None);
        assert!(!compiled("(or)").is_match(&foo()));
    }

    #[test]
    fn not_inverts_without_captures() {
        assert!(compiled("(not bar)").is_match(&foo()));
        assert!(!compiled("(not foo)").is_match(&foo()));
        let node = foo();
        let captures = compiled("(not bar)").captures(&node).unwrap();
        assert!(captures.is_empty());
    }

    #[test]
    fn nand_nor_are_negated_forms() {
        // Agreement with the expanded forms on matching and failing inputs.
        for pattern in ["foo", "bar"] {
            let nand = compiled(&format!("(nand (ident) {pattern})"));
            let expanded = compiled(&format!("(not (and (ident) {pattern}))"));
            assert_eq!(nand.is_match(&foo()), expanded.is_match(&foo()));

            let nor = compiled(&format!("(nor (string ?) {pattern})"));
            let expanded = compiled(&format!("(not (or (string ?) {pattern}))"));
            assert_eq!(nor.is_match(&foo()), expanded.is_match(&foo()));
        }
        assert!(!compiled("(nand (ident) foo)").is_match(&foo()));
        assert!(compiled("(nor (string ?) bar)").is_match(&foo()));
    }
}
