//! Identifier and variable-declarator matchers.

use stana_sexpr::Sexpr;

use crate::builtins::compile_rand;
use crate::capture::{Capture, Captures};
use crate::context::Compiler;
use crate::errors::{assert_arity, PatternError};
use crate::matcher::{field, has_type, Matcher};

/// An identifier-name position: wildcard, capture of the name string, or an
/// exact name. Unlike a full sub-pattern, this position only ever matches
/// `Identifier` nodes.
enum NamePattern {
    Any,
    Capture(String),
    Exact(String),
}

impl NamePattern {
    fn from_rand(operator: &str, rand: Option<&Sexpr>) -> Result<NamePattern, PatternError> {
        let Some(rand) = rand else {
            return Ok(NamePattern::Any);
        };
        let Some(sym) = rand.as_symbol() else {
            return Err(PatternError::BadArgument {
                operator: operator.to_string(),
                message: "identifier expression should be a symbol".to_string(),
            });
        };
        Ok(if sym == "?" {
            NamePattern::Any
        } else if let Some(binding) = sym.strip_prefix('?') {
            NamePattern::Capture(binding.to_string())
        } else {
            NamePattern::Exact(sym.to_string())
        })
    }

    fn matches<'a>(&self, name: &'a str) -> Option<Captures<'a>> {
        match self {
            NamePattern::Any => Some(Captures::new()),
            NamePattern::Capture(binding) => {
                Some(Captures::of(binding.clone(), Capture::Str(name)))
            }
            NamePattern::Exact(expected) => (name == expected).then(Captures::new),
        }
    }
}

/// `(ident name)`: matches `Identifier`; a `?name` operand captures the
/// identifier's name string, not the node.
pub(crate) fn ident(name: &str, rands: &[Sexpr]) -> Result<Matcher, PatternError> {
    assert_arity(name, rands, 1)?;
    let pattern = NamePattern::from_rand(name, rands.first())?;

    Ok(Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "Identifier") {
            return None;
        }
        pattern.matches(field(node, "name")?.as_str()?)
    }))
}

/// Bare atoms in node position compile to this: an `Identifier` with exactly
/// the given name.
pub(crate) fn exact(name: String) -> Matcher {
    Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "Identifier") {
            return None;
        }
        (field(node, "name")?.as_str()? == name).then(Captures::new)
    })
}

/// `(var name init)`: matches `VariableDeclarator`. The name position is an
/// identifier expression; the init position is a full sub-pattern.
pub(crate) fn var(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
) -> Result<Matcher, PatternError> {
    assert_arity(name, rands, 2)?;
    let id = NamePattern::from_rand(name, rands.first())?;
    let init = compile_rand(cc, rands, 1)?;

    Ok(Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "VariableDeclarator") {
            return None;
        }
        let id_node = field(node, "id")?;
        if !has_type(id_node, "Identifier") {
            return None;
        }
        let id_m = id.matches(field(id_node, "name")?.as_str()?)?;
        let init_m = init.apply(field(node, "init"))?;
        Some(id_m.merge(init_m))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn compiled(pattern: &str) -> Matcher {
        Context::new().compile(&stana_sexpr::parse(pattern).unwrap()).unwrap()
    }

    #[test]
    fn ident_captures_the_name_string() {
        let node = json!({"type": "Identifier", "name": "foo"});
        let captures = compiled("(ident ?name)").captures(&node).unwrap();
        assert_eq!(captures.str("name"), Some("foo"));
        assert_eq!(captures.node("name"), None);
    }

    #[test]
    fn ident_rejects_non_identifier_nodes() {
        let m = compiled("(ident ?)");
        assert!(!m.is_match(&json!({"type": "Literal", "value": "foo"})));
        assert!(m.is_match(&json!({"type": "Identifier", "name": "foo"})));
    }

    #[test]
    fn ident_operand_must_be_a_symbol() {
        let err = Context::new()
            .compile(&stana_sexpr::parse("(ident (call))").unwrap())
            .unwrap_err();
        assert!(matches!(err, PatternError::BadArgument { .. }));
    }

    #[test]
    fn var_matches_declarator_with_init_pattern() {
        let node = json!({
            "type": "VariableDeclarator",
            "id": {"type": "Identifier", "name": "x"},
            "init": {"type": "Literal", "value": 1},
        });
        let captures = compiled("(var ?name (number 1))").captures(&node).unwrap();
        assert_eq!(captures.str("name"), Some("x"));
        assert!(!compiled("(var x (number 2))").is_match(&node));
    }

    #[test]
    fn var_with_omitted_operands_matches_any_declarator() {
        let node = json!({
            "type": "VariableDeclarator",
            "id": {"type": "Identifier", "name": "x"},
            "init": null,
        });
        assert!(compiled("(var)").is_match(&node));
    }
}
