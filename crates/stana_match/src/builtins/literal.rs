//! Literal matchers: `(literal v)`, the typed refinements, and the constant
//! forms `(true)`, `(null)`, `(undefined)`, ...
//!
//! Value coercion happens at compile time: `(number foo)` is a compile error,
//! never a matcher that silently fails. Numbers compare numerically, so
//! `(number 1)` matches a literal `1.0`.

use serde_json::{json, Value};
use stana_sexpr::Sexpr;

use crate::capture::{Capture, Captures};
use crate::compile::literal_eq;
use crate::errors::{assert_arity, PatternError};
use crate::matcher::{field, has_type, Matcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LiteralKind {
    Any,
    Str,
    Number,
    Bool,
    Regexp,
}

impl LiteralKind {
    fn name(self) -> &'static str {
        match self {
            LiteralKind::Any => "literal",
            LiteralKind::Str => "string",
            LiteralKind::Number => "number",
            LiteralKind::Bool => "bool",
            LiteralKind::Regexp => "regexp",
        }
    }

    /// Whether a `Literal` node's value belongs to this kind. Regexp literals
    /// are recognized by their `regex` field; their `value` is unusable in
    /// JSON form.
    fn admits(self, node: &Value) -> bool {
        let value = node.get("value");
        match self {
            LiteralKind::Any => true,
            LiteralKind::Str => value.is_some_and(Value::is_string),
            LiteralKind::Number => value.is_some_and(Value::is_number),
            LiteralKind::Bool => value.is_some_and(Value::is_boolean),
            LiteralKind::Regexp => node.get("regex").is_some_and(Value::is_object),
        }
    }
}

/// `(literal v)` and friends. A `?name` operand captures the literal's value;
/// anything else is coerced and compared for equality.
pub(crate) fn literal(
    name: &str,
    kind: LiteralKind,
    rands: &[Sexpr],
) -> Result<Matcher, PatternError> {
    assert_arity(name, rands, 1)?;

    match rands.first() {
        None => Ok(kind_matcher(kind, None)),
        Some(Sexpr::Symbol(sym)) if sym == "?" => Ok(kind_matcher(kind, None)),
        Some(Sexpr::Symbol(sym)) if sym.starts_with('?') => {
            Ok(kind_matcher(kind, Some(sym[1..].to_string())))
        }
        Some(rand) => {
            if kind == LiteralKind::Regexp {
                let Some(text) = rand.as_symbol() else {
                    return Err(PatternError::InvalidLiteral {
                        value: rand.to_string(),
                        expected: "regexp",
                    });
                };
                return Ok(regexp_exact(text.to_string()));
            }
            let expected = checked_value(kind, rand)?;
            Ok(Matcher::from_fn(move |node| {
                let node = node?;
                if !has_type(node, "Literal") {
                    return None;
                }
                literal_eq(field(node, "value")?, &expected).then(Captures::new)
            }))
        }
    }
}

/// Matches any literal of `kind`; with a binding, captures the value (for
/// regexps, the `regex` descriptor object).
fn kind_matcher(kind: LiteralKind, binding: Option<String>) -> Matcher {
    Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "Literal") || !kind.admits(node) {
            return None;
        }
        match &binding {
            None => Some(Captures::new()),
            Some(binding) => {
                let captured = match kind {
                    LiteralKind::Regexp => field(node, "regex")?,
                    _ => field(node, "value")?,
                };
                Some(Captures::of(binding.clone(), Capture::Node(captured)))
            }
        }
    })
}

fn regexp_exact(text: String) -> Matcher {
    Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "Literal") {
            return None;
        }
        let regex = field(node, "regex")?;
        let pattern = regex.get("pattern")?.as_str()?;
        let flags = regex.get("flags").and_then(Value::as_str).unwrap_or("");
        (format!("/{pattern}/{flags}") == text).then(Captures::new)
    })
}

/// Coerces an operand atom to the comparison value for `kind`.
fn checked_value(kind: LiteralKind, rand: &Sexpr) -> Result<Value, PatternError> {
    match (kind, rand) {
        (LiteralKind::Any | LiteralKind::Number, Sexpr::Number(n)) => Ok(json!(n)),
        (LiteralKind::Any, Sexpr::Symbol(sym)) => Ok(Value::String(sym.clone())),
        (LiteralKind::Str, Sexpr::Symbol(sym)) => Ok(Value::String(sym.clone())),
        (LiteralKind::Number, Sexpr::Symbol(sym)) => {
            let parsed: f64 = sym.parse().map_err(|_| PatternError::InvalidLiteral {
                value: sym.clone(),
                expected: "number",
            })?;
            if parsed.is_nan() {
                return Err(PatternError::InvalidLiteral {
                    value: sym.clone(),
                    expected: "number",
                });
            }
            Ok(json!(parsed))
        }
        (LiteralKind::Bool, Sexpr::Symbol(sym)) => match sym.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(PatternError::InvalidLiteral { value: sym.clone(), expected: "bool" }),
        },
        (_, rand) => Err(PatternError::InvalidLiteral {
            value: rand.to_string(),
            expected: kind.name(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constant {
    True,
    False,
    Null,
    Infinity,
    Nan,
    Undefined,
}

/// The zero-operand constant forms. `true`/`false`/`null` are literal nodes;
/// `Infinity`/`NaN`/`undefined` are global identifiers, not literals.
pub(crate) fn constant(constant: Constant) -> Matcher {
    match constant {
        Constant::True => literal_value(Value::Bool(true)),
        Constant::False => literal_value(Value::Bool(false)),
        Constant::Null => literal_value(Value::Null),
        Constant::Infinity => global_identifier("Infinity"),
        Constant::Nan => global_identifier("NaN"),
        Constant::Undefined => global_identifier("undefined"),
    }
}

pub(crate) fn boolean(value: bool) -> Matcher {
    literal_value(Value::Bool(value))
}

pub(crate) fn null() -> Matcher {
    literal_value(Value::Null)
}

/// Numeric atoms in node position: any `Literal` with a numerically equal
/// value.
pub(crate) fn number_eq(expected: f64) -> Matcher {
    Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "Literal") {
            return None;
        }
        (field(node, "value")?.as_f64()? == expected).then(Captures::new)
    })
}

/// `(null-node)`: matches a `null` in the tree itself, i.e. an optional
/// child explicitly set to null (`for(;;)` init, else-less `if` alternate).
/// An absent field does not match.
pub(crate) fn null_node() -> Matcher {
    Matcher::from_fn(|node| match node {
        Some(Value::Null) => Some(Captures::new()),
        _ => None,
    })
}

fn literal_value(expected: Value) -> Matcher {
    Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "Literal") {
            return None;
        }
        (field(node, "value")? == &expected).then(Captures::new)
    })
}

fn global_identifier(name: &'static str) -> Matcher {
    Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "Identifier") {
            return None;
        }
        (field(node, "name")?.as_str()? == name).then(Captures::new)
    })
}
