//! Binary, unary, update, and assignment expression matchers.
//!
//! Operator operands are validated at compile time against the ECMA-262
//! operator sets, so a typo like `(binary ** a b)` fails when the pattern is
//! compiled, not silently at match time.

use stana_sexpr::Sexpr;

use crate::builtins::compile_rand;
use crate::capture::{Capture, Captures};
use crate::context::Compiler;
use crate::errors::{assert_arity, PatternError};
use crate::matcher::{field, has_type, Matcher};

pub(crate) const BINARY_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%",
    "<<", ">>", ">>>",
    "<", ">", "<=", ">=",
    "==", "!=", "===", "!==",
    "&&", "||",
    "&", "|", "^",
];

pub(crate) const UNARY_OPERATORS: &[&str] = &["!", "~", "+", "-"];

/// Unary operators that are not also binary; only these get shorthand forms.
pub(crate) const UNARY_ONLY_OPERATORS: &[&str] = &["!", "~"];

pub(crate) const UPDATE_OPERATORS: &[&str] = &["++", "--"];

pub(crate) const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=",
    "+=", "-=", "*=", "/=", "%=",
    "<<=", ">>=", ">>>=",
    "&=", "|=", "^=",
];

/// An operator position in a pattern: wildcard, capture, or a validated
/// exact operator.
enum OpPattern {
    Any,
    Capture(String),
    Exact(String),
}

impl OpPattern {
    fn from_rand(
        operator: &str,
        rand: Option<&Sexpr>,
        valid: &[&str],
        kind: &'static str,
    ) -> Result<OpPattern, PatternError> {
        let Some(rand) = rand else {
            return Ok(OpPattern::Any);
        };
        let Some(name) = rand.as_symbol() else {
            return Err(PatternError::BadArgument {
                operator: operator.to_string(),
                message: format!("{kind} operator should be a symbol"),
            });
        };
        if name == "?" {
            return Ok(OpPattern::Any);
        }
        if let Some(binding) = name.strip_prefix('?') {
            return Ok(OpPattern::Capture(binding.to_string()));
        }
        if !valid.contains(&name) {
            return Err(PatternError::InvalidOperator { operator: name.to_string(), kind });
        }
        Ok(OpPattern::Exact(name.to_string()))
    }

    fn exact(op: &'static str) -> OpPattern {
        OpPattern::Exact(op.to_string())
    }

    fn matches<'a>(&self, op: &'a str) -> Option<Captures<'a>> {
        match self {
            OpPattern::Any => Some(Captures::new()),
            OpPattern::Capture(binding) => Some(Captures::of(binding.clone(), Capture::Str(op))),
            OpPattern::Exact(expected) => (op == expected).then(Captures::new),
        }
    }
}

/// Splits the operand list into the operator pattern and the value operands.
/// Shorthand forms carry a pre-bound operator and use every operand as a
/// value position.
fn operands<'r>(
    name: &str,
    rands: &'r [Sexpr],
    fixed: Option<&'static str>,
    valid: &[&str],
    kind: &'static str,
    values: usize,
) -> Result<(OpPattern, &'r [Sexpr]), PatternError> {
    match fixed {
        Some(op) => {
            assert_arity(name, rands, values)?;
            Ok((OpPattern::exact(op), rands))
        }
        None => {
            assert_arity(name, rands, values + 1)?;
            let op = OpPattern::from_rand(name, rands.first(), valid, kind)?;
            Ok((op, rands.get(1..).unwrap_or(&[])))
        }
    }
}

/// `(binary op lhs rhs)`, or the `(+ lhs rhs)` shorthand family.
pub(crate) fn binary(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
    fixed: Option<&'static str>,
) -> Result<Matcher, PatternError> {
    let (op, values) = operands(name, rands, fixed, BINARY_OPERATORS, "binary", 2)?;
    let lhs = compile_rand(cc, values, 0)?;
    let rhs = compile_rand(cc, values, 1)?;

    Ok(Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "BinaryExpression") {
            return None;
        }
        let op_m = op.matches(field(node, "operator")?.as_str()?)?;
        let lhs_m = lhs.apply(field(node, "left"))?;
        let rhs_m = rhs.apply(field(node, "right"))?;
        Some(op_m.merge(lhs_m).merge(rhs_m))
    }))
}

/// `(unary op value)`, with shorthands for `!` and `~`.
pub(crate) fn unary(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
    fixed: Option<&'static str>,
) -> Result<Matcher, PatternError> {
    let (op, values) = operands(name, rands, fixed, UNARY_OPERATORS, "unary", 1)?;
    let value = compile_rand(cc, values, 0)?;

    Ok(Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "UnaryExpression") {
            return None;
        }
        let op_m = op.matches(field(node, "operator")?.as_str()?)?;
        let value_m = value.apply(field(node, "argument"))?;
        Some(op_m.merge(value_m))
    }))
}

/// `(update op value)` plus the `prefix`/`postfix` refinements and the
/// `++`/`--` shorthands.
pub(crate) fn update(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
    prefix: Option<bool>,
    fixed: Option<&'static str>,
) -> Result<Matcher, PatternError> {
    let (op, values) = operands(name, rands, fixed, UPDATE_OPERATORS, "update", 1)?;
    let value = compile_rand(cc, values, 0)?;

    Ok(Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "UpdateExpression") {
            return None;
        }
        if let Some(prefix) = prefix {
            if field(node, "prefix")?.as_bool()? != prefix {
                return None;
            }
        }
        let op_m = op.matches(field(node, "operator")?.as_str()?)?;
        let value_m = value.apply(field(node, "argument"))?;
        Some(op_m.merge(value_m))
    }))
}

/// `(assign op var value)`, or the `(+= var value)` shorthand family.
pub(crate) fn assign(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
    fixed: Option<&'static str>,
) -> Result<Matcher, PatternError> {
    let (op, values) = operands(name, rands, fixed, ASSIGNMENT_OPERATORS, "assignment", 2)?;
    let variable = compile_rand(cc, values, 0)?;
    let value = compile_rand(cc, values, 1)?;

    Ok(Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "AssignmentExpression") {
            return None;
        }
        let op_m = op.matches(field(node, "operator")?.as_str()?)?;
        let variable_m = variable.apply(field(node, "left"))?;
        let value_m = value.apply(field(node, "right"))?;
        Some(op_m.merge(variable_m).merge(value_m))
    }))
}
