//! Pattern compilation: from parsed s-expressions to matchers.
//!
//! Lists dispatch on their operator symbol through the context's registry and
//! the builtin table. Atoms are resolved here directly: wildcards, captures,
//! positionals, literal constants, dotted member chains, and bare identifier
//! names.

use serde_json::Value;
use stana_sexpr::Sexpr;

use crate::builtins;
use crate::capture::{Capture, Captures};
use crate::context::Compiler;
use crate::errors::PatternError;
use crate::matcher::Matcher;
use crate::suggest;

pub(crate) fn compile(cc: &Compiler<'_>, pattern: &Sexpr) -> Result<Matcher, PatternError> {
    match pattern {
        Sexpr::Symbol(name) => compile_symbol(cc, name),
        Sexpr::Number(n) => Ok(builtins::literal::number_eq(*n as f64)),
        Sexpr::List(items) => compile_list(cc, items),
    }
}

fn compile_symbol(cc: &Compiler<'_>, name: &str) -> Result<Matcher, PatternError> {
    if name.starts_with("??") {
        return Err(PatternError::DanglingMulti { marker: name.to_string() });
    }
    if name.len() > 1 && name.contains('.') {
        let parts: Vec<&str> = name.split('.').collect();
        return lookup_chain(cc, &parts);
    }
    if name == "?" {
        return Ok(Matcher::any());
    }
    if let Some(binding) = name.strip_prefix('?') {
        return Ok(capture_node(binding.to_string()));
    }
    if let Some(index) = positional_index(name) {
        return cc.positional(index);
    }
    match name {
        "true" => Ok(builtins::literal::boolean(true)),
        "false" => Ok(builtins::literal::boolean(false)),
        "null" => Ok(builtins::literal::null()),
        _ => Ok(builtins::ident::exact(name.to_string())),
    }
}

fn compile_list(cc: &Compiler<'_>, items: &[Sexpr]) -> Result<Matcher, PatternError> {
    let Some((rator, rands)) = items.split_first() else {
        return Err(PatternError::MissingOperator);
    };
    let Some(name) = rator.as_symbol() else {
        return Err(PatternError::MissingOperator);
    };

    if let Some(ctor) = cc.context().lookup(name) {
        return ctor(cc, rands);
    }
    if let Some(builtin) = builtins::lookup(name) {
        return builtin.construct(cc, name, rands);
    }

    let mut candidates: Vec<String> = Vec::new();
    cc.context().registered_names(&mut candidates);
    candidates.extend(builtins::names().map(str::to_string));
    Err(PatternError::UnknownOperator {
        name: name.to_string(),
        suggestions: suggest::suggest(name, candidates.iter().map(String::as_str)),
    })
}

/// `?name`: matches any node, binding it under `name`. An absent field still
/// matches and binds [`Capture::Missing`], so callers can tell "matched
/// nothing there" apart from "did not match".
fn capture_node(binding: String) -> Matcher {
    Matcher::from_fn(move |node| {
        let capture = match node {
            Some(node) => Capture::Node(node),
            None => Capture::Missing,
        };
        Some(Captures::of(binding.clone(), capture))
    })
}

/// `$n` positional references: a `$` followed by digits only.
fn positional_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix('$')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A dotted atom like `console.log` or `?obj.mod.?prop`: each segment is
/// compiled as an atom in its own right, then folded left into a chain of
/// non-computed member accesses.
pub(crate) fn lookup_chain(cc: &Compiler<'_>, parts: &[&str]) -> Result<Matcher, PatternError> {
    let Some((first, rest)) = parts.split_first() else {
        return Err(PatternError::MissingOperator);
    };
    let mut acc = compile_symbol(cc, first)?;
    for part in rest {
        let property = compile_symbol(cc, part)?;
        acc = builtins::member::member_node(acc, property, Some(false));
    }
    Ok(acc)
}

/// Value equality with numeric coercion: numbers compare as `f64`, everything
/// else compares structurally.
pub(crate) fn literal_eq(actual: &Value, expected: &Value) -> bool {
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => actual == expected,
    }
}
