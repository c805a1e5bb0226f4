//! Call and new-expression matchers, including the `??` argument wildcard.
//!
//! `(call f a b)` matches exactly two arguments. A single `??` or `??name`
//! marker in the argument list splits it into a prefix and a postfix: the
//! prefix patterns match the leading actual arguments, the postfix patterns
//! the trailing ones, and the marker swallows whatever lies between (binding
//! it as a slice when named). At most one marker is allowed, so there is
//! never an ambiguous placement to tie-break.

use serde_json::Value;
use stana_sexpr::Sexpr;

use crate::builtins::compile_rand;
use crate::capture::{Capture, Captures};
use crate::context::Compiler;
use crate::errors::PatternError;
use crate::matcher::{field, has_type, Matcher};

pub(crate) fn call_like(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
    node_type: &'static str,
) -> Result<Matcher, PatternError> {
    let callee = compile_rand(cc, rands, 0)?;
    let args = rands.get(1..).unwrap_or(&[]);

    match split_on_marker(name, args)? {
        None => {
            let matchers = compile_all(cc, args)?;
            Ok(fixed_arity(callee, node_type, matchers))
        }
        Some((prefix, binding, postfix)) => {
            let prefix = compile_all(cc, prefix)?;
            let postfix = compile_all(cc, postfix)?;
            Ok(variadic(callee, node_type, prefix, binding, postfix))
        }
    }
}

/// Finds the `??` marker, if any. Returns the operand slices on either side
/// and the capture name (empty marker means match-and-discard).
fn split_on_marker<'r>(
    name: &str,
    args: &'r [Sexpr],
) -> Result<Option<(&'r [Sexpr], Option<String>, &'r [Sexpr])>, PatternError> {
    let mut found = None;
    for (index, arg) in args.iter().enumerate() {
        let Some(sym) = arg.as_symbol() else { continue };
        let Some(binding) = sym.strip_prefix("??") else { continue };
        if found.is_some() {
            return Err(PatternError::MultipleMulti { operator: name.to_string() });
        }
        let binding = (!binding.is_empty()).then(|| binding.to_string());
        found = Some((index, binding));
    }
    Ok(found.map(|(index, binding)| (&args[..index], binding, &args[index + 1..])))
}

fn compile_all(cc: &Compiler<'_>, rands: &[Sexpr]) -> Result<Vec<Matcher>, PatternError> {
    rands.iter().map(|rand| cc.compile(rand)).collect()
}

fn call_arguments<'a>(node: &'a Value, node_type: &str) -> Option<&'a [Value]> {
    if !has_type(node, node_type) {
        return None;
    }
    Some(field(node, "arguments")?.as_array()?.as_slice())
}

fn match_pairwise<'a>(
    matchers: &[Matcher],
    args: &'a [Value],
    seed: Captures<'a>,
) -> Option<Captures<'a>> {
    matchers
        .iter()
        .zip(args)
        .try_fold(seed, |acc, (matcher, arg)| Some(acc.merge(matcher.apply(Some(arg))?)))
}

fn fixed_arity(callee: Matcher, node_type: &'static str, matchers: Vec<Matcher>) -> Matcher {
    Matcher::from_fn(move |node| {
        let node = node?;
        let args = call_arguments(node, node_type)?;
        if args.len() != matchers.len() {
            return None;
        }
        let callee_m = callee.apply(field(node, "callee"))?;
        match_pairwise(&matchers, args, callee_m)
    })
}

fn variadic(
    callee: Matcher,
    node_type: &'static str,
    prefix: Vec<Matcher>,
    binding: Option<String>,
    postfix: Vec<Matcher>,
) -> Matcher {
    Matcher::from_fn(move |node| {
        let node = node?;
        let args = call_arguments(node, node_type)?;
        if args.len() < prefix.len() + postfix.len() {
            return None;
        }
        let callee_m = callee.apply(field(node, "callee"))?;

        let (leading, rest) = args.split_at(prefix.len());
        let (middle, trailing) = rest.split_at(rest.len() - postfix.len());

        let mut captures = match_pairwise(&prefix, leading, callee_m)?;
        captures = match_pairwise(&postfix, trailing, captures)?;
        if let Some(binding) = &binding {
            captures.bind(binding.clone(), Capture::Slice(middle));
        }
        Some(captures)
    })
}
