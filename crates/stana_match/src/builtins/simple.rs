//! Single-child statement matchers (`return`, `expr`, `throw`) and bare
//! node-type checks (`break`, `continue`, `fn-expr`).

use stana_sexpr::Sexpr;

use crate::builtins::compile_rand;
use crate::capture::Captures;
use crate::context::Compiler;
use crate::errors::{assert_arity, PatternError};
use crate::matcher::{field, has_type, Matcher};

pub(crate) fn statement(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
    node_type: &'static str,
    child: &'static str,
) -> Result<Matcher, PatternError> {
    assert_arity(name, rands, 1)?;
    let inner = compile_rand(cc, rands, 0)?;

    Ok(Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, node_type) {
            return None;
        }
        inner.apply(field(node, child))
    }))
}

pub(crate) fn bare_statement(
    name: &str,
    rands: &[Sexpr],
    node_type: &'static str,
) -> Result<Matcher, PatternError> {
    assert_arity(name, rands, 0)?;
    Ok(Matcher::from_fn(move |node| {
        has_type(node?, node_type).then(Captures::new)
    }))
}
