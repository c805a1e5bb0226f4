//! The fixed builtin operator table.
//!
//! Builtins form a closed set resolved after the context registries, so a
//! context may shadow any of them. Operator shorthands (`(+ a b)` for
//! `(binary + a b)`, `(! x)` for `(unary ! x)`, and so on) resolve here too,
//! carrying the pre-bound operator into the construction call.

pub(crate) mod call;
pub(crate) mod ident;
pub(crate) mod literal;
pub(crate) mod logic;
pub(crate) mod member;
pub(crate) mod operator;
pub(crate) mod simple;
pub(crate) mod ternary;

use stana_sexpr::Sexpr;

use crate::context::Compiler;
use crate::errors::{assert_arity, PatternError};
use crate::matcher::Matcher;

use literal::{Constant, LiteralKind};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Builtin {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Literal(LiteralKind),
    Constant(Constant),
    NullNode,
    Binary(Option<&'static str>),
    Unary(Option<&'static str>),
    Update { prefix: Option<bool>, operator: Option<&'static str> },
    Assign(Option<&'static str>),
    Call { construct: bool },
    Ident,
    Var,
    Member(Option<bool>),
    Lookup,
    Statement { node_type: &'static str, field: Option<&'static str> },
    Ternary,
}

const NAMED: &[(&str, Builtin)] = &[
    ("and", Builtin::And),
    ("or", Builtin::Or),
    ("not", Builtin::Not),
    ("nand", Builtin::Nand),
    ("nor", Builtin::Nor),
    ("literal", Builtin::Literal(LiteralKind::Any)),
    ("string", Builtin::Literal(LiteralKind::Str)),
    ("number", Builtin::Literal(LiteralKind::Number)),
    ("bool", Builtin::Literal(LiteralKind::Bool)),
    ("regexp", Builtin::Literal(LiteralKind::Regexp)),
    ("true", Builtin::Constant(Constant::True)),
    ("false", Builtin::Constant(Constant::False)),
    ("null", Builtin::Constant(Constant::Null)),
    ("infinity", Builtin::Constant(Constant::Infinity)),
    ("nan", Builtin::Constant(Constant::Nan)),
    ("undefined", Builtin::Constant(Constant::Undefined)),
    ("null-node", Builtin::NullNode),
    ("binary", Builtin::Binary(None)),
    ("unary", Builtin::Unary(None)),
    ("update", Builtin::Update { prefix: None, operator: None }),
    ("prefix", Builtin::Update { prefix: Some(true), operator: None }),
    ("postfix", Builtin::Update { prefix: Some(false), operator: None }),
    ("assign", Builtin::Assign(None)),
    ("call", Builtin::Call { construct: false }),
    ("new", Builtin::Call { construct: true }),
    ("ident", Builtin::Ident),
    ("var", Builtin::Var),
    ("member", Builtin::Member(None)),
    ("property", Builtin::Member(Some(false))),
    ("subscript", Builtin::Member(Some(true))),
    ("lookup", Builtin::Lookup),
    ("return", Builtin::Statement { node_type: "ReturnStatement", field: Some("argument") }),
    ("expr", Builtin::Statement { node_type: "ExpressionStatement", field: Some("expression") }),
    ("throw", Builtin::Statement { node_type: "ThrowStatement", field: Some("argument") }),
    ("break", Builtin::Statement { node_type: "BreakStatement", field: None }),
    ("continue", Builtin::Statement { node_type: "ContinueStatement", field: None }),
    ("fn-expr", Builtin::Statement { node_type: "FunctionExpression", field: None }),
    ("ternary", Builtin::Ternary),
];

pub(crate) fn lookup(name: &str) -> Option<Builtin> {
    if let Some((_, builtin)) = NAMED.iter().find(|(n, _)| *n == name) {
        return Some(*builtin);
    }
    if let Some(op) = find_op(operator::BINARY_OPERATORS, name) {
        return Some(Builtin::Binary(Some(op)));
    }
    if let Some(op) = find_op(operator::UNARY_ONLY_OPERATORS, name) {
        return Some(Builtin::Unary(Some(op)));
    }
    if let Some(op) = find_op(operator::UPDATE_OPERATORS, name) {
        return Some(Builtin::Update { prefix: None, operator: Some(op) });
    }
    if let Some(op) = find_op(operator::ASSIGNMENT_OPERATORS, name) {
        return Some(Builtin::Assign(Some(op)));
    }
    None
}

fn find_op(table: &[&'static str], name: &str) -> Option<&'static str> {
    table.iter().find(|op| **op == name).copied()
}

/// Every builtin name, shorthands included (suggestion candidates).
pub(crate) fn names() -> impl Iterator<Item = &'static str> {
    NAMED
        .iter()
        .map(|(name, _)| *name)
        .chain(operator::BINARY_OPERATORS.iter().copied())
        .chain(operator::UNARY_ONLY_OPERATORS.iter().copied())
        .chain(operator::UPDATE_OPERATORS.iter().copied())
        .chain(operator::ASSIGNMENT_OPERATORS.iter().copied())
}

impl Builtin {
    pub(crate) fn construct(
        self,
        cc: &Compiler<'_>,
        name: &str,
        rands: &[Sexpr],
    ) -> Result<Matcher, PatternError> {
        match self {
            Builtin::And => logic::and(cc, rands),
            Builtin::Or => logic::or(cc, rands),
            Builtin::Not => logic::not(cc, name, rands),
            Builtin::Nand => Ok(logic::and(cc, rands)?.negate()),
            Builtin::Nor => Ok(logic::or(cc, rands)?.negate()),
            Builtin::Literal(kind) => literal::literal(name, kind, rands),
            Builtin::Constant(constant) => {
                assert_arity(name, rands, 0)?;
                Ok(literal::constant(constant))
            }
            Builtin::NullNode => {
                assert_arity(name, rands, 0)?;
                Ok(literal::null_node())
            }
            Builtin::Binary(fixed) => operator::binary(cc, name, rands, fixed),
            Builtin::Unary(fixed) => operator::unary(cc, name, rands, fixed),
            Builtin::Update { prefix, operator: fixed } => {
                operator::update(cc, name, rands, prefix, fixed)
            }
            Builtin::Assign(fixed) => operator::assign(cc, name, rands, fixed),
            Builtin::Call { construct } => {
                let node_type = if construct { "NewExpression" } else { "CallExpression" };
                call::call_like(cc, name, rands, node_type)
            }
            Builtin::Ident => ident::ident(name, rands),
            Builtin::Var => ident::var(cc, name, rands),
            Builtin::Member(computed) => member::member_like(cc, name, rands, computed),
            Builtin::Lookup => member::lookup(cc, name, rands),
            Builtin::Statement { node_type, field } => match field {
                Some(field) => simple::statement(cc, name, rands, node_type, field),
                None => simple::bare_statement(name, rands, node_type),
            },
            Builtin::Ternary => ternary::ternary(cc, name, rands),
        }
    }
}

/// The operand at `index`, compiled; omitted trailing operands default to the
/// universal wildcard.
pub(crate) fn compile_rand(
    cc: &Compiler<'_>,
    rands: &[Sexpr],
    index: usize,
) -> Result<Matcher, PatternError> {
    match rands.get(index) {
        Some(rand) => cc.compile(rand),
        None => Ok(Matcher::any()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthands_resolve_to_their_families() {
        assert!(matches!(lookup("+"), Some(Builtin::Binary(Some("+")))));
        assert!(matches!(lookup("!"), Some(Builtin::Unary(Some("!")))));
        assert!(matches!(
            lookup("++"),
            Some(Builtin::Update { prefix: None, operator: Some("++") })
        ));
        assert!(matches!(lookup("+="), Some(Builtin::Assign(Some("+=")))));
        assert!(lookup("frobnicate").is_none());
    }

    #[test]
    fn named_table_wins_over_shorthands() {
        // "new" and "not" must never be misread as operators.
        assert!(matches!(lookup("new"), Some(Builtin::Call { construct: true })));
        assert!(matches!(lookup("not"), Some(Builtin::Not)));
    }

    #[test]
    fn names_cover_the_whole_table() {
        let names: Vec<&str> = names().collect();
        assert!(names.contains(&"call"));
        assert!(names.contains(&"null-node"));
        assert!(names.contains(&">>>="));
        assert!(names.contains(&"~"));
    }
}
