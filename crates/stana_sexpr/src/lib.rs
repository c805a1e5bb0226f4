//! Reader for the s-expression pattern grammar.
//!
//! A pattern is exactly one s-expression: an atom (symbol or integer) or a
//! parenthesized list of s-expressions. Whitespace separates tokens and is
//! otherwise insignificant; there is no quoting or escaping.
//!
//! ```
//! use stana_sexpr::{parse, Sexpr};
//!
//! let pattern = parse("(call alert ?argument)").unwrap();
//! let Sexpr::List(items) = &pattern else { panic!("expected a list") };
//! assert_eq!(items[0], Sexpr::Symbol("call".to_string()));
//! ```

use std::fmt;

mod parser;
mod token;

pub use parser::{parse, ParseError};

/// A node of the pattern grammar.
///
/// Produced by [`parse`], consumed once during pattern compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sexpr {
    /// A bare word: operator name, wildcard, identifier, dotted path, …
    Symbol(String),
    /// A non-negative decimal integer atom.
    Number(i64),
    /// A parenthesized sequence of sub-expressions.
    List(Vec<Sexpr>),
}

impl Sexpr {
    pub fn symbol(name: impl Into<String>) -> Self {
        Sexpr::Symbol(name.into())
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Sexpr::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexpr]> {
        match self {
            Sexpr::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexpr::Symbol(name) => f.write_str(name),
            Sexpr::Number(value) => write!(f, "{value}"),
            Sexpr::List(items) => {
                f.write_str("(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}
