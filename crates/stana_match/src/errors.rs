//! Compile-time error kinds.
//!
//! Every malformed pattern fails synchronously at parse or compile time;
//! a bad pattern never yields a matcher that sometimes works. Applying a
//! successfully compiled matcher never fails — it only declines to match.

use stana_sexpr::{ParseError, Sexpr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Malformed pattern text (unbalanced parens, empty input, …).
    #[error("{message} (at offset {offset})")]
    Syntax { message: String, offset: usize },

    /// The list operator is neither registered nor built in.
    #[error("unknown node type: {name}{}", did_you_mean(.suggestions))]
    UnknownOperator { name: String, suggestions: Vec<String> },

    /// Too many operands for an operator.
    #[error("{operator} -- takes at most {max} argument(s)")]
    Arity { operator: String, max: usize },

    /// An operand has the wrong shape for its position (for example, a list
    /// where an identifier name was expected).
    #[error("{operator} -- {message}")]
    BadArgument { operator: String, message: String },

    /// A literal operator token outside the valid set for the expression kind.
    #[error("{operator} is not a valid {kind} operator")]
    InvalidOperator { operator: String, kind: &'static str },

    /// Literal text that cannot be coerced to the required literal type.
    #[error("invalid {expected} value: {value}")]
    InvalidLiteral { value: String, expected: &'static str },

    /// `register` was called with a name already present in the context's
    /// own table.
    #[error("matcher names should be unique: {name}")]
    DuplicateOperator { name: String },

    /// More than one `??` marker in a call/new argument list.
    #[error("{operator} -- only a single multi-pattern is allowed")]
    MultipleMulti { operator: String },

    /// A `??` marker outside a call/new argument list.
    #[error("multi-pattern {marker} is only allowed in call and new argument lists")]
    DanglingMulti { marker: String },

    /// A `$n` atom with no matching positional matcher.
    #[error("there are only {available} positional matchers, required {index}")]
    PositionalOutOfRange { index: usize, available: usize },

    /// An empty list, or a list headed by something other than a symbol.
    #[error("pattern list must begin with an operator symbol")]
    MissingOperator,
}

impl From<ParseError> for PatternError {
    fn from(err: ParseError) -> Self {
        PatternError::Syntax { message: err.message, offset: err.offset }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(". Did you mean one of: {}", suggestions.join(" "))
    }
}

/// Rejects operand lists longer than `max`. Shorter lists are fine: omitted
/// trailing operands default to the universal wildcard.
pub fn assert_arity(operator: &str, rands: &[Sexpr], max: usize) -> Result<(), PatternError> {
    if rands.len() > max {
        Err(PatternError::Arity { operator: operator.to_string(), max })
    } else {
        Ok(())
    }
}
