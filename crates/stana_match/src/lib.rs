//! s-expression match patterns for ESTree-style JavaScript ASTs.
//!
//! Patterns are compiled into pure matcher closures: applying a matcher to a
//! [`serde_json::Value`] node either fails or yields a map of captured
//! bindings. Malformed patterns fail at compile time with a
//! [`PatternError`]; a compiled matcher never errors at match time.
//!
//! ```
//! use serde_json::json;
//!
//! // `alert("foobar")` as ESTree JSON.
//! let node = json!({
//!     "type": "CallExpression",
//!     "callee": {"type": "Identifier", "name": "alert"},
//!     "arguments": [{"type": "Literal", "value": "foobar"}],
//! });
//!
//! let captures = stana_match::match_node("(call alert ?argument)", &node)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(captures.node("argument").unwrap()["value"], json!("foobar"));
//! ```
//!
//! New operators are added by registering constructors on a [`Context`];
//! derived contexts layer over their parent and may shadow anything,
//! builtins included.

mod builtins;
mod cache;
mod capture;
mod compile;
mod context;
mod errors;
mod matcher;
mod suggest;
mod walk;

pub use cache::PatternCache;
pub use capture::{Capture, Captures};
pub use context::{Compiler, Context, MatcherCtor};
pub use errors::{assert_arity, PatternError};
pub use matcher::{Matcher, NodeArg};
pub use stana_sexpr::{parse, ParseError, Sexpr};
pub use suggest::{edit_distance, suggest};
pub use walk::{walk, Visit};

use once_cell::sync::Lazy;
use serde_json::Value;

/// The shared context behind the free functions: builtins only, nothing
/// registered.
static DEFAULT_CONTEXT: Lazy<Context> = Lazy::new(Context::new);

/// Compiles `pattern` against the default context, memoized process-wide.
pub fn matcher(pattern: &str) -> Result<Matcher, PatternError> {
    DEFAULT_CONTEXT.matcher(pattern)
}

/// Matches `node` against `pattern` in the default context.
///
/// The outer `Result` reports pattern compilation errors; the inner `Option`
/// is the match outcome.
pub fn match_node<'a>(
    pattern: &str,
    node: &'a Value,
) -> Result<Option<Captures<'a>>, PatternError> {
    DEFAULT_CONTEXT.match_node(pattern, node)
}

/// Compiles `pattern` with positional matchers available as `$0`, `$1`, ...
pub fn create_matcher(pattern: &str, positional: &[Matcher]) -> Result<Matcher, PatternError> {
    DEFAULT_CONTEXT.create_matcher(pattern, positional)
}
