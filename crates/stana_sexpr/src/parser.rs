//! Recursive-descent parser over the token stream.
//!
//! A well-formed input is exactly one s-expression followed only by
//! whitespace; anything else is a [`ParseError`] with an approximate byte
//! offset into the pattern text.

use std::ops::Range;

use logos::Logos;

use crate::token::Token;
use crate::Sexpr;

/// Malformed pattern text: unbalanced parentheses, empty input, trailing
/// garbage, or a character outside the grammar's alphabet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at offset {offset})")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        ParseError { message: message.into(), offset }
    }
}

/// Parses pattern text into a single [`Sexpr`].
pub fn parse(text: &str) -> Result<Sexpr, ParseError> {
    let mut tokens = Vec::new();
    for (token, span) in Token::lexer(text).spanned() {
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let slice = &text[span.clone()];
                // A digit run only fails to lex when it overflows the
                // number type.
                let message = if slice.bytes().all(|b| b.is_ascii_digit()) {
                    format!("number out of range: {slice}")
                } else {
                    format!("unrecognized character {slice:?}")
                };
                return Err(ParseError::new(message, span.start));
            }
        }
    }

    let mut cursor = Cursor { tokens: &tokens, pos: 0, end: text.len() };
    let expr = cursor.sexpr()?;
    match cursor.peek() {
        None => Ok(expr),
        Some((_, span)) => Err(ParseError::new("expected end of input", span.start)),
    }
}

struct Cursor<'t> {
    tokens: &'t [(Token, Range<usize>)],
    pos: usize,
    end: usize,
}

impl<'t> Cursor<'t> {
    fn peek(&self) -> Option<&'t (Token, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t (Token, Range<usize>)> {
        let next = self.tokens.get(self.pos);
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn sexpr(&mut self) -> Result<Sexpr, ParseError> {
        match self.advance() {
            None => Err(ParseError::new("unexpected end of input", self.end)),
            Some((Token::Number(value), _)) => Ok(Sexpr::Number(*value)),
            Some((Token::Symbol(name), _)) => Ok(Sexpr::Symbol(name.clone())),
            Some((Token::RParen, span)) => {
                Err(ParseError::new("unexpected `)`", span.start))
            }
            Some((Token::LParen, span)) => {
                let open = span.start;
                let mut items = Vec::new();
                loop {
                    match self.peek() {
                        None => return Err(ParseError::new("unclosed `(`", open)),
                        Some((Token::RParen, _)) => {
                            self.pos += 1;
                            return Ok(Sexpr::List(items));
                        }
                        Some(_) => items.push(self.sexpr()?),
                    }
                }
            }
        }
    }
}
