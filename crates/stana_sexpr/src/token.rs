//! Token definition for the pattern grammar.
//!
//! Symbols may not start with a digit; the alphabet covers every character
//! the pattern language needs, including the JavaScript operator punctuation
//! (`&& |= ~ …`), capture sigils (`? $`) and dotted paths.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum Token {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    #[regex(
        r"[A-Za-z$?./*+<>=!%,&|^~-][A-Za-z0-9_$?./*+<>=!%,&|^~-]*",
        |lex| lex.slice().to_owned()
    )]
    Symbol(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(text: &str) -> Vec<Token> {
        Token::lexer(text)
            .map(|tok| tok.expect("token"))
            .collect()
    }

    #[test]
    fn lexes_list_tokens() {
        assert_eq!(
            lex("(call alert 2)"),
            vec![
                Token::LParen,
                Token::Symbol("call".to_string()),
                Token::Symbol("alert".to_string()),
                Token::Number(2),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn symbols_keep_punctuation() {
        assert_eq!(
            lex("?foo a.b.c >>>= ??rest $0 && ~"),
            vec![
                Token::Symbol("?foo".to_string()),
                Token::Symbol("a.b.c".to_string()),
                Token::Symbol(">>>=".to_string()),
                Token::Symbol("??rest".to_string()),
                Token::Symbol("$0".to_string()),
                Token::Symbol("&&".to_string()),
                Token::Symbol("~".to_string()),
            ]
        );
    }

    #[test]
    fn digits_do_not_start_symbols() {
        assert_eq!(
            lex("12abc"),
            vec![Token::Number(12), Token::Symbol("abc".to_string())]
        );
    }

    #[test]
    fn rejects_foreign_characters() {
        let mut lexer = Token::lexer("@");
        assert_eq!(lexer.next(), Some(Err(())));
    }
}
