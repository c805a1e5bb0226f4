//! `(ternary test consequent alternate)`: matches `ConditionalExpression`.

use stana_sexpr::Sexpr;

use crate::builtins::compile_rand;
use crate::context::Compiler;
use crate::errors::{assert_arity, PatternError};
use crate::matcher::{field, has_type, Matcher};

pub(crate) fn ternary(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
) -> Result<Matcher, PatternError> {
    assert_arity(name, rands, 3)?;
    let test = compile_rand(cc, rands, 0)?;
    let consequent = compile_rand(cc, rands, 1)?;
    let alternate = compile_rand(cc, rands, 2)?;

    Ok(Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "ConditionalExpression") {
            return None;
        }
        let test_m = test.apply(field(node, "test"))?;
        let consequent_m = consequent.apply(field(node, "consequent"))?;
        let alternate_m = alternate.apply(field(node, "alternate"))?;
        Some(test_m.merge(consequent_m).merge(alternate_m))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use serde_json::{json, Value};

    fn compiled(pattern: &str) -> Matcher {
        Context::new().compile(&stana_sexpr::parse(pattern).unwrap()).unwrap()
    }

    fn flat() -> Value {
        json!({
            "type": "ConditionalExpression",
            "test": {"type": "Identifier", "name": "c"},
            "consequent": {"type": "Literal", "value": 1},
            "alternate": {"type": "Literal", "value": 2},
        })
    }

    #[test]
    fn matches_conditional_expressions() {
        assert!(compiled("(ternary)").is_match(&flat()));
        assert!(compiled("(ternary c 1 2)").is_match(&flat()));
        assert!(!compiled("(ternary c 1 3)").is_match(&flat()));
        assert!(!compiled("(ternary)").is_match(&json!({"type": "IfStatement"})));
    }

    #[test]
    fn nested_ternary_in_consequent_position() {
        let nested = json!({
            "type": "ConditionalExpression",
            "test": {"type": "Identifier", "name": "outer"},
            "consequent": flat(),
            "alternate": {"type": "Literal", "value": 0},
        });
        let pattern = compiled("(ternary ?cond (ternary))");
        assert!(pattern.is_match(&nested));
        assert!(!pattern.is_match(&flat()));
    }
}
