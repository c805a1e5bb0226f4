//! Member-access matchers: `member`, `property`, `subscript`, and the
//! `lookup` chain macro.

use stana_sexpr::Sexpr;

use crate::builtins::compile_rand;
use crate::compile;
use crate::context::Compiler;
use crate::errors::{assert_arity, PatternError};
use crate::matcher::{field, has_type, Matcher};

/// Core `MemberExpression` matcher. `computed` of `None` accepts both
/// `foo.bar` and `foo[bar]`; `Some(false)` is `property`, `Some(true)` is
/// `subscript`.
pub(crate) fn member_node(
    object: Matcher,
    property: Matcher,
    computed: Option<bool>,
) -> Matcher {
    Matcher::from_fn(move |node| {
        let node = node?;
        if !has_type(node, "MemberExpression") {
            return None;
        }
        if let Some(computed) = computed {
            if field(node, "computed")?.as_bool()? != computed {
                return None;
            }
        }
        let object_m = object.apply(field(node, "object"))?;
        let property_m = property.apply(field(node, "property"))?;
        Some(object_m.merge(property_m))
    })
}

pub(crate) fn member_like(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
    computed: Option<bool>,
) -> Result<Matcher, PatternError> {
    assert_arity(name, rands, 2)?;
    let object = compile_rand(cc, rands, 0)?;
    let property = compile_rand(cc, rands, 1)?;
    Ok(member_node(object, property, computed))
}

/// `(lookup foo.bar.baz)`: sugar for nested non-computed member access,
/// equivalent to `(property (property foo bar) baz)`. Single-segment names
/// degenerate to the plain atom form.
pub(crate) fn lookup(
    cc: &Compiler<'_>,
    name: &str,
    rands: &[Sexpr],
) -> Result<Matcher, PatternError> {
    assert_arity(name, rands, 1)?;
    let Some(Sexpr::Symbol(path)) = rands.first() else {
        return Err(PatternError::BadArgument {
            operator: name.to_string(),
            message: "takes one symbol argument".to_string(),
        });
    };
    let parts: Vec<&str> = path.split('.').collect();
    compile::lookup_chain(cc, &parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use serde_json::{json, Value};

    fn compiled(pattern: &str) -> Matcher {
        Context::new().compile(&stana_sexpr::parse(pattern).unwrap()).unwrap()
    }

    fn dotted() -> Value {
        json!({
            "type": "MemberExpression",
            "computed": false,
            "object": {"type": "Identifier", "name": "foo"},
            "property": {"type": "Identifier", "name": "bar"},
        })
    }

    fn subscripted() -> Value {
        json!({
            "type": "MemberExpression",
            "computed": true,
            "object": {"type": "Identifier", "name": "foo"},
            "property": {"type": "Identifier", "name": "bar"},
        })
    }

    #[test]
    fn member_accepts_both_access_styles() {
        let m = compiled("(member foo bar)");
        assert!(m.is_match(&dotted()));
        assert!(m.is_match(&subscripted()));
    }

    #[test]
    fn property_and_subscript_discriminate_on_computed() {
        assert!(compiled("(property foo bar)").is_match(&dotted()));
        assert!(!compiled("(property foo bar)").is_match(&subscripted()));
        assert!(compiled("(subscript foo bar)").is_match(&subscripted()));
        assert!(!compiled("(subscript foo bar)").is_match(&dotted()));
    }

    #[test]
    fn lookup_builds_a_nested_chain() {
        let node = json!({
            "type": "MemberExpression",
            "computed": false,
            "object": dotted(),
            "property": {"type": "Identifier", "name": "baz"},
        });
        assert!(compiled("(lookup foo.bar.baz)").is_match(&node));
        assert!(!compiled("(lookup foo.bar.quux)").is_match(&node));
        // Equivalent long form.
        assert!(compiled("(property (property foo bar) baz)").is_match(&node));
    }

    #[test]
    fn lookup_requires_a_symbol_operand() {
        let err = Context::new()
            .compile(&stana_sexpr::parse("(lookup (call))").unwrap())
            .unwrap_err();
        assert!(matches!(err, PatternError::BadArgument { .. }));
    }
}
