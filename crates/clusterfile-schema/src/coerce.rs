//! Raw input → typed value coercion.

use serde_json::{Number, Value};

use crate::kind::{FieldKind, UnionBranch};

/// Coerce a raw input value to the kind a schema fragment expects.
///
/// Returns `None` when the input carries no usable value: empty or null
/// input, or text that does not parse as the expected kind. Callers must
/// treat `None` as "clear this field", never as an error.
///
/// Union branches are tried in declaration order; a branch whose result
/// violates its `const` constraint is skipped. When no branch accepts the
/// input, the raw value passes through unchanged: a permissive fallback,
/// not a validation pass.
pub fn coerce_value(raw: &Value, kind: &FieldKind) -> Option<Value> {
    if is_empty_input(raw) {
        return None;
    }
    match kind {
        FieldKind::Integer => coerce_integer(raw),
        FieldKind::Number => coerce_number(raw),
        FieldKind::Boolean => coerce_boolean(raw),
        FieldKind::String => Some(coerce_string(raw)),
        FieldKind::Array | FieldKind::Object => Some(raw.clone()),
        FieldKind::Union(branches) => coerce_union(raw, branches),
    }
}

fn is_empty_input(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn coerce_integer(raw: &Value) -> Option<Value> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Value::from(i))
            } else {
                n.as_f64().map(|f| Value::from(f.trunc() as i64))
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
        _ => None,
    }
}

fn coerce_number(raw: &Value) -> Option<Value> {
    match raw {
        Value::Number(n) => Some(Value::Number(n.clone())),
        Value::String(s) => {
            let text = s.trim();
            if let Ok(i) = text.parse::<i64>() {
                return Some(Value::from(i));
            }
            let f = text.parse::<f64>().ok()?;
            Number::from_f64(f).map(Value::Number)
        }
        _ => None,
    }
}

fn coerce_boolean(raw: &Value) -> Option<Value> {
    match raw {
        Value::Bool(b) => Some(Value::Bool(*b)),
        Value::String(s) if s == "true" => Some(Value::Bool(true)),
        Value::String(s) if s == "false" => Some(Value::Bool(false)),
        _ => None,
    }
}

fn coerce_string(raw: &Value) -> Value {
    match raw {
        Value::String(_) => raw.clone(),
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        other => Value::String(serde_json::to_string(other).unwrap_or_default()),
    }
}

fn coerce_union(raw: &Value, branches: &[UnionBranch]) -> Option<Value> {
    for branch in branches {
        if let Some(coerced) = coerce_value(raw, &branch.kind) {
            if let Some(expected) = &branch.const_value {
                if coerced != *expected {
                    continue;
                }
            }
            return Some(coerced);
        }
    }
    Some(raw.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::FieldKind;
    use serde_json::json;

    fn union(branches: Vec<(FieldKind, Option<Value>)>) -> FieldKind {
        FieldKind::Union(
            branches
                .into_iter()
                .map(|(kind, const_value)| UnionBranch { kind, const_value })
                .collect(),
        )
    }

    #[test]
    fn test_empty_input_clears() {
        assert_eq!(coerce_value(&json!(null), &FieldKind::String), None);
        assert_eq!(coerce_value(&json!(""), &FieldKind::Integer), None);
        assert_eq!(coerce_value(&json!(""), &union(vec![(FieldKind::String, None)])), None);
    }

    #[test]
    fn test_integer_from_text() {
        assert_eq!(coerce_value(&json!("42"), &FieldKind::Integer), Some(json!(42)));
        assert_eq!(coerce_value(&json!(" 7 "), &FieldKind::Integer), Some(json!(7)));
        assert_eq!(coerce_value(&json!("abc"), &FieldKind::Integer), None);
        assert_eq!(coerce_value(&json!("4.5"), &FieldKind::Integer), None);
    }

    #[test]
    fn test_integer_from_number() {
        assert_eq!(coerce_value(&json!(42), &FieldKind::Integer), Some(json!(42)));
        assert_eq!(coerce_value(&json!(3.9), &FieldKind::Integer), Some(json!(3)));
    }

    #[test]
    fn test_number_from_text() {
        assert_eq!(coerce_value(&json!("2.5"), &FieldKind::Number), Some(json!(2.5)));
        assert_eq!(coerce_value(&json!("3"), &FieldKind::Number), Some(json!(3)));
        assert_eq!(coerce_value(&json!("abc"), &FieldKind::Number), None);
        assert_eq!(coerce_value(&json!("NaN"), &FieldKind::Number), None);
    }

    #[test]
    fn test_boolean_strictness() {
        assert_eq!(coerce_value(&json!(true), &FieldKind::Boolean), Some(json!(true)));
        assert_eq!(coerce_value(&json!("true"), &FieldKind::Boolean), Some(json!(true)));
        assert_eq!(coerce_value(&json!("false"), &FieldKind::Boolean), Some(json!(false)));
        assert_eq!(coerce_value(&json!("yes"), &FieldKind::Boolean), None);
        assert_eq!(coerce_value(&json!(1), &FieldKind::Boolean), None);
    }

    #[test]
    fn test_string_stringifies_scalars() {
        assert_eq!(coerce_value(&json!("x"), &FieldKind::String), Some(json!("x")));
        assert_eq!(coerce_value(&json!(5), &FieldKind::String), Some(json!("5")));
        assert_eq!(coerce_value(&json!(false), &FieldKind::String), Some(json!("false")));
    }

    #[test]
    fn test_union_first_matching_branch_wins() {
        let kind = union(vec![(FieldKind::Integer, None), (FieldKind::String, None)]);
        assert_eq!(coerce_value(&json!("42"), &kind), Some(json!(42)));
        assert_eq!(coerce_value(&json!("abc"), &kind), Some(json!("abc")));
    }

    #[test]
    fn test_union_const_constraint_skips_branch() {
        let kind = union(vec![
            (FieldKind::String, Some(json!("auto"))),
            (FieldKind::Integer, None),
        ]);
        assert_eq!(coerce_value(&json!("auto"), &kind), Some(json!("auto")));
        // "8" stringifies fine but violates the const, so the integer
        // branch takes it.
        assert_eq!(coerce_value(&json!("8"), &kind), Some(json!(8)));
    }

    #[test]
    fn test_union_falls_back_to_raw() {
        let kind = union(vec![(FieldKind::Integer, None), (FieldKind::Boolean, None)]);
        assert_eq!(coerce_value(&json!("neither"), &kind), Some(json!("neither")));
    }

    #[test]
    fn test_array_and_object_pass_through() {
        assert_eq!(coerce_value(&json!([1, 2]), &FieldKind::Array), Some(json!([1, 2])));
        assert_eq!(coerce_value(&json!({"a": 1}), &FieldKind::Object), Some(json!({"a": 1})));
    }
}
