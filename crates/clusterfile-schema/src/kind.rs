//! Field kind descriptors derived from schema fragments.

use serde_json::Value;

/// Expected kind of a field value.
///
/// A tagged union over the finite set of kinds the editor's widgets
/// produce. `Union` carries its branches in declaration order; branch
/// order decides coercion precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Union(Vec<UnionBranch>),
}

/// One branch of a union kind, with an optional constant constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionBranch {
    pub kind: FieldKind,
    pub const_value: Option<Value>,
}

impl FieldKind {
    /// Derive a kind from a JSON-Schema-like fragment.
    ///
    /// Only `type`, `anyOf`/`oneOf` and per-branch `const` are consulted;
    /// everything else in the fragment is a validation concern. A missing
    /// or unknown `type` behaves like `Object`: coercion passes the raw
    /// value through unchanged.
    pub fn from_fragment(fragment: &Value) -> FieldKind {
        let branches = fragment.get("anyOf").or_else(|| fragment.get("oneOf"));
        if let Some(Value::Array(options)) = branches {
            return FieldKind::Union(
                options
                    .iter()
                    .map(|option| UnionBranch {
                        kind: FieldKind::from_fragment(option),
                        const_value: option.get("const").cloned(),
                    })
                    .collect(),
            );
        }
        match fragment.get("type").and_then(Value::as_str) {
            Some("string") => FieldKind::String,
            Some("integer") => FieldKind::Integer,
            Some("number") => FieldKind::Number,
            Some("boolean") => FieldKind::Boolean,
            Some("array") => FieldKind::Array,
            _ => FieldKind::Object,
        }
    }

    /// Returns the kind name string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
            FieldKind::Union(_) => "union",
        }
    }
}
