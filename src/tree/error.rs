use thiserror::Error;

/// Structural errors raised while walking or diffing documents
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A value of this kind cannot be handled here
    #[error("unsupported value kind: {0}")]
    UnsupportedValueKind(&'static str),
    /// Only objects and arrays can be diffed
    #[error("cannot diff {source_kind} against {target_kind}: only objects and arrays are supported")]
    UnsupportedDiffKind {
        target_kind: &'static str,
        source_kind: &'static str,
    },
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Human readable name of a JSON value's kind
pub fn kind_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
