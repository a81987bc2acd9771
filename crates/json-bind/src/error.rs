//! Error type shared by schema registration, encoding and binding.

use json_bind_value::ParseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Syntax error in the JSON text.
    #[error("malformed JSON at byte {position}: {reason}")]
    MalformedJson {
        position: usize,
        reason: &'static str,
    },
    /// A value is present but has the wrong shape or representation.
    #[error("type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: &'static str,
    },
    /// Input key not declared by the schema, under `UnknownFieldAction::Error`.
    #[error("unknown field `{key}`")]
    UnknownField { key: String },
    #[error("missing required field `{field_name}`")]
    MissingRequiredField { field_name: String },
    #[error("duplicate field name `{name}` in schema `{record_type}`")]
    DuplicateFieldName { record_type: String, name: String },
    #[error("record type `{record_type}` is already registered")]
    DuplicateRecordType { record_type: String },
    /// The record's field accessor returned a shape the schema does not declare.
    #[error("unsupported field kind for `{field}`: {reason}")]
    UnsupportedFieldKind { field: String, reason: String },
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Malformed { position, reason } => Self::MalformedJson { position, reason },
        }
    }
}
