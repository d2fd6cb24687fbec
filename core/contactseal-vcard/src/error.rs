//! Error and warning types for the vCard layer.

use thiserror::Error;

/// Result type for vCard operations.
pub type VcardResult<T> = Result<T, VcardError>;

/// Errors raised when entries cannot be written as, or read from, vCard text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VcardError {
    /// Property name contains characters outside `[A-Za-z0-9-]`.
    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),

    /// Group tag contains characters outside `[A-Za-z0-9-]`.
    #[error("invalid group {group:?} on field {field}")]
    InvalidGroup { field: String, group: String },

    /// A parameter value cannot be represented unquoted.
    #[error("invalid {param} parameter {value:?} on field {field}")]
    InvalidParameter {
        field: String,
        param: &'static str,
        value: String,
    },

    /// vCard text could not be parsed.
    #[error("malformed vCard at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Non-fatal notice that the normalizer dropped or rewrote an entry.
///
/// `position` is the 0-based index of the entry in the raw input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    #[error("dropped empty {field} entry at position {position}")]
    EmptyValue { field: String, position: usize },

    #[error("dropped invalid {field} entry at position {position}: {reason}")]
    InvalidValue {
        field: String,
        position: usize,
        reason: &'static str,
    },

    #[error("dropped duplicate {field} entry at position {position}")]
    Duplicate { field: String, position: usize },

    #[error("removed version entry at position {position}")]
    VersionStripped { position: usize },
}
