//! Form store errors

use intake_schema::{Category, FieldKind, FieldPath, PathError};
use thiserror::Error;

/// Errors raised by typed form writes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// Path is not declared for the session's category
    #[error("field '{path}' is not part of the {category} form")]
    UnknownField { path: FieldPath, category: Category },

    /// Value shape does not fit the declared field kind
    #[error("field '{path}' expects {expected:?}, got {found}")]
    KindMismatch {
        path: FieldPath,
        expected: FieldKind,
        found: &'static str,
    },

    /// Malformed path
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Result alias for form operations
pub type Result<T> = std::result::Result<T, FormError>;
