//! Error types for ordo.
//!
//! All operations return `Result<T>` which aliases `Result<T, OpError>`.

use crate::ops::OperationKind;
use thiserror::Error;

/// Errors from operation construction, decoding, and state changes.
#[derive(Debug, Error)]
pub enum OpError {
    /// Path is absolute or escapes the working tree.
    ///
    /// Security rejection: the offending operation must not be built.
    #[error("Invalid path '{0}': {1}")]
    InvalidPath(String, String),

    /// Record is missing a field, has a field of the wrong shape, or carries
    /// a type tag the decoder does not accept.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// `apply()` called on an operation that is already applied.
    #[error("Operation '{0}' is already applied")]
    AlreadyApplied(OperationKind),

    /// `undo()` called on an operation that was never applied.
    #[error("Operation '{0}' has not been applied")]
    NotApplied(OperationKind),

    /// A decoder is already bound to this kind.
    #[error("Decoder for '{0}' is already registered")]
    DuplicateKind(OperationKind),

    /// No decoder is bound to this kind.
    #[error("No decoder registered for '{0}'")]
    Unregistered(OperationKind),

    /// File system effect failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unexpected error from a concrete operation.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OpError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        OpError::MalformedRecord(reason.into())
    }

    /// Returns true for path-safety rejections.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, OpError::InvalidPath(..))
    }

    /// Returns true for record shape failures.
    pub fn is_malformed(&self) -> bool {
        matches!(self, OpError::MalformedRecord(_))
    }
}

/// Result type alias for ordo operations.
pub type Result<T> = std::result::Result<T, OpError>;
