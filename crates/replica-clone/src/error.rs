//! Error types for the cloning engine

use replica_types::TypeError;
use thiserror::Error;

/// Why a value could not be duplicated
///
/// A null input is never an error; it simply produces no clone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CloneError {
    /// The runtime type offers no usable no-argument construction route
    #[error("No construction path for {type_name}: {reason}")]
    NoConstructionPath { type_name: String, reason: String },

    /// A field could not be read from the source or written to the target
    #[error("Access to field '{field}' of {type_name} denied: {reason}")]
    FieldAccessDenied {
        type_name: String,
        field: String,
        reason: String,
    },

    /// No strategy applies to this kind of value
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// The type's own self-copy operation failed or could not be invoked
    #[error("Self-copy of {type_name} failed: {reason}")]
    SelfCopyFailed { type_name: String, reason: String },

    #[error(transparent)]
    Type(#[from] TypeError),
}

impl CloneError {
    /// Failures that mean "no clone produced" at the dispatcher boundary
    /// rather than an error escaping it
    pub fn is_no_clone(&self) -> bool {
        matches!(
            self,
            CloneError::NoConstructionPath { .. } | CloneError::FieldAccessDenied { .. }
        )
    }
}
