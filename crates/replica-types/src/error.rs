//! Error types for slot and element access

use crate::array::PrimitiveKind;
use crate::descriptor::FieldKind;
use std::fmt;

/// Errors raised when reading or writing object slots and array elements
#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    /// Field name not present anywhere in the type hierarchy
    UnknownField { type_name: String, field: String },

    /// Value does not fit the declared field kind
    FieldKindMismatch {
        field: String,
        expected: FieldKind,
        got: String,
    },

    /// Value does not fit the primitive array's element kind
    ElementKindMismatch { expected: PrimitiveKind, got: String },

    /// Index past the end of an array or object layout
    IndexOutOfBounds { index: usize, len: usize },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::UnknownField { type_name, field } => {
                write!(f, "Type {} has no field '{}'", type_name, field)
            }
            TypeError::FieldKindMismatch {
                field,
                expected,
                got,
            } => write!(
                f,
                "Field '{}' expects {:?}, got {}",
                field, expected, got
            ),
            TypeError::ElementKindMismatch { expected, got } => {
                write!(f, "Array of {:?} cannot hold {}", expected, got)
            }
            TypeError::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} out of bounds (len {})", index, len)
            }
        }
    }
}

impl std::error::Error for TypeError {}
