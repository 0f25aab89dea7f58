//! Replica value model
//!
//! Dynamically-typed values whose shape is only known at runtime, plus the
//! reflective metadata (`TypeDescriptor`) that the cloning engine inspects.
//!
//! # Modules
//!
//! - `value`: the `Value` enum and reference identity
//! - `array`: primitive (scalar) arrays and reference arrays
//! - `object`: instances of runtime types with slot storage
//! - `descriptor`: runtime type metadata (fields, constructors, self-copy)
//! - `error`: type errors raised by slot and element access

pub mod array;
pub mod descriptor;
pub mod error;
pub mod object;
pub mod value;

// Re-exports
pub use array::{PrimitiveArray, PrimitiveKind, ReferenceArray};
pub use descriptor::{
    Constructor, FieldDescriptor, FieldKind, SelfCopy, SelfCopyCapability, TypeBuilder,
    TypeDescriptor, TypeKind, Visibility,
};
pub use error::TypeError;
pub use object::Object;
pub use value::Value;
