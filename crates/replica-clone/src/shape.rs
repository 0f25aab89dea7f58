//! Shape classification
//!
//! The single place where a value's runtime shape is inspected. The result is
//! computed once per call and drives the dispatcher's `match`.

use replica_types::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Null,
    /// By-value scalar, nothing to share
    Scalar,
    PrimitiveArray,
    ReferenceArray,
    /// Object whose type declares a self-copy operation
    SelfCopyable,
    /// Text, or an object without a self-copy operation
    Opaque,
    /// Native handle without metadata
    Unsupported,
}

impl Shape {
    pub fn of(value: &Value) -> Shape {
        match value {
            Value::Null => Shape::Null,
            Value::Boolean(_) | Value::Integer(_) | Value::Number(_) | Value::Char(_) => {
                Shape::Scalar
            }
            Value::Text(_) => Shape::Opaque,
            Value::PrimitiveArray(_) => Shape::PrimitiveArray,
            Value::Array(_) => Shape::ReferenceArray,
            Value::Object(obj) => {
                if obj.borrow().type_descriptor().self_copy().is_some() {
                    Shape::SelfCopyable
                } else {
                    Shape::Opaque
                }
            }
            Value::Handle(_) => Shape::Unsupported,
        }
    }

    /// Arrays always know how to duplicate themselves
    pub fn declares_self_copy(self) -> bool {
        matches!(
            self,
            Shape::PrimitiveArray | Shape::ReferenceArray | Shape::SelfCopyable
        )
    }
}
