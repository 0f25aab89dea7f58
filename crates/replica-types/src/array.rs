//! Array storage
//!
//! Two array families exist, mirroring the two duplication rules the
//! cloning engine applies to them:
//! - `PrimitiveArray`: typed scalar storage, elements have no identity
//! - `ReferenceArray`: slots holding arbitrary values, elements keep identity

use crate::error::TypeError;
use crate::value::Value;
use std::fmt;

/// Element kind of a primitive array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Integer,
    Number,
}

/// Array of scalars
///
/// Deliberately not `Clone`: duplicating an array goes through the cloning
/// engine, which allocates a new array of the same kind and length.
#[derive(PartialEq)]
pub enum PrimitiveArray {
    Boolean(Vec<bool>),
    Byte(Vec<u8>),
    Char(Vec<char>),
    Integer(Vec<i64>),
    Number(Vec<f64>),
}

impl PrimitiveArray {
    /// Allocate a zero-filled array of the given kind and length
    pub fn new(kind: PrimitiveKind, len: usize) -> Self {
        match kind {
            PrimitiveKind::Boolean => PrimitiveArray::Boolean(vec![false; len]),
            PrimitiveKind::Byte => PrimitiveArray::Byte(vec![0; len]),
            PrimitiveKind::Char => PrimitiveArray::Char(vec!['\0'; len]),
            PrimitiveKind::Integer => PrimitiveArray::Integer(vec![0; len]),
            PrimitiveKind::Number => PrimitiveArray::Number(vec![0.0; len]),
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveArray::Boolean(_) => PrimitiveKind::Boolean,
            PrimitiveArray::Byte(_) => PrimitiveKind::Byte,
            PrimitiveArray::Char(_) => PrimitiveKind::Char,
            PrimitiveArray::Integer(_) => PrimitiveKind::Integer,
            PrimitiveArray::Number(_) => PrimitiveKind::Number,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PrimitiveArray::Boolean(v) => v.len(),
            PrimitiveArray::Byte(v) => v.len(),
            PrimitiveArray::Char(v) => v.len(),
            PrimitiveArray::Integer(v) => v.len(),
            PrimitiveArray::Number(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read an element as a scalar value (bytes widen to `Integer`)
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            PrimitiveArray::Boolean(v) => v.get(index).map(|&b| Value::Boolean(b)),
            PrimitiveArray::Byte(v) => v.get(index).map(|&b| Value::Integer(b as i64)),
            PrimitiveArray::Char(v) => v.get(index).map(|&c| Value::Char(c)),
            PrimitiveArray::Integer(v) => v.get(index).map(|&n| Value::Integer(n)),
            PrimitiveArray::Number(v) => v.get(index).map(|&n| Value::Number(n)),
        }
    }

    /// Write a scalar into an element
    ///
    /// The value must match the element kind; bytes accept integers in `0..=255`.
    pub fn set(&mut self, index: usize, value: &Value) -> Result<(), TypeError> {
        let len = self.len();
        if index >= len {
            return Err(TypeError::IndexOutOfBounds { index, len });
        }

        let expected = self.kind();
        let mismatch = || TypeError::ElementKindMismatch {
            expected,
            got: value.type_name(),
        };

        match (self, value) {
            (PrimitiveArray::Boolean(v), Value::Boolean(b)) => v[index] = *b,
            (PrimitiveArray::Byte(v), Value::Integer(n)) => {
                v[index] = u8::try_from(*n).map_err(|_| mismatch())?
            }
            (PrimitiveArray::Char(v), Value::Char(c)) => v[index] = *c,
            (PrimitiveArray::Integer(v), Value::Integer(n)) => v[index] = *n,
            (PrimitiveArray::Number(v), Value::Number(n)) => v[index] = *n,
            _ => return Err(mismatch()),
        }
        Ok(())
    }
}

impl fmt::Debug for PrimitiveArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveArray::Boolean(v) => write!(f, "{:?}", v),
            PrimitiveArray::Byte(v) => write!(f, "{:?}", v),
            PrimitiveArray::Char(v) => write!(f, "{:?}", v),
            PrimitiveArray::Integer(v) => write!(f, "{:?}", v),
            PrimitiveArray::Number(v) => write!(f, "{:?}", v),
        }
    }
}

/// Array of values tagged with its element type name
#[derive(PartialEq)]
pub struct ReferenceArray {
    element_type: String,
    items: Vec<Value>,
}

impl ReferenceArray {
    /// Allocate an array of `len` null slots
    pub fn new(element_type: &str, len: usize) -> Self {
        Self {
            element_type: element_type.to_string(),
            items: vec![Value::Null; len],
        }
    }

    pub fn from_items(element_type: &str, items: Vec<Value>) -> Self {
        Self {
            element_type: element_type.to_string(),
            items,
        }
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn set(&mut self, index: usize, value: Value) -> Result<(), TypeError> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(TypeError::IndexOutOfBounds { index, len }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    /// Native array duplication: a new container of the same length whose
    /// slots hold the same references as this one
    pub fn shallow_copy(&self) -> ReferenceArray {
        Self {
            element_type: self.element_type.clone(),
            items: self.items.clone(),
        }
    }
}

impl fmt::Debug for ReferenceArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element_type)?;
        f.debug_list().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero_filled() {
        let arr = PrimitiveArray::new(PrimitiveKind::Number, 3);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(2), Some(Value::Number(0.0)));
        assert_eq!(arr.get(3), None);
    }

    #[test]
    fn test_set_checks_kind() {
        let mut arr = PrimitiveArray::new(PrimitiveKind::Integer, 2);
        assert!(arr.set(0, &Value::Integer(5)).is_ok());
        assert!(matches!(
            arr.set(1, &Value::Boolean(true)),
            Err(TypeError::ElementKindMismatch { .. })
        ));
        assert!(matches!(
            arr.set(2, &Value::Integer(1)),
            Err(TypeError::IndexOutOfBounds { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_byte_range() {
        let mut arr = PrimitiveArray::new(PrimitiveKind::Byte, 1);
        assert!(arr.set(0, &Value::Integer(255)).is_ok());
        assert_eq!(arr.get(0), Some(Value::Integer(255)));
        assert!(arr.set(0, &Value::Integer(256)).is_err());
        assert!(arr.set(0, &Value::Integer(-1)).is_err());
    }

    #[test]
    fn test_shallow_copy_aliases_slots() {
        let inner = Value::from(PrimitiveArray::Integer(vec![1]));
        let arr = ReferenceArray::from_items("int[]", vec![inner.clone(), Value::Null]);
        let copy = arr.shallow_copy();

        assert_eq!(copy.len(), 2);
        assert_eq!(copy.element_type(), "int[]");
        assert!(copy.get(0).unwrap().same_identity(&inner));
    }

    #[test]
    fn test_reference_set_out_of_bounds() {
        let mut arr = ReferenceArray::new("Object", 1);
        assert!(arr.set(0, Value::Integer(1)).is_ok());
        assert!(arr.set(1, Value::Integer(1)).is_err());
    }
}
