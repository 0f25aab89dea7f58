use crate::array::{PrimitiveArray, ReferenceArray};
use crate::object::Object;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A dynamically-typed runtime value
///
/// Scalars are held by value. Everything else is a shared reference:
/// `Value::clone` copies the reference, never the referent, so two clones of
/// the same `Value::Object` observe each other's mutations. Producing an
/// independent copy is the cloning engine's job.
#[derive(Clone)]
pub enum Value {
    /// Absence of a value
    Null,
    Boolean(bool),
    Integer(i64),
    Number(f64),
    Char(char),
    /// Immutable text. The `Rc` gives each text value an allocation identity
    Text(Rc<str>),
    /// Array of scalars with shared mutable ownership
    PrimitiveArray(Rc<RefCell<PrimitiveArray>>),
    /// Array of values with shared mutable ownership
    Array(Rc<RefCell<ReferenceArray>>),
    /// Instance of a runtime type with shared mutable ownership
    Object(Rc<RefCell<Object>>),
    /// Opaque native handle without reflective metadata
    /// Caller must downcast to the concrete type
    Handle(Rc<dyn Any>),
}

impl Value {
    /// Create a text value with a fresh allocation
    pub fn text(s: &str) -> Value {
        Value::Text(Rc::from(s))
    }

    pub fn handle<T: Any>(inner: T) -> Value {
        Value::Handle(Rc::new(inner))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Scalars carry no identity and are always copied by value
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Boolean(_) | Value::Integer(_) | Value::Number(_) | Value::Char(_)
        )
    }

    /// Runtime type name, used in diagnostics
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Boolean(_) => "boolean".to_string(),
            Value::Integer(_) => "integer".to_string(),
            Value::Number(_) => "number".to_string(),
            Value::Char(_) => "char".to_string(),
            Value::Text(_) => "text".to_string(),
            Value::PrimitiveArray(arr) => format!("{:?}[]", arr.borrow().kind()).to_lowercase(),
            Value::Array(arr) => format!("{}[]", arr.borrow().element_type()),
            Value::Object(obj) => obj.borrow().type_descriptor().name().to_string(),
            Value::Handle(_) => "handle".to_string(),
        }
    }

    /// Address of the shared referent, `None` for null and scalars
    ///
    /// Two values with the same key denote the same instance.
    pub fn identity_key(&self) -> Option<usize> {
        match self {
            Value::Text(rc) => Some(Rc::as_ptr(rc) as *const u8 as usize),
            Value::PrimitiveArray(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Array(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Object(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Handle(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            _ => None,
        }
    }

    /// Reference identity
    ///
    /// Shared variants compare by pointer, scalars by bit pattern.
    pub fn same_identity(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => Rc::ptr_eq(a, b),
            (Value::PrimitiveArray(a), Value::PrimitiveArray(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Handle(_), Value::Handle(_)) => self.identity_key() == other.identity_key(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Rc<RefCell<Object>>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Rc<RefCell<ReferenceArray>>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_primitive_array(&self) -> Option<&Rc<RefCell<PrimitiveArray>>> {
        match self {
            Value::PrimitiveArray(arr) => Some(arr),
            _ => None,
        }
    }

    /// Read a field of an object value
    /// Returns `None` if this is not an object or the field does not exist
    pub fn field(&self, name: &str) -> Option<Value> {
        self.as_object()
            .and_then(|obj| obj.borrow().get(name).cloned())
    }
}

/// Structural equality
///
/// Shared variants compare their contents, handles compare by identity.
/// Comparing cyclic graphs does not terminate.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::PrimitiveArray(a), Value::PrimitiveArray(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Handle(_), Value::Handle(_)) => self.same_identity(other),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Number(n) => write!(f, "{:?}", n),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::PrimitiveArray(arr) => write!(f, "{:?}", arr.borrow()),
            Value::Array(arr) => write!(f, "{:?}", arr.borrow()),
            Value::Object(obj) => write!(f, "{:?}", obj.borrow()),
            Value::Handle(_) => write!(f, "<handle>"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Rc::from(s))
    }
}

impl From<PrimitiveArray> for Value {
    fn from(arr: PrimitiveArray) -> Self {
        Value::PrimitiveArray(Rc::new(RefCell::new(arr)))
    }
}

impl From<ReferenceArray> for Value {
    fn from(arr: ReferenceArray) -> Self {
        Value::Array(Rc::new(RefCell::new(arr)))
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(Rc::new(RefCell::new(obj)))
    }
}
