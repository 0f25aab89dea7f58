use crate::descriptor::TypeDescriptor;
use crate::error::TypeError;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Instance of a runtime type
///
/// Slots follow `TypeDescriptor::all_fields()`. Access here is raw: visibility
/// rules are enforced by callers that need them, the way reflective access is
/// checked by whoever asks for it.
pub struct Object {
    ty: Rc<TypeDescriptor>,
    slots: Vec<Value>,
}

impl Object {
    /// Allocate an instance with every slot at its kind's default value
    ///
    /// No constructor runs. Building an instance the way the type itself
    /// would is up to the caller.
    pub fn blank(ty: Rc<TypeDescriptor>) -> Self {
        let slots = ty
            .all_fields()
            .iter()
            .map(|f| f.kind.default_value())
            .collect();
        Self { ty, slots }
    }

    pub fn type_descriptor(&self) -> &Rc<TypeDescriptor> {
        &self.ty
    }

    pub fn slots(&self) -> &[Value] {
        &self.slots
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.ty.slot_of(name).and_then(|idx| self.slots.get(idx))
    }

    pub fn get_slot(&self, index: usize) -> Option<&Value> {
        self.slots.get(index)
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<(), TypeError> {
        let idx = self.ty.slot_of(name).ok_or_else(|| TypeError::UnknownField {
            type_name: self.ty.name().to_string(),
            field: name.to_string(),
        })?;
        self.set_slot(idx, value)
    }

    /// Assign a slot, checking the value against the declared field kind
    pub fn set_slot(&mut self, index: usize, value: Value) -> Result<(), TypeError> {
        let len = self.slots.len();
        let field = self
            .ty
            .all_fields()
            .get(index)
            .map(|f| (f.name.clone(), f.kind))
            .ok_or(TypeError::IndexOutOfBounds { index, len })?;

        let (name, kind) = field;
        if !kind.accepts(&value) {
            return Err(TypeError::FieldKindMismatch {
                field: name,
                expected: kind,
                got: value.type_name(),
            });
        }
        self.slots[index] = value;
        Ok(())
    }

    /// Builder-style `set`, for constructing fixtures and literals
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, TypeError> {
        self.set(name, value.into())?;
        Ok(self)
    }
}

/// Same type name and equal slots
impl PartialEq for Object {
    fn eq(&self, other: &Object) -> bool {
        (Rc::ptr_eq(&self.ty, &other.ty) || self.ty.name() == other.ty.name())
            && self.slots == other.slots
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.ty.name());
        for (field, value) in self.ty.all_fields().iter().zip(self.slots.iter()) {
            s.field(&field.name, value);
        }
        s.finish()
    }
}
