//! Full-graph deep cloning
//!
//! `DeepCloner` copies everything reachable from a value: array elements,
//! object fields at every depth, non-public and sealed fields included. It
//! instantiates objects from blank storage without running constructors,
//! so types the field cloner cannot build are still copied.
//!
//! Each call keeps its own identity table. An instance reached twice maps to a
//! single clone, which reproduces shared substructure and cycles instead of
//! recursing forever.
//!
//! The cloner is an explicit service object. It is never consulted by
//! [`ShapeDispatcher`](crate::ShapeDispatcher); callers opt in.

use crate::dispatcher::copy_primitive_array;
use crate::error::CloneError;
use log::{debug, trace};
use replica_types::{Object, ReferenceArray, TypeKind, Value};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Clones already produced during one call, keyed by source identity
type Seen = HashMap<usize, Value>;

#[derive(Debug, Clone, Default)]
pub struct DeepCloner {
    /// Types whose instances are shared rather than copied
    immutable: HashSet<String>,
}

impl DeepCloner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> DeepClonerBuilder {
        DeepClonerBuilder::default()
    }

    pub fn is_immutable(&self, type_name: &str) -> bool {
        self.immutable.contains(type_name)
    }

    /// Produce a structurally independent copy of `value`
    ///
    /// Fails on native handles and on instances whose runtime type is
    /// abstract or an interface.
    pub fn deep_clone(&self, value: &Value) -> Result<Value, CloneError> {
        let mut seen = Seen::new();
        let clone = self.clone_value(value, &mut seen)?;
        debug!(
            "deep clone of {} copied {} instances",
            value.type_name(),
            seen.len()
        );
        Ok(clone)
    }

    fn clone_value(&self, value: &Value, seen: &mut Seen) -> Result<Value, CloneError> {
        let key = match value.identity_key() {
            Some(key) => key,
            // null and scalars
            None => return Ok(value.clone()),
        };
        if let Some(done) = seen.get(&key) {
            trace!("reusing clone of {} for shared reference", value.type_name());
            return Ok(done.clone());
        }

        match value {
            Value::Text(text) => {
                let copy = Value::text(text);
                seen.insert(key, copy.clone());
                Ok(copy)
            }
            Value::PrimitiveArray(arr) => {
                let copy = Value::from(copy_primitive_array(&arr.borrow())?);
                seen.insert(key, copy.clone());
                Ok(copy)
            }
            Value::Array(arr) => self.clone_array(key, &arr.borrow(), seen),
            Value::Object(obj) => self.clone_object(key, value, &obj.borrow(), seen),
            Value::Handle(_) => Err(CloneError::UnsupportedShape(
                "native handles cannot be deep-cloned".to_string(),
            )),
            _ => Ok(value.clone()),
        }
    }

    fn clone_array(
        &self,
        key: usize,
        source: &ReferenceArray,
        seen: &mut Seen,
    ) -> Result<Value, CloneError> {
        let target = Rc::new(RefCell::new(ReferenceArray::new(
            source.element_type(),
            source.len(),
        )));
        // registered before descending so cycles resolve to this clone
        seen.insert(key, Value::Array(Rc::clone(&target)));

        for (index, item) in source.iter().enumerate() {
            let copy = self.clone_value(item, seen)?;
            target.borrow_mut().set(index, copy)?;
        }
        Ok(Value::Array(target))
    }

    fn clone_object(
        &self,
        key: usize,
        original: &Value,
        source: &Object,
        seen: &mut Seen,
    ) -> Result<Value, CloneError> {
        let ty = source.type_descriptor();
        if self.is_immutable(ty.name()) {
            seen.insert(key, original.clone());
            return Ok(original.clone());
        }
        if ty.kind() != TypeKind::Concrete {
            return Err(CloneError::NoConstructionPath {
                type_name: ty.name().to_string(),
                reason: format!("instance of {:?} type", ty.kind()).to_lowercase(),
            });
        }

        let target = Rc::new(RefCell::new(Object::blank(Rc::clone(ty))));
        seen.insert(key, Value::Object(Rc::clone(&target)));

        for (slot, field) in source.slots().iter().enumerate() {
            let copy = self.clone_value(field, seen)?;
            target.borrow_mut().set_slot(slot, copy)?;
        }
        Ok(Value::Object(target))
    }
}

#[derive(Debug, Default)]
pub struct DeepClonerBuilder {
    immutable: HashSet<String>,
}

impl DeepClonerBuilder {
    /// Share instances of `type_name` instead of copying them
    pub fn immutable(mut self, type_name: &str) -> Self {
        self.immutable.insert(type_name.to_string());
        self
    }

    pub fn build(self) -> DeepCloner {
        DeepCloner {
            immutable: self.immutable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replica_types::{FieldKind, PrimitiveArray, TypeDescriptor, Visibility};

    fn node_type() -> Rc<TypeDescriptor> {
        TypeDescriptor::builder("Node")
            .field("label", FieldKind::Text)
            .field_with("next", FieldKind::Reference, Visibility::Sealed)
            .no_constructor()
            .build()
    }

    #[test]
    fn test_nested_state_is_copied() {
        let data = Value::from(PrimitiveArray::Number(vec![1.0, 2.0]));
        let node = Object::blank(node_type()).with("next", data.clone()).unwrap();
        let original = Value::from(node);

        let clone = DeepCloner::new().deep_clone(&original).unwrap();
        let cloned_data = clone.field("next").unwrap();

        assert_eq!(clone, original);
        assert!(!cloned_data.same_identity(&data));
    }

    #[test]
    fn test_cycle_is_reproduced() {
        let original = Value::from(Object::blank(node_type()).with("label", "a").unwrap());
        original
            .as_object()
            .unwrap()
            .borrow_mut()
            .set("next", original.clone())
            .unwrap();

        let clone = DeepCloner::new().deep_clone(&original).unwrap();

        assert!(!clone.same_identity(&original));
        assert!(clone.field("next").unwrap().same_identity(&clone));
        assert_eq!(clone.field("label"), Some(Value::text("a")));
    }

    #[test]
    fn test_immutable_types_are_shared() {
        let original = Value::from(Object::blank(node_type()));
        let cloner = DeepCloner::builder().immutable("Node").build();

        let clone = cloner.deep_clone(&original).unwrap();
        assert!(clone.same_identity(&original));
    }

    #[test]
    fn test_handles_are_rejected() {
        let arr = Value::from(ReferenceArray::from_items("Object", vec![Value::handle(1u8)]));
        assert!(matches!(
            DeepCloner::new().deep_clone(&arr),
            Err(CloneError::UnsupportedShape(_))
        ));
    }

    #[test]
    fn test_null_and_scalars_pass_through() {
        let cloner = DeepCloner::new();
        assert_eq!(cloner.deep_clone(&Value::Null), Ok(Value::Null));
        assert_eq!(cloner.deep_clone(&Value::Char('q')), Ok(Value::Char('q')));
    }
}
