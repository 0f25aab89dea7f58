//! Field-copy fallback
//!
//! Duplicates an opaque object by building a blank instance of its concrete
//! runtime type and assigning each field from the source.
//!
//! The copy is **one level deep**. Every field is copied by direct
//! assignment, so a field holding an array or object makes the clone share that
//! array or object with the original. Callers that need transitive
//! independence must give the type a self-copy operation or use
//! [`DeepCloner`](crate::DeepCloner).

use crate::config::{CloneConfig, FieldScope};
use crate::error::CloneError;
use log::debug;
use replica_types::{FieldDescriptor, Object, TypeDescriptor, TypeKind, Value, Visibility};
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct FieldCloner {
    config: CloneConfig,
}

impl FieldCloner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CloneConfig) -> Self {
        Self { config }
    }

    /// Duplicate `value`, or `None` if it cannot be done
    ///
    /// Never returns a partially filled object. See the module docs for the
    /// one-level depth guarantee.
    pub fn fallback_duplicate(&self, value: &Value) -> Option<Value> {
        match self.try_duplicate(value) {
            Ok(clone) => Some(clone),
            Err(err) => {
                debug!("field copy of {} produced no clone: {}", value.type_name(), err);
                None
            }
        }
    }

    /// Structured form of [`fallback_duplicate`](Self::fallback_duplicate)
    pub fn try_duplicate(&self, value: &Value) -> Result<Value, CloneError> {
        match value {
            // Text has no fields to copy; build a fresh string with the same content
            Value::Text(text) => Ok(Value::text(text)),
            Value::Object(obj) => {
                let source = obj.borrow();
                self.duplicate_object(&source).map(Value::from)
            }
            other => Err(CloneError::UnsupportedShape(format!(
                "field copy does not apply to {}",
                other.type_name()
            ))),
        }
    }

    fn duplicate_object(&self, source: &Object) -> Result<Object, CloneError> {
        let ty = source.type_descriptor();
        let mut target = instantiate(ty, self.config.access_override)?;

        for (slot, field) in fields_in_scope(ty, self.config.field_scope) {
            copy_slot(source, &mut target, slot, field, self.config.access_override)?;
        }
        Ok(target)
    }
}

/// Build a blank instance through the type's own no-argument constructor
fn instantiate(ty: &Rc<TypeDescriptor>, access_override: bool) -> Result<Object, CloneError> {
    let fail = |reason: &str| CloneError::NoConstructionPath {
        type_name: ty.name().to_string(),
        reason: reason.to_string(),
    };

    match ty.kind() {
        TypeKind::Concrete => {}
        TypeKind::Abstract => return Err(fail("type is abstract")),
        TypeKind::Interface => return Err(fail("type is an interface")),
    }

    let ctor = ty
        .constructor()
        .ok_or_else(|| fail("no no-argument constructor"))?;
    if !ctor.visibility.permits(access_override) {
        return Err(match ctor.visibility {
            Visibility::Sealed => fail("constructor is sealed"),
            _ => fail("constructor is not public and access override is disabled"),
        });
    }

    let mut blank = Object::blank(Rc::clone(ty));
    if let Some(init) = ctor.init {
        init(&mut blank);
    }
    Ok(blank)
}

/// Slots the cloner assigns, paired with their field descriptors
fn fields_in_scope(ty: &TypeDescriptor, scope: FieldScope) -> Vec<(usize, &FieldDescriptor)> {
    match scope {
        FieldScope::Declared => {
            let offset = ty.inherited_field_count();
            ty.declared_fields()
                .iter()
                .enumerate()
                .map(|(i, f)| (offset + i, f))
                .collect()
        }
        FieldScope::Hierarchy => ty.all_fields().into_iter().enumerate().collect(),
    }
}

fn copy_slot(
    source: &Object,
    target: &mut Object,
    slot: usize,
    field: &FieldDescriptor,
    access_override: bool,
) -> Result<(), CloneError> {
    let denied = |reason: String| CloneError::FieldAccessDenied {
        type_name: source.type_descriptor().name().to_string(),
        field: field.name.clone(),
        reason,
    };

    if !field.visibility.permits(access_override) {
        return Err(denied(format!("field is {:?}", field.visibility).to_lowercase()));
    }

    let value = source
        .get_slot(slot)
        .cloned()
        .ok_or_else(|| denied("slot missing on source".to_string()))?;
    target
        .set_slot(slot, value)
        .map_err(|e| denied(e.to_string()))
}

/// Copy one field's value from `source` into `target` by direct assignment
///
/// The field is resolved by name on the source's type and must resolve to
/// the same slot on the target's type.
pub fn copy_field(
    source: &Object,
    target: &mut Object,
    field: &str,
    access_override: bool,
) -> Result<(), CloneError> {
    let ty = source.type_descriptor();
    let denied = |reason: &str| CloneError::FieldAccessDenied {
        type_name: ty.name().to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let slot = ty.slot_of(field).ok_or_else(|| denied("no such field"))?;
    if target.type_descriptor().slot_of(field) != Some(slot) {
        return Err(denied("target layout does not match"));
    }

    let fields = ty.all_fields();
    let descriptor = fields
        .get(slot)
        .copied()
        .ok_or_else(|| denied("no such field"))?;
    copy_slot(source, target, slot, descriptor, access_override)
}
