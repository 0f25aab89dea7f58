//! Shape dispatcher
//!
//! Entry point of the cloning engine. The value's shape is classified once,
//! then routed in fixed priority order:
//!
//! 1. null: nothing to clone
//! 2. self-copy: arrays are duplicated natively, objects whose type declares
//!    a self-copy operation copy themselves
//! 3. fallback: the [`FieldCloner`] builds a one-level-deep copy
//! 4. if the fallback cannot produce a clone, the result is "no clone"
//!
//! Array rules:
//! - primitive arrays get a new array of the same kind and length, copied
//!   element by element
//! - reference arrays get a new container whose slots still point at the
//!   original elements (a shallow copy)

use crate::config::CloneConfig;
use crate::error::CloneError;
use crate::field_cloner::FieldCloner;
use crate::shape::Shape;
use log::{debug, trace};
use replica_types::{Object, PrimitiveArray, SelfCopyCapability, Value};

/// Structured result of a dispatch
///
/// Distinguishes "nothing to clone" from "cloning failed", which
/// [`ShapeDispatcher::duplicate`] partly folds together.
#[derive(Debug, Clone, PartialEq)]
pub enum CloneOutcome {
    Cloned(Value),
    /// Input was null
    Nothing,
    Failed(CloneError),
}

impl CloneOutcome {
    /// Every failure as an error, null input as `None`
    pub fn into_result(self) -> Result<Option<Value>, CloneError> {
        match self {
            CloneOutcome::Cloned(value) => Ok(Some(value)),
            CloneOutcome::Nothing => Ok(None),
            CloneOutcome::Failed(err) => Err(err),
        }
    }
}

/// Stateless router over the duplication strategies
#[derive(Debug, Clone, Default)]
pub struct ShapeDispatcher {
    config: CloneConfig,
    fallback: FieldCloner,
}

impl ShapeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CloneConfig) -> Self {
        Self {
            fallback: FieldCloner::with_config(config.clone()),
            config,
        }
    }

    /// Duplicate a value of any shape
    ///
    /// Returns `Ok(None)` for null input and whenever the fallback could not
    /// build a clone (no usable constructor, denied field). Errors are
    /// reserved for values no strategy applies to and for failing self-copy
    /// operations.
    ///
    /// Objects duplicated through the fallback are copied one level deep:
    /// nested arrays and objects are shared with the original.
    pub fn duplicate(&self, value: &Value) -> Result<Option<Value>, CloneError> {
        match self.dispatch_detailed(value).into_result() {
            Err(err) if err.is_no_clone() => {
                debug!("no clone produced for {}: {}", value.type_name(), err);
                Ok(None)
            }
            result => result,
        }
    }

    pub fn dispatch_detailed(&self, value: &Value) -> CloneOutcome {
        let shape = Shape::of(value);
        trace!("dispatching {} as {:?}", value.type_name(), shape);

        match shape {
            Shape::Null => CloneOutcome::Nothing,
            Shape::Scalar => CloneOutcome::Cloned(value.clone()),
            shape if shape.declares_self_copy() => {
                match self.self_copy(value) {
                    Ok(Some(clone)) => CloneOutcome::Cloned(clone),
                    Ok(None) => {
                        debug!("self-copy of {} declined, falling back", value.type_name());
                        self.fall_back(value)
                    }
                    Err(err) => CloneOutcome::Failed(err),
                }
            }
            Shape::Unsupported => CloneOutcome::Failed(CloneError::UnsupportedShape(format!(
                "{} has no duplication strategy",
                value.type_name()
            ))),
            _ => self.fall_back(value),
        }
    }

    /// Run only the self-copy step
    ///
    /// `Ok(None)` when the value declares no self-copy operation or the
    /// operation declined. A null result counts as declined.
    pub fn self_copy(&self, value: &Value) -> Result<Option<Value>, CloneError> {
        match value {
            Value::PrimitiveArray(arr) => {
                let copy = copy_primitive_array(&arr.borrow())?;
                Ok(Some(Value::from(copy)))
            }
            Value::Array(arr) => Ok(Some(Value::from(arr.borrow().shallow_copy()))),
            Value::Object(obj) => {
                let source = obj.borrow();
                match source.type_descriptor().self_copy() {
                    Some(capability) => self.invoke_self_copy(&source, capability),
                    None => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }

    fn invoke_self_copy(
        &self,
        source: &Object,
        capability: &SelfCopyCapability,
    ) -> Result<Option<Value>, CloneError> {
        let type_name = source.type_descriptor().name();
        if !capability.visibility.permits(self.config.access_override) {
            return Err(CloneError::SelfCopyFailed {
                type_name: type_name.to_string(),
                reason: format!(
                    "self-copy operation is {:?} and cannot be invoked",
                    capability.visibility
                )
                .to_lowercase(),
            });
        }

        capability
            .op
            .self_copy(source)
            .map(|copy| copy.filter(|v| !v.is_null()))
            .map_err(|reason| CloneError::SelfCopyFailed {
                type_name: type_name.to_string(),
                reason,
            })
    }

    fn fall_back(&self, value: &Value) -> CloneOutcome {
        match self.fallback.try_duplicate(value) {
            Ok(clone) => CloneOutcome::Cloned(clone),
            Err(err) => CloneOutcome::Failed(err),
        }
    }
}

/// New array of the same kind and length, filled element by element
pub(crate) fn copy_primitive_array(source: &PrimitiveArray) -> Result<PrimitiveArray, CloneError> {
    let mut target = PrimitiveArray::new(source.kind(), source.len());
    for index in 0..source.len() {
        if let Some(element) = source.get(index) {
            target.set(index, &element)?;
        }
    }
    Ok(target)
}
