//! Convenience layer with collapsed failures
//!
//! Same operations as the engine, for callers that only care whether a clone
//! was produced. Every structured `CloneError` becomes an `anyhow::Error` with
//! context naming the operation; the original error stays reachable through
//! `downcast_ref`.

use crate::deep::DeepCloner;
use crate::dispatcher::ShapeDispatcher;
use anyhow::{ensure, Context, Result};
use replica_types::Value;

/// Duplicate a value through the default dispatcher
///
/// `Ok(None)` for null input or when no clone could be produced.
pub fn clone(value: &Value) -> Result<Option<Value>> {
    clone_with(&ShapeDispatcher::new(), value)
}

pub fn clone_with(dispatcher: &ShapeDispatcher, value: &Value) -> Result<Option<Value>> {
    dispatcher
        .duplicate(value)
        .with_context(|| format!("failed to clone {}", value.type_name()))
}

/// Like [`clone`], but an absent clone comes back as `Value::Null`
pub fn clone_object(value: &Value) -> Result<Value> {
    Ok(clone(value)?.unwrap_or(Value::Null))
}

/// Run only the self-copy step: native array copy or the type's own
/// self-copy operation, with no field-copy fallback
pub fn clone_self_copyable(value: &Value) -> Result<Option<Value>> {
    ShapeDispatcher::new()
        .self_copy(value)
        .with_context(|| format!("failed to self-copy {}", value.type_name()))
}

/// Deep-clone through an explicitly provided full-graph cloner
///
/// A null input is rejected.
pub fn with_deep_cloner(cloner: &DeepCloner, value: &Value) -> Result<Value> {
    ensure!(!value.is_null(), "cannot deep-clone a null value");
    cloner
        .deep_clone(value)
        .with_context(|| format!("failed to deep-clone {}", value.type_name()))
}
