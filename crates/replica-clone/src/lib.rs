//! Replica cloning engine
//!
//! Duplicates a `Value` of unknown shape so that mutating the copy never
//! affects the original at the boundaries the engine duplicates.
//!
//! # Strategies
//!
//! - `ShapeDispatcher`: the entry point. Classifies the value and routes it:
//!   arrays are copied natively, self-copyable objects copy themselves,
//!   everything else goes to the field cloner.
//! - `FieldCloner`: builds a blank instance of the same runtime type and
//!   assigns every declared field. This copy is **one level deep**: nested
//!   arrays and objects are shared between the original and the clone.
//! - `DeepCloner`: an explicit full-graph service for callers that need
//!   transitive independence. Never used by the default dispatch path.
//!
//! The `quiet` module re-exposes these with every failure collapsed into
//! `anyhow::Error`.

pub mod config;
pub mod deep;
pub mod dispatcher;
pub mod error;
pub mod field_cloner;
pub mod quiet;
pub mod shape;

// Re-export main types
pub use config::{CloneConfig, FieldScope};
pub use deep::{DeepCloner, DeepClonerBuilder};
pub use dispatcher::{CloneOutcome, ShapeDispatcher};
pub use error::CloneError;
pub use field_cloner::{copy_field, FieldCloner};
pub use shape::Shape;
