//! # restore-model
//!
//! Typed classical-planning models.
//!
//! A [`Model`] holds a type hierarchy with its objects, fluent schemas and
//! their initial valuation, lifted action schemas, and an ordered goal list.
//! Domains populate a model through the [`Domain`] trait.
//!
//! ## Example
//!
//! ```rust
//! use restore_model::*;
//!
//! let mut model = Model::new("blocks");
//! model.add_type("block", None).unwrap();
//! model.add_objects(["A", "B"], "block").unwrap();
//!
//! let on = FluentSchema::boolean("on", &[("x", "block"), ("y", "block")]);
//! model.add_fluent(on.clone()).unwrap();
//! model.set_initial_value(on.atom(["A", "B"]), true).unwrap();
//!
//! assert_eq!(model.initial_value(&on.atom(["A", "B"])), Some(Value::Bool(true)));
//! assert_eq!(model.initial_value(&on.atom(["B", "A"])), None);
//! ```

#![forbid(unsafe_code)]

pub mod domain;
pub mod formula;
pub mod model;
pub mod schema;
pub mod state;
pub mod value;

pub use domain::{Domain, DomainSetup};
pub use formula::{Atom, Formula, Term};
pub use model::Model;
pub use schema::{ActionSchema, Effect, FluentSchema, Parameter};
pub use state::State;
pub use value::{Value, ValueDomain};

use thiserror::Error;

/// Errors raised while authoring a model
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Type already registered: {0}")]
    DuplicateType(String),

    #[error("Object already registered: {0}")]
    DuplicateObject(String),

    #[error("Unknown object: {0}")]
    UnknownObject(String),

    #[error("Fluent already registered: {0}")]
    DuplicateFluent(String),

    #[error("Fluent not registered: {0}")]
    UnregisteredFluent(String),

    #[error("Fluent {fluent} takes {expected} arguments, got {actual}")]
    ArityMismatch {
        fluent: String,
        expected: usize,
        actual: usize,
    },

    #[error("Object {object} has type {actual}, expected {expected}")]
    ObjectTypeMismatch {
        object: String,
        expected: String,
        actual: String,
    },

    #[error("Fluent {fluent} holds {expected} values, got {actual}")]
    ValueDomainMismatch {
        fluent: String,
        expected: ValueDomain,
        actual: ValueDomain,
    },

    #[error("Action already registered: {0}")]
    DuplicateAction(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
