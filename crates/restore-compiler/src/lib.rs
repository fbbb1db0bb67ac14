//! # restore-compiler
//!
//! Domain-independent state-restoration compiler.
//!
//! Given a populated [`Model`](restore_model::Model) and the
//! [`DomainSetup`](restore_model::DomainSetup) its domain returned, the
//! compiler:
//!
//! 1. grounds every tracked fluent schema over the typed object domains,
//! 2. snapshots the defined initial values into shadow fluents, and
//! 3. emits one biconditional goal per snapshotted instance, followed by the
//!    domain's success conditions.
//!
//! The compiled model is handed unchanged to a [`Solver`].
//!
//! ## Example
//!
//! ```rust
//! use restore_compiler::{compile, CompileOptions};
//! use restore_domains::Blocksworld;
//!
//! let compiled = compile(&Blocksworld, &CompileOptions::default()).unwrap();
//! for goal in compiled.goals() {
//!     println!("{}", goal);
//! }
//! assert_eq!(compiled.success_goals().len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod compile;
pub mod goals;
pub mod grounding;
pub mod options;
pub mod receipt;
pub mod snapshot;
pub mod solver;

pub use compile::{compile, CompileSummary, CompiledModel, Compiler, SchemaSummary};
pub use goals::{restoration_goal, GoalSet};
pub use grounding::{ground, ground_defined, instance_count, GroundInstance, Groundings};
pub use options::{CompileOptions, RestorationStrategy};
pub use receipt::{goal_set_hash, CompileReceipt};
pub use snapshot::{shadow_name, ShadowSchema, SnapshotPlan};
pub use solver::{EmptyPlanCheck, SolveOutcome, Solver, SolverError};

use thiserror::Error;

/// Errors that abort compilation. The model is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("Fluent {fluent} parameter {param} has unknown type {ty}")]
    UnknownType {
        fluent: String,
        param: String,
        ty: String,
    },

    #[error("Tracked fluent not registered in the model: {0}")]
    UnregisteredSchema(String),

    #[error("Shadow fluent {shadow} for {original} collides with an existing fluent")]
    ShadowNameCollision { original: String, shadow: String },

    #[error("Grounding would produce {total} instances, limit is {limit}")]
    TooManyInstances { total: u128, limit: u64 },

    #[error("Failed to serialize goals for the receipt: {0}")]
    Receipt(String),

    #[error("Model error: {0}")]
    Model(#[from] restore_model::ModelError),
}

pub type Result<T> = std::result::Result<T, CompileError>;
