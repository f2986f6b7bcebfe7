//! # swb-config — Solver Configuration Documents
//!
//! Serde models for the declarative documents a project ships inside its
//! module:
//!
//! - [`SolverConfig`] (`solver.rs`): the solver configuration resource under
//!   validation. Names the solution and entity classes, the score
//!   calculation binding, the termination policy and the phase list.
//! - [`TerminationConfig`] (`termination.rs`): time, step and score limits.
//!   Supports the hard time-budget override used by smoke tests.
//! - [`PhaseConfig`] (`phase.rs`): construction heuristic and local search.
//! - [`ModuleDescriptor`] (`module.rs`): `META-INF/module.yaml`, declaring the
//!   constraint sessions a configuration can bind to.
//!
//! All documents are YAML. Parsing is strict: unknown keys are rejected.

pub mod error;
pub mod module;
pub mod phase;
pub mod solver;
pub mod termination;

pub use error::ConfigError;
pub use module::{ModuleDescriptor, SessionDescriptor, MODULE_DESCRIPTOR_PATH};
pub use phase::{
    AcceptorKind, ConstructionHeuristicConfig, ConstructionHeuristicKind, LocalSearchConfig,
    PhaseConfig, DEFAULT_LATE_ACCEPTANCE_SIZE,
};
pub use solver::{ScoreDirectorConfig, SolverConfig};
pub use termination::TerminationConfig;
