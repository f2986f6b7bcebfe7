//! # swb-solver — Solver Runtime
//!
//! A small constraint solver that is configured entirely by name: a
//! [`SolverConfig`](swb_config::SolverConfig) refers to classes and sessions,
//! and a [`SolverContainer`] built from a module resolves those names.
//!
//! ## Building
//!
//! 1. A [`BuildArtifact`] carries the module's resources and its
//!    [`ClassRegistry`].
//! 2. [`SolverContainer::new`] turns it into an execution environment and
//!    reads `META-INF/module.yaml`.
//! 3. [`SolverFactory::from_container_resource`] parses a solver config from
//!    the container.
//! 4. [`SolverFactory::build_solver`] resolves every name and returns a
//!    [`Solver`]. All configuration faults surface here.
//!
//! ## Solving
//!
//! [`Solver::solve`] runs the configured phases over a
//! [`PlanningSolution`]. Termination is cooperative: the solver checks its
//! own [`Termination`] at every step and periodically during move
//! evaluation, and stops itself.
//!
//! ## Crate Policy
//!
//! - Domain code is plugged in through `fn` factories in the registry;
//!   nothing is loaded dynamically.
//! - A container and everything built from it belongs to one caller.

pub mod container;
pub mod domain;
pub mod error;
pub mod factory;
pub mod phase;
pub mod registry;
pub mod score;
pub mod solver;
pub mod termination;

pub use container::{BuildArtifact, SolverContainer};
pub use domain::{
    downcast_solution, Constraint, EasyScoreCalculator, ImportError, PlanningSolution, ScoreError,
};
pub use error::SolverError;
pub use factory::SolverFactory;
pub use registry::{
    ClassKind, ClassRegistry, ConstraintFactory, EasyScoreCalculatorFactory, SolutionClass,
    SolutionImporter,
};
pub use score::{Score, ScoreParseError};
pub use solver::{SolveOutcome, Solver, DEFAULT_RANDOM_SEED};
pub use termination::{SearchCommand, SearchProgress, Termination};
