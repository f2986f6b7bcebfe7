//! # swb-validate — Solver Configuration Validation Pipeline
//!
//! Checks that a solver configuration resource is well-formed and buildable,
//! and optionally runs a short smoke test of the solver it describes.
//!
//! ## Pipeline
//!
//! ```text
//! resolve project ──► document validation ──► build factory ──► [smoke test] ──► map fault
//!   (no project:        (diagnostics:            (first fault wins, mapped to one diagnostic)
//!    nothing to say)     returned as-is)
//! ```
//!
//! [`SolverValidator::validate`] stops after building; [`SolverValidator::validate_and_run`]
//! also runs the smoke test, for allow-listed projects only.
//!
//! ## Collaborators
//!
//! The pipeline consumes four traits: [`ProjectResolver`](swb_core::ProjectResolver)
//! and [`DocumentValidator`](swb_core::DocumentValidator) from `swb-core`, and
//! [`BuildArtifactProvider`] and [`SamplePayloadLoader`] from this crate.
//! Filesystem implementations live in `swb-workspace`.
//!
//! ## Crate Policy
//!
//! - Nothing escapes [`SolverValidator`]: every fault becomes a diagnostic.
//! - No state survives a call. Containers and factories are built per call.

pub mod builder;
pub mod provider;
pub mod smoke;
pub mod validator;

#[cfg(test)]
mod testing;

pub use builder::{solver_config_resource, SolverFactoryBuilder, ValidationDepth};
pub use provider::{
    sample_payload_key, BuildArtifactProvider, SamplePayloadLoader, DEFAULT_SAMPLE_EXTENSION,
    DEFAULT_SAMPLE_NAMESPACE,
};
pub use smoke::{
    AdmittedProject, SmokeTestPolicy, SmokeTestRunner, DEFAULT_ALLOWED_PROJECTS,
    SMOKE_TEST_TIME_SPENT_LIMIT,
};
pub use validator::SolverValidator;
