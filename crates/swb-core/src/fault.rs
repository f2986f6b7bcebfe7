//! # Validation Fault
//!
//! One tagged fault type for the whole pipeline. The discriminant says which
//! stage failed; the message is what the user sees, verbatim.
//!
//! The orchestrator inspects [`FaultKind`] only to decide between "return
//! nothing", "return the document diagnostics" and "map to one diagnostic".
//! It never changes behavior per kind beyond that.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which stage of the validation pipeline raised a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// The resource does not belong to a resolvable project.
    NoProject,
    /// Structural or content issue found by the document validator.
    DocumentValidation,
    /// The resource path cannot be resolved relative to its project.
    ConfigResolution,
    /// The solver factory could not be constructed from the configuration.
    FactoryBuild,
    /// A smoke test was requested for a project outside the allow-list.
    Policy,
    /// Loading the sample payload or executing the solve failed.
    RuntimeSolve,
}

impl FaultKind {
    /// Stable lowercase name, used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoProject => "no_project",
            Self::DocumentValidation => "document_validation",
            Self::ConfigResolution => "config_resolution",
            Self::FactoryBuild => "factory_build",
            Self::Policy => "policy",
            Self::RuntimeSolve => "runtime_solve",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fault raised anywhere in the validation pipeline.
///
/// `Display` renders the message only, so that a fault mapped to a
/// diagnostic reads exactly like the underlying error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationFault {
    kind: FaultKind,
    message: String,
}

impl ValidationFault {
    /// Create a fault of the given kind.
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn no_project(message: impl Into<String>) -> Self {
        Self::new(FaultKind::NoProject, message)
    }

    pub fn document(message: impl Into<String>) -> Self {
        Self::new(FaultKind::DocumentValidation, message)
    }

    pub fn config_resolution(message: impl Into<String>) -> Self {
        Self::new(FaultKind::ConfigResolution, message)
    }

    pub fn factory_build(message: impl Into<String>) -> Self {
        Self::new(FaultKind::FactoryBuild, message)
    }

    pub fn policy(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Policy, message)
    }

    pub fn runtime_solve(message: impl Into<String>) -> Self {
        Self::new(FaultKind::RuntimeSolve, message)
    }

    /// The stage that raised this fault.
    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this fault means "the resource has no project".
    pub fn is_no_project(&self) -> bool {
        self.kind == FaultKind::NoProject
    }
}
