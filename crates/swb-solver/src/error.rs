use thiserror::Error;

use swb_config::ConfigError;

use crate::domain::{ImportError, ScoreError};
use crate::registry::ClassKind;

/// Everything that can go wrong building or running a solver.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("the solver config resource ({0}) does not exist in the module")]
    ResourceNotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("the solver config does not declare {0}")]
    MissingField(&'static str),

    #[error("the {kind} ({name}) cannot be found in the module")]
    ClassNotFound { kind: ClassKind, name: String },

    #[error("({name}) has the wrong kind: expected {expected}, found {actual}")]
    ClassKindMismatch {
        name: String,
        expected: ClassKind,
        actual: ClassKind,
    },

    #[error("the entity class ({entity}) is not part of the solution class ({solution})")]
    EntityNotDeclared { entity: String, solution: String },

    #[error(
        "no score calculation is configured: set score_director.easy_score_calculator_class or \
         score_director.session_name, or declare a default session in the module"
    )]
    NoScoreCalculation,

    #[error("the session ({0}) does not exist in the module")]
    SessionNotFound(String),

    #[error("the session ({0}) declares no constraints")]
    EmptySession(String),

    #[error("the best_score_limit ({value}) is invalid: {reason}")]
    InvalidBestScoreLimit { value: String, reason: String },

    #[error("the problem could not be imported: {0}")]
    Import(#[from] ImportError),

    #[error("score calculation failed: {0}")]
    Score(#[from] ScoreError),
}
