//! # Domain Seams
//!
//! What a domain module plugs into the solver: a planning solution with one
//! planning variable per entity, plus score calculation either as a single
//! easy score calculator or as a set of named constraints.
//!
//! Planning values are indices into the solution's value range. `None`
//! means the entity is not assigned yet.

use std::any::Any;
use std::fmt;

use thiserror::Error;

use crate::score::Score;

/// A problem instance and its current assignment.
pub trait PlanningSolution: Send + fmt::Debug {
    /// Number of planning entities.
    fn entity_count(&self) -> usize;

    /// Size of the value range every entity draws from.
    fn value_count(&self) -> usize;

    fn value(&self, entity: usize) -> Option<usize>;

    fn set_value(&mut self, entity: usize, value: Option<usize>);

    /// Relative difficulty of an entity; larger is harder.
    /// First fit decreasing assigns the hardest entities first.
    fn difficulty(&self, _entity: usize) -> i64 {
        0
    }

    fn clone_box(&self) -> Box<dyn PlanningSolution>;

    fn as_any(&self) -> &dyn Any;

    /// Entities with no value yet.
    fn uninitialized_count(&self) -> usize {
        (0..self.entity_count())
            .filter(|&e| self.value(e).is_none())
            .count()
    }
}

/// Scores a whole solution in one pass.
pub trait EasyScoreCalculator: Send {
    /// Hard and soft levels only. The solver fills in `init`.
    fn calculate(&self, solution: &dyn PlanningSolution) -> Result<Score, ScoreError>;
}

/// One named constraint of a session.
pub trait Constraint: Send {
    fn name(&self) -> &str;

    /// Penalty (or reward) this constraint contributes.
    fn score(&self, solution: &dyn PlanningSolution) -> Result<Score, ScoreError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("({calculator}) cannot score this solution: expected {expected}")]
    UnexpectedSolution {
        calculator: String,
        expected: &'static str,
    },

    #[error("({calculator}) failed: {reason}")]
    Failed { calculator: String, reason: String },
}

/// A problem payload that could not be turned into a solution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("the payload is malformed: {0}")]
    Malformed(String),

    #[error("the payload is inconsistent: {0}")]
    Inconsistent(String),
}

/// Borrow a concrete solution type out of a `dyn PlanningSolution`.
pub fn downcast_solution<'a, T: 'static>(
    solution: &'a dyn PlanningSolution,
    calculator: &str,
) -> Result<&'a T, ScoreError> {
    solution
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ScoreError::UnexpectedSolution {
            calculator: calculator.to_string(),
            expected: std::any::type_name::<T>(),
        })
}
