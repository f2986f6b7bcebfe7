//! # Phases
//!
//! Each phase runs until it is done or termination fires. A phase returns
//! `Some(reason)` when it was stopped by termination, which ends the solve.

mod construction;
mod local_search;

use swb_config::PhaseConfig;

use crate::error::SolverError;
use crate::solver::SolverScope;

/// Move evaluations between termination checks inside a step.
pub(crate) const MOVE_CHECK_MASK: u64 = 0x3F;

pub(crate) fn run(
    config: &PhaseConfig,
    scope: &mut SolverScope<'_>,
) -> Result<Option<String>, SolverError> {
    match config {
        PhaseConfig::ConstructionHeuristic(ch) => construction::run(ch, scope),
        PhaseConfig::LocalSearch(ls) => local_search::run(ls, scope),
    }
}
