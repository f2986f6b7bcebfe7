//! Local search: random change moves, one per step, filtered by the
//! configured acceptor.
//!
//! Late acceptance compares a candidate against the score from
//! `late_acceptance_size` steps ago as well as the current one, so it can
//! walk through worse solutions that hill climbing would refuse.

use rand::Rng;
use swb_config::{AcceptorKind, LocalSearchConfig};

use crate::error::SolverError;
use crate::phase::MOVE_CHECK_MASK;
use crate::solver::SolverScope;
use crate::termination::SearchCommand;

/// Candidate moves tried per step before the step is given up.
const MOVES_PER_STEP: usize = 64;

pub(crate) fn run(
    config: &LocalSearchConfig,
    scope: &mut SolverScope<'_>,
) -> Result<Option<String>, SolverError> {
    let entity_count = scope.working.entity_count();
    let value_count = scope.working.value_count();
    if entity_count == 0 || value_count < 2 {
        return Ok(None);
    }

    let mut current = scope.calculate_score()?;
    let mut history = match config.acceptor {
        AcceptorKind::LateAcceptance => vec![current; config.late_acceptance_size()],
        AcceptorKind::HillClimbing => Vec::new(),
    };
    let mut phase_steps: u64 = 0;
    let mut evaluated: u64 = 0;

    loop {
        if let SearchCommand::Terminate(reason) = scope.search_command() {
            return Ok(Some(reason));
        }
        if config.step_count_limit.is_some_and(|limit| phase_steps >= limit) {
            return Ok(None);
        }

        for _ in 0..MOVES_PER_STEP {
            if evaluated & MOVE_CHECK_MASK == MOVE_CHECK_MASK {
                if let SearchCommand::Terminate(reason) = scope.search_command() {
                    return Ok(Some(reason));
                }
            }
            evaluated = evaluated.wrapping_add(1);

            let entity = scope.rng.gen_range(0..entity_count);
            let value = scope.rng.gen_range(0..value_count);
            let previous = scope.working.value(entity);
            if previous == Some(value) {
                continue;
            }

            scope.working.set_value(entity, Some(value));
            let score = scope.calculate_score()?;
            let accepted = match config.acceptor {
                AcceptorKind::HillClimbing => score >= current,
                AcceptorKind::LateAcceptance => {
                    let late = history[(scope.step_count() as usize) % history.len()];
                    score >= late || score >= current
                }
            };
            if accepted {
                current = score;
                break;
            }
            scope.working.set_value(entity, previous);
        }

        if !history.is_empty() {
            let slot = (scope.step_count() as usize) % history.len();
            history[slot] = current;
        }
        scope.step_ended(current);
        phase_steps += 1;
    }
}
