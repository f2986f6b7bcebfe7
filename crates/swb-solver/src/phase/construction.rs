//! Construction heuristic: assign every uninitialized entity once, each to
//! the value that scores best at that moment.

use swb_config::{ConstructionHeuristicConfig, ConstructionHeuristicKind};

use crate::error::SolverError;
use crate::phase::MOVE_CHECK_MASK;
use crate::score::Score;
use crate::solver::SolverScope;
use crate::termination::SearchCommand;

pub(crate) fn run(
    config: &ConstructionHeuristicConfig,
    scope: &mut SolverScope<'_>,
) -> Result<Option<String>, SolverError> {
    let value_count = scope.working.value_count();
    if value_count == 0 {
        return Ok(None);
    }

    let mut order: Vec<usize> = (0..scope.working.entity_count())
        .filter(|&e| scope.working.value(e).is_none())
        .collect();
    if config.heuristic == ConstructionHeuristicKind::FirstFitDecreasing {
        order.sort_by_key(|&e| std::cmp::Reverse(scope.working.difficulty(e)));
    }

    let mut evaluated: u64 = 0;
    for entity in order {
        if let SearchCommand::Terminate(reason) = scope.search_command() {
            return Ok(Some(reason));
        }

        let mut best: Option<(Score, usize)> = None;
        for value in 0..value_count {
            if evaluated & MOVE_CHECK_MASK == MOVE_CHECK_MASK {
                if let SearchCommand::Terminate(reason) = scope.search_command() {
                    scope.working.set_value(entity, None);
                    return Ok(Some(reason));
                }
            }
            evaluated = evaluated.wrapping_add(1);

            scope.working.set_value(entity, Some(value));
            let score = scope.calculate_score()?;
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, value));
            }
        }

        if let Some((score, value)) = best {
            scope.working.set_value(entity, Some(value));
            scope.step_ended(score);
        }
    }
    Ok(None)
}
