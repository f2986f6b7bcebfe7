//! Score calculation for cloud balancing, as one easy calculator and as the
//! four constraints of `cloudBalancingSession`. Both give the same total.

use swb_solver::{
    downcast_solution, Constraint, EasyScoreCalculator, PlanningSolution, Score, ScoreError,
};

use super::model::{CloudBalance, Usage};
use super::{
    COMPUTER_COST, EASY_SCORE_CALCULATOR_CLASS, REQUIRED_CPU_POWER, REQUIRED_MEMORY,
    REQUIRED_NETWORK_BANDWIDTH,
};

type Overload = fn(&Usage, usize, &CloudBalance) -> i64;

fn overload(used: i64, capacity: i64) -> i64 {
    (used - capacity).max(0)
}

fn hard_penalty(problem: &CloudBalance, usage: &[Usage], level: Overload) -> i64 {
    -(usage
        .iter()
        .enumerate()
        .map(|(i, u)| level(u, i, problem))
        .sum::<i64>())
}

fn cpu_overload(u: &Usage, i: usize, p: &CloudBalance) -> i64 {
    overload(u.cpu_power, p.computers[i].cpu_power)
}

fn memory_overload(u: &Usage, i: usize, p: &CloudBalance) -> i64 {
    overload(u.memory, p.computers[i].memory)
}

fn network_overload(u: &Usage, i: usize, p: &CloudBalance) -> i64 {
    overload(u.network_bandwidth, p.computers[i].network_bandwidth)
}

fn cost_penalty(problem: &CloudBalance, usage: &[Usage]) -> i64 {
    -usage
        .iter()
        .zip(&problem.computers)
        .filter(|(u, _)| u.process_count > 0)
        .map(|(_, c)| c.cost)
        .sum::<i64>()
}

#[derive(Debug, Default)]
pub struct CloudBalancingEasyScoreCalculator;

impl EasyScoreCalculator for CloudBalancingEasyScoreCalculator {
    fn calculate(&self, solution: &dyn PlanningSolution) -> Result<Score, ScoreError> {
        let problem: &CloudBalance = downcast_solution(solution, EASY_SCORE_CALCULATOR_CLASS)?;
        let usage = problem.usage();
        let hard = hard_penalty(problem, &usage, cpu_overload)
            + hard_penalty(problem, &usage, memory_overload)
            + hard_penalty(problem, &usage, network_overload);
        Ok(Score::of(hard, cost_penalty(problem, &usage)))
    }
}

/// A capacity constraint over one resource.
pub struct CapacityConstraint {
    name: &'static str,
    level: Overload,
}

impl std::fmt::Debug for CapacityConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CapacityConstraint").field(&self.name).finish()
    }
}

impl CapacityConstraint {
    pub fn required_cpu_power() -> Self {
        Self {
            name: REQUIRED_CPU_POWER,
            level: cpu_overload,
        }
    }

    pub fn required_memory() -> Self {
        Self {
            name: REQUIRED_MEMORY,
            level: memory_overload,
        }
    }

    pub fn required_network_bandwidth() -> Self {
        Self {
            name: REQUIRED_NETWORK_BANDWIDTH,
            level: network_overload,
        }
    }
}

impl Constraint for CapacityConstraint {
    fn name(&self) -> &str {
        self.name
    }

    fn score(&self, solution: &dyn PlanningSolution) -> Result<Score, ScoreError> {
        let problem: &CloudBalance = downcast_solution(solution, self.name)?;
        Ok(Score::of(hard_penalty(problem, &problem.usage(), self.level), 0))
    }
}

#[derive(Debug, Default)]
pub struct ComputerCost;

impl Constraint for ComputerCost {
    fn name(&self) -> &str {
        COMPUTER_COST
    }

    fn score(&self, solution: &dyn PlanningSolution) -> Result<Score, ScoreError> {
        let problem: &CloudBalance = downcast_solution(solution, COMPUTER_COST)?;
        Ok(Score::of(0, cost_penalty(problem, &problem.usage())))
    }
}
