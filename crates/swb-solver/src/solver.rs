//! # Solver
//!
//! Runs the configured phases over a planning solution and returns the best
//! solution seen. A solve always returns once termination fires; with an
//! unbounded termination and a local search phase it runs until the phase's
//! own step limit, if any.

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use swb_config::PhaseConfig;

use crate::domain::{Constraint, EasyScoreCalculator, PlanningSolution};
use crate::error::SolverError;
use crate::phase;
use crate::score::Score;
use crate::termination::{SearchCommand, SearchProgress, Termination};

/// Seed used when the configuration does not set `random_seed`.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

/// How a solver scores solutions.
pub(crate) enum ScoreCalculation {
    Easy(Box<dyn EasyScoreCalculator>),
    Session {
        name: String,
        constraints: Vec<Box<dyn Constraint>>,
    },
}

impl ScoreCalculation {
    fn calculate(&self, solution: &dyn PlanningSolution) -> Result<Score, SolverError> {
        let score = match self {
            Self::Easy(calculator) => calculator.calculate(solution)?,
            Self::Session { constraints, .. } => {
                let mut total = Score::ZERO;
                for constraint in constraints {
                    total = total + constraint.score(solution)?;
                }
                total
            }
        };
        let unassigned = i64::try_from(solution.uninitialized_count()).unwrap_or(i64::MAX);
        Ok(score.with_init(-unassigned))
    }
}

impl fmt::Debug for ScoreCalculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy(_) => f.write_str("Easy(..)"),
            Self::Session { name, constraints } => f
                .debug_struct("Session")
                .field("name", name)
                .field(
                    "constraints",
                    &constraints.iter().map(|c| c.name()).collect::<Vec<_>>(),
                )
                .finish(),
        }
    }
}

/// Result of [`Solver::solve`].
#[derive(Debug)]
pub struct SolveOutcome {
    pub best_solution: Box<dyn PlanningSolution>,
    pub best_score: Score,
    pub step_count: u64,
    pub elapsed: Duration,
    /// Why the solve stopped, or `None` when every phase ran to completion.
    pub termination_reason: Option<String>,
}

/// A configured solver. Built by [`SolverFactory::build_solver`](crate::SolverFactory::build_solver).
#[derive(Debug)]
pub struct Solver {
    pub(crate) score_calculation: ScoreCalculation,
    pub(crate) termination: Termination,
    pub(crate) phases: Vec<PhaseConfig>,
    pub(crate) random_seed: u64,
}

impl Solver {
    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    /// Name of the session scoring this solver, if it uses one.
    pub fn session_name(&self) -> Option<&str> {
        match &self.score_calculation {
            ScoreCalculation::Session { name, .. } => Some(name),
            ScoreCalculation::Easy(_) => None,
        }
    }

    /// Solve `problem` and return the best solution found.
    ///
    /// # Errors
    ///
    /// `SolverError::Score` if a score calculator fails.
    pub fn solve(&self, problem: Box<dyn PlanningSolution>) -> Result<SolveOutcome, SolverError> {
        let mut scope = SolverScope::new(self, problem)?;
        tracing::debug!(
            entities = scope.working.entity_count(),
            values = scope.working.value_count(),
            score = %scope.best_score,
            "solve started"
        );

        let mut termination_reason = None;
        for config in &self.phases {
            let reason = phase::run(config, &mut scope)?;
            tracing::debug!(
                phase = config.name(),
                steps = scope.step_count,
                best = %scope.best_score,
                "phase ended"
            );
            if let Some(reason) = reason {
                termination_reason = Some(reason);
                break;
            }
        }

        let elapsed = scope.start.elapsed();
        tracing::info!(
            best = %scope.best_score,
            steps = scope.step_count,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            reason = termination_reason.as_deref().unwrap_or("phases completed"),
            "solve ended"
        );
        Ok(SolveOutcome {
            best_solution: scope.best,
            best_score: scope.best_score,
            step_count: scope.step_count,
            elapsed,
            termination_reason,
        })
    }
}

/// Mutable state of one solve, shared by the phases.
pub(crate) struct SolverScope<'a> {
    pub(crate) working: Box<dyn PlanningSolution>,
    pub(crate) rng: StdRng,
    best: Box<dyn PlanningSolution>,
    best_score: Score,
    step_count: u64,
    start: Instant,
    last_improvement: Instant,
    solver: &'a Solver,
}

impl<'a> SolverScope<'a> {
    fn new(solver: &'a Solver, problem: Box<dyn PlanningSolution>) -> Result<Self, SolverError> {
        let best_score = solver.score_calculation.calculate(problem.as_ref())?;
        let now = Instant::now();
        Ok(Self {
            best: problem.clone_box(),
            working: problem,
            rng: StdRng::seed_from_u64(solver.random_seed),
            best_score,
            step_count: 0,
            start: now,
            last_improvement: now,
            solver,
        })
    }

    pub(crate) fn calculate_score(&self) -> Result<Score, SolverError> {
        self.solver
            .score_calculation
            .calculate(self.working.as_ref())
    }

    pub(crate) fn search_command(&self) -> SearchCommand {
        let now = Instant::now();
        self.solver.termination.search_command(&SearchProgress {
            elapsed: now.duration_since(self.start),
            since_improvement: now.duration_since(self.last_improvement),
            step_count: self.step_count,
            best_score: self.best_score,
        })
    }

    /// Record a finished step whose working solution scores `score`.
    pub(crate) fn step_ended(&mut self, score: Score) {
        self.step_count += 1;
        if score > self.best_score {
            self.best_score = score;
            self.best = self.working.clone_box();
            self.last_improvement = Instant::now();
        }
    }

    pub(crate) fn step_count(&self) -> u64 {
        self.step_count
    }
}
