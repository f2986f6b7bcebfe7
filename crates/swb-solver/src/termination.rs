//! # Termination
//!
//! Cooperative stopping. The solver owns its [`Termination`] and asks it for
//! a [`SearchCommand`] at every step and every few move evaluations; nothing
//! outside the solver interrupts a running solve.
//!
//! The first limit reached wins and its reason is reported in the
//! [`SolveOutcome`](crate::SolveOutcome).

use std::fmt;
use std::time::Duration;

use swb_config::TerminationConfig;

use crate::error::SolverError;
use crate::score::Score;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Where a solve stands, as seen by termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    pub elapsed: Duration,
    pub since_improvement: Duration,
    pub step_count: u64,
    pub best_score: Score,
}

/// Resolved termination limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Termination {
    time_spent_limit: Option<Duration>,
    unimproved_time_spent_limit: Option<Duration>,
    step_count_limit: Option<u64>,
    best_score_limit: Option<Score>,
}

impl Termination {
    /// Resolve a termination section.
    ///
    /// # Errors
    ///
    /// `InvalidBestScoreLimit` if `best_score_limit` does not parse.
    pub fn from_config(config: &TerminationConfig) -> Result<Self, SolverError> {
        let best_score_limit = config
            .best_score_limit
            .as_deref()
            .map(|text| {
                text.parse::<Score>()
                    .map_err(|e| SolverError::InvalidBestScoreLimit {
                        value: text.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()?;
        Ok(Self {
            time_spent_limit: config.time_spent_limit(),
            unimproved_time_spent_limit: config.unimproved_time_spent_limit(),
            step_count_limit: config.step_count_limit,
            best_score_limit,
        })
    }

    pub fn time_spent_limit(&self) -> Option<Duration> {
        self.time_spent_limit
    }

    pub fn is_bounded(&self) -> bool {
        self.time_spent_limit.is_some()
            || self.unimproved_time_spent_limit.is_some()
            || self.step_count_limit.is_some()
            || self.best_score_limit.is_some()
    }

    pub fn search_command(&self, progress: &SearchProgress) -> SearchCommand {
        if let Some(limit) = self.time_spent_limit {
            if progress.elapsed >= limit {
                return SearchCommand::Terminate(format!(
                    "time spent limit ({}ms) reached",
                    limit.as_millis()
                ));
            }
        }
        if let Some(limit) = self.unimproved_time_spent_limit {
            if progress.since_improvement >= limit {
                return SearchCommand::Terminate(format!(
                    "unimproved time spent limit ({}ms) reached",
                    limit.as_millis()
                ));
            }
        }
        if let Some(limit) = self.step_count_limit {
            if progress.step_count >= limit {
                return SearchCommand::Terminate(format!("step count limit ({limit}) reached"));
            }
        }
        if let Some(limit) = self.best_score_limit {
            if progress.best_score >= limit {
                return SearchCommand::Terminate(format!("best score limit ({limit}) reached"));
            }
        }
        SearchCommand::Continue
    }
}
