//! # Scores
//!
//! Hard/soft scores with an initialization level. Higher is better. Hard
//! dominates soft; `init` dominates both and is negative while entities
//! remain unassigned.
//!
//! The text form is `0hard/-5soft`, or `-2init/0hard/-5soft` for a
//! partially initialized solution.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A hard/soft score. Field order gives the lexicographic ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score {
    pub init: i64,
    pub hard: i64,
    pub soft: i64,
}

impl Score {
    pub const ZERO: Score = Score {
        init: 0,
        hard: 0,
        soft: 0,
    };

    /// A fully initialized score.
    pub const fn of(hard: i64, soft: i64) -> Self {
        Self {
            init: 0,
            hard,
            soft,
        }
    }

    pub const fn with_init(self, init: i64) -> Self {
        Self { init, ..self }
    }

    pub fn is_solution_initialized(&self) -> bool {
        self.init >= 0
    }

    /// No hard constraint is broken.
    pub fn is_feasible(&self) -> bool {
        self.is_solution_initialized() && self.hard >= 0
    }
}

impl std::ops::Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score {
            init: self.init.saturating_add(rhs.init),
            hard: self.hard.saturating_add(rhs.hard),
            soft: self.soft.saturating_add(rhs.soft),
        }
    }
}

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Score {
        iter.fold(Score::ZERO, |acc, s| acc + s)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.init != 0 {
            write!(f, "{}init/", self.init)?;
        }
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

/// A score string that does not match `[<n>init/]<n>hard/<n>soft`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid score ({input}): expected [<n>init/]<n>hard/<n>soft")]
pub struct ScoreParseError {
    pub input: String,
}

impl FromStr for Score {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ScoreParseError {
            input: s.to_string(),
        };
        let parts: Vec<&str> = s.trim().split('/').collect();
        let (init, hard, soft) = match parts.as_slice() {
            [hard, soft] => ("0init", *hard, *soft),
            [init, hard, soft] => (*init, *hard, *soft),
            _ => return Err(err()),
        };
        let level = |part: &str, suffix: &str| -> Result<i64, ScoreParseError> {
            part.strip_suffix(suffix)
                .and_then(|n| n.parse::<i64>().ok())
                .ok_or_else(err)
        };
        Ok(Score {
            init: level(init, "init")?,
            hard: level(hard, "hard")?,
            soft: level(soft, "soft")?,
        })
    }
}
