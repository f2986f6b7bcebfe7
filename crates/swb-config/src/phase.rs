//! # Phases
//!
//! The ordered list of algorithms a solver runs. A configuration without a
//! `phases` section gets a construction heuristic followed by local search.

use serde::{Deserialize, Serialize};

/// Late acceptance history length used when the document gives none.
pub const DEFAULT_LATE_ACCEPTANCE_SIZE: usize = 400;

/// One phase of a solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseConfig {
    ConstructionHeuristic(ConstructionHeuristicConfig),
    LocalSearch(LocalSearchConfig),
}

impl PhaseConfig {
    /// The phase list used when a configuration declares none.
    pub fn defaults() -> Vec<PhaseConfig> {
        vec![
            PhaseConfig::ConstructionHeuristic(ConstructionHeuristicConfig::default()),
            PhaseConfig::LocalSearch(LocalSearchConfig::default()),
        ]
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConstructionHeuristic(_) => "construction_heuristic",
            Self::LocalSearch(_) => "local_search",
        }
    }
}

/// How the construction heuristic orders entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionHeuristicKind {
    /// Entities in declaration order.
    #[default]
    FirstFit,
    /// Most difficult entities first.
    FirstFitDecreasing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionHeuristicConfig {
    #[serde(default)]
    pub heuristic: ConstructionHeuristicKind,
}

/// Move acceptance rule for local search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptorKind {
    HillClimbing,
    #[default]
    LateAcceptance,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSearchConfig {
    #[serde(default)]
    pub acceptor: AcceptorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_acceptance_size: Option<usize>,
    /// Phase-local step limit, on top of the solver-wide termination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_count_limit: Option<u64>,
}

impl LocalSearchConfig {
    pub fn late_acceptance_size(&self) -> usize {
        self.late_acceptance_size
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_LATE_ACCEPTANCE_SIZE)
    }
}
