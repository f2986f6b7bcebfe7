//! # Solver Configuration
//!
//! The document under validation. Structural checks only happen here: the
//! YAML must parse and match the model. Whether the named classes and
//! sessions exist is decided later, against a built module.
//!
//! ```yaml
//! solution_class: cloudbalancing::CloudBalance
//! entity_classes:
//!   - cloudbalancing::CloudProcess
//! score_director:
//!   session_name: cloudBalancingSession
//! termination:
//!   seconds_spent_limit: 30
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::phase::PhaseConfig;
use crate::termination::TerminationConfig;

/// How scores are calculated.
///
/// An easy score calculator class takes precedence over a session binding.
/// With neither, the module's default session is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreDirectorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easy_score_calculator_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
}

/// A parsed solver configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_director: Option<ScoreDirectorConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination: Option<TerminationConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<PhaseConfig>,
}

impl SolverConfig {
    /// Parse a solver configuration from YAML text.
    ///
    /// # Errors
    ///
    /// `ConfigError::Malformed` if the text is not YAML or has keys the
    /// model does not know.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Malformed {
            document: "solver config",
            reason: e.to_string(),
        })
    }

    /// Parse from raw bytes as stored in a module.
    pub fn from_yaml_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        serde_yaml::from_slice(bytes).map_err(|e| ConfigError::Malformed {
            document: "solver config",
            reason: e.to_string(),
        })
    }

    /// Termination section, created empty when absent.
    pub fn termination_mut(&mut self) -> &mut TerminationConfig {
        self.termination.get_or_insert_with(TerminationConfig::default)
    }

    /// Score director section, created empty when absent.
    pub fn score_director_mut(&mut self) -> &mut ScoreDirectorConfig {
        self.score_director
            .get_or_insert_with(ScoreDirectorConfig::default)
    }

    /// Configured session name, if any.
    pub fn session_name(&self) -> Option<&str> {
        self.score_director
            .as_ref()
            .and_then(|sd| sd.session_name.as_deref())
    }

    /// The phases to run, falling back to the defaults.
    pub fn effective_phases(&self) -> Vec<PhaseConfig> {
        if self.phases.is_empty() {
            PhaseConfig::defaults()
        } else {
            self.phases.clone()
        }
    }
}
