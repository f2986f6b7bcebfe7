//! # Module Descriptor
//!
//! `META-INF/module.yaml` inside a built module. Declares the constraint
//! sessions that solver configurations bind to by name.
//!
//! ```yaml
//! sessions:
//!   - name: cloudBalancingSession
//!     default: true
//!     constraints:
//!       - cloudbalancing::RequiredCpuPower
//!       - cloudbalancing::ComputerCost
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Resource path of the module descriptor inside a module.
pub const MODULE_DESCRIPTOR_PATH: &str = "META-INF/module.yaml";

/// A named bundle of constraint classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionDescriptor {
    pub name: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub constraints: Vec<String>,
}

/// Parsed module descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDescriptor {
    #[serde(default)]
    pub sessions: Vec<SessionDescriptor>,
}

impl ModuleDescriptor {
    /// Parse and check a module descriptor.
    ///
    /// # Errors
    ///
    /// `Malformed` for bad YAML, `DuplicateSession` for repeated names,
    /// `MultipleDefaultSessions` when two sessions claim to be the default.
    pub fn from_yaml_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let descriptor: ModuleDescriptor =
            serde_yaml::from_slice(bytes).map_err(|e| ConfigError::Malformed {
                document: "module descriptor",
                reason: e.to_string(),
            })?;
        descriptor.check()?;
        Ok(descriptor)
    }

    fn check(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        let mut default: Option<&str> = None;
        for session in &self.sessions {
            if !seen.insert(session.name.as_str()) {
                return Err(ConfigError::DuplicateSession(session.name.clone()));
            }
            if session.default {
                if let Some(first) = default {
                    return Err(ConfigError::MultipleDefaultSessions(
                        first.to_string(),
                        session.name.clone(),
                    ));
                }
                default = Some(&session.name);
            }
        }
        Ok(())
    }

    /// Look up a session by name.
    pub fn session(&self, name: &str) -> Option<&SessionDescriptor> {
        self.sessions.iter().find(|s| s.name == name)
    }

    /// The session marked `default: true`, if any.
    pub fn default_session(&self) -> Option<&SessionDescriptor> {
        self.sessions.iter().find(|s| s.default)
    }
}
