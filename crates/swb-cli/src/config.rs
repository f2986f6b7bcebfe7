//! # CLI Configuration
//!
//! `swb.yaml`, read once at start-up:
//!
//! ```yaml
//! smoke_test:
//!   allowed_projects: [optacloud]
//!   sample_dir: ./samples          # optional; bundled samples otherwise
//!   sample_namespace: swb/samples
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use swb_schema::GenericValidator;
use swb_validate::{
    SamplePayloadLoader, SmokeTestPolicy, SolverValidator, DEFAULT_ALLOWED_PROJECTS,
    DEFAULT_SAMPLE_NAMESPACE,
};
use swb_workspace::{
    BundledSamplePayloads, DirectorySamplePayloads, FsBuildArtifactProvider, FsProjectResolver,
};

/// Configuration file looked up in the working directory when `--config`
/// is not given.
pub const DEFAULT_CONFIG_FILE: &str = "swb.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub smoke_test: SmokeTestSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmokeTestSettings {
    #[serde(default = "default_allowed_projects")]
    pub allowed_projects: Vec<String>,
    #[serde(default)]
    pub sample_dir: Option<PathBuf>,
    #[serde(default = "default_sample_namespace")]
    pub sample_namespace: String,
}

fn default_allowed_projects() -> Vec<String> {
    DEFAULT_ALLOWED_PROJECTS.iter().map(|s| s.to_string()).collect()
}

fn default_sample_namespace() -> String {
    DEFAULT_SAMPLE_NAMESPACE.to_string()
}

impl Default for SmokeTestSettings {
    fn default() -> Self {
        Self {
            allowed_projects: default_allowed_projects(),
            sample_dir: None,
            sample_namespace: default_sample_namespace(),
        }
    }
}

impl CliConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `./swb.yaml` is used if
    /// present and the defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE} found; using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn smoke_test_policy(&self) -> SmokeTestPolicy {
        SmokeTestPolicy::new(self.smoke_test.allowed_projects.iter().cloned())
    }

    pub fn sample_loader(&self) -> Arc<dyn SamplePayloadLoader> {
        let namespace = self.smoke_test.sample_namespace.clone();
        match &self.smoke_test.sample_dir {
            Some(dir) => Arc::new(DirectorySamplePayloads::new(dir).with_namespace(namespace)),
            None => Arc::new(BundledSamplePayloads::new(namespace)),
        }
    }

    /// Assemble a validator over the filesystem collaborators.
    pub fn validator(&self) -> Result<SolverValidator> {
        let documents =
            GenericValidator::solver_config().context("failed to load the bundled schema")?;
        Ok(SolverValidator::new(
            Arc::new(FsProjectResolver),
            Arc::new(documents),
            Arc::new(FsBuildArtifactProvider::default()),
            self.sample_loader(),
            Arc::new(self.smoke_test_policy()),
        ))
    }
}
