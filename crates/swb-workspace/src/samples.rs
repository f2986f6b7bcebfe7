//! Sample payload loaders.

use std::path::PathBuf;

use swb_core::ValidationFault;
use swb_validate::{
    sample_payload_key, SamplePayloadLoader, DEFAULT_SAMPLE_EXTENSION, DEFAULT_SAMPLE_NAMESPACE,
};

/// Loads samples from a directory tree laid out by key:
/// `<dir>/<namespace>/solution/<project>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySamplePayloads {
    dir: PathBuf,
    namespace: String,
}

impl DirectorySamplePayloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            namespace: DEFAULT_SAMPLE_NAMESPACE.to_string(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

impl SamplePayloadLoader for DirectorySamplePayloads {
    fn load_sample_payload(&self, project_name: &str) -> Result<Vec<u8>, ValidationFault> {
        let key = sample_payload_key(&self.namespace, project_name, DEFAULT_SAMPLE_EXTENSION);
        let path = self.dir.join(&key);
        std::fs::read(&path).map_err(|e| {
            ValidationFault::runtime_solve(format!(
                "the sample ({key}) cannot be read from ({}): {e}",
                path.display()
            ))
        })
    }
}

/// Serves the samples compiled into `swb-domains`.
#[derive(Debug, Clone)]
pub struct BundledSamplePayloads {
    namespace: String,
}

impl Default for BundledSamplePayloads {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_NAMESPACE)
    }
}

impl BundledSamplePayloads {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

impl SamplePayloadLoader for BundledSamplePayloads {
    fn load_sample_payload(&self, project_name: &str) -> Result<Vec<u8>, ValidationFault> {
        let key = sample_payload_key(&self.namespace, project_name, DEFAULT_SAMPLE_EXTENSION);
        swb_domains::sample(&key)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| {
                ValidationFault::runtime_solve(format!("the sample ({key}) does not exist"))
            })
    }
}
