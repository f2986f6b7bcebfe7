//! # Module Container
//!
//! The execution environment for one built module: its resources, its
//! classes, and its declared sessions. Solver factories resolve every name
//! in a configuration against a container.

use std::collections::BTreeMap;
use std::sync::Arc;

use swb_config::{ModuleDescriptor, MODULE_DESCRIPTOR_PATH};

use crate::error::SolverError;
use crate::registry::ClassRegistry;

/// Output of building a project: resource files keyed by their path under
/// the resources root, plus the classes the module provides.
#[derive(Debug, Clone, Default)]
pub struct BuildArtifact {
    resources: BTreeMap<String, Vec<u8>>,
    classes: Arc<ClassRegistry>,
}

impl BuildArtifact {
    pub fn new(classes: Arc<ClassRegistry>) -> Self {
        Self {
            resources: BTreeMap::new(),
            classes,
        }
    }

    pub fn with_resource(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert_resource(path, bytes);
        self
    }

    pub fn insert_resource(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.resources.insert(path.into(), bytes.into());
    }

    pub fn resource(&self, path: &str) -> Option<&[u8]> {
        self.resources.get(path).map(Vec::as_slice)
    }

    pub fn resource_paths(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}

/// A module ready to build solvers from.
#[derive(Debug)]
pub struct SolverContainer {
    artifact: BuildArtifact,
    module: ModuleDescriptor,
}

impl SolverContainer {
    /// Create a container, reading the module descriptor if the artifact
    /// has one. A module without a descriptor has no sessions.
    ///
    /// # Errors
    ///
    /// `SolverError::Config` if the descriptor is malformed.
    pub fn new(artifact: BuildArtifact) -> Result<Self, SolverError> {
        let module = match artifact.resource(MODULE_DESCRIPTOR_PATH) {
            Some(bytes) => ModuleDescriptor::from_yaml_slice(bytes)?,
            None => ModuleDescriptor::default(),
        };
        tracing::debug!(
            resources = artifact.resources.len(),
            sessions = module.sessions.len(),
            "created solver container"
        );
        Ok(Self { artifact, module })
    }

    pub fn resource(&self, path: &str) -> Option<&[u8]> {
        self.artifact.resource(path)
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.artifact.classes
    }

    pub fn module(&self) -> &ModuleDescriptor {
        &self.module
    }

    /// Name of the session marked default in the module descriptor.
    pub fn default_session_name(&self) -> Option<&str> {
        self.module.default_session().map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_is_optional() {
        let c = SolverContainer::new(BuildArtifact::default()).unwrap();
        assert!(c.module().sessions.is_empty());
        assert_eq!(c.default_session_name(), None);
    }

    #[test]
    fn default_session_comes_from_descriptor() {
        let artifact = BuildArtifact::default().with_resource(
            MODULE_DESCRIPTOR_PATH,
            "sessions:\n  - name: main\n    default: true\n",
        );
        let c = SolverContainer::new(artifact).unwrap();
        assert_eq!(c.default_session_name(), Some("main"));
    }

    #[test]
    fn malformed_descriptor_fails_creation() {
        let artifact =
            BuildArtifact::default().with_resource(MODULE_DESCRIPTOR_PATH, "sessions: 12");
        let err = SolverContainer::new(artifact).unwrap_err();
        assert!(err.to_string().contains("module descriptor is malformed"));
    }

    #[test]
    fn resources_are_listed_in_order() {
        let artifact = BuildArtifact::default()
            .with_resource("b.yaml", "")
            .with_resource("a.yaml", "");
        assert_eq!(artifact.resource_paths().collect::<Vec<_>>(), ["a.yaml", "b.yaml"]);
    }
}
