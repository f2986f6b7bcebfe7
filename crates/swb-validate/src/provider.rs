//! Collaborators consumed by the build and smoke-test stages.

use swb_core::{Project, ValidationFault};
use swb_solver::BuildArtifact;

/// Namespace sample payloads live under unless configured otherwise.
pub const DEFAULT_SAMPLE_NAMESPACE: &str = "swb/samples";

/// File extension of sample payloads.
pub const DEFAULT_SAMPLE_EXTENSION: &str = "json";

/// Supplies the compiled module for a project.
pub trait BuildArtifactProvider: Send + Sync {
    /// Build (or fetch) the project's artifact. Compile errors already
    /// reported elsewhere are ignored; only a missing artifact is a fault.
    ///
    /// # Errors
    ///
    /// A `FactoryBuild` fault when no artifact can be assembled.
    fn build_artifact(&self, project: &Project) -> Result<BuildArtifact, ValidationFault>;
}

/// Supplies the canned problem instance a project's smoke test solves.
pub trait SamplePayloadLoader: Send + Sync {
    /// Load the sample for `project_name`, keyed by [`sample_payload_key`].
    ///
    /// # Errors
    ///
    /// A `RuntimeSolve` fault when the sample does not exist or cannot be
    /// read.
    fn load_sample_payload(&self, project_name: &str) -> Result<Vec<u8>, ValidationFault>;
}

/// `<namespace>/solution/<project_name>.<extension>`
pub fn sample_payload_key(namespace: &str, project_name: &str, extension: &str) -> String {
    format!(
        "{}/solution/{project_name}.{extension}",
        namespace.trim_end_matches('/')
    )
}
