//! # Solver Validator
//!
//! The pipeline orchestrator. It looks at a fault's kind only to choose
//! between returning nothing (no project), returning the document
//! diagnostics, and mapping the fault to a single diagnostic.

use std::sync::Arc;

use swb_core::{
    map_fault, Diagnostic, DocumentValidator, Project, ProjectResolver, ResourceRef,
    ValidationFault,
};

use crate::builder::{SolverFactoryBuilder, ValidationDepth};
use crate::provider::{BuildArtifactProvider, SamplePayloadLoader};
use crate::smoke::{SmokeTestPolicy, SmokeTestRunner};

/// Validates solver configuration resources. `Send + Sync`; one instance
/// serves any number of concurrent calls.
#[derive(Clone)]
pub struct SolverValidator {
    projects: Arc<dyn ProjectResolver>,
    documents: Arc<dyn DocumentValidator>,
    builder: SolverFactoryBuilder,
    smoke: SmokeTestRunner,
}

impl std::fmt::Debug for SolverValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverValidator")
            .field("smoke", &self.smoke)
            .finish_non_exhaustive()
    }
}

impl SolverValidator {
    pub fn new(
        projects: Arc<dyn ProjectResolver>,
        documents: Arc<dyn DocumentValidator>,
        artifacts: Arc<dyn BuildArtifactProvider>,
        samples: Arc<dyn SamplePayloadLoader>,
        policy: Arc<SmokeTestPolicy>,
    ) -> Self {
        Self {
            projects,
            documents,
            builder: SolverFactoryBuilder::new(artifacts),
            smoke: SmokeTestRunner::new(policy, samples),
        }
    }

    /// Check that the configuration is well-formed and builds.
    pub fn validate(&self, resource: &ResourceRef, content: &str) -> Vec<Diagnostic> {
        self.validate_at(resource, content, ValidationDepth::Validate)
    }

    /// Everything [`validate`](Self::validate) does, plus a smoke test for
    /// allow-listed projects.
    pub fn validate_and_run(&self, resource: &ResourceRef, content: &str) -> Vec<Diagnostic> {
        self.validate_at(resource, content, ValidationDepth::ValidateAndRun)
    }

    /// Run the pipeline to `depth`. Empty means the resource is valid.
    pub fn validate_at(
        &self,
        resource: &ResourceRef,
        content: &str,
        depth: ValidationDepth,
    ) -> Vec<Diagnostic> {
        let project = match self.projects.resolve_project(resource) {
            Ok(project) => project,
            Err(fault) if fault.is_no_project() => {
                tracing::debug!(resource = %resource, "resource has no project; nothing to validate");
                return Vec::new();
            }
            Err(fault) => return vec![report(&fault, resource)],
        };
        tracing::debug!(
            resource = %resource,
            project = project.name(),
            ?depth,
            "validating solver config"
        );

        let diagnostics = self.documents.validate(resource, content);
        if !diagnostics.is_empty() {
            return diagnostics;
        }

        match self.build_and_run(&project, resource, depth) {
            Ok(()) => Vec::new(),
            Err(fault) => vec![report(&fault, resource)],
        }
    }

    fn build_and_run(
        &self,
        project: &Project,
        resource: &ResourceRef,
        depth: ValidationDepth,
    ) -> Result<(), ValidationFault> {
        match depth {
            ValidationDepth::Validate => {
                self.builder.build(project, resource, depth)?;
            }
            ValidationDepth::ValidateAndRun => {
                let admitted = self.smoke.admit(project)?;
                let factory = self.builder.build(project, resource, depth)?;
                self.smoke.run(admitted, factory)?;
            }
        }
        Ok(())
    }
}

fn report(fault: &ValidationFault, resource: &ResourceRef) -> Diagnostic {
    tracing::warn!(
        kind = %fault.kind(),
        resource = %resource,
        message = fault.message(),
        "validation fault"
    );
    map_fault(fault, resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use swb_core::{Severity, BUILD_DIAGNOSTIC_ID};

    struct Fixture {
        artifacts: Arc<SpyArtifacts>,
        samples: Arc<SpySamples>,
        validator: SolverValidator,
    }

    fn fixture(
        project: Result<Project, ValidationFault>,
        document: Vec<Diagnostic>,
        config: &str,
    ) -> Fixture {
        let artifacts = Arc::new(SpyArtifacts::with_config(config));
        let samples = Arc::new(SpySamples::default());
        let validator = SolverValidator::new(
            Arc::new(FixedProject(project)),
            Arc::new(FixedDocuments(document)),
            artifacts.clone(),
            samples.clone(),
            Arc::new(SmokeTestPolicy::default()),
        );
        Fixture {
            artifacts,
            samples,
            validator,
        }
    }

    fn clean(name: &str, config: &str) -> Fixture {
        fixture(Ok(project(name)), Vec::new(), config)
    }

    #[test]
    fn document_diagnostics_short_circuit() {
        let doc = vec![
            Diagnostic::error(resource(), "first"),
            Diagnostic {
                id: 7,
                severity: Severity::Warning,
                location: resource(),
                message: "second".into(),
            },
        ];
        let f = fixture(Ok(project("optacloud")), doc.clone(), VALID_CONFIG);
        assert_eq!(f.validator.validate(&resource(), VALID_CONFIG), doc);
        assert_eq!(f.validator.validate_and_run(&resource(), VALID_CONFIG), doc);
        assert_eq!(f.artifacts.calls(), 0);
    }

    #[test]
    fn no_project_is_silent_at_both_depths() {
        let f = fixture(
            Err(ValidationFault::no_project("not in a project")),
            vec![Diagnostic::error(resource(), "never reached")],
            VALID_CONFIG,
        );
        assert!(f.validator.validate(&resource(), "").is_empty());
        assert!(f.validator.validate_and_run(&resource(), "").is_empty());
        assert_eq!(f.artifacts.calls(), 0);
    }

    #[test]
    fn other_resolution_faults_become_one_diagnostic() {
        let f = fixture(
            Err(ValidationFault::config_resolution("project.yaml is malformed")),
            Vec::new(),
            VALID_CONFIG,
        );
        let d = f.validator.validate(&resource(), VALID_CONFIG);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].message, "project.yaml is malformed");
    }

    #[test]
    fn valid_config_is_clean() {
        let f = clean("optacloud", VALID_CONFIG);
        assert!(f.validator.validate(&resource(), VALID_CONFIG).is_empty());
        assert_eq!(f.artifacts.calls(), 1);
        assert_eq!(f.samples.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn unresolvable_class_is_one_diagnostic() {
        let config = VALID_CONFIG.replace(
            "cloudbalancing::CloudProcess",
            "cloudbalancing::CloudProces",
        );
        let f = clean("optacloud", &config);
        let d = f.validator.validate(&resource(), &config);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].id, BUILD_DIAGNOSTIC_ID);
        assert_eq!(d[0].severity, Severity::Error);
        assert_eq!(d[0].location, resource());
        assert!(d[0].message.contains("cloudbalancing::CloudProces"));
    }

    #[test]
    fn unlisted_project_is_rejected_before_build() {
        let f = clean("vehiclerouting", "solution_class: [broken");
        let d = f.validator.validate_and_run(&resource(), "");
        assert_eq!(d.len(), 1);
        assert!(d[0].message.contains("not supported"));
        assert_eq!(f.artifacts.calls(), 0);
    }

    #[test]
    fn unlisted_project_still_validates_statically() {
        let f = clean("vehiclerouting", VALID_CONFIG);
        assert!(f.validator.validate(&resource(), VALID_CONFIG).is_empty());
    }

    #[test]
    fn repeated_calls_give_identical_results() {
        let config = VALID_CONFIG.replace("minutes_spent_limit: 10", "best_score_limit: nonsense");
        let f = clean("optacloud", &config);
        let first = f.validator.validate(&resource(), &config);
        assert_eq!(first.len(), 1);
        assert_eq!(first, f.validator.validate(&resource(), &config));
    }

    #[test]
    fn validator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SolverValidator>();
    }
}
