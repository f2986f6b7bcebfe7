//! Fakes and fixtures shared by this crate's unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use swb_config::MODULE_DESCRIPTOR_PATH;
use swb_core::{
    Diagnostic, DocumentValidator, Project, ProjectResolver, ResourceRef, ValidationFault,
};
use swb_domains::cloudbalancing;
use swb_solver::BuildArtifact;

use crate::provider::{sample_payload_key, BuildArtifactProvider, SamplePayloadLoader};

pub const ROOT: &str = "/work/optacloud";
pub const CONFIG_PATH: &str = "cloudbalancing/cloudBalancingSolverConfig.yaml";

pub const VALID_CONFIG: &str = "\
solution_class: cloudbalancing::CloudBalance
entity_classes: [cloudbalancing::CloudProcess]
score_director:
  easy_score_calculator_class: cloudbalancing::CloudBalancingEasyScoreCalculator
termination:
  minutes_spent_limit: 10
";

pub fn resource() -> ResourceRef {
    ResourceRef::new(format!("{ROOT}/src/main/resources/{CONFIG_PATH}"))
}

pub fn project(name: &str) -> Project {
    Project::new(name, ROOT)
}

pub fn artifact(config: &str) -> BuildArtifact {
    BuildArtifact::new(Arc::new(swb_domains::class_registry()))
        .with_resource(MODULE_DESCRIPTOR_PATH, cloudbalancing::MODULE_DESCRIPTOR)
        .with_resource(CONFIG_PATH, config)
}

pub struct FixedProject(pub Result<Project, ValidationFault>);

impl ProjectResolver for FixedProject {
    fn resolve_project(&self, _resource: &ResourceRef) -> Result<Project, ValidationFault> {
        self.0.clone()
    }
}

pub struct FixedDocuments(pub Vec<Diagnostic>);

impl DocumentValidator for FixedDocuments {
    fn validate(&self, _resource: &ResourceRef, _content: &str) -> Vec<Diagnostic> {
        self.0.clone()
    }
}

/// Serves one artifact and counts how often it was asked for.
pub struct SpyArtifacts {
    artifact: Result<BuildArtifact, ValidationFault>,
    pub calls: AtomicUsize,
}

impl SpyArtifacts {
    pub fn new(artifact: Result<BuildArtifact, ValidationFault>) -> Self {
        Self {
            artifact,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_config(config: &str) -> Self {
        Self::new(Ok(artifact(config)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BuildArtifactProvider for SpyArtifacts {
    fn build_artifact(&self, _project: &Project) -> Result<BuildArtifact, ValidationFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.artifact.clone()
    }
}

/// Serves bundled samples and counts loads.
#[derive(Default)]
pub struct SpySamples {
    pub calls: AtomicUsize,
}

impl SamplePayloadLoader for SpySamples {
    fn load_sample_payload(&self, project_name: &str) -> Result<Vec<u8>, ValidationFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = sample_payload_key(swb_domains::SAMPLE_NAMESPACE, project_name, "json");
        swb_domains::sample(&key).map(<[u8]>::to_vec).ok_or_else(|| {
            ValidationFault::runtime_solve(format!("the sample payload ({key}) does not exist"))
        })
    }
}
