//! # Validation Pipeline End to End
//!
//! Drives `SolverValidator` over real projects on disk with the filesystem
//! collaborators, the bundled schema and the bundled samples.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use swb_config::MODULE_DESCRIPTOR_PATH;
use swb_core::{Project, ResourceRef, Severity, ValidationFault, BUILD_DIAGNOSTIC_ID};
use swb_domains::cloudbalancing;
use swb_schema::{GenericValidator, SCHEMA_VIOLATION_ID};
use swb_solver::BuildArtifact;
use swb_validate::{
    BuildArtifactProvider, SmokeTestPolicy, SolverValidator, SMOKE_TEST_TIME_SPENT_LIMIT,
};
use swb_workspace::{
    find_project_root, BundledSamplePayloads, FsBuildArtifactProvider, FsProjectResolver,
};

const CONFIG_PATH: &str = "cloudbalancing/cloudBalancingSolverConfig.yaml";

const VALID_CONFIG: &str = "\
solution_class: cloudbalancing::CloudBalance
entity_classes: [cloudbalancing::CloudProcess]
score_director:
  easy_score_calculator_class: cloudbalancing::CloudBalancingEasyScoreCalculator
termination:
  minutes_spent_limit: 10
";

const SCHEDULING_MARGIN: Duration = Duration::from_millis(2000);

/// Counts artifact requests on top of the filesystem provider.
#[derive(Default)]
struct CountingArtifacts {
    inner: FsBuildArtifactProvider,
    calls: AtomicUsize,
}

impl BuildArtifactProvider for CountingArtifacts {
    fn build_artifact(&self, project: &Project) -> Result<BuildArtifact, ValidationFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.build_artifact(project)
    }
}

fn write_project(root: &Path, name: &str, config: &str) -> ResourceRef {
    let resources = root.join("src/main/resources");
    fs::create_dir_all(resources.join("META-INF")).unwrap();
    fs::create_dir_all(resources.join("cloudbalancing")).unwrap();
    fs::write(root.join("project.yaml"), format!("name: {name}\n")).unwrap();
    fs::write(
        resources.join(MODULE_DESCRIPTOR_PATH),
        cloudbalancing::MODULE_DESCRIPTOR,
    )
    .unwrap();
    let path = resources.join(CONFIG_PATH);
    fs::write(&path, config).unwrap();
    ResourceRef::new(path)
}

fn validator(artifacts: Arc<CountingArtifacts>) -> SolverValidator {
    SolverValidator::new(
        Arc::new(FsProjectResolver),
        Arc::new(GenericValidator::solver_config().unwrap()),
        artifacts,
        Arc::new(BundledSamplePayloads::default()),
        Arc::new(SmokeTestPolicy::default()),
    )
}

struct Workspace {
    _dir: tempfile::TempDir,
    root: PathBuf,
    artifacts: Arc<CountingArtifacts>,
    validator: SolverValidator,
}

fn workspace(name: &str) -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join(name);
    let artifacts = Arc::new(CountingArtifacts::default());
    Workspace {
        validator: validator(Arc::clone(&artifacts)),
        _dir: dir,
        root,
        artifacts,
    }
}

#[test]
fn document_violations_are_returned_and_nothing_is_built() {
    let ws = workspace("optacloud");
    let config = VALID_CONFIG.replace("termination:", "terminaton:");
    let resource = write_project(&ws.root, "optacloud", &config);

    let diagnostics = ws.validator.validate(&resource, &config);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].id, SCHEMA_VIOLATION_ID);
    assert!(
        diagnostics[0].message.contains("terminaton"),
        "{}",
        diagnostics[0].message
    );
    assert_eq!(ws.validator.validate_and_run(&resource, &config), diagnostics);
    assert_eq!(ws.artifacts.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn resource_outside_any_project_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    if find_project_root(dir.path()).is_some() {
        return;
    }
    let path = dir.path().join("solver.yaml");
    fs::write(&path, "not: [a solver config").unwrap();
    let resource = ResourceRef::new(path);

    let v = validator(Arc::default());
    assert!(v.validate(&resource, "not: [a solver config").is_empty());
    assert!(v.validate_and_run(&resource, "not: [a solver config").is_empty());
}

#[test]
fn clean_configuration_validates_clean() {
    let ws = workspace("optacloud");
    let resource = write_project(&ws.root, "optacloud", VALID_CONFIG);
    assert!(ws.validator.validate(&resource, VALID_CONFIG).is_empty());
    assert_eq!(ws.artifacts.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unresolvable_class_is_one_build_diagnostic() {
    let ws = workspace("optacloud");
    let config = VALID_CONFIG.replace("CloudBalancingEasyScoreCalculator", "NoSuchCalculator");
    let resource = write_project(&ws.root, "optacloud", &config);

    let diagnostics = ws.validator.validate(&resource, &config);
    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.id, BUILD_DIAGNOSTIC_ID);
    assert_eq!(d.severity, Severity::Error);
    assert_eq!(d.location, resource);
    assert!(d.message.contains("cloudbalancing::NoSuchCalculator"), "{}", d.message);
}

#[test]
fn smoke_test_is_refused_for_unlisted_project() {
    let ws = workspace("vehiclerouting");
    let config = VALID_CONFIG.replace("CloudBalancingEasyScoreCalculator", "NoSuchCalculator");
    let resource = write_project(&ws.root, "vehiclerouting", &config);

    let diagnostics = ws.validator.validate_and_run(&resource, &config);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("not supported"));
    assert_eq!(ws.artifacts.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn smoke_test_runs_within_the_hard_limit() {
    let ws = workspace("optacloud");
    let resource = write_project(&ws.root, "optacloud", VALID_CONFIG);

    let started = Instant::now();
    let diagnostics = ws.validator.validate_and_run(&resource, VALID_CONFIG);
    let elapsed = started.elapsed();

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert!(
        elapsed < SMOKE_TEST_TIME_SPENT_LIMIT + SCHEDULING_MARGIN,
        "{elapsed:?}"
    );
}

#[test]
fn smoke_test_with_session_scoring() {
    let ws = workspace("optacloud");
    let config = "\
solution_class: cloudbalancing::CloudBalance
entity_classes: [cloudbalancing::CloudProcess]
termination:
  hours_spent_limit: 1
";
    let resource = write_project(&ws.root, "optacloud", config);
    assert!(ws.validator.validate_and_run(&resource, config).is_empty());
}

#[test]
fn unreadable_project_descriptor_is_one_diagnostic() {
    let ws = workspace("optacloud");
    let resource = write_project(&ws.root, "optacloud", VALID_CONFIG);
    fs::write(ws.root.join("project.yaml"), "description: no name\n").unwrap();

    let diagnostics = ws.validator.validate(&resource, VALID_CONFIG);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("project.yaml"));
}

#[test]
fn repeated_validation_is_idempotent() {
    let ws = workspace("optacloud");
    let config = VALID_CONFIG.replace("cloudbalancing::CloudProcess", "cloudbalancing::Ghost");
    let resource = write_project(&ws.root, "optacloud", &config);

    let first = ws.validator.validate(&resource, &config);
    assert_eq!(first.len(), 1);
    for _ in 0..3 {
        assert_eq!(ws.validator.validate(&resource, &config), first);
    }
}

#[test]
fn concurrent_validation_is_independent() {
    let ws = workspace("optacloud");
    let good = write_project(&ws.root, "optacloud", VALID_CONFIG);
    let bad_config =
        VALID_CONFIG.replace("cloudbalancing::CloudBalance\n", "cloudbalancing::Nope\n");
    let bad_path = ws.root.join("src/main/resources/cloudbalancing/broken.yaml");
    fs::write(&bad_path, &bad_config).unwrap();
    let bad = ResourceRef::new(bad_path);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let (resource, content) = if i % 2 == 0 {
                    (&good, VALID_CONFIG)
                } else {
                    (&bad, bad_config.as_str())
                };
                let v = &ws.validator;
                scope.spawn(move || (i, v.validate(resource, content)))
            })
            .collect();
        for handle in handles {
            let (i, diagnostics) = handle.join().unwrap();
            if i % 2 == 0 {
                assert!(diagnostics.is_empty(), "{diagnostics:?}");
            } else {
                assert_eq!(diagnostics.len(), 1);
                assert!(diagnostics[0].message.contains("cloudbalancing::Nope"));
            }
        }
    });
    assert_eq!(ws.artifacts.calls.load(Ordering::SeqCst), 8);
}
