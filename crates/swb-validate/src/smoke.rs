//! # Smoke Test
//!
//! A short live solve of the configuration against the project's canned
//! sample problem. It catches what static validation cannot: sessions that
//! do not score, importers that reject the sample, constraints that panic.
//!
//! Only allow-listed projects may run it. [`SmokeTestRunner::admit`] checks
//! the allow-list and hands back an [`AdmittedProject`]; [`SmokeTestRunner::run`]
//! requires one, so a run cannot skip the check.

use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use swb_core::{Project, ValidationFault};
use swb_solver::SolverFactory;

use crate::provider::SamplePayloadLoader;

/// Time budget of every smoke test. Replaces whatever the document says.
pub const SMOKE_TEST_TIME_SPENT_LIMIT: Duration = Duration::from_millis(3000);

/// Projects allowed to run smoke tests unless configured otherwise.
pub const DEFAULT_ALLOWED_PROJECTS: &[&str] = &["optacloud"];

/// The set of projects allowed to run smoke tests. Built once, never
/// changed, shared by `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeTestPolicy {
    allowed: BTreeSet<String>,
}

impl Default for SmokeTestPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_PROJECTS.iter().copied())
    }
}

impl SmokeTestPolicy {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_allowed(&self, project_name: &str) -> bool {
        self.allowed.contains(project_name)
    }

    pub fn allowed_projects(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }
}

/// Proof that a project passed the allow-list.
#[derive(Debug)]
pub struct AdmittedProject<'a> {
    project: &'a Project,
}

impl<'a> AdmittedProject<'a> {
    pub fn project(&self) -> &'a Project {
        self.project
    }
}

/// Runs smoke tests for admitted projects.
#[derive(Clone)]
pub struct SmokeTestRunner {
    policy: Arc<SmokeTestPolicy>,
    samples: Arc<dyn SamplePayloadLoader>,
}

impl std::fmt::Debug for SmokeTestRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmokeTestRunner")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn runtime_solve(message: impl std::fmt::Display) -> ValidationFault {
    ValidationFault::runtime_solve(message.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("the solver panicked during the smoke test: {detail}")
}

impl SmokeTestRunner {
    pub fn new(policy: Arc<SmokeTestPolicy>, samples: Arc<dyn SamplePayloadLoader>) -> Self {
        Self { policy, samples }
    }

    /// Check `project` against the allow-list.
    ///
    /// # Errors
    ///
    /// A `Policy` fault for any project not on the list.
    pub fn admit<'a>(&self, project: &'a Project) -> Result<AdmittedProject<'a>, ValidationFault> {
        if self.policy.is_allowed(project.name()) {
            Ok(AdmittedProject { project })
        } else {
            Err(ValidationFault::policy(format!(
                "Running a smoke test for project ({}) is not supported.",
                project.name()
            )))
        }
    }

    /// Adjust a factory's configuration for a smoke test: the time budget
    /// is replaced by [`SMOKE_TEST_TIME_SPENT_LIMIT`] and, if no session is
    /// named, the module's default session is pinned.
    pub fn prepare(&self, factory: &mut SolverFactory) {
        let default_session = factory
            .container()
            .default_session_name()
            .map(str::to_owned);
        let config = factory.config_mut();
        config
            .termination_mut()
            .override_time_spent_limit(SMOKE_TEST_TIME_SPENT_LIMIT);
        if config.session_name().is_none() {
            if let Some(name) = default_session {
                config.score_director_mut().session_name = Some(name);
            }
        }
    }

    /// Solve the project's sample once with a [`SMOKE_TEST_TIME_SPENT_LIMIT`]
    /// budget, after [`prepare`](Self::prepare).
    ///
    /// # Errors
    ///
    /// `FactoryBuild` if no solver can be built from the adjusted
    /// configuration, `RuntimeSolve` for sample, import, scoring or panic
    /// failures.
    pub fn run(
        &self,
        admitted: AdmittedProject<'_>,
        mut factory: SolverFactory,
    ) -> Result<(), ValidationFault> {
        let project = admitted.project();
        self.prepare(&mut factory);

        let solver = factory
            .build_solver()
            .map_err(|e| ValidationFault::factory_build(e.to_string()))?;
        let payload = self.samples.load_sample_payload(project.name())?;
        let problem = factory.import_solution(&payload).map_err(runtime_solve)?;

        tracing::debug!(project = project.name(), "smoke test started");
        let outcome = catch_unwind(AssertUnwindSafe(|| solver.solve(problem)))
            .map_err(|panic| ValidationFault::runtime_solve(panic_message(panic.as_ref())))?
            .map_err(runtime_solve)?;

        tracing::info!(
            project = project.name(),
            best_score = %outcome.best_score,
            steps = outcome.step_count,
            elapsed_ms = u64::try_from(outcome.elapsed.as_millis()).unwrap_or(u64::MAX),
            "smoke test finished"
        );
        Ok(())
    }
}
