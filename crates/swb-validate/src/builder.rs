//! # Solver Factory Builder
//!
//! Turns a project and a resource into a solver factory. Most configuration
//! mistakes surface here: the artifact's container is created fresh, the
//! document is parsed out of it, and at static depth a solver is built to
//! resolve every name.

use std::sync::Arc;

use swb_core::{Project, ResourceRef, UriError, ValidationFault, SOURCE_RESOURCES_DIR};
use swb_solver::{SolverContainer, SolverError, SolverFactory};

use crate::provider::BuildArtifactProvider;

/// How far validation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationDepth {
    /// Build the factory and a solver; run nothing.
    Validate,
    /// Also run the smoke test.
    ValidateAndRun,
}

fn factory_build(err: SolverError) -> ValidationFault {
    ValidationFault::factory_build(err.to_string())
}

/// Path of `resource` inside the built module.
///
/// Computed by stripping `<project root URI>/src/main/resources/` from the
/// resource's URI. Relative locations are taken against the working
/// directory and `..` segments are resolved first.
///
/// # Errors
///
/// A `ConfigResolution` fault if either location has no file URI or the
/// resource is not under the project's resources directory.
pub fn solver_config_resource(
    project: &Project,
    resource: &ResourceRef,
) -> Result<String, ValidationFault> {
    let uri_fault = |e: UriError| ValidationFault::config_resolution(e.to_string());
    let root = project.root_uri().map_err(uri_fault)?;
    let uri = resource.to_uri().map_err(uri_fault)?;
    let prefix = format!(
        "{}/{SOURCE_RESOURCES_DIR}/",
        root.as_str().trim_end_matches('/')
    );
    let outside = || {
        ValidationFault::config_resolution(format!(
            "the resource ({resource}) is not inside the resources directory ({prefix}) of project ({})",
            project.name()
        ))
    };
    if uri.as_str().strip_prefix(&prefix).map_or(true, str::is_empty) {
        return Err(outside());
    }

    // The URI is percent-encoded; module keys are plain paths, so take the
    // same suffix from the normalized filesystem path.
    let resources = project.absolute_root().map_err(uri_fault)?.join(SOURCE_RESOURCES_DIR);
    let location = resource.absolute_location().map_err(uri_fault)?;
    let relative = location.strip_prefix(&resources).map_err(|_| outside())?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(segments.join("/"))
}

/// Builds solver factories from project artifacts.
#[derive(Clone)]
pub struct SolverFactoryBuilder {
    artifacts: Arc<dyn BuildArtifactProvider>,
}

impl std::fmt::Debug for SolverFactoryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverFactoryBuilder").finish_non_exhaustive()
    }
}

impl SolverFactoryBuilder {
    pub fn new(artifacts: Arc<dyn BuildArtifactProvider>) -> Self {
        Self { artifacts }
    }

    /// Build a solver factory for `resource`.
    ///
    /// At [`ValidationDepth::Validate`] a solver is built and dropped, so
    /// that unresolvable names fail here. At run depth the smoke test
    /// builds its own solver after adjusting the configuration.
    ///
    /// # Errors
    ///
    /// The first fault hit: artifact, resource path, container, parse or
    /// solver construction. Never retried.
    pub fn build(
        &self,
        project: &Project,
        resource: &ResourceRef,
        depth: ValidationDepth,
    ) -> Result<SolverFactory, ValidationFault> {
        let artifact = self.artifacts.build_artifact(project)?;
        let config_resource = solver_config_resource(project, resource)?;
        tracing::debug!(
            project = project.name(),
            resource = %config_resource,
            "building solver factory"
        );

        let container = SolverContainer::new(artifact).map_err(factory_build)?;
        let factory = SolverFactory::from_container_resource(container, &config_resource)
            .map_err(factory_build)?;

        if depth == ValidationDepth::Validate {
            factory.build_solver().map_err(factory_build)?;
        }
        Ok(factory)
    }
}
