//! Build artifacts assembled from a project's resources directory.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use swb_core::{Project, ValidationFault};
use swb_solver::{BuildArtifact, ClassRegistry};
use swb_validate::BuildArtifactProvider;

/// Packages every file under `src/main/resources` together with a fixed
/// class registry.
///
/// The artifact is rebuilt on every call so that edits on disk are always
/// seen.
#[derive(Debug, Clone)]
pub struct FsBuildArtifactProvider {
    classes: Arc<ClassRegistry>,
}

impl Default for FsBuildArtifactProvider {
    fn default() -> Self {
        Self::new(Arc::new(swb_domains::class_registry()))
    }
}

impl FsBuildArtifactProvider {
    pub fn new(classes: Arc<ClassRegistry>) -> Self {
        Self { classes }
    }
}

fn collect(dir: &Path, prefix: &str, artifact: &mut BuildArtifact) -> std::io::Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let key = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        let path = entry.path();
        if path.is_dir() {
            collect(&path, &key, artifact)?;
            continue;
        }
        match fs::read(&path) {
            Ok(bytes) => artifact.insert_resource(key, bytes),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable resource");
            }
        }
    }
    Ok(())
}

impl BuildArtifactProvider for FsBuildArtifactProvider {
    fn build_artifact(&self, project: &Project) -> Result<BuildArtifact, ValidationFault> {
        let resources = project.resources_dir();
        if !resources.is_dir() {
            return Err(ValidationFault::factory_build(format!(
                "the project ({}) has no resources directory ({})",
                project.name(),
                resources.display()
            )));
        }

        let mut artifact = BuildArtifact::new(Arc::clone(&self.classes));
        collect(&resources, "", &mut artifact).map_err(|e| {
            ValidationFault::factory_build(format!(
                "the resources of project ({}) cannot be read: {e}",
                project.name()
            ))
        })?;
        tracing::debug!(
            project = project.name(),
            resources = artifact.resource_paths().count(),
            "assembled build artifact"
        );
        Ok(artifact)
    }
}
