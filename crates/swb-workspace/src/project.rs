//! Locating and loading `project.yaml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use swb_core::{Project, ProjectResolver, ResourceRef, ValidationFault};

/// The project descriptor filename.
pub const PROJECT_FILE: &str = "project.yaml";

/// Contents of `project.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Search upward from `start` for a directory containing `project.yaml`.
///
/// Returns the directory (the project root), not the file. `None` if the
/// filesystem root is reached first.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = if start.is_dir() {
        start.to_path_buf()
    } else {
        start.parent()?.to_path_buf()
    };

    loop {
        if current.join(PROJECT_FILE).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

fn load_descriptor(path: &Path) -> Result<ProjectDescriptor, ValidationFault> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ValidationFault::config_resolution(format!(
            "the project descriptor ({}) cannot be read: {e}",
            path.display()
        ))
    })?;
    let descriptor: ProjectDescriptor = serde_yaml::from_str(&content).map_err(|e| {
        ValidationFault::config_resolution(format!(
            "the project descriptor ({}) is malformed: {e}",
            path.display()
        ))
    })?;
    if descriptor.name.trim().is_empty() {
        return Err(ValidationFault::config_resolution(format!(
            "the project descriptor ({}) has an empty name",
            path.display()
        )));
    }
    Ok(descriptor)
}

/// Resolves resources to the nearest enclosing project on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProjectResolver;

impl ProjectResolver for FsProjectResolver {
    fn resolve_project(&self, resource: &ResourceRef) -> Result<Project, ValidationFault> {
        let root = find_project_root(resource.location()).ok_or_else(|| {
            ValidationFault::no_project(format!("no {PROJECT_FILE} found above ({resource})"))
        })?;
        let descriptor = load_descriptor(&root.join(PROJECT_FILE))?;
        tracing::debug!(project = %descriptor.name, root = %root.display(), "resolved project");
        Ok(Project::new(descriptor.name, root))
    }
}
