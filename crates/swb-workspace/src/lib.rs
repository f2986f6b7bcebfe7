//! # swb-workspace — Filesystem Collaborators
//!
//! Default implementations of the collaborators the validation pipeline
//! consumes, backed by a project layout on disk:
//!
//! ```text
//! optacloud/
//! ├── project.yaml                    name: optacloud
//! └── src/main/resources/
//!     ├── META-INF/module.yaml        constraint sessions
//!     └── cloudbalancing/solver.yaml  the solver configuration
//! ```
//!
//! - [`FsProjectResolver`] finds the nearest `project.yaml` above a resource.
//! - [`FsBuildArtifactProvider`] packages `src/main/resources` with a class
//!   registry.
//! - [`DirectorySamplePayloads`] and [`BundledSamplePayloads`] load sample
//!   problems by the `<namespace>/solution/<project>.json` convention.

pub mod artifact;
pub mod project;
pub mod samples;

pub use artifact::FsBuildArtifactProvider;
pub use project::{find_project_root, FsProjectResolver, ProjectDescriptor, PROJECT_FILE};
pub use samples::{BundledSamplePayloads, DirectorySamplePayloads};
