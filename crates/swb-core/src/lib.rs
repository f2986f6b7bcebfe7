//! # swb-core — Foundational Types for the Solver Workbench
//!
//! Every other crate in the workspace depends on `swb-core`; it depends on
//! nothing internal.
//!
//! ## Key Types
//!
//! - [`ResourceRef`]: the document being validated, with canonical URI math.
//! - [`Project`]: the build unit owning a resource.
//! - [`Diagnostic`]: the output unit of every validation call.
//! - [`ValidationFault`]: the single tagged fault type. Every failure in the
//!   pipeline is one of six [`FaultKind`]s carrying a display message.
//!
//! ## Collaborator Traits
//!
//! [`ProjectResolver`] and [`DocumentValidator`] are the two collaborators
//! consumed before any build work starts. Their implementations live in
//! `swb-workspace` and `swb-schema`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `swb-*` crates.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostic;
pub mod fault;
pub mod resource;
pub mod traits;

pub use diagnostic::{map_fault, Diagnostic, Severity, BUILD_DIAGNOSTIC_ID};
pub use fault::{FaultKind, ValidationFault};
pub use resource::{absolute_path, Project, ResourceRef, UriError, SOURCE_RESOURCES_DIR};
pub use traits::{DocumentValidator, ProjectResolver};
