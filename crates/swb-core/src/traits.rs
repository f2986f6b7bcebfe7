//! # Collaborator Traits
//!
//! The two collaborators consulted before any build work starts. Both are
//! `Send + Sync` so that one validator instance can serve concurrent calls.

use crate::diagnostic::Diagnostic;
use crate::fault::ValidationFault;
use crate::resource::{Project, ResourceRef};

/// Maps a resource to the project that owns it.
pub trait ProjectResolver: Send + Sync {
    /// Resolve the owning project.
    ///
    /// # Errors
    ///
    /// A fault of kind `NoProject` when the resource belongs to no project.
    /// Any other kind is reported to the caller as a diagnostic.
    fn resolve_project(&self, resource: &ResourceRef) -> Result<Project, ValidationFault>;
}

/// Generic structural and content checks over a raw document.
pub trait DocumentValidator: Send + Sync {
    /// Validate `content`, returning every problem found. Empty means clean.
    fn validate(&self, resource: &ResourceRef, content: &str) -> Vec<Diagnostic>;
}
