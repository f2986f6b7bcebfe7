//! # Diagnostics
//!
//! The output unit of the pipeline. An empty sequence means the resource is
//! valid; anything else is shown to the user as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fault::ValidationFault;
use crate::resource::ResourceRef;

/// Identifier carried by every diagnostic produced from a fault.
pub const BUILD_DIAGNOSTIC_ID: u32 = 0;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// A structured validation result tied to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: u32,
    pub severity: Severity,
    pub location: ResourceRef,
    pub message: String,
}

impl Diagnostic {
    /// An `ERROR` diagnostic with the build/run identifier.
    pub fn error(location: ResourceRef, message: impl Into<String>) -> Self {
        Self {
            id: BUILD_DIAGNOSTIC_ID,
            severity: Severity::Error,
            location,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.location, self.message)
    }
}

/// Convert a fault into the single diagnostic reported for it.
///
/// The fault message is passed through verbatim: no prefix, no kind tag,
/// no backtrace.
pub fn map_fault(fault: &ValidationFault, resource: &ResourceRef) -> Diagnostic {
    Diagnostic::error(resource.clone(), fault.message())
}
