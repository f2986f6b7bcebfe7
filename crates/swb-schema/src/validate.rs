//! # Generic Validator
//!
//! Runtime validation of solver configuration documents. YAML is converted
//! to a JSON value and checked against a JSON Schema (Draft 2020-12).
//!
//! Every violation becomes its own diagnostic, so a document can produce
//! many. Diagnostics carry their own ids, distinct from the id used for
//! build and run faults.
//!
//! ## Customization
//!
//! A [`GenericValidator`] is shared as-is across callers. The one thing a
//! caller may change is which diagnostics are kept, by injecting a
//! [`DiagnosticFilter`].

use std::fmt;
use std::sync::Arc;

use jsonschema::Validator;
use serde_json::Value;
use swb_core::{Diagnostic, DocumentValidator, ResourceRef, Severity};
use thiserror::Error;

/// Bundled schema for solver configuration documents.
pub const SOLVER_CONFIG_SCHEMA: &str = include_str!("../schemas/solver-config.schema.json");

/// Diagnostic id for documents that are not YAML at all.
pub const YAML_SYNTAX_ID: u32 = 100;

/// Diagnostic id for schema violations.
pub const SCHEMA_VIOLATION_ID: u32 = 101;

/// Decides whether a diagnostic is reported.
pub type DiagnosticFilter = Arc<dyn Fn(&Diagnostic) -> bool + Send + Sync>;

/// The default filter: keep everything.
pub fn accept_all() -> DiagnosticFilter {
    Arc::new(|_| true)
}

/// Error loading or compiling a schema.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    #[error("schema load error for '{schema_name}': {reason}")]
    InvalidJson { schema_name: String, reason: String },

    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuild { schema_name: String, reason: String },
}

/// One rule applied to a raw document.
pub trait DocumentCheck: Send + Sync {
    fn name(&self) -> &str;

    fn check(&self, resource: &ResourceRef, content: &str) -> Vec<Diagnostic>;
}

/// The document must parse as YAML.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlSyntaxCheck;

impl DocumentCheck for YamlSyntaxCheck {
    fn name(&self) -> &str {
        "yaml-syntax"
    }

    fn check(&self, resource: &ResourceRef, content: &str) -> Vec<Diagnostic> {
        match serde_yaml::from_str::<serde_yaml::Value>(content) {
            Ok(_) => Vec::new(),
            Err(e) => vec![Diagnostic {
                id: YAML_SYNTAX_ID,
                severity: Severity::Error,
                location: resource.clone(),
                message: format!("the document is not valid YAML: {e}"),
            }],
        }
    }
}

/// The document must conform to a JSON Schema.
///
/// Documents that are not YAML are skipped; [`YamlSyntaxCheck`] reports
/// those.
pub struct SchemaCheck {
    schema_name: String,
    validator: Validator,
}

impl fmt::Debug for SchemaCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaCheck")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl SchemaCheck {
    /// Compile a schema from its JSON text.
    ///
    /// # Errors
    ///
    /// `InvalidJson` if the text is not JSON, `ValidatorBuild` if it is
    /// not a usable schema.
    pub fn from_json_str(
        schema_name: impl Into<String>,
        schema: &str,
    ) -> Result<Self, SchemaLoadError> {
        let schema_name = schema_name.into();
        let value: Value =
            serde_json::from_str(schema).map_err(|e| SchemaLoadError::InvalidJson {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            })?;
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(&value)
            .map_err(|e| SchemaLoadError::ValidatorBuild {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            schema_name,
            validator,
        })
    }

    /// The bundled solver configuration schema.
    pub fn solver_config() -> Result<Self, SchemaLoadError> {
        Self::from_json_str("solver-config.schema.json", SOLVER_CONFIG_SCHEMA)
    }
}

impl DocumentCheck for SchemaCheck {
    fn name(&self) -> &str {
        &self.schema_name
    }

    fn check(&self, resource: &ResourceRef, content: &str) -> Vec<Diagnostic> {
        let Ok(instance) = serde_yaml::from_str::<Value>(content) else {
            return Vec::new();
        };
        self.validator
            .iter_errors(&instance)
            .map(|e| {
                let path = e.instance_path.to_string();
                let at = if path.is_empty() { "(root)" } else { path.as_str() };
                Diagnostic {
                    id: SCHEMA_VIOLATION_ID,
                    severity: Severity::Error,
                    location: resource.clone(),
                    message: format!("{at}: {e}"),
                }
            })
            .collect()
    }
}

/// Runs every check in order and filters the combined diagnostics.
pub struct GenericValidator {
    checks: Vec<Box<dyn DocumentCheck>>,
    filter: DiagnosticFilter,
}

impl fmt::Debug for GenericValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericValidator")
            .field(
                "checks",
                &self.checks.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl Default for GenericValidator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl GenericValidator {
    pub fn new(checks: Vec<Box<dyn DocumentCheck>>) -> Self {
        Self {
            checks,
            filter: accept_all(),
        }
    }

    /// YAML syntax plus the bundled solver configuration schema.
    ///
    /// # Errors
    ///
    /// `SchemaLoadError` if the bundled schema does not compile.
    pub fn solver_config() -> Result<Self, SchemaLoadError> {
        Ok(Self::new(vec![
            Box::new(YamlSyntaxCheck),
            Box::new(SchemaCheck::solver_config()?),
        ]))
    }

    /// Replace the diagnostic filter.
    pub fn with_filter(mut self, filter: DiagnosticFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn check_names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }
}

impl DocumentValidator for GenericValidator {
    fn validate(&self, resource: &ResourceRef, content: &str) -> Vec<Diagnostic> {
        let diagnostics: Vec<Diagnostic> = self
            .checks
            .iter()
            .flat_map(|check| check.check(resource, content))
            .filter(|d| (self.filter)(d))
            .collect();
        if !diagnostics.is_empty() {
            tracing::debug!(
                resource = %resource,
                count = diagnostics.len(),
                "document validation reported diagnostics"
            );
        }
        diagnostics
    }
}
