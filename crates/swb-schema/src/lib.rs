//! # swb-schema — Generic Document Validation
//!
//! The first gate of the pipeline: structural checks over the raw text of a
//! solver configuration, before anything is built.
//!
//! [`GenericValidator`] runs a list of [`DocumentCheck`]s and passes every
//! diagnostic through an injected [`DiagnosticFilter`]. The stock
//! validator for solver configurations ([`GenericValidator::solver_config`])
//! checks YAML syntax and then the bundled
//! `solver-config.schema.json` (Draft 2020-12).
//!
//! ## Crate Policy
//!
//! - Depends only on `swb-core` internally.
//! - A check never fails; it reports diagnostics. Only loading a schema
//!   can fail, with [`SchemaLoadError`].

pub mod validate;

pub use validate::{
    accept_all, DiagnosticFilter, DocumentCheck, GenericValidator, SchemaCheck, SchemaLoadError,
    YamlSyntaxCheck, SCHEMA_VIOLATION_ID, SOLVER_CONFIG_SCHEMA, YAML_SYNTAX_ID,
};
