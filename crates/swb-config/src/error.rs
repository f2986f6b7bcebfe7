//! Errors raised while reading configuration documents.

use thiserror::Error;

/// Error reading a solver configuration or module descriptor.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not well-formed YAML or does not match the model.
    #[error("the {document} is malformed: {reason}")]
    Malformed {
        /// Which document failed, e.g. "solver config".
        document: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The module descriptor declares the same session twice.
    #[error("the module descriptor declares session ({0}) more than once")]
    DuplicateSession(String),

    /// The module descriptor marks more than one session as default.
    #[error("the module descriptor declares more than one default session: {0} and {1}")]
    MultipleDefaultSessions(String, String),
}
