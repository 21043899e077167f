//! Error types for a3s-inspect

use std::fmt;
use thiserror::Error;

/// Kind of pluggable component a registry lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Audit log writer
    Writer,
    /// Audit log formatter
    Formatter,
    /// Input transformation
    Transformation,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Writer => f.write_str("writer"),
            ComponentKind::Formatter => f.write_str("formatter"),
            ComponentKind::Transformation => f.write_str("transformation"),
        }
    }
}

/// Errors that can occur in the inspection core
#[derive(Debug, Error)]
pub enum InspectError {
    /// No component registered under the requested name
    ///
    /// `name` is the name exactly as the caller supplied it.
    #[error("invalid {kind} {name:?}")]
    NotFound { kind: ComponentKind, name: String },

    /// A transformation could not process its input
    #[error("transformation '{name}' failed: {reason}")]
    Transform { name: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O failure in a file-backed writer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InspectError {
    /// Build a `NotFound` error for the given component kind and name
    pub fn not_found(kind: ComponentKind, name: impl Into<String>) -> Self {
        InspectError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Check whether this is a registry miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, InspectError::NotFound { .. })
    }
}

/// Result type alias for inspection operations
pub type Result<T> = std::result::Result<T, InspectError>;
