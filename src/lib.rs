//! # a3s-inspect
//!
//! Pluggable audit-log components and input normalization for the A3S
//! inspection engine.
//!
//! ## Overview
//!
//! `a3s-inspect` provides the extension points and canonicalization
//! primitives a request-inspection engine builds on:
//!
//! - name-keyed, ASCII-case-insensitive registries for audit log writers,
//!   formatters and input transformations
//! - byte-exact normalization steps that report whether they changed their
//!   input, chained into pipelines
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_inspect::{Pipeline, Plugins};
//!
//! # fn example() -> a3s_inspect::Result<()> {
//! let plugins = Plugins::with_defaults();
//!
//! // Canonicalize untrusted input before matching
//! let pipeline = Pipeline::from_names(&plugins.transformations, ["removeQuotes", "lowercase"])?;
//! let out = pipeline.apply("\"UNION SELECT\"")?;
//! assert_eq!(out.output, "union select");
//! assert!(out.changed);
//!
//! // Look up pluggable audit components by name
//! let formatter = plugins.formatters.get("JSON")?;
//! assert_eq!(formatter.mime_type(), "application/json");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Architecture
//!
//! - **Registry** — generic name → value table behind a `RwLock`
//! - **Plugins** — the writer, formatter and transformation registries owned
//!   by one engine instance
//! - **AuditLogWriter** / **AuditLogFormatter** traits — capabilities plugins
//!   implement
//! - **Transformation** trait and **Pipeline** — normalization steps

pub mod auditlog;
pub mod error;
pub mod registry;
pub mod strings;
pub mod transform;

// Re-export core types
pub use auditlog::{
    AuditLog, AuditLogConfig, AuditLogFormatter, AuditLogSettings, AuditLogWriter, AuditLogger,
    AuditMessage, AuditRequest, AuditResponse, FormatterRegistry, WriterFactory, WriterRegistry,
};
pub use error::{ComponentKind, InspectError, Result};
pub use registry::{Plugins, Registry};
pub use strings::{ascii_to_lower, maybe_remove_quotes};
pub use transform::{Pipeline, Transformation, TransformationRegistry, Transformed};

// Re-export built-in components for convenience
pub use auditlog::{JsonFormatter, NativeFormatter, NoopWriter, SerialWriter};
pub use transform::{Base64Decode, CompressWhitespace, LowerCase, RemoveQuotes, Trim};
