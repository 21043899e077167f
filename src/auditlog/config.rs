//! Audit log configuration
//!
//! `AuditLogConfig` is the runtime object handed to writers. `AuditLogSettings`
//! is its declarative, deserializable form: component names are resolved
//! through the registries in `Plugins`.

use super::{AuditLogFormatter, AuditLogger, NativeFormatter};
use crate::error::{InspectError, Result};
use crate::registry::Plugins;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default mode for audit log files (rw-r--r--)
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Default mode for audit log directories (rwxr-xr-x)
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Writer used when settings do not name one
pub const DEFAULT_WRITER: &str = "serial";

/// Runtime audit log configuration
#[derive(Clone)]
pub struct AuditLogConfig {
    /// Writer destination (e.g. a file path); empty means unset
    pub target: String,

    /// Mode bits for files a writer creates (advisory, applied by the writer)
    pub file_mode: u32,

    /// Directory for writers that spread records over several files;
    /// empty means unset
    pub dir: PathBuf,

    /// Mode bits for directories a writer creates
    pub dir_mode: u32,

    /// Formatter used to serialize records; `None` is a configuration error
    pub formatter: Option<Arc<dyn AuditLogFormatter>>,
}

impl AuditLogConfig {
    /// Create a config with default values and the native formatter
    pub fn new() -> Self {
        Self {
            target: String::new(),
            file_mode: DEFAULT_FILE_MODE,
            dir: PathBuf::new(),
            dir_mode: DEFAULT_DIR_MODE,
            formatter: Some(Arc::new(NativeFormatter)),
        }
    }

    /// The configured formatter
    ///
    /// Returns a `Config` error when no formatter is set.
    pub fn formatter(&self) -> Result<&Arc<dyn AuditLogFormatter>> {
        self.formatter
            .as_ref()
            .ok_or_else(|| InspectError::Config("audit log formatter is not set".to_string()))
    }
}

impl Default for AuditLogConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AuditLogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLogConfig")
            .field("target", &self.target)
            .field("file_mode", &format_args!("{:o}", self.file_mode))
            .field("dir", &self.dir)
            .field("dir_mode", &format_args!("{:o}", self.dir_mode))
            .field("formatter", &self.formatter.as_ref().map(|f| f.mime_type()))
            .finish()
    }
}

/// Declarative audit log settings
///
/// Every field is optional; unset fields fall back to `AuditLogConfig`
/// defaults, and an unset writer falls back to [`DEFAULT_WRITER`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditLogSettings {
    /// Registered writer name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,

    /// Registered formatter name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_mode: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir_mode: Option<u32>,
}

impl AuditLogSettings {
    /// Build the runtime config, resolving the formatter name
    pub fn to_config(&self, plugins: &Plugins) -> Result<AuditLogConfig> {
        let mut config = AuditLogConfig::new();
        if let Some(target) = &self.target {
            config.target = target.clone();
        }
        if let Some(dir) = &self.dir {
            config.dir = dir.clone();
        }
        if let Some(mode) = self.file_mode {
            config.file_mode = mode;
        }
        if let Some(mode) = self.dir_mode {
            config.dir_mode = mode;
        }
        if let Some(name) = &self.formatter {
            config.formatter = Some(plugins.formatters.get(name)?);
        }
        Ok(config)
    }

    /// Resolve writer and formatter names and initialize an `AuditLogger`
    ///
    /// Unknown names fail with `NotFound`; nothing is substituted.
    pub fn resolve(&self, plugins: &Plugins) -> Result<AuditLogger> {
        let config = self.to_config(plugins)?;
        let writer_name = self.writer.as_deref().unwrap_or(DEFAULT_WRITER);
        let writer = plugins.writers.get(writer_name)?;
        tracing::info!(
            writer = writer_name,
            formatter = self.formatter.as_deref().unwrap_or("native"),
            target = %config.target,
            "Audit logger configured"
        );
        AuditLogger::new(writer, config)
    }
}
