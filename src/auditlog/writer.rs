//! Built-in audit log writers

use super::{AuditLog, AuditLogConfig, AuditLogFormatter, AuditLogWriter};
use crate::error::{InspectError, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Writer that discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopWriter;

impl AuditLogWriter for NoopWriter {
    fn init(&mut self, _config: &AuditLogConfig) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, _log: &AuditLog) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Appends every formatted record to a single file
///
/// The file is `config.target`, joined onto `config.dir` when the target is
/// relative and a dir is set. Missing parent directories are created.
#[derive(Default)]
pub struct SerialWriter {
    file: Option<File>,
    path: PathBuf,
    formatter: Option<Arc<dyn AuditLogFormatter>>,
}

impl SerialWriter {
    /// Path of the file being written (empty before `init`)
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resolve_path(config: &AuditLogConfig) -> Result<PathBuf> {
        if config.target.is_empty() {
            return Err(InspectError::Config(
                "serial audit log writer requires a target".to_string(),
            ));
        }
        let target = Path::new(&config.target);
        if target.is_relative() && !config.dir.as_os_str().is_empty() {
            Ok(config.dir.join(target))
        } else {
            Ok(target.to_path_buf())
        }
    }
}

#[cfg(unix)]
fn create_dir(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(mode)
        .create(path)
}

#[cfg(not(unix))]
fn create_dir(path: &Path, _mode: u32) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

#[cfg(unix)]
fn open_append(path: &Path, mode: u32) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(mode)
        .open(path)
}

#[cfg(not(unix))]
fn open_append(path: &Path, _mode: u32) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl AuditLogWriter for SerialWriter {
    fn init(&mut self, config: &AuditLogConfig) -> Result<()> {
        let formatter = Arc::clone(config.formatter()?);
        let path = Self::resolve_path(config)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir(parent, config.dir_mode).map_err(|e| {
                    InspectError::Config(format!(
                        "Failed to create audit log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = open_append(&path, config.file_mode).map_err(|e| {
            InspectError::Config(format!(
                "Failed to open audit log {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path.display(), "Serial audit log opened");
        self.file = Some(file);
        self.path = path;
        self.formatter = Some(formatter);
        Ok(())
    }

    fn write(&mut self, log: &AuditLog) -> Result<()> {
        let (file, formatter) = match (self.file.as_mut(), self.formatter.as_ref()) {
            (Some(file), Some(formatter)) => (file, formatter),
            _ => {
                return Err(InspectError::Config(
                    "serial audit log writer is not open".to_string(),
                ))
            }
        };

        let mut record = formatter.format(log)?;
        if record.last() != Some(&b'\n') {
            record.push(b'\n');
        }
        file.write_all(&record)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
            tracing::debug!(path = %self.path.display(), "Serial audit log closed");
        }
        Ok(())
    }
}
