//! Audit logging extension points
//!
//! Writers and formatters are pluggable by name. A writer is looked up
//! through a factory, so every consumer owns a fresh instance (its own file
//! handle, socket, ...). A formatter is stateless and shared.

use crate::error::{ComponentKind, Result};
use crate::registry::Registry;
use std::fmt;
use std::sync::Arc;

pub mod config;
pub mod formatter;
pub mod types;
pub mod writer;

pub use config::{AuditLogConfig, AuditLogSettings};
pub use formatter::{JsonFormatter, NativeFormatter};
pub use types::{AuditLog, AuditMessage, AuditRequest, AuditResponse};
pub use writer::{NoopWriter, SerialWriter};

/// Sink that persists audit records
///
/// `init` runs once before the first `write`; `close` releases whatever
/// `init` acquired.
pub trait AuditLogWriter: Send {
    /// Prepare the writer (open files, connect, ...)
    fn init(&mut self, config: &AuditLogConfig) -> Result<()>;

    /// Persist one record
    fn write(&mut self, log: &AuditLog) -> Result<()>;

    /// Flush and release resources
    fn close(&mut self) -> Result<()>;
}

/// Stateless serializer for audit records
pub trait AuditLogFormatter: Send + Sync {
    /// Render one record
    fn format(&self, log: &AuditLog) -> Result<Vec<u8>>;

    /// MIME type of the rendered output
    fn mime_type(&self) -> &str;
}

/// Zero-argument constructor for a writer
pub type WriterFactory = Arc<dyn Fn() -> Box<dyn AuditLogWriter> + Send + Sync>;

/// Registry of writer factories
///
/// Each successful `get` calls the factory, so two lookups never share an
/// instance.
pub struct WriterRegistry {
    inner: Registry<WriterFactory>,
}

impl WriterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            inner: Registry::new(ComponentKind::Writer),
        }
    }

    /// Register a writer factory under `name`, replacing any previous entry
    pub fn register<F>(&self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn AuditLogWriter> + Send + Sync + 'static,
    {
        self.inner.register(name, Arc::new(factory));
    }

    /// Build a new writer instance for `name`
    pub fn get(&self, name: &str) -> Result<Box<dyn AuditLogWriter>> {
        let factory = self.inner.get(name)?;
        Ok(factory())
    }

    /// Check whether a writer is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains(name)
    }

    /// List registered writer names
    pub fn names(&self) -> Vec<String> {
        self.inner.names()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of shared formatter instances
pub struct FormatterRegistry {
    inner: Registry<Arc<dyn AuditLogFormatter>>,
}

impl FormatterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            inner: Registry::new(ComponentKind::Formatter),
        }
    }

    /// Register a formatter under `name`, replacing any previous entry
    pub fn register(&self, name: &str, formatter: Arc<dyn AuditLogFormatter>) {
        self.inner.register(name, formatter);
    }

    /// Look up the shared formatter for `name`
    pub fn get(&self, name: &str) -> Result<Arc<dyn AuditLogFormatter>> {
        self.inner.get(name)
    }

    /// Check whether a formatter is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains(name)
    }

    /// List registered formatter names
    pub fn names(&self) -> Vec<String> {
        self.inner.names()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register the built-in writers (`noop`, `serial`) and formatters
/// (`native`, `json`)
pub fn register_builtins(writers: &WriterRegistry, formatters: &FormatterRegistry) {
    writers.register("noop", || Box::new(NoopWriter));
    writers.register("serial", || Box::new(SerialWriter::default()));
    formatters.register("native", Arc::new(NativeFormatter));
    formatters.register("json", Arc::new(JsonFormatter));
}

/// An initialized writer bound to its configuration
pub struct AuditLogger {
    writer: Box<dyn AuditLogWriter>,
    config: AuditLogConfig,
}

impl AuditLogger {
    /// Initialize `writer` with `config`
    pub fn new(mut writer: Box<dyn AuditLogWriter>, config: AuditLogConfig) -> Result<Self> {
        writer.init(&config)?;
        Ok(Self { writer, config })
    }

    /// Configuration the writer was initialized with
    pub fn config(&self) -> &AuditLogConfig {
        &self.config
    }

    /// Persist one record
    pub fn log(&mut self, log: &AuditLog) -> Result<()> {
        self.writer.write(log)
    }

    /// Flush and release the writer
    pub fn close(&mut self) -> Result<()> {
        self.writer.close()
    }
}

impl fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLogger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Writer that records transaction ids into a shared sink
    struct CaptureWriter {
        id: usize,
        sink: Arc<Mutex<Vec<(usize, String)>>>,
    }

    impl AuditLogWriter for CaptureWriter {
        fn init(&mut self, config: &AuditLogConfig) -> Result<()> {
            config.formatter().map(|_| ())
        }

        fn write(&mut self, log: &AuditLog) -> Result<()> {
            self.sink
                .lock()
                .unwrap()
                .push((self.id, log.transaction_id.clone()));
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn capture_registry() -> (WriterRegistry, Arc<AtomicUsize>, Arc<Mutex<Vec<(usize, String)>>>) {
        let reg = WriterRegistry::new();
        let created = Arc::new(AtomicUsize::new(0));
        let sink = Arc::new(Mutex::new(Vec::new()));
        let (c, s) = (Arc::clone(&created), Arc::clone(&sink));
        reg.register("Capture", move || {
            let id = c.fetch_add(1, Ordering::SeqCst);
            Box::new(CaptureWriter {
                id,
                sink: Arc::clone(&s),
            }) as Box<dyn AuditLogWriter>
        });
        (reg, created, sink)
    }

    fn sample_log(id: &str) -> AuditLog {
        AuditLog::new(id, AuditRequest::new("GET", "/", "HTTP/1.1"))
    }

    #[test]
    fn test_writer_factory_called_per_lookup() {
        let (reg, created, sink) = capture_registry();

        let mut a = reg.get("capture").unwrap();
        let mut b = reg.get("CAPTURE").unwrap();
        assert_eq!(created.load(Ordering::SeqCst), 2);

        a.write(&sample_log("tx-a")).unwrap();
        b.write(&sample_log("tx-b")).unwrap();
        let records = sink.lock().unwrap().clone();
        assert_eq!(records, vec![(0, "tx-a".to_string()), (1, "tx-b".to_string())]);
    }

    #[test]
    fn test_writer_unknown_name() {
        let (reg, created, _) = capture_registry();
        let Err(err) = reg.get("bar") else {
            panic!("expected lookup of unknown writer to fail");
        };
        assert_eq!(err.to_string(), "invalid writer \"bar\"");
        assert_eq!(created.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_writer_overwrite_last_wins() {
        let (reg, created, _) = capture_registry();
        reg.register("CAPTURE", || Box::new(NoopWriter));

        let _writer = reg.get("capture").unwrap();
        assert_eq!(created.load(Ordering::SeqCst), 0);
        assert_eq!(reg.names(), vec!["capture"]);
    }

    #[test]
    fn test_formatter_instances_are_shared() {
        let reg = FormatterRegistry::new();
        reg.register("Native", Arc::new(NativeFormatter));

        let a = reg.get("native").unwrap();
        let b = reg.get("NATIVE").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_formatter_overwrite_last_wins() {
        let reg = FormatterRegistry::new();
        reg.register("x", Arc::new(NativeFormatter));
        reg.register("X", Arc::new(JsonFormatter));
        assert_eq!(reg.get("x").unwrap().mime_type(), "application/json");
    }

    #[test]
    fn test_audit_logger_writes_through() {
        let (reg, _, sink) = capture_registry();
        let mut logger = AuditLogger::new(reg.get("capture").unwrap(), AuditLogConfig::new()).unwrap();
        logger.log(&sample_log("tx-1")).unwrap();
        logger.close().unwrap();

        assert_eq!(sink.lock().unwrap().len(), 1);
        assert_eq!(logger.config().file_mode, 0o644);
    }

    #[test]
    fn test_audit_logger_init_failure_propagates() {
        let (reg, _, _) = capture_registry();
        let config = AuditLogConfig {
            formatter: None,
            ..AuditLogConfig::new()
        };
        let err = AuditLogger::new(reg.get("capture").unwrap(), config).unwrap_err();
        assert!(matches!(err, crate::error::InspectError::Config(_)));
    }
}
