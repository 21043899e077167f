//! Name-keyed component registries
//!
//! `Registry<V>` maps ASCII-case-insensitive names to values behind a
//! `RwLock`, so lookups on the hot path run concurrently while registration
//! is serialized. `Plugins` bundles the registries an engine instance owns;
//! there is no process-global table.

use crate::auditlog::{FormatterRegistry, WriterRegistry};
use crate::error::{ComponentKind, InspectError, Result};
use crate::strings::ascii_to_lower;
use crate::transform::TransformationRegistry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Generic name → value table with ASCII-case-insensitive keys
///
/// Only `A`–`Z` are folded; any other byte of the name is significant.
/// Registering a name that already exists replaces the previous value.
pub struct Registry<V> {
    kind: ComponentKind,
    entries: RwLock<HashMap<String, V>>,
}

impl<V: Clone> Registry<V> {
    /// Create an empty registry for the given component kind
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Component kind stored in this registry
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Store `value` under the normalized `name`, replacing any previous entry
    pub fn register(&self, name: &str, value: V) {
        let key = ascii_to_lower(name).into_owned();
        // A single insert cannot leave a partial entry behind, so a poisoned
        // lock still guards a consistent map.
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let replaced = entries.insert(key.clone(), value).is_some();
        tracing::debug!(kind = %self.kind, name = %key, replaced, "Component registered");
    }

    /// Look up the value registered under `name`
    ///
    /// The error carries `name` as given, not its normalized form.
    pub fn get(&self, name: &str) -> Result<V> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match entries.get(&*ascii_to_lower(name)) {
            Some(value) => Ok(value.clone()),
            None => {
                tracing::warn!(kind = %self.kind, name, "Unknown component requested");
                Err(InspectError::not_found(self.kind, name))
            }
        }
    }

    /// Check whether a component is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&*ascii_to_lower(name))
    }

    /// List all registered names (normalized, sorted)
    pub fn names(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The set of registries owned by one engine instance
///
/// Writers, formatters and transformations live in separate namespaces:
/// registering a writer named `json` does not affect the `json` formatter.
/// `Plugins::new()` and `Plugins::default()` start empty; use
/// `Plugins::with_defaults()` for the built-in components.
pub struct Plugins {
    /// Audit log writer factories
    pub writers: WriterRegistry,

    /// Shared audit log formatters
    pub formatters: FormatterRegistry,

    /// Shared input transformations
    pub transformations: TransformationRegistry,
}

impl Plugins {
    /// Create empty registries
    pub fn new() -> Self {
        Self {
            writers: WriterRegistry::new(),
            formatters: FormatterRegistry::new(),
            transformations: TransformationRegistry::new(),
        }
    }

    /// Create registries pre-populated with every built-in component
    pub fn with_defaults() -> Self {
        let plugins = Self::new();
        crate::auditlog::register_builtins(&plugins.writers, &plugins.formatters);
        crate::transform::register_builtins(&plugins.transformations);
        plugins
    }
}

impl Default for Plugins {
    fn default() -> Self {
        Self::new()
    }
}
