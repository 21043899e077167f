//! Input transformations — canonicalize untrusted strings before matching
//!
//! A `Transformation` is a pure step that reports whether it changed its
//! input. A `Pipeline` chains steps left-to-right, stopping at the first
//! failure. Steps are looked up by name through a `TransformationRegistry`.

use crate::error::{ComponentKind, InspectError, Result};
use crate::registry::Registry;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

pub mod builtin;

pub use builtin::{Base64Decode, CompressWhitespace, LowerCase, RemoveQuotes, Trim};

/// Output of a transformation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// Transformed value
    pub output: String,

    /// True iff `output` differs from the input
    pub changed: bool,
}

impl Transformed {
    /// Build a result from a step's input and output, comparing them exactly
    pub fn compare(input: &str, output: Cow<'_, str>) -> Self {
        let changed = output.as_ref() != input;
        Self {
            output: output.into_owned(),
            changed,
        }
    }

    /// A result that leaves `input` as it was
    pub fn unchanged(input: &str) -> Self {
        Self {
            output: input.to_string(),
            changed: false,
        }
    }
}

/// A single canonicalization step
///
/// Implementations must be pure: the same input always yields the same
/// result, and `changed` must be exact rather than "the step ran".
pub trait Transformation: Send + Sync {
    /// Name the step is registered under (e.g., "lowercase")
    fn name(&self) -> &str;

    /// Apply the step to `input`
    fn transform(&self, input: &str) -> Result<Transformed>;
}

/// Registry of shared transformation instances
pub struct TransformationRegistry {
    inner: Registry<Arc<dyn Transformation>>,
}

impl TransformationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            inner: Registry::new(ComponentKind::Transformation),
        }
    }

    /// Register a transformation under `name`, replacing any previous entry
    pub fn register(&self, name: &str, transformation: Arc<dyn Transformation>) {
        self.inner.register(name, transformation);
    }

    /// Look up a transformation by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn Transformation>> {
        self.inner.get(name)
    }

    /// Check whether a transformation is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains(name)
    }

    /// List registered transformation names
    pub fn names(&self) -> Vec<String> {
        self.inner.names()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for TransformationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register every built-in transformation
pub fn register_builtins(registry: &TransformationRegistry) {
    let builtins: [Arc<dyn Transformation>; 5] = [
        Arc::new(LowerCase),
        Arc::new(RemoveQuotes),
        Arc::new(Trim),
        Arc::new(CompressWhitespace),
        Arc::new(Base64Decode),
    ];
    for t in builtins {
        registry.register(t.name(), Arc::clone(&t));
    }
}

/// An ordered chain of transformations
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<Arc<dyn Transformation>>,
}

impl Pipeline {
    /// Create an empty pipeline (identity)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn with(mut self, step: Arc<dyn Transformation>) -> Self {
        self.steps.push(step);
        self
    }

    /// Build a pipeline from registered step names, in order
    ///
    /// Fails with `NotFound` on the first unknown name.
    pub fn from_names<I, S>(registry: &TransformationRegistry, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let steps = names
            .into_iter()
            .map(|name| registry.get(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    /// Names of the steps, in order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check whether the pipeline has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step, feeding each output into the next
    ///
    /// `changed` is true if any step changed its input. The first failing
    /// step aborts the chain; its error is returned as a `Transform` error
    /// naming that step.
    pub fn apply(&self, input: &str) -> Result<Transformed> {
        let mut current = Transformed::unchanged(input);
        for step in &self.steps {
            let next = step.transform(&current.output).map_err(|e| {
                tracing::debug!(step = step.name(), error = %e, "Transformation failed");
                match e {
                    InspectError::Transform { .. } => e,
                    other => transform_error(step.name(), other),
                }
            })?;
            current = Transformed {
                output: next.output,
                changed: current.changed || next.changed,
            };
        }
        Ok(current)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.step_names()).finish()
    }
}

/// Build a `Transform` error for the named step
pub(crate) fn transform_error(name: &str, reason: impl fmt::Display) -> InspectError {
    InspectError::Transform {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
