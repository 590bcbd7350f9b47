//! Pipeline compiler.
//!
//! Resolves a descriptor list against a registry and precomputes the
//! prefix key for every prefix length. Compilation is pure and
//! deterministic; compiling identical descriptors twice yields identical
//! prefix keys, which is what makes cache hits findable across repeated
//! invocations.

use crate::task::{BoundTask, Registry, ResolveError, TaskDescriptor};

/// Separator between canonical task names in a prefix key.
pub const PREFIX_SEPARATOR: &str = "__";

/// An ordered sequence of resolved tasks with precomputed prefix keys.
#[derive(Debug, Clone)]
pub struct Pipeline {
    tasks: Vec<BoundTask>,
    prefix_keys: Vec<String>,
}

impl Pipeline {
    /// Compiles a descriptor list into a pipeline.
    ///
    /// Fails fast on the first unresolvable identifier, before any cache
    /// probe or submission happens. Empty descriptions are rejected.
    pub fn compile(
        registry: &Registry,
        descriptors: &[TaskDescriptor],
    ) -> Result<Self, ResolveError> {
        if descriptors.is_empty() {
            return Err(ResolveError::EmptyPipeline);
        }
        let tasks = descriptors
            .iter()
            .map(|descriptor| registry.resolve(descriptor))
            .collect::<Result<Vec<_>, _>>()?;

        let mut prefix_keys = Vec::with_capacity(tasks.len());
        let mut key = String::new();
        for task in &tasks {
            if !key.is_empty() {
                key.push_str(PREFIX_SEPARATOR);
            }
            key.push_str(task.canonical_name());
            prefix_keys.push(key.clone());
        }

        Ok(Self { tasks, prefix_keys })
    }

    /// Returns the number of tasks. Always at least one; empty
    /// descriptions fail compilation.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the resolved tasks in order.
    pub fn tasks(&self) -> &[BoundTask] {
        &self.tasks
    }

    /// Returns the cache key for the first `len` tasks.
    ///
    /// `len` is 1-based and must be in `1..=self.len()`.
    pub fn prefix_key(&self, len: usize) -> &str {
        &self.prefix_keys[len - 1]
    }

    /// Returns the cache key for the whole pipeline.
    pub fn final_key(&self) -> &str {
        self.prefix_key(self.len())
    }
}
