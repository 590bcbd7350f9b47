//! Explicit task registry.
//!
//! The registry is an ordinary value constructed at startup and passed by
//! reference into the scheduler. There is no process-global task list;
//! tests and embedders can hold any number of independent registries.

use super::{BoundTask, Task, TaskDescriptor};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced while resolving a pipeline description.
///
/// Resolution failures happen at compile time, before anything is probed
/// or submitted; an unknown identifier is never silently skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The identifier is not registered.
    #[error("unknown task {0:?}")]
    UnknownTask(String),

    /// The pipeline description contained no steps.
    #[error("pipeline has no steps")]
    EmptyPipeline,
}

/// Name-to-task lookup table.
#[derive(Default)]
pub struct Registry {
    tasks: HashMap<String, Arc<dyn Task>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry preloaded with the built-in reference tasks.
    ///
    /// Registers `tokenize`, `pos_tag`, `lowercase`, and `lemmatize` from
    /// [`crate::tasks`].
    pub fn with_builtin_tasks() -> Self {
        let mut registry = Self::new();
        registry.register(crate::tasks::Tokenize);
        registry.register(crate::tasks::PosTag);
        registry.register(crate::tasks::Lowercase);
        registry.register(crate::tasks::Lemmatize);
        registry
    }

    /// Registers a task under its own name.
    ///
    /// Registering a second task with the same name replaces the first.
    pub fn register(&mut self, task: impl Task) {
        self.register_arc(Arc::new(task));
    }

    /// Registers an already-shared task.
    pub fn register_arc(&mut self, task: Arc<dyn Task>) {
        self.tasks.insert(task.name().to_string(), task);
    }

    /// Resolves a descriptor into a bound task.
    pub fn resolve(&self, descriptor: &TaskDescriptor) -> Result<BoundTask, ResolveError> {
        let task = self
            .tasks
            .get(&descriptor.task)
            .ok_or_else(|| ResolveError::UnknownTask(descriptor.task.clone()))?;
        Ok(BoundTask::new(
            Arc::clone(task),
            descriptor.arguments.clone(),
        ))
    }

    /// Returns true if a task is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Returns the registered task names, sorted.
    pub fn task_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if no tasks are registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("tasks", &self.task_names())
            .finish()
    }
}
