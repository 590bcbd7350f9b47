//! Task contract, descriptors, and the task registry.
//!
//! A task is an opaque, deterministic transformation of its input. Tasks
//! are registered by name in an explicit [`Registry`] and referenced from
//! pipeline descriptions by that name. Resolution binds a task to its
//! declared arguments, producing a [`BoundTask`] with a canonical name
//! that uniquely identifies the (task, arguments) combination for
//! cache-key purposes.
//!
//! # Example
//!
//! ```ignore
//! use docpipe::task::{Registry, TaskDescriptor};
//!
//! let registry = Registry::with_builtin_tasks();
//! let descriptor = TaskDescriptor::new("tokenize");
//! let bound = registry.resolve(&descriptor)?;
//! assert_eq!(bound.canonical_name(), "tokenize");
//! ```

mod args;
mod descriptor;
mod registry;

pub use args::TaskArgs;
pub use descriptor::{parse_descriptors, TaskDescriptor};
pub use registry::{Registry, ResolveError};

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A named, deterministic transformation step.
///
/// Implementations must be deterministic for a fixed `(input, args)` pair;
/// the memoization layer relies on this to substitute cached results for
/// recomputation. Implementations should not perform their own caching or
/// I/O against the result store.
pub trait Task: Send + Sync + 'static {
    /// Returns the task's registered name.
    fn name(&self) -> &str;

    /// Applies the transformation to `input` with the given arguments.
    fn invoke(&self, input: Value, args: &TaskArgs) -> Result<Value, TaskError>;
}

/// Errors raised by task implementations during invocation.
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    /// The input value had the wrong shape for this task.
    #[error("invalid input for {task}: {message}")]
    InvalidInput { task: String, message: String },

    /// A declared argument was missing, mistyped, or unsupported.
    #[error("invalid argument for {task}: {message}")]
    InvalidArgument { task: String, message: String },

    /// The transformation itself failed.
    #[error("task {task} failed: {message}")]
    Failed { task: String, message: String },
}

impl TaskError {
    /// Creates an invalid-input error.
    pub fn invalid_input(task: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            task: task.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(task: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            task: task.into(),
            message: message.into(),
        }
    }

    /// Creates a general failure error.
    pub fn failed(task: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            task: task.into(),
            message: message.into(),
        }
    }
}

/// A resolved task bound to its declared arguments.
///
/// The canonical name is the task name alone when no arguments were
/// declared, or the name followed by a deterministic rendering of the
/// arguments otherwise. Two bindings share a canonical name exactly when
/// they would compute the same function, which is what makes canonical
/// names safe to use as cache-key components.
#[derive(Clone)]
pub struct BoundTask {
    task: Arc<dyn Task>,
    args: TaskArgs,
    canonical_name: String,
}

impl BoundTask {
    /// Binds a task to its arguments, deriving the canonical name.
    pub fn new(task: Arc<dyn Task>, args: TaskArgs) -> Self {
        let canonical_name = format!("{}{}", task.name(), args.canonical_suffix());
        Self {
            task,
            args,
            canonical_name,
        }
    }

    /// Returns the canonical `(task, arguments)` name.
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// Returns the bound arguments.
    pub fn args(&self) -> &TaskArgs {
        &self.args
    }

    /// Invokes the underlying task with the bound arguments.
    pub fn invoke(&self, input: Value) -> Result<Value, TaskError> {
        self.task.invoke(input, &self.args)
    }
}

impl fmt::Debug for BoundTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundTask({})", self.canonical_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Upper;

    impl Task for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn invoke(&self, input: Value, _args: &TaskArgs) -> Result<Value, TaskError> {
            match input {
                Value::String(s) => Ok(Value::String(s.to_uppercase())),
                other => Err(TaskError::invalid_input(
                    "upper",
                    format!("expected string, got {}", other),
                )),
            }
        }
    }

    #[test]
    fn test_bound_task_canonical_name_without_args() {
        let bound = BoundTask::new(Arc::new(Upper), TaskArgs::None);
        assert_eq!(bound.canonical_name(), "upper");
    }

    #[test]
    fn test_bound_task_canonical_name_with_args() {
        let args = TaskArgs::keyed([("mode", json!("strict"))]);
        let bound = BoundTask::new(Arc::new(Upper), args);
        assert_eq!(bound.canonical_name(), r#"upper(mode="strict")"#);
    }

    #[test]
    fn test_bound_task_invoke() {
        let bound = BoundTask::new(Arc::new(Upper), TaskArgs::None);
        let out = bound.invoke(json!("hello")).unwrap();
        assert_eq!(out, json!("HELLO"));
    }

    #[test]
    fn test_bound_task_invoke_invalid_input() {
        let bound = BoundTask::new(Arc::new(Upper), TaskArgs::None);
        let err = bound.invoke(json!(42)).unwrap_err();
        assert!(matches!(err, TaskError::InvalidInput { .. }));
    }

    #[test]
    fn test_task_error_display() {
        let err = TaskError::failed("pos_tag", "no tokens");
        assert_eq!(format!("{}", err), "task pos_tag failed: no tokens");
    }
}
