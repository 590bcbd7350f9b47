//! Chain execution errors.

use crate::store::StoreError;
use crate::task::TaskError;
use thiserror::Error;

/// Errors surfaced through an execution handle.
#[derive(Debug, Clone, Error)]
pub enum ChainError {
    /// A task invocation failed; later steps did not run.
    #[error("task {task} failed: {source}")]
    Task {
        task: String,
        #[source]
        source: TaskError,
    },

    /// A persistence side-effect or content fetch failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The chain panicked inside the executor.
    #[error("chain execution panicked: {0}")]
    Panicked(String),

    /// The executor dropped the chain before delivering a result.
    #[error("executor abandoned the chain before completion")]
    Abandoned,
}
