//! Scheduler errors.

use crate::executor::ChainError;
use crate::store::StoreError;
use crate::task::ResolveError;
use thiserror::Error;

/// Errors from scheduling a pipeline run.
///
/// Resolution errors happen before any probe or submission; store errors
/// during probing or content fetching abort the attempt; execution errors
/// only surface in blocking mode, when the scheduler itself waits on the
/// chain.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The pipeline description did not resolve.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The result store failed during probing or content fetch.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A submitted chain failed while the scheduler was waiting on it.
    #[error(transparent)]
    Execution(#[from] ChainError),
}
