//! Execution substrate.
//!
//! The scheduler never runs chains itself; it hands them to an
//! [`Executor`] and decides only what unit of work to submit and when to
//! block. The trait abstracts over thread pools, process pools, or
//! message-passing runtimes; [`TokioExecutor`] is the in-process
//! implementation.
//!
//! Submitted chains run to completion even if the caller abandons the
//! handle; persistence side-effects still occur. There is no cancellation
//! API at this layer, and no retries: a task failure surfaces through the
//! handle on `wait()`.
//!
//! # Example
//!
//! ```ignore
//! use docpipe::executor::{Executor, TokioExecutor};
//!
//! let executor = TokioExecutor::new();
//! let mut handle = executor.submit(chain);
//! let value = handle.wait().await?;
//! ```

mod error;
mod handle;
mod runtime;

pub use error::ChainError;
pub use handle::{ChainStatus, ExecutionHandle, GroupHandle};
pub use runtime::TokioExecutor;

use crate::pipeline::ExecutionChain;

/// Submits chains for execution and hands back awaitable handles.
pub trait Executor: Send + Sync + 'static {
    /// Submits one chain; returns immediately with a handle.
    fn submit(&self, chain: ExecutionChain) -> ExecutionHandle;

    /// Submits a set of independent chains as one parallel group.
    ///
    /// Chains in a group share no state and may run concurrently; their
    /// results are delivered in completion order, not submission order.
    fn submit_group(&self, chains: Vec<ExecutionChain>) -> GroupHandle;
}
