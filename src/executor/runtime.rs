//! Tokio-based executor.

use super::handle::{ChainStatus, ExecutionHandle, GroupHandle};
use super::Executor;
use crate::pipeline::{run_chain, ExecutionChain};
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// In-process executor that spawns each chain onto the Tokio runtime.
///
/// Chains run as independent spawned tasks; once spawned, a chain runs to
/// completion whether or not its handle is kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioExecutor;

impl TokioExecutor {
    /// Creates a new Tokio executor.
    pub fn new() -> Self {
        Self
    }
}

impl Executor for TokioExecutor {
    fn submit(&self, chain: ExecutionChain) -> ExecutionHandle {
        let (status_tx, status_rx) = watch::channel(ChainStatus::Pending);
        let handle = ExecutionHandle::new(status_rx);
        let holder = handle.result_holder();

        debug!(steps = chain.steps().len(), "spawning chain");
        tokio::spawn(async move {
            let _ = status_tx.send(ChainStatus::Running);
            let result = run_chain(chain).await;
            let status = if result.is_ok() {
                ChainStatus::Succeeded
            } else {
                ChainStatus::Failed
            };
            // Result first, then the terminal status that unblocks wait().
            *holder.lock().await = Some(result);
            let _ = status_tx.send(status);
        });

        handle
    }

    fn submit_group(&self, chains: Vec<ExecutionChain>) -> GroupHandle {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let expected = chains.len();

        debug!(chains = expected, "spawning chain group");
        for chain in chains {
            let results_tx = results_tx.clone();
            tokio::spawn(async move {
                let _ = results_tx.send(run_chain(chain).await);
            });
        }

        GroupHandle::new(results_rx, expected)
    }
}
