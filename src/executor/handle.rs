//! Handles for in-flight chains and chain groups.
//!
//! An [`ExecutionHandle`] is returned when a chain is submitted. It is
//! cloneable, supports non-blocking status queries, and blocks only in
//! the async `wait()`. A [`GroupHandle`] collects the results of a whole
//! submitted group, in completion order.

use super::error::ChainError;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};

/// Execution status of a submitted chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChainStatus {
    /// Accepted but not yet started.
    #[default]
    Pending,

    /// Currently running steps.
    Running,

    /// All steps completed; the result value is available.
    Succeeded,

    /// A step failed; the error is available.
    Failed,
}

impl ChainStatus {
    /// Returns true once the chain can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for ChainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Running => write!(f, "Running"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Handle to one submitted chain.
///
/// All clones refer to the same underlying chain and observe the same
/// result; `wait()` can be called on any number of clones.
#[derive(Clone)]
pub struct ExecutionHandle {
    status_rx: watch::Receiver<ChainStatus>,
    /// Set by the executor when the chain completes.
    result: Arc<Mutex<Option<Result<Value, ChainError>>>>,
}

impl ExecutionHandle {
    /// Creates a handle; called by the executor at submission time.
    pub(crate) fn new(status_rx: watch::Receiver<ChainStatus>) -> Self {
        Self {
            status_rx,
            result: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the result slot for the executor to fill.
    pub(crate) fn result_holder(&self) -> Arc<Mutex<Option<Result<Value, ChainError>>>> {
        Arc::clone(&self.result)
    }

    /// Returns the most recent status without blocking.
    pub fn status(&self) -> ChainStatus {
        *self.status_rx.borrow()
    }

    /// Waits for the chain to reach a terminal state and returns the
    /// result. The result stays in place, so every clone that waits gets
    /// the same outcome.
    pub async fn wait(&mut self) -> Result<Value, ChainError> {
        loop {
            if self.status().is_terminal() {
                break;
            }
            if self.status_rx.changed().await.is_err() {
                // Sender dropped; whatever result exists is final.
                break;
            }
        }
        self.result
            .lock()
            .await
            .clone()
            .unwrap_or(Err(ChainError::Abandoned))
    }
}

impl std::fmt::Debug for ExecutionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionHandle")
            .field("status", &self.status())
            .finish()
    }
}

/// Handle to a submitted group of chains.
///
/// Results arrive in completion order, which is deliberately not the
/// submission order.
pub struct GroupHandle {
    results_rx: mpsc::UnboundedReceiver<Result<Value, ChainError>>,
    expected: usize,
}

impl GroupHandle {
    /// Creates a group handle expecting `expected` results.
    pub(crate) fn new(
        results_rx: mpsc::UnboundedReceiver<Result<Value, ChainError>>,
        expected: usize,
    ) -> Self {
        Self {
            results_rx,
            expected,
        }
    }

    /// Returns the number of chains in the group.
    pub fn len(&self) -> usize {
        self.expected
    }

    /// Returns true for an empty group.
    pub fn is_empty(&self) -> bool {
        self.expected == 0
    }

    /// Waits for every chain in the group and returns all results.
    ///
    /// If the executor drops a chain without reporting, its slot is
    /// filled with [`ChainError::Abandoned`] so the caller always gets
    /// exactly `len()` results.
    pub async fn wait(mut self) -> Vec<Result<Value, ChainError>> {
        let mut results = Vec::with_capacity(self.expected);
        while results.len() < self.expected {
            match self.results_rx.recv().await {
                Some(result) => results.push(result),
                None => {
                    while results.len() < self.expected {
                        results.push(Err(ChainError::Abandoned));
                    }
                }
            }
        }
        results
    }
}

impl std::fmt::Debug for GroupHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupHandle")
            .field("expected", &self.expected)
            .finish()
    }
}
