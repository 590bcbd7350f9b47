//! Execution chains.
//!
//! A chain is the suffix of a pipeline that still has to run for one
//! document: task invocations in order, each optionally followed by a
//! persistence side-effect under that prefix's cache key. Persistence
//! steps pass the value through unchanged, so inserting or removing them
//! never changes the computed result.
//!
//! Within a chain, steps are strictly sequential: step `i + 1` consumes
//! step `i`'s output. If a task fails, no later step runs and no
//! persistence side-effect for that prefix or any longer one is written;
//! earlier side-effects remain valid and are not rolled back.

use super::compiler::Pipeline;
use crate::document::StoreRef;
use crate::executor::ChainError;
use crate::store::ResultStore;
use crate::task::BoundTask;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where a chain's persistence side-effects should write.
#[derive(Clone)]
pub struct PersistTarget {
    /// Document the results belong to.
    pub doc: StoreRef,

    /// Store the results are written to.
    pub store: Arc<dyn ResultStore>,
}

/// One step of an execution chain.
pub enum ChainStep {
    /// Invoke a task; its output becomes the chain's current value.
    Invoke(BoundTask),

    /// Persist the current value under a prefix key, passing it through.
    Persist {
        prefix_key: String,
        doc: StoreRef,
        store: Arc<dyn ResultStore>,
    },
}

impl fmt::Debug for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoke(task) => write!(f, "Invoke({})", task.canonical_name()),
            Self::Persist { prefix_key, doc, .. } => {
                write!(f, "Persist({} @ {})", prefix_key, doc)
            }
        }
    }
}

/// An ordered list of steps plus the value the first step consumes.
#[derive(Debug)]
pub struct ExecutionChain {
    input: Value,
    steps: Vec<ChainStep>,
}

impl ExecutionChain {
    /// Creates a chain from an initial input and its steps.
    pub fn new(input: Value, steps: Vec<ChainStep>) -> Self {
        Self { input, steps }
    }

    /// Returns the chain's initial input.
    pub fn input(&self) -> &Value {
        &self.input
    }

    /// Returns the steps in execution order.
    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// Returns true if there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the number of task invocations in the chain.
    pub fn invoke_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, ChainStep::Invoke(_)))
            .count()
    }
}

/// Builds the steps covering tasks `resume + 1 ..= n`.
///
/// Task `i`'s invocation is followed by a persistence step under
/// `prefix_key(i)` when a persist target is given and
/// `(i == n && store_final) || store_intermediate`. With `resume == n`
/// the returned list is empty: the full pipeline was cached and nothing
/// must be submitted.
pub fn build_suffix_steps(
    pipeline: &Pipeline,
    resume: usize,
    persist: Option<&PersistTarget>,
    store_final: bool,
    store_intermediate: bool,
) -> Vec<ChainStep> {
    let n = pipeline.len();
    let mut steps = Vec::new();
    for i in (resume + 1)..=n {
        steps.push(ChainStep::Invoke(pipeline.tasks()[i - 1].clone()));
        if let Some(target) = persist {
            if (i == n && store_final) || store_intermediate {
                steps.push(ChainStep::Persist {
                    prefix_key: pipeline.prefix_key(i).to_string(),
                    doc: target.doc.clone(),
                    store: Arc::clone(&target.store),
                });
            }
        }
    }
    steps
}

/// Runs a chain to completion, sequentially.
///
/// Task invocations are moved onto the blocking thread pool since tasks
/// are CPU-bound by contract. On the first failing step the remaining
/// steps are skipped and the error is returned.
pub async fn run_chain(chain: ExecutionChain) -> Result<Value, ChainError> {
    let ExecutionChain { input, steps } = chain;
    let mut current = input;
    for step in steps {
        match step {
            ChainStep::Invoke(task) => {
                let name = task.canonical_name().to_string();
                debug!(task = %name, "invoking task");
                let outcome = tokio::task::spawn_blocking(move || task.invoke(current))
                    .await
                    .map_err(|e| ChainError::Panicked(e.to_string()))?;
                current = outcome.map_err(|source| {
                    warn!(task = %name, error = %source, "task failed");
                    ChainError::Task { task: name, source }
                })?;
            }
            ChainStep::Persist {
                prefix_key,
                doc,
                store,
            } => {
                debug!(key = %prefix_key, doc = %doc, "persisting result");
                current = store.store_result(current, &prefix_key, &doc).await?;
            }
        }
    }
    Ok(current)
}
