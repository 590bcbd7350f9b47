//! Pipeline schedulers.
//!
//! The [`Scheduler`] is the public entry point: it compiles a pipeline
//! description, probes the result store for the longest cached prefix,
//! builds the remaining suffix chain, and submits it to the executor.
//! It performs no parallel computation of its own; the only concurrency
//! decisions made here are what unit of work to submit and when to block.
//!
//! # Example
//!
//! ```ignore
//! use docpipe::document::DocumentRef;
//! use docpipe::scheduler::{PipelineOptions, Scheduler};
//! use docpipe::store::MemoryStore;
//! use docpipe::task::{Registry, TaskDescriptor};
//! use std::sync::Arc;
//!
//! let scheduler = Scheduler::with_tokio_executor(
//!     Arc::new(Registry::with_builtin_tasks()),
//!     Arc::new(MemoryStore::new()),
//! );
//!
//! let outcome = scheduler
//!     .run_pipeline(
//!         &DocumentRef::literal("cats are furry"),
//!         &[TaskDescriptor::new("tokenize"), TaskDescriptor::new("pos_tag")],
//!         &PipelineOptions::default(),
//!     )
//!     .await?;
//! ```

mod error;
mod options;

pub use error::SchedulerError;
pub use options::PipelineOptions;

use crate::document::DocumentRef;
use crate::executor::{ChainError, ExecutionHandle, Executor, TokioExecutor};
use crate::pipeline::{
    build_suffix_steps, probe_batch, probe_document, ExecutionChain, PersistTarget, Pipeline,
};
use crate::store::ResultStore;
use crate::task::{Registry, TaskDescriptor};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a single-document run.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The final value, either cached or computed while blocking.
    Completed(Value),

    /// The chain is in flight; only returned with `block = false` and a
    /// non-empty chain.
    Submitted(ExecutionHandle),
}

impl PipelineOutcome {
    /// Returns the value if the run completed synchronously.
    pub fn into_completed(self) -> Option<Value> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Submitted(_) => None,
        }
    }
}

/// Orchestrates compile → probe → build → submit for documents and
/// batches.
pub struct Scheduler<E: Executor = TokioExecutor> {
    registry: Arc<Registry>,
    store: Arc<dyn ResultStore>,
    executor: E,
}

impl Scheduler<TokioExecutor> {
    /// Creates a scheduler backed by the in-process Tokio executor.
    pub fn with_tokio_executor(registry: Arc<Registry>, store: Arc<dyn ResultStore>) -> Self {
        Self::new(registry, store, TokioExecutor::new())
    }
}

impl<E: Executor> Scheduler<E> {
    /// Creates a scheduler from its collaborators.
    pub fn new(registry: Arc<Registry>, store: Arc<dyn ResultStore>, executor: E) -> Self {
        Self {
            registry,
            store,
            executor,
        }
    }

    /// Returns the task registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs a pipeline over one document.
    ///
    /// Literal documents bypass the cache entirely and run the full
    /// pipeline with no persistence. Stored documents are probed for
    /// their longest cached prefix; only the remaining suffix is
    /// submitted. When the full pipeline is already cached the cached
    /// value is returned directly, regardless of `block`, since nothing
    /// is pending.
    pub async fn run_pipeline(
        &self,
        doc: &DocumentRef,
        descriptors: &[TaskDescriptor],
        opts: &PipelineOptions,
    ) -> Result<PipelineOutcome, SchedulerError> {
        let pipeline = Pipeline::compile(&self.registry, descriptors)?;

        let (input, steps) = match doc {
            DocumentRef::Literal(value) => {
                debug!(tasks = pipeline.len(), "literal document, cache bypassed");
                (
                    value.clone(),
                    build_suffix_steps(&pipeline, 0, None, false, false),
                )
            }
            DocumentRef::Stored(sref) => {
                let probe = probe_document(self.store.as_ref(), &pipeline, sref).await?;
                let target = PersistTarget {
                    doc: sref.clone(),
                    store: Arc::clone(&self.store),
                };
                let steps = build_suffix_steps(
                    &pipeline,
                    probe.resume,
                    Some(&target),
                    opts.store_final,
                    opts.store_intermediate,
                );
                let input = match probe.input {
                    // Empty chain means the full result was cached.
                    Some(value) if steps.is_empty() => {
                        debug!(doc = %sref, "full result cached, nothing to submit");
                        return Ok(PipelineOutcome::Completed(value));
                    }
                    Some(value) => value,
                    None => self.store.fetch_content(sref).await?,
                };
                debug!(doc = %sref, resume = probe.resume, remaining = pipeline.len() - probe.resume,
                       "resuming after cached prefix");
                (input, steps)
            }
        };

        let mut handle = self.executor.submit(ExecutionChain::new(input, steps));
        if opts.block {
            Ok(PipelineOutcome::Completed(handle.wait().await?))
        } else {
            Ok(PipelineOutcome::Submitted(handle))
        }
    }

    /// Runs a pipeline over a batch of documents.
    ///
    /// Cache probing is amortized: one batched store query per prefix
    /// length for the whole batch instead of one probe per document.
    /// Fully cached documents never touch the executor; everything else
    /// is submitted as one parallel group and awaited together. The
    /// returned results are not in input order: the already-cached bucket
    /// short-circuits and group results arrive in completion order.
    pub async fn run_pipeline_batch(
        &self,
        docs: &[DocumentRef],
        descriptors: &[TaskDescriptor],
        opts: &PipelineOptions,
    ) -> Result<Vec<Result<Value, ChainError>>, SchedulerError> {
        let pipeline = Pipeline::compile(&self.registry, descriptors)?;

        let mut stored_refs = Vec::new();
        let mut literals = Vec::new();
        for doc in docs {
            match doc {
                DocumentRef::Stored(sref) => stored_refs.push(sref.clone()),
                DocumentRef::Literal(value) => literals.push(value.clone()),
            }
        }

        let outcomes = probe_batch(self.store.as_ref(), &pipeline, &stored_refs).await?;

        let mut completed: Vec<Result<Value, ChainError>> = Vec::new();
        let mut chains = Vec::new();
        for (sref, outcome) in stored_refs.into_iter().zip(outcomes) {
            let target = PersistTarget {
                doc: sref.clone(),
                store: Arc::clone(&self.store),
            };
            match outcome.input {
                Some(value) if outcome.resume == pipeline.len() => {
                    debug!(doc = %sref, "already complete, skipping submission");
                    completed.push(Ok(value));
                }
                Some(value) => {
                    let steps = build_suffix_steps(
                        &pipeline,
                        outcome.resume,
                        Some(&target),
                        opts.store_final,
                        opts.store_intermediate,
                    );
                    chains.push(ExecutionChain::new(value, steps));
                }
                None => {
                    let input = self.store.fetch_content(&sref).await?;
                    let steps = build_suffix_steps(
                        &pipeline,
                        0,
                        Some(&target),
                        opts.store_final,
                        opts.store_intermediate,
                    );
                    chains.push(ExecutionChain::new(input, steps));
                }
            }
        }

        // Literals always run the full pipeline, uncached.
        for value in literals {
            let steps = build_suffix_steps(&pipeline, 0, None, false, false);
            chains.push(ExecutionChain::new(value, steps));
        }

        if chains.is_empty() {
            return Ok(completed);
        }

        info!(
            submitted = chains.len(),
            cached = completed.len(),
            "submitting batch group"
        );
        let group = self.executor.submit_group(chains);
        completed.extend(group.wait().await);
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::task::ResolveError;
    use serde_json::json;

    fn scheduler_with_store() -> (Scheduler, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let scheduler = Scheduler::with_tokio_executor(
            Arc::new(Registry::with_builtin_tasks()),
            Arc::clone(&store) as Arc<dyn ResultStore>,
        );
        (scheduler, store)
    }

    fn descriptors(names: &[&str]) -> Vec<TaskDescriptor> {
        names.iter().map(|n| TaskDescriptor::new(*n)).collect()
    }

    #[tokio::test]
    async fn test_unknown_task_fails_before_submission() {
        let (scheduler, _store) = scheduler_with_store();
        let err = scheduler
            .run_pipeline(
                &DocumentRef::literal("text"),
                &descriptors(&["nope"]),
                &PipelineOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::Resolve(ResolveError::UnknownTask(_))
        ));
    }

    #[tokio::test]
    async fn test_literal_document_blocking_run() {
        let (scheduler, store) = scheduler_with_store();
        let outcome = scheduler
            .run_pipeline(
                &DocumentRef::literal("The CAT"),
                &descriptors(&["lowercase"]),
                &PipelineOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(outcome.into_completed(), Some(json!("the cat")));
        // Literals never persist.
        assert_eq!(store.result_count(), 0);
    }

    #[tokio::test]
    async fn test_non_blocking_returns_handle() {
        let (scheduler, _store) = scheduler_with_store();
        let outcome = scheduler
            .run_pipeline(
                &DocumentRef::literal("The CAT"),
                &descriptors(&["lowercase"]),
                &PipelineOptions::default().block(false),
            )
            .await
            .unwrap();
        match outcome {
            PipelineOutcome::Submitted(mut handle) => {
                assert_eq!(handle.wait().await.unwrap(), json!("the cat"));
            }
            PipelineOutcome::Completed(value) => panic!("expected handle, got {}", value),
        }
    }

    #[tokio::test]
    async fn test_cached_final_returns_directly_even_without_block() {
        let (scheduler, store) = scheduler_with_store();
        store.insert_document("articles", "1", "body", "The cat");
        let doc = DocumentRef::stored("articles", "1", "body");
        let pipe = descriptors(&["tokenize"]);

        scheduler
            .run_pipeline(&doc, &pipe, &PipelineOptions::default())
            .await
            .unwrap();

        // Second run, non-blocking: still a direct value, nothing pending.
        let outcome = scheduler
            .run_pipeline(&doc, &pipe, &PipelineOptions::default().block(false))
            .await
            .unwrap();
        assert!(matches!(outcome, PipelineOutcome::Completed(_)));
    }

    #[tokio::test]
    async fn test_store_final_persists_under_full_key() {
        let (scheduler, store) = scheduler_with_store();
        store.insert_document("articles", "1", "body", "The cat");
        let doc = DocumentRef::stored("articles", "1", "body");

        scheduler
            .run_pipeline(
                &doc,
                &descriptors(&["tokenize", "pos_tag"]),
                &PipelineOptions::default(),
            )
            .await
            .unwrap();

        let sref = doc.as_stored().unwrap();
        let cached = store
            .get_result("tokenize__pos_tag", sref)
            .await
            .unwrap();
        assert!(cached.is_some());
        // Intermediate not stored by default.
        assert_eq!(store.get_result("tokenize", sref).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_document_propagates_store_error() {
        let (scheduler, _store) = scheduler_with_store();
        let err = scheduler
            .run_pipeline(
                &DocumentRef::stored("articles", "missing", "body"),
                &descriptors(&["tokenize"]),
                &PipelineOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulerError::Store(_)));
    }

    #[tokio::test]
    async fn test_batch_empty_input() {
        let (scheduler, _store) = scheduler_with_store();
        let results = scheduler
            .run_pipeline_batch(&[], &descriptors(&["tokenize"]), &PipelineOptions::default())
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
