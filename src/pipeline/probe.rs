//! Longest-cached-prefix search.
//!
//! The probe always searches from the full pipeline downwards, so the
//! longest valid prefix is reused, never a shorter one. Reusing a shorter
//! prefix when a longer one exists would be correct but wasteful.
//!
//! Two query shapes are used:
//!
//! - single document: one bulk fetch of all stored results, scanned
//!   locally (one store round trip)
//! - batch: one targeted query per prefix length across every still
//!   unresolved document, descending (at most `n` round trips for the
//!   whole batch instead of per document)
//!
//! A not-found response from the store is a cache miss; any other store
//! error aborts the probe.

use super::compiler::Pipeline;
use crate::document::StoreRef;
use crate::store::{ResultStore, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Where a document's execution can resume.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    /// Number of leading tasks whose result is already cached.
    /// `0` means nothing is cached and raw content must be fetched;
    /// `pipeline.len()` means the final result is cached.
    pub resume: usize,

    /// The cached value at the resume point, `None` when `resume == 0`.
    pub input: Option<Value>,
}

impl ProbeOutcome {
    fn miss() -> Self {
        Self {
            resume: 0,
            input: None,
        }
    }
}

/// Finds the longest cached prefix for one document.
pub async fn probe_document(
    store: &dyn ResultStore,
    pipeline: &Pipeline,
    doc: &StoreRef,
) -> Result<ProbeOutcome, StoreError> {
    let cache = match store.get_all_results(doc).await {
        Ok(cache) => cache,
        Err(err) if err.is_not_found() => HashMap::new(),
        Err(err) => return Err(err),
    };

    for len in (1..=pipeline.len()).rev() {
        let key = pipeline.prefix_key(len);
        if let Some(value) = cache.get(key) {
            debug!(doc = %doc, key = %key, resume = len, "cache hit");
            return Ok(ProbeOutcome {
                resume: len,
                input: Some(value.clone()),
            });
        }
    }

    debug!(doc = %doc, "no cached prefix");
    Ok(ProbeOutcome::miss())
}

/// Finds the longest cached prefix for every document in a batch.
///
/// Issues one batched store query per prefix length, longest first;
/// documents with a hit drop out of subsequent queries. The returned
/// outcomes are aligned with the input `docs` order.
pub async fn probe_batch(
    store: &dyn ResultStore,
    pipeline: &Pipeline,
    docs: &[StoreRef],
) -> Result<Vec<ProbeOutcome>, StoreError> {
    let mut outcomes: Vec<ProbeOutcome> = docs.iter().map(|_| ProbeOutcome::miss()).collect();
    let mut pending: Vec<usize> = (0..docs.len()).collect();

    for len in (1..=pipeline.len()).rev() {
        if pending.is_empty() {
            break;
        }
        let key = pipeline.prefix_key(len);
        let candidates: Vec<StoreRef> = pending.iter().map(|&i| docs[i].clone()).collect();
        let hits = match store.get_result_batch(key, &candidates).await {
            Ok(hits) => hits,
            Err(err) if err.is_not_found() => continue,
            Err(err) => return Err(err),
        };
        debug!(key = %key, candidates = candidates.len(), hits = hits.len(), "batched probe");

        pending.retain(|&i| match hits.get(&docs[i]) {
            Some(value) => {
                outcomes[i] = ProbeOutcome {
                    resume: len,
                    input: Some(value.clone()),
                };
                false
            }
            None => true,
        });
    }

    Ok(outcomes)
}
