//! Result store contract.
//!
//! The store persists task results keyed by `(document, prefix key)` and
//! serves the raw document content when nothing at all is cached. The
//! scheduler only ever talks to this trait; the in-memory implementation
//! in [`memory`] is both the test double and a usable embedded store.
//!
//! # Error policy
//!
//! A not-found response ([`StoreError::NotFound`] or
//! [`StoreError::MissingField`]) during cache probing is treated as a
//! cache miss and probing continues. Any other store error aborts the
//! whole scheduling attempt. Implementations should reserve
//! [`StoreError::Backend`] for genuine failures (connectivity, corrupt
//! data) and never use it to signal absence.
//!
//! # Concurrency
//!
//! Reads are not synchronized against concurrent writers. Two concurrent
//! runs over the same document may both miss and both write; last write
//! wins. Atomicity of an individual write is the implementation's
//! responsibility.

mod memory;

pub use memory::MemoryStore;

use crate::document::StoreRef;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future type for dyn-safe async store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors from result-store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The referenced document does not exist.
    #[error("document not found: {0}")]
    NotFound(StoreRef),

    /// The document exists but lacks the referenced field.
    #[error("document {doc} has no field {field:?}")]
    MissingField { doc: StoreRef, field: String },

    /// The store backend failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns true if this error means "nothing there", which probing
    /// treats as a cache miss rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::MissingField { .. })
    }
}

/// Persistence backend for pipeline results and document content.
///
/// All result operations key on the full [`StoreRef`] (collection, id,
/// field), so results computed from different fields of the same document
/// never collide.
pub trait ResultStore: Send + Sync + 'static {
    /// Returns every stored result for a document as a
    /// `prefix key → value` map. A document with no results yields an
    /// empty map.
    fn get_all_results<'a>(
        &'a self,
        doc: &'a StoreRef,
    ) -> StoreFuture<'a, HashMap<String, Value>>;

    /// Returns the stored result for one prefix key, if present.
    ///
    /// The default implementation goes through [`Self::get_all_results`];
    /// backends with a cheap targeted lookup should override it.
    fn get_result<'a>(
        &'a self,
        prefix_key: &'a str,
        doc: &'a StoreRef,
    ) -> StoreFuture<'a, Option<Value>> {
        Box::pin(async move {
            let mut results = self.get_all_results(doc).await?;
            Ok(results.remove(prefix_key))
        })
    }

    /// Returns the stored result for one prefix key across many documents
    /// in a single round trip. Documents without a hit are simply absent
    /// from the returned map.
    fn get_result_batch<'a>(
        &'a self,
        prefix_key: &'a str,
        docs: &'a [StoreRef],
    ) -> StoreFuture<'a, HashMap<StoreRef, Value>>;

    /// Persists a result under `(doc, prefix_key)`, overwriting any
    /// previous value, and returns the value unchanged so the operation
    /// can sit transparently inside an execution chain.
    fn store_result<'a>(
        &'a self,
        value: Value,
        prefix_key: &'a str,
        doc: &'a StoreRef,
    ) -> StoreFuture<'a, Value>;

    /// Fetches the raw content of the referenced document field.
    ///
    /// Only invoked when no prefix at all is cached for a document.
    fn fetch_content<'a>(&'a self, doc: &'a StoreRef) -> StoreFuture<'a, Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_not_found_predicate() {
        let doc = StoreRef::new("articles", "1", "body");
        assert!(StoreError::NotFound(doc.clone()).is_not_found());
        assert!(StoreError::MissingField {
            doc,
            field: "body".to_string()
        }
        .is_not_found());
        assert!(!StoreError::Backend("connection refused".to_string()).is_not_found());
    }

    #[test]
    fn test_store_error_display() {
        let doc = StoreRef::new("articles", "1", "body");
        assert_eq!(
            format!("{}", StoreError::NotFound(doc)),
            "document not found: articles/1.body"
        );
    }
}
