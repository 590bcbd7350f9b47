//! In-memory result store.
//!
//! Concurrent map-backed implementation of [`ResultStore`], used by the
//! test suite and suitable for embedding when no external store is
//! configured. Each stored result carries a timestamp for audit; entries
//! are overwritten last-write-wins with no versioning.

use super::{ResultStore, StoreError, StoreFuture};
use crate::document::StoreRef;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// A stored result with its audit timestamp.
#[derive(Debug, Clone)]
struct StoredEntry {
    value: Value,
    stored_at: DateTime<Utc>,
}

/// Concurrent in-memory [`ResultStore`].
#[derive(Default)]
pub struct MemoryStore {
    /// Document content: (collection, id) → field → value.
    documents: DashMap<(String, String), HashMap<String, Value>>,

    /// Cached results: document ref → prefix key → entry.
    results: DashMap<StoreRef, HashMap<String, StoredEntry>>,

    /// Total result writes, for tests and observability.
    write_count: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a document field's content.
    pub fn insert_document(
        &self,
        collection: impl Into<String>,
        id: impl Into<String>,
        field: impl Into<String>,
        content: impl Into<Value>,
    ) {
        self.documents
            .entry((collection.into(), id.into()))
            .or_default()
            .insert(field.into(), content.into());
    }

    /// Returns the audit timestamp for a stored result, if present.
    pub fn entry_timestamp(&self, doc: &StoreRef, prefix_key: &str) -> Option<DateTime<Utc>> {
        self.results
            .get(doc)
            .and_then(|entries| entries.get(prefix_key).map(|e| e.stored_at))
    }

    /// Returns the total number of stored results.
    pub fn result_count(&self) -> usize {
        self.results.iter().map(|entry| entry.value().len()).sum()
    }

    /// Returns the total number of result writes, including overwrites.
    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }
}

impl ResultStore for MemoryStore {
    fn get_all_results<'a>(
        &'a self,
        doc: &'a StoreRef,
    ) -> StoreFuture<'a, HashMap<String, Value>> {
        Box::pin(async move {
            let results = match self.results.get(doc) {
                Some(entries) => entries
                    .iter()
                    .map(|(k, e)| (k.clone(), e.value.clone()))
                    .collect(),
                None => HashMap::new(),
            };
            Ok(results)
        })
    }

    fn get_result<'a>(
        &'a self,
        prefix_key: &'a str,
        doc: &'a StoreRef,
    ) -> StoreFuture<'a, Option<Value>> {
        Box::pin(async move {
            Ok(self
                .results
                .get(doc)
                .and_then(|entries| entries.get(prefix_key).map(|e| e.value.clone())))
        })
    }

    fn get_result_batch<'a>(
        &'a self,
        prefix_key: &'a str,
        docs: &'a [StoreRef],
    ) -> StoreFuture<'a, HashMap<StoreRef, Value>> {
        Box::pin(async move {
            let mut hits = HashMap::new();
            for doc in docs {
                if let Some(entries) = self.results.get(doc) {
                    if let Some(entry) = entries.get(prefix_key) {
                        hits.insert(doc.clone(), entry.value.clone());
                    }
                }
            }
            Ok(hits)
        })
    }

    fn store_result<'a>(
        &'a self,
        value: Value,
        prefix_key: &'a str,
        doc: &'a StoreRef,
    ) -> StoreFuture<'a, Value> {
        Box::pin(async move {
            self.results.entry(doc.clone()).or_default().insert(
                prefix_key.to_string(),
                StoredEntry {
                    value: value.clone(),
                    stored_at: Utc::now(),
                },
            );
            self.write_count.fetch_add(1, Ordering::Relaxed);
            Ok(value)
        })
    }

    fn fetch_content<'a>(&'a self, doc: &'a StoreRef) -> StoreFuture<'a, Value> {
        Box::pin(async move {
            let fields = self
                .documents
                .get(&(doc.collection.clone(), doc.id.clone()))
                .ok_or_else(|| StoreError::NotFound(doc.clone()))?;
            fields
                .get(&doc.field)
                .cloned()
                .ok_or_else(|| StoreError::MissingField {
                    doc: doc.clone(),
                    field: doc.field.clone(),
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str) -> StoreRef {
        StoreRef::new("articles", id, "body")
    }

    #[tokio::test]
    async fn test_fetch_content() {
        let store = MemoryStore::new();
        store.insert_document("articles", "1", "body", "The cat is happy");

        let content = store.fetch_content(&doc("1")).await.unwrap();
        assert_eq!(content, json!("The cat is happy"));
    }

    #[tokio::test]
    async fn test_fetch_content_not_found() {
        let store = MemoryStore::new();
        let err = store.fetch_content(&doc("missing")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_content_missing_field() {
        let store = MemoryStore::new();
        store.insert_document("articles", "1", "title", "Cats");

        let err = store.fetch_content(&doc("1")).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingField { .. }));
    }

    #[tokio::test]
    async fn test_store_result_passes_value_through() {
        let store = MemoryStore::new();
        let value = json!([{"token": "cats"}]);

        let returned = store
            .store_result(value.clone(), "tokenize", &doc("1"))
            .await
            .unwrap();
        assert_eq!(returned, value);
        assert_eq!(store.result_count(), 1);
        assert!(store.entry_timestamp(&doc("1"), "tokenize").is_some());
    }

    #[tokio::test]
    async fn test_store_result_overwrites_last_write_wins() {
        let store = MemoryStore::new();
        store
            .store_result(json!("first"), "tokenize", &doc("1"))
            .await
            .unwrap();
        store
            .store_result(json!("second"), "tokenize", &doc("1"))
            .await
            .unwrap();

        let result = store.get_result("tokenize", &doc("1")).await.unwrap();
        assert_eq!(result, Some(json!("second")));
        assert_eq!(store.result_count(), 1);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_get_all_results_empty_for_unknown_doc() {
        let store = MemoryStore::new();
        let results = store.get_all_results(&doc("1")).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_get_result_batch() {
        let store = MemoryStore::new();
        store
            .store_result(json!("a"), "tokenize", &doc("1"))
            .await
            .unwrap();
        store
            .store_result(json!("b"), "tokenize", &doc("3"))
            .await
            .unwrap();

        let docs = vec![doc("1"), doc("2"), doc("3")];
        let hits = store.get_result_batch("tokenize", &docs).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.get(&doc("1")), Some(&json!("a")));
        assert!(!hits.contains_key(&doc("2")));
    }

    #[tokio::test]
    async fn test_results_keyed_by_field() {
        let store = MemoryStore::new();
        let body = StoreRef::new("articles", "1", "body");
        let title = StoreRef::new("articles", "1", "title");
        store
            .store_result(json!("body tokens"), "tokenize", &body)
            .await
            .unwrap();

        let title_results = store.get_all_results(&title).await.unwrap();
        assert!(title_results.is_empty());
    }
}
