//! docpipe - document pipeline execution with memoized prefix caching.
//!
//! This library applies a named, ordered sequence of transformation steps
//! to a document while avoiding recomputation of steps whose results were
//! already produced and persisted for that exact document and that exact
//! ordered prefix of steps. Pipelines frequently share prefixes (a
//! `tokenize` step feeds both tagging and lemmatization), and documents
//! are frequently reprocessed with extended pipelines; the scheduler
//! finds the longest cached prefix and submits only the remaining suffix.
//!
//! # High-Level API
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
//!         &DocumentRef::stored("articles", "42", "body"),
//!         &[TaskDescriptor::new("tokenize"), TaskDescriptor::new("pos_tag")],
//!         &PipelineOptions::default().store_intermediate(true),
//!     )
//!     .await?;
//! ```

pub mod document;
pub mod executor;
pub mod pipeline;
pub mod scheduler;
pub mod store;
pub mod task;
pub mod tasks;

/// Version of the docpipe library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
