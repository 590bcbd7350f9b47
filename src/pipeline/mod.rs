//! Pipeline compilation, prefix keys, cache probing, and chain building.
//!
//! This module turns a declarative pipeline description into everything
//! the scheduler needs:
//!
//! - [`Pipeline`] - the resolved task sequence with precomputed prefix
//!   keys, one per prefix length
//! - [`probe_document`] / [`probe_batch`] - longest-cached-prefix search
//!   against a result store
//! - [`ExecutionChain`] - the minimal suffix of task invocations and
//!   persistence side-effects that still has to run
//!
//! # Prefix Keys
//!
//! The cache key for "the first `k` steps of this pipeline" is the
//! canonical names of those steps joined by `"__"`. Two pipelines that
//! agree on their first `k` steps (names and arguments) share the key for
//! prefix `k`, which is what lets a `[tokenize]` run feed a later
//! `[tokenize, pos_tag]` run.
//!
//! # Example
//!
//! ```ignore
//! use docpipe::pipeline::Pipeline;
//! use docpipe::task::{Registry, TaskDescriptor};
//!
//! let registry = Registry::with_builtin_tasks();
//! let pipeline = Pipeline::compile(
//!     &registry,
//!     &[TaskDescriptor::new("tokenize"), TaskDescriptor::new("pos_tag")],
//! )?;
//! assert_eq!(pipeline.prefix_key(2), "tokenize__pos_tag");
//! ```

mod chain;
mod compiler;
mod probe;

pub use chain::{build_suffix_steps, run_chain, ChainStep, ExecutionChain, PersistTarget};
pub use compiler::{Pipeline, PREFIX_SEPARATOR};
pub use probe::{probe_batch, probe_document, ProbeOutcome};
