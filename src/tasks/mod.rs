//! Built-in reference tasks.
//!
//! These are deliberately simple implementations of the classic first
//! stages of a text pipeline, sufficient to exercise the scheduler and to
//! serve as templates for real task implementations. Linguistic quality is
//! out of scope; each task is a small, deterministic function of its input
//! and arguments.
//!
//! # Data Flow
//!
//! ```text
//! tokenize   : "cats are furry"        → [{"token": "cats"}, ...]
//! pos_tag    : [{"token": t}, ...]     → [["cats", "NNS"], ...]
//! lowercase  : "The Cat"               → "the cat"
//! lemmatize  : text or token list      → [{"token": lemma}, ...]
//! ```

mod lemmatize;
mod lowercase;
mod pos_tag;
mod tokenize;

pub use lemmatize::Lemmatize;
pub use lowercase::Lowercase;
pub use pos_tag::PosTag;
pub use tokenize::Tokenize;

use crate::task::TaskError;
use serde_json::Value;

/// Extracts a token list (`[{"token": t}, ...]`) from a task input value.
///
/// Shared by the tasks that consume tokenizer output.
pub(crate) fn tokens_from_value(task: &str, input: &Value) -> Result<Vec<String>, TaskError> {
    let items = input
        .as_array()
        .ok_or_else(|| TaskError::invalid_input(task, "expected a token list"))?;
    items
        .iter()
        .map(|item| {
            item.get("token")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    TaskError::invalid_input(task, format!("malformed token entry: {}", item))
                })
        })
        .collect()
}
