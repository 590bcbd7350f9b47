//! Part-of-speech tagging task.
//!
//! Consumes tokenizer output and produces `[token, tag]` pairs using a
//! small closed-class lexicon plus suffix heuristics. The `model` argument
//! is validated; only the built-in `"lexicon"` model is supported.

use super::tokens_from_value;
use crate::task::{Task, TaskArgs, TaskError};
use serde_json::{json, Value};

/// The only model this reference implementation ships.
const DEFAULT_MODEL: &str = "lexicon";

/// Tags tokens with Penn-Treebank-style part-of-speech labels.
///
/// Accepts a `model` argument (keyed, or first positional); anything other
/// than `"lexicon"` is rejected, mirroring how a real tagger would refuse
/// an unknown model rather than silently fall back.
pub struct PosTag;

impl Task for PosTag {
    fn name(&self) -> &str {
        "pos_tag"
    }

    fn invoke(&self, input: Value, args: &TaskArgs) -> Result<Value, TaskError> {
        let model = args
            .get("model")
            .or_else(|| args.position(0))
            .map(|v| {
                v.as_str().ok_or_else(|| {
                    TaskError::invalid_argument("pos_tag", format!("model must be a string: {}", v))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_MODEL);
        if model != DEFAULT_MODEL {
            return Err(TaskError::invalid_argument(
                "pos_tag",
                format!("unknown model {:?}", model),
            ));
        }

        let tokens = tokens_from_value("pos_tag", &input)?;
        let tagged: Vec<Value> = tokens
            .iter()
            .map(|t| json!([t, tag_word(t)]))
            .collect();
        Ok(Value::Array(tagged))
    }
}

/// Tags a single word.
///
/// Closed-class words come from a fixed lexicon; open-class words fall
/// back to suffix heuristics (`-y` adjectives, `-s` plurals) with `NN` as
/// the default.
fn tag_word(word: &str) -> &'static str {
    let lower = word.to_lowercase();
    match lower.as_str() {
        "the" | "a" | "an" | "some" | "this" | "that" => "DT",
        "my" | "your" | "his" | "her" | "its" | "our" | "their" => "PRP$",
        "i" | "you" | "he" | "she" | "it" | "we" | "they" => "PRP",
        "is" | "has" | "does" => "VBZ",
        "are" | "have" | "do" => "VBP",
        "was" | "were" | "had" | "did" => "VBD",
        "and" | "or" | "but" => "CC",
        "in" | "on" | "at" | "of" | "for" | "with" => "IN",
        "not" | "very" | "happily" => "RB",
        _ => {
            if !lower.chars().all(char::is_alphanumeric) {
                "SYM"
            } else if lower.chars().all(char::is_numeric) {
                "CD"
            } else if lower.ends_with('y') {
                "JJ"
            } else if lower.ends_with('s') && !lower.ends_with("ss") && lower.len() > 1 {
                "NNS"
            } else {
                "NN"
            }
        }
    }
}
