//! Lemmatize task.
//!
//! Reduces words to a base form by naive plural stripping. Accepts either
//! raw text (tokenized internally on whitespace) or tokenizer output, the
//! same tolerance the original lemmatizer had for un-tokenized input.

use super::tokens_from_value;
use crate::task::{Task, TaskArgs, TaskError};
use serde_json::{json, Value};

/// Reduces tokens to naive base forms.
pub struct Lemmatize;

impl Task for Lemmatize {
    fn name(&self) -> &str {
        "lemmatize"
    }

    fn invoke(&self, input: Value, _args: &TaskArgs) -> Result<Value, TaskError> {
        let tokens = match &input {
            Value::String(text) => text.split_whitespace().map(str::to_string).collect(),
            _ => tokens_from_value("lemmatize", &input)?,
        };
        let lemmas: Vec<Value> = tokens
            .iter()
            .map(|t| json!({ "token": lemma(t) }))
            .collect();
        Ok(Value::Array(lemmas))
    }
}

/// Strips common plural suffixes.
fn lemma(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some(stem) = lower.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = lower.strip_suffix("es") {
        if stem.ends_with('s') || stem.ends_with('x') || stem.ends_with("ch") || stem.ends_with("sh")
        {
            return stem.to_string();
        }
    }
    if lower.len() > 2 && lower.ends_with('s') && !lower.ends_with("ss") {
        return lower[..lower.len() - 1].to_string();
    }
    lower
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lemmatize_token_list() {
        let input = json!([{"token": "cats"}, {"token": "boxes"}, {"token": "ponies"}]);
        let out = Lemmatize.invoke(input, &TaskArgs::None).unwrap();
        assert_eq!(
            out,
            json!([{"token": "cat"}, {"token": "box"}, {"token": "pony"}])
        );
    }

    #[test]
    fn test_lemmatize_raw_text() {
        let out = Lemmatize
            .invoke(json!("cats are furry"), &TaskArgs::None)
            .unwrap();
        assert_eq!(
            out,
            json!([{"token": "cat"}, {"token": "are"}, {"token": "furry"}])
        );
    }

    #[test]
    fn test_lemma_keeps_short_and_double_s_words() {
        assert_eq!(lemma("is"), "is");
        assert_eq!(lemma("glass"), "glass");
    }
}
