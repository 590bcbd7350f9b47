//! Tokenize task.
//!
//! Splits text into word and punctuation tokens. Output is a list of
//! `{"token": t}` objects, the shape the downstream tasks consume.

use crate::task::{Task, TaskArgs, TaskError};
use serde_json::{json, Value};

/// Splits a text into `{"token": t}` entries.
///
/// Words are maximal runs of alphanumeric characters (apostrophes stay
/// inside words, so "don't" is one token); any other non-whitespace
/// character becomes a single-character token.
pub struct Tokenize;

impl Task for Tokenize {
    fn name(&self) -> &str {
        "tokenize"
    }

    fn invoke(&self, input: Value, _args: &TaskArgs) -> Result<Value, TaskError> {
        let text = input
            .as_str()
            .ok_or_else(|| TaskError::invalid_input("tokenize", "expected a text string"))?;
        let tokens: Vec<Value> = split_tokens(text)
            .into_iter()
            .map(|t| json!({ "token": t }))
            .collect();
        Ok(Value::Array(tokens))
    }
}

/// Splits text into word and punctuation tokens.
fn split_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '\'' {
            word.push(ch);
        } else {
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
            if !ch.is_whitespace() {
                tokens.push(ch.to_string());
            }
        }
    }
    if !word.is_empty() {
        tokens.push(word);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tokenize_words() {
        let out = Tokenize.invoke(json!("cats are furry"), &TaskArgs::None).unwrap();
        assert_eq!(
            out,
            json!([{"token": "cats"}, {"token": "are"}, {"token": "furry"}])
        );
    }

    #[test]
    fn test_tokenize_punctuation() {
        let out = Tokenize
            .invoke(json!("The cat, happily."), &TaskArgs::None)
            .unwrap();
        assert_eq!(
            out,
            json!([
                {"token": "The"}, {"token": "cat"}, {"token": ","},
                {"token": "happily"}, {"token": "."}
            ])
        );
    }

    #[test]
    fn test_tokenize_keeps_apostrophes() {
        let out = Tokenize.invoke(json!("don't"), &TaskArgs::None).unwrap();
        assert_eq!(out, json!([{"token": "don't"}]));
    }

    #[test]
    fn test_tokenize_empty_string() {
        let out = Tokenize.invoke(json!(""), &TaskArgs::None).unwrap();
        assert_eq!(out, json!([]));
    }

    #[test]
    fn test_tokenize_rejects_non_string() {
        let err = Tokenize.invoke(json!(42), &TaskArgs::None).unwrap_err();
        assert!(matches!(err, TaskError::InvalidInput { .. }));
    }
}
