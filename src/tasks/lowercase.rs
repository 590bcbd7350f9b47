//! Lowercase task.

use crate::task::{Task, TaskArgs, TaskError};
use serde_json::Value;

/// Lowercases a text string.
pub struct Lowercase;

impl Task for Lowercase {
    fn name(&self) -> &str {
        "lowercase"
    }

    fn invoke(&self, input: Value, _args: &TaskArgs) -> Result<Value, TaskError> {
        let text = input
            .as_str()
            .ok_or_else(|| TaskError::invalid_input("lowercase", "expected a text string"))?;
        Ok(Value::String(text.to_lowercase()))
    }
}
