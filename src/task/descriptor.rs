//! Pipeline step descriptors and the wire format.
//!
//! A pipeline description is an ordered list of objects
//! `{"task": <identifier>, "arguments": <mapping | list>}`; a bare string
//! is shorthand for `{"task": <identifier>}`. Descriptors are plain data;
//! nothing is resolved or validated until compilation.

use super::args::TaskArgs;
use serde::{Deserialize, Serialize};

/// One step of a declarative pipeline description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DescriptorRepr")]
pub struct TaskDescriptor {
    /// Task identifier, resolved against a [`Registry`](super::Registry).
    pub task: String,

    /// Declared arguments for the step.
    #[serde(default, skip_serializing_if = "TaskArgs::is_empty")]
    pub arguments: TaskArgs,
}

impl TaskDescriptor {
    /// Creates a descriptor with no arguments.
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            arguments: TaskArgs::None,
        }
    }

    /// Creates a descriptor with arguments.
    pub fn with_args(task: impl Into<String>, arguments: TaskArgs) -> Self {
        Self {
            task: task.into(),
            arguments,
        }
    }
}

impl From<&str> for TaskDescriptor {
    fn from(task: &str) -> Self {
        Self::new(task)
    }
}

/// Wire representation: bare identifier or full object.
#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptorRepr {
    Bare(String),
    Full {
        task: String,
        #[serde(default)]
        arguments: TaskArgs,
    },
}

impl From<DescriptorRepr> for TaskDescriptor {
    fn from(repr: DescriptorRepr) -> Self {
        match repr {
            DescriptorRepr::Bare(task) => Self::new(task),
            DescriptorRepr::Full { task, arguments } => Self { task, arguments },
        }
    }
}

/// Parses a JSON pipeline description into a descriptor list.
pub fn parse_descriptors(json: &str) -> Result<Vec<TaskDescriptor>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_objects() {
        let descriptors = parse_descriptors(
            r#"[{"task": "tokenize"},
                {"task": "pos_tag", "arguments": {"model": "nltk"}}]"#,
        )
        .unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0], TaskDescriptor::new("tokenize"));
        assert_eq!(
            descriptors[1],
            TaskDescriptor::with_args("pos_tag", TaskArgs::keyed([("model", json!("nltk"))]))
        );
    }

    #[test]
    fn test_parse_bare_identifiers() {
        let descriptors = parse_descriptors(r#"["tokenize", "pos_tag"]"#).unwrap();
        assert_eq!(
            descriptors,
            vec![TaskDescriptor::new("tokenize"), TaskDescriptor::new("pos_tag")]
        );
    }

    #[test]
    fn test_parse_mixed_forms() {
        let descriptors = parse_descriptors(
            r#"["tokenize", {"task": "pos_tag", "arguments": ["nltk"]}]"#,
        )
        .unwrap();
        assert_eq!(descriptors[1].arguments, TaskArgs::positional([json!("nltk")]));
    }

    #[test]
    fn test_parse_rejects_malformed_entries() {
        assert!(parse_descriptors(r#"[{"arguments": {}}]"#).is_err());
        assert!(parse_descriptors(r#"[42]"#).is_err());
    }

    #[test]
    fn test_serialize_omits_empty_arguments() {
        let json = serde_json::to_value(TaskDescriptor::new("tokenize")).unwrap();
        assert_eq!(json, json!({"task": "tokenize"}));
    }
}
