//! Declared task arguments.
//!
//! Arguments come from the pipeline description as either a positional
//! list or a keyed mapping. Keyed arguments are held in a `BTreeMap` so
//! their rendering order is canonical regardless of how the caller wrote
//! them, which keeps prefix keys stable.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Arguments declared for one pipeline step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskArgs {
    /// No arguments declared.
    #[default]
    None,

    /// Positional argument list.
    Positional(Vec<Value>),

    /// Keyed argument mapping, canonically ordered.
    Keyed(BTreeMap<String, Value>),
}

impl TaskArgs {
    /// Builds keyed arguments from `(name, value)` pairs.
    pub fn keyed<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Keyed(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds positional arguments from a list of values.
    pub fn positional<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Self::Positional(values.into_iter().collect())
    }

    /// Returns true if no arguments were declared.
    ///
    /// An explicitly empty list or mapping counts as empty too; it binds
    /// the same function as declaring nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Positional(values) => values.is_empty(),
            Self::Keyed(map) => map.is_empty(),
        }
    }

    /// Looks up a keyed argument by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Keyed(map) => map.get(name),
            _ => None,
        }
    }

    /// Looks up a positional argument by index.
    pub fn position(&self, index: usize) -> Option<&Value> {
        match self {
            Self::Positional(values) => values.get(index),
            _ => None,
        }
    }

    /// Renders the arguments as a deterministic canonical-name suffix.
    ///
    /// Empty arguments render as the empty string so that argument-free
    /// steps keep a bare task name as their cache-key component. Non-empty
    /// arguments render as `("a","b")` or `(k="v",k2=3)` with every value
    /// written as compact JSON. Keeping strings quoted and escaped means a
    /// comma or quote inside a value can never be confused with the
    /// separators, so distinct argument sets always render distinctly.
    pub fn canonical_suffix(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let body = match self {
            Self::None => unreachable!("empty args handled above"),
            Self::Positional(values) => values
                .iter()
                .map(render_value)
                .collect::<Vec<_>>()
                .join(","),
            Self::Keyed(map) => map
                .iter()
                .map(|(k, v)| format!("{}={}", k, render_value(v)))
                .collect::<Vec<_>>()
                .join(","),
        };
        format!("({})", body)
    }
}

/// Renders a single argument value for canonical names.
fn render_value(value: &Value) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_none_is_empty() {
        assert!(TaskArgs::None.is_empty());
        assert_eq!(TaskArgs::None.canonical_suffix(), "");
    }

    #[test]
    fn test_explicitly_empty_collections_are_empty() {
        assert!(TaskArgs::positional([]).is_empty());
        assert!(TaskArgs::keyed::<String, _>([]).is_empty());
        assert_eq!(TaskArgs::positional([]).canonical_suffix(), "");
    }

    #[test]
    fn test_positional_suffix() {
        let args = TaskArgs::positional([json!("nltk"), json!(3)]);
        assert_eq!(args.canonical_suffix(), r#"("nltk",3)"#);
    }

    #[test]
    fn test_keyed_suffix_is_order_independent() {
        let a = TaskArgs::keyed([("model", json!("nltk")), ("lang", json!("en"))]);
        let b = TaskArgs::keyed([("lang", json!("en")), ("model", json!("nltk"))]);
        assert_eq!(a.canonical_suffix(), r#"(lang="en",model="nltk")"#);
        assert_eq!(a.canonical_suffix(), b.canonical_suffix());
    }

    #[test]
    fn test_string_containing_separator_renders_distinctly() {
        let joined = TaskArgs::positional([json!("a,b")]);
        let split = TaskArgs::positional([json!("a"), json!("b")]);
        assert_eq!(joined.canonical_suffix(), r#"("a,b")"#);
        assert_eq!(split.canonical_suffix(), r#"("a","b")"#);
        assert_ne!(joined.canonical_suffix(), split.canonical_suffix());
    }

    #[test]
    fn test_string_and_number_render_distinctly() {
        let string = TaskArgs::positional([json!("5")]);
        let number = TaskArgs::positional([json!(5)]);
        assert_eq!(string.canonical_suffix(), r#"("5")"#);
        assert_eq!(number.canonical_suffix(), "(5)");
        assert_ne!(string.canonical_suffix(), number.canonical_suffix());
    }

    #[test]
    fn test_get_and_position() {
        let keyed = TaskArgs::keyed([("model", json!("nltk"))]);
        assert_eq!(keyed.get("model"), Some(&json!("nltk")));
        assert_eq!(keyed.get("missing"), None);
        assert_eq!(keyed.position(0), None);

        let positional = TaskArgs::positional([json!("nltk")]);
        assert_eq!(positional.position(0), Some(&json!("nltk")));
        assert_eq!(positional.get("model"), None);
    }

    #[test]
    fn test_deserialize_mapping() {
        let args: TaskArgs = serde_json::from_str(r#"{"model": "nltk"}"#).unwrap();
        assert_eq!(args, TaskArgs::keyed([("model", json!("nltk"))]));
    }

    #[test]
    fn test_deserialize_list() {
        let args: TaskArgs = serde_json::from_str(r#"["nltk"]"#).unwrap();
        assert_eq!(args, TaskArgs::positional([json!("nltk")]));
    }

    #[test]
    fn test_deserialize_null() {
        let args: TaskArgs = serde_json::from_str("null").unwrap();
        assert_eq!(args, TaskArgs::None);
    }

    #[test]
    fn test_non_string_values_render_as_json() {
        let args = TaskArgs::keyed([("threshold", json!(0.5)), ("tags", json!(["a", "b"]))]);
        assert_eq!(
            args.canonical_suffix(),
            r#"(tags=["a","b"],threshold=0.5)"#
        );
    }
}
