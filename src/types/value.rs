//! Untyped configuration values and typed field lookups.
//!
//! Raw provisioner documents arrive as loosely typed JSON or YAML. They are
//! converted once into [`ConfigValue`] so that the validator and the decoder
//! read the same tree through the same accessors.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::play::YesNo;

/// A node of a raw configuration document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Map(ConfigMap),
}

pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// Shape of a value, used in type mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
    List,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

impl ConfigValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::Bool(_) => ValueKind::Bool,
            ConfigValue::Int(_) => ValueKind::Int,
            ConfigValue::Float(_) => ValueKind::Float,
            ConfigValue::String(_) => ValueKind::String,
            ConfigValue::List(_) => ValueKind::List,
            ConfigValue::Map(_) => ValueKind::Map,
        }
    }

    /// Converts a parsed JSON tree. `null` has no counterpart and yields `None`;
    /// `null` entries inside maps and lists are dropped.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(ConfigValue::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(ConfigValue::Int(i)),
                None => n.as_f64().map(ConfigValue::Float),
            },
            serde_json::Value::String(s) => Some(ConfigValue::String(s)),
            serde_json::Value::Array(items) => Some(ConfigValue::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            serde_json::Value::Object(entries) => Some(ConfigValue::Map(
                entries
                    .into_iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|v| (k, v)))
                    .collect(),
            )),
        }
    }

    /// JSON form of the value, used for `--extra-vars` payloads.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Scalar rendering for `key=value` module arguments.
    pub fn to_arg_string(&self) -> String {
        match self {
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Int(i) => i.to_string(),
            ConfigValue::Float(f) => f.to_string(),
            ConfigValue::String(s) => s.clone(),
            ConfigValue::List(_) | ConfigValue::Map(_) => self.to_json().to_string(),
        }
    }
}

/// Outcome of reading one field with an expected shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The key is not in the document.
    Absent,
    /// The key is present and has the expected shape.
    Present(T),
    /// The key is present but its shape is wrong.
    Mismatch { expected: &'static str, found: String },
    /// The shape is right but the value is outside the accepted set.
    Invalid { expected: &'static str, value: String },
}

impl<T> Lookup<T> {
    pub fn is_present(&self) -> bool {
        !matches!(self, Lookup::Absent)
    }

    pub fn present(self) -> Option<T> {
        match self {
            Lookup::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Absent => Lookup::Absent,
            Lookup::Present(value) => Lookup::Present(f(value)),
            Lookup::Mismatch { expected, found } => Lookup::Mismatch { expected, found },
            Lookup::Invalid { expected, value } => Lookup::Invalid { expected, value },
        }
    }
}

fn mismatch<T>(expected: &'static str, value: &ConfigValue) -> Lookup<T> {
    Lookup::Mismatch {
        expected,
        found: value.kind().to_string(),
    }
}

/// Typed read access over a configuration mapping.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    entries: &'a ConfigMap,
}

impl<'a> Document<'a> {
    pub fn new(entries: &'a ConfigMap) -> Self {
        Self { entries }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a String> {
        self.entries.keys()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<&'a ConfigValue> {
        self.entries.get(key)
    }

    pub fn string(&self, key: &str) -> Lookup<String> {
        match self.entries.get(key) {
            None => Lookup::Absent,
            Some(ConfigValue::String(s)) => Lookup::Present(s.clone()),
            Some(other) => mismatch("string", other),
        }
    }

    /// Reads a literal `"yes"`/`"no"` token. Native booleans are a mismatch.
    pub fn yes_no(&self, key: &str) -> Lookup<YesNo> {
        match self.entries.get(key) {
            None => Lookup::Absent,
            Some(ConfigValue::String(s)) => match s.parse::<YesNo>() {
                Ok(token) => Lookup::Present(token),
                Err(_) => Lookup::Invalid {
                    expected: "\"yes\" or \"no\"",
                    value: format!("{s:?}"),
                },
            },
            Some(other) => mismatch("\"yes\" or \"no\"", other),
        }
    }

    pub fn count(&self, key: &str) -> Lookup<u32> {
        match self.entries.get(key) {
            None => Lookup::Absent,
            Some(ConfigValue::Int(i)) => match u32::try_from(*i) {
                Ok(n) => Lookup::Present(n),
                Err(_) => Lookup::Invalid {
                    expected: "non-negative integer",
                    value: i.to_string(),
                },
            },
            Some(other) => mismatch("non-negative integer", other),
        }
    }

    pub fn string_list(&self, key: &str) -> Lookup<Vec<String>> {
        match self.entries.get(key) {
            None => Lookup::Absent,
            Some(ConfigValue::List(items)) => {
                let mut strings = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        ConfigValue::String(s) => strings.push(s.clone()),
                        other => return mismatch("list of strings", other),
                    }
                }
                Lookup::Present(strings)
            }
            Some(other) => mismatch("list of strings", other),
        }
    }

    pub fn map(&self, key: &str) -> Lookup<ConfigMap> {
        match self.entries.get(key) {
            None => Lookup::Absent,
            Some(ConfigValue::Map(entries)) => Lookup::Present(entries.clone()),
            Some(other) => mismatch("map", other),
        }
    }

    /// Reads a list whose every element is a mapping.
    pub fn map_list(&self, key: &str) -> Lookup<Vec<&'a ConfigMap>> {
        match self.entries.get(key) {
            None => Lookup::Absent,
            Some(ConfigValue::List(items)) => {
                let mut maps = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        ConfigValue::Map(entries) => maps.push(entries),
                        other => return mismatch("list of maps", other),
                    }
                }
                Lookup::Present(maps)
            }
            Some(other) => mismatch("list of maps", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> ConfigMap {
        match ConfigValue::from_json(value) {
            Some(ConfigValue::Map(entries)) => entries,
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn test_null_is_absent() {
        let entries = map(json!({"limit": null, "forks": 3}));
        let doc = Document::new(&entries);

        assert_eq!(doc.string("limit"), Lookup::Absent);
        assert_eq!(doc.count("forks"), Lookup::Present(3));
    }

    #[test]
    fn test_yes_no_rejects_native_bool() {
        let entries = map(json!({"use_sudo": true, "local": "yes", "verbose": "maybe"}));
        let doc = Document::new(&entries);

        assert!(matches!(doc.yes_no("use_sudo"), Lookup::Mismatch { .. }));
        assert_eq!(doc.yes_no("local"), Lookup::Present(YesNo::Yes));
        assert_eq!(
            doc.yes_no("verbose"),
            Lookup::Invalid {
                expected: "\"yes\" or \"no\"",
                value: "\"maybe\"".to_string(),
            }
        );
    }

    #[test]
    fn test_count_rejects_negative_and_strings() {
        let entries = map(json!({"a": -1, "b": "10", "c": 10}));
        let doc = Document::new(&entries);

        assert!(matches!(doc.count("a"), Lookup::Invalid { .. }));
        assert!(matches!(doc.count("b"), Lookup::Mismatch { .. }));
        assert_eq!(doc.count("c"), Lookup::Present(10));
    }

    #[test]
    fn test_string_list_requires_string_items() {
        let entries = map(json!({"good": ["a", "b"], "bad": ["a", 1], "empty": []}));
        let doc = Document::new(&entries);

        assert_eq!(
            doc.string_list("good"),
            Lookup::Present(vec!["a".to_string(), "b".to_string()])
        );
        assert!(matches!(doc.string_list("bad"), Lookup::Mismatch { .. }));
        assert_eq!(doc.string_list("empty"), Lookup::Present(vec![]));
    }

    #[test]
    fn test_to_json_keeps_nested_shape() {
        let value = ConfigValue::from_json(json!({"VAR1": "value 1", "n": [1, 2]})).unwrap();
        assert_eq!(value.to_json(), json!({"VAR1": "value 1", "n": [1, 2]}));
    }
}
