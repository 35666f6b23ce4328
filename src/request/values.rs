use crate::errors::BuildError;
use serde_json::Value;
use std::collections::HashMap;

/// A flat mapping of caller-supplied values, normalized at the boundary.
///
/// Keys are normalized to their plain string form when the mapping is
/// constructed; every internal lookup is ordinary exact-match. One
/// instance carries parameter values, a second carries header values.
#[derive(Debug, Clone, Default)]
pub struct SuppliedValues {
    entries: HashMap<String, Value>,
}

impl SuppliedValues {
    pub fn new() -> Self {
        SuppliedValues::default()
    }

    /// Build from a JSON value supplied by the caller.
    ///
    /// `null` is treated as an empty mapping. Anything other than a
    /// mapping is an invalid-argument error naming `source` (for example
    /// `"request parameters"`).
    pub fn from_value(source: &str, value: &Value) -> Result<Self, BuildError> {
        match value {
            Value::Null => Ok(SuppliedValues::new()),
            Value::Object(map) => Ok(SuppliedValues {
                entries: map
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            }),
            _ => Err(BuildError::InvalidArgument {
                source: source.to_string(),
            }),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for SuppliedValues {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        SuppliedValues {
            entries: iter.into_iter().collect(),
        }
    }
}
