use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Set by the multisite stage: the working path before it was rewritten.
pub const ORIGINAL_PATH: &str = "original_path";

/// Set by the directory index stage when the working path now points at an index file.
pub const DIRECTORY_INDEX: &str = "directory_index";

/// Facts recorded about a request while it moves through the pipeline.
///
/// Purely informational. Stages must not branch on annotations written by
/// other stages.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Annotations(BTreeMap<String, Value>);

impl Annotations {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}
