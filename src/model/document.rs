//! Partial documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The subset of a category's fields an operator has chosen to manage
///
/// Keys keep their declaration order. Equality is deep and ignores key order.
/// Keys that are not fields of the category are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialDocument(Map<String, Value>);

impl PartialDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object
    ///
    /// # Errors
    ///
    /// Fails when the input is not valid JSON or is not an object.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    pub fn keys(&self) -> serde_json::map::Keys<'_> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for PartialDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<PartialDocument> for Value {
    fn from(document: PartialDocument) -> Self {
        Value::Object(document.0)
    }
}

impl<'a> IntoIterator for &'a PartialDocument {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for PartialDocument {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for PartialDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_e| std::fmt::Error)?;
        f.write_str(&json)
    }
}
