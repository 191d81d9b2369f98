//! Three-state field values.
//!
//! The Management API distinguishes a field that was omitted from a field that
//! was explicitly returned as `null`. `Option<T>` collapses the two, so
//! documents use `Nullable<T>` with `#[serde(default)]`: a missing key
//! deserializes to `Unspecified`, `null` to `Null`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Nullable<T> {
    /// Key not present
    #[default]
    Unspecified,
    /// Key present with an explicit `null`
    Null,
    /// Key present with a value
    Value(T),
}

impl<T> Nullable<T> {
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Nullable::Unspecified)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Nullable::Value(value) => Some(value),
            Nullable::Unspecified | Nullable::Null => None,
        }
    }
}

impl<T: Serialize> Nullable<T> {
    /// Convert the value to JSON, keeping the three states apart
    pub fn to_json(&self) -> Result<Nullable<Value>, serde_json::Error> {
        Ok(match self {
            Nullable::Unspecified => Nullable::Unspecified,
            Nullable::Null => Nullable::Null,
            Nullable::Value(value) => Nullable::Value(serde_json::to_value(value)?),
        })
    }
}

impl<T: DeserializeOwned> Nullable<T> {
    /// A declared JSON value: `null` stays `Null`, anything else must decode as `T`
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Null => Ok(Nullable::Null),
            other => serde_json::from_value(other).map(Nullable::Value),
        }
    }
}

impl Nullable<Value> {
    /// Collapse into a plain JSON value; omitted and null both become `null`
    pub fn into_value(self) -> Value {
        match self {
            Nullable::Value(value) => value,
            Nullable::Unspecified | Nullable::Null => Value::Null,
        }
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Nullable::Null, Nullable::Value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Value(value) => serializer.serialize_some(value),
            Nullable::Unspecified | Nullable::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Nullable::from)
    }
}
