mod loader;
mod merger;
pub mod properties;

pub use loader::{resource_name, CachingLoader, InMemoryLoader, LoadError, PropertyLoader};
pub use merger::BundleMerger;

use serde::Serialize;
use std::collections::BTreeMap;

/// Raw key/value pairs of one property resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyBundle {
    entries: BTreeMap<String, String>,
}

impl PropertyBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// First write wins: returns false when `key` already has a value.
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    pub fn merge_missing(&mut self, other: &PropertyBundle) {
        for (key, value) in other.iter() {
            self.insert_if_absent(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyBundle
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Merged values of one interface for one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBundle {
    pub locale: String,
    pub values: PropertyBundle,
}

impl ResolvedBundle {
    pub fn new(locale: impl Into<String>, values: PropertyBundle) -> Self {
        Self {
            locale: locale.into(),
            values,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key)
    }
}
