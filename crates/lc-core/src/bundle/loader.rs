use super::properties::parse_properties;
use super::PropertyBundle;
use crate::model::TypeNode;
use dashmap::DashMap;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to read {resource}: {message}")]
    Unreadable { resource: String, message: String },
    #[error("invalid property resource {resource}: {message}")]
    Malformed { resource: String, message: String },
}

/// Loads the own property resource of one type for one locale suffix.
///
/// `Ok(None)` means the resource does not exist, which is not an error by itself.
pub trait PropertyLoader: Send + Sync {
    fn load(&self, ty: &TypeNode, suffix: &str) -> Result<Option<PropertyBundle>, LoadError>;
}

/// `pkg/dirs/Name[_suffix].properties`
pub fn resource_name(ty: &TypeNode, suffix: &str) -> String {
    let mut name = String::new();
    if let Some(package) = &ty.package {
        name.push_str(&package.replace('.', "/"));
        name.push('/');
    }
    name.push_str(&ty.name);
    if !suffix.is_empty() {
        name.push('_');
        name.push_str(suffix);
    }
    name.push_str(".properties");
    name
}

/// Resources registered programmatically, keyed by qualified type name and suffix.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    resources: HashMap<(String, String), PropertyBundle>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I, K, V>(&mut self, ty: &str, suffix: &str, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.resources
            .insert((ty.to_string(), suffix.to_string()), entries.into_iter().collect());
    }

    /// Registers a resource given as `.properties` text.
    pub fn insert_text(&mut self, ty: &str, suffix: &str, text: &str) -> Result<(), LoadError> {
        let bundle = parse_properties(text).map_err(|err| LoadError::Malformed {
            resource: format!("{}_{}", ty, suffix),
            message: err.to_string(),
        })?;
        self.resources
            .insert((ty.to_string(), suffix.to_string()), bundle);
        Ok(())
    }
}

impl PropertyLoader for InMemoryLoader {
    fn load(&self, ty: &TypeNode, suffix: &str) -> Result<Option<PropertyBundle>, LoadError> {
        Ok(self
            .resources
            .get(&(ty.qualified_name(), suffix.to_string()))
            .cloned())
    }
}

type LoadResult = Result<Option<PropertyBundle>, LoadError>;

/// Remembers every load of the wrapped loader, so each (type, suffix) pair is read once.
pub struct CachingLoader<L> {
    inner: L,
    cache: DashMap<(String, String), LoadResult>,
}

impl<L: PropertyLoader> CachingLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

impl<L: PropertyLoader> PropertyLoader for CachingLoader<L> {
    fn load(&self, ty: &TypeNode, suffix: &str) -> Result<Option<PropertyBundle>, LoadError> {
        let key = (ty.qualified_name(), suffix.to_string());
        if let Some(hit) = self.cache.get(&key) {
            return hit.value().clone();
        }
        let loaded = self.inner.load(ty, suffix);
        self.cache.insert(key, loaded.clone());
        loaded
    }
}
