//! In-process evaluation of generated artifacts.
//!
//! A [`ConstantsInstance`] answers constant calls the way a generated
//! implementation does: scalars straight from the artifact, arrays and maps
//! built on first access and cached on the instance, lookup methods dispatched
//! through the interface's [`LookupTables`]. The caches are `RefCell`s, so an
//! instance is not `Sync`; share the artifacts, not the instances.

use crate::artifact::{FactoryDescriptor, GeneratedArtifact};
use crate::config::LookupCachePolicy;
use crate::locale::LOCALE_ENV;
use crate::lookup::{LookupError, LookupTables};
use crate::materialize::MaterializedValue;
use crate::model::ReturnCategory;
use crate::pipeline::InterfaceOutput;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Int(i32),
    Double(f64),
    Float(f32),
    String(String),
    StringArray(Rc<[String]>),
    StringMap(Rc<[(String, String)]>),
}

impl Value {
    /// Value of a member that has neither a property nor a default.
    pub fn default_for(category: ReturnCategory) -> Value {
        match category {
            ReturnCategory::Boolean => Value::Boolean(false),
            ReturnCategory::Int => Value::Int(0),
            ReturnCategory::Double => Value::Double(0.0),
            ReturnCategory::Float => Value::Float(0.0),
            ReturnCategory::String => Value::String(String::new()),
            ReturnCategory::StringArray => Value::StringArray(Rc::from(Vec::new())),
            ReturnCategory::StringMap => Value::StringMap(Rc::from(Vec::new())),
        }
    }

    pub fn category(&self) -> ReturnCategory {
        match self {
            Value::Boolean(_) => ReturnCategory::Boolean,
            Value::Int(_) => ReturnCategory::Int,
            Value::Double(_) => ReturnCategory::Double,
            Value::Float(_) => ReturnCategory::Float,
            Value::String(_) => ReturnCategory::String,
            Value::StringArray(_) => ReturnCategory::StringArray,
            Value::StringMap(_) => ReturnCategory::StringMap,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Value::StringArray(values) => Some(&**values),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, String)]> {
        match self {
            Value::StringMap(entries) => Some(&**entries),
            _ => None,
        }
    }
}

pub struct ConstantsInstance {
    artifact: Arc<GeneratedArtifact>,
    lookup: Option<Arc<LookupTables>>,
    policy: LookupCachePolicy,
    composites: RefCell<HashMap<String, Value>>,
    lookups: RefCell<HashMap<(ReturnCategory, String), Value>>,
}

impl ConstantsInstance {
    pub fn new(artifact: Arc<GeneratedArtifact>) -> Self {
        Self {
            artifact,
            lookup: None,
            policy: LookupCachePolicy::default(),
            composites: RefCell::new(HashMap::new()),
            lookups: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_lookup(mut self, tables: Arc<LookupTables>, policy: LookupCachePolicy) -> Self {
        self.lookup = Some(tables);
        self.policy = policy;
        self
    }

    pub fn locale(&self) -> &str {
        &self.artifact.locale
    }

    pub fn type_name(&self) -> &str {
        &self.artifact.type_name
    }

    /// Calls the constant method `name` returning `category`; `None` if the interface has no such method.
    pub fn call(&self, name: &str, category: ReturnCategory) -> Option<Value> {
        let member = self.artifact.member(name, category)?;
        let value = match &member.value {
            None => Value::default_for(category),
            Some(MaterializedValue::Boolean(value)) => Value::Boolean(*value),
            Some(MaterializedValue::Int(value)) => Value::Int(*value),
            Some(MaterializedValue::Double(value)) => Value::Double(*value),
            Some(MaterializedValue::Float(value)) => Value::Float(*value),
            Some(MaterializedValue::String(value)) => Value::String(value.clone()),
            Some(composite) => self.composite(composite),
        };
        Some(value)
    }

    fn composite(&self, value: &MaterializedValue) -> Value {
        let cache_key = format!("{}:{}", value.category(), value.cache_key().unwrap_or_default());
        if let Some(hit) = self.composites.borrow().get(&cache_key) {
            return hit.clone();
        }
        let built = match value {
            MaterializedValue::StringArray(array) => Value::StringArray(Rc::from(array.values.clone())),
            MaterializedValue::StringMap(map) => Value::StringMap(Rc::from(map.entries.clone())),
            _ => Value::default_for(value.category()),
        };
        self.composites.borrow_mut().insert(cache_key, built.clone());
        built
    }

    /// By-name dispatch for interfaces generated with lookup capability.
    pub fn lookup(&self, category: ReturnCategory, name: &str) -> Result<Value, LookupError> {
        let tables = self.lookup.as_ref().ok_or_else(|| LookupError::Unsupported {
            interface: self.artifact.interface.clone(),
        })?;
        let caches = self.policy.caches(category);
        let cache_key = (category, name.to_string());
        if caches {
            if let Some(hit) = self.lookups.borrow().get(&cache_key) {
                return Ok(hit.clone());
            }
        }

        let entry = tables.resolve(category, name)?;
        let value = self
            .call(&entry.accessor.name, entry.accessor.category)
            .ok_or_else(|| LookupError::NotFound {
                name: name.to_string(),
                interface: self.artifact.interface.clone(),
                category,
            })?;
        if caches {
            self.lookups.borrow_mut().insert(cache_key, value.clone());
        }
        Ok(value)
    }

    pub fn get_map(&self, name: &str) -> Result<Rc<[(String, String)]>, LookupError> {
        match self.lookup(ReturnCategory::StringMap, name)? {
            Value::StringMap(entries) => Ok(entries),
            _ => Ok(Rc::from(Vec::new())),
        }
    }

    pub fn get_string_array(&self, name: &str) -> Result<Rc<[String]>, LookupError> {
        match self.lookup(ReturnCategory::StringArray, name)? {
            Value::StringArray(values) => Ok(values),
            _ => Ok(Rc::from(Vec::new())),
        }
    }

    pub fn get_boolean(&self, name: &str) -> Result<bool, LookupError> {
        Ok(matches!(self.lookup(ReturnCategory::Boolean, name)?, Value::Boolean(true)))
    }

    pub fn get_int(&self, name: &str) -> Result<i32, LookupError> {
        match self.lookup(ReturnCategory::Int, name)? {
            Value::Int(value) => Ok(value),
            _ => Ok(0),
        }
    }

    pub fn get_double(&self, name: &str) -> Result<f64, LookupError> {
        match self.lookup(ReturnCategory::Double, name)? {
            Value::Double(value) => Ok(value),
            _ => Ok(0.0),
        }
    }

    pub fn get_float(&self, name: &str) -> Result<f32, LookupError> {
        match self.lookup(ReturnCategory::Float, name)? {
            Value::Float(value) => Ok(value),
            _ => Ok(0.0),
        }
    }

    pub fn get_string(&self, name: &str) -> Result<String, LookupError> {
        match self.lookup(ReturnCategory::String, name)? {
            Value::String(value) => Ok(value),
            _ => Ok(String::new()),
        }
    }
}

/// Creates instances of one interface by locale name.
pub struct ConstantsFactory {
    descriptor: FactoryDescriptor,
    artifacts: HashMap<String, Arc<GeneratedArtifact>>,
    lookup: Option<Arc<LookupTables>>,
    policy: LookupCachePolicy,
}

impl ConstantsFactory {
    pub fn new(output: &InterfaceOutput, policy: LookupCachePolicy) -> Self {
        let artifacts = output
            .artifacts
            .iter()
            .map(|artifact| (artifact.type_name.clone(), Arc::new(artifact.clone())))
            .collect();
        Self {
            descriptor: output.factory.clone(),
            artifacts,
            lookup: output.lookup.clone().map(Arc::new),
            policy,
        }
    }

    /// Exact locale match; `None` for locales the interface was not generated for.
    pub fn create(&self, locale: &str) -> Option<ConstantsInstance> {
        let entry = self.descriptor.select(locale)?;
        let artifact = self.artifacts.get(&entry.type_name)?.clone();
        let instance = ConstantsInstance::new(artifact);
        Some(match &self.lookup {
            Some(tables) => instance.with_lookup(tables.clone(), self.policy),
            None => instance,
        })
    }

    /// Uses the `LOCALE` environment variable as the locale name.
    pub fn create_from_env(&self) -> Option<ConstantsInstance> {
        let locale = std::env::var(LOCALE_ENV).ok()?;
        self.create(&locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.descriptor.locales()
    }
}
