//! TOML interface manifests.
//!
//! ```toml
//! [[interface]]
//! name = "Labels"
//! package = "org.demo"
//! locales = ["default", "fr"]
//! lookup = true
//!
//! [[interface.method]]
//! name = "title"
//! type = "String"
//! default = "Untitled"
//! ```

use crate::{CliError, Result};
use lc_core::model::{MethodDecl, TypeDecl};
use lc_core::{DefaultValue, ReturnCategory, TypeArena};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "interface")]
    pub interfaces: Vec<InterfaceEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceEntry {
    pub name: String,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub enclosing: Option<String>,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub locales: Option<Vec<String>>,
    #[serde(default)]
    pub lookup: bool,
    /// Supertypes that only contribute methods are declared with `localizable = false`.
    #[serde(default = "default_true")]
    pub localizable: bool,
    #[serde(default, rename = "method")]
    pub methods: Vec<MethodEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub return_type: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub default: Option<toml::Value>,
    #[serde(default)]
    pub params: usize,
}

fn default_true() -> bool {
    true
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| CliError::Manifest(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            CliError::Manifest(format!("failed to read {}: {}", path.display(), err))
        })?;
        toml::from_str(&text).map_err(|err| CliError::ManifestSyntax {
            path: path.display().to_string(),
            message: err.message().to_string(),
            span: err.span(),
            src: text.clone(),
        })
    }

    /// Builds the interface graph. Entries the generator cannot use become node defects,
    /// which fail only the interfaces that contain them.
    pub fn to_arena(&self) -> TypeArena {
        TypeArena::from_decls(self.interfaces.iter().map(InterfaceEntry::to_decl))
    }
}

impl InterfaceEntry {
    fn to_decl(&self) -> TypeDecl {
        let mut decl = TypeDecl::new(&self.name);
        decl.package = self.package.clone();
        decl.enclosing = self.enclosing.clone();
        decl.extends = self.extends.clone();
        decl.locales = self.locales.clone();
        decl.localizable = self.localizable;
        decl.lookup = self.lookup;

        for method in &self.methods {
            match method.to_decl() {
                Ok(method) => decl = decl.method(method),
                Err(defect) => decl.defects.push(defect),
            }
        }
        decl
    }
}

impl MethodEntry {
    fn to_decl(&self) -> std::result::Result<MethodDecl, String> {
        let category: ReturnCategory = self
            .return_type
            .parse()
            .map_err(|err| format!("method '{}': {}", self.name, err))?;
        let mut decl = MethodDecl::new(&self.name, category).with_params(self.params);
        if let Some(key) = &self.key {
            decl = decl.with_key(key);
        }
        if let Some(default) = &self.default {
            let default = default_value(category, default)
                .ok_or_else(|| format!("method '{}': default {} is not a {}", self.name, default, category))?;
            decl = decl.with_default(default);
        }
        Ok(decl)
    }
}

fn default_value(category: ReturnCategory, value: &toml::Value) -> Option<DefaultValue> {
    use toml::Value;

    let default = match (category, value) {
        (ReturnCategory::Boolean, Value::Boolean(value)) => DefaultValue::Boolean(*value),
        (ReturnCategory::Int, Value::Integer(value)) => DefaultValue::Int(i32::try_from(*value).ok()?),
        (ReturnCategory::Double, Value::Float(value)) => DefaultValue::Double(*value),
        (ReturnCategory::Double, Value::Integer(value)) => DefaultValue::Double(*value as f64),
        (ReturnCategory::Float, Value::Float(value)) => DefaultValue::Float(*value as f32),
        (ReturnCategory::Float, Value::Integer(value)) => DefaultValue::Float(*value as f32),
        (ReturnCategory::String, Value::String(value)) => DefaultValue::String(value.clone()),
        (ReturnCategory::StringArray, Value::Array(items)) => DefaultValue::StringArray(
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()?,
        ),
        _ => return None,
    };
    Some(default)
}
