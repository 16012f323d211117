//! Declarations of constant interfaces as seen by the generator.
//!
//! A declaration is a [`TypeNode`] in a [`TypeArena`]; each node owns the
//! [`ElementDescriptor`]s of the constant methods it declares directly.

mod arena;

pub use arena::{MethodDecl, TypeArena, TypeDecl, TypeId, TypeNode, TypeRef};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Return type of a constant method.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ReturnCategory {
    #[display("boolean")]
    Boolean,
    #[display("int")]
    Int,
    #[display("double")]
    Double,
    #[display("float")]
    Float,
    #[display("string")]
    String,
    #[display("string_array")]
    StringArray,
    #[display("string_map")]
    StringMap,
}

impl ReturnCategory {
    /// Order in which per-category lookup tables are laid out.
    pub const LOOKUP_ORDER: [ReturnCategory; 7] = [
        ReturnCategory::StringMap,
        ReturnCategory::StringArray,
        ReturnCategory::Boolean,
        ReturnCategory::Int,
        ReturnCategory::Double,
        ReturnCategory::Float,
        ReturnCategory::String,
    ];

    /// Arrays and maps are built on first access and cached.
    pub fn is_composite(&self) -> bool {
        matches!(self, ReturnCategory::StringArray | ReturnCategory::StringMap)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported constant return type '{0}'")]
pub struct UnsupportedReturnType(pub String);

impl FromStr for ReturnCategory {
    type Err = UnsupportedReturnType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let category = match normalized.as_str() {
            "boolean" | "Boolean" | "bool" => ReturnCategory::Boolean,
            "int" | "Integer" | "i32" => ReturnCategory::Int,
            "double" | "Double" | "f64" => ReturnCategory::Double,
            "float" | "Float" | "f32" => ReturnCategory::Float,
            "string" | "String" | "str" => ReturnCategory::String,
            "string_array" | "String[]" | "Vec<String>" => ReturnCategory::StringArray,
            "string_map" | "map" | "Map" | "Map<String,String>" => ReturnCategory::StringMap,
            _ => return Err(UnsupportedReturnType(s.to_string())),
        };
        Ok(category)
    }
}

/// Typed default value attached to a constant declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    Boolean(bool),
    Int(i32),
    Double(f64),
    Float(f32),
    String(String),
    StringArray(Vec<String>),
}

impl DefaultValue {
    pub fn category(&self) -> ReturnCategory {
        match self {
            DefaultValue::Boolean(_) => ReturnCategory::Boolean,
            DefaultValue::Int(_) => ReturnCategory::Int,
            DefaultValue::Double(_) => ReturnCategory::Double,
            DefaultValue::Float(_) => ReturnCategory::Float,
            DefaultValue::String(_) => ReturnCategory::String,
            DefaultValue::StringArray(_) => ReturnCategory::StringArray,
        }
    }
}

/// Identity of a constant across a hierarchy.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[display("{name}(): {category}")]
pub struct MethodId {
    pub name: String,
    pub category: ReturnCategory,
}

impl MethodId {
    pub fn new(name: impl Into<String>, category: ReturnCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// One declared constant method.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDescriptor {
    pub name: String,
    pub category: ReturnCategory,
    /// Explicit property key; the method name is used otherwise.
    pub key: Option<String>,
    pub default: Option<DefaultValue>,
    pub declared_in: TypeId,
    /// Number of declared parameters. Only zero-argument methods are constants.
    pub params: usize,
}

impl ElementDescriptor {
    pub fn id(&self) -> MethodId {
        MethodId::new(self.name.clone(), self.category)
    }

    pub fn is_constant(&self) -> bool {
        self.params == 0
    }

    pub fn matches(&self, name: &str, category: ReturnCategory) -> bool {
        self.category == category && self.name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_type_spellings() {
        assert_eq!("Map<String, String>".parse(), Ok(ReturnCategory::StringMap));
        assert_eq!("String[]".parse(), Ok(ReturnCategory::StringArray));
        assert_eq!("float".parse(), Ok(ReturnCategory::Float));
        assert_eq!(
            "Object".parse::<ReturnCategory>(),
            Err(UnsupportedReturnType("Object".to_string()))
        );
    }

    #[test]
    fn method_id_display() {
        let id = MethodId::new("mapABCD", ReturnCategory::StringMap);
        assert_eq!(id.to_string(), "mapABCD(): string_map");
    }
}
