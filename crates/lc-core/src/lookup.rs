//! Name-based dispatch tables for interfaces with lookup capability.

use crate::hierarchy::EffectiveMethods;
use crate::model::{MethodId, ReturnCategory};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Cannot find constant '{name}'; expecting a method name (interface {interface})")]
    NotFound {
        name: String,
        interface: String,
        category: ReturnCategory,
    },
    #[error("interface {interface} was generated without lookup tables")]
    Unsupported { interface: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupEntry {
    /// Declared method name, the dispatch key.
    pub name: String,
    pub accessor: MethodId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupTable {
    pub category: ReturnCategory,
    pub entries: Vec<LookupEntry>,
}

impl LookupTable {
    pub fn new(category: ReturnCategory) -> Self {
        Self {
            category,
            entries: Vec::new(),
        }
    }

    /// Adds `accessor` under its name unless the name is already present.
    pub fn insert(&mut self, accessor: MethodId) -> bool {
        if self.find(&accessor.name).is_some() {
            return false;
        }
        self.entries.push(LookupEntry {
            name: accessor.name.clone(),
            accessor,
        });
        true
    }

    /// Linear scan in declaration order.
    pub fn find(&self, name: &str) -> Option<&LookupEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Non-empty tables of one interface, in [`ReturnCategory::LOOKUP_ORDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupTables {
    pub interface: String,
    pub tables: Vec<LookupTable>,
}

impl LookupTables {
    pub fn table(&self, category: ReturnCategory) -> Option<&LookupTable> {
        self.tables.iter().find(|table| table.category == category)
    }

    pub fn resolve(&self, category: ReturnCategory, name: &str) -> Result<&LookupEntry, LookupError> {
        self.table(category)
            .and_then(|table| table.find(name))
            .ok_or_else(|| LookupError::NotFound {
                name: name.to_string(),
                interface: self.interface.clone(),
                category,
            })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LookupTableBuilder;

impl LookupTableBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, interface: &str, methods: &EffectiveMethods<'_>) -> LookupTables {
        let tables = ReturnCategory::LOOKUP_ORDER
            .iter()
            .map(|category| {
                let mut table = LookupTable::new(*category);
                for method in methods.iter().filter(|method| method.category() == *category) {
                    table.insert(method.id());
                }
                table
            })
            .filter(|table| !table.is_empty())
            .collect();
        LookupTables {
            interface: interface.to_string(),
            tables,
        }
    }
}
