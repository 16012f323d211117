//! Typed values of constants.

use crate::bundle::ResolvedBundle;
use crate::hierarchy::EffectiveMethod;
use crate::model::{DefaultValue, ReturnCategory};
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("property '{key}' holds '{raw}', which is not a valid {category}")]
    Malformed {
        key: String,
        category: ReturnCategory,
        raw: String,
    },
}

/// String sequence built once on first access and cached under `cache_key`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeferredArray {
    pub cache_key: String,
    pub values: Vec<String>,
}

/// Ordered map built once on first access and cached under `cache_key`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeferredMap {
    pub cache_key: String,
    pub entries: Vec<(String, String)>,
    /// Member keys named by the map that have no value in the bundle.
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MaterializedValue {
    Boolean(bool),
    Int(i32),
    Double(f64),
    Float(f32),
    String(String),
    StringArray(DeferredArray),
    StringMap(DeferredMap),
}

impl MaterializedValue {
    pub fn category(&self) -> ReturnCategory {
        match self {
            MaterializedValue::Boolean(_) => ReturnCategory::Boolean,
            MaterializedValue::Int(_) => ReturnCategory::Int,
            MaterializedValue::Double(_) => ReturnCategory::Double,
            MaterializedValue::Float(_) => ReturnCategory::Float,
            MaterializedValue::String(_) => ReturnCategory::String,
            MaterializedValue::StringArray(_) => ReturnCategory::StringArray,
            MaterializedValue::StringMap(_) => ReturnCategory::StringMap,
        }
    }

    pub fn is_deferred(&self) -> bool {
        self.cache_key().is_some()
    }

    pub fn cache_key(&self) -> Option<&str> {
        match self {
            MaterializedValue::StringArray(array) => Some(&array.cache_key),
            MaterializedValue::StringMap(map) => Some(&map.cache_key),
            _ => None,
        }
    }

    fn from_default(default: &DefaultValue, key: &str) -> Self {
        match default {
            DefaultValue::Boolean(value) => MaterializedValue::Boolean(*value),
            DefaultValue::Int(value) => MaterializedValue::Int(*value),
            DefaultValue::Double(value) => MaterializedValue::Double(*value),
            DefaultValue::Float(value) => MaterializedValue::Float(*value),
            DefaultValue::String(value) => MaterializedValue::String(value.clone()),
            DefaultValue::StringArray(values) => MaterializedValue::StringArray(DeferredArray {
                cache_key: key.to_string(),
                values: values.clone(),
            }),
        }
    }
}

/// Splits a list value on commas not preceded by a backslash.
///
/// Each piece is trimmed and `\,` becomes a literal comma. An empty value is an empty list.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut previous = None;
    for c in raw.chars() {
        if c == ',' && previous != Some('\\') {
            pieces.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
        previous = Some(c);
    }
    pieces.push(current);
    pieces
        .into_iter()
        .map(|piece| piece.trim().replace("\\,", ","))
        .collect()
}

fn parse_int(text: &str) -> Option<i32> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    // At most one sign; the radix parsers would accept a second one.
    if !digits.starts_with(|c: char| c.is_ascii_hexdigit()) {
        return None;
    }
    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    let value = if negative { magnitude.checked_neg()? } else { magnitude };
    i32::try_from(value).ok()
}

fn strip_suffix_any<'s>(text: &'s str, suffixes: &[char]) -> &'s str {
    text.strip_suffix(suffixes).unwrap_or(text)
}

fn parse_double(text: &str) -> Option<f64> {
    strip_suffix_any(text, &['d', 'D']).parse().ok()
}

fn parse_float(text: &str) -> Option<f32> {
    strip_suffix_any(text, &['f', 'F']).parse().ok()
}

fn parse_boolean(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValueMaterializer;

impl ValueMaterializer {
    pub fn new() -> Self {
        Self
    }

    /// Typed value of `method` in `bundle`, or `None` when neither the bundle nor a default supplies one.
    pub fn materialize(
        &self,
        method: &EffectiveMethod<'_>,
        bundle: &ResolvedBundle,
    ) -> Result<Option<MaterializedValue>, ValueError> {
        let key = method.key();
        let category = method.category();
        let Some(raw) = bundle.get(key) else {
            return Ok(method
                .default_for(category)
                .map(|default| MaterializedValue::from_default(default, key)));
        };

        let malformed = || ValueError::Malformed {
            key: key.to_string(),
            category,
            raw: raw.to_string(),
        };
        let value = match category {
            ReturnCategory::Boolean => {
                MaterializedValue::Boolean(parse_boolean(raw.trim()).ok_or_else(malformed)?)
            }
            ReturnCategory::Int => MaterializedValue::Int(parse_int(raw.trim()).ok_or_else(malformed)?),
            ReturnCategory::Double => {
                MaterializedValue::Double(parse_double(raw.trim()).ok_or_else(malformed)?)
            }
            ReturnCategory::Float => {
                MaterializedValue::Float(parse_float(raw.trim()).ok_or_else(malformed)?)
            }
            ReturnCategory::String => MaterializedValue::String(raw.to_string()),
            ReturnCategory::StringArray => MaterializedValue::StringArray(DeferredArray {
                cache_key: key.to_string(),
                values: split_list(raw),
            }),
            ReturnCategory::StringMap => {
                let mut entries = Vec::new();
                let mut missing = Vec::new();
                for member in split_list(raw).into_iter().unique() {
                    match bundle.get(&member) {
                        Some(value) => entries.push((member, value.to_string())),
                        None => missing.push(member),
                    }
                }
                MaterializedValue::StringMap(DeferredMap {
                    cache_key: key.to_string(),
                    entries,
                    missing,
                })
            }
        };
        Ok(Some(value))
    }
}
