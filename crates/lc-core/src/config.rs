use crate::model::ReturnCategory;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn env_true(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|val| {
        let trimmed = val.trim();
        !trimmed.is_empty() && !matches!(trimmed, "0" | "false" | "FALSE" | "False")
    })
}

/// Which lookup categories remember the answer of a by-name dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupCachePolicy {
    /// Every category caches.
    #[default]
    All,
    /// Only the string category caches; the other categories call through every time.
    StringOnly,
    #[serde(rename = "none")]
    Disabled,
}

impl LookupCachePolicy {
    pub fn caches(&self, category: ReturnCategory) -> bool {
        match self {
            LookupCachePolicy::All => true,
            LookupCachePolicy::StringOnly => category == ReturnCategory::String,
            LookupCachePolicy::Disabled => false,
        }
    }
}

impl FromStr for LookupCachePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(LookupCachePolicy::All),
            "string-only" | "string_only" => Ok(LookupCachePolicy::StringOnly),
            "none" | "disabled" => Ok(LookupCachePolicy::Disabled),
            other => Err(format!(
                "unknown lookup cache policy '{}', expected all, string-only or none",
                other
            )),
        }
    }
}

/// Options shared by every interface processed in one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorOptions {
    pub lookup_cache: LookupCachePolicy,
    /// Derive `<locale>_<REGION>` bundles from the locale data table.
    pub expand_regions: bool,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            lookup_cache: LookupCachePolicy::All,
            expand_regions: true,
        }
    }
}

impl ProcessorOptions {
    /// Applies `LCGEN_LOOKUP_CACHE` and `LCGEN_NO_REGIONS` on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(policy) = std::env::var("LCGEN_LOOKUP_CACHE") {
            match policy.parse() {
                Ok(policy) => self.lookup_cache = policy,
                Err(message) => warn!("ignoring LCGEN_LOOKUP_CACHE: {}", message),
            }
        }
        if env_true("LCGEN_NO_REGIONS").unwrap_or(false) {
            self.expand_regions = false;
        }
        self
    }
}
