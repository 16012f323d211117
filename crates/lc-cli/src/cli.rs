//! CLI configuration and settings management

use crate::{CliError, Result};
use lc_core::{LookupCachePolicy, ProcessorOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = "lcgen.toml";
pub const HOME_CONFIG_FILE: &str = ".lcgen.toml";

/// CLI configuration loaded from config files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub generate: GenerateConfig,

    /// Extra region codes per locale, added to the built-in table
    pub regions: HashMap<String, Vec<String>>,

    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Output directory for generated modules
    pub out_dir: PathBuf,

    /// Roots searched for `.properties` resources, in order
    pub property_roots: Vec<PathBuf>,

    pub lookup_cache: LookupCachePolicy,

    pub expand_regions: bool,

    /// Pipe generated code through rustfmt when it is installed
    pub rustfmt: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("generated"),
            property_roots: Vec::new(),
            lookup_cache: LookupCachePolicy::All,
            expand_regions: true,
            rustfmt: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsFormat {
    Pretty,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub format: DiagnosticsFormat,

    /// Also print info-level diagnostics
    pub verbose: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            format: DiagnosticsFormat::Pretty,
            verbose: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from file, falling back to defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let mut config = Self::default();

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(HOME_CONFIG_FILE);
            if home_config.exists() {
                config = config.merge(Self::load_from_file(&home_config)?);
            }
        }

        let local_config = Path::new(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            config = config.merge(Self::load_from_file(local_config)?);
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// Region tables are combined; a locale listed in both takes `other`'s codes.
    pub fn merge(mut self, other: Self) -> Self {
        let mut regions = std::mem::take(&mut self.regions);
        regions.extend(other.regions);
        Self {
            generate: other.generate,
            regions,
            diagnostics: other.diagnostics,
        }
    }

    pub fn processor_options(&self) -> ProcessorOptions {
        ProcessorOptions {
            lookup_cache: self.generate.lookup_cache,
            expand_regions: self.generate.expand_regions,
        }
        .with_env_overrides()
    }
}
