//! Shared setup for commands that run the pipeline

use crate::cli::CliConfig;
use crate::fs_loader::FsPropertyLoader;
use crate::manifest::Manifest;
use crate::{CliError, Result};
use lc_core::bundle::CachingLoader;
use lc_core::pipeline::ProcessContext;
use lc_core::{DiagnosticManager, InterfaceOutput, Processor, ProcessorOptions, StaticLocaleData, TypeArena};
use std::path::{Path, PathBuf};

/// Everything one command invocation needs to process interfaces.
pub struct Session {
    pub arena: TypeArena,
    pub loader: CachingLoader<FsPropertyLoader>,
    pub locale_data: StaticLocaleData,
    pub sink: DiagnosticManager,
    pub options: ProcessorOptions,
}

impl Session {
    /// Property roots come from the command line, then the config, then the manifest's directory.
    pub fn open(manifest_path: &Path, property_roots: &[PathBuf], config: &CliConfig) -> Result<Self> {
        let manifest = Manifest::load(manifest_path)?;
        let roots = if !property_roots.is_empty() {
            property_roots.to_vec()
        } else if !config.generate.property_roots.is_empty() {
            config.generate.property_roots.clone()
        } else {
            vec![manifest_path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))]
        };
        tracing::debug!("property roots: {:?}", roots);

        let mut locale_data = StaticLocaleData::builtin();
        locale_data.extend(config.regions.clone());

        Ok(Self {
            arena: manifest.to_arena(),
            loader: CachingLoader::new(FsPropertyLoader::new(roots)),
            locale_data,
            sink: DiagnosticManager::new(),
            options: config.processor_options(),
        })
    }

    pub fn context(&self) -> ProcessContext<'_> {
        ProcessContext {
            arena: &self.arena,
            loader: &self.loader,
            locale_data: &self.locale_data,
            sink: &self.sink,
        }
    }

    pub fn processor(&self) -> Processor {
        Processor::new(self.options.clone())
    }

    /// Processes the interface named `name` (qualified, or simple when unambiguous).
    pub fn process_one(&self, name: &str) -> Result<InterfaceOutput> {
        let id = self
            .arena
            .find(name)
            .ok_or_else(|| CliError::InvalidInput(format!("no interface named '{}' in the manifest", name)))?;
        Ok(self.processor().process_interface(&self.context(), id)?)
    }
}
