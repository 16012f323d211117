//! lcgen CLI library
//!
//! Reads interface manifests and `.properties` trees, runs the constants
//! pipeline and writes the generated Rust modules.

pub mod cli;
pub mod commands;
pub mod diagnostics;
pub mod fs_loader;
pub mod manifest;

pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("Manifest error: {0}")]
        Manifest(String),

        #[error("Manifest error: {path}: {message}")]
        ManifestSyntax {
            path: String,
            src: String,
            span: Option<std::ops::Range<usize>>,
            message: String,
        },

        #[error("Generation failed: {0}")]
        Generation(String),

        #[error("Invalid input: {0}")]
        InvalidInput(String),

        #[error(transparent)]
        Core(#[from] lc_core::Error),

        #[error(transparent)]
        Lookup(#[from] lc_core::lookup::LookupError),
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};
