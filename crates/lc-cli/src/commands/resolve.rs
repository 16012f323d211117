//! `lcgen resolve`: prints what would be generated, as JSON

use super::common::Session;
use crate::cli::CliConfig;
use crate::diagnostics::emit_collected;
use crate::{CliError, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Interface manifest (TOML)
    pub manifest: PathBuf,

    /// Only this interface (qualified or simple name)
    #[arg(short, long)]
    pub interface: Option<String>,

    /// Directories searched for .properties files, in order
    #[arg(short = 'p', long = "properties")]
    pub properties: Vec<PathBuf>,
}

pub fn resolve_command(args: ResolveArgs, config: &CliConfig) -> Result<serde_json::Value> {
    let session = Session::open(&args.manifest, &args.properties, config)?;
    let outputs = match &args.interface {
        Some(name) => vec![session.process_one(name)?],
        None => {
            let (outputs, failed) = session.processor().collect(&session.context());
            if failed > 0 {
                emit_collected(&session.sink, &config.diagnostics);
                return Err(CliError::Generation(format!("{} interface(s) failed to resolve", failed)));
            }
            outputs
        }
    };
    emit_collected(&session.sink, &config.diagnostics);
    serde_json::to_value(&outputs).map_err(|err| CliError::Generation(err.to_string()))
}
