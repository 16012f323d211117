//! `lcgen generate`: manifest and property files in, Rust modules out

use super::common::Session;
use crate::cli::CliConfig;
use crate::diagnostics::emit_collected;
use crate::{CliError, Result};
use clap::Args;
use lc_core::pipeline::BatchReport;
use lc_core::LookupCachePolicy;
use lc_rust::{ConstantsPrinter, RustSourceEmitter};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Interface manifest (TOML)
    pub manifest: PathBuf,

    /// Directories searched for .properties files, in order
    #[arg(short = 'p', long = "properties")]
    pub properties: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Which lookup categories cache their answers: all, string-only or none
    #[arg(long)]
    pub lookup_cache: Option<LookupCachePolicy>,

    /// Do not derive <locale>_<REGION> bundles
    #[arg(long)]
    pub no_regions: bool,

    /// Skip rustfmt even when it is installed
    #[arg(long)]
    pub no_rustfmt: bool,
}

pub fn generate_command(args: GenerateArgs, config: &CliConfig) -> Result<BatchReport> {
    let mut session = Session::open(&args.manifest, &args.properties, config)?;
    if let Some(policy) = args.lookup_cache {
        session.options.lookup_cache = policy;
    }
    if args.no_regions {
        session.options.expand_regions = false;
    }

    let out_dir = args.out.unwrap_or_else(|| config.generate.out_dir.clone());
    let mut printer = ConstantsPrinter::new().with_lookup_cache(session.options.lookup_cache);
    printer.set_rustfmt(config.generate.rustfmt && !args.no_rustfmt);
    let emitter = RustSourceEmitter::new(&out_dir, printer);

    info!("generating into {}", out_dir.display());
    let report = session.processor().process(&session.context(), &emitter);
    emit_collected(&session.sink, &config.diagnostics);

    if report.failed > 0 || report.emit_failures > 0 {
        return Err(CliError::Generation(format!(
            "{} interface(s) failed and {} output(s) could not be written",
            report.failed, report.emit_failures
        )));
    }
    Ok(report)
}
