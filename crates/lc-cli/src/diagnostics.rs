//! Diagnostic and error reporting utilities

use crate::cli::{DiagnosticsConfig, DiagnosticsFormat};
use crate::CliError;
use lc_core::diagnostics::DiagnosticDisplayOptions;
use lc_core::DiagnosticManager;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Set up enhanced error reporting with miette
pub fn setup_error_reporting() -> crate::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .map_err(|e| CliError::Config(format!("Failed to setup error reporting: {}", e)))?;

    Ok(())
}

/// CLI failures rendered through miette
#[derive(Error, Debug, Diagnostic)]
pub enum LcgenError {
    #[error("invalid interface manifest")]
    #[diagnostic(
        code(lcgen::manifest),
        help("interfaces are [[interface]] tables with [[interface.method]] entries")
    )]
    Manifest {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(code(lcgen::config), help("check lcgen.toml or the file passed with --config"))]
    Config { message: String },

    #[error("{message}")]
    #[diagnostic(code(lcgen::generate), help("the diagnostics above name each failing interface"))]
    Generation { message: String },
}

/// Converts the CLI errors that have a richer miette form.
pub fn to_diagnostic(error: &CliError) -> Option<LcgenError> {
    match error {
        CliError::ManifestSyntax {
            path,
            src,
            span,
            message,
        } => Some(LcgenError::Manifest {
            src: NamedSource::new(path, src.clone()),
            span: span.clone().map(SourceSpan::from),
            message: message.clone(),
        }),
        CliError::Config(message) => Some(LcgenError::Config {
            message: message.clone(),
        }),
        CliError::Generation(message) => Some(LcgenError::Generation {
            message: message.clone(),
        }),
        _ => None,
    }
}

/// Prints `error` as a miette report; returns false when it has no miette form.
pub fn render_cli_error(error: &CliError) -> bool {
    match to_diagnostic(error) {
        Some(diagnostic) => {
            eprintln!("{:?}", miette::Report::new(diagnostic));
            true
        }
        None => false,
    }
}

pub fn display_options(config: &DiagnosticsConfig) -> DiagnosticDisplayOptions {
    match config.format {
        DiagnosticsFormat::Pretty => DiagnosticDisplayOptions::pretty(config.verbose),
        DiagnosticsFormat::Plain => DiagnosticDisplayOptions::plain(config.verbose),
    }
}

/// Prints everything collected by `manager` to stderr.
pub fn emit_collected(manager: &DiagnosticManager, config: &DiagnosticsConfig) {
    DiagnosticManager::emit(&manager.get_diagnostics(), None, &display_options(config));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_syntax_error_keeps_span() {
        let error = CliError::ManifestSyntax {
            path: "lcgen-interfaces.toml".into(),
            src: "[[interface]]\nname = 3\n".into(),
            span: Some(21..22),
            message: "invalid type: integer `3`, expected a string".into(),
        };

        match to_diagnostic(&error) {
            Some(LcgenError::Manifest { span, message, .. }) => {
                assert_eq!(span, Some(SourceSpan::from(21..22)));
                assert!(message.contains("expected a string"));
            }
            other => panic!("Expected manifest diagnostic, got {other:?}"),
        }
    }

    #[test]
    fn io_errors_have_no_miette_form() {
        let error = CliError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(to_diagnostic(&error).is_none());
    }
}
