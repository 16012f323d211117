use crate::printer::{artifact_module_name, snake_case, ConstantsPrinter};
use lc_core::artifact::GeneratedArtifact;
use lc_core::pipeline::EmitError;
use lc_core::{debug, InterfaceOutput, SourceEmitter};
use proc_macro2::TokenStream;
use std::path::{Path, PathBuf};

/// Writes each interface as a module directory below `out_dir`.
///
/// The directory follows the package (`org.demo.i18n` becomes `org/demo/i18n`)
/// and the snake-cased type prefix; it holds `mod.rs` plus one file per locale.
#[derive(Debug, Clone)]
pub struct RustSourceEmitter {
    out_dir: PathBuf,
    printer: ConstantsPrinter,
}

impl RustSourceEmitter {
    pub fn new(out_dir: impl Into<PathBuf>, printer: ConstantsPrinter) -> Self {
        Self {
            out_dir: out_dir.into(),
            printer,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn interface_dir(&self, output: &InterfaceOutput) -> PathBuf {
        let mut dir = self.out_dir.clone();
        if let Some(package) = &output.package {
            dir.extend(package.split('.').filter(|segment| !segment.is_empty()));
        }
        dir.join(snake_case(&output.type_prefix))
    }

    pub fn artifact_path(&self, output: &InterfaceOutput, artifact: &GeneratedArtifact) -> PathBuf {
        self.interface_dir(output)
            .join(format!("{}.rs", artifact_module_name(&output.type_prefix, &artifact.locale)))
    }

    pub fn module_path(&self, output: &InterfaceOutput) -> PathBuf {
        self.interface_dir(output).join("mod.rs")
    }

    fn render(&self, target: &str, tokens: lc_core::Result<TokenStream>) -> Result<String, EmitError> {
        let render_error = |message: String| EmitError::Render {
            target: target.to_string(),
            message,
        };
        let tokens = tokens.map_err(|err| render_error(err.to_string()))?;
        syn::parse_file(&tokens.to_string()).map_err(|err| render_error(err.to_string()))?;
        self.printer
            .maybe_rustfmt_token_stream(&tokens)
            .map_err(|err| render_error(err.to_string()))
    }

    fn write(&self, path: &Path, code: &str) -> Result<(), EmitError> {
        let io_error = |source: std::io::Error| EmitError::Io {
            target: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(path, code).map_err(io_error)?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}

impl SourceEmitter for RustSourceEmitter {
    fn emit_artifact(&self, output: &InterfaceOutput, artifact: &GeneratedArtifact) -> Result<(), EmitError> {
        let code = self.render(
            &artifact.type_name,
            self.printer.print_artifact_module(output, artifact),
        )?;
        self.write(&self.artifact_path(output, artifact), &code)
    }

    fn emit_factory(&self, output: &InterfaceOutput) -> Result<(), EmitError> {
        let code = self.render(&output.interface, self.printer.print_interface_module(output))?;
        self.write(&self.module_path(output), &code)
    }
}
