use crate::artifact::{ArtifactBuilder, FactoryDescriptor, GeneratedArtifact};
use crate::bundle::{BundleMerger, PropertyLoader};
use crate::config::ProcessorOptions;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::hierarchy::HierarchyResolver;
use crate::locale::LocaleData;
use crate::lookup::{LookupTableBuilder, LookupTables};
use crate::model::{MethodId, TypeArena, TypeId};
use crate::Result;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render {target}: {message}")]
    Render { target: String, message: String },
}

/// Everything generated for one top-level interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceOutput {
    /// Qualified interface name.
    pub interface: String,
    pub name: String,
    pub package: Option<String>,
    /// `[Enclosing_]Name`
    pub type_prefix: String,
    /// Effective methods in declaration order.
    pub methods: Vec<MethodId>,
    pub artifacts: Vec<GeneratedArtifact>,
    pub factory: FactoryDescriptor,
    pub lookup: Option<LookupTables>,
}

impl InterfaceOutput {
    pub fn needs_cache(&self) -> bool {
        self.artifacts.iter().any(|artifact| artifact.needs_cache)
    }
}

/// Writes generated interfaces in some target language.
pub trait SourceEmitter: Send + Sync {
    fn emit_artifact(
        &self,
        output: &InterfaceOutput,
        artifact: &GeneratedArtifact,
    ) -> std::result::Result<(), EmitError>;
    /// Writes the interface-level items: trait, lookup tables and factory.
    fn emit_factory(&self, output: &InterfaceOutput) -> std::result::Result<(), EmitError>;
}

/// Collaborators shared by every interface of a batch.
pub struct ProcessContext<'a> {
    pub arena: &'a TypeArena,
    pub loader: &'a dyn PropertyLoader,
    pub locale_data: &'a dyn LocaleData,
    pub sink: &'a dyn DiagnosticSink,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
    pub emitted: usize,
    pub emit_failures: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Processor {
    options: ProcessorOptions,
}

impl Processor {
    pub fn new(options: ProcessorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// Runs one top-level interface from hierarchy resolution to lookup tables.
    pub fn process_interface(&self, ctx: &ProcessContext<'_>, root: TypeId) -> Result<InterfaceOutput> {
        let node = &ctx.arena[root];
        let interface = node.qualified_name();
        let resolver = HierarchyResolver::new(ctx.arena);

        let methods = resolver.resolve(root)?;
        for name in methods.ambiguous_names() {
            ctx.sink.report(
                Diagnostic::warning(format!("ambiguous constant overload '{}'", name))
                    .with_source_context(interface.clone())
                    .with_code("lcgen::overload")
                    .with_suggestion("lookup tables dispatch each return type separately"),
            );
        }

        let locales = resolver.locales(root);
        debug!("locales of {}: {:?}", interface, locales);
        let bundles = BundleMerger::new(ctx.arena, ctx.loader, ctx.locale_data, ctx.sink)
            .with_region_expansion(self.options.expand_regions)
            .merge_all(root, &locales);

        let builder = ArtifactBuilder::new(ctx.arena, ctx.sink);
        let artifacts = bundles
            .iter()
            .map(|bundle| builder.build(root, &methods, bundle))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let factory = builder.build_factory(root, &artifacts);
        let lookup = node
            .lookup
            .then(|| LookupTableBuilder::new().build(&interface, &methods));

        info!(
            "processed {}: {} constants, {} locales{}",
            interface,
            methods.len(),
            artifacts.len(),
            if lookup.is_some() { ", with lookup" } else { "" }
        );

        Ok(InterfaceOutput {
            interface,
            name: node.name.clone(),
            package: node.package.clone(),
            type_prefix: node.artifact_prefix(),
            methods: methods.iter().map(|method| method.id()).collect(),
            artifacts,
            factory,
            lookup,
        })
    }

    /// Processes every localizable interface; a failing interface is reported and skipped.
    pub fn collect(&self, ctx: &ProcessContext<'_>) -> (Vec<InterfaceOutput>, usize) {
        let mut outputs = Vec::new();
        let mut failed = 0;
        for root in ctx.arena.localizable() {
            match self.process_interface(ctx, root) {
                Ok(output) => outputs.push(output),
                Err(err) => {
                    failed += 1;
                    ctx.sink.report(
                        Diagnostic::error(err.chain_message())
                            .with_source_context(ctx.arena[root].qualified_name())
                            .with_code("lcgen::interface"),
                    );
                }
            }
        }
        (outputs, failed)
    }

    pub fn process(&self, ctx: &ProcessContext<'_>, emitter: &dyn SourceEmitter) -> BatchReport {
        let (outputs, failed) = self.collect(ctx);
        let mut report = BatchReport {
            processed: outputs.len(),
            failed,
            ..Default::default()
        };

        for output in &outputs {
            let results = output
                .artifacts
                .iter()
                .map(|artifact| emitter.emit_artifact(output, artifact))
                .chain(std::iter::once_with(|| emitter.emit_factory(output)));
            for result in results {
                match result {
                    Ok(()) => report.emitted += 1,
                    Err(err) => {
                        report.emit_failures += 1;
                        ctx.sink.report(
                            Diagnostic::error(crate::Error::from(err).chain_message())
                                .with_source_context(output.interface.clone())
                                .with_code("lcgen::emit"),
                        );
                    }
                }
            }
        }

        info!(
            "batch finished: {} processed, {} failed, {} outputs written, {} write failures",
            report.processed,
            report.failed,
            report.emitted,
            report.emit_failures
        );
        report
    }
}
