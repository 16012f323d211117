#[macro_use]
pub mod macros;

pub mod artifact;
pub mod bundle;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod hierarchy;
pub mod locale;
pub mod lookup;
pub mod materialize;
pub mod model;
pub mod pipeline;
pub mod runtime;

// Re-export commonly used items for convenience
pub use tracing;

pub use artifact::{ArtifactBuilder, FactoryDescriptor, GeneratedArtifact, GeneratedMember};
pub use bundle::{BundleMerger, PropertyBundle, PropertyLoader, ResolvedBundle};
pub use config::{LookupCachePolicy, ProcessorOptions};
pub use diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticManager, DiagnosticSink};
pub use hierarchy::{EffectiveMethod, EffectiveMethods, HierarchyResolver};
pub use locale::{LocaleData, StaticLocaleData, DEFAULT_LOCALE};
pub use lookup::{LookupTable, LookupTableBuilder, LookupTables};
pub use materialize::{MaterializedValue, ValueMaterializer};
pub use model::{DefaultValue, ElementDescriptor, MethodId, ReturnCategory, TypeArena, TypeId};
pub use pipeline::{InterfaceOutput, ProcessContext, Processor, SourceEmitter};
pub use runtime::{ConstantsFactory, ConstantsInstance, Value};

// Alias for error types
pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;
