use crate::bundle::ResolvedBundle;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::hierarchy::EffectiveMethods;
use crate::locale::{locale_suffix, LOCALE_ENV};
use crate::materialize::{MaterializedValue, ValueError, ValueMaterializer};
use crate::model::{MethodId, ReturnCategory, TypeArena, TypeId};
use serde::Serialize;
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedMember {
    pub id: MethodId,
    pub key: String,
    /// `None` when neither the bundle nor a default supplied a value.
    pub value: Option<MaterializedValue>,
}

/// One per-locale implementation of a constants interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedArtifact {
    /// Qualified name of the implemented interface.
    pub interface: String,
    pub type_name: String,
    pub locale: String,
    pub members: Vec<GeneratedMember>,
    pub needs_cache: bool,
}

impl GeneratedArtifact {
    pub fn member(&self, name: &str, category: ReturnCategory) -> Option<&GeneratedMember> {
        self.members
            .iter()
            .find(|member| member.id.category == category && member.id.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactoryEntry {
    pub locale: String,
    pub type_name: String,
}

/// Locale to implementation mapping of one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactoryDescriptor {
    pub interface: String,
    pub type_name: String,
    /// Sorted by locale name, descending.
    pub entries: Vec<FactoryEntry>,
}

impl FactoryDescriptor {
    /// Exact match on the locale name; there is no fallback.
    pub fn select(&self, locale: &str) -> Option<&FactoryEntry> {
        self.entries.iter().find(|entry| entry.locale == locale)
    }

    /// Selects by the `LOCALE` environment variable.
    pub fn select_from_env(&self) -> Option<&FactoryEntry> {
        let locale = std::env::var(LOCALE_ENV).ok()?;
        self.select(&locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.locale.as_str())
    }
}

pub struct ArtifactBuilder<'a> {
    arena: &'a TypeArena,
    sink: &'a dyn DiagnosticSink,
    materializer: ValueMaterializer,
}

impl<'a> ArtifactBuilder<'a> {
    pub fn new(arena: &'a TypeArena, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            arena,
            sink,
            materializer: ValueMaterializer::new(),
        }
    }

    /// `[Enclosing_]Name_<suffix>`; the default locale yields a trailing underscore.
    pub fn artifact_type_name(&self, root: TypeId, locale: &str) -> String {
        format!("{}_{}", self.arena[root].artifact_prefix(), locale_suffix(locale))
    }

    pub fn factory_type_name(&self, root: TypeId) -> String {
        format!("{}_Factory", self.arena[root].artifact_prefix())
    }

    pub fn build(
        &self,
        root: TypeId,
        methods: &EffectiveMethods<'_>,
        bundle: &ResolvedBundle,
    ) -> Result<GeneratedArtifact, ValueError> {
        let node = &self.arena[root];
        let context = node.qualified_name();
        let mut members = Vec::with_capacity(methods.len());

        for method in methods {
            let value = self.materializer.materialize(method, bundle)?;
            match &value {
                None => {
                    self.sink.report(
                        Diagnostic::warning(format!(
                            "no value for constant '{}' in locale '{}', the accessor returns the type default",
                            method.id(),
                            bundle.locale
                        ))
                        .with_source_context(context.clone())
                        .with_suggestion(format!("add '{}' to the property resource", method.key())),
                    );
                }
                Some(MaterializedValue::StringMap(map)) if !map.missing.is_empty() => {
                    self.sink.report(
                        Diagnostic::warning(format!(
                            "map '{}' in locale '{}' names keys without values: {}",
                            method.name(),
                            bundle.locale,
                            map.missing.join(", ")
                        ))
                        .with_source_context(context.clone()),
                    );
                }
                _ => {}
            }
            members.push(GeneratedMember {
                id: method.id(),
                key: method.key().to_string(),
                value,
            });
        }

        let needs_cache = members
            .iter()
            .any(|member| member.value.as_ref().is_some_and(MaterializedValue::is_deferred));
        debug!(
            "built {} for locale {} with {} members",
            self.artifact_type_name(root, &bundle.locale),
            bundle.locale,
            members.len()
        );

        Ok(GeneratedArtifact {
            interface: context,
            type_name: self.artifact_type_name(root, &bundle.locale),
            locale: bundle.locale.clone(),
            members,
            needs_cache,
        })
    }

    pub fn build_factory(&self, root: TypeId, artifacts: &[GeneratedArtifact]) -> FactoryDescriptor {
        let mut entries: Vec<FactoryEntry> = artifacts
            .iter()
            .map(|artifact| FactoryEntry {
                locale: artifact.locale.clone(),
                type_name: artifact.type_name.clone(),
            })
            .collect();
        entries.sort_by_key(|entry| Reverse(entry.locale.clone()));
        entries.dedup_by(|a, b| a.locale == b.locale);

        FactoryDescriptor {
            interface: self.arena[root].qualified_name(),
            type_name: self.factory_type_name(root),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::PropertyBundle;
    use crate::diagnostics::{DiagnosticLevel, DiagnosticManager};
    use crate::hierarchy::HierarchyResolver;
    use crate::model::{MethodDecl, TypeDecl};
    use pretty_assertions::assert_eq;

    fn arena() -> TypeArena {
        let mut inner = TypeDecl::new("Labels")
            .in_package("demo")
            .method(MethodDecl::new("title", ReturnCategory::String))
            .method(MethodDecl::new("sizes", ReturnCategory::StringArray))
            .method(MethodDecl::new("count", ReturnCategory::Int));
        inner.enclosing = Some("Page".to_string());
        TypeArena::from_decls([inner])
    }

    #[test]
    fn names_follow_enclosing_and_locale() {
        let arena = arena();
        let sink = DiagnosticManager::new();
        let builder = ArtifactBuilder::new(&arena, &sink);
        let root = arena.find("demo.Page.Labels").unwrap();
        assert_eq!(builder.artifact_type_name(root, "default"), "Page_Labels_");
        assert_eq!(builder.artifact_type_name(root, "en_US"), "Page_Labels_en_US");
        assert_eq!(builder.factory_type_name(root), "Page_Labels_Factory");
    }

    #[test]
    fn absent_members_are_kept_and_reported() {
        let arena = arena();
        let sink = DiagnosticManager::new();
        let root = arena.find("Labels").unwrap();
        let methods = HierarchyResolver::new(&arena).resolve(root).unwrap();
        let bundle = ResolvedBundle::new(
            "en",
            PropertyBundle::from_iter([("title", "Hello"), ("sizes", "S, M")]),
        );

        let artifact = ArtifactBuilder::new(&arena, &sink).build(root, &methods, &bundle).unwrap();
        assert!(artifact.needs_cache);
        assert_eq!(artifact.members.len(), 3);
        assert_eq!(artifact.member("count", ReturnCategory::Int).unwrap().value, None);
        assert_eq!(sink.count(DiagnosticLevel::Warning), 1);
    }

    #[test]
    fn factory_entries_are_sorted_descending() {
        let arena = arena();
        let sink = DiagnosticManager::new();
        let builder = ArtifactBuilder::new(&arena, &sink);
        let root = arena.find("Labels").unwrap();
        let artifacts: Vec<_> = ["default", "en", "fr", "en_US"]
            .into_iter()
            .map(|locale| GeneratedArtifact {
                interface: "demo.Page.Labels".to_string(),
                type_name: builder.artifact_type_name(root, locale),
                locale: locale.to_string(),
                members: Vec::new(),
                needs_cache: false,
            })
            .collect();

        let factory = builder.build_factory(root, &artifacts);
        assert_eq!(factory.locales().collect::<Vec<_>>(), vec!["fr", "en_US", "en", "default"]);
        assert_eq!(factory.select("en").unwrap().type_name, "Page_Labels_en");
        assert!(factory.select("de").is_none());
    }
}
