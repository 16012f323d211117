use super::{resource_name, PropertyBundle, PropertyLoader, ResolvedBundle};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::locale::{locale_suffix, region_locale, LocaleData, DEFAULT_LOCALE};
use crate::model::{TypeArena, TypeId, TypeNode, TypeRef};
use std::collections::HashSet;

/// Merges the property resources of an interface hierarchy into one table per locale.
pub struct BundleMerger<'a> {
    arena: &'a TypeArena,
    loader: &'a dyn PropertyLoader,
    locale_data: &'a dyn LocaleData,
    sink: &'a dyn DiagnosticSink,
    expand_regions: bool,
}

impl<'a> BundleMerger<'a> {
    pub fn new(
        arena: &'a TypeArena,
        loader: &'a dyn PropertyLoader,
        locale_data: &'a dyn LocaleData,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            arena,
            loader,
            locale_data,
            sink,
            expand_regions: true,
        }
    }

    pub fn with_region_expansion(mut self, enabled: bool) -> Self {
        self.expand_regions = enabled;
        self
    }

    /// Own resource of `root` first, then every ancestor depth-first; the first write of a key wins.
    pub fn merge(&self, root: TypeId, locale: &str) -> ResolvedBundle {
        let (values, _) = self.merge_suffix(root, locale_suffix(locale));
        ResolvedBundle::new(locale, values)
    }

    /// One bundle per declared locale, followed by its retained region bundles.
    pub fn merge_all(&self, root: TypeId, locales: &[String]) -> Vec<ResolvedBundle> {
        let mut bundles: Vec<ResolvedBundle> = Vec::new();
        let mut seen: HashSet<String> = locales.iter().cloned().collect();

        for locale in locales {
            if bundles.iter().any(|bundle| &bundle.locale == locale) {
                continue;
            }
            bundles.push(self.merge(root, locale));

            if !self.expand_regions || locale == DEFAULT_LOCALE {
                continue;
            }
            for region in self.locale_data.region_codes(locale) {
                let regional = region_locale(locale, &region);
                if !seen.insert(regional.clone()) {
                    continue;
                }
                let (values, own_non_empty) = self.merge_suffix(root, &regional);
                if own_non_empty {
                    debug!("keeping region bundle {} for {}", regional, self.arena[root].name);
                    bundles.push(ResolvedBundle::new(regional, values));
                }
            }
        }
        bundles
    }

    /// Returns the merged values and whether the root's own resource contributed anything.
    fn merge_suffix(&self, root: TypeId, suffix: &str) -> (PropertyBundle, bool) {
        let mut merged = PropertyBundle::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root];
        let mut own_non_empty = false;

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            let own = self.load_own(node, suffix);
            if id == root {
                own_non_empty = !own.is_empty();
            }
            merged.merge_missing(&own);

            // reversed so the first declared supertype is merged first
            for supertype in node.supertypes.iter().rev() {
                if let TypeRef::Resolved(super_id) = supertype {
                    stack.push(*super_id);
                }
            }
        }
        (merged, own_non_empty)
    }

    fn load_own(&self, node: &TypeNode, suffix: &str) -> PropertyBundle {
        match self.loader.load(node, suffix) {
            Ok(Some(bundle)) => bundle,
            Ok(None) => {
                self.sink.report(
                    Diagnostic::info(format!("no property resource {}", resource_name(node, suffix)))
                        .with_source_context(node.qualified_name()),
                );
                PropertyBundle::new()
            }
            Err(err) => {
                self.sink.report(
                    Diagnostic::warning(err.to_string())
                        .with_source_context(node.qualified_name())
                        .with_code("lcgen::resource"),
                );
                PropertyBundle::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::InMemoryLoader;
    use crate::diagnostics::{DiagnosticLevel, DiagnosticManager};
    use crate::locale::StaticLocaleData;
    use crate::model::TypeDecl;

    #[test]
    fn stack_order_matches_recursive_preorder() {
        // Leaf -> (Left -> Shared), (Right); Shared must win over Right for "k".
        let arena = TypeArena::from_decls([
            TypeDecl::new("Leaf").extends("Left").extends("Right"),
            TypeDecl::new("Left").extends("Shared"),
            TypeDecl::new("Right"),
            TypeDecl::new("Shared"),
        ]);
        let mut loader = InMemoryLoader::new();
        loader.insert("Shared", "", [("k", "shared")]);
        loader.insert("Right", "", [("k", "right"), ("r", "right")]);
        let sink = DiagnosticManager::new();
        let data = StaticLocaleData::empty();
        let merger = BundleMerger::new(&arena, &loader, &data, &sink);

        let bundle = merger.merge(arena.find("Leaf").unwrap(), DEFAULT_LOCALE);
        assert_eq!(bundle.get("k"), Some("shared"));
        assert_eq!(bundle.get("r"), Some("right"));
        assert_eq!(sink.count(DiagnosticLevel::Info), 2);
    }
}
