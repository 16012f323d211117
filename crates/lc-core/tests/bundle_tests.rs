use lc_core::bundle::{CachingLoader, InMemoryLoader, LoadError, PropertyBundle};
use lc_core::model::{TypeDecl, TypeNode};
use lc_core::{
    BundleMerger, DiagnosticLevel, DiagnosticManager, PropertyLoader, StaticLocaleData, TypeArena,
};
use pretty_assertions::assert_eq;

fn hierarchy() -> TypeArena {
    TypeArena::from_decls([
        TypeDecl::new("Child").in_package("demo").extends("Parent"),
        TypeDecl::new("Parent").in_package("demo").extends("Grand"),
        TypeDecl::new("Grand").in_package("demo"),
    ])
}

fn bundles() -> InMemoryLoader {
    let mut loader = InMemoryLoader::new();
    loader.insert("demo.Child", "en", [("title", "child")]);
    loader.insert("demo.Parent", "en", [("title", "parent"), ("subtitle", "parent")]);
    loader.insert("demo.Grand", "en", [("subtitle", "grand"), ("footer", "grand")]);
    loader.insert("demo.Child", "en_GB", [("title", "child gb")]);
    loader.insert("demo.Parent", "en_GB", [("colour", "colour")]);
    loader.insert("demo.Parent", "en_US", [("color", "color")]);
    loader
}

#[test]
fn first_write_wins_up_the_hierarchy() {
    let arena = hierarchy();
    let loader = bundles();
    let data = StaticLocaleData::empty();
    let sink = DiagnosticManager::new();
    let bundle = BundleMerger::new(&arena, &loader, &data, &sink).merge(arena.find("Child").unwrap(), "en");

    assert_eq!(bundle.locale, "en");
    assert_eq!(bundle.get("title"), Some("child"));
    assert_eq!(bundle.get("subtitle"), Some("parent"));
    assert_eq!(bundle.get("footer"), Some("grand"));
    assert_eq!(bundle.values.len(), 3);
}

#[test]
fn region_bundles_are_siblings_kept_only_with_own_resource() {
    let arena = hierarchy();
    let loader = bundles();
    let data = StaticLocaleData::empty().with_regions("en", ["GB", "US"]);
    let sink = DiagnosticManager::new();
    let merger = BundleMerger::new(&arena, &loader, &data, &sink);

    let merged = merger.merge_all(arena.find("Child").unwrap(), &["default".to_string(), "en".to_string()]);
    let locales: Vec<_> = merged.iter().map(|bundle| bundle.locale.as_str()).collect();
    // en_US has only a Parent resource, so it is dropped
    assert_eq!(locales, vec!["default", "en", "en_GB"]);

    let en = &merged[1];
    assert_eq!(en.get("colour"), None);
    let gb = &merged[2];
    assert_eq!(gb.get("title"), Some("child gb"));
    assert_eq!(gb.get("colour"), Some("colour"));
    // region bundles do not inherit from the base locale
    assert_eq!(gb.get("footer"), None);
}

#[test]
fn declared_region_locales_are_not_duplicated() {
    let arena = hierarchy();
    let loader = bundles();
    let data = StaticLocaleData::empty().with_regions("en", ["GB"]);
    let sink = DiagnosticManager::new();
    let merger = BundleMerger::new(&arena, &loader, &data, &sink);

    let merged = merger.merge_all(
        arena.find("Child").unwrap(),
        &["en".to_string(), "en_GB".to_string()],
    );
    let locales: Vec<_> = merged.iter().map(|bundle| bundle.locale.as_str()).collect();
    assert_eq!(locales, vec!["en", "en_GB"]);

    let merged = merger
        .with_region_expansion(false)
        .merge_all(arena.find("Child").unwrap(), &["en".to_string()]);
    assert_eq!(merged.len(), 1);
}

struct FailingLoader;

impl PropertyLoader for FailingLoader {
    fn load(&self, ty: &TypeNode, suffix: &str) -> Result<Option<PropertyBundle>, LoadError> {
        if ty.name == "Parent" {
            return Err(LoadError::Unreadable {
                resource: lc_core::bundle::resource_name(ty, suffix),
                message: "permission denied".to_string(),
            });
        }
        Ok(Some(PropertyBundle::from_iter([("from", ty.name.as_str())])))
    }
}

#[test]
fn unreadable_resource_contributes_nothing_and_is_reported_once() {
    let arena = hierarchy();
    let loader = CachingLoader::new(FailingLoader);
    let data = StaticLocaleData::empty();
    let sink = DiagnosticManager::new();
    let merger = BundleMerger::new(&arena, &loader, &data, &sink);

    let bundle = merger.merge(arena.find("Child").unwrap(), "fr");
    assert_eq!(bundle.get("from"), Some("Child"));
    assert_eq!(sink.count(DiagnosticLevel::Warning), 1);
    let warning = &sink.get_diagnostics()[0];
    assert_eq!(warning.source_context.as_deref(), Some("demo.Parent"));
    assert!(warning.message.contains("demo/Parent_fr.properties"));
}
