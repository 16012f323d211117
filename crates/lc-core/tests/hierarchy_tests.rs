use lc_core::hierarchy::ResolveError;
use lc_core::model::{MethodDecl, TypeDecl};
use lc_core::{DefaultValue, HierarchyResolver, MethodId, ReturnCategory, TypeArena};
use pretty_assertions::assert_eq;

/// Top extends Left and Right, both extend Base; Base declares `shared` once.
fn diamond() -> TypeArena {
    TypeArena::from_decls([
        TypeDecl::new("Top")
            .extends("Left")
            .extends("Right")
            .method(MethodDecl::new("top", ReturnCategory::String)),
        TypeDecl::new("Left")
            .extends("Base")
            .method(MethodDecl::new("left", ReturnCategory::Int))
            .method(MethodDecl::new("both", ReturnCategory::String).with_key("from.left")),
        TypeDecl::new("Right")
            .extends("Base")
            .method(MethodDecl::new("both", ReturnCategory::String).with_key("from.right"))
            .method(MethodDecl::new("right", ReturnCategory::Boolean)),
        TypeDecl::new("Base").method(
            MethodDecl::new("shared", ReturnCategory::StringArray)
                .with_default(DefaultValue::StringArray(vec!["a".to_string()])),
        ),
    ])
}

fn ids(methods: &lc_core::EffectiveMethods<'_>) -> Vec<MethodId> {
    methods.iter().map(|method| method.id()).collect()
}

#[test]
fn diamond_yields_each_constant_once_in_traversal_order() {
    let arena = diamond();
    let methods = HierarchyResolver::new(&arena)
        .resolve(arena.find("Top").unwrap())
        .unwrap();
    assert_eq!(
        ids(&methods),
        vec![
            MethodId::new("top", ReturnCategory::String),
            MethodId::new("left", ReturnCategory::Int),
            MethodId::new("both", ReturnCategory::String),
            MethodId::new("shared", ReturnCategory::StringArray),
            MethodId::new("right", ReturnCategory::Boolean),
        ]
    );
    let both = methods.get("both", ReturnCategory::String).unwrap();
    assert_eq!(both.key(), "from.left");
    assert_eq!(both.shadowed.len(), 1);
}

#[test]
fn memoized_traversal_matches_unmemoized() {
    let arena = diamond();
    let root = arena.find("Top").unwrap();
    let memoized = HierarchyResolver::new(&arena).resolve(root).unwrap();
    let plain = HierarchyResolver::new(&arena)
        .without_memoization()
        .resolve(root)
        .unwrap();
    assert_eq!(ids(&memoized), ids(&plain));
    // without memoization Base is reached twice, which only lengthens the fallback chain
    let shared = plain.get("shared", ReturnCategory::StringArray).unwrap();
    assert_eq!(shared.shadowed.len(), 1);
    assert_eq!(
        memoized.get("shared", ReturnCategory::StringArray).unwrap().shadowed.len(),
        0
    );
}

#[test]
fn override_falls_back_to_supertype_default() {
    let arena = TypeArena::from_decls([
        TypeDecl::new("Child")
            .extends("Parent")
            .method(MethodDecl::new("retries", ReturnCategory::Int)),
        TypeDecl::new("Parent").method(
            MethodDecl::new("retries", ReturnCategory::Int)
                .with_key("net.retries")
                .with_default(DefaultValue::Int(3)),
        ),
    ]);
    let methods = HierarchyResolver::new(&arena)
        .resolve(arena.find("Child").unwrap())
        .unwrap();
    let retries = methods.get("retries", ReturnCategory::Int).unwrap();
    assert_eq!(retries.default_for(ReturnCategory::Int), Some(&DefaultValue::Int(3)));
    assert_eq!(retries.default_for(ReturnCategory::String), None);
    assert_eq!(retries.key(), "net.retries");
}

#[test]
fn unknown_supertype_and_introspection_defects_are_errors() {
    let arena = TypeArena::from_decls([
        TypeDecl::new("Orphan").extends("Nowhere"),
        TypeDecl {
            defects: vec!["method 'colors' returns unsupported type 'List<String>'".to_string()],
            ..TypeDecl::new("Broken")
        },
    ]);
    let resolver = HierarchyResolver::new(&arena);
    assert_eq!(
        resolver.resolve(arena.find("Orphan").unwrap()).unwrap_err(),
        ResolveError::UnknownSupertype {
            ty: "Orphan".to_string(),
            supertype: "Nowhere".to_string(),
        }
    );
    assert!(matches!(
        resolver.resolve(arena.find("Broken").unwrap()),
        Err(ResolveError::Malformed { .. })
    ));
}
