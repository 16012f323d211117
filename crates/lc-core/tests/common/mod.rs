#![allow(dead_code)]

use lc_core::bundle::InMemoryLoader;
use lc_core::model::{MethodDecl, TypeDecl};
use lc_core::{ReturnCategory, TypeArena};

pub const PACKAGE: &str = "org.demo.i18n";

const SCALARS: &[(&str, ReturnCategory)] = &[
    ("booleanFalse", ReturnCategory::Boolean),
    ("booleanTrue", ReturnCategory::Boolean),
    ("doubleNegMax", ReturnCategory::Double),
    ("doubleNegMin", ReturnCategory::Double),
    ("doubleNegOne", ReturnCategory::Double),
    ("doubleOne", ReturnCategory::Double),
    ("doublePi", ReturnCategory::Double),
    ("doublePosMax", ReturnCategory::Double),
    ("doublePosMin", ReturnCategory::Double),
    ("doubleZero", ReturnCategory::Double),
    ("floatNegMax", ReturnCategory::Float),
    ("floatNegMin", ReturnCategory::Float),
    ("floatNegOne", ReturnCategory::Float),
    ("floatOne", ReturnCategory::Float),
    ("floatPi", ReturnCategory::Float),
    ("floatPosMax", ReturnCategory::Float),
    ("floatPosMin", ReturnCategory::Float),
    ("floatZero", ReturnCategory::Float),
    ("intMax", ReturnCategory::Int),
    ("intMin", ReturnCategory::Int),
    ("intNegOne", ReturnCategory::Int),
    ("intOne", ReturnCategory::Int),
    ("intZero", ReturnCategory::Int),
    ("mapABCD", ReturnCategory::StringMap),
    ("mapBACD", ReturnCategory::StringMap),
    ("mapBBB", ReturnCategory::StringMap),
    ("mapDCBA", ReturnCategory::StringMap),
    ("mapEmpty", ReturnCategory::StringMap),
    ("mapXYZ", ReturnCategory::StringMap),
    ("stringArrayABCDEFG", ReturnCategory::StringArray),
    ("stringArraySizeOneEmptyString", ReturnCategory::StringArray),
    ("stringArraySizeOneWithBackslashX", ReturnCategory::StringArray),
    ("stringArraySizeOneX", ReturnCategory::StringArray),
    ("stringArraySizeThreeAllEmpty", ReturnCategory::StringArray),
    ("stringArraySizeThreeWithDoubleBackslash", ReturnCategory::StringArray),
    ("stringArraySizeTwoBothEmpty", ReturnCategory::StringArray),
    ("stringArraySizeTwoWithEscapedComma", ReturnCategory::StringArray),
    ("stringDoesNotTrimTrailingThreeSpaces", ReturnCategory::String),
    ("stringEmpty", ReturnCategory::String),
    ("stringJapaneseBlue", ReturnCategory::String),
    ("stringJapaneseGreen", ReturnCategory::String),
    ("stringJapaneseRed", ReturnCategory::String),
    ("stringTrimsLeadingWhitespace", ReturnCategory::String),
];

pub fn test_constants_decl() -> TypeDecl {
    let mut decl = TypeDecl::new("TestConstants")
        .in_package(PACKAGE)
        .locales(["default", "en"])
        .localizable()
        .method(MethodDecl::new("getString", ReturnCategory::String).with_key("string"));
    for (name, category) in SCALARS {
        decl = decl.method(MethodDecl::new(*name, *category));
    }
    decl
}

/// `TestConstants` plus a lookup-enabled subinterface that declares nothing itself.
pub fn test_arena() -> TypeArena {
    TypeArena::from_decls([
        test_constants_decl(),
        TypeDecl::new("TestConstantsWithLookup")
            .in_package(PACKAGE)
            .extends("TestConstants")
            .localizable()
            .with_lookup(),
    ])
}

pub fn test_loader() -> InMemoryLoader {
    let mut loader = InMemoryLoader::new();
    let qualified = format!("{}.TestConstants", PACKAGE);
    loader
        .insert_text(&qualified, "", include_str!("../fixtures/TestConstants.properties"))
        .expect("default fixture parses");
    loader
        .insert_text(&qualified, "en", include_str!("../fixtures/TestConstants_en.properties"))
        .expect("en fixture parses");
    loader
}
