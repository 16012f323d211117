use lc_cli::cli::CliConfig;
use lc_cli::commands::generate::GenerateArgs;
use lc_cli::commands::lookup::LookupArgs;
use lc_cli::commands::resolve::ResolveArgs;
use lc_cli::commands::{generate_command, lookup_command, resolve_command};
use lc_cli::CliError;
use lc_core::LookupCachePolicy;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[interface]]
name = "Common"
package = "org.demo"
localizable = false

[[interface.method]]
name = "title"
type = "String"
default = "Untitled"

[[interface]]
name = "Labels"
package = "org.demo"
extends = ["Common"]
locales = ["default", "fr", "en"]
lookup = true

[[interface.method]]
name = "count"
type = "int"

[[interface.method]]
name = "colors"
type = "String[]"

[[interface.method]]
name = "sizes"
type = "map"
"#;

struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("i18n.toml"), MANIFEST)?;
        let resources = dir.path().join("resources/org/demo");
        std::fs::create_dir_all(&resources)?;
        std::fs::write(
            resources.join("Labels.properties"),
            "count = 0x10\ncolors = red, gre\\\\, en\nsizes = small, large\nsmall = S\nlarge = L\n",
        )?;
        std::fs::write(resources.join("Labels_fr.properties"), "title = Titre\ncount = 2\n")?;
        std::fs::write(resources.join("Common_en.properties"), "title = Title\n")?;
        Ok(Self { dir })
    }

    fn manifest(&self) -> PathBuf {
        self.dir.path().join("i18n.toml")
    }

    fn resources(&self) -> PathBuf {
        self.dir.path().join("resources")
    }

    fn out(&self) -> PathBuf {
        self.dir.path().join("out")
    }
}

fn config() -> CliConfig {
    let mut config = CliConfig::default();
    config.generate.rustfmt = false;
    config
}

fn lookup(project: &Project, locale: &str, category: &str, name: &str) -> Result<serde_json::Value, CliError> {
    lookup_command(
        LookupArgs {
            manifest: project.manifest(),
            interface: "Labels".to_string(),
            locale: locale.to_string(),
            category: category.to_string(),
            name: name.to_string(),
            properties: vec![project.resources()],
        },
        &config(),
    )
}

fn generate(project: &Project, lookup_cache: Option<LookupCachePolicy>) -> Result<(), CliError> {
    generate_command(
        GenerateArgs {
            manifest: project.manifest(),
            properties: vec![project.resources()],
            out: Some(project.out()),
            lookup_cache,
            no_regions: false,
            no_rustfmt: true,
        },
        &config(),
    )
    .map(|_| ())
}

/// The emitter validates code before writing it; here we only check the file landed.
fn assert_written(path: &Path) {
    let code = std::fs::read_to_string(path).unwrap_or_else(|err| panic!("{}: {err}", path.display()));
    assert!(code.contains("#![allow("), "{code}");
}

#[test]
fn generate_writes_modules_for_localizable_interfaces() -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::new()?;
    generate(&project, None)?;

    let labels = project.out().join("org/demo/labels");
    for file in ["mod.rs", "labels_default.rs", "labels_fr.rs", "labels_en.rs"] {
        assert_written(&labels.join(file));
    }
    assert!(!project.out().join("org/demo/common").exists());

    let en = std::fs::read_to_string(labels.join("labels_en.rs"))?;
    assert!(en.contains("\"Title\""), "{en}");
    Ok(())
}

#[test]
fn lookup_evaluates_merged_values() -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::new()?;

    assert_eq!(lookup(&project, "default", "int", "count")?, json!(16));
    assert_eq!(lookup(&project, "fr", "int", "count")?, json!(2));
    assert_eq!(lookup(&project, "fr", "string", "title")?, json!("Titre"));
    assert_eq!(lookup(&project, "default", "string", "title")?, json!("Untitled"));
    assert_eq!(lookup(&project, "en", "string", "title")?, json!("Title"));
    assert_eq!(
        lookup(&project, "default", "string_array", "colors")?,
        json!(["red", "gre, en"])
    );
    assert_eq!(
        lookup(&project, "default", "string_map", "sizes")?,
        json!({"small": "S", "large": "L"})
    );
    Ok(())
}

#[test]
fn lookup_keeps_map_member_order() -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::new()?;
    let sizes = lookup(&project, "default", "string_map", "sizes")?;
    let keys: Vec<_> = sizes.as_object().ok_or("map should be an object")?.keys().cloned().collect();
    assert_eq!(keys, vec!["small", "large"]);
    assert_eq!(serde_json::to_string(&sizes)?, r#"{"small":"S","large":"L"}"#);
    Ok(())
}

#[test]
fn lookup_miss_names_the_interface() -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::new()?;
    let err = lookup(&project, "default", "string", "subtitle").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot find constant 'subtitle'; expecting a method name (interface org.demo.Labels)"
    );

    let err = lookup(&project, "de", "string", "title").unwrap_err();
    assert!(matches!(err, CliError::InvalidInput(_)), "{err}");
    Ok(())
}

#[test]
fn resolve_reports_effective_methods_and_factory() -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::new()?;
    let resolved = resolve_command(
        ResolveArgs {
            manifest: project.manifest(),
            interface: Some("org.demo.Labels".to_string()),
            properties: vec![project.resources()],
        },
        &config(),
    )?;

    let output = &resolved[0];
    assert_eq!(output["type_prefix"], json!("Labels"));
    let methods: Vec<_> = output["methods"]
        .as_array()
        .ok_or("methods should be an array")?
        .iter()
        .map(|method| method["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(methods, vec!["count", "colors", "sizes", "title"]);
    assert_eq!(output["factory"]["type_name"], json!("Labels_Factory"));
    assert!(output["lookup"].is_object());
    Ok(())
}

#[test]
fn broken_manifest_is_a_manifest_error() -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::new()?;
    std::fs::write(project.manifest(), "[[interface]]\nname = 3\n")?;
    let err = generate(&project, Some(LookupCachePolicy::Disabled)).unwrap_err();
    assert!(matches!(err, CliError::ManifestSyntax { .. }), "{err}");
    Ok(())
}
