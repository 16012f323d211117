use lc_core::bundle::properties::parse_properties;
use lc_core::bundle::{resource_name, LoadError};
use lc_core::model::TypeNode;
use lc_core::{PropertyBundle, PropertyLoader};
use std::path::{Path, PathBuf};

/// Reads `<root>/<package dirs>/<Name>[_<suffix>].properties`; the first root holding the file wins.
#[derive(Debug, Clone, Default)]
pub struct FsPropertyLoader {
    roots: Vec<PathBuf>,
}

impl FsPropertyLoader {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn find(&self, resource: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(resource))
            .find(|path| path.is_file())
    }
}

impl PropertyLoader for FsPropertyLoader {
    fn load(&self, ty: &TypeNode, suffix: &str) -> Result<Option<PropertyBundle>, LoadError> {
        let resource = resource_name(ty, suffix);
        let Some(path) = self.find(&resource) else {
            return Ok(None);
        };
        tracing::debug!("loading {}", path.display());
        read_bundle(&path).map(Some)
    }
}

fn read_bundle(path: &Path) -> Result<PropertyBundle, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|err| LoadError::Unreadable {
        resource: path.display().to_string(),
        message: err.to_string(),
    })?;
    parse_properties(&text).map_err(|err| LoadError::Malformed {
        resource: path.display().to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_core::model::TypeDecl;
    use lc_core::TypeArena;
    use pretty_assertions::assert_eq;

    fn labels_arena() -> TypeArena {
        TypeArena::from_decls([TypeDecl::new("Labels").in_package("org.demo")])
    }

    #[test]
    fn first_root_with_the_resource_wins() -> Result<(), Box<dyn std::error::Error>> {
        let first = tempfile::tempdir()?;
        let second = tempfile::tempdir()?;
        std::fs::create_dir_all(second.path().join("org/demo"))?;
        std::fs::write(second.path().join("org/demo/Labels_fr.properties"), "title = Titre\n")?;
        std::fs::create_dir_all(first.path().join("org/demo"))?;
        std::fs::write(first.path().join("org/demo/Labels.properties"), "title = Title\n")?;

        let arena = labels_arena();
        let labels = &arena[arena.find("Labels").ok_or("Labels missing")?];
        let loader = FsPropertyLoader::new([first.path(), second.path()]);

        let fr = loader.load(labels, "fr")?.ok_or("fr bundle missing")?;
        assert_eq!(fr.get("title"), Some("Titre"));
        let default = loader.load(labels, "")?.ok_or("default bundle missing")?;
        assert_eq!(default.get("title"), Some("Title"));
        assert!(loader.load(labels, "de")?.is_none());
        Ok(())
    }

    #[test]
    fn malformed_resource_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let root = tempfile::tempdir()?;
        std::fs::create_dir_all(root.path().join("org/demo"))?;
        std::fs::write(root.path().join("org/demo/Labels.properties"), "bad = \\u12G4\n")?;

        let arena = labels_arena();
        let labels = &arena[arena.find("Labels").ok_or("Labels missing")?];
        let err = FsPropertyLoader::new([root.path()]).load(labels, "").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }), "{err}");
        Ok(())
    }
}
