//! Manifest lookup: the capability the closure collector reads through.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::manifest::PackageManifest;
use crate::DEFAULT_MANIFEST_FILE;

/// Result of looking up one package's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLookup {
    /// The manifest was read; these are its declared dependency names.
    Found(Vec<String>),
    /// The manifest is missing or unreadable. The package is a leaf.
    Unavailable(String),
}

/// Something that can report the direct dependencies of a package by name.
///
/// Implementations never fail: any problem is reported as
/// [`ManifestLookup::Unavailable`].
pub trait ManifestSource {
    fn lookup(&self, name: &str) -> ManifestLookup;
}

/// The relative path of package `name` inside a package tree.
///
/// Scoped names (`@scope/pkg`) map to nested directories. Empty names,
/// absolute paths and `.`/`..` components have no location in the tree.
pub fn package_path(name: &str) -> Option<&Path> {
    let path = Path::new(name);
    let is_plain = !name.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    is_plain.then_some(path)
}

/// A `node_modules`-style tree: `<root>/<name>/package.json`.
#[derive(Debug, Clone)]
pub struct NodeModules {
    root: PathBuf,
    manifest_file: String,
}

impl NodeModules {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
        }
    }

    /// Read manifests from `file` instead of `package.json`.
    pub fn with_manifest_file(mut self, file: impl Into<String>) -> Self {
        self.manifest_file = file.into();
        self
    }

    /// Directory of the package `name` inside this tree.
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Path of the manifest file for package `name`.
    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.package_dir(name).join(&self.manifest_file)
    }
}

impl ManifestSource for NodeModules {
    fn lookup(&self, name: &str) -> ManifestLookup {
        if package_path(name).is_none() {
            return ManifestLookup::Unavailable(format!(
                "'{name}' is not a directory name inside {}",
                self.root.display()
            ));
        }
        // Every failure kind, including permission errors, is a leaf.
        match PackageManifest::from_path(&self.manifest_path(name)) {
            Ok(manifest) => ManifestLookup::Found(manifest.dependency_names()),
            Err(e) => ManifestLookup::Unavailable(e.to_string()),
        }
    }
}

/// In-memory dependency graph. A missing key is an unavailable manifest.
impl ManifestSource for BTreeMap<String, Vec<String>> {
    fn lookup(&self, name: &str) -> ManifestLookup {
        match self.get(name) {
            Some(deps) => ManifestLookup::Found(deps.clone()),
            None => ManifestLookup::Unavailable(format!("no manifest for '{name}'")),
        }
    }
}
