//! Cargo packages as modules
//!
//! Every `Cargo.toml` with a `[package]` section found under the root is a
//! module. Its hierarchical path mirrors its directory relative to the root
//! (`crates/core/data` becomes `:crates:core:data`); a package living in the
//! root directory itself is named after the package (`:my-app`). Edges are
//! path dependencies between discovered packages, either declared directly
//! or inherited with `workspace = true` from the nearest enclosing
//! `[workspace.dependencies]` table.

use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::ModuleLookup;
use crate::constants::SKIPPED_DIRS;
use crate::constants::path::SEPARATOR;
use crate::dependency_filter::DependencyFilter;
use crate::error::ModGraphError;
use crate::toml_parser::CargoToml;

/// Module declarations discovered from Cargo manifests
#[derive(Debug, Clone)]
pub struct CargoWorkspaceLookup {
    root: PathBuf,
    modules: BTreeMap<String, Vec<String>>,
}

struct DiscoveredPackage {
    dir: PathBuf,
    module_path: String,
    manifest: CargoToml,
}

impl CargoWorkspaceLookup {
    /// Discover every package under `root`
    pub fn discover(root: &Path, filter: DependencyFilter) -> Result<Self, ModGraphError> {
        let root = std::fs::canonicalize(root).map_err(|e| ModGraphError::FileReadError {
            path: root.to_path_buf(),
            source: e,
        })?;

        let mut packages = Vec::new();
        let mut workspace_deps: HashMap<PathBuf, BTreeMap<String, PathBuf>> = HashMap::new();

        for manifest_path in Self::find_manifests(&root) {
            let manifest = CargoToml::parse_file(&manifest_path)?;
            let Some(dir) = manifest_path.parent().map(Path::to_path_buf) else {
                continue;
            };

            if manifest.workspace.is_some() {
                let inherited = manifest
                    .get_workspace_dependencies()
                    .into_iter()
                    .map(|(name, path)| (name, dir.join(path)))
                    .collect();
                workspace_deps.insert(dir.clone(), inherited);
            }

            let Some(module_path) = Self::module_path(&root, &dir, &manifest) else {
                continue;
            };
            debug!(module = %module_path, manifest = %manifest_path.display(), "Discovered package");
            packages.push(DiscoveredPackage {
                dir,
                module_path,
                manifest,
            });
        }

        let by_dir: HashMap<&Path, &str> = packages
            .iter()
            .map(|package| (package.dir.as_path(), package.module_path.as_str()))
            .collect();

        let mut modules = BTreeMap::new();
        for package in &packages {
            let inherited = Self::enclosing_workspace(&package.dir, &root, &workspace_deps);
            let mut dependencies = Vec::new();

            for declared in package.manifest.get_all_dependencies() {
                if !filter.should_include_dependency(&declared) {
                    continue;
                }

                let target_dir = if CargoToml::is_workspace_dependency(declared.dependency) {
                    inherited.and_then(|deps| deps.get(declared.name)).cloned()
                } else {
                    CargoToml::extract_path(declared.dependency).map(|path| package.dir.join(path))
                };

                let Some(target_dir) = target_dir else {
                    continue;
                };
                let Ok(target_dir) = std::fs::canonicalize(&target_dir) else {
                    warn!(
                        module = %package.module_path,
                        dependency = declared.name,
                        path = %target_dir.display(),
                        "Path dependency does not exist"
                    );
                    continue;
                };

                if let Some(dependency_path) = by_dir.get(target_dir.as_path()) {
                    dependencies.push(dependency_path.to_string());
                }
            }

            modules.insert(package.module_path.clone(), dependencies);
        }

        Ok(Self { root, modules })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn find_manifests(root: &Path) -> Vec<PathBuf> {
        let mut manifests: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name();
                !SKIPPED_DIRS.iter().any(|skipped| name == *skipped)
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && e.file_name() == "Cargo.toml")
            .map(|e| e.into_path())
            .collect();

        // Sort by path for consistent output
        manifests.sort();
        manifests
    }

    fn module_path(root: &Path, dir: &Path, manifest: &CargoToml) -> Option<String> {
        let name = manifest.package_name()?;
        let relative = dir.strip_prefix(root).ok()?;

        let segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let segments = if segments.is_empty() {
            vec![name.to_string()]
        } else {
            segments
        };

        Some(
            segments
                .iter()
                .map(|segment| format!("{SEPARATOR}{segment}"))
                .collect(),
        )
    }

    fn enclosing_workspace<'a>(
        dir: &Path,
        root: &Path,
        workspace_deps: &'a HashMap<PathBuf, BTreeMap<String, PathBuf>>,
    ) -> Option<&'a BTreeMap<String, PathBuf>> {
        dir.ancestors()
            .take_while(|ancestor| ancestor.starts_with(root))
            .find_map(|ancestor| workspace_deps.get(ancestor))
    }
}

impl ModuleLookup for CargoWorkspaceLookup {
    fn module_paths(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    fn direct_dependencies(&self, path: &str) -> Option<Vec<String>> {
        self.modules.get(path).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_manifest(root: &Path, dir: &str, content: &str) {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Cargo.toml"), content).unwrap();
    }

    fn create_workspace(temp_dir: &TempDir) {
        let root = temp_dir.path();

        write_manifest(
            root,
            "",
            r#"
[workspace]
members = ["app", "core/*"]

[workspace.dependencies]
core-model = { path = "core/model" }
"#,
        );
        write_manifest(
            root,
            "app",
            r#"
[package]
name = "app"

[dependencies]
core-data = { path = "../core/data" }
core-model = { workspace = true }
serde = "1.0"

[dev-dependencies]
core-testing = { path = "../core/testing" }
"#,
        );
        write_manifest(
            root,
            "core/data",
            r#"
[package]
name = "core-data"

[dependencies]
core-model = { workspace = true }
"#,
        );
        write_manifest(root, "core/model", "[package]\nname = \"core-model\"\n");
        write_manifest(root, "core/testing", "[package]\nname = \"core-testing\"\n");
        write_manifest(root, "target/debug/junk", "[package]\nname = \"junk\"\n");
    }

    #[test]
    fn test_discovers_packages_as_hierarchical_paths() {
        let temp_dir = TempDir::new().unwrap();
        create_workspace(&temp_dir);

        let lookup =
            CargoWorkspaceLookup::discover(temp_dir.path(), DependencyFilter::default()).unwrap();

        assert_eq!(
            lookup.module_paths(),
            vec![":app", ":core:data", ":core:model", ":core:testing"]
        );
    }

    #[test]
    fn test_links_path_and_workspace_dependencies() {
        let temp_dir = TempDir::new().unwrap();
        create_workspace(&temp_dir);

        let lookup =
            CargoWorkspaceLookup::discover(temp_dir.path(), DependencyFilter::default()).unwrap();

        assert_eq!(
            lookup.direct_dependencies(":app"),
            Some(vec![
                ":core:data".to_string(),
                ":core:model".to_string(),
                ":core:testing".to_string(),
            ])
        );
        assert_eq!(
            lookup.direct_dependencies(":core:data"),
            Some(vec![":core:model".to_string()])
        );
        assert_eq!(lookup.direct_dependencies(":core:model"), Some(vec![]));
    }

    #[test]
    fn test_excludes_dev_dependencies() {
        let temp_dir = TempDir::new().unwrap();
        create_workspace(&temp_dir);

        let filter = DependencyFilter::new(true, false, false);
        let lookup = CargoWorkspaceLookup::discover(temp_dir.path(), filter).unwrap();

        assert_eq!(
            lookup.direct_dependencies(":app"),
            Some(vec![":core:data".to_string(), ":core:model".to_string()])
        );
    }

    #[test]
    fn test_root_package_is_named_after_the_package() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(temp_dir.path(), "", "[package]\nname = \"solo\"\n");

        let lookup =
            CargoWorkspaceLookup::discover(temp_dir.path(), DependencyFilter::default()).unwrap();
        assert_eq!(lookup.module_paths(), vec![":solo"]);
    }

    #[test]
    fn test_missing_root() {
        let result = CargoWorkspaceLookup::discover(
            Path::new("/definitely/not/a/workspace"),
            DependencyFilter::default(),
        );
        assert!(matches!(result, Err(ModGraphError::FileReadError { .. })));
    }
}
