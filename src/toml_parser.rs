use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use crate::error::{ManifestParseError, ModGraphError};

#[derive(Debug, Clone, Deserialize)]
pub struct CargoToml {
    pub package: Option<Package>,
    pub workspace: Option<Workspace>,
    pub dependencies: Option<IndexMap<String, Dependency>>,
    #[serde(rename = "dev-dependencies")]
    pub dev_dependencies: Option<IndexMap<String, Dependency>>,
    #[serde(rename = "build-dependencies")]
    pub build_dependencies: Option<IndexMap<String, Dependency>>,
    pub target: Option<IndexMap<String, TargetDependencies>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Package {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    pub dependencies: Option<IndexMap<String, Dependency>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetDependencies {
    pub dependencies: Option<IndexMap<String, Dependency>>,
    #[serde(rename = "dev-dependencies")]
    pub dev_dependencies: Option<IndexMap<String, Dependency>>,
    #[serde(rename = "build-dependencies")]
    pub build_dependencies: Option<IndexMap<String, Dependency>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Simple(#[allow(dead_code)] String),
    Detailed(DetailedDependency),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailedDependency {
    pub path: Option<String>,
    pub workspace: Option<bool>,
}

/// Section a dependency was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Normal,
    Build,
    Dev,
}

/// A dependency together with where it was declared
#[derive(Debug, Clone)]
pub struct DeclaredDependency<'a> {
    pub name: &'a str,
    pub dependency: &'a Dependency,
    pub kind: DependencyKind,
    pub target: Option<&'a str>,
}

impl CargoToml {
    pub fn parse_file(path: &Path) -> Result<Self, ModGraphError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ModGraphError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            ModGraphError::ManifestParseError(Box::new(ManifestParseError {
                file: path.display().to_string(),
                source_code: NamedSource::new(path.display().to_string(), content.clone()),
                span,
                source: e,
            }))
        })
    }

    pub fn package_name(&self) -> Option<&str> {
        self.package.as_ref().map(|package| package.name.as_str())
    }

    /// Path dependencies declared in `[workspace.dependencies]`
    pub fn get_workspace_dependencies(&self) -> BTreeMap<String, PathBuf> {
        let mut deps = BTreeMap::new();

        if let Some(workspace) = &self.workspace
            && let Some(workspace_deps) = &workspace.dependencies
        {
            for (name, dep) in workspace_deps {
                if let Some(path) = Self::extract_path(dep) {
                    deps.insert(name.clone(), PathBuf::from(path));
                }
            }
        }

        deps
    }

    /// Every declared dependency: normal, then build, then dev, each followed
    /// by its target-specific counterparts. Names keep the order they are
    /// declared in.
    pub fn get_all_dependencies(&self) -> Vec<DeclaredDependency<'_>> {
        let mut all_deps = Vec::new();

        for kind in [DependencyKind::Normal, DependencyKind::Build, DependencyKind::Dev] {
            if let Some(deps) = self.section(kind) {
                all_deps.extend(deps.iter().map(|(name, dependency)| DeclaredDependency {
                    name: name.as_str(),
                    dependency,
                    kind,
                    target: None,
                }));
            }

            for (target_name, target_deps) in self.target.iter().flatten() {
                if let Some(deps) = target_deps.section(kind) {
                    all_deps.extend(deps.iter().map(|(name, dependency)| DeclaredDependency {
                        name: name.as_str(),
                        dependency,
                        kind,
                        target: Some(target_name.as_str()),
                    }));
                }
            }
        }

        all_deps
    }

    fn section(&self, kind: DependencyKind) -> Option<&IndexMap<String, Dependency>> {
        match kind {
            DependencyKind::Normal => self.dependencies.as_ref(),
            DependencyKind::Build => self.build_dependencies.as_ref(),
            DependencyKind::Dev => self.dev_dependencies.as_ref(),
        }
    }

    pub fn extract_path(dep: &Dependency) -> Option<String> {
        match dep {
            Dependency::Simple(_) => None,
            Dependency::Detailed(detailed) => detailed.path.clone(),
        }
    }

    pub fn is_workspace_dependency(dep: &Dependency) -> bool {
        match dep {
            Dependency::Simple(_) => false,
            Dependency::Detailed(detailed) => detailed.workspace.unwrap_or(false),
        }
    }
}

impl TargetDependencies {
    fn section(&self, kind: DependencyKind) -> Option<&IndexMap<String, Dependency>> {
        match kind {
            DependencyKind::Normal => self.dependencies.as_ref(),
            DependencyKind::Build => self.build_dependencies.as_ref(),
            DependencyKind::Dev => self.dev_dependencies.as_ref(),
        }
    }
}
