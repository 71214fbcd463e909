//! # Module Lookup
//!
//! A [`ModuleLookup`] answers the only two questions the resolver ever asks
//! about a project: which modules exist, and which modules a given module
//! declares as direct dependencies.
//!
//! ## Implementations
//!
//! - **StaticLookup**: In-memory declarations, handy for tests and embedding
//! - **ManifestLookup**: A TOML manifest listing modules and their
//!   dependencies
//! - **CargoWorkspaceLookup**: Cargo packages discovered under a directory,
//!   linked by their path dependencies

mod cargo;
mod manifest;

use std::collections::HashMap;

pub use cargo::CargoWorkspaceLookup;
pub use manifest::ManifestLookup;

/// Source of module declarations
pub trait ModuleLookup {
    /// Every module path known to this lookup, in a stable order
    fn module_paths(&self) -> Vec<String>;

    /// Direct dependencies declared by `path`, in declaration order, or
    /// `None` when the module is unknown
    fn direct_dependencies(&self, path: &str) -> Option<Vec<String>>;

    fn contains(&self, path: &str) -> bool {
        self.direct_dependencies(path).is_some()
    }
}

impl<T: ModuleLookup + ?Sized> ModuleLookup for &T {
    fn module_paths(&self) -> Vec<String> {
        (**self).module_paths()
    }

    fn direct_dependencies(&self, path: &str) -> Option<Vec<String>> {
        (**self).direct_dependencies(path)
    }
}

impl<T: ModuleLookup + ?Sized> ModuleLookup for Box<T> {
    fn module_paths(&self) -> Vec<String> {
        (**self).module_paths()
    }

    fn direct_dependencies(&self, path: &str) -> Option<Vec<String>> {
        (**self).direct_dependencies(path)
    }
}

/// In-memory module declarations, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    order: Vec<String>,
    dependencies: HashMap<String, Vec<String>>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, P, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, Vec<D>)>,
        P: Into<String>,
        D: Into<String>,
    {
        let mut lookup = Self::new();
        for (path, dependencies) in pairs {
            lookup.declare(path, dependencies);
        }
        lookup
    }

    /// Declare `path` with its direct dependencies, replacing any earlier
    /// declaration of the same path
    pub fn declare<P, D>(&mut self, path: P, dependencies: Vec<D>) -> &mut Self
    where
        P: Into<String>,
        D: Into<String>,
    {
        let path = path.into();
        let dependencies = dependencies.into_iter().map(Into::into).collect();
        if self.dependencies.insert(path.clone(), dependencies).is_none() {
            self.order.push(path);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl ModuleLookup for StaticLookup {
    fn module_paths(&self) -> Vec<String> {
        self.order.clone()
    }

    fn direct_dependencies(&self, path: &str) -> Option<Vec<String>> {
        self.dependencies.get(path).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_lookup_keeps_declaration_order() {
        let lookup = StaticLookup::from_pairs([
            (":app", vec![":core"]),
            (":core", vec![]),
            (":lib", vec![":core"]),
        ]);

        assert_eq!(lookup.module_paths(), vec![":app", ":core", ":lib"]);
        assert_eq!(lookup.direct_dependencies(":app"), Some(vec![":core".to_string()]));
        assert_eq!(lookup.direct_dependencies(":missing"), None);
        assert!(lookup.contains(":lib"));
        assert!(!lookup.contains(":missing"));
    }

    #[test]
    fn test_redeclaring_replaces_dependencies() {
        let mut lookup = StaticLookup::new();
        lookup.declare(":app", vec![":core"]);
        lookup.declare(":app", vec![":lib"]);

        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.direct_dependencies(":app"), Some(vec![":lib".to_string()]));
    }
}
