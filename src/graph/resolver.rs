//! Resolution of module paths into shared [`Module`] graphs

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::core::{CycleBreak, Module};
use crate::error::ModGraphError;
use crate::lookup::ModuleLookup;

/// Builds [`Module`] graphs on top of a [`ModuleLookup`].
///
/// The resolver caches fully resolved modules and the direct dependencies of
/// every path it has asked the lookup about. One resolver is meant to serve
/// a whole generation run, so shared subgraphs are resolved once no matter
/// how many target modules are rendered. It is not meant to be shared
/// between threads.
///
/// A dependency that points back at a module still being expanded closes a
/// cycle. That edge is dropped from the resolved graph and reported through
/// [`ModuleResolver::cycle_breaks`]. Modules whose subgraph lost such an edge
/// depend on where the traversal started, so they are kept out of the
/// cross-call cache.
pub struct ModuleResolver<L> {
    lookup: L,
    modules: HashMap<String, Rc<Module>>,
    dependencies: HashMap<String, Vec<String>>,
    cycle_breaks: Vec<CycleBreak>,
}

/// State local to one top-level [`ModuleResolver::resolve`] call
#[derive(Default)]
struct Resolution {
    in_progress: HashSet<String>,
    truncated: HashMap<String, Rc<Module>>,
    cycle_breaks: Vec<CycleBreak>,
}

impl<L: ModuleLookup> ModuleResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            modules: HashMap::new(),
            dependencies: HashMap::new(),
            cycle_breaks: Vec::new(),
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolve `path` and all of its transitive dependencies
    pub fn resolve(&mut self, path: &str) -> Result<Rc<Module>, ModGraphError> {
        self.cycle_breaks.clear();

        let mut resolution = Resolution::default();
        let (module, _) = self.resolve_in(path, &mut resolution)?;
        self.cycle_breaks = resolution.cycle_breaks;

        Ok(module)
    }

    /// Edges dropped by the most recent successful [`resolve`](Self::resolve)
    pub fn cycle_breaks(&self) -> &[CycleBreak] {
        &self.cycle_breaks
    }

    /// Number of modules held in the cross-call cache
    pub fn cached_modules(&self) -> usize {
        self.modules.len()
    }

    /// Direct dependencies of `path` as declared by the lookup, without
    /// duplicates or self-references
    pub fn direct_dependencies(&mut self, path: &str) -> Result<Vec<String>, ModGraphError> {
        if let Some(cached) = self.dependencies.get(path) {
            debug!(module = path, "Using cached direct dependencies");
            return Ok(cached.clone());
        }

        let declared = self.lookup.direct_dependencies(path).ok_or_else(|| {
            ModGraphError::ModuleNotFound {
                path: path.to_string(),
                available: self.lookup.module_paths(),
            }
        })?;

        let mut seen = HashSet::new();
        let dependencies: Vec<String> = declared
            .into_iter()
            .filter(|dependency| dependency != path)
            .filter(|dependency| seen.insert(dependency.clone()))
            .collect();

        info!(module = path, ?dependencies, "Found direct dependencies");
        self.dependencies
            .insert(path.to_string(), dependencies.clone());
        Ok(dependencies)
    }

    /// Returns the module and whether a cycle edge was dropped below it
    fn resolve_in(
        &mut self,
        path: &str,
        resolution: &mut Resolution,
    ) -> Result<(Rc<Module>, bool), ModGraphError> {
        if let Some(module) = self.modules.get(path) {
            debug!(module = path, "Using cached module");
            return Ok((Rc::clone(module), false));
        }
        if let Some(module) = resolution.truncated.get(path) {
            return Ok((Rc::clone(module), true));
        }

        resolution.in_progress.insert(path.to_string());

        let mut truncated = false;
        let mut dependencies = Vec::new();
        for dependency in self.direct_dependencies(path)? {
            if resolution.in_progress.contains(&dependency) {
                warn!(
                    from = path,
                    to = %dependency,
                    "Dependency cycle detected, dropping the closing edge"
                );
                resolution.cycle_breaks.push(CycleBreak {
                    from: path.to_string(),
                    to: dependency,
                });
                truncated = true;
                continue;
            }

            let (module, dependency_truncated) = self.resolve_in(&dependency, resolution)?;
            truncated |= dependency_truncated;
            dependencies.push(module);
        }

        resolution.in_progress.remove(path);

        let module = Rc::new(Module::new(path, dependencies));
        if truncated {
            resolution
                .truncated
                .insert(path.to_string(), Rc::clone(&module));
        } else {
            self.modules.insert(path.to_string(), Rc::clone(&module));
        }

        Ok((module, truncated))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::lookup::StaticLookup;

    fn fixture_lookup() -> StaticLookup {
        StaticLookup::from_pairs([
            (":app", vec![":core:data", ":core:model", ":core:api"]),
            (":core:data", vec![":core:api", ":core:database", ":core:model"]),
            (":core:api", vec![":core:model"]),
            (":core:database", vec![]),
            (":core:model", vec![]),
        ])
    }

    fn dependency_paths(module: &Module) -> Vec<&str> {
        module.dependencies().iter().map(|d| d.path()).collect()
    }

    /// Lookup wrapper counting how often each path is queried
    struct CountingLookup {
        inner: StaticLookup,
        calls: RefCell<HashMap<String, usize>>,
    }

    impl ModuleLookup for CountingLookup {
        fn module_paths(&self) -> Vec<String> {
            self.inner.module_paths()
        }

        fn direct_dependencies(&self, path: &str) -> Option<Vec<String>> {
            *self.calls.borrow_mut().entry(path.to_string()).or_default() += 1;
            self.inner.direct_dependencies(path)
        }
    }

    #[test]
    fn test_resolve_keeps_declaration_order() {
        let mut resolver = ModuleResolver::new(fixture_lookup());
        let app = resolver.resolve(":app").unwrap();

        assert_eq!(app.path(), ":app");
        assert_eq!(
            dependency_paths(&app),
            vec![":core:data", ":core:model", ":core:api"]
        );
        assert_eq!(
            dependency_paths(&app.dependencies()[0]),
            vec![":core:api", ":core:database", ":core:model"]
        );
        assert!(resolver.cycle_breaks().is_empty());
    }

    #[test]
    fn test_shared_dependencies_are_the_same_instance() {
        let mut resolver = ModuleResolver::new(fixture_lookup());
        let app = resolver.resolve(":app").unwrap();

        let model_from_app = &app.dependencies()[1];
        let model_from_data = &app.dependencies()[0].dependencies()[2];
        assert!(Rc::ptr_eq(model_from_app, model_from_data));
    }

    #[test]
    fn test_filters_self_references_and_duplicates() {
        let lookup = StaticLookup::from_pairs([
            (":app", vec![":app", ":core", ":core", ":lib"]),
            (":core", vec![]),
            (":lib", vec![]),
        ]);
        let mut resolver = ModuleResolver::new(lookup);
        let app = resolver.resolve(":app").unwrap();

        assert_eq!(dependency_paths(&app), vec![":core", ":lib"]);
    }

    #[test]
    fn test_unknown_module_lists_available_paths() {
        let mut resolver = ModuleResolver::new(fixture_lookup());

        match resolver.resolve(":missing") {
            Err(ModGraphError::ModuleNotFound { path, available }) => {
                assert_eq!(path, ":missing");
                assert_eq!(available.len(), 5);
                assert!(available.contains(&":app".to_string()));
            }
            other => panic!("Expected ModuleNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_dependency_fails_without_poisoning_cache() {
        let lookup = StaticLookup::from_pairs([
            (":app", vec![":core", ":ghost"]),
            (":core", vec![]),
            (":lib", vec![":core"]),
        ]);
        let mut resolver = ModuleResolver::new(lookup);

        assert!(matches!(
            resolver.resolve(":app"),
            Err(ModGraphError::ModuleNotFound { .. })
        ));

        let lib = resolver.resolve(":lib").unwrap();
        assert_eq!(dependency_paths(&lib), vec![":core"]);
    }

    #[test]
    fn test_two_node_cycle_terminates_and_drops_back_edge() {
        let lookup = StaticLookup::from_pairs([(":a", vec![":b"]), (":b", vec![":a"])]);
        let mut resolver = ModuleResolver::new(lookup);

        let a = resolver.resolve(":a").unwrap();
        assert_eq!(dependency_paths(&a), vec![":b"]);
        assert!(a.dependencies()[0].dependencies().is_empty());
        assert_eq!(
            resolver.cycle_breaks(),
            &[CycleBreak {
                from: ":b".to_string(),
                to: ":a".to_string(),
            }]
        );
    }

    #[test]
    fn test_cycle_members_resolve_from_each_target() {
        let lookup = StaticLookup::from_pairs([(":a", vec![":b"]), (":b", vec![":a"])]);
        let mut resolver = ModuleResolver::new(lookup);

        resolver.resolve(":a").unwrap();
        let b = resolver.resolve(":b").unwrap();

        assert_eq!(dependency_paths(&b), vec![":a"]);
        assert!(b.dependencies()[0].dependencies().is_empty());
        assert_eq!(resolver.cycle_breaks().len(), 1);
        assert_eq!(resolver.cycle_breaks()[0].from, ":a");
    }

    #[test]
    fn test_cache_spans_calls() {
        let lookup = CountingLookup {
            inner: fixture_lookup(),
            calls: RefCell::new(HashMap::new()),
        };
        let mut resolver = ModuleResolver::new(lookup);

        let first = resolver.resolve(":core:data").unwrap();
        let app = resolver.resolve(":app").unwrap();

        assert!(Rc::ptr_eq(&first, &app.dependencies()[0]));
        assert_eq!(resolver.cached_modules(), 5);
        for count in resolver.lookup().calls.borrow().values() {
            assert_eq!(*count, 1);
        }
    }
}
