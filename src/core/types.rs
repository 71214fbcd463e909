//! Core type definitions
//!
//! This module contains the basic data structures used throughout the
//! application, with minimal logic - focusing on data representation.

use std::rc::Rc;

/// A module in the dependency graph.
///
/// Dependencies are shared: the same `Rc<Module>` is handed to every module
/// that depends on it within one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub path: String,
    pub dependencies: Vec<Rc<Module>>,
}

impl Module {
    pub fn new(path: impl Into<String>, dependencies: Vec<Rc<Module>>) -> Self {
        Self {
            path: path.into(),
            dependencies,
        }
    }

    /// A module without dependencies
    pub fn leaf(path: impl Into<String>) -> Self {
        Self::new(path, Vec::new())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn dependencies(&self) -> &[Rc<Module>] {
        &self.dependencies
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}

/// A dependency edge dropped while resolving because it closed a cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CycleBreak {
    pub from: String,
    pub to: String,
}

impl std::fmt::Display for CycleBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
