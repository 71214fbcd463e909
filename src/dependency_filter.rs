//! Dependency filtering functionality

use crate::toml_parser::{DeclaredDependency, DependencyKind};

/// Encapsulates dependency filtering logic based on dependency kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencyFilter {
    exclude_dev: bool,
    exclude_build: bool,
    exclude_target: bool,
}

impl DependencyFilter {
    /// Create a new dependency filter
    pub fn new(exclude_dev: bool, exclude_build: bool, exclude_target: bool) -> Self {
        Self {
            exclude_dev,
            exclude_build,
            exclude_target,
        }
    }

    /// Check if dev dependencies should be included
    pub fn include_dev(&self) -> bool {
        !self.exclude_dev
    }

    /// Check if build dependencies should be included
    pub fn include_build(&self) -> bool {
        !self.exclude_build
    }

    /// Check if target-specific dependencies should be included
    pub fn include_target(&self) -> bool {
        !self.exclude_target
    }

    /// Check if a declared dependency passes both the kind and target filters
    pub(crate) fn should_include_dependency(&self, dep: &DeclaredDependency<'_>) -> bool {
        let kind_included = match dep.kind {
            DependencyKind::Normal => true,
            DependencyKind::Build => self.include_build(),
            DependencyKind::Dev => self.include_dev(),
        };

        kind_included && (dep.target.is_none() || self.include_target())
    }
}

impl From<&crate::common::SourceArgs> for DependencyFilter {
    fn from(args: &crate::common::SourceArgs) -> Self {
        Self::new(args.exclude_dev, args.exclude_build, args.exclude_target)
    }
}
