//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;
use glob::Pattern;

use crate::dependency_filter::DependencyFilter;
use crate::error::ModGraphError;
use crate::lookup::{CargoWorkspaceLookup, ManifestLookup, ModuleLookup};

/// Where module declarations come from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// TOML manifest declaring modules and their dependencies
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "root",
        env = "MODGRAPH_MANIFEST"
    )]
    pub manifest: Option<PathBuf>,

    /// Directory whose Cargo packages are the modules (defaults to current
    /// directory)
    #[arg(long, value_name = "DIR", env = "MODGRAPH_ROOT")]
    pub root: Option<PathBuf>,

    /// Ignore dev-dependencies of Cargo packages
    #[arg(long, env = "MODGRAPH_EXCLUDE_DEV")]
    pub exclude_dev: bool,

    /// Ignore build-dependencies of Cargo packages
    #[arg(long, env = "MODGRAPH_EXCLUDE_BUILD")]
    pub exclude_build: bool,

    /// Ignore target-specific dependencies of Cargo packages
    #[arg(long, env = "MODGRAPH_EXCLUDE_TARGET")]
    pub exclude_target: bool,
}

impl SourceArgs {
    pub fn module_source(&self) -> ModuleSource {
        match &self.manifest {
            Some(manifest) => ModuleSource::Manifest(manifest.clone()),
            None => ModuleSource::Cargo {
                root: self
                    .root
                    .clone()
                    .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
                filter: DependencyFilter::from(self),
            },
        }
    }
}

/// A configured provider of module declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSource {
    Manifest(PathBuf),
    Cargo {
        root: PathBuf,
        filter: DependencyFilter,
    },
}

impl ModuleSource {
    /// Read the declarations into a lookup
    pub fn open(&self) -> Result<Box<dyn ModuleLookup>, ModGraphError> {
        let lookup: Box<dyn ModuleLookup> = match self {
            ModuleSource::Manifest(path) => Box::new(ManifestLookup::parse_file(path)?),
            ModuleSource::Cargo { root, filter } => {
                Box::new(CargoWorkspaceLookup::discover(root, *filter)?)
            }
        };
        Ok(lookup)
    }

    pub fn describe(&self) -> String {
        match self {
            ModuleSource::Manifest(path) => format!("manifest {}", path.display()),
            ModuleSource::Cargo { root, .. } => format!("Cargo packages under {}", root.display()),
        }
    }
}

/// Compile an optional module path glob
pub fn compile_filter(filter: Option<&str>) -> Result<Option<Pattern>, ModGraphError> {
    filter
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| ModGraphError::ConfigurationError {
                message: format!("Invalid module filter '{pattern}': {e}"),
            })
        })
        .transpose()
}

/// Keep the module paths matched by `filter`, all of them without one
pub fn select_modules(paths: Vec<String>, filter: Option<&Pattern>) -> Vec<String> {
    match filter {
        Some(pattern) => paths
            .into_iter()
            .filter(|path| pattern.matches(path))
            .collect(),
        None => paths,
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, ModGraphError>;
}

/// Trait for configurations that can be created from CLI commands
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands) -> Result<Self, ModGraphError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::ModGraphError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}
