//! # Configuration Module
//!
//! Plain configuration structures for every modgraph command, each built
//! through a builder implementing [`ConfigBuilder`](crate::common::ConfigBuilder).
//!
//! ## Command Configurations
//!
//! - **GenerateConfig**: Configuration for the `generate` command
//! - **ModulesConfig**: Configuration for the `modules` command
//!
//! ## Example
//!
//! ```
//! use modgraph::common::{ConfigBuilder, ModuleSource};
//! use modgraph::config::GenerateConfig;
//! use modgraph::render::OutputFormat;
//!
//! let config = GenerateConfig::builder()
//!     .with_source(ModuleSource::Manifest("modules.toml".into()))
//!     .with_modules(vec![":app".to_string()])
//!     .with_format(OutputFormat::Mermaid)
//!     .with_output("docs/graphs".into())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.format, OutputFormat::Mermaid);
//! ```

pub mod generate;
pub mod modules;

pub use generate::GenerateConfig;
pub use modules::ModulesConfig;
