//! # modgraph - Module Dependency Diagrams
//!
//! modgraph turns a project's module structure into diagram source text. A
//! module is identified by a `:`-separated hierarchical path (`:core:data`)
//! and declares the modules it depends on directly. For any target module,
//! modgraph resolves the full transitive dependency graph, clusters the
//! modules by namespace, and emits Graphviz DOT or a Mermaid flowchart.
//!
//! ## Main Components
//!
//! - **Lookup**: Sources of module declarations (TOML manifests, Cargo
//!   packages, in-memory tables)
//! - **Graph**: Resolves module graphs with caching and cycle protection, and
//!   folds module paths into a namespace tree
//! - **Style**: Parses JSON style documents into per-grammar attributes
//! - **Render**: The DOT and Mermaid emitters
//! - **Generator**: Ties the above together for one or many target modules
//!
//! ## Usage
//!
//! ```
//! use modgraph::generator::GraphGenerator;
//! use modgraph::lookup::StaticLookup;
//! use modgraph::render::OutputFormat;
//! use modgraph::style::StyleDocument;
//!
//! # fn main() -> Result<(), modgraph::error::ModGraphError> {
//! let lookup = StaticLookup::from_pairs([
//!     (":app", vec![":core:data", ":core:model"]),
//!     (":core:data", vec![":core:model"]),
//!     (":core:model", vec![]),
//! ]);
//!
//! let style = StyleDocument::parse(r#"{"directLink": {"color": "red"}}"#, "style.json")?;
//!
//! let mut generator = GraphGenerator::new(lookup);
//! let diagram = generator.generate(":app", OutputFormat::Dot, Some(&style))?;
//!
//! assert!(diagram.content.starts_with("digraph {"));
//! assert!(diagram
//!     .content
//!     .contains(r#"":app" -> {":core:data" ":core:model"} [color="red"]"#));
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Rendering Cargo packages
//!
//! ```no_run
//! use std::path::Path;
//!
//! use modgraph::DependencyFilter;
//! use modgraph::generator::GraphGenerator;
//! use modgraph::lookup::{CargoWorkspaceLookup, ModuleLookup};
//! use modgraph::render::OutputFormat;
//!
//! # fn main() -> miette::Result<()> {
//! // Production dependencies only
//! let filter = DependencyFilter::new(true, true, false);
//! let lookup = CargoWorkspaceLookup::discover(Path::new("."), filter)?;
//! let modules = lookup.module_paths();
//!
//! let mut generator = GraphGenerator::new(lookup);
//! for (module, result) in generator.generate_all(&modules, OutputFormat::Mermaid, None) {
//!     match result {
//!         Ok(diagram) => println!("{}", diagram.file_contents()),
//!         Err(e) => eprintln!("{module}: {e}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod dependency_filter;
mod progress;
mod toml_parser;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod executors;
pub mod generator;
pub mod graph;
pub mod lookup;
pub mod render;
pub mod style;

pub use dependency_filter::DependencyFilter;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;
    use tracing_subscriber::EnvFilter;

    use crate::cli::Cli;
    use crate::commands::execute_command;
    use crate::constants::output::LOG_ENV;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    execute_command(cli.command)
}
