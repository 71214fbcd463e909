use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::SourceArgs;
use crate::render::OutputFormat;

#[derive(Parser)]
#[command(
    name = "modgraph",
    about = "🗺️  Render module dependency graphs as Graphviz DOT or Mermaid diagrams",
    long_about = "modgraph resolves a module and everything it depends on, clusters the modules \
                  by their ':'-separated namespaces, and writes the result as Graphviz DOT or a \
                  Mermaid flowchart. Modules come from a TOML manifest or from the Cargo \
                  packages of a directory tree.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one diagram per module
    ///
    /// Renders the requested modules (every known module when none is
    /// given) with their transitive dependencies. Each diagram is written to
    /// its own file in the output directory, or printed with --stdout.
    #[command(
        long_about = "Generate a dependency diagram for each requested module. The diagram shows \
                      the module, everything it depends on transitively, and namespace clusters \
                      for shared path prefixes. The module's own edges are 'direct links' and can \
                      be styled separately through a JSON style document. A module that fails to \
                      render is reported and skipped; the remaining modules are still generated."
    )]
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Module to render (repeatable, e.g. --module :app)
        #[arg(
            short,
            long = "module",
            value_name = "MODULE_PATH",
            env = "MODGRAPH_MODULES",
            value_delimiter = ','
        )]
        modules: Vec<String>,

        /// Only render modules whose path matches this glob (e.g. ':core:*')
        #[arg(long, value_name = "GLOB", env = "MODGRAPH_FILTER")]
        filter: Option<String>,

        /// Diagram format
        #[arg(
            short,
            long,
            value_enum,
            default_value = crate::constants::output::DEFAULT_FORMAT,
            env = "MODGRAPH_FORMAT"
        )]
        format: OutputFormat,

        /// JSON style document
        #[arg(short, long, value_name = "FILE", env = "MODGRAPH_STYLE")]
        style: Option<PathBuf>,

        /// Directory diagrams are written to
        #[arg(
            short,
            long,
            value_name = "DIR",
            default_value = crate::constants::output::DEFAULT_DIR,
            env = "MODGRAPH_OUTPUT"
        )]
        output: PathBuf,

        /// Prefix for every generated file name
        #[arg(long, default_value = "", env = "MODGRAPH_PREFIX")]
        prefix: String,

        /// Print diagrams to stdout instead of writing files
        #[arg(long, env = "MODGRAPH_STDOUT")]
        stdout: bool,

        /// Exit with an error if any module fails to render
        #[arg(long, env = "MODGRAPH_ERROR_ON_FAILURE")]
        error_on_failure: bool,
    },

    /// List the known modules and their direct dependencies
    #[command(
        long_about = "List every module the source declares, one per line, followed by its direct \
                      dependencies. Useful for checking what a manifest or a Cargo directory tree \
                      resolves to before generating diagrams."
    )]
    Modules {
        #[command(flatten)]
        source: SourceArgs,

        /// Only list modules whose path matches this glob
        #[arg(long, value_name = "GLOB", env = "MODGRAPH_FILTER")]
        filter: Option<String>,
    },
}
