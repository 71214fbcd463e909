//! Configuration constants for modgraph
//!
//! This module contains the constants used throughout the application.
//! Output defaults can be overridden through command-line flags or their
//! `MODGRAPH_*` environment variables.

use std::time::Duration;

/// Module path conventions
pub mod path {
    /// Separator between the segments of a hierarchical module path
    pub const SEPARATOR: char = ':';

    /// Identifier replacement for a path separator
    pub const SEPARATOR_ID: &str = "__";

    /// Identifier replacement for a hyphen
    pub const HYPHEN_ID: &str = "___";
}

/// Diagram grammar fragments
pub mod diagram {
    /// First line of every Mermaid diagram
    pub const MERMAID_INIT: &str = "%%{ init: { 'flowchart': { 'curve': 'basis' } } }%%";

    /// Mermaid flowchart direction line
    pub const MERMAID_GRAPH: &str = "graph TD";

    /// Suffix appended to normalized Mermaid node identifiers
    pub const MERMAID_NODE_SUFFIX: &str = "_id";

    /// Default Mermaid edge arrow
    pub const MERMAID_ARROW: &str = "-->";

    /// Class assigned to every non-target module in Mermaid output
    pub const MERMAID_MODULE_CLASS: &str = "Module";

    /// Class assigned to the target module in Mermaid output
    pub const MERMAID_TARGET_CLASS: &str = "TargetModule";

    /// Prefix of every Graphviz cluster subgraph identifier
    pub const DOT_CLUSTER_PREFIX: &str = "cluster_";
}

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
}

/// Output configuration
pub mod output {
    /// Default output directory, relative to the working directory
    pub const DEFAULT_DIR: &str = "docs/graphs";

    /// Default output format when not specified
    pub const DEFAULT_FORMAT: &str = "dot";

    /// Environment variable holding the tracing filter
    pub const LOG_ENV: &str = "MODGRAPH_LOG";
}

/// Directories never descended into during Cargo workspace discovery
pub const SKIPPED_DIRS: &[&str] = &["target", ".git", "node_modules"];
