//! # Diagram Rendering
//!
//! Both output grammars share one shape: default style declarations, the
//! namespace tree of modules (containers become clusters or subgraphs), then
//! one edge statement per module that has dependencies.
//!
//! Edge statements come from a pre-order walk of the module graph starting
//! at the target. A module reachable through several chains contributes its
//! edge group only once, and modules without dependencies contribute none.

mod dot;
mod mermaid;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub use dot::DotRenderer;
pub use mermaid::MermaidRenderer;

use crate::core::Module;
use crate::error::ModGraphError;
use crate::graph::PathNode;
use crate::style::{StyleDocument, StyleMap};

// Helper macro for write operations that converts formatting errors
macro_rules! write_out {
    ($dst:expr, $($arg:tt)*) => {
        write!($dst, $($arg)*).map_err(ModGraphError::from)
    };
}

pub(crate) use write_out;

/// Turns a resolved module graph into diagram source text
pub trait DiagramRenderer {
    /// Style attributes formatted for this grammar
    fn style_map(&self, document: Option<&StyleDocument>) -> StyleMap;

    /// Render `module` with its namespace `tree`. Rendering has no side
    /// effects, so identical inputs always produce identical text.
    fn create(
        &self,
        module: &Module,
        tree: &PathNode,
        style: &StyleMap,
    ) -> Result<String, ModGraphError>;
}

/// Diagram grammar to emit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum OutputFormat {
    /// Graphviz DOT
    #[value(alias = "graphviz")]
    Dot,
    /// Mermaid flowchart
    Mermaid,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Mermaid => "mermaid",
        }
    }

    /// Extension of the files diagrams in this format are written to
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Mermaid => "md",
        }
    }

    pub fn renderer(self) -> &'static dyn DiagramRenderer {
        match self {
            OutputFormat::Dot => &DotRenderer,
            OutputFormat::Mermaid => &MermaidRenderer,
        }
    }

    /// Format the style document for this grammar and render
    pub fn render(
        self,
        module: &Module,
        tree: &PathNode,
        style: Option<&StyleDocument>,
    ) -> Result<String, ModGraphError> {
        let renderer = self.renderer();
        let style = renderer.style_map(style);
        renderer.create(module, tree, &style)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ModGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            "mermaid" => Ok(OutputFormat::Mermaid),
            _ => Err(ModGraphError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Modules that emit an edge statement, in emission order.
///
/// Pre-order over `module` and its transitive dependencies, each module
/// visited once. An explicit stack keeps deep graphs off the call stack.
pub(crate) fn edge_groups(module: &Module) -> Vec<&Module> {
    let mut visited = HashSet::new();
    let mut stack = vec![module];
    let mut groups = Vec::new();

    while let Some(current) = stack.pop() {
        if !visited.insert(current.path.as_str()) {
            continue;
        }
        if current.dependencies.is_empty() {
            continue;
        }

        groups.push(current);
        stack.extend(current.dependencies.iter().rev().map(|d| &**d));
    }

    groups
}

pub(crate) fn indent(level: usize) -> String {
    "\t".repeat(level)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("dot".parse::<OutputFormat>().unwrap(), OutputFormat::Dot);
        assert_eq!("GraphViz".parse::<OutputFormat>().unwrap(), OutputFormat::Dot);
        assert_eq!(
            "mermaid".parse::<OutputFormat>().unwrap(),
            OutputFormat::Mermaid
        );

        match "svg".parse::<OutputFormat>() {
            Err(ModGraphError::UnsupportedFormat { format }) => assert_eq!(format, "svg"),
            other => panic!("Expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(OutputFormat::Dot.extension(), "dot");
        assert_eq!(OutputFormat::Mermaid.extension(), "md");
        assert_eq!(OutputFormat::Mermaid.to_string(), "mermaid");
    }

    #[test]
    fn test_edge_groups_visit_shared_modules_once() {
        let shared = Rc::new(Module::new(":shared", vec![Rc::new(Module::leaf(":leaf"))]));
        let left = Rc::new(Module::new(":left", vec![Rc::clone(&shared)]));
        let right = Rc::new(Module::new(":right", vec![Rc::clone(&shared)]));
        let app = Module::new(":app", vec![left, right]);

        let order: Vec<_> = edge_groups(&app).into_iter().map(Module::path).collect();

        assert_eq!(order, vec![":app", ":left", ":shared", ":right"]);
    }

    #[test]
    fn test_edge_groups_without_dependencies() {
        assert!(edge_groups(&Module::leaf(":app")).is_empty());
    }
}
