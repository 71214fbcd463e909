use std::fmt::Write;

use super::{DiagramRenderer, edge_groups, indent, write_out};
use crate::constants::diagram::{
    MERMAID_ARROW, MERMAID_GRAPH, MERMAID_INIT, MERMAID_MODULE_CLASS, MERMAID_NODE_SUFFIX,
    MERMAID_TARGET_CLASS,
};
use crate::core::{Module, normalize_id};
use crate::error::ModGraphError;
use crate::graph::PathNode;
use crate::style::{Section, StyleDocument, StyleMap};

/// Mermaid flowchart output
///
/// Module nodes are identified by their normalized path plus `_id`, so a
/// module never shares an identifier with the subgraph of its namespace.
/// A subgraph is identified by its namespace segments run together
/// (`:core:net` opens `corenet`), while its `style` line names only the
/// last segment.
/// When the target has more than one direct dependency, `linkStyle` lines
/// style its own edges with `directLink` and every other edge with `link`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRenderer;

impl DiagramRenderer for MermaidRenderer {
    fn style_map(&self, document: Option<&StyleDocument>) -> StyleMap {
        StyleMap::for_mermaid(document)
    }

    fn create(
        &self,
        module: &Module,
        tree: &PathNode,
        style: &StyleMap,
    ) -> Result<String, ModGraphError> {
        let mut out = String::new();

        write_out!(out, "{MERMAID_INIT}\n{MERMAID_GRAPH}")?;
        if let Some(attributes) = style.section(Section::Module) {
            write_out!(out, "\n\tclassDef {MERMAID_MODULE_CLASS} {attributes}")?;
        }
        if let Some(attributes) = style.section(Section::TargetModule) {
            write_out!(out, "\n\tclassDef {MERMAID_TARGET_CLASS} {attributes}")?;
        }
        write_out!(out, "\n")?;

        write_tree(&mut out, tree, None, "", 0, style)?;
        write_out!(out, "\n")?;

        let count = write_edges(&mut out, module, style)?;
        write_link_styles(&mut out, module.dependencies.len(), count, style)?;

        Ok(out)
    }
}

fn node_id(path: &str) -> String {
    format!("{}{MERMAID_NODE_SUFFIX}", normalize_id(path))
}

fn write_tree(
    out: &mut String,
    node: &PathNode,
    segment: Option<&str>,
    namespace: &str,
    level: usize,
    style: &StyleMap,
) -> Result<(), ModGraphError> {
    let subgraph = segment.filter(|_| node.has_children());

    if let Some(segment) = subgraph {
        write_out!(
            out,
            "\n\n{}subgraph {}[\"{segment}\"]",
            indent(level),
            normalize_id(namespace)
        )?;
        if let Some(attributes) = style.section(Section::Container) {
            write_out!(
                out,
                "\n{}style {} {attributes}\n",
                indent(level + 1),
                normalize_id(segment)
            )?;
        }
    }

    if let Some(path) = node.path() {
        let level = if node.has_children() { level + 1 } else { level };
        let (section, class) = if node.is_target() {
            (Section::TargetModule, MERMAID_TARGET_CLASS)
        } else {
            (Section::Module, MERMAID_MODULE_CLASS)
        };
        let id = node_id(path);

        write_out!(out, "\n{}{id}@{{", indent(level))?;
        if let Some(shape) = style.special(section) {
            write_out!(out, "shape: {shape}, ")?;
        }
        write_out!(out, "label: \"{path}\"}}")?;
        write_out!(out, "\n{}{id}:::{class}", indent(level))?;
    }

    for (child_segment, child) in node.children() {
        write_tree(
            out,
            child,
            Some(child_segment),
            &format!("{namespace}{child_segment}"),
            level + 1,
            style,
        )?;
    }

    if subgraph.is_some() {
        write_out!(out, "\n{}end", indent(level))?;
    }

    Ok(())
}

/// Writes every edge group and returns the number of edges written
fn write_edges(out: &mut String, module: &Module, style: &StyleMap) -> Result<usize, ModGraphError> {
    let mut count = 0;

    for group in edge_groups(module) {
        let section = if group.path == module.path {
            Section::DirectLink
        } else {
            Section::Link
        };
        let arrow = style.special(section).unwrap_or(MERMAID_ARROW);
        let targets = group
            .dependencies
            .iter()
            .map(|dependency| node_id(&dependency.path))
            .collect::<Vec<_>>()
            .join(" & ");

        write_out!(out, "\n{} {arrow} {targets}", node_id(&group.path))?;
        count += group.dependencies.len();
    }

    Ok(count)
}

/// Edge indices `0..direct` are the target's own edges. A diagram with
/// edges always ends the edge block with a newline.
fn write_link_styles(
    out: &mut String,
    direct: usize,
    count: usize,
    style: &StyleMap,
) -> Result<(), ModGraphError> {
    if count == 0 {
        return Ok(());
    }
    write_out!(out, "\n")?;

    if direct <= 1 {
        return Ok(());
    }
    if let Some(attributes) = style.section(Section::DirectLink) {
        write_out!(out, "\nlinkStyle {} {attributes}", indices(0, direct))?;
    }
    if count > direct
        && let Some(attributes) = style.section(Section::Link)
    {
        write_out!(out, "\nlinkStyle {} {attributes}", indices(direct, count))?;
    }
    Ok(())
}

fn indices(start: usize, end: usize) -> String {
    (start..end)
        .map(|index| index.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
