use std::fmt::Write;

use super::{DiagramRenderer, edge_groups, indent, write_out};
use crate::constants::diagram::DOT_CLUSTER_PREFIX;
use crate::core::{Module, normalize_id};
use crate::error::ModGraphError;
use crate::graph::PathNode;
use crate::style::{Section, StyleDocument, StyleMap};

/// Graphviz DOT output
///
/// ```text
/// digraph {
///     node [style="filled"];
///
///     ":app" [color="red"]
///
///     subgraph cluster_core {
///         label = "core";
///         tooltip = "core";
///
///         ":core:data"
///     }
///
///     ":app" -> {":core:data"} [color="red"]
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

impl DiagramRenderer for DotRenderer {
    fn style_map(&self, document: Option<&StyleDocument>) -> StyleMap {
        StyleMap::for_dot(document)
    }

    fn create(
        &self,
        module: &Module,
        tree: &PathNode,
        style: &StyleMap,
    ) -> Result<String, ModGraphError> {
        let mut out = String::new();

        write_out!(out, "digraph {{\n")?;
        write_defaults(&mut out, style)?;
        write_tree(
            &mut out,
            tree,
            None,
            0,
            style.section(Section::TargetModule),
        )?;
        write_out!(out, "\n")?;
        write_edges(&mut out, module, style.section(Section::DirectLink))?;
        write_out!(out, "\n}}")?;

        Ok(out)
    }
}

fn write_defaults(out: &mut String, style: &StyleMap) -> Result<(), ModGraphError> {
    if style.is_empty() {
        return Ok(());
    }
    for section in [Section::Container, Section::Module, Section::Link] {
        if let (Some(keyword), Some(attributes)) = (section.dot_keyword(), style.section(section))
        {
            write_out!(out, "\t{keyword} [{attributes}];\n")?;
        }
    }
    Ok(())
}

/// `segment` is `None` for the root, which never opens a cluster. Clusters
/// are named after their own segment only.
fn write_tree(
    out: &mut String,
    node: &PathNode,
    segment: Option<&str>,
    level: usize,
    target_style: Option<&str>,
) -> Result<(), ModGraphError> {
    let cluster = segment.filter(|_| node.has_children());

    if let Some(segment) = cluster {
        let inner = indent(level + 1);
        write_out!(
            out,
            "\n\n{}subgraph {DOT_CLUSTER_PREFIX}{} {{\n",
            indent(level),
            normalize_id(segment)
        )?;
        write_out!(out, "{inner}label = {};\n", quoted(segment))?;
        write_out!(out, "{inner}tooltip = {};\n", quoted(segment))?;
    }

    if let Some(path) = node.path() {
        let level = if node.has_children() { level + 1 } else { level };
        write_out!(out, "\n{}{}", indent(level), quoted(path))?;
        if node.is_target()
            && let Some(attributes) = target_style
        {
            write_out!(out, " [{attributes}]")?;
        }
    }

    for (child_segment, child) in node.children() {
        write_tree(
            out,
            child,
            Some(child_segment),
            level + 1,
            target_style,
        )?;
    }

    if cluster.is_some() {
        write_out!(out, "\n{}}}", indent(level))?;
    }

    Ok(())
}

fn write_edges(
    out: &mut String,
    module: &Module,
    direct_style: Option<&str>,
) -> Result<(), ModGraphError> {
    for (index, group) in edge_groups(module).into_iter().enumerate() {
        let targets = group
            .dependencies
            .iter()
            .map(|dependency| quoted(&dependency.path))
            .collect::<Vec<_>>()
            .join(" ");
        write_out!(out, "\n\t{} -> {{{targets}}}", quoted(&group.path))?;

        // Only the target's own edges are direct links
        if index == 0
            && group.path == module.path
            && let Some(attributes) = direct_style
        {
            write_out!(out, " [{attributes}]")?;
        }
    }
    Ok(())
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}
