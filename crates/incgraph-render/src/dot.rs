//! Graphviz DOT writer
//!
//! Every root is walked depth-first. A node is described the first time it
//! is reached; the edges to its distinct children are written as the walk
//! enters them, so shared headers and cycles show up once with all their
//! edges.

use crate::error::RenderError;
use incgraph_core::{FileKind, FileNode, IncludeGraph, NodeId, Project, ProjectResult};
use std::fmt::Write;
use std::path::PathBuf;

/// `<output_folder>/<name>.dot`
pub fn dot_path(project: &Project) -> PathBuf {
    project.output_folder.join(format!("{}.dot", project.name))
}

/// Render the project graph and write it next to the other outputs.
pub fn write_dot(result: &mut ProjectResult) -> Result<PathBuf, RenderError> {
    let path = dot_path(&result.project);
    let folder = &result.project.output_folder;
    std::fs::create_dir_all(folder).map_err(|source| RenderError::Write {
        path: folder.clone(),
        source,
    })?;

    let text = render_dot(result);
    std::fs::write(&path, text).map_err(|source| RenderError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}

/// The DOT text of a project graph.
///
/// Uses the `visited_for_render` marks of the nodes; they are cleared first
/// so the graph can be rendered more than once.
pub fn render_dot(result: &mut ProjectResult) -> String {
    let graph = &mut result.graph;
    graph.reset_render_marks();

    let mut out = String::from("digraph {\n\trankdir = LR\n");
    // (node, index of the next child to follow)
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    for &root in &result.roots {
        enter(graph, root, &mut stack, &mut out);

        while let Some((parent, next)) = stack.last_mut() {
            let parent = *parent;
            let Some((child, repeated)) = graph.node(parent).and_then(|n| {
                let child = *n.children.get(*next)?;
                Some((child, n.children[..*next].contains(&child)))
            }) else {
                stack.pop();
                continue;
            };
            *next += 1;
            // one edge per distinct child, however many times it is included
            if repeated {
                continue;
            }

            let _ = writeln!(out, "\t{} -> {}", parent, child);
            enter(graph, child, &mut stack, &mut out);
        }
    }

    out.push_str("}\n");
    out
}

/// Describe `id` and schedule its children, unless it was already seen.
fn enter(graph: &mut IncludeGraph, id: NodeId, stack: &mut Vec<(NodeId, usize)>, out: &mut String) {
    let Some(node) = graph.node_mut(id) else {
        return;
    };
    if node.visited_for_render {
        return;
    }
    node.visited_for_render = true;

    let _ = writeln!(
        out,
        "\t{} [label=\"{}\" shape=box, style=filled, color={}, fillcolor={}]",
        node.id,
        node_label(node),
        if node.found { "black" } else { "red" },
        if node.kind == FileKind::Source { "lightseagreen" } else { "orange" },
    );
    stack.push((id, 0));
}

fn node_label(node: &FileNode) -> String {
    let mut label = String::new();
    if node.kind == FileKind::Header {
        // `\n` is a line break for Graphviz, not in the file.
        let _ = write!(label, "{}x\\n", node.inbound_count);
    }
    label.push_str(&escape(&node.label));
    if node.line_count > 0 {
        let _ = write!(label, " ({} loc)", node.line_count);
    }
    label
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
