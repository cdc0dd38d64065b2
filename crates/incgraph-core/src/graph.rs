//! Node arena with a label index, plus the per-project build result

use crate::config::Project;
use crate::model::{FileNode, NodeId};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// The include graph of one project.
///
/// Nodes live in a vector addressed by [`NodeId`]; parent/child relations
/// are index lists on the nodes, so inclusion cycles are plain index cycles.
/// Exactly one node exists per label.
pub struct IncludeGraph {
    nodes: Vec<FileNode>,
    by_label: HashMap<String, NodeId>,
}

impl std::fmt::Debug for IncludeGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncludeGraph")
            .field("node_count", &self.nodes.len())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}

impl IncludeGraph {
    pub fn new() -> Self {
        IncludeGraph {
            nodes: Vec::new(),
            by_label: HashMap::new(),
        }
    }

    /// Register a node under `label` unless one already exists.
    ///
    /// Returns the node id and whether it was created by this call. `make`
    /// receives the id the new node will get and is only called on creation.
    pub fn insert_if_absent<F>(&mut self, label: &str, make: F) -> (NodeId, bool)
    where
        F: FnOnce(NodeId) -> FileNode,
    {
        if let Some(&id) = self.by_label.get(label) {
            return (id, false);
        }
        let id = NodeId(self.nodes.len());
        let mut node = make(id);
        node.id = id;
        node.label = label.to_string();
        self.by_label.insert(node.label.clone(), id);
        self.nodes.push(node);
        (id, true)
    }

    /// Record that `parent` includes `child` once more.
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        let child = &mut self.nodes[child.0];
        child.parents.push(parent);
        child.inbound_count += 1;
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&FileNode> {
        self.nodes.get(id.0)
    }

    /// Get a mutable node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut FileNode> {
        self.nodes.get_mut(id.0)
    }

    /// Find a node by its label.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of parent → child adjacencies, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.children.len()).sum()
    }

    /// Iterate over all nodes in creation order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.nodes.iter()
    }

    /// Clear the render markers so the graph can be walked again.
    pub fn reset_render_marks(&mut self) {
        for node in &mut self.nodes {
            node.visited_for_render = false;
        }
    }

    /// Groups of files that include each other, directly or transitively.
    ///
    /// Each group is sorted by label; groups are ordered by their first label.
    pub fn cycles(&self) -> Vec<Vec<NodeId>> {
        let mut pg: DiGraph<NodeId, ()> =
            DiGraph::with_capacity(self.nodes.len(), self.edge_count());
        for node in &self.nodes {
            pg.add_node(node.id);
        }
        for node in &self.nodes {
            for child in &node.children {
                pg.update_edge(NodeIndex::new(node.id.0), NodeIndex::new(child.0), ());
            }
        }

        let mut cycles: Vec<Vec<NodeId>> = tarjan_scc(&pg)
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => pg.contains_edge(*single, *single),
                _ => true,
            })
            .map(|component| {
                let mut ids: Vec<NodeId> = component.into_iter().map(|idx| pg[idx]).collect();
                ids.sort_by(|a, b| self.nodes[a.0].label.cmp(&self.nodes[b.0].label));
                ids
            })
            .collect();
        cycles.sort_by(|a, b| self.nodes[a[0].0].label.cmp(&self.nodes[b[0].0].label));
        cycles
    }
}

impl Default for IncludeGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything built for one project: its root source files and the
/// label-indexed arena owning every node.
#[derive(Debug)]
pub struct ProjectResult {
    pub project: Project,
    /// One per discovered source file, in directory-scan order.
    pub roots: Vec<NodeId>,
    pub graph: IncludeGraph,
}

impl ProjectResult {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            roots: Vec::new(),
            graph: IncludeGraph::new(),
        }
    }
}
