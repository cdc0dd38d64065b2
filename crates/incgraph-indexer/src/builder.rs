//! Builds the include graph of a project
//!
//! Every source file found under the source directories becomes a root.
//! Files are expanded depth-first: read, lex, parse, resolve each include,
//! then descend into includes that were not seen before. A node is
//! registered before its own includes are looked at, so an inclusion cycle
//! ends as a back-edge to a node already in the graph.

use crate::directive::DirectiveParser;
use crate::error::IndexError;
use crate::lexer::Lexer;
use crate::resolver::{Resolution, Resolver};
use ignore::WalkBuilder;
use incgraph_core::paths::{normalize, to_slash};
use incgraph_core::{FileKind, FileNode, IncludeGraph, NodeId, Project, ProjectResult, Settings};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A file being expanded: its pending includes, already resolved.
struct Frame {
    node: NodeId,
    depth: usize,
    includes: std::vec::IntoIter<Resolution>,
}

pub struct GraphBuilder<'a> {
    project: &'a Project,
    settings: &'a Settings,
    resolver: Resolver<'a>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(project: &'a Project, settings: &'a Settings) -> Self {
        Self {
            project,
            settings,
            resolver: Resolver::new(project),
        }
    }

    pub fn build(&self) -> Result<ProjectResult, IndexError> {
        if let Some(missing) = self.project.source_directories.iter().find(|d| !d.is_dir()) {
            return Err(IndexError::DirectoryMissing(missing.clone()));
        }

        let mut result = ProjectResult::new(self.project.clone());
        let mut rooted = HashSet::new();

        for directory in &self.project.source_directories {
            tracing::debug!("Scanning source directory: {}", directory.display());

            for path in discover_sources(directory) {
                let (id, created) = self.register_root(&mut result.graph, &path, directory);
                if created {
                    self.expand(&mut result.graph, id);
                }
                if rooted.insert(id) {
                    result.roots.push(id);
                }
            }
        }

        tracing::info!(
            "Project {}: {} roots, {} files, {} inclusions",
            self.project.name,
            result.roots.len(),
            result.graph.node_count(),
            result.graph.edge_count()
        );
        Ok(result)
    }

    /// Find or create the root node of a source file.
    fn register_root(
        &self,
        graph: &mut IncludeGraph,
        path: &Path,
        directory: &Path,
    ) -> (NodeId, bool) {
        let mut label = self.resolver.label_for(path, directory);

        if let Some(existing) = graph.find(&label)
            && let Some(node) = graph.node_mut(existing)
        {
            if node.resolved_path.as_path() == path {
                // Already reached through an include, or listed twice.
                node.kind = FileKind::Source;
                return (existing, false);
            }
            let qualified = to_slash(path);
            tracing::warn!(
                "Label {} already used by {}, using {} for {}",
                label,
                node.resolved_path.display(),
                qualified,
                path.display()
            );
            label = qualified;
        }

        graph.insert_if_absent(&label, |id| {
            FileNode::new(id, String::new(), path.to_path_buf(), FileKind::Source, true)
        })
    }

    /// Expand `root` and everything it pulls in, depth-first.
    fn expand(&self, graph: &mut IncludeGraph, root: NodeId) {
        let mut stack = vec![self.open(graph, root, 0)];

        loop {
            let next = match stack.last_mut() {
                Some(frame) => frame.includes.next().map(|r| (frame.node, frame.depth + 1, r)),
                None => break,
            };
            let Some((parent, depth, resolution)) = next else {
                stack.pop();
                continue;
            };

            let (child, created) = graph.insert_if_absent(&resolution.label, |id| {
                FileNode::new(
                    id,
                    String::new(),
                    resolution.resolved_path.clone(),
                    FileKind::Header,
                    resolution.found,
                )
            });
            graph.link(parent, child);

            if !created || !resolution.found {
                continue;
            }
            if depth > self.settings.max_include_depth {
                tracing::warn!(
                    "Include depth {} exceeded at {}, not expanding it",
                    self.settings.max_include_depth,
                    resolution.resolved_path.display()
                );
                continue;
            }
            stack.push(self.open(graph, child, depth));
        }
    }

    /// Read and parse one file, resolving its includes.
    fn open(&self, graph: &mut IncludeGraph, id: NodeId, depth: usize) -> Frame {
        let Some(node) = graph.node_mut(id) else {
            return Frame {
                node: id,
                depth,
                includes: Vec::new().into_iter(),
            };
        };
        let path = node.resolved_path.clone();

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", path.display(), e);
                return Frame {
                    node: id,
                    depth,
                    includes: Vec::new().into_iter(),
                };
            }
        };
        let source = String::from_utf8_lossy(&bytes);
        let including_dir = path.parent().unwrap_or(Path::new(""));

        let mut parser = DirectiveParser::new(&source);
        let mut last_line = 0;
        for token in Lexer::new(&source) {
            last_line = token.line;
            parser.feed(&token);
        }
        node.line_count = last_line;

        let includes: Vec<Resolution> = parser
            .finish()
            .iter()
            .map(|include| self.resolver.resolve(include.literal, including_dir))
            .collect();
        tracing::debug!("{}: {} includes", path.display(), includes.len());

        Frame {
            node: id,
            depth,
            includes: includes.into_iter(),
        }
    }
}

/// Source files under `directory`, recursively, sorted by file name at each
/// level so the scan order does not depend on the filesystem.
pub fn discover_sources(directory: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(directory)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut sources = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Error walking {}: {}", directory.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        // Headers only show up as children of sources.
        if FileKind::from_path(entry.path()) == FileKind::Source {
            sources.push(normalize(entry.path()));
        }
    }
    sources
}
