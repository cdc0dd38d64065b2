//! Core data structures for the include graph

use std::fmt;
use std::path::{Path, PathBuf};

/// Stable arena index of a node inside an [`IncludeGraph`](crate::IncludeGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Short identifier used in DOT output: base-26 over `a`-`z`,
    /// most significant letter first (0 → `a`, 25 → `z`, 26 → `ba`).
    pub fn dot_id(self) -> String {
        let mut seed = self.0;
        let mut letters = Vec::new();
        loop {
            letters.push(b'a' + (seed % 26) as u8);
            seed /= 26;
            if seed == 0 {
                break;
            }
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dot_id())
    }
}

/// What kind of file a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Source,
    Header,
    Unsupported,
}

impl FileKind {
    /// Classify a path by its (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_ascii_lowercase(),
            None => return FileKind::Unsupported,
        };
        match ext.as_str() {
            "c" | "cpp" | "cxx" => FileKind::Source,
            "h" | "hpp" | "hxx" | "inl" | "impl" => FileKind::Header,
            _ => FileKind::Unsupported,
        }
    }
}

/// Quoted (`"…"`) vs angle-bracket (`<…>`) include syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeKind {
    Local,
    External,
}

/// One `#include` directive, borrowing the literal from the file buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Include<'a> {
    pub kind: IncludeKind,
    pub literal: &'a str,
}

/// A single file in the include graph.
#[derive(Debug, Clone, PartialEq)]
pub struct FileNode {
    pub id: NodeId,
    /// Directory-anchored dedup key, also the display name.
    pub label: String,
    pub resolved_path: PathBuf,
    pub kind: FileKind,
    /// Whether the file was located on disk. Never changes after creation.
    pub found: bool,
    pub inbound_count: usize,
    pub line_count: usize,
    pub parents: Vec<NodeId>,
    /// First-discovery order, repeated when a parent includes a file twice.
    pub children: Vec<NodeId>,
    pub visited_for_render: bool,
}

impl FileNode {
    pub fn new(
        id: NodeId,
        label: String,
        resolved_path: PathBuf,
        kind: FileKind,
        found: bool,
    ) -> Self {
        Self {
            id,
            label,
            resolved_path,
            kind,
            found,
            inbound_count: 0,
            line_count: 0,
            parents: Vec::new(),
            children: Vec::new(),
            visited_for_render: false,
        }
    }
}
