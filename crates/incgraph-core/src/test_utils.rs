//! Test utilities for incgraph-core

use crate::config::Project;
use crate::graph::IncludeGraph;
use crate::model::{FileKind, FileNode, NodeId};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary tree with the given `(relative path, content)` files.
pub fn create_tree(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    temp_dir
}

/// A project with no directories, for graphs assembled by hand.
pub fn empty_project(name: &str) -> Project {
    Project {
        name: name.to_string(),
        source_directories: Vec::new(),
        include_directories: Vec::new(),
        output_folder: PathBuf::from("."),
    }
}

/// Insert a node by label, returning its id.
pub fn add_file(graph: &mut IncludeGraph, label: &str, kind: FileKind, found: bool) -> NodeId {
    graph
        .insert_if_absent(label, |id| {
            FileNode::new(id, label.to_string(), PathBuf::from(label), kind, found)
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tree() {
        let temp_dir = create_tree(&[("src/main.cpp", "int main() {}"), ("include/a.h", "")]);
        let root = temp_dir.path();

        assert!(root.join("src/main.cpp").exists());
        assert!(root.join("include/a.h").exists());
    }
}
