//! incgraph-core: include graph data model, configuration, and statistics

pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod paths;
pub mod stats;


#[cfg(test)]
pub mod test_utils;

pub use config::{Configuration, Project, Settings};
pub use error::ConfigError;
pub use graph::{IncludeGraph, ProjectResult};
pub use model::{FileKind, FileNode, Include, IncludeKind, NodeId};
pub use stats::ProjectStats;
