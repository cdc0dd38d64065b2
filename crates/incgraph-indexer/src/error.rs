//! Indexing errors

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort the build of one project. Unreadable files and
/// unresolved includes never end up here; they only mark graph nodes.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("unable to find the source directory {}", .0.display())]
    DirectoryMissing(PathBuf),
}
