//! Include literal → file on disk

use incgraph_core::Project;
use incgraph_core::paths::{anchored_label, dir_basename, normalize, relative_label, to_slash};
use std::path::{Path, PathBuf};

/// Outcome of resolving one include literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub resolved_path: PathBuf,
    /// Dedup key of the graph node.
    pub label: String,
    pub found: bool,
}

/// Looks include literals up the way the project describes: next to the
/// including file first, then in each source directory, then in each
/// include directory. The first regular file wins.
pub struct Resolver<'p> {
    project: &'p Project,
}

impl<'p> Resolver<'p> {
    pub fn new(project: &'p Project) -> Self {
        Self { project }
    }

    fn configured_directories(&self) -> impl Iterator<Item = &Path> + '_ {
        self.project
            .source_directories
            .iter()
            .chain(self.project.include_directories.iter())
            .map(PathBuf::as_path)
    }

    fn search_order<'s>(&'s self, including_dir: &'s Path) -> impl Iterator<Item = &'s Path> {
        std::iter::once(including_dir).chain(self.configured_directories())
    }

    pub fn resolve(&self, literal: &str, including_dir: &Path) -> Resolution {
        for directory in self.search_order(including_dir) {
            let candidate = normalize(&directory.join(literal));
            if candidate.is_file() {
                return Resolution {
                    label: self.label_for(&candidate, directory),
                    resolved_path: candidate,
                    found: true,
                };
            }
        }

        let literal = normalize(Path::new(literal));
        tracing::trace!("Include not found: {}", literal.display());
        Resolution {
            label: to_slash(&literal),
            resolved_path: literal,
            found: false,
        }
    }

    /// Label of a file on disk: `<anchor basename>/<path under anchor>`.
    ///
    /// The anchor is the first configured directory holding the file, so a
    /// header reached through different search paths keeps one label. Files
    /// outside every configured directory are anchored on `fallback`, the
    /// directory that produced the match, with `..` steps as needed.
    pub fn label_for(&self, path: &Path, fallback: &Path) -> String {
        self.configured_directories()
            .find_map(|anchor| anchored_label(anchor, path))
            .or_else(|| relative_label(fallback, path))
            .unwrap_or_else(|| dir_basename(path))
    }
}
