//! Error types shared across the workspace

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the project configuration. All of them abort the
/// run before any graph work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("configuration file {} declares no project", .0.display())]
    NoProjects(PathBuf),

    #[error("project #{index} has an empty name")]
    UnnamedProject { index: usize },
}
