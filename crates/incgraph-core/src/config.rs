//! Project configuration loaded from a TOML file
//!
//! ```toml
//! [settings]
//! max_include_depth = 512
//! renderer = "dot"
//! image_format = "png"
//!
//! [[project]]
//! name = "engine"
//! source_directories = ["sources"]
//! include_directories = ["dependencies/glm"]
//! output_folder = "results"
//! ```
//!
//! Relative directories are resolved against the directory holding the
//! configuration file.

use crate::error::ConfigError;
use crate::paths;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 512;
pub const DEFAULT_RENDERER: &str = "dot";
pub const DEFAULT_IMAGE_FORMAT: &str = "png";

/// One project whose include graph gets built. Directories are absolute and
/// normalized once loaded through [`Configuration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub source_directories: Vec<PathBuf>,
    pub include_directories: Vec<PathBuf>,
    pub output_folder: PathBuf,
}

/// Run-wide knobs shared by every project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Files nested deeper than this are linked but not expanded.
    pub max_include_depth: usize,
    /// Graphviz executable.
    pub renderer: String,
    pub image_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            renderer: DEFAULT_RENDERER.to_string(),
            image_format: DEFAULT_IMAGE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfiguration {
    #[serde(default)]
    settings: Settings,
    #[serde(default, rename = "project")]
    projects: Vec<RawProject>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProject {
    name: String,
    #[serde(default)]
    source_directories: Vec<PathBuf>,
    #[serde(default)]
    include_directories: Vec<PathBuf>,
    #[serde(default = "default_output_folder")]
    output_folder: PathBuf,
}

fn default_output_folder() -> PathBuf {
    PathBuf::from(".")
}

/// The parsed configuration file.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub projects: Vec<Project>,
    pub settings: Settings,
    /// Path of the configuration file itself.
    pub file_path: PathBuf,
    /// Parent directory of the configuration file; relative paths hang off it.
    pub base_path: PathBuf,
}

impl Configuration {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse configuration text as if it had been read from `file_path`.
    pub fn parse(text: &str, file_path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfiguration = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: file_path.to_path_buf(),
            source,
        })?;

        if raw.projects.is_empty() {
            return Err(ConfigError::NoProjects(file_path.to_path_buf()));
        }

        let base_path = base_path_of(file_path);
        tracing::debug!("Configuration base path: {}", base_path.display());

        let mut projects = Vec::with_capacity(raw.projects.len());
        for (index, raw) in raw.projects.into_iter().enumerate() {
            if raw.name.trim().is_empty() {
                return Err(ConfigError::UnnamedProject { index });
            }
            let resolve = |dirs: Vec<PathBuf>| -> Vec<PathBuf> {
                dirs.iter().map(|d| paths::absolutize(&base_path, d)).collect()
            };
            projects.push(Project {
                name: raw.name,
                source_directories: resolve(raw.source_directories),
                include_directories: resolve(raw.include_directories),
                output_folder: paths::absolutize(&base_path, &raw.output_folder),
            });
        }

        Ok(Configuration {
            projects,
            settings: raw.settings,
            file_path: file_path.to_path_buf(),
            base_path,
        })
    }
}

fn base_path_of(file_path: &Path) -> PathBuf {
    let parent = match file_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    match std::path::absolute(&parent) {
        Ok(abs) => paths::normalize(&abs),
        Err(e) => {
            tracing::warn!("Cannot make {} absolute: {}", parent.display(), e);
            paths::normalize(&parent)
        }
    }
}
