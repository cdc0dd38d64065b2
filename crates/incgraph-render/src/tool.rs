//! Graphviz invocation

use crate::error::RenderError;
use incgraph_core::{Project, Settings};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const INSTALL_HINT: &str =
    "install Graphviz (https://graphviz.org/download/) and make sure its executable is on PATH";

/// The external program turning a DOT file into an image.
#[derive(Debug, Clone)]
pub struct Graphviz {
    program: String,
    format: String,
}

impl Graphviz {
    pub fn new(program: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            format: format.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.renderer.clone(), settings.image_format.clone())
    }

    /// `<output_folder>/<name>.<format>`
    pub fn image_path(&self, project: &Project) -> PathBuf {
        project
            .output_folder
            .join(format!("{}.{}", project.name, self.format))
    }

    /// Arguments passed to the program for one DOT file.
    pub fn arguments(&self, dot: &Path, image: &Path) -> Vec<std::ffi::OsString> {
        vec![
            dot.as_os_str().to_owned(),
            format!("-T{}", self.format).into(),
            "-o".into(),
            image.as_os_str().to_owned(),
        ]
    }

    /// Run the program on `dot`, blocking until it exits.
    pub fn render(&self, dot: &Path, project: &Project) -> Result<PathBuf, RenderError> {
        let image = self.image_path(project);
        tracing::debug!("Running {} on {}", self.program, dot.display());

        let output = Command::new(&self.program)
            .args(self.arguments(dot, &image))
            .output()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RenderError::ToolFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(image)
    }
}
