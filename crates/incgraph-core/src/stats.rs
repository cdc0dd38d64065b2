//! Per-project counters over a finished include graph

use crate::graph::ProjectResult;
use crate::model::FileKind;
use std::fmt;

/// Aggregated file and line counts for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectStats {
    pub source_files: usize,
    pub source_lines: usize,
    pub header_files: usize,
    pub header_lines: usize,
    pub not_found: usize,
}

impl ProjectStats {
    /// Walk every node of the arena once. Anything that is not a source
    /// counts as a header, including files that could not be located.
    pub fn collect(result: &ProjectResult) -> Self {
        let mut stats = ProjectStats::default();
        for node in result.graph.all_nodes() {
            if node.kind == FileKind::Source {
                stats.source_files += 1;
                stats.source_lines += node.line_count;
            } else {
                stats.header_files += 1;
                stats.header_lines += node.line_count;
            }
            if !node.found {
                stats.not_found += 1;
            }
        }
        stats
    }

    pub fn total_lines(&self) -> usize {
        self.source_lines + self.header_lines
    }

    pub fn average_source_lines(&self) -> f64 {
        ratio(self.source_lines, self.source_files)
    }

    pub fn average_header_lines(&self) -> f64 {
        ratio(self.header_lines, self.header_files)
    }

    /// Header lines per source line.
    pub fn header_source_ratio(&self) -> f64 {
        ratio(self.header_lines, self.source_lines)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

impl fmt::Display for ProjectStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\tSource files: {} - Lines of code: {} - Average lines of code per file: {:.3}",
            self.source_files,
            self.source_lines,
            self.average_source_lines()
        )?;
        writeln!(
            f,
            "\tHeader files: {} - Not found: {} - Lines of code: {} - Average lines of code per file: {:.3}",
            self.header_files,
            self.not_found,
            self.header_lines,
            self.average_header_lines()
        )?;
        write!(
            f,
            "\tTotal lines of code: {} - Number of lines ratio (header / source): {:.3}",
            self.total_lines(),
            self.header_source_ratio()
        )
    }
}
