//! Per-project pipeline: build, write DOT, report, render

use anyhow::Context;
use incgraph_core::{Configuration, ProjectResult, ProjectStats};
use incgraph_indexer::{GraphBuilder, IndexError};
use incgraph_render::{Graphviz, tool::INSTALL_HINT, write_dot};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

pub struct RunOptions {
    pub render_images: bool,
    pub jobs: Option<usize>,
}

/// Process every project of the configuration.
///
/// Only an unusable configuration is an error; a project that cannot be
/// built or written is logged and the others still run.
pub fn run(config_path: &Path, options: &RunOptions) -> anyhow::Result<()> {
    let configuration = Configuration::load(config_path)
        .with_context(|| format!("Cannot use configuration {}", config_path.display()))?;

    tracing::info!(
        "Loaded {} project(s) from {}",
        configuration.projects.len(),
        configuration.file_path.display()
    );

    let started = Instant::now();
    let outcomes = build_all(&configuration, options.jobs);
    tracing::debug!("Built all graphs in {:.3}s", started.elapsed().as_secs_f64());

    let graphviz = options
        .render_images
        .then(|| Graphviz::from_settings(&configuration.settings));

    for (project, outcome) in configuration.projects.iter().zip(outcomes) {
        println!("Project: {}", project.name);
        match outcome {
            Ok(mut result) => report(&mut result, graphviz.as_ref()),
            Err(e) => tracing::error!("Project {}: {}", project.name, e),
        }
        println!();
    }

    Ok(())
}

/// Build every project graph, in parallel, keeping configuration order.
fn build_all(
    configuration: &Configuration,
    jobs: Option<usize>,
) -> Vec<Result<ProjectResult, IndexError>> {
    let build = || {
        configuration
            .projects
            .par_iter()
            .map(|project| GraphBuilder::new(project, &configuration.settings).build())
            .collect::<Vec<_>>()
    };

    let Some(threads) = jobs else {
        return build();
    };
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(build),
        Err(e) => {
            tracing::warn!(
                "Cannot start {} worker threads ({}), using the global pool",
                threads,
                e
            );
            build()
        }
    }
}

fn report(result: &mut ProjectResult, graphviz: Option<&Graphviz>) {
    let started = Instant::now();
    let dot = match write_dot(result) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("Project {}: {}", result.project.name, e);
            return;
        }
    };
    let dot_time = started.elapsed();

    println!("{}", ProjectStats::collect(result));
    println!();
    println!("\tDot file generated in: {:.3}s", dot_time.as_secs_f64());

    for cycle in result.graph.cycles() {
        let labels: Vec<&str> = cycle
            .iter()
            .filter_map(|id| result.graph.node(*id))
            .map(|node| node.label.as_str())
            .collect();
        tracing::warn!("Inclusion cycle: {}", labels.join(", "));
    }

    let Some(graphviz) = graphviz else {
        return;
    };
    let started = Instant::now();
    match graphviz.render(&dot, &result.project) {
        Ok(image) => {
            println!("\tImage generated in: {:.3}s", started.elapsed().as_secs_f64());
            tracing::debug!("Wrote {}", image.display());
        }
        Err(e) => tracing::warn!("{}; {}", e, INSTALL_HINT),
    }
}
