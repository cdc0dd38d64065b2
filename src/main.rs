//! incgraph CLI entry point

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "incgraph")]
#[command(about = "Graph the #include dependencies of C and C++ projects", long_about = None)]
struct Cli {
    /// Project configuration file (TOML)
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Only write the DOT files, do not run Graphviz
    #[arg(long)]
    no_image: bool,

    /// Worker threads for building project graphs (defaults to one per core)
    #[arg(short, long)]
    jobs: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!("incgraph={}", log_level))
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(config) = cli.config else {
        eprintln!("Usage: incgraph [OPTIONS] <CONFIG>");
        eprintln!("A project configuration file is required.");
        return ExitCode::from(1);
    };

    tracing::debug!("incgraph v{}", env!("CARGO_PKG_VERSION"));

    let options = commands::RunOptions {
        render_images: !cli.no_image,
        jobs: cli.jobs,
    };
    match commands::run(&config, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}
