//! Liner Notes - music metadata from Wikipedia and Google pages.
//!
//! Extracts artist biographies, album track lists, album lists and lyrics
//! attribution from fetched (or snapshotted) HTML pages.

mod cli;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; records go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("liner_notes=info".parse()?))
        .init();

    cli::run_command(&args)
}
