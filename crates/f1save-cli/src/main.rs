//! `f1save` binary entry point.
//!
//! Parses arguments, initializes logging, and runs the chosen subcommand.

use anyhow::Result;
use clap::Parser;
use f1save_cli::{Cli, commands};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level when set
    let default_level = LevelFilter::from(Level::from(cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting f1save {}", env!("CARGO_PKG_VERSION"));
    commands::run(cli)
}
