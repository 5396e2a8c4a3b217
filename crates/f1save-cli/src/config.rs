//! Command-line configuration.
//!
//! Options can come from flags or environment variables:
//! - `--work-dir` / `F1SAVE_WORK_DIR`: unpacked save directory
//! - `--log-level` / `F1SAVE_LOG_LEVEL`: default log level, overridden by `RUST_LOG`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// Default directory for unpacked save parts
pub const DEFAULT_WORK_DIR: &str = "unpacked_save";

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(
    name = "f1save",
    about = "Unpack and repack F1 Manager save files",
    version,
    long_about = "Splits an F1 Manager save into its preamble and SQLite databases for editing, and packs edited databases back into a save."
)]
pub struct Cli {
    /// Set the logging level
    #[arg(
        short,
        long,
        value_enum,
        global = true,
        env = "F1SAVE_LOG_LEVEL",
        default_value = "info"
    )]
    pub log_level: LogLevel,

    /// Directory holding the unpacked save parts
    #[arg(
        short,
        long,
        global = true,
        env = "F1SAVE_WORK_DIR",
        default_value = DEFAULT_WORK_DIR
    )]
    pub work_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log levels accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split a save into the work directory
    Unpack {
        /// Save file to unpack
        save: PathBuf,

        /// Copy the save to `<save>.bak` first
        #[arg(short, long)]
        backup: bool,
    },

    /// Pack the work directory back into a save
    Repack {
        /// Save file the work directory was unpacked from
        save: PathBuf,

        /// Replace the original save instead of writing `<stem>.repacked.sav`
        #[arg(long, conflicts_with = "output")]
        overwrite: bool,

        /// Write the repacked save to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the layout of a save without writing anything
    Info {
        /// Save file to inspect
        save: PathBuf,
    },

    /// Check that a save survives unpack and repack
    Verify {
        /// Save file to check
        save: PathBuf,
    },
}
