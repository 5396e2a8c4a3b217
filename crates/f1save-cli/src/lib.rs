//! Unpack and repack F1 Manager save files.
//!
//! The container codec lives in `f1save-formats`. This crate adds the file
//! handling around it: the unpacked workspace directory, save backups, and
//! the `f1save` command line.

pub mod commands;
pub mod config;
pub mod workspace;

pub use config::{Cli, Commands, LogLevel};
