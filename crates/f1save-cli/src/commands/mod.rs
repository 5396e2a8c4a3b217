//! Subcommand handlers.

pub mod info;
pub mod repack;
pub mod unpack;
pub mod verify;

use crate::config::{Cli, Commands};
use anyhow::Result;

/// Run the selected subcommand
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Unpack { save, backup } => unpack::handle(&save, &cli.work_dir, backup),
        Commands::Repack {
            save,
            overwrite,
            output,
        } => repack::handle(&save, &cli.work_dir, overwrite, output),
        Commands::Info { save } => info::handle(&save),
        Commands::Verify { save } => verify::handle(&save),
    }
}
