use crate::workspace;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where `repack` writes its output
pub fn target_path(save: &Path, overwrite: bool, output: Option<PathBuf>) -> PathBuf {
    match output {
        Some(path) => path,
        None if overwrite => save.to_path_buf(),
        None => workspace::repacked_path(save),
    }
}

pub fn handle(save: &Path, work_dir: &Path, overwrite: bool, output: Option<PathBuf>) -> Result<()> {
    let target = target_path(save, overwrite, output);
    debug!("Repacking save file to {}", target.display());

    let parts = workspace::read_unpacked(work_dir)?;
    let data = parts
        .repack()
        .with_context(|| format!("failed to repack {}", work_dir.display()))?;
    workspace::replace_file(&target, &data)?;

    println!("Save file repacked to {}", target.display());
    Ok(())
}
