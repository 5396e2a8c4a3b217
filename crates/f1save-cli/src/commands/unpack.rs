use crate::workspace;
use anyhow::{Context, Result};
use f1save_formats::{SaveContainer, SaveFormat};
use std::path::Path;
use tracing::{debug, info};

pub fn handle(save: &Path, work_dir: &Path, backup: bool) -> Result<()> {
    debug!(
        "Unpacking save file from {} to {}",
        save.display(),
        work_dir.display()
    );

    if backup {
        let backup_path = workspace::backup_save(save)
            .with_context(|| format!("failed to back up {}", save.display()))?;
        println!("Backup written to {}", backup_path.display());
    } else {
        debug!("Skipping backup");
    }

    let data = workspace::read_file(save)?;
    let container = SaveContainer::parse(&data)
        .with_context(|| format!("failed to unpack {}", save.display()))?;
    workspace::write_unpacked(work_dir, &container)?;

    for (kind, segment) in container.segments.iter() {
        info!("{kind}: {} bytes", segment.len());
    }
    println!(
        "Unpacked {} into {}",
        save.display(),
        work_dir.display()
    );
    Ok(())
}
