use crate::workspace;
use anyhow::{Context, Result, bail};
use f1save_formats::SaveContainer;
use std::path::Path;
use tracing::info;

pub fn handle(save: &Path) -> Result<()> {
    let data = workspace::read_file(save)?;
    let report = SaveContainer::verify_round_trip(&data)
        .with_context(|| format!("failed to round-trip {}", save.display()))?;

    info!(
        "preamble_matches = {}, segments_match = {}, bytes_identical = {}",
        report.preamble_matches, report.segments_match, report.bytes_identical
    );

    if !report.is_lossless() {
        bail!("{} does not survive unpack and repack", save.display());
    }

    if report.bytes_identical {
        println!("{}: OK (byte-identical)", save.display());
    } else {
        println!("{}: OK (contents match, compressed bytes differ)", save.display());
    }
    Ok(())
}
