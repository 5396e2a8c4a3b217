use crate::workspace;
use anyhow::{Context, Result};
use f1save_formats::container::{ContainerLayout, SegmentKind};
use std::path::Path;

pub fn handle(save: &Path) -> Result<()> {
    let data = workspace::read_file(save)?;
    let layout = ContainerLayout::read(&data)
        .with_context(|| format!("failed to read layout of {}", save.display()))?;
    let header = &layout.header;

    println!("{}", save.display());
    println!("  file size:        {}", data.len());
    println!("  preamble:         {} bytes", layout.database_offset);
    println!(
        "  compressed:       {} bytes (header), {} bytes (present)",
        header.compressed_size, layout.payload_len
    );
    for kind in SegmentKind::ALL {
        let size = header.segment_size(kind);
        if size == 0 {
            println!("  {:<17} absent", format!("{kind}:"));
        } else {
            println!("  {:<17} {size} bytes", format!("{kind}:"));
        }
    }
    println!(
        "  decompressed:     {} bytes",
        header.total_decompressed_size()
    );
    Ok(())
}
