//! Save container repacking

use super::header::SizeHeader;
use super::segment::{Part, SegmentKind, SegmentMap};
use crate::compression;
use crate::error::{ContainerError, ContainerResult};
use tracing::{debug, trace};

/// Fuse a preamble and database segments into a save
///
/// The preamble and the main segment are required. Absent backups are
/// written as zero-length segments. Segments are concatenated in payload
/// order, compressed as one zlib stream, and prefixed with the size header.
pub fn repack(preamble: Option<&[u8]>, segments: &SegmentMap) -> ContainerResult<Vec<u8>> {
    let preamble = preamble.ok_or(ContainerError::MissingRequiredPart(Part::Preamble))?;
    if !segments.contains(SegmentKind::Main) {
        return Err(ContainerError::MissingRequiredPart(Part::Segment(
            SegmentKind::Main,
        )));
    }

    let mut payload = Vec::with_capacity(segments.total_len());
    for kind in SegmentKind::ALL {
        let data = segments.get(kind).unwrap_or_default();
        trace!("{kind}: {} bytes", data.len());
        payload.extend_from_slice(data);
    }

    let compressed = compression::compress(&payload)?;
    let header = SizeHeader::for_segments(compressed.len(), segments)?;
    debug!(
        "Compressed database data of size {} to {}",
        payload.len(),
        compressed.len()
    );

    let mut output = Vec::with_capacity(preamble.len() + SizeHeader::SIZE + compressed.len());
    output.extend_from_slice(preamble);
    output.extend_from_slice(&header.to_bytes()?);
    output.extend_from_slice(&compressed);

    debug!("New save data generated, size = {}", output.len());
    Ok(output)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn main_only(data: &[u8]) -> SegmentMap {
        let mut segments = SegmentMap::new();
        segments.insert(SegmentKind::Main, data.to_vec());
        segments
    }

    #[test]
    fn test_repack_layout() {
        let preamble = [0x10u8, 0x20, 0x30];
        let output = repack(Some(&preamble), &main_only(b"database")).expect("repack");

        assert_eq!(&output[..3], &preamble);
        let header = SizeHeader::read_at(&output, 3).expect("header");
        assert_eq!(header.compressed_size as usize, output.len() - 3 - 16);
        assert_eq!(header.size_main, 8);
        assert_eq!(header.size_backup1, 0);
        assert_eq!(header.size_backup2, 0);

        let payload = compression::decompress(&output[19..]).expect("decompress");
        assert_eq!(payload, b"database");
    }

    #[test]
    fn test_repack_concatenates_in_order() {
        let mut segments = main_only(b"AAA");
        segments.insert(SegmentKind::Backup2, b"CC".to_vec());
        segments.insert(SegmentKind::Backup1, b"B".to_vec());

        let output = repack(Some(b""), &segments).expect("repack");
        let header = SizeHeader::read_at(&output, 0).expect("header");
        assert_eq!(
            (header.size_main, header.size_backup1, header.size_backup2),
            (3, 1, 2)
        );
        let payload = compression::decompress(&output[16..]).expect("decompress");
        assert_eq!(payload, b"AAABCC");
    }

    #[test]
    fn test_missing_main() {
        let mut segments = SegmentMap::new();
        segments.insert(SegmentKind::Backup1, b"backup".to_vec());
        let err = repack(Some(b"pre"), &segments).expect_err("no main");
        assert!(matches!(
            err,
            ContainerError::MissingRequiredPart(Part::Segment(SegmentKind::Main))
        ));
        assert!(err.to_string().contains("main"));
    }

    #[test]
    fn test_missing_preamble() {
        let err = repack(None, &main_only(b"db")).expect_err("no preamble");
        assert!(matches!(
            err,
            ContainerError::MissingRequiredPart(Part::Preamble)
        ));
    }

    #[test]
    fn test_empty_main_is_present() {
        let output = repack(Some(b"p"), &main_only(&[])).expect("repack");
        let header = SizeHeader::read_at(&output, 1).expect("header");
        assert_eq!(header.size_main, 0);
        assert!(compression::decompress(&output[17..]).expect("decompress").is_empty());
    }
}
