//! Save container unpacking

use super::header::SizeHeader;
use super::segment::{SegmentKind, SegmentMap};
use super::SaveContainer;
use crate::compression;
use crate::error::{ContainerError, ContainerResult};
use crate::signature;
use tracing::{debug, trace, warn};

/// Parsed view of a container before its payload is split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLayout {
    /// Offset of the size header, which is also the preamble length
    pub database_offset: usize,
    /// Decoded size header
    pub header: SizeHeader,
    /// Bytes present after the header
    pub payload_len: usize,
}

impl ContainerLayout {
    /// Locate the size header and decode it without inflating the payload
    pub fn read(data: &[u8]) -> ContainerResult<Self> {
        let database_offset = signature::database_offset(data)
            .ok_or(ContainerError::SignatureNotFound { len: data.len() })?;
        debug!("database_offset = {database_offset}");

        let header = SizeHeader::read_at(data, database_offset)?;
        debug!(
            "compressed_size = {}, main = {}, backup1 = {}, backup2 = {}",
            header.compressed_size, header.size_main, header.size_backup1, header.size_backup2
        );

        Ok(Self {
            database_offset,
            header,
            payload_len: data.len() - database_offset - SizeHeader::SIZE,
        })
    }

    /// Offset of the first compressed byte
    pub fn payload_offset(&self) -> usize {
        self.database_offset + SizeHeader::SIZE
    }
}

/// Split a save into its preamble and database segments
///
/// Segments with a declared size of zero are left out of the result.
pub fn unpack(data: &[u8]) -> ContainerResult<SaveContainer> {
    debug!("Unpacking {} bytes", data.len());
    let layout = ContainerLayout::read(data)?;

    if layout.header.compressed_size as usize != layout.payload_len {
        warn!(
            "header declares {} compressed bytes but {} follow it",
            layout.header.compressed_size, layout.payload_len
        );
    }

    let preamble = data[..layout.database_offset].to_vec();
    let payload = compression::decompress(&data[layout.payload_offset()..])?;
    debug!("database decompressed, size = {}", payload.len());

    let segments = split_payload(&payload, &layout.header)?;
    Ok(SaveContainer { preamble, segments })
}

/// Slice the decompressed payload into segments in payload order
fn split_payload(payload: &[u8], header: &SizeHeader) -> ContainerResult<SegmentMap> {
    let mut segments = SegmentMap::new();
    let mut offset = 0usize;

    for kind in SegmentKind::ALL {
        let size = header.segment_size(kind);
        if size == 0 {
            trace!("{kind} absent");
            continue;
        }

        let end = offset
            .checked_add(size)
            .filter(|end| *end <= payload.len())
            .ok_or(ContainerError::PayloadTooShort {
                segment: kind,
                offset,
                required: size,
                available: payload.len(),
            })?;

        debug!("{kind}: {size} bytes at payload offset {offset}");
        segments.insert(kind, payload[offset..end].to_vec());
        offset = end;
    }

    if offset < payload.len() {
        warn!(
            "{} decompressed bytes beyond the declared segments are dropped",
            payload.len() - offset
        );
    }

    Ok(segments)
}
