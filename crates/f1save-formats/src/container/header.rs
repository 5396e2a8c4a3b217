//! Size header structure
//!
//! The header is 16 bytes of little-endian u32 fields directly after the
//! signature gap:
//! - compressed payload size
//! - main database size
//! - first backup database size
//! - second backup database size

use super::segment::{SegmentKind, SegmentMap};
use crate::error::{ContainerError, ContainerResult};
use binrw::{BinRead, BinWrite};
use std::io::Cursor;

/// Size header preceding the compressed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[brw(little)]
pub struct SizeHeader {
    /// Length of the zlib stream in bytes
    pub compressed_size: u32,
    /// Decompressed length of the main database
    pub size_main: u32,
    /// Decompressed length of the first backup database
    pub size_backup1: u32,
    /// Decompressed length of the second backup database
    pub size_backup2: u32,
}

impl SizeHeader {
    /// Encoded header size in bytes
    pub const SIZE: usize = 16;

    /// Build a header for a compressed payload and the segments it holds
    pub fn for_segments(compressed_len: usize, segments: &SegmentMap) -> ContainerResult<Self> {
        Ok(Self {
            compressed_size: size_field("compressed payload", compressed_len)?,
            size_main: size_field("main", segments.len_of(SegmentKind::Main))?,
            size_backup1: size_field("backup1", segments.len_of(SegmentKind::Backup1))?,
            size_backup2: size_field("backup2", segments.len_of(SegmentKind::Backup2))?,
        })
    }

    /// Read the header at `offset` in `data`
    pub fn read_at(data: &[u8], offset: usize) -> ContainerResult<Self> {
        let available = data.len().saturating_sub(offset);
        if available < Self::SIZE {
            return Err(ContainerError::TruncatedHeader { offset, available });
        }

        let mut cursor = Cursor::new(&data[offset..offset + Self::SIZE]);
        Ok(Self::read(&mut cursor)?)
    }

    /// Encode the header
    pub fn to_bytes(&self) -> ContainerResult<[u8; Self::SIZE]> {
        let mut cursor = Cursor::new([0u8; Self::SIZE]);
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Declared decompressed size of one segment
    pub fn segment_size(&self, kind: SegmentKind) -> usize {
        match kind {
            SegmentKind::Main => self.size_main as usize,
            SegmentKind::Backup1 => self.size_backup1 as usize,
            SegmentKind::Backup2 => self.size_backup2 as usize,
        }
    }

    /// Sum of the declared segment sizes
    pub fn total_decompressed_size(&self) -> u64 {
        u64::from(self.size_main) + u64::from(self.size_backup1) + u64::from(self.size_backup2)
    }
}

fn size_field(field: &'static str, len: usize) -> ContainerResult<u32> {
    u32::try_from(len).map_err(|_| ContainerError::SegmentTooLarge { field, len })
}
