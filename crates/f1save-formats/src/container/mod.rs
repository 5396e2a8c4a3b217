//! Save container format implementation
//!
//! A save is split into a preamble, which is carried byte for byte, and up to
//! three database segments recovered from the zlib payload. Repacking always
//! recompresses, so the rebuilt bytes can differ from the original in the
//! compressed region while the preamble and segment contents round-trip.

mod header;
mod repack;
mod segment;
mod unpack;

pub use header::SizeHeader;
pub use repack::repack;
pub use segment::{Part, SegmentKind, SegmentMap};
pub use unpack::{ContainerLayout, unpack};

pub use crate::error::{ContainerError, ContainerResult};

use crate::SaveFormat;

/// Preamble and database segments of one save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveContainer {
    /// Bytes up to the size header, copied verbatim
    pub preamble: Vec<u8>,
    /// Database segments present in the save
    pub segments: SegmentMap,
}

/// Outcome of unpacking, repacking and unpacking a save again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTripReport {
    /// Preamble survived unchanged
    pub preamble_matches: bool,
    /// Every segment survived unchanged
    pub segments_match: bool,
    /// Rebuilt save is byte-identical to the input
    pub bytes_identical: bool,
}

impl RoundTripReport {
    /// Whether the save's contents survive a repack
    ///
    /// Byte identity is not required since compressed output can vary
    /// between encoders.
    pub fn is_lossless(&self) -> bool {
        self.preamble_matches && self.segments_match
    }
}

impl SaveContainer {
    /// Create a container from its parts
    pub fn new(preamble: Vec<u8>, segments: SegmentMap) -> Self {
        Self { preamble, segments }
    }

    /// Borrow a segment
    pub fn segment(&self, kind: SegmentKind) -> Option<&[u8]> {
        self.segments.get(kind)
    }

    /// Unpack `data`, rebuild it, and compare the two
    pub fn verify_round_trip(data: &[u8]) -> ContainerResult<RoundTripReport> {
        let original = unpack(data)?;
        let rebuilt = original.build()?;
        let reparsed = unpack(&rebuilt)?;

        Ok(RoundTripReport {
            preamble_matches: original.preamble == reparsed.preamble,
            segments_match: original.segments == reparsed.segments,
            bytes_identical: data == rebuilt.as_slice(),
        })
    }
}

impl SaveFormat for SaveContainer {
    type Error = ContainerError;

    fn parse(data: &[u8]) -> ContainerResult<Self> {
        unpack(data)
    }

    fn build(&self) -> ContainerResult<Vec<u8>> {
        repack(Some(&self.preamble), &self.segments)
    }
}
