//! Named database segments

use std::collections::BTreeMap;
use std::fmt;

/// One of the databases packed into a save
///
/// Ordering follows the payload layout: main, then backup1, then backup2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentKind {
    /// Live career database
    Main,
    /// First backup database
    Backup1,
    /// Second backup database
    Backup2,
}

impl SegmentKind {
    /// All segments in payload order
    pub const ALL: [Self; 3] = [Self::Main, Self::Backup1, Self::Backup2];

    /// File name used for this segment in an unpacked workspace
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Main => "main.db",
            Self::Backup1 => "backup1.db",
            Self::Backup2 => "backup2.db",
        }
    }

    /// Short name of the segment
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Backup1 => "backup1",
            Self::Backup2 => "backup2",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A part needed to rebuild a save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// Leading bytes before the size header
    Preamble,
    /// A database segment
    Segment(SegmentKind),
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preamble => f.write_str("preamble"),
            Self::Segment(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

/// Segment buffers keyed by kind, iterated in payload order
///
/// A segment of length zero and an absent segment are treated alike: both
/// contribute nothing to the payload and are written as a zero size field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentMap {
    segments: BTreeMap<SegmentKind, Vec<u8>>,
}

impl SegmentMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a segment, returning the previous buffer for that kind
    pub fn insert(&mut self, kind: SegmentKind, data: Vec<u8>) -> Option<Vec<u8>> {
        self.segments.insert(kind, data)
    }

    /// Borrow a segment
    pub fn get(&self, kind: SegmentKind) -> Option<&[u8]> {
        self.segments.get(&kind).map(Vec::as_slice)
    }

    /// Whether a buffer is present for `kind`
    pub fn contains(&self, kind: SegmentKind) -> bool {
        self.segments.contains_key(&kind)
    }

    /// Length of a segment, zero when absent
    pub fn len_of(&self, kind: SegmentKind) -> usize {
        self.segments.get(&kind).map_or(0, Vec::len)
    }

    /// Number of segments present
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no segments are present
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate present segments in payload order
    pub fn iter(&self) -> impl Iterator<Item = (SegmentKind, &[u8])> {
        self.segments
            .iter()
            .map(|(kind, data)| (*kind, data.as_slice()))
    }

    /// Sum of all segment lengths
    pub fn total_len(&self) -> usize {
        self.segments.values().map(Vec::len).sum()
    }
}

impl FromIterator<(SegmentKind, Vec<u8>)> for SegmentMap {
    fn from_iter<I: IntoIterator<Item = (SegmentKind, Vec<u8>)>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
