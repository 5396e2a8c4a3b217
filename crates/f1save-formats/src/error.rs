//! Container error types

use crate::container::{Part, SegmentKind};
use thiserror::Error;

/// Error produced while unpacking or repacking a save container
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The "None" signature preceding the size header is absent
    #[error("save signature not found in {len} bytes of input")]
    SignatureNotFound {
        /// Length of the searched buffer
        len: usize,
    },

    /// Fewer than 16 bytes follow the signature
    #[error("truncated size header at offset {offset}: need 16 bytes, {available} available")]
    TruncatedHeader {
        /// Offset where the header should start
        offset: usize,
        /// Bytes present from that offset to the end of input
        available: usize,
    },

    /// The decompressed payload ends before a declared segment does
    #[error(
        "payload too short for {segment}: need {required} bytes at offset {offset}, payload is {available} bytes"
    )]
    PayloadTooShort {
        /// Segment that could not be sliced
        segment: SegmentKind,
        /// Offset of the segment in the payload
        offset: usize,
        /// Declared segment size
        required: usize,
        /// Total decompressed payload size
        available: usize,
    },

    /// The zlib stream is malformed or ends early
    #[error("corrupt zlib stream: {0}")]
    CorruptStream(String),

    /// Repack was asked to run without a required part
    #[error("missing required part: {0}")]
    MissingRequiredPart(Part),

    /// Compression failed
    #[error("compression error: {0}")]
    Compression(String),

    /// A length does not fit its u32 header field
    #[error("{field} is {len} bytes, which does not fit a 32-bit size field")]
    SegmentTooLarge {
        /// Header field that overflowed
        field: &'static str,
        /// Offending length
        len: usize,
    },

    /// Decompression output exceeded the configured limit
    #[error("decompressed size exceeds limit of {limit} bytes")]
    DecompressionLimit {
        /// Limit in bytes
        limit: usize,
    },

    /// Binary parsing error
    #[error("binary parsing error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Result type for container operations
pub type ContainerResult<T> = Result<T, ContainerError>;
