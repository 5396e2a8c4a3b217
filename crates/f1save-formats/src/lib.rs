//! Container codec for F1 Manager save files
//!
#![allow(clippy::cast_possible_truncation)] // Header fields are u32 by format
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Format terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
//! A save file is an opaque preamble followed by a 16-byte size header and a
//! zlib stream holding up to three SQLite databases (the main database and two
//! backups). This crate splits a save into those parts and fuses them back
//! together.
//!
//! # Layout
//!
//! ```text
//! +-----------------------------+----------------------+--------------------+
//! | preamble (ends 4 bytes      | header (16 bytes LE) | zlib payload       |
//! | after the "None" signature) | compressed, main,    | main ++ b1 ++ b2   |
//! |                             | backup1, backup2     |                    |
//! +-----------------------------+----------------------+--------------------+
//! ```
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: [`container::unpack`] and [`container::repack`]
//!   are inverses for the preamble and segment bytes
//! - **No Interpretation**: the preamble and the databases are copied, never parsed
//! - **Typed Failures**: every malformed input maps to a distinct
//!   [`ContainerError`] variant
//!
//! # Example
//!
//! ```
//! use f1save_formats::container::{SaveContainer, SegmentKind, SegmentMap};
//! use f1save_formats::SaveFormat;
//! use f1save_formats::signature::SIGNATURE;
//!
//! let mut preamble = b"GVAS".to_vec();
//! preamble.extend_from_slice(&SIGNATURE);
//! preamble.extend_from_slice(&[0, 0, 0, 0]);
//!
//! let mut segments = SegmentMap::new();
//! segments.insert(SegmentKind::Main, b"SQLite format 3\0".to_vec());
//!
//! let save = SaveContainer::new(preamble, segments);
//! let bytes = save.build().expect("repack");
//! let parsed = SaveContainer::parse(&bytes).expect("unpack");
//! assert_eq!(parsed, save);
//! ```

#![warn(missing_docs)]

pub mod compression;
pub mod container;
pub mod error;
pub mod signature;

pub use container::SaveContainer;
pub use error::{ContainerError, ContainerResult};

/// Common trait for formats that can be parsed from and built to bytes
pub trait SaveFormat: Sized {
    /// Error produced by parsing and building
    type Error: std::error::Error;

    /// Parse from bytes
    fn parse(data: &[u8]) -> Result<Self, Self::Error>;

    /// Build to bytes
    fn build(&self) -> Result<Vec<u8>, Self::Error>;
}
