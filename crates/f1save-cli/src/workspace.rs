//! Unpacked save workspace on disk.
//!
//! An unpacked save is a directory holding one file per part:
//!
//! ```text
//! unpacked_save/
//!   chunk1       preamble
//!   main.db      main database
//!   backup1.db   first backup (only if present)
//!   backup2.db   second backup (only if present)
//! ```
//!
//! Files are replaced by delete-then-write. A crash while writing can leave a
//! part missing or truncated.

use f1save_formats::container::{self, ContainerError, SaveContainer, SegmentKind, SegmentMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name of the preamble in a workspace
pub const PREAMBLE_FILE: &str = "chunk1";

/// Extension appended to a save when backing it up
pub const BACKUP_EXTENSION: &str = "bak";

/// Suffix of the default repack output, replacing the save's extension
pub const REPACKED_SUFFIX: &str = "repacked.sav";

/// Workspace errors.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The workspace directory does not exist
    #[error("cannot find unpacked save under {0}")]
    NotFound(PathBuf),

    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Container codec error
    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// Result type for workspace operations
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> WorkspaceError + '_ {
    move |source| WorkspaceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Parts read back from a workspace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnpackedParts {
    /// Preamble, if `chunk1` exists
    pub preamble: Option<Vec<u8>>,
    /// Segment files found
    pub segments: SegmentMap,
}

impl UnpackedParts {
    /// Repack the parts into save bytes
    pub fn repack(&self) -> WorkspaceResult<Vec<u8>> {
        Ok(container::repack(
            self.preamble.as_deref(),
            &self.segments,
        )?)
    }
}

/// Read a whole file
pub fn read_file(path: &Path) -> WorkspaceResult<Vec<u8>> {
    let data = fs::read(path).map_err(io_error(path))?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Replace `path` with `data`, removing any existing file first
pub fn replace_file(path: &Path, data: &[u8]) -> WorkspaceResult<()> {
    remove_if_exists(path)?;
    fs::write(path, data).map_err(io_error(path))?;
    debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn remove_if_exists(path: &Path) -> WorkspaceResult<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed existing {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error(path)(e)),
    }
}

fn read_optional(path: &Path) -> WorkspaceResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => {
            debug!("Read {} bytes from {}", data.len(), path.display());
            Ok(Some(data))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No {} found", path.display());
            Ok(None)
        }
        Err(e) => Err(io_error(path)(e)),
    }
}

/// Write an unpacked save into `dir`
///
/// Creates `dir` if needed. Segment files left over from an earlier unpack
/// are removed when the new save lacks that segment.
pub fn write_unpacked(dir: &Path, save: &SaveContainer) -> WorkspaceResult<()> {
    fs::create_dir_all(dir).map_err(io_error(dir))?;
    debug!("Writing unpacked save to {}", dir.display());

    replace_file(&dir.join(PREAMBLE_FILE), &save.preamble)?;
    for kind in SegmentKind::ALL {
        let path = dir.join(kind.file_name());
        match save.segment(kind) {
            Some(data) => replace_file(&path, data)?,
            None => remove_if_exists(&path)?,
        }
    }
    Ok(())
}

/// Read the parts of an unpacked save from `dir`
pub fn read_unpacked(dir: &Path) -> WorkspaceResult<UnpackedParts> {
    if !dir.is_dir() {
        return Err(WorkspaceError::NotFound(dir.to_path_buf()));
    }
    debug!("Unpacked save files found at {}", dir.display());

    let preamble = read_optional(&dir.join(PREAMBLE_FILE))?;
    let mut segments = SegmentMap::new();
    for kind in SegmentKind::ALL {
        if let Some(data) = read_optional(&dir.join(kind.file_name()))? {
            segments.insert(kind, data);
        }
    }

    Ok(UnpackedParts { preamble, segments })
}

/// Copy `save` to `<save>.bak`, replacing an older backup
pub fn backup_save(save: &Path) -> WorkspaceResult<PathBuf> {
    let mut name = save.as_os_str().to_owned();
    name.push(".");
    name.push(BACKUP_EXTENSION);
    let backup = PathBuf::from(name);

    remove_if_exists(&backup)?;
    fs::copy(save, &backup).map_err(io_error(save))?;
    debug!("Backed up {} to {}", save.display(), backup.display());
    Ok(backup)
}

/// Default repack target: `<stem>.repacked.sav` beside the save
pub fn repacked_path(save: &Path) -> PathBuf {
    let stem = save
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    save.with_file_name(format!("{stem}.{REPACKED_SUFFIX}"))
}
