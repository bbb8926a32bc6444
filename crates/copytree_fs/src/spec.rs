//! Copy options, directory entry model and the error taxonomy.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default write-buffer capacity for file streaming.
pub const N_BUFFER_BYTES_DEFAULT: usize = 64 * 1024;

////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Input options for [`crate::FsCopier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopyOptions {
    /// Write-buffer capacity used while streaming file bytes.
    ///
    /// `0` disables write buffering.
    pub n_buffer_bytes: usize,
}

impl Default for SpecCopyOptions {
    fn default() -> Self {
        Self {
            n_buffer_bytes: N_BUFFER_BYTES_DEFAULT,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Entries

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDirEntry {
    /// Child file name (no parent components).
    pub name: OsString,
    /// Kind reported by the listing. Classification uses a fresh stat instead.
    pub if_is_dir: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Errors returned by [`crate::copy_file`] and [`crate::copy_tree`].
///
/// Every variant names the path the failing filesystem call was applied to.
/// Errors raised inside nested directories reach the caller unchanged.
#[derive(Debug, Error)]
pub enum CopyError {
    /// Source file could not be opened for reading.
    #[error("Failed to open source file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Destination file could not be created.
    #[error("Failed to create destination file {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Byte stream failed mid-transfer.
    #[error("Failed to copy bytes into {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Flushing or syncing the destination failed after the stream finished.
    #[error("Failed to flush destination file {}: {source}", .path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Source directory could not be enumerated.
    #[error("Failed to list directory {}: {source}", .path.display())]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Destination directory could not be created.
    #[error("Failed to create destination directory {}: {source}", .path.display())]
    DirCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Source child could not be inspected.
    #[error("Failed to inspect {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    /// Path the failing filesystem call was applied to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. }
            | Self::Create { path, .. }
            | Self::Copy { path, .. }
            | Self::Close { path, .. }
            | Self::List { path, .. }
            | Self::DirCreate { path, .. }
            | Self::Stat { path, .. } => path,
        }
    }

    /// Underlying OS error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::Open { source, .. }
            | Self::Create { source, .. }
            | Self::Copy { source, .. }
            | Self::Close { source, .. }
            | Self::List { source, .. }
            | Self::DirCreate { source, .. }
            | Self::Stat { source, .. } => source,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
