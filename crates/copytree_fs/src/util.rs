use std::fs::{self, File, Metadata};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, trace};

use crate::spec::{CopyError, SpecDirEntry};

////////////////////////////////////////////////////////////////////////////////
// #region FileStreaming

/// Copy the bytes of `path_file_src` into a new or truncated `path_file_dst`.
///
/// The destination is flushed and synced before returning. Both handles are
/// dropped on every exit path. Returns the number of bytes streamed.
pub(crate) fn copy_file_stream(
    path_file_src: &Path,
    path_file_dst: &Path,
    n_buffer_bytes: usize,
) -> Result<u64, CopyError> {
    let mut file_src = File::open(path_file_src).map_err(|source| CopyError::Open {
        path: path_file_src.to_path_buf(),
        source,
    })?;
    let file_dst = File::create(path_file_dst).map_err(|source| CopyError::Create {
        path: path_file_dst.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::with_capacity(n_buffer_bytes, file_dst);
    let n_bytes = stream_and_flush(&mut file_src, &mut writer, path_file_dst)?;

    let file_dst = writer.into_inner().map_err(|e| CopyError::Close {
        path: path_file_dst.to_path_buf(),
        source: e.into_error(),
    })?;
    file_dst.sync_all().map_err(|source| CopyError::Close {
        path: path_file_dst.to_path_buf(),
        source,
    })?;

    trace!(
        "Copied {} -> {} ({n_bytes} bytes)",
        path_file_src.display(),
        path_file_dst.display()
    );
    Ok(n_bytes)
}

/// Stream every byte from `reader` into `writer`, then flush `writer`.
///
/// A stream failure returns immediately and the flush is never attempted.
fn stream_and_flush<R, W>(
    reader: &mut R,
    writer: &mut W,
    path_file_dst: &Path,
) -> Result<u64, CopyError>
where
    R: Read,
    W: Write,
{
    let n_bytes = io::copy(reader, writer).map_err(|source| CopyError::Copy {
        path: path_file_dst.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| CopyError::Close {
        path: path_file_dst.to_path_buf(),
        source,
    })?;
    Ok(n_bytes)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DirectoryPrimitives

/// List the immediate children of `path_dir`, sorted by name.
pub(crate) fn list_directory(path_dir: &Path) -> Result<Vec<SpecDirEntry>, CopyError> {
    let to_list_error = |source| CopyError::List {
        path: path_dir.to_path_buf(),
        source,
    };

    let mut l_entries = Vec::new();
    for entry_res in fs::read_dir(path_dir).map_err(to_list_error)? {
        let entry = entry_res.map_err(to_list_error)?;
        let cfg_file_type = entry.file_type().map_err(to_list_error)?;
        let if_is_dir =
            cfg_file_type.is_dir() || (cfg_file_type.is_symlink() && entry.path().is_dir());
        l_entries.push(SpecDirEntry {
            name: entry.file_name(),
            if_is_dir,
        });
    }
    l_entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(l_entries)
}

/// Create exactly one new directory. Fails if it already exists.
pub(crate) fn create_destination_dir(path_dir_dst: &Path) -> Result<(), CopyError> {
    fs::create_dir(path_dir_dst).map_err(|source| CopyError::DirCreate {
        path: path_dir_dst.to_path_buf(),
        source,
    })?;
    debug!("Created directory {}", path_dir_dst.display());
    Ok(())
}

/// Fresh stat of a source child, following symlinks.
pub(crate) fn stat_source_entry(path_src: &Path) -> Result<Metadata, CopyError> {
    fs::metadata(path_src).map_err(|source| CopyError::Stat {
        path: path_src.to_path_buf(),
        source,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
