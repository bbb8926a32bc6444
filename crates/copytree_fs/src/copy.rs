//! Directory tree traversal and copy orchestration.

use std::path::{Path, PathBuf};
use std::vec;

use log::{debug, trace, warn};

use crate::report::{ReportCopy, ReportCopyBuilder};
use crate::spec::{CopyError, SpecCopyOptions, SpecDirEntry};
use crate::util::{copy_file_stream, create_destination_dir, list_directory, stat_source_entry};

/// One directory level on the traversal stack.
#[derive(Debug)]
struct SpecCopyFrame {
    path_dir_src: PathBuf,
    path_dir_dst: PathBuf,
    iter_entries: vec::IntoIter<SpecDirEntry>,
}

impl SpecCopyFrame {
    /// List `path_dir_src`, then create `path_dir_dst`.
    ///
    /// Listing happens first so an unreadable source leaves no destination
    /// directory behind.
    fn open(
        path_dir_src: PathBuf,
        path_dir_dst: PathBuf,
        builder_cp_report: &mut ReportCopyBuilder,
    ) -> Result<Self, CopyError> {
        let l_entries = list_directory(&path_dir_src)?;
        create_destination_dir(&path_dir_dst)?;
        builder_cp_report.add_dir_created();
        Ok(Self {
            path_dir_src,
            path_dir_dst,
            iter_entries: l_entries.into_iter(),
        })
    }
}

/// Stateless copier for single files and whole directory trees.
///
/// Holds only immutable options, so one value may serve any number of
/// independent calls.
#[derive(Debug, Clone, Default)]
pub struct FsCopier {
    spec_cp_options: SpecCopyOptions,
}

impl FsCopier {
    /// Copier with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(spec_cp_options: SpecCopyOptions) -> Self {
        Self { spec_cp_options }
    }

    pub fn options(&self) -> &SpecCopyOptions {
        &self.spec_cp_options
    }

    /// Copy the bytes of one regular file to `file_destination`.
    ///
    /// The destination is created or truncated, then synced to stable storage
    /// before success is reported. A flush or sync failure is returned as
    /// [`CopyError::Close`] even when every byte was streamed.
    pub fn copy_file<P, Q>(&self, file_source: P, file_destination: Q) -> Result<(), CopyError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        copy_file_stream(
            file_source.as_ref(),
            file_destination.as_ref(),
            self.spec_cp_options.n_buffer_bytes,
        )?;
        Ok(())
    }

    /// Recursively copy `dir_source` into a new directory `dir_destination`.
    ///
    /// `dir_destination` must not exist; its parent must. Children are
    /// visited depth-first in name order. The first error is returned as-is
    /// and whatever was already copied stays in place.
    pub fn copy_tree<P, Q>(&self, dir_source: P, dir_destination: Q) -> Result<(), CopyError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        self.copy_tree_with_report(dir_source, dir_destination)?;
        Ok(())
    }

    /// Same as [`FsCopier::copy_tree`], returning run counters on success.
    pub fn copy_tree_with_report<P, Q>(
        &self,
        dir_source: P,
        dir_destination: Q,
    ) -> Result<ReportCopy, CopyError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let path_dir_src = dir_source.as_ref();
        let path_dir_dst = dir_destination.as_ref();
        debug!(
            "Copying tree {} -> {}",
            path_dir_src.display(),
            path_dir_dst.display()
        );

        let mut builder_cp_report = ReportCopyBuilder::default();
        if let Err(e) = self.walk_tree(path_dir_src, path_dir_dst, &mut builder_cp_report) {
            warn!(
                "Tree copy {} -> {} aborted: {e}",
                path_dir_src.display(),
                path_dir_dst.display()
            );
            return Err(e);
        }

        let report = builder_cp_report.build();
        debug!("{report}");
        Ok(report)
    }

    fn walk_tree(
        &self,
        path_dir_src: &Path,
        path_dir_dst: &Path,
        builder_cp_report: &mut ReportCopyBuilder,
    ) -> Result<(), CopyError> {
        let mut l_stack = vec![SpecCopyFrame::open(
            path_dir_src.to_path_buf(),
            path_dir_dst.to_path_buf(),
            builder_cp_report,
        )?];

        while let Some(spec_frame) = l_stack.last_mut() {
            let Some(spec_entry) = spec_frame.iter_entries.next() else {
                l_stack.pop();
                continue;
            };
            let path_src = spec_frame.path_dir_src.join(&spec_entry.name);
            let path_dst = spec_frame.path_dir_dst.join(&spec_entry.name);

            let meta_src = stat_source_entry(&path_src)?;
            if meta_src.is_dir() != spec_entry.if_is_dir {
                trace!("Entry changed kind since listing: {}", path_src.display());
            }

            if meta_src.is_dir() {
                let spec_frame_child = SpecCopyFrame::open(path_src, path_dst, builder_cp_report)?;
                l_stack.push(spec_frame_child);
            } else {
                let n_bytes =
                    copy_file_stream(&path_src, &path_dst, self.spec_cp_options.n_buffer_bytes)?;
                builder_cp_report.add_file_copied(n_bytes);
            }
        }
        Ok(())
    }
}

/// Copy one file with default options. See [`FsCopier::copy_file`].
pub fn copy_file<P, Q>(file_source: P, file_destination: Q) -> Result<(), CopyError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    FsCopier::new().copy_file(file_source, file_destination)
}

/// Copy a directory tree with default options. See [`FsCopier::copy_tree`].
pub fn copy_tree<P, Q>(dir_source: P, dir_destination: Q) -> Result<(), CopyError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    FsCopier::new().copy_tree(dir_source, dir_destination)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::{FsCopier, copy_file, copy_tree};
    use crate::spec::{CopyError, SpecCopyOptions};

    fn write_text(path: &Path, txt: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, txt).expect("write text");
    }

    fn read_text(path: &Path) -> String {
        std::fs::read_to_string(path).expect("read text")
    }

    #[test_log::test]
    fn copy_tree_smoke_basic() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");

        write_text(&src.join("root.txt"), "root");
        write_text(&src.join("a/file1.txt"), "a");
        write_text(&src.join("b/sub/file2.txt"), "b");

        copy_tree(&src, &dst).expect("copy tree");
        assert_eq!(read_text(&dst.join("root.txt")), "root");
        assert_eq!(read_text(&dst.join("a/file1.txt")), "a");
        assert_eq!(read_text(&dst.join("b/sub/file2.txt")), "b");
    }

    #[test_log::test]
    fn copy_tree_with_report_counts_entries() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");

        write_text(&src.join("a.txt"), "hello");
        write_text(&src.join("sub/b.txt"), "world!");
        std::fs::create_dir_all(src.join("sub/empty")).expect("mkdir");

        let report = FsCopier::new()
            .copy_tree_with_report(&src, &dst)
            .expect("copy tree");
        assert_eq!(report.cnt_dirs_created, 3);
        assert_eq!(report.cnt_files_copied, 2);
        assert_eq!(report.cnt_bytes_copied, 11);
        assert!(dst.join("sub/empty").is_dir());
    }

    #[test_log::test]
    fn copy_tree_small_buffer_works() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        let txt = "0123456789".repeat(1000);
        write_text(&src.join("big.txt"), &txt);

        let copier = FsCopier::with_options(SpecCopyOptions { n_buffer_bytes: 7 });
        assert_eq!(copier.options().n_buffer_bytes, 7);
        copier.copy_tree(&src, &dst).expect("copy tree");
        assert_eq!(read_text(&dst.join("big.txt")), txt);
    }

    #[test_log::test]
    fn copy_tree_existing_destination_rejected() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        write_text(&src.join("a.txt"), "new");
        write_text(&dst.join("a.txt"), "old");

        let err = copy_tree(&src, &dst).expect_err("destination exists");
        assert!(matches!(err, CopyError::DirCreate { .. }));
        assert_eq!(err.path(), dst.as_path());
        assert_eq!(read_text(&dst.join("a.txt")), "old");
    }

    #[test_log::test]
    fn copy_tree_missing_source_creates_nothing() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("missing");
        let dst = tmp.path().join("dst");

        let err = copy_tree(&src, &dst).expect_err("missing source");
        assert!(matches!(err, CopyError::List { .. }));
        assert!(!dst.exists());
    }

    #[test_log::test]
    fn copy_tree_source_is_file_is_list_error() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("file.txt");
        let dst = tmp.path().join("dst");
        write_text(&src, "x");

        let err = copy_tree(&src, &dst).expect_err("source is a file");
        assert!(matches!(err, CopyError::List { .. }));
        assert!(!dst.exists());
    }

    #[test_log::test]
    fn copy_tree_missing_destination_parent_is_dir_create_error() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        write_text(&src.join("a.txt"), "a");

        let err = copy_tree(&src, tmp.path().join("no/such/dst")).expect_err("parent missing");
        assert!(matches!(err, CopyError::DirCreate { .. }));
    }

    #[test_log::test]
    fn copy_file_overwrites_existing_destination() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("b.txt");
        write_text(&src, "short");
        write_text(&dst, "a much longer previous content");

        copy_file(&src, &dst).expect("copy file");
        assert_eq!(read_text(&dst), "short");
    }

    #[test_log::test]
    fn copy_file_missing_source_is_open_error() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("missing.txt");
        let dst = tmp.path().join("b.txt");

        let err = copy_file(&src, &dst).expect_err("missing source");
        assert!(matches!(err, CopyError::Open { .. }));
        assert_eq!(err.path(), src.as_path());
        assert!(!dst.exists());
    }

    #[test_log::test]
    fn copy_file_missing_parent_is_create_error() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("a.txt");
        write_text(&src, "a");
        let dst = tmp.path().join("no/parent/b.txt");

        let err = copy_file(&src, &dst).expect_err("parent missing");
        assert!(matches!(err, CopyError::Create { .. }));
        assert_eq!(err.path(), dst.as_path());
    }

    #[test_log::test]
    fn copy_file_onto_directory_is_create_error() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("a.txt");
        write_text(&src, "a");
        let dst = tmp.path().join("dir");
        std::fs::create_dir(&dst).expect("mkdir");

        let err = copy_file(&src, &dst).expect_err("destination is a directory");
        assert!(matches!(err, CopyError::Create { .. }));
    }
}
