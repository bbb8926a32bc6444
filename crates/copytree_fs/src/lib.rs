//! `copytree_fs`:
//! Recursive directory copy for programs that need to snapshot or relocate
//! a directory's contents.
//!
//! Modules:
//! - `copy`   : copier value and depth-first traversal
//! - `spec`   : options, directory entries, errors
//! - `report` : end-of-run counters
//! - `util`   : filesystem primitives (stream copy, listing, stat, mkdir)
//!
//! ```no_run
//! use copytree_fs::{CopyError, copy_tree};
//!
//! match copy_tree("/srv/data", "/srv/data.snapshot") {
//!     Ok(()) => {}
//!     Err(CopyError::DirCreate { path, .. }) => eprintln!("{} already exists", path.display()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod copy;
pub mod report;
pub mod spec;
mod util;

pub use copy::{FsCopier, copy_file, copy_tree};
pub use report::{ReportCopy, ReportCopyBuilder};
pub use spec::{CopyError, N_BUFFER_BYTES_DEFAULT, SpecCopyOptions, SpecDirEntry};
