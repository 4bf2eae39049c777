//! The filesystem port used by the schema resolver
//!
//! Resolution only ever asks a handful of questions of the disk. Keeping them
//! behind a trait lets tests simulate directories that vanish mid-resolution
//! without touching a real filesystem.

use crate::{NormalizedPath, Result, io};

/// Read-only filesystem queries needed during schema resolution.
pub trait FileSystem {
    /// Whether `path` exists and is a directory.
    fn dir_exists(&self, path: &NormalizedPath) -> bool;

    /// Whether `path` exists and is a regular file.
    fn file_exists(&self, path: &NormalizedPath) -> bool;

    /// Whether any file below `dir` carries `extension` (without the dot).
    fn contains_files_with_extension(&self, dir: &NormalizedPath, extension: &str)
    -> Result<bool>;
}

/// [`FileSystem`] backed by the real operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn dir_exists(&self, path: &NormalizedPath) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &NormalizedPath) -> bool {
        path.is_file()
    }

    fn contains_files_with_extension(
        &self,
        dir: &NormalizedPath,
        extension: &str,
    ) -> Result<bool> {
        io::any_file_with_extension(dir, extension)
    }
}
