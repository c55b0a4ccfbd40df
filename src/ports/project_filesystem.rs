//! Project-level filesystem operations.
//!
//! This port covers the file I/O the generator and patchers need. Dry-run
//! is decided by callers; implementations always perform what they are asked.

use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// Port for filesystem access scoped to a front-end project.
pub trait ProjectFilesystem {
    /// Read a file as UTF-8 text.
    fn read_file(&self, path: &Path) -> Result<String, AppError>;

    /// Write UTF-8 content to a file, creating parent directories as needed.
    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError>;

    /// Copy a file byte-for-byte, creating parent directories of `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), AppError>;

    /// Check whether a regular file exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// Check whether a path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// All regular files under `dir`, recursively, in no particular order.
    fn walk_files(&self, dir: &Path) -> Result<Vec<PathBuf>, AppError>;
}
