//! `ProjectFilesystem` implementation for `FilesystemStore`.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::AppError;
use crate::ports::ProjectFilesystem;

use super::FilesystemStore;

impl ProjectFilesystem for FilesystemStore {
    fn read_file(&self, path: &Path) -> Result<String, AppError> {
        let full_path = self.resolve_within_root(path)?;
        fs::read_to_string(full_path).map_err(AppError::from)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let full_path = self.resolve_within_root(path)?;
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full_path, content).map_err(AppError::from)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), AppError> {
        let from = self.resolve_within_root(from)?;
        let to = self.resolve_within_root(to)?;
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(from, to)?;
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.resolve_within_root(path).is_ok_and(|p| p.is_file())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve_within_root(path).is_ok_and(|p| p.is_dir())
    }

    fn walk_files(&self, dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        let full_path = self.resolve_within_root(dir)?;
        let mut files = Vec::new();
        for entry in WalkDir::new(&full_path).follow_links(false) {
            let entry = entry.map_err(|e| AppError::Io(e.into()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}
