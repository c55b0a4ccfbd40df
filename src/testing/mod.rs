//! Shared fixtures for unit tests.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::adapters::FilesystemStore;
use crate::app::AppContext;
use crate::domain::ToolConfig;
use crate::ports::Reporter;

/// Reporter that keeps every line as `"<level>: <message>"`.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    fn push(&self, level: &str, message: &str) {
        self.lines.borrow_mut().push(format!("{}: {}", level, message));
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push("info", message);
    }

    fn success(&self, message: &str) {
        self.push("success", message);
    }

    fn warn(&self, message: &str) {
        self.push("warn", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }

    fn item(&self, message: &str) {
        self.push("item", message);
    }

    fn raw(&self, message: &str) {
        self.push("raw", message);
    }
}

/// A throwaway project directory.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self { dir: TempDir::new().expect("failed to create temp dir") }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// `<root>/src`
    pub fn src(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        fs::write(path, content).expect("failed to write fixture");
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).expect("failed to read fixture")
    }

    pub fn context(&self) -> AppContext<FilesystemStore, RecordingReporter> {
        self.context_with(ToolConfig::default())
    }

    pub fn context_with(
        &self,
        config: ToolConfig,
    ) -> AppContext<FilesystemStore, RecordingReporter> {
        let root = self.root().to_path_buf();
        AppContext::new(root.clone(), FilesystemStore::new(root), RecordingReporter::new(), config)
    }
}
