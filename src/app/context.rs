use std::path::{Path, PathBuf};

use crate::domain::ToolConfig;
use crate::ports::{ProjectFilesystem, Reporter};

/// Application context holding dependencies for command execution.
pub struct AppContext<F: ProjectFilesystem, R: Reporter> {
    root: PathBuf,
    filesystem: F,
    reporter: R,
    config: ToolConfig,
}

impl<F: ProjectFilesystem, R: Reporter> AppContext<F, R> {
    /// Create a new application context.
    pub fn new(root: PathBuf, filesystem: F, reporter: R, config: ToolConfig) -> Self {
        Self { root, filesystem, reporter, config }
    }

    /// Project root (the directory holding the manifest and `package.json`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filesystem(&self) -> &F {
        &self.filesystem
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Defaults from `.ngenv.toml`.
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Display `path` relative to the project root.
    pub fn display_path(&self, path: &Path) -> String {
        crate::domain::paths::to_slash_relative(path, &self.root)
    }
}

/// How mutations are carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Report every mutation without touching disk.
    pub dry_run: bool,
    /// Copy a manifest aside before rewriting it.
    pub backup: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { dry_run: false, backup: true }
    }
}
