//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::PathBuf;

use crate::adapters::{ConsoleReporter, FilesystemStore};
use crate::app::config::load_tool_config;
use crate::app::detect::detect_project_kind;
use crate::app::{
    AppContext,
    commands::{generate, list},
};

pub use crate::app::commands::generate::{DescriptorAction, GenerateOptions, GenerateOutcome};
pub use crate::app::commands::list::{ListFormat, ListOptions, ListOutcome};
pub use crate::app::manifest_store::ManifestUpdate;
pub use crate::domain::{AppError, ProjectKind};

/// Create an `AppContext` for a project root, loading `.ngenv.toml` if present.
fn create_context(
    root: PathBuf,
) -> Result<AppContext<FilesystemStore, ConsoleReporter>, AppError> {
    let filesystem = FilesystemStore::new(root.clone());
    let config = load_tool_config(&filesystem, &root)?;
    Ok(AppContext::new(root, filesystem, ConsoleReporter::new(), config))
}

// =============================================================================
// Generate Command API
// =============================================================================

/// Generate an environment descriptor in the current directory.
pub fn generate(options: GenerateOptions) -> Result<GenerateOutcome, AppError> {
    generate_at(std::env::current_dir()?, options)
}

/// Generate an environment descriptor for the project at `root`.
pub fn generate_at(
    root: impl Into<PathBuf>,
    options: GenerateOptions,
) -> Result<GenerateOutcome, AppError> {
    let ctx = create_context(root.into())?;
    generate::execute(&ctx, options)
}

// =============================================================================
// List Command API
// =============================================================================

/// List descriptor files in the current directory.
pub fn list(options: ListOptions) -> Result<ListOutcome, AppError> {
    list_at(std::env::current_dir()?, options)
}

/// List descriptor files for the project at `root`.
pub fn list_at(root: impl Into<PathBuf>, options: ListOptions) -> Result<ListOutcome, AppError> {
    let ctx = create_context(root.into())?;
    list::execute(&ctx, options)
}

/// Classify the project at `root` without touching anything.
pub fn detect_at(root: impl Into<PathBuf>) -> ProjectKind {
    let root = root.into();
    detect_project_kind(&FilesystemStore::new(root.clone()), &root)
}
