//! Read-modify-write of build manifests.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::manifest::ManifestDocument;
use crate::domain::paths::{
    backup_path, descriptor_path, legacy_manifest, modern_manifest, to_slash_relative,
};
use crate::domain::{
    AppError, LegacyCliManifest, ReplacementChange, WorkspaceManifest, legacy_environment_path,
};
use crate::ports::{ProjectFilesystem, Reporter};

use super::{AppContext, WriteOptions};

/// Result of patching a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestUpdate {
    pub path: PathBuf,
    /// Whether the document differs from what was on disk.
    pub changed: bool,
    pub backup: Option<PathBuf>,
}

fn read_manifest<F: ProjectFilesystem, R: Reporter>(
    ctx: &AppContext<F, R>,
    path: &Path,
) -> Result<String, AppError> {
    if !ctx.filesystem().file_exists(path) {
        return Err(AppError::ManifestNotFound(path.to_path_buf()));
    }
    ctx.filesystem().read_file(path)
}

/// Load `angular.json` from the project root.
pub fn load_modern_manifest<F: ProjectFilesystem, R: Reporter>(
    ctx: &AppContext<F, R>,
) -> Result<WorkspaceManifest, AppError> {
    let path = modern_manifest(ctx.root());
    let content = read_manifest(ctx, &path)?;
    WorkspaceManifest::parse(path, &content)
}

/// Load `.angular-cli.json` from the project root.
pub fn load_legacy_manifest<F: ProjectFilesystem, R: Reporter>(
    ctx: &AppContext<F, R>,
) -> Result<LegacyCliManifest, AppError> {
    let path = legacy_manifest(ctx.root());
    let content = read_manifest(ctx, &path)?;
    LegacyCliManifest::parse(path, &content)
}

/// Register `env_name` in the modern manifest so that the root baseline
/// descriptor under `source_root` is replaced by `descriptor`.
pub fn update_modern_manifest<F: ProjectFilesystem, R: Reporter>(
    ctx: &AppContext<F, R>,
    project: Option<&str>,
    env_name: &str,
    source_root: &Path,
    descriptor: &Path,
    options: WriteOptions,
) -> Result<ManifestUpdate, AppError> {
    let path = modern_manifest(ctx.root());
    let original = read_manifest(ctx, &path)?;
    let mut manifest = WorkspaceManifest::parse(&path, &original)?;
    let info = manifest.resolve_project(project)?;

    let replace = to_slash_relative(&descriptor_path(source_root, None, None), ctx.root());
    let with = to_slash_relative(descriptor, ctx.root());
    let change = manifest.register_environment(&info, env_name, &replace, &with)?;
    debug!(project = %info.name, ?change, %replace, %with, "file replacement");

    match change {
        ReplacementChange::Appended => {
            ctx.reporter().info(&format!("Added fileReplacements entry for '{}'", env_name))
        }
        ReplacementChange::Updated => {
            ctx.reporter().info(&format!("Updated fileReplacements entry for '{}'", env_name))
        }
        ReplacementChange::Unchanged => {}
    }

    persist(ctx, &ManifestDocument::Modern(manifest), &original, options)
}

/// Register `env_name -> descriptor` on the first app of the legacy manifest.
pub fn update_legacy_manifest<F: ProjectFilesystem, R: Reporter>(
    ctx: &AppContext<F, R>,
    env_name: &str,
    descriptor: &Path,
    options: WriteOptions,
) -> Result<ManifestUpdate, AppError> {
    let path = legacy_manifest(ctx.root());
    let original = read_manifest(ctx, &path)?;
    let mut manifest = LegacyCliManifest::parse(&path, &original)?;

    let app_source_dir = ctx.root().join(manifest.app_root()?);
    let env_path = legacy_environment_path(descriptor, &app_source_dir);
    let previous = manifest.register_environment(env_name, &env_path)?;
    debug!(env_name, %env_path, ?previous, "legacy environment");

    persist(ctx, &ManifestDocument::Legacy(manifest), &original, options)
}

/// Write `document` back, backing up the current file first.
///
/// Nothing is written when the serialized document equals `original`.
fn persist<F: ProjectFilesystem, R: Reporter>(
    ctx: &AppContext<F, R>,
    document: &ManifestDocument,
    original: &str,
    options: WriteOptions,
) -> Result<ManifestUpdate, AppError> {
    let path = document.path().to_path_buf();
    let shown = ctx.display_path(&path);
    let content = document.to_pretty_string()?;

    if content == original {
        ctx.reporter().info(&format!("{} already up to date", shown));
        return Ok(ManifestUpdate { path, changed: false, backup: None });
    }

    if options.dry_run {
        ctx.reporter().info(&format!("[dry-run] would update {}", shown));
        return Ok(ManifestUpdate { path, changed: true, backup: None });
    }

    let fs = ctx.filesystem();
    let backup = if options.backup && fs.file_exists(&path) {
        let target = backup_path(&path, &backup_stamp());
        fs.copy_file(&path, &target)?;
        ctx.reporter().info(&format!("Backup written to {}", ctx.display_path(&target)));
        Some(target)
    } else {
        None
    };

    fs.write_file(&path, &content)?;
    info!(path = %path.display(), "manifest updated");
    ctx.reporter().success(&format!("Updated {}", shown));
    Ok(ManifestUpdate { path, changed: true, backup })
}

/// UTC ISO-8601 timestamp safe for file names.
fn backup_stamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string().replace([':', '.'], "-")
}
