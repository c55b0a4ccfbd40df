//! Tool configuration loading and effective-setting resolution.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::config::parse_config_content;
use crate::domain::paths::{DEFAULT_SOURCE_ROOT, legacy_manifest, modern_manifest, tool_config};
use crate::domain::{AppError, ProjectKind, ToolConfig};
use crate::ports::{ProjectFilesystem, Reporter};

use super::AppContext;
use super::manifest_store::{load_legacy_manifest, load_modern_manifest};

/// Load `.ngenv.toml` from `root`; absent file yields the defaults.
pub fn load_tool_config<F: ProjectFilesystem>(
    filesystem: &F,
    root: &Path,
) -> Result<ToolConfig, AppError> {
    let path = tool_config(root);
    if !filesystem.file_exists(&path) {
        return Ok(ToolConfig::default());
    }
    let content = filesystem.read_file(&path)?;
    let config = parse_config_content(&content)?;
    debug!(?config, "loaded tool config");
    Ok(config)
}

/// Project name from the CLI, else from `.ngenv.toml`.
pub fn effective_project<'a, F: ProjectFilesystem, R: Reporter>(
    ctx: &'a AppContext<F, R>,
    requested: Option<&'a str>,
) -> Option<&'a str> {
    requested.or(ctx.config().defaults.project.as_deref())
}

/// Absolute source root: CLI flag, then `.ngenv.toml`, then what the
/// manifest of `kind` declares, then `src`.
pub fn resolve_source_root<F: ProjectFilesystem, R: Reporter>(
    ctx: &AppContext<F, R>,
    kind: ProjectKind,
    requested: Option<&str>,
    project: Option<&str>,
) -> Result<PathBuf, AppError> {
    if let Some(explicit) = requested.or(ctx.config().defaults.source_root.as_deref()) {
        return Ok(ctx.root().join(explicit));
    }

    let fs = ctx.filesystem();
    let declared = match kind {
        ProjectKind::AngularModern if fs.file_exists(&modern_manifest(ctx.root())) => {
            let manifest = load_modern_manifest(ctx)?;
            Some(manifest.resolve_project(project)?.source_root)
        }
        ProjectKind::NgCliLegacy if fs.file_exists(&legacy_manifest(ctx.root())) => {
            Some(load_legacy_manifest(ctx)?.app_root()?)
        }
        _ => None,
    };

    let source_root = declared.unwrap_or_else(|| DEFAULT_SOURCE_ROOT.to_string());
    debug!(%source_root, "resolved source root");
    Ok(ctx.root().join(source_root))
}
