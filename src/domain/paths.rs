//! Canonical locations of descriptor files and manifests.

use std::path::{Component, Path, PathBuf};

/// Modern workspace manifest.
pub const MODERN_MANIFEST: &str = "angular.json";
/// Pre-6 Angular CLI manifest.
pub const LEGACY_MANIFEST: &str = ".angular-cli.json";
/// Optional per-project tool configuration.
pub const TOOL_CONFIG: &str = ".ngenv.toml";

pub const ENVIRONMENTS_DIR: &str = "environments";
pub const BASE_DESCRIPTOR: &str = "environment.ts";
pub const PROD_ENV: &str = "prod";
pub const DEFAULT_SOURCE_ROOT: &str = "src";

// ── Descriptors ────────────────────────────────────────────────────────

/// `<source_root>/environments[/<folder>]`
///
/// Folder segments are joined one by one so that a folder with stray
/// separators never turns into an absolute path.
pub fn environments_dir(source_root: &Path, folder: Option<&str>) -> PathBuf {
    let mut dir = source_root.join(ENVIRONMENTS_DIR);
    if let Some(folder) = folder {
        let segments = folder.split(['/', '\\']).filter(|s| !matches!(*s, "" | "." | ".."));
        for segment in segments {
            dir.push(segment);
        }
    }
    dir
}

/// `environment.ts` or `environment.<name>.ts`
pub fn descriptor_file_name(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("environment.{}.ts", name),
        None => BASE_DESCRIPTOR.to_string(),
    }
}

/// Full descriptor path for `(source_root, name?, folder?)`.
pub fn descriptor_path(source_root: &Path, name: Option<&str>, folder: Option<&str>) -> PathBuf {
    environments_dir(source_root, folder).join(descriptor_file_name(name))
}

/// `<source_root>/env.<name>.js` for browser-global projects.
pub fn browser_global_path(source_root: &Path, name: &str) -> PathBuf {
    source_root.join(format!("env.{}.js", name))
}

// ── Manifests ──────────────────────────────────────────────────────────

pub fn modern_manifest(root: &Path) -> PathBuf {
    root.join(MODERN_MANIFEST)
}

pub fn legacy_manifest(root: &Path) -> PathBuf {
    root.join(LEGACY_MANIFEST)
}

pub fn tool_config(root: &Path) -> PathBuf {
    root.join(TOOL_CONFIG)
}

/// `<file>.bak.<stamp>` next to `file`.
pub fn backup_path(file: &Path, stamp: &str) -> PathBuf {
    let mut name = file.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".bak.{}", stamp));
    file.with_file_name(name)
}

/// Whether a file name is `environment.ts` or `environment.<suffix>.ts`
/// with a dot-free suffix.
pub fn is_descriptor_file_name(name: &str) -> bool {
    if name == BASE_DESCRIPTOR {
        return true;
    }
    name.strip_prefix("environment.")
        .and_then(|rest| rest.strip_suffix(".ts"))
        .is_some_and(|suffix| !suffix.is_empty() && !suffix.contains('.'))
}

/// `path` relative to `base`, always with forward slashes.
///
/// Paths outside `base` are returned unchanged (slash-normalized).
pub fn to_slash_relative(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    parts.join("/")
}
