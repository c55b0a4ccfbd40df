//! Project-kind detection from on-disk evidence.

use std::path::Path;

use tracing::debug;

use crate::domain::paths::{legacy_manifest, modern_manifest};
use crate::domain::{PackageManifest, ProjectKind, package::PACKAGE_JSON};
use crate::ports::ProjectFilesystem;

/// Classify the project at `root`. First match wins:
/// modern manifest, legacy manifest, `package.json` evidence, then the
/// modern default.
pub fn detect_project_kind<F: ProjectFilesystem>(filesystem: &F, root: &Path) -> ProjectKind {
    if filesystem.file_exists(&modern_manifest(root)) {
        debug!("detected angular.json");
        return ProjectKind::AngularModern;
    }
    if filesystem.file_exists(&legacy_manifest(root)) {
        debug!("detected .angular-cli.json");
        return ProjectKind::NgCliLegacy;
    }

    let package = read_package_manifest(filesystem, root);
    match package.infer_kind() {
        Some(kind) => {
            debug!(?kind, "inferred from package.json");
            kind
        }
        None => ProjectKind::AngularModern,
    }
}

fn read_package_manifest<F: ProjectFilesystem>(filesystem: &F, root: &Path) -> PackageManifest {
    let path = root.join(PACKAGE_JSON);
    if !filesystem.file_exists(&path) {
        return PackageManifest::default();
    }
    match filesystem.read_file(&path) {
        Ok(content) => PackageManifest::parse_lenient(&content),
        Err(err) => {
            debug!(error = %err, "package.json unreadable; treating as absent");
            PackageManifest::default()
        }
    }
}
