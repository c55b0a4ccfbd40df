//! Build manifests of the two descriptor-based generations.
//!
//! Shape detection happens once, when a manifest is loaded; downstream code
//! works against [`ManifestDocument`] and never probes raw JSON itself.

mod legacy;
mod modern;

use std::path::Path;

use serde_json::{Map, Value};

pub use legacy::{LegacyCliManifest, legacy_environment_path};
pub use modern::{ProjectInfo, ReplacementChange, TargetsKey, WorkspaceManifest};

use super::AppError;

/// A parsed manifest of either generation.
#[derive(Debug, Clone)]
pub enum ManifestDocument {
    Modern(WorkspaceManifest),
    Legacy(LegacyCliManifest),
}

impl ManifestDocument {
    pub fn path(&self) -> &Path {
        match self {
            ManifestDocument::Modern(m) => m.path(),
            ManifestDocument::Legacy(m) => m.path(),
        }
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String, AppError> {
        let document = match self {
            ManifestDocument::Modern(m) => m.document(),
            ManifestDocument::Legacy(m) => m.document(),
        };
        let mut out = serde_json::to_string_pretty(document)?;
        out.push('\n');
        Ok(out)
    }
}

fn parse_object(path: &Path, content: &str) -> Result<Value, AppError> {
    let document: Value = serde_json::from_str(content).map_err(|e| AppError::ManifestParse {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    if !document.is_object() {
        return Err(AppError::manifest_shape(path, "top level is not an object"));
    }
    Ok(document)
}

/// `map[key]` as an object, inserting an empty one when absent.
fn object_entry<'a>(
    path: &Path,
    map: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>, AppError> {
    let entry = map.entry(key.to_string()).or_insert_with(|| Value::Object(Map::new()));
    if entry.is_null() {
        *entry = Value::Object(Map::new());
    }
    entry
        .as_object_mut()
        .ok_or_else(|| AppError::manifest_shape(path, format!("'{}' is not an object", key)))
}
