use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{object_entry, parse_object};
use crate::domain::AppError;
use crate::domain::paths::{DEFAULT_SOURCE_ROOT, ENVIRONMENTS_DIR, to_slash_relative};

/// Parsed `.angular-cli.json`.
#[derive(Debug, Clone)]
pub struct LegacyCliManifest {
    path: PathBuf,
    document: Value,
}

impl LegacyCliManifest {
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, AppError> {
        let path = path.into();
        let document = parse_object(&path, content)?;
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    fn first_app(&self) -> Result<&Value, AppError> {
        self.document
            .get("apps")
            .and_then(Value::as_array)
            .and_then(|apps| apps.first())
            .ok_or_else(|| AppError::NoApps(self.path.clone()))
    }

    /// `root` of the first app (its base source directory), default `src`.
    pub fn app_root(&self) -> Result<String, AppError> {
        let app = self.first_app()?;
        let root = app.get("root").and_then(Value::as_str).map(|r| r.trim_end_matches('/'));
        Ok(match root {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => DEFAULT_SOURCE_ROOT.to_string(),
        })
    }

    /// Upsert `environments[env_name] = env_path` on the first app.
    /// Returns the previous value, if any.
    pub fn register_environment(
        &mut self,
        env_name: &str,
        env_path: &str,
    ) -> Result<Option<String>, AppError> {
        let path = self.path.clone();
        let app = self
            .document
            .get_mut("apps")
            .and_then(Value::as_array_mut)
            .and_then(|apps| apps.first_mut())
            .ok_or_else(|| AppError::NoApps(path.clone()))?
            .as_object_mut()
            .ok_or_else(|| AppError::manifest_shape(&path, "first app is not an object"))?;

        let environments = object_entry(&path, app, "environments")?;
        let previous =
            environments.insert(env_name.to_string(), Value::String(env_path.to_string()));
        Ok(previous.and_then(|v| v.as_str().map(str::to_string)))
    }
}

/// Path to register for `descriptor`, relative to the app's source directory.
///
/// Anything that does not land under `environments/` collapses to
/// `environments/<file name>`.
pub fn legacy_environment_path(descriptor: &Path, app_source_dir: &Path) -> String {
    if descriptor.starts_with(app_source_dir) {
        let relative = to_slash_relative(descriptor, app_source_dir);
        if relative.starts_with(&format!("{}/", ENVIRONMENTS_DIR)) {
            return relative;
        }
    }
    let file_name =
        descriptor.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    format!("{}/{}", ENVIRONMENTS_DIR, file_name)
}
