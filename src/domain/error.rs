use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for ngenv operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// A manifest file required by the action is absent.
    #[error("Manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// Manifest exists but is not valid JSON.
    #[error("Failed to parse {}: {details}", path.display())]
    ManifestParse { path: PathBuf, details: String },

    /// Manifest has a shape the patcher cannot address.
    #[error("Unexpected manifest shape in {}: {reason}", path.display())]
    ManifestShape { path: PathBuf, reason: String },

    /// Workspace manifest declares no projects.
    #[error("No projects declared in {}", .0.display())]
    NoProjects(PathBuf),

    /// Requested project is not declared in the workspace manifest.
    #[error("Project '{name}' not found. Available: {available}")]
    ProjectNotFound { name: String, available: String },

    /// Legacy manifest declares no apps.
    #[error("No apps declared in {}", .0.display())]
    NoApps(PathBuf),

    /// Path escapes the project root.
    #[error("Path escapes project root: {0}")]
    PathTraversal(String),

    /// Explicit env file does not exist.
    #[error("Env file not found: {}", .0.display())]
    EnvFileNotFound(PathBuf),

    /// Env file exists but could not be parsed.
    #[error("Failed to parse env file {}: {details}", path.display())]
    EnvFileParse { path: PathBuf, details: String },

    /// Environment name is empty or contains dots or path separators.
    #[error("Invalid environment name '{0}': must be non-empty with no dots or path separators")]
    InvalidEnvironmentName(String),

    /// Descriptor template failed to render.
    #[error("Template render error in '{template}': {reason}")]
    TemplateRender { template: String, reason: String },

    /// TOML parsing error.
    #[error("Invalid .ngenv.toml: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn manifest_shape<S: Into<String>>(path: impl Into<PathBuf>, reason: S) -> Self {
        AppError::ManifestShape { path: path.into(), reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_not_found_lists_available_names() {
        let err = AppError::ProjectNotFound { name: "web".into(), available: "app, admin".into() };
        assert_eq!(err.to_string(), "Project 'web' not found. Available: app, admin");
    }

    #[test]
    fn manifest_not_found_names_file() {
        let err = AppError::ManifestNotFound(PathBuf::from("/ws/angular.json"));
        assert_eq!(err.to_string(), "Manifest not found: /ws/angular.json");
    }
}
