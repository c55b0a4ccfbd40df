pub mod config;
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod package;
pub mod paths;
pub mod project_kind;
pub mod values;

pub use config::ToolConfig;
pub use error::AppError;
pub use manifest::{
    LegacyCliManifest, ManifestDocument, ProjectInfo, ReplacementChange, TargetsKey,
    WorkspaceManifest, legacy_environment_path,
};
pub use package::PackageManifest;
pub use project_kind::ProjectKind;
pub use values::{EnvironmentValues, Scalar, parse_pairs, parse_scalar, sanitize_folder};
