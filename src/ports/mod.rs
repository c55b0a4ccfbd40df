mod project_filesystem;
mod reporter;

pub use project_filesystem::ProjectFilesystem;
pub use reporter::Reporter;
