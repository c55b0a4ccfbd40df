//! ngenv: generate Angular environment files and register them in the build manifest.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    DescriptorAction, GenerateOptions, GenerateOutcome, ListFormat, ListOptions, ListOutcome,
    ManifestUpdate, detect_at, generate, generate_at, list, list_at,
};
pub use domain::{AppError, ProjectKind};
