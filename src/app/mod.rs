pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
mod context;
pub mod descriptors;
pub mod detect;
pub mod logging;
pub mod manifest_store;

pub use context::{AppContext, WriteOptions};
