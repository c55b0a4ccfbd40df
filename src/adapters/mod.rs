pub mod console_reporter;
pub mod env_file;
pub mod filesystem;

pub use console_reporter::ConsoleReporter;
pub use env_file::load_env_file;
pub use filesystem::FilesystemStore;
