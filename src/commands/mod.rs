//! CLI command implementations.
//!
//! Available commands:
//! - **migrate**: scaffold a Laravel project and convert a CodeIgniter project into it
//! - **detect**: print the CodeIgniter generation of a project
//! - **analyze**: inventory controllers, models, routes, libraries and helpers
//! - **init**: write a default configuration file

pub mod analyze;
pub mod detect;
pub mod init;
pub mod migrate;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use detect::detect_project;
pub use init::init_config;
pub use migrate::{handle_migrate, MigrateOptions};
