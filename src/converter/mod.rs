//! Applies extracted CodeIgniter settings to a scaffolded Laravel project.

pub mod codeigniter;
pub mod db_patch;
pub mod driver;
pub mod env_patch;
pub mod updates;

pub use codeigniter::CodeIgniterConverter;
pub use db_patch::patch_driver_block;
pub use driver::LaravelDriver;
pub use env_patch::{apply_env_updates, format_env_value, set_env_value};
pub use updates::{build_database_updates, build_env_updates, EnvUpdates, HostPort};

use crate::core::context::ProjectContext;
use crate::core::errors::Result;
use crate::core::generation::Generation;

pub const DEFAULT_APP_ENV: &str = "local";
pub const DEFAULT_APP_NAME: &str = "Laravel Migration App";

/// Knobs that change how a conversion behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSettings {
    /// Abort when the application config file cannot be parsed.
    pub strict: bool,
    pub app_env: String,
    /// `APP_NAME` when the source defines neither `site_title` nor `site_name`.
    pub default_app_name: String,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            strict: true,
            app_env: DEFAULT_APP_ENV.to_string(),
            default_app_name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

/// Writes source settings into the target project's `.env` and
/// `config/database.php`.
///
/// `Ok(false)` is an expected stop (nothing to convert, unparseable source);
/// `Err` is reserved for missing target files, an absent driver block and
/// I/O failures.
pub trait ProjectConverter: Send + Sync {
    fn supports(&self, generation: Generation) -> bool;
    fn convert(&self, context: &ProjectContext) -> Result<bool>;
}
