//! `.igniter-migrate.toml` settings.

mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use serde::{Deserialize, Serialize};

use crate::converter::{ConversionSettings, DEFAULT_APP_ENV, DEFAULT_APP_NAME};
use crate::parser::PhpFileParser;
use crate::scaffold::{ScaffoldOptions, DEFAULT_LARAVEL_VERSION};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MigrateConfig {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub parsing: ParsingConfig,
}

/// The Laravel project being produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Version constraint passed to `composer create-project`
    #[serde(default = "default_laravel_version")]
    pub laravel_version: String,

    #[serde(default)]
    pub install_sail: bool,

    /// Written as `APP_ENV`
    #[serde(default = "default_app_env")]
    pub app_env: String,

    /// `APP_NAME` when the source names no site
    #[serde(default = "default_app_name")]
    pub default_app_name: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            laravel_version: default_laravel_version(),
            install_sail: false,
            app_env: default_app_env(),
            default_app_name: default_app_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Abort when the source `config.php` does not parse
    #[serde(default = "default_true")]
    pub strict: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Parse source files on the rayon pool
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

fn default_true() -> bool {
    true
}

fn default_laravel_version() -> String {
    DEFAULT_LARAVEL_VERSION.to_string()
}

fn default_app_env() -> String {
    DEFAULT_APP_ENV.to_string()
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

impl MigrateConfig {
    pub fn conversion_settings(&self) -> ConversionSettings {
        ConversionSettings {
            strict: self.conversion.strict,
            app_env: self.target.app_env.clone(),
            default_app_name: self.target.default_app_name.clone(),
        }
    }

    pub fn scaffold_options(&self) -> ScaffoldOptions {
        ScaffoldOptions {
            laravel_version: self.target.laravel_version.clone(),
            install_sail: self.target.install_sail,
        }
    }

    pub fn parser(&self) -> PhpFileParser {
        PhpFileParser::new().with_parallel(self.parsing.parallel)
    }
}

/// Commented file written by `igniter-migrate init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# igniter-migrate configuration

[target]
# Version constraint for `composer create-project laravel/laravel=<version>`
laravel_version = "10.x"
# Run `php artisan sail:install` after scaffolding
install_sail = false
# Value written to APP_ENV
app_env = "local"
# APP_NAME when the CodeIgniter config sets neither site_title nor site_name
default_app_name = "Laravel Migration App"

[conversion]
# Stop the conversion when config.php cannot be parsed
strict = true

[parsing]
# Parse controllers and models in parallel
parallel = true
"#;
