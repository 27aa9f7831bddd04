use std::fs;
use std::path::{Path, PathBuf};

use super::MigrateConfig;
use crate::converter::DEFAULT_APP_ENV;
use crate::scaffold::DEFAULT_LARAVEL_VERSION;
use crate::session::SUPPORTED_LARAVEL_VERSIONS;

pub const CONFIG_FILE_NAME: &str = ".igniter-migrate.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse a TOML string, replacing values that cannot be used with defaults.
pub fn parse_and_validate_config(contents: &str) -> Result<MigrateConfig, String> {
    let mut config = toml::from_str::<MigrateConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if !SUPPORTED_LARAVEL_VERSIONS.contains(&config.target.laravel_version.as_str()) {
        log::warn!(
            "Unsupported laravel_version '{}'. Using {}.",
            config.target.laravel_version,
            DEFAULT_LARAVEL_VERSION
        );
        config.target.laravel_version = DEFAULT_LARAVEL_VERSION.to_string();
    }
    if config.target.app_env.trim().is_empty() {
        log::warn!("Empty app_env. Using {}.", DEFAULT_APP_ENV);
        config.target.app_env = DEFAULT_APP_ENV.to_string();
    }

    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<MigrateConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // A missing file is the normal case
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// `start` and its parents, nearest first, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Nearest configuration file at or above `start`, or defaults.
pub fn load_config_from(start: &Path) -> MigrateConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            MigrateConfig::default()
        })
}

pub fn load_config() -> MigrateConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            MigrateConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ancestors_are_bounded() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b")
            ]
        );
        assert_eq!(directory_ancestors(PathBuf::from("/"), 10).count(), 1);
    }

    #[test]
    fn test_nearest_file_wins() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("one/two");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[target]\napp_env = \"production\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("one").join(CONFIG_FILE_NAME),
            "[target]\napp_env = \"staging\"\n",
        )
        .unwrap();

        assert_eq!(load_config_from(&nested).target.app_env, "staging");
        assert_eq!(load_config_from(dir.path()).target.app_env, "production");
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[target\nbroken").unwrap();
        assert_eq!(load_config_from(dir.path()), MigrateConfig::default());
    }

    #[test]
    fn test_unsupported_values_are_replaced() {
        let config = parse_and_validate_config(
            "[target]\nlaravel_version = \"5.x\"\napp_env = \"  \"\n",
        )
        .unwrap();
        assert_eq!(config.target.laravel_version, "10.x");
        assert_eq!(config.target.app_env, "local");
    }
}
