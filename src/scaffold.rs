//! Materializes the Laravel project the converter writes into.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use std::process::Command;
use uuid::Uuid;

use crate::converter::set_env_value;
use crate::core::context::ProjectContext;
use crate::core::errors::{Error, Result};
use crate::io::{dir_exists, ensure_dir, file_exists, read_file, write_file};

pub const DEFAULT_LARAVEL_VERSION: &str = "10.x";

/// What to scaffold, beyond the name and location held by the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub laravel_version: String,
    pub install_sail: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            laravel_version: DEFAULT_LARAVEL_VERSION.to_string(),
            install_sail: false,
        }
    }
}

/// Produces `<output>/<project>` with at least `.env` and
/// `config/database.php`.
pub trait Scaffolder: Send + Sync {
    fn scaffold(&self, context: &ProjectContext, options: &ScaffoldOptions) -> Result<()>;
}

/// Runs `composer create-project laravel/laravel`.
#[derive(Debug, Clone, Default)]
pub struct ComposerScaffolder;

impl ComposerScaffolder {
    pub fn new() -> Self {
        Self
    }

    fn run(program: &Path, args: &[&str], cwd: &Path, failure: &str) -> Result<()> {
        tracing::info!(
            "Running command: {} {} in directory: {}",
            program.display(),
            args.join(" "),
            cwd.display()
        );
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| Error::Scaffold(format!("{failure}: {e}")))?;

        if output.status.success() {
            return Ok(());
        }
        Err(Error::Scaffold(format!(
            "{failure} ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

impl Scaffolder for ComposerScaffolder {
    fn scaffold(&self, context: &ProjectContext, options: &ScaffoldOptions) -> Result<()> {
        let composer = which::which("composer").map_err(|_| {
            Error::Scaffold(
                "Composer is not found in your PATH. Install Composer or make it accessible."
                    .to_string(),
            )
        })?;

        let output_dir = context.output_dir();
        ensure_dir(output_dir)?;

        let name = context.project_name();
        let package = format!("laravel/laravel={}", options.laravel_version);
        Self::run(
            &composer,
            &["create-project", &package, name],
            output_dir,
            &format!("Failed to create Laravel project '{name}'"),
        )?;
        tracing::info!("Laravel project '{}' created", name);

        let project = context.target_root();
        if options.install_sail {
            let php = which::which("php")
                .map_err(|_| Error::Scaffold("php is not found in your PATH".to_string()))?;
            Self::run(
                &php,
                &["artisan", "sail:install"],
                &project,
                &format!("Failed to install Laravel Sail in '{}'", project.display()),
            )?;
            tracing::info!("Laravel Sail installed");
        }

        write_app_key(&context.target_env_file())
    }
}

/// Uses a project that already exists, for example one scaffolded by hand.
#[derive(Debug, Clone, Default)]
pub struct ExistingProjectScaffolder;

impl Scaffolder for ExistingProjectScaffolder {
    fn scaffold(&self, context: &ProjectContext, _options: &ScaffoldOptions) -> Result<()> {
        let root = context.target_root();
        if !dir_exists(&root) {
            return Err(Error::Scaffold(format!(
                "Laravel project not found at {}",
                root.display()
            )));
        }
        for path in [context.target_env_file(), context.target_database_config_file()] {
            if !file_exists(&path) {
                return Err(Error::TargetFileMissing { path });
            }
        }
        tracing::debug!("Using existing Laravel project at {}", root.display());
        Ok(())
    }
}

/// `base64:` followed by 32 random bytes, the format `php artisan
/// key:generate` writes.
pub fn generate_app_key() -> String {
    let mut bytes = [0u8; 32];
    bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
    format!("base64:{}", STANDARD.encode(bytes))
}

pub fn write_app_key(env_file: &Path) -> Result<()> {
    let content = read_file(env_file)?;
    let updated = set_env_value(&content, "APP_KEY", &generate_app_key());
    write_file(env_file, &updated)?;
    tracing::debug!("APP_KEY written to {}", env_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_app_key_shape() {
        let key = generate_app_key();
        let encoded = key.strip_prefix("base64:").unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap().len(), 32);
        assert_ne!(key, generate_app_key());
    }

    #[test]
    fn test_write_app_key_replaces_existing_line() {
        let dir = TempDir::new().unwrap();
        let env = dir.path().join(".env");
        fs::write(&env, "APP_NAME=Laravel\nAPP_KEY=\nAPP_DEBUG=true\n").unwrap();
        write_app_key(&env).unwrap();
        let content = fs::read_to_string(&env).unwrap();
        let line = content.lines().nth(1).unwrap();
        assert!(line.starts_with("APP_KEY=base64:"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_existing_project_requires_target_files() {
        let dir = TempDir::new().unwrap();
        let ctx = ProjectContext::new("/src", dir.path(), "shop");
        let err = ExistingProjectScaffolder
            .scaffold(&ctx, &ScaffoldOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Scaffold(_)));

        fs::create_dir_all(dir.path().join("shop/config")).unwrap();
        fs::write(dir.path().join("shop/.env"), "").unwrap();
        let err = ExistingProjectScaffolder
            .scaffold(&ctx, &ScaffoldOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::TargetFileMissing { .. }));

        fs::write(dir.path().join("shop/config/database.php"), "<?php").unwrap();
        assert!(ExistingProjectScaffolder
            .scaffold(&ctx, &ScaffoldOptions::default())
            .is_ok());
    }
}
