// Fixture builders shared by the integration tests
#![allow(dead_code)]

use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Trimmed copy of the `config/database.php` Laravel ships.
pub const LARAVEL_DATABASE_PHP: &str = indoc! {r#"
    <?php

    use Illuminate\Support\Str;

    return [

        'default' => env('DB_CONNECTION', 'sqlite'),

        'connections' => [

            'sqlite' => [
                'driver' => 'sqlite',
                'url' => env('DB_URL'),
                'database' => env('DB_DATABASE', database_path('database.sqlite')),
                'prefix' => '',
                'foreign_key_constraints' => env('DB_FOREIGN_KEYS', true),
            ],

            'mysql' => [
                'driver' => 'mysql',
                'url' => env('DB_URL'),
                'host' => env('DB_HOST', '127.0.0.1'),
                'port' => env('DB_PORT', '3306'),
                'database' => env('DB_DATABASE', 'laravel'),
                'username' => env('DB_USERNAME', 'root'),
                'password' => env('DB_PASSWORD', ''),
                'charset' => env('DB_CHARSET', 'utf8mb4'),
                'collation' => env('DB_COLLATION', 'utf8mb4_unicode_ci'),
                'prefix' => '',
                'prefix_indexes' => true,
                'strict' => true,
                'engine' => null,
                'options' => extension_loaded('pdo_mysql') ? array_filter([
                    PDO::MYSQL_ATTR_SSL_CA => env('MYSQL_ATTR_SSL_CA'),
                ]) : [],
            ],

        ],

        'migrations' => [
            'table' => 'migrations',
            'update_date_on_publish' => true,
        ],

    ];
"#};

pub const LARAVEL_ENV: &str = indoc! {"
    APP_NAME=Laravel
    APP_ENV=local
    APP_KEY=
    APP_DEBUG=true
    APP_URL=http://localhost

    LOG_CHANNEL=stack

    DB_CONNECTION=sqlite
    # DB_HOST=127.0.0.1
    # DB_PORT=3306

    SESSION_DRIVER=database
"};

pub fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// `system/core` + `system/core/compat`
pub fn ci3_fingerprint(root: &Path) {
    fs::create_dir_all(root.join("system/core/compat")).unwrap();
    write(root, "system/core/CodeIgniter.php", "<?php const CI_VERSION = '3.1.13';");
}

pub fn ci2_fingerprint(root: &Path) {
    write(
        root,
        "system/core/CodeIgniter.php",
        "<?php define('CI_VERSION', '2.2.6');",
    );
}

pub fn ci4_fingerprint(root: &Path) {
    write(root, "system/bootstrap.php", "<?php");
}

/// Source project under `<tmp>/legacy` and an empty output directory
/// under `<tmp>/out`.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn source(&self) -> PathBuf {
        self.dir.path().join("legacy")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub fn write_source(&self, rel: &str, content: &str) -> PathBuf {
        write(&self.source(), rel, content)
    }

    /// Scaffolded Laravel project at `<out>/<name>`.
    pub fn laravel_target(&self, name: &str) -> PathBuf {
        let root = self.output().join(name);
        write(&root, ".env", LARAVEL_ENV);
        write(&root, "config/database.php", LARAVEL_DATABASE_PHP);
        root
    }
}
