pub mod walker;

pub use walker::{list_php_files, FileWalker};

use crate::core::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::read(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::write(path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::write(path, e))?;
    }
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

pub fn dir_exists(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Create a fresh output directory, suffixing `_1`, `_2`, ... when the
/// requested one is already taken.
pub fn prepare_output_directory(requested: &Path) -> Result<PathBuf> {
    let mut candidate = requested.to_path_buf();
    let mut counter = 1;
    while candidate.exists() {
        let mut name = requested
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!("_{counter}"));
        candidate = requested.with_file_name(name);
        counter += 1;
    }
    ensure_dir(&candidate)?;
    Ok(candidate)
}
