use crate::core::errors::Result;
use std::path::{Path, PathBuf};

/// Lists files with one extension directly inside a directory.
///
/// Subdirectories are not descended into. A missing directory yields an
/// empty list.
pub struct FileWalker {
    dir: PathBuf,
    extension: String,
}

impl FileWalker {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            extension: "php".to_string(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(&self.dir.to_string_lossy()),
            glob::Pattern::escape(&self.extension)
        );

        let mut files: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        Ok(files)
    }
}

pub fn list_php_files(dir: &Path) -> Result<Vec<PathBuf>> {
    FileWalker::new(dir.to_path_buf()).walk()
}
