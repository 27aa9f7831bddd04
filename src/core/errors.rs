//! Shared error types for the migration engine

use std::path::PathBuf;
use thiserror::Error;

use super::generation::Generation;

/// Main error type for migration operations
#[derive(Debug, Error)]
pub enum Error {
    /// A source or target file that must exist is absent
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PHP source that tree-sitter could not parse cleanly
    #[error("Error parsing PHP file '{}' at {line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A factory or component was asked for a generation it does not handle
    #[error("Unsupported CodeIgniter version: {}", .0.short_label())]
    UnsupportedGeneration(Generation),

    /// The scaffolded Laravel project lacks a file the converter patches
    #[error("Required target file is missing: {}", path.display())]
    TargetFileMissing { path: PathBuf },

    /// The driver block could not be found in config/database.php
    #[error("Could not locate '{driver}' config in {}", path.display())]
    PatchLocation { driver: String, path: PathBuf },

    #[error("Scaffolding failed: {0}")]
    Scaffold(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Migration session not found: {0}")]
    SessionNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::FileNotFound { path };
        }
        Self::Read { path, source }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Path the error refers to, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::FileNotFound { path }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Parse { path, .. }
            | Self::TargetFileMissing { path }
            | Self::PatchLocation { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_not_found_maps_to_file_not_found() {
        let err = Error::read(
            "/missing/config.php",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, Error::FileNotFound { .. }));
        assert_eq!(err.to_string(), "File not found: /missing/config.php");
    }

    #[test]
    fn test_parse_error_message_carries_path() {
        let err = Error::Parse {
            path: PathBuf::from("Welcome.php"),
            line: 3,
            column: 7,
            message: "syntax error near `{`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Welcome.php"));
        assert!(msg.contains("3:7"));
        assert_eq!(err.path(), Some(&PathBuf::from("Welcome.php")));
    }

    #[test]
    fn test_unsupported_generation_message() {
        let err = Error::UnsupportedGeneration(Generation::Unknown);
        assert_eq!(err.to_string(), "Unsupported CodeIgniter version: UNKNOWN");
    }
}
