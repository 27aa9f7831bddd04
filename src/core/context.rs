//! Per-run project paths.
//!
//! Every derived path is computed on demand from the roots and the
//! generation, nothing is stored twice.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::generation::Generation;
use crate::detection::detect_generation;

/// Source directories the analyzer scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArea {
    Controllers,
    Models,
    Libraries,
    Helpers,
}

impl SourceArea {
    fn dir_name(self, generation: Generation) -> &'static str {
        let modern = generation == Generation::Ci4;
        match (self, modern) {
            (SourceArea::Controllers, false) => "controllers",
            (SourceArea::Controllers, true) => "Controllers",
            (SourceArea::Models, false) => "models",
            (SourceArea::Models, true) => "Models",
            (SourceArea::Libraries, false) => "libraries",
            (SourceArea::Libraries, true) => "Libraries",
            (SourceArea::Helpers, false) => "helpers",
            (SourceArea::Helpers, true) => "Helpers",
        }
    }
}

#[derive(Debug)]
pub struct ProjectContext {
    source_root: PathBuf,
    output_dir: PathBuf,
    project_name: String,
    generation: OnceLock<Generation>,
}

impl ProjectContext {
    pub fn new(
        source_root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            output_dir: output_dir.into(),
            project_name: project_name.into(),
            generation: OnceLock::new(),
        }
    }

    /// Seed the generation cache with an already known value.
    ///
    /// `Unknown` is never cached.
    pub fn with_generation(self, generation: Generation) -> Self {
        if generation.is_known() {
            let _ = self.generation.set(generation);
        }
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Detect once, then reuse. An `Unknown` result is re-probed next call.
    pub fn generation(&self) -> Generation {
        if let Some(generation) = self.generation.get() {
            return *generation;
        }
        let detected = detect_generation(&self.source_root);
        if detected.is_known() {
            return *self.generation.get_or_init(|| detected);
        }
        detected
    }

    pub fn application_dir(&self, generation: Generation) -> PathBuf {
        match generation {
            Generation::Ci4 => self.source_root.join("app"),
            _ => self.source_root.join("application"),
        }
    }

    pub fn source_dir(&self, generation: Generation, area: SourceArea) -> PathBuf {
        self.application_dir(generation)
            .join(area.dir_name(generation))
    }

    pub fn config_file(&self, generation: Generation) -> PathBuf {
        match generation {
            Generation::Ci4 => self.application_dir(generation).join("Config/App.php"),
            _ => self.application_dir(generation).join("config/config.php"),
        }
    }

    pub fn database_file(&self, generation: Generation) -> PathBuf {
        match generation {
            Generation::Ci4 => self.application_dir(generation).join("Config/Database.php"),
            _ => self.application_dir(generation).join("config/database.php"),
        }
    }

    pub fn target_root(&self) -> PathBuf {
        self.output_dir.join(&self.project_name)
    }

    pub fn target_env_file(&self) -> PathBuf {
        self.target_root().join(".env")
    }

    pub fn target_database_config_file(&self) -> PathBuf {
        self.target_root().join("config").join("database.php")
    }
}
