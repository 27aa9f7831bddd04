//! Two-step migration: register a source project, then start it by id.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

use crate::converter::ConversionSettings;
use crate::core::context::ProjectContext;
use crate::core::errors::{Error, Result};
use crate::core::generation::Generation;
use crate::detection::detect_generation;
use crate::io::prepare_output_directory;
use crate::parser::PhpFileParser;
use crate::pipeline::{MigrationPipeline, PipelineOutcome};
use crate::scaffold::{ScaffoldOptions, Scaffolder};

pub const SUPPORTED_LARAVEL_VERSIONS: [&str; 3] = ["10.x", "9.x", "8.x"];
const MIGRATED_DIR: &str = "migrated";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub generation: Generation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    pub project_name: String,
    pub laravel_version: String,
    #[serde(default)]
    pub install_sail: bool,
}

impl StartRequest {
    pub fn validate(&self) -> Result<()> {
        let len = self.project_name.chars().count();
        if !(3..=255).contains(&len) {
            return Err(Error::Validation(
                "project_name must be between 3 and 255 characters".to_string(),
            ));
        }
        if !SUPPORTED_LARAVEL_VERSIONS.contains(&self.laravel_version.as_str()) {
            return Err(Error::Validation(format!(
                "laravel_version must be one of: {}",
                SUPPORTED_LARAVEL_VERSIONS.join(", ")
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct PendingMigration {
    source: PathBuf,
    generation: Generation,
}

/// Registered projects waiting to be started. Each id can be started once.
#[derive(Debug, Default)]
pub struct MigrationSessions {
    pending: Mutex<IndexMap<Uuid, PendingMigration>>,
    parser: PhpFileParser,
    settings: ConversionSettings,
}

impl MigrationSessions {
    pub fn new(parser: PhpFileParser, settings: ConversionSettings) -> Self {
        Self {
            pending: Mutex::new(IndexMap::new()),
            parser,
            settings,
        }
    }

    pub fn register(&self, source_dir: impl Into<PathBuf>) -> Result<Registration> {
        let source = source_dir.into();
        let generation = detect_generation(&source);
        if !generation.is_known() {
            return Err(Error::UnsupportedGeneration(generation));
        }

        let id = Uuid::new_v4();
        self.lock()?.insert(id, PendingMigration { source, generation });
        tracing::info!("Registered {} project as {}", generation.label(), id);
        Ok(Registration { id, generation })
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate `request` and run the pipeline into `<parent-of-source>/migrated`.
    pub fn start<S: Scaffolder>(
        &self,
        id: &str,
        request: &StartRequest,
        scaffolder: S,
    ) -> Result<PipelineOutcome> {
        request.validate()?;
        let key = Uuid::parse_str(id).map_err(|_| Error::SessionNotFound(id.to_string()))?;
        let pending = self
            .lock()?
            .shift_remove(&key)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

        let output = prepare_output_directory(&migrated_dir(&pending.source))?;
        let context = ProjectContext::new(&pending.source, output, &request.project_name)
            .with_generation(pending.generation);
        let options = ScaffoldOptions {
            laravel_version: request.laravel_version.clone(),
            install_sail: request.install_sail,
        };
        let pipeline = MigrationPipeline::codeigniter(
            scaffolder,
            options,
            self.parser,
            self.settings.clone(),
        );
        Ok(pipeline.run(&context))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, IndexMap<Uuid, PendingMigration>>> {
        self.pending
            .lock()
            .map_err(|_| Error::Configuration("session store is poisoned".to_string()))
    }
}

fn migrated_dir(source: &Path) -> PathBuf {
    source
        .parent()
        .unwrap_or(source)
        .join(MIGRATED_DIR)
}
