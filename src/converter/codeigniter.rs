use std::path::Path;

use super::db_patch::patch_driver_block;
use super::env_patch::apply_env_updates;
use super::updates::{build_database_updates, build_env_updates};
use super::{ConversionSettings, ProjectConverter};
use crate::core::context::ProjectContext;
use crate::core::errors::{Error, Result};
use crate::core::generation::Generation;
use crate::core::values::ConfigValues;
use crate::io::{file_exists, read_file, write_file};
use crate::parser::PhpFileParser;
use crate::processors::{config_processor, database_processor, NodeProcessor};

/// Converts one CodeIgniter generation's `config.php` and `database.php`.
#[derive(Debug, Clone)]
pub struct CodeIgniterConverter {
    generation: Generation,
    parser: PhpFileParser,
    settings: ConversionSettings,
}

impl CodeIgniterConverter {
    pub fn new(generation: Generation) -> Self {
        Self {
            generation,
            parser: PhpFileParser::new(),
            settings: ConversionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ConversionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_parser(mut self, parser: PhpFileParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// `None` when the config file fails to parse in strict mode.
    fn read_config(&self, path: &Path) -> Result<Option<ConfigValues>> {
        let processor = config_processor(self.generation)?;
        match self.parser.parse(path, processor) {
            Ok(processor) => Ok(Some(processor.results())),
            Err(e) if self.settings.strict => {
                tracing::error!("Failed to parse CI config file: {}", e);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Ignoring unparseable CI config file: {}", e);
                Ok(Some(ConfigValues::new()))
            }
        }
    }
}

fn require_target(path: &Path) -> Result<()> {
    if file_exists(path) {
        Ok(())
    } else {
        Err(Error::TargetFileMissing {
            path: path.to_path_buf(),
        })
    }
}

impl ProjectConverter for CodeIgniterConverter {
    fn supports(&self, generation: Generation) -> bool {
        generation == self.generation
    }

    fn convert(&self, context: &ProjectContext) -> Result<bool> {
        let g = self.generation;
        let Some(config) = self.read_config(&context.config_file(g))? else {
            return Ok(false);
        };

        let database = match self
            .parser
            .parse(&context.database_file(g), database_processor(g)?)
        {
            Ok(processor) => processor.results(),
            Err(e) => {
                tracing::error!("Failed to parse CI database file: {}", e);
                return Ok(false);
            }
        };
        if database.is_empty() {
            tracing::info!("No default database connection found, nothing to convert");
            return Ok(false);
        }

        let env_path = context.target_env_file();
        let db_path = context.target_database_config_file();
        require_target(&env_path)?;
        require_target(&db_path)?;

        let env_content = read_file(&env_path)?;
        let db_content = read_file(&db_path)?;

        let (driver, fields) = build_database_updates(&database);
        let env_updates = build_env_updates(&config, &database, &self.settings);

        let patched = patch_driver_block(
            &db_content,
            driver.as_str(),
            fields.iter().map(|(key, value)| (*key, value)),
        )
        .ok_or_else(|| Error::PatchLocation {
            driver: driver.to_string(),
            path: db_path.clone(),
        })?;
        write_file(&db_path, &patched)?;
        tracing::info!(
            "Updated DB config for '{}' with: {}",
            driver,
            fields.keys().copied().collect::<Vec<_>>().join(", ")
        );

        let env = apply_env_updates(
            &env_content,
            env_updates.iter().map(|(key, value)| (*key, value.as_str())),
        );
        write_file(&env_path, &env)?;
        tracing::info!(
            ".env file updated with: {}",
            env_updates.keys().copied().collect::<Vec<_>>().join(", ")
        );

        Ok(true)
    }
}
