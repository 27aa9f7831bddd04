//! Detect, scaffold, migrate: the end-to-end run behind every entry point.

use serde::{Deserialize, Serialize};

use crate::coordinator::{Coordinator, MigrationCoordinator, Registry};
use crate::converter::ConversionSettings;
use crate::core::context::ProjectContext;
use crate::core::generation::Generation;
use crate::core::report::MigrationReport;
use crate::parser::PhpFileParser;
use crate::scaffold::{ScaffoldOptions, Scaffolder};

/// Result of one migration run. Failures are values, never panics or
/// escaped errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub success: bool,
    pub message: String,
    pub generation: Generation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<MigrationReport>,
}

impl PipelineOutcome {
    fn failure(generation: Generation, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("{}", message);
        Self {
            success: false,
            message,
            generation,
            report: None,
        }
    }
}

pub struct MigrationPipeline<S> {
    coordinator: MigrationCoordinator,
    scaffolder: S,
    options: ScaffoldOptions,
}

impl<S: Scaffolder> MigrationPipeline<S> {
    pub fn new(coordinator: MigrationCoordinator, scaffolder: S, options: ScaffoldOptions) -> Self {
        Self {
            coordinator,
            scaffolder,
            options,
        }
    }

    /// Pipeline over the standard CodeIgniter analyzers and converters.
    pub fn codeigniter(
        scaffolder: S,
        options: ScaffoldOptions,
        parser: PhpFileParser,
        settings: ConversionSettings,
    ) -> Self {
        let registry = Registry::codeigniter(parser, settings);
        Self::new(MigrationCoordinator::from_registry(registry), scaffolder, options)
    }

    pub fn run(&self, context: &ProjectContext) -> PipelineOutcome {
        let generation = context.generation();
        if !generation.is_known() {
            return PipelineOutcome::failure(
                generation,
                format!(
                    "Unsupported CodeIgniter version detected in {}",
                    context.source_root().display()
                ),
            );
        }
        tracing::info!("Detected {}", generation.label());

        if !self.coordinator.supports(generation) {
            return PipelineOutcome::failure(
                generation,
                format!("No migration coordinator for {}", generation.label()),
            );
        }

        if let Err(e) = self.scaffolder.scaffold(context, &self.options) {
            return PipelineOutcome::failure(generation, e.to_string());
        }

        let report = self.coordinator.execute_migration(context);
        if let Some(error) = report.conversion.as_ref().and_then(|c| c.error()) {
            let message = format!("Conversion failed: {error}");
            tracing::error!("{}", message);
            return PipelineOutcome {
                success: false,
                message,
                generation,
                report: Some(report),
            };
        }

        let success = report.conversion_succeeded();
        let message = if success {
            format!(
                "Migrated {} project into {}",
                generation.label(),
                context.target_root().display()
            )
        } else {
            "Conversion finished without applying changes".to_string()
        };
        if success {
            tracing::info!("{}", message);
        } else {
            tracing::warn!("{}", message);
        }

        PipelineOutcome {
            success,
            message,
            generation,
            report: Some(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{Error, Result};
    use std::fs;
    use tempfile::TempDir;

    struct FailingScaffolder;

    impl Scaffolder for FailingScaffolder {
        fn scaffold(&self, _context: &ProjectContext, _options: &ScaffoldOptions) -> Result<()> {
            Err(Error::Scaffold("composer exploded".into()))
        }
    }

    fn pipeline() -> MigrationPipeline<FailingScaffolder> {
        MigrationPipeline::codeigniter(
            FailingScaffolder,
            ScaffoldOptions::default(),
            PhpFileParser::new(),
            ConversionSettings::default(),
        )
    }

    #[test]
    fn test_unknown_project_fails_without_scaffolding() {
        let dir = TempDir::new().unwrap();
        let ctx = ProjectContext::new(dir.path(), dir.path().join("out"), "app");
        let outcome = pipeline().run(&ctx);
        assert!(!outcome.success);
        assert_eq!(outcome.generation, Generation::Unknown);
        assert!(outcome.message.starts_with("Unsupported CodeIgniter version"));
        assert!(outcome.report.is_none());
    }

    #[test]
    fn test_scaffold_error_becomes_failed_outcome() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("system/core/compat")).unwrap();
        let ctx = ProjectContext::new(dir.path(), dir.path().join("out"), "app");
        let outcome = pipeline().run(&ctx);
        assert!(!outcome.success);
        assert_eq!(outcome.generation, Generation::Ci3);
        assert_eq!(outcome.message, "Scaffolding failed: composer exploded");
    }
}
