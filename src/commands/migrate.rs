use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::MigrateConfig;
use crate::core::context::ProjectContext;
use crate::io::prepare_output_directory;
use crate::output::{format_outcome, output_json};
use crate::pipeline::{MigrationPipeline, PipelineOutcome};
use crate::scaffold::{ComposerScaffolder, ExistingProjectScaffolder, Scaffolder};
use crate::session::SUPPORTED_LARAVEL_VERSIONS;

/// `migrate` flags. `None`/`false` leaves the configuration file's value.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    pub name: Option<String>,
    pub laravel_version: Option<String>,
    pub sail: bool,
    pub skip_scaffold: bool,
    pub lenient: bool,
    pub no_parallel: bool,
    pub format: OutputFormat,
}

impl MigrateOptions {
    /// Fold command-line overrides into the file configuration.
    pub fn apply_to(&self, mut config: MigrateConfig) -> Result<MigrateConfig> {
        if let Some(version) = &self.laravel_version {
            if !SUPPORTED_LARAVEL_VERSIONS.contains(&version.as_str()) {
                anyhow::bail!(
                    "Unsupported Laravel version '{}'. Expected one of: {}",
                    version,
                    SUPPORTED_LARAVEL_VERSIONS.join(", ")
                );
            }
            config.target.laravel_version = version.clone();
        }
        if self.sail {
            config.target.install_sail = true;
        }
        if self.lenient {
            config.conversion.strict = false;
        }
        if self.no_parallel {
            config.parsing.parallel = false;
        }
        Ok(config)
    }

    fn project_name(&self) -> Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .context("Cannot derive a project name from the source path, pass --name")
    }
}

fn run<S: Scaffolder>(scaffolder: S, config: &MigrateConfig, context: &ProjectContext) -> PipelineOutcome {
    MigrationPipeline::codeigniter(
        scaffolder,
        config.scaffold_options(),
        config.parser(),
        config.conversion_settings(),
    )
    .run(context)
}

pub fn handle_migrate(options: MigrateOptions, config: MigrateConfig) -> Result<PipelineOutcome> {
    let config = options.apply_to(config)?;
    let name = options.project_name()?;

    let output = if options.skip_scaffold {
        options.output.clone()
    } else {
        prepare_output_directory(&options.output)?
    };
    let context = ProjectContext::new(&options.source, output, name);

    let outcome = if options.skip_scaffold {
        run(ExistingProjectScaffolder, &config, &context)
    } else {
        run(ComposerScaffolder::new(), &config, &context)
    };

    match options.format {
        OutputFormat::Json => output_json(&outcome, None)?,
        OutputFormat::Terminal => print!("{}", format_outcome(&outcome)),
    }
    Ok(outcome)
}
