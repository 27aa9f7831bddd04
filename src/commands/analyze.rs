use anyhow::Result;
use std::path::PathBuf;

use crate::analyzers::{CodeIgniterAnalyzer, ProjectAnalyzer};
use crate::cli::OutputFormat;
use crate::core::context::ProjectContext;
use crate::core::generation::Generation;
use crate::detection::detect_generation;
use crate::io;
use crate::output::{format_analysis, output_json};
use crate::parser::PhpFileParser;

#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    /// Overrides detection when set
    pub generation: Option<Generation>,
    pub parser: PhpFileParser,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    if !config.path.is_dir() {
        anyhow::bail!("Project directory not found: {}", config.path.display());
    }

    let generation = config
        .generation
        .unwrap_or_else(|| detect_generation(&config.path));
    if !generation.is_known() {
        anyhow::bail!(
            "Unsupported CodeIgniter version in {}",
            config.path.display()
        );
    }

    let context =
        ProjectContext::new(&config.path, &config.path, "analysis").with_generation(generation);
    let report = CodeIgniterAnalyzer::new(generation)
        .with_parser(config.parser)
        .analyze(&context)?;

    match config.format {
        OutputFormat::Json => output_json(&report, config.output.as_deref())?,
        OutputFormat::Terminal => {
            let text = format_analysis(&report);
            match &config.output {
                Some(path) => io::write_file(path, &text)?,
                None => print!("{text}"),
            }
        }
    }
    Ok(())
}
