use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::generation::Generation;

#[derive(Parser, Debug)]
#[command(name = "igniter-migrate")]
#[command(about = "Migrate CodeIgniter 2/3/4 projects onto Laravel configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a Laravel project and migrate a CodeIgniter project into it
    Migrate {
        /// CodeIgniter project root
        source: PathBuf,

        /// Directory the Laravel project is created in
        #[arg(short, long)]
        output: PathBuf,

        /// Laravel project name (defaults to the source directory name)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Laravel version constraint, e.g. 10.x
        #[arg(long = "laravel-version")]
        laravel_version: Option<String>,

        /// Install Laravel Sail after scaffolding
        #[arg(long)]
        sail: bool,

        /// Use an existing Laravel project at <output>/<name>
        #[arg(long = "skip-scaffold")]
        skip_scaffold: bool,

        /// Keep converting when config.php cannot be parsed
        #[arg(long)]
        lenient: bool,

        /// Parse files sequentially
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Print the CodeIgniter generation of a project
    Detect {
        /// Project root
        path: PathBuf,
    },

    /// Inventory controllers, models, routes, libraries and helpers
    Analyze {
        /// Project root
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip detection and treat the project as this generation
        #[arg(short, long)]
        generation: Option<Generation>,

        /// Parse files sequentially
        #[arg(long = "no-parallel")]
        no_parallel: bool,
    },

    /// Write a default .igniter-migrate.toml in the current directory
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_migrate_command() {
        let cli = Cli::try_parse_from([
            "igniter-migrate",
            "migrate",
            "/legacy/shop",
            "--output",
            "/tmp/out",
            "--laravel-version",
            "9.x",
            "--sail",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbosity, 2);
        match cli.command {
            Commands::Migrate {
                source,
                output,
                name,
                laravel_version,
                sail,
                skip_scaffold,
                format,
                ..
            } => {
                assert_eq!(source, PathBuf::from("/legacy/shop"));
                assert_eq!(output, PathBuf::from("/tmp/out"));
                assert_eq!(name, None);
                assert_eq!(laravel_version.as_deref(), Some("9.x"));
                assert!(sail);
                assert!(!skip_scaffold);
                assert_eq!(format, OutputFormat::Terminal);
            }
            _ => panic!("Expected Migrate command"),
        }
    }

    #[test]
    fn test_cli_parsing_analyze_with_generation() {
        let cli = Cli::try_parse_from([
            "igniter-migrate",
            "analyze",
            ".",
            "--format",
            "json",
            "--generation",
            "ci4",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                format, generation, ..
            } => {
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(generation, Some(Generation::Ci4));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_generation() {
        assert!(Cli::try_parse_from(["igniter-migrate", "analyze", ".", "-g", "ci5"]).is_err());
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::try_parse_from(["igniter-migrate", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }
}
