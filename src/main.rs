use anyhow::Result;
use clap::Parser;
use igniter_migrate::cli::{Cli, Commands};
use igniter_migrate::commands::{self, AnalyzeConfig, MigrateOptions};
use igniter_migrate::config::load_config;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Migrate {
            source,
            output,
            name,
            laravel_version,
            sail,
            skip_scaffold,
            lenient,
            no_parallel,
            format,
        } => {
            let options = MigrateOptions {
                source,
                output,
                name,
                laravel_version,
                sail,
                skip_scaffold,
                lenient,
                no_parallel,
                format,
            };
            let outcome = commands::handle_migrate(options, load_config())?;
            if !outcome.success {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Detect { path } => {
            commands::detect_project(&path)?;
            Ok(())
        }
        Commands::Analyze {
            path,
            format,
            output,
            generation,
            no_parallel,
        } => {
            let mut parser = load_config().parser();
            if no_parallel {
                parser = parser.with_parallel(false);
            }
            commands::handle_analyze(AnalyzeConfig {
                path,
                format,
                output,
                generation,
                parser,
            })
        }
        Commands::Init { force } => commands::init_config(force),
    }
}
