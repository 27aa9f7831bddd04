// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod converter;
pub mod coordinator;
pub mod core;
pub mod detection;
pub mod io;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod processors;
pub mod scaffold;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, ClassEntry, ConfigValues, DatabaseValues, Error, FileEntry, Generation,
    MigrationReport, Outcome, ProjectContext, Result, RouteFact, ScalarValue,
};

pub use crate::analyzers::{CodeIgniterAnalyzer, ProjectAnalyzer};
pub use crate::converter::{
    CodeIgniterConverter, ConversionSettings, LaravelDriver, ProjectConverter,
};
pub use crate::coordinator::{Coordinator, GenerationCoordinator, MigrationCoordinator, Registry};
pub use crate::detection::detect_generation;
pub use crate::parser::{BatchResult, PhpFileParser};
pub use crate::pipeline::{MigrationPipeline, PipelineOutcome};
pub use crate::scaffold::{
    ComposerScaffolder, ExistingProjectScaffolder, ScaffoldOptions, Scaffolder,
};
pub use crate::session::{MigrationSessions, Registration, StartRequest};
