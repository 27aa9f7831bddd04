pub mod ast;
pub mod context;
pub mod errors;
pub mod facts;
pub mod generation;
pub mod report;
pub mod values;

pub use context::{ProjectContext, SourceArea};
pub use errors::{Error, Result};
pub use facts::{
    ClassFacts, DependencyKind, DependencyUsage, HttpVerb, MethodFact, RouteFact, Visibility,
};
pub use generation::Generation;
pub use report::{AnalysisReport, ClassEntry, FileEntry, MigrationReport, Outcome};
pub use values::{ConfigValues, DatabaseValues, ScalarValue};
