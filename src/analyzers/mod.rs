//! Source project analyzers.

pub mod codeigniter;

pub use codeigniter::CodeIgniterAnalyzer;

use crate::core::context::ProjectContext;
use crate::core::errors::Result;
use crate::core::generation::Generation;
use crate::core::report::AnalysisReport;

/// Builds an [`AnalysisReport`] for projects of the generations it supports.
pub trait ProjectAnalyzer: Send + Sync {
    fn supports(&self, generation: Generation) -> bool;
    fn analyze(&self, context: &ProjectContext) -> Result<AnalysisReport>;
}
