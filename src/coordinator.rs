//! Pairs analyzers with converters and dispatches on the detected generation.

use std::sync::{Arc, RwLock};

use crate::analyzers::{CodeIgniterAnalyzer, ProjectAnalyzer};
use crate::converter::{CodeIgniterConverter, ConversionSettings, ProjectConverter};
use crate::core::context::ProjectContext;
use crate::core::generation::Generation;
use crate::core::report::{MigrationReport, Outcome};
use crate::parser::PhpFileParser;

/// Runs a migration for the generations it supports.
pub trait Coordinator: Send + Sync {
    fn supports(&self, generation: Generation) -> bool;
    fn execute_migration(&self, context: &ProjectContext) -> MigrationReport;
}

/// Every analyzer and converter available to the coordinators, built once
/// at startup.
#[derive(Clone, Default)]
pub struct Registry {
    analyzers: Vec<Arc<dyn ProjectAnalyzer>>,
    converters: Vec<Arc<dyn ProjectConverter>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer and converter for each supported CodeIgniter generation.
    pub fn codeigniter(parser: PhpFileParser, settings: ConversionSettings) -> Self {
        let mut registry = Self::new();
        for generation in Generation::SUPPORTED {
            registry = registry
                .with_analyzer(CodeIgniterAnalyzer::new(generation).with_parser(parser))
                .with_converter(
                    CodeIgniterConverter::new(generation)
                        .with_parser(parser)
                        .with_settings(settings.clone()),
                );
        }
        registry
    }

    pub fn with_analyzer(mut self, analyzer: impl ProjectAnalyzer + 'static) -> Self {
        self.analyzers.push(Arc::new(analyzer));
        self
    }

    pub fn with_converter(mut self, converter: impl ProjectConverter + 'static) -> Self {
        self.converters.push(Arc::new(converter));
        self
    }

    pub fn analyzer_for(&self, generation: Generation) -> Option<Arc<dyn ProjectAnalyzer>> {
        self.analyzers
            .iter()
            .find(|a| a.supports(generation))
            .cloned()
    }

    pub fn converter_for(&self, generation: Generation) -> Option<Arc<dyn ProjectConverter>> {
        self.converters
            .iter()
            .find(|c| c.supports(generation))
            .cloned()
    }
}

/// Migration for exactly one generation.
pub struct GenerationCoordinator {
    generation: Generation,
    registry: Registry,
}

impl GenerationCoordinator {
    pub fn new(generation: Generation, registry: Registry) -> Self {
        Self {
            generation,
            registry,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }
}

impl Coordinator for GenerationCoordinator {
    fn supports(&self, generation: Generation) -> bool {
        generation == self.generation
    }

    /// Analysis and conversion are independent sections: a failed analysis
    /// does not stop the conversion.
    fn execute_migration(&self, context: &ProjectContext) -> MigrationReport {
        let label = self.generation.label();
        let analysis = match self.registry.analyzer_for(self.generation) {
            Some(analyzer) => match analyzer.analyze(context) {
                Ok(report) => Outcome::completed(report),
                Err(e) => {
                    tracing::error!("Analysis failed: {}", e);
                    Outcome::failed(e.to_string())
                }
            },
            None => Outcome::failed(format!("No analyzer found for {label}")),
        };

        let conversion = match self.registry.converter_for(self.generation) {
            Some(converter) => match converter.convert(context) {
                Ok(done) => Outcome::completed(done),
                Err(e) => {
                    tracing::error!("Conversion failed: {}", e);
                    Outcome::failed(e.to_string())
                }
            },
            None => Outcome::failed(format!("No converter found for {label}")),
        };

        MigrationReport {
            analysis: Some(analysis),
            conversion: Some(conversion),
        }
    }
}

/// Dispatches to the first registered coordinator supporting a generation.
pub struct MigrationCoordinator {
    coordinators: Vec<Box<dyn Coordinator>>,
    current: RwLock<Option<usize>>,
}

impl MigrationCoordinator {
    pub fn new(coordinators: Vec<Box<dyn Coordinator>>) -> Self {
        Self {
            coordinators,
            current: RwLock::new(None),
        }
    }

    /// One [`GenerationCoordinator`] per supported generation, sharing
    /// `registry`.
    pub fn from_registry(registry: Registry) -> Self {
        let coordinators = Generation::SUPPORTED
            .into_iter()
            .map(|g| Box::new(GenerationCoordinator::new(g, registry.clone())) as Box<dyn Coordinator>)
            .collect();
        Self::new(coordinators)
    }

    fn current(&self) -> Option<usize> {
        self.current.read().ok().and_then(|current| *current)
    }

    pub fn has_current(&self) -> bool {
        self.current().is_some()
    }
}

impl Coordinator for MigrationCoordinator {
    /// Remembers the first matching coordinator as current. A miss leaves
    /// the previous selection in place.
    fn supports(&self, generation: Generation) -> bool {
        let Some(index) = self.coordinators.iter().position(|c| c.supports(generation)) else {
            return false;
        };
        if let Ok(mut current) = self.current.write() {
            *current = Some(index);
        }
        true
    }

    fn execute_migration(&self, context: &ProjectContext) -> MigrationReport {
        match self.current().and_then(|i| self.coordinators.get(i)) {
            Some(coordinator) => coordinator.execute_migration(context),
            None => {
                tracing::warn!("No coordinator selected, nothing to migrate");
                MigrationReport::default()
            }
        }
    }
}
