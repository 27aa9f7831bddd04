//! Drives a [`NodeProcessor`] over whole files.

use indexmap::IndexMap;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use super::{lower, parse_source};
use crate::core::errors::Result;
use crate::io;
use crate::processors::NodeProcessor;

/// Outcome of a batch parse. Every input path lands in exactly one map.
#[derive(Debug, Clone)]
pub struct BatchResult<T> {
    pub success: IndexMap<PathBuf, T>,
    pub errors: IndexMap<PathBuf, String>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self {
            success: IndexMap::new(),
            errors: IndexMap::new(),
        }
    }
}

impl<T> BatchResult<T> {
    pub fn len(&self) -> usize {
        self.success.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhpFileParser {
    parallel: bool,
}

impl Default for PhpFileParser {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl PhpFileParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Read, parse and replay every node of `path` through `processor`.
    pub fn parse<P: NodeProcessor>(&self, path: &Path, processor: P) -> Result<P> {
        let content = io::read_file(path)?;
        self.parse_content(&content, path, processor)
    }

    pub fn parse_content<P: NodeProcessor>(
        &self,
        content: &str,
        path: &Path,
        mut processor: P,
    ) -> Result<P> {
        let ast = parse_source(content, path)?;
        let root = lower(&ast);
        root.walk(&mut |node| processor.process(node));
        Ok(processor)
    }

    /// Parse each path with a fresh processor, keeping the processors.
    pub fn parse_files<P, F>(&self, paths: &[PathBuf], factory: F) -> BatchResult<P>
    where
        P: NodeProcessor + Send,
        F: Fn() -> P + Sync,
    {
        self.parse_files_with_mapping(paths, factory, |processor, _| processor)
    }

    /// Parse each path with a fresh processor and map the result.
    ///
    /// A failing file is recorded under `errors` and never stops the batch.
    /// Results keep input order regardless of completion order.
    pub fn parse_files_with_mapping<P, T, F, M>(
        &self,
        paths: &[PathBuf],
        factory: F,
        mapper: M,
    ) -> BatchResult<T>
    where
        P: NodeProcessor,
        T: Send,
        F: Fn() -> P + Sync,
        M: Fn(P, &Path) -> T + Sync,
    {
        let run_one = |path: &PathBuf| -> (PathBuf, std::result::Result<T, String>) {
            let outcome = self
                .parse(path, factory())
                .map(|processor| mapper(processor, path))
                .map_err(|e| {
                    tracing::debug!("Failed to parse {}: {}", path.display(), e);
                    e.to_string()
                });
            (path.clone(), outcome)
        };

        let outcomes: Vec<_> = if self.parallel {
            paths.par_iter().map(run_one).collect()
        } else {
            paths.iter().map(run_one).collect()
        };

        outcomes
            .into_iter()
            .fold(BatchResult::default(), |mut batch, (path, outcome)| {
                match outcome {
                    Ok(value) => {
                        batch.success.insert(path, value);
                    }
                    Err(message) => {
                        batch.errors.insert(path, message);
                    }
                }
                batch
            })
    }
}
