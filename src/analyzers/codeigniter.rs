use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use super::ProjectAnalyzer;
use crate::core::context::{ProjectContext, SourceArea};
use crate::core::errors::Result;
use crate::core::facts::ClassFacts;
use crate::core::generation::Generation;
use crate::core::report::{AnalysisReport, ClassEntry, FileEntry};
use crate::io::list_php_files;
use crate::parser::{BatchResult, PhpFileParser};
use crate::processors::{
    controller_processor, model_processor, route_processor, NodeProcessor,
};

/// Inventories one CodeIgniter generation's `controllers`, `models`,
/// `libraries` and `helpers` directories.
#[derive(Debug, Clone)]
pub struct CodeIgniterAnalyzer {
    generation: Generation,
    parser: PhpFileParser,
}

impl CodeIgniterAnalyzer {
    pub fn new(generation: Generation) -> Self {
        Self {
            generation,
            parser: PhpFileParser::new(),
        }
    }

    pub fn with_parser(mut self, parser: PhpFileParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    fn classes(
        &self,
        batch: BatchResult<ClassFacts>,
        errors: &mut IndexMap<PathBuf, String>,
    ) -> IndexMap<String, ClassEntry> {
        let mut classes = IndexMap::new();
        for (path, facts) in batch.success {
            let name = facts.name.clone().unwrap_or_else(|| file_stem(&path));
            if classes.contains_key(&name) {
                tracing::debug!("Duplicate class {} in {}, keeping first", name, path.display());
                continue;
            }
            classes.insert(
                name,
                ClassEntry {
                    file: path,
                    extends: facts.extends,
                    methods: facts.methods,
                    tables: facts.tables,
                },
            );
        }
        errors.extend(batch.errors);
        classes
    }

    fn files(&self, dir: &Path) -> Result<IndexMap<String, FileEntry>> {
        Ok(list_php_files(dir)?
            .into_iter()
            .map(|file| (file_stem(&file), FileEntry { file }))
            .collect())
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl ProjectAnalyzer for CodeIgniterAnalyzer {
    fn supports(&self, generation: Generation) -> bool {
        generation == self.generation
    }

    fn analyze(&self, context: &ProjectContext) -> Result<AnalysisReport> {
        let g = self.generation;
        let controllers = controller_processor(g)?;
        let models = model_processor(g)?;
        let routes = route_processor(g)?;

        let controller_files = list_php_files(&context.source_dir(g, SourceArea::Controllers))?;
        let model_files = list_php_files(&context.source_dir(g, SourceArea::Models))?;

        let mut report = AnalysisReport::default();

        let batch = self.parser.parse_files_with_mapping(
            &controller_files,
            || controllers.clone(),
            |p, _| p.results(),
        );
        report.controllers = self.classes(batch, &mut report.errors);

        let batch =
            self.parser
                .parse_files_with_mapping(&model_files, || models.clone(), |p, _| p.results());
        report.models = self.classes(batch, &mut report.errors);

        let batch = self.parser.parse_files_with_mapping(
            &controller_files,
            || routes.clone(),
            |p, _| p.results(),
        );
        report.routes = batch.success.into_values().flatten().collect();
        report.errors.extend(batch.errors);

        report.libraries = self.files(&context.source_dir(g, SourceArea::Libraries))?;
        report.helpers = self.files(&context.source_dir(g, SourceArea::Helpers))?;

        tracing::info!(
            "Analyzed {} project: {} controllers, {} models, {} routes, {} libraries, {} helpers",
            g.short_label(),
            report.controllers.len(),
            report.models.len(),
            report.routes.len(),
            report.libraries.len(),
            report.helpers.len()
        );
        if report.has_errors() {
            tracing::warn!("{} file(s) could not be parsed", report.errors.len());
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::Error;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_directories_yield_empty_report() {
        let dir = TempDir::new().unwrap();
        let ctx = ProjectContext::new(dir.path(), "/out", "app");
        let report = CodeIgniterAnalyzer::new(Generation::Ci3).analyze(&ctx).unwrap();
        assert_eq!(report, AnalysisReport::default());
    }

    #[test]
    fn test_unknown_generation_is_rejected() {
        let dir = TempDir::new().unwrap();
        let ctx = ProjectContext::new(dir.path(), "/out", "app");
        let err = CodeIgniterAnalyzer::new(Generation::Unknown)
            .analyze(&ctx)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedGeneration(Generation::Unknown)));
    }

    #[test]
    fn test_name_falls_back_to_file_stem_and_first_wins() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "application/controllers/a_first.php", "<?php class Shared extends CI_Controller { public function one() {} }");
        write(dir.path(), "application/controllers/b_second.php", "<?php class Shared extends CI_Controller { public function two() {} }");
        write(dir.path(), "application/controllers/plain.php", "<?php function helper_fn() {}");
        write(dir.path(), "application/libraries/Cart.php", "<?php class Cart {}");
        write(dir.path(), "application/helpers/format_helper.php", "<?php");

        let ctx = ProjectContext::new(dir.path(), "/out", "app");
        let report = CodeIgniterAnalyzer::new(Generation::Ci3)
            .with_parser(PhpFileParser::new().with_parallel(false))
            .analyze(&ctx)
            .unwrap();

        assert_eq!(report.controllers.len(), 2);
        assert_eq!(report.controllers["Shared"].methods[0].name, "one");
        assert!(report.controllers.contains_key("plain"));
        assert_eq!(report.routes.len(), 2);
        assert!(report.libraries.contains_key("Cart"));
        assert!(report.helpers.contains_key("format_helper"));
    }
}
