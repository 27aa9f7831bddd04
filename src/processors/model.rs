use super::class_meta::{ClassMetaProcessor, ClassMetaRules, TableRule};
use super::NodeProcessor;
use crate::core::ast::Node;
use crate::core::facts::ClassFacts;

/// Model metadata; like a controller plus the tables its queries touch.
#[derive(Debug, Clone)]
pub struct ModelProcessor {
    inner: ClassMetaProcessor,
}

impl ModelProcessor {
    pub fn new(rules: ClassMetaRules) -> Self {
        let rules = if rules.tables.is_some() {
            rules
        } else {
            rules.with_tables(TableRule::QUERY_BUILDER)
        };
        Self {
            inner: ClassMetaProcessor::new(rules),
        }
    }

    pub fn rules(&self) -> &ClassMetaRules {
        self.inner.rules()
    }
}

impl NodeProcessor for ModelProcessor {
    type Output = ClassFacts;

    fn process(&mut self, node: &Node) {
        self.inner.process(node);
    }

    fn results(&self) -> ClassFacts {
        self.inner.results()
    }
}
