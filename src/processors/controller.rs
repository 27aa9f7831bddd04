use super::class_meta::{ClassMetaProcessor, ClassMetaRules};
use super::NodeProcessor;
use crate::core::ast::Node;
use crate::core::facts::ClassFacts;

/// Controller metadata: methods, loaded dependencies and rendered views.
#[derive(Debug, Clone)]
pub struct ControllerProcessor {
    inner: ClassMetaProcessor,
}

impl ControllerProcessor {
    pub fn new(rules: ClassMetaRules) -> Self {
        Self {
            inner: ClassMetaProcessor::new(rules),
        }
    }

    pub fn rules(&self) -> &ClassMetaRules {
        self.inner.rules()
    }
}

impl NodeProcessor for ControllerProcessor {
    type Output = ClassFacts;

    fn process(&mut self, node: &Node) {
        self.inner.process(node);
    }

    fn results(&self) -> ClassFacts {
        self.inner.results()
    }
}
