//! Node processors: stateful visitors fed every node of one file.
//!
//! A processor is driven by [`PhpFileParser`](crate::parser::PhpFileParser),
//! which walks the lowered tree in document order and calls
//! [`NodeProcessor::process`] once per node. Shapes a processor does not
//! recognise are ignored.

pub mod class_meta;
pub mod config;
pub mod controller;
pub mod database;
pub mod factory;
pub mod model;
pub mod route;

use crate::core::ast::Node;
use crate::core::values::ScalarValue;

pub use class_meta::{ClassMetaProcessor, DependencyRule};
pub use config::{ConfigProcessor, ConfigShape};
pub use controller::ControllerProcessor;
pub use database::{DatabaseProcessor, DatabaseShape};
pub use factory::{
    config_processor, controller_processor, database_processor, model_processor,
    route_processor,
};
pub use model::ModelProcessor;
pub use route::RouteProcessor;

pub trait NodeProcessor {
    type Output;

    /// Inspect one node. Called once per node, pre-order.
    fn process(&mut self, node: &Node);

    /// Facts accumulated so far. Repeatable, no side effects.
    fn results(&self) -> Self::Output;
}

/// Literal value of an expression, or `None` when it is not statically
/// resolvable (calls, variables, concatenation, interpolation).
pub(crate) fn resolve_scalar(node: &Node) -> Option<ScalarValue> {
    node.as_literal().cloned()
}

/// `'key' => literal` pairs of an array literal, skipping everything else.
pub(crate) fn string_keyed_items(node: &Node) -> Vec<(String, ScalarValue)> {
    let Node::Array(items) = node else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let key = item.key.as_ref()?.as_string_literal()?;
            let value = resolve_scalar(&item.value)?;
            Some((key.to_string(), value))
        })
        .collect()
}

/// `$variable['key']`, returning the key.
pub(crate) fn subscript_of<'a>(node: &'a Node, variable: &str) -> Option<&'a str> {
    match node {
        Node::Subscript {
            base,
            key: Some(key),
        } if base.is_variable(variable) => key.as_string_literal(),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::NodeProcessor;
    use crate::parser::lower::lower_snippet;

    /// Run a processor over a snippet the way the file parser would.
    pub fn run<P: NodeProcessor>(mut processor: P, source: &str) -> P {
        let root = lower_snippet(source);
        root.walk(&mut |node| processor.process(node));
        processor
    }
}
