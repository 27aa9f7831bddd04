use super::{resolve_scalar, subscript_of, NodeProcessor};
use crate::core::ast::Node;
use crate::core::values::ConfigValues;

/// Where a generation keeps its application settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigShape {
    /// `$config['key'] = literal;`
    ArrayAssignment { variable: &'static str },
    /// `public $key = literal;` inside the config class.
    ClassProperty,
}

#[derive(Debug, Clone)]
pub struct ConfigProcessor {
    shape: ConfigShape,
    values: ConfigValues,
}

impl ConfigProcessor {
    pub fn new(shape: ConfigShape) -> Self {
        Self {
            shape,
            values: ConfigValues::new(),
        }
    }

    pub fn shape(&self) -> ConfigShape {
        self.shape
    }
}

impl NodeProcessor for ConfigProcessor {
    type Output = ConfigValues;

    fn process(&mut self, node: &Node) {
        match (self.shape, node) {
            (ConfigShape::ArrayAssignment { variable }, Node::Assign { target, value }) => {
                let Some(key) = subscript_of(target, variable) else {
                    return;
                };
                if let Some(value) = resolve_scalar(value) {
                    self.values.insert(key.to_string(), value);
                }
            }
            (ConfigShape::ClassProperty, Node::Property(property)) => {
                for element in &property.elements {
                    if let Some(value) = element.default.as_ref().and_then(resolve_scalar) {
                        self.values.insert(element.name.clone(), value);
                    }
                }
            }
            _ => {}
        }
    }

    fn results(&self) -> ConfigValues {
        self.values.clone()
    }
}
