use super::class_meta::is_constructor;
use super::NodeProcessor;
use crate::core::ast::Node;
use crate::core::facts::RouteFact;

/// Guesses one route per public controller method from naming conventions.
///
/// This is not a read of the project's route table; treat the output as a
/// hint.
#[derive(Debug, Clone, Default)]
pub struct RouteProcessor {
    controller: Option<String>,
    routes: Vec<RouteFact>,
}

impl RouteProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeProcessor for RouteProcessor {
    type Output = Vec<RouteFact>;

    fn process(&mut self, node: &Node) {
        match node {
            Node::Class(class) => self.controller = Some(class.name.clone()),
            Node::Method(method) if method.visibility.is_public() && !is_constructor(method) => {
                if let Some(controller) = self.controller.as_deref().filter(|c| !c.is_empty()) {
                    self.routes.push(RouteFact::infer(controller, &method.name));
                }
            }
            _ => {}
        }
    }

    fn results(&self) -> Vec<RouteFact> {
        self.routes.clone()
    }
}
