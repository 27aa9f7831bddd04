//! Owned PHP syntax tree handed to node processors.
//!
//! The tree-sitter concrete tree is lowered into [`Node`] once per file, so
//! processors match on a closed set of shapes instead of raw node kinds.

use std::path::PathBuf;

use super::facts::Visibility;
use super::values::ScalarValue;

#[derive(Clone, Debug)]
pub struct PhpAst {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayItem {
    pub key: Option<Node>,
    pub value: Node,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub parent: Option<String>,
    pub members: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub visibility: Visibility,
    pub params: Vec<String>,
    pub body: Vec<Node>,
    /// Body source wrapped in PHP open/close tags.
    pub summary: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyElement {
    /// Name without the leading `$`.
    pub name: String,
    pub default: Option<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDecl {
    pub visibility: Visibility,
    pub elements: Vec<PropertyElement>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Assign {
        target: Box<Node>,
        value: Box<Node>,
    },
    /// `$base[key]`; `key` is `None` for the append form `$base[]`.
    Subscript {
        base: Box<Node>,
        key: Option<Box<Node>>,
    },
    /// Variable name without the leading `$`.
    Variable(String),
    Literal(ScalarValue),
    Array(Vec<ArrayItem>),
    Class(ClassDecl),
    Method(MethodDecl),
    Property(PropertyDecl),
    MethodCall {
        object: Box<Node>,
        name: String,
        args: Vec<Node>,
    },
    FunctionCall {
        name: String,
        args: Vec<Node>,
    },
    PropertyFetch {
        object: Box<Node>,
        name: String,
    },
    /// Any shape processors do not care about; children are still walked.
    Other {
        kind: String,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn other(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Other {
            kind: kind.into(),
            children,
        }
    }

    /// Direct children in document order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Assign { target, value } => vec![target.as_ref(), value.as_ref()],
            Node::Subscript { base, key } => {
                let mut out = vec![base.as_ref()];
                out.extend(key.as_deref());
                out
            }
            Node::Variable(_) | Node::Literal(_) => Vec::new(),
            Node::Array(items) => items
                .iter()
                .flat_map(|item| item.key.iter().chain(std::iter::once(&item.value)))
                .collect(),
            Node::Class(class) => class.members.iter().collect(),
            Node::Method(method) => method.body.iter().collect(),
            Node::Property(property) => property
                .elements
                .iter()
                .filter_map(|element| element.default.as_ref())
                .collect(),
            Node::MethodCall { object, args, .. } => {
                std::iter::once(object.as_ref()).chain(args.iter()).collect()
            }
            Node::FunctionCall { args, .. } => args.iter().collect(),
            Node::PropertyFetch { object, .. } => vec![object.as_ref()],
            Node::Other { children, .. } => children.iter().collect(),
        }
    }

    /// Pre-order depth-first walk, `self` first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    pub fn as_literal(&self) -> Option<&ScalarValue> {
        match self {
            Node::Literal(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&str> {
        self.as_literal().and_then(ScalarValue::as_str)
    }

    pub fn is_variable(&self, name: &str) -> bool {
        matches!(self, Node::Variable(v) if v == name)
    }

    pub fn is_this(&self) -> bool {
        self.is_variable("this")
    }

    /// `$this->name`
    pub fn is_this_property(&self, property: &str) -> bool {
        matches!(self, Node::PropertyFetch { object, name } if object.is_this() && name == property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Node {
        Node::Literal(ScalarValue::from(s))
    }

    #[test]
    fn test_walk_is_preorder() {
        let tree = Node::Assign {
            target: Box::new(Node::Subscript {
                base: Box::new(Node::Variable("config".into())),
                key: Some(Box::new(lit("base_url"))),
            }),
            value: Box::new(lit("http://example.com")),
        };

        let mut kinds = Vec::new();
        tree.walk(&mut |node| {
            kinds.push(match node {
                Node::Assign { .. } => "assign",
                Node::Subscript { .. } => "subscript",
                Node::Variable(_) => "variable",
                Node::Literal(_) => "literal",
                _ => "other",
            })
        });
        assert_eq!(
            kinds,
            vec!["assign", "subscript", "variable", "literal", "literal"]
        );
    }

    #[test]
    fn test_this_property() {
        let fetch = Node::PropertyFetch {
            object: Box::new(Node::Variable("this".into())),
            name: "load".into(),
        };
        assert!(fetch.is_this_property("load"));
        assert!(!fetch.is_this_property("db"));
    }
}
