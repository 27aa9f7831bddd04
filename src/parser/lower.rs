//! Lowering of the tree-sitter concrete tree into [`Node`].

use crate::core::ast::{ArrayItem, ClassDecl, MethodDecl, Node, PhpAst, PropertyDecl, PropertyElement};
use crate::core::facts::Visibility;
use crate::core::values::ScalarValue;

use super::literal;
use super::node_text;

type TsNode<'t> = tree_sitter::Node<'t>;

/// Lower a parsed file; the root is an `Other` node of kind `program`.
pub fn lower(ast: &PhpAst) -> Node {
    Lowerer {
        source: &ast.source,
    }
    .lower_node(ast.tree.root_node())
}

/// Lower a source snippet without error checks. Test helper for processors.
#[cfg(test)]
pub(crate) fn lower_snippet(source: &str) -> Node {
    let ast = super::parse_source(source, std::path::Path::new("snippet.php"))
        .unwrap_or_else(|e| panic!("snippet failed to parse: {e}"));
    lower(&ast)
}

struct Lowerer<'s> {
    source: &'s str,
}

impl<'s> Lowerer<'s> {
    fn text(&self, node: TsNode<'_>) -> &'s str {
        node_text(&node, self.source)
    }

    fn lower_node(&self, node: TsNode<'_>) -> Node {
        match node.kind() {
            "assignment_expression" => self.assignment(node),
            "subscript_expression" => self.subscript(node),
            "variable_name" => Node::Variable(self.variable_name(node)),
            "string" => self.plain_string(node),
            "encapsed_string" => self.encapsed_string(node),
            "integer" => self.literal(node, literal::integer(self.text(node))),
            "float" => self.literal(node, literal::float(self.text(node))),
            "boolean" | "null" => self.literal(node, literal::keyword(self.text(node))),
            "name" | "qualified_name" => match literal::keyword(self.text(node)) {
                Some(value) => Node::Literal(value),
                None => Node::other(node.kind(), Vec::new()),
            },
            "unary_op_expression" => self.unary(node),
            "parenthesized_expression" => match self.named(node).first() {
                Some(inner) => self.lower_node(*inner),
                None => Node::other(node.kind(), Vec::new()),
            },
            "array_creation_expression" => self.array(node),
            "class_declaration" => self.class(node),
            "method_declaration" => self.method(node),
            "property_declaration" => self.property(node),
            "member_call_expression" | "nullsafe_member_call_expression" => {
                self.member_call(node)
            }
            "member_access_expression" | "nullsafe_member_access_expression" => {
                self.member_access(node)
            }
            "function_call_expression" => self.function_call(node),
            kind => Node::other(kind, self.lower_children(node)),
        }
    }

    fn named<'t>(&self, node: TsNode<'t>) -> Vec<TsNode<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    fn lower_children(&self, node: TsNode<'_>) -> Vec<Node> {
        self.named(node)
            .into_iter()
            .map(|child| self.lower_node(child))
            .collect()
    }

    fn literal(&self, node: TsNode<'_>, value: Option<ScalarValue>) -> Node {
        match value {
            Some(value) => Node::Literal(value),
            None => Node::other(node.kind(), Vec::new()),
        }
    }

    fn variable_name(&self, node: TsNode<'_>) -> String {
        self.text(node).trim_start_matches('$').to_string()
    }

    fn plain_string(&self, node: TsNode<'_>) -> Node {
        let raw = self.text(node);
        let decoded = literal::single_quoted(raw).or_else(|| literal::double_quoted(raw));
        self.literal(node, decoded.map(ScalarValue::String))
    }

    /// Double-quoted strings count as literals only without interpolation.
    fn encapsed_string(&self, node: TsNode<'_>) -> Node {
        let mut cursor = node.walk();
        let interpolated = node.named_children(&mut cursor).any(|child| {
            !matches!(
                child.kind(),
                "string_content" | "string_value" | "escape_sequence"
            )
        });
        if interpolated {
            return Node::other(node.kind(), self.lower_children(node));
        }
        let decoded = literal::double_quoted(self.text(node));
        self.literal(node, decoded.map(ScalarValue::String))
    }

    fn unary(&self, node: TsNode<'_>) -> Node {
        let operator = node
            .child_by_field_name("operator")
            .or_else(|| node.child(0))
            .map(|op| self.text(op).trim())
            .unwrap_or_default();
        let mut cursor = node.walk();
        let operand = node
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment")
            .map(|child| self.lower_node(child));

        match (operator, operand) {
            ("-", Some(Node::Literal(ScalarValue::Int(i)))) => match i.checked_neg() {
                Some(neg) => Node::Literal(ScalarValue::Int(neg)),
                None => Node::Literal(ScalarValue::Float(-(i as f64))),
            },
            ("-", Some(Node::Literal(ScalarValue::Float(f)))) => {
                Node::Literal(ScalarValue::Float(-f))
            }
            ("+", Some(literal @ Node::Literal(ScalarValue::Int(_) | ScalarValue::Float(_)))) => {
                literal
            }
            (_, operand) => Node::other(node.kind(), operand.into_iter().collect()),
        }
    }

    fn assignment(&self, node: TsNode<'_>) -> Node {
        match (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) {
            (Some(left), Some(right)) => Node::Assign {
                target: Box::new(self.lower_node(left)),
                value: Box::new(self.lower_node(right)),
            },
            _ => Node::other(node.kind(), self.lower_children(node)),
        }
    }

    fn subscript(&self, node: TsNode<'_>) -> Node {
        let mut cursor = node.walk();
        let mut parts = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment");
        let Some(base) = parts.next() else {
            return Node::other(node.kind(), Vec::new());
        };
        let key = parts.next();
        Node::Subscript {
            base: Box::new(self.lower_node(base)),
            key: key.map(|k| Box::new(self.lower_node(k))),
        }
    }

    fn array(&self, node: TsNode<'_>) -> Node {
        let mut cursor = node.walk();
        let elements: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "array_element_initializer")
            .collect();
        let items = elements
            .into_iter()
            .filter_map(|element| self.array_item(element))
            .collect();
        Node::Array(items)
    }

    fn array_item(&self, element: TsNode<'_>) -> Option<ArrayItem> {
        let mut cursor = element.walk();
        let children: Vec<_> = element.children(&mut cursor).collect();
        let has_arrow = children.iter().any(|child| child.kind() == "=>");
        let named: Vec<_> = children
            .into_iter()
            .filter(|child| child.is_named() && child.kind() != "comment")
            .collect();

        let value = self.lower_node(*named.last()?);
        let key = if has_arrow && named.len() >= 2 {
            Some(self.lower_node(named[0]))
        } else {
            None
        };
        Some(ArrayItem { key, value })
    }

    fn class(&self, node: TsNode<'_>) -> Node {
        let Some(name) = node.child_by_field_name("name") else {
            return Node::other(node.kind(), self.lower_children(node));
        };

        let mut cursor = node.walk();
        let parent = node
            .children(&mut cursor)
            .find(|child| child.kind() == "base_clause")
            .and_then(|clause| {
                let mut inner = clause.walk();
                let found = clause
                    .named_children(&mut inner)
                    .find(|c| matches!(c.kind(), "name" | "qualified_name"));
                found
            })
            .map(|parent| self.text(parent).trim_start_matches('\\').to_string());

        let members = node
            .child_by_field_name("body")
            .map(|body| self.lower_children(body))
            .unwrap_or_default();

        Node::Class(ClassDecl {
            name: self.text(name).to_string(),
            parent,
            members,
        })
    }

    fn visibility(&self, node: TsNode<'_>) -> Visibility {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .find(|child| child.kind() == "visibility_modifier")
            .and_then(|modifier| Visibility::from_keyword(self.text(modifier).trim()));
        found.unwrap_or_default()
    }

    fn method(&self, node: TsNode<'_>) -> Node {
        let Some(name) = node.child_by_field_name("name") else {
            return Node::other(node.kind(), self.lower_children(node));
        };

        let params = node
            .child_by_field_name("parameters")
            .map(|params| self.parameter_names(params))
            .unwrap_or_default();

        let body_node = node.child_by_field_name("body");
        let body = body_node
            .map(|body| self.lower_children(body))
            .unwrap_or_default();
        let summary = summarize(body_node.map(|body| self.text(body)).unwrap_or_default());

        Node::Method(MethodDecl {
            name: self.text(name).to_string(),
            visibility: self.visibility(node),
            params,
            body,
            summary,
        })
    }

    fn parameter_names(&self, params: TsNode<'_>) -> Vec<String> {
        let mut cursor = params.walk();
        let list: Vec<_> = params.named_children(&mut cursor).collect();
        list.into_iter()
            .filter(|param| {
                matches!(
                    param.kind(),
                    "simple_parameter" | "variadic_parameter" | "property_promotion_parameter"
                )
            })
            .filter_map(|param| {
                param.child_by_field_name("name").or_else(|| {
                    let mut inner = param.walk();
                    let found = param
                        .named_children(&mut inner)
                        .find(|c| c.kind() == "variable_name");
                    found
                })
            })
            .map(|name| self.variable_name(name))
            .collect()
    }

    fn property(&self, node: TsNode<'_>) -> Node {
        let mut cursor = node.walk();
        let declared: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "property_element")
            .collect();
        let elements = declared
            .into_iter()
            .filter_map(|element| self.property_element(element))
            .collect();

        Node::Property(PropertyDecl {
            visibility: self.visibility(node),
            elements,
        })
    }

    fn property_element(&self, element: TsNode<'_>) -> Option<PropertyElement> {
        let mut cursor = element.walk();
        let named: Vec<_> = element
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect();

        let name = element
            .child_by_field_name("name")
            .or_else(|| named.iter().copied().find(|c| c.kind() == "variable_name"))?;

        let default = element
            .child_by_field_name("default_value")
            .or_else(|| {
                named
                    .iter()
                    .copied()
                    .find(|c| c.kind() == "property_initializer")
                    .and_then(|init| {
                        let mut inner = init.walk();
                        let found = init
                            .named_children(&mut inner)
                            .find(|c| c.kind() != "comment");
                        found
                    })
            })
            .or_else(|| {
                named
                    .iter()
                    .copied()
                    .find(|c| c.id() != name.id() && c.kind() != "property_initializer")
            })
            .map(|value| self.lower_node(value));

        Some(PropertyElement {
            name: self.variable_name(name),
            default,
        })
    }

    fn arguments(&self, node: Option<TsNode<'_>>) -> Vec<Node> {
        let Some(args) = node else {
            return Vec::new();
        };
        let mut cursor = args.walk();
        let list: Vec<_> = args
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "argument")
            .collect();
        list.into_iter()
            .filter_map(|argument| {
                let mut inner = argument.walk();
                let last = argument
                    .named_children(&mut inner)
                    .filter(|c| c.kind() != "comment")
                    .last();
                last
            })
            .map(|value| self.lower_node(value))
            .collect()
    }

    fn member_name(&self, node: TsNode<'_>) -> Option<String> {
        node.child_by_field_name("name")
            .filter(|name| name.kind() == "name")
            .map(|name| self.text(name).to_string())
    }

    fn member_call(&self, node: TsNode<'_>) -> Node {
        match (node.child_by_field_name("object"), self.member_name(node)) {
            (Some(object), Some(name)) => Node::MethodCall {
                object: Box::new(self.lower_node(object)),
                name,
                args: self.arguments(node.child_by_field_name("arguments")),
            },
            _ => Node::other(node.kind(), self.lower_children(node)),
        }
    }

    fn member_access(&self, node: TsNode<'_>) -> Node {
        match (node.child_by_field_name("object"), self.member_name(node)) {
            (Some(object), Some(name)) => Node::PropertyFetch {
                object: Box::new(self.lower_node(object)),
                name,
            },
            _ => Node::other(node.kind(), self.lower_children(node)),
        }
    }

    fn function_call(&self, node: TsNode<'_>) -> Node {
        let callee = node
            .child_by_field_name("function")
            .filter(|f| matches!(f.kind(), "name" | "qualified_name"));
        match callee {
            Some(callee) => Node::FunctionCall {
                name: self.text(callee).trim_start_matches('\\').to_string(),
                args: self.arguments(node.child_by_field_name("arguments")),
            },
            None => Node::other(node.kind(), self.lower_children(node)),
        }
    }
}

/// Render a method body as a standalone PHP snippet with common indentation
/// removed.
fn summarize(body: &str) -> String {
    let inner = body
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(body);

    let lines: Vec<&str> = inner.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let lines = match (first, last) {
        (Some(first), Some(last)) => &lines[first..=last],
        _ => return "<?php\n\n?>".to_string(),
    };

    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let body = lines
        .iter()
        .map(|l| {
            if l.len() >= indent && l.is_char_boundary(indent) {
                l[indent..].trim_end()
            } else {
                l.trim()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("<?php\n{body}\n?>")
}
