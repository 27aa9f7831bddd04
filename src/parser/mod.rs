//! Tree-sitter parser integration for PHP
//!
//! Turns PHP source into a [`PhpAst`], then lowers it into the owned
//! [`Node`](crate::core::ast::Node) tree the processors walk.

pub mod file;
pub mod literal;
pub mod lower;

use crate::core::ast::PhpAst;
use crate::core::errors::{Error, Result};
use std::path::Path;
use tree_sitter::{Language, Parser, Tree};

pub use file::{BatchResult, PhpFileParser};
pub use lower::lower;

fn php_language() -> Language {
    tree_sitter_php::LANGUAGE_PHP.into()
}

/// Parse PHP source code into a tree-sitter AST.
///
/// Tree-sitter recovers from syntax errors; any ERROR or MISSING node is
/// reported as [`Error::Parse`] at its position.
pub fn parse_source(content: &str, path: &Path) -> Result<PhpAst> {
    let mut parser = Parser::new();
    parser
        .set_language(&php_language())
        .map_err(|e| parse_error(path, 0, 0, format!("failed to load PHP grammar: {e}")))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| parse_error(path, 0, 0, "parser returned no tree"))?;

    if has_parse_errors(&tree) {
        let root = tree.root_node();
        let culprit = first_error_node(root).unwrap_or(root);
        let message = if culprit.is_missing() {
            format!("missing `{}`", culprit.kind())
        } else {
            let snippet: String = node_text(&culprit, content).chars().take(40).collect();
            format!("syntax error near `{}`", snippet.trim())
        };
        return Err(parse_error(
            path,
            node_line(&culprit),
            node_column(&culprit),
            message,
        ));
    }

    Ok(PhpAst {
        tree,
        path: path.to_path_buf(),
        source: content.to_string(),
    })
}

fn parse_error(path: &Path, line: usize, column: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        line,
        column,
        message: message.into(),
    }
}

fn first_error_node(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error_node)
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &tree_sitter::Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &tree_sitter::Node) -> usize {
    node.start_position().row + 1
}

/// Get the column number for a tree-sitter node (1-indexed)
pub fn node_column(node: &tree_sitter::Node) -> usize {
    node.start_position().column + 1
}
