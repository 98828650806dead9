//! Filepath: src/parsers/go_parser.rs

use anyhow::Result;
use std::path::Path;
use tree_sitter::{Language, Node, Parser};

use crate::core::classify::{BlockKeyword, BlockMember, Declaration};

pub struct GoExtractor {
    language: Language,
}

impl GoExtractor {
    pub fn new() -> Result<Self> {
        let language = tree_sitter_go::LANGUAGE.into();
        Ok(Self { language })
    }

    /// Parse one file and return every top-level declaration, exported or
    /// not. Visibility filtering is a separate, later stage. Declarations
    /// nested inside function bodies are never surfaced.
    pub fn parse_declarations(&self, content: &str, file_path: &Path) -> Result<Vec<Declaration>> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| anyhow::anyhow!("Failed to parse {}", file_path.display()))?;

        let root = tree.root_node();
        if root.has_error() {
            anyhow::bail!("Syntax error in {}", file_path.display());
        }

        let bytes = content.as_bytes();
        let mut out = Vec::new();

        for i in 0..root.named_child_count() {
            let Some(node) = root.named_child(i) else {
                continue;
            };

            match node.kind() {
                "function_declaration" | "method_declaration" => {
                    if let Some(decl) = function_decl(node, bytes) {
                        out.push(decl);
                    }
                }
                "const_declaration" => {
                    if let Some(decl) = keyword_decl(node, bytes, BlockKeyword::Const, &["const_spec"]) {
                        out.push(decl);
                    }
                }
                "var_declaration" => {
                    if let Some(decl) = keyword_decl(node, bytes, BlockKeyword::Var, &["var_spec"]) {
                        out.push(decl);
                    }
                }
                "type_declaration" => {
                    if let Some(decl) =
                        keyword_decl(node, bytes, BlockKeyword::Type, &["type_spec", "type_alias"])
                    {
                        out.push(decl);
                    }
                }
                "import_declaration" => {
                    let paths = import_paths(node, bytes);
                    if !paths.is_empty() {
                        out.push(Declaration::Import { paths });
                    }
                }
                _ => {}
            }
        }

        Ok(out)
    }
}

fn node_text(node: Node, bytes: &[u8]) -> Option<String> {
    node.utf8_text(bytes).ok().map(|s| s.to_string())
}

fn function_decl(node: Node, bytes: &[u8]) -> Option<Declaration> {
    // Methods filter on the method name; the receiver stays in the text.
    let name = node_text(node.child_by_field_name("name")?, bytes)?;
    let text = node_text(node, bytes)?;
    let body_offset = node
        .child_by_field_name("body")
        .map(|body| body.start_byte() - node.start_byte());

    Some(Declaration::Function {
        name,
        text,
        body_offset,
    })
}

/// Shared shape of const/var/type declarations: a keyword followed by one
/// spec, or a parenthesized group of them.
fn keyword_decl(
    node: Node,
    bytes: &[u8],
    keyword: BlockKeyword,
    spec_kinds: &[&str],
) -> Option<Declaration> {
    let mut members = Vec::new();

    for i in 0..node.named_child_count() {
        let Some(spec) = node.named_child(i) else {
            continue;
        };
        if !spec_kinds.contains(&spec.kind()) {
            continue;
        }

        let names = declared_names(spec, bytes);
        let text = node_text(spec, bytes)?;
        members.push(BlockMember { names, text });
    }

    if members.is_empty() {
        return None;
    }

    if is_grouped(node) {
        Some(Declaration::Block { keyword, members })
    } else {
        // A single declaration renders with its own keyword attached.
        let names = members.swap_remove(0).names;
        let text = node_text(node, bytes)?;
        Some(Declaration::Single {
            keyword,
            names,
            text,
        })
    }
}

fn is_grouped(node: Node) -> bool {
    for i in 0..node.child_count() {
        if node.child(i).is_some_and(|c| c.kind() == "(") {
            return true;
        }
    }
    false
}

/// All identifiers declared by one spec (`a, B = 1, 2` yields both).
fn declared_names(spec: Node, bytes: &[u8]) -> Vec<String> {
    let mut cursor = spec.walk();
    spec.children_by_field_name("name", &mut cursor)
        .filter_map(|n| n.utf8_text(bytes).ok())
        .map(|s| s.to_string())
        .collect()
}

/// Quoted import path strings, in source order.
fn import_paths(node: Node, bytes: &[u8]) -> Vec<String> {
    let mut paths = Vec::new();

    for i in 0..node.named_child_count() {
        let Some(child) = node.named_child(i) else {
            continue;
        };
        match child.kind() {
            "import_spec" => {
                if let Some(p) = spec_path(child, bytes) {
                    paths.push(p);
                }
            }
            "import_spec_list" => {
                for j in 0..child.named_child_count() {
                    if let Some(spec) = child.named_child(j)
                        && spec.kind() == "import_spec"
                        && let Some(p) = spec_path(spec, bytes)
                    {
                        paths.push(p);
                    }
                }
            }
            _ => {}
        }
    }

    paths
}

fn spec_path(spec: Node, bytes: &[u8]) -> Option<String> {
    node_text(spec.child_by_field_name("path")?, bytes)
}
