//! Output re-serialization.
//!
//! Re-renders the engine's auto-fixed CSS in one of two presentation
//! styles by walking a tree-sitter syntax tree. HTML input is never
//! touched: the engine already fixed the CSS inside the `<style>` tags and
//! re-serializing the container would corrupt it.

use tree_sitter::Node;

use crate::error::{Result, StylefixError};
use crate::schema::{OutputStyle, Syntax};

const INDENT: &str = "  ";

/// Re-serialize `fixed_code` in the requested style.
///
/// Returns the input unchanged when no style was requested or when the
/// source is an HTML container.
pub fn format_output(
    fixed_code: &str,
    style: Option<OutputStyle>,
    syntax: Syntax,
) -> Result<String> {
    let Some(style) = style else {
        return Ok(fixed_code.to_string());
    };
    if syntax == Syntax::Html {
        return Ok(fixed_code.to_string());
    }

    reserialize(fixed_code, style)
}

fn reserialize(source: &str, style: OutputStyle) -> Result<String> {
    let language: tree_sitter::Language = tree_sitter_css::language().into();
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| StylefixError::CssParse {
            message: format!("failed to load CSS grammar: {:?}", e),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| StylefixError::CssParse {
            message: "failed to parse fixed CSS".to_string(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(StylefixError::CssParse {
            message: describe_first_error(&root),
        });
    }

    let mut out = String::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match style {
            OutputStyle::Nested => render_nested(&child, source, 0, &mut out),
            OutputStyle::Compact => render_compact(&child, source, &mut out),
        }
    }
    Ok(out)
}

/// Nested style: `{` opens the block, one declaration per line indented two
/// spaces, `}` on its own line. Rules inside at-rules indent one level
/// deeper.
fn render_nested(node: &Node, source: &str, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);

    if node.kind() == "declaration" {
        out.push_str(&pad);
        out.push_str(&declaration_text(node, source));
        out.push_str(";\n");
        return;
    }

    match block_child(node) {
        Some(block) => {
            let prelude = prelude_text(node, &block, source);
            out.push_str(&pad);
            out.push_str(&prelude);
            out.push_str(" {\n");

            let mut cursor = block.walk();
            for item in block.named_children(&mut cursor) {
                render_nested(&item, source, depth + 1, out);
            }

            out.push_str(&pad);
            out.push_str("}\n");
        }
        None => {
            // comments and blockless at-rules pass through verbatim
            out.push_str(&pad);
            out.push_str(node_text(node, source).trim());
            out.push('\n');
        }
    }
}

/// Compact style: each declaration block on a single line as
/// `selector { decl1; decl2; }`. Block-holding at-rules keep their braces
/// on their own lines with one inner rule per line.
fn render_compact(node: &Node, source: &str, out: &mut String) {
    match node.kind() {
        "rule_set" | "keyframe_block" => {
            out.push_str(&compact_rule(node, source));
            out.push('\n');
        }
        _ => match block_child(node) {
            Some(block) => {
                out.push_str(&prelude_text(node, &block, source));
                out.push_str(" {\n");

                let mut cursor = block.walk();
                for item in block.named_children(&mut cursor) {
                    render_compact(&item, source, out);
                }

                out.push_str("}\n");
            }
            None => {
                out.push_str(node_text(node, source).trim());
                out.push('\n');
            }
        },
    }
}

fn compact_rule(node: &Node, source: &str) -> String {
    let Some(block) = block_child(node) else {
        return node_text(node, source).trim().to_string();
    };

    let prelude = prelude_text(node, &block, source);
    let mut parts: Vec<String> = Vec::new();
    let mut cursor = block.walk();
    for item in block.named_children(&mut cursor) {
        match item.kind() {
            "declaration" => parts.push(format!("{};", declaration_text(&item, source))),
            "comment" => parts.push(node_text(&item, source).trim().to_string()),
            _ => parts.push(compact_rule(&item, source)),
        }
    }

    if parts.is_empty() {
        format!("{} {{ }}", prelude)
    } else {
        format!("{} {{ {} }}", prelude, parts.join(" "))
    }
}

/// The part of a rule before its block: selectors, at-rule preludes,
/// keyframe selectors. Multi-line selector lists collapse to one line.
fn prelude_text(node: &Node, block: &Node, source: &str) -> String {
    let raw = &source[node.start_byte()..block.start_byte()];
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One declaration as `property: value`, with the trailing semicolon and
/// the engine's colon spacing normalized away.
fn declaration_text(node: &Node, source: &str) -> String {
    let mut cursor = node.walk();
    let colon = node.children(&mut cursor).find(|c| c.kind() == ":");

    match colon {
        Some(colon) => {
            let property = source[node.start_byte()..colon.start_byte()].trim();
            let value = source[colon.end_byte()..node.end_byte()]
                .trim()
                .trim_end_matches(';')
                .trim_end();
            format!("{}: {}", property, value)
        }
        None => node_text(node, source)
            .trim()
            .trim_end_matches(';')
            .trim_end()
            .to_string(),
    }
}

fn block_child<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|c| matches!(c.kind(), "block" | "keyframe_block_list"));
    found
}

/// Get text content of a node
fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn describe_first_error(root: &Node) -> String {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return format!(
                "unexpected token at line {}, column {}",
                pos.row + 1,
                pos.column + 1
            );
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return "invalid CSS".to_string();
            }
        }
    }
}
