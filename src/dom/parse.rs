//! Renderer: interprets source markup into a [`Tree`]
//!
//! Parsing is done with tree-sitter's HTML grammar. Text is not taken from the
//! grammar's text tokens (they drop surrounding whitespace); instead every gap
//! between markup nodes inside an element becomes a text node, so the tree
//! serializes back to the same bytes the source holds.

use std::ops::Range;

use thiserror::Error;
use tree_sitter::{Node as TsNode, Parser};

use super::entities::decode_entities;
use super::{Attribute, Element, NodeId, NodeKind, Origin, Tree};

/// Failure to produce a rendered tree for a document
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markup grammar could not be loaded: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    #[error("parser returned no tree")]
    Aborted,
}

/// Isolated rendering context
///
/// Holds the parser between cycles; every call to [`Renderer::render`] builds a
/// brand new tree with nothing carried over from the previous one.
pub struct Renderer {
    parser: Parser,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_html::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Render a complete document
    pub fn render(&mut self, source: &str) -> Result<Tree, RenderError> {
        let parsed = self
            .parser
            .parse(source, None)
            .ok_or(RenderError::Aborted)?;

        let mut builder = Builder {
            src: source,
            tree: Tree::new(),
        };
        let root = builder.tree.root();
        builder.fill(parsed.root_node(), root, 0..source.len());

        tracing::debug!(
            bytes = source.len(),
            has_error = parsed.root_node().has_error(),
            "rendered document"
        );
        Ok(builder.tree)
    }
}

struct Builder<'a> {
    src: &'a str,
    tree: Tree,
}

impl Builder<'_> {
    fn slice(&self, range: Range<usize>) -> &str {
        self.src.get(range).unwrap_or("")
    }

    /// Add the markup nodes of `ts` lying inside `region` to `parent`; the
    /// bytes between them become text nodes.
    fn fill(&mut self, ts: TsNode, parent: NodeId, region: Range<usize>) {
        let mut pos = region.start;
        self.walk(ts, parent, &mut pos, region.end);
        self.push_text(parent, pos..region.end);
    }

    fn walk(&mut self, ts: TsNode, parent: NodeId, pos: &mut usize, end: usize) {
        let mut cursor = ts.walk();
        let children: Vec<TsNode> = ts.named_children(&mut cursor).collect();

        for child in children {
            if child.start_byte() >= end {
                break;
            }
            if child.start_byte() < *pos {
                continue;
            }
            match child.kind() {
                // Covered by the gap text
                "text" | "entity" => {}
                // Recovery nodes are transparent: their content belongs to `parent`
                "ERROR" => self.walk(child, parent, pos, end),
                "element" | "script_element" | "style_element" => {
                    self.push_text(parent, *pos..child.start_byte());
                    self.element(child, parent);
                    *pos = child.end_byte();
                }
                // A start tag outside any element only shows up during error recovery
                "start_tag" | "self_closing_tag" => {
                    self.push_text(parent, *pos..child.start_byte());
                    let el = self.tag(child);
                    let id = self.tree.create(
                        NodeKind::Element(el),
                        Some(child.byte_range()),
                        Origin::Source,
                    );
                    self.tree.append(parent, id);
                    *pos = child.end_byte();
                }
                // Stray end tags are dropped
                "end_tag" | "erroneous_end_tag" => {
                    self.push_text(parent, *pos..child.start_byte());
                    *pos = child.end_byte();
                }
                "comment" => {
                    self.push_text(parent, *pos..child.start_byte());
                    let raw = self.slice(child.byte_range());
                    let body = raw
                        .strip_prefix("<!--")
                        .map(|b| b.strip_suffix("-->").unwrap_or(b))
                        .unwrap_or(raw)
                        .to_string();
                    let id = self.tree.create(
                        NodeKind::Comment(body),
                        Some(child.byte_range()),
                        Origin::Source,
                    );
                    self.tree.append(parent, id);
                    *pos = child.end_byte();
                }
                "doctype" => {
                    self.push_text(parent, *pos..child.start_byte());
                    let raw = self.slice(child.byte_range()).to_string();
                    let id = self.tree.create(
                        NodeKind::Doctype(raw),
                        Some(child.byte_range()),
                        Origin::Source,
                    );
                    self.tree.append(parent, id);
                    *pos = child.end_byte();
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, ts: TsNode, parent: NodeId) {
        let mut cursor = ts.walk();
        let parts: Vec<TsNode> = ts.named_children(&mut cursor).collect();

        let Some(open) = parts
            .iter()
            .find(|p| matches!(p.kind(), "start_tag" | "self_closing_tag"))
            .copied()
        else {
            // No recognizable open tag: keep whatever content there is
            self.fill(ts, parent, ts.byte_range());
            return;
        };
        let close = parts.iter().rev().find(|p| p.kind() == "end_tag").copied();

        let el = self.tag(open);
        let raw_text = el.is_raw_text();

        // An unclosed void tag is parsed as owning what follows it; that
        // content belongs to the enclosing element
        if el.is_void() {
            let id = self.tree.create(
                NodeKind::Element(el),
                Some(open.byte_range()),
                Origin::Source,
            );
            self.tree.append(parent, id);
            self.fill(ts, parent, open.end_byte()..ts.end_byte());
            return;
        }

        let id = self.tree.create(
            NodeKind::Element(el),
            Some(ts.byte_range()),
            Origin::Source,
        );
        self.tree.append(parent, id);

        if open.kind() == "self_closing_tag" {
            return;
        }

        let start = open.end_byte();
        let end = close.map(|c| c.start_byte()).unwrap_or(ts.end_byte());
        if start >= end {
            return;
        }

        if raw_text {
            let body = self.slice(start..end).to_string();
            let text = self
                .tree
                .create(NodeKind::Text(body), Some(start..end), Origin::Source);
            self.tree.append(id, text);
        } else {
            self.fill(ts, id, start..end);
        }
    }

    fn tag(&self, tag: TsNode) -> Element {
        let mut cursor = tag.walk();
        let mut el = Element::new("");
        for part in tag.named_children(&mut cursor) {
            match part.kind() {
                "tag_name" => el.tag = self.slice(part.byte_range()).to_ascii_lowercase(),
                "attribute" => {
                    // First occurrence of a duplicated attribute wins
                    if let Some(attr) = self.attribute(part) {
                        if el.attr(&attr.name).is_none() {
                            el.attrs.push(attr);
                        }
                    }
                }
                _ => {}
            }
        }
        el
    }

    fn attribute(&self, attr: TsNode) -> Option<Attribute> {
        let mut cursor = attr.walk();
        let mut name = None;
        let mut value = String::new();
        for part in attr.named_children(&mut cursor) {
            match part.kind() {
                "attribute_name" => {
                    name = Some(self.slice(part.byte_range()).to_ascii_lowercase());
                }
                "attribute_value" => value = decode_entities(self.slice(part.byte_range())),
                "quoted_attribute_value" => {
                    let quoted = self.slice(part.byte_range());
                    let inner = quoted
                        .get(1..quoted.len().saturating_sub(1))
                        .unwrap_or("");
                    value = decode_entities(inner);
                }
                _ => {}
            }
        }
        name.map(|name| Attribute { name, value })
    }

    fn push_text(&mut self, parent: NodeId, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let text = decode_entities(self.slice(range.clone()));
        if text.is_empty() {
            return;
        }
        let id = self
            .tree
            .create(NodeKind::Text(text), Some(range), Origin::Source);
        self.tree.append(parent, id);
    }
}
