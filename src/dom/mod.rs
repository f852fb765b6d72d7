//! Rendered tree
//!
//! An arena of markup nodes produced by interpreting the source text. The tree
//! is rebuilt from scratch on every source change and never diffed against the
//! previous one. Every node remembers the byte span of the source it came from;
//! nodes added by instrumentation are flagged so they can be left out when the
//! tree is serialized back for matching against the source.

mod entities;
mod parse;
mod selector;
mod serialize;

use std::ops::Range;

pub use entities::{decode_entities, escape_attribute, escape_text};
pub use parse::{RenderError, Renderer};
pub use selector::Selector;
pub use serialize::Markup;

/// Elements whose content is raw text (never entity-decoded, never editable)
pub const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Elements that have no end tag
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Index of a node inside its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A single `name="value"` pair on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Tag and attributes of an element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercased tag name
    pub tag: String,
    pub attrs: Vec<Attribute>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag.as_str())
    }

    pub fn is_raw_text(&self) -> bool {
        RAW_TEXT_TAGS.contains(&self.tag.as_str())
    }

    /// Whitespace-separated class names
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }
}

/// What a node is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    /// Raw doctype declaration, e.g. `<!DOCTYPE html>`
    Doctype(String),
    /// Comment body without the `<!--`/`-->` delimiters
    Comment(String),
    /// Decoded text content (raw for script/style bodies)
    Text(String),
    Element(Element),
}

/// Where a node came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Parsed from the source text
    #[default]
    Source,
    /// Added by instrumentation (stylesheet, hint, floating control)
    Injected,
    /// Editable wrapper around a source text node
    EditableWrapper,
}

/// Non-destructive visual state painted over a node by the live view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    /// Editable unit under the pointer
    Hover,
    /// Editable unit with keyboard focus
    Focus,
    /// Structural container under the pointer in delete mode
    Dashed,
    /// Structural container selected for removal
    Solid,
}

impl Overlay {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Overlay::None => None,
            Overlay::Hover => Some("hover"),
            Overlay::Focus => Some("focus"),
            Overlay::Dashed => Some("dashed"),
            Overlay::Solid => Some("solid"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Byte range in the source this node was parsed from
    pub span: Option<Range<usize>>,
    pub origin: Origin,
    pub overlay: Overlay,
}

impl Node {
    fn new(kind: NodeKind, span: Option<Range<usize>>, origin: Origin) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            span,
            origin,
            overlay: Overlay::None,
        }
    }

    pub fn element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.element().map(|el| el.tag.as_str())
    }

    pub fn is_injected(&self) -> bool {
        self.origin == Origin::Injected
    }
}

/// Arena-backed markup tree rooted at a `Document` node
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, None, Origin::Source)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).and_then(Node::element)
    }

    /// Create a detached node; attach it with [`Tree::append`] or [`Tree::insert`]
    pub fn create(&mut self, kind: NodeKind, span: Option<Range<usize>>, origin: Origin) -> NodeId {
        self.nodes.push(Node::new(kind, span, origin));
        NodeId(self.nodes.len() - 1)
    }

    /// Attach `child` as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Attach `child` at `index` among `parent`'s children
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Unlink a node from its parent. The node and its subtree stay in the
    /// arena but are no longer reachable from the root.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get(id.0).and_then(|n| n.parent) else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != id);
        self.nodes[id.0].parent = None;
    }

    /// Put `wrapper` where `target` was and move `target` inside it
    pub fn wrap(&mut self, target: NodeId, wrapper: NodeId) {
        let Some(parent) = self.get(target).and_then(|n| n.parent) else {
            return;
        };
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == target)
            .unwrap_or(0);
        self.detach(target);
        self.insert(parent, index, wrapper);
        self.append(wrapper, target);
    }

    /// True if the node is reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.root() {
                return true;
            }
            current = self.get(node_id).and_then(|n| n.parent);
        }
        false
    }

    /// Ancestors of a node, nearest first, excluding the node itself
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).and_then(|n| n.parent), move |&p| {
            self.get(p).and_then(|n| n.parent)
        })
    }

    /// Nearest element ancestor of a node
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|&a| self.element(a).is_some())
    }

    /// Nodes below `from` (inclusive) in document order
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.get(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// First attached element with the given tag
    pub fn find_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&id| self.get(id).and_then(Node::tag) == Some(tag))
    }

    /// First attached source element matching the selector
    pub fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    /// All attached source elements matching the selector, in document order
    pub fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&id| {
                self.get(id).is_some_and(|node| {
                    node.origin == Origin::Source
                        && node.element().is_some_and(|el| selector.matches(el))
                })
            })
            .collect()
    }

    /// Concatenated text of all text nodes under `id`
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::text))
            .collect()
    }

    /// Markup of the subtree as it would appear in the source
    pub fn source_markup(&self, id: NodeId) -> String {
        serialize::serialize(self, id, Markup::Source)
    }

    /// Markup of the subtree including instrumentation
    pub fn live_markup(&self, id: NodeId) -> String {
        serialize::serialize(self, id, Markup::Live)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
