//! Markup serialization

use super::entities::{escape_attribute, escape_text};
use super::{Element, NodeId, NodeKind, Origin, Tree};

/// Which flavor of markup to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Markup as the source text holds it: injected nodes, editable wrappers
    /// and overlays are left out. Used for matching against the source.
    Source,
    /// Everything currently in the rendered view
    Live,
}

pub(super) fn serialize(tree: &Tree, id: NodeId, mode: Markup) -> String {
    let mut out = String::new();
    write_node(tree, id, mode, &mut out);
    out
}

fn write_node(tree: &Tree, id: NodeId, mode: Markup, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };

    if mode == Markup::Source {
        match node.origin {
            Origin::Injected => return,
            Origin::EditableWrapper => {
                write_children(tree, id, mode, out);
                return;
            }
            Origin::Source => {}
        }
    }

    match &node.kind {
        NodeKind::Document => write_children(tree, id, mode, out),
        NodeKind::Doctype(raw) => out.push_str(raw),
        NodeKind::Comment(body) => {
            out.push_str("<!--");
            out.push_str(body);
            out.push_str("-->");
        }
        NodeKind::Text(text) => {
            let raw_parent = tree
                .parent_element(id)
                .and_then(|p| tree.element(p))
                .is_some_and(Element::is_raw_text);
            if raw_parent {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        NodeKind::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for attr in &el.attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(&attr.value));
                out.push('"');
            }
            if mode == Markup::Live {
                if let Some(overlay) = node.overlay.as_str() {
                    out.push_str(" data-overlay=\"");
                    out.push_str(overlay);
                    out.push('"');
                }
            }
            out.push('>');
            if el.is_void() {
                return;
            }
            write_children(tree, id, mode, out);
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

fn write_children(tree: &Tree, id: NodeId, mode: Markup, out: &mut String) {
    if let Some(node) = tree.get(id) {
        for &child in &node.children {
            write_node(tree, child, mode, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Overlay;

    #[test]
    fn test_source_markup_skips_instrumentation() {
        let mut tree = Tree::new();
        let div = tree.create(
            NodeKind::Element(Element::new("div").with_attr("id", "a")),
            None,
            Origin::Source,
        );
        tree.append(tree.root(), div);
        let text = tree.create(NodeKind::Text("X".into()), None, Origin::Source);
        tree.append(div, text);
        let wrapper = tree.create(
            NodeKind::Element(Element::new("span").with_attr("contenteditable", "true")),
            None,
            Origin::EditableWrapper,
        );
        tree.wrap(text, wrapper);
        let style = tree.create(
            NodeKind::Element(Element::new("style")),
            None,
            Origin::Injected,
        );
        tree.append(tree.root(), style);
        tree.get_mut(div).unwrap().overlay = Overlay::Solid;

        assert_eq!(tree.source_markup(tree.root()), r#"<div id="a">X</div>"#);
        assert_eq!(
            tree.live_markup(div),
            r#"<div id="a" data-overlay="solid"><span contenteditable="true">X</span></div>"#
        );
    }

    #[test]
    fn test_void_and_comment() {
        let mut tree = Tree::new();
        let hr = tree.create(NodeKind::Element(Element::new("hr")), None, Origin::Source);
        let c = tree.create(NodeKind::Comment(" note ".into()), None, Origin::Source);
        tree.append(tree.root(), hr);
        tree.append(tree.root(), c);
        assert_eq!(tree.source_markup(tree.root()), "<hr><!-- note -->");
    }
}
