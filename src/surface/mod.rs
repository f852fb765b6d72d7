//! Editable-surface installer
//!
//! Runs once per freshly rendered tree: every meaningful leaf text region is
//! wrapped in an editable unit, and one stylesheet plus one transient hint are
//! injected. The surface keeps no state between trees; a re-render of the same
//! source produces identical markup.
//!
//! A unit commits when it loses focus, or when Enter is pressed without
//! modifiers (which forces the focus loss instead of inserting a line break).

mod stylesheet;
mod unit;

pub use stylesheet::{delete_mode_css, surface_css};
pub use unit::{EditableUnit, UnitState};

use crate::config::SyncConfig;
use crate::dom::{Element, Node, NodeId, NodeKind, Origin, Tree};
use crate::messages::{Key, Modifiers};
use crate::patch::EditEvent;

/// Inline style of every editable wrapper. Hover and focus states are painted
/// by the injected stylesheet and never change the box metrics.
const UNIT_STYLE: &str =
    "outline: none; border-radius: 2px; display: inline; min-width: 20px; min-height: 1em;";

/// Editable units of one rendered tree and their interaction state
#[derive(Debug, Clone)]
pub struct Surface {
    units: Vec<EditableUnit>,
    /// Source revision the tree was rendered from
    revision: u64,
    stylesheet: NodeId,
    hint: Option<NodeId>,
    focused: Option<usize>,
}

impl Surface {
    /// Instrument a freshly rendered tree
    pub fn install(tree: &mut Tree, config: &SyncConfig, revision: u64) -> Self {
        let units: Vec<EditableUnit> = eligible_text_nodes(tree, config.min_editable_chars)
            .into_iter()
            .map(|text_node| wrap(tree, text_node))
            .collect();

        let stylesheet = inject_stylesheet(tree);
        let hint = config
            .show_hint
            .then(|| inject_hint(tree, &config.hint_text));

        tracing::debug!(units = units.len(), revision, "editable surface installed");

        Self {
            units,
            revision,
            stylesheet,
            hint,
            focused: None,
        }
    }

    pub fn units(&self) -> &[EditableUnit] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> Option<&EditableUnit> {
        self.units.get(index)
    }

    pub fn stylesheet(&self) -> NodeId {
        self.stylesheet
    }

    pub fn hint(&self) -> Option<NodeId> {
        self.hint
    }

    /// Index of the unit owning `node` (its wrapper or its text)
    pub fn unit_index(&self, node: NodeId) -> Option<usize> {
        self.units
            .iter()
            .position(|u| u.wrapper == node || u.text_node == node)
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn pointer_enter(&mut self, tree: &mut Tree, index: usize) {
        if let Some(unit) = self.units.get_mut(index) {
            if unit.state != UnitState::Focused {
                unit.set_state(tree, UnitState::Hovered);
            }
        }
    }

    pub fn pointer_leave(&mut self, tree: &mut Tree, index: usize) {
        if let Some(unit) = self.units.get_mut(index) {
            if unit.state != UnitState::Focused {
                unit.set_state(tree, UnitState::Idle);
            }
        }
    }

    /// Focus a unit. A different unit holding focus is blurred first, which
    /// may commit it.
    pub fn focus(&mut self, tree: &mut Tree, index: usize) -> Option<EditEvent> {
        if index >= self.units.len() || self.focused == Some(index) {
            return None;
        }
        let committed = self.focused.and_then(|prev| self.blur(tree, prev));
        self.units[index].set_state(tree, UnitState::Focused);
        self.focused = Some(index);
        committed
    }

    /// Replace the content of the focused unit. Returns false if `index` is
    /// not the focused unit.
    pub fn input(&mut self, tree: &mut Tree, index: usize, text: &str) -> bool {
        if self.focused != Some(index) {
            tracing::debug!(index, "input ignored: unit not focused");
            return false;
        }
        let text_node = self.units[index].text_node;
        match tree.get_mut(text_node) {
            Some(node) => {
                node.kind = NodeKind::Text(text.to_string());
                true
            }
            None => false,
        }
    }

    /// Handle a key press inside a unit. Enter without modifiers commits.
    pub fn key_down(
        &mut self,
        tree: &mut Tree,
        index: usize,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<EditEvent> {
        if key == Key::Enter && !modifiers.any() && self.focused == Some(index) {
            return self.blur(tree, index);
        }
        None
    }

    /// Drop focus from a unit and commit its content if it changed
    pub fn blur(&mut self, tree: &mut Tree, index: usize) -> Option<EditEvent> {
        if self.focused != Some(index) {
            return None;
        }
        self.focused = None;
        let unit = &mut self.units[index];
        unit.set_state(tree, UnitState::Idle);
        let event = unit.commit_event(tree, self.revision);
        if event.is_some() {
            tracing::debug!(index, "editable unit committed");
        }
        event
    }
}

/// Text nodes that qualify for wrapping, in document order
fn eligible_text_nodes(tree: &Tree, min_chars: usize) -> Vec<NodeId> {
    let scope = tree.find_tag("body").unwrap_or(tree.root());
    tree.descendants(scope)
        .into_iter()
        .filter(|&id| {
            let Some(node) = tree.get(id) else {
                return false;
            };
            let Some(text) = node.text() else {
                return false;
            };
            if node.origin != Origin::Source || text.trim().chars().count() < min_chars {
                return false;
            }
            let raw_parent = tree
                .parent_element(id)
                .and_then(|p| tree.element(p))
                .is_some_and(Element::is_raw_text);
            let in_head = tree
                .ancestors(id)
                .any(|a| tree.get(a).and_then(Node::tag) == Some("head"));
            !raw_parent && !in_head
        })
        .collect()
}

fn wrap(tree: &mut Tree, text_node: NodeId) -> EditableUnit {
    let (original, span) = match tree.get(text_node) {
        Some(node) => (node.text().unwrap_or("").to_string(), node.span.clone()),
        None => (String::new(), None),
    };
    let wrapper = tree.create(
        NodeKind::Element(
            Element::new("span")
                .with_attr("contenteditable", "true")
                .with_attr("data-editable", "true")
                .with_attr("style", UNIT_STYLE),
        ),
        None,
        Origin::EditableWrapper,
    );
    tree.wrap(text_node, wrapper);
    EditableUnit::new(wrapper, text_node, original, span)
}

fn inject_stylesheet(tree: &mut Tree) -> NodeId {
    let parent = tree.find_tag("head").unwrap_or(tree.root());
    let style = tree.create(
        NodeKind::Element(Element::new("style").with_attr("data-livesync", "surface")),
        None,
        Origin::Injected,
    );
    let css = tree.create(NodeKind::Text(surface_css()), None, Origin::Injected);
    tree.append(parent, style);
    tree.append(style, css);
    style
}

fn inject_hint(tree: &mut Tree, text: &str) -> NodeId {
    let parent = tree.find_tag("body").unwrap_or(tree.root());
    let hint = tree.create(
        NodeKind::Element(Element::new("div").with_attr("data-livesync-hint", "true")),
        None,
        Origin::Injected,
    );
    let label = tree.create(NodeKind::Text(text.to_string()), None, Origin::Injected);
    tree.append(parent, hint);
    tree.append(hint, label);
    hint
}
