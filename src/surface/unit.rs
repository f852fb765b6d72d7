//! A single editable text region

use std::ops::Range;

use crate::dom::{NodeId, Overlay, Tree};
use crate::patch::{EditEvent, SpanHint};

/// Interaction state of an editable unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitState {
    #[default]
    Idle,
    Hovered,
    Focused,
}

impl UnitState {
    pub fn overlay(&self) -> Overlay {
        match self {
            UnitState::Idle => Overlay::None,
            UnitState::Hovered => Overlay::Hover,
            UnitState::Focused => Overlay::Focus,
        }
    }
}

/// Leaf text of the rendered tree wrapped with edit affordances
#[derive(Debug, Clone)]
pub struct EditableUnit {
    /// Injected wrapper element carrying the edit affordances
    pub wrapper: NodeId,
    /// The original text node, now the wrapper's only child
    pub text_node: NodeId,
    pub state: UnitState,
    original: String,
    span: Option<Range<usize>>,
}

impl EditableUnit {
    pub(super) fn new(
        wrapper: NodeId,
        text_node: NodeId,
        original: String,
        span: Option<Range<usize>>,
    ) -> Self {
        Self {
            wrapper,
            text_node,
            state: UnitState::Idle,
            original,
            span,
        }
    }

    /// Text captured when the unit was wrapped
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Current content as shown in the view
    pub fn content<'t>(&self, tree: &'t Tree) -> &'t str {
        tree.get(self.text_node).and_then(|n| n.text()).unwrap_or("")
    }

    pub fn is_dirty(&self, tree: &Tree) -> bool {
        self.content(tree) != self.original
    }

    /// The edit to emit when this unit commits, if its content changed
    pub fn commit_event(&self, tree: &Tree, revision: u64) -> Option<EditEvent> {
        if !self.is_dirty(tree) {
            return None;
        }
        Some(EditEvent::TextReplace {
            original_text: self.original.clone(),
            new_text: self.content(tree).to_string(),
            hint: self.span.clone().map(|range| SpanHint { revision, range }),
        })
    }

    pub(super) fn set_state(&mut self, tree: &mut Tree, state: UnitState) {
        self.state = state;
        if let Some(node) = tree.get_mut(self.wrapper) {
            node.overlay = state.overlay();
        }
    }
}
