//! Selection/deletion controller
//!
//! Two modes: `Normal` and `StructuralDelete`. In delete mode, structural
//! containers under the pointer get a dashed outline, a click selects one
//! (solid outline plus a floating confirm-removal control) and confirming
//! removes it from the view and yields an [`EditEvent::ElementRemoved`].
//!
//! Invariants: at most one container is selected, and the floating control
//! exists exactly when a container is selected.

use crate::config::SyncConfig;
use crate::dom::{Element, NodeId, NodeKind, Origin, Overlay, Tree};
use crate::patch::EditEvent;
use crate::surface::delete_mode_css;

/// Controller mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    StructuralDelete,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Normal => Mode::StructuralDelete,
            Mode::StructuralDelete => Mode::Normal,
        }
    }
}

/// Highlight and selection of one rendered tree
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    hovered: Option<NodeId>,
    selected: Option<NodeId>,
    control: Option<NodeId>,
    affordance: Option<NodeId>,
}

impl SelectionState {
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// The floating confirm-removal control, present iff something is selected
    pub fn control(&self) -> Option<NodeId> {
        self.control
    }

    /// True while the removable-container pointer affordance is installed
    pub fn has_affordance(&self) -> bool {
        self.affordance.is_some()
    }

    /// Apply the side effects of entering or leaving delete mode
    pub fn set_mode(&mut self, tree: &mut Tree, mode: Mode, config: &SyncConfig) {
        match mode {
            Mode::StructuralDelete => {
                if self.affordance.is_none() {
                    self.affordance = Some(inject_affordance(tree, config));
                }
            }
            Mode::Normal => {
                self.clear(tree);
                if let Some(style) = self.affordance.take() {
                    tree.detach(style);
                }
            }
        }
    }

    pub fn pointer_enter(&mut self, tree: &mut Tree, node: NodeId, config: &SyncConfig) {
        let Some(container) = container_for(tree, node, config) else {
            return;
        };
        if let Some(prev) = self.hovered.filter(|&p| p != container) {
            if Some(prev) != self.selected {
                set_overlay(tree, prev, Overlay::None);
            }
        }
        if Some(container) != self.selected {
            set_overlay(tree, container, Overlay::Dashed);
        }
        self.hovered = Some(container);
    }

    pub fn pointer_leave(&mut self, tree: &mut Tree, node: NodeId, config: &SyncConfig) {
        let Some(container) = container_for(tree, node, config) else {
            return;
        };
        if self.hovered == Some(container) {
            if Some(container) != self.selected {
                set_overlay(tree, container, Overlay::None);
            }
            self.hovered = None;
        }
    }

    /// Select the container enclosing `node`. Returns the selected container,
    /// or `None` if the click did not land on one (default action not prevented).
    pub fn click(&mut self, tree: &mut Tree, node: NodeId, config: &SyncConfig) -> Option<NodeId> {
        let container = container_for(tree, node, config)?;
        self.clear(tree);
        set_overlay(tree, container, Overlay::Solid);
        self.selected = Some(container);
        self.control = Some(place_control(tree, container));
        tracing::debug!(node = container.0, "container selected");
        Some(container)
    }

    /// Remove the selected container. `None` if nothing is selected.
    pub fn confirm_removal(&mut self, tree: &mut Tree) -> Option<EditEvent> {
        let target = self.selected?;
        self.clear(tree);
        let fragment = tree.source_markup(target);
        tree.detach(target);
        tracing::info!(bytes = fragment.len(), "container removed from view");
        Some(EditEvent::element_removed(fragment))
    }

    /// Drop highlight, selection and the floating control
    fn clear(&mut self, tree: &mut Tree) {
        if let Some(hovered) = self.hovered.take() {
            set_overlay(tree, hovered, Overlay::None);
        }
        if let Some(selected) = self.selected.take() {
            set_overlay(tree, selected, Overlay::None);
        }
        if let Some(control) = self.control.take() {
            tree.detach(control);
        }
    }
}

/// Nearest source container at or above `node`. Nodes inside injected
/// instrumentation never resolve to a container.
fn container_for(tree: &Tree, node: NodeId, config: &SyncConfig) -> Option<NodeId> {
    let chain: Vec<NodeId> = std::iter::once(node).chain(tree.ancestors(node)).collect();
    if chain
        .iter()
        .any(|&id| tree.get(id).is_some_and(|n| n.is_injected()))
    {
        return None;
    }
    chain.into_iter().find(|&id| {
        tree.get(id).is_some_and(|n| {
            n.origin == Origin::Source && n.tag().is_some_and(|tag| config.is_container_tag(tag))
        })
    })
}

fn set_overlay(tree: &mut Tree, id: NodeId, overlay: Overlay) {
    if let Some(node) = tree.get_mut(id) {
        node.overlay = overlay;
    }
}

/// Insert the confirm-removal control at the container's top-right corner
fn place_control(tree: &mut Tree, container: NodeId) -> NodeId {
    let button = tree.create(
        NodeKind::Element(
            Element::new("button")
                .with_attr("type", "button")
                .with_attr("data-livesync-control", "remove")
                .with_attr("style", "float: right; position: relative; top: -12px; right: -12px;"),
        ),
        None,
        Origin::Injected,
    );
    let label = tree.create(NodeKind::Text("Remove".to_string()), None, Origin::Injected);
    tree.append(button, label);
    tree.insert(container, 0, button);
    button
}

fn inject_affordance(tree: &mut Tree, config: &SyncConfig) -> NodeId {
    let parent = tree.find_tag("head").unwrap_or(tree.root());
    let style = tree.create(
        NodeKind::Element(Element::new("style").with_attr("data-livesync", "delete-mode")),
        None,
        Origin::Injected,
    );
    let css = tree.create(
        NodeKind::Text(delete_mode_css(&config.container_tags)),
        None,
        Origin::Injected,
    );
    tree.append(style, css);
    tree.append(parent, style);
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Renderer, Selector};

    const SRC: &str = r#"<div id="a"><p>X</p></div><div id="b">Y</div><p id="c">Z</p>"#;

    fn setup() -> (Tree, SelectionState, SyncConfig) {
        let mut tree = Renderer::new().unwrap().render(SRC).unwrap();
        let config = SyncConfig::default();
        let mut state = SelectionState::default();
        state.set_mode(&mut tree, Mode::StructuralDelete, &config);
        (tree, state, config)
    }

    fn find(tree: &Tree, sel: &str) -> NodeId {
        tree.query(&Selector::parse(sel).unwrap()).unwrap()
    }

    #[test]
    fn test_hover_resolves_to_enclosing_container() {
        let (mut tree, mut state, config) = setup();
        let a = find(&tree, "#a");
        let inner = tree.get(a).unwrap().children[0];
        assert_eq!(tree.get(inner).unwrap().tag(), Some("p"));

        state.pointer_enter(&mut tree, inner, &config);
        assert_eq!(state.hovered(), Some(a));
        assert_eq!(tree.get(a).unwrap().overlay, Overlay::Dashed);

        state.pointer_leave(&mut tree, inner, &config);
        assert_eq!(state.hovered(), None);
        assert_eq!(tree.get(a).unwrap().overlay, Overlay::None);
    }

    #[test]
    fn test_non_container_is_ignored() {
        let (mut tree, mut state, config) = setup();
        let c = find(&tree, "#c");
        state.pointer_enter(&mut tree, c, &config);
        assert_eq!(state.hovered(), None);
        assert_eq!(state.click(&mut tree, c, &config), None);
        assert_eq!(state.control(), None);
    }

    #[test]
    fn test_click_moves_single_selection() {
        let (mut tree, mut state, config) = setup();
        let a = find(&tree, "#a");
        let b = find(&tree, "#b");

        state.click(&mut tree, a, &config);
        assert_eq!(tree.get(a).unwrap().overlay, Overlay::Solid);
        let first_control = state.control().unwrap();

        state.click(&mut tree, b, &config);
        assert_eq!(state.selected(), Some(b));
        assert_eq!(tree.get(a).unwrap().overlay, Overlay::None);
        assert!(!tree.is_attached(first_control));
        assert_eq!(
            tree.get(state.control().unwrap()).unwrap().parent,
            Some(b)
        );
    }

    #[test]
    fn test_leave_keeps_selected_outline() {
        let (mut tree, mut state, config) = setup();
        let b = find(&tree, "#b");
        state.pointer_enter(&mut tree, b, &config);
        state.click(&mut tree, b, &config);
        state.pointer_leave(&mut tree, b, &config);
        assert_eq!(tree.get(b).unwrap().overlay, Overlay::Solid);
    }

    #[test]
    fn test_confirm_removes_exact_fragment() {
        let (mut tree, mut state, config) = setup();
        let a = find(&tree, "#a");
        state.click(&mut tree, a, &config);

        let event = state.confirm_removal(&mut tree).unwrap();
        assert_eq!(event, EditEvent::element_removed(r#"<div id="a"><p>X</p></div>"#));
        assert!(!tree.is_attached(a));
        assert_eq!(state.selected(), None);
        assert_eq!(state.control(), None);
        assert_eq!(state.confirm_removal(&mut tree), None);
    }

    #[test]
    fn test_leaving_mode_clears_everything() {
        let (mut tree, mut state, config) = setup();
        let a = find(&tree, "#a");
        state.click(&mut tree, a, &config);
        assert!(state.has_affordance());

        state.set_mode(&mut tree, Mode::Normal, &config);
        assert_eq!(state.selected(), None);
        assert_eq!(state.control(), None);
        assert!(!state.has_affordance());
        assert_eq!(tree.get(a).unwrap().overlay, Overlay::None);
        assert_eq!(state.confirm_removal(&mut tree), None);
    }
}
