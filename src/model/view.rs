//! The rendered view of one source revision

use crate::dom::{NodeId, Selector, Tree};
use crate::selection::SelectionState;
use crate::surface::Surface;

/// Handle to a node of one particular rendered tree.
///
/// Every render gets a new generation; a handle from an older generation no
/// longer resolves, which is how listeners of a replaced tree go quiet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub generation: u64,
    pub node: NodeId,
}

/// A rendered tree plus the interaction state attached to it
#[derive(Debug, Clone)]
pub struct View {
    pub generation: u64,
    /// Source revision the tree was rendered from
    pub revision: u64,
    pub tree: Tree,
    /// Installed once the deferred instrumentation ran
    pub surface: Option<Surface>,
    pub selection: SelectionState,
}

impl View {
    pub fn new(generation: u64, revision: u64, tree: Tree) -> Self {
        Self {
            generation,
            revision,
            tree,
            surface: None,
            selection: SelectionState::default(),
        }
    }

    pub fn node_ref(&self, node: NodeId) -> NodeRef {
        NodeRef {
            generation: self.generation,
            node,
        }
    }

    /// The node behind a handle, if the handle belongs to this tree and the
    /// node is still attached
    pub fn resolve(&self, node: NodeRef) -> Option<NodeId> {
        if node.generation != self.generation {
            tracing::trace!(
                stale = node.generation,
                current = self.generation,
                "dropping event for a replaced view"
            );
            return None;
        }
        self.tree.is_attached(node.node).then_some(node.node)
    }

    pub fn is_instrumented(&self) -> bool {
        self.surface.is_some()
    }

    /// First source element matching a simple selector
    pub fn query(&self, selector: &str) -> Option<NodeRef> {
        let selector = Selector::parse(selector)?;
        self.tree.query(&selector).map(|id| self.node_ref(id))
    }

    /// Index of the editable unit owning `node`
    pub fn unit_at(&self, node: NodeId) -> Option<usize> {
        self.surface.as_ref()?.unit_index(node)
    }

    /// Handle to the wrapper of the `index`-th editable unit
    pub fn unit_ref(&self, index: usize) -> Option<NodeRef> {
        let unit = self.surface.as_ref()?.unit(index)?;
        Some(self.node_ref(unit.wrapper))
    }

    /// Serialized view including instrumentation and overlays
    pub fn markup(&self) -> String {
        self.tree.live_markup(self.tree.root())
    }

    /// Serialized view as it would appear in the source
    pub fn source_markup(&self) -> String {
        self.tree.source_markup(self.tree.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Renderer;

    #[test]
    fn test_resolve_rejects_other_generation() {
        let tree = Renderer::new().unwrap().render("<p id=\"x\">Hi</p>").unwrap();
        let view = View::new(3, 0, tree);
        let node = view.query("#x").unwrap();
        assert_eq!(view.resolve(node), Some(node.node));

        let stale = NodeRef {
            generation: 2,
            ..node
        };
        assert_eq!(view.resolve(stale), None);
    }

    #[test]
    fn test_resolve_rejects_detached_node() {
        let tree = Renderer::new().unwrap().render("<div id=\"x\">Hi</div>").unwrap();
        let mut view = View::new(1, 0, tree);
        let node = view.query("div#x").unwrap();
        view.tree.detach(node.node);
        assert_eq!(view.resolve(node), None);
    }
}
