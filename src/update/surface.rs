//! Editable unit interaction handlers

use crate::commands::Cmd;
use crate::messages::SurfaceMsg;
use crate::model::{AppModel, NodeRef, View};

use super::commit_edit;

fn target(msg: &SurfaceMsg) -> NodeRef {
    match msg {
        SurfaceMsg::PointerEnter(node)
        | SurfaceMsg::PointerLeave(node)
        | SurfaceMsg::Focus(node)
        | SurfaceMsg::Blur(node)
        | SurfaceMsg::Input { node, .. }
        | SurfaceMsg::KeyDown { node, .. } => *node,
    }
}

/// Handle editable unit events. A unit that commits sends its edit through
/// the patch applier.
pub fn update_surface(model: &mut AppModel, msg: SurfaceMsg) -> Option<Cmd> {
    let event = {
        let view = model.view.as_mut()?;
        let index = view
            .resolve(target(&msg))
            .and_then(|node| view.unit_at(node))?;
        let View { tree, surface, .. } = view;
        let surface = surface.as_mut()?;

        match msg {
            SurfaceMsg::PointerEnter(_) => {
                surface.pointer_enter(tree, index);
                None
            }
            SurfaceMsg::PointerLeave(_) => {
                surface.pointer_leave(tree, index);
                None
            }
            SurfaceMsg::Focus(_) => surface.focus(tree, index),
            SurfaceMsg::Input { text, .. } => {
                surface.input(tree, index, &text);
                None
            }
            SurfaceMsg::KeyDown { key, modifiers, .. } => {
                surface.key_down(tree, index, key, modifiers)
            }
            SurfaceMsg::Blur(_) => surface.blur(tree, index),
        }
    };

    commit_edit(model, event?)
}
