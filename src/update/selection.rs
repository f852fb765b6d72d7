//! Structural selection and deletion handlers

use crate::commands::{Cmd, HostEvent};
use crate::locator;
use crate::messages::SelectionMsg;
use crate::model::AppModel;
use crate::selection::Mode;

use super::commit_edit;

/// Switch controller mode and apply its side effects to the current view
fn set_mode(model: &mut AppModel, mode: Mode) -> Option<Cmd> {
    if model.mode == mode {
        return None;
    }
    model.mode = mode;
    if let Some(view) = model.view.as_mut() {
        view.selection.set_mode(&mut view.tree, mode, &model.config);
    }
    tracing::info!(?mode, "selection mode changed");
    None
}

/// Handle selection messages. Pointer and click events are ignored outside
/// structural-delete mode.
pub fn update_selection(model: &mut AppModel, msg: SelectionMsg) -> Option<Cmd> {
    match msg {
        SelectionMsg::ToggleDeleteMode => {
            let mode = model.mode.toggled();
            set_mode(model, mode)
        }
        SelectionMsg::SetDeleteMode(on) => {
            let mode = if on {
                Mode::StructuralDelete
            } else {
                Mode::Normal
            };
            set_mode(model, mode)
        }
        _ if model.mode != Mode::StructuralDelete => None,

        SelectionMsg::PointerEnter(node) => {
            let view = model.view.as_mut()?;
            let id = view.resolve(node)?;
            view.selection.pointer_enter(&mut view.tree, id, &model.config);
            None
        }
        SelectionMsg::PointerLeave(node) => {
            let view = model.view.as_mut()?;
            let id = view.resolve(node)?;
            view.selection.pointer_leave(&mut view.tree, id, &model.config);
            None
        }
        SelectionMsg::Click(node) => {
            let view = model.view.as_mut()?;
            let id = view.resolve(node)?;
            let container = view.selection.click(&mut view.tree, id, &model.config)?;
            let location = locator::locate(&view.tree, container, &model.source)?;
            Some(Cmd::Notify(HostEvent::ElementSelect {
                line: location.line,
            }))
        }
        SelectionMsg::ConfirmRemoval => {
            let view = model.view.as_mut()?;
            let event = view.selection.confirm_removal(&mut view.tree)?;
            commit_edit(model, event)
        }
    }
}
