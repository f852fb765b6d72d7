//! Pass-through conveniences: locate, copy and detached view

use crate::commands::{Cmd, HostEvent};
use crate::locator;
use crate::messages::AppMsg;
use crate::model::AppModel;

/// Handle app-level messages. None of these change the source.
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Locate(node) => {
            let view = model.view.as_ref()?;
            let id = view.resolve(node)?;
            let location = locator::locate(&view.tree, id, &model.source)?;
            Some(Cmd::Notify(HostEvent::ElementSelect {
                line: location.line,
            }))
        }
        AppMsg::CopySource => Some(Cmd::CopyToClipboard(model.source.text())),
        AppMsg::OpenDetached => Some(Cmd::OpenDetached(model.source.text())),
    }
}
