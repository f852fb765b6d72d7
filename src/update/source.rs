//! Source buffer update handlers

use crate::commands::Cmd;
use crate::messages::SourceMsg;
use crate::model::{AppModel, DEFAULT_DOCUMENT};

use super::render_current;

/// Handle changes coming from the authoring surface
pub fn update_source(model: &mut AppModel, msg: SourceMsg) -> Option<Cmd> {
    match msg {
        SourceMsg::Replace(text) => {
            model.source.set_text(&text);
            tracing::debug!(revision = model.source.revision(), "source replaced");
        }
        SourceMsg::ResetToDefault => {
            model.source.set_text(DEFAULT_DOCUMENT);
            tracing::info!("source reset to default document");
        }
        SourceMsg::Refresh => {}
    }
    Some(render_current(model))
}
