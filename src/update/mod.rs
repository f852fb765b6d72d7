//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod render;
mod selection;
mod source;
mod surface;

use crate::commands::{Cmd, HostEvent};
use crate::messages::Msg;
use crate::model::AppModel;
use crate::patch::{self, EditEvent};

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use render::{render_current, update_render};
pub use selection::update_selection;
pub use source::update_source;
pub use surface::update_surface;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Source(m) => source::update_source(model, m),
        Msg::Render(m) => render::update_render(model, m),
        Msg::Surface(m) => surface::update_surface(model, m),
        Msg::Selection(m) => selection::update_selection(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Apply a committed edit to the source and tell the host about it.
///
/// The host is notified whether or not the patch matched; a re-render is
/// requested only when the source actually changed.
pub(crate) fn commit_edit(model: &mut AppModel, event: EditEvent) -> Option<Cmd> {
    let outcome = patch::apply_with(&mut model.source, &event, model.config.prefer_source_spans);
    let render = if outcome.is_applied() {
        render_current(model)
    } else {
        Cmd::None
    };
    Cmd::batch([Cmd::Notify(HostEvent::from(&event)), render])
}

/// Traced update wrapper (debug builds only)
///
/// Logs every message with the source revision and view generation it was
/// handled against.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = (
        model.source.revision(),
        model.view.as_ref().map(|v| v.generation),
    );
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = (
        model.source.revision(),
        model.view.as_ref().map(|v| v.generation),
    );
    if before != after {
        debug!(
            target: "model",
            revision = after.0,
            generation = ?after.1,
            "state changed"
        );
    }

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting except for payloads too large to log.
/// Example outputs:
/// - `Source::Refresh`
/// - `Render::Rendered(rev 3)`
/// - `Selection::ConfirmRemoval`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{RenderMsg, SourceMsg};

    match msg {
        Msg::Source(SourceMsg::Replace(text)) => {
            format!("Source::Replace({} bytes)", text.len())
        }
        Msg::Source(m) => format!("Source::{:?}", m),
        Msg::Render(RenderMsg::Rendered { revision, .. }) => {
            format!("Render::Rendered(rev {})", revision)
        }
        Msg::Render(m) => format!("Render::{:?}", m),
        Msg::Surface(m) => format!("Surface::{:?}", m),
        Msg::Selection(m) => format!("Selection::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
