//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use livesync::messages::{Key, Modifiers, Msg, SelectionMsg, SurfaceMsg};
use livesync::model::{NodeRef, SourceBuffer};
use livesync::runtime::RecordingHost;
use livesync::{AppModel, HostEvent, Session, SyncConfig};

/// Config with no hint and no instrumentation delay
pub fn test_config() -> SyncConfig {
    SyncConfig {
        instrument_delay_ms: 0,
        show_hint: false,
        ..SyncConfig::default()
    }
}

pub fn test_model(text: &str) -> AppModel {
    AppModel::with_source(SourceBuffer::with_text(text), test_config())
}

/// Session over `text` that has rendered and instrumented it
pub fn test_session(text: &str) -> Session<RecordingHost> {
    Session::started(test_model(text), RecordingHost::default())
}

pub fn source(session: &Session<RecordingHost>) -> String {
    session.model().source.text()
}

pub fn events(session: &Session<RecordingHost>) -> &[HostEvent] {
    &session.host().events
}

/// Handle to the first source element matching `selector` in the current view
pub fn find(session: &Session<RecordingHost>, selector: &str) -> NodeRef {
    session
        .view()
        .and_then(|v| v.query(selector))
        .unwrap_or_else(|| panic!("no element matches {selector}"))
}

/// Handle to the `index`-th editable unit of the current view
pub fn unit(session: &Session<RecordingHost>, index: usize) -> NodeRef {
    session
        .view()
        .and_then(|v| v.unit_ref(index))
        .unwrap_or_else(|| panic!("no editable unit {index}"))
}

/// Texts of all editable units in document order
pub fn unit_texts(session: &Session<RecordingHost>) -> Vec<String> {
    let view = session.view().expect("view");
    view.surface
        .as_ref()
        .expect("instrumented")
        .units()
        .iter()
        .map(|u| u.content(&view.tree).to_string())
        .collect()
}

/// Focus a unit, type `text` into it and press Enter, then settle
pub fn edit_unit(session: &mut Session<RecordingHost>, index: usize, text: &str) {
    let node = unit(session, index);
    session.dispatch(Msg::Surface(SurfaceMsg::Focus(node)));
    session.dispatch(Msg::Surface(SurfaceMsg::Input {
        node,
        text: text.to_string(),
    }));
    session.dispatch(Msg::Surface(SurfaceMsg::KeyDown {
        node,
        key: Key::Enter,
        modifiers: Modifiers::NONE,
    }));
    session.settle();
}

pub fn select(session: &mut Session<RecordingHost>, node: NodeRef) {
    session.dispatch(Msg::Selection(SelectionMsg::PointerEnter(node)));
    session.dispatch(Msg::Selection(SelectionMsg::Click(node)));
}

pub fn set_delete_mode(session: &mut Session<RecordingHost>, on: bool) {
    session.dispatch(Msg::Selection(SelectionMsg::SetDeleteMode(on)));
}
