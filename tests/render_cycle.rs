//! Render cycle: revisions, generations and deferred instrumentation

mod common;

use common::*;
use livesync::messages::{Msg, RenderMsg, SourceMsg, SurfaceMsg};
use livesync::model::{SourceBuffer, DEFAULT_DOCUMENT};
use livesync::runtime::RecordingHost;
use livesync::update::update;
use livesync::{AppModel, Cmd, Session};

#[test]
fn test_idempotent_rebuild() {
    let src = "<body><h1>Title here</h1><p>Some paragraph</p></body>";
    let a = test_session(src);
    let b = test_session(src);
    assert_eq!(unit_texts(&a), unit_texts(&b));
    assert_eq!(
        a.view().unwrap().markup(),
        b.view().unwrap().markup()
    );
}

#[test]
fn test_refresh_rebuilds_identically() {
    let mut session = test_session("<p>Stable text</p>");
    let before = session.view().unwrap().markup();
    let generation = session.view().unwrap().generation;

    session.dispatch(Msg::Source(SourceMsg::Refresh));
    session.settle();

    let view = session.view().unwrap();
    assert_eq!(view.generation, generation + 1);
    assert_eq!(view.markup(), before);
}

#[test]
fn test_instrumentation_is_deferred() {
    let mut model = test_model("<p>Hello</p>");
    model.config.instrument_delay_ms = 60_000;
    let mut session = Session::new(model, RecordingHost::default());
    session.start();

    assert!(session.view().is_some());
    assert!(!session.view().unwrap().is_instrumented());
    assert_eq!(session.pending_timers(), 1);

    session.tick();
    assert!(!session.view().unwrap().is_instrumented());

    session.settle();
    assert!(session.view().unwrap().is_instrumented());
    assert_eq!(session.pending_timers(), 0);
}

#[test]
fn test_instrumentation_runs_once_per_view() {
    let mut model = test_model("<p>Hello</p>");
    let tree = livesync::dom::Renderer::new()
        .unwrap()
        .render("<p>Hello</p>")
        .unwrap();
    update(
        &mut model,
        Msg::Render(RenderMsg::Rendered {
            revision: 0,
            tree: Box::new(tree),
        }),
    );
    update(&mut model, Msg::Render(RenderMsg::InstrumentReady));
    let first = model.view.as_ref().unwrap().markup();
    update(&mut model, Msg::Render(RenderMsg::InstrumentReady));

    let view = model.view.as_ref().unwrap();
    assert_eq!(view.markup(), first);
    assert_eq!(view.surface.as_ref().unwrap().units().len(), 1);
}

#[test]
fn test_stale_render_is_discarded() {
    let mut model = test_model("<p>one</p>");
    let stale = livesync::dom::Renderer::new()
        .unwrap()
        .render("<p>one</p>")
        .unwrap();

    let cmd = update(&mut model, Msg::Source(SourceMsg::Replace("<p>two</p>".into())));
    assert!(matches!(cmd, Some(Cmd::Render { revision: 1, .. })));

    let cmd = update(
        &mut model,
        Msg::Render(RenderMsg::Rendered {
            revision: 0,
            tree: Box::new(stale),
        }),
    );
    assert!(cmd.is_none());
    assert!(model.view.is_none());
}

#[test]
fn test_stale_node_ref_is_ignored() {
    let mut session = test_session("<p>Hello</p>");
    let old = unit(&session, 0);

    session.dispatch(Msg::Source(SourceMsg::Replace("<p>Hello</p><p>Again</p>".into())));
    session.settle();

    session.dispatch(Msg::Surface(SurfaceMsg::Focus(old)));
    session.dispatch(Msg::Surface(SurfaceMsg::Input {
        node: old,
        text: "Ghost".into(),
    }));
    session.dispatch(Msg::Surface(SurfaceMsg::Blur(old)));
    session.settle();

    assert_eq!(source(&session), "<p>Hello</p><p>Again</p>");
    assert!(events(&session).is_empty());
}

#[test]
fn test_render_failure_keeps_previous_view() {
    let mut model = test_model("<p>Hello</p>");
    let tree = livesync::dom::Renderer::new()
        .unwrap()
        .render("<p>Hello</p>")
        .unwrap();
    update(
        &mut model,
        Msg::Render(RenderMsg::Rendered {
            revision: 0,
            tree: Box::new(tree),
        }),
    );
    update(
        &mut model,
        Msg::Render(RenderMsg::Failed {
            revision: 0,
            reason: "no context".into(),
        }),
    );
    assert!(model.view.is_some());
    assert_eq!(model.last_error.as_deref(), Some("no context"));
}

#[test]
fn test_reset_restores_default_document() {
    let mut session = test_session("<p>Scratch</p>");
    session.dispatch(Msg::Source(SourceMsg::ResetToDefault));
    session.settle();

    assert_eq!(source(&session), DEFAULT_DOCUMENT);
    assert!(unit_texts(&session).contains(&"Welcome to Live Editor".to_string()));
}

#[test]
fn test_default_document_instruments_body_text() {
    let session = Session::started(
        AppModel::with_source(SourceBuffer::new(), test_config()),
        RecordingHost::default(),
    );
    let texts = unit_texts(&session);
    assert!(texts.contains(&"Welcome to Live Editor".to_string()));
    // Nothing from <head> (title, style) is editable
    assert!(texts.iter().all(|t| !t.contains('{')));
}
