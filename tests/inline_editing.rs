//! Inline text editing through the full update cycle

mod common;

use common::*;
use livesync::messages::{Key, Modifiers, Msg, SurfaceMsg};
use livesync::HostEvent;

#[test]
fn test_unique_text_round_trip() {
    let mut session = test_session("<p>Hello</p><p>World</p>");
    assert_eq!(unit_texts(&session), vec!["Hello", "World"]);

    edit_unit(&mut session, 0, "Hi");

    assert_eq!(source(&session), "<p>Hi</p><p>World</p>");
    assert_eq!(
        events(&session),
        &[HostEvent::TextEdit {
            original_text: "Hello".into(),
            new_text: "Hi".into(),
        }]
    );
    // The new source was rendered and instrumented again
    assert_eq!(unit_texts(&session), vec!["Hi", "World"]);
}

#[test]
fn test_duplicate_text_patches_first_occurrence() {
    let mut session = test_session("<p>Hi</p><p>Hi</p>");
    edit_unit(&mut session, 1, "Yo");
    // Literal matching cannot tell the two apart
    assert_eq!(source(&session), "<p>Yo</p><p>Hi</p>");
}

#[test]
fn test_span_hint_patches_edited_occurrence() {
    let mut model = test_model("<p>Hi</p><p>Hi</p>");
    model.config.prefer_source_spans = true;
    let mut session =
        livesync::Session::started(model, livesync::runtime::RecordingHost::default());

    edit_unit(&mut session, 1, "Yo");
    assert_eq!(source(&session), "<p>Hi</p><p>Yo</p>");
}

#[test]
fn test_unchanged_unit_commits_nothing() {
    let mut session = test_session("<p>Hello</p>");
    let before = session.model().source.revision();

    edit_unit(&mut session, 0, "Hello");

    assert!(events(&session).is_empty());
    assert_eq!(session.model().source.revision(), before);
}

#[test]
fn test_shift_enter_does_not_commit() {
    let mut session = test_session("<p>Hello</p>");
    let node = unit(&session, 0);
    session.dispatch(Msg::Surface(SurfaceMsg::Focus(node)));
    session.dispatch(Msg::Surface(SurfaceMsg::Input {
        node,
        text: "Changed".into(),
    }));
    session.dispatch(Msg::Surface(SurfaceMsg::KeyDown {
        node,
        key: Key::Enter,
        modifiers: Modifiers::SHIFT,
    }));
    assert_eq!(source(&session), "<p>Hello</p>");

    session.dispatch(Msg::Surface(SurfaceMsg::Blur(node)));
    session.settle();
    assert_eq!(source(&session), "<p>Changed</p>");
}

#[test]
fn test_missed_patch_still_notifies() {
    // The stored text is the entity-decoded form, which is not in the source
    let mut session = test_session("<p>Fish &amp; Chips</p>");
    let revision = session.model().source.revision();

    edit_unit(&mut session, 0, "Fish and Chips");

    assert_eq!(source(&session), "<p>Fish &amp; Chips</p>");
    assert_eq!(session.model().source.revision(), revision);
    assert_eq!(events(&session).len(), 1);
}

#[test]
fn test_script_and_style_are_not_editable() {
    let session = test_session(
        "<html><head><style>p { color: red; }</style></head><body><p>Text</p><script>let x = 1;</script></body></html>",
    );
    assert_eq!(unit_texts(&session), vec!["Text"]);
}

#[test]
fn test_instrumentation_does_not_change_source_markup() {
    let src = "<body>\n  <div class=\"card\">\n    <h2>Title</h2>\n    <p>Body text</p>\n  </div>\n</body>";
    let session = test_session(src);
    assert_eq!(session.view().unwrap().source_markup(), src);
}
