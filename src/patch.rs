//! Patch applier: turns edit events into substitutions on the source text
//!
//! The rendered tree has no persistent link to source positions, so edits are
//! mapped back by literal text: the first occurrence of the original text (or
//! of the removed element's markup) is replaced. When that text appears more
//! than once the first occurrence is patched, which is not necessarily the one
//! the user edited. A miss leaves the source untouched.

use std::ops::Range;

use crate::dom::escape_text;
use crate::model::SourceBuffer;

/// Where in the source an edited text node was parsed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanHint {
    /// Source revision the span refers to
    pub revision: u64,
    /// Byte range of the text node in that revision
    pub range: Range<usize>,
}

/// One user-driven change to the rendered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// An editable unit committed new content
    TextReplace {
        original_text: String,
        new_text: String,
        /// Provisional source position captured when the unit was wrapped
        hint: Option<SpanHint>,
    },
    /// A structural container was removed from the view
    ElementRemoved { serialized_fragment: String },
}

impl EditEvent {
    pub fn text_replace(original_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        EditEvent::TextReplace {
            original_text: original_text.into(),
            new_text: new_text.into(),
            hint: None,
        }
    }

    pub fn element_removed(serialized_fragment: impl Into<String>) -> Self {
        EditEvent::ElementRemoved {
            serialized_fragment: serialized_fragment.into(),
        }
    }
}

/// Result of applying one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Source rewritten at this byte offset
    Applied { offset: usize },
    /// Nothing to replace; source unchanged
    Missed,
}

impl PatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PatchOutcome::Applied { .. })
    }
}

/// Apply an edit event using first-occurrence literal matching
pub fn apply(source: &mut SourceBuffer, event: &EditEvent) -> PatchOutcome {
    apply_with(source, event, false)
}

/// Apply an edit event. With `use_spans`, a text edit carrying a span hint that
/// is still valid for the current revision is patched in place.
pub fn apply_with(source: &mut SourceBuffer, event: &EditEvent, use_spans: bool) -> PatchOutcome {
    let outcome = match event {
        EditEvent::TextReplace {
            original_text,
            new_text,
            hint,
        } => {
            let hinted = hint
                .as_ref()
                .filter(|_| use_spans)
                .and_then(|hint| replace_at_hint(source, hint, original_text, new_text));
            match hinted {
                Some(outcome) => outcome,
                None => replace_first(source, original_text, new_text),
            }
        }
        EditEvent::ElementRemoved {
            serialized_fragment,
        } => replace_first(source, serialized_fragment, ""),
    };

    match outcome {
        PatchOutcome::Applied { offset } => {
            tracing::info!(offset, revision = source.revision(), "patch applied");
        }
        PatchOutcome::Missed => {
            tracing::debug!("patch missed: text not found in source");
        }
    }
    outcome
}

fn replace_first(source: &mut SourceBuffer, needle: &str, replacement: &str) -> PatchOutcome {
    if needle == replacement {
        return PatchOutcome::Missed;
    }
    match source.find(needle) {
        Some(offset) => {
            source.splice(offset..offset + needle.len(), replacement);
            PatchOutcome::Applied { offset }
        }
        None => PatchOutcome::Missed,
    }
}

/// Patch the hinted range if it still holds exactly `original`
fn replace_at_hint(
    source: &mut SourceBuffer,
    hint: &SpanHint,
    original: &str,
    replacement: &str,
) -> Option<PatchOutcome> {
    if hint.revision != source.revision() || original.is_empty() {
        return None;
    }
    if source.slice(hint.range.clone())? != original {
        return None;
    }
    let offset = hint.range.start;
    source.splice(hint.range.clone(), &escape_text(replacement));
    Some(PatchOutcome::Applied { offset })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_replace_unique() {
        let mut source = SourceBuffer::with_text("<p>Hello</p><p>World</p>");
        let outcome = apply(&mut source, &EditEvent::text_replace("Hello", "Hi"));
        assert_eq!(outcome, PatchOutcome::Applied { offset: 3 });
        assert_eq!(source.text(), "<p>Hi</p><p>World</p>");
    }

    #[test]
    fn test_text_replace_first_of_duplicates() {
        let mut source = SourceBuffer::with_text("<p>Hi</p><p>Hi</p>");
        apply(&mut source, &EditEvent::text_replace("Hi", "Yo"));
        assert_eq!(source.text(), "<p>Yo</p><p>Hi</p>");
    }

    #[test]
    fn test_miss_leaves_source_and_revision() {
        let mut source = SourceBuffer::with_text("<p>Hello</p>");
        let outcome = apply(&mut source, &EditEvent::text_replace("Absent", "x"));
        assert_eq!(outcome, PatchOutcome::Missed);
        assert_eq!(source.text(), "<p>Hello</p>");
        assert_eq!(source.revision(), 0);
    }

    #[test]
    fn test_empty_needle_is_miss() {
        let mut source = SourceBuffer::with_text("abc");
        assert_eq!(
            apply(&mut source, &EditEvent::element_removed("")),
            PatchOutcome::Missed
        );
        assert_eq!(source.text(), "abc");
    }

    #[test]
    fn test_element_removed() {
        let mut source = SourceBuffer::with_text(r#"<div id="a">X</div><div id="b">Y</div>"#);
        apply(
            &mut source,
            &EditEvent::element_removed(r#"<div id="a">X</div>"#),
        );
        assert_eq!(source.text(), r#"<div id="b">Y</div>"#);
    }

    #[test]
    fn test_span_hint_targets_second_occurrence() {
        let text = "<p>Hi</p><p>Hi</p>";
        let mut source = SourceBuffer::with_text(text);
        let second = text.rfind("Hi").unwrap();
        let event = EditEvent::TextReplace {
            original_text: "Hi".into(),
            new_text: "Yo".into(),
            hint: Some(SpanHint {
                revision: 0,
                range: second..second + 2,
            }),
        };

        apply_with(&mut source, &event, true);
        assert_eq!(source.text(), "<p>Hi</p><p>Yo</p>");
    }

    #[test]
    fn test_span_hint_ignored_when_disabled_or_stale() {
        let text = "<p>Hi</p><p>Hi</p>";
        let second = text.rfind("Hi").unwrap();
        let event = |revision| EditEvent::TextReplace {
            original_text: "Hi".into(),
            new_text: "Yo".into(),
            hint: Some(SpanHint {
                revision,
                range: second..second + 2,
            }),
        };

        let mut source = SourceBuffer::with_text(text);
        apply_with(&mut source, &event(0), false);
        assert_eq!(source.text(), "<p>Yo</p><p>Hi</p>");

        let mut source = SourceBuffer::with_text(text);
        apply_with(&mut source, &event(7), true);
        assert_eq!(source.text(), "<p>Yo</p><p>Hi</p>");
    }

    #[test]
    fn test_span_hint_escapes_markup() {
        let mut source = SourceBuffer::with_text("<p>a</p><p>ab</p>");
        let event = EditEvent::TextReplace {
            original_text: "ab".into(),
            new_text: "a<b".into(),
            hint: Some(SpanHint {
                revision: 0,
                range: 11..13,
            }),
        };
        apply_with(&mut source, &event, true);
        assert_eq!(source.text(), "<p>a</p><p>a&lt;b</p>");
    }
}
