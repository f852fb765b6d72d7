//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The [`Session`](crate::runtime::Session) runtime executes them.

use serde::Serialize;

use crate::patch::EditEvent;

/// Notifications delivered to the host application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// An editable unit committed a change
    TextEdit {
        original_text: String,
        new_text: String,
    },
    /// A structural container was removed from the view
    ElementDelete { serialized_fragment: String },
    /// A node was selected and traced back to a 1-based source line
    ElementSelect { line: usize },
}

impl From<&EditEvent> for HostEvent {
    fn from(event: &EditEvent) -> Self {
        match event {
            EditEvent::TextReplace {
                original_text,
                new_text,
                ..
            } => HostEvent::TextEdit {
                original_text: original_text.clone(),
                new_text: new_text.clone(),
            },
            EditEvent::ElementRemoved { serialized_fragment } => HostEvent::ElementDelete {
                serialized_fragment: serialized_fragment.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Write a document into the rendered context
    Render { revision: u64, source: String },
    /// Instrument the current view after `delay_ms`
    /// Sends Msg::Render(InstrumentReady) when the delay elapses
    ScheduleInstrument { delay_ms: u64 },
    /// Deliver an event to the host
    Notify(HostEvent),
    /// Put text on the clipboard
    CopyToClipboard(String),
    /// Show a document in a separate rendered context
    OpenDetached(String),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Combine commands, dropping `None`s; returns `None` if nothing is left
    pub fn batch(cmds: impl IntoIterator<Item = Cmd>) -> Option<Cmd> {
        let mut cmds: Vec<Cmd> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Cmd::None))
            .collect();
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn into_vec(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_vec).collect(),
            cmd => vec![cmd],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_drops_none() {
        assert!(Cmd::batch([Cmd::None, Cmd::None]).is_none());
        assert!(matches!(
            Cmd::batch([Cmd::None, Cmd::ScheduleInstrument { delay_ms: 1 }]),
            Some(Cmd::ScheduleInstrument { delay_ms: 1 })
        ));
    }

    #[test]
    fn test_into_vec_flattens() {
        let cmd = Cmd::Batch(vec![
            Cmd::CopyToClipboard("a".into()),
            Cmd::Batch(vec![Cmd::None, Cmd::OpenDetached("b".into())]),
        ]);
        assert_eq!(cmd.into_vec().len(), 2);
    }

    #[test]
    fn test_host_event_json_shape() {
        let json = serde_json::to_string(&HostEvent::ElementSelect { line: 4 }).unwrap();
        assert_eq!(json, r#"{"event":"element_select","line":4}"#);
    }
}
