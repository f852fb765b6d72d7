//! The host application embedding the sync engine

use crate::commands::HostEvent;

/// Receives notifications and performs platform side effects.
///
/// Every method has a no-op default so hosts only implement what they use.
pub trait Host {
    fn on_text_edit(&mut self, _original_text: &str, _new_text: &str) {}

    fn on_element_delete(&mut self, _serialized_fragment: &str) {}

    fn on_element_select(&mut self, _line: usize) {}

    fn copy_to_clipboard(&mut self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }

    /// Show `document` in a rendered context independent of the live view
    fn open_detached(&mut self, _document: &str) -> anyhow::Result<()> {
        Ok(())
    }

    /// Route a host event to its callback
    fn notify(&mut self, event: &HostEvent) {
        match event {
            HostEvent::TextEdit {
                original_text,
                new_text,
            } => self.on_text_edit(original_text, new_text),
            HostEvent::ElementDelete {
                serialized_fragment,
            } => self.on_element_delete(serialized_fragment),
            HostEvent::ElementSelect { line } => self.on_element_select(*line),
        }
    }
}

/// Host that records every event, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    pub clipboard: Option<String>,
    pub detached: Vec<String>,
}

impl Host for RecordingHost {
    fn notify(&mut self, event: &HostEvent) {
        self.events.push(event.clone());
    }

    fn copy_to_clipboard(&mut self, text: &str) -> anyhow::Result<()> {
        self.clipboard = Some(text.to_string());
        Ok(())
    }

    fn open_detached(&mut self, document: &str) -> anyhow::Result<()> {
        self.detached.push(document.to_string());
        Ok(())
    }
}
