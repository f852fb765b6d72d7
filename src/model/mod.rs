//! Application model - the complete state of the sync engine
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod source;
pub mod view;

pub use source::{SourceBuffer, DEFAULT_DOCUMENT};
pub use view::{NodeRef, View};

use crate::config::SyncConfig;
use crate::selection::Mode;

/// The complete engine model
#[derive(Debug, Clone)]
pub struct AppModel {
    /// Canonical document text
    pub source: SourceBuffer,
    pub config: SyncConfig,
    /// Controller mode; survives re-renders
    pub mode: Mode,
    /// Current rendered view, `None` until the first render lands
    pub view: Option<View>,
    /// Generation counter handed to each new view
    pub render_generation: u64,
    /// Most recent render failure, cleared by the next successful render
    pub last_error: Option<String>,
}

impl AppModel {
    /// Model holding the default document
    pub fn new(config: SyncConfig) -> Self {
        Self::with_source(SourceBuffer::new(), config)
    }

    pub fn with_source(source: SourceBuffer, config: SyncConfig) -> Self {
        Self {
            source,
            config,
            mode: Mode::Normal,
            view: None,
            render_generation: 0,
            last_error: None,
        }
    }

    /// True if the current view was rendered from the current source revision
    pub fn is_view_current(&self) -> bool {
        self.view
            .as_ref()
            .is_some_and(|v| v.revision == self.source.revision())
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}
