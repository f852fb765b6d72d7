//! Livesync - two-way sync between an HTML source and its live rendering
//!
//! This crate keeps a source buffer and an editable rendered view of it
//! consistent, implementing the Elm Architecture pattern: view interactions
//! become messages, `update` turns them into source patches, and every source
//! change is rendered and instrumented afresh.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dom;
pub mod locator;
pub mod messages;
pub mod model;
pub mod patch;
pub mod runtime;
pub mod script;
pub mod selection;
pub mod surface;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::{Cmd, HostEvent};
pub use config::SyncConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::{Host, Session};
