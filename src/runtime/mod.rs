//! Runtime - executes commands and feeds results back as messages
//!
//! A [`Session`] owns the model, the renderer and the host. Messages go
//! through a channel; commands produced by `update` are executed here, and
//! anything asynchronous in nature (render completion, the deferred
//! instrumentation tick) comes back as a message.
//!
//! - `host` - the embedding application's callbacks

pub mod host;

pub use host::{Host, RecordingHost};

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::dom::{RenderError, Renderer, Tree};
use crate::messages::{Msg, RenderMsg};
use crate::model::{AppModel, View};
use crate::update::{render_current, update};

/// A live-sync session between one source buffer and its rendered view
pub struct Session<H: Host> {
    model: AppModel,
    host: H,
    /// Created lazily and recreated after a failure
    renderer: Option<Renderer>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Deadlines of scheduled instrumentation ticks
    timers: Vec<Instant>,
}

impl<H: Host> Session<H> {
    pub fn new(model: AppModel, host: H) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let renderer = match Renderer::new() {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                tracing::warn!("Renderer unavailable: {}", e);
                None
            }
        };
        Self {
            model,
            host,
            renderer,
            msg_tx,
            msg_rx,
            timers: Vec::new(),
        }
    }

    /// Session that has rendered and instrumented its source
    pub fn started(model: AppModel, host: H) -> Self {
        let mut session = Self::new(model, host);
        session.start();
        session.settle();
        session
    }

    pub fn into_parts(self) -> (AppModel, H) {
        (self.model, self.host)
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn view(&self) -> Option<&View> {
        self.model.view.as_ref()
    }

    /// Sender for messages produced outside the session
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Number of instrumentation ticks waiting for their deadline
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Request a render of the current source
    pub fn start(&mut self) {
        let cmd = render_current(&self.model);
        self.process_cmd(cmd);
        self.process_messages();
    }

    /// Handle one message and everything it triggers synchronously
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
        self.process_messages();
    }

    /// Fire instrumentation ticks whose deadline has passed
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        let due = self.timers.iter().filter(|&&t| t <= now).count();
        self.timers.retain(|&t| t > now);
        for _ in 0..due {
            self.send(Msg::Render(RenderMsg::InstrumentReady));
        }
        self.process_messages();
    }

    /// Run until no work is left, treating every scheduled delay as elapsed
    pub fn settle(&mut self) {
        loop {
            self.process_messages();
            if self.timers.is_empty() {
                break;
            }
            let latest = self.timers.iter().copied().max().unwrap_or_else(Instant::now);
            self.tick_at(latest);
        }
    }

    /// Block until pending ticks are due, then fire them
    pub fn wait(&mut self) {
        if let Some(latest) = self.timers.iter().copied().max() {
            let remaining = latest.saturating_duration_since(Instant::now());
            if remaining > Duration::ZERO {
                std::thread::sleep(remaining);
            }
        }
        self.tick();
    }

    fn send(&self, msg: Msg) {
        // The receiver lives in `self`, so this cannot fail
        let _ = self.msg_tx.send(msg);
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(cmd) = update(&mut self.model, msg) {
                self.process_cmd(cmd);
            }
        }
    }

    fn render(&mut self, source: &str) -> Result<Tree, RenderError> {
        if self.renderer.is_none() {
            self.renderer = Some(Renderer::new()?);
        }
        match self.renderer.as_mut() {
            Some(renderer) => renderer.render(source),
            None => Err(RenderError::Aborted),
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Render { revision, source } => {
                let msg = match self.render(&source) {
                    Ok(tree) => RenderMsg::Rendered {
                        revision,
                        tree: Box::new(tree),
                    },
                    Err(e) => {
                        self.renderer = None;
                        RenderMsg::Failed {
                            revision,
                            reason: e.to_string(),
                        }
                    }
                };
                self.send(Msg::Render(msg));
            }
            Cmd::ScheduleInstrument { delay_ms } => {
                self.timers
                    .push(Instant::now() + Duration::from_millis(delay_ms));
            }
            Cmd::Notify(event) => {
                tracing::debug!(?event, "notifying host");
                self.host.notify(&event);
            }
            Cmd::CopyToClipboard(text) => {
                if let Err(e) = self.host.copy_to_clipboard(&text) {
                    tracing::warn!("Failed to copy source to clipboard: {}", e);
                }
            }
            Cmd::OpenDetached(document) => {
                if let Err(e) = self.host.open_detached(&document) {
                    tracing::warn!("Failed to open detached view: {}", e);
                }
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }
}
