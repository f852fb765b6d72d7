//! Scripted interaction sessions
//!
//! A script is a YAML list of steps replayed against a [`Session`], standing
//! in for a user working in the rendered view:
//!
//! ```yaml
//! - action: edit_text
//!   target: h1
//!   text: Hello there
//! - action: delete_mode
//!   enabled: true
//! - action: remove
//!   target: div.container
//! ```
//!
//! Targets are simple selectors (`#id`, `.class`, `tag`, `tag#id`,
//! `tag.class`) resolved against the current view after each step settles.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dom::NodeId;
use crate::messages::{AppMsg, Key, Modifiers, Msg, SelectionMsg, SourceMsg, SurfaceMsg};
use crate::model::{NodeRef, View};
use crate::runtime::{Host, Session};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("no rendered view to run `{0}` against")]
    NoView(&'static str),
    #[error("no element matches `{0}`")]
    UnknownTarget(String),
    #[error("no editable text inside `{0}`")]
    NotEditable(String),
    #[error("`{0}` was not selected; is delete mode on and is it a container?")]
    NotSelected(String),
}

/// How an inline edit is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commit {
    #[default]
    Blur,
    Enter,
}

/// One scripted interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Replace the whole source, as the authoring surface would
    Replace { text: String },
    /// Type `text` into the first editable unit inside `target` and commit it
    EditText {
        target: String,
        text: String,
        #[serde(default)]
        commit: Commit,
    },
    DeleteMode { enabled: bool },
    /// Select the container `target` and confirm its removal
    Remove { target: String },
    Locate { target: String },
    Refresh,
    Reset,
    Copy,
    OpenDetached,
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Step::Replace { .. } => "replace",
            Step::EditText { .. } => "edit_text",
            Step::DeleteMode { .. } => "delete_mode",
            Step::Remove { .. } => "remove",
            Step::Locate { .. } => "locate",
            Step::Refresh => "refresh",
            Step::Reset => "reset",
            Step::Copy => "copy",
            Step::OpenDetached => "open_detached",
        }
    }
}

/// An ordered list of steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_yaml(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Replay every step, settling the session after each one
    pub fn run<H: Host>(&self, session: &mut Session<H>) -> Result<(), ScriptError> {
        for (i, step) in self.steps.iter().enumerate() {
            tracing::debug!(step = i, action = step.name(), "running script step");
            run_step(session, step)?;
            session.settle();
        }
        Ok(())
    }
}

fn run_step<H: Host>(session: &mut Session<H>, step: &Step) -> Result<(), ScriptError> {
    match step {
        Step::Replace { text } => session.dispatch(Msg::Source(SourceMsg::Replace(text.clone()))),
        Step::Refresh => session.dispatch(Msg::Source(SourceMsg::Refresh)),
        Step::Reset => session.dispatch(Msg::Source(SourceMsg::ResetToDefault)),
        Step::Copy => session.dispatch(Msg::App(AppMsg::CopySource)),
        Step::OpenDetached => session.dispatch(Msg::App(AppMsg::OpenDetached)),
        Step::DeleteMode { enabled } => {
            session.dispatch(Msg::Selection(SelectionMsg::SetDeleteMode(*enabled)))
        }

        Step::EditText {
            target,
            text,
            commit,
        } => {
            let unit = editable_in(current_view(session, step)?, target)?;
            session.dispatch(Msg::Surface(SurfaceMsg::PointerEnter(unit)));
            session.dispatch(Msg::Surface(SurfaceMsg::Focus(unit)));
            session.dispatch(Msg::Surface(SurfaceMsg::Input {
                node: unit,
                text: text.clone(),
            }));
            match commit {
                Commit::Enter => session.dispatch(Msg::Surface(SurfaceMsg::KeyDown {
                    node: unit,
                    key: Key::Enter,
                    modifiers: Modifiers::NONE,
                })),
                Commit::Blur => session.dispatch(Msg::Surface(SurfaceMsg::Blur(unit))),
            }
        }

        Step::Remove { target } => {
            let node = resolve(current_view(session, step)?, target)?;
            session.dispatch(Msg::Selection(SelectionMsg::PointerEnter(node)));
            session.dispatch(Msg::Selection(SelectionMsg::Click(node)));
            let selected = session
                .view()
                .is_some_and(|v| v.selection.selected().is_some());
            if !selected {
                return Err(ScriptError::NotSelected(target.clone()));
            }
            session.dispatch(Msg::Selection(SelectionMsg::ConfirmRemoval));
        }

        Step::Locate { target } => {
            let node = resolve(current_view(session, step)?, target)?;
            session.dispatch(Msg::App(AppMsg::Locate(node)));
        }
    }
    Ok(())
}

fn current_view<'s, H: Host>(
    session: &'s Session<H>,
    step: &Step,
) -> Result<&'s View, ScriptError> {
    session.view().ok_or(ScriptError::NoView(step.name()))
}

fn resolve(view: &View, target: &str) -> Result<NodeRef, ScriptError> {
    view.query(target)
        .ok_or_else(|| ScriptError::UnknownTarget(target.to_string()))
}

/// First editable unit at or below the element matching `target`
fn editable_in(view: &View, target: &str) -> Result<NodeRef, ScriptError> {
    let element = resolve(view, target)?.node;
    let inside = |wrapper: NodeId| {
        wrapper == element || view.tree.ancestors(wrapper).any(|a| a == element)
    };
    view.surface
        .as_ref()
        .and_then(|s| s.units().iter().find(|u| inside(u.wrapper)))
        .map(|u| view.node_ref(u.wrapper))
        .ok_or_else(|| ScriptError::NotEditable(target.to_string()))
}
