//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Messages that target a
//! node in the rendered view carry a [`NodeRef`]; one addressed to a tree that
//! has since been replaced is dropped.

use crate::dom::Tree;
use crate::model::NodeRef;

/// Keys the editable surface reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    Character(char),
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Source buffer messages (from the authoring surface)
#[derive(Debug, Clone)]
pub enum SourceMsg {
    /// Replace the whole document (authoring surface change)
    Replace(String),
    /// Restore the default document
    ResetToDefault,
    /// Re-render the current document without changing it
    Refresh,
}

/// Render cycle messages
#[derive(Debug, Clone)]
pub enum RenderMsg {
    /// A document was written into the rendered context
    Rendered { revision: u64, tree: Box<Tree> },
    /// The rendered context could not take the document
    Failed { revision: u64, reason: String },
    /// The deferred instrumentation tick fired
    InstrumentReady,
}

/// Editable unit interaction
#[derive(Debug, Clone)]
pub enum SurfaceMsg {
    PointerEnter(NodeRef),
    PointerLeave(NodeRef),
    Focus(NodeRef),
    /// The unit's content changed to `text`
    Input { node: NodeRef, text: String },
    KeyDown {
        node: NodeRef,
        key: Key,
        modifiers: Modifiers,
    },
    Blur(NodeRef),
}

/// Structural selection and deletion
#[derive(Debug, Clone)]
pub enum SelectionMsg {
    /// Switch between normal and structural-delete mode
    ToggleDeleteMode,
    SetDeleteMode(bool),
    PointerEnter(NodeRef),
    PointerLeave(NodeRef),
    Click(NodeRef),
    /// The floating confirm-removal control was activated
    ConfirmRemoval,
}

/// Pass-through conveniences
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Report the source line of a node without changing anything
    Locate(NodeRef),
    /// Copy the source text verbatim
    CopySource,
    /// Open the current document in a separate rendered context
    OpenDetached,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Source(SourceMsg),
    Render(RenderMsg),
    Surface(SurfaceMsg),
    Selection(SelectionMsg),
    App(AppMsg),
}
