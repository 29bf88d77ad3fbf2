//! Message types for the Elm-style architecture
//!
//! Every state change of the link tool flows through these messages and the
//! single [`crate::update::update`] function.

use crate::dom::Range;

/// Lifecycle hooks the host editor calls on the tool
#[derive(Debug, Clone, PartialEq)]
pub enum ToolMsg {
    /// Toolbar button activated with the current selection, or re-entry
    /// after a submission has been staged
    Surround(Option<Range>),
    /// Selection changed while the inline toolbar is visible
    CheckState,
    /// The inline toolbar closed
    Clear,
}

/// User interaction inside the action menu
#[derive(Debug, Clone, PartialEq)]
pub enum MenuMsg {
    /// Replace the URL input text
    SetInput(String),
    /// Type a character into the URL input
    InsertChar(char),
    /// Backspace in the URL input
    DeleteBackward,
    /// Option+Backspace in the URL input
    DeleteWordBackward,
    /// Choose a window target
    SelectTarget(String),
    /// Choose a `rel` value
    SelectRelation(String),
    /// Add button activated
    Submit,
    /// Remove button activated
    Remove,
    /// Enter pressed in the URL input
    Confirm,
    /// Escape pressed in the menu
    Cancel,
}

/// Notifications from the host document
#[derive(Debug, Clone, PartialEq)]
pub enum HostMsg {
    /// The user's selection moved (or was cleared)
    SelectionChanged(Option<Range>),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Tool(ToolMsg),
    Menu(MenuMsg),
    Host(HostMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Toolbar button press carrying the selection
    pub fn surround(range: Range) -> Self {
        Msg::Tool(ToolMsg::Surround(Some(range)))
    }

    pub fn set_input(text: impl Into<String>) -> Self {
        Msg::Menu(MenuMsg::SetInput(text.into()))
    }

    pub fn submit() -> Self {
        Msg::Menu(MenuMsg::Submit)
    }

    pub fn remove() -> Self {
        Msg::Menu(MenuMsg::Remove)
    }
}
