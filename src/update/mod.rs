//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod menu;
mod tool;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::LinkModel;

#[cfg(debug_assertions)]
use crate::tracing::StateSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use menu::update_menu;
pub use tool::{update_host, update_tool};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut LinkModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut LinkModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Tool(m) => tool::update_tool(model, m),
        Msg::Menu(m) => menu::update_menu(model, m),
        Msg::Host(m) => tool::update_host(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after tool state and logs the diff.
#[cfg(debug_assertions)]
fn update_traced(model: &mut LinkModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = StateSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = StateSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "state", %diff, "state changed");
    }
    after.assert_invariants(&msg_name);

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Tool::Surround(None)`
/// - `Menu::InsertChar('x')`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Tool(m) => format!("Tool::{:?}", m),
        Msg::Menu(m) => format!("Menu::{:?}", m),
        Msg::Host(m) => format!("Host::{:?}", m),
    }
}
