//! Tool state machine: toggling, applying submissions, tracking the selection
//!
//! ```text
//! Inactive --Surround(range)--> MenuOpen --Surround--> Inactive
//!                                  |
//!                           Submit / Remove
//!                                  v
//!                             Submitting --(unwrap, wrap)--> Inactive
//! ```

use tracing::{debug, warn};

use crate::commands::Cmd;
use crate::diagnostics::Diagnostic;
use crate::dom::{DomError, Range};
use crate::messages::{HostMsg, ToolMsg};
use crate::model::{AnnotationHandle, LinkAttributes, LinkModel, SubmitType};
use crate::mutator;

/// Handle lifecycle hooks called by the host
pub fn update_tool(model: &mut LinkModel, msg: ToolMsg) -> Option<Cmd> {
    match msg {
        ToolMsg::Surround(range) => surround(model, range),
        ToolMsg::CheckState => {
            check_state(model);
            Some(Cmd::Redraw)
        }
        ToolMsg::Clear => {
            clear(model);
            Some(Cmd::Redraw)
        }
    }
}

/// Handle notifications from the host document
pub fn update_host(model: &mut LinkModel, msg: HostMsg) -> Option<Cmd> {
    match msg {
        HostMsg::SelectionChanged(range) => {
            match range {
                Some(range) => model.selection.set_range(range),
                None => model.selection.clear(),
            }
            check_state(model);
            Some(Cmd::Redraw)
        }
    }
}

/// Toggle the menu, or apply a staged submission
pub(super) fn surround(model: &mut LinkModel, range: Option<Range>) -> Option<Cmd> {
    if model.tool.is_submitted {
        apply_submission(model);
        return Some(Cmd::Redraw);
    }

    if model.tool.is_active {
        debug!(target: "tool", "toggled off, discarding captured range");
        close(model);
        return Some(Cmd::Redraw);
    }

    let Some(range) = range else {
        debug!(target: "tool", "surround without a selection ignored");
        return None;
    };
    open(model, range);
    Some(Cmd::batch(vec![Cmd::FocusInput, Cmd::Redraw]))
}

/// Re-evaluate whether the selection sits inside a link
///
/// Inside a link the menu opens pre-filled with it. Outside, a menu that was
/// showing a link closes; a menu opened for adding a new link stays open.
pub(super) fn check_state(model: &mut LinkModel) {
    if model.tool.is_submitted {
        return;
    }

    match (model.find_annotation(), model.selection.range()) {
        (Some(_), Some(range)) => {
            let showing_same = model.menu.is_open()
                && model.menu.is_existing_link()
                && model.tool.range == Some(range);
            if !showing_same {
                open(model, range);
            }
        }
        _ => {
            if model.menu.is_open() && model.menu.is_existing_link() {
                debug!(target: "tool", "selection left the link, closing menu");
                close(model);
            }
        }
    }
}

/// Drop everything pending; called when the inline toolbar closes
pub(super) fn clear(model: &mut LinkModel) {
    if model.tool.is_active {
        debug!(target: "tool", "toolbar closed, clearing");
    }
    close(model);
}

fn open(model: &mut LinkModel, range: Range) {
    model.selection.set_range(range);
    model.selection.save();

    let existing = model
        .find_annotation()
        .map(|handle| handle.attributes(&model.document));
    debug!(
        target: "tool",
        existing = existing.is_some(),
        "opening menu"
    );

    model.tool.is_active = true;
    model.tool.range = Some(range);
    model.menu.open(existing, &model.options);
}

pub(super) fn close(model: &mut LinkModel) {
    if model.tool.is_active {
        model.selection.restore();
    }
    model.menu.close();
    model.tool.reset();
}

fn apply_submission(model: &mut LinkModel) {
    let submit_type = model.tool.submit_type;
    let attrs = model.tool.attributes();
    let staged_anchor = model.tool.anchor.take();
    if !model.selection.restore() {
        if let Some(range) = model.tool.range {
            model.selection.set_range(range);
        }
    }

    debug!(target: "tool", ?submit_type, "applying submission");
    if let Err(err) = apply(model, submit_type, staged_anchor, &attrs) {
        warn!(target: "tool", "link not applied: {}", err);
        model.diagnostics.push(Diagnostic::Mutation(err));
    }

    model.menu.close();
    model.tool.reset();
}

/// Unwrap any enclosing link first, then wrap again for an "add"
fn apply(
    model: &mut LinkModel,
    submit_type: SubmitType,
    staged_anchor: Option<AnnotationHandle>,
    attrs: &LinkAttributes,
) -> Result<(), DomError> {
    let existing = staged_anchor
        .filter(|handle| handle.is_attached(&model.document))
        .or_else(|| model.find_annotation());

    if let Some(handle) = existing {
        mutator::unwrap(&mut model.document, &mut model.selection, handle)?;
    }

    if submit_type == SubmitType::Add {
        let Some(range) = model.selection.range() else {
            debug!(target: "tool", "no range to wrap");
            return Ok(());
        };
        mutator::wrap(&mut model.document, &mut model.selection, &range, attrs)?;
    }
    Ok(())
}
