//! Action menu handlers: URL input, selectors, Add and Remove buttons

use tracing::debug;

use crate::commands::Cmd;
use crate::messages::MenuMsg;
use crate::model::{LinkAttributes, LinkModel, MenuAction};
use crate::util::{delete_word_backward, is_valid, prepare_link};

use super::tool;

/// Handle messages from the action menu
///
/// Ignored while the menu is closed (its handlers are detached then).
pub fn update_menu(model: &mut LinkModel, msg: MenuMsg) -> Option<Cmd> {
    if !model.menu.is_open() {
        debug!(target: "menu", ?msg, "menu closed, ignoring");
        return None;
    }

    match msg {
        MenuMsg::SetInput(text) => {
            model.menu.input = text;
            input_changed(model)
        }

        MenuMsg::InsertChar(ch) => {
            model.menu.input.push(ch);
            input_changed(model)
        }

        MenuMsg::DeleteBackward => {
            model.menu.input.pop();
            input_changed(model)
        }

        MenuMsg::DeleteWordBackward => {
            delete_word_backward(&mut model.menu.input);
            input_changed(model)
        }

        MenuMsg::SelectTarget(target) => {
            if !model.options.has_target(&target) {
                debug!(target: "menu", value = %target, "target not available");
                return None;
            }
            model.menu.target = target;
            model.menu.refresh_actions();
            Some(Cmd::Redraw)
        }

        MenuMsg::SelectRelation(rel) => {
            if !model.options.has_relation(&rel) {
                debug!(target: "menu", value = %rel, "relation not available");
                return None;
            }
            model.menu.rel = rel;
            model.menu.refresh_actions();
            Some(Cmd::Redraw)
        }

        MenuMsg::Submit => submit(model),

        MenuMsg::Remove => remove(model),

        MenuMsg::Confirm => match model.menu.primary_action() {
            Some(MenuAction::Add) => submit(model),
            Some(MenuAction::Remove) => remove(model),
            None => None,
        },

        MenuMsg::Cancel => {
            tool::close(model);
            Some(Cmd::Redraw)
        }
    }
}

fn input_changed(model: &mut LinkModel) -> Option<Cmd> {
    model.menu.hide_error();
    model.menu.refresh_actions();
    Some(Cmd::Redraw)
}

/// Add button: validate, stage and apply
fn submit(model: &mut LinkModel) -> Option<Cmd> {
    if !model.menu.handlers_attached || !model.menu.add_visible {
        debug!(target: "menu", "add button not offered, ignoring");
        return None;
    }

    let staged = model.menu.staged();
    if !is_valid(&staged.href, model.config.validate) {
        debug!(target: "menu", input = %staged.href, "invalid URL");
        model.menu.show_error();
        return Some(Cmd::Redraw);
    }
    model.menu.hide_error();

    model.tool.stage_add(LinkAttributes {
        href: prepare_link(&staged.href),
        ..staged
    });
    let cmd = tool::surround(model, None);
    Some(Cmd::batch(vec![Cmd::CloseToolbar, cmd.unwrap_or_default()]))
}

/// Remove button: find the link at the captured range and unwrap it
fn remove(model: &mut LinkModel) -> Option<Cmd> {
    if !model.menu.handlers_attached || !model.menu.remove_visible {
        debug!(target: "menu", "remove button not offered, ignoring");
        return None;
    }

    if let Some(range) = model.tool.range {
        model.selection.set_range(range);
    }
    let Some(anchor) = model.find_annotation() else {
        debug!(target: "menu", "no link at the selection, nothing to remove");
        return None;
    };

    model.tool.stage_remove(anchor);
    let cmd = tool::surround(model, None);
    Some(Cmd::batch(vec![Cmd::CloseToolbar, cmd.unwrap_or_default()]))
}
