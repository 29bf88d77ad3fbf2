//! The inline tool as the host editor sees it
//!
//! A host drives a tool through [`InlineTool`]: it draws the button from
//! [`InlineTool::render`], forwards toolbar clicks to
//! [`InlineTool::surround`] and selection changes to
//! [`InlineTool::check_state`], and calls [`InlineTool::clear`] when its inline
//! toolbar closes.

use crate::commands::Cmd;
use crate::config::ToolConfig;
use crate::dom::{Document, Range};
use crate::messages::{Msg, ToolMsg};
use crate::model::{LinkModel, ANNOTATION_TAG};
use crate::update::update;

/// Style class shared by every inline tool button
pub const BUTTON_CLASS: &str = "ce-inline-tool";

/// Extra style class of a button whose tool applies to the selection
pub const BUTTON_ACTIVE_CLASS: &str = "ce-inline-tool--active";

/// Markup the host sanitizer must let through for a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeRules {
    pub tag: &'static str,
    pub attributes: &'static [&'static str],
}

impl SanitizeRules {
    pub fn allows(&self, tag: &str, attribute: &str) -> bool {
        tag.eq_ignore_ascii_case(self.tag)
            && self
                .attributes
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(attribute))
    }
}

/// Button view model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolButton {
    pub icon: &'static str,
    pub title: String,
    pub classes: Vec<&'static str>,
    pub active: bool,
}

/// Lifecycle contract between a host editor and an inline tool
pub trait InlineTool {
    fn title(&self) -> &str;

    /// Keyboard shortcut advertised to the host
    fn shortcut(&self) -> &str;

    fn is_inline(&self) -> bool {
        true
    }

    fn sanitize(&self) -> SanitizeRules;

    fn render(&self) -> ToolButton;

    /// Toolbar button activated with the host's current selection
    fn surround(&mut self, range: Option<Range>) -> Option<Cmd>;

    /// Selection changed; returns whether the button is active
    fn check_state(&mut self) -> bool;

    /// The host's inline toolbar closed
    fn clear(&mut self);
}

/// Hyperlink tool bound to one host document
#[derive(Debug, Clone)]
pub struct LinkTool {
    model: LinkModel,
}

impl LinkTool {
    pub fn new(document: Document, config: ToolConfig) -> Self {
        Self {
            model: LinkModel::new(document, config),
        }
    }

    pub fn from_model(model: LinkModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &LinkModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut LinkModel {
        &mut self.model
    }

    pub fn into_model(self) -> LinkModel {
        self.model
    }

    /// Run one message through the update function
    pub fn dispatch(&mut self, msg: Msg) -> Option<Cmd> {
        update(&mut self.model, msg)
    }
}

impl InlineTool for LinkTool {
    fn title(&self) -> &str {
        "Link"
    }

    fn shortcut(&self) -> &str {
        &self.model.config.shortcut
    }

    fn sanitize(&self) -> SanitizeRules {
        SanitizeRules {
            tag: ANNOTATION_TAG,
            attributes: &["class", "href", "target", "rel"],
        }
    }

    fn render(&self) -> ToolButton {
        let in_link = self.model.find_annotation().is_some();
        let active = in_link || self.model.tool.is_active;

        let mut classes = vec![BUTTON_CLASS];
        if active {
            classes.push(BUTTON_ACTIVE_CLASS);
        }

        ToolButton {
            icon: if in_link { "unlink" } else { "link" },
            title: self.title().to_string(),
            classes,
            active,
        }
    }

    fn surround(&mut self, range: Option<Range>) -> Option<Cmd> {
        self.dispatch(Msg::Tool(ToolMsg::Surround(range)))
    }

    fn check_state(&mut self) -> bool {
        self.dispatch(Msg::Tool(ToolMsg::CheckState));
        self.model.find_annotation().is_some()
    }

    fn clear(&mut self) {
        self.dispatch(Msg::Tool(ToolMsg::Clear));
    }
}
