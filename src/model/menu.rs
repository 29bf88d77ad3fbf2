//! Action menu view model
//!
//! Everything the host needs to draw the popup: the URL input and its error
//! hint, the target and relation selectors, and which of the two mutually
//! exclusive buttons is showing.

use crate::options::ResolvedOptions;

use super::link::{ExistingLink, LinkAttributes};

/// Text of the inline error hint
pub const INVALID_URL_HINT: &str = "Invalid URL";

/// The button currently offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    pub visible: bool,
    pub input: String,
    pub placeholder: String,
    pub error_visible: bool,
    pub target: String,
    pub rel: String,
    pub targets: Vec<&'static str>,
    pub relations: Vec<&'static str>,
    pub add_visible: bool,
    pub remove_visible: bool,
    /// Whether the button handlers are wired; button messages are ignored otherwise
    pub handlers_attached: bool,
    /// Anchor values the menu was opened with, for the existing-link variant
    pub existing: Option<ExistingLink>,
    /// Field values right after pre-filling from `existing`
    prefilled: Option<LinkAttributes>,
}

impl ActionMenu {
    pub fn new(options: &ResolvedOptions, placeholder: impl Into<String>) -> Self {
        Self {
            visible: false,
            input: String::new(),
            placeholder: placeholder.into(),
            error_visible: false,
            target: options.default_target.clone(),
            rel: options.default_relation.clone(),
            targets: options.targets.clone(),
            relations: options.relations.clone(),
            add_visible: false,
            remove_visible: false,
            handlers_attached: false,
            existing: None,
            prefilled: None,
        }
    }

    /// Show the menu, pre-filled from an existing anchor or empty
    pub fn open(&mut self, existing: Option<ExistingLink>, options: &ResolvedOptions) {
        match &existing {
            Some(link) => {
                self.input = link.href.clone();
                self.target = options.target_or_default(link.target.as_deref());
                self.rel = options.relation_or_default(link.rel.as_deref());
            }
            None => {
                self.input.clear();
                self.target = options.default_target.clone();
                self.rel = options.default_relation.clone();
            }
        }
        self.prefilled = existing
            .as_ref()
            .map(|_| LinkAttributes::new(self.input.clone(), self.target.clone(), self.rel.clone()));
        self.existing = existing;
        self.error_visible = false;
        self.visible = true;
        self.handlers_attached = true;
        self.refresh_actions();
    }

    /// Hide the menu and detach the button handlers; safe to repeat
    pub fn close(&mut self) {
        self.visible = false;
        self.error_visible = false;
        self.handlers_attached = false;
        self.add_visible = false;
        self.remove_visible = false;
        self.existing = None;
        self.prefilled = None;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn is_existing_link(&self) -> bool {
        self.existing.is_some()
    }

    /// Pick the visible button
    ///
    /// A fresh selection offers Add. An existing link offers Remove until the
    /// user edits any field, at which point Add (replace) takes over.
    pub fn refresh_actions(&mut self) {
        let show_remove = match &self.prefilled {
            Some(prefilled) => {
                self.input == prefilled.href
                    && self.target == prefilled.target
                    && self.rel == prefilled.rel
            }
            None => false,
        };
        self.remove_visible = show_remove;
        self.add_visible = !show_remove;
    }

    /// The button Enter activates
    pub fn primary_action(&self) -> Option<MenuAction> {
        if !self.visible || !self.handlers_attached {
            None
        } else if self.add_visible {
            Some(MenuAction::Add)
        } else if self.remove_visible {
            Some(MenuAction::Remove)
        } else {
            None
        }
    }

    /// Values to stage for an "add" submission (href not yet prepared)
    pub fn staged(&self) -> LinkAttributes {
        LinkAttributes::new(self.input.trim(), self.target.clone(), self.rel.clone())
    }

    pub fn show_error(&mut self) {
        self.error_visible = true;
    }

    pub fn hide_error(&mut self) {
        self.error_visible = false;
    }
}
