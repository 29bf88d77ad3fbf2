//! Tool bookkeeping: activity, pending submission and the captured range

use crate::dom::Range;

use super::link::{AnnotationHandle, LinkAttributes};

/// What a submission does once applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitType {
    #[default]
    Add,
    Remove,
}

/// Coarse state of the tool, derived from [`ToolState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolPhase {
    /// Menu hidden, nothing captured
    Inactive,
    /// Range captured, menu visible, waiting for the user
    MenuOpen,
    /// A submission is being applied (only observable mid-update)
    Submitting,
}

/// Per-instance tool state
///
/// Created inactive, mutated by the update handlers and reset to this
/// initial shape after every applied submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolState {
    pub is_active: bool,
    pub is_submitted: bool,
    pub submit_type: SubmitType,
    /// Range captured when the tool was toggled on
    pub range: Option<Range>,
    /// Anchor detected for a remove submission; consumed in the same update
    pub anchor: Option<AnnotationHandle>,
    pub href: String,
    pub target: String,
    pub rel: String,
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ToolPhase {
        match (self.is_active, self.is_submitted) {
            (_, true) => ToolPhase::Submitting,
            (true, false) => ToolPhase::MenuOpen,
            (false, false) => ToolPhase::Inactive,
        }
    }

    /// Stage an "add" submission
    pub fn stage_add(&mut self, attrs: LinkAttributes) {
        self.href = attrs.href;
        self.target = attrs.target;
        self.rel = attrs.rel;
        self.submit_type = SubmitType::Add;
        self.is_submitted = true;
    }

    /// Stage a "remove" submission for the given anchor
    pub fn stage_remove(&mut self, anchor: AnnotationHandle) {
        self.anchor = Some(anchor);
        self.submit_type = SubmitType::Remove;
        self.is_submitted = true;
    }

    /// Staged attributes for an "add" submission
    pub fn attributes(&self) -> LinkAttributes {
        LinkAttributes::new(self.href.clone(), self.target.clone(), self.rel.clone())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
