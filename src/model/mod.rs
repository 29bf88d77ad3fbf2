//! Tool model - the complete state of one link tool instance
//!
//! Follows the Elm Architecture: [`LinkModel`] is only changed by
//! [`crate::update::update`].

pub mod link;
pub mod menu;
pub mod tool_state;

pub use link::{
    AnnotationHandle, ExistingLink, LinkAttributes, ANNOTATION_CLASS, ANNOTATION_TAG,
};
pub use menu::{ActionMenu, MenuAction, INVALID_URL_HINT};
pub use tool_state::{SubmitType, ToolPhase, ToolState};

use tracing::debug;

use crate::config::ToolConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::dom::{Document, Selection};
use crate::options::ResolvedOptions;

/// The complete tool model
#[derive(Debug, Clone)]
pub struct LinkModel {
    /// Host document the tool edits
    pub document: Document,
    /// The host's active selection
    pub selection: Selection,
    /// Configuration supplied at construction
    pub config: ToolConfig,
    /// Allowed targets/relations and their defaults
    pub options: ResolvedOptions,
    /// Activity and submission bookkeeping
    pub tool: ToolState,
    /// Action menu view model
    pub menu: ActionMenu,
    /// Non-fatal events for the host
    pub diagnostics: Diagnostics,
}

impl LinkModel {
    pub fn new(document: Document, config: ToolConfig) -> Self {
        let options = ResolvedOptions::resolve(&config);
        let mut diagnostics = Diagnostics::new();
        for warning in &options.warnings {
            diagnostics.push(Diagnostic::Config(warning.clone()));
        }
        let menu = ActionMenu::new(&options, config.placeholder.clone());

        Self {
            document,
            selection: Selection::new(),
            config,
            options,
            tool: ToolState::new(),
            menu,
            diagnostics,
        }
    }

    pub fn phase(&self) -> ToolPhase {
        self.tool.phase()
    }

    /// Anchor enclosing the current selection, if any
    pub fn find_annotation(&self) -> Option<AnnotationHandle> {
        AnnotationHandle::find(&self.document, &self.selection)
    }

    /// Markup of the whole document
    pub fn html(&self) -> String {
        self.document.inner_html(self.document.root())
    }

    /// Reclaim arena slots left behind by earlier edits
    ///
    /// Only runs while the tool is inactive, when the selection is the sole
    /// holder of node ids; it is translated to the new ids. Returns whether
    /// compaction ran.
    pub fn compact_document(&mut self) -> bool {
        if self.phase() != ToolPhase::Inactive {
            return false;
        }
        let before = self.document.arena_len();
        let map = self.document.compact();
        self.selection.remap(&map);
        debug!(
            target: "model",
            before,
            after = self.document.arena_len(),
            "compacted document"
        );
        true
    }
}

impl Default for LinkModel {
    fn default() -> Self {
        Self::new(Document::new(), ToolConfig::default())
    }
}
