//! Active selection and the host editor's selection helpers

use super::document::{Document, NodeMap};
use super::range::Range;
use super::{DomError, NodeId};

/// How many levels `find_parent_tag` climbs before giving up
pub const PARENT_TAG_SEARCH_DEPTH: usize = 10;

/// The document's current selection
///
/// `saved` holds a range stashed while focus moves into the tool's input
/// field, so it can be put back before the document is mutated.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    range: Option<Range>,
    saved: Option<Range>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(range: Range) -> Self {
        Self {
            range: Some(range),
            saved: None,
        }
    }

    pub fn range(&self) -> Option<Range> {
        self.range
    }

    pub fn set_range(&mut self, range: Range) {
        self.range = Some(range);
    }

    pub fn clear(&mut self) {
        self.range = None;
    }

    pub fn is_collapsed(&self) -> bool {
        self.range.map(|r| r.is_collapsed()).unwrap_or(true)
    }

    /// Remember the current range
    pub fn save(&mut self) {
        self.saved = self.range;
    }

    /// Put back the remembered range, if any
    pub fn restore(&mut self) -> bool {
        match self.saved.take() {
            Some(range) => {
                self.range = Some(range);
                true
            }
            None => false,
        }
    }

    pub fn saved(&self) -> Option<Range> {
        self.saved
    }

    /// Follow the document through [`Document::compact`]
    ///
    /// Ranges that pointed into dropped nodes are cleared.
    pub fn remap(&mut self, map: &NodeMap) {
        self.range = self.range.and_then(|range| range.remap(map));
        self.saved = self.saved.and_then(|range| range.remap(map));
    }

    /// Look for an enclosing element with `tag` (and `class`, if given)
    ///
    /// Searches upward from the start container first and then from the end
    /// container, checking the container itself and at most `depth` levels.
    pub fn find_parent_tag(
        &self,
        doc: &Document,
        tag: &str,
        class: Option<&str>,
        depth: usize,
    ) -> Option<NodeId> {
        let range = self.range?;
        [range.start.node, range.end.node]
            .into_iter()
            .find_map(|bound| search_up(doc, bound, tag, class, depth))
    }

    /// Select the full contents of `node`
    pub fn expand_to_tag(&mut self, doc: &Document, node: NodeId) -> Result<(), DomError> {
        if !doc.is_attached(node) {
            return Err(DomError::NotAttached(node));
        }
        self.range = Some(Range::select_node_contents(doc, node)?);
        Ok(())
    }
}

fn search_up(
    doc: &Document,
    from: NodeId,
    tag: &str,
    class: Option<&str>,
    depth: usize,
) -> Option<NodeId> {
    doc.ancestors(from)
        .take(depth + 1)
        .take_while(|id| *id != doc.root())
        .find(|id| {
            doc.element(*id)
                .map(|el| el.is_tag(tag) && class.map(|c| el.has_class(c)).unwrap_or(true))
                .unwrap_or(false)
        })
}
