//! Ranges over the document tree
//!
//! A boundary point is `(container, offset)`: a char offset when the
//! container is a text node, a child index otherwise.

use super::document::{Document, NodeMap};
use super::{DomError, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryPoint {
    pub node: NodeId,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A contiguous span of document content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
}

impl Range {
    pub fn new(start: BoundaryPoint, end: BoundaryPoint) -> Self {
        Self { start, end }
    }

    pub fn collapsed(point: BoundaryPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Range spanning `start..end` chars of a single text node
    pub fn in_text(node: NodeId, start: usize, end: usize) -> Self {
        Self::new(BoundaryPoint::new(node, start), BoundaryPoint::new(node, end))
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Range around a node, with both boundaries in its parent
    pub fn select_node(doc: &Document, node: NodeId) -> Result<Self, DomError> {
        let parent = doc.parent(node).ok_or(DomError::NotAttached(node))?;
        let idx = doc
            .index_in_parent(node)
            .ok_or(DomError::NotAttached(node))?;
        Ok(Self::new(
            BoundaryPoint::new(parent, idx),
            BoundaryPoint::new(parent, idx + 1),
        ))
    }

    /// Range over everything inside a node
    pub fn select_node_contents(doc: &Document, node: NodeId) -> Result<Self, DomError> {
        let len = doc.length(node)?;
        Ok(Self::new(
            BoundaryPoint::new(node, 0),
            BoundaryPoint::new(node, len),
        ))
    }

    /// Build a range from char offsets into the text content of `container`
    ///
    /// Offsets past the end clamp to the end of the last text node; a
    /// container with no text yields a collapsed range at its end.
    pub fn from_text_offsets(
        doc: &Document,
        container: NodeId,
        start: usize,
        end: usize,
    ) -> Result<Self, DomError> {
        doc.node(container)?;
        let end = end.max(start);
        let end_point = text_boundary(doc, container, end, true);
        if start == end {
            return Ok(Self::collapsed(end_point));
        }
        let start_point = text_boundary(doc, container, start, false);
        Ok(Self::new(start_point, end_point))
    }

    /// Translate both boundaries after [`Document::compact`]
    ///
    /// `None` if either boundary node was dropped.
    pub fn remap(&self, map: &NodeMap) -> Option<Self> {
        Some(Self::new(
            BoundaryPoint::new(map.get(self.start.node)?, self.start.offset),
            BoundaryPoint::new(map.get(self.end.node)?, self.end.offset),
        ))
    }

    /// Check that both boundaries are attached and in bounds
    pub fn validate(&self, doc: &Document) -> Result<(), DomError> {
        for point in [self.start, self.end] {
            if !doc.is_attached(point.node) {
                return Err(DomError::NotAttached(point.node));
            }
            if point.offset > doc.length(point.node)? {
                return Err(DomError::InvalidBoundary {
                    node: point.node,
                    offset: point.offset,
                });
            }
        }
        Ok(())
    }

    /// Deepest node containing both boundaries
    pub fn common_ancestor(&self, doc: &Document) -> NodeId {
        let start_chain: Vec<NodeId> = doc.ancestors(self.start.node).collect();
        doc.ancestors(self.end.node)
            .find(|id| start_chain.contains(id))
            .unwrap_or_else(|| doc.root())
    }

    /// Text covered by the range
    pub fn text(&self, doc: &Document) -> String {
        let mut out = String::new();
        let mut inside = false;
        collect_range_text(doc, doc.root(), self, &mut inside, &mut out);
        out
    }

    /// Remove the range's content from the document and return it
    ///
    /// Text nodes and partially covered elements at the boundaries are split
    /// so the returned top-level nodes carry the original markup. Afterwards
    /// the range collapses to the point where the content used to be.
    pub fn extract_contents(&mut self, doc: &mut Document) -> Result<Vec<NodeId>, DomError> {
        self.validate(doc)?;

        let mut ancestor = self.common_ancestor(doc);
        if doc.node(ancestor)?.is_text() {
            ancestor = doc.parent(ancestor).ok_or(DomError::NotAttached(ancestor))?;
        }

        // Split the end first so the start boundary stays valid, then find the
        // end again through the first node after it.
        let end_idx = split_boundary(doc, self.end, ancestor)?;
        let after_end = doc.children(ancestor).get(end_idx).copied();
        let start_idx = split_boundary(doc, self.start, ancestor)?;
        let end_idx = match after_end {
            Some(node) => doc.index_in_parent(node).unwrap_or(start_idx),
            None => doc.children(ancestor).len(),
        };

        let fragment: Vec<NodeId> = doc
            .children(ancestor)
            .get(start_idx..end_idx.max(start_idx))
            .map(<[NodeId]>::to_vec)
            .unwrap_or_default();
        for node in &fragment {
            doc.detach(*node)?;
        }

        *self = Self::collapsed(BoundaryPoint::new(ancestor, start_idx));
        Ok(fragment)
    }

    /// Insert nodes at the start boundary, splitting a text container
    pub fn insert_nodes(&self, doc: &mut Document, nodes: &[NodeId]) -> Result<(), DomError> {
        let point = self.start;
        if doc.node(point.node)?.is_text() {
            let parent = doc
                .parent(point.node)
                .ok_or(DomError::NotAttached(point.node))?;
            let idx = doc
                .index_in_parent(point.node)
                .ok_or(DomError::NotAttached(point.node))?;
            let len = doc.length(point.node)?;
            let at = if point.offset == 0 {
                idx
            } else {
                if point.offset < len {
                    doc.split_text(point.node, point.offset)?;
                }
                idx + 1
            };
            doc.insert_children_at(parent, at, nodes)
        } else {
            doc.insert_children_at(point.node, point.offset, nodes)
        }
    }
}

fn text_boundary(doc: &Document, container: NodeId, offset: usize, is_end: bool) -> BoundaryPoint {
    let mut consumed = 0;
    let mut last = None;
    for text in doc.text_nodes(container) {
        let len = doc.length(text).unwrap_or(0);
        let hit = if is_end {
            offset <= consumed + len
        } else {
            offset < consumed + len
        };
        if hit {
            return BoundaryPoint::new(text, offset.saturating_sub(consumed));
        }
        consumed += len;
        last = Some((text, len));
    }
    match last {
        Some((text, len)) => BoundaryPoint::new(text, len),
        None => BoundaryPoint::new(container, doc.children(container).len()),
    }
}

/// Turn a boundary into a child index of `ancestor`, splitting text nodes and
/// partially covered elements on the way up
fn split_boundary(
    doc: &mut Document,
    point: BoundaryPoint,
    ancestor: NodeId,
) -> Result<usize, DomError> {
    let (mut container, mut idx) = if doc.node(point.node)?.is_text() {
        let parent = doc
            .parent(point.node)
            .ok_or(DomError::NotAttached(point.node))?;
        let pos = doc
            .index_in_parent(point.node)
            .ok_or(DomError::NotAttached(point.node))?;
        let len = doc.length(point.node)?;
        if point.offset == 0 {
            (parent, pos)
        } else if point.offset >= len {
            (parent, pos + 1)
        } else {
            doc.split_text(point.node, point.offset)?;
            (parent, pos + 1)
        }
    } else {
        (point.node, point.offset)
    };

    while container != ancestor {
        let parent = doc.parent(container).ok_or(DomError::NotAttached(container))?;
        let pos = doc
            .index_in_parent(container)
            .ok_or(DomError::NotAttached(container))?;
        let len = doc.children(container).len();
        if idx == 0 {
            idx = pos;
        } else if idx >= len {
            idx = pos + 1;
        } else {
            doc.split_element(container, idx)?;
            idx = pos + 1;
        }
        container = parent;
    }
    Ok(idx)
}

fn collect_range_text(
    doc: &Document,
    node: NodeId,
    range: &Range,
    inside: &mut bool,
    out: &mut String,
) {
    let Some(n) = doc.get_node(node) else {
        return;
    };
    if let Some(text) = n.text() {
        let chars: Vec<char> = text.chars().collect();
        let from = if node == range.start.node {
            *inside = true;
            range.start.offset.min(chars.len())
        } else {
            0
        };
        let to = if node == range.end.node {
            range.end.offset.min(chars.len())
        } else {
            chars.len()
        };
        if *inside && from < to {
            out.extend(&chars[from..to]);
        }
        if node == range.end.node {
            *inside = false;
        }
        return;
    }

    for (i, child) in n.children.iter().enumerate() {
        if node == range.start.node && i == range.start.offset {
            *inside = true;
        }
        if node == range.end.node && i == range.end.offset {
            *inside = false;
        }
        collect_range_text(doc, *child, range, inside, out);
    }
    if node == range.start.node && range.start.offset >= n.children.len() {
        *inside = true;
    }
    if node == range.end.node && range.end.offset >= n.children.len() {
        *inside = false;
    }
}
