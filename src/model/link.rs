//! Link annotations: staged attributes and handles to existing anchors

use crate::dom::{Document, NodeId, Selection, PARENT_TAG_SEARCH_DEPTH};

/// Tag of the annotation element
pub const ANNOTATION_TAG: &str = "a";

/// Style marker class set on every anchor the tool creates
pub const ANNOTATION_CLASS: &str = "cdx-link";

/// Attribute values staged from the action menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttributes {
    pub href: String,
    pub target: String,
    pub rel: String,
}

impl LinkAttributes {
    pub fn new(href: impl Into<String>, target: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            target: target.into(),
            rel: rel.into(),
        }
    }
}

/// Reference to an anchor element already present in the document
///
/// Only valid inside the handler that found it: once the element is removed
/// the handle dangles, so callers re-run [`AnnotationHandle::find`] instead of
/// keeping one around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationHandle(NodeId);

impl AnnotationHandle {
    /// Anchor enclosing the current selection, if any
    pub fn find(doc: &Document, selection: &Selection) -> Option<Self> {
        selection
            .find_parent_tag(doc, ANNOTATION_TAG, None, PARENT_TAG_SEARCH_DEPTH)
            .map(Self)
    }

    pub(crate) fn from_node(node: NodeId) -> Self {
        Self(node)
    }

    pub fn node(&self) -> NodeId {
        self.0
    }

    pub fn is_attached(&self, doc: &Document) -> bool {
        doc.is_attached(self.0)
    }

    /// The anchor's link attributes; missing ones read as `None`
    pub fn attributes(&self, doc: &Document) -> ExistingLink {
        let attr = |name: &str| doc.attribute(self.0, name).map(str::to_owned);
        ExistingLink {
            href: attr("href").unwrap_or_default(),
            target: attr("target"),
            rel: attr("rel"),
        }
    }
}

/// Attributes read from an existing anchor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingLink {
    pub href: String,
    pub target: Option<String>,
    pub rel: Option<String>,
}
