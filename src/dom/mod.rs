//! In-memory document tree for the host editor's content
//!
//! The host editor owns the real document; this module models the subset the
//! link tool touches:
//!
//! - [`Document`]: node arena with parent/children links and HTML export
//! - [`Range`]: a start/end pair of [`BoundaryPoint`]s with DOM-style
//!   extract and insert operations
//! - [`Selection`]: the active range plus the host's selection helpers
//!   (ancestor tag search, expand-to-tag, save/restore)

mod document;
mod node;
mod range;
mod selection;

pub use document::{Document, ExportNode, NodeMap};
pub use node::{ElementData, Node, NodeData};
pub use range::{BoundaryPoint, Range};
pub use selection::{Selection, PARENT_TAG_SEARCH_DEPTH};

/// Index of a node in the document arena
pub type NodeId = usize;

/// Errors raised by document operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The id does not name a node in the arena
    UnknownNode(NodeId),
    /// The node is no longer reachable from the document root
    NotAttached(NodeId),
    /// An element operation was attempted on a text or root node
    NotAnElement(NodeId),
    /// A text operation was attempted on a non-text node
    NotText(NodeId),
    /// A boundary offset lies past the end of its container
    InvalidBoundary { node: NodeId, offset: usize },
    /// Inserting the node would make it its own ancestor
    HierarchyRequest(NodeId),
}

impl std::fmt::Display for DomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown node #{}", id),
            Self::NotAttached(id) => write!(f, "node #{} is not attached to the document", id),
            Self::NotAnElement(id) => write!(f, "node #{} is not an element", id),
            Self::NotText(id) => write!(f, "node #{} is not a text node", id),
            Self::InvalidBoundary { node, offset } => {
                write!(f, "offset {} is out of bounds for node #{}", offset, node)
            }
            Self::HierarchyRequest(id) => {
                write!(f, "node #{} cannot be inserted into its own subtree", id)
            }
        }
    }
}

impl std::error::Error for DomError {}
