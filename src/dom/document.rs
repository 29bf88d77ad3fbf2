//! Document arena: node creation, tree mutation, text and HTML export

use serde::Serialize;

use super::node::{ElementData, Node, NodeData};
use super::{DomError, NodeId};

/// Serializable snapshot of a subtree (used for JSON export)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExportNode {
    Root {
        children: Vec<ExportNode>,
    },
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<ExportNode>,
    },
    Text {
        text: String,
    },
}

/// Old-to-new id translation produced by [`Document::compact`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMap {
    ids: Vec<Option<NodeId>>,
}

impl NodeMap {
    /// New id of a surviving node; `None` if it was dropped
    pub fn get(&self, old: NodeId) -> Option<NodeId> {
        self.ids.get(old).copied().flatten()
    }
}

/// The host document: an arena of nodes hanging off a single root
///
/// Removed nodes stay in the arena (ids are not reused until
/// [`Document::compact`] runs) but are detached, so handles to them can be
/// checked with [`Document::is_attached`].
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(0, NodeData::Root)],
            root: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(id).ok_or(DomError::UnknownNode(id))
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of a node (empty for unknown ids)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn length(&self, id: NodeId) -> Result<usize, DomError> {
        Ok(self.node(id)?.length())
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    fn create_node(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, data));
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.create_node(NodeData::Element(data))
    }

    /// Create a detached text node
    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.create_node(NodeData::Text(text.to_string()))
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        self.node(id)?
            .element_data()
            .ok_or(DomError::NotAnElement(id))
    }

    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        self.node_mut(id)?
            .element_data_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok().and_then(|el| el.attr(name))
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tree queries
    // ------------------------------------------------------------------

    /// Iterate from `id` up to the topmost ancestor, starting with `id` itself
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(id).map(|n| n.id), move |current| {
            self.parent(*current)
        })
    }

    /// True if the node is reachable from the document root
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.ancestors(id).any(|ancestor| ancestor == self.root)
    }

    /// Inclusive containment: a node contains itself
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|child| *child == id)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.index_in_parent(id)?.checked_sub(1)?;
        self.children(self.parent(id)?).get(idx).copied()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.index_in_parent(id)?;
        self.children(self.parent(id)?).get(idx + 1).copied()
    }

    /// Descendant text nodes in document order
    pub fn text_nodes(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_text_nodes(id, &mut out);
        out
    }

    fn collect_text_nodes(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.is_text() {
            out.push(id);
            return;
        }
        for child in &node.children {
            self.collect_text_nodes(*child, out);
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.text_nodes(id)
            .into_iter()
            .filter_map(|t| self.nodes[t].text())
            .collect()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Remove a node from its parent; a no-op for nodes that have none
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.node_mut(id)?.parent.take() else {
            return Ok(());
        };
        self.nodes[parent].children.retain(|child| *child != id);
        Ok(())
    }

    /// Remove a node (and its subtree) from the document
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), DomError> {
        if id == self.root {
            return Err(DomError::HierarchyRequest(id));
        }
        self.detach(id)
    }

    /// Insert nodes as children of `parent`, starting at child index `index`
    ///
    /// Nodes that already have a parent are moved.
    pub fn insert_children_at(
        &mut self,
        parent: NodeId,
        mut index: usize,
        ids: &[NodeId],
    ) -> Result<(), DomError> {
        if self.node(parent)?.is_text() {
            return Err(DomError::NotAnElement(parent));
        }
        if index > self.nodes[parent].children.len() {
            return Err(DomError::InvalidBoundary {
                node: parent,
                offset: index,
            });
        }

        for &id in ids {
            if id == self.root || self.contains(id, parent) {
                return Err(DomError::HierarchyRequest(id));
            }
            if self.parent(id) == Some(parent) {
                if let Some(current) = self.index_in_parent(id) {
                    if current < index {
                        index -= 1;
                    }
                }
            }
            self.detach(id)?;
            self.nodes[parent].children.insert(index, id);
            self.nodes[id].parent = Some(parent);
            index += 1;
        }
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let len = self.node(parent)?.children.len();
        self.insert_children_at(parent, len, &[child])
    }

    pub fn append_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), DomError> {
        let len = self.node(parent)?.children.len();
        self.insert_children_at(parent, len, children)
    }

    /// Split a text node at a char offset
    ///
    /// The original node keeps the head; a new node holding the tail is
    /// inserted right after it (when the node has a parent) and returned.
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> Result<NodeId, DomError> {
        let text = self.node_mut(id)?.text_mut().ok_or(DomError::NotText(id))?;
        let char_len = text.chars().count();
        if offset > char_len {
            return Err(DomError::InvalidBoundary { node: id, offset });
        }
        let byte_idx = text
            .char_indices()
            .nth(offset)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let tail = text.split_off(byte_idx);

        let new_id = self.create_text_node(&tail);
        self.nodes[new_id].split_from = Some(id);
        if let (Some(parent), Some(idx)) = (self.parent(id), self.index_in_parent(id)) {
            self.insert_children_at(parent, idx + 1, &[new_id])?;
        }
        Ok(new_id)
    }

    /// Split an element's children at `index`
    ///
    /// The element keeps the children before `index`; a copy of it (same tag
    /// and attributes) holding the rest is inserted right after it (when the
    /// element has a parent) and returned.
    pub fn split_element(&mut self, id: NodeId, index: usize) -> Result<NodeId, DomError> {
        let data = self.element(id)?.clone();
        let len = self.nodes[id].children.len();
        if index > len {
            return Err(DomError::InvalidBoundary {
                node: id,
                offset: index,
            });
        }
        let moved = self.nodes[id].children[index..].to_vec();

        let new_id = self.create_element(data);
        self.nodes[new_id].split_from = Some(id);
        self.append_children(new_id, &moved)?;
        if let (Some(parent), Some(idx)) = (self.parent(id), self.index_in_parent(id)) {
            self.insert_children_at(parent, idx + 1, &[new_id])?;
        }
        Ok(new_id)
    }

    /// Fold `right` back into `left` when it was split off `left`
    ///
    /// The two must be adjacent siblings, and elements must still carry the
    /// same tag and attributes. Merging then continues at the junction of
    /// their children, so a split that went several levels deep is undone in
    /// one call. `left` keeps its id; `right` is detached. Returns whether
    /// anything was merged.
    pub fn rejoin(&mut self, left: NodeId, right: NodeId) -> Result<bool, DomError> {
        let (head, tail) = (self.node(left)?, self.node(right)?);
        if tail.split_from != Some(left) || self.next_sibling(left) != Some(right) {
            return Ok(false);
        }
        let tail_text = match (&head.data, &tail.data) {
            (NodeData::Text(_), NodeData::Text(text)) => Some(text.clone()),
            (NodeData::Element(a), NodeData::Element(b)) if a == b => None,
            _ => return Ok(false),
        };

        match tail_text {
            Some(text) => {
                if let Some(head) = self.node_mut(left)?.text_mut() {
                    head.push_str(&text);
                }
            }
            None => {
                let junction = self.children(left).last().copied();
                let moved = self.children(right).to_vec();
                self.append_children(left, &moved)?;
                if let (Some(inner_left), Some(&inner_right)) = (junction, moved.first()) {
                    self.rejoin(inner_left, inner_right)?;
                }
            }
        }
        self.detach(right)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Compaction
    // ------------------------------------------------------------------

    /// Number of slots in the arena, detached nodes included
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every node not reachable from the root and renumber the rest
    ///
    /// Ids are otherwise never reused, so splits and removals accumulate dead
    /// slots over a long session. Every `NodeId` held outside the document is
    /// invalidated; translate the ones that survive through the returned map.
    pub fn compact(&mut self) -> NodeMap {
        let mut order = Vec::new();
        self.collect_subtree(self.root, &mut order);

        let mut ids = vec![None; self.nodes.len()];
        for (new_id, old_id) in order.iter().enumerate() {
            ids[*old_id] = Some(new_id);
        }
        let map = NodeMap { ids };

        let mut old_nodes: Vec<Option<Node>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        for (new_id, old_id) in order.iter().enumerate() {
            if let Some(mut node) = old_nodes[*old_id].take() {
                node.id = new_id;
                node.parent = node.parent.and_then(|id| map.get(id));
                node.children = node.children.iter().filter_map(|id| map.get(*id)).collect();
                node.split_from = node.split_from.and_then(|id| map.get(id));
                self.nodes.push(node);
            }
        }
        self.root = map.get(self.root).unwrap_or(0);
        map
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for child in self.children(id) {
            self.collect_subtree(*child, out);
        }
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Serialized markup of a node's children
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_html(*child, &mut out);
        }
        out
    }

    /// Serialized markup of a node including its own tag
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Root => {
                for child in &node.children {
                    self.write_html(*child, out);
                }
            }
            NodeData::Text(text) => escape_into(text, false, out),
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                out.push('>');
                for child in &node.children {
                    self.write_html(*child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }

    /// Structured snapshot of a subtree for JSON export
    pub fn export(&self, id: NodeId) -> Option<ExportNode> {
        let node = self.nodes.get(id)?;
        let children = || {
            node.children
                .iter()
                .filter_map(|child| self.export(*child))
                .collect()
        };
        Some(match &node.data {
            NodeData::Root => ExportNode::Root {
                children: children(),
            },
            NodeData::Element(el) => ExportNode::Element {
                tag: el.tag.clone(),
                attrs: el.attrs.clone(),
                children: children(),
            },
            NodeData::Text(text) => ExportNode::Text { text: text.clone() },
        })
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
