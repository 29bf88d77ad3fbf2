//! Node types stored in the document arena

use super::NodeId;

/// An element's tag name and attributes (kept in insertion order)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    pub fn with_attrs<K, V>(tag: impl Into<String>, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = Self::new(tag);
        for (name, value) in attrs {
            data.set_attr(name, value);
        }
        data
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing the value in place if it already exists
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self
            .attrs
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.attrs.remove(idx).1)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root; never has a parent
    Root,
    Element(ElementData),
    Text(String),
}

/// A node in the document arena
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
    /// The node this one was split off from, if it was created by a split
    pub split_from: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, data: NodeData) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            data,
            split_from: None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn element_data(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn element_data_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// True if this is an element with the given tag (case-insensitive)
    pub fn is_tag(&self, tag: &str) -> bool {
        self.element_data().map(|el| el.is_tag(tag)).unwrap_or(false)
    }

    /// DOM "length": char count for text nodes, child count otherwise
    pub fn length(&self) -> usize {
        match &self.data {
            NodeData::Text(text) => text.chars().count(),
            _ => self.children.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut el = ElementData::with_attrs("A", [("href", "https://a.com"), ("target", "_blank")]);
        el.set_attr("HREF", "https://b.com");
        assert_eq!(el.tag, "a");
        assert_eq!(
            el.attrs,
            vec![
                ("href".to_string(), "https://b.com".to_string()),
                ("target".to_string(), "_blank".to_string()),
            ]
        );
    }

    #[test]
    fn test_has_class_matches_whole_tokens() {
        let el = ElementData::with_attrs("a", [("class", "cdx-link  other")]);
        assert!(el.has_class("cdx-link"));
        assert!(el.has_class("other"));
        assert!(!el.has_class("cdx"));
    }

    #[test]
    fn test_text_length_counts_chars() {
        let node = Node::new(1, NodeData::Text("héllo".to_string()));
        assert_eq!(node.length(), 5);
    }
}
