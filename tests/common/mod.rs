//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use inline_link::config::ToolConfig;
use inline_link::dom::{Document, ElementData, NodeId, Range};
use inline_link::model::LinkModel;

/// A document holding one `<p>` with plain text
pub fn paragraph(text: &str) -> (Document, NodeId) {
    let mut doc = Document::new();
    let p = doc.create_element(ElementData::new("p"));
    let text = doc.create_text_node(text);
    doc.append_child(doc.root(), p).unwrap();
    doc.append_child(p, text).unwrap();
    (doc, p)
}

/// A `<p>` of `before`, an anchor around `linked` with `attrs`, then `after`
pub fn linked_paragraph(
    before: &str,
    linked: &str,
    after: &str,
    attrs: &[(&str, &str)],
) -> (Document, NodeId) {
    let mut doc = Document::new();
    let p = doc.create_element(ElementData::new("p"));
    doc.append_child(doc.root(), p).unwrap();

    let before = doc.create_text_node(before);
    let anchor = doc.create_element(ElementData::with_attrs("a", attrs.iter().copied()));
    let linked = doc.create_text_node(linked);
    let after = doc.create_text_node(after);
    doc.append_child(anchor, linked).unwrap();
    doc.append_children(p, &[before, anchor, after]).unwrap();
    (doc, p)
}

/// Default-configured model over a plain paragraph
pub fn test_model(text: &str) -> (LinkModel, NodeId) {
    test_model_with_config(text, ToolConfig::default())
}

pub fn test_model_with_config(text: &str, config: ToolConfig) -> (LinkModel, NodeId) {
    let (doc, p) = paragraph(text);
    (LinkModel::new(doc, config), p)
}

/// Model over "see a.com now" with the middle word linked
pub fn test_model_with_link(attrs: &[(&str, &str)]) -> (LinkModel, NodeId) {
    let (doc, p) = linked_paragraph("see ", "a.com", " now", attrs);
    (LinkModel::new(doc, ToolConfig::default()), p)
}

/// Range over characters `start..end` of `container`'s text
pub fn select(model: &LinkModel, container: NodeId, start: usize, end: usize) -> Range {
    Range::from_text_offsets(&model.document, container, start, end).unwrap()
}

/// Number of anchor elements in the document markup
pub fn anchor_count(model: &LinkModel) -> usize {
    model.html().matches("<a ").count()
}

/// Plain text of the whole document
pub fn text(model: &LinkModel) -> String {
    model.document.text_content(model.document.root())
}
