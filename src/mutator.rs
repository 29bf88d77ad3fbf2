//! Apply and remove link annotations around a range
//!
//! Both operations change markup only: the text content of the document is
//! the same before and after. Each one validates its input before touching
//! the tree, so a failed call leaves the document unchanged.

use tracing::debug;

use crate::dom::{Document, DomError, ElementData, NodeId, Range, Selection};
use crate::model::{AnnotationHandle, LinkAttributes, ANNOTATION_CLASS, ANNOTATION_TAG};

/// Wrap the content of `range` in a new anchor
///
/// The range must not already sit inside an anchor; the tool unwraps any
/// enclosing link before calling this. Anchors inside the range are replaced
/// by their content, so links never nest. The anchor always carries `href`,
/// `target` and `rel`, empty values included. On success the selection spans
/// the new anchor's content.
pub fn wrap(
    doc: &mut Document,
    selection: &mut Selection,
    range: &Range,
    attrs: &LinkAttributes,
) -> Result<AnnotationHandle, DomError> {
    range.validate(doc)?;

    let mut range = *range;
    let fragment = range.extract_contents(doc)?;
    let fragment = flatten_anchors(doc, &fragment)?;

    let anchor = doc.create_element(anchor_data(attrs));
    doc.append_children(anchor, &fragment)?;
    range.insert_nodes(doc, &[anchor])?;
    selection.expand_to_tag(doc, anchor)?;

    debug!(
        target: "mutator",
        anchor,
        href = %attrs.href,
        nodes = fragment.len(),
        "wrapped range"
    );
    Ok(AnnotationHandle::from_node(anchor))
}

/// Replace anchors among `nodes` (and below them) with their children
fn flatten_anchors(doc: &mut Document, nodes: &[NodeId]) -> Result<Vec<NodeId>, DomError> {
    let mut out = Vec::with_capacity(nodes.len());
    for &node in nodes {
        let children = doc.children(node).to_vec();
        let flattened = flatten_anchors(doc, &children)?;

        if doc.node(node)?.is_tag(ANNOTATION_TAG) {
            debug!(target: "mutator", anchor = node, "dropping nested anchor");
            out.extend(flattened);
            continue;
        }
        if flattened != children {
            for child in &children {
                doc.detach(*child)?;
            }
            doc.append_children(node, &flattened)?;
        }
        out.push(node);
    }
    Ok(out)
}

fn anchor_data(attrs: &LinkAttributes) -> ElementData {
    ElementData::with_attrs(
        ANNOTATION_TAG,
        [
            ("href", attrs.href.as_str()),
            ("target", attrs.target.as_str()),
            ("rel", attrs.rel.as_str()),
            ("class", ANNOTATION_CLASS),
        ],
    )
}

/// Replace an anchor with its own content
///
/// Text nodes and inline elements that wrapping split at the anchor's edges
/// are joined back together; siblings that were never split are left as they
/// are. The selection is restored over the content that used to be linked.
pub fn unwrap(
    doc: &mut Document,
    selection: &mut Selection,
    handle: AnnotationHandle,
) -> Result<(), DomError> {
    let anchor = handle.node();
    if !handle.is_attached(doc) {
        return Err(DomError::NotAttached(anchor));
    }
    let parent = doc.parent(anchor).ok_or(DomError::NotAttached(anchor))?;
    let idx = doc
        .index_in_parent(anchor)
        .ok_or(DomError::NotAttached(anchor))?;
    let before = doc.previous_sibling(anchor);
    let after = doc.next_sibling(anchor);

    selection.expand_to_tag(doc, anchor)?;
    let mut range = Range::select_node_contents(doc, anchor)?;
    let fragment = range.extract_contents(doc)?;

    let text_before = char_len(doc, &doc.children(parent)[..idx]);
    let text_len = char_len(doc, &fragment);

    doc.remove_node(anchor)?;
    doc.insert_children_at(parent, idx, &fragment)?;

    let mut rejoined = 0;
    if let (Some(left), Some(&first)) = (before, fragment.first()) {
        rejoined += usize::from(doc.rejoin(left, first)?);
    }
    // The left edge may have merged away, so look up the right edge afresh
    if let Some(right) = after {
        if let Some(left) = doc.previous_sibling(right) {
            rejoined += usize::from(doc.rejoin(left, right)?);
        }
    }

    selection.set_range(Range::from_text_offsets(
        doc,
        parent,
        text_before,
        text_before + text_len,
    )?);

    debug!(
        target: "mutator",
        anchor,
        nodes = fragment.len(),
        rejoined,
        "unwrapped anchor"
    );
    Ok(())
}

fn char_len(doc: &Document, nodes: &[NodeId]) -> usize {
    nodes
        .iter()
        .map(|node| doc.text_content(*node).chars().count())
        .sum()
}
