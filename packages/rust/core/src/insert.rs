//! Outline placement: marker location and splicing.
//!
//! The host document may carry a comment marker (`<!-- toc -->`, matched
//! trimmed and case-insensitively). The first marker in document order wins;
//! later ones are left untouched. Without a marker the outline goes to the
//! very start of the document.

use tracing::debug;

use tocsmith_dom::Document;
use tocsmith_shared::NodeId;

/// Marker text, compared trimmed and case-insensitively.
const MARKER: &str = "toc";

/// Where the outline will land in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Replace this bare marker comment node in place.
    Marker(NodeId),
    /// Replace this container element whose only content is the marker.
    Container(NodeId),
    /// No marker anywhere; prepend at the start of the document.
    Prepend,
}

/// Locate the insertion point for the outline.
pub fn find_placement(doc: &Document) -> Placement {
    for id in doc.descendants() {
        let Some(comment) = doc.comment_text(id) else {
            continue;
        };
        if !comment.trim().eq_ignore_ascii_case(MARKER) {
            continue;
        }

        if let Some(parent) = doc.parent(id) {
            // Structural elements are never replaced wholesale, even when
            // the marker is their only content.
            let replaceable = doc
                .element_name(parent)
                .is_some_and(|name| !matches!(name, "html" | "head" | "body"));
            if replaceable && sole_content(doc, parent, id) {
                return Placement::Container(parent);
            }
        }
        return Placement::Marker(id);
    }
    Placement::Prepend
}

/// True when `parent`'s children are only `marker` plus whitespace-only
/// text nodes.
fn sole_content(doc: &Document, parent: NodeId, marker: NodeId) -> bool {
    doc.children(parent).iter().all(|&child| {
        child == marker || doc.text(child).is_some_and(|t| t.trim().is_empty())
    })
}

/// Splice detached `nodes` into the document at `placement`.
///
/// An empty `nodes` slice replaces the marker (or its container) with
/// nothing, removing it; the prepend fallback then degenerates to a no-op.
pub fn apply(doc: &mut Document, placement: Placement, nodes: &[NodeId]) {
    match placement {
        Placement::Marker(id) | Placement::Container(id) => {
            doc.replace_with(id, nodes);
        }
        Placement::Prepend => {
            let at = doc.body().unwrap_or_else(|| doc.root());
            doc.prepend(at, nodes);
        }
    }
    debug!(nodes = nodes.len(), ?placement, "outline spliced");
}
