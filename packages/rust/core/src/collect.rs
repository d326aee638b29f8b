//! Heading collection over the document tree.
//!
//! Walks the document in order and turns every `h1`..`h6` element into a
//! [`HeadingRecord`]. Anchors are resolved here, for every heading
//! regardless of the configured outline depth, so excluded headings still
//! end up linkable; depth filtering belongs to the builder.

use tracing::{debug, instrument};

use tocsmith_dom::Document;
use tocsmith_shared::{HeadingRecord, IdAssignment};

use crate::slug::Slugger;

/// Collector output: the ordered heading sequence plus the anchors that were
/// freshly generated and still need writing back to the tree.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    /// All headings, in document order.
    pub headings: Vec<HeadingRecord>,
    /// Back-writes for headings that lacked an `id` attribute.
    pub assignments: Vec<IdAssignment>,
}

/// Extract every heading from the document, resolving anchors as we go.
#[instrument(skip_all)]
pub fn collect_headings(doc: &Document) -> Collected {
    let mut slugger = Slugger::new();
    let mut out = Collected::default();

    for id in doc.descendants() {
        let Some(depth) = doc.element_name(id).and_then(heading_depth) else {
            continue;
        };

        let text = normalize_text(&doc.text_content(id));
        let existing = doc.attr(id, "id");
        let identifier = slugger.resolve(existing, &text);

        if existing.is_none() {
            out.assignments.push(IdAssignment {
                node: id,
                identifier: identifier.clone(),
            });
        }
        out.headings.push(HeadingRecord {
            depth,
            identifier,
            text,
        });
    }

    debug!(
        headings = out.headings.len(),
        generated = out.assignments.len(),
        "headings collected"
    );
    out
}

/// Depth for a heading tag name, `None` for every other element.
fn heading_depth(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Trim and collapse inner whitespace to single spaces.
fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
