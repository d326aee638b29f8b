//! Core domain types for tocsmith outlines.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Index of a node in a document arena (see `tocsmith-dom`).
///
/// Ids are only meaningful for the `Document` that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

// ---------------------------------------------------------------------------
// HeadingRecord
// ---------------------------------------------------------------------------

/// One collected heading, in document order.
///
/// Immutable once produced by the collector. Document order is significant;
/// depths are not assumed monotonic or gap-free.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingRecord {
    /// Heading level, `1` for `h1` through `6` for `h6`.
    pub depth: u8,
    /// Resolved anchor, unique within the document.
    pub identifier: String,
    /// Rendered heading text (trimmed, inner whitespace collapsed).
    pub text: String,
}

/// A freshly generated anchor that still needs writing back to its heading
/// element, so the heading and the outline link stay consistent.
///
/// The collector reports these instead of mutating the tree itself; the
/// pipeline decides when to apply them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAssignment {
    /// The heading element that lacked an `id` attribute.
    pub node: NodeId,
    /// The generated anchor value.
    pub identifier: String,
}

// ---------------------------------------------------------------------------
// Outline
// ---------------------------------------------------------------------------

/// Rendering kind for every list in one outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// `<ul>` rendering.
    Unordered,
    /// `<ol>` rendering.
    Ordered,
}

/// A list item wrapping a link to one heading, plus at most one nested list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Anchor the rendered link points at (`#identifier`).
    pub identifier: String,
    /// Link text.
    pub text: String,
    /// Nested child list, present when deeper headings follow this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<OutlineList>,
}

/// Root or nested outline container; ordered in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineList {
    /// Rendering kind, fixed for the whole outline by configuration.
    pub kind: ListKind,
    /// Items in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OutlineNode>,
}

impl OutlineList {
    /// Create an empty list of the given kind.
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// True when the outline has no items (caller treats as "no outline").
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_serialization() {
        let outline = OutlineList {
            kind: ListKind::Unordered,
            items: vec![OutlineNode {
                identifier: "getting-started".into(),
                text: "Getting Started".into(),
                children: Some(OutlineList {
                    kind: ListKind::Unordered,
                    items: vec![OutlineNode {
                        identifier: "installation".into(),
                        text: "Installation".into(),
                        children: None,
                    }],
                }),
            }],
        };

        let json = serde_json::to_string(&outline).expect("serialize");
        // Leaf nodes skip their absent child list entirely.
        assert!(!json.contains("\"children\":null"));
        let parsed: OutlineList = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, outline);
    }

    #[test]
    fn list_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ListKind::Ordered).expect("serialize");
        assert_eq!(json, "\"ordered\"");
    }

    #[test]
    fn empty_outline_is_empty() {
        assert!(OutlineList::new(ListKind::Unordered).is_empty());
    }
}
