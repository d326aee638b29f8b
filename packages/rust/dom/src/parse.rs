//! Conversion from scraper's tree into the arena.
//!
//! scraper wraps fragments in a synthetic `<html>` element; the fragment
//! entry point unwraps it so callers see only their own markup.

use ego_tree::NodeRef;
use scraper::{Html, Node as ScraperNode};
use tracing::debug;

use crate::{Document, NodeData};
use tocsmith_shared::NodeId;

/// Parse `html` as a fragment and import its top-level nodes into `doc`,
/// detached. Returns the imported top-level ids in document order.
pub(crate) fn fragment_nodes(doc: &mut Document, html: &str) -> Vec<NodeId> {
    let parsed = Html::parse_fragment(html);
    let mut ids = Vec::new();

    for child in parsed.tree.root().children() {
        if is_fragment_wrapper(&child) {
            for sub in child.children() {
                if let Some(id) = import(doc, sub, None) {
                    ids.push(id);
                }
            }
        } else if let Some(id) = import(doc, child, None) {
            ids.push(id);
        }
    }

    debug!(top_level = ids.len(), "fragment parsed");
    ids
}

/// Parse `html` as a full document and attach its nodes under `doc`'s root.
pub(crate) fn document_nodes(doc: &mut Document, html: &str) {
    let parsed = Html::parse_document(html);
    let root = doc.root();
    for child in parsed.tree.root().children() {
        import(doc, child, Some(root));
    }
    debug!("document parsed");
}

/// The synthetic `<html>` element scraper puts around fragment content.
fn is_fragment_wrapper(node: &NodeRef<'_, ScraperNode>) -> bool {
    matches!(node.value(), ScraperNode::Element(el) if el.name() == "html")
}

fn import(
    doc: &mut Document,
    node: NodeRef<'_, ScraperNode>,
    parent: Option<NodeId>,
) -> Option<NodeId> {
    let data = match node.value() {
        ScraperNode::Element(el) => NodeData::Element {
            name: el.name().to_string(),
            attrs: el
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        },
        ScraperNode::Text(t) => NodeData::Text(t.text.to_string()),
        ScraperNode::Comment(c) => NodeData::Comment(c.comment.to_string()),
        ScraperNode::Doctype(d) => NodeData::Doctype(d.name().to_string()),
        // Document/Fragment markers and processing instructions carry no
        // content of their own.
        _ => return None,
    };

    let id = doc.alloc(data, parent);
    for child in node.children() {
        import(doc, child, Some(id));
    }
    Some(id)
}
