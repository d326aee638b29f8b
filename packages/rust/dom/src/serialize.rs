//! HTML serialization for the arena tree.

use crate::{Document, NodeData};
use tocsmith_shared::NodeId;

/// Elements with no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Escape a text node for markup output.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape an attribute value for double-quoted markup output.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(crate) fn to_html(doc: &Document) -> String {
    let mut out = String::new();
    for &child in doc.children(doc.root()) {
        write_node(doc, child, &mut out, false);
    }
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String, raw: bool) {
    match doc.data(id) {
        NodeData::Root => {
            for &child in doc.children(id) {
                write_node(doc, child, out, raw);
            }
        }
        NodeData::Doctype(name) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Element { name, attrs } => {
            out.push('<');
            out.push_str(name);
            for (k, v) in attrs {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&escape_attr(v));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&name.as_str()) {
                return;
            }
            let raw_children = RAW_TEXT_ELEMENTS.contains(&name.as_str());
            for &child in doc.children(id) {
                write_node(doc, child, out, raw_children);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Text(t) => {
            if raw {
                out.push_str(t);
            } else {
                out.push_str(&escape_text(t));
            }
        }
        NodeData::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
    }
}
