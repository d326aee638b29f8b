//! Outline serialization to list markup.

use tocsmith_dom::{escape_attr, escape_text};
use tocsmith_shared::{ListKind, OutlineList, OutlineNode};

/// Render the outline as nested `<ul>`/`<ol>` markup.
///
/// An empty outline renders as an empty string so the caller can treat it
/// as "no outline to insert".
pub fn render_list(outline: &OutlineList) -> String {
    if outline.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    write_list(outline, &mut out);
    out
}

fn write_list(list: &OutlineList, out: &mut String) {
    let tag = match list.kind {
        ListKind::Unordered => "ul",
        ListKind::Ordered => "ol",
    };
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for item in &list.items {
        write_item(item, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_item(item: &OutlineNode, out: &mut String) {
    out.push_str("<li><a href=\"#");
    out.push_str(&escape_attr(&item.identifier));
    out.push_str("\">");
    out.push_str(&escape_text(&item.text));
    out.push_str("</a>");
    if let Some(children) = &item.children {
        write_list(children, out);
    }
    out.push_str("</li>");
}
