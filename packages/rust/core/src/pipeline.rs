//! End-to-end outline insertion: parse → collect → build → render → splice.

use tracing::{debug, instrument};

use tocsmith_dom::Document;
use tocsmith_shared::{OutlineList, Result, TocConfig};

use crate::builder::build_outline;
use crate::collect::collect_headings;
use crate::insert::{self, Placement, find_placement};
use crate::render::render_list;

/// Insert a table of contents into an HTML fragment.
///
/// Parses `html` (post-render content markup, without `<html>`/`<body>`),
/// anchors its headings, builds the outline, and splices the rendered
/// markup at the `<!-- toc -->` marker, or at the start of the fragment
/// when no marker exists. Returns the transformed markup.
#[instrument(skip_all, fields(len = html.len()))]
pub fn insert_toc(html: &str, config: &TocConfig) -> Result<String> {
    let mut doc = Document::parse_fragment(html);
    insert_toc_into(&mut doc, config)?;
    Ok(doc.to_html())
}

/// Insert a table of contents into a caller-owned document tree.
///
/// Returns the built outline so callers can also serialize it, or `None`
/// when the document has no eligible headings. In the `None` case nothing
/// is inserted, but a present marker is still consumed (replaced with
/// nothing).
#[instrument(skip_all)]
pub fn insert_toc_into(doc: &mut Document, config: &TocConfig) -> Result<Option<OutlineList>> {
    // Step 1: collect headings and resolve anchors.
    let collected = collect_headings(doc);

    // Step 2: build the nested outline.
    let outline = build_outline(&collected.headings, config.max_depth, config.list_kind())?;

    // Step 3: write generated anchors onto the headings themselves so the
    // outline links resolve.
    for assignment in &collected.assignments {
        doc.set_attr(assignment.node, "id", &assignment.identifier);
    }

    // Step 4: locate the insertion point before any new nodes exist.
    let placement = find_placement(doc);

    if outline.is_empty() {
        if placement != Placement::Prepend {
            insert::apply(doc, placement, &[]);
        }
        debug!("no eligible headings, nothing inserted");
        return Ok(None);
    }

    // Step 5: render, apply the template once, and splice.
    let markup = (config.template)(&render_list(&outline));
    let nodes = doc.parse_fragment_into(&markup);
    insert::apply(doc, placement, &nodes);

    debug!(items = outline.items.len(), "outline inserted");
    Ok(Some(outline))
}
