//! Outline construction: the depth-gap stack machine.
//!
//! Consumes the ordered heading sequence and produces the nested outline.
//! Depths may jump by more than one in either direction: a deeper jump opens
//! exactly one nesting level regardless of the gap, and a shallower jump
//! closes one level per depth step, stopping at the root. The stack is an
//! explicit `Vec` so the transition and underflow logic stays auditable in
//! isolation from tree-traversal concerns.

use tracing::{debug, instrument};

use tocsmith_shared::{HeadingRecord, ListKind, OutlineList, OutlineNode, Result, TocError};

/// One open nesting level: the list collecting siblings at `depth`.
struct Frame {
    depth: u8,
    list: OutlineList,
}

impl Frame {
    fn new(depth: u8, kind: ListKind) -> Self {
        Self {
            depth,
            list: OutlineList::new(kind),
        }
    }
}

/// Build the nested outline for `headings`, skipping records deeper than
/// `max_depth`.
///
/// The root list opens at the depth of the first eligible heading; an empty
/// eligible set yields an empty (but valid) list. The only failure is
/// [`TocError::InvariantViolation`], raised when a record's depth lies
/// outside `1..=6` or the machine's internal stack invariant breaks.
#[instrument(skip_all, fields(headings = headings.len(), max_depth))]
pub fn build_outline(
    headings: &[HeadingRecord],
    max_depth: u8,
    kind: ListKind,
) -> Result<OutlineList> {
    let mut frames: Vec<Frame> = Vec::new();

    for heading in headings {
        if !(1..=6).contains(&heading.depth) {
            return Err(TocError::invariant(format!(
                "heading depth {} outside 1..=6 for {:?}",
                heading.depth, heading.text
            )));
        }
        if heading.depth > max_depth {
            continue;
        }

        let node = OutlineNode {
            identifier: heading.identifier.clone(),
            text: heading.text.clone(),
            children: None,
        };

        let top_depth = match frames.last() {
            Some(frame) => frame.depth,
            None => {
                // First eligible heading opens the root at its own depth.
                frames.push(Frame::new(heading.depth, kind));
                append(&mut frames, node)?;
                continue;
            }
        };

        if heading.depth == top_depth {
            append(&mut frames, node)?;
        } else if heading.depth > top_depth {
            // One nesting step regardless of the size of the gap; the new
            // list attaches to the last node of the parent frame when it
            // closes.
            frames.push(Frame::new(heading.depth, kind));
            append(&mut frames, node)?;
        } else {
            let mut pops = top_depth - heading.depth;
            while pops > 0 && frames.len() > 1 {
                close_top(&mut frames)?;
                pops -= 1;
            }
            if pops > 0 {
                // Pops exhausted at the root: instead of underflowing, the
                // root adopts this heading's level and collects its siblings
                // from here on.
                let root = frames
                    .last_mut()
                    .ok_or_else(|| TocError::invariant("no root frame on adoption"))?;
                root.depth = heading.depth;
            }
            append(&mut frames, node)?;
        }
    }

    // Close whatever is still open, deepest first.
    while frames.len() > 1 {
        close_top(&mut frames)?;
    }

    let outline = match frames.pop() {
        Some(frame) => frame.list,
        None => OutlineList::new(kind),
    };
    debug!(items = outline.items.len(), "outline built");
    Ok(outline)
}

/// Append a node into the current (top) frame.
fn append(frames: &mut Vec<Frame>, node: OutlineNode) -> Result<()> {
    let top = frames
        .last_mut()
        .ok_or_else(|| TocError::invariant("append with no open frame"))?;
    top.list.items.push(node);
    Ok(())
}

/// Close the top frame by attaching its list to the last node of its parent.
fn close_top(frames: &mut Vec<Frame>) -> Result<()> {
    let child = frames
        .pop()
        .ok_or_else(|| TocError::invariant("close with no open frame"))?;
    let parent = frames
        .last_mut()
        .ok_or_else(|| TocError::invariant("closed frame has no parent"))?;
    let owner = parent
        .list
        .items
        .last_mut()
        .ok_or_else(|| TocError::invariant("closed frame has no parent node to attach to"))?;
    owner.children = Some(child.list);
    Ok(())
}

/// Flatten an outline back to the depth sequence it renders as, with
/// top-level items at depth 1 and each nesting level one deeper.
pub fn flatten_depths(outline: &OutlineList) -> Vec<u8> {
    fn walk(list: &OutlineList, depth: u8, out: &mut Vec<u8>) {
        for item in &list.items {
            out.push(depth);
            if let Some(children) = &item.children {
                walk(children, depth + 1, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(outline, 1, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tocsmith_shared::TocError;

    fn record(depth: u8, text: &str) -> HeadingRecord {
        HeadingRecord {
            depth,
            identifier: crate::slug::slugify(text),
            text: text.to_string(),
        }
    }

    fn records(specs: &[(u8, &str)]) -> Vec<HeadingRecord> {
        specs.iter().map(|&(d, t)| record(d, t)).collect()
    }

    fn build(specs: &[(u8, &str)], max_depth: u8) -> OutlineList {
        build_outline(&records(specs), max_depth, ListKind::Unordered).expect("build")
    }

    #[test]
    fn empty_input_builds_empty_list() {
        let outline = build(&[], 3);
        assert!(outline.is_empty());
    }

    #[test]
    fn siblings_in_document_order() {
        let outline = build(&[(2, "A"), (2, "B"), (2, "C")], 3);
        let texts: Vec<&str> = outline.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["A", "B", "C"]);
        assert!(outline.items.iter().all(|i| i.children.is_none()));
    }

    #[test]
    fn deeper_heading_nests_under_previous() {
        // A contains B; C closes back to the root as A's sibling.
        let outline = build(&[(1, "A"), (2, "B"), (1, "C")], 3);

        assert_eq!(outline.items.len(), 2);
        assert_eq!(outline.items[0].text, "A");
        assert_eq!(outline.items[1].text, "C");

        let nested = outline.items[0].children.as_ref().expect("A has children");
        assert_eq!(nested.items.len(), 1);
        assert_eq!(nested.items[0].text, "B");
        assert!(outline.items[1].children.is_none());
    }

    #[test]
    fn depth_gap_opens_single_level() {
        // 1 -> 4 is one nesting step, not three.
        let outline = build(&[(1, "A"), (4, "B")], 6);
        assert_eq!(flatten_depths(&outline), [1, 2]);
    }

    #[test]
    fn round_trip_depths() {
        let outline = build(&[(1, "a"), (2, "b"), (3, "c"), (2, "d"), (1, "e")], 3);
        assert_eq!(flatten_depths(&outline), [1, 2, 3, 2, 1]);
    }

    #[test]
    fn first_heading_deeper_than_one_does_not_underflow() {
        // Root opens at depth 2; the later depth-1 heading pops without
        // underflowing and becomes a root sibling.
        let outline = build(&[(2, "X"), (1, "Y")], 3);
        let texts: Vec<&str> = outline.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["X", "Y"]);
    }

    #[test]
    fn root_adopts_shallower_level() {
        // After Y lands at the root, a depth-2 heading nests under it.
        let outline = build(&[(2, "X"), (1, "Y"), (2, "Z")], 3);

        assert_eq!(outline.items.len(), 2);
        assert_eq!(outline.items[1].text, "Y");
        let nested = outline.items[1].children.as_ref().expect("Y has children");
        assert_eq!(nested.items[0].text, "Z");
    }

    #[test]
    fn gap_close_lands_at_root() {
        // Closing from a gap-opened frame requests more pops than frames
        // exist; the machine stops at the root instead of underflowing.
        let outline = build(&[(1, "A"), (4, "B"), (2, "C")], 6);
        assert_eq!(flatten_depths(&outline), [1, 2, 1]);
        assert_eq!(outline.items[1].text, "C");
    }

    #[test]
    fn max_depth_filters_without_breaking_nesting() {
        // The h4 vanishes; the surrounding nesting is unchanged.
        let with_deep = build(&[(1, "A"), (2, "B"), (4, "deep"), (2, "C")], 3);
        let without_deep = build(&[(1, "A"), (2, "B"), (2, "C")], 3);
        assert_eq!(with_deep, without_deep);
    }

    #[test]
    fn max_depth_zero_filters_everything() {
        let outline = build(&[(1, "A"), (2, "B")], 0);
        assert!(outline.is_empty());
    }

    #[test]
    fn ordered_kind_propagates_to_nested_lists() {
        let outline =
            build_outline(&records(&[(1, "A"), (2, "B")]), 3, ListKind::Ordered).expect("build");
        assert_eq!(outline.kind, ListKind::Ordered);
        let nested = outline.items[0].children.as_ref().expect("nested");
        assert_eq!(nested.kind, ListKind::Ordered);
    }

    #[test]
    fn out_of_range_depth_is_fatal() {
        let mut bad = records(&[(1, "A")]);
        bad.push(HeadingRecord {
            depth: 0,
            identifier: "zero".into(),
            text: "Zero".into(),
        });
        let err = build_outline(&bad, 6, ListKind::Unordered).expect_err("must fail");
        assert!(matches!(err, TocError::InvariantViolation { .. }));

        let deep = vec![HeadingRecord {
            depth: 7,
            identifier: "seven".into(),
            text: "Seven".into(),
        }];
        assert!(build_outline(&deep, 6, ListKind::Unordered).is_err());
    }

    #[test]
    fn identifiers_flow_into_nodes() {
        let outline = build(&[(1, "Getting Started")], 3);
        assert_eq!(outline.items[0].identifier, "getting-started");
    }
}
