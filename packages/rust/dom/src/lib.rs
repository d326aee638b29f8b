//! Arena-backed HTML document tree.
//!
//! Parsing goes through `scraper` (html5ever), so malformed input is
//! recovered per the HTML5 spec rather than rejected. Nodes live in a flat
//! `Vec` addressed by [`NodeId`], which keeps traversal order explicit and
//! makes attribute writes and node splicing cheap.

mod parse;
mod serialize;

pub use serialize::{escape_attr, escape_text};
pub use tocsmith_shared::NodeId;

/// A single node in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Synthetic arena root; serializes as its children only.
    Root,
    /// `<!DOCTYPE …>` declaration.
    Doctype(String),
    /// An element with its attributes in source order.
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// A text node (unescaped).
    Text(String),
    /// A comment node (text between `<!--` and `-->`).
    Comment(String),
}

/// A parsed HTML document or fragment.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    pub(crate) fn new() -> Self {
        let root = Node {
            data: NodeData::Root,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Parse an HTML fragment (markup without `<html>`/`<head>`/`<body>`).
    ///
    /// This is the entry point for post-render content such as the body of a
    /// converted markdown page. Never fails; html5ever recovers from
    /// malformed input.
    pub fn parse_fragment(html: &str) -> Self {
        let mut doc = Self::new();
        let ids = parse::fragment_nodes(&mut doc, html);
        let root = doc.root;
        doc.attach_all(root, &ids);
        doc
    }

    /// Parse a full HTML document, keeping its doctype and structure.
    pub fn parse_document(html: &str) -> Self {
        let mut doc = Self::new();
        parse::document_nodes(&mut doc, html);
        doc
    }

    /// Parse markup and import its top-level nodes into this arena,
    /// detached. The returned ids are ready for [`Document::replace_with`]
    /// or [`Document::prepend`].
    pub fn parse_fragment_into(&mut self, html: &str) -> Vec<NodeId> {
        parse::fragment_nodes(self, html)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The synthetic arena root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Payload of a node.
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// Parent of a node, `None` for the root and detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of a node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Element tag name, `None` for non-element nodes.
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Attribute value on an element node.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.as_str() == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Text payload, `None` for non-text nodes.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Comment payload, `None` for non-comment nodes.
    pub fn comment_text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Comment(c) => Some(c),
            _ => None,
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].data {
            NodeData::Text(t) => out.push_str(t),
            _ => {
                for &child in &self.nodes[id.0].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// All attached nodes in document order (pre-order, root excluded).
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.nodes[self.root.0]
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
            Some(id)
        })
    }

    /// First `<body>` element, present when the tree came from
    /// [`Document::parse_document`].
    pub fn body(&self) -> Option<NodeId> {
        self.descendants()
            .find(|&id| self.element_name(id) == Some("body"))
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Set (or overwrite) an attribute on an element node. Non-element ids
    /// are ignored.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.nodes[id.0].data {
            match attrs.iter_mut().find(|(k, _)| k.as_str() == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    /// Replace `target` with `replacements` at its position in the parent's
    /// child list. The target is detached; the replacement nodes must be
    /// detached (freshly imported) and are re-parented in place. Detached
    /// targets are left untouched.
    pub fn replace_with(&mut self, target: NodeId, replacements: &[NodeId]) {
        let Some(parent) = self.nodes[target.0].parent else {
            return;
        };
        let Some(pos) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == target)
        else {
            return;
        };
        self.nodes[parent.0]
            .children
            .splice(pos..=pos, replacements.iter().copied());
        self.nodes[target.0].parent = None;
        for &id in replacements {
            self.nodes[id.0].parent = Some(parent);
        }
    }

    /// Insert detached nodes at the front of `parent`'s children.
    pub fn prepend(&mut self, parent: NodeId, nodes: &[NodeId]) {
        self.nodes[parent.0].children.splice(0..0, nodes.iter().copied());
        for &id in nodes {
            self.nodes[id.0].parent = Some(parent);
        }
    }

    /// Serialize the tree back to markup.
    pub fn to_html(&self) -> String {
        serialize::to_html(self)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    pub(crate) fn alloc(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        id
    }

    fn attach_all(&mut self, parent: NodeId, ids: &[NodeId]) {
        for &id in ids {
            self.nodes[id.0].parent = Some(parent);
            self.nodes[parent.0].children.push(id);
        }
    }
}
