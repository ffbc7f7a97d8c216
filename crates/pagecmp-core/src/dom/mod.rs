//! Abstract document tree.
//!
//! The diff engine never touches a concrete DOM. It reads documents through
//! [`DocumentTree`]: a root, parent/child links, a node kind, attributes and
//! a base URL. Everything else (pre-order walks, tag enumeration, inner text,
//! ancestor search) is provided on top of those primitives.
//!
//! [`Document`] is the arena implementation used by the CLI and the tests;
//! [`html::parse_document`] builds one from serialized markup.

pub mod arena;
pub mod html;
pub mod tag;
pub mod traverse;

pub use arena::{Document, Node, NodeData, NodeId};
pub use html::parse_document;
pub use tag::{is_block_tag, TagClass};
pub use traverse::{pre_order, PreOrder};

use std::fmt::Debug;
use std::hash::Hash;
use url::Url;

/// What a node is, borrowed from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// Element with its lower-case tag name
    Element(&'a str),
    /// Text node with its raw value
    Text(&'a str),
    /// Document root, comments, doctypes
    Other,
}

/// Read-only view of a parsed document.
pub trait DocumentTree {
    /// Opaque node identity; stable for the lifetime of the tree.
    type Handle: Copy + Eq + Hash + Ord + Debug;

    fn root(&self) -> Self::Handle;

    fn parent(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// Children in document order.
    fn children(&self, node: Self::Handle) -> impl Iterator<Item = Self::Handle> + '_;

    fn kind(&self, node: Self::Handle) -> NodeKind<'_>;

    fn attribute(&self, node: Self::Handle, name: &str) -> Option<&str>;

    /// Base URI relative URLs in this document resolve against.
    fn base_url(&self) -> Option<&Url>;

    fn tag_name(&self, node: Self::Handle) -> Option<&str> {
        match self.kind(node) {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    fn tag_class(&self, node: Self::Handle) -> TagClass {
        self.tag_name(node).map(TagClass::of).unwrap_or_default()
    }

    fn text(&self, node: Self::Handle) -> Option<&str> {
        match self.kind(node) {
            NodeKind::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Nearest element ancestor of `node`.
    fn parent_element(&self, node: Self::Handle) -> Option<Self::Handle> {
        let mut current = self.parent(node);
        while let Some(candidate) = current {
            if self.tag_name(candidate).is_some() {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// `node` itself or its nearest ancestor satisfying `pred`.
    fn closest<F>(&self, node: Self::Handle, mut pred: F) -> Option<Self::Handle>
    where
        F: FnMut(Self::Handle) -> bool,
    {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if pred(candidate) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// `node` and everything below it, pre-order.
    fn descendants(&self, node: Self::Handle) -> impl Iterator<Item = Self::Handle> + '_ {
        pre_order(self, node, |_| false)
    }

    /// Every element named `tag` (lower case) in document order.
    fn elements_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = Self::Handle> + 'a {
        self.descendants(self.root())
            .filter(move |&node| self.tag_name(node) == Some(tag))
    }

    /// The `body` element, or the root when the document has none.
    fn body(&self) -> Self::Handle {
        self.elements_by_tag("body")
            .next()
            .unwrap_or_else(|| self.root())
    }

    /// Concatenated text below `node`, skipping subtrees `skip` rejects.
    ///
    /// Text in different block containers, or across a `<br>`, is joined
    /// with a space; inline neighbours are joined as-is.
    fn inner_text<F>(&self, node: Self::Handle, skip: F) -> String
    where
        F: FnMut(Self::Handle) -> bool,
    {
        let mut out = String::new();
        let mut block = None;
        let mut line_break = false;
        for n in pre_order(self, node, skip) {
            if self.tag_name(n) == Some("br") {
                line_break = true;
                continue;
            }
            let Some(value) = self.text(n) else {
                continue;
            };
            let container =
                self.closest(n, |a| a == node || self.tag_name(a).is_some_and(is_block_tag));
            if !out.is_empty() && (line_break || container != block) {
                out.push(' ');
            }
            block = container;
            line_break = false;
            out.push_str(value);
        }
        out
    }
}
