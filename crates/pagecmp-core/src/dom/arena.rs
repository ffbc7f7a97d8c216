//! Arena-backed document tree.
//!
//! Nodes live in one `Vec` and refer to each other by index, so a
//! [`NodeId`] is a plain `usize` that is cheap to copy, hash and store in
//! the registry's claimed set.

use super::{DocumentTree, NodeKind};
use url::Url;

/// Index of a node in its [`Document`]
pub type NodeId = usize;

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Root of the tree
    Document,
    /// Element with lower-case tag name and attributes in source order
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    /// Character data
    Text(String),
    /// Comment; never compared
    Comment(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// A parsed page
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    base_url: Option<Url>,
}

impl Document {
    /// Empty document holding only its root node
    pub fn new(base_url: Option<Url>) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
            base_url,
        }
    }

    pub fn root_id(&self) -> NodeId {
        0
    }

    /// Total node count, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn set_base_url(&mut self, base_url: Option<Url>) {
        self.base_url = base_url;
    }

    /// Append an element under `parent`; the tag is stored lower-cased.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let data = NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                .collect(),
        };
        self.push(parent, data)
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeData::Text(text.to_string()))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeData::Comment(text.to_string()))
    }

    /// Replace the value of a text node. No-op for other nodes.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(Node {
            data: NodeData::Text(value),
            ..
        }) = self.nodes.get_mut(id)
        {
            *value = text.to_string();
        }
    }

    /// Set or replace an attribute on an element. No-op for other nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(Node {
            data: NodeData::Element { attrs, .. },
            ..
        }) = self.nodes.get_mut(id)
        {
            let name = name.to_ascii_lowercase();
            match attrs.iter_mut().find(|(k, _)| *k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attrs.push((name, value.to_string())),
            }
        }
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.nodes.len();
        let parent = if parent < id { Some(parent) } else { None };
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            data,
        });
        if let Some(p) = parent {
            self.nodes[p].children.push(id);
        }
        id
    }
}

impl DocumentTree for Document {
    type Handle = NodeId;

    fn root(&self) -> NodeId {
        self.root_id()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
    }

    fn kind(&self, node: NodeId) -> NodeKind<'_> {
        match self.nodes.get(node).map(|n| &n.data) {
            Some(NodeData::Element { tag, .. }) => NodeKind::Element(tag),
            Some(NodeData::Text(value)) => NodeKind::Text(value),
            _ => NodeKind::Other,
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match self.nodes.get(node).map(|n| &n.data) {
            Some(NodeData::Element { attrs, .. }) => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_links_parent_and_children() {
        let mut doc = Document::new(None);
        let root = doc.root_id();
        let body = doc.append_element(root, "BODY", &[]);
        let p = doc.append_element(body, "p", &[("Class", "lead")]);
        let t = doc.append_text(p, "Hello");

        assert_eq!(doc.parent(t), Some(p));
        assert_eq!(doc.children(body).collect::<Vec<_>>(), vec![p]);
        assert_eq!(doc.tag_name(body), Some("body"));
        assert_eq!(doc.attribute(p, "class"), Some("lead"));
        assert_eq!(doc.text(t), Some("Hello"));
        assert_eq!(doc.parent_element(t), Some(p));
    }

    #[test]
    fn test_body_falls_back_to_root() {
        let mut doc = Document::new(None);
        let root = doc.root_id();
        assert_eq!(doc.body(), root);
        let body = doc.append_element(root, "body", &[]);
        assert_eq!(doc.body(), body);
    }

    #[test]
    fn test_elements_by_tag_in_document_order() {
        let mut doc = Document::new(None);
        let root = doc.root_id();
        let a1 = doc.append_element(root, "a", &[]);
        let div = doc.append_element(root, "div", &[]);
        let a2 = doc.append_element(div, "a", &[]);
        assert_eq!(doc.elements_by_tag("a").collect::<Vec<_>>(), vec![a1, a2]);
    }

    #[test]
    fn test_closest_includes_self() {
        let mut doc = Document::new(None);
        let root = doc.root_id();
        let a = doc.append_element(root, "a", &[]);
        let span = doc.append_element(a, "span", &[]);
        assert_eq!(doc.closest(span, |n| doc.tag_name(n) == Some("a")), Some(a));
        assert_eq!(doc.closest(a, |n| doc.tag_name(n) == Some("a")), Some(a));
        assert_eq!(doc.closest(span, |n| doc.tag_name(n) == Some("button")), None);
    }

    #[test]
    fn test_set_text_and_attribute() {
        let mut doc = Document::new(None);
        let root = doc.root_id();
        let img = doc.append_element(root, "img", &[("src", "a.png")]);
        let t = doc.append_text(root, "old");
        doc.set_attribute(img, "SRC", "b.png");
        doc.set_attribute(img, "alt", "logo");
        doc.set_text(t, "new");
        assert_eq!(doc.attribute(img, "src"), Some("b.png"));
        assert_eq!(doc.attribute(img, "alt"), Some("logo"));
        assert_eq!(doc.text(t), Some("new"));
    }

    #[test]
    fn test_inner_text_skips_pruned_subtrees() {
        let mut doc = Document::new(None);
        let root = doc.root_id();
        let a = doc.append_element(root, "a", &[]);
        doc.append_text(a, "Buy ");
        let script = doc.append_element(a, "script", &[]);
        doc.append_text(script, "track()");
        let b = doc.append_element(a, "b", &[]);
        doc.append_text(b, "now");
        let text = doc.inner_text(a, |n| doc.tag_name(n) == Some("script"));
        assert_eq!(text, "Buy now");
    }

    #[test]
    fn test_inner_text_separates_block_children() {
        let mut doc = Document::new(None);
        let root = doc.root_id();
        let a = doc.append_element(root, "a", &[]);
        let first = doc.append_element(a, "div", &[]);
        doc.append_text(first, "Buy");
        let second = doc.append_element(a, "div", &[]);
        doc.append_text(second, "Now");
        doc.append_text(a, "today");
        assert_eq!(doc.inner_text(a, |_| false), "Buy Now today");
    }

    #[test]
    fn test_inner_text_keeps_inline_runs_together() {
        let mut doc = Document::new(None);
        let root = doc.root_id();
        let a = doc.append_element(root, "a", &[]);
        doc.append_text(a, "Bu");
        let b = doc.append_element(a, "b", &[]);
        doc.append_text(b, "y");
        doc.append_element(a, "br", &[]);
        doc.append_text(a, "now");
        assert_eq!(doc.inner_text(a, |_| false), "Buy now");
    }
}
