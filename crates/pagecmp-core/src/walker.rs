//! Meaningful text leaves of a document.

use crate::config::CompareConfig;
use crate::dom::{pre_order, DocumentTree};

/// A non-blank text node, borrowed from its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLeaf<'a, H> {
    pub node: H,
    pub value: &'a str,
}

/// True for elements whose subtree contributes no comparable text: the
/// configured excluded tags and the annotation UI container.
pub fn is_excluded<T>(tree: &T, node: T::Handle, config: &CompareConfig) -> bool
where
    T: DocumentTree + ?Sized,
{
    match tree.tag_name(node) {
        Some(tag) => {
            config.is_excluded_tag(tag)
                || tree.attribute(node, "id") == Some(config.annotation_container_id.as_str())
        }
        None => false,
    }
}

/// Lazily walk the text leaves under `root` in document order.
///
/// Blank text nodes are skipped and excluded subtrees are pruned without
/// being entered. The iterator can be recreated at any time to restart.
pub fn collect_text_leaves<'a, T>(
    tree: &'a T,
    root: T::Handle,
    config: &'a CompareConfig,
) -> impl Iterator<Item = TextLeaf<'a, T::Handle>> + 'a
where
    T: DocumentTree + ?Sized,
{
    pre_order(tree, root, move |node| is_excluded(tree, node, config)).filter_map(move |node| {
        let value = tree.text(node)?;
        if value.trim().is_empty() {
            return None;
        }
        Some(TextLeaf { node, value })
    })
}

/// Elements named `tag` (lower case) in document order, outside excluded
/// subtrees.
pub fn comparable_elements<'a, T>(
    tree: &'a T,
    tag: &'a str,
    config: &'a CompareConfig,
) -> impl Iterator<Item = T::Handle> + 'a
where
    T: DocumentTree + ?Sized,
{
    pre_order(tree, tree.root(), move |node| is_excluded(tree, node, config))
        .filter(move |&node| tree.tag_name(node) == Some(tag) && !is_excluded(tree, node, config))
}
