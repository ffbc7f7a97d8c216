//! Filtered pre-order traversal over any [`DocumentTree`].

use super::DocumentTree;

/// Depth-first, pre-order walk with subtree pruning.
///
/// A node for which `prune` returns true is still yielded, but its children
/// are not visited. The walk is lazy and holds only the frontier, so it can
/// be dropped or restarted at any point.
pub struct PreOrder<'a, T: DocumentTree + ?Sized, P> {
    tree: &'a T,
    stack: Vec<T::Handle>,
    prune: P,
}

/// Start a pre-order walk at `root`.
pub fn pre_order<T, P>(tree: &T, root: T::Handle, prune: P) -> PreOrder<'_, T, P>
where
    T: DocumentTree + ?Sized,
    P: FnMut(T::Handle) -> bool,
{
    PreOrder {
        tree,
        stack: vec![root],
        prune,
    }
}

impl<T, P> Iterator for PreOrder<'_, T, P>
where
    T: DocumentTree + ?Sized,
    P: FnMut(T::Handle) -> bool,
{
    type Item = T::Handle;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if !(self.prune)(node) {
            let start = self.stack.len();
            self.stack.extend(self.tree.children(node));
            self.stack[start..].reverse();
        }
        Some(node)
    }
}
