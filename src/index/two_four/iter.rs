//! In-order traversal.

use std::iter::FusedIterator;

use crate::common::config::Key;
use crate::common::NodeId;
use crate::index::two_four::arena::NodeArena;
use crate::index::two_four::tree::TwoFourTree;

/// Ascending iterator over the keys of a [`TwoFourTree`].
///
/// Keeps an explicit stack of `(node, next key index)` frames, one per level,
/// so it never recurses and borrows the tree immutably.
///
/// # Example
/// ```
/// use twofourdb::TwoFourTree;
///
/// let tree: TwoFourTree = [30, 10, 20].into_iter().collect();
/// let keys: Vec<i32> = tree.iter().collect();
/// assert_eq!(keys, vec![10, 20, 30]);
/// ```
pub struct Iter<'a> {
    arena: &'a NodeArena,
    stack: Vec<(NodeId, usize)>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(tree: &'a TwoFourTree) -> Self {
        let mut iter = Self {
            arena: &tree.arena,
            stack: Vec::new(),
            remaining: tree.len(),
        };
        if let Some(root) = tree.root {
            iter.push_left_spine(root);
        }
        iter
    }

    /// Push `node_id` and every first child below it.
    fn push_left_spine(&mut self, mut node_id: NodeId) {
        loop {
            self.stack.push((node_id, 0));
            let node = &self.arena[node_id];
            if node.is_leaf() {
                return;
            }
            node_id = node.child(0);
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        let arena = self.arena;
        loop {
            let (node_id, idx) = self.stack.last_mut()?;
            let node = &arena[*node_id];

            if *idx == node.len() {
                self.stack.pop();
                continue;
            }

            let key = node.key(*idx);
            *idx += 1;
            if !node.is_leaf() {
                let next_child = node.child(*idx);
                self.push_left_spine(next_child);
            }
            self.remaining -= 1;
            return Some(key);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl TwoFourTree {
    /// Iterate over all keys in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Collect all keys in ascending order.
    pub fn in_order(&self) -> Vec<Key> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a TwoFourTree {
    type Item = Key;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
