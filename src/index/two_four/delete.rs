//! Deletion with top-down rotate/merge rebalancing.
//!
//! Before the walker enters any non-root 2-node, that node is topped up to
//! two keys, either by borrowing through the parent from an adjacent sibling
//! (rotation) or by fusing with a 2-node sibling and the separating parent
//! key (merge). Removing a key from whatever leaf the walker ends on can
//! therefore never empty a non-root node.
//!
//! ```text
//!  rotate from left           merge
//!
//!     [ 10 | 30 ]               [ 10 | 30 ]
//!    /     |     \             /     |     \
//!  [5 8] [20]   ...         [5]    [20]   ...
//!
//!     [ 8 | 30 ]                 [ 30 ]
//!    /    |     \               /      \
//!  [5]  [10 20]  ...       [5 10 20]   ...
//! ```

use crate::common::config::Key;
use crate::common::{Error, NodeId, Result};
use crate::index::two_four::stats::TreeStats;
use crate::index::two_four::trace::{RebalanceEvent, Side};
use crate::index::two_four::tree::TwoFourTree;

/// Outcome of topping up a 2-node child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rebalance {
    /// A key was borrowed from a sibling; `node` is the child itself.
    Rotated { node: NodeId },

    /// The child was fused with a sibling; `node` is the merged node.
    Merged { node: NodeId },

    /// No sibling can spare a key; the caller should merge instead.
    NotApplicable,
}

impl Rebalance {
    /// The node the walker should continue into, if rebalancing happened.
    pub(crate) fn node(self) -> Option<NodeId> {
        match self {
            Rebalance::Rotated { node } | Rebalance::Merged { node } => Some(node),
            Rebalance::NotApplicable => None,
        }
    }
}

impl TwoFourTree {
    /// Delete `key`.
    ///
    /// Returns `true` if the key was found and removed. Deleting a missing
    /// key returns `false`; nodes on the search path may still have been
    /// rebalanced, but the key set is unchanged.
    pub fn delete(&mut self, key: Key) -> bool {
        let Some(mut current) = self.root else {
            return false;
        };

        loop {
            let node = &self.arena[current];
            match node.find(key) {
                Ok(idx) if node.is_leaf() => {
                    self.remove_from_leaf(current, idx);
                    self.record_delete();
                    return true;
                }
                Ok(idx) => {
                    let (left, right) = (node.child(idx), node.child(idx + 1));

                    if !self.arena[left].is_two_node() {
                        let predecessor = self.take_max(left);
                        self.arena[current].set_key(idx, predecessor);
                        self.record_delete();
                        return true;
                    }
                    if !self.arena[right].is_two_node() {
                        let successor = self.take_min(right);
                        self.arena[current].set_key(idx, successor);
                        self.record_delete();
                        return true;
                    }

                    // Both neighbours are 2-nodes. Top up the successor side:
                    // a rotation leaves `key` here for another pass, a merge
                    // with the predecessor side pulls `key` down into it.
                    if let Rebalance::Merged { node } = self.rebalance_child(current, idx + 1) {
                        current = node;
                    }
                }
                Err(_) if node.is_leaf() => return false,
                Err(idx) => current = self.descend_into(current, idx),
            }
        }
    }

    /// Delete `key`, reporting a missing key as an error.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if the key is not present
    pub fn try_delete(&mut self, key: Key) -> Result<()> {
        if self.delete(key) {
            Ok(())
        } else {
            Err(Error::KeyNotFound(key))
        }
    }

    fn record_delete(&mut self) {
        self.len -= 1;
        TreeStats::bump(&self.stats.deletes);
    }

    /// Remove `keys[idx]` from a leaf, dropping a root that becomes empty.
    fn remove_from_leaf(&mut self, node_id: NodeId, idx: usize) {
        if self.arena[node_id].len() == 1 {
            debug_assert_eq!(self.root, Some(node_id), "non-root leaf down to one key");
            self.arena.release(node_id);
            self.root = None;
            return;
        }
        self.arena[node_id].remove_key(idx);
    }

    // ========================================================================
    // Internal: Predecessor / successor extraction
    // ========================================================================

    /// Remove and return the largest key below `node_id`.
    ///
    /// `node_id` must hold at least two keys.
    fn take_max(&mut self, mut node_id: NodeId) -> Key {
        loop {
            let node = &self.arena[node_id];
            if node.is_leaf() {
                let last = node.len() - 1;
                return self.arena[node_id].remove_key(last);
            }
            let last_child = node.len();
            node_id = self.descend_into(node_id, last_child);
        }
    }

    /// Remove and return the smallest key below `node_id`.
    ///
    /// `node_id` must hold at least two keys.
    fn take_min(&mut self, mut node_id: NodeId) -> Key {
        loop {
            let node = &self.arena[node_id];
            if node.is_leaf() {
                return self.arena[node_id].remove_key(0);
            }
            node_id = self.descend_into(node_id, 0);
        }
    }

    // ========================================================================
    // Internal: Rebalancing
    // ========================================================================

    /// Return the child at `idx`, first topping it up if it is a 2-node.
    ///
    /// The returned node holds at least two keys. It is the child itself
    /// unless a merge replaced it.
    fn descend_into(&mut self, parent_id: NodeId, idx: usize) -> NodeId {
        let child = self.arena[parent_id].child(idx);
        if !self.arena[child].is_two_node() {
            return child;
        }

        let outcome = self.rebalance_child(parent_id, idx);
        debug_assert_ne!(outcome, Rebalance::NotApplicable);
        outcome.node().unwrap_or(child)
    }

    /// Top up the 2-node child at `idx`: rotate if a sibling can spare a
    /// key, merge otherwise.
    pub(crate) fn rebalance_child(&mut self, parent_id: NodeId, idx: usize) -> Rebalance {
        match self.try_rotate(parent_id, idx) {
            Rebalance::NotApplicable => self.merge_with_sibling(parent_id, idx),
            rotated => rotated,
        }
    }

    /// Borrow a key for the child at `idx` from an adjacent sibling with at
    /// least two keys, preferring the left sibling.
    ///
    /// The parent separator moves down into the child, the sibling's
    /// outermost key moves up to replace it, and the sibling's outermost
    /// child (if any) changes hands.
    pub(crate) fn try_rotate(&mut self, parent_id: NodeId, idx: usize) -> Rebalance {
        let parent = self.arena[parent_id];
        let child = parent.child(idx);

        if idx > 0 {
            let left = parent.child(idx - 1);
            if !self.arena[left].is_two_node() {
                let separator = parent.key(idx - 1);
                let (up, moved) = self.arena[left].pop_back();
                self.arena[parent_id].set_key(idx - 1, up);
                self.arena[child].push_front(separator, moved);
                self.finish_rotation(child, moved, Side::Left, separator);
                return Rebalance::Rotated { node: child };
            }
        }

        if idx < parent.len() {
            let right = parent.child(idx + 1);
            if !self.arena[right].is_two_node() {
                let separator = parent.key(idx);
                let (up, moved) = self.arena[right].pop_front();
                self.arena[parent_id].set_key(idx, up);
                self.arena[child].push_back(separator, moved);
                self.finish_rotation(child, moved, Side::Right, separator);
                return Rebalance::Rotated { node: child };
            }
        }

        Rebalance::NotApplicable
    }

    fn finish_rotation(&mut self, child: NodeId, moved: NodeId, from: Side, key: Key) {
        if moved.is_valid() {
            self.arena[moved].parent = Some(child);
        }
        TreeStats::bump(&self.stats.rotations);
        self.emit(RebalanceEvent::Rotated {
            node: child,
            from,
            key,
        });
    }

    /// Merge the child at `idx` with its left sibling, or its right sibling
    /// when it is the first child.
    fn merge_with_sibling(&mut self, parent_id: NodeId, idx: usize) -> Rebalance {
        let left_idx = if idx > 0 { idx - 1 } else { idx };
        let node = self.merge_children(parent_id, left_idx);
        Rebalance::Merged { node }
    }

    /// Fuse children `left_idx` and `left_idx + 1` of `parent_id` around the
    /// separator between them. Returns the surviving (left) node.
    ///
    /// If this empties the root, the merged node becomes the new root.
    fn merge_children(&mut self, parent_id: NodeId, left_idx: usize) -> NodeId {
        let left = self.arena[parent_id].child(left_idx);
        let (separator, right) = self.arena[parent_id].remove_key_and_right_child(left_idx);

        let absorbed = self.arena.release(right);
        self.arena[left].append(separator, &absorbed);
        self.adopt_children(left);

        TreeStats::bump(&self.stats.merges);
        self.emit(RebalanceEvent::Merged {
            node: left,
            separator,
        });

        if self.arena[parent_id].len() == 0 {
            debug_assert_eq!(self.root, Some(parent_id), "non-root parent emptied by merge");
            self.arena.release(parent_id);
            self.arena[left].parent = None;
            self.root = Some(left);
            TreeStats::bump(&self.stats.root_shrinks);
            self.emit(RebalanceEvent::RootShrunk { new_root: left });
        }

        left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_from_empty() {
        let mut tree = TwoFourTree::new();
        assert!(!tree.delete(1));
        assert_eq!(tree.try_delete(1), Err(Error::KeyNotFound(1)));
    }

    #[test]
    fn test_delete_single_key_root() {
        let mut tree = TwoFourTree::new();
        tree.insert(7);

        assert!(tree.delete(7));
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
        assert!(!tree.contains(7));
        assert!(!tree.delete(7));
    }

    #[test]
    fn test_delete_from_leaf_root() {
        let mut tree: TwoFourTree = [1, 2, 3].into_iter().collect();
        assert!(tree.delete(2));
        assert_eq!(tree.in_order(), vec![1, 3]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_missing_key() {
        let mut tree: TwoFourTree = (0..50).map(|k| k * 2).collect();
        assert!(!tree.delete(33));
        assert_eq!(tree.len(), 50);
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_internal_uses_predecessor() {
        // Root [20], children [5 10] and [30].
        let mut tree: TwoFourTree = [10, 20, 30, 5].into_iter().collect();
        assert_eq!(tree.dump(), "  5\n  10\n20\n  30\n");

        assert!(tree.delete(20));
        assert_eq!(tree.dump(), "  5\n10\n  30\n");
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_internal_uses_successor() {
        // Root [20], children [10] and [30 40].
        let mut tree: TwoFourTree = [10, 20, 30, 40].into_iter().collect();
        assert!(tree.delete(20));
        assert_eq!(tree.dump(), "  10\n30\n  40\n");
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_internal_merges_and_shrinks_root() {
        // Root [20], children [10] and [30]: both 2-nodes force a merge.
        let mut tree: TwoFourTree = [10, 20, 30, 40].into_iter().collect();
        tree.delete(40);
        assert_eq!(tree.height(), 2);

        assert!(tree.delete(20));
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.in_order(), vec![10, 30]);
        assert_eq!(tree.stats().snapshot().root_shrinks, 1);
        tree.validate().unwrap();
    }

    #[test]
    fn test_descent_rotates_from_sibling() {
        // Root [20], children [5 10] and [30].
        let mut tree: TwoFourTree = [10, 20, 30, 5].into_iter().collect();

        // Descending into [30] borrows through the root from [5 10].
        assert!(tree.delete(30));
        assert_eq!(tree.in_order(), vec![5, 10, 20]);
        assert!(tree.stats().snapshot().rotations >= 1);
        tree.validate().unwrap();
    }

    #[test]
    fn test_try_rotate_not_applicable_between_two_nodes() {
        // Root [2] with children [1] and [3].
        let mut tree: TwoFourTree = [1, 2, 3, 4].into_iter().collect();
        tree.delete(4);
        let root = tree.root.unwrap();

        assert_eq!(tree.try_rotate(root, 0), Rebalance::NotApplicable);
        assert_eq!(tree.try_rotate(root, 1), Rebalance::NotApplicable);

        let outcome = tree.rebalance_child(root, 0);
        assert!(matches!(outcome, Rebalance::Merged { .. }));
        assert_eq!(tree.root, outcome.node());
        assert_eq!(tree.in_order(), vec![1, 2, 3]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_everything_ascending() {
        let mut tree: TwoFourTree = (0..300).collect();
        for key in 0..300 {
            assert!(tree.delete(key), "failed to delete {}", key);
            assert!(!tree.contains(key));
            tree.validate().unwrap();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_delete_everything_descending() {
        let mut tree: TwoFourTree = (0..300).collect();
        for key in (0..300).rev() {
            assert!(tree.delete(key));
            tree.validate().unwrap();
        }
        assert!(tree.is_empty());
    }
}
