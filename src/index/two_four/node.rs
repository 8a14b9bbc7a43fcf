//! Node - a fixed-capacity 2-, 3- or 4-node.
//!
//! A [`Node`] stores up to [`MAX_KEYS`] keys and, when internal, exactly
//! `len + 1` children. Unused slots hold [`NodeId::INVALID`]. All helpers
//! work on any arity by index math, so splitting, rotating and merging never
//! branch on "is this a 2-node or a 3-node".

use crate::common::config::{Key, MAX_CHILDREN, MAX_KEYS};
use crate::common::NodeId;

/// A node of the 2-3-4 tree.
///
/// # Layout
/// ```text
///        keys:  [ k0 | k1 | k2 ]
///    children: [ c0 | c1 | c2 | c3 ]
///
///   c0 < k0 < c1 < k1 < c2 < k2 < c3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    /// Number of keys in use (1..=3 outside of a rebalancing step).
    len: usize,

    /// Keys in strictly ascending order, `keys[..len]` valid.
    keys: [Key; MAX_KEYS],

    /// Child slots, `children[..=len]` valid for internal nodes.
    children: [NodeId; MAX_CHILDREN],

    /// True iff the node has no children.
    leaf: bool,

    /// Non-owning back-reference, `None` only for the root.
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// Create a leaf holding a single key.
    pub fn leaf(key: Key, parent: Option<NodeId>) -> Self {
        Self {
            len: 1,
            keys: [key, 0, 0],
            children: [NodeId::INVALID; MAX_CHILDREN],
            leaf: true,
            parent,
        }
    }

    /// Create a 2-node with two children (used when the root splits).
    pub fn internal(key: Key, left: NodeId, right: NodeId) -> Self {
        Self {
            len: 1,
            keys: [key, 0, 0],
            children: [left, right, NodeId::INVALID, NodeId::INVALID],
            leaf: false,
            parent: None,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// A 2-node holds a single key.
    #[inline]
    pub fn is_two_node(&self) -> bool {
        self.len == 1
    }

    /// A 4-node holds the maximum number of keys and must split before
    /// an insertion descends into it.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == MAX_KEYS
    }

    #[inline]
    pub fn keys(&self) -> &[Key] {
        &self.keys[..self.len]
    }

    /// Valid children; empty for a leaf.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        if self.leaf {
            &[]
        } else {
            &self.children[..=self.len]
        }
    }

    #[inline]
    pub fn key(&self, idx: usize) -> Key {
        debug_assert!(idx < self.len);
        self.keys[idx]
    }

    #[inline]
    pub fn set_key(&mut self, idx: usize, key: Key) {
        debug_assert!(idx < self.len);
        self.keys[idx] = key;
    }

    #[inline]
    pub fn child(&self, idx: usize) -> NodeId {
        debug_assert!(!self.leaf && idx <= self.len);
        self.children[idx]
    }

    #[inline]
    pub fn first_key(&self) -> Key {
        self.keys[0]
    }

    #[inline]
    pub fn last_key(&self) -> Key {
        self.keys[self.len - 1]
    }

    /// Locate `key` within this node.
    ///
    /// Returns `Ok(i)` when `keys[i] == key`, otherwise `Err(i)` where `i` is
    /// the index of the child whose subtree brackets `key`.
    pub fn find(&self, key: Key) -> Result<usize, usize> {
        for (i, &k) in self.keys().iter().enumerate() {
            if key == k {
                return Ok(i);
            }
            if key < k {
                return Err(i);
            }
        }
        Err(self.len)
    }

    /// Internal nodes fill exactly `len + 1` child slots, leaves fill none.
    pub fn slots_consistent(&self) -> bool {
        let used = if self.leaf { 0 } else { self.len + 1 };
        self.children
            .iter()
            .enumerate()
            .all(|(i, c)| c.is_valid() == (i < used))
    }

    /// Position of `child` among this node's children.
    pub fn child_position(&self, child: NodeId) -> Option<usize> {
        self.children().iter().position(|&c| c == child)
    }

    // ========================================================================
    // Mutation: leaf keys
    // ========================================================================

    /// Insert `key` at `idx`, shifting larger keys right. Leaf only.
    pub fn insert_key(&mut self, idx: usize, key: Key) {
        debug_assert!(self.leaf && self.len < MAX_KEYS && idx <= self.len);
        self.keys.copy_within(idx..self.len, idx + 1);
        self.keys[idx] = key;
        self.len += 1;
    }

    /// Remove and return the key at `idx`, shifting larger keys left. Leaf only.
    pub fn remove_key(&mut self, idx: usize) -> Key {
        debug_assert!(self.leaf && idx < self.len);
        let key = self.keys[idx];
        self.keys.copy_within(idx + 1..self.len, idx);
        self.len -= 1;
        key
    }

    // ========================================================================
    // Mutation: keys with child links
    // ========================================================================

    /// Insert `key` at `idx` with `right` as the child just after it.
    ///
    /// Used when a split pushes a median up: the split child keeps its slot
    /// at `idx`, the new right half lands at `idx + 1`.
    pub fn insert_key_with_right_child(&mut self, idx: usize, key: Key, right: NodeId) {
        debug_assert!(!self.leaf && self.len < MAX_KEYS && idx <= self.len);
        self.keys.copy_within(idx..self.len, idx + 1);
        self.children.copy_within(idx + 1..self.len + 1, idx + 2);
        self.keys[idx] = key;
        self.children[idx + 1] = right;
        self.len += 1;
    }

    /// Remove the key at `idx` together with the child just after it.
    ///
    /// Used by a merge: the separator moves down, the right sibling is absorbed.
    pub fn remove_key_and_right_child(&mut self, idx: usize) -> (Key, NodeId) {
        debug_assert!(!self.leaf && idx < self.len);
        let key = self.keys[idx];
        let child = self.children[idx + 1];
        self.keys.copy_within(idx + 1..self.len, idx);
        self.children.copy_within(idx + 2..self.len + 1, idx + 1);
        self.children[self.len] = NodeId::INVALID;
        self.len -= 1;
        (key, child)
    }

    /// Prepend `key`, with `child` as the new first child (ignored for leaves).
    pub fn push_front(&mut self, key: Key, child: NodeId) {
        debug_assert!(self.len < MAX_KEYS);
        self.keys.copy_within(0..self.len, 1);
        self.keys[0] = key;
        if !self.leaf {
            self.children.copy_within(0..self.len + 1, 1);
            self.children[0] = child;
        }
        self.len += 1;
    }

    /// Append `key`, with `child` as the new last child (ignored for leaves).
    pub fn push_back(&mut self, key: Key, child: NodeId) {
        debug_assert!(self.len < MAX_KEYS);
        self.keys[self.len] = key;
        if !self.leaf {
            self.children[self.len + 1] = child;
        }
        self.len += 1;
    }

    /// Remove the first key and first child.
    ///
    /// The returned child is [`NodeId::INVALID`] for leaves.
    pub fn pop_front(&mut self) -> (Key, NodeId) {
        debug_assert!(self.len > 0);
        let key = self.keys[0];
        self.keys.copy_within(1..self.len, 0);
        let child = if self.leaf {
            NodeId::INVALID
        } else {
            let child = self.children[0];
            self.children.copy_within(1..self.len + 1, 0);
            self.children[self.len] = NodeId::INVALID;
            child
        };
        self.len -= 1;
        (key, child)
    }

    /// Remove the last key and last child.
    ///
    /// The returned child is [`NodeId::INVALID`] for leaves.
    pub fn pop_back(&mut self) -> (Key, NodeId) {
        debug_assert!(self.len > 0);
        let key = self.keys[self.len - 1];
        let child = if self.leaf {
            NodeId::INVALID
        } else {
            std::mem::replace(&mut self.children[self.len], NodeId::INVALID)
        };
        self.len -= 1;
        (key, child)
    }

    // ========================================================================
    // Mutation: split and merge
    // ========================================================================

    /// Split a 4-node in place.
    ///
    /// `self` keeps the first key and first two children; the median and a
    /// new node holding the last key and last two children are returned.
    pub fn split_off_right_half(&mut self) -> (Key, Node) {
        debug_assert!(self.is_full());
        let right = Node {
            len: 1,
            keys: [self.keys[2], 0, 0],
            children: [
                self.children[2],
                self.children[3],
                NodeId::INVALID,
                NodeId::INVALID,
            ],
            leaf: self.leaf,
            parent: self.parent,
        };
        let median = self.keys[1];
        self.children[2] = NodeId::INVALID;
        self.children[3] = NodeId::INVALID;
        self.len = 1;
        (median, right)
    }

    /// Absorb `separator` followed by every key and child of `other`.
    pub fn append(&mut self, separator: Key, other: &Node) {
        debug_assert_eq!(self.leaf, other.leaf);
        debug_assert!(self.len + 1 + other.len <= MAX_KEYS);
        let start = self.len + 1;
        self.keys[self.len] = separator;
        self.keys[start..start + other.len].copy_from_slice(other.keys());
        if !self.leaf {
            self.children[start..start + other.len + 1].copy_from_slice(other.children());
        }
        self.len = start + other.len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_of(keys: &[Key]) -> Node {
        let mut node = Node::leaf(keys[0], None);
        for &k in &keys[1..] {
            let idx = node.find(k).unwrap_err();
            node.insert_key(idx, k);
        }
        node
    }

    #[test]
    fn test_find() {
        let node = leaf_of(&[10, 20, 30]);
        assert_eq!(node.find(5), Err(0));
        assert_eq!(node.find(10), Ok(0));
        assert_eq!(node.find(15), Err(1));
        assert_eq!(node.find(30), Ok(2));
        assert_eq!(node.find(99), Err(3));
    }

    #[test]
    fn test_insert_and_remove_key() {
        let mut node = leaf_of(&[20, 5, 10]);
        assert_eq!(node.keys(), &[5, 10, 20]);
        assert!(node.is_full());

        assert_eq!(node.remove_key(1), 10);
        assert_eq!(node.keys(), &[5, 20]);
        assert_eq!(node.remove_key(0), 5);
        assert_eq!(node.keys(), &[20]);
        assert!(node.is_two_node());
    }

    #[test]
    fn test_insert_key_with_right_child() {
        let (a, b, c) = (NodeId::new(1), NodeId::new(2), NodeId::new(3));
        let mut node = Node::internal(50, a, c);

        node.insert_key_with_right_child(0, 25, b);
        assert_eq!(node.keys(), &[25, 50]);
        assert_eq!(node.children(), &[a, b, c]);

        let (key, child) = node.remove_key_and_right_child(0);
        assert_eq!((key, child), (25, b));
        assert_eq!(node.children(), &[a, c]);
    }

    #[test]
    fn test_push_pop_internal() {
        let ids: Vec<NodeId> = (0..4).map(NodeId::new).collect();
        let mut node = Node::internal(20, ids[1], ids[2]);

        node.push_front(10, ids[0]);
        node.push_back(30, ids[3]);
        assert_eq!(node.keys(), &[10, 20, 30]);
        assert_eq!(node.children(), &ids[..]);

        assert_eq!(node.pop_front(), (10, ids[0]));
        assert_eq!(node.pop_back(), (30, ids[3]));
        assert_eq!(node.children(), &[ids[1], ids[2]]);
    }

    #[test]
    fn test_pop_leaf_returns_invalid_child() {
        let mut node = leaf_of(&[1, 2]);
        assert_eq!(node.pop_back(), (2, NodeId::INVALID));
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_split_and_append() {
        let ids: Vec<NodeId> = (0..4).map(NodeId::new).collect();
        let mut node = Node::internal(10, ids[0], ids[1]);
        node.push_back(20, ids[2]);
        node.push_back(30, ids[3]);

        let (median, right) = node.split_off_right_half();
        assert_eq!(median, 20);
        assert_eq!(node.keys(), &[10]);
        assert_eq!(node.children(), &[ids[0], ids[1]]);
        assert_eq!(right.keys(), &[30]);
        assert_eq!(right.children(), &[ids[2], ids[3]]);

        node.append(median, &right);
        assert_eq!(node.keys(), &[10, 20, 30]);
        assert_eq!(node.children(), &ids[..]);
    }
}
