//! Insertion with top-down splitting.
//!
//! Any 4-node met on the way down is split before the walker enters it, so
//! the parent of a split always has room for the pushed-up median and the
//! leaf finally reached always has room for the new key.

use crate::common::config::Key;
use crate::common::{Error, NodeId, Result};
use crate::index::two_four::node::Node;
use crate::index::two_four::stats::TreeStats;
use crate::index::two_four::trace::RebalanceEvent;
use crate::index::two_four::tree::TwoFourTree;

impl TwoFourTree {
    /// Insert `key`.
    ///
    /// Returns `true` if the key was added, `false` if it was already
    /// present. A rejected duplicate leaves the key set unchanged; splits
    /// performed on the way down are kept since they preserve every
    /// invariant.
    pub fn insert(&mut self, key: Key) -> bool {
        let Some(root) = self.root else {
            let node_id = self.arena.allocate(Node::leaf(key, None));
            self.root = Some(node_id);
            self.record_insert();
            return true;
        };

        let mut current = if self.arena[root].is_full() {
            self.split(root)
        } else {
            root
        };

        loop {
            let node = &self.arena[current];
            let idx = match node.find(key) {
                Ok(_) => return false,
                Err(idx) => idx,
            };

            if node.is_leaf() {
                self.arena[current].insert_key(idx, key);
                self.record_insert();
                return true;
            }

            let child = node.child(idx);
            if self.arena[child].is_full() {
                // The median lands in `current`; route again from there.
                self.split(child);
                continue;
            }
            current = child;
        }
    }

    /// Insert `key`, reporting a duplicate as an error.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if the key is already present
    pub fn try_insert(&mut self, key: Key) -> Result<()> {
        if self.insert(key) {
            Ok(())
        } else {
            Err(Error::DuplicateKey(key))
        }
    }

    fn record_insert(&mut self) {
        self.len += 1;
        TreeStats::bump(&self.stats.inserts);
    }

    /// Split the 4-node `node_id`, pushing its median into the parent.
    ///
    /// `node_id` keeps the lower key and lower two children; a new node takes
    /// the upper key and upper two children. Returns the node that received
    /// the median (a fresh root when `node_id` was the root).
    pub(crate) fn split(&mut self, node_id: NodeId) -> NodeId {
        let (median, right) = self.arena[node_id].split_off_right_half();
        let right_id = self.arena.allocate(right);
        self.adopt_children(right_id);

        let parent = self.arena[node_id].parent;
        let parent_id = match parent {
            Some(parent_id) => {
                let parent = &mut self.arena[parent_id];
                debug_assert!(!parent.is_full(), "split into a full parent");
                let idx = match parent.child_position(node_id) {
                    Some(idx) => idx,
                    None => unreachable!("{} missing from its parent {}", node_id, parent_id),
                };
                parent.insert_key_with_right_child(idx, median, right_id);
                parent_id
            }
            None => {
                let new_root = self.arena.allocate(Node::internal(median, node_id, right_id));
                self.arena[node_id].parent = Some(new_root);
                self.arena[right_id].parent = Some(new_root);
                self.root = Some(new_root);
                TreeStats::bump(&self.stats.root_growths);
                self.emit(RebalanceEvent::RootGrown { new_root });
                new_root
            }
        };

        TreeStats::bump(&self.stats.splits);
        self.emit(RebalanceEvent::Split {
            node: node_id,
            median,
            parent: parent_id,
        });
        parent_id
    }

    /// Point every child of `node_id` back at it.
    pub(crate) fn adopt_children(&mut self, node_id: NodeId) {
        let node = self.arena[node_id];
        for &child in node.children() {
            self.arena[child].parent = Some(node_id);
        }
    }
}
