//! Membership search.

use crate::common::config::Key;
use crate::index::two_four::stats::TreeStats;
use crate::index::two_four::tree::TwoFourTree;

impl TwoFourTree {
    /// Check whether `key` is stored in the tree.
    ///
    /// Descends from the root, comparing against each node's keys in
    /// ascending order. Never mutates the tree.
    pub fn contains(&self, key: Key) -> bool {
        TreeStats::bump(&self.stats.searches);

        let Some(mut node_id) = self.root else {
            return false;
        };
        loop {
            let node = &self.arena[node_id];
            match node.find(key) {
                Ok(_) => return true,
                Err(_) if node.is_leaf() => return false,
                Err(idx) => node_id = node.child(idx),
            }
        }
    }
}
