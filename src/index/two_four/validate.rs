//! Structural invariant checking.
//!
//! [`TwoFourTree::validate`] walks the whole tree and checks:
//! 1. Sorted order - every key lies strictly between its bracketing ancestors
//! 2. Shape - a node is a leaf or has exactly `len + 1` children
//! 3. Balance - every leaf is at the same depth
//! 4. Multiplicity - every node holds 1 to 3 keys
//! 5. Uniqueness - follows from 1 (strict bounds, strictly ascending keys)
//!
//! plus parent back-references, the cached length and that no arena slot
//! is leaked.

use crate::common::config::{Key, MAX_KEYS, MIN_KEYS};
use crate::common::{Error, NodeId, Result};
use crate::index::two_four::tree::TwoFourTree;

/// Running totals collected during a validation walk.
#[derive(Default)]
struct Walk {
    leaf_depth: Option<usize>,
    keys: usize,
    nodes: usize,
}

impl TwoFourTree {
    /// Check every structural invariant.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` naming the first offending node
    pub fn validate(&self) -> Result<()> {
        let Some(root) = self.root else {
            if self.len != 0 || self.node_count() != 0 {
                return Err(Error::invariant(
                    NodeId::INVALID,
                    format!("empty tree reports {} keys, {} nodes", self.len, self.node_count()),
                ));
            }
            return Ok(());
        };

        if self.arena[root].parent.is_some() {
            return Err(Error::invariant(root, "root has a parent"));
        }

        let mut walk = Walk::default();
        self.validate_node(root, None, None, 1, &mut walk)?;

        if walk.keys != self.len {
            return Err(Error::invariant(
                root,
                format!("found {} keys, tree reports {}", walk.keys, self.len),
            ));
        }
        if walk.nodes != self.node_count() {
            return Err(Error::invariant(
                root,
                format!("reached {} nodes, arena holds {}", walk.nodes, self.node_count()),
            ));
        }
        Ok(())
    }

    fn validate_node(
        &self,
        node_id: NodeId,
        lower: Option<Key>,
        upper: Option<Key>,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<()> {
        let node = &self.arena[node_id];
        walk.nodes += 1;
        walk.keys += node.len();

        if !(MIN_KEYS..=MAX_KEYS).contains(&node.len()) {
            return Err(Error::invariant(node_id, format!("holds {} keys", node.len())));
        }
        if !node.slots_consistent() {
            return Err(Error::invariant(
                node_id,
                format!("child slots do not match {} keys", node.len()),
            ));
        }

        let keys = node.keys();
        if keys.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::invariant(node_id, format!("keys {:?} not strictly ascending", keys)));
        }
        if lower.is_some_and(|lo| node.first_key() <= lo) || upper.is_some_and(|hi| node.last_key() >= hi) {
            return Err(Error::invariant(
                node_id,
                format!("keys {:?} escape bounds ({:?}, {:?})", keys, lower, upper),
            ));
        }

        if node.is_leaf() {
            match walk.leaf_depth {
                None => walk.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(Error::invariant(
                        node_id,
                        format!("leaf at depth {}, expected {}", depth, expected),
                    ));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        for (i, &child) in node.children().iter().enumerate() {
            if self.arena[child].parent != Some(node_id) {
                return Err(Error::invariant(
                    child,
                    format!("parent link is {:?}, expected {}", self.arena[child].parent, node_id),
                ));
            }
            let child_lower = if i == 0 { lower } else { Some(keys[i - 1]) };
            let child_upper = if i == keys.len() { upper } else { Some(keys[i]) };
            self.validate_node(child, child_lower, child_upper, depth + 1, walk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty() {
        assert!(TwoFourTree::new().validate().is_ok());
    }

    #[test]
    fn test_validate_detects_bad_order() {
        let mut tree: TwoFourTree = (0..10).collect();
        let root = tree.root.unwrap();
        tree.arena[root].set_key(0, 1_000);

        match tree.validate() {
            Err(Error::InvariantViolation { .. }) => {}
            other => panic!("expected invariant violation, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_detects_bad_parent_link() {
        let mut tree: TwoFourTree = (0..10).collect();
        let root = tree.root.unwrap();
        let child = tree.arena[root].child(0);
        tree.arena[child].parent = None;

        let err = tree.validate().unwrap_err();
        assert!(err.to_string().contains("parent link"));
    }

    #[test]
    fn test_validate_detects_len_mismatch() {
        let mut tree: TwoFourTree = (0..10).collect();
        tree.len += 1;
        assert!(tree.validate().is_err());
    }
}
