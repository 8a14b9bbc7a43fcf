//! Rebalancing events and the optional observer hook.

use std::fmt;

use crate::common::config::Key;
use crate::common::NodeId;

/// Side a rotation borrowed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A single restructuring step taken by the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebalanceEvent {
    /// A 4-node was split and `median` pushed into `parent`.
    Split {
        node: NodeId,
        median: Key,
        parent: NodeId,
    },

    /// The root was split; the tree is one level taller.
    RootGrown { new_root: NodeId },

    /// `node` borrowed a key through its parent from the sibling on `from`.
    Rotated { node: NodeId, from: Side, key: Key },

    /// `node` absorbed its right sibling and the `separator` between them.
    Merged { node: NodeId, separator: Key },

    /// The root was emptied by a merge; the tree is one level shorter.
    RootShrunk { new_root: NodeId },
}

impl fmt::Display for RebalanceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebalanceEvent::Split { node, median, parent } => {
                write!(f, "split {} pushing {} into {}", node, median, parent)
            }
            RebalanceEvent::RootGrown { new_root } => write!(f, "root grew to {}", new_root),
            RebalanceEvent::Rotated { node, from, key } => {
                let side = match from {
                    Side::Left => "left",
                    Side::Right => "right",
                };
                write!(f, "rotated {} into {} from {} sibling", key, node, side)
            }
            RebalanceEvent::Merged { node, separator } => {
                write!(f, "merged into {} around {}", node, separator)
            }
            RebalanceEvent::RootShrunk { new_root } => write!(f, "root shrank to {}", new_root),
        }
    }
}

/// Caller-supplied hook invoked at every rebalancing event.
pub type Observer = Box<dyn Fn(&RebalanceEvent) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = RebalanceEvent::Rotated {
            node: NodeId::new(4),
            from: Side::Left,
            key: 17,
        };
        assert_eq!(event.to_string(), "rotated 17 into Node(4) from left sibling");

        let event = RebalanceEvent::Split {
            node: NodeId::new(1),
            median: 20,
            parent: NodeId::new(0),
        };
        assert_eq!(event.to_string(), "split Node(1) pushing 20 into Node(0)");
    }
}
