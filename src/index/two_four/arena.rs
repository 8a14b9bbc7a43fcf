//! NodeArena - slot storage for tree nodes.
//!
//! Nodes live in a growable `Vec` and refer to one another by [`NodeId`].
//! Released slots go on a free list and are reused by the next allocation.

use std::ops::{Index, IndexMut};

use crate::common::NodeId;
use crate::index::two_four::node::Node;

/// Growable table of nodes addressed by [`NodeId`].
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │                  NodeArena                   │
/// │  nodes: Vec<Node>                            │
/// │   [Node0] [Node1] [free] [Node3] [free] ...  │
/// │  free_list: Vec<NodeId>  (LIFO, reused first)│
/// └──────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeArena {
    /// All slots ever allocated, live or released.
    nodes: Vec<Node>,

    /// Stack of released slot IDs.
    free_list: Vec<NodeId>,
}

impl NodeArena {
    /// Create an arena with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_list: Vec::new(),
        }
    }

    /// Store `node` and return its ID, reusing a released slot if one exists.
    pub fn allocate(&mut self, node: Node) -> NodeId {
        if let Some(node_id) = self.free_list.pop() {
            self.nodes[node_id.0] = node;
            return node_id;
        }

        let node_id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        node_id
    }

    /// Release a slot and return the node it held.
    ///
    /// The slot's contents stay in place until reallocated; callers must not
    /// hold on to `node_id` afterwards.
    pub fn release(&mut self, node_id: NodeId) -> Node {
        debug_assert!(!self.free_list.contains(&node_id), "double release of {}", node_id);
        self.free_list.push(node_id);
        self.nodes[node_id.0]
    }

    /// Number of slots currently holding a node.
    pub fn live_count(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Number of slots the arena can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Drop every node, keeping the allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, node_id: NodeId) -> &Node {
        &self.nodes[node_id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, node_id: NodeId) -> &mut Node {
        &mut self.nodes[node_id.0]
    }
}
