// SPDX-License-Identifier: MIT OR Apache-2.0
//! Identifiers for web entities.
//!
//! Node, bridge and connection ids share a single per-web counter, so an id
//! is unique across all three collections and is never handed out twice.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Get the raw id value
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a node
    NodeId,
    "node"
);
entity_id!(
    /// Unique identifier for a bridge
    BridgeId,
    "bridge"
);
entity_id!(
    /// Unique identifier for a connection
    ConnectionId,
    "conn"
);

/// A vertex of the web: either a node or a bridge.
///
/// Variant order matters: nodes sort before bridges, which the path engine
/// relies on for a stable heap order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VertexId {
    /// A leaf node
    Node(NodeId),
    /// A junction bridge
    Bridge(BridgeId),
}

impl VertexId {
    /// The node id, if this vertex is a node
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            Self::Bridge(_) => None,
        }
    }

    /// The bridge id, if this vertex is a bridge
    pub fn as_bridge(&self) -> Option<BridgeId> {
        match self {
            Self::Bridge(id) => Some(*id),
            Self::Node(_) => None,
        }
    }
}

impl From<NodeId> for VertexId {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<BridgeId> for VertexId {
    fn from(id: BridgeId) -> Self {
        Self::Bridge(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => id.fmt(f),
            Self::Bridge(id) => id.fmt(f),
        }
    }
}

/// Any entity owned by a web
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    /// A node
    Node(NodeId),
    /// A bridge
    Bridge(BridgeId),
    /// A connection
    Connection(ConnectionId),
}

impl From<NodeId> for EntityId {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<BridgeId> for EntityId {
    fn from(id: BridgeId) -> Self {
        Self::Bridge(id)
    }
}

impl From<ConnectionId> for EntityId {
    fn from(id: ConnectionId) -> Self {
        Self::Connection(id)
    }
}

impl From<VertexId> for EntityId {
    fn from(id: VertexId) -> Self {
        match id {
            VertexId::Node(id) => Self::Node(id),
            VertexId::Bridge(id) => Self::Bridge(id),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => id.fmt(f),
            Self::Bridge(id) => id.fmt(f),
            Self::Connection(id) => id.fmt(f),
        }
    }
}

/// Identity of a web asset, stable across saves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebId(pub Uuid);

impl WebId {
    /// Create a new random web ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WebId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WebId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Monotonic allocator shared by every entity kind in a web.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self { next: 1 }
    }

    pub(crate) fn next_raw(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The next value that would be handed out
    pub(crate) fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = IdAllocator::new();
        let a = alloc.next_raw();
        let b = alloc.next_raw();
        assert!(b > a);
        assert_eq!(alloc.peek(), b + 1);
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(NodeId(3).to_string(), "node#3");
        assert_eq!(BridgeId(4).to_string(), "bridge#4");
        assert_eq!(ConnectionId(5).to_string(), "conn#5");
        assert_eq!(EntityId::from(VertexId::Bridge(BridgeId(9))).to_string(), "bridge#9");
    }

    #[test]
    fn test_vertex_order_puts_nodes_first() {
        assert!(VertexId::Node(NodeId(100)) < VertexId::Bridge(BridgeId(1)));
        assert!(VertexId::Bridge(BridgeId(1)) < VertexId::Bridge(BridgeId(2)));
    }
}
