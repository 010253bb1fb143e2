// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the web.

use crate::error::{Result, WebError};
use crate::id::{BridgeId, ConnectionId, NodeId};
use serde::{Deserialize, Serialize};

/// A weighted link between one node and one bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Traversal distance, between zero and `MAX_DISTANCE`
    pub distance: f64,
    /// Node endpoint
    pub node_id: NodeId,
    /// Bridge endpoint
    pub bridge_id: BridgeId,
}

impl Connection {
    pub(crate) fn new(id: ConnectionId, node_id: NodeId, bridge_id: BridgeId, distance: f64) -> Self {
        Self {
            id,
            distance,
            node_id,
            bridge_id,
        }
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.node_id == node_id
    }

    /// Check if this connection involves a specific bridge
    pub fn involves_bridge(&self, bridge_id: BridgeId) -> bool {
        self.bridge_id == bridge_id
    }

    /// Key used to break ties between equally short routes
    pub fn tie_key(&self) -> (BridgeId, NodeId) {
        (self.bridge_id, self.node_id)
    }
}

/// Largest accepted connection distance. Route totals stay far below the
/// `f64` overflow point no matter how many connections they add up.
pub const MAX_DISTANCE: f64 = 1.0e15;

/// Check that a distance is usable as an edge weight
pub fn validate_distance(distance: f64) -> Result<f64> {
    if (0.0..=MAX_DISTANCE).contains(&distance) {
        Ok(distance)
    } else {
        Err(WebError::InvalidDistance(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_distance() {
        assert_eq!(validate_distance(0.0), Ok(0.0));
        assert_eq!(validate_distance(12.5), Ok(12.5));
        assert_eq!(validate_distance(-1.0), Err(WebError::InvalidDistance(-1.0)));
        assert!(validate_distance(f64::NAN).is_err());
        assert!(validate_distance(f64::INFINITY).is_err());
        assert_eq!(validate_distance(MAX_DISTANCE), Ok(MAX_DISTANCE));
        assert_eq!(validate_distance(f64::MAX), Err(WebError::InvalidDistance(f64::MAX)));
    }

    #[test]
    fn test_tie_key_orders_by_bridge_first() {
        let a = Connection::new(ConnectionId(10), NodeId(9), BridgeId(2), 1.0);
        let b = Connection::new(ConnectionId(11), NodeId(1), BridgeId(3), 1.0);
        assert!(a.tie_key() < b.tie_key());
        assert!(a.involves_node(NodeId(9)));
        assert!(!a.involves_bridge(BridgeId(3)));
    }
}
