// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for web mutation and queries.

use crate::id::{BridgeId, ConnectionId, EntityId, NodeId};
use crate::registry::VariantKind;

/// Error returned by web operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WebError {
    /// Referenced a node, bridge or connection that is not in the web
    #[error("Unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// Distance was negative, NaN or above `MAX_DISTANCE`
    #[error("Invalid distance: {0}")]
    InvalidDistance(f64),

    /// Tried to link a node to itself
    #[error("Cannot link {0} to itself")]
    SelfLink(NodeId),

    /// Variant id is not registered for the requested kind
    #[error("Unknown {kind:?} variant: {id}")]
    UnknownVariant {
        /// Requested variant id
        id: String,
        /// Kind the variant was requested for
        kind: VariantKind,
    },
}

impl WebError {
    /// Shorthand for an unknown-entity error
    pub fn unknown(id: impl Into<EntityId>) -> Self {
        Self::UnknownEntity(id.into())
    }
}

/// Result type for web operations
pub type Result<T> = std::result::Result<T, WebError>;

/// A broken structural invariant, reported by [`crate::NodeWeb::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    /// Connection points at a node that does not exist
    #[error("{connection} references missing {node}")]
    DanglingNode {
        /// Offending connection
        connection: ConnectionId,
        /// Missing node
        node: NodeId,
    },

    /// Connection points at a bridge that does not exist
    #[error("{connection} references missing {bridge}")]
    DanglingBridge {
        /// Offending connection
        connection: ConnectionId,
        /// Missing bridge
        bridge: BridgeId,
    },

    /// An endpoint does not list a connection that touches it
    #[error("{connection} is missing from the connection set of {entity}")]
    MissingBackReference {
        /// Connection
        connection: ConnectionId,
        /// Endpoint lacking the back-reference
        entity: EntityId,
    },

    /// An entity lists a connection that does not exist or does not touch it
    #[error("{entity} lists {connection}, which does not connect to it")]
    StrayBackReference {
        /// Listing entity
        entity: EntityId,
        /// Listed connection
        connection: ConnectionId,
    },

    /// Stored distance is negative, NaN or above `MAX_DISTANCE`
    #[error("{connection} has invalid distance {distance}")]
    BadDistance {
        /// Connection
        connection: ConnectionId,
        /// Stored distance
        distance: f64,
    },

    /// A record is stored under a different key than its own id
    #[error("{entity} is stored under key {key}")]
    KeyMismatch {
        /// Record id
        entity: EntityId,
        /// Map key
        key: u64,
    },

    /// The same raw id is used by two entities
    #[error("id {0} is used by more than one entity")]
    DuplicateId(u64),

    /// The allocator would hand out an id that is already taken
    #[error("next id {next} does not exceed allocated id {max}")]
    StaleAllocator {
        /// Next id the allocator would return
        next: u64,
        /// Highest allocated id
        max: u64,
    },
}
