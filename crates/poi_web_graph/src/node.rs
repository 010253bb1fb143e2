// SPDX-License-Identifier: MIT OR Apache-2.0
//! Leaf node definitions.

use crate::id::{ConnectionId, NodeId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a point of interest owned by the game world.
///
/// The web stores and returns this value but never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointOfInterest(pub String);

impl PointOfInterest {
    /// Create a reference from any string-like key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw reference key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A leaf vertex in the web
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Registered variant this node was created from
    pub variant: String,
    /// Bound point of interest, `None` while unassigned
    pub point_of_interest: Option<PointOfInterest>,
    /// Connections touching this node
    pub(crate) connection_ids: IndexSet<ConnectionId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, variant: impl Into<String>, point_of_interest: Option<PointOfInterest>) -> Self {
        Self {
            id,
            variant: variant.into(),
            point_of_interest,
            connection_ids: IndexSet::new(),
        }
    }

    /// Connections touching this node
    pub fn connection_ids(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.connection_ids.iter().copied()
    }

    /// Number of connections touching this node
    pub fn degree(&self) -> usize {
        self.connection_ids.len()
    }

    /// Whether a point of interest has been bound
    pub fn is_assigned(&self) -> bool {
        self.point_of_interest.is_some()
    }

    /// Display label, the point of interest or a placeholder
    pub fn label(&self) -> String {
        match &self.point_of_interest {
            Some(poi) => poi.to_string(),
            None => "No PoI".to_string(),
        }
    }
}
