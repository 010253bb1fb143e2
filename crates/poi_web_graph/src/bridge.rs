// SPDX-License-Identifier: MIT OR Apache-2.0
//! Junction vertices.

use crate::id::{BridgeId, ConnectionId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A junction that fans connections out to any number of nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bridge {
    /// Unique instance ID
    pub id: BridgeId,
    /// Registered variant this bridge was created from
    pub variant: String,
    /// Connections touching this bridge
    pub(crate) connection_ids: IndexSet<ConnectionId>,
}

impl Bridge {
    pub(crate) fn new(id: BridgeId, variant: impl Into<String>) -> Self {
        Self {
            id,
            variant: variant.into(),
            connection_ids: IndexSet::new(),
        }
    }

    /// Connections touching this bridge
    pub fn connection_ids(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.connection_ids.iter().copied()
    }

    /// Number of connections touching this bridge
    pub fn degree(&self) -> usize {
        self.connection_ids.len()
    }
}
