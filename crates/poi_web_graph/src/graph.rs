// SPDX-License-Identifier: MIT OR Apache-2.0
//! The node web: owner of every node, bridge and connection.
//!
//! Records reference each other by id only. A connection stores the ids of
//! its two endpoints and each endpoint keeps the ids of the connections
//! touching it; every mutation keeps those two views in agreement.

use crate::bridge::Bridge;
use crate::connection::{validate_distance, Connection};
use crate::error::{InvariantViolation, Result, WebError};
use crate::id::{BridgeId, ConnectionId, EntityId, IdAllocator, NodeId, VertexId, WebId};
use crate::node::{Node, PointOfInterest};
use crate::path::PathFinder;
use crate::registry::{VariantKind, VariantRegistry, DEFAULT_BRIDGE_VARIANT, DEFAULT_NODE_VARIANT};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of [`NodeWeb::link_nodes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Bridge created between the two nodes
    pub bridge: BridgeId,
    /// Connection from the first node to the bridge
    pub first: ConnectionId,
    /// Connection from the second node to the bridge
    pub second: ConnectionId,
}

/// A web of points of interest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeWeb {
    /// Asset identity
    id: WebId,
    /// Web name
    name: String,
    /// Id allocator shared by all entity kinds
    next_id: IdAllocator,
    /// Leaf nodes
    nodes: IndexMap<NodeId, Node>,
    /// Junctions
    bridges: IndexMap<BridgeId, Bridge>,
    /// Node-bridge links
    connections: IndexMap<ConnectionId, Connection>,
}

impl NodeWeb {
    /// Create a new empty web
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: WebId::new(),
            name: name.into(),
            next_id: IdAllocator::new(),
            nodes: IndexMap::new(),
            bridges: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Asset identity of this web
    pub fn id(&self) -> WebId {
        self.id
    }

    /// Web name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the web
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Add an unconnected node of the default variant
    pub fn add_node(&mut self, point_of_interest: Option<PointOfInterest>) -> NodeId {
        self.insert_node(DEFAULT_NODE_VARIANT, point_of_interest)
    }

    /// Add an unconnected node of a registered variant
    pub fn add_node_of(
        &mut self,
        registry: &VariantRegistry,
        variant: &str,
        point_of_interest: Option<PointOfInterest>,
    ) -> Result<NodeId> {
        let variant = registry.resolve(variant, VariantKind::Node)?;
        Ok(self.insert_node(&variant.id, point_of_interest))
    }

    fn insert_node(&mut self, variant: &str, point_of_interest: Option<PointOfInterest>) -> NodeId {
        let id = NodeId(self.next_id.next_raw());
        tracing::debug!(node = %id, variant, poi = ?point_of_interest, "add node");
        self.nodes.insert(id, Node::new(id, variant, point_of_interest));
        id
    }

    /// Add a fresh node with the same variant and point of interest as an
    /// existing one. Connections are not copied.
    pub fn duplicate_node(&mut self, node_id: NodeId) -> Result<NodeId> {
        let source = self.nodes.get(&node_id).ok_or_else(|| WebError::unknown(node_id))?;
        let variant = source.variant.clone();
        let poi = source.point_of_interest.clone();
        Ok(self.insert_node(&variant, poi))
    }

    /// Bind, replace or clear a node's point of interest, returning the old one
    pub fn set_point_of_interest(
        &mut self,
        node_id: NodeId,
        point_of_interest: Option<PointOfInterest>,
    ) -> Result<Option<PointOfInterest>> {
        let node = self.nodes.get_mut(&node_id).ok_or_else(|| WebError::unknown(node_id))?;
        tracing::debug!(node = %node_id, poi = ?point_of_interest, "set point of interest");
        Ok(std::mem::replace(&mut node.point_of_interest, point_of_interest))
    }

    /// Remove a node together with every connection touching it
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<Node> {
        let node = self.nodes.shift_remove(&node_id).ok_or_else(|| WebError::unknown(node_id))?;

        for connection in self.take_connections(&node.connection_ids) {
            assert_eq!(connection.node_id, node_id, "{} listed by the wrong node", connection.id);
            self.unlist_from_bridge(connection.bridge_id, connection.id);
        }

        tracing::debug!(node = %node_id, removed_connections = node.connection_ids.len(), "remove node");
        self.debug_validate();
        Ok(node)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes bound to a given point of interest
    pub fn nodes_with_poi<'a>(&'a self, poi: &'a PointOfInterest) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .values()
            .filter(move |n| n.point_of_interest.as_ref() == Some(poi))
            .map(|n| n.id)
    }

    /// Bridges reachable from a node in one hop, with the connection distance
    pub fn neighbors_of(&self, node_id: NodeId) -> Result<impl Iterator<Item = (BridgeId, f64)> + '_> {
        let node = self.nodes.get(&node_id).ok_or_else(|| WebError::unknown(node_id))?;
        Ok(node.connection_ids.iter().map(move |cid| {
            let connection = &self.connections[cid];
            (connection.bridge_id, connection.distance)
        }))
    }

    // ------------------------------------------------------------------
    // Bridges
    // ------------------------------------------------------------------

    /// Add an unconnected bridge of the default variant
    pub fn add_bridge(&mut self) -> BridgeId {
        self.insert_bridge(DEFAULT_BRIDGE_VARIANT)
    }

    /// Add an unconnected bridge of a registered variant
    pub fn add_bridge_of(&mut self, registry: &VariantRegistry, variant: &str) -> Result<BridgeId> {
        let variant = registry.resolve(variant, VariantKind::Bridge)?;
        Ok(self.insert_bridge(&variant.id))
    }

    fn insert_bridge(&mut self, variant: &str) -> BridgeId {
        let id = BridgeId(self.next_id.next_raw());
        tracing::debug!(bridge = %id, variant, "add bridge");
        self.bridges.insert(id, Bridge::new(id, variant));
        id
    }

    /// Remove a bridge together with every connection touching it
    pub fn remove_bridge(&mut self, bridge_id: BridgeId) -> Result<Bridge> {
        let bridge = self
            .bridges
            .shift_remove(&bridge_id)
            .ok_or_else(|| WebError::unknown(bridge_id))?;

        for connection in self.take_connections(&bridge.connection_ids) {
            assert_eq!(connection.bridge_id, bridge_id, "{} listed by the wrong bridge", connection.id);
            self.unlist_from_node(connection.node_id, connection.id);
        }

        tracing::debug!(bridge = %bridge_id, removed_connections = bridge.connection_ids.len(), "remove bridge");
        self.debug_validate();
        Ok(bridge)
    }

    /// Get a bridge by ID
    pub fn bridge(&self, bridge_id: BridgeId) -> Option<&Bridge> {
        self.bridges.get(&bridge_id)
    }

    /// Get all bridges
    pub fn bridges(&self) -> impl Iterator<Item = &Bridge> {
        self.bridges.values()
    }

    /// Get all bridge IDs
    pub fn bridge_ids(&self) -> impl Iterator<Item = BridgeId> + '_ {
        self.bridges.keys().copied()
    }

    /// Get the number of bridges
    pub fn bridge_count(&self) -> usize {
        self.bridges.len()
    }

    /// Nodes reachable from a bridge in one hop, with the connection distance
    pub fn endpoints_of(&self, bridge_id: BridgeId) -> Result<impl Iterator<Item = (NodeId, f64)> + '_> {
        let bridge = self.bridges.get(&bridge_id).ok_or_else(|| WebError::unknown(bridge_id))?;
        Ok(bridge.connection_ids.iter().map(move |cid| {
            let connection = &self.connections[cid];
            (connection.node_id, connection.distance)
        }))
    }

    // ------------------------------------------------------------------
    // Connections
    // ------------------------------------------------------------------

    /// Connect a node to a bridge. Parallel connections are allowed.
    pub fn connect(&mut self, node_id: NodeId, bridge_id: BridgeId, distance: f64) -> Result<ConnectionId> {
        if !self.nodes.contains_key(&node_id) {
            return Err(WebError::unknown(node_id));
        }
        if !self.bridges.contains_key(&bridge_id) {
            return Err(WebError::unknown(bridge_id));
        }
        let distance = validate_distance(distance)?;

        let id = self.attach(node_id, bridge_id, distance);
        self.debug_validate();
        Ok(id)
    }

    /// Create a new bridge and connect both nodes to it
    pub fn link_nodes(
        &mut self,
        first: NodeId,
        second: NodeId,
        first_distance: f64,
        second_distance: f64,
    ) -> Result<Link> {
        if first == second {
            return Err(WebError::SelfLink(first));
        }
        for node_id in [first, second] {
            if !self.nodes.contains_key(&node_id) {
                return Err(WebError::unknown(node_id));
            }
        }
        let first_distance = validate_distance(first_distance)?;
        let second_distance = validate_distance(second_distance)?;

        let bridge = self.insert_bridge(DEFAULT_BRIDGE_VARIANT);
        let link = Link {
            bridge,
            first: self.attach(first, bridge, first_distance),
            second: self.attach(second, bridge, second_distance),
        };
        self.debug_validate();
        Ok(link)
    }

    fn attach(&mut self, node_id: NodeId, bridge_id: BridgeId, distance: f64) -> ConnectionId {
        let id = ConnectionId(self.next_id.next_raw());
        self.connections
            .insert(id, Connection::new(id, node_id, bridge_id, distance));
        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.connection_ids.insert(id);
        }
        if let Some(bridge) = self.bridges.get_mut(&bridge_id) {
            bridge.connection_ids.insert(id);
        }
        tracing::debug!(connection = %id, node = %node_id, bridge = %bridge_id, distance, "connect");
        id
    }

    /// Remove a connection and both back-references
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Result<Connection> {
        let connection = self
            .connections
            .shift_remove(&connection_id)
            .ok_or_else(|| WebError::unknown(connection_id))?;
        self.unlist_from_node(connection.node_id, connection_id);
        self.unlist_from_bridge(connection.bridge_id, connection_id);

        tracing::debug!(connection = %connection_id, "disconnect");
        self.debug_validate();
        Ok(connection)
    }

    /// Change the distance of an existing connection, returning the old value
    pub fn set_distance(&mut self, connection_id: ConnectionId, distance: f64) -> Result<f64> {
        let connection = self
            .connections
            .get_mut(&connection_id)
            .ok_or_else(|| WebError::unknown(connection_id))?;
        let distance = validate_distance(distance)?;
        tracing::debug!(connection = %connection_id, from = connection.distance, to = distance, "set distance");
        Ok(std::mem::replace(&mut connection.distance, distance))
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Whether a node or bridge with this id exists
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        match vertex {
            VertexId::Node(id) => self.nodes.contains_key(&id),
            VertexId::Bridge(id) => self.bridges.contains_key(&id),
        }
    }

    /// Connections touching a vertex, `None` if the vertex is absent
    pub(crate) fn incident(&self, vertex: VertexId) -> Option<impl Iterator<Item = &Connection> + '_> {
        let ids = match vertex {
            VertexId::Node(id) => &self.nodes.get(&id)?.connection_ids,
            VertexId::Bridge(id) => &self.bridges.get(&id)?.connection_ids,
        };
        Some(ids.iter().map(move |cid| &self.connections[cid]))
    }

    /// Route and distance queries over this web
    pub fn path_finder(&self) -> PathFinder<'_> {
        PathFinder::new(self)
    }

    // ------------------------------------------------------------------
    // Internal bookkeeping
    // ------------------------------------------------------------------

    /// Remove a removed vertex's connections in a single order-preserving pass
    fn take_connections(&mut self, ids: &IndexSet<ConnectionId>) -> Vec<Connection> {
        let mut taken = Vec::with_capacity(ids.len());
        self.connections.retain(|id, connection| {
            if ids.contains(id) {
                taken.push(connection.clone());
                false
            } else {
                true
            }
        });
        assert_eq!(taken.len(), ids.len(), "connections listed by an endpoint but not stored");
        taken
    }

    fn unlist_from_node(&mut self, node_id: NodeId, connection_id: ConnectionId) {
        let listed = self
            .nodes
            .get_mut(&node_id)
            .is_some_and(|node| node.connection_ids.shift_remove(&connection_id));
        assert!(listed, "{connection_id} was not listed by {node_id}");
    }

    fn unlist_from_bridge(&mut self, bridge_id: BridgeId, connection_id: ConnectionId) {
        let listed = self
            .bridges
            .get_mut(&bridge_id)
            .is_some_and(|bridge| bridge.connection_ids.shift_remove(&connection_id));
        assert!(listed, "{connection_id} was not listed by {bridge_id}");
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        if let Err(violation) = self.validate() {
            panic!("node web invariant broken: {violation}");
        }
    }

    #[cfg(not(debug_assertions))]
    fn debug_validate(&self) {}

    /// Check every structural invariant of the web
    pub fn validate(&self) -> std::result::Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        let mut max_id = 0;

        for (key, node) in &self.nodes {
            if *key != node.id {
                return Err(InvariantViolation::KeyMismatch { entity: node.id.into(), key: key.0 });
            }
            if !seen.insert(key.0) {
                return Err(InvariantViolation::DuplicateId(key.0));
            }
            max_id = max_id.max(key.0);
            for cid in &node.connection_ids {
                if !self.connections.get(cid).is_some_and(|c| c.node_id == node.id) {
                    return Err(InvariantViolation::StrayBackReference {
                        entity: node.id.into(),
                        connection: *cid,
                    });
                }
            }
        }

        for (key, bridge) in &self.bridges {
            if *key != bridge.id {
                return Err(InvariantViolation::KeyMismatch { entity: bridge.id.into(), key: key.0 });
            }
            if !seen.insert(key.0) {
                return Err(InvariantViolation::DuplicateId(key.0));
            }
            max_id = max_id.max(key.0);
            for cid in &bridge.connection_ids {
                if !self.connections.get(cid).is_some_and(|c| c.bridge_id == bridge.id) {
                    return Err(InvariantViolation::StrayBackReference {
                        entity: bridge.id.into(),
                        connection: *cid,
                    });
                }
            }
        }

        for (key, connection) in &self.connections {
            let id = connection.id;
            if *key != id {
                return Err(InvariantViolation::KeyMismatch { entity: EntityId::Connection(id), key: key.0 });
            }
            if !seen.insert(key.0) {
                return Err(InvariantViolation::DuplicateId(key.0));
            }
            max_id = max_id.max(key.0);

            let Some(node) = self.nodes.get(&connection.node_id) else {
                return Err(InvariantViolation::DanglingNode { connection: id, node: connection.node_id });
            };
            let Some(bridge) = self.bridges.get(&connection.bridge_id) else {
                return Err(InvariantViolation::DanglingBridge { connection: id, bridge: connection.bridge_id });
            };
            if !node.connection_ids.contains(&id) {
                return Err(InvariantViolation::MissingBackReference { connection: id, entity: node.id.into() });
            }
            if !bridge.connection_ids.contains(&id) {
                return Err(InvariantViolation::MissingBackReference { connection: id, entity: bridge.id.into() });
            }
            if validate_distance(connection.distance).is_err() {
                return Err(InvariantViolation::BadDistance { connection: id, distance: connection.distance });
            }
        }

        if !seen.is_empty() && self.next_id.peek() <= max_id {
            return Err(InvariantViolation::StaleAllocator { next: self.next_id.peek(), max: max_id });
        }

        Ok(())
    }
}

impl Default for NodeWeb {
    fn default() -> Self {
        Self::new("Node Web")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi(name: &str) -> Option<PointOfInterest> {
        Some(PointOfInterest::new(name))
    }

    #[test]
    fn test_add_and_connect() {
        let mut web = NodeWeb::new("Town");
        let tavern = web.add_node(poi("tavern"));
        let junction = web.add_bridge();
        let conn = web.connect(tavern, junction, 3.0).unwrap();

        assert_eq!(web.node_count(), 1);
        assert_eq!(web.bridge_count(), 1);
        assert_eq!(web.connection_count(), 1);
        assert_eq!(web.neighbors_of(tavern).unwrap().collect::<Vec<_>>(), vec![(junction, 3.0)]);
        assert_eq!(web.endpoints_of(junction).unwrap().collect::<Vec<_>>(), vec![(tavern, 3.0)]);
        assert_eq!(web.node(tavern).unwrap().connection_ids().collect::<Vec<_>>(), vec![conn]);
        web.validate().unwrap();
    }

    #[test]
    fn test_connect_rejects_unknown_and_negative() {
        let mut web = NodeWeb::default();
        let node = web.add_node(None);
        let bridge = web.add_bridge();

        assert_eq!(web.connect(node, bridge, -1.0), Err(WebError::InvalidDistance(-1.0)));
        assert_eq!(
            web.connect(NodeId(999), bridge, 1.0),
            Err(WebError::UnknownEntity(EntityId::Node(NodeId(999))))
        );
        assert_eq!(
            web.connect(node, BridgeId(999), 1.0),
            Err(WebError::UnknownEntity(EntityId::Bridge(BridgeId(999))))
        );
        assert_eq!(web.connection_count(), 0);
    }

    #[test]
    fn test_multi_edges_are_kept() {
        let mut web = NodeWeb::default();
        let node = web.add_node(None);
        let bridge = web.add_bridge();
        let a = web.connect(node, bridge, 1.0).unwrap();
        let b = web.connect(node, bridge, 1.0).unwrap();

        assert_ne!(a, b);
        assert_eq!(web.node(node).unwrap().degree(), 2);
        assert_eq!(web.bridge(bridge).unwrap().degree(), 2);
    }

    #[test]
    fn test_disconnect_removes_back_references() {
        let mut web = NodeWeb::default();
        let node = web.add_node(None);
        let bridge = web.add_bridge();
        let conn = web.connect(node, bridge, 2.0).unwrap();

        let removed = web.disconnect(conn).unwrap();
        assert_eq!(removed.distance, 2.0);
        assert_eq!(web.node(node).unwrap().degree(), 0);
        assert_eq!(web.bridge(bridge).unwrap().degree(), 0);
        assert_eq!(web.disconnect(conn), Err(WebError::UnknownEntity(EntityId::Connection(conn))));
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut web = NodeWeb::default();
        let hub = web.add_node(poi("hub"));
        let other = web.add_node(poi("other"));
        let x = web.add_bridge();
        let y = web.add_bridge();
        web.connect(hub, x, 1.0).unwrap();
        web.connect(hub, y, 1.0).unwrap();
        web.connect(hub, y, 5.0).unwrap();
        let kept = web.connect(other, x, 2.0).unwrap();

        let removed = web.remove_node(hub).unwrap();
        assert_eq!(removed.degree(), 3);
        assert_eq!(web.connection_count(), 1);
        assert!(web.connections().all(|c| !c.involves_node(hub)));
        assert_eq!(web.bridge(x).unwrap().connection_ids().collect::<Vec<_>>(), vec![kept]);
        assert_eq!(web.bridge(y).unwrap().degree(), 0);
        assert!(web.neighbors_of(hub).is_err());
        web.validate().unwrap();
    }

    #[test]
    fn test_cascade_keeps_connection_order() {
        let mut web = NodeWeb::default();
        let a = web.add_node(None);
        let b = web.add_node(None);
        let x = web.add_bridge();
        let y = web.add_bridge();
        let first = web.connect(a, x, 1.0).unwrap();
        web.connect(b, y, 1.0).unwrap();
        let second = web.connect(a, y, 2.0).unwrap();
        web.connect(b, x, 1.0).unwrap();
        let third = web.connect(a, x, 3.0).unwrap();

        web.remove_node(b).unwrap();
        assert_eq!(web.connections().map(|c| c.id).collect::<Vec<_>>(), vec![first, second, third]);
        assert_eq!(web.bridge(x).unwrap().connection_ids().collect::<Vec<_>>(), vec![first, third]);
        web.validate().unwrap();
    }

    #[test]
    fn test_remove_bridge_cascades() {
        let mut web = NodeWeb::default();
        let a = web.add_node(None);
        let b = web.add_node(None);
        let x = web.add_bridge();
        web.connect(a, x, 1.0).unwrap();
        web.connect(b, x, 1.0).unwrap();

        web.remove_bridge(x).unwrap();
        assert_eq!(web.connection_count(), 0);
        assert_eq!(web.node(a).unwrap().degree(), 0);
        assert_eq!(web.node(b).unwrap().degree(), 0);
        assert_eq!(web.remove_bridge(x), Err(WebError::UnknownEntity(EntityId::Bridge(x))));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut web = NodeWeb::default();
        let first = web.add_node(None);
        web.remove_node(first).unwrap();
        let second = web.add_node(None);
        let bridge = web.add_bridge();
        assert!(second > first);
        assert!(bridge.0 > second.0);
    }

    #[test]
    fn test_link_nodes_creates_bridge() {
        let mut web = NodeWeb::default();
        let a = web.add_node(poi("a"));
        let b = web.add_node(poi("b"));

        let link = web.link_nodes(a, b, 2.0, 3.0).unwrap();
        assert_eq!(web.bridge_count(), 1);
        assert_eq!(web.connection(link.first).unwrap().node_id, a);
        assert_eq!(web.connection(link.second).unwrap().node_id, b);
        assert_eq!(web.endpoints_of(link.bridge).unwrap().count(), 2);

        assert_eq!(web.link_nodes(a, a, 1.0, 1.0), Err(WebError::SelfLink(a)));
        assert!(web.link_nodes(a, b, 1.0, -2.0).is_err());
        assert_eq!(web.bridge_count(), 1);
    }

    #[test]
    fn test_point_of_interest_editing() {
        let mut web = NodeWeb::default();
        let node = web.add_node(None);
        assert!(!web.node(node).unwrap().is_assigned());

        let old = web.set_point_of_interest(node, poi("well")).unwrap();
        assert_eq!(old, None);
        let well = PointOfInterest::new("well");
        assert_eq!(web.nodes_with_poi(&well).collect::<Vec<_>>(), vec![node]);

        let copy = web.duplicate_node(node).unwrap();
        assert_eq!(web.node(copy).unwrap().point_of_interest, poi("well"));
        assert_eq!(web.node(copy).unwrap().degree(), 0);
        assert_eq!(web.nodes_with_poi(&well).count(), 2);
    }

    #[test]
    fn test_set_distance() {
        let mut web = NodeWeb::default();
        let node = web.add_node(None);
        let bridge = web.add_bridge();
        let conn = web.connect(node, bridge, 1.0).unwrap();

        assert_eq!(web.set_distance(conn, 4.5), Ok(1.0));
        assert_eq!(web.connection(conn).unwrap().distance, 4.5);
        assert_eq!(web.set_distance(conn, f64::NAN).unwrap_err().to_string(), "Invalid distance: NaN");
        assert_eq!(web.connection(conn).unwrap().distance, 4.5);
    }

    #[test]
    fn test_variants() {
        let registry = VariantRegistry::builtin();
        let mut web = NodeWeb::default();
        let waypoint = web.add_node_of(&registry, "waypoint", None).unwrap();
        let portal = web.add_bridge_of(&registry, "portal").unwrap();

        assert_eq!(web.node(waypoint).unwrap().variant, "waypoint");
        assert_eq!(web.bridge(portal).unwrap().variant, "portal");
        assert!(web.add_node_of(&registry, "portal", None).is_err());
        assert_eq!(web.node_count(), 1);
    }

    #[test]
    fn test_validate_detects_tampering() {
        let mut web = NodeWeb::default();
        let node = web.add_node(None);
        let bridge = web.add_bridge();
        let conn = web.connect(node, bridge, 1.0).unwrap();

        let mut broken = web.clone();
        broken.nodes.get_mut(&node).unwrap().connection_ids.clear();
        assert_eq!(
            broken.validate(),
            Err(InvariantViolation::MissingBackReference { connection: conn, entity: node.into() })
        );

        let mut broken = web.clone();
        broken.bridges.clear();
        assert!(matches!(broken.validate(), Err(InvariantViolation::DanglingBridge { .. })));

        let mut broken = web;
        broken.next_id = IdAllocator::new();
        assert!(matches!(broken.validate(), Err(InvariantViolation::StaleAllocator { .. })));
    }
}
