// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shortest distance and route queries.
//!
//! Nodes and bridges are both vertices; every connection is an undirected
//! edge weighted by its distance. Distances are non-negative, so a plain
//! Dijkstra search over a binary heap is exact.

use crate::error::{Result, WebError};
use crate::graph::NodeWeb;
use crate::id::{BridgeId, NodeId, VertexId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// A shortest path between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Visited vertices, alternating node and bridge, starting and ending on a node
    pub stops: Vec<VertexId>,
    /// Total distance along the route
    pub distance: f64,
}

impl Route {
    /// Nodes visited along the route, in order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.stops.iter().filter_map(VertexId::as_node)
    }

    /// Number of connections traversed
    pub fn hops(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }
}

/// Heap entry. Ordered so that `BinaryHeap` pops the smallest distance
/// first, and the smallest vertex id among equal distances.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    vertex: VertexId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// How a vertex was reached
#[derive(Debug, Clone, Copy)]
struct Step {
    from: VertexId,
    key: (BridgeId, NodeId),
}

/// Outcome of one search run
#[derive(Debug, Default)]
struct Search {
    /// Best known distance per vertex
    best: HashMap<VertexId, f64>,
    /// Predecessor per reached vertex
    came_from: HashMap<VertexId, Step>,
    /// Settled vertices in the order they were finalized
    settled: IndexMap<VertexId, f64>,
}

impl Search {
    fn route_to(&self, target: VertexId) -> Option<Route> {
        let distance = *self.settled.get(&target)?;
        let mut stops = vec![target];
        let mut current = target;
        while let Some(step) = self.came_from.get(&current) {
            stops.push(step.from);
            current = step.from;
        }
        stops.reverse();
        Some(Route { stops, distance })
    }

    /// Whether `step` should replace the current predecessor of `vertex`
    fn prefers(&self, vertex: VertexId, step: Step) -> bool {
        self.came_from.get(&vertex).is_some_and(|current| step.key < current.key)
    }

    /// Whether the predecessor chain starting at `from` passes through `vertex`
    fn leads_back_to(&self, from: VertexId, vertex: VertexId) -> bool {
        let mut current = from;
        loop {
            if current == vertex {
                return true;
            }
            match self.came_from.get(&current) {
                Some(step) => current = step.from,
                None => return false,
            }
        }
    }
}

/// Read-only route queries over a borrowed web
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'a> {
    web: &'a NodeWeb,
}

impl<'a> PathFinder<'a> {
    /// Create a path finder for a web
    pub fn new(web: &'a NodeWeb) -> Self {
        Self { web }
    }

    /// Minimum total distance between two nodes, `None` if unreachable
    pub fn shortest_distance(&self, from: NodeId, to: NodeId) -> Result<Option<f64>> {
        Ok(self.shortest_route(from, to)?.map(|route| route.distance))
    }

    /// Shortest route between two nodes, `None` if unreachable.
    ///
    /// Among equally short routes the one whose connections have the lowest
    /// `(bridge_id, node_id)` keys wins, so repeated queries on an unchanged
    /// web give the same answer.
    pub fn shortest_route(&self, from: NodeId, to: NodeId) -> Result<Option<Route>> {
        self.require(from)?;
        self.require(to)?;

        let target = VertexId::Node(to);
        let search = self.search(from, Some(target));
        let route = search.route_to(target);

        tracing::trace!(
            %from,
            %to,
            settled = search.settled.len(),
            distance = route.as_ref().map(|r| r.distance),
            "shortest route"
        );
        Ok(route)
    }

    /// Distance from one node to every node reachable from it, nearest first.
    /// The source itself is included at distance zero.
    pub fn distances_from(&self, from: NodeId) -> Result<IndexMap<NodeId, f64>> {
        self.require(from)?;
        let search = self.search(from, None);
        Ok(search
            .settled
            .iter()
            .filter_map(|(vertex, distance)| vertex.as_node().map(|id| (id, *distance)))
            .collect())
    }

    /// Closest other node that has a point of interest bound to it
    pub fn nearest_with_poi(&self, from: NodeId) -> Result<Option<(NodeId, f64)>> {
        let distances = self.distances_from(from)?;
        Ok(distances.into_iter().find(|(id, _)| {
            *id != from && self.web.node(*id).is_some_and(|node| node.is_assigned())
        }))
    }

    fn require(&self, node: NodeId) -> Result<()> {
        if self.web.contains_vertex(VertexId::Node(node)) {
            Ok(())
        } else {
            Err(WebError::unknown(node))
        }
    }

    fn search(&self, source: NodeId, target: Option<VertexId>) -> Search {
        let source = VertexId::Node(source);
        let mut search = Search::default();
        let mut open = BinaryHeap::new();

        search.best.insert(source, 0.0);
        open.push(Frontier { distance: 0.0, vertex: source });

        // Once the target settles, vertices at the same distance are still
        // expanded: a zero-distance connection from one of them can offer the
        // target a predecessor with a lower key.
        let mut horizon: Option<f64> = None;

        while let Some(Frontier { distance, vertex }) = open.pop() {
            if horizon.is_some_and(|limit| distance > limit) {
                break;
            }
            if search.settled.contains_key(&vertex) {
                continue;
            }
            search.settled.insert(vertex, distance);
            if Some(vertex) == target {
                horizon = Some(distance);
            }

            let Some(incident) = self.web.incident(vertex) else {
                unreachable!("{vertex} reached by search but missing from the web");
            };

            for connection in incident {
                let next = match vertex {
                    VertexId::Node(_) => VertexId::Bridge(connection.bridge_id),
                    VertexId::Bridge(_) => VertexId::Node(connection.node_id),
                };
                let candidate = distance + connection.distance;
                let step = Step { from: vertex, key: connection.tie_key() };

                if let Some(&settled) = search.settled.get(&next) {
                    if candidate == settled && search.prefers(next, step) && !search.leads_back_to(vertex, next) {
                        search.came_from.insert(next, step);
                    }
                    continue;
                }

                match search.best.get(&next) {
                    Some(&known) if candidate > known => {}
                    Some(&known) if candidate == known => {
                        if search.prefers(next, step) {
                            search.came_from.insert(next, step);
                        }
                    }
                    _ => {
                        search.best.insert(next, candidate);
                        search.came_from.insert(next, step);
                        open.push(Frontier { distance: candidate, vertex: next });
                    }
                }
            }
        }

        search
    }
}
