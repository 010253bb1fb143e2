// SPDX-License-Identifier: MIT OR Apache-2.0
//! Point-of-interest node web for `OrdoPlay`.
//!
//! A node web is a weighted graph used by AI and gameplay logic to measure
//! travel between world locations. It has two kinds of vertex:
//! - Nodes, leaf stops bound to at most one point of interest
//! - Bridges, junctions that fan out to any number of nodes
//!
//! ## Architecture
//!
//! The web owns every entity in id-keyed maps:
//! - Connections only ever join one node and one bridge
//! - Both endpoints list the connections touching them
//! - Removing a vertex cascades to its connections
//! - Route queries run Dijkstra over the current web without mutating it

pub mod id;
pub mod error;
pub mod node;
pub mod bridge;
pub mod connection;
pub mod graph;
pub mod path;
pub mod registry;
pub mod snapshot;
pub mod shared;

pub use id::{BridgeId, ConnectionId, EntityId, NodeId, VertexId, WebId};
pub use error::{InvariantViolation, Result, WebError};
pub use node::{Node, PointOfInterest};
pub use bridge::Bridge;
pub use connection::{Connection, MAX_DISTANCE};
pub use graph::{Link, NodeWeb};
pub use path::{PathFinder, Route};
pub use registry::{Variant, VariantKind, VariantRegistry};
pub use snapshot::SnapshotError;
pub use shared::SharedWeb;
