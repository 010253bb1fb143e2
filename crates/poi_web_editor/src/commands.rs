// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command execution against an editor session.
//!
//! Every command produces a [`Report`] holding both a human-readable message
//! and a JSON payload; `main` picks which one to print.

use crate::cli::Command;
use crate::preferences::Preferences;
use crate::session::{EditorSession, SessionError};
use poi_web_graph::{
    BridgeId, ConnectionId, NodeId, NodeWeb, PointOfInterest, Route, VariantKind, VariantRegistry, WebError,
};
use serde_json::{json, Value};
use std::path::Path;

/// Error type for command execution
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Opening or saving the web failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The web rejected the operation
    #[error(transparent)]
    Web(#[from] WebError),
}

/// Outcome of a command
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Human-readable summary
    pub message: String,
    /// Machine-readable payload
    pub data: Value,
}

impl Report {
    fn new(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Execute a command. Mutating commands save the web when they succeed.
pub fn execute(command: &Command, web: Option<&Path>, prefs: &mut Preferences) -> Result<Report, CommandError> {
    match command {
        Command::New { path, name } => {
            let session = EditorSession::create(path, name, prefs)?;
            Ok(Report::new(
                format!("Created '{}' at {}", name, path.display()),
                json!({ "web": session.web().id().to_string(), "path": path }),
            ))
        }
        Command::Variants => Ok(variants(&VariantRegistry::builtin())),
        _ => {
            let mut session = EditorSession::resume(web, prefs)?;
            let report = apply(&mut session, command, prefs)?;
            if command.is_mutation() {
                session.save()?;
                tracing::info!("Saved {}", session.path().display());
            }
            Ok(report)
        }
    }
}

fn apply(session: &mut EditorSession, command: &Command, prefs: &Preferences) -> Result<Report, CommandError> {
    let report = match command {
        Command::New { .. } | Command::Variants => unreachable!("handled without a session"),

        Command::Show => show(session.web()),

        Command::Rename { name } => {
            session.web_mut().rename(name.clone());
            Report::new(format!("Renamed web to '{name}'"), json!({ "name": name }))
        }

        Command::AddNode { poi, variant } => {
            let poi = poi.clone().map(PointOfInterest::new);
            let (web, registry) = session.web_and_registry();
            let id = match variant {
                Some(variant) => web.add_node_of(registry, variant, poi)?,
                None => web.add_node(poi),
            };
            Report::new(format!("Added {id}"), json!({ "node": id.value() }))
        }

        Command::AddBridge { variant } => {
            let (web, registry) = session.web_and_registry();
            let id = match variant {
                Some(variant) => web.add_bridge_of(registry, variant)?,
                None => web.add_bridge(),
            };
            Report::new(format!("Added {id}"), json!({ "bridge": id.value() }))
        }

        Command::Connect { node, bridge, distance } => {
            let id = session.web_mut().connect(NodeId(*node), BridgeId(*bridge), *distance)?;
            Report::new(
                format!("Connected node#{node} to bridge#{bridge} as {id} ({distance})"),
                json!({ "connection": id.value() }),
            )
        }

        Command::Disconnect { connection } => {
            let removed = session.web_mut().disconnect(ConnectionId(*connection))?;
            Report::new(
                format!("Removed {} between {} and {}", removed.id, removed.node_id, removed.bridge_id),
                json!({ "connection": removed.id.value() }),
            )
        }

        Command::Link { first, second, distance, second_distance } => {
            let first_distance = distance.unwrap_or(prefs.default_link_distance);
            let second_distance = second_distance.unwrap_or(first_distance);
            let link = session
                .web_mut()
                .link_nodes(NodeId(*first), NodeId(*second), first_distance, second_distance)?;
            Report::new(
                format!("Linked node#{first} and node#{second} through {}", link.bridge),
                json!({
                    "bridge": link.bridge.value(),
                    "connections": [link.first.value(), link.second.value()],
                }),
            )
        }

        Command::SetDistance { connection, distance } => {
            let old = session.web_mut().set_distance(ConnectionId(*connection), *distance)?;
            Report::new(
                format!("conn#{connection} distance {old} -> {distance}"),
                json!({ "connection": connection, "old": old, "new": distance }),
            )
        }

        Command::Assign { node, poi } => {
            let poi = poi.clone().map(PointOfInterest::new);
            let message = match &poi {
                Some(poi) => format!("Assigned '{poi}' to node#{node}"),
                None => format!("Cleared point of interest of node#{node}"),
            };
            let old = session.web_mut().set_point_of_interest(NodeId(*node), poi)?;
            Report::new(message, json!({ "node": node, "previous": old.map(|p| p.0) }))
        }

        Command::Duplicate { node } => {
            let id = session.web_mut().duplicate_node(NodeId(*node))?;
            Report::new(format!("Duplicated node#{node} as {id}"), json!({ "node": id.value() }))
        }

        Command::RemoveNode { node } => {
            let removed = session.web_mut().remove_node(NodeId(*node))?;
            Report::new(
                format!("Removed {} and {} connection(s)", removed.id, removed.degree()),
                json!({ "node": node, "connections_removed": removed.degree() }),
            )
        }

        Command::RemoveBridge { bridge } => {
            let removed = session.web_mut().remove_bridge(BridgeId(*bridge))?;
            Report::new(
                format!("Removed {} and {} connection(s)", removed.id, removed.degree()),
                json!({ "bridge": bridge, "connections_removed": removed.degree() }),
            )
        }

        Command::Distance { from, to } => {
            match session.web().path_finder().shortest_distance(NodeId(*from), NodeId(*to))? {
                Some(d) => Report::new(format!("{d}"), json!({ "reachable": true, "distance": d })),
                None => Report::new("not reachable", json!({ "reachable": false })),
            }
        }

        Command::Route { from, to } => {
            match session.web().path_finder().shortest_route(NodeId(*from), NodeId(*to))? {
                Some(route) => route_report(&route),
                None => Report::new("not reachable", json!({ "reachable": false })),
            }
        }

        Command::Nearest { from } => match session.web().path_finder().nearest_with_poi(NodeId(*from))? {
            Some((id, d)) => {
                let label = session.web().node(id).map(|n| n.label()).unwrap_or_default();
                Report::new(
                    format!("{id} '{label}' at {d}"),
                    json!({ "found": true, "node": id.value(), "poi": label, "distance": d }),
                )
            }
            None => Report::new("no reachable point of interest", json!({ "found": false })),
        },
    };
    Ok(report)
}

fn route_report(route: &Route) -> Report {
    let stops: Vec<String> = route.stops.iter().map(ToString::to_string).collect();
    Report::new(
        format!("{} ({})", stops.join(" -> "), route.distance),
        json!({ "reachable": true, "distance": route.distance, "stops": stops }),
    )
}

fn variants(registry: &VariantRegistry) -> Report {
    let mut lines = Vec::new();
    let mut data = Vec::new();
    for (kind, title) in [(VariantKind::Node, "Nodes"), (VariantKind::Bridge, "Bridges")] {
        lines.push(format!("{title}:"));
        for variant in registry.variants_of(kind) {
            lines.push(format!("  {:<12} {} - {}", variant.id, variant.name, variant.description));
            data.push(json!({ "id": variant.id, "name": variant.name, "kind": format!("{kind:?}") }));
        }
    }
    Report::new(lines.join("\n"), Value::Array(data))
}

fn show(web: &NodeWeb) -> Report {
    let header = format!(
        "{} ({} nodes, {} bridges, {} connections)",
        web.name(),
        web.node_count(),
        web.bridge_count(),
        web.connection_count()
    );
    let lines: Vec<String> = std::iter::once(header)
        .chain(web.nodes().map(|n| format!("  {} [{}] {}", n.id, n.variant, n.label())))
        .chain(web.bridges().map(|b| format!("  {} [{}]", b.id, b.variant)))
        .chain(
            web.connections()
                .map(|c| format!("  {}: {} <-> {} ({})", c.id, c.node_id, c.bridge_id, c.distance)),
        )
        .collect();

    let nodes: Vec<Value> = web
        .nodes()
        .map(|n| {
            json!({
                "id": n.id.value(),
                "variant": n.variant,
                "poi": n.point_of_interest.as_ref().map(PointOfInterest::as_str),
                "connections": n.connection_ids().map(|c| c.value()).collect::<Vec<_>>(),
            })
        })
        .collect();
    let bridges: Vec<Value> = web
        .bridges()
        .map(|b| {
            json!({
                "id": b.id.value(),
                "variant": b.variant,
                "connections": b.connection_ids().map(|c| c.value()).collect::<Vec<_>>(),
            })
        })
        .collect();
    let connections: Vec<Value> = web
        .connections()
        .map(|c| {
            json!({
                "id": c.id.value(),
                "node": c.node_id.value(),
                "bridge": c.bridge_id.value(),
                "distance": c.distance,
            })
        })
        .collect();

    Report::new(
        lines.join("\n"),
        json!({
            "id": web.id().to_string(),
            "name": web.name(),
            "nodes": nodes,
            "bridges": bridges,
            "connections": connections,
        }),
    )
}
