// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command line definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default preferences file, relative to the working directory
pub const DEFAULT_PREFS_FILE: &str = "poi_web.prefs.ron";

/// Author and query point-of-interest node webs
#[derive(Parser, Debug)]
#[command(author, version, about = "POI Web: author and query point-of-interest node webs", long_about = None)]
pub struct Cli {
    /// Web asset to operate on. Defaults to the last opened web.
    #[arg(long, global = true)]
    pub web: Option<PathBuf>,

    /// Preferences file
    #[arg(long, global = true, default_value = DEFAULT_PREFS_FILE)]
    pub prefs: PathBuf,

    /// Emit JSON output instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Editor commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a new, empty web asset and make it the open web
    New {
        /// Where to write the asset
        path: PathBuf,
        /// Web name
        #[arg(long, default_value = "Node Web")]
        name: String,
    },

    /// Print the open web
    Show,

    /// Rename the open web
    Rename {
        /// New name
        name: String,
    },

    /// List the registered node and bridge variants
    Variants,

    /// Add a node
    AddNode {
        /// Point of interest to bind
        #[arg(long)]
        poi: Option<String>,
        /// Node variant
        #[arg(long)]
        variant: Option<String>,
    },

    /// Add a bridge
    AddBridge {
        /// Bridge variant
        #[arg(long)]
        variant: Option<String>,
    },

    /// Connect a node to a bridge
    Connect {
        /// Node id
        node: u64,
        /// Bridge id
        bridge: u64,
        /// Traversal distance
        #[arg(allow_negative_numbers = true)]
        distance: f64,
    },

    /// Remove a connection
    Disconnect {
        /// Connection id
        connection: u64,
    },

    /// Join two nodes through a new bridge
    Link {
        /// First node id
        first: u64,
        /// Second node id
        second: u64,
        /// Distance from the first node to the new bridge, defaults to the
        /// preferred link distance
        #[arg(long, allow_negative_numbers = true)]
        distance: Option<f64>,
        /// Distance from the second node to the new bridge, defaults to `--distance`
        #[arg(long, allow_negative_numbers = true)]
        second_distance: Option<f64>,
    },

    /// Change the distance of a connection
    SetDistance {
        /// Connection id
        connection: u64,
        /// New distance
        #[arg(allow_negative_numbers = true)]
        distance: f64,
    },

    /// Bind a point of interest to a node, or clear it when `--poi` is omitted
    Assign {
        /// Node id
        node: u64,
        /// Point of interest
        #[arg(long)]
        poi: Option<String>,
    },

    /// Copy a node's variant and point of interest onto a new node
    Duplicate {
        /// Node id
        node: u64,
    },

    /// Remove a node and its connections
    RemoveNode {
        /// Node id
        node: u64,
    },

    /// Remove a bridge and its connections
    RemoveBridge {
        /// Bridge id
        bridge: u64,
    },

    /// Shortest distance between two nodes
    Distance {
        /// Start node id
        from: u64,
        /// End node id
        to: u64,
    },

    /// Shortest route between two nodes
    Route {
        /// Start node id
        from: u64,
        /// End node id
        to: u64,
    },

    /// Closest node with a point of interest
    Nearest {
        /// Start node id
        from: u64,
    },
}

impl Command {
    /// Whether the command changes the web and must be saved afterwards
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Rename { .. }
                | Self::AddNode { .. }
                | Self::AddBridge { .. }
                | Self::Connect { .. }
                | Self::Disconnect { .. }
                | Self::Link { .. }
                | Self::SetDistance { .. }
                | Self::Assign { .. }
                | Self::Duplicate { .. }
                | Self::RemoveNode { .. }
                | Self::RemoveBridge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_connect_with_negative_distance() {
        let cli = Cli::try_parse_from(["poi_web", "--web", "town.ron", "connect", "1", "2", "-1"]).unwrap();
        assert_eq!(cli.web, Some(PathBuf::from("town.ron")));
        assert_eq!(cli.command, Command::Connect { node: 1, bridge: 2, distance: -1.0 });
        assert!(cli.command.is_mutation());
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["poi_web", "route", "1", "5", "--json"]).unwrap();
        assert_eq!(cli.prefs, PathBuf::from(DEFAULT_PREFS_FILE));
        assert!(cli.json);
        assert!(!cli.command.is_mutation());
    }
}
