// SPDX-License-Identifier: MIT OR Apache-2.0
//! RON persistence for node webs.
//!
//! Loading always re-checks the structural invariants, since a file on disk
//! may have been edited by hand.

use crate::error::InvariantViolation;
use crate::graph::NodeWeb;
use std::path::Path;

/// Error when saving or loading a web
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Input was not valid RON for a web
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Parsed web breaks a structural invariant
    #[error("Corrupt node web: {0}")]
    Corrupt(#[from] InvariantViolation),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NodeWeb {
    /// Serialize to RON format
    pub fn to_ron(&self) -> Result<String, SnapshotError> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Deserialize from RON format and validate
    pub fn from_ron(s: &str) -> Result<Self, SnapshotError> {
        let web: Self = ron::from_str(s)?;
        web.validate()?;
        Ok(web)
    }

    /// Save web to file
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let ron_str = self.to_ron()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, ron_str)?;
        tracing::debug!(path = %path.display(), web = %self.id(), "saved node web");
        Ok(())
    }

    /// Load web from file
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path)?;
        let web = Self::from_ron(&contents)?;
        tracing::debug!(
            path = %path.display(),
            nodes = web.node_count(),
            bridges = web.bridge_count(),
            connections = web.connection_count(),
            "loaded node web"
        );
        Ok(web)
    }
}
