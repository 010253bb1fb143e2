// SPDX-License-Identifier: MIT OR Apache-2.0
//! The open web and the asset file backing it.

use crate::preferences::Preferences;
use poi_web_graph::{NodeWeb, SnapshotError, VariantRegistry};
use std::path::{Path, PathBuf};

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No web given and none remembered
    #[error("No node web is open; pass --web or create one with `new`")]
    NoWebOpen,

    /// Refusing to overwrite an existing asset
    #[error("A file already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Loading or saving the web failed
    #[error("{}: {source}", path.display())]
    Snapshot {
        /// Asset path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: SnapshotError,
    },
}

/// A single open web, saved back to its asset after each edit
#[derive(Debug)]
pub struct EditorSession {
    web: NodeWeb,
    path: PathBuf,
    registry: VariantRegistry,
}

impl EditorSession {
    /// Create a new web asset at `path`
    pub fn create(path: &Path, name: &str, prefs: &mut Preferences) -> Result<Self, SessionError> {
        if path.exists() {
            return Err(SessionError::AlreadyExists(path.to_path_buf()));
        }
        let session = Self {
            web: NodeWeb::new(name),
            path: path.to_path_buf(),
            registry: VariantRegistry::builtin(),
        };
        session.save()?;
        prefs.remember(path);
        tracing::info!("Created node web '{}' at {}", name, path.display());
        Ok(session)
    }

    /// Open an existing web asset
    pub fn open(path: &Path, prefs: &mut Preferences) -> Result<Self, SessionError> {
        let web = NodeWeb::load(path).map_err(|source| SessionError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
        prefs.remember(path);
        tracing::info!("Opened node web '{}' from {}", web.name(), path.display());
        Ok(Self {
            web,
            path: path.to_path_buf(),
            registry: VariantRegistry::builtin(),
        })
    }

    /// Open `path` if given, otherwise the last opened web.
    ///
    /// A remembered web that can no longer be loaded is forgotten.
    pub fn resume(path: Option<&Path>, prefs: &mut Preferences) -> Result<Self, SessionError> {
        if let Some(path) = path {
            return Self::open(path, prefs);
        }
        let last = prefs.last_opened.clone().ok_or(SessionError::NoWebOpen)?;
        match Self::open(&last, prefs) {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::warn!("Forgetting last opened web: {}", e);
                prefs.forget();
                Err(e)
            }
        }
    }

    /// Write the web back to its asset
    pub fn save(&self) -> Result<(), SessionError> {
        self.web.save(&self.path).map_err(|source| SessionError::Snapshot {
            path: self.path.clone(),
            source,
        })
    }

    /// The open web
    pub fn web(&self) -> &NodeWeb {
        &self.web
    }

    /// The open web, for editing
    pub fn web_mut(&mut self) -> &mut NodeWeb {
        &mut self.web
    }

    /// Asset path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Split borrow of the web and the registry
    pub fn web_and_registry(&mut self) -> (&mut NodeWeb, &VariantRegistry) {
        (&mut self.web, &self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_open_and_resume() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("town.ron");
        let mut prefs = Preferences::default();

        let mut session = EditorSession::create(&path, "Town", &mut prefs).unwrap();
        assert_eq!(prefs.last_opened.as_deref(), Some(path.as_path()));
        session.web_mut().add_node(None);
        session.save().unwrap();

        let resumed = EditorSession::resume(None, &mut prefs).unwrap();
        assert_eq!(resumed.web().name(), "Town");
        assert_eq!(resumed.web().node_count(), 1);

        assert!(matches!(
            EditorSession::create(&path, "Again", &mut prefs),
            Err(SessionError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_resume_without_history() {
        let mut prefs = Preferences::default();
        assert!(matches!(EditorSession::resume(None, &mut prefs), Err(SessionError::NoWebOpen)));
    }

    #[test]
    fn test_missing_last_opened_is_forgotten() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = Preferences::default();
        prefs.remember(&dir.path().join("deleted.ron"));

        assert!(matches!(
            EditorSession::resume(None, &mut prefs),
            Err(SessionError::Snapshot { .. })
        ));
        assert_eq!(prefs.last_opened, None);
    }
}
