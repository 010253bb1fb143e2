// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tool preferences persisted between runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current preferences format version
pub const PREFERENCES_FORMAT_VERSION: u32 = 1;

/// Error when reading or writing preferences
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid preferences file
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Preferences of the editing tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Format version
    pub version: u32,
    /// Web opened most recently
    pub last_opened: Option<PathBuf>,
    /// Distance used by `link` when none is given
    pub default_link_distance: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_FORMAT_VERSION,
            last_opened: None,
            default_link_distance: 0.0,
        }
    }
}

impl Preferences {
    /// Load preferences, falling back to defaults when the file is missing
    /// or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!("Ignoring preferences at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load preferences from file
    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    /// Save preferences to file
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        let ron_str = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, ron_str)?;
        Ok(())
    }

    /// Save preferences only if they differ from `loaded`, the copy read at
    /// startup. Returns whether the file was written.
    pub fn save_if_changed(&self, loaded: &Self, path: &Path) -> Result<bool, PreferencesError> {
        if self == loaded {
            return Ok(false);
        }
        self.save(path)?;
        Ok(true)
    }

    /// Remember a web as the most recently opened one
    pub fn remember(&mut self, path: &Path) {
        self.last_opened = Some(path.to_path_buf());
    }

    /// Forget the most recently opened web
    pub fn forget(&mut self) {
        self.last_opened = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.ron");

        assert_eq!(Preferences::load_or_default(&path), Preferences::default());

        let mut prefs = Preferences::default();
        prefs.remember(Path::new("webs/town.ron"));
        prefs.save(&path).unwrap();

        let loaded = Preferences::load_or_default(&path);
        assert_eq!(loaded.last_opened, Some(PathBuf::from("webs/town.ron")));
    }

    #[test]
    fn test_unchanged_preferences_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.ron");

        let loaded = Preferences::load_or_default(&path);
        let mut prefs = loaded.clone();
        assert!(!prefs.save_if_changed(&loaded, &path).unwrap());
        assert!(!path.exists());

        prefs.remember(Path::new("webs/town.ron"));
        assert!(prefs.save_if_changed(&loaded, &path).unwrap());
        assert_eq!(Preferences::load(&path).unwrap(), prefs);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Preferences = ron::from_str("(last_opened: Some(\"a.ron\"))").unwrap();
        assert_eq!(loaded.version, PREFERENCES_FORMAT_VERSION);
        assert_eq!(loaded.default_link_distance, 0.0);
    }

    #[test]
    fn test_garbage_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.ron");
        std::fs::write(&path, "{{{").unwrap();
        assert_eq!(Preferences::load_or_default(&path), Preferences::default());
    }
}
