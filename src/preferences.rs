//! Persisted client state: tracked assets and their colors, as JSON files.
//!
//! Loading never fails. A missing file yields the defaults silently; a
//! malformed one yields the defaults with a warning.

use crate::dashboard::Session;
use crate::domain::asset::{palette, TrackedAssets};
use crate::error::DashboardError;
use crate::shared::AssetId;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const TRACKED_ASSETS_FILE: &str = "selected_assets.json";
pub const ASSET_COLORS_FILE: &str = "asset_colors.json";

/// Directory-backed key-value store for the session.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    dir: PathBuf,
}

impl PreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_session(&self) -> Session {
        Session::new(self.load_tracked(), self.load_colors())
    }

    pub fn save_session(&self, session: &Session) -> Result<(), DashboardError> {
        self.save_tracked(session.tracked())?;
        self.save_colors(session.colors())
    }

    /// Tracked assets; an empty list counts as malformed.
    pub fn load_tracked(&self) -> TrackedAssets {
        self.load(TRACKED_ASSETS_FILE)
            .unwrap_or_else(TrackedAssets::defaults)
    }

    pub fn load_colors(&self) -> HashMap<AssetId, String> {
        self.load(ASSET_COLORS_FILE)
            .unwrap_or_else(palette::default_colors)
    }

    pub fn save_tracked(&self, tracked: &TrackedAssets) -> Result<(), DashboardError> {
        self.save(TRACKED_ASSETS_FILE, tracked)
    }

    pub fn save_colors(&self, colors: &HashMap<AssetId, String>) -> Result<(), DashboardError> {
        self.save(ASSET_COLORS_FILE, colors)
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), "preferences unreadable, using defaults: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), "preferences malformed, using defaults: {e}");
                None
            }
        }
    }

    // Atomic write: write to temp, then rename.
    fn save<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), DashboardError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file);
        let tmp_path = self.dir.join(format!("{file}.tmp"));
        fs::write(&tmp_path, serde_json::to_string_pretty(value)?)?;
        fs::rename(&tmp_path, &path)?;
        tracing::debug!(path = %path.display(), "preferences saved");
        Ok(())
    }
}
