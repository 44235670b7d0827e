//! Whole-state snapshot file

use super::{recover, StateStore, StoreError};
use crate::state::UserState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk envelope around the state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub state: UserState,
}

/// Persists the whole state as one JSON file.
///
/// Each save writes a sibling temp file and renames it over the target, so a
/// reader sees either the previous snapshot or the new one.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn decode(&self) -> Result<UserState, String> {
        if !self.path.exists() {
            tracing::debug!("No snapshot at {:?}, starting empty", self.path);
            return Ok(UserState::empty());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| e.to_string())?;
        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(format!(
                "snapshot version {} is newer than supported {}",
                snapshot.version, SNAPSHOT_VERSION
            ));
        }
        Ok(snapshot.state)
    }
}

impl StateStore for SnapshotStore {
    fn load(&self) -> UserState {
        recover(self.decode(), "snapshot")
    }

    fn save(&mut self, state: &UserState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            state: state.clone(),
        };
        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_vec_pretty(&snapshot)?)?;
        fs::rename(&temp, &self.path)?;

        tracing::debug!("Saved snapshot to {:?}", self.path);
        Ok(())
    }
}
