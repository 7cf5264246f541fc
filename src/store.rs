// src/store.rs
use std::{fs, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::file::ensure_directory;

/// The only memory kept between cycles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherState {
    pub last_alarm_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

/// JSON state file. Single writer; no cross-process coordination.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Last seen alarm id. Missing, unreadable or corrupt state reads as `None`.
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) => {
                logw!("cannot read state {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<WatcherState>(&text) {
            Ok(state) => state.last_alarm_id,
            Err(e) => {
                logw!("ignoring corrupt state {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Overwrite the state via a temp file + rename.
    pub fn save(&self, alarm_id: &str, saved_at: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        let state = WatcherState {
            last_alarm_id: Some(s!(alarm_id)),
            saved_at: Some(s!(saved_at)),
        };
        let json = serde_json::to_string_pretty(&state)
            .map_err(|e| std::io::Error::other(format!("state encode: {e}")))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
