//! Persisted user settings. Currently only the backend base URL.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const APP_DIR: &str = "screener";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub api_base: Option<String>,
}

pub struct SettingsStore {
    path: PathBuf,
    data: UserSettings,
}

impl SettingsStore {
    /// `<config dir>/screener/settings.json`, or the working directory when the
    /// platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_FILE)
    }

    /// A missing file yields defaults. So does an unparsable one, with a warning.
    pub fn load(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring unreadable settings at {}: {e}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };
        debug!("Loaded settings from {}", path.display());

        Ok(Self { path, data })
    }

    pub fn api_base(&self) -> Option<&str> {
        self.data.api_base.as_deref()
    }

    pub fn set_api_base(&mut self, api_base: &str) -> Result<()> {
        self.data.api_base = Some(api_base.to_string());
        self.persist()
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.json")).unwrap();
        assert!(store.api_base().is_none());
    }

    #[test]
    fn test_api_base_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = SettingsStore::load(path.clone()).unwrap();
        store.set_api_base("http://screening.internal:8000").unwrap();

        let reloaded = SettingsStore::load(path).unwrap();
        assert_eq!(reloaded.api_base(), Some("http://screening.internal:8000"));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SettingsStore::load(path).unwrap();
        assert!(store.api_base().is_none());
    }
}
