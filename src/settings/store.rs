//! Settings persistence
//!
//! The storage medium is pluggable through [`ConfigStore`]. Loading never
//! fails: an absent or damaged store yields the default thresholds.

use super::ThresholdConfig;
use crate::error::{ConfigError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Fixed namespace under which settings are stored
pub const SETTINGS_KEY: &str = "aquarium-settings";

/// Settings persistence backend
pub trait ConfigStore: Send + Sync {
    /// Load the current settings, falling back to defaults
    fn load(&self) -> ThresholdConfig;

    /// Persist settings
    fn save(&self, config: &ThresholdConfig) -> Result<()>;

    /// Backend name for identification
    fn name(&self) -> &str;
}

/// JSON document on disk
///
/// The document is an object of namespaces; settings live under
/// [`SETTINGS_KEY`] and other namespaces are preserved on save.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Create a store backed by the given file
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location
    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// Get default storage path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("reefwatch").join("storage.json")
        } else {
            PathBuf::from("reefwatch-storage.json")
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> std::result::Result<Option<Value>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::FileNotFound(self.path.display().to_string()),
            _ => ConfigError::Io(e),
        })?;
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> ThresholdConfig {
        match self.read_document() {
            Ok(Some(document)) => match document.get(SETTINGS_KEY) {
                Some(settings) => ThresholdConfig::from_value(settings),
                None => {
                    log::debug!(
                        "No '{}' entry in {}, using defaults",
                        SETTINGS_KEY,
                        self.path.display()
                    );
                    ThresholdConfig::default()
                }
            },
            Ok(None) => {
                log::debug!("{} does not exist, using defaults", self.path.display());
                ThresholdConfig::default()
            }
            Err(e) => {
                log::warn!(
                    "Failed to read settings from {}: {}. Using defaults",
                    self.path.display(),
                    e
                );
                ThresholdConfig::default()
            }
        }
    }

    fn save(&self, config: &ThresholdConfig) -> Result<()> {
        // A damaged document is replaced rather than blocking the save.
        let mut document = match self.read_document() {
            Ok(Some(Value::Object(map))) => map,
            _ => Map::new(),
        };
        document.insert(SETTINGS_KEY.to_string(), config.to_value());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents =
            serde_json::to_string_pretty(&Value::Object(document)).map_err(ConfigError::from)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// In-process settings store
///
/// Holds the raw stored value, so legacy or malformed content goes through
/// the same normalization as a file would.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    raw: RwLock<Option<Value>>,
}

impl MemoryConfigStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored value as an external writer would
    pub fn set_raw(&self, value: Value) {
        if let Ok(mut raw) = self.raw.write() {
            *raw = Some(value);
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> ThresholdConfig {
        match self.raw.read() {
            Ok(raw) => raw
                .as_ref()
                .map(ThresholdConfig::from_value)
                .unwrap_or_default(),
            Err(_) => ThresholdConfig::default(),
        }
    }

    fn save(&self, config: &ThresholdConfig) -> Result<()> {
        self.set_raw(config.to_value());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_store_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("storage.json"));
        assert_eq!(store.load(), ThresholdConfig::default());
    }

    #[test]
    fn test_file_store_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("nested").join("storage.json"));

        let mut config = ThresholdConfig::default();
        config.temp_max = 28.0;
        config.sound_enabled = true;
        store.save(&config).unwrap();

        assert_eq!(store.load(), config);
    }

    #[test]
    fn test_file_store_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"esp32_url": "http://192.168.0.50"}"#).unwrap();

        let store = FileConfigStore::new(&path);
        store.save(&ThresholdConfig::default()).unwrap();

        let document: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(document["esp32_url"], json!("http://192.168.0.50"));
        assert!(document.get(SETTINGS_KEY).is_some());
    }

    #[test]
    fn test_file_store_malformed_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileConfigStore::new(&path);
        assert_eq!(store.load(), ThresholdConfig::default());

        // Saving over a damaged document recovers it
        store.save(&ThresholdConfig::default()).unwrap();
        assert_eq!(store.load(), ThresholdConfig::default());
    }

    #[test]
    fn test_file_store_legacy_not_rewritten_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let legacy = r#"{"aquarium-settings": {"salinityMin": 1020, "salinityMax": 1026}}"#;
        fs::write(&path, legacy).unwrap();

        let store = FileConfigStore::new(&path);
        let config = store.load();
        assert!((config.salinity_min - 1.020).abs() < 1e-12);
        assert!((config.salinity_max - 1.026).abs() < 1e-12);

        assert_eq!(fs::read_to_string(&path).unwrap(), legacy);
    }

    #[test]
    fn test_file_store_unreadable_reports_cause() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the settings path exists but cannot be read as a file
        let path = dir.path().join("storage.json");
        fs::create_dir(&path).unwrap();

        let store = FileConfigStore::new(&path);
        assert!(matches!(store.read_document(), Err(ConfigError::Io(_))));
        assert_eq!(store.load(), ThresholdConfig::default());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryConfigStore::new();
        assert_eq!(store.load(), ThresholdConfig::default());

        store.set_raw(json!({ "phMin": 7.8 }));
        assert_eq!(store.load().ph_min, 7.8);

        let mut config = ThresholdConfig::default();
        config.alerts_enabled = false;
        store.save(&config).unwrap();
        assert!(!store.load().alerts_enabled);
        assert_eq!(store.name(), "memory");
    }
}
