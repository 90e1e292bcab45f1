//! Local key-value persistence
//!
//! The dashboard keeps three independent entries (profile, metrics, last
//! assessment), each a flat JSON document stored under its own key.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::DashboardError;

/// Key for the persisted [`crate::Profile`]
pub const PROFILE_KEY: &str = "user_profile";
/// Key for the persisted [`crate::DailyMetrics`]
pub const METRICS_KEY: &str = "daily_metrics";
/// Key for the persisted [`crate::RiskAssessment`]
pub const ASSESSMENT_KEY: &str = "risk_assessment";

/// All keys owned by the dashboard
pub const ALL_KEYS: [&str; 3] = [PROFILE_KEY, METRICS_KEY, ASSESSMENT_KEY];

/// String key-value storage backend
pub trait KeyValueStorage {
    /// Read a value; `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, DashboardError>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError>;

    /// Delete a value; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), DashboardError>;
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DashboardError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DashboardError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed storage: key `k` lives in `<dir>/k.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, DashboardError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DashboardError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DashboardError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)?;
        tracing::debug!(key, path = %path.display(), "wrote entry");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DashboardError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get(PROFILE_KEY).unwrap(), None);

        storage.set(PROFILE_KEY, "{}").unwrap();
        assert_eq!(storage.get(PROFILE_KEY).unwrap().as_deref(), Some("{}"));

        storage.remove(PROFILE_KEY).unwrap();
        assert_eq!(storage.get(PROFILE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");
        let mut storage = FileStorage::new(&dir);

        assert_eq!(storage.get(METRICS_KEY).unwrap(), None);

        storage.set(METRICS_KEY, r#"{"steps":1}"#).unwrap();
        assert!(dir.join("daily_metrics.json").exists());
        assert_eq!(
            storage.get(METRICS_KEY).unwrap().as_deref(),
            Some(r#"{"steps":1}"#)
        );
    }

    #[test]
    fn test_file_storage_remove_missing_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(tmp.path());
        assert!(storage.remove(ASSESSMENT_KEY).is_ok());
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(tmp.path());
        assert!(matches!(
            storage.set("../escape", "x"),
            Err(DashboardError::InvalidKey(_))
        ));
        assert!(storage.get("").is_err());
    }
}
