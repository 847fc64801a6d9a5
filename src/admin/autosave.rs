//! Draft autosave
//!
//! A small key-value store for work in progress: the admin editor's draft
//! and the AI draft under review. Autosave is best effort; when the file
//! can't be written the editor keeps working and only a warning is logged.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Autosave file name inside the data directory
const AUTOSAVE_FILE: &str = "autosave.json";

/// Key of the admin editor draft
pub const EDITOR_DRAFT_KEY: &str = "admin_draft_autosave";
/// Key of the generated draft waiting for review
pub const REVIEW_DRAFT_KEY: &str = "ai_draft_review";

/// Key-value persistence for drafts
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(AUTOSAVE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries on disk; a missing file is empty, a corrupt one is an error
    fn read_entries(&self) -> Result<BTreeMap<String, serde_json::Value>, serde_json::Error> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content),
            Err(_) => Ok(BTreeMap::new()),
        }
    }

    fn read_all(&self) -> BTreeMap<String, serde_json::Value> {
        self.read_entries().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable autosave file {:?}: {}", self.path, e);
            BTreeMap::new()
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, serde_json::Value>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    /// Save a value under `key`; failures are logged, not returned
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            tracing::warn!(
                "Autosave file {:?} is unreadable ({}); saving {} resets every other draft",
                self.path,
                e,
                key
            );
            BTreeMap::new()
        });
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Autosave skipped for {}: {}", key, e);
                return;
            }
        };
        entries.insert(key.to_string(), value);
        match self.write_all(&entries) {
            Ok(()) => tracing::debug!("Autosaved {}", key),
            Err(e) => tracing::warn!("Autosave unavailable ({}): {}", key, e),
        }
    }

    /// Load the value saved under `key`, if any
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.read_all().remove(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Discarding autosaved {}: {}", key, e);
                None
            }
        }
    }

    /// Forget the value saved under `key`
    pub fn clear(&self, key: &str) {
        let mut entries = self.read_all();
        if entries.remove(key).is_none() {
            return;
        }
        if let Err(e) = self.write_all(&entries) {
            tracing::warn!("Could not clear autosaved {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{parse_front_matter_on, ParsedPost};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn draft() -> ParsedPost {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        parse_front_matter_on("---\ntitle: WIP\n---\nhalf written", "wip.md", day)
    }

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = DraftStore::new(dir.path());
        assert!(store.load::<ParsedPost>(EDITOR_DRAFT_KEY).is_none());

        store.save(EDITOR_DRAFT_KEY, &draft());
        store.save(REVIEW_DRAFT_KEY, &"other");
        assert_eq!(store.load::<ParsedPost>(EDITOR_DRAFT_KEY), Some(draft()));

        store.clear(EDITOR_DRAFT_KEY);
        assert!(store.load::<ParsedPost>(EDITOR_DRAFT_KEY).is_none());
        assert_eq!(store.load::<String>(REVIEW_DRAFT_KEY).as_deref(), Some("other"));
    }

    #[test]
    fn test_unwritable_location_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let store = DraftStore::new(&blocker.join("nested"));
        store.save(EDITOR_DRAFT_KEY, &draft());
        assert!(store.load::<ParsedPost>(EDITOR_DRAFT_KEY).is_none());
        store.clear(EDITOR_DRAFT_KEY);
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(AUTOSAVE_FILE), "[1, 2").unwrap();
        let store = DraftStore::new(dir.path());
        assert!(store.load::<ParsedPost>(EDITOR_DRAFT_KEY).is_none());

        store.save(EDITOR_DRAFT_KEY, &draft());
        assert!(store.load::<ParsedPost>(EDITOR_DRAFT_KEY).is_some());
        assert!(store.load::<String>(REVIEW_DRAFT_KEY).is_none());

        let on_disk: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk.keys().collect::<Vec<_>>(), vec![EDITOR_DRAFT_KEY]);
    }

    #[test]
    fn test_wrong_shape_is_discarded() {
        let dir = TempDir::new().unwrap();
        let store = DraftStore::new(dir.path());
        store.save(EDITOR_DRAFT_KEY, &42);
        assert!(store.load::<ParsedPost>(EDITOR_DRAFT_KEY).is_none());
    }
}
