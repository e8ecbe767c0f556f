use crate::stats::WatchedSummary;
use anyhow::Result;
use popcorn_models::WatchedEntry;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Fixed name of the slot holding the watched list
pub const WATCHED_SLOT: &str = "watched";

/// JSON file holding the whole watched list.
///
/// Reads never fail outward: a missing or unreadable file is an empty list.
/// Writes replace the file atomically.
#[derive(Debug, Clone)]
pub struct WatchedStore {
    path: PathBuf,
}

impl WatchedStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{}.json", WATCHED_SLOT)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Vec<WatchedEntry> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Watched list does not exist yet");
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read watched list {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<WatchedEntry>>(&content) {
            Ok(entries) => {
                info!("Loaded watched list ({} entries)", entries.len());
                entries
            }
            Err(e) => {
                // Keep the unreadable file around; the next save overwrites the slot
                let backup_path = self.path.with_extension("json.bak");
                if let Err(backup_err) = std::fs::copy(&self.path, &backup_path) {
                    warn!(
                        "Watched list is corrupt ({}) and could not be backed up: {}. Starting empty.",
                        e, backup_err
                    );
                } else {
                    warn!(
                        "Watched list is corrupt ({}). Backed up to {:?} and starting empty.",
                        e, backup_path
                    );
                }
                Vec::new()
            }
        }
    }

    pub fn save(&self, entries: &[WatchedEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!("Saved watched list ({} entries)", entries.len());
        Ok(())
    }
}

/// The watched list in memory, written back to its store after every change.
#[derive(Debug)]
pub struct WatchedList {
    store: WatchedStore,
    entries: Vec<WatchedEntry>,
}

impl WatchedList {
    pub fn open(store: WatchedStore) -> Self {
        let entries = store.load();
        Self { store, entries }
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.find(imdb_id).is_some()
    }

    pub fn find(&self, imdb_id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.imdb_id == imdb_id)
    }

    /// Push to the end and persist. Does not de-duplicate.
    /// The entry stays in memory even if the write fails.
    pub fn append(&mut self, entry: WatchedEntry) -> Result<()> {
        self.entries.push(entry);
        self.store.save(&self.entries)
    }

    /// Drop every entry with this id. Returns whether anything was removed;
    /// an unknown id leaves the list and the file untouched.
    pub fn remove(&mut self, imdb_id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.imdb_id != imdb_id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.store.save(&self.entries)?;
        Ok(true)
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_entries(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn entry(id: &str, title: &str) -> WatchedEntry {
        WatchedEntry {
            imdb_id: id.to_string(),
            title: title.to_string(),
            year: "2010".to_string(),
            poster: "https://example.com/p.jpg".to_string(),
            imdb_rating: Some(8.8),
            runtime: Some(148),
            user_rating: 9,
            rating_decisions: 3,
            added_at: Some(Utc.with_ymd_and_hms(2026, 1, 17, 20, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = WatchedStore::new(dir.path());
        assert!(store.load().is_empty());
        assert_eq!(store.path(), dir.path().join("watched.json"));
    }

    #[test]
    fn test_append_then_reload_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchedList::open(WatchedStore::new(dir.path()));
        list.append(entry("tt1375666", "Inception")).unwrap();

        let reopened = WatchedList::open(WatchedStore::new(dir.path()));
        assert_eq!(reopened.entries(), &[entry("tt1375666", "Inception")]);
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchedList::open(WatchedStore::new(dir.path()));
        list.append(entry("tt1", "First")).unwrap();
        list.append(entry("tt2", "Second")).unwrap();
        list.append(entry("tt1", "First again")).unwrap();

        let titles: Vec<&str> = list.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "First again"]);
    }

    #[test]
    fn test_remove_drops_all_matches() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchedList::open(WatchedStore::new(dir.path()));
        list.append(entry("tt1", "A")).unwrap();
        list.append(entry("tt2", "B")).unwrap();
        list.append(entry("tt1", "A again")).unwrap();

        assert!(list.remove("tt1").unwrap());
        assert_eq!(list.len(), 1);

        let reopened = WatchedList::open(WatchedStore::new(dir.path()));
        assert_eq!(reopened.entries()[0].imdb_id, "tt2");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchedList::open(WatchedStore::new(dir.path()));
        list.append(entry("tt1", "A")).unwrap();
        let before = list.entries().to_vec();

        assert!(!list.remove("tt404").unwrap());
        assert_eq!(list.entries(), before.as_slice());
    }

    #[test]
    fn test_corrupt_file_loads_empty_and_is_backed_up() {
        let dir = TempDir::new().unwrap();
        let store = WatchedStore::new(dir.path());
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(store.load().is_empty());
        assert!(dir.path().join("watched.json.bak").exists());

        // The slot is usable again after the next save
        let mut list = WatchedList::open(store.clone());
        list.append(entry("tt1", "A")).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_wrong_shape_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = WatchedStore::new(dir.path());
        std::fs::write(store.path(), r#"{"imdbID":"tt1"}"#).unwrap();
        assert!(store.load().is_empty());
    }
}
