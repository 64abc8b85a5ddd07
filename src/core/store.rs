//! Best clear time persistence.
//!
//! One integer (seconds) per stable level key; a missing key means no
//! record yet. A new time replaces the stored one only when strictly
//! smaller.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::error::StoreError;

/// Durable key-value store of best times.
pub trait BestTimeStore {
    /// Stored best time for a key, if any.
    fn load(&self, key: &str) -> Option<u64>;

    /// Overwrite the stored best time for a key.
    fn save(&mut self, key: &str, seconds: u64) -> Result<(), StoreError>;
}

/// Record `seconds` if it beats the stored best.
///
/// Returns `Ok(true)` for a new record.
pub fn record_best<S: BestTimeStore + ?Sized>(
    store: &mut S,
    key: &str,
    seconds: u64,
) -> Result<bool, StoreError> {
    match store.load(key) {
        Some(best) if seconds >= best => Ok(false),
        _ => {
            store.save(key, seconds)?;
            tracing::info!(key, seconds, "new best time");
            Ok(true)
        }
    }
}

/// In-memory store, the default for sessions and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: FxHashMap<String, u64>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl BestTimeStore for MemoryStore {
    fn load(&self, key: &str) -> Option<u64> {
        self.records.get(key).copied()
    }

    fn save(&mut self, key: &str, seconds: u64) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), seconds);
        Ok(())
    }
}

/// JSON file of `{ key: seconds }`, written through on every save.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: BTreeMap<String, u64>,
}

impl JsonFileStore {
    /// Open a record file. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), count = records.len(), "opened record file");
        Ok(Self { path, records })
    }

    /// Location of the record file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let text =
            serde_json::to_string_pretty(&self.records).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl BestTimeStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<u64> {
        self.records.get(key).copied()
    }

    fn save(&mut self, key: &str, seconds: u64) -> Result<(), StoreError> {
        let previous = self.records.insert(key.to_string(), seconds);
        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.records.insert(key.to_string(), old),
                None => self.records.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("coin-drill-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_record_best_only_when_strictly_smaller() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(record_best(&mut store, "lv0", 90).unwrap());
        assert!(!record_best(&mut store, "lv0", 90).unwrap());
        assert!(!record_best(&mut store, "lv0", 120).unwrap());
        assert!(record_best(&mut store, "lv0", 45).unwrap());
        assert_eq!(store.load("lv0"), Some(45));
        assert_eq!(store.load("lv1"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round-trip");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.load("masucalc_best_lv2"), None);
        assert!(record_best(&mut store, "masucalc_best_lv2", 73).unwrap());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.load("masucalc_best_lv2"), Some(73));
        assert_eq!(reopened.path(), path.as_path());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let good = temp_path("rollback");
        let _ = fs::remove_file(&good);
        let missing_dir = temp_path("no-such-dir").join("records.json");

        let mut store = JsonFileStore::open(&missing_dir).unwrap();
        let err = store.save("lv0", 30).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.load("lv0"), None);

        let mut store = JsonFileStore::open(&good).unwrap();
        store.save("lv0", 50).unwrap();
        store.path = missing_dir;
        assert!(record_best(&mut store, "lv0", 20).is_err());
        assert_eq!(store.load("lv0"), Some(50));

        let _ = fs::remove_file(&good);
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));

        let _ = fs::remove_file(&path);
    }
}
