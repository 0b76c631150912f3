// storage/src/store.rs

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::{Batch, Db, Tree};
use tracing::warn;

use models::errors::SiteResult;

/// Collection key for reservation records.
pub const KEY_RESERVATIONS: &str = "reservations";
/// Collection key for facility entries.
pub const KEY_FACILITIES: &str = "facilities";
/// Content key for the About page text.
pub const KEY_ABOUT: &str = "aboutText";
/// Content key for the Privacy page text.
pub const KEY_PRIVACY: &str = "privacyText";

/// A store of named collections: each key maps to one JSON-encoded array
/// (or JSON-encoded string, for the content keys). Collections are replaced
/// wholesale on every save; there is no partial update.
///
/// Reads never fail: an absent key or a value that no longer parses degrades
/// to the caller-supplied fallback.
pub struct RecordStore {
    tree: Tree,
}

impl RecordStore {
    const TREE_NAME: &'static str = "collections";

    pub fn new(db: &Db) -> SiteResult<Self> {
        let tree = db.open_tree(Self::TREE_NAME)?;
        Ok(Self { tree })
    }

    /// Opens (creating if absent) a store at `path` with its own database.
    pub fn open<P: AsRef<Path>>(path: P) -> SiteResult<Self> {
        let db = sled::open(path)?;
        Self::new(&db)
    }

    /// Returns the persisted sequence for `key`, or `fallback` when the key
    /// has never been written or its value fails to parse.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: Vec<T>) -> Vec<T> {
        self.read_or(key, fallback)
    }

    /// Serializes and persists the entire sequence, replacing any prior
    /// value for `key`. Callers append via read-modify-write.
    pub fn save<T: Serialize>(&self, key: &str, records: &[T]) -> SiteResult<()> {
        self.write(key, &records)
    }

    /// Read-modify-write append: load, push, save.
    pub fn append<T: Serialize + DeserializeOwned>(&self, key: &str, record: T) -> SiteResult<()> {
        let mut records: Vec<T> = self.load(key, Vec::new());
        records.push(record);
        self.save(key, &records)
    }

    /// Returns the persisted text for `key`, or `fallback` when absent or
    /// unparseable.
    pub fn load_text(&self, key: &str, fallback: &str) -> String {
        self.read_or(key, fallback.to_string())
    }

    pub fn save_text(&self, key: &str, text: &str) -> SiteResult<()> {
        self.write(key, &text)
    }

    fn read_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let ivec = match self.tree.get(key) {
            Ok(Some(ivec)) => ivec,
            Ok(None) => return fallback,
            Err(err) => {
                warn!("Failed to read collection '{}': {}", key, err);
                return fallback;
            }
        };
        match serde_json::from_slice(&ivec) {
            Ok(value) => value,
            Err(err) => {
                warn!("Discarding unparseable value for '{}': {}", key, err);
                fallback
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> SiteResult<()> {
        let encoded = serde_json::to_vec(value)?;
        let mut batch = Batch::default();
        batch.insert(key, encoded.as_slice());
        self.tree.apply_batch(batch)?;
        // Persist synchronously; a save that returns Ok is on disk.
        self.tree.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store() -> (TempDir, RecordStore) {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("records")).unwrap();
        (dir, store)
    }

    #[test]
    fn should_return_fallback_for_unwritten_key() {
        let (_dir, store) = open_store();
        let records = store.load("nothing", vec!["fallback".to_string()]);
        assert_eq!(records, vec!["fallback"]);
        // The miss must not have written anything.
        let records = store.load("nothing", vec!["other".to_string()]);
        assert_eq!(records, vec!["other"]);
    }

    #[test]
    fn should_round_trip_saved_records() {
        let (_dir, store) = open_store();
        let records = vec!["a".to_string(), "b".to_string()];
        store.save("letters", &records).unwrap();
        assert_eq!(store.load::<String>("letters", Vec::new()), records);
    }

    #[test]
    fn should_degrade_to_fallback_on_corrupt_value() {
        let (_dir, store) = open_store();
        store.tree.insert("broken", b"{not json".as_slice()).unwrap();
        let records = store.load("broken", vec![1u32, 2, 3]);
        assert_eq!(records, vec![1, 2, 3]);
    }

    #[test]
    fn should_preserve_insertion_order_across_appends() {
        let (_dir, store) = open_store();
        for n in 0..5u32 {
            store.append("numbers", n).unwrap();
        }
        assert_eq!(store.load::<u32>("numbers", Vec::new()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn should_round_trip_text_content() {
        let (_dir, store) = open_store();
        assert_eq!(store.load_text(KEY_ABOUT, "default"), "default");
        store.save_text(KEY_ABOUT, "About the school").unwrap();
        assert_eq!(store.load_text(KEY_ABOUT, "default"), "About the school");
    }
}
