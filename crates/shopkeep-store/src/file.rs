//! # Item File Store
//!
//! Reads and writes the whole collection as one JSON array.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Item File                                          │
//! │                                                                         │
//! │  StoreConfig::new("data")                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data/                      ← created on first save (idempotent)       │
//! │  ├── items.json             ← pretty-printed array of 8-field objects   │
//! │  └── items.tmp              ← exists only while a save is in flight     │
//! │                                                                         │
//! │  save(): serialize ──► write items.tmp ──► fsync ──► rename over        │
//! │  load(): missing / corrupt ──► empty collection (logged, not raised)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every save rewrites the full collection; there is no append or patch path.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use shopkeep_core::Item;
use tracing::{debug, error, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Configuration
// =============================================================================

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default file name inside the data directory.
pub const DEFAULT_FILE_NAME: &str = "items.json";

/// Item file configuration.
///
/// ## Example
/// ```rust
/// use shopkeep_store::StoreConfig;
///
/// let config = StoreConfig::new("./data").file_name("catalog.json");
/// assert!(config.path().ends_with("catalog.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the item file. Created on first save.
    pub data_dir: PathBuf,

    /// Name of the item file inside `data_dir`.
    /// Default: `items.json`
    pub file_name: String,

    /// Whether to indent the JSON output.
    /// Default: true (the file is meant to be human-readable)
    pub pretty: bool,
}

impl StoreConfig {
    /// Creates a configuration rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            pretty: true,
        }
    }

    /// Sets the file name.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Sets whether output is indented.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Full path of the item file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_DATA_DIR)
    }
}

// =============================================================================
// Item Store
// =============================================================================

/// Handle to the item file.
#[derive(Debug, Clone)]
pub struct ItemStore {
    config: StoreConfig,
    path: PathBuf,
}

impl ItemStore {
    /// Creates a store for the given configuration. Touches nothing on disk.
    pub fn new(config: StoreConfig) -> Self {
        let path = config.path();
        ItemStore { config, path }
    }

    /// Path of the item file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the collection, never failing.
    ///
    /// A missing file is the normal first-run state. A malformed file or any
    /// other read failure yields an empty collection too, but is logged at
    /// `warn` / `error` so it is not mistaken for an empty inventory.
    pub fn load(&self) -> Vec<Item> {
        match self.try_load() {
            Ok(items) => items,
            Err(StoreError::Corrupt { path, source }) => {
                warn!(path = %path.display(), error = %source, "Item file is malformed, starting empty");
                Vec::new()
            }
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "Item file could not be read, starting empty");
                Vec::new()
            }
        }
    }

    /// Reads the collection, surfacing every failure except "file absent".
    ///
    /// ## Returns
    /// * `Ok(vec![])` - No file yet
    /// * `Ok(items)` - File parsed
    /// * `Err(StoreError::Corrupt)` - File is not a valid item array
    /// * `Err(StoreError::Io)` - Any other read failure
    pub fn try_load(&self) -> StoreResult<Vec<Item>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No item file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let items: Vec<Item> = serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), count = items.len(), "Loaded items");
        Ok(items)
    }

    /// Overwrites the file with the full collection.
    ///
    /// ## What This Does
    /// 1. Creates the data directory if missing
    /// 2. Writes the JSON to a sibling `.tmp` file
    /// 3. Flushes and syncs it
    /// 4. Renames it over the item file
    ///
    /// A failure at any step is returned; nothing is swallowed.
    pub fn save(&self, items: &[Item]) -> StoreResult<()> {
        fs::create_dir_all(&self.config.data_dir)
            .map_err(|e| StoreError::io(&self.config.data_dir, e))?;

        let encoded = if self.config.pretty {
            serde_json::to_vec_pretty(items)
        } else {
            serde_json::to_vec(items)
        }
        .map_err(StoreError::Encode)?;

        let temp_path = self.path.with_extension("tmp");
        let temp_file = File::create(&temp_path).map_err(|e| StoreError::io(&temp_path, e))?;
        let mut writer = BufWriter::new(temp_file);
        writer
            .write_all(&encoded)
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush())
            .map_err(|e| StoreError::io(&temp_path, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| StoreError::io(&temp_path, e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), count = items.len(), "Saved items");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopkeep_core::{ItemFields, Timestamp};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ItemStore {
        ItemStore::new(StoreConfig::new(dir.path().join("data")))
    }

    fn sample() -> Vec<Item> {
        let t = Timestamp::from_ymd_hms(2024, 3, 1, 9, 30, 0).unwrap();
        vec![
            Item::from_fields(
                1,
                ItemFields::new("노트북", 1_000_000.0, 5)
                    .with_category("전자제품")
                    .with_description("15인치"),
                t,
            )
            .unwrap(),
            Item::from_fields(2, ItemFields::new("Mouse", 20_000.5, 50), t).unwrap(),
        ]
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/tmp/shop").file_name("x.json").pretty(false);
        assert_eq!(config.path(), PathBuf::from("/tmp/shop/x.json"));
        assert!(!config.pretty);
        assert_eq!(StoreConfig::default().path(), PathBuf::from("data/items.json"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().is_empty());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&[]).unwrap();
        assert!(store.path().exists());
        // A second save into the existing directory also succeeds.
        store.save(&[]).unwrap();
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let items = sample();
        store.save(&items).unwrap();
        assert_eq!(store.load(), items);
    }

    #[test]
    fn test_round_trip_keeps_padded_text() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let at = Timestamp::from_ymd_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let items = vec![Item {
            id: 1,
            name: " Mouse ".to_string(),
            description: Some(" 2 pack ".to_string()),
            category: " 전자제품 ".to_string(),
            price: 20_000.0,
            stock: 50,
            created_at: at,
            updated_at: at,
        }];

        store.save(&items).unwrap();
        assert_eq!(store.try_load().unwrap(), items);
    }

    #[test]
    fn test_round_trip_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample()).unwrap();
        store.save(&[]).unwrap();
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_file_is_pretty_utf8() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample()).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("노트북"));
        assert!(text.contains("\n  {"));
        assert!(text.contains("\"created_at\": \"2024-03-01 09:30:00\""));
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(store.path(), r#"{"id": 1, "name": "not an array"}"#).unwrap();

        assert!(matches!(store.try_load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        // A directory where the file should be.
        fs::create_dir_all(store.path()).unwrap();

        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_loads_hand_written_file_with_missing_fields() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            store.path(),
            r#"[{"id": 4, "name": "Pen", "price": 1500, "stock": 12, "created_at": "2024-01-02 03:04:05"}]"#,
        )
        .unwrap();

        let items = store.try_load().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, shopkeep_core::DEFAULT_CATEGORY);
        assert_eq!(items[0].price, 1500.0);
        assert_eq!(items[0].updated_at, items[0].created_at);
    }
}
