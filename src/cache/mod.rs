//! Key-value store for data derived during parsing.
//!
//! The parser writes the line-delta map under [`LINES_CACHE_KEY`] so that
//! later statistics passes can reuse it without re-reading the log.

use crate::error::{CvsError, Result};
use crate::fs::atomic_write;
use crate::repository::LineDeltaMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key under which the line-delta map is stored.
pub const LINES_CACHE_KEY: &str = "cvs-lines";

/// A key-value sink for JSON values.
pub trait Cache {
    /// Store `value` under `key`, replacing any previous value.
    fn insert(&mut self, key: &str, value: Value) -> Result<()>;

    /// Look up the value stored under `key`.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Make every inserted value durable. In-memory stores have nothing to do.
    fn sync(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<C: Cache + ?Sized> Cache for Box<C> {
    fn insert(&mut self, key: &str, value: Value) -> Result<()> {
        (**self).insert(key, value)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        (**self).get(key)
    }

    fn sync(&mut self) -> Result<()> {
        (**self).sync()
    }
}

/// In-memory cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: BTreeMap<String, Value>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn insert(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

/// Cache persisted as a single JSON object on disk.
///
/// Inserts only touch memory; [`Cache::sync`] rewrites the whole file
/// atomically, and only when something changed since the last sync.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
    dirty: bool,
}

impl JsonFileCache {
    /// Open the cache at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - JSON file holding the cache; it need not exist yet
    ///
    /// # Returns
    ///
    /// * `Ok(JsonFileCache)` - Loaded entries, or an empty cache for a missing or blank file
    /// * `Err(CvsError::Cache)` - The file could not be read or is not a JSON object
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                CvsError::Cache(format!(
                    "failed to read cache file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    CvsError::Cache(format!(
                        "cache file '{}' is not a JSON object: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let mut content = serde_json::to_vec_pretty(&self.entries)
            .map_err(|e| CvsError::Cache(format!("failed to encode cache: {}", e)))?;
        content.push(b'\n');
        atomic_write(&self.path, &content)
    }
}

impl Cache for JsonFileCache {
    fn insert(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.dirty = true;
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn sync(&mut self) -> Result<()> {
        if self.dirty {
            self.persist()?;
            self.dirty = false;
        }
        Ok(())
    }
}

/// Encode a line-delta map for storage.
pub fn encode_line_deltas(lines: &LineDeltaMap) -> Result<Value> {
    serde_json::to_value(lines)
        .map_err(|e| CvsError::Cache(format!("failed to encode '{}': {}", LINES_CACHE_KEY, e)))
}

/// Read back the line-delta map written by a parse pass.
///
/// # Arguments
///
/// * `cache` - Store a previous pass wrote into
///
/// # Returns
///
/// * `Ok(LineDeltaMap)` - The stored map, or an empty map when nothing has been stored yet
/// * `Err(CvsError::Cache)` - The stored value does not have the line-delta shape
pub fn load_line_deltas(cache: &dyn Cache) -> Result<LineDeltaMap> {
    match cache.get(LINES_CACHE_KEY) {
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            CvsError::Cache(format!("failed to decode '{}': {}", LINES_CACHE_KEY, e))
        }),
        None => Ok(LineDeltaMap::new()),
    }
}
