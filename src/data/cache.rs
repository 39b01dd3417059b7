//! Versioned JSON file cache.
//!
//! Each cache entry is one pretty-printed JSON file in the cache directory.
//! Names without a `.json` suffix get one appended.

use crate::error::DataError;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Cache file names for one game version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheFiles {
    pub item_data: String,
    pub item_list: String,
    pub champ_data: String,
    pub champ_list: String,
}

impl CacheFiles {
    /// ```rust
    /// use riftstat::data::cache::CacheFiles;
    ///
    /// let files = CacheFiles::for_version("14.23.1");
    /// assert_eq!(files.champ_data, "champ_data_14.23.1.json");
    /// ```
    pub fn for_version(version: &str) -> Self {
        Self {
            item_data: format!("item_data_{version}.json"),
            item_list: format!("item_list_{version}.json"),
            champ_data: format!("champ_data_{version}.json"),
            champ_list: format!("champ_list_{version}.json"),
        }
    }
}

/// JSON files under one directory.
#[derive(Debug, Clone)]
pub struct JsonCache {
    dir: PathBuf,
}

impl JsonCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the entry `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        if name.ends_with(".json") {
            self.dir.join(name)
        } else {
            self.dir.join(format!("{name}.json"))
        }
    }

    /// Read the entry `name`; `Ok(None)` when the file does not exist.
    pub fn read(&self, name: &str) -> Result<Option<Value>, DataError> {
        let path = self.path(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(DataError::io(path.display().to_string(), err)),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Read the entry `name` as an object.
    ///
    /// Missing, unreadable, malformed or non-object entries all come back
    /// as an empty map, with the reason logged.
    pub fn read_object(&self, name: &str) -> Map<String, Value> {
        match self.read(name) {
            Ok(Some(Value::Object(map))) => map,
            Ok(Some(_)) => {
                tracing::warn!(file = name, "cache entry is not an object");
                Map::new()
            }
            Ok(None) => {
                tracing::info!(file = name, "cache entry not found");
                Map::new()
            }
            Err(err) => {
                tracing::error!(file = name, error = %err, "failed to read cache entry");
                Map::new()
            }
        }
    }

    /// Write `value` to the entry `name`, creating the directory if needed.
    pub fn write(&self, name: &str, value: &Value) -> Result<(), DataError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| DataError::io(self.dir.display().to_string(), e))?;
        let path = self.path(name);
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, content).map_err(|e| DataError::io(path.display().to_string(), e))
    }

    /// Insert or replace top-level keys of an existing object entry.
    pub fn update_keys(&self, name: &str, data: Map<String, Value>) -> Result<(), DataError> {
        let mut existing = self.existing_object(name)?;
        existing.extend(data);
        self.write(name, &Value::Object(existing))
    }

    /// Shallow-merge each object in `data` into the entry under the same key.
    ///
    /// Keys missing from the entry are inserted; non-object values replace
    /// what was there.
    pub fn merge_values(&self, name: &str, data: Map<String, Value>) -> Result<(), DataError> {
        let mut existing = self.existing_object(name)?;
        for (key, value) in data {
            match value {
                Value::Object(update) => match existing.get_mut(&key) {
                    Some(Value::Object(current)) => current.extend(update),
                    _ => {
                        existing.insert(key, Value::Object(update));
                    }
                },
                value => {
                    existing.insert(key, value);
                }
            }
        }
        self.write(name, &Value::Object(existing))
    }

    fn existing_object(&self, name: &str) -> Result<Map<String, Value>, DataError> {
        match self.read(name)? {
            Some(Value::Object(map)) => Ok(map),
            Some(_) | None => Err(DataError::io(
                self.path(name).display().to_string(),
                std::io::Error::new(ErrorKind::InvalidData, "no object to update"),
            )),
        }
    }
}
