// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key/value storage backends.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{PersistError, Result};

/// The key every canvas record is stored under.
pub const STORAGE_KEY: &str = "canvasState";

/// A place to keep text records by key.
///
/// Saves are last-write-wins; there is no merging.
pub trait StorageBackend {
    /// Reads the record under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Any failure to reach or read the medium.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Any failure to reach or write the medium.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the record under `key`. Removing a missing record succeeds.
    ///
    /// # Errors
    ///
    /// Any failure to reach or modify the medium.
    fn clear(&mut self, key: &str) -> Result<()>;
}

/// Keeps records in memory. Useful for tests and hosts without storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    records: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that fails every operation, standing in for
    /// storage the host cannot open.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            records: HashMap::new(),
            unavailable: true,
        }
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(PersistError::Unavailable {
                reason: "memory backend disabled".into(),
            });
        }
        Ok(())
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.records.insert(key.into(), value.into());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        self.check()?;
        self.records.remove(key);
        Ok(())
    }
}

/// Keeps each record as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// record, so a crash mid-write never leaves a truncated record behind.
#[derive(Clone, Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Stores records in `dir`, which is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path used for `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
