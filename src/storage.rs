//! Storage layer for nexusflow
//!
//! A small key-value store over one directory: each collection key maps to
//! a single JSON document holding the whole collection.
//!
//! # Directory Structure
//!
//! ```text
//! <data dir>/
//!   users.json       # User collection
//!   projects.json    # Project collection
//!   tasks.json       # Task collection
//! ```
//!
//! Every write replaces the whole document through a temp file + rename, so
//! readers never observe a partially written collection. There is no
//! cross-process locking: concurrent writers race last-write-wins on whole
//! files, an accepted limitation at this data scale.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// Collection key for users
pub const USERS_KEY: &str = "users";

/// Collection key for projects
pub const PROJECTS_KEY: &str = "projects";

/// Collection key for tasks
pub const TASKS_KEY: &str = "tasks";

/// Storage manager for nexusflow state
#[derive(Debug, Clone)]
pub struct Storage {
    /// Directory holding one JSON document per collection key
    root: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Default per-user data directory
    pub fn default_root() -> Result<PathBuf> {
        ProjectDirs::from("", "", "nexusflow")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(Error::DataDirUnresolved)
    }

    /// Path to the storage root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path backing a collection key
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Create the storage directory if it does not exist yet
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Check whether the storage directory exists
    pub fn is_initialized(&self) -> bool {
        self.root.exists()
    }

    // =========================================================================
    // Key-value interface
    // =========================================================================

    /// Read the raw serialized value stored under `key`
    ///
    /// An absent key is `None`, not an error.
    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    /// Store the raw serialized value under `key` (atomic)
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write_atomic(&self.key_path(key), value.as_bytes())
    }

    /// Serialize `data` as JSON and store it under `key`
    pub fn write_json<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.set(key, &json)
    }

    /// Read and deserialize the JSON document under `key`
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    /// Load a collection, seeding it when the key is absent or unreadable
    ///
    /// Deserialization failure is recovered locally: the seed replaces the
    /// corrupt document and is persisted immediately, so later loads see the
    /// same data. It is never surfaced to the caller.
    pub fn load_or_seed<T>(&self, key: &str, seed: impl FnOnce() -> Vec<T>) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(content) = self.get(key) {
            if let Ok(records) = serde_json::from_str(&content) {
                return Ok(records);
            }
        }
        let records = seed();
        self.write_json(key, &records)?;
        Ok(records)
    }

    /// Write data atomically using temp file + rename
    ///
    /// Ensures the document is either fully written or not at all.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, path)?;

        Ok(())
    }
}
