//! Durable key-value storage for game state
//!
//! The game writes whole serialized documents under a handful of fixed
//! keys. Writes are synchronous and the caller decides whether a failure
//! matters.

use crate::error::{GeocoinError, GeocoinResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key of the serialized cache state store
pub const CACHES_KEY: &str = "geocoin.caches";

/// Key of the serialized player state
pub const PLAYER_KEY: &str = "geocoin.player";

/// Durable key-value collaborator
pub trait DurableStorage {
    /// Value stored under `key`, or `None` if nothing was written
    fn read(&self, key: &str) -> GeocoinResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&mut self, key: &str, value: &str) -> GeocoinResult<()>;

    /// Delete `key` if present
    fn remove(&mut self, key: &str) -> GeocoinResult<()>;
}

/// In-process storage, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStorage for MemoryStorage {
    fn read(&self, key: &str) -> GeocoinResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> GeocoinResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> GeocoinResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a state directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> GeocoinResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| GeocoinError::io(format!("creating state directory {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    /// Directory holding the state files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl DurableStorage for FileStorage {
    fn read(&self, key: &str) -> GeocoinResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| GeocoinError::storage(key, format!("reading {}: {}", path.display(), e)))?;
        Ok(Some(content))
    }

    fn write(&mut self, key: &str, value: &str) -> GeocoinResult<()> {
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");

        fs::write(&staging, value).map_err(|e| {
            GeocoinError::storage(key, format!("writing {}: {}", staging.display(), e))
        })?;
        fs::rename(&staging, &path)
            .map_err(|e| GeocoinError::storage(key, format!("replacing {}: {}", path.display(), e)))?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> GeocoinResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                GeocoinError::storage(key, format!("removing {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }
}
