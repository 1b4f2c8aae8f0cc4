//! Durable storage for the name pool.
//!
//! The pool is a flat JSON array of strings. There is no schema version; a
//! missing or unreadable document is an empty pool.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::error::Result;

/// Port the pool store persists through.
pub trait PoolRepository {
    fn load(&self) -> Result<Vec<String>>;
    fn save(&self, labels: &[String]) -> Result<()>;
}

/// Pool persisted as one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PoolRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Vec<String>>(&content) {
            Ok(labels) => Ok(labels),
            Err(e) => {
                warn!(
                    "pool file {} is malformed ({}), starting empty",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, labels: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(labels)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory pool storage. Clones share the same backing list.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    labels: Arc<Mutex<Vec<String>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: Arc::new(Mutex::new(labels.into_iter().map(Into::into).collect())),
        }
    }

    /// What was last saved.
    pub fn stored(&self) -> Vec<String> {
        match self.labels.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PoolRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.stored())
    }

    fn save(&self, labels: &[String]) -> Result<()> {
        let mut guard = match self.labels.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = labels.to_vec();
        Ok(())
    }
}
