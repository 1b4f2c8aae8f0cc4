//! PoolStore: the ordered set of candidate names.
//!
//! Labels are trimmed before comparison and storage, never empty, and never
//! duplicated (exact, case-sensitive match). Every mutation is written
//! through the injected [`PoolRepository`]; a failed write is logged and the
//! in-memory pool stays authoritative.

use tracing::{debug, warn};

use crate::storage::PoolRepository;

pub struct PoolStore<R: PoolRepository> {
    labels: Vec<String>,
    repo: R,
}

impl<R: PoolRepository> PoolStore<R> {
    /// Restore the pool from `repo`. Unreadable storage yields an empty pool.
    pub fn open(repo: R) -> Self {
        let stored = match repo.load() {
            Ok(labels) => labels,
            Err(e) => {
                warn!("PoolStore: could not load pool, starting empty: {}", e);
                Vec::new()
            }
        };

        let mut labels: Vec<String> = Vec::with_capacity(stored.len());
        for raw in stored {
            let label = raw.trim();
            if !label.is_empty() && !labels.iter().any(|l| l == label) {
                labels.push(label.to_string());
            }
        }
        debug!("PoolStore: restored {} names", labels.len());

        Self { labels, repo }
    }

    pub fn add(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return false;
        }
        self.labels.push(label.to_string());
        self.persist();
        true
    }

    pub fn remove_at(&mut self, index: usize) {
        if index >= self.labels.len() {
            return;
        }
        self.labels.remove(index);
        self.persist();
    }

    pub fn remove_by_label(&mut self, label: &str) -> bool {
        let label = label.trim();
        match self.labels.iter().position(|l| l == label) {
            Some(idx) => {
                self.labels.remove(idx);
                self.persist();
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.labels.clear();
        self.persist();
    }

    /// Bulk-set the pool. The caller guarantees uniqueness.
    pub fn replace_all(&mut self, labels: Vec<String>) {
        self.labels = labels;
        self.persist();
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.labels.clone()
    }

    fn persist(&self) {
        if let Err(e) = self.repo.save(&self.labels) {
            warn!("PoolStore: failed to persist {} names: {}", self.labels.len(), e);
        }
    }
}
