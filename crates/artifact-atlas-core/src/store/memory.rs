//! In-memory [`ArtifactStore`] implementation for testing and embedding.
//!
//! Records live in a `BTreeMap` keyed by id behind `std::sync::RwLock`, so
//! listing is naturally ordered by id like the SQLite backend.

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::ArtifactRecord;

use super::ArtifactStore;

/// In-memory store for tests and callers that do not need durability.
pub struct InMemoryStore {
    records: RwLock<BTreeMap<String, ArtifactRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("in-memory store lock poisoned")
}

#[async_trait]
impl ArtifactStore for InMemoryStore {
    async fn upsert_batch(&self, batch: &[ArtifactRecord]) -> Result<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        for record in batch {
            records.insert(record.id.clone(), record.clone());
        }
        Ok(())
    }

    async fn list_artifacts(&self) -> Result<Vec<ArtifactRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.values().cloned().collect())
    }

    async fn get_artifact(&self, id: &str) -> Result<Option<ArtifactRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(id).cloned())
    }

    async fn count(&self) -> Result<usize> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.len())
    }
}
