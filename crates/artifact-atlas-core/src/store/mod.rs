//! Storage abstraction for Artifact Atlas.
//!
//! The [`ArtifactStore`] trait is the persistence seam of the pipeline:
//! the orchestrator writes enriched records through it in fixed-size
//! batches, and the HTTP layer reads them back. Backends are pluggable
//! (SQLite in the application crate, [`memory::InMemoryStore`] here).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::ArtifactRecord;

/// Abstract storage backend for enriched artifact records.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`upsert_batch`](ArtifactStore::upsert_batch) | Insert new ids, overwrite existing ones |
/// | [`list_artifacts`](ArtifactStore::list_artifacts) | All records, ordered by id |
/// | [`get_artifact`](ArtifactStore::get_artifact) | One record by id |
/// | [`count`](ArtifactStore::count) | Number of stored records |
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Upsert a batch by `id`. A batch either lands entirely or not at all;
    /// nothing is promised across batches.
    async fn upsert_batch(&self, batch: &[ArtifactRecord]) -> Result<()>;

    async fn list_artifacts(&self) -> Result<Vec<ArtifactRecord>>;

    async fn get_artifact(&self, id: &str) -> Result<Option<ArtifactRecord>>;

    async fn count(&self) -> Result<usize>;
}
