//! Collaborator traits for the sync pipeline.
//!
//! The pipeline never constructs its collaborators itself: a [`Catalog`]
//! and an [`ArtifactStore`] are handed to
//! [`SyncPipeline::new`](crate::ingest::SyncPipeline::new). Tests and custom
//! binaries swap in their own implementations.
//!
//! ```text
//!  Catalog ──▶ SyncPipeline ──▶ ArtifactStore
//!  (remote)    extract/dedupe/    (SQLite, memory)
//!              relate
//! ```

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::config::UnitQuery;

pub use artifact_atlas_core::store::ArtifactStore;

/// A remote catalog that returns raw artifact records one page at a time.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use anyhow::Result;
/// use artifact_atlas::config::UnitQuery;
/// use artifact_atlas::traits::Catalog;
/// use serde_json::Value;
///
/// pub struct FixtureCatalog {
///     rows: Vec<Value>,
/// }
///
/// #[async_trait]
/// impl Catalog for FixtureCatalog {
///     fn name(&self) -> &str { "fixture" }
///
///     async fn fetch_page(&self, _unit: &UnitQuery, start: usize) -> Result<Vec<Value>> {
///         Ok(if start == 0 { self.rows.clone() } else { vec![] })
///     }
/// }
/// ```
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Short name used in log and progress output.
    fn name(&self) -> &str;

    /// Fetch one page of raw records for `unit`, starting at offset `start`.
    ///
    /// Errors are treated by the pipeline as an empty page.
    async fn fetch_page(&self, unit: &UnitQuery, start: usize) -> Result<Vec<Value>>;
}
