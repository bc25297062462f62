//! # Artifact Atlas Core
//!
//! Pure, synchronous logic for Artifact Atlas: the canonical artifact
//! model, field extraction from raw catalog records, theme derivation,
//! deduplication, the relation graph, and the store abstraction.
//!
//! This crate contains no tokio, sqlx, HTTP, or filesystem I/O. Raw catalog
//! records enter as [`serde_json::Value`] and leave as enriched
//! [`models::ArtifactRecord`]s.
//!
//! ```text
//! raw Value ──▶ extract ──▶ dedupe ──▶ build_relations ──▶ ArtifactStore
//!                  │
//!                  └── derive_themes, museum_name
//! ```

pub mod dedup;
pub mod extract;
pub mod models;
pub mod museums;
pub mod relations;
pub mod store;
pub mod themes;

pub use dedup::{dedupe, DEFAULT_MAX_RECORDS};
pub use extract::extract;
pub use models::{ArtifactRecord, RelationSet};
pub use relations::{build_relations, DEFAULT_MAX_RELATIONS};
