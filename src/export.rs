//! Export the stored collection as JSON.
//!
//! Produces the same array `GET /api/collection` serves, so a static front
//! end can be deployed without running `atlas serve`.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::collection::to_collection;
use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;
use crate::traits::ArtifactStore;

/// Export the collection as pretty-printed JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub async fn run_export(config: &Config, output: Option<&Path>) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let records = store.list_artifacts().await?;
    pool.close().await;

    let items = to_collection(records);
    let count = items.len();
    let json = serde_json::to_string_pretty(&items)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported {} artifacts to {}", count, path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
