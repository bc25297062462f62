//! Collection statistics.
//!
//! Summarizes what is stored: artifact count, the per-museum distribution,
//! and how well connected the relation graph is along each dimension. Used
//! by `atlas stats` to confirm a sync did what it should.

use anyhow::Result;
use sqlx::Row;

use artifact_atlas_core::models::ArtifactRecord;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;
use crate::traits::ArtifactStore;

/// Records with at least one related id, per dimension.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RelationCoverage {
    pub cultural: usize,
    pub form: usize,
    pub thematic: usize,
    pub spatial: usize,
    /// Sum of all relation list lengths.
    pub edges: usize,
}

pub fn relation_coverage(records: &[ArtifactRecord]) -> RelationCoverage {
    let mut coverage = RelationCoverage::default();
    for r in records {
        let rel = &r.relations;
        coverage.cultural += usize::from(!rel.cultural.is_empty());
        coverage.form += usize::from(!rel.form.is_empty());
        coverage.thematic += usize::from(!rel.thematic.is_empty());
        coverage.spatial += usize::from(!rel.spatial.is_empty());
        coverage.edges += rel.len();
    }
    coverage
}

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());

    let museum_rows = sqlx::query(
        "SELECT museum_name, COUNT(*) AS n FROM artifacts GROUP BY museum_name ORDER BY n DESC, museum_name ASC",
    )
    .fetch_all(&pool)
    .await?;
    let last_update: Option<i64> = sqlx::query_scalar("SELECT MAX(updated_at) FROM artifacts")
        .fetch_one(&pool)
        .await?;

    let records = store.list_artifacts().await?;
    let coverage = relation_coverage(&records);

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("Artifact Atlas — Collection Stats");
    println!("=================================");
    println!();
    println!("  Database:    {}", config.db.path.display());
    println!("  Size:        {}", format_bytes(db_size));
    println!("  Artifacts:   {}", records.len());
    println!(
        "  Last sync:   {}",
        last_update
            .map(format_ts_iso)
            .unwrap_or_else(|| "never".to_string())
    );
    println!();

    if !museum_rows.is_empty() {
        println!("  By museum:");
        for row in &museum_rows {
            let name: String = row.get("museum_name");
            let n: i64 = row.get("n");
            println!("    {:<44} {:>6}", name, n);
        }
        println!();
    }

    println!("  Relations:   {} edges", coverage.edges);
    println!("    cultural   {:>6} artifacts", coverage.cultural);
    println!("    form       {:>6} artifacts", coverage.form);
    println!("    thematic   {:>6} artifacts", coverage.thematic);
    println!("    spatial    {:>6} artifacts", coverage.spatial);

    pool.close().await;
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}
