//! Sync pipeline orchestration.
//!
//! Coordinates the full sync flow: catalog fetch → extraction →
//! deduplication → relation graph → batched storage. Fetching is the only
//! concurrent phase; the middle of the pipeline is the synchronous core
//! from `artifact-atlas-core`.
//!
//! Nothing here retries. A failed catalog page counts as an empty page and
//! a failed storage batch is reported and skipped; earlier batches stay
//! written.

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

use artifact_atlas_core::models::ArtifactRecord;
use artifact_atlas_core::relations::build_relations_with_progress;
use artifact_atlas_core::store::memory::InMemoryStore;
use artifact_atlas_core::{dedupe, extract};

use crate::catalog::SmithsonianCatalog;
use crate::config::{Config, UnitQuery};
use crate::db;
use crate::migrate;
use crate::progress::{NoProgress, ProgressMode, SyncProgressEvent, SyncProgressReporter};
use crate::sqlite_store::SqliteStore;
use crate::traits::{ArtifactStore, Catalog};

/// Museums listed in the sync summary.
const TOP_MUSEUMS: usize = 8;

/// Knobs for one pipeline run, usually taken from [`Config`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub units: Vec<UnitQuery>,
    pub pages_per_unit: usize,
    pub rows_per_page: usize,
    pub max_records: usize,
    pub max_relations: usize,
    pub batch_size: usize,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            units: config.catalog.units.clone(),
            pages_per_unit: config.catalog.pages_per_unit,
            rows_per_page: config.catalog.rows_per_page,
            max_records: config.pipeline.max_records,
            max_relations: config.pipeline.max_relations,
            batch_size: config.pipeline.batch_size,
        }
    }
}

/// Output of the synchronous middle of the pipeline.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub fetched: usize,
    pub extracted: usize,
    /// Deduplicated, capped, and carrying relations.
    pub records: Vec<ArtifactRecord>,
}

/// Outcome of writing records to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersistReport {
    pub stored: usize,
    pub batches_ok: usize,
    pub batches_failed: usize,
}

/// Counts for a whole run, printed by `atlas sync`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncSummary {
    pub fetched: usize,
    pub extracted: usize,
    pub unique: usize,
    pub stored: usize,
    pub batches_failed: usize,
    /// `(museum_name, count)`, largest first.
    pub museums: Vec<(String, usize)>,
}

/// The sync pipeline, wired to its collaborators at construction time.
pub struct SyncPipeline {
    catalog: Arc<dyn Catalog>,
    store: Arc<dyn ArtifactStore>,
    settings: PipelineSettings,
    progress: Box<dyn SyncProgressReporter>,
}

impl SyncPipeline {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        store: Arc<dyn ArtifactStore>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            catalog,
            store,
            settings,
            progress: Box::new(NoProgress),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn SyncProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Fetch every configured (unit, page) concurrently.
    ///
    /// Pages are reassembled in request order, so the same catalog
    /// responses always produce the same record sequence.
    pub async fn fetch(&self) -> Vec<Value> {
        let mut tasks = JoinSet::new();
        let mut slot = 0usize;
        for unit in &self.settings.units {
            for page in 0..self.settings.pages_per_unit {
                let catalog = Arc::clone(&self.catalog);
                let unit = unit.clone();
                let start = page * self.settings.rows_per_page;
                let index = slot;
                tasks.spawn(async move {
                    let result = catalog.fetch_page(&unit, start).await;
                    (index, unit, page, result)
                });
                slot += 1;
            }
        }

        let mut pages: Vec<(usize, Vec<Value>)> = Vec::with_capacity(slot);
        while let Some(joined) = tasks.join_next().await {
            let (index, unit, page, result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    tracing::warn!(error = %e, "catalog fetch task aborted");
                    continue;
                }
            };
            let rows = match result {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!(
                        catalog = self.catalog.name(),
                        unit = %unit.label,
                        page = page + 1,
                        error = %e,
                        "catalog page failed; treating as empty"
                    );
                    Vec::new()
                }
            };
            self.progress.report(SyncProgressEvent::PageFetched {
                unit: unit.label.clone(),
                page: page + 1,
                count: rows.len(),
            });
            pages.push((index, rows));
        }

        pages.sort_by_key(|(index, _)| *index);
        let raw: Vec<Value> = pages.into_iter().flat_map(|(_, rows)| rows).collect();
        self.progress
            .report(SyncProgressEvent::Fetched { total: raw.len() });
        raw
    }

    /// Extract, deduplicate, and relate raw records. Pure CPU work.
    pub fn prepare(&self, raw: Vec<Value>) -> Prepared {
        let fetched = raw.len();
        let extracted: Vec<ArtifactRecord> = raw.iter().filter_map(extract).collect();
        let extracted_count = extracted.len();
        tracing::debug!(
            fetched,
            extracted = extracted_count,
            "extraction finished"
        );

        let unique = dedupe(extracted, self.settings.max_records);
        self.progress.report(SyncProgressEvent::Extracted {
            fetched,
            extracted: extracted_count,
            unique: unique.len(),
        });

        let records =
            build_relations_with_progress(unique, self.settings.max_relations, |n, total| {
                self.progress
                    .report(SyncProgressEvent::Relating { n, total })
            });

        Prepared {
            fetched,
            extracted: extracted_count,
            records,
        }
    }

    /// Write records in batches of `batch_size`. Failed batches are skipped.
    pub async fn persist(&self, records: &[ArtifactRecord]) -> PersistReport {
        let mut report = PersistReport::default();
        let batch_size = self.settings.batch_size.max(1);
        let batches = records.len().div_ceil(batch_size);

        for (i, batch) in records.chunks(batch_size).enumerate() {
            let ok = match self.store.upsert_batch(batch).await {
                Ok(()) => {
                    report.stored += batch.len();
                    report.batches_ok += 1;
                    true
                }
                Err(e) => {
                    tracing::warn!(
                        batch = i + 1,
                        batches,
                        size = batch.len(),
                        error = %e,
                        "storage batch failed"
                    );
                    report.batches_failed += 1;
                    false
                }
            };
            self.progress.report(SyncProgressEvent::Stored {
                batch: i + 1,
                batches,
                ok,
            });
        }

        report
    }

    /// Fetch, prepare, and persist.
    pub async fn run(&self) -> SyncSummary {
        let raw = self.fetch().await;
        let prepared = self.prepare(raw);
        let report = self.persist(&prepared.records).await;
        summarize(&prepared, report)
    }

    /// Fetch and prepare without touching the store.
    pub async fn run_dry(&self) -> SyncSummary {
        let raw = self.fetch().await;
        let prepared = self.prepare(raw);
        summarize(&prepared, PersistReport::default())
    }
}

fn summarize(prepared: &Prepared, report: PersistReport) -> SyncSummary {
    SyncSummary {
        fetched: prepared.fetched,
        extracted: prepared.extracted,
        unique: prepared.records.len(),
        stored: report.stored,
        batches_failed: report.batches_failed,
        museums: museum_distribution(&prepared.records),
    }
}

/// Record count per museum, largest first, ties by name.
pub fn museum_distribution(records: &[ArtifactRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.museum_name.as_str()).or_default() += 1;
    }
    let mut museums: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    museums.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    museums
}

/// CLI entry point for `atlas sync`.
pub async fn run_sync(
    config: &Config,
    dry_run: bool,
    limit: Option<usize>,
    progress: ProgressMode,
) -> Result<()> {
    let mut settings = PipelineSettings::from_config(config);
    if let Some(lim) = limit {
        if lim == 0 {
            bail!("--limit must be >= 1");
        }
        settings.max_records = lim;
    }

    let catalog: Arc<dyn Catalog> = Arc::new(SmithsonianCatalog::from_env(&config.catalog)?);

    if dry_run {
        let pipeline = SyncPipeline::new(catalog, Arc::new(InMemoryStore::new()), settings)
            .with_progress(progress.reporter());
        let summary = pipeline.run_dry().await;
        println!("sync smithsonian (dry-run)");
        print_summary(&summary, false);
        return Ok(());
    }

    let pool = db::connect(config).await?;
    migrate::apply_schema(&pool).await?;
    let store = Arc::new(SqliteStore::new(pool.clone()));

    let pipeline = SyncPipeline::new(catalog, store, settings).with_progress(progress.reporter());
    let summary = pipeline.run().await;

    println!("sync smithsonian");
    print_summary(&summary, true);

    pool.close().await;
    Ok(())
}

fn print_summary(summary: &SyncSummary, stored: bool) {
    println!("  fetched: {} raw objects", summary.fetched);
    println!("  extracted: {} with images", summary.extracted);
    println!("  unique: {}", summary.unique);
    if stored {
        println!("  stored: {}", summary.stored);
        println!("  failed batches: {}", summary.batches_failed);
    }
    println!("  museums: {}", summary.museums.len());
    for (museum, count) in summary.museums.iter().take(TOP_MUSEUMS) {
        println!("    {}: {}", museum, count);
    }
    println!("ok");
}
