//! Sync progress reporting.
//!
//! Reports observable progress during `atlas sync` so users see which pages
//! came back, how many records survived extraction, how far relation
//! building has got, and which storage batches landed. Progress is emitted
//! on **stderr** so stdout remains parseable for scripts.

use std::io::Write;

/// A single progress event for sync.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncProgressEvent {
    /// One catalog page returned (`count` may be zero on failure).
    PageFetched {
        unit: String,
        page: usize,
        count: usize,
    },
    /// All pages are in.
    Fetched { total: usize },
    /// Extraction and dedup finished.
    Extracted {
        fetched: usize,
        extracted: usize,
        unique: usize,
    },
    /// Relation building: `n` records processed out of `total`.
    Relating { n: usize, total: usize },
    /// A storage batch finished.
    Stored {
        batch: usize,
        batches: usize,
        ok: bool,
    },
}

/// Reports sync progress. Implementations write to stderr (human or JSON).
pub trait SyncProgressReporter: Send + Sync {
    /// Emit a progress event. Called from the sync pipeline.
    fn report(&self, event: SyncProgressEvent);
}

/// Human-friendly progress on stderr.
pub struct StderrProgress;

impl SyncProgressReporter for StderrProgress {
    fn report(&self, event: SyncProgressEvent) {
        let line = match &event {
            SyncProgressEvent::PageFetched { unit, page, count } => {
                format!("  {} (page {}): {} objects\n", unit, page, count)
            }
            SyncProgressEvent::Fetched { total } => {
                format!("fetched {} raw objects\n", format_number(*total as u64))
            }
            SyncProgressEvent::Extracted {
                fetched,
                extracted,
                unique,
            } => format!(
                "extracted {} / {} objects with images, {} unique\n",
                format_number(*extracted as u64),
                format_number(*fetched as u64),
                format_number(*unique as u64)
            ),
            SyncProgressEvent::Relating { n, total } => format!(
                "relating  {} / {} objects\n",
                format_number(*n as u64),
                format_number(*total as u64)
            ),
            SyncProgressEvent::Stored { batch, batches, ok } => format!(
                "storing   batch {}/{} {}\n",
                batch,
                batches,
                if *ok { "ok" } else { "FAILED" }
            ),
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl SyncProgressReporter for JsonProgress {
    fn report(&self, event: SyncProgressEvent) {
        let obj = match &event {
            SyncProgressEvent::PageFetched { unit, page, count } => serde_json::json!({
                "event": "progress",
                "phase": "fetching",
                "unit": unit,
                "page": page,
                "count": count
            }),
            SyncProgressEvent::Fetched { total } => serde_json::json!({
                "event": "progress",
                "phase": "fetched",
                "total": total
            }),
            SyncProgressEvent::Extracted {
                fetched,
                extracted,
                unique,
            } => serde_json::json!({
                "event": "progress",
                "phase": "extracted",
                "fetched": fetched,
                "extracted": extracted,
                "unique": unique
            }),
            SyncProgressEvent::Relating { n, total } => serde_json::json!({
                "event": "progress",
                "phase": "relating",
                "n": n,
                "total": total
            }),
            SyncProgressEvent::Stored { batch, batches, ok } => serde_json::json!({
                "event": "progress",
                "phase": "storing",
                "batch": batch,
                "batches": batches,
                "ok": ok
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl SyncProgressReporter for NoProgress {
    fn report(&self, _event: SyncProgressEvent) {}
}

pub(crate) fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Build a reporter for this mode.
    pub fn reporter(&self) -> Box<dyn SyncProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
