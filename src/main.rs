//! # Artifact Atlas CLI (`atlas`)
//!
//! ## Usage
//!
//! ```bash
//! atlas --config ./config/atlas.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `atlas init` | Create the SQLite database and schema |
//! | `atlas units` | List configured catalog queries |
//! | `atlas sync` | Fetch, extract, relate, and store artifacts |
//! | `atlas get <id>` | Print one stored artifact |
//! | `atlas stats` | Collection and relation statistics |
//! | `atlas export` | Write the collection as JSON |
//! | `atlas serve` | Start the HTTP server |
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` (for example
//! `RUST_LOG=artifact_atlas=debug`) to change the filter.

use artifact_atlas::progress::ProgressMode;
use artifact_atlas::{config, export, get, ingest, migrate, server, sources, stats};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Artifact Atlas CLI: museum artifact ingestion and relation graph.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file.
#[derive(Parser)]
#[command(
    name = "atlas",
    about = "Artifact Atlas — museum artifact ingestion and relation graph",
    version,
    long_about = "Artifact Atlas fetches artifact records from the Smithsonian Open Access catalog, \
    keeps those with images, deduplicates them, links them by shared culture, form, theme, and place, \
    and serves the result as JSON."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/atlas.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the `artifacts` table.
    /// Running it multiple times is safe.
    Init,

    /// List configured catalog queries and API key status.
    Units,

    /// Fetch artifacts from the catalog and store them with relations.
    ///
    /// Requires the catalog API key in the environment (see `[catalog].api_key_env`).
    Sync {
        /// Fetch and relate, but do not write to the database.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of unique artifacts to keep (overrides `[pipeline].max_records`).
        #[arg(long)]
        limit: Option<usize>,

        /// Progress output on stderr. Defaults to `human` on a terminal, `off` otherwise.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// Print one stored artifact by id.
    Get {
        /// Artifact id (e.g. `edanmdm:nmai_123`).
        id: String,
    },

    /// Show collection statistics.
    Stats,

    /// Export the collection as JSON.
    Export {
        /// Output file. Writes to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Units => {
            sources::list_units(&cfg)?;
        }
        Commands::Sync {
            dry_run,
            limit,
            progress,
        } => {
            let mode = progress.unwrap_or_else(ProgressMode::default_for_tty);
            ingest::run_sync(&cfg, dry_run, limit, mode).await?;
        }
        Commands::Get { id } => {
            get::run_get(&cfg, &id).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
        Commands::Export { output } => {
            export::run_export(&cfg, output.as_deref()).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
