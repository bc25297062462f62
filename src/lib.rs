//! # Artifact Atlas
//!
//! Ingests museum artifact records from the Smithsonian Open Access
//! catalog, normalizes and deduplicates them, links them along four
//! relation dimensions (cultural, form, thematic, spatial), stores them in
//! SQLite, and serves them as JSON.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────────┐   ┌──────────┐
//! │  Catalog    │──▶│  Pipeline (core)     │──▶│  SQLite  │
//! │ Smithsonian │   │ extract/dedupe/relate│   │ artifacts│
//! └─────────────┘   └──────────────────────┘   └────┬─────┘
//!                                                   │
//!                              ┌────────────────────┤
//!                              ▼                    ▼
//!                         ┌──────────┐        ┌──────────┐
//!                         │   CLI    │        │   HTTP   │
//!                         │ (atlas)  │        │   JSON   │
//!                         └──────────┘        └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! atlas init                    # create database
//! atlas sync                    # fetch, relate, and store
//! atlas stats                   # what got stored
//! atlas serve                   # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`catalog`] | Smithsonian catalog client |
//! | [`ingest`] | Sync pipeline orchestration |
//! | [`sqlite_store`] | SQLite artifact store |
//! | [`collection`] | Client-facing JSON shape |
//! | [`server`] | HTTP server |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod catalog;
pub mod collection;
pub mod config;
pub mod db;
pub mod export;
pub mod get;
pub mod ingest;
pub mod migrate;
pub mod progress;
pub mod server;
pub mod sources;
pub mod sqlite_store;
pub mod stats;
pub mod traits;
