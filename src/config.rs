use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use artifact_atlas_core::{DEFAULT_MAX_RECORDS, DEFAULT_MAX_RELATIONS};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
    #[serde(default = "default_pages_per_unit")]
    pub pages_per_unit: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_units")]
    pub units: Vec<UnitQuery>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            rows_per_page: default_rows_per_page(),
            pages_per_unit: default_pages_per_unit(),
            timeout_secs: default_timeout_secs(),
            units: default_units(),
        }
    }
}

/// One catalog search: a query filter plus a human label for progress output.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct UnitQuery {
    pub query: String,
    pub label: String,
}

impl UnitQuery {
    pub fn new(query: &str, label: &str) -> Self {
        Self {
            query: query.to_string(),
            label: label.to_string(),
        }
    }

    /// The unit code in a `unit_code:XYZ` query, if that is its form.
    pub fn unit_code(&self) -> Option<&str> {
        self.query.strip_prefix("unit_code:")
    }
}

fn default_base_url() -> String {
    "https://api.si.edu/openaccess/api/v1.0/search".to_string()
}
fn default_api_key_env() -> String {
    "SMITHSONIAN_API_KEY".to_string()
}
fn default_rows_per_page() -> usize {
    100
}
fn default_pages_per_unit() -> usize {
    2
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_units() -> Vec<UnitQuery> {
    vec![
        UnitQuery::new("unit_code:NMAI", "American Indian"),
        UnitQuery::new("unit_code:NMAfA", "African art"),
        UnitQuery::new("unit_code:FSG", "Asian art"),
        UnitQuery::new("unit_code:NMAAHC", "African American history"),
        UnitQuery::new("unit_code:SAAM", "American Art"),
        UnitQuery::new("unit_code:NPG", "Portraits"),
        UnitQuery::new("unit_code:CHNDM", "Design objects"),
        UnitQuery::new("unit_code:ACM", "Anacostia Community Museum"),
        UnitQuery::new("unit_code:HMSG", "Hirshhorn Museum"),
    ]
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Upper bound on records entering the relation graph.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
    #[serde(default = "default_max_relations")]
    pub max_relations: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
            max_relations: default_max_relations(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_max_records() -> usize {
    DEFAULT_MAX_RECORDS
}
fn default_max_relations() -> usize {
    DEFAULT_MAX_RELATIONS
}
fn default_batch_size() -> usize {
    100
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

impl Config {
    /// Config with every optional section at its default.
    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db: DbConfig { path: path.into() },
            catalog: CatalogConfig::default(),
            pipeline: PipelineConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    // Validate catalog
    if !(1..=1000).contains(&config.catalog.rows_per_page) {
        anyhow::bail!("catalog.rows_per_page must be in [1, 1000]");
    }
    if config.catalog.pages_per_unit == 0 {
        anyhow::bail!("catalog.pages_per_unit must be >= 1");
    }
    if config.catalog.timeout_secs == 0 {
        anyhow::bail!("catalog.timeout_secs must be > 0");
    }
    if config.catalog.api_key_env.trim().is_empty() {
        anyhow::bail!("catalog.api_key_env must not be empty");
    }
    if let Some(unit) = config.catalog.units.iter().find(|u| u.query.trim().is_empty()) {
        anyhow::bail!("catalog.units: query for '{}' must not be empty", unit.label);
    }

    // Validate pipeline
    if config.pipeline.max_records == 0 {
        anyhow::bail!("pipeline.max_records must be >= 1");
    }
    if config.pipeline.max_relations == 0 {
        anyhow::bail!("pipeline.max_relations must be >= 1");
    }
    if config.pipeline.batch_size == 0 {
        anyhow::bail!("pipeline.batch_size must be >= 1");
    }

    Ok(())
}
