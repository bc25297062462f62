//! Smithsonian Open Access catalog client.
//!
//! Queries the Open Access search endpoint one page at a time and returns
//! the raw `response.rows` array. Only records with image media are
//! requested (`online_media_type=Images`); the extractor still checks each
//! record, since the filter is advisory.
//!
//! # Configuration
//!
//! ```toml
//! [catalog]
//! base_url = "https://api.si.edu/openaccess/api/v1.0/search"
//! api_key_env = "SMITHSONIAN_API_KEY"
//! rows_per_page = 100
//! timeout_secs = 30
//! ```
//!
//! # Environment Variables
//!
//! The API key is read from the variable named by `catalog.api_key_env`
//! (`SMITHSONIAN_API_KEY` by default). It is required for `atlas sync`.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::config::{CatalogConfig, UnitQuery};
use crate::traits::Catalog;

/// Catalog client for the Smithsonian Open Access API.
pub struct SmithsonianCatalog {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    rows_per_page: usize,
}

impl SmithsonianCatalog {
    pub fn new(config: &CatalogConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            rows_per_page: config.rows_per_page,
        })
    }

    /// Build a client, reading the API key from the configured variable.
    pub fn from_env(config: &CatalogConfig) -> Result<Self> {
        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => bail!(
                "Missing catalog API key: set the {} environment variable",
                config.api_key_env
            ),
        };
        Self::new(config, api_key)
    }
}

#[async_trait]
impl Catalog for SmithsonianCatalog {
    fn name(&self) -> &str {
        "smithsonian"
    }

    async fn fetch_page(&self, unit: &UnitQuery, start: usize) -> Result<Vec<Value>> {
        let rows = self.rows_per_page.to_string();
        let start_param = start.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("q", unit.query.as_str()),
                ("rows", rows.as_str()),
                ("start", start_param.as_str()),
                ("online_media_type", "Images"),
            ])
            .send()
            .await
            .with_context(|| format!("request for '{}' failed", unit.label))?;

        let status = response.status();
        if !status.is_success() {
            bail!("catalog returned HTTP {} for '{}'", status, unit.label);
        }

        let body: Value = response
            .json()
            .await
            .with_context(|| format!("invalid JSON for '{}'", unit.label))?;
        Ok(rows_of(body))
    }
}

/// Pulls `response.rows` out of a search response; anything else is empty.
pub fn rows_of(mut body: Value) -> Vec<Value> {
    match body.pointer_mut("/response/rows").map(Value::take) {
        Some(Value::Array(rows)) => rows,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_are_extracted_from_response() {
        let body = json!({ "status": 200, "response": { "rows": [{ "id": "a" }, { "id": "b" }], "rowCount": 2 } });
        let rows = rows_of(body);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "a");
    }

    #[test]
    fn unexpected_shapes_are_empty() {
        assert!(rows_of(json!({})).is_empty());
        assert!(rows_of(json!({ "response": {} })).is_empty());
        assert!(rows_of(json!({ "response": { "rows": "nope" } })).is_empty());
        assert!(rows_of(json!(null)).is_empty());
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let config = CatalogConfig {
            api_key_env: "ATLAS_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..CatalogConfig::default()
        };
        let err = SmithsonianCatalog::from_env(&config).err().unwrap();
        assert!(err.to_string().contains("ATLAS_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
