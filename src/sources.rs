use anyhow::Result;

use artifact_atlas_core::museums::museum_name;

use crate::config::Config;

/// Status row for one configured catalog query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitStatus {
    pub query: String,
    pub label: String,
    /// Resolved museum name for `unit_code:` queries.
    pub museum: Option<String>,
}

pub fn get_units(config: &Config) -> Vec<UnitStatus> {
    config
        .catalog
        .units
        .iter()
        .map(|unit| UnitStatus {
            query: unit.query.clone(),
            label: unit.label.clone(),
            museum: unit.unit_code().map(|code| museum_name(code).to_string()),
        })
        .collect()
}

pub fn list_units(config: &Config) -> Result<()> {
    let key_set = std::env::var(&config.catalog.api_key_env)
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false);

    println!(
        "catalog: {}  ({} {})",
        config.catalog.base_url,
        config.catalog.api_key_env,
        if key_set { "set" } else { "NOT SET" }
    );
    println!(
        "pages per unit: {}  rows per page: {}",
        config.catalog.pages_per_unit, config.catalog.rows_per_page
    );
    println!();

    println!("{:<22} {:<28} MUSEUM", "QUERY", "LABEL");
    for unit in get_units(config) {
        println!(
            "{:<22} {:<28} {}",
            unit.query,
            unit.label,
            unit.museum.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnitQuery;

    #[test]
    fn unit_codes_resolve_to_museums() {
        let mut config = Config::with_db_path("x.sqlite");
        config.catalog.units = vec![
            UnitQuery::new("unit_code:FSG", "Asian art"),
            UnitQuery::new("pottery", "Pottery search"),
        ];
        let units = get_units(&config);
        assert_eq!(units[0].museum.as_deref(), Some("Freer/Sackler Asian Art"));
        assert_eq!(units[1].museum, None);
    }
}
