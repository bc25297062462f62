//! Artifact retrieval by id for `atlas get`.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;
use crate::traits::ArtifactStore;

/// CLI entry point. Prints one stored artifact and its relations.
pub async fn run_get(config: &Config, id: &str) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let record = store.get_artifact(id).await?;
    pool.close().await;

    let record = match record {
        Some(r) => r,
        None => bail!("artifact not found: {}", id),
    };

    println!("--- Artifact ---");
    println!("id:           {}", record.id);
    println!("title:        {}", record.title);
    println!("museum:       {} ({})", record.museum_name, record.unit_code);
    println!("date:         {}", record.date);
    println!("form:         {}", record.form);
    println!("cultures:     {}", record.cultures.join(", "));
    println!("places:       {}", record.places.join(", "));
    println!("themes:       {}", record.themes.join(", "));
    println!("names:        {}", record.names.join(", "));
    println!("image_url:    {}", record.image_url);
    println!();

    println!("--- Description ---");
    println!("{}", record.description);
    println!();

    let relations = &record.relations;
    println!("--- Relations ({}) ---", relations.len());
    for (label, ids) in [
        ("cultural", &relations.cultural),
        ("form", &relations.form),
        ("thematic", &relations.thematic),
        ("spatial", &relations.spatial),
    ] {
        println!("{:<10} {}", label, ids.join(", "));
    }

    Ok(())
}
