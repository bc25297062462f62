use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    apply_schema(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Creates the schema on an open pool. Safe to run repeatedly.
pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    // List-valued fields and relations are JSON text.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artifacts (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            cultures TEXT NOT NULL DEFAULT '[]',
            places TEXT NOT NULL DEFAULT '[]',
            date TEXT NOT NULL,
            form TEXT NOT NULL,
            description TEXT NOT NULL,
            image_url TEXT NOT NULL,
            unit_code TEXT NOT NULL,
            museum_name TEXT NOT NULL,
            themes TEXT NOT NULL DEFAULT '[]',
            names TEXT NOT NULL DEFAULT '[]',
            relations TEXT NOT NULL DEFAULT '{}',
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_artifacts_museum ON artifacts(museum_name)")
        .execute(pool)
        .await?;

    Ok(())
}
