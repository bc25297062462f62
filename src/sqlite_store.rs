//! SQLite-backed [`ArtifactStore`] implementation.
//!
//! Each record is one row of the `artifacts` table keyed by `id`. List
//! fields and the relation set are stored as JSON text and decoded on read.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use artifact_atlas_core::models::{ArtifactRecord, RelationSet};
use artifact_atlas_core::store::ArtifactStore;

const SELECT_COLUMNS: &str = "SELECT id, title, cultures, places, date, form, description, \
     image_url, unit_code, museum_name, themes, names, relations FROM artifacts";

/// SQLite implementation of the [`ArtifactStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn decode_list(row: &SqliteRow, column: &str) -> Result<Vec<String>> {
    let raw: String = row.get(column);
    serde_json::from_str(&raw).with_context(|| format!("corrupt JSON in column '{}'", column))
}

fn row_to_record(row: &SqliteRow) -> Result<ArtifactRecord> {
    let relations_json: String = row.get("relations");
    let relations: RelationSet =
        serde_json::from_str(&relations_json).context("corrupt JSON in column 'relations'")?;

    Ok(ArtifactRecord {
        id: row.get("id"),
        title: row.get("title"),
        cultures: decode_list(row, "cultures")?,
        places: decode_list(row, "places")?,
        date: row.get("date"),
        form: row.get("form"),
        description: row.get("description"),
        image_url: row.get("image_url"),
        unit_code: row.get("unit_code"),
        museum_name: row.get("museum_name"),
        themes: decode_list(row, "themes")?,
        names: decode_list(row, "names")?,
        relations,
    })
}

#[async_trait]
impl ArtifactStore for SqliteStore {
    async fn upsert_batch(&self, batch: &[ArtifactRecord]) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        for record in batch {
            sqlx::query(
                r#"
                INSERT INTO artifacts (id, title, cultures, places, date, form, description,
                                       image_url, unit_code, museum_name, themes, names,
                                       relations, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    cultures = excluded.cultures,
                    places = excluded.places,
                    date = excluded.date,
                    form = excluded.form,
                    description = excluded.description,
                    image_url = excluded.image_url,
                    unit_code = excluded.unit_code,
                    museum_name = excluded.museum_name,
                    themes = excluded.themes,
                    names = excluded.names,
                    relations = excluded.relations,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(&record.id)
            .bind(&record.title)
            .bind(serde_json::to_string(&record.cultures)?)
            .bind(serde_json::to_string(&record.places)?)
            .bind(&record.date)
            .bind(&record.form)
            .bind(&record.description)
            .bind(&record.image_url)
            .bind(&record.unit_code)
            .bind(&record.museum_name)
            .bind(serde_json::to_string(&record.themes)?)
            .bind(serde_json::to_string(&record.names)?)
            .bind(serde_json::to_string(&record.relations)?)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_artifacts(&self) -> Result<Vec<ArtifactRecord>> {
        let rows = sqlx::query(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn get_artifact(&self, id: &str) -> Result<Option<ArtifactRecord>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_record).transpose()
    }

    async fn count(&self) -> Result<usize> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artifacts")
            .fetch_one(&self.pool)
            .await?;
        Ok(n as usize)
    }
}
