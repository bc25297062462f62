//! Client-facing collection shape.
//!
//! [`CollectionItem`] is the fixed JSON object the browser client consumes.
//! It is a pure reshaping of a stored [`ArtifactRecord`]: `unit_code` is
//! dropped, everything else passes through.

use serde::Serialize;

use artifact_atlas_core::models::{ArtifactRecord, RelationSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionItem {
    pub id: String,
    pub title: String,
    pub cultures: Vec<String>,
    pub places: Vec<String>,
    pub date: String,
    pub form: String,
    pub description: String,
    pub image_url: String,
    pub museum_name: String,
    pub themes: Vec<String>,
    pub names: Vec<String>,
    pub relations: CollectionRelations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionRelations {
    pub cultural: Vec<String>,
    pub form: Vec<String>,
    pub thematic: Vec<String>,
    pub spatial: Vec<String>,
}

impl From<RelationSet> for CollectionRelations {
    fn from(relations: RelationSet) -> Self {
        Self {
            cultural: relations.cultural,
            form: relations.form,
            thematic: relations.thematic,
            spatial: relations.spatial,
        }
    }
}

impl From<ArtifactRecord> for CollectionItem {
    fn from(record: ArtifactRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            cultures: record.cultures,
            places: record.places,
            date: record.date,
            form: record.form,
            description: record.description,
            image_url: record.image_url,
            museum_name: record.museum_name,
            themes: record.themes,
            names: record.names,
            relations: record.relations.into(),
        }
    }
}

pub fn to_collection(records: Vec<ArtifactRecord>) -> Vec<CollectionItem> {
    records.into_iter().map(CollectionItem::from).collect()
}
