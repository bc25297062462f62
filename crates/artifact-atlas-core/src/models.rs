//! Core data models used throughout Artifact Atlas.
//!
//! An [`ArtifactRecord`] is created by [`extract`](crate::extract::extract),
//! gains its [`RelationSet`] once in
//! [`build_relations`](crate::relations::build_relations), and is then handed
//! unchanged to an [`ArtifactStore`](crate::store::ArtifactStore).

use serde::{Deserialize, Serialize};

/// Placeholder title for records without one.
pub const UNTITLED: &str = "Untitled";
/// Placeholder for missing date, form, and unit code.
pub const UNKNOWN: &str = "Unknown";
/// Placeholder for records without a usable free-text note.
pub const NO_DESCRIPTION: &str = "No description available";

pub const MAX_TITLE_CHARS: usize = 1000;
pub const MAX_DATE_CHARS: usize = 200;
pub const MAX_FORM_CHARS: usize = 500;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
pub const MAX_CULTURES: usize = 5;
pub const MAX_PLACES: usize = 5;
pub const MAX_THEMES: usize = 30;
pub const MAX_NAMES: usize = 20;

/// Canonical record for one real-world artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Catalog identifier. Unique only after deduplication.
    pub id: String,
    pub title: String,
    pub cultures: Vec<String>,
    pub places: Vec<String>,
    pub date: String,
    /// Comma-joined object types, e.g. `"Basket, Tray"`.
    pub form: String,
    pub description: String,
    /// Always non-empty: records without an image never get this far.
    pub image_url: String,
    /// Raw museum unit code as reported by the catalog.
    pub unit_code: String,
    pub museum_name: String,
    pub themes: Vec<String>,
    pub names: Vec<String>,
    #[serde(default)]
    pub relations: RelationSet,
}

/// Ids of related artifacts, one list per relation dimension.
///
/// Each list holds other records' ids in the order they were encountered
/// during the comparison scan, without repeats, up to the builder's cap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSet {
    #[serde(default)]
    pub cultural: Vec<String>,
    #[serde(default)]
    pub form: Vec<String>,
    #[serde(default)]
    pub thematic: Vec<String>,
    #[serde(default)]
    pub spatial: Vec<String>,
}

impl RelationSet {
    pub fn is_empty(&self) -> bool {
        self.cultural.is_empty()
            && self.form.is_empty()
            && self.thematic.is_empty()
            && self.spatial.is_empty()
    }

    /// Total number of related ids across all four dimensions.
    pub fn len(&self) -> usize {
        self.cultural.len() + self.form.len() + self.thematic.len() + self.spatial.len()
    }
}

/// Truncates `s` to at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn relation_set_defaults_when_missing_from_json() {
        let rel: RelationSet = serde_json::from_str(r#"{"cultural": ["a"]}"#).unwrap();
        assert_eq!(rel.cultural, vec!["a"]);
        assert!(rel.form.is_empty());
        assert_eq!(rel.len(), 1);
        assert!(!rel.is_empty());
    }
}
