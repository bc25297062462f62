//! Topical tags derived from a record's indexed classification fields.

use indexmap::IndexSet;
use serde_json::Value;

use crate::extract::{entry_text, list};

/// Number of leading `topic` entries considered.
const TOPIC_LIMIT: usize = 5;
/// Number of leading `object_type` entries considered.
const OBJECT_TYPE_LIMIT: usize = 3;
/// Tags this short or shorter are noise tokens.
const MIN_TAG_CHARS: usize = 2;

/// Derives the theme set for a record from its `indexedStructured` section.
///
/// Topics come first, then object types; both are trimmed and lowercased.
/// The set keeps first-insertion order, so callers that cap it get the same
/// survivors for the same input.
pub fn derive_themes(indexed: &Value) -> IndexSet<String> {
    let topics = list(indexed, "topic").iter().take(TOPIC_LIMIT);
    let object_types = list(indexed, "object_type").iter().take(OBJECT_TYPE_LIMIT);

    topics
        .chain(object_types)
        .filter_map(entry_text)
        .map(str::trim)
        .filter(|tag| tag.chars().count() > MIN_TAG_CHARS)
        .map(str::to_lowercase)
        .collect()
}
