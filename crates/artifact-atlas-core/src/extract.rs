//! Field extraction from raw catalog records.
//!
//! A raw record is arbitrarily nested JSON with no schema guarantee. The
//! fields Artifact Atlas needs live under three sections of `content`:
//!
//! | Section | Fields read |
//! |---------|-------------|
//! | `descriptiveNonRepeating` | `title`, `unit_code`, `online_media.media[]` |
//! | `indexedStructured` | `culture`, `place`, `date`, `object_type`, `topic`, `name` |
//! | `freetext` | `notes[].content` |
//!
//! [`extract`] is total: any missing or mistyped piece falls back to a
//! sentinel, except the id and the image, whose absence drops the record.

use serde_json::Value;

use crate::models::{
    truncate_chars, ArtifactRecord, RelationSet, MAX_CULTURES, MAX_DATE_CHARS,
    MAX_DESCRIPTION_CHARS, MAX_FORM_CHARS, MAX_NAMES, MAX_PLACES, MAX_THEMES, MAX_TITLE_CHARS,
    NO_DESCRIPTION, UNKNOWN, UNTITLED,
};
use crate::museums::museum_name;
use crate::themes::derive_themes;

/// Media entries of this type carry an image.
const IMAGE_MEDIA_TYPE: &str = "Images";
/// Delivery service used when a media entry only carries an IDS id.
const IDS_DELIVERY_URL: &str = "https://ids.si.edu/ids/deliveryService?id=";
/// Number of object types joined into the `form` field.
const FORM_OBJECT_TYPES: usize = 3;
/// Notes must be longer than this to serve as a description.
const MIN_DESCRIPTION_CHARS: usize = 20;

static EMPTY: Value = Value::Null;

/// Turns one raw catalog record into an [`ArtifactRecord`].
///
/// Returns `None` when the record has no id or no image-bearing media
/// entry. Dropping is the normal outcome for a large share of catalog
/// records and is not an error.
pub fn extract(raw: &Value) -> Option<ArtifactRecord> {
    let id = raw.get("id").and_then(Value::as_str).filter(|s| !s.is_empty())?;

    let content = section(raw, "content");
    let descriptive = section(content, "descriptiveNonRepeating");
    let indexed = section(content, "indexedStructured");
    let freetext = section(content, "freetext");

    let image_url = find_image_url(descriptive)?;

    let title = extract_title(descriptive);

    let date = list(indexed, "date")
        .first()
        .and_then(entry_text)
        .unwrap_or(UNKNOWN);

    let object_types: Vec<&str> = list(indexed, "object_type")
        .iter()
        .take(FORM_OBJECT_TYPES)
        .filter_map(entry_text)
        .collect();
    let form = if object_types.is_empty() {
        UNKNOWN.to_string()
    } else {
        object_types.join(", ")
    };

    let description = list(freetext, "notes")
        .iter()
        .filter_map(|note| note.get("content").and_then(Value::as_str))
        .find(|text| text.chars().count() > MIN_DESCRIPTION_CHARS)
        .unwrap_or(NO_DESCRIPTION);

    let unit_code = descriptive
        .get("unit_code")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN);

    Some(ArtifactRecord {
        id: id.to_string(),
        title: truncate_chars(&title, MAX_TITLE_CHARS),
        cultures: strings(indexed, "culture", MAX_CULTURES),
        places: strings(indexed, "place", MAX_PLACES),
        date: truncate_chars(date, MAX_DATE_CHARS),
        form: truncate_chars(&form, MAX_FORM_CHARS),
        description: truncate_chars(description, MAX_DESCRIPTION_CHARS),
        image_url,
        unit_code: unit_code.to_string(),
        museum_name: museum_name(unit_code).to_string(),
        themes: derive_themes(indexed).into_iter().take(MAX_THEMES).collect(),
        names: strings(indexed, "name", MAX_NAMES),
        relations: RelationSet::default(),
    })
}

/// Finds the first image URL among the record's media entries.
fn find_image_url(descriptive: &Value) -> Option<String> {
    let media = section(descriptive, "online_media");
    list(media, "media")
        .iter()
        .filter(|entry| entry.get("type").and_then(Value::as_str) == Some(IMAGE_MEDIA_TYPE))
        .find_map(|entry| {
            let direct = entry
                .get("content")
                .and_then(Value::as_str)
                .filter(|url| !url.is_empty())
                .map(str::to_string);
            direct.or_else(|| {
                entry
                    .get("idsId")
                    .and_then(Value::as_str)
                    .filter(|ids| !ids.is_empty())
                    .map(|ids| format!("{}{}", IDS_DELIVERY_URL, ids))
            })
        })
}

fn extract_title(descriptive: &Value) -> String {
    let text = match descriptive.get("title") {
        Some(Value::Object(obj)) => obj
            .get("content")
            .and_then(Value::as_str)
            .map(str::to_string),
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    };
    text.filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Returns `value[key]` if it is an object, else an empty stand-in.
pub(crate) fn section<'a>(value: &'a Value, key: &str) -> &'a Value {
    match value.get(key) {
        Some(v @ Value::Object(_)) => v,
        _ => &EMPTY,
    }
}

/// Returns `value[key]` as a slice, or an empty slice if it is not an array.
pub(crate) fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Text of a list entry: a plain string, or an object's `content` string.
pub(crate) fn entry_text(entry: &Value) -> Option<&str> {
    match entry {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj.get("content").and_then(Value::as_str),
        _ => None,
    }
}

fn strings(value: &Value, key: &str, max: usize) -> Vec<String> {
    list(value, key)
        .iter()
        .filter_map(entry_text)
        .take(max)
        .map(str::to_string)
        .collect()
}
