//! Id-keyed deduplication.

use indexmap::IndexMap;

use crate::models::ArtifactRecord;

/// Default upper bound on records entering the relation graph.
pub const DEFAULT_MAX_RECORDS: usize = 1000;

/// Collapses records sharing an `id` and caps the result at `cap` records.
///
/// The last-seen record for an id wins: overlapping catalog pages can return
/// the same artifact twice, and the later copy replaces the earlier one.
/// Output order is the position where each id was *first* seen, so the cap
/// drops the ids that appeared latest in the input.
///
/// Applying `dedupe` to its own output returns it unchanged.
pub fn dedupe(records: impl IntoIterator<Item = ArtifactRecord>, cap: usize) -> Vec<ArtifactRecord> {
    let mut by_id: IndexMap<String, ArtifactRecord> = IndexMap::new();
    for record in records {
        by_id.insert(record.id.clone(), record);
    }
    by_id.into_values().take(cap).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelationSet;

    fn record(id: &str, title: &str) -> ArtifactRecord {
        ArtifactRecord {
            id: id.to_string(),
            title: title.to_string(),
            cultures: vec![],
            places: vec![],
            date: "Unknown".to_string(),
            form: "Unknown".to_string(),
            description: "No description available".to_string(),
            image_url: format!("https://img/{}.jpg", id),
            unit_code: "NMAI".to_string(),
            museum_name: "National Museum of the American Indian".to_string(),
            themes: vec![],
            names: vec![],
            relations: RelationSet::default(),
        }
    }

    #[test]
    fn last_write_wins() {
        let out = dedupe(vec![record("x", "A"), record("x", "B")], 10);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "B");
    }

    #[test]
    fn order_is_first_seen_position() {
        let out = dedupe(
            vec![record("a", "1"), record("b", "2"), record("a", "3"), record("c", "4")],
            10,
        );
        let ids: Vec<_> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(out[0].title, "3");
    }

    #[test]
    fn cap_truncates_tail() {
        let input: Vec<_> = (0..20).map(|i| record(&format!("id{}", i), "t")).collect();
        let out = dedupe(input, 5);
        assert_eq!(out.len(), 5);
        assert_eq!(out[4].id, "id4");
    }

    #[test]
    fn cap_applies_after_collapsing() {
        let out = dedupe(
            vec![record("a", "1"), record("a", "2"), record("a", "3"), record("b", "4")],
            2,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].id, "b");
    }

    #[test]
    fn idempotent_and_unique() {
        let input = vec![
            record("a", "1"),
            record("b", "2"),
            record("a", "3"),
            record("c", "4"),
            record("b", "5"),
        ];
        let once = dedupe(input, 100);
        let twice = dedupe(once.clone(), 100);
        assert_eq!(once, twice);

        let mut ids: Vec<_> = once.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), once.len());
    }

    #[test]
    fn empty_input() {
        assert!(dedupe(Vec::new(), DEFAULT_MAX_RECORDS).is_empty());
    }
}
