//! Relation graph construction.
//!
//! Two artifacts are related along a dimension when their normalized tag
//! sets for that dimension intersect:
//!
//! | Dimension | Tags compared |
//! |-----------|---------------|
//! | `cultural` | `cultures` |
//! | `form` | comma-separated tokens of `form` |
//! | `thematic` | `themes` |
//! | `spatial` | `places` |
//!
//! Every record is compared against every other record (O(n²) pairs), so
//! callers bound `n` with [`dedupe`](crate::dedup::dedupe) before building.
//! Each record's lists are filled from its own scan only; a record that hits
//! the cap early may list fewer partners than would list it back.

use std::collections::HashSet;

use crate::models::{ArtifactRecord, RelationSet};

/// Default maximum related ids kept per dimension.
pub const DEFAULT_MAX_RELATIONS: usize = 8;

/// Progress callback interval, in records.
pub const PROGRESS_INTERVAL: usize = 100;

/// Form token produced by the `"Unknown"` sentinel.
const UNKNOWN_FORM: &str = "unknown";

/// Lowercased, trimmed, non-empty tag sets for one record.
struct TagSets {
    cultures: HashSet<String>,
    forms: HashSet<String>,
    themes: HashSet<String>,
    places: HashSet<String>,
}

impl TagSets {
    fn of(record: &ArtifactRecord) -> Self {
        Self {
            cultures: normalize(record.cultures.iter().map(String::as_str)),
            forms: normalize(record.form.split(',')),
            themes: normalize(record.themes.iter().map(String::as_str)),
            places: normalize(record.places.iter().map(String::as_str)),
        }
    }

    /// True when any form tag is the sentinel. Such records never source
    /// form relations, so the shared `unknown` token cannot link them.
    fn form_is_unknown(&self) -> bool {
        self.forms.contains(UNKNOWN_FORM)
    }
}

fn normalize<'a>(tags: impl Iterator<Item = &'a str>) -> HashSet<String> {
    tags.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn intersects(a: &HashSet<String>, b: &HashSet<String>) -> bool {
    !a.is_disjoint(b)
}

fn push_capped(list: &mut Vec<String>, id: &str, cap: usize) {
    if list.len() < cap && !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}

/// Attaches a [`RelationSet`] to every record.
///
/// Any relations already present on the input are replaced.
pub fn build_relations(records: Vec<ArtifactRecord>, max_per_relation: usize) -> Vec<ArtifactRecord> {
    build_relations_with_progress(records, max_per_relation, |_, _| {})
}

/// Like [`build_relations`], calling `on_progress(done, total)` every
/// [`PROGRESS_INTERVAL`] records.
pub fn build_relations_with_progress(
    mut records: Vec<ArtifactRecord>,
    max_per_relation: usize,
    mut on_progress: impl FnMut(usize, usize),
) -> Vec<ArtifactRecord> {
    let total = records.len();
    let tags: Vec<TagSets> = records.iter().map(TagSets::of).collect();

    let relation_sets: Vec<RelationSet> = (0..total)
        .map(|i| {
            if i > 0 && i % PROGRESS_INTERVAL == 0 {
                on_progress(i, total);
            }
            relate_one(i, &records, &tags, max_per_relation)
        })
        .collect();

    for (record, relations) in records.iter_mut().zip(relation_sets) {
        record.relations = relations;
    }
    tracing::debug!(records = total, "relation graph built");
    records
}

fn relate_one(i: usize, records: &[ArtifactRecord], tags: &[TagSets], cap: usize) -> RelationSet {
    let mine = &tags[i];
    let form_suppressed = mine.form_is_unknown();
    let mut relations = RelationSet::default();

    for (j, other) in records.iter().enumerate() {
        if i == j {
            continue;
        }
        let theirs = &tags[j];

        if intersects(&mine.cultures, &theirs.cultures) {
            push_capped(&mut relations.cultural, &other.id, cap);
        }
        if !form_suppressed && intersects(&mine.forms, &theirs.forms) {
            push_capped(&mut relations.form, &other.id, cap);
        }
        if intersects(&mine.themes, &theirs.themes) {
            push_capped(&mut relations.thematic, &other.id, cap);
        }
        if intersects(&mine.places, &theirs.places) {
            push_capped(&mut relations.spatial, &other.id, cap);
        }
    }

    relations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, cultures: &[&str], form: &str, themes: &[&str], places: &[&str]) -> ArtifactRecord {
        let strings = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        ArtifactRecord {
            id: id.to_string(),
            title: id.to_string(),
            cultures: strings(cultures),
            places: strings(places),
            date: "Unknown".to_string(),
            form: form.to_string(),
            description: "No description available".to_string(),
            image_url: format!("https://img/{}.jpg", id),
            unit_code: "NMAI".to_string(),
            museum_name: "National Museum of the American Indian".to_string(),
            themes: strings(themes),
            names: vec![],
            relations: RelationSet::default(),
        }
    }

    fn find<'a>(records: &'a [ArtifactRecord], id: &str) -> &'a ArtifactRecord {
        records.iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn three_record_scenario() {
        let out = build_relations(
            vec![
                record("A", &["Navajo"], "Basket", &["weaving"], &[]),
                record("B", &["Navajo"], "Pottery", &["ceremony"], &[]),
                record("C", &["Yoruba"], "Basket", &["weaving"], &[]),
            ],
            DEFAULT_MAX_RELATIONS,
        );
        let a = find(&out, "A");
        assert_eq!(a.relations.cultural, vec!["B"]);
        assert_eq!(a.relations.form, vec!["C"]);
        assert_eq!(a.relations.thematic, vec!["C"]);
        assert!(a.relations.spatial.is_empty());

        let b = find(&out, "B");
        assert_eq!(b.relations.cultural, vec!["A"]);
        assert!(b.relations.form.is_empty());
        assert!(b.relations.thematic.is_empty());

        let c = find(&out, "C");
        assert!(c.relations.cultural.is_empty());
        assert_eq!(c.relations.form, vec!["A"]);
        assert_eq!(c.relations.thematic, vec!["A"]);
    }

    #[test]
    fn comparison_is_case_and_whitespace_insensitive() {
        let out = build_relations(
            vec![
                record("A", &[" navajo "], "Basket, Tray", &[], &["Arizona"]),
                record("B", &["NAVAJO"], "tray", &[], &["arizona "]),
            ],
            DEFAULT_MAX_RELATIONS,
        );
        let a = find(&out, "A");
        assert_eq!(a.relations.cultural, vec!["B"]);
        assert_eq!(a.relations.form, vec!["B"]);
        assert_eq!(a.relations.spatial, vec!["B"]);
    }

    #[test]
    fn unknown_form_never_sources_form_relations() {
        let out = build_relations(
            vec![
                record("A", &[], "Unknown", &[], &[]),
                record("B", &[], "Unknown", &[], &[]),
                record("C", &[], "unknown, Mask", &[], &[]),
            ],
            DEFAULT_MAX_RELATIONS,
        );
        assert!(find(&out, "A").relations.form.is_empty());
        assert!(find(&out, "B").relations.form.is_empty());
        assert!(find(&out, "C").relations.form.is_empty());
    }

    #[test]
    fn sentinel_token_alongside_real_form_still_suppresses() {
        let out = build_relations(
            vec![
                record("A", &[], "Unknown", &[], &[]),
                record("C", &[], "Unknown, Mask", &[], &[]),
                record("M", &[], "Mask", &[], &[]),
            ],
            DEFAULT_MAX_RELATIONS,
        );
        assert!(find(&out, "C").relations.form.is_empty());
        // M is not suppressed and still links to C through "mask".
        assert_eq!(find(&out, "M").relations.form, vec!["C"]);
        assert!(find(&out, "A").relations.form.is_empty());
    }

    #[test]
    fn lists_are_capped_in_scan_order() {
        let input: Vec<_> = (0..20)
            .map(|i| record(&format!("r{:02}", i), &["Shared"], "Unknown", &[], &[]))
            .collect();
        let out = build_relations(input, DEFAULT_MAX_RELATIONS);
        for r in &out {
            assert_eq!(r.relations.cultural.len(), DEFAULT_MAX_RELATIONS);
            assert!(!r.relations.cultural.contains(&r.id));
        }
        let first = find(&out, "r00");
        assert_eq!(first.relations.cultural[0], "r01");
        assert_eq!(first.relations.cultural[7], "r08");
    }

    #[test]
    fn relations_match_set_intersection_exactly() {
        let input = vec![
            record("A", &["Navajo", "Hopi"], "Basket", &["weaving"], &["Arizona"]),
            record("B", &["Hopi"], "Doll", &["ceremony"], &["Arizona"]),
            record("C", &["Yoruba"], "Mask", &["ceremony", "dance"], &["Nigeria"]),
            record("D", &[], "Unknown", &[], &[]),
            record("E", &["Yoruba", "Navajo"], "Basket, Mask", &["dance"], &["Nigeria"]),
            record("F", &["Hopi"], "Unknown, Doll", &[], &[]),
            record("G", &[], "unknown", &[], &["Arizona"]),
        ];
        let out = build_relations(input, DEFAULT_MAX_RELATIONS);

        fn lower(xs: &[String]) -> HashSet<String> {
            xs.iter()
                .map(|x| x.trim().to_lowercase())
                .filter(|x| !x.is_empty())
                .collect()
        }
        fn forms(form: &str) -> HashSet<String> {
            let tokens: Vec<String> = form.split(',').map(str::to_string).collect();
            lower(&tokens)
        }
        for a in &out {
            for b in &out {
                if a.id == b.id {
                    continue;
                }
                let shared = !lower(&a.cultures).is_disjoint(&lower(&b.cultures));
                assert_eq!(a.relations.cultural.contains(&b.id), shared, "{} -> {}", a.id, b.id);
                let shared_places = !lower(&a.places).is_disjoint(&lower(&b.places));
                assert_eq!(a.relations.spatial.contains(&b.id), shared_places);
                let shared_themes = !lower(&a.themes).is_disjoint(&lower(&b.themes));
                assert_eq!(a.relations.thematic.contains(&b.id), shared_themes);
                let a_forms = forms(&a.form);
                let shared_forms =
                    !a_forms.contains("unknown") && !a_forms.is_disjoint(&forms(&b.form));
                assert_eq!(a.relations.form.contains(&b.id), shared_forms, "{} -> {}", a.id, b.id);
            }
        }
    }

    #[test]
    fn empty_tags_never_relate() {
        let out = build_relations(
            vec![record("A", &[""], "", &[], &[]), record("B", &[""], "", &[], &[])],
            DEFAULT_MAX_RELATIONS,
        );
        assert!(out.iter().all(|r| r.relations.is_empty()));
    }

    #[test]
    fn existing_relations_are_replaced() {
        let mut stale = record("A", &["Navajo"], "Basket", &[], &[]);
        stale.relations.cultural.push("gone".to_string());
        let out = build_relations(
            vec![stale, record("B", &["Navajo"], "Pot", &[], &[])],
            DEFAULT_MAX_RELATIONS,
        );
        assert_eq!(find(&out, "A").relations.cultural, vec!["B"]);
    }

    #[test]
    fn progress_reported_every_interval() {
        let input: Vec<_> = (0..250)
            .map(|i| record(&format!("r{}", i), &[], "Unknown", &[], &[]))
            .collect();
        let mut seen = Vec::new();
        build_relations_with_progress(input, DEFAULT_MAX_RELATIONS, |done, total| {
            seen.push((done, total))
        });
        assert_eq!(seen, vec![(100, 250), (200, 250)]);
    }

    #[test]
    fn single_and_empty_inputs() {
        assert!(build_relations(vec![], DEFAULT_MAX_RELATIONS).is_empty());
        let out = build_relations(vec![record("A", &["x"], "Basket", &["y"], &["z"])], 8);
        assert!(out[0].relations.is_empty());
    }
}
