//! Property tests for scoring, author matching, and grouping.

use std::collections::BTreeSet;

use namerank_core::{CandidateRecord, Curation, MatchRecord, MatchType, RankConfig};
use namerank_score::score::fuzzy_score;
use namerank_score::{AuthorRelationship, compare_authors, name_to_lexical_groups, sort_results};
use proptest::prelude::*;

fn pt_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        max_shrink_iters: 2000,
        ..ProptestConfig::default()
    }
}

// ─── Strategies ──────────────────────────────────────────────────────────────

/// Surnames where no name is a prefix of another, so loose matching reduces
/// to equality.
const SURNAMES: &[&str] = &["Smith", "Jones", "Brown", "Taylor", "Wilson", "Davies", "Evans"];

const NAMES: &[&str] = &[
    "Bubo bubo",
    "Bubo bubo (Linnaeus, 1758)",
    "Bubo bubo Linnaeus, 1758",
    "Bubo bubo (L.) Smith",
    "Bubo bubu (Linnaeus, 1758)",
    "Bubo bubo bubo",
    "Bubo bubo var. bubo Smith",
    "Bubo bubo f. bubo",
    "bubo bubo",
    "Bubo",
];

fn curation() -> impl Strategy<Value = Curation> {
    prop_oneof![
        Just(Curation::NotCurated),
        Just(Curation::AutoCurated),
        Just(Curation::Curated),
    ]
}

fn authors() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(proptest::sample::select(SURNAMES), 0..3)
        .prop_map(|v| v.into_iter().map(str::to_string).collect())
}

fn candidate() -> impl Strategy<Value = CandidateRecord> {
    (
        proptest::sample::select(NAMES),
        0u8..5,
        authors(),
        proptest::option::of(1750u16..1760),
        1i32..5,
        curation(),
        -1i32..6,
        0u8..5,
        any::<bool>(),
    )
        .prop_map(
            |(name, card, authors, year, source, curation, ed, quality, accepted)| {
                CandidateRecord {
                    matched_name: name.to_string(),
                    matched_cardinality: card,
                    matched_authors: authors,
                    matched_year: year,
                    data_source_id: source,
                    curation,
                    edit_distance: ed,
                    parsing_quality: quality,
                    current_record_id: if accepted { String::new() } else { "other".into() },
                    ..CandidateRecord::default()
                }
            },
        )
}

fn match_record() -> impl Strategy<Value = MatchRecord> {
    (
        proptest::collection::vec(candidate(), 0..24),
        0u8..5,
        authors(),
        prop_oneof![
            Just(MatchType::Exact),
            Just(MatchType::Fuzzy),
            Just(MatchType::PartialFuzzy),
            Just(MatchType::Virus),
        ],
    )
        .prop_map(|(mut candidates, cardinality, authors, match_type)| {
            for (i, c) in candidates.iter_mut().enumerate() {
                c.record_id = format!("r{i}");
            }
            MatchRecord {
                input_id: "prop".into(),
                name: "Bubo bubo".into(),
                cardinality,
                canonical_full: "Bubo bubo var. bubo".into(),
                authors,
                year: Some(1758),
                match_type,
                match_results: candidates,
                ..MatchRecord::default()
            }
        })
}

fn record_ids(candidates: &[CandidateRecord]) -> Vec<String> {
    let mut ids: Vec<String> = candidates.iter().map(|c| c.record_id.clone()).collect();
    ids.sort();
    ids
}

// ─── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(pt_config())]

    /// Sorting twice changes neither order nor scores.
    #[test]
    fn prop_sort_is_idempotent(record in match_record()) {
        let mut once = record;
        sort_results(&mut once);
        let mut twice = once.clone();
        sort_results(&mut twice);
        prop_assert_eq!(&once, &twice);
    }

    /// Sorted candidates have non-increasing sort scores.
    #[test]
    fn prop_sorted_is_descending(record in match_record()) {
        let mut record = record;
        sort_results(&mut record);
        prop_assert!(record.sorted);
        for pair in record.match_results.windows(2) {
            prop_assert!(pair[0].sort_score >= pair[1].sort_score);
        }
    }

    /// Groups are a partition of the candidates.
    #[test]
    fn prop_groups_partition_candidates(record in match_record()) {
        let mut record = record;
        sort_results(&mut record);
        let groups = name_to_lexical_groups(&record, &RankConfig::default()).unwrap();

        let members: Vec<CandidateRecord> =
            groups.iter().flat_map(|g| g.data.iter().cloned()).collect();
        prop_assert_eq!(record_ids(&members), record_ids(&record.match_results));
        for g in &groups {
            prop_assert!(!g.data.is_empty());
            prop_assert_eq!(&g.id, &g.data[0].record_id);
        }
        if record.match_type == MatchType::Virus && !record.match_results.is_empty() {
            prop_assert_eq!(groups.len(), 1);
        }
    }

    /// Groups come out ordered by the list position of their representative.
    #[test]
    fn prop_groups_ordered_by_representative(record in match_record()) {
        let mut record = record;
        sort_results(&mut record);
        let groups = name_to_lexical_groups(&record, &RankConfig::default()).unwrap();
        let positions: Vec<usize> = groups
            .iter()
            .map(|g| {
                record
                    .match_results
                    .iter()
                    .position(|c| c.record_id == g.id)
                    .unwrap()
            })
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// No-match records never produce groups.
    #[test]
    fn prop_no_match_is_empty(record in match_record()) {
        let mut record = record;
        record.match_type = MatchType::NoMatch;
        sort_results(&mut record);
        let groups = name_to_lexical_groups(&record, &RankConfig::default()).unwrap();
        prop_assert!(groups.is_empty());
    }

    /// Larger edit distances never score higher.
    #[test]
    fn prop_fuzzy_is_monotone(a in -5i32..10, b in -5i32..10) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(fuzzy_score(lo) >= fuzzy_score(hi));
        if hi > 3 {
            prop_assert_eq!(fuzzy_score(hi), 0);
        }
    }

    /// Swapping the lists keeps the category, except for the one-sided
    /// missing-authorship cases.
    #[test]
    fn prop_author_comparison_is_symmetric(
        a in proptest::collection::btree_set(proptest::sample::select(SURNAMES), 0..5),
        b in proptest::collection::btree_set(proptest::sample::select(SURNAMES), 0..5),
    ) {
        let a: Vec<&str> = a.into_iter().collect();
        let b: Vec<&str> = b.into_iter().collect();
        let ab = compare_authors(&a, &b);
        let ba = compare_authors(&b, &a);
        match (a.is_empty(), b.is_empty()) {
            (true, false) => prop_assert_eq!(ab, AuthorRelationship::NoAuthVsAuth),
            (false, true) => prop_assert_eq!(ba, AuthorRelationship::NoAuthVsAuth),
            _ => prop_assert_eq!(ab, ba),
        }
    }

    /// With distinct surnames the greedy scan finds the exact intersection.
    #[test]
    fn prop_author_classification_matches_intersection(
        a in proptest::collection::btree_set(proptest::sample::select(SURNAMES), 1..5),
        b in proptest::collection::btree_set(proptest::sample::select(SURNAMES), 1..5),
    ) {
        let common = a.intersection(&b).count();
        let expected = if common == 0 {
            AuthorRelationship::NoOverlap
        } else if a == b {
            AuthorRelationship::Identical
        } else if common == a.len() || common == b.len() {
            AuthorRelationship::FullInclusion
        } else {
            AuthorRelationship::Overlap
        };
        let a: Vec<&str> = a.into_iter().collect();
        let b: Vec<&str> = b.into_iter().collect();
        prop_assert_eq!(compare_authors(&a, &b), expected);
    }
}

#[test]
fn distinct_surname_pool_has_no_prefixes() {
    let pool: BTreeSet<&str> = SURNAMES.iter().copied().collect();
    for a in &pool {
        for b in &pool {
            if a != b {
                assert!(!b.starts_with(a), "{a} is a prefix of {b}");
            }
        }
    }
}
