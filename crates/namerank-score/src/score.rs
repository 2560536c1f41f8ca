//! Multi-criterion relevance score for candidate records.
//!
//! Each candidate gets seven sub-scores packed into the top 13 bits of a
//! `u32`, most significant criterion first:
//!
//! ```text
//! bit 31      cardinality match          1 bit
//! bits 30-29  infraspecific rank match   2 bits
//! bits 28-27  fuzzy (edit distance)      2 bits
//! bits 26-24  author/year match          3 bits
//! bits 23-22  curation                   2 bits
//! bit 21      accepted name              1 bit
//! bits 20-19  parsing quality            2 bits
//! ```
//!
//! Comparing packed values orders candidates lexicographically by the
//! criteria above. The packed value is turned into a log10 sort key and into
//! a normalized per-criterion breakdown ([`ScoreDetails`]).

use std::collections::BTreeSet;

use namerank_core::{CandidateRecord, Curation, MatchRecord, ScoreDetails};

use crate::authors::{author_year_code, compare_authors, compare_years};

/// Data source whose records always get the top curation value.
pub const PRIMARY_SOURCE_ID: i32 = 1;

/// Position and width of one criterion in the packed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub shift: u32,
    pub width: u32,
}

impl Field {
    const fn new(name: &'static str, shift: u32, width: u32) -> Self {
        Self { name, shift, width }
    }

    /// Largest value the field can hold.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // widths never exceed 3 bits
    pub const fn max(self) -> u8 {
        ((1u32 << self.width) - 1) as u8
    }

    const fn pack(self, value: u8) -> u32 {
        (value as u32 & self.max() as u32) << self.shift
    }
}

pub const CARDINALITY: Field = Field::new("cardinality", 31, 1);
pub const INFRA_RANK: Field = Field::new("infraSpecificRank", 29, 2);
pub const FUZZY: Field = Field::new("fuzzyLess", 27, 2);
pub const AUTHOR: Field = Field::new("authorMatch", 24, 3);
pub const CURATION: Field = Field::new("curatedData", 22, 2);
pub const ACCEPTED: Field = Field::new("acceptedName", 21, 1);
pub const PARSING: Field = Field::new("parsingQuality", 19, 2);

/// All fields, most significant first.
pub const LAYOUT: [Field; 7] = [
    CARDINALITY,
    INFRA_RANK,
    FUZZY,
    AUTHOR,
    CURATION,
    ACCEPTED,
    PARSING,
];

/// Seven sub-scores of one candidate. Built fresh for every candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub cardinality: u8,
    pub infra_rank: u8,
    pub fuzzy: u8,
    pub author: u8,
    pub curation: u8,
    pub accepted: u8,
    pub parsing: u8,
}

impl Score {
    /// Score one candidate against the input name of `record`.
    #[must_use]
    pub fn compute(record: &MatchRecord, candidate: &CandidateRecord) -> Self {
        Self {
            cardinality: cardinality_score(record.cardinality, candidate.matched_cardinality),
            infra_rank: infra_rank_score(
                record.cardinality,
                candidate.matched_cardinality,
                &record.canonical_full,
                &candidate.matched_canonical_full,
            ),
            fuzzy: fuzzy_score(candidate.edit_distance),
            author: author_score(
                &record.authors,
                &candidate.matched_authors,
                record.year,
                candidate.matched_year,
            ),
            curation: curation_score(candidate.data_source_id, candidate.curation),
            accepted: accepted_score(candidate),
            parsing: parsing_score(candidate.parsing_quality),
        }
    }

    const fn values(self) -> [u8; 7] {
        [
            self.cardinality,
            self.infra_rank,
            self.fuzzy,
            self.author,
            self.curation,
            self.accepted,
            self.parsing,
        ]
    }

    /// Pack the sub-scores into the 32-bit layout.
    #[must_use]
    pub fn pack(self) -> u32 {
        LAYOUT
            .iter()
            .zip(self.values())
            .fold(0, |acc, (field, value)| acc | field.pack(value))
    }

    /// Packed value as `xxxxxxxx_xxxxxxxx_xxxxxxxx_xxxxxxxx`.
    #[must_use]
    pub fn bit_pattern(self) -> String {
        let bits = format!("{:032b}", self.pack());
        bits.as_bytes()
            .chunks(8)
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Order-preserving float key: `log10` of the packed value.
    ///
    /// A zero composite maps to `0.0`. The smallest non-zero composite is
    /// `2^19`, so `0.0` still sorts below every other value.
    #[must_use]
    pub fn sort_value(self) -> f64 {
        match self.pack() {
            0 => 0.0,
            v => f64::from(v).log10(),
        }
    }

    /// Each sub-score divided by the maximum its field can hold.
    #[must_use]
    pub fn details(self) -> ScoreDetails {
        let norm = |field: Field, value: u8| f32::from(value.min(field.max())) / f32::from(field.max());
        ScoreDetails {
            cardinality_score: norm(CARDINALITY, self.cardinality),
            infra_specific_rank_score: norm(INFRA_RANK, self.infra_rank),
            fuzzy_less_score: norm(FUZZY, self.fuzzy),
            author_match_score: norm(AUTHOR, self.author),
            curated_data_score: norm(CURATION, self.curation),
            accepted_name_score: norm(ACCEPTED, self.accepted),
            parsing_quality_score: norm(PARSING, self.parsing),
        }
    }

    /// Field names paired with their raw sub-scores, most significant first.
    #[must_use]
    pub fn explain(self) -> Vec<(&'static str, u8)> {
        LAYOUT.iter().map(|f| f.name).zip(self.values()).collect()
    }
}

/// 1 when both cardinalities are known, non-zero, and equal.
#[must_use]
pub const fn cardinality_score(input: u8, candidate: u8) -> u8 {
    if input != 0 && input == candidate { 1 } else { 0 }
}

/// Agreement of infraspecific rank tokens, evaluated only for infraspecific
/// names of equal cardinality.
///
/// 0 = unknown (a side has no rank token), 1 = ranks differ, 2 = ranks agree.
#[must_use]
pub fn infra_rank_score(input_card: u8, cand_card: u8, input_full: &str, cand_full: &str) -> u8 {
    if input_card < 3 || input_card != cand_card {
        return 0;
    }
    let r1 = rank_tokens(input_full);
    let r2 = rank_tokens(cand_full);
    if r1.is_empty() || r2.is_empty() {
        return 0;
    }
    if r1 == r2 { 2 } else { 1 }
}

/// Dotted tokens after the first two words of a full canonical form.
fn rank_tokens(canonical_full: &str) -> BTreeSet<&str> {
    canonical_full
        .split_whitespace()
        .skip(2)
        .filter(|w| w.len() > 1 && w.ends_with('.'))
        .collect()
}

/// 3 for an exact match down to 0 for an edit distance of 3 or more.
#[must_use]
pub fn fuzzy_score(edit_distance: i32) -> u8 {
    u8::try_from(3i32.saturating_sub(edit_distance).clamp(0, 3)).unwrap_or(0)
}

#[must_use]
pub fn author_score<S: AsRef<str>, T: AsRef<str>>(
    input_authors: &[S],
    cand_authors: &[T],
    input_year: Option<u16>,
    cand_year: Option<u16>,
) -> u8 {
    author_year_code(
        compare_authors(input_authors, cand_authors),
        compare_years(input_year, cand_year),
    )
}

/// The primary catalog always scores 3; other sources score by tier.
#[must_use]
pub const fn curation_score(data_source_id: i32, curation: Curation) -> u8 {
    if data_source_id == PRIMARY_SOURCE_ID {
        return 3;
    }
    match curation {
        Curation::NotCurated => 0,
        Curation::AutoCurated => 1,
        Curation::Curated => 2,
    }
}

#[must_use]
pub fn accepted_score(candidate: &CandidateRecord) -> u8 {
    u8::from(candidate.is_accepted())
}

/// Clean parses (quality 1) score highest; unparsed names score 0.
#[must_use]
pub const fn parsing_score(quality: u8) -> u8 {
    match quality {
        1 => 3,
        2 => 2,
        3 => 1,
        _ => 0,
    }
}

/// Score every candidate of `record` and sort them by descending score.
///
/// Ties keep their input order. Sets `record.sorted`.
pub fn sort_results(record: &mut MatchRecord) {
    let mut results = std::mem::take(&mut record.match_results);
    for candidate in &mut results {
        let score = Score::compute(record, candidate);
        candidate.sort_score = score.sort_value();
        candidate.score_details = score.details();
        tracing::trace!(
            input_id = %record.input_id,
            record_id = %candidate.record_id,
            bits = %score.bit_pattern(),
            "scored candidate"
        );
    }
    results.sort_by(|a, b| b.sort_score.total_cmp(&a.sort_score));
    record.match_results = results;
    record.sorted = true;

    tracing::debug!(
        input_id = %record.input_id,
        candidates = record.match_results.len(),
        best = record.match_results.first().map(|c| c.sort_score),
        "sorted match results"
    );
}
