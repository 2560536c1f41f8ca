//! Data models for namerank
//!
//! These models describe one input name and the candidate records the name
//! index returned for it. Candidate fields are read-only input except
//! `sort_score` and `score_details`, which only the scorer writes.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Curation
// =============================================================================

/// How much quality control a data source applies to its names.
///
/// Variants are ordered from least to most curated, so `max()` over a set of
/// candidates yields the best tier present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Curation {
    #[default]
    NotCurated,
    AutoCurated,
    Curated,
}

impl Curation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotCurated => "NotCurated",
            Self::AutoCurated => "AutoCurated",
            Self::Curated => "Curated",
        }
    }
}

impl fmt::Display for Curation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// MatchType
// =============================================================================

/// Kind of match the name index produced for an input name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    #[default]
    NoMatch,
    PartialFuzzy,
    PartialExact,
    Fuzzy,
    Exact,
    Virus,
    FacetedSearch,
}

impl MatchType {
    #[must_use]
    pub const fn is_virus(self) -> bool {
        matches!(self, Self::Virus)
    }

    #[must_use]
    pub const fn is_no_match(self) -> bool {
        matches!(self, Self::NoMatch)
    }
}

// =============================================================================
// NomCode
// =============================================================================

/// Nomenclatural code governing a name, inferred from its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NomCode {
    /// Zoological code (animals).
    #[serde(rename = "ICZN")]
    Iczn,
    /// Botanical code (plants, fungi, bacteria in older usage).
    #[serde(rename = "ICN")]
    Icn,
    /// Virus code.
    #[serde(rename = "ICVCN")]
    Icvcn,
}

impl NomCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iczn => "ICZN",
            Self::Icn => "ICN",
            Self::Icvcn => "ICVCN",
        }
    }
}

impl fmt::Display for NomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ScoreDetails
// =============================================================================

/// Per-criterion breakdown of a relevance score, each value normalized to
/// `0.0..=1.0` by the maximum its bit field can hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreDetails {
    pub cardinality_score: f32,
    pub infra_specific_rank_score: f32,
    pub fuzzy_less_score: f32,
    pub author_match_score: f32,
    pub curated_data_score: f32,
    pub accepted_name_score: f32,
    pub parsing_quality_score: f32,
}

// =============================================================================
// CandidateRecord
// =============================================================================

/// One data-source record matched against an input name.
///
/// # Field conventions
/// - `cardinality`: 0 = no name / virus / hybrid formula, 1 = uninomial,
///   2 = binomial, 3+ = infraspecific.
/// - `parsing_quality`: 0 = unparsed, 1 = clean, 2 and 3 = increasingly
///   problematic parses.
/// - `current_record_id`: empty when the record already is the accepted name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateRecord {
    pub record_id: String,
    pub data_source_id: i32,
    pub data_source_title: String,
    pub curation: Curation,
    pub matched_name: String,
    pub matched_cardinality: u8,
    pub matched_canonical_simple: String,
    pub matched_canonical_full: String,
    pub matched_authors: Vec<String>,
    pub matched_year: Option<u16>,
    pub current_record_id: String,
    pub current_name: String,
    pub current_canonical_simple: String,
    pub current_canonical_full: String,
    pub classification_path: String,
    pub edit_distance: i32,
    pub stem_edit_distance: i32,
    pub parsing_quality: u8,
    pub match_type: MatchType,
    pub sort_score: f64,
    pub score_details: ScoreDetails,
}

impl CandidateRecord {
    /// Whether this record is itself the currently accepted name.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.current_record_id.is_empty() || self.current_record_id == self.record_id
    }
}

// =============================================================================
// MatchRecord
// =============================================================================

/// All candidate records found for one input name.
///
/// # Invariant
/// Once `sorted` is true, `match_results` is ordered by descending
/// `sort_score` (stable on ties) and needs no further scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchRecord {
    pub input_id: String,
    pub name: String,
    pub cardinality: u8,
    pub canonical_simple: String,
    pub canonical_full: String,
    pub authors: Vec<String>,
    pub year: Option<u16>,
    pub match_type: MatchType,
    pub best_result: Option<CandidateRecord>,
    pub match_results: Vec<CandidateRecord>,
    pub sorted: bool,
    pub curation: Curation,
    pub data_sources_num: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preferred_results: Vec<CandidateRecord>,
}

// =============================================================================
// LexicalGroup
// =============================================================================

/// A cluster of candidates believed to denote the same name despite spelling
/// or authorship differences.
///
/// `id`, `name`, `canonical_full`, `auth_match_score` and `sort_score` come
/// from the representative, which is always `data[0]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LexicalGroup {
    pub id: String,
    pub name: String,
    pub canonical_full: String,
    pub auth_match_score: f32,
    pub sort_score: f64,
    pub nom_codes: BTreeSet<NomCode>,
    pub lexical_variants: Vec<String>,
    pub data: Vec<CandidateRecord>,
}
