//! Author-list and publication-year comparison.
//!
//! Classifies how the authorship of an input name relates to the authorship
//! of a candidate record. The classification feeds the 3-bit author/year
//! field of the relevance score.
//!
//! # Matching
//!
//! Both lists are normalized (initials dropped, variants canonicalized,
//! sorted) and then aligned by a single greedy forward scan: every entry of
//! the longer list looks for a partner in the shorter list starting at a
//! cursor that only moves forward. There is no backtracking, so an early
//! match can hide a better later one. Expected classifications are pinned
//! against exactly this behavior.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Historic spellings that refer to the same author, mapped to one form.
const AUTHOR_VARIANTS: &[(&str, &str)] = &[
    ("Linné", "Linn."),
    ("Linne", "Linn."),
    ("Linnæus", "Linnaeus"),
];

/// How two author lists relate to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorRelationship {
    /// No author of one list was found in the other.
    #[default]
    NoOverlap,
    /// Every author on both sides found a partner.
    Identical,
    /// One list is fully contained in the other.
    FullInclusion,
    /// Both lists have matched and unmatched authors.
    Overlap,
    /// The input had no authorship but the candidate does.
    NoAuthVsAuth,
    /// Nothing to compare.
    Incomparable,
}

/// How two publication years relate to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YearRelationship {
    #[default]
    NotAvailable,
    PerfectMatch,
    ApproxMatch,
    NoMatch,
}

/// Normalize one author string down to the surname used for comparison.
///
/// `"C. Linné"` and `"Linn."` both become `"Linn"`.
#[must_use]
pub fn normalize_author(author: &str) -> String {
    let tokens: Vec<&str> = author
        .split_whitespace()
        .map(canonical_variant)
        .collect();
    let Some((last, rest)) = tokens.split_last() else {
        return String::new();
    };

    let mut kept: Vec<&str> = rest
        .iter()
        .copied()
        .filter(|t| !is_initial(t) && !t.ends_with('.'))
        .collect();
    kept.push(*last);
    kept.join(" ").trim_end_matches('.').to_string()
}

/// Normalize and sort an author list. Empty entries are dropped.
#[must_use]
pub fn normalize_authors<S: AsRef<str>>(authors: &[S]) -> Vec<String> {
    let mut res: Vec<String> = authors
        .iter()
        .map(|a| normalize_author(a.as_ref()))
        .filter(|a| !a.is_empty())
        .collect();
    res.sort();
    res
}

fn canonical_variant(token: &str) -> &str {
    AUTHOR_VARIANTS
        .iter()
        .find(|(variant, _)| *variant == token)
        .map_or(token, |(_, canonical)| canonical)
}

/// A bare initial: one or two letters, no dot.
fn is_initial(token: &str) -> bool {
    let n = token.chars().count();
    (1..=2).contains(&n) && token.chars().all(char::is_alphabetic)
}

fn fold(value: &str) -> Vec<char> {
    value
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Loose compatibility of two normalized surnames: the shorter one must be a
/// prefix of the longer one, ignoring case and diacritics.
#[must_use]
pub fn compare_auth(a: &str, b: &str) -> bool {
    let a = fold(a);
    let b = fold(b);
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    !short.is_empty() && long.starts_with(&short)
}

/// Classify the relationship between the input's authors and a candidate's.
#[must_use]
pub fn compare_authors<S: AsRef<str>, T: AsRef<str>>(
    input: &[S],
    candidate: &[T],
) -> AuthorRelationship {
    let au1 = normalize_authors(input);
    let au2 = normalize_authors(candidate);

    if au2.is_empty() {
        return AuthorRelationship::Incomparable;
    }
    if au1.is_empty() {
        return AuthorRelationship::NoAuthVsAuth;
    }

    let (short, long) = if au1.len() <= au2.len() {
        (&au1, &au2)
    } else {
        (&au2, &au1)
    };

    let mut unmatched_short = 0usize;
    let mut unmatched_long = 0usize;
    let mut cursor = 0usize;
    for l in long {
        match short[cursor..].iter().position(|s| compare_auth(s, l)) {
            Some(offset) => {
                unmatched_short += offset;
                cursor += offset + 1;
            }
            None => unmatched_long += 1,
        }
    }
    unmatched_short += short.len() - cursor;

    classify(unmatched_short, short.len(), unmatched_long, long.len())
}

fn classify(
    unmatched_short: usize,
    short_len: usize,
    unmatched_long: usize,
    long_len: usize,
) -> AuthorRelationship {
    let matched = short_len - unmatched_short;
    if matched == 0 {
        return AuthorRelationship::NoOverlap;
    }
    match (unmatched_short, unmatched_long) {
        (0, 0) => AuthorRelationship::Identical,
        (0, _) | (_, 0) => AuthorRelationship::FullInclusion,
        (s, l) if s < short_len && l < long_len => AuthorRelationship::Overlap,
        _ => AuthorRelationship::NoOverlap,
    }
}

/// Classify two publication years. A missing year or year `0` is not
/// available.
#[must_use]
pub fn compare_years(y1: Option<u16>, y2: Option<u16>) -> YearRelationship {
    match (y1.filter(|y| *y != 0), y2.filter(|y| *y != 0)) {
        (Some(a), Some(b)) if a == b => YearRelationship::PerfectMatch,
        (Some(a), Some(b)) if a.abs_diff(b) == 1 => YearRelationship::ApproxMatch,
        (Some(_), Some(_)) => YearRelationship::NoMatch,
        _ => YearRelationship::NotAvailable,
    }
}

/// 3-bit author/year code used by the relevance score.
#[must_use]
pub const fn author_year_code(authors: AuthorRelationship, years: YearRelationship) -> u8 {
    use AuthorRelationship as A;
    use YearRelationship as Y;
    match (authors, years) {
        (A::Identical, Y::PerfectMatch) => 7,
        (A::Identical, Y::ApproxMatch) | (A::FullInclusion, Y::PerfectMatch) => 6,
        (A::Identical, Y::NotAvailable)
        | (A::FullInclusion, Y::ApproxMatch)
        | (A::Overlap, Y::PerfectMatch) => 5,
        (A::FullInclusion, Y::NotAvailable) | (A::Overlap, Y::ApproxMatch) => 4,
        (A::Overlap, Y::NotAvailable) => 2,
        (A::Identical | A::FullInclusion | A::Overlap, Y::NoMatch)
        | (A::NoAuthVsAuth | A::Incomparable, _) => 1,
        (A::NoOverlap, _) => 0,
    }
}
