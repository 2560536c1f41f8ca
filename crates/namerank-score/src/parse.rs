//! Lightweight scientific-name splitter.
//!
//! Splits a matched name string into its canonical forms and authorship so
//! candidates can be grouped by spelling and author fingerprint. This is not
//! a full nomenclatural parser: it understands genus, epithets, rank tokens,
//! a bracketed subgenus, the hybrid sign, and one trailing authorship, which
//! is what grouping needs.

use std::sync::LazyLock;

use regex::Regex;

/// Rank abbreviations that appear between epithets of infraspecific names.
pub const RANK_TOKENS: &[&str] = &[
    "var.",
    "subsp.",
    "ssp.",
    "f.",
    "fo.",
    "forma",
    "subvar.",
    "subf.",
    "cv.",
    "nothosubsp.",
    "nothovar.",
];

/// Lowercase words that belong to an authorship rather than to the name.
const AUTHOR_PARTICLES: &[&str] = &[
    "de", "van", "von", "der", "den", "du", "la", "le", "ex", "et", "in", "and", "da", "dos",
    "y", "d'", "&",
];

const HYBRID_SIGN: &str = "×";

/// Trailing markers for "the son of", as in `Hook. f.` or `L. fil.`.
const FILIUS_MARKERS: &[&str] = &["f.", "fil.", "filius"];

static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(1[5-9]\d\d|20\d\d)\b").expect("year regex"));
static RE_AUTHOR_SEP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:,|&|\bet\b|\band\b|\bex\b|\bin\b)\s*").expect("author separator regex")
});

/// Authors of one authorship part with the year that came with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorTeam {
    pub authors: Vec<String>,
    pub year: Option<u16>,
}

impl AuthorTeam {
    /// First letter of the last word of each author, in order. A trailing
    /// filius marker is skipped.
    ///
    /// `["de Candolle", "Hook. f."]` gives `"CH"`.
    #[must_use]
    pub fn initials(&self) -> String {
        self.authors
            .iter()
            .filter_map(|a| {
                a.split_whitespace()
                    .rev()
                    .find(|w| !FILIUS_MARKERS.contains(w))
            })
            .filter_map(|w| w.chars().find(|c| c.is_alphabetic()))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Authorship of the lowest rank of a name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authorship {
    /// Authors of the original description. Bracketed when `is_combination`.
    pub original: AuthorTeam,
    /// Authors of the new combination, when there are any.
    pub combination: Option<AuthorTeam>,
    /// The original authorship was bracketed: the name was moved since.
    pub is_combination: bool,
}

/// Result of splitting a scientific name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub canonical_simple: String,
    pub canonical_full: String,
    pub cardinality: u8,
    pub authorship: Option<Authorship>,
}

/// Split a scientific name into canonical forms and authorship.
///
/// Returns `None` when the string does not start with a capitalized genus
/// (optionally preceded by the hybrid sign).
#[must_use]
pub fn parse_name(name: &str) -> Option<ParsedName> {
    let mut tokens = name.split_whitespace().peekable();

    let mut full: Vec<String> = Vec::new();
    let mut first = tokens.next()?;
    if first == HYBRID_SIGN {
        full.push(HYBRID_SIGN.to_string());
        first = tokens.next()?;
    } else if let Some(rest) = first.strip_prefix(HYBRID_SIGN) {
        full.push(HYBRID_SIGN.to_string());
        first = rest;
    }
    if !first.chars().next().is_some_and(char::is_uppercase)
        || !first.chars().all(|c| c.is_alphabetic() || c == '-')
    {
        return None;
    }

    let mut simple: Vec<String> = vec![first.to_string()];
    full.push(first.to_string());
    let mut epithets = 0u8;
    let mut pending_rank: Option<&str> = None;
    let mut auth: Vec<&str> = Vec::new();

    while let Some(token) = tokens.next() {
        if auth.is_empty()
            && epithets == 0
            && is_subgenus(token)
            && tokens.peek().is_some_and(|next| is_epithet(next))
        {
            continue;
        }
        if RANK_TOKENS.contains(&token) {
            // Inside an authorship `f.` may be a filius marker. It only
            // starts a new rank once an epithet follows.
            if !auth.is_empty() {
                auth.push(token);
            }
            pending_rank = Some(token);
            continue;
        }
        if token == HYBRID_SIGN && auth.is_empty() {
            full.push(token.to_string());
            continue;
        }
        if !auth.is_empty() && AUTHOR_PARTICLES.contains(&token) {
            auth.push(token);
            continue;
        }
        let epithet = token.strip_prefix(HYBRID_SIGN).unwrap_or(token);
        if is_epithet(epithet) {
            auth.clear();
            if let Some(rank) = pending_rank.take() {
                full.push(rank.to_string());
            }
            simple.push(epithet.to_string());
            full.push(token.to_string());
            epithets = epithets.saturating_add(1);
            continue;
        }
        auth.push(token);
    }

    Some(ParsedName {
        canonical_simple: simple.join(" "),
        canonical_full: full.join(" "),
        cardinality: epithets.saturating_add(1),
        authorship: parse_authorship(&auth.join(" ")),
    })
}

fn is_epithet(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_lowercase)
        && token.chars().all(|c| c.is_alphabetic() || c == '-')
        && !AUTHOR_PARTICLES.contains(&token)
}

fn is_subgenus(token: &str) -> bool {
    token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .is_some_and(|inner| {
            inner.chars().next().is_some_and(char::is_uppercase)
                && inner.chars().all(char::is_alphabetic)
        })
}

/// Split an authorship string such as `"(Linnaeus, 1758) Smith"` into the
/// bracketed original and the combination parts.
#[must_use]
pub fn parse_authorship(value: &str) -> Option<Authorship> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let authorship = match value.strip_prefix('(') {
        Some(rest) => {
            let (inner, tail) = rest.split_once(')').unwrap_or((rest, ""));
            let combination = parse_team(tail);
            Authorship {
                original: parse_team(inner),
                combination: (!combination.authors.is_empty()).then_some(combination),
                is_combination: true,
            }
        }
        None => Authorship {
            original: parse_team(value),
            combination: None,
            is_combination: false,
        },
    };

    if authorship.original.authors.is_empty() && authorship.combination.is_none() {
        return None;
    }
    Some(authorship)
}

fn parse_team(value: &str) -> AuthorTeam {
    let year = RE_YEAR
        .captures(value)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok());
    let without_years = RE_YEAR.replace_all(value, "");
    let authors = RE_AUTHOR_SEP
        .split(&without_years)
        .map(|a| a.trim_matches(|c: char| c.is_whitespace() || "()[]?:;".contains(c)))
        .filter(|a| a.chars().any(char::is_alphabetic))
        .map(str::to_string)
        .collect();
    AuthorTeam { authors, year }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_with_bracketed_authorship() {
        let p = parse_name("Bubo bubo (Linnaeus, 1758)").expect("parsed");
        assert_eq!(p.canonical_simple, "Bubo bubo");
        assert_eq!(p.canonical_full, "Bubo bubo");
        assert_eq!(p.cardinality, 2);
        let auth = p.authorship.expect("authorship");
        assert!(auth.is_combination);
        assert_eq!(auth.original.authors, vec!["Linnaeus"]);
        assert_eq!(auth.original.year, Some(1758));
        assert!(auth.combination.is_none());
    }

    #[test]
    fn combination_authors_after_bracket() {
        let p = parse_name("Abies alba (L.) Mill.").expect("parsed");
        let auth = p.authorship.expect("authorship");
        assert_eq!(auth.original.initials(), "L");
        assert_eq!(auth.combination.expect("combination").initials(), "M");
    }

    #[test]
    fn infraspecific_keeps_rank_in_full_form_only() {
        let p = parse_name("Aus bus Smith var. cus Jones & de Candolle 1901").expect("parsed");
        assert_eq!(p.canonical_simple, "Aus bus cus");
        assert_eq!(p.canonical_full, "Aus bus var. cus");
        assert_eq!(p.cardinality, 3);
        let auth = p.authorship.expect("authorship");
        assert_eq!(auth.original.authors, vec!["Jones", "de Candolle"]);
        assert_eq!(auth.original.initials(), "JC");
        assert_eq!(auth.original.year, Some(1901));
    }

    #[test]
    fn trailing_filius_stays_in_authorship() {
        let p = parse_name("Aus bus Hook. f.").expect("parsed");
        assert_eq!(p.canonical_simple, "Aus bus");
        assert_eq!(p.canonical_full, "Aus bus");
        assert_eq!(p.cardinality, 2);
        let auth = p.authorship.expect("authorship");
        assert_eq!(auth.original.authors, vec!["Hook. f."]);
        assert_eq!(auth.original.initials(), "H");

        let p = parse_name("Aus bus (L. f.) Smith").expect("parsed");
        let auth = p.authorship.expect("authorship");
        assert!(auth.is_combination);
        assert_eq!(auth.original.initials(), "L");
        assert_eq!(auth.combination.expect("combination").initials(), "S");
    }

    #[test]
    fn forma_after_authorship_starts_lower_rank() {
        let p = parse_name("Aus bus Hook. f. cus Smith").expect("parsed");
        assert_eq!(p.canonical_simple, "Aus bus cus");
        assert_eq!(p.canonical_full, "Aus bus f. cus");
        assert_eq!(p.cardinality, 3);
        let auth = p.authorship.expect("authorship");
        assert_eq!(auth.original.authors, vec!["Smith"]);
    }

    #[test]
    fn uninomial_and_no_authorship() {
        let p = parse_name("Aves").expect("parsed");
        assert_eq!(p.cardinality, 1);
        assert!(p.authorship.is_none());
        let p = parse_name("Bubo bubo").expect("parsed");
        assert_eq!(p.cardinality, 2);
        assert!(p.authorship.is_none());
    }

    #[test]
    fn subgenus_is_dropped_from_canonical() {
        let p = parse_name("Aus (Bus) cus Smith").expect("parsed");
        assert_eq!(p.canonical_simple, "Aus cus");
        let auth = p.authorship.expect("authorship");
        assert!(!auth.is_combination);
        assert_eq!(auth.original.authors, vec!["Smith"]);
    }

    #[test]
    fn hybrid_sign_only_in_full_form() {
        let p = parse_name("× Aus bus").expect("parsed");
        assert_eq!(p.canonical_simple, "Aus bus");
        assert_eq!(p.canonical_full, "× Aus bus");
    }

    #[test]
    fn unparseable_names() {
        assert!(parse_name("").is_none());
        assert!(parse_name("tobacco mosaic virus").is_none());
        assert!(parse_name("1234 abc").is_none());
    }

    #[test]
    fn authorship_without_authors_is_none() {
        assert!(parse_authorship("1758").is_none());
        assert!(parse_authorship("  ").is_none());
    }
}
