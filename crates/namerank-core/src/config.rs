//! Configuration management for namerank
//!
//! Configuration is loaded from environment variables. Unknown or malformed
//! values fall back to defaults rather than failing.

use std::env;

pub const FILLER_POLICY_ENV: &str = "NAMERANK_FILLER_POLICY";
pub const UNSORTED_POLICY_ENV: &str = "NAMERANK_UNSORTED_POLICY";
pub const WITH_ALL_MATCHES_ENV: &str = "NAMERANK_WITH_ALL_MATCHES";
pub const PREFERRED_SOURCES_ENV: &str = "NAMERANK_PREFERRED_SOURCES";

/// Where candidates without authorship land when a lexical group is split by
/// author fingerprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillerPolicy {
    /// Join only the sub-group holding the best-ranked authored candidate.
    /// Keeps groups a strict partition of the candidates.
    #[default]
    BestGroup,
    /// Join every sub-group. A candidate may then appear in several groups.
    EveryGroup,
}

impl FillerPolicy {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "every" | "every-group" | "all" => Self::EveryGroup,
            _ => Self::BestGroup,
        }
    }
}

/// What grouping does with a record whose candidates were never scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsortedPolicy {
    /// Score and sort a copy of the record first.
    #[default]
    Resort,
    /// Fail with [`crate::error::Error::Unsorted`].
    Reject,
}

impl UnsortedPolicy {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" | "error" | "strict" => Self::Reject,
            _ => Self::Resort,
        }
    }
}

/// Runtime knobs for scoring, selection, and grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankConfig {
    pub filler_policy: FillerPolicy,
    pub unsorted_policy: UnsortedPolicy,
    /// Keep every candidate after selection instead of only the best one.
    pub with_all_matches: bool,
    /// Data sources for which the best candidate is reported separately.
    pub preferred_sources: Vec<i32>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            filler_policy: FillerPolicy::default(),
            unsorted_policy: UnsortedPolicy::default(),
            with_all_matches: true,
            preferred_sources: Vec::new(),
        }
    }
}

impl RankConfig {
    /// Load configuration from the process environment, falling back to
    /// defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = lookup(FILLER_POLICY_ENV) {
            config.filler_policy = FillerPolicy::parse(&v);
        }
        if let Some(v) = lookup(UNSORTED_POLICY_ENV) {
            config.unsorted_policy = UnsortedPolicy::parse(&v);
        }
        if let Some(v) = lookup(WITH_ALL_MATCHES_ENV) {
            config.with_all_matches = parse_bool(&v, config.with_all_matches);
        }
        if let Some(v) = lookup(PREFERRED_SOURCES_ENV) {
            config.preferred_sources = parse_id_list(&v);
        }
        tracing::debug!(?config, "loaded rank config");
        config
    }
}

fn parse_bool(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" => true,
        "0" | "false" | "f" | "no" | "n" => false,
        _ => default,
    }
}

/// Comma-separated data-source ids; entries that are not integers are skipped.
#[must_use]
pub fn parse_id_list(value: &str) -> Vec<i32> {
    value
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = RankConfig::from_lookup(|_| None);
        assert_eq!(config, RankConfig::default());
        assert_eq!(config.filler_policy, FillerPolicy::BestGroup);
        assert_eq!(config.unsorted_policy, UnsortedPolicy::Resort);
        assert!(config.with_all_matches);
        assert!(config.preferred_sources.is_empty());
    }

    #[test]
    fn reads_every_key() {
        let config = RankConfig::from_lookup(lookup(&[
            (FILLER_POLICY_ENV, "every"),
            (UNSORTED_POLICY_ENV, "Reject"),
            (WITH_ALL_MATCHES_ENV, "no"),
            (PREFERRED_SOURCES_ENV, "1, 11,x,170"),
        ]));
        assert_eq!(config.filler_policy, FillerPolicy::EveryGroup);
        assert_eq!(config.unsorted_policy, UnsortedPolicy::Reject);
        assert!(!config.with_all_matches);
        assert_eq!(config.preferred_sources, vec![1, 11, 170]);
    }

    #[test]
    fn unknown_values_fall_back() {
        let config = RankConfig::from_lookup(lookup(&[
            (FILLER_POLICY_ENV, "sometimes"),
            (UNSORTED_POLICY_ENV, "maybe"),
            (WITH_ALL_MATCHES_ENV, "perhaps"),
        ]));
        assert_eq!(config.filler_policy, FillerPolicy::BestGroup);
        assert_eq!(config.unsorted_policy, UnsortedPolicy::Resort);
        assert!(config.with_all_matches);
    }
}
