//! Lexical grouping of scored candidates.
//!
//! Partitions the candidates of one input name into groups that most likely
//! denote the same name, differing only in spelling or authorship style.
//!
//! # Pipeline
//!
//! 1. Split by simple canonical form.
//! 2. For infraspecific input names, split again by full canonical form,
//!    which keeps the rank token.
//! 3. Refine by original-authorship fingerprint, then by combination
//!    fingerprint. Candidates without authorship do not form groups of their
//!    own; they are added as fillers according to [`FillerPolicy`].
//! 4. Collapse every partition into a [`LexicalGroup`] whose representative
//!    is the best-ranked authored member, and order groups by the list
//!    position of their representatives.
//!
//! Virus names skip all of this and always form one group.

use indexmap::{IndexMap, IndexSet};
use namerank_core::{
    CandidateRecord, FillerPolicy, LexicalGroup, MatchRecord, MatchType, NomCode, RankConfig,
    RankError, RankResult, UnsortedPolicy,
};

use crate::parse::{Authorship, parse_name};
use crate::score::sort_results;

/// Author fingerprint of a candidate: bracket flag plus the initials of the
/// original and combination authors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorFingerprint {
    pub is_combination: bool,
    pub original: String,
    pub combination: String,
}

impl AuthorFingerprint {
    #[must_use]
    pub fn from_authorship(auth: &Authorship) -> Self {
        Self {
            is_combination: auth.is_combination,
            original: auth.original.initials(),
            combination: auth
                .combination
                .as_ref()
                .map(crate::parse::AuthorTeam::initials)
                .unwrap_or_default(),
        }
    }

    /// Key for the first refinement: bracket flag and original initials.
    #[must_use]
    pub fn original_key(&self) -> String {
        format!("{}{}", if self.is_combination { "(" } else { "" }, self.original)
    }

    /// Key for the second refinement.
    #[must_use]
    pub fn combination_key(&self) -> String {
        self.combination.clone()
    }
}

/// Guess the nomenclatural code of a candidate from its classification.
#[must_use]
pub fn infer_nom_code(match_type: MatchType, classification_path: &str) -> Option<NomCode> {
    if match_type.is_virus() {
        return Some(NomCode::Icvcn);
    }
    if classification_path.contains("Animalia") {
        return Some(NomCode::Iczn);
    }
    if ["Plantae", "Fungi", "Bacteria"]
        .iter()
        .any(|k| classification_path.contains(k))
    {
        return Some(NomCode::Icn);
    }
    None
}

/// A candidate with everything grouping needs to know about it.
struct Entry<'a> {
    pos: usize,
    record: &'a CandidateRecord,
    canonical_simple: String,
    canonical_full: String,
    fingerprint: Option<AuthorFingerprint>,
}

impl<'a> Entry<'a> {
    fn new(pos: usize, record: &'a CandidateRecord) -> Self {
        let parsed = parse_name(&record.matched_name);
        let pick = |given: &str, parsed: Option<&String>| {
            if given.is_empty() {
                parsed.cloned().unwrap_or_default()
            } else {
                given.to_string()
            }
        };
        Self {
            pos,
            record,
            canonical_simple: pick(
                &record.matched_canonical_simple,
                parsed.as_ref().map(|p| &p.canonical_simple),
            ),
            canonical_full: pick(
                &record.matched_canonical_full,
                parsed.as_ref().map(|p| &p.canonical_full),
            ),
            fingerprint: parsed
                .and_then(|p| p.authorship)
                .map(|a| AuthorFingerprint::from_authorship(&a)),
        }
    }

    const fn has_authorship(&self) -> bool {
        self.fingerprint.is_some()
    }
}

/// Partition the candidates of `record` into lexical groups.
///
/// The record should already be sorted. What happens otherwise depends on
/// `config.unsorted_policy`.
pub fn name_to_lexical_groups(
    record: &MatchRecord,
    config: &RankConfig,
) -> RankResult<Vec<LexicalGroup>> {
    if record.match_type.is_no_match() {
        tracing::debug!(input_id = %record.input_id, "no match, no groups");
        return Ok(Vec::new());
    }

    if record.match_results.is_empty() {
        let groups: Vec<LexicalGroup> = record
            .best_result
            .iter()
            .map(|best| single_group(record.match_type, std::slice::from_ref(best)))
            .collect();
        tracing::debug!(
            input_id = %record.input_id,
            groups = groups.len(),
            "grouped best result only"
        );
        return Ok(groups);
    }

    if !record.sorted {
        match config.unsorted_policy {
            UnsortedPolicy::Reject => {
                return Err(RankError::Unsorted {
                    input_id: record.input_id.clone(),
                });
            }
            UnsortedPolicy::Resort => {
                tracing::debug!(input_id = %record.input_id, "sorting before grouping");
                let mut sorted = record.clone();
                sort_results(&mut sorted);
                return name_to_lexical_groups(&sorted, config);
            }
        }
    }

    if record.match_type.is_virus() {
        tracing::debug!(
            input_id = %record.input_id,
            candidates = record.match_results.len(),
            "virus, single group"
        );
        return Ok(vec![single_group(record.match_type, &record.match_results)]);
    }

    let groups = partition(record, config);
    tracing::debug!(
        input_id = %record.input_id,
        candidates = record.match_results.len(),
        groups = groups.len(),
        "grouped candidates"
    );
    Ok(groups)
}

/// One group of all `members` in their given order, first member
/// representing it.
fn single_group(match_type: MatchType, members: &[CandidateRecord]) -> LexicalGroup {
    let mut group = LexicalGroup::default();
    if let Some(rep) = members.first() {
        group.id.clone_from(&rep.record_id);
        group.name.clone_from(&rep.matched_name);
        group.canonical_full.clone_from(&rep.matched_canonical_full);
        group.auth_match_score = rep.score_details.author_match_score;
        group.sort_score = rep.sort_score;
    }
    let variants: IndexSet<&str> = members.iter().map(|m| m.matched_name.as_str()).collect();
    group.lexical_variants = variants.into_iter().map(str::to_string).collect();
    group.nom_codes = members
        .iter()
        .filter_map(|m| nom_code_for(match_type, m))
        .collect();
    group.data = members.to_vec();
    group
}

fn nom_code_for(match_type: MatchType, candidate: &CandidateRecord) -> Option<NomCode> {
    let match_type = if candidate.match_type.is_virus() {
        MatchType::Virus
    } else {
        match_type
    };
    infer_nom_code(match_type, &candidate.classification_path)
}

fn partition(record: &MatchRecord, config: &RankConfig) -> Vec<LexicalGroup> {
    let entries: Vec<Entry<'_>> = record
        .match_results
        .iter()
        .enumerate()
        .map(|(pos, rec)| Entry::new(pos, rec))
        .collect();

    let all: Vec<usize> = (0..entries.len()).collect();
    let mut parts = split_by(vec![all], |i| entries[i].canonical_simple.clone());
    if record.cardinality >= 3 {
        parts = split_by(parts, |i| entries[i].canonical_full.clone());
    }
    parts = refine_by_authors(parts, &entries, config.filler_policy, AuthorFingerprint::original_key);
    parts = refine_by_authors(
        parts,
        &entries,
        config.filler_policy,
        AuthorFingerprint::combination_key,
    );

    let mut groups: Vec<(usize, LexicalGroup)> = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(|p| collapse(record.match_type, &entries, p))
        .collect();
    groups.sort_by_key(|(rep_pos, _)| *rep_pos);
    groups.into_iter().map(|(_, g)| g).collect()
}

/// Split each partition by `key`, keeping first-seen order of keys.
fn split_by<F>(parts: Vec<Vec<usize>>, key: F) -> Vec<Vec<usize>>
where
    F: Fn(usize) -> String,
{
    let mut res = Vec::with_capacity(parts.len());
    for part in parts {
        let mut by_key: IndexMap<String, Vec<usize>> = IndexMap::new();
        for i in part {
            by_key.entry(key(i)).or_default().push(i);
        }
        res.extend(by_key.into_values());
    }
    res
}

/// Split each partition by an author key. Members without authorship are
/// fillers and are placed according to `policy`.
fn refine_by_authors<F>(
    parts: Vec<Vec<usize>>,
    entries: &[Entry<'_>],
    policy: FillerPolicy,
    key: F,
) -> Vec<Vec<usize>>
where
    F: Fn(&AuthorFingerprint) -> String,
{
    let mut res = Vec::with_capacity(parts.len());
    for part in parts {
        let (authored, fillers): (Vec<usize>, Vec<usize>) =
            part.into_iter().partition(|&i| entries[i].has_authorship());
        if authored.is_empty() {
            res.push(fillers);
            continue;
        }

        let mut by_key: IndexMap<String, Vec<usize>> = IndexMap::new();
        for i in authored {
            if let Some(fp) = &entries[i].fingerprint {
                by_key.entry(key(fp)).or_default().push(i);
            }
        }
        let mut sub: Vec<Vec<usize>> = by_key.into_values().collect();
        match policy {
            FillerPolicy::BestGroup => {
                let best = sub
                    .iter_mut()
                    .min_by_key(|s| s.iter().map(|&i| entries[i].pos).min());
                if let Some(best) = best {
                    best.extend(fillers);
                }
            }
            FillerPolicy::EveryGroup => {
                for s in &mut sub {
                    s.extend(fillers.iter().copied());
                }
            }
        }
        res.extend(sub);
    }
    res
}

/// Build a group from one partition. Returns the representative's list
/// position with it so groups can be ordered.
fn collapse(
    match_type: MatchType,
    entries: &[Entry<'_>],
    mut members: Vec<usize>,
) -> (usize, LexicalGroup) {
    members.sort_by_key(|&i| (!entries[i].has_authorship(), entries[i].pos));
    let rep = &entries[members[0]];

    let data: Vec<CandidateRecord> = members.iter().map(|&i| entries[i].record.clone()).collect();
    let mut group = single_group(match_type, &data);
    if group.canonical_full.is_empty() {
        group.canonical_full.clone_from(&rep.canonical_full);
    }
    (rep.pos, group)
}
