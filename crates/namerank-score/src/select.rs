//! Record-level summary derived from sorted candidates.
//!
//! After scoring, a verification result carries its best candidate, the best
//! candidate of each preferred data source, the highest curation tier among
//! its candidates, and the number of distinct sources that matched.

use std::collections::BTreeSet;

use indexmap::IndexSet;
use namerank_core::{CandidateRecord, Curation, MatchRecord, RankConfig};

use crate::score::sort_results;

/// Best candidate of each requested data source, in request order.
///
/// Sources without candidates are skipped and repeated ids are reported once.
/// `record` must already be sorted.
#[must_use]
pub fn preferred_results(record: &MatchRecord, sources: &[i32]) -> Vec<CandidateRecord> {
    let wanted: IndexSet<i32> = sources.iter().copied().collect();
    wanted
        .iter()
        .filter_map(|id| {
            record
                .match_results
                .iter()
                .find(|c| c.data_source_id == *id)
                .cloned()
        })
        .collect()
}

/// Highest curation tier among the candidates.
#[must_use]
pub fn best_curation(candidates: &[CandidateRecord]) -> Curation {
    candidates
        .iter()
        .map(|c| c.curation)
        .max()
        .unwrap_or_default()
}

/// Number of distinct data sources among the candidates.
#[must_use]
pub fn data_sources_num(candidates: &[CandidateRecord]) -> usize {
    candidates
        .iter()
        .map(|c| c.data_source_id)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Sort `record` if needed and fill its summary fields.
///
/// Unless `config.with_all_matches` is set, only the best candidate is kept
/// in `match_results` afterwards.
pub fn finalize(record: &mut MatchRecord, config: &RankConfig) {
    if !record.sorted {
        sort_results(record);
    }

    if let Some(best) = record.match_results.first() {
        record.best_result = Some(best.clone());
    }
    record.curation = best_curation(&record.match_results);
    record.data_sources_num = data_sources_num(&record.match_results);
    record.preferred_results = preferred_results(record, &config.preferred_sources);

    if !config.with_all_matches {
        record.match_results.truncate(1);
    }

    tracing::debug!(
        input_id = %record.input_id,
        curation = %record.curation,
        data_sources = record.data_sources_num,
        preferred = record.preferred_results.len(),
        "finalized match record"
    );
}
