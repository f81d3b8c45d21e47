//! Pair enumeration.
//!
//! `all_combinations`/`to_others` are lazy and order-preserving, matching
//! `itertools.combinations`'s ordering in
//! `original_source/matchlib/matcher.py`. The `_par` variants generalize
//! the teacher's `similarity_batch`/`score_all` sequential-vs-`rayon`
//! crossover: the pair driver is embarrassingly parallel across pairs.

use rayon::prelude::*;

use crate::comparator::compare_or_skip;
use crate::config::Config;
use crate::record::{ComparisonRecord, InputRecord};

/// Below this many pairs, run sequentially: coordinating a `rayon`
/// thread pool costs more than it saves. Mirrors the teacher's
/// `PARALLEL_THRESHOLD` crossover.
pub const PARALLEL_THRESHOLD: usize = 250;

/// All unordered 2-subsets of `records`, enumerated lexicographically by
/// `(i, j)` with `i < j`.
pub fn all_combinations<'a>(
    config: &'a Config,
    records: &'a [InputRecord],
) -> impl Iterator<Item = ComparisonRecord> + 'a {
    pairs(records).filter_map(move |(a, b)| compare_or_skip(config, a, b))
}

/// `base` compared against every record in `others`, in `others`'s order.
pub fn to_others<'a>(
    config: &'a Config,
    base: &'a InputRecord,
    others: &'a [InputRecord],
) -> impl Iterator<Item = ComparisonRecord> + 'a {
    others
        .iter()
        .filter_map(move |other| compare_or_skip(config, base, other))
}

/// `all_combinations`, fanned out across a `rayon` thread pool once the
/// input is large enough to be worth it. Results from the parallel path
/// are **not** guaranteed to be in pair-enumeration order; sort the
/// returned `Vec` yourself if order matters.
pub fn all_combinations_par(config: &Config, records: &[InputRecord]) -> Vec<ComparisonRecord> {
    let all_pairs: Vec<(&InputRecord, &InputRecord)> = pairs(records).collect();
    if all_pairs.len() < PARALLEL_THRESHOLD {
        all_pairs
            .into_iter()
            .filter_map(|(a, b)| compare_or_skip(config, a, b))
            .collect()
    } else {
        all_pairs
            .into_par_iter()
            .filter_map(|(a, b)| compare_or_skip(config, a, b))
            .collect()
    }
}

/// `to_others`, fanned out across a `rayon` thread pool once `others` is
/// large enough to be worth it. Same ordering caveat as
/// [`all_combinations_par`].
pub fn to_others_par(
    config: &Config,
    base: &InputRecord,
    others: &[InputRecord],
) -> Vec<ComparisonRecord> {
    if others.len() < PARALLEL_THRESHOLD {
        others
            .iter()
            .filter_map(|other| compare_or_skip(config, base, other))
            .collect()
    } else {
        others
            .par_iter()
            .filter_map(|other| compare_or_skip(config, base, other))
            .collect()
    }
}

fn pairs(records: &[InputRecord]) -> impl Iterator<Item = (&InputRecord, &InputRecord)> {
    (0..records.len()).flat_map(move |i| {
        (i + 1..records.len()).map(move |j| (&records[i], &records[j]))
    })
}

/// `all_combinations`, but polling `cancel` between pairs and stopping
/// early (without error) the first time it returns `true`. Cancellation
/// is cooperative at pair boundaries only: a comparison already in flight
/// always runs to completion.
pub fn all_combinations_cancellable(
    config: &Config,
    records: &[InputRecord],
    cancel: &dyn Fn() -> bool,
) -> Vec<ComparisonRecord> {
    let mut out = Vec::new();
    for (a, b) in pairs(records) {
        if cancel() {
            break;
        }
        if let Some(record) = compare_or_skip(config, a, b) {
            out.push(record);
        }
    }
    out
}
