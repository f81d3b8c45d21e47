//! The RKR-GST algorithm itself.
//!
//! Scan, verify, extend, mark, iterate until a pass at `min_length` adds
//! no new tiles. Grounded on the reference `rkr-gst` crate in the example
//! pack (`RkrGst::scan_pattern` / `mark_strings` / `run`), generalized to
//! an explicit restart-after-mark scan and a documented ascending-`(t, p)`
//! tie-break (the reference leaves both looser).

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{GstError, Result};
use crate::hasher::{HashableToken, RollingHash};
use crate::mark::MarkVector;
use crate::tile::{TokenMatch, TileSet};

/// One accepted-or-candidate tile found during a single pass, before the
/// select phase has decided whether it survives.
#[derive(Copy, Clone, Debug)]
struct Candidate {
    p: usize,
    t: usize,
    length: usize,
}

/// Run RKR-GST over `pattern`/`text` with the given mark vectors and
/// minimum tile length. The caller is expected to have already arranged
/// `pattern.len() <= text.len()` if it cares about which axis is which;
/// this function does not perform the swap itself (see
/// [`crate::match_tokens`] for the swapping entry point).
pub fn run<T: Eq + HashableToken>(
    pattern: &[T],
    pattern_marks: &mut MarkVector,
    text: &[T],
    text_marks: &mut MarkVector,
    min_length: usize,
) -> Result<TileSet> {
    if min_length == 0 {
        return Err(GstError::InvalidArgument(
            "minimum_match_length must be >= 1".to_string(),
        ));
    }
    if pattern_marks.len() != pattern.len() {
        return Err(GstError::InvalidArgument(format!(
            "pattern mark vector length {} does not match pattern length {}",
            pattern_marks.len(),
            pattern.len()
        )));
    }
    if text_marks.len() != text.len() {
        return Err(GstError::InvalidArgument(format!(
            "text mark vector length {} does not match text length {}",
            text_marks.len(),
            text.len()
        )));
    }

    let mut tiles = TileSet::new();

    if pattern.len() < min_length || text.len() < min_length {
        return Ok(tiles);
    }
    if pattern_marks.all_set() || text_marks.all_set() {
        return Ok(tiles);
    }

    let mut s = min_length;
    loop {
        let (candidates, l_max) = scan_and_match(pattern, pattern_marks, text, text_marks, s);
        if l_max > 2 * s {
            debug!(search_length = s, l_max, "pass found an outsized tile, widening search length");
            s = l_max;
            continue;
        }

        let accepted = select(&mut tiles, pattern_marks, text_marks, &candidates, l_max);
        debug!(
            search_length = s,
            candidates = candidates.len(),
            accepted,
            "pass complete"
        );

        if s == min_length {
            if accepted == 0 {
                break;
            }
        } else {
            s = std::cmp::max(min_length, s / 2);
        }
    }

    Ok(tiles)
}

/// Visit every starting position of an unmarked width-`s` window of `seq`,
/// in ascending order, together with its rolling hash. Positions that
/// cross a mark are skipped; the hash window "restarts" just past the
/// mark, without re-hashing tokens we've already moved past more than
/// once: the only way to restart a `RollingHash` mid-run is the rare
/// event of a mark entering the window, so the amortized cost over a
/// whole pass stays O(len).
fn for_each_window<T: HashableToken>(seq: &[T], marks: &MarkVector, s: usize, mut f: impl FnMut(usize, u64)) {
    let n = seq.len();
    let mut i = 0;
    while i + s <= n {
        let start = match marks.first_set_in_window(i, s) {
            Some(mark_pos) => {
                i = mark_pos + 1;
                continue;
            }
            None => i,
        };

        let mut rolling = RollingHash::reset(&seq[start..], s);
        let mut pos = start;
        loop {
            f(pos, rolling.value());
            let next_pos = pos + 1;
            if next_pos + s > n || marks.is_set(next_pos + s - 1) {
                break;
            }
            rolling.roll();
            pos = next_pos;
        }
        i = pos + 1;
    }
}

/// Scan phase + match phase for a single pass at search length `s`.
/// Returns every candidate of the pass's maximal length, plus that
/// maximal length itself.
fn scan_and_match<T: Eq + HashableToken>(
    pattern: &[T],
    pattern_marks: &MarkVector,
    text: &[T],
    text_marks: &MarkVector,
    s: usize,
) -> (Vec<Candidate>, usize) {
    let mut buckets: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
    for_each_window(pattern, pattern_marks, s, |pos, hash| {
        buckets.entry(hash).or_default().push(pos);
    });

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut l_max = 0;
    for_each_window(text, text_marks, s, |t, hash| {
        let Some(ps) = buckets.get(&hash) else {
            return;
        };
        for &p in ps {
            if pattern[p..p + s] != text[t..t + s] {
                continue; // hash collision, reject
            }
            let length = extend(pattern, pattern_marks, text, text_marks, p, t, s);
            l_max = std::cmp::max(l_max, length);
            candidates.push(Candidate { p, t, length });
        }
    });

    (candidates, l_max)
}

/// Greedily extend a verified `s`-length match rightward while tokens
/// keep matching and neither side is marked.
fn extend<T: Eq>(
    pattern: &[T],
    pattern_marks: &MarkVector,
    text: &[T],
    text_marks: &MarkVector,
    p: usize,
    t: usize,
    s: usize,
) -> usize {
    let mut k = s;
    while p + k < pattern.len()
        && t + k < text.len()
        && !pattern_marks.is_set(p + k)
        && !text_marks.is_set(t + k)
        && pattern[p + k] == text[t + k]
    {
        k += 1;
    }
    k
}

/// Select phase: accept, in ascending-`(t, p)` scan order, every
/// length-`l_max` candidate that doesn't overlap what's already in
/// `tiles`; mark accepted tiles' positions in both mark vectors.
/// Returns the number of tiles accepted this pass.
fn select(
    tiles: &mut TileSet,
    pattern_marks: &mut MarkVector,
    text_marks: &mut MarkVector,
    candidates: &[Candidate],
    l_max: usize,
) -> usize {
    let mut ordered: Vec<&Candidate> = candidates.iter().filter(|c| c.length == l_max).collect();
    ordered.sort_by_key(|c| (c.t, c.p));

    let mut accepted = 0;
    for c in ordered {
        let m = TokenMatch::new(c.p, c.t, c.length);
        if tiles.add_non_overlapping(m) {
            for i in 0..c.length {
                pattern_marks.set(c.p + i, true);
                text_marks.set(c.t + i, true);
            }
            accepted += 1;
        }
    }
    accepted
}
