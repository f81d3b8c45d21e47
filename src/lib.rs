//! Running Karp-Rabin Greedy String Tiling (Wise 1996).
//!
//! Given a pattern token sequence and a text token sequence, [`gst::run`]
//! (or the swapping convenience wrapper [`match_tokens`]) finds a maximal
//! set of non-overlapping, equal-length tiles: runs of tokens that appear
//! identically in both sequences. [`comparator::compare`] turns a pair of
//! tile sets into a similarity score, and [`driver`] enumerates pairs
//! across a batch of records.
//!
//! Two design choices worth calling out up front (see `DESIGN.md` for the
//! full ledger):
//!
//! - The scan phase's rolling hash is a 64-bit wrapping polynomial
//!   (Rabin-Karp), not a CRC or a cryptographic hash: collisions are
//!   cheap to tolerate because every hash hit is re-verified with a real
//!   equality check before being trusted as a candidate tile.
//! - Candidates of equal maximal length within a pass are accepted in
//!   ascending `(text_position, pattern_position)` order, so two runs over
//!   the same input always produce the same tile set.
//!
//! `src/lib.rs` only wires the modules together; `DESIGN.md` documents
//! what each one is grounded on.

pub mod comparator;
pub mod config;
pub mod driver;
pub mod error;
pub mod gst;
pub mod hasher;
pub mod mark;
pub mod record;
pub mod tile;

pub use comparator::{compare, compare_or_skip};
pub use config::Config;
pub use driver::{
    all_combinations, all_combinations_cancellable, all_combinations_par, to_others,
    to_others_par,
};
pub use error::{GstError, Result};
pub use hasher::{adler32_checksum, HashableToken};
pub use mark::MarkVector;
pub use record::{ComparisonRecord, InputRecord};
pub use tile::{TileSet, TokenMatch};

/// Run RKR-GST over `pattern`/`text`, arranging the shorter sequence as
/// the scan pattern internally and un-swapping the result's coordinates
/// so callers never have to think about which side is shorter, folded
/// into the library per `original_source/matchlib/matchers.py`'s
/// `greedy_string_tiling` wrapper.
pub fn match_tokens<T: Eq + HashableToken>(
    pattern: &[T],
    pattern_marks: &mut MarkVector,
    text: &[T],
    text_marks: &mut MarkVector,
    min_length: usize,
) -> Result<TileSet> {
    if text.len() < pattern.len() {
        let tiles = gst::run(text, text_marks, pattern, pattern_marks, min_length)?;
        Ok(tiles.reverse())
    } else {
        gst::run(pattern, pattern_marks, text, text_marks, min_length)
    }
}

/// Convenience free function mirroring [`driver::all_combinations`].
pub fn match_all_combinations<'a>(
    config: &'a Config,
    records: &'a [InputRecord],
) -> impl Iterator<Item = ComparisonRecord> + 'a {
    driver::all_combinations(config, records)
}

/// Convenience free function mirroring [`driver::to_others`].
pub fn match_to_others<'a>(
    config: &'a Config,
    base: &'a InputRecord,
    others: &'a [InputRecord],
) -> impl Iterator<Item = ComparisonRecord> + 'a {
    driver::to_others(config, base, others)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_tokens_swaps_shorter_sequence_into_pattern_position() {
        let mut a_marks = MarkVector::none(3);
        let mut b_marks = MarkVector::none(10);
        // "abc" is shorter than the text it's being searched for in, but
        // here we pass it as `pattern` already correctly-sized; exercise
        // the swap by calling with the longer sequence first instead.
        let long: Vec<u32> = vec![9, 9, 1, 2, 3, 9, 9, 9, 9, 9];
        let short: Vec<u32> = vec![1, 2, 3];
        let tiles = match_tokens(&long, &mut b_marks, &short, &mut a_marks, 3).unwrap();
        assert_eq!(tiles.all(), &[TokenMatch::new(2, 0, 3)]);
    }

    #[test]
    fn match_all_combinations_and_driver_agree() {
        let records = vec![
            InputRecord {
                id: "a".into(),
                tokens: vec![1, 2, 3],
                ignore_marks: None,
                checksum: None,
                authored_token_count: None,
                longest_authored_tile: 3,
            },
            InputRecord {
                id: "b".into(),
                tokens: vec![1, 2, 3],
                ignore_marks: None,
                checksum: None,
                authored_token_count: None,
                longest_authored_tile: 3,
            },
        ];
        let config = Config {
            minimum_match_length: 1,
            ..Config::default()
        };
        let results: Vec<_> = match_all_combinations(&config, &records).collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].similarity, 1.0);
    }
}
