//! Per-position mark bits.
//!
//! A mark bit of `1` means the position is ineligible: it must never
//! start, end, or be contained in any reported match. Stored as a packed
//! bitset rather than a `Vec<bool>` or a `'0'/'1'` string so window
//! membership tests stay O(1) and cache-friendly.

use bitvec::prelude::*;

use crate::error::{GstError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkVector {
    bits: BitVec,
}

impl MarkVector {
    /// All-unmarked vector of the given length.
    pub fn none(len: usize) -> Self {
        MarkVector { bits: bitvec![0; len] }
    }

    /// Build from a native bitset, e.g. one a caller already maintains.
    pub fn from_bitvec(bits: BitVec) -> Self {
        MarkVector { bits }
    }

    /// Build from a `'0'/'1'` character string, the shape the external
    /// contract uses. An empty string means "nothing marked"; the caller
    /// supplies `len` for that case.
    pub fn from_marks_str(marks: &str, len: usize) -> Result<Self> {
        if marks.is_empty() {
            return Ok(Self::none(len));
        }
        if marks.len() != len {
            return Err(GstError::InvalidArgument(format!(
                "mark vector length {} does not match token length {}",
                marks.len(),
                len
            )));
        }
        let mut bits = bitvec![0; len];
        for (i, c) in marks.chars().enumerate() {
            match c {
                '0' => {}
                '1' => bits.set(i, true),
                other => {
                    return Err(GstError::InvalidArgument(format!(
                        "mark vector contains non-0/1 character {:?} at position {}",
                        other, i
                    )))
                }
            }
        }
        Ok(MarkVector { bits })
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn is_set(&self, pos: usize) -> bool {
        self.bits[pos]
    }

    #[inline]
    pub fn set(&mut self, pos: usize, value: bool) {
        self.bits.set(pos, value);
    }

    /// True if any position in `[start, start+len)` is marked.
    #[inline]
    pub fn any_set_in_window(&self, start: usize, len: usize) -> bool {
        self.bits[start..start + len].any()
    }

    /// First unmarked position at or after `from`, scanning within the
    /// vector's bounds. Used to skip a scan window past a marked run
    /// instead of stepping one position at a time.
    pub fn first_unmarked_from(&self, from: usize) -> Option<usize> {
        (from..self.bits.len()).find(|&i| !self.bits[i])
    }

    /// First marked position within `[start, start+len)`, if any. Used to
    /// find where a candidate window's "jump to the next unmarked run"
    /// should land, in O(word) time via `bitvec`'s word-at-a-time scan
    /// rather than a byte-by-byte loop.
    pub fn first_set_in_window(&self, start: usize, len: usize) -> Option<usize> {
        self.bits[start..start + len].first_one().map(|i| start + i)
    }

    /// True iff every position is marked. Entirely-marked sequences have
    /// no eligible window, so a caller checking this before a pass can
    /// short-circuit straight to an empty result.
    pub fn all_set(&self) -> bool {
        self.bits.all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_all_unmarked() {
        let m = MarkVector::none(5);
        for i in 0..5 {
            assert!(!m.is_set(i));
        }
    }

    #[test]
    fn from_marks_str_parses_bits() {
        let m = MarkVector::from_marks_str("000111000", 9).unwrap();
        assert!(!m.is_set(0));
        assert!(m.is_set(3));
        assert!(m.is_set(5));
        assert!(!m.is_set(8));
    }

    #[test]
    fn empty_marks_str_means_unmarked() {
        let m = MarkVector::from_marks_str("", 4).unwrap();
        assert_eq!(m.len(), 4);
        assert!(!m.any_set_in_window(0, 4));
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(MarkVector::from_marks_str("01", 3).is_err());
    }

    #[test]
    fn rejects_non_binary_chars() {
        assert!(MarkVector::from_marks_str("012", 3).is_err());
    }

    #[test]
    fn any_set_in_window_detects_overlap() {
        let m = MarkVector::from_marks_str("000100", 6).unwrap();
        assert!(m.any_set_in_window(2, 3));
        assert!(!m.any_set_in_window(4, 2));
    }

    #[test]
    fn all_set_detects_fully_marked() {
        let m = MarkVector::from_marks_str("111", 3).unwrap();
        assert!(m.all_set());
        let m = MarkVector::from_marks_str("110", 3).unwrap();
        assert!(!m.all_set());
    }

    #[test]
    fn first_unmarked_from_skips_marked_run() {
        let m = MarkVector::from_marks_str("0011100", 7).unwrap();
        assert_eq!(m.first_unmarked_from(2), Some(5));
        assert_eq!(m.first_unmarked_from(0), Some(0));
    }

    #[test]
    fn first_set_in_window_finds_first_mark() {
        let m = MarkVector::from_marks_str("0001100", 7).unwrap();
        assert_eq!(m.first_set_in_window(0, 7), Some(3));
        assert_eq!(m.first_set_in_window(4, 3), Some(4));
        assert_eq!(m.first_set_in_window(5, 2), None);
    }
}
