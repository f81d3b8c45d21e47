//! Rolling hash over a sliding window of tokens.
//!
//! The scan/match phases of [`crate::gst`] need an O(1)-roll hash to find
//! candidate equal-length windows before paying for an exact token-by-token
//! verification. We use a 64-bit wrapping polynomial rolling hash (the
//! Rabin-Karp scheme) over a generic token value rather than a byte-oriented
//! checksum, so it also covers non-byte token alphabets (`u32` token ids,
//! `char`, interned symbol ids, ...). Collisions are possible and expected;
//! every hash hit is verified with a real equality check before being
//! accepted as a candidate, so a collision only costs an extra comparison,
//! never correctness. Adversarial inputs engineered against this base can
//! still degrade the algorithm to its quadratic worst case.

/// A token that can contribute a numeric value to the rolling hash.
/// This is independent of `Eq`: the hash only narrows candidates, actual
/// matches are always confirmed with real equality checks.
pub trait HashableToken: Copy {
    fn token_value(&self) -> u64;
}

impl HashableToken for u8 {
    #[inline]
    fn token_value(&self) -> u64 {
        *self as u64
    }
}

impl HashableToken for u32 {
    #[inline]
    fn token_value(&self) -> u64 {
        *self as u64
    }
}

impl HashableToken for u64 {
    #[inline]
    fn token_value(&self) -> u64 {
        *self
    }
}

impl HashableToken for char {
    #[inline]
    fn token_value(&self) -> u64 {
        *self as u64
    }
}

impl HashableToken for i32 {
    #[inline]
    fn token_value(&self) -> u64 {
        *self as u32 as u64
    }
}

/// Base of the polynomial. Odd and not a power of two so low-order bits of
/// the hash mix across the whole window reasonably quickly.
const BASE: u64 = 1_000_003;

/// Rolling hash over a fixed-width window of a borrowed token slice.
pub struct RollingHash<'a, T: HashableToken> {
    seq: &'a [T],
    width: usize,
    pos: usize,
    hash: u64,
    /// `BASE^(width - 1)`, precomputed so removing the outgoing token is O(1).
    base_pow: u64,
}

impl<'a, T: HashableToken> RollingHash<'a, T> {
    /// Initialize over the window `seq[0..w]`. `seq.len() >= w` must hold
    /// (callers only ever reset over windows known to fit).
    pub fn reset(seq: &'a [T], w: usize) -> Self {
        debug_assert!(w > 0 && w <= seq.len());
        let mut base_pow = 1u64;
        for _ in 0..w.saturating_sub(1) {
            base_pow = base_pow.wrapping_mul(BASE);
        }
        let mut hash = 0u64;
        for &t in &seq[..w] {
            hash = hash.wrapping_mul(BASE).wrapping_add(t.token_value());
        }
        RollingHash {
            seq,
            width: w,
            pos: 0,
            hash,
            base_pow,
        }
    }

    /// Advance the window by one position in O(1). Panics if already at
    /// the last window (mirrors slice-index-out-of-bounds semantics);
    /// callers check `has_next` first.
    pub fn roll(&mut self) {
        let outgoing = self.seq[self.pos].token_value();
        let incoming = self.seq[self.pos + self.width].token_value();
        let without_outgoing = self
            .hash
            .wrapping_sub(outgoing.wrapping_mul(self.base_pow));
        self.hash = without_outgoing.wrapping_mul(BASE).wrapping_add(incoming);
        self.pos += 1;
    }

    /// Whether `roll()` can be called again without running past the end
    /// of `seq`.
    pub fn has_next(&self) -> bool {
        self.pos + self.width < self.seq.len()
    }

    /// Current window's hash value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.hash
    }

    /// Start index (into `seq`) of the current window.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }
}

/// Adler-32 checksum of a byte sequence, exposed as a convenience for
/// callers building [`crate::record::InputRecord::checksum`]: a
/// caller-provided opaque digest whose equality implies byte-identical
/// token sequences for the caller's purposes.
pub fn adler32_checksum(bytes: &[u8]) -> u32 {
    let mut hash = adler32::RollingAdler32::new();
    for &b in bytes {
        hash.update(b);
    }
    hash.hash()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_hash_matches_fresh_hash_of_each_window() {
        let seq: Vec<u32> = vec![3, 1, 4, 1, 5, 9, 2, 6];
        let w = 3;
        let mut rolling = RollingHash::reset(&seq, w);
        let mut expected_start = 0;
        loop {
            let fresh = RollingHash::reset(&seq[expected_start..], w);
            assert_eq!(rolling.value(), fresh.value());
            assert_eq!(rolling.pos(), expected_start);
            if !rolling.has_next() {
                break;
            }
            rolling.roll();
            expected_start += 1;
        }
    }

    #[test]
    fn distinct_windows_usually_hash_differently() {
        let seq: Vec<u32> = (0..50).collect();
        let mut rolling = RollingHash::reset(&seq, 4);
        let mut seen = std::collections::HashSet::new();
        loop {
            seen.insert(rolling.value());
            if !rolling.has_next() {
                break;
            }
            rolling.roll();
        }
        // 47 distinct windows of strictly increasing values; collisions
        // would be a red flag for the hash quality, not a correctness bug.
        assert_eq!(seen.len(), 47);
    }

    #[test]
    fn adler32_checksum_is_deterministic_and_sensitive() {
        let a = adler32_checksum(b"hello world");
        let b = adler32_checksum(b"hello world");
        let c = adler32_checksum(b"hello worlD");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
