//! Tiles and tile sets.

use serde::Serialize;

/// A claim that `pattern[a..a+length) == text[b..b+length)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenMatch {
    pub a: usize,
    pub b: usize,
    pub length: usize,
}

impl TokenMatch {
    pub fn new(a: usize, b: usize, length: usize) -> Self {
        TokenMatch { a, b, length }
    }

    /// Two matches overlap iff their projections intersect on either axis:
    /// `a2 - L1 < a1 < a2 + L2` or the symmetric condition on `b`.
    pub fn overlaps(&self, other: &TokenMatch) -> bool {
        let overlaps_on = |x1: usize, l1: usize, x2: usize, l2: usize| -> bool {
            let lower = x2.checked_sub(l1);
            let upper = x2 + l2;
            let above_lower = match lower {
                Some(lower) => x1 > lower,
                None => true, // x2 - l1 is negative, so x1 > it unconditionally
            };
            above_lower && x1 < upper
        };
        overlaps_on(self.a, self.length, other.a, other.length)
            || overlaps_on(self.b, self.length, other.b, other.length)
    }

    /// `(a, b)` swapped, same length.
    pub fn reversed(&self) -> TokenMatch {
        TokenMatch {
            a: self.b,
            b: self.a,
            length: self.length,
        }
    }
}

/// An unordered collection of [`TokenMatch`] with the invariant that no two
/// contained matches overlap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileSet {
    store: Vec<TokenMatch>,
}

impl TileSet {
    pub fn new() -> Self {
        TileSet { store: Vec::new() }
    }

    /// Insert `m` iff it overlaps nothing already present. Returns whether
    /// it was inserted.
    pub fn add_non_overlapping(&mut self, m: TokenMatch) -> bool {
        if self.store.iter().any(|existing| existing.overlaps(&m)) {
            return false;
        }
        self.store.push(m);
        true
    }

    /// Union another tile set in. The caller is responsible for global
    /// non-overlap; this is only safe when merging disjoint regions.
    pub fn extend(&mut self, other: &TileSet) {
        self.store.extend(other.store.iter().copied());
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn all(&self) -> &[TokenMatch] {
        &self.store
    }

    pub fn match_count(&self) -> usize {
        self.store.len()
    }

    pub fn token_count(&self) -> usize {
        self.store.iter().map(|m| m.length).sum()
    }

    /// A new `TileSet` with every `(a, b, length)` replaced by
    /// `(b, a, length)`.
    pub fn reverse(&self) -> TileSet {
        TileSet {
            store: self.store.iter().map(TokenMatch::reversed).collect(),
        }
    }

    /// A single tile covering `[0, length)` on both sides: the checksum
    /// shortcut's synthetic match.
    pub fn full_match_from_length(length: usize) -> Self {
        let mut ms = TileSet::new();
        ms.add_non_overlapping(TokenMatch::new(0, 0, length));
        ms
    }

    /// Compact JSON array of `[a,b,length]` triples, sorted ascending by
    /// `(a, b, length)`.
    pub fn json(&self) -> String {
        let mut sorted: Vec<(usize, usize, usize)> =
            self.store.iter().map(|m| (m.a, m.b, m.length)).collect();
        sorted.sort_unstable();
        serde_json::to_string(&sorted).expect("tuples of usize always serialize")
    }

    /// The sorted `(a, b, length)` triples backing [`Self::json`], for
    /// callers that want the structured form without round-tripping JSON.
    pub fn sorted_triples(&self) -> Vec<(usize, usize, usize)> {
        let mut sorted: Vec<(usize, usize, usize)> =
            self.store.iter().map(|m| (m.a, m.b, m.length)).collect();
        sorted.sort_unstable();
        sorted
    }
}

/// Compact JSON serialization of a [`TileSet`]'s sorted triples, used when
/// embedding `match_indexes` directly in a larger `#[derive(Serialize)]`
/// struct.
impl Serialize for TileSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.sorted_triples().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_detects_pattern_axis_intersection() {
        let m1 = TokenMatch::new(0, 0, 5);
        let m2 = TokenMatch::new(3, 100, 5);
        assert!(m1.overlaps(&m2));
    }

    #[test]
    fn overlap_detects_text_axis_intersection() {
        let m1 = TokenMatch::new(0, 0, 5);
        let m2 = TokenMatch::new(100, 3, 5);
        assert!(m1.overlaps(&m2));
    }

    #[test]
    fn disjoint_matches_do_not_overlap() {
        let m1 = TokenMatch::new(0, 0, 5);
        let m2 = TokenMatch::new(10, 10, 5);
        assert!(!m1.overlaps(&m2));
    }

    #[test]
    fn adjacent_matches_do_not_overlap() {
        let m1 = TokenMatch::new(0, 0, 5);
        let m2 = TokenMatch::new(5, 5, 5);
        assert!(!m1.overlaps(&m2));
    }

    #[test]
    fn add_non_overlapping_rejects_overlap() {
        let mut ts = TileSet::new();
        assert!(ts.add_non_overlapping(TokenMatch::new(0, 0, 5)));
        assert!(!ts.add_non_overlapping(TokenMatch::new(3, 3, 5)));
        assert_eq!(ts.match_count(), 1);
    }

    #[test]
    fn token_count_sums_lengths() {
        let mut ts = TileSet::new();
        ts.add_non_overlapping(TokenMatch::new(0, 0, 3));
        ts.add_non_overlapping(TokenMatch::new(10, 10, 4));
        assert_eq!(ts.token_count(), 7);
        assert_eq!(ts.match_count(), 2);
    }

    #[test]
    fn reverse_swaps_a_and_b() {
        let mut ts = TileSet::new();
        ts.add_non_overlapping(TokenMatch::new(1, 2, 3));
        let r = ts.reverse();
        assert_eq!(r.all(), &[TokenMatch::new(2, 1, 3)]);
    }

    #[test]
    fn json_is_sorted_and_compact() {
        let mut ts = TileSet::new();
        ts.add_non_overlapping(TokenMatch::new(5, 1, 2));
        ts.add_non_overlapping(TokenMatch::new(0, 9, 1));
        assert_eq!(ts.json(), "[[0,9,1],[5,1,2]]");
    }

    #[test]
    fn full_match_from_length_is_a_single_tile() {
        let ts = TileSet::full_match_from_length(42);
        assert_eq!(ts.match_count(), 1);
        assert_eq!(ts.token_count(), 42);
        assert_eq!(ts.all()[0], TokenMatch::new(0, 0, 42));
    }
}
