//! Input and comparison records.

use serde::{Deserialize, Serialize};

use crate::tile::TileSet;

/// A single string-data object to be compared against others.
///
/// `ignore_marks`, when present, must be the same length as `tokens`;
/// absence means no positions are marked.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputRecord {
    pub id: String,
    pub tokens: Vec<u32>,
    #[serde(default)]
    pub ignore_marks: Option<String>,
    #[serde(default)]
    pub checksum: Option<String>,
    /// Token count used as the similarity denominator. Absence falls back
    /// to `tokens.len()`.
    #[serde(default)]
    pub authored_token_count: Option<usize>,
    /// Pre-computed upper bound used for early rejection.
    pub longest_authored_tile: usize,
}

impl InputRecord {
    pub fn authored_token_count(&self) -> usize {
        self.authored_token_count.unwrap_or(self.tokens.len())
    }
}

/// `{id_a, id_b, match_indexes, similarity}`.
///
/// `match_indexes` is compact JSON array text (separators `","`/`":"`,
/// no whitespace) rather than a nested JSON value, matching the Python
/// original's `matches.json()` field, which is itself a pre-serialized
/// string embedded in the result dict.
#[derive(Clone, Debug, Serialize)]
pub struct ComparisonRecord {
    pub id_a: String,
    pub id_b: String,
    pub match_indexes: String,
    pub similarity: f64,
    #[serde(skip)]
    pub tiles: TileSet,
}

impl ComparisonRecord {
    pub fn new(id_a: String, id_b: String, tiles: TileSet, similarity: f64) -> Self {
        ComparisonRecord {
            id_a,
            id_b,
            match_indexes: tiles.json(),
            similarity,
            tiles,
        }
    }

    /// The ordered-tuple form of the result record
    /// (`[id_a, id_b, match_indexes, similarity]` against the schema
    /// `["id_a","id_b","match_indexes","similarity"]`), an alternative
    /// shape for integrators who prefer it over the map form.
    pub fn as_tuple(&self) -> (String, String, String, f64) {
        (
            self.id_a.clone(),
            self.id_b.clone(),
            self.match_indexes.clone(),
            self.similarity,
        )
    }
}
