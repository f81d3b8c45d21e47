//! Comparator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GstError, Result};

/// Recognized comparator options.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// `min_length` passed to GST.
    #[serde(default = "default_minimum_match_length")]
    pub minimum_match_length: usize,
    /// Filter threshold; results with `similarity <= minimum_similarity`
    /// are dropped.
    #[serde(default = "default_minimum_similarity")]
    pub minimum_similarity: f64,
    /// Decimal digits for half-to-even rounding of similarity. `None`
    /// means no rounding.
    #[serde(default)]
    pub similarity_precision: Option<u32>,
}

fn default_minimum_match_length() -> usize {
    1
}

fn default_minimum_similarity() -> f64 {
    -1.0
}

impl Default for Config {
    fn default() -> Self {
        Config {
            minimum_match_length: default_minimum_match_length(),
            minimum_similarity: default_minimum_similarity(),
            similarity_precision: None,
        }
    }
}

impl Config {
    /// Reject configurations that would fail at GST time: a non-positive
    /// `minimum_match_length` is invalid (GST requires `min_length >= 1`).
    pub fn validate(&self) -> Result<()> {
        if self.minimum_match_length == 0 {
            return Err(GstError::InvalidArgument(
                "minimum_match_length must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_defaults() {
        let c = Config::default();
        assert_eq!(c.minimum_match_length, 1);
        assert_eq!(c.minimum_similarity, -1.0);
        assert_eq!(c.similarity_precision, None);
    }

    #[test]
    fn rejects_zero_minimum_match_length() {
        let c = Config {
            minimum_match_length: 0,
            ..Config::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn deserializes_from_json_with_defaults() {
        let c: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn deserializes_partial_overrides() {
        let c: Config =
            serde_json::from_str(r#"{"minimum_match_length": 5, "similarity_precision": 2}"#)
                .unwrap();
        assert_eq!(c.minimum_match_length, 5);
        assert_eq!(c.minimum_similarity, -1.0);
        assert_eq!(c.similarity_precision, Some(2));
    }
}
