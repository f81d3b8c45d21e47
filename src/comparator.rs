//! Pairwise comparison: checksum shortcut, GST, similarity.

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::gst;
use crate::mark::MarkVector;
use crate::record::{ComparisonRecord, InputRecord};
use crate::tile::TileSet;

/// Round `value` to `digits` fractional digits, half-to-even (banker's
/// rounding), rather than the "round half away from zero" behavior of
/// `f64::round`.
fn round_half_to_even(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    let floor = scaled.floor();
    let diff = scaled - floor;
    let rounded = if diff > 0.5 {
        floor + 1.0
    } else if diff < 0.5 {
        floor
    } else if (floor as i64) % 2 == 0 {
        floor
    } else {
        floor + 1.0
    };
    rounded / factor
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn marks_for(record: &InputRecord) -> Result<MarkVector> {
    match &record.ignore_marks {
        Some(marks) => MarkVector::from_marks_str(marks, record.tokens.len()),
        None => Ok(MarkVector::none(record.tokens.len())),
    }
}

/// Compare one pair of records: checksum shortcut, then GST and a similarity
/// score. Returns `Ok(None)`
/// when the pair is skipped (length filter, or similarity at/below
/// threshold) and `Ok(Some(_))` with the emitted record otherwise.
pub fn compare(config: &Config, a: &InputRecord, b: &InputRecord) -> Result<Option<ComparisonRecord>> {
    if std::cmp::max(a.longest_authored_tile, b.longest_authored_tile)
        < config.minimum_match_length
    {
        debug!(id_a = %a.id, id_b = %b.id, "skipped: longest authored tile below minimum match length");
        return Ok(None);
    }

    let (tiles, similarity) = match (&a.checksum, &b.checksum) {
        (Some(ca), Some(cb)) if ca == cb => {
            debug!(id_a = %a.id, id_b = %b.id, "checksum shortcut");
            let tiles = TileSet::full_match_from_length(std::cmp::min(a.tokens.len(), b.tokens.len()));
            (tiles, 1.0)
        }
        _ => {
            let mut marks_a = marks_for(a)?;
            let mut marks_b = marks_for(b)?;
            let tiles = match_with_swap(&a.tokens, &mut marks_a, &b.tokens, &mut marks_b, config.minimum_match_length)?;
            let denom =
                (a.authored_token_count() + b.authored_token_count()) as f64 / 2.0;
            let similarity = safe_div(tiles.token_count() as f64, denom);
            (tiles, similarity)
        }
    };

    let similarity = match config.similarity_precision {
        Some(digits) => round_half_to_even(similarity, digits),
        None => similarity,
    };

    if similarity <= config.minimum_similarity {
        return Ok(None);
    }

    Ok(Some(ComparisonRecord::new(
        a.id.clone(),
        b.id.clone(),
        tiles,
        similarity,
    )))
}

/// Run GST with the shorter sequence as pattern, un-swapping the result
/// coordinates, mirroring `matchlib.matchers.greedy_string_tiling`.
fn match_with_swap(
    tokens_a: &[u32],
    marks_a: &mut MarkVector,
    tokens_b: &[u32],
    marks_b: &mut MarkVector,
    min_length: usize,
) -> Result<TileSet> {
    if tokens_b.len() < tokens_a.len() {
        let tiles = gst::run(tokens_b, marks_b, tokens_a, marks_a, min_length)?;
        Ok(tiles.reverse())
    } else {
        gst::run(tokens_a, marks_a, tokens_b, marks_b, min_length)
    }
}

/// Like [`compare`], but logs and swallows per-comparison errors instead
/// of propagating them: errors inside a single comparison are fatal to
/// that comparison only, not the whole batch. The caller gets no result
/// for the offending pair and a logged diagnostic instead.
pub fn compare_or_skip(config: &Config, a: &InputRecord, b: &InputRecord) -> Option<ComparisonRecord> {
    match compare(config, a, b) {
        Ok(record) => record,
        Err(err) => {
            warn!(id_a = %a.id, id_b = %b.id, error = %err, "comparison failed, skipping pair");
            None
        }
    }
}
