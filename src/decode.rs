//! Proposal decoding from raw detector output.
//!
//! Each prediction row holds `4 * reg_max` distribution logits (left, top,
//! right and bottom distances, each as a discrete distribution over
//! `reg_max` bins) followed by `num_classes` class logits. Rows are filtered
//! by class confidence first; the distribution expectation is only evaluated
//! for rows that survive the filter, and most rows do not.

use crate::anchor::GridAndStride;
use crate::detection::{Detection, Rect};
use crate::tensor::TensorView;
use crate::util::math::fast_sigmoid;
use crate::util::{DetPostError, DetPostResult};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Expectation of the bin index under a softmax over one side's logits.
///
/// The softmax normalizes within the side only, never across sides. Logits
/// are shifted by their maximum before exponentiation so large values cannot
/// overflow.
fn dfl_expectation(logits: &[f32]) -> f32 {
    let mut max = f32::NEG_INFINITY;
    for &v in logits {
        if v > max {
            max = v;
        }
    }
    let mut sum = 0.0f32;
    let mut acc = 0.0f32;
    for (bin, &v) in logits.iter().enumerate() {
        let e = (v - max).exp();
        sum += e;
        acc += bin as f32 * e;
    }
    acc / sum
}

/// Decodes a single prediction row against its anchor.
///
/// Returns `Ok(None)` when the row's confidence falls below the threshold.
fn decode_row(
    row_idx: usize,
    anchor: &GridAndStride,
    row: &[f32],
    reg_max: usize,
    num_classes: usize,
    prob_threshold: f32,
) -> DetPostResult<Option<Detection>> {
    let scores = &row[4 * reg_max..4 * reg_max + num_classes];

    // Argmax with strict comparison: the first index wins ties.
    let mut label = 0usize;
    let mut raw_score = f32::NEG_INFINITY;
    for (k, &confidence) in scores.iter().enumerate() {
        if !confidence.is_finite() {
            return Err(DetPostError::NonFiniteScore { row: row_idx });
        }
        if confidence > raw_score {
            label = k;
            raw_score = confidence;
        }
    }

    let box_prob = fast_sigmoid(raw_score);
    if box_prob < prob_threshold {
        return Ok(None);
    }

    let stride = anchor.stride as f32;
    let mut distances = [0.0f32; 4];
    for (side, distance) in distances.iter_mut().enumerate() {
        let bins = &row[side * reg_max..(side + 1) * reg_max];
        *distance = dfl_expectation(bins) * stride;
    }

    let (cx, cy) = anchor.center();
    let rect = Rect::from_corners(
        cx - distances[0],
        cy - distances[1],
        cx + distances[2],
        cy + distances[3],
    );

    Ok(Some(Detection {
        rect,
        label,
        score: box_prob,
    }))
}

fn check_shape(
    anchors: &[GridAndStride],
    pred: &TensorView<'_>,
    reg_max: usize,
    num_classes: usize,
) -> DetPostResult<()> {
    let expected = 4 * reg_max + num_classes;
    if pred.cols() != expected {
        return Err(DetPostError::RowLengthMismatch {
            expected,
            got: pred.cols(),
        });
    }
    if pred.rows() != anchors.len() {
        return Err(DetPostError::AnchorCountMismatch {
            anchors: anchors.len(),
            rows: pred.rows(),
        });
    }
    Ok(())
}

/// Decodes proposals for every anchor whose confidence clears the threshold.
///
/// `pred` must have one row per anchor, each `4 * reg_max + num_classes`
/// long; shape mismatches are reported before any row is touched. The output
/// preserves anchor iteration order and is not sorted by score.
pub fn generate_proposals(
    anchors: &[GridAndStride],
    pred: TensorView<'_>,
    reg_max: usize,
    num_classes: usize,
    prob_threshold: f32,
) -> DetPostResult<Vec<Detection>> {
    check_shape(anchors, &pred, reg_max, num_classes)?;

    let mut objects = Vec::new();
    for (i, (anchor, row)) in anchors.iter().zip(pred.rows_iter()).enumerate() {
        if let Some(obj) = decode_row(i, anchor, row, reg_max, num_classes, prob_threshold)? {
            objects.push(obj);
        }
    }
    Ok(objects)
}

/// Parallel variant of [`generate_proposals`].
///
/// Rows decode independently, so the work splits across the rayon pool; the
/// order-preserving collect keeps the output identical to the sequential
/// path.
#[cfg(feature = "rayon")]
pub fn generate_proposals_par(
    anchors: &[GridAndStride],
    pred: TensorView<'_>,
    reg_max: usize,
    num_classes: usize,
    prob_threshold: f32,
) -> DetPostResult<Vec<Detection>> {
    check_shape(anchors, &pred, reg_max, num_classes)?;

    let decoded = anchors
        .par_iter()
        .enumerate()
        .map(|(i, anchor)| match pred.row(i) {
            Some(row) => decode_row(i, anchor, row, reg_max, num_classes, prob_threshold),
            None => Ok(None),
        })
        .collect::<DetPostResult<Vec<Option<Detection>>>>()?;

    Ok(decoded.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::dfl_expectation;

    #[test]
    fn uniform_bins_decode_to_midpoint() {
        let bins = [0.0f32; 16];
        let expectation = dfl_expectation(&bins);
        assert!((expectation - 7.5).abs() < 1e-5);
    }

    #[test]
    fn concentrated_bin_decodes_to_its_index() {
        let mut bins = [-20.0f32; 16];
        bins[3] = 20.0;
        let expectation = dfl_expectation(&bins);
        assert!((expectation - 3.0).abs() < 1e-4);
    }
}
