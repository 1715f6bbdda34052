//! Greedy non-maximum suppression over score-sorted detections.

use crate::detection::Detection;

/// Applies greedy IoU suppression to a score-sorted detection list.
///
/// `objects` must already be sorted by descending score; the kept indices
/// come back in that order, so the highest-scoring detection is always index
/// 0 of the result. A candidate is dropped when its IoU with any previously
/// kept box strictly exceeds `nms_threshold`, regardless of class label:
/// suppression is class-agnostic in this pipeline.
///
/// Complexity is quadratic in the number of candidates, which stays small
/// after the confidence filter upstream.
pub fn nms_sorted_boxes(objects: &[Detection], nms_threshold: f32) -> Vec<usize> {
    let mut picked: Vec<usize> = Vec::new();

    let areas: Vec<f32> = objects.iter().map(|obj| obj.rect.area()).collect();

    for (i, candidate) in objects.iter().enumerate() {
        let mut keep = true;
        for &j in picked.iter() {
            let inter_area = candidate.rect.intersection_area(&objects[j].rect);
            let union_area = areas[i] + areas[j] - inter_area;
            // A non-positive union means both boxes are degenerate; treat as
            // no overlap rather than dividing to NaN.
            if union_area > 0.0 && inter_area / union_area > nms_threshold {
                keep = false;
                break;
            }
        }
        if keep {
            picked.push(i);
        }
    }

    picked
}
