//! Score and area ordering for detection lists.

use crate::detection::Detection;

/// Partition length below which parallel recursion is not worth forking.
#[cfg(feature = "rayon")]
const PAR_CUTOFF: usize = 512;

/// Sorts detections by descending confidence, in place.
///
/// Hoare-style partitioning around the midpoint element of the active range,
/// recursing on both partitions. The sort is not stable: detections with
/// equal scores may land in either relative order. Scores must be finite,
/// which the decoder guarantees.
pub fn sort_by_score_desc(objects: &mut [Detection]) {
    qsort_score_desc(objects);
}

fn qsort_score_desc(objects: &mut [Detection]) {
    let len = objects.len();
    if len <= 1 {
        return;
    }

    let pivot = objects[len / 2].score;
    let mut i = 0isize;
    let mut j = len as isize - 1;
    while i <= j {
        while objects[i as usize].score > pivot {
            i += 1;
        }
        while objects[j as usize].score < pivot {
            j -= 1;
        }
        if i <= j {
            objects.swap(i as usize, j as usize);
            i += 1;
            j -= 1;
        }
    }

    // Elements between j and i equal the pivot and are already placed.
    let (head, tail) = objects.split_at_mut(i as usize);
    let head = &mut head[..(j + 1) as usize];
    recurse(head, tail);
}

#[cfg(not(feature = "rayon"))]
fn recurse(head: &mut [Detection], tail: &mut [Detection]) {
    qsort_score_desc(head);
    qsort_score_desc(tail);
}

/// The partitions are disjoint slices of the same backing storage, so they
/// recurse concurrently with nothing to synchronize beyond the join.
#[cfg(feature = "rayon")]
fn recurse(head: &mut [Detection], tail: &mut [Detection]) {
    if head.len().max(tail.len()) >= PAR_CUTOFF {
        rayon::join(|| qsort_score_desc(head), || qsort_score_desc(tail));
    } else {
        qsort_score_desc(head);
        qsort_score_desc(tail);
    }
}

/// Sorts detections by descending box area, in place.
///
/// Presentation ordering only; ties may land in arbitrary order.
pub fn sort_by_area_desc(objects: &mut [Detection]) {
    objects.sort_unstable_by(|a, b| b.rect.area().total_cmp(&a.rect.area()));
}
