use detpost::{nms_sorted_boxes, sort_by_area_desc, sort_by_score_desc, Detection, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn det(x: f32, y: f32, width: f32, height: f32, label: usize, score: f32) -> Detection {
    Detection {
        rect: Rect::new(x, y, width, height),
        label,
        score,
    }
}

#[test]
fn score_sort_is_non_increasing() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut objects: Vec<Detection> = (0..200)
        .map(|i| det(i as f32, 0.0, 1.0, 1.0, 0, rng.random_range(0.0..1.0)))
        .collect();

    sort_by_score_desc(&mut objects);
    for pair in objects.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn score_sort_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(43);
    let mut objects: Vec<Detection> = (0..100)
        .map(|i| det(i as f32, 0.0, 1.0, 1.0, 0, rng.random_range(0.0..1.0)))
        .collect();

    sort_by_score_desc(&mut objects);
    let scores_first: Vec<f32> = objects.iter().map(|o| o.score).collect();

    sort_by_score_desc(&mut objects);
    let scores_second: Vec<f32> = objects.iter().map(|o| o.score).collect();
    assert_eq!(scores_first, scores_second);
}

#[test]
fn score_sort_with_distinct_scores_is_exact() {
    let mut objects = vec![
        det(0.0, 0.0, 1.0, 1.0, 0, 0.2),
        det(1.0, 0.0, 1.0, 1.0, 1, 0.9),
        det(2.0, 0.0, 1.0, 1.0, 2, 0.5),
        det(3.0, 0.0, 1.0, 1.0, 3, 0.7),
        det(4.0, 0.0, 1.0, 1.0, 4, 0.1),
    ];
    sort_by_score_desc(&mut objects);

    let labels: Vec<usize> = objects.iter().map(|o| o.label).collect();
    assert_eq!(labels, vec![1, 3, 2, 0, 4]);
}

#[test]
fn score_sort_handles_trivial_lists() {
    let mut empty: Vec<Detection> = Vec::new();
    sort_by_score_desc(&mut empty);
    assert!(empty.is_empty());

    let mut single = vec![det(0.0, 0.0, 1.0, 1.0, 0, 0.5)];
    sort_by_score_desc(&mut single);
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].score, 0.5);
}

#[test]
fn score_sort_handles_all_equal_scores() {
    let mut objects: Vec<Detection> =
        (0..17).map(|i| det(i as f32, 0.0, 1.0, 1.0, 0, 0.5)).collect();
    sort_by_score_desc(&mut objects);
    assert_eq!(objects.len(), 17);
    assert!(objects.iter().all(|o| o.score == 0.5));
}

#[test]
fn iou_exactly_at_threshold_is_not_suppressed() {
    // 10x10 boxes offset by 6: intersection 40, union 160, IoU exactly 0.25.
    let objects = vec![
        det(0.0, 0.0, 10.0, 10.0, 0, 0.9),
        det(6.0, 0.0, 10.0, 10.0, 0, 0.8),
    ];

    let picked = nms_sorted_boxes(&objects, 0.25);
    assert_eq!(picked, vec![0, 1]);

    let picked = nms_sorted_boxes(&objects, 0.24);
    assert_eq!(picked, vec![0]);
}

#[test]
fn identical_boxes_reduce_to_one() {
    let objects = vec![
        det(5.0, 5.0, 20.0, 20.0, 0, 0.9),
        det(5.0, 5.0, 20.0, 20.0, 0, 0.7),
    ];

    let picked = nms_sorted_boxes(&objects, 0.8);
    assert_eq!(picked, vec![0]);
}

#[test]
fn suppression_ignores_class_labels() {
    let objects = vec![
        det(5.0, 5.0, 20.0, 20.0, 0, 0.9),
        det(5.0, 5.0, 20.0, 20.0, 1, 0.7),
    ];

    let picked = nms_sorted_boxes(&objects, 0.8);
    assert_eq!(picked, vec![0]);
}

#[test]
fn highest_scoring_detection_is_always_kept() {
    let mut rng = StdRng::seed_from_u64(44);
    let mut objects: Vec<Detection> = (0..50)
        .map(|_| {
            det(
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..100.0),
                rng.random_range(1.0..30.0),
                rng.random_range(1.0..30.0),
                0,
                rng.random_range(0.0..1.0),
            )
        })
        .collect();
    sort_by_score_desc(&mut objects);

    let picked = nms_sorted_boxes(&objects, 0.5);
    assert!(!picked.is_empty());
    assert_eq!(picked[0], 0);
}

#[test]
fn degenerate_boxes_do_not_poison_suppression() {
    let objects = vec![
        det(10.0, 10.0, 0.0, 0.0, 0, 0.9),
        det(10.0, 10.0, 0.0, 0.0, 0, 0.8),
    ];

    // Zero-area boxes have IoU 0 by the union guard, so both survive.
    let picked = nms_sorted_boxes(&objects, 0.5);
    assert_eq!(picked, vec![0, 1]);
}

#[test]
fn nms_of_empty_list_is_empty() {
    let picked = nms_sorted_boxes(&[], 0.5);
    assert!(picked.is_empty());
}

#[test]
fn area_sort_orders_by_descending_area() {
    let mut objects = vec![
        det(0.0, 0.0, 2.0, 5.0, 0, 0.9),
        det(0.0, 0.0, 10.0, 10.0, 1, 0.1),
        det(0.0, 0.0, 5.0, 10.0, 2, 0.5),
    ];
    sort_by_area_desc(&mut objects);

    let labels: Vec<usize> = objects.iter().map(|o| o.label).collect();
    assert_eq!(labels, vec![1, 2, 0]);
}
