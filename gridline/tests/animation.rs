use std::time::{Duration, Instant};

use gridline::animation::{AnimationConfig, CellKey, ReorderAnimator};
use gridline::column::SELECT_COLUMN_ID;
use gridline::transitions::Easing;

fn linear(ms: u64) -> AnimationConfig {
    AnimationConfig::new()
        .duration(Duration::from_millis(ms))
        .easing(Easing::Linear)
}

fn header(id: &str) -> CellKey {
    CellKey::Header(id.to_string())
}

fn body(row: usize, id: &str) -> CellKey {
    CellKey::Body {
        row,
        column_id: id.to_string(),
    }
}

// =============================================================================
// FLIP offsets
// =============================================================================

#[test]
fn test_moved_cells_start_at_inverted_delta() {
    let mut animator = ReorderAnimator::new(linear(100));
    let start = Instant::now();

    animator.capture_before(vec![(header("a"), 0.0), (header("b"), 100.0)], start);
    let started = animator.animate_after(vec![(header("a"), 100.0), (header("b"), 0.0)], start);

    assert_eq!(started, 2);
    assert!(animator.is_animating());
    assert_eq!(animator.offset(&header("a"), start), -100.0);
    assert_eq!(animator.offset(&header("b"), start), 100.0);
}

#[test]
fn test_offsets_ease_back_to_zero() {
    let mut animator = ReorderAnimator::new(linear(100));
    let start = Instant::now();
    animator.capture_before(vec![(header("a"), 0.0)], start);
    animator.animate_after(vec![(header("a"), 80.0)], start);

    let halfway = animator.offset(&header("a"), start + Duration::from_millis(50));
    assert!((halfway + 40.0).abs() < 0.01);
    assert_eq!(animator.offset(&header("a"), start + Duration::from_millis(100)), 0.0);

    animator.prune(start + Duration::from_millis(99));
    assert!(animator.is_animating());
    animator.prune(start + Duration::from_millis(100));
    assert!(!animator.is_animating());
}

#[test]
fn test_sub_pixel_moves_are_not_animated() {
    let mut animator = ReorderAnimator::new(linear(100));
    let start = Instant::now();
    animator.capture_before(vec![(header("a"), 10.0), (header("b"), 20.0)], start);
    let started = animator.animate_after(vec![(header("a"), 10.5), (header("b"), 20.0)], start);

    assert_eq!(started, 0);
    assert!(!animator.is_animating());
}

#[test]
fn test_animate_without_capture_does_nothing() {
    let mut animator = ReorderAnimator::new(linear(100));
    let started = animator.animate_after(vec![(header("a"), 10.0)], Instant::now());
    assert_eq!(started, 0);
}

#[test]
fn test_capture_includes_in_flight_offset() {
    let mut animator = ReorderAnimator::new(linear(100));
    let start = Instant::now();
    animator.capture_before(vec![(header("a"), 0.0)], start);
    animator.animate_after(vec![(header("a"), 100.0)], start);

    // Halfway through, the cell shows at 50. Moving it back to 0 animates
    // from there.
    let later = start + Duration::from_millis(50);
    animator.capture_before(vec![(header("a"), 100.0)], later);
    animator.animate_after(vec![(header("a"), 0.0)], later);
    let offset = animator.offset(&header("a"), later);
    assert!((offset - 50.0).abs() < 0.01);
}

// =============================================================================
// Limits and reset
// =============================================================================

#[test]
fn test_rows_beyond_limit_and_selection_column_are_skipped() {
    let config = linear(100).max_animated_rows(2);
    let mut animator = ReorderAnimator::new(config);
    let start = Instant::now();

    let before = vec![
        (body(0, "a"), 0.0),
        (body(1, "a"), 0.0),
        (body(2, "a"), 0.0),
        (header(SELECT_COLUMN_ID), 0.0),
    ];
    let after = vec![
        (body(0, "a"), 50.0),
        (body(1, "a"), 50.0),
        (body(2, "a"), 50.0),
        (header(SELECT_COLUMN_ID), 50.0),
    ];
    animator.capture_before(before, start);
    assert_eq!(animator.animate_after(after, start), 2);
    assert_eq!(animator.offset(&body(2, "a"), start), 0.0);
    assert_eq!(animator.offset(&header(SELECT_COLUMN_ID), start), 0.0);
}

#[test]
fn test_reset_stops_everything() {
    let mut animator = ReorderAnimator::new(linear(100));
    let start = Instant::now();
    animator.capture_before(vec![(header("a"), 0.0), (header("b"), 0.0)], start);
    animator.animate_after(vec![(header("a"), 30.0), (header("b"), 60.0)], start);

    assert_eq!(animator.reset(), 2);
    assert!(!animator.is_animating());
    assert_eq!(animator.offset(&header("a"), start), 0.0);
    assert_eq!(animator.reset(), 0);
}

#[test]
fn test_cell_key_column_id() {
    assert_eq!(header("a").column_id(), "a");
    assert_eq!(CellKey::Filter("b".to_string()).column_id(), "b");
    assert_eq!(body(3, "c").column_id(), "c");
}
