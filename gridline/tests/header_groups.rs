use gridline::column::HeaderGroupDef;
use gridline::header_groups::{
    DRAG_GAP_ID, DragHints, HeaderSection, SegmentColumn, compute_header_group_segments,
    compute_header_section_descriptors,
};

fn groups() -> Vec<HeaderGroupDef> {
    vec![
        HeaderGroupDef::new("g1", "Group 1"),
        HeaderGroupDef::new("g2", "Group 2"),
    ]
}

fn width(_id: &str) -> f64 {
    100.0
}

fn dragging(column: &str, target: &str, original: Option<&str>, drop: Option<&str>) -> DragHints {
    DragHints {
        dragging_column_id: Some(column.to_string()),
        drop_target_column_id: Some(target.to_string()),
        dragging_original_group_id: original.map(str::to_string),
        drop_group_id: drop.map(str::to_string),
        ..DragHints::default()
    }
}

// =============================================================================
// Segments at rest
// =============================================================================

#[test]
fn test_no_groups_or_no_columns_yield_nothing() {
    let columns = [SegmentColumn::new("a", Some("g1"))];
    assert!(compute_header_group_segments(&columns, width, &[], 100.0, &DragHints::default()).is_empty());
    assert!(compute_header_group_segments(&[], width, &groups(), 0.0, &DragHints::default()).is_empty());
}

#[test]
fn test_one_segment_per_contiguous_group() {
    let columns = [
        SegmentColumn::new("a", Some("g1")),
        SegmentColumn::new("b", Some("g1")),
        SegmentColumn::new("c", Some("g2")),
    ];
    let segments = compute_header_group_segments(&columns, width, &groups(), 300.0, &DragHints::default());

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].id, "g1");
    assert_eq!(segments[0].label, "Group 1");
    assert_eq!((segments[0].column_start, segments[0].column_span), (0, 2));
    assert_eq!(segments[0].width, 200.0);
    assert_eq!(segments[1].id, "g2");
    assert_eq!((segments[1].column_start, segments[1].column_span), (2, 1));
    assert_eq!(segments[1].width, 100.0);
}

#[test]
fn test_ungrouped_and_unknown_groups_have_no_segment() {
    let columns = [
        SegmentColumn::new("a", Some("g1")),
        SegmentColumn::new("b", None),
        SegmentColumn::new("c", Some("nope")),
        SegmentColumn::new("d", Some("g2")),
    ];
    let segments = compute_header_group_segments(&columns, width, &groups(), 0.0, &DragHints::default());

    let spans: Vec<(&str, usize, usize)> = segments
        .iter()
        .map(|segment| (segment.id.as_str(), segment.column_start, segment.column_span))
        .collect();
    assert_eq!(spans, vec![("g1", 0, 1), ("g2", 3, 1)]);
}

#[test]
fn test_segments_never_overlap_and_stay_in_bounds() {
    let columns = [
        SegmentColumn::new("a", None),
        SegmentColumn::new("b", Some("g1")),
        SegmentColumn::new("c", Some("g2")),
        SegmentColumn::new("d", Some("g2")),
        SegmentColumn::new("e", None),
        SegmentColumn::new("f", Some("g1")),
    ];
    let segments = compute_header_group_segments(&columns, width, &groups(), 0.0, &DragHints::default());

    let mut cursor = 0;
    for segment in &segments {
        assert!(segment.column_start >= cursor);
        assert!(segment.column_span > 0);
        cursor = segment.column_start + segment.column_span;
    }
    assert!(cursor <= columns.len());
    assert_eq!(segments.len(), 3);
}

#[test]
fn test_last_segment_absorbs_total_width() {
    let columns = [
        SegmentColumn::new("a", Some("g1")),
        SegmentColumn::new("b", Some("g1")),
    ];
    let segments = compute_header_group_segments(&columns, width, &groups(), 199.0, &DragHints::default());
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].width, 199.0);

    let segments = compute_header_group_segments(&columns, width, &groups(), 0.0, &DragHints::default());
    assert_eq!(segments[0].width, 200.0);
}

#[test]
fn test_widths_are_rounded_per_column() {
    let columns = [
        SegmentColumn::new("a", Some("g1")),
        SegmentColumn::new("b", Some("g1")),
    ];
    let segments = compute_header_group_segments(
        &columns,
        |_| 100.4,
        &groups(),
        0.0,
        &DragHints::default(),
    );
    assert_eq!(segments[0].width, 200.0);
}

// =============================================================================
// Segments during a drag
// =============================================================================

#[test]
fn test_same_group_reorder_keeps_one_band() {
    let columns = [
        SegmentColumn::new("a", Some("g1")),
        SegmentColumn::new("b", Some("g1")),
        SegmentColumn::new("c", Some("g1")),
    ];
    let hints = dragging("b", "c", Some("g1"), Some("g1"));
    let segments = compute_header_group_segments(&columns, width, &groups(), 300.0, &hints);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].id, "g1");
    assert_eq!(segments[0].column_span, 3);
    assert_eq!(segments[0].width, 300.0);
}

#[test]
fn test_drop_into_other_group_spans_dragged_slot() {
    let columns = [
        SegmentColumn::new("a", Some("g2")),
        SegmentColumn::new("b", Some("g1")),
        SegmentColumn::new("c", Some("g2")),
    ];
    let hints = dragging("b", "c", Some("g1"), Some("g2"));
    let segments = compute_header_group_segments(&columns, width, &groups(), 300.0, &hints);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].id, "g2");
    assert_eq!((segments[0].column_start, segments[0].column_span), (0, 3));
}

#[test]
fn test_ungroup_edge_shows_drag_gap() {
    let columns = [
        SegmentColumn::new("a", Some("g1")),
        SegmentColumn::new("b", Some("g1")),
        SegmentColumn::new("c", None),
        SegmentColumn::new("d", Some("g2")),
    ];
    let hints = DragHints {
        drop_target_ungroup_at_edge: true,
        ..dragging("c", "d", Some("g1"), Some("g2"))
    };
    let segments = compute_header_group_segments(&columns, width, &groups(), 0.0, &hints);

    let ids: Vec<&str> = segments.iter().map(|segment| segment.id.as_str()).collect();
    assert_eq!(ids, vec!["g1", DRAG_GAP_ID, "g2"]);
    assert!(segments[1].is_drag_gap());
    assert_eq!(segments[1].label, "");
    assert_eq!((segments[1].column_start, segments[1].column_span), (2, 1));
}

#[test]
fn test_dragged_column_without_group_falls_back() {
    let columns = [
        SegmentColumn::new("a", Some("g1")),
        SegmentColumn::new("x", None),
    ];

    let hints = DragHints {
        dragging_column_source_group_id: Some("g1".to_string()),
        ..dragging("x", "a", None, None)
    };
    let segments = compute_header_group_segments(&columns, width, &groups(), 0.0, &hints);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].column_span, 2);

    let hints = dragging("x", "a", None, None);
    let segments = compute_header_group_segments(&columns, width, &groups(), 0.0, &hints);
    assert_eq!(segments.len(), 2);
    assert!(segments[1].is_drag_gap());
}

// =============================================================================
// Sections
// =============================================================================

#[test]
fn test_sections_cover_every_column_in_order() {
    let columns = [
        SegmentColumn::new("a", None),
        SegmentColumn::new("b", Some("g1")),
        SegmentColumn::new("c", Some("g1")),
        SegmentColumn::new("d", None),
        SegmentColumn::new("e", None),
    ];
    let segments = compute_header_group_segments(&columns, width, &groups(), 0.0, &DragHints::default());
    let sections = compute_header_section_descriptors(&columns, &segments);

    assert_eq!(sections.len(), 3);
    assert_eq!(
        sections[0],
        HeaderSection::Ungrouped {
            column_start: 0,
            column_span: 1,
            column_ids: vec!["a".to_string()],
        }
    );
    assert_eq!(
        sections[1],
        HeaderSection::Group {
            id: "g1".to_string(),
            label: "Group 1".to_string(),
            column_start: 1,
            column_span: 2,
            column_ids: vec!["b".to_string(), "c".to_string()],
        }
    );
    assert_eq!(
        sections[2],
        HeaderSection::Ungrouped {
            column_start: 3,
            column_span: 2,
            column_ids: vec!["d".to_string(), "e".to_string()],
        }
    );

    let covered: usize = sections.iter().map(HeaderSection::column_span).sum();
    assert_eq!(covered, columns.len());
}

#[test]
fn test_drag_gap_section_carries_width() {
    let columns = [
        SegmentColumn::new("a", Some("g1")),
        SegmentColumn::new("b", Some("g1")),
    ];
    let hints = DragHints {
        drop_target_ungroup_at_edge: true,
        ..dragging("b", "a", Some("g2"), Some("g1"))
    };
    let segments = compute_header_group_segments(&columns, width, &groups(), 200.0, &hints);
    let sections = compute_header_section_descriptors(&columns, &segments);

    assert_eq!(sections.len(), 2);
    assert!(matches!(sections[0], HeaderSection::Group { column_span: 1, .. }));
    assert_eq!(
        sections[1],
        HeaderSection::DragGap {
            column_start: 1,
            column_span: 1,
            width: 100.0,
        }
    );
}
