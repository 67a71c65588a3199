use gridline::column::{Column, DEFAULT_COLUMN_WIDTH, Pin};
use gridline::layout::{ColumnLayout, DropHint, PaneGeometry, center_pane_width, preview_columns};

fn column(id: &str) -> Column<()> {
    Column::new(id, id.to_uppercase())
}

fn ids(columns: &[Column<()>]) -> Vec<&str> {
    columns.iter().map(|column| column.id.as_str()).collect()
}

// =============================================================================
// Seeding
// =============================================================================

#[test]
fn test_seeded_layout_follows_definitions() {
    let columns = vec![
        column("a").width(120.0),
        column("b").pinned(Pin::Right),
        column("c").hidden(true),
    ];
    let layout = ColumnLayout::seeded(&columns);

    assert_eq!(layout.order(), ["a", "b", "c"]);
    assert_eq!(layout.width_of(&columns[0]), 120.0);
    assert_eq!(layout.width_of(&columns[1]), DEFAULT_COLUMN_WIDTH);
    assert_eq!(layout.pin("b"), Some(Pin::Right));
    assert!(layout.is_hidden("c"));
    assert_eq!(ids(&layout.rendered_columns(&columns)), vec!["a", "b"]);
}

#[test]
fn test_sync_with_same_ids_keeps_state() {
    let columns = vec![column("a"), column("b")];
    let mut layout = ColumnLayout::seeded(&columns);
    assert!(layout.move_column("a", "b", false));
    layout.set_width("a", 300.0);

    assert!(!layout.sync(&columns));
    assert_eq!(layout.order(), ["b", "a"]);
    assert_eq!(layout.width_of(&columns[0]), 300.0);
}

#[test]
fn test_appended_columns_keep_pins_and_hidden() {
    let mut layout = ColumnLayout::seeded(&[column("a"), column("b")]);
    layout.set_pin("a", Some(Pin::Left));
    layout.set_hidden("b", true);
    layout.set_width("a", 300.0);
    layout.set_group_override("a", Some("g".to_string()));

    let expanded = vec![column("a"), column("b"), column("c").pinned(Pin::Right)];
    assert!(layout.sync(&expanded));

    assert_eq!(layout.pin("a"), Some(Pin::Left));
    assert!(layout.is_hidden("b"));
    assert_eq!(layout.pin("c"), Some(Pin::Right));
    assert_eq!(layout.width_of(&expanded[0]), DEFAULT_COLUMN_WIDTH);
    assert!(!layout.has_group_override("a"));
    assert_eq!(layout.order(), ["a", "b", "c"]);
}

#[test]
fn test_replaced_columns_reset_pins() {
    let mut layout = ColumnLayout::seeded(&[column("a"), column("b")]);
    layout.set_pin("a", Some(Pin::Left));

    let reordered = vec![column("b"), column("a")];
    assert!(layout.sync(&reordered));
    assert_eq!(layout.pin("a"), None);
    assert_eq!(layout.order(), ["b", "a"]);
}

#[test]
fn test_empty_definitions_leave_layout_alone() {
    let mut layout = ColumnLayout::seeded(&[column("a")]);
    assert!(!layout.sync::<()>(&[]));
    assert_eq!(layout.order(), ["a"]);
}

#[test]
fn test_group_override_beats_declared_group() {
    let declared = column("a").header_group("g1");
    let mut layout = ColumnLayout::seeded(std::slice::from_ref(&declared));
    assert_eq!(layout.effective_group(&declared), Some("g1"));

    layout.set_group_override("a", None);
    assert_eq!(layout.effective_group(&declared), None);

    layout.set_group_override("a", Some("g2".to_string()));
    assert_eq!(layout.effective_group(&declared), Some("g2"));

    layout.clear_group_override("a");
    assert_eq!(layout.effective_group(&declared), Some("g1"));
}

// =============================================================================
// Widths
// =============================================================================

#[test]
fn test_flex_columns_share_spare_width() {
    let columns = vec![
        column("a").width(100.0).flex(1.0),
        column("b").width(100.0).flex(3.0),
        column("c").width(100.0),
    ];
    let layout = ColumnLayout::seeded(&columns);
    let widths = layout.resolved_widths(&columns, 700.0);

    assert_eq!(widths.get("a"), Some(200.0));
    assert_eq!(widths.get("b"), Some(400.0));
    assert_eq!(widths.get("c"), Some(100.0));
    assert_eq!(widths.total(&columns), 700.0);
}

#[test]
fn test_without_flex_every_column_grows() {
    let columns = vec![
        column("a").width(100.0),
        column("b").width(100.0),
        column("c").width(100.0).max_width(120.0),
    ];
    let layout = ColumnLayout::seeded(&columns);
    let widths = layout.resolved_widths(&columns, 450.0);

    assert_eq!(widths.get("a"), Some(150.0));
    assert_eq!(widths.get("b"), Some(150.0));
    assert_eq!(widths.get("c"), Some(120.0));
}

#[test]
fn test_no_growth_when_content_overflows() {
    let columns = vec![column("a").width(300.0).flex(1.0), column("b").width(300.0)];
    let layout = ColumnLayout::seeded(&columns);

    let widths = layout.resolved_widths(&columns, 500.0);
    assert_eq!(widths.get("a"), Some(300.0));

    let unmeasured = layout.resolved_widths(&columns, 0.0);
    assert_eq!(unmeasured.get("b"), Some(300.0));
}

// =============================================================================
// Geometry
// =============================================================================

#[test]
fn test_pane_geometry() {
    let columns = vec![
        column("a").width(50.0).pinned(Pin::Left),
        column("b").width(100.0),
        column("c").width(100.0),
        column("d").width(60.0).pinned(Pin::Right),
        column("e").width(40.0).pinned(Pin::Right),
    ];
    let layout = ColumnLayout::seeded(&columns);
    let widths = layout.resolved_widths(&columns, 0.0);
    let geometry = PaneGeometry::compute(&columns, &widths, 300.0);

    assert_eq!(geometry.left_width, 50.0);
    assert_eq!(geometry.right_width, 100.0);
    assert_eq!(geometry.center_content_width, 200.0);
    assert_eq!(geometry.center_pane_width, 150.0);
    assert_eq!(geometry.max_scroll_left(), 50.0);
    assert_eq!(geometry.total_width(), 350.0);
    assert_eq!(geometry.sticky_left.get("a"), Some(&0.0));
    assert_eq!(geometry.sticky_right.get("e"), Some(&0.0));
    assert_eq!(geometry.sticky_right.get("d"), Some(&40.0));
    assert_eq!(geometry.last_left_id.as_deref(), Some("a"));
    assert_eq!(geometry.first_right_id.as_deref(), Some("d"));
}

#[test]
fn test_center_pane_width_edges() {
    assert_eq!(center_pane_width(0.0, 10.0, 10.0, 500.0), 0.0);
    assert_eq!(center_pane_width(100.0, 60.0, 60.0, 500.0), 0.0);
    assert_eq!(center_pane_width(800.0, 0.0, 0.0, 0.0), 0.0);
    assert_eq!(center_pane_width(800.0, 100.0, 100.0, 300.2), 301.0);
    assert_eq!(center_pane_width(400.0, 100.0, 100.0, 300.0), 200.0);
}

// =============================================================================
// Drag preview
// =============================================================================

#[test]
fn test_preview_places_dragged_column_with_target_pin() {
    let columns = vec![
        column("a"),
        column("b"),
        column("c"),
        column("d").pinned(Pin::Right),
    ];
    let hint = DropHint::new("d", true);
    let preview = preview_columns(columns, Some("a"), Some(&hint));

    assert_eq!(ids(&preview), vec!["b", "c", "a", "d"]);
    assert_eq!(preview[2].pinned, Some(Pin::Right));
}

#[test]
fn test_preview_after_target() {
    let columns = vec![column("a"), column("b"), column("c")];
    let hint = DropHint::new("b", false);
    assert_eq!(ids(&preview_columns(columns, Some("c"), Some(&hint))), vec!["a", "b", "c"]);

    let columns = vec![column("a"), column("b"), column("c")];
    let hint = DropHint::new("c", false);
    assert_eq!(ids(&preview_columns(columns, Some("a"), Some(&hint))), vec!["b", "c", "a"]);
}

#[test]
fn test_preview_without_valid_hint_is_unchanged() {
    let columns = vec![column("a"), column("b")];
    let preview = preview_columns(columns, Some("a"), None);
    assert_eq!(ids(&preview), vec!["a", "b"]);

    let hint = DropHint::new("gone", true);
    let preview = preview_columns(preview, Some("a"), Some(&hint));
    assert_eq!(ids(&preview), vec!["a", "b"]);

    let hint = DropHint::new("b", true);
    let preview = preview_columns(preview, Some("gone"), Some(&hint));
    assert_eq!(ids(&preview), vec!["a", "b"]);
}

#[test]
fn test_drop_hint_ungrouping() {
    let hint = DropHint::new("a", true);
    assert!(!hint.ungroup_at_edge);
    let hint = hint.ungrouping();
    assert!(hint.ungroup_at_edge);
    assert_eq!(hint.target_column_id, "a");
}
