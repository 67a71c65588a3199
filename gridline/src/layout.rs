//! Column layout state and pixel geometry.
//!
//! [`ColumnLayout`] holds the per-column maps the grid mutates (display
//! order, pin, hidden flag, width, header group override), all keyed by
//! column id. Order is kept as its own sequence. Map iteration order is never
//! used for display.
//!
//! The free functions turn rendered columns plus widths into pane geometry.

use std::collections::HashMap;

use log::debug;

use crate::column::{Column, DEFAULT_COLUMN_WIDTH, DEFAULT_MIN_WIDTH, Pin};
use crate::engine::resolve_rendered_columns;

// =============================================================================
// ColumnLayout
// =============================================================================

/// Mutable layout state for a set of column definitions.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    /// Comma-joined ids of the definitions the maps were seeded from.
    seed_key: String,
    order: Vec<String>,
    pinned: HashMap<String, Option<Pin>>,
    hidden: HashMap<String, bool>,
    widths: HashMap<String, f64>,
    group_overrides: HashMap<String, Option<String>>,
}

impl ColumnLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layout seeded from `columns`.
    pub fn seeded<T>(columns: &[Column<T>]) -> Self {
        let mut layout = Self::new();
        layout.sync(columns);
        layout
    }

    /// Re-seed from `columns` when their id set changed. Returns whether it did.
    ///
    /// A re-seed resets order, widths and group overrides. Pin and hidden
    /// choices survive when the new ids only append to the previous set;
    /// otherwise they are reset from the definitions too. An empty definition
    /// list leaves the layout untouched.
    pub fn sync<T>(&mut self, columns: &[Column<T>]) -> bool {
        if columns.is_empty() {
            return false;
        }
        let key = columns
            .iter()
            .map(|column| column.id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        if key == self.seed_key {
            return false;
        }
        let expanded = !self.seed_key.is_empty() && key.starts_with(&format!("{},", self.seed_key));
        debug!(
            "Reseeding column layout ({} columns, expanded={})",
            columns.len(),
            expanded
        );
        self.seed_key = key;

        self.order = columns.iter().map(|column| column.id.clone()).collect();
        self.group_overrides.clear();
        self.widths = columns
            .iter()
            .map(|column| (column.id.clone(), initial_width(column)))
            .collect();

        if expanded {
            for column in columns {
                self.pinned
                    .entry(column.id.clone())
                    .or_insert(column.pinned);
                self.hidden
                    .entry(column.id.clone())
                    .or_insert(column.hidden);
            }
        } else {
            self.pinned = columns
                .iter()
                .map(|column| (column.id.clone(), column.pinned))
                .collect();
            self.hidden = columns
                .iter()
                .map(|column| (column.id.clone(), column.hidden))
                .collect();
        }
        true
    }

    /// Visible columns in display order, with pins resolved.
    pub fn rendered_columns<T>(&self, columns: &[Column<T>]) -> Vec<Column<T>> {
        resolve_rendered_columns(columns, &self.hidden, &self.order, &self.pinned)
    }

    // -------------------------------------------------------------------------
    // Order
    // -------------------------------------------------------------------------

    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Move `source` next to `target` in the display order.
    ///
    /// Returns false, leaving the order unchanged, when either id is unknown
    /// or they are the same column.
    pub fn move_column(&mut self, source: &str, target: &str, before: bool) -> bool {
        if source == target || !self.order.iter().any(|id| id == source) {
            return false;
        }
        let mut next: Vec<String> = self
            .order
            .iter()
            .filter(|id| id.as_str() != source)
            .cloned()
            .collect();
        let Some(target_index) = next.iter().position(|id| id == target) else {
            return false;
        };
        let insert_at = if before { target_index } else { target_index + 1 };
        next.insert(insert_at, source.to_string());
        self.order = next;
        true
    }

    // -------------------------------------------------------------------------
    // Pins
    // -------------------------------------------------------------------------

    /// The pin recorded for a column, `None` when unpinned or unknown.
    pub fn pin(&self, column_id: &str) -> Option<Pin> {
        self.pinned.get(column_id).copied().flatten()
    }

    pub fn set_pin(&mut self, column_id: &str, pin: Option<Pin>) {
        self.pinned.insert(column_id.to_string(), pin);
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub fn is_hidden(&self, column_id: &str) -> bool {
        self.hidden.get(column_id).copied().unwrap_or(false)
    }

    pub fn set_hidden(&mut self, column_id: &str, hidden: bool) {
        self.hidden.insert(column_id.to_string(), hidden);
    }

    // -------------------------------------------------------------------------
    // Widths
    // -------------------------------------------------------------------------

    /// The stored width for a column, else its declared width, else the default.
    pub fn width_of<T>(&self, column: &Column<T>) -> f64 {
        self.widths
            .get(&column.id)
            .copied()
            .unwrap_or_else(|| column.declared_width())
    }

    pub fn set_width(&mut self, column_id: &str, width: f64) {
        self.widths.insert(column_id.to_string(), width);
    }

    /// Widths after spreading spare viewport space over flex columns.
    ///
    /// When `viewport_width` exceeds the sum of stored widths, the surplus
    /// goes to columns with a positive `flex` in proportion to it (or to
    /// every column when none declares flex), each clamped to its bounds.
    pub fn resolved_widths<T>(&self, columns: &[Column<T>], viewport_width: f64) -> ColumnWidths {
        let mut resolved: HashMap<String, f64> = self.widths.clone();
        for column in columns {
            resolved.insert(column.id.clone(), self.width_of(column));
        }
        if columns.is_empty() || viewport_width <= 0.0 {
            return ColumnWidths(resolved);
        }

        let base_total: f64 = columns.iter().map(|column| self.width_of(column)).sum();
        let extra = viewport_width - base_total;
        if extra <= 0.0 {
            return ColumnWidths(resolved);
        }

        let has_flex = columns
            .iter()
            .any(|column| column.flex.unwrap_or(0.0) > 0.0);
        let grows = |column: &Column<T>| !has_flex || column.flex.unwrap_or(0.0) > 0.0;
        let total_flex: f64 = columns
            .iter()
            .filter(|column| grows(*column))
            .map(|column| column.flex.unwrap_or(1.0))
            .sum();
        if total_flex <= 0.0 {
            return ColumnWidths(resolved);
        }

        for column in columns.iter().filter(|column| grows(*column)) {
            let ratio = column.flex.unwrap_or(1.0) / total_flex;
            let grown = self.width_of(column) + extra * ratio;
            resolved.insert(column.id.clone(), column.clamp_width(grown));
        }
        ColumnWidths(resolved)
    }

    // -------------------------------------------------------------------------
    // Header group overrides
    // -------------------------------------------------------------------------

    /// The column's effective header group: its override when present, else
    /// the declared group.
    pub fn effective_group<'c, T>(&'c self, column: &'c Column<T>) -> Option<&'c str> {
        match self.group_overrides.get(&column.id) {
            Some(group) => group.as_deref(),
            None => column.header_group_id.as_deref(),
        }
    }

    pub fn has_group_override(&self, column_id: &str) -> bool {
        self.group_overrides.contains_key(column_id)
    }

    /// Record a group override. `None` takes the column out of every group.
    pub fn set_group_override(&mut self, column_id: &str, group: Option<String>) {
        self.group_overrides.insert(column_id.to_string(), group);
    }

    pub fn clear_group_override(&mut self, column_id: &str) {
        self.group_overrides.remove(column_id);
    }
}

/// Width a freshly seeded column starts at.
fn initial_width<T>(column: &Column<T>) -> f64 {
    column.width.unwrap_or_else(|| {
        column
            .min_width
            .unwrap_or(DEFAULT_MIN_WIDTH)
            .max(DEFAULT_COLUMN_WIDTH)
    })
}

// =============================================================================
// ColumnWidths
// =============================================================================

/// Resolved pixel widths keyed by column id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnWidths(HashMap<String, f64>);

impl ColumnWidths {
    /// Width for a column, falling back to its declared width.
    pub fn width_of<T>(&self, column: &Column<T>) -> f64 {
        self.0
            .get(&column.id)
            .copied()
            .unwrap_or_else(|| column.declared_width())
    }

    pub fn get(&self, column_id: &str) -> Option<f64> {
        self.0.get(column_id).copied()
    }

    /// Sum of widths for `columns`.
    pub fn total<T>(&self, columns: &[Column<T>]) -> f64 {
        columns.iter().map(|column| self.width_of(column)).sum()
    }
}

// =============================================================================
// Drag preview
// =============================================================================

/// Where a dragged column would land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropHint {
    pub target_column_id: String,
    pub before: bool,
    /// The drop would place the column outside the target's group.
    pub ungroup_at_edge: bool,
}

impl DropHint {
    pub fn new(target_column_id: impl Into<String>, before: bool) -> Self {
        Self {
            target_column_id: target_column_id.into(),
            before,
            ungroup_at_edge: false,
        }
    }

    pub fn ungrouping(mut self) -> Self {
        self.ungroup_at_edge = true;
        self
    }
}

/// Display order while a drag is hovering a target: the dragged column is
/// shown at its drop position with the target's pin. Unknown ids leave the
/// order as is.
pub fn preview_columns<T>(
    columns: Vec<Column<T>>,
    dragging_id: Option<&str>,
    hint: Option<&DropHint>,
) -> Vec<Column<T>> {
    let (Some(dragging_id), Some(hint)) = (dragging_id, hint) else {
        return columns;
    };
    let Some(dragged_index) = columns.iter().position(|column| column.id == dragging_id) else {
        return columns;
    };
    let Some(target_pin) = columns
        .iter()
        .filter(|column| column.id != dragging_id)
        .find(|column| column.id == hint.target_column_id)
        .map(|column| column.pinned)
    else {
        return columns;
    };

    let mut without = columns;
    let mut dragged = without.remove(dragged_index);
    dragged.pinned = target_pin;
    let target_index = without
        .iter()
        .position(|column| column.id == hint.target_column_id)
        .unwrap_or(without.len());
    let insert_at = if hint.before {
        target_index
    } else {
        target_index + 1
    };
    without.insert(insert_at.min(without.len()), dragged);
    without
}

// =============================================================================
// Pane geometry
// =============================================================================

/// Pixel geometry of the three panes for one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaneGeometry {
    pub left_width: f64,
    pub right_width: f64,
    /// Sum of center column widths.
    pub center_content_width: f64,
    /// Visible width of the center pane, never wider than its content.
    pub center_pane_width: f64,
    /// Sticky offset of each left-pinned column from the left edge.
    pub sticky_left: HashMap<String, f64>,
    /// Sticky offset of each right-pinned column from the right edge.
    pub sticky_right: HashMap<String, f64>,
    pub last_left_id: Option<String>,
    pub first_right_id: Option<String>,
}

impl PaneGeometry {
    /// Geometry for `columns` (display order, pins resolved).
    pub fn compute<T>(columns: &[Column<T>], widths: &ColumnWidths, viewport_width: f64) -> Self {
        let mut geometry = Self::default();

        let mut offset = 0.0;
        for column in columns.iter().filter(|c| c.pinned == Some(Pin::Left)) {
            geometry.sticky_left.insert(column.id.clone(), offset);
            offset += widths.width_of(column);
            geometry.last_left_id = Some(column.id.clone());
        }
        geometry.left_width = offset;

        let right: Vec<&Column<T>> = columns
            .iter()
            .filter(|c| c.pinned == Some(Pin::Right))
            .collect();
        let mut offset = 0.0;
        for column in right.iter().rev() {
            geometry.sticky_right.insert(column.id.clone(), offset);
            offset += widths.width_of(column);
        }
        geometry.right_width = offset;
        geometry.first_right_id = right.first().map(|column| column.id.clone());

        geometry.center_content_width = columns
            .iter()
            .filter(|c| c.pinned.is_none())
            .map(|c| widths.width_of(c))
            .sum();
        geometry.center_pane_width = center_pane_width(
            viewport_width,
            geometry.left_width,
            geometry.right_width,
            geometry.center_content_width,
        );
        geometry
    }

    /// Total width of all three panes' content.
    pub fn total_width(&self) -> f64 {
        self.left_width + self.center_content_width + self.right_width
    }

    /// Largest horizontal scroll offset for the center pane.
    pub fn max_scroll_left(&self) -> f64 {
        (self.center_content_width - self.center_pane_width).max(0.0)
    }
}

/// Width of the center pane: the content width, capped by what the pinned
/// panes leave of the viewport, rounded up. Zero when there is no room.
pub fn center_pane_width(viewport: f64, left: f64, right: f64, content: f64) -> f64 {
    if viewport <= 0.0 {
        return 0.0;
    }
    let available = viewport - left - right;
    if available <= 0.0 || content <= 0.0 {
        return 0.0;
    }
    content.min(available).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(ids: &[&str]) -> Vec<Column<()>> {
        ids.iter().map(|id| Column::new(*id, *id)).collect()
    }

    #[test]
    fn test_initial_width_respects_min() {
        let column: Column<()> = Column::new("a", "A").min_width(200.0);
        assert_eq!(initial_width(&column), 200.0);
        let column: Column<()> = Column::new("a", "A").width(90.0).min_width(200.0);
        assert_eq!(initial_width(&column), 90.0);
    }

    #[test]
    fn test_move_column_unknown_target_is_noop() {
        let mut layout = ColumnLayout::seeded(&cols(&["a", "b", "c"]));
        assert!(!layout.move_column("a", "zzz", true));
        assert_eq!(layout.order(), ["a", "b", "c"]);
        assert!(layout.move_column("a", "c", false));
        assert_eq!(layout.order(), ["b", "c", "a"]);
    }
}
