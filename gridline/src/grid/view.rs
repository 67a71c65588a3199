//! Derived grid state.

use crate::animation::CellKey;
use crate::column::{Column, DEFAULT_COLUMN_WIDTH, Pin};
use crate::engine::{
    PipelineInput, VisibleRange, display_value, run_pipeline, sort_indicator, total_pages,
    visible_range,
};
use crate::header_groups::{
    DragHints, HeaderGroupSegment, HeaderSection, SegmentColumn, compute_header_group_segments,
    compute_header_section_descriptors,
};
use crate::layout::{ColumnWidths, PaneGeometry, preview_columns};
use crate::row::{GridRow, Record, create_rows};

use super::Grid;

/// A snapshot of everything the renderer reads, computed from the grid's
/// current state.
///
/// Views are cheap enough to rebuild on every frame and never go stale: any
/// mutation of the grid needs `&mut`, which ends the borrow a view holds.
pub struct GridView<'g, T: Record> {
    grid: &'g Grid<T>,
    rendered: Vec<Column<T>>,
    preview: Vec<Column<T>>,
    sorted: Vec<GridRow<'g, T>>,
    paged: Vec<GridRow<'g, T>>,
    visible: VisibleRange,
    widths: ColumnWidths,
    geometry: PaneGeometry,
    segments: Vec<HeaderGroupSegment>,
    sections: Vec<HeaderSection>,
}

impl<T: Record> Grid<T> {
    /// Compute the current view.
    pub fn view(&self) -> GridView<'_, T> {
        let rendered = self.layout.rendered_columns(&self.columns);
        let rows = create_rows(&self.data);
        let page = self
            .config
            .pagination_enabled
            .then_some((self.page_index, self.page_size));
        let (sorted, paged) = run_pipeline(
            &rows,
            &rendered,
            PipelineInput {
                filters: &self.filters,
                quick_filter: &self.quick_filter,
                sort: &self.sort,
                page,
            },
        );

        let visible = visible_range(
            self.scroll.vertical.value(),
            self.viewport_height,
            self.config.row_height,
            paged.len(),
            self.config.row_buffer,
        );

        let widths = self.layout.resolved_widths(&rendered, self.viewport_width);
        let hints = self.drag_hints(&rendered);
        let dragging_id = self.drag.as_ref().map(|drag| drag.column_id.as_str());
        let preview = preview_columns(
            rendered.clone(),
            dragging_id,
            self.drag.as_ref().and_then(|drag| drag.hint.as_ref()),
        );
        let geometry = PaneGeometry::compute(&preview, &widths, self.viewport_width);

        let (segments, sections) = {
            let center: Vec<SegmentColumn<'_>> = preview
                .iter()
                .filter(|column| column.pinned.is_none())
                .map(|column| SegmentColumn::new(&column.id, self.header_group_of(column)))
                .collect();
            let segments = compute_header_group_segments(
                &center,
                |id| widths.get(id).unwrap_or(DEFAULT_COLUMN_WIDTH),
                &self.config.header_groups,
                geometry.center_content_width,
                &hints,
            );
            let sections = compute_header_section_descriptors(&center, &segments);
            (segments, sections)
        };

        GridView {
            grid: self,
            rendered,
            preview,
            sorted,
            paged,
            visible,
            widths,
            geometry,
            segments,
            sections,
        }
    }

    /// Group a column shows under in the header: none for the column being
    /// dragged, else its effective group.
    pub(super) fn header_group_of<'c>(&'c self, column: &'c Column<T>) -> Option<&'c str> {
        let dragging = self
            .drag
            .as_ref()
            .is_some_and(|drag| drag.column_id == column.id);
        if dragging {
            None
        } else {
            self.layout.effective_group(column)
        }
    }
}

impl<'g, T: Record> GridView<'g, T> {
    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Visible columns in committed display order. Navigation indices refer
    /// to this list.
    pub fn rendered_columns(&self) -> &[Column<T>] {
        &self.rendered
    }

    /// Columns in on-screen order, including any drag preview.
    pub fn columns(&self) -> &[Column<T>] {
        &self.preview
    }

    pub fn left_columns(&self) -> impl Iterator<Item = &Column<T>> {
        self.preview
            .iter()
            .filter(|column| column.pinned == Some(Pin::Left))
    }

    pub fn center_columns(&self) -> impl Iterator<Item = &Column<T>> {
        self.preview.iter().filter(|column| column.pinned.is_none())
    }

    pub fn right_columns(&self) -> impl Iterator<Item = &Column<T>> {
        self.preview
            .iter()
            .filter(|column| column.pinned == Some(Pin::Right))
    }

    pub fn widths(&self) -> &ColumnWidths {
        &self.widths
    }

    /// Resolved width of a column by id.
    pub fn width_of(&self, column_id: &str) -> f64 {
        self.widths.get(column_id).unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn geometry(&self) -> &PaneGeometry {
        &self.geometry
    }

    pub fn header_segments(&self) -> &[HeaderGroupSegment] {
        &self.segments
    }

    pub fn header_sections(&self) -> &[HeaderSection] {
        &self.sections
    }

    /// `▲`, `▼`, or empty for a column's header.
    pub fn sort_indicator(&self, column_id: &str) -> &'static str {
        sort_indicator(self.grid.sort_direction(column_id))
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Rows after filtering and sorting, before pagination.
    pub fn sorted_rows(&self) -> &[GridRow<'g, T>] {
        &self.sorted
    }

    /// Rows on the current page.
    pub fn paged_rows(&self) -> &[GridRow<'g, T>] {
        &self.paged
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.visible
    }

    /// Paged rows inside the virtualization window.
    pub fn visible_rows(&self) -> &[GridRow<'g, T>] {
        &self.paged[self.visible.start..self.visible.end]
    }

    pub fn total_pages(&self) -> usize {
        if self.grid.config.pagination_enabled {
            total_pages(self.sorted.len(), self.grid.page_size)
        } else {
            1
        }
    }

    /// Height of the scrollable body content.
    pub fn total_height(&self) -> f64 {
        self.paged.len() as f64 * self.grid.config.row_height
    }

    /// Source indices of the current page.
    pub fn page_source_indices(&self) -> Vec<usize> {
        self.paged.iter().map(|row| row.source_index).collect()
    }

    /// Every row on the page is selected.
    pub fn all_visible_selected(&self) -> bool {
        self.grid.selection.all_selected(&self.page_source_indices())
    }

    /// Some, but not all, rows on the page are selected.
    pub fn some_visible_selected(&self) -> bool {
        self.grid.selection.some_selected(&self.page_source_indices())
    }

    /// Display text of the cell at a paged row and rendered column index.
    pub fn cell_text(&self, paged_row: usize, column: usize) -> Option<String> {
        let row = self.paged.get(paged_row)?;
        let column = self.rendered.get(column)?;
        Some(display_value(column, row.source))
    }

    // -------------------------------------------------------------------------
    // Animation
    // -------------------------------------------------------------------------

    /// Horizontal position of every animatable cell, measured from the left
    /// edge of the grid viewport.
    ///
    /// Body cells are keyed by visible row index and capped at the animator's
    /// row limit.
    pub fn cell_positions(&self) -> Vec<(CellKey, f64)> {
        let scroll_left = self.grid.scroll.horizontal.value();
        let rows = self
            .visible
            .len()
            .min(self.grid.animator.config().max_animated_rows);
        let geometry = &self.geometry;

        let mut positions = Vec::new();
        let mut center_x = geometry.left_width;
        for column in &self.preview {
            let width = self.widths.width_of(column);
            let x = match column.pinned {
                Some(Pin::Left) => geometry.sticky_left.get(&column.id).copied().unwrap_or(0.0),
                Some(Pin::Right) => {
                    let from_right = geometry.sticky_right.get(&column.id).copied().unwrap_or(0.0);
                    geometry.left_width + geometry.center_pane_width + geometry.right_width
                        - from_right
                        - width
                }
                None => {
                    let x = center_x - scroll_left;
                    center_x += width;
                    x
                }
            };
            positions.push((CellKey::Header(column.id.clone()), x));
            positions.push((CellKey::Filter(column.id.clone()), x));
            for row in 0..rows {
                positions.push((
                    CellKey::Body {
                        row,
                        column_id: column.id.clone(),
                    },
                    x,
                ));
            }
        }
        positions
    }
}
