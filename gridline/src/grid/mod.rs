//! The interactive grid.
//!
//! [`Grid`] owns every piece of mutable table state: filters, sort, page,
//! selection, column layout, gestures, scroll, and the active/editing cell.
//! User input arrives through the handler methods spread over this module's
//! submodules; each one mutates state, queues [`GridEvent`]s for the host, and
//! then re-settles the derived clamps (page index, active cell, scroll
//! extents). Everything the renderer needs is recomputed from current state by
//! [`Grid::view`].

mod columns;
mod data;
mod navigation;
mod reorder;
mod selection;
mod view;
mod viewport;

pub use columns::HeaderMenu;
pub use data::FilterBound;
pub use navigation::{CellPosition, EditingCell, FocusRequest};
pub use reorder::GroupEdge;
pub use view::GridView;

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use log::debug;

use crate::animation::ReorderAnimator;
use crate::column::Column;
use crate::config::GridConfig;
use crate::engine::{FilterValue, SortState};
use crate::error::{ConfigError, GridError};
use crate::event::GridEvent;
use crate::layout::ColumnLayout;
use crate::measure::{MonospaceMeasurer, TextMeasurer};
use crate::row::Record;
use crate::scroll::ScrollSync;
use crate::selection::Selection;

use columns::ResizeGesture;
use reorder::ColumnDrag;

/// A data grid over records of type `T`.
///
/// # Example
///
/// ```ignore
/// let mut grid = Grid::new(rows, columns, GridConfig::default())?;
/// grid.toggle_sort("name", false, Instant::now());
/// for event in grid.drain_events() {
///     // forward to the application
/// }
/// let view = grid.view();
/// for row in view.visible_rows() {
///     // render
/// }
/// ```
pub struct Grid<T: Record> {
    data: Vec<T>,
    /// Column definitions, with the selection column prepended when enabled.
    columns: Vec<Column<T>>,
    config: GridConfig,
    layout: ColumnLayout,
    selection: Selection,

    quick_filter: String,
    filters: HashMap<String, FilterValue>,
    sort: Vec<SortState>,
    page_index: usize,
    page_size: usize,

    active_cell: Option<CellPosition>,
    editing: Option<EditingCell>,
    pending_focus: Option<FocusRequest>,
    hovered_row: Option<usize>,
    header_menu: Option<HeaderMenu>,

    resize: Option<ResizeGesture>,
    resize_ended_at: Option<Instant>,
    drag: Option<ColumnDrag>,
    animator: ReorderAnimator,

    scroll: ScrollSync,
    viewport_width: f64,
    viewport_height: f64,

    measurer: Box<dyn TextMeasurer>,
    events: Vec<GridEvent<T>>,
}

impl<T: Record> Grid<T> {
    /// Create a grid. Fails when the configuration is invalid or two columns
    /// share an id.
    pub fn new(data: Vec<T>, columns: Vec<Column<T>>, config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let columns = effective_columns(&config, columns)?;
        let layout = ColumnLayout::seeded(&columns);

        let mut grid = Self {
            data,
            columns,
            layout,
            selection: Selection::new(),
            quick_filter: String::new(),
            filters: HashMap::new(),
            sort: Vec::new(),
            page_index: 0,
            page_size: config.default_page_size,
            active_cell: None,
            editing: None,
            pending_focus: None,
            hovered_row: None,
            header_menu: None,
            resize: None,
            resize_ended_at: None,
            drag: None,
            animator: ReorderAnimator::new(config.animation),
            scroll: ScrollSync::new(),
            viewport_width: 0.0,
            viewport_height: config.initial_viewport_height,
            measurer: Box::new(MonospaceMeasurer::default()),
            events: Vec::new(),
            config,
        };
        grid.settle();
        debug!(
            "Created grid ({} rows, {} columns)",
            grid.data.len(),
            grid.columns.len()
        );
        Ok(grid)
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Replace the records. Selection, sort, and filters are kept.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.settle();
    }

    /// Column definitions, including the built-in selection column.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Replace the column definitions.
    ///
    /// Layout state is re-seeded when the id set changed; see
    /// [`ColumnLayout::sync`].
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) -> Result<(), GridError> {
        self.columns = effective_columns(&self.config, columns)?;
        self.layout.sync(&self.columns);
        self.settle();
        Ok(())
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Replace the text measurer used by auto-size.
    pub fn set_measurer(&mut self, measurer: impl TextMeasurer + 'static) {
        self.measurer = Box::new(measurer);
    }

    // -------------------------------------------------------------------------
    // Outputs
    // -------------------------------------------------------------------------

    /// Take every event queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<GridEvent<T>> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GridEvent<T>) {
        self.events.push(event);
    }

    pub(crate) fn find_column(&self, column_id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    // -------------------------------------------------------------------------
    // Derived clamps
    // -------------------------------------------------------------------------

    /// Re-apply clamps that depend on derived state.
    ///
    /// Keeps the page index inside the page count, the active cell inside the
    /// paged rows and rendered columns, and the scroll extents in line with
    /// the content size. Runs after every mutation.
    fn settle(&mut self) {
        let (max_page, paged_count, column_count, content_height, max_scroll_left) = {
            let view = self.view();
            (
                view.total_pages() - 1,
                view.paged_rows().len(),
                view.rendered_columns().len(),
                view.total_height(),
                view.geometry().max_scroll_left(),
            )
        };

        if self.page_index > max_page {
            debug!("Clamping page {} to {}", self.page_index, max_page);
            self.page_index = max_page;
        }

        if let Some(active) = self.active_cell
            && paged_count > 0
            && column_count > 0
        {
            let clamped = CellPosition {
                row: active.row.min(paged_count - 1),
                column: active.column.min(column_count - 1),
            };
            if clamped != active {
                self.active_cell = Some(clamped);
            }
        }

        self.scroll
            .vertical
            .set_max((content_height - self.viewport_height).max(0.0));
        self.scroll.horizontal.set_max(max_scroll_left);
    }
}

/// Prepend the selection column when selection is enabled and reject
/// duplicate ids.
fn effective_columns<T>(config: &GridConfig, columns: Vec<Column<T>>) -> Result<Vec<Column<T>>, ConfigError> {
    let mut effective = Vec::with_capacity(columns.len() + 1);
    if config.selection_mode.is_enabled() {
        effective.push(Column::selection());
    }
    effective.extend(columns);

    let mut seen = HashSet::new();
    for column in &effective {
        if !seen.insert(column.id.as_str()) {
            return Err(ConfigError::DuplicateColumnId(column.id.clone()));
        }
    }
    Ok(effective)
}
