//! Keyboard navigation, focus, and inline editing.

use log::debug;

use crate::engine::display_value;
use crate::event::{CellEditEvent, EventResult, GridEvent, Key, Modifiers};
use crate::row::Record;

use super::Grid;

/// Extra space kept around a row scrolled into view, in row heights.
const ROW_SCROLL_MARGIN: f64 = 0.5;

/// Extra space kept around a column scrolled into view (px).
const COLUMN_SCROLL_MARGIN: f64 = 24.0;

/// A cell by paged row index and rendered column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

impl CellPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// The cell in edit mode, by source row index and column id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingCell {
    pub row_index: usize,
    pub column_id: String,
}

/// A cell the host should move keyboard focus to, by visible row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub visible_row: usize,
    pub column: usize,
}

impl<T: Record> Grid<T> {
    // -------------------------------------------------------------------------
    // Active cell
    // -------------------------------------------------------------------------

    pub fn active_cell(&self) -> Option<CellPosition> {
        self.active_cell
    }

    /// A cell received focus or a click.
    pub fn set_active_cell(&mut self, row: usize, column: usize) {
        self.active_cell = Some(CellPosition::new(row, column));
        self.settle();
    }

    /// Whether a cell takes part in tab order: the active cell, or the first
    /// cell while nothing is active.
    pub fn is_tab_stop(&self, row: usize, column: usize) -> bool {
        match self.active_cell {
            Some(active) => active == CellPosition::new(row, column),
            None => row == 0 && column == 0,
        }
    }

    /// Take the pending focus request, if any.
    pub fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.pending_focus.take()
    }

    // -------------------------------------------------------------------------
    // Keys
    // -------------------------------------------------------------------------

    /// A key pressed while a body cell has focus.
    ///
    /// Space toggles the row's selection, Ctrl/Cmd+C copies the cell text,
    /// Enter starts editing, and arrows, Home, End, and Tab move the active
    /// cell.
    pub fn on_cell_key(&mut self, row: usize, column: usize, key: Key, modifiers: Modifiers) -> EventResult {
        match key {
            Key::Space => {
                let Some(source_index) = self.paged_source_index(row) else {
                    return EventResult::Ignored;
                };
                self.toggle_row_selection(source_index, modifiers.shift);
                EventResult::Consumed
            }
            Key::Char('c' | 'C') if modifiers.command() => {
                let text = self.view().cell_text(row, column);
                if let Some(text) = text {
                    self.emit(GridEvent::ClipboardCopy(text));
                }
                EventResult::Consumed
            }
            Key::Enter => {
                let column_id = self
                    .view()
                    .rendered_columns()
                    .get(column)
                    .map(|column| column.id.clone());
                match (self.paged_source_index(row), column_id) {
                    (Some(source_index), Some(column_id)) => self.start_edit(source_index, &column_id),
                    _ => EventResult::Ignored,
                }
            }
            Key::Tab | Key::Up | Key::Down | Key::Left | Key::Right | Key::Home | Key::End => {
                self.navigate(row, column, key, modifiers.shift)
            }
            _ => EventResult::Ignored,
        }
    }

    /// A key pressed outside any cell.
    ///
    /// Escape closes the header menu. Navigation keys return focus to the
    /// active cell.
    pub fn on_document_key(&mut self, key: Key) -> EventResult {
        if key == Key::Escape && self.header_menu.is_some() {
            self.close_header_menu();
            return EventResult::Consumed;
        }
        let navigation = matches!(
            key,
            Key::Up | Key::Down | Key::Left | Key::Right | Key::Home | Key::End | Key::Tab
        );
        match self.active_cell {
            Some(active) if navigation => {
                self.focus_cell(active.row, active.column);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn navigate(&mut self, row: usize, column: usize, key: Key, shift: bool) -> EventResult {
        let (row_count, column_count) = {
            let view = self.view();
            (view.paged_rows().len(), view.rendered_columns().len())
        };
        if row_count == 0 || column_count == 0 {
            return EventResult::Ignored;
        }
        let last_row = row_count - 1;
        let last_column = column_count - 1;
        let row = row.min(last_row);
        let column = column.min(last_column);

        let (next_row, next_column) = match key {
            Key::Tab if shift => {
                if column == 0 {
                    (row.saturating_sub(1), last_column)
                } else {
                    (row, column - 1)
                }
            }
            Key::Tab => {
                if column == last_column {
                    ((row + 1).min(last_row), 0)
                } else {
                    (row, column + 1)
                }
            }
            Key::Up => (row.saturating_sub(1), column),
            Key::Down => ((row + 1).min(last_row), column),
            Key::Left => (row, column.saturating_sub(1)),
            Key::Right => (row, (column + 1).min(last_column)),
            Key::Home => (row, 0),
            Key::End => (row, last_column),
            _ => return EventResult::Ignored,
        };

        self.focus_cell(next_row, next_column);
        EventResult::Consumed
    }

    /// Scroll a cell into view, make it active, and request focus for it
    /// when its row is materialized.
    pub fn focus_cell(&mut self, row: usize, column: usize) {
        self.scroll_row_into_view(row);
        self.scroll_column_into_view(column);
        self.active_cell = Some(CellPosition::new(row, column));
        self.settle();

        let range = self.view().visible_range();
        self.pending_focus = range.contains(row).then(|| FocusRequest {
            visible_row: row - range.start,
            column,
        });
    }

    fn scroll_row_into_view(&mut self, row: usize) {
        let row_height = self.config.row_height;
        let current = self.scroll.vertical.value();
        let row_top = row as f64 * row_height;
        let row_bottom = row_top + row_height;

        let next = if row_top < current {
            (row_top - row_height * ROW_SCROLL_MARGIN).max(0.0)
        } else if row_bottom > current + self.viewport_height {
            (row_bottom - self.viewport_height + row_height * ROW_SCROLL_MARGIN).max(0.0)
        } else {
            current
        };
        if (next - current).abs() < 1.0 {
            return;
        }
        self.scroll.vertical.set(next);
    }

    /// Only center columns scroll; pinned columns are always in view.
    fn scroll_column_into_view(&mut self, column: usize) {
        let next = {
            let view = self.view();
            let rendered = view.rendered_columns();
            let left_count = view.left_columns().count();
            let center_count = view.center_columns().count();
            if column < left_count || column >= left_count + center_count {
                return;
            }
            let Some(target) = rendered.get(column) else {
                return;
            };
            let column_left: f64 = rendered[left_count..column]
                .iter()
                .map(|column| view.widths().width_of(column))
                .sum();
            let column_right = column_left + view.widths().width_of(target);
            let pane_width = view.geometry().center_pane_width;
            let max_scroll = (view.geometry().center_content_width - pane_width).max(0.0);

            let current = self.scroll.horizontal.value();
            let mut next = current;
            if column_left < next {
                next = (column_left - COLUMN_SCROLL_MARGIN).max(0.0);
            } else if column_right > next + pane_width {
                next = (column_right - pane_width + COLUMN_SCROLL_MARGIN).min(max_scroll);
            }
            let next = next.max(0.0).min(max_scroll).round();
            if (next - current).abs() < 1.0 {
                return;
            }
            next
        };
        self.scroll.horizontal.set(next);
    }

    fn paged_source_index(&self, row: usize) -> Option<usize> {
        self.view()
            .paged_rows()
            .get(row)
            .map(|row| row.source_index)
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    pub fn editing_cell(&self) -> Option<&EditingCell> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, row_index: usize, column_id: &str) -> bool {
        self.editing
            .as_ref()
            .is_some_and(|editing| editing.row_index == row_index && editing.column_id == column_id)
    }

    /// Enter edit mode (double-click or Enter). Only editable columns can be
    /// edited.
    pub fn start_edit(&mut self, row_index: usize, column_id: &str) -> EventResult {
        let editable = self
            .find_column(column_id)
            .is_some_and(|column| column.editable);
        if !editable || row_index >= self.data.len() {
            return EventResult::Ignored;
        }
        debug!("Editing row {row_index}, column {column_id}");
        self.editing = Some(EditingCell {
            row_index,
            column_id: column_id.to_string(),
        });
        EventResult::Consumed
    }

    /// Text the editor starts with.
    pub fn editor_text(&self) -> Option<String> {
        let editing = self.editing.as_ref()?;
        let column = self.find_column(&editing.column_id)?;
        let row = self.data.get(editing.row_index)?;
        Some(display_value(column, row))
    }

    /// Commit the editor text (Enter or blur). The grid does not write the
    /// value back; the host applies it from the emitted event.
    pub fn commit_edit(&mut self, next_value: impl Into<String>) -> EventResult {
        let Some(editing) = self.editing.take() else {
            return EventResult::Ignored;
        };
        let Some(row) = self.data.get(editing.row_index).cloned() else {
            return EventResult::Ignored;
        };
        let next_value = next_value.into();
        debug!(
            "Edit committed on row {}, column {}",
            editing.row_index, editing.column_id
        );
        self.emit(GridEvent::CellEditCommitted(CellEditEvent {
            row,
            row_index: editing.row_index,
            column_id: editing.column_id,
            next_value,
        }));
        EventResult::Consumed
    }

    /// Leave edit mode without emitting (Escape).
    pub fn cancel_edit(&mut self) -> EventResult {
        match self.editing.take() {
            Some(_) => EventResult::Consumed,
            None => EventResult::Ignored,
        }
    }
}
