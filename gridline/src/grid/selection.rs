//! Row selection handlers.

use log::debug;

use crate::event::{EventResult, GridEvent};
use crate::row::Record;

use super::Grid;

impl<T: Record> Grid<T> {
    /// Selected source indices, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection.selected()
    }

    pub fn is_row_selected(&self, source_index: usize) -> bool {
        self.selection.is_selected(source_index)
    }

    /// Selected records in source order.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.data
            .iter()
            .enumerate()
            .filter(|(index, _)| self.selection.is_selected(*index))
            .map(|(_, row)| row)
            .collect()
    }

    /// Toggle a row from its checkbox or the keyboard.
    ///
    /// `shift` extends the selection from the last toggled row over the
    /// current sort order, including rows on other pages.
    pub fn toggle_row_selection(&mut self, source_index: usize, shift: bool) -> EventResult {
        if source_index >= self.data.len() {
            return EventResult::Ignored;
        }
        let ordered: Vec<usize> = self
            .view()
            .sorted_rows()
            .iter()
            .map(|row| row.source_index)
            .collect();
        if !self
            .selection
            .click(self.config.selection_mode, source_index, shift, &ordered)
        {
            return EventResult::Ignored;
        }
        debug!(
            "Row {source_index} toggled (shift={shift}), {} selected",
            self.selection.len()
        );
        self.emit_selection_change();
        EventResult::Consumed
    }

    /// Header checkbox: select or deselect every row on the current page.
    pub fn toggle_select_visible_rows(&mut self, checked: bool) -> EventResult {
        if !self.config.selection_mode.is_enabled() {
            return EventResult::Ignored;
        }
        let page = self.view().page_source_indices();
        self.selection.set_page(&page, checked);
        debug!(
            "Page rows {} ({} rows)",
            if checked { "selected" } else { "deselected" },
            page.len()
        );
        self.emit_selection_change();
        EventResult::Consumed
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.emit_selection_change();
    }

    fn emit_selection_change(&mut self) {
        let rows = self.selected_rows().into_iter().cloned().collect();
        self.emit(GridEvent::SelectionChanged { rows });
    }
}
