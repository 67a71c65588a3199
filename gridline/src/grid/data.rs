//! Sorting, filtering, and pagination.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;

use crate::engine::{FilterValue, SortDirection, SortState, next_sort_direction};
use crate::event::{EventResult, GridEvent, PageState};
use crate::row::Record;

use super::Grid;

/// Header clicks this soon after a resize ends are not sort requests.
const RESIZE_CLICK_GRACE: Duration = Duration::from_millis(160);

/// Which end of a range filter to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBound {
    /// `min` for numbers, `start` for dates.
    Lower,
    /// `max` for numbers, `end` for dates.
    Upper,
}

impl<T: Record> Grid<T> {
    // -------------------------------------------------------------------------
    // Sort
    // -------------------------------------------------------------------------

    pub fn sort_state(&self) -> &[SortState] {
        &self.sort
    }

    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sort
            .iter()
            .find(|state| state.column_id == column_id)
            .map(|state| state.direction)
    }

    /// Handle a header click.
    ///
    /// Without `add_to_sort` the column becomes the only sort key, cycling
    /// none, ascending, descending. With it, the column's entry is cycled and
    /// moved to the end of the key list, keeping the other keys. Ignored for
    /// unknown or unsortable columns and right after a resize gesture.
    pub fn toggle_sort(&mut self, column_id: &str, add_to_sort: bool, now: Instant) -> EventResult {
        if let Some(ended) = self.resize_ended_at
            && now.saturating_duration_since(ended) < RESIZE_CLICK_GRACE
        {
            debug!("Ignoring sort click on {column_id} after resize");
            return EventResult::Ignored;
        }
        let rendered = self.layout.rendered_columns(&self.columns);
        let Some(column) = rendered.iter().find(|column| column.id == column_id) else {
            return EventResult::Ignored;
        };
        if !column.sortable {
            return EventResult::Ignored;
        }

        let direction = next_sort_direction(self.sort_direction(column_id));
        let without: Vec<SortState> = self
            .sort
            .iter()
            .filter(|state| state.column_id != column_id)
            .cloned()
            .collect();
        let next = match direction {
            None if add_to_sort => without,
            None => Vec::new(),
            Some(direction) => {
                let entry = SortState::new(column_id, direction);
                if add_to_sort {
                    let mut next = without;
                    next.push(entry);
                    next
                } else {
                    vec![entry]
                }
            }
        };

        debug!("Sort changed: {next:?}");
        self.sort = next.clone();
        self.emit(GridEvent::SortChanged(next));
        self.settle();
        EventResult::Consumed
    }

    /// Replace the sort keys. Later entries for an already listed column
    /// are dropped.
    pub fn set_sort(&mut self, sort: Vec<SortState>) {
        let mut seen = std::collections::HashSet::new();
        self.sort = sort
            .into_iter()
            .filter(|state| seen.insert(state.column_id.clone()))
            .collect();
        self.settle();
    }

    // -------------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------------

    pub fn quick_filter(&self) -> &str {
        &self.quick_filter
    }

    pub fn filters(&self) -> &HashMap<String, FilterValue> {
        &self.filters
    }

    pub fn filter(&self, column_id: &str) -> Option<&FilterValue> {
        self.filters.get(column_id)
    }

    pub fn set_quick_filter(&mut self, text: impl Into<String>) {
        self.quick_filter = text.into();
        self.filters_changed();
    }

    pub fn set_text_filter(&mut self, column_id: &str, value: impl Into<String>) {
        self.filters
            .insert(column_id.to_string(), FilterValue::text(value));
        self.filters_changed();
    }

    /// Set one bound of a number filter, keeping the other. Non-finite
    /// values clear the bound.
    pub fn set_number_filter(&mut self, column_id: &str, bound: FilterBound, value: Option<f64>) {
        let value = value.filter(|value| value.is_finite());
        let (mut min, mut max) = match self.filters.get(column_id) {
            Some(FilterValue::Number { min, max }) => (*min, *max),
            _ => (None, None),
        };
        match bound {
            FilterBound::Lower => min = value,
            FilterBound::Upper => max = value,
        }
        self.filters
            .insert(column_id.to_string(), FilterValue::number(min, max));
        self.filters_changed();
    }

    /// Set one bound of a date filter, keeping the other. Empty input clears
    /// the bound.
    pub fn set_date_filter(&mut self, column_id: &str, bound: FilterBound, value: Option<&str>) {
        let value = value
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let (mut start, mut end) = match self.filters.get(column_id) {
            Some(FilterValue::Date { start, end }) => (start.clone(), end.clone()),
            _ => (None, None),
        };
        match bound {
            FilterBound::Lower => start = value,
            FilterBound::Upper => end = value,
        }
        self.filters
            .insert(column_id.to_string(), FilterValue::date(start, end));
        self.filters_changed();
    }

    pub fn clear_filter(&mut self, column_id: &str) {
        if self.filters.remove(column_id).is_some() {
            self.filters_changed();
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.quick_filter.clear();
        self.filters_changed();
    }

    fn filters_changed(&mut self) {
        debug!(
            "Filters changed ({} column filters, quick={:?})",
            self.filters.len(),
            self.quick_filter
        );
        self.page_index = 0;
        self.settle();
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    pub fn page_state(&self) -> PageState {
        PageState {
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.view().total_pages()
    }

    /// Change the page size and go back to the first page. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> EventResult {
        if page_size == 0 {
            return EventResult::Ignored;
        }
        debug!("Page size changed to {page_size}");
        self.page_size = page_size;
        self.page_index = 0;
        self.emit(GridEvent::PageChanged(self.page_state()));
        self.settle();
        EventResult::Consumed
    }

    /// Jump to a page, clamped to the page count.
    pub fn go_to_page(&mut self, page_index: usize) {
        let last = self.total_pages() - 1;
        self.page_index = page_index.min(last);
        debug!("Page changed to {}", self.page_index);
        self.emit(GridEvent::PageChanged(self.page_state()));
        self.settle();
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page_index.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page_index.saturating_sub(1));
    }
}
