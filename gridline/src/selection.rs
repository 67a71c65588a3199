//! Row selection state.
//!
//! Selection is keyed by source index, so a selected row stays selected when
//! filters, sorting, or paging hide it. Only explicit user actions change it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Selection mode for the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection column, no selection.
    None,
    /// Selecting a row replaces the selection
    Single,
    /// Rows toggle independently; shift extends a range
    #[default]
    Multiple,
}

impl SelectionMode {
    /// Whether the grid shows the built-in selection column.
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Selected source indices plus the anchor for range selection.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Currently selected source indices
    selected: HashSet<usize>,
    /// Last row selected or toggled (Shift+click starting point)
    anchor: Option<usize>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// All selected source indices, ascending.
    pub fn selected(&self) -> Vec<usize> {
        let mut indices: Vec<_> = self.selected.iter().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn is_selected(&self, source_index: usize) -> bool {
        self.selected.contains(&source_index)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Clear all selection.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    /// Select exactly one row, replacing the rest.
    pub fn select_only(&mut self, source_index: usize) {
        self.selected.clear();
        self.selected.insert(source_index);
        self.anchor = Some(source_index);
    }

    /// Toggle one row. Returns whether it is now selected.
    pub fn toggle(&mut self, source_index: usize) -> bool {
        self.anchor = Some(source_index);
        if self.selected.remove(&source_index) {
            false
        } else {
            self.selected.insert(source_index);
            true
        }
    }

    /// Union the rows between the anchor and `target` into the selection.
    ///
    /// `ordered` is the current sorted row order as source indices. Returns
    /// false, changing nothing, when there is no anchor or either end is not
    /// in `ordered`.
    pub fn extend_range(&mut self, target: usize, ordered: &[usize]) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let from = ordered.iter().position(|&index| index == anchor);
        let to = ordered.iter().position(|&index| index == target);
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };
        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        self.selected.extend(ordered[start..=end].iter().copied());
        self.anchor = Some(target);
        true
    }

    /// Apply a row click under `mode`.
    ///
    /// Single mode replaces the selection. Multiple mode extends a range when
    /// `shift` is held and an anchor resolves, and toggles the row otherwise.
    /// Returns whether the selection was touched.
    pub fn click(
        &mut self,
        mode: SelectionMode,
        source_index: usize,
        shift: bool,
        ordered: &[usize],
    ) -> bool {
        match mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                self.select_only(source_index);
                true
            }
            SelectionMode::Multiple => {
                if !(shift && self.extend_range(source_index, ordered)) {
                    self.toggle(source_index);
                }
                true
            }
        }
    }

    /// Add (`checked`) or remove every index in `page`. Rows outside the
    /// page are untouched.
    pub fn set_page(&mut self, page: &[usize], checked: bool) {
        if checked {
            self.selected.extend(page.iter().copied());
        } else {
            for index in page {
                self.selected.remove(index);
            }
        }
    }

    /// Every row in `page` is selected (and the page is not empty).
    pub fn all_selected(&self, page: &[usize]) -> bool {
        !page.is_empty() && page.iter().all(|index| self.selected.contains(index))
    }

    /// Some but not all rows in `page` are selected.
    pub fn some_selected(&self, page: &[usize]) -> bool {
        page.iter().any(|index| self.selected.contains(index)) && !self.all_selected(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode_replaces() {
        let mut selection = Selection::new();
        selection.click(SelectionMode::Single, 3, false, &[]);
        selection.click(SelectionMode::Single, 5, true, &[]);
        assert_eq!(selection.selected(), vec![5]);
    }

    #[test]
    fn test_range_uses_given_order() {
        let ordered = [4, 0, 2, 1, 3];
        let mut selection = Selection::new();
        selection.click(SelectionMode::Multiple, 0, false, &ordered);
        selection.click(SelectionMode::Multiple, 1, true, &ordered);
        assert_eq!(selection.selected(), vec![0, 1, 2]);
        assert_eq!(selection.anchor(), Some(1));
    }

    #[test]
    fn test_shift_without_anchor_toggles() {
        let mut selection = Selection::new();
        selection.click(SelectionMode::Multiple, 2, true, &[0, 1, 2]);
        assert_eq!(selection.selected(), vec![2]);
    }

    #[test]
    fn test_page_toggle_keeps_other_rows() {
        let mut selection = Selection::new();
        selection.toggle(9);
        selection.set_page(&[0, 1], true);
        assert!(selection.all_selected(&[0, 1]));
        selection.set_page(&[0, 1], false);
        assert_eq!(selection.selected(), vec![9]);
        assert!(!selection.some_selected(&[0, 1]));
    }
}
