//! Multi-key sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::raw_value;
use crate::column::Column;
use crate::row::{GridRow, Record};
use crate::value::default_compare;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One key of a multi-column sort. Position in the sort list is priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }

    pub fn asc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Asc)
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Desc)
    }
}

/// Next direction in the header click cycle: none, ascending, descending.
pub fn next_sort_direction(current: Option<SortDirection>) -> Option<SortDirection> {
    match current {
        None => Some(SortDirection::Asc),
        Some(SortDirection::Asc) => Some(SortDirection::Desc),
        Some(SortDirection::Desc) => None,
    }
}

/// Header glyph for a sort direction.
pub fn sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => "▲",
        Some(SortDirection::Desc) => "▼",
        None => "",
    }
}

/// Stable multi-key sort.
///
/// Keys are tried in order; the first non-equal comparison decides, reversed
/// for descending keys. Keys naming unknown columns are skipped. With no keys
/// the input order is returned unchanged.
pub fn sort_rows<'a, T: Record>(
    rows: &[GridRow<'a, T>],
    columns: &[Column<T>],
    sort: &[SortState],
) -> Vec<GridRow<'a, T>> {
    let mut sorted = rows.to_vec();
    if sort.is_empty() {
        return sorted;
    }

    let keys: Vec<(&Column<T>, SortDirection)> = sort
        .iter()
        .filter_map(|state| {
            columns
                .iter()
                .find(|column| column.id == state.column_id)
                .map(|column| (column, state.direction))
        })
        .collect();

    sorted.sort_by(|left, right| {
        for (column, direction) in &keys {
            let ordering = compare_cells(column, left.source, right.source);
            if ordering != Ordering::Equal {
                return match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
            }
        }
        Ordering::Equal
    });
    sorted
}

fn compare_cells<T: Record>(column: &Column<T>, left: &T, right: &T) -> Ordering {
    let left_value = raw_value(column, left);
    let right_value = raw_value(column, right);
    match &column.comparator {
        Some(compare) => compare(left_value.as_ref(), right_value.as_ref(), left, right),
        None => default_compare(left_value.as_ref(), right_value.as_ref()),
    }
}
