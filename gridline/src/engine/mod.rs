//! The table engine.
//!
//! Pure, stateless functions that turn raw records and column definitions into
//! the rows and columns a renderer walks. The grid always applies them in the
//! order filter, sort, paginate, then virtualize; [`run_pipeline`] encodes
//! that order for callers that want all stages at once.
//!
//! Every function here is referentially transparent: given the same inputs it
//! returns the same output, so callers are free to recompute on every read.

mod filter;
mod sort;
mod window;

pub use filter::{FilterValue, filter_rows, row_matches_filter};
pub use sort::{SortDirection, SortState, next_sort_direction, sort_indicator, sort_rows};
pub use window::{DEFAULT_ROW_BUFFER, VisibleRange, paginate_rows, total_pages, visible_range};

use std::collections::HashMap;

use serde_json::Value;

use crate::column::{Column, FilterType, Pin, pin_rank};
use crate::row::{GridRow, Record};
use crate::value::display_string;

// =============================================================================
// Column resolution
// =============================================================================

/// Resolve the columns to render, in display order.
///
/// Columns hidden by definition or by the `hidden` map are dropped. The rest
/// are ordered by pin bucket (left, unpinned, right) and then by their
/// position in `order`; ids missing from `order` sort last, keeping their
/// relative definition order.
///
/// An entry in `pinned` overrides the definition's `pinned`, including an
/// explicit `None` that unpins a column declared as pinned. The returned
/// columns carry the resolved pin.
pub fn resolve_rendered_columns<T>(
    columns: &[Column<T>],
    hidden: &HashMap<String, bool>,
    order: &[String],
    pinned: &HashMap<String, Option<Pin>>,
) -> Vec<Column<T>> {
    let positions: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_str(), index))
        .collect();

    let mut visible: Vec<Column<T>> = columns
        .iter()
        .filter(|column| !column.hidden && !hidden.get(&column.id).copied().unwrap_or(false))
        .map(|column| {
            let mut resolved = column.clone();
            if let Some(pin) = pinned.get(&column.id) {
                resolved.pinned = *pin;
            }
            resolved
        })
        .collect();

    visible.sort_by_key(|column| {
        (
            pin_rank(column.pinned),
            positions.get(column.id.as_str()).copied().unwrap_or(usize::MAX),
        )
    });
    visible
}

// =============================================================================
// Cell values
// =============================================================================

/// The raw value of a cell.
///
/// The value getter wins, then the `field` key; a column with neither has no
/// value. Filtering, sorting, display, and clipboard copy all read through
/// this function.
pub fn raw_value<T: Record>(column: &Column<T>, row: &T) -> Option<Value> {
    if let Some(getter) = &column.value_getter {
        return Some(getter(row));
    }
    column.field.as_deref().and_then(|field| row.field(field))
}

/// The display text of a cell: cell renderer, then value formatter, then the
/// plain string form (empty for missing or `null` values).
pub fn display_value<T: Record>(column: &Column<T>, row: &T) -> String {
    let value = raw_value(column, row);
    if let Some(render) = &column.cell_renderer {
        return render(value.as_ref(), row);
    }
    if let Some(format) = &column.value_formatter {
        return format(value.as_ref(), row);
    }
    display_string(value.as_ref())
}

/// The filter editor kind for a column, text unless declared.
pub fn resolve_filter_type<T>(column: &Column<T>) -> FilterType {
    column.filter_type.unwrap_or_default()
}

// =============================================================================
// Pipeline
// =============================================================================

/// Inputs for one pass through the engine.
#[derive(Debug, Clone, Copy)]
pub struct PipelineInput<'s> {
    pub filters: &'s HashMap<String, FilterValue>,
    pub quick_filter: &'s str,
    pub sort: &'s [SortState],
    /// `None` disables pagination.
    pub page: Option<(usize, usize)>,
}

/// Filter, sort, then paginate `rows`. Returns the sorted rows and the page.
pub fn run_pipeline<'a, T: Record>(
    rows: &[GridRow<'a, T>],
    columns: &[Column<T>],
    input: PipelineInput<'_>,
) -> (Vec<GridRow<'a, T>>, Vec<GridRow<'a, T>>) {
    let filtered = filter_rows(rows, columns, input.filters, input.quick_filter);
    let sorted = sort_rows(&filtered, columns, input.sort);
    let paged = match input.page {
        Some((page_index, page_size)) => paginate_rows(&sorted, page_index, page_size).to_vec(),
        None => sorted.clone(),
    };
    (sorted, paged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_value_prefers_getter() {
        let column = Column::<Value>::new("full", "Full")
            .field("first")
            .value_getter(|row| json!(format!("{} {}", row["first"].as_str().unwrap_or(""), "X")));
        let row = json!({"first": "Ada"});
        assert_eq!(raw_value(&column, &row), Some(json!("Ada X")));
    }

    #[test]
    fn test_raw_value_without_accessor_is_absent() {
        let column: Column<Value> = Column::new("none", "None");
        assert_eq!(raw_value(&column, &json!({"none": 1})), None);
    }

    #[test]
    fn test_display_value_precedence() {
        let row = json!({"n": 3});
        let plain: Column<Value> = Column::field_column("n", "N");
        assert_eq!(display_value(&plain, &row), "3");

        let formatted = Column::<Value>::field_column("n", "N")
            .value_formatter(|v, _| format!("#{}", display_string(v)));
        assert_eq!(display_value(&formatted, &row), "#3");

        let rendered = Column::<Value>::field_column("n", "N")
            .value_formatter(|_, _| "formatted".into())
            .cell_renderer(|_, _| "rendered".into());
        assert_eq!(display_value(&rendered, &row), "rendered");

        let missing: Column<Value> = Column::field_column("gone", "Gone");
        assert_eq!(display_value(&missing, &row), "");
    }
}
