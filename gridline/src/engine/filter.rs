//! Row filtering: per-column filters and the quick filter.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{display_value, raw_value};
use crate::column::Column;
use crate::row::{GridRow, Record};
use crate::value::{date_millis, display_string, parse_date_millis, to_number};

/// A per-column filter.
///
/// Bounds are inclusive and optional; an absent bound is open on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterValue {
    Text {
        value: String,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Date {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<String>,
    },
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn number(min: Option<f64>, max: Option<f64>) -> Self {
        Self::Number { min, max }
    }

    pub fn date(start: Option<String>, end: Option<String>) -> Self {
        Self::Date { start, end }
    }
}

/// Keep the rows that pass the quick filter and every column filter.
///
/// The quick filter is trimmed and matched case-insensitively against the
/// display value of each column in `columns`; an empty quick filter matches
/// everything. Row order is preserved.
pub fn filter_rows<'a, T: Record>(
    rows: &[GridRow<'a, T>],
    columns: &[Column<T>],
    filters: &HashMap<String, FilterValue>,
    quick_filter: &str,
) -> Vec<GridRow<'a, T>> {
    let needle = quick_filter.trim().to_lowercase();
    rows.iter()
        .filter(|row| {
            let quick_match = needle.is_empty()
                || columns.iter().any(|column| {
                    display_value(column, row.source)
                        .to_lowercase()
                        .contains(&needle)
                });
            quick_match
                && columns
                    .iter()
                    .all(|column| row_matches_filter(row.source, column, filters.get(&column.id)))
        })
        .copied()
        .collect()
}

/// Whether one record passes one column's filter. No filter always passes.
///
/// Values that do not coerce to a finite number or a valid date fail number
/// and date filters. A date bound that does not parse rejects every row.
pub fn row_matches_filter<T: Record>(
    row: &T,
    column: &Column<T>,
    filter: Option<&FilterValue>,
) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    let value = raw_value(column, row);

    match filter {
        FilterValue::Text { value: needle } => display_string(value.as_ref())
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        FilterValue::Number { min, max } => {
            let n = to_number(value.as_ref());
            if !n.is_finite() {
                return false;
            }
            min.is_none_or(|min| n >= min) && max.is_none_or(|max| n <= max)
        }
        FilterValue::Date { start, end } => {
            let Some(millis) = date_millis(value.as_ref()) else {
                return false;
            };
            date_bound_passes(start.as_deref(), |bound| millis >= bound)
                && date_bound_passes(end.as_deref(), |bound| millis <= bound)
        }
    }
}

fn date_bound_passes(bound: Option<&str>, check: impl Fn(i64) -> bool) -> bool {
    match bound {
        None | Some("") => true,
        Some(bound) => parse_date_millis(bound).is_some_and(check),
    }
}
