//! Column definitions.
//!
//! A [`Column`] is an immutable value object: when definitions change the
//! host builds new ones rather than mutating existing columns. Its `id` is
//! the stable key for every per-column map the grid keeps.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Width used when neither the layout nor the definition specifies one.
pub const DEFAULT_COLUMN_WIDTH: f64 = 160.0;
/// Minimum width used when a definition does not set one.
pub const DEFAULT_MIN_WIDTH: f64 = 80.0;
/// Maximum width used when a definition does not set one.
pub const DEFAULT_MAX_WIDTH: f64 = 600.0;

/// Reserved id of the built-in row selection column.
pub const SELECT_COLUMN_ID: &str = "__gridline_select";
/// Fixed width of the built-in row selection column.
pub const SELECT_COLUMN_WIDTH: f64 = 36.0;

/// Computes a cell's raw value from its record.
pub type ValueGetter<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;
/// Turns a raw value into display text.
pub type ValueFormatter<T> = Arc<dyn Fn(Option<&Value>, &T) -> String + Send + Sync>;
/// Orders two raw values (with their records) for sorting.
pub type Comparator<T> =
    Arc<dyn Fn(Option<&Value>, Option<&Value>, &T, &T) -> Ordering + Send + Sync>;
/// Produces header text for a column.
pub type HeaderRenderer<T> = Arc<dyn Fn(&Column<T>) -> String + Send + Sync>;

// =============================================================================
// Enums
// =============================================================================

/// Which fixed pane a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pin {
    Left,
    Right,
}

/// Rank of a pin assignment in display order: left, unpinned, right.
pub fn pin_rank(pin: Option<Pin>) -> u8 {
    match pin {
        Some(Pin::Left) => 0,
        None => 1,
        Some(Pin::Right) => 2,
    }
}

/// Filter editor kind for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Text,
    Number,
    Date,
}

/// What auto-size measures for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoSizeMode {
    Header,
    #[default]
    HeaderAndRows,
}

// =============================================================================
// HeaderGroupDef
// =============================================================================

/// A labelled band that columns can join through `header_group_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderGroupDef {
    pub id: String,
    pub label: String,
}

impl HeaderGroupDef {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

// =============================================================================
// Column
// =============================================================================

/// A grid column definition.
pub struct Column<T> {
    /// Unique, immutable identifier.
    pub id: String,
    /// Header text.
    pub header: String,
    /// Record field read when no value getter is set.
    pub field: Option<String>,
    pub tooltip: Option<String>,
    /// Header group this column belongs to, if any.
    pub header_group_id: Option<String>,
    pub width: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    /// Share of spare viewport width this column grows by.
    pub flex: Option<f64>,
    pub hidden: bool,
    pub editable: bool,
    pub sortable: bool,
    pub filterable: bool,
    pub resizable: bool,
    pub pinnable: bool,
    pub pinned: Option<Pin>,
    /// Column cannot be reordered by dragging.
    pub suppress_move: bool,
    /// Pin requests from the header menu are ignored.
    pub lock_pinned: bool,
    pub auto_size_mode: AutoSizeMode,
    pub filter_type: Option<FilterType>,
    pub value_getter: Option<ValueGetter<T>>,
    pub value_formatter: Option<ValueFormatter<T>>,
    pub cell_renderer: Option<ValueFormatter<T>>,
    pub comparator: Option<Comparator<T>>,
    pub header_renderer: Option<HeaderRenderer<T>>,
}

impl<T> Column<T> {
    /// Create a new column with the given id and header.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            field: None,
            tooltip: None,
            header_group_id: None,
            width: None,
            min_width: None,
            max_width: None,
            flex: None,
            hidden: false,
            editable: false,
            sortable: true,
            filterable: true,
            resizable: true,
            pinnable: true,
            pinned: None,
            suppress_move: false,
            lock_pinned: false,
            auto_size_mode: AutoSizeMode::default(),
            filter_type: None,
            value_getter: None,
            value_formatter: None,
            cell_renderer: None,
            comparator: None,
            header_renderer: None,
        }
    }

    /// The built-in row selection column.
    pub fn selection() -> Self {
        let mut column = Self::new(SELECT_COLUMN_ID, "")
            .width(SELECT_COLUMN_WIDTH)
            .min_width(SELECT_COLUMN_WIDTH)
            .max_width(SELECT_COLUMN_WIDTH)
            .pinned(Pin::Left);
        column.sortable = false;
        column.filterable = false;
        column.resizable = false;
        column
    }

    /// Create a column reading the record field of the same name as `id`.
    pub fn field_column(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), header).field(id)
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn header_group(mut self, group_id: impl Into<String>) -> Self {
        self.header_group_id = Some(group_id.into());
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, width: f64) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn max_width(mut self, width: f64) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn flex(mut self, weight: f64) -> Self {
        self.flex = Some(weight);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn pinnable(mut self, pinnable: bool) -> Self {
        self.pinnable = pinnable;
        self
    }

    pub fn pinned(mut self, pin: Pin) -> Self {
        self.pinned = Some(pin);
        self
    }

    pub fn suppress_move(mut self, suppress: bool) -> Self {
        self.suppress_move = suppress;
        self
    }

    pub fn lock_pinned(mut self, locked: bool) -> Self {
        self.lock_pinned = locked;
        self
    }

    pub fn auto_size_mode(mut self, mode: AutoSizeMode) -> Self {
        self.auto_size_mode = mode;
        self
    }

    pub fn filter_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = Some(filter_type);
        self
    }

    pub fn value_getter(mut self, getter: impl Fn(&T) -> Value + Send + Sync + 'static) -> Self {
        self.value_getter = Some(Arc::new(getter));
        self
    }

    pub fn value_formatter(
        mut self,
        formatter: impl Fn(Option<&Value>, &T) -> String + Send + Sync + 'static,
    ) -> Self {
        self.value_formatter = Some(Arc::new(formatter));
        self
    }

    pub fn cell_renderer(
        mut self,
        renderer: impl Fn(Option<&Value>, &T) -> String + Send + Sync + 'static,
    ) -> Self {
        self.cell_renderer = Some(Arc::new(renderer));
        self
    }

    pub fn comparator(
        mut self,
        comparator: impl Fn(Option<&Value>, Option<&Value>, &T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    pub fn header_renderer(
        mut self,
        renderer: impl Fn(&Column<T>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.header_renderer = Some(Arc::new(renderer));
        self
    }

    // -------------------------------------------------------------------------
    // Resolved attributes
    // -------------------------------------------------------------------------

    /// Text shown in the header cell.
    pub fn header_label(&self) -> String {
        match &self.header_renderer {
            Some(render) => render(self),
            None => self.header.clone(),
        }
    }

    /// Declared width or the default.
    pub fn declared_width(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn resolved_min_width(&self) -> f64 {
        self.min_width.unwrap_or(DEFAULT_MIN_WIDTH)
    }

    pub fn resolved_max_width(&self) -> f64 {
        self.max_width.unwrap_or(DEFAULT_MAX_WIDTH)
    }

    /// Clamp a width to this column's bounds.
    pub fn clamp_width(&self, width: f64) -> f64 {
        width
            .max(self.resolved_min_width())
            .min(self.resolved_max_width())
    }

    pub fn is_selection_column(&self) -> bool {
        self.id == SELECT_COLUMN_ID
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            field: self.field.clone(),
            tooltip: self.tooltip.clone(),
            header_group_id: self.header_group_id.clone(),
            width: self.width,
            min_width: self.min_width,
            max_width: self.max_width,
            flex: self.flex,
            hidden: self.hidden,
            editable: self.editable,
            sortable: self.sortable,
            filterable: self.filterable,
            resizable: self.resizable,
            pinnable: self.pinnable,
            pinned: self.pinned,
            suppress_move: self.suppress_move,
            lock_pinned: self.lock_pinned,
            auto_size_mode: self.auto_size_mode,
            filter_type: self.filter_type,
            value_getter: self.value_getter.clone(),
            value_formatter: self.value_formatter.clone(),
            cell_renderer: self.cell_renderer.clone(),
            comparator: self.comparator.clone(),
            header_renderer: self.header_renderer.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("field", &self.field)
            .field("header_group_id", &self.header_group_id)
            .field("width", &self.width)
            .field("pinned", &self.pinned)
            .field("hidden", &self.hidden)
            .field("sortable", &self.sortable)
            .field("editable", &self.editable)
            .field("filter_type", &self.filter_type)
            .finish_non_exhaustive()
    }
}
