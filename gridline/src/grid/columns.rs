//! Column resize, pinning, visibility, and auto-size.

use std::time::Instant;

use log::{debug, trace, warn};

use crate::column::{AutoSizeMode, Pin};
use crate::engine::display_value;
use crate::event::{EventResult, GridEvent};
use crate::row::Record;

use super::Grid;

/// Body cells sampled per column when auto-sizing.
const AUTO_SIZE_SAMPLE_ROWS: usize = 50;

/// An in-progress resize drag. Installed on pointer-down over a resize
/// handle and removed on pointer-up or [`Grid::cancel_gestures`].
#[derive(Debug, Clone)]
pub(super) struct ResizeGesture {
    column_id: String,
    start_x: f64,
    start_width: f64,
    min_width: f64,
    max_width: f64,
    /// Latest pointer x not yet applied; flushed once per frame.
    pending_x: Option<f64>,
}

impl ResizeGesture {
    fn width_at(&self, x: f64) -> f64 {
        (self.start_width + (x - self.start_x))
            .max(self.min_width)
            .min(self.max_width)
    }
}

/// The header context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMenu {
    pub column_id: String,
    pub x: f64,
    pub y: f64,
}

impl<T: Record> Grid<T> {
    // -------------------------------------------------------------------------
    // Resize
    // -------------------------------------------------------------------------

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// Pointer-down on a column's resize handle.
    pub fn begin_resize(&mut self, column_id: &str, pointer_x: f64) -> EventResult {
        let rendered = self.layout.rendered_columns(&self.columns);
        let Some(column) = rendered.iter().find(|column| column.id == column_id) else {
            return EventResult::Ignored;
        };
        if !column.resizable {
            return EventResult::Ignored;
        }
        let gesture = ResizeGesture {
            column_id: column.id.clone(),
            start_x: pointer_x,
            start_width: self.layout.width_of(column),
            min_width: column.resolved_min_width(),
            max_width: column.resolved_max_width(),
            pending_x: None,
        };
        debug!(
            "Resize started on {column_id} at width {}",
            gesture.start_width
        );
        self.resize = Some(gesture);
        EventResult::StartDrag
    }

    /// Pointer-move during a resize. The width is applied on the next
    /// [`Grid::on_animation_frame`].
    pub fn resize_pointer_move(&mut self, pointer_x: f64) -> EventResult {
        let Some(resize) = self.resize.as_mut() else {
            return EventResult::Ignored;
        };
        trace!("Resize move to {pointer_x}");
        resize.pending_x = Some(pointer_x);
        EventResult::Consumed
    }

    /// Pointer-up: apply the last position and end the gesture.
    pub fn end_resize(&mut self, now: Instant) -> EventResult {
        if self.resize.is_none() {
            return EventResult::Ignored;
        }
        self.flush_resize();
        if let Some(resize) = self.resize.take() {
            let width = self
                .find_column(&resize.column_id)
                .map(|column| self.layout.width_of(column));
            debug!("Resize ended on {} at width {width:?}", resize.column_id);
        }
        self.resize_ended_at = Some(now);
        self.settle();
        EventResult::Consumed
    }

    pub(super) fn flush_resize(&mut self) {
        let Some(resize) = self.resize.as_mut() else {
            return;
        };
        let Some(x) = resize.pending_x.take() else {
            return;
        };
        let width = resize.width_at(x);
        let column_id = resize.column_id.clone();
        self.layout.set_width(&column_id, width);
        self.settle();
    }

    // -------------------------------------------------------------------------
    // Pinning
    // -------------------------------------------------------------------------

    /// Cycle a column's pin: left, right, unpinned, left.
    pub fn cycle_pin(&mut self, column_id: &str) -> EventResult {
        let Some(column) = self.find_column(column_id) else {
            return EventResult::Ignored;
        };
        if !column.pinnable {
            return EventResult::Ignored;
        }
        let next = match self.layout.pin(column_id) {
            Some(Pin::Left) => Some(Pin::Right),
            Some(Pin::Right) => None,
            None => Some(Pin::Left),
        };
        self.apply_pin(column_id, next);
        EventResult::Consumed
    }

    /// Pin a column. Pinned columns leave their header group.
    fn apply_pin(&mut self, column_id: &str, pin: Option<Pin>) {
        debug!("Column {column_id} pinned {pin:?}");
        self.layout.set_pin(column_id, pin);
        if pin.is_some() && !self.config.header_groups.is_empty() {
            self.layout.clear_group_override(column_id);
            self.emit(GridEvent::ColumnGroupChanged {
                column_id: column_id.to_string(),
                header_group_id: None,
            });
        }
        self.settle();
    }

    // -------------------------------------------------------------------------
    // Header menu
    // -------------------------------------------------------------------------

    pub fn header_menu(&self) -> Option<&HeaderMenu> {
        self.header_menu.as_ref()
    }

    pub fn open_header_menu(&mut self, column_id: &str, x: f64, y: f64) -> EventResult {
        if self.find_column(column_id).is_none() {
            return EventResult::Ignored;
        }
        self.header_menu = Some(HeaderMenu {
            column_id: column_id.to_string(),
            x,
            y,
        });
        EventResult::Consumed
    }

    pub fn close_header_menu(&mut self) {
        self.header_menu = None;
    }

    /// Pin the menu's column and close the menu. Columns with
    /// `lock_pinned` keep their pin.
    pub fn pin_column_from_menu(&mut self, pin: Option<Pin>) -> EventResult {
        let Some(menu) = self.header_menu.take() else {
            return EventResult::Ignored;
        };
        let locked = self
            .find_column(&menu.column_id)
            .is_some_and(|column| column.lock_pinned);
        if locked {
            debug!("Ignoring pin request for locked column {}", menu.column_id);
            return EventResult::Consumed;
        }
        self.apply_pin(&menu.column_id, pin);
        EventResult::Consumed
    }

    /// A click anywhere closes the header menu.
    pub fn on_document_click(&mut self) {
        self.close_header_menu();
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub fn is_column_hidden(&self, column_id: &str) -> bool {
        self.find_column(column_id)
            .is_some_and(|column| column.hidden || self.layout.is_hidden(column_id))
    }

    pub fn set_column_hidden(&mut self, column_id: &str, hidden: bool) -> EventResult {
        if self.find_column(column_id).is_none() {
            return EventResult::Ignored;
        }
        debug!("Column {column_id} hidden={hidden}");
        self.layout.set_hidden(column_id, hidden);
        self.settle();
        EventResult::Consumed
    }

    pub fn toggle_column_hidden(&mut self, column_id: &str) -> EventResult {
        let hidden = self.layout.is_hidden(column_id);
        self.set_column_hidden(column_id, !hidden)
    }

    // -------------------------------------------------------------------------
    // Auto-size
    // -------------------------------------------------------------------------

    /// Fit columns to their content.
    ///
    /// Measures the header label and up to 50 materialized body cells of
    /// each column and sets the width to the largest, rounded up and clamped
    /// to the column's bounds. `None` or an empty list sizes every rendered
    /// column. The selection column, unknown ids, and non-resizable columns
    /// are skipped.
    pub fn auto_size_columns(&mut self, column_ids: Option<&[&str]>) {
        let sized: Vec<(String, f64)> = {
            let view = self.view();
            let rendered = view.rendered_columns();
            let targets: Vec<&str> = match column_ids {
                Some(ids) if !ids.is_empty() => ids.to_vec(),
                _ => rendered.iter().map(|column| column.id.as_str()).collect(),
            };
            let sample: Vec<&T> = view
                .visible_rows()
                .iter()
                .take(AUTO_SIZE_SAMPLE_ROWS)
                .map(|row| row.source)
                .collect();

            targets
                .into_iter()
                .filter_map(|id| {
                    let Some(column) = rendered.iter().find(|column| column.id == id) else {
                        warn!("Cannot auto-size unknown column {id}");
                        return None;
                    };
                    if column.is_selection_column() || !column.resizable {
                        return None;
                    }
                    let mut widest = self.measurer.header_width(&column.header_label());
                    if column.auto_size_mode == AutoSizeMode::HeaderAndRows {
                        for row in &sample {
                            let text = display_value(column, row);
                            widest = widest.max(self.measurer.cell_width(&text));
                        }
                    }
                    if widest <= 0.0 {
                        return None;
                    }
                    Some((column.id.clone(), column.clamp_width(widest.ceil())))
                })
                .collect()
        };

        for (column_id, width) in &sized {
            self.layout.set_width(column_id, *width);
        }
        debug!("Auto-sized {} columns", sized.len());
        self.settle();
    }
}
