//! Viewport metrics, scrolling, hover, and frame ticks.

use std::time::Instant;

use log::trace;

use crate::animation::CellKey;
use crate::event::EventResult;
use crate::row::Record;
use crate::scroll::{ScrollSurface, SurfaceWrite};

use super::Grid;

impl<T: Record> Grid<T> {
    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    pub fn viewport_size(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    /// The body viewport was measured. Non-positive dimensions are ignored.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        if width > 0.0 && width.is_finite() {
            self.viewport_width = width;
        }
        if height > 0.0 && height.is_finite() {
            self.viewport_height = height;
        }
        trace!(
            "Viewport {}x{}",
            self.viewport_width, self.viewport_height
        );
        self.settle();
    }

    // -------------------------------------------------------------------------
    // Scroll
    // -------------------------------------------------------------------------

    pub fn scroll_top(&self) -> f64 {
        self.scroll.vertical.value()
    }

    pub fn scroll_left(&self) -> f64 {
        self.scroll.horizontal.value()
    }

    pub fn set_scroll_top(&mut self, offset: f64) {
        self.scroll.vertical.set(offset);
    }

    pub fn set_scroll_left(&mut self, offset: f64) {
        self.scroll.horizontal.set(offset);
    }

    /// The user scrolled one of the host's scroll containers.
    pub fn on_surface_scroll(&mut self, surface: ScrollSurface, offset: f64) {
        self.scroll.surface_scrolled(surface, offset);
    }

    /// Wheel over the body. Shift turns vertical wheel motion horizontal.
    pub fn on_grid_wheel(&mut self, delta_x: f64, delta_y: f64, shift: bool) -> EventResult {
        let horizontal = horizontal_delta(delta_x, delta_y, shift);
        let vertical = if !shift && delta_y != 0.0 { delta_y } else { 0.0 };
        let mut result = EventResult::Ignored;
        if vertical != 0.0 {
            self.scroll.vertical.scroll_by(vertical);
            result = EventResult::Consumed;
        }
        if horizontal != 0.0 {
            self.scroll.horizontal.scroll_by(horizontal);
            result = EventResult::Consumed;
        }
        result
    }

    /// Wheel over the header, which only scrolls horizontally.
    pub fn on_header_wheel(&mut self, delta_x: f64, delta_y: f64, shift: bool) -> EventResult {
        let horizontal = horizontal_delta(delta_x, delta_y, shift);
        if horizontal == 0.0 {
            return EventResult::Ignored;
        }
        self.scroll.horizontal.scroll_by(horizontal);
        EventResult::Consumed
    }

    /// Take the offsets the host must write to its scroll containers.
    pub fn drain_scroll_writes(&mut self) -> Vec<SurfaceWrite> {
        self.scroll.drain_writes()
    }

    // -------------------------------------------------------------------------
    // Hover
    // -------------------------------------------------------------------------

    /// Visible row under the pointer, shared by all three panes.
    pub fn hovered_row(&self) -> Option<usize> {
        self.hovered_row
    }

    pub fn set_hovered_row(&mut self, visible_row: Option<usize>) {
        self.hovered_row = visible_row;
    }

    // -------------------------------------------------------------------------
    // Frames
    // -------------------------------------------------------------------------

    /// Once per display frame: applies batched resize moves and retires
    /// finished transitions. Returns whether another frame is needed.
    pub fn on_animation_frame(&mut self, now: Instant) -> bool {
        self.flush_resize();
        self.animator.prune(now);
        self.animator.is_animating()
    }

    /// Horizontal offset to draw a cell at while a reorder transition runs.
    pub fn cell_offset(&self, key: &CellKey, now: Instant) -> f64 {
        self.animator.offset(key, now)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }
}

fn horizontal_delta(delta_x: f64, delta_y: f64, shift: bool) -> f64 {
    if delta_x != 0.0 {
        delta_x
    } else if shift {
        delta_y
    } else {
        0.0
    }
}
