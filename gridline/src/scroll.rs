//! Scroll position ownership.
//!
//! Each axis holds one canonical offset. Visual surfaces (header scroller,
//! scrollbar tracks) mirror it: when the canonical value moves, every surface
//! that drifted more than [`SYNC_TOLERANCE`] gets a pending write for the host
//! to apply. A user scroll on one surface becomes the canonical value and
//! propagates to the others the same way.

use std::collections::HashMap;

use log::trace;

/// Surfaces are only re-synced when they drift further than this (px).
pub const SYNC_TOLERANCE: f64 = 1.0;

/// A host scroll container mirroring one of the grid's scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollSurface {
    /// Header row scroller (horizontal).
    Header,
    /// Vertical scrollbar track.
    VerticalTrack,
    /// Horizontal scrollbar track under the center pane.
    HorizontalTrack,
}

/// A write the host must apply to a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceWrite {
    pub surface: ScrollSurface,
    pub offset: f64,
}

/// One scroll axis and the surfaces mirroring it.
#[derive(Debug, Clone)]
pub struct ScrollAxis {
    value: f64,
    max: f64,
    surfaces: HashMap<ScrollSurface, f64>,
    pending: Vec<SurfaceWrite>,
}

impl ScrollAxis {
    pub fn new(surfaces: &[ScrollSurface]) -> Self {
        Self {
            value: 0.0,
            max: f64::INFINITY,
            surfaces: surfaces.iter().map(|surface| (*surface, 0.0)).collect(),
            pending: Vec::new(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Set the largest reachable offset, clamping the current value.
    pub fn set_max(&mut self, max: f64) {
        self.max = max.max(0.0);
        if self.value > self.max {
            self.set(self.max);
        }
    }

    /// Move the canonical offset (clamped to `0..=max`) and queue writes for
    /// drifted surfaces. Returns whether the value changed.
    pub fn set(&mut self, offset: f64) -> bool {
        let next = clamp_offset(offset, self.max);
        let changed = next != self.value;
        self.value = next;
        self.sync(None);
        changed
    }

    /// Adjust the offset by `delta`.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.set(self.value + delta)
    }

    /// A surface was scrolled by the user.
    ///
    /// The reported offset becomes canonical; the other surfaces follow.
    pub fn surface_scrolled(&mut self, surface: ScrollSurface, offset: f64) -> bool {
        let next = clamp_offset(offset, self.max);
        self.surfaces.insert(surface, next);
        let changed = next != self.value;
        self.value = next;
        self.sync(Some(surface));
        changed
    }

    /// Last known offset of a surface.
    pub fn surface_offset(&self, surface: ScrollSurface) -> Option<f64> {
        self.surfaces.get(&surface).copied()
    }

    fn sync(&mut self, origin: Option<ScrollSurface>) {
        for (surface, offset) in self.surfaces.iter_mut() {
            if Some(*surface) == origin || (*offset - self.value).abs() <= SYNC_TOLERANCE {
                continue;
            }
            *offset = self.value;
            trace!("Syncing {surface:?} to {}", self.value);
            self.pending.push(SurfaceWrite {
                surface: *surface,
                offset: self.value,
            });
        }
    }

    /// Take queued surface writes.
    pub fn drain_writes(&mut self) -> Vec<SurfaceWrite> {
        std::mem::take(&mut self.pending)
    }
}

fn clamp_offset(offset: f64, max: f64) -> f64 {
    if offset.is_nan() {
        return 0.0;
    }
    offset.max(0.0).min(max)
}

/// Both scroll axes of the grid.
#[derive(Debug, Clone)]
pub struct ScrollSync {
    pub vertical: ScrollAxis,
    pub horizontal: ScrollAxis,
}

impl Default for ScrollSync {
    fn default() -> Self {
        Self {
            vertical: ScrollAxis::new(&[ScrollSurface::VerticalTrack]),
            horizontal: ScrollAxis::new(&[ScrollSurface::Header, ScrollSurface::HorizontalTrack]),
        }
    }
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a user scroll to the axis owning `surface`.
    pub fn surface_scrolled(&mut self, surface: ScrollSurface, offset: f64) -> bool {
        match surface {
            ScrollSurface::VerticalTrack => self.vertical.surface_scrolled(surface, offset),
            ScrollSurface::Header | ScrollSurface::HorizontalTrack => {
                self.horizontal.surface_scrolled(surface, offset)
            }
        }
    }

    /// Take queued writes for both axes.
    pub fn drain_writes(&mut self) -> Vec<SurfaceWrite> {
        let mut writes = self.vertical.drain_writes();
        writes.extend(self.horizontal.drain_writes());
        writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_pixel_drift_is_not_synced() {
        let mut axis = ScrollAxis::new(&[ScrollSurface::Header, ScrollSurface::HorizontalTrack]);
        axis.set(0.5);
        assert!(axis.drain_writes().is_empty());
        axis.set(10.0);
        assert_eq!(axis.drain_writes().len(), 2);
    }

    #[test]
    fn test_surface_scroll_propagates_to_others_only() {
        let mut axis = ScrollAxis::new(&[ScrollSurface::Header, ScrollSurface::HorizontalTrack]);
        axis.surface_scrolled(ScrollSurface::HorizontalTrack, 120.0);
        assert_eq!(axis.value(), 120.0);
        assert_eq!(
            axis.drain_writes(),
            vec![SurfaceWrite {
                surface: ScrollSurface::Header,
                offset: 120.0
            }]
        );
    }

    #[test]
    fn test_max_clamps() {
        let mut axis = ScrollAxis::new(&[]);
        axis.set(500.0);
        axis.set_max(200.0);
        assert_eq!(axis.value(), 200.0);
        axis.set(-5.0);
        assert_eq!(axis.value(), 0.0);
    }
}
