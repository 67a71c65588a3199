//! FLIP transitions for column reorder previews.
//!
//! The animator never measures anything itself. The grid hands it cell
//! positions from its own geometry before and after a preview change; every
//! cell that moved gets a horizontal offset that starts at the inverted delta
//! and eases back to zero. Hosts read [`ReorderAnimator::offset`] each frame
//! and translate the cell by it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::column::SELECT_COLUMN_ID;
use crate::transitions::{Easing, TransitionConfig};

/// Cells moving less than this many pixels are not animated.
const MIN_ANIMATED_DELTA: f64 = 1.0;

/// Identity of an animatable cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKey {
    Header(String),
    Filter(String),
    /// A body cell, by visible row index.
    Body { row: usize, column_id: String },
}

impl CellKey {
    pub fn column_id(&self) -> &str {
        match self {
            CellKey::Header(id) | CellKey::Filter(id) => id,
            CellKey::Body { column_id, .. } => column_id,
        }
    }
}

/// Tuning for reorder transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Body rows beyond this visible index are not animated.
    pub max_animated_rows: usize,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            max_animated_rows: 40,
            duration_ms: 220,
            easing: Easing::REORDER,
        }
    }
}

impl AnimationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_animated_rows(mut self, rows: usize) -> Self {
        self.max_animated_rows = rows;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn transition(&self) -> TransitionConfig {
        TransitionConfig::new(Duration::from_millis(self.duration_ms), self.easing)
    }
}

/// A running offset transition toward zero.
#[derive(Debug, Clone, Copy)]
struct ActiveFlip {
    from: f64,
    start: Instant,
}

/// Tracks before-positions and in-flight FLIP offsets.
#[derive(Debug, Default)]
pub struct ReorderAnimator {
    config: AnimationConfig,
    /// Visual positions captured before the last preview change.
    before: HashMap<CellKey, f64>,
    active: HashMap<CellKey, ActiveFlip>,
}

impl ReorderAnimator {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            before: HashMap::new(),
            active: HashMap::new(),
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    fn is_animatable(&self, key: &CellKey) -> bool {
        if key.column_id() == SELECT_COLUMN_ID {
            return false;
        }
        match key {
            CellKey::Body { row, .. } => *row < self.config.max_animated_rows,
            _ => true,
        }
    }

    /// Record where cells are on screen before a layout change.
    ///
    /// In-flight offsets are added to the layout positions, so a cell that is
    /// still sliding animates from where it currently appears. Running
    /// transitions are not interrupted.
    pub fn capture_before(&mut self, positions: impl IntoIterator<Item = (CellKey, f64)>, now: Instant) {
        let captured: HashMap<CellKey, f64> = positions
            .into_iter()
            .filter(|(key, _)| self.is_animatable(key))
            .map(|(key, left)| {
                let visual = left + self.offset(&key, now);
                (key, visual)
            })
            .collect();
        self.before = captured;
    }

    /// Start transitions for every captured cell that moved. Returns how many
    /// started. Consumes the captured positions.
    pub fn animate_after(&mut self, positions: impl IntoIterator<Item = (CellKey, f64)>, now: Instant) -> usize {
        if self.before.is_empty() {
            return 0;
        }
        let before = std::mem::take(&mut self.before);
        let mut started = 0;
        for (key, after) in positions {
            let Some(previous) = before.get(&key) else {
                continue;
            };
            let delta = previous - after;
            if delta.abs() < MIN_ANIMATED_DELTA {
                continue;
            }
            self.active.insert(key, ActiveFlip { from: delta, start: now });
            started += 1;
        }
        trace!("Started {started} reorder transitions");
        started
    }

    /// Current horizontal offset for a cell; zero when it is at rest.
    pub fn offset(&self, key: &CellKey, now: Instant) -> f64 {
        let Some(flip) = self.active.get(key) else {
            return 0.0;
        };
        let progress = self
            .config
            .transition()
            .progress(now.saturating_duration_since(flip.start));
        flip.from * (1.0 - f64::from(progress))
    }

    /// Drop finished transitions.
    pub fn prune(&mut self, now: Instant) {
        let duration = self.config.transition().duration;
        self.active
            .retain(|_, flip| now.saturating_duration_since(flip.start) < duration);
    }

    pub fn is_animating(&self) -> bool {
        !self.active.is_empty()
    }

    /// Stop every transition and forget captured positions. Returns how many
    /// transitions were cut short.
    pub fn reset(&mut self) -> usize {
        let swept = self.active.len();
        self.active.clear();
        self.before.clear();
        swept
    }
}
