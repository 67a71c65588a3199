//! Input vocabulary and output events.

use serde::{Deserialize, Serialize};

use crate::engine::SortState;

// =============================================================================
// Input
// =============================================================================

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Space,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Command key on macOS.
    pub meta: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// Ctrl or Cmd, the clipboard shortcut modifier.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
    /// Event started a drag or resize gesture.
    StartDrag,
}

impl EventResult {
    /// Check if the event was handled (consumed or started drag).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

// =============================================================================
// Output
// =============================================================================

/// Pagination position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub page_index: usize,
    pub page_size: usize,
}

/// A committed inline edit. `next_value` is the raw editor text.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEditEvent<T> {
    pub row: T,
    /// Source index of the edited row.
    pub row_index: usize,
    pub column_id: String,
    pub next_value: String,
}

/// Events the grid emits for its host, drained with `Grid::drain_events`.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent<T> {
    /// The full selection, as records in source order.
    SelectionChanged { rows: Vec<T> },
    SortChanged(Vec<SortState>),
    PageChanged(PageState),
    CellEditCommitted(CellEditEvent<T>),
    /// A column joined or left a header group.
    ColumnGroupChanged {
        column_id: String,
        header_group_id: Option<String>,
    },
    /// Text the host should place on the clipboard.
    ClipboardCopy(String),
}
