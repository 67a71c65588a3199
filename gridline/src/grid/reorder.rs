//! Column drag and drop.
//!
//! A drag starts on a header, then hover handlers turn the pointer position
//! into a [`DropHint`]. Every hint change re-orders the preview and plays a
//! FLIP transition from the old cell positions. Dropping commits the hint to
//! the layout; ending the drag anywhere else reverts the preview.

use std::time::Instant;

use log::debug;

use crate::column::Column;
use crate::event::{EventResult, GridEvent};
use crate::header_groups::DragHints;
use crate::layout::DropHint;
use crate::row::Record;

use super::Grid;

/// An in-progress column drag.
#[derive(Debug, Clone)]
pub(super) struct ColumnDrag {
    pub(super) column_id: String,
    pub(super) hint: Option<DropHint>,
}

/// Edge of a header group band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupEdge {
    Left,
    Right,
}

impl<T: Record> Grid<T> {
    pub fn dragging_column(&self) -> Option<&str> {
        self.drag.as_ref().map(|drag| drag.column_id.as_str())
    }

    pub fn drop_hint(&self) -> Option<&DropHint> {
        self.drag.as_ref().and_then(|drag| drag.hint.as_ref())
    }

    // -------------------------------------------------------------------------
    // Drag start / hover
    // -------------------------------------------------------------------------

    /// Start dragging a header. Rejected while a resize is in progress and
    /// for columns with `suppress_move`.
    pub fn begin_column_drag(&mut self, column_id: &str) -> EventResult {
        if self.resize.is_some() {
            debug!("Ignoring drag of {column_id} during resize");
            return EventResult::Ignored;
        }
        let rendered = self.layout.rendered_columns(&self.columns);
        let Some(column) = rendered.iter().find(|column| column.id == column_id) else {
            return EventResult::Ignored;
        };
        if column.suppress_move {
            return EventResult::Ignored;
        }
        debug!("Column drag started: {column_id}");
        self.drag = Some(ColumnDrag {
            column_id: column_id.to_string(),
            hint: None,
        });
        EventResult::StartDrag
    }

    /// Pointer over a header cell during a drag. `offset_x` is measured from
    /// the cell's left edge.
    pub fn column_drag_over(
        &mut self,
        target_column_id: &str,
        offset_x: f64,
        target_width: f64,
        now: Instant,
    ) -> EventResult {
        let Some(drag) = &self.drag else {
            return EventResult::Ignored;
        };
        // Hovering the dragged slot itself keeps the previous hint.
        if drag.column_id == target_column_id {
            return EventResult::Consumed;
        }
        let before = offset_x < target_width / 2.0;
        self.set_drop_hint(Some(DropHint::new(target_column_id, before)), now)
    }

    /// Pointer over the edge strip of a group band. Targets the group's
    /// first or last column; the drop leaves the dragged column outside the
    /// group unless it came from that group.
    pub fn group_edge_drag_over(&mut self, group_id: &str, edge: GroupEdge, now: Instant) -> EventResult {
        if self.drag.is_none() {
            return EventResult::Ignored;
        }
        let members = self.group_members(group_id);
        let hint = match edge {
            GroupEdge::Left => members.first().map(|id| DropHint::new(id.as_str(), true)),
            GroupEdge::Right => members.last().map(|id| DropHint::new(id.as_str(), false)),
        };
        let Some(hint) = hint else {
            return EventResult::Ignored;
        };
        let same_group = self.dragging_original_group().as_deref() == Some(group_id);
        let hint = if same_group { hint } else { hint.ungrouping() };
        self.set_drop_hint(Some(hint), now)
    }

    /// Pointer over the middle of a group band: drop after its last column.
    pub fn group_middle_drag_over(&mut self, group_id: &str, now: Instant) -> EventResult {
        let Some(dragging) = self.dragging_column().map(str::to_string) else {
            return EventResult::Ignored;
        };
        let members = self.group_members(group_id);
        match members.last() {
            Some(last) if *last != dragging => {
                let hint = DropHint::new(last.as_str(), false);
                self.set_drop_hint(Some(hint), now)
            }
            _ => EventResult::Consumed,
        }
    }

    /// Update the drop hint and animate the preview change.
    ///
    /// `None`, or no drag in progress, clears the hint and stops every
    /// transition. Repeating the current hint does nothing.
    pub fn set_drop_hint(&mut self, hint: Option<DropHint>, now: Instant) -> EventResult {
        let Some(hint) = hint.filter(|_| self.drag.is_some()) else {
            if let Some(drag) = self.drag.as_mut() {
                drag.hint = None;
            }
            self.animator.reset();
            self.settle();
            return EventResult::Ignored;
        };
        let unchanged = self
            .drag
            .as_ref()
            .is_some_and(|drag| drag.hint.as_ref() == Some(&hint));
        if unchanged {
            return EventResult::Consumed;
        }

        let before = self.view().cell_positions();
        self.animator.capture_before(before, now);
        if let Some(drag) = self.drag.as_mut() {
            debug!(
                "Drop hint for {}: {} (before={}, ungroup={})",
                drag.column_id, hint.target_column_id, hint.before, hint.ungroup_at_edge
            );
            drag.hint = Some(hint);
        }
        let after = self.view().cell_positions();
        self.animator.animate_after(after, now);
        self.settle();
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Drop / end
    // -------------------------------------------------------------------------

    /// Drop on a header cell.
    ///
    /// The current hint wins over `target_column_id`; without a hint the
    /// column lands before the target. The dragged column adopts the target's
    /// pin, and with header groups configured it joins the target's group
    /// (or leaves every group when the target is pinned or the hint is an
    /// ungroup edge).
    pub fn drop_column(&mut self, target_column_id: &str) -> EventResult {
        let Some(drag) = self.drag.take() else {
            self.reset_drag();
            return EventResult::Ignored;
        };
        let (target_id, before, ungroup) = match &drag.hint {
            Some(hint) => (hint.target_column_id.clone(), hint.before, hint.ungroup_at_edge),
            None => (target_column_id.to_string(), true, false),
        };
        let source_id = drag.column_id;
        if source_id == target_id || !self.layout.move_column(&source_id, &target_id, before) {
            debug!("Column drop of {source_id} on {target_id} reverted");
            self.reset_drag();
            return EventResult::Consumed;
        }
        debug!("Column {source_id} dropped on {target_id} (before={before})");

        let rendered = self.layout.rendered_columns(&self.columns);
        let source = rendered.iter().find(|column| column.id == source_id);
        let target = rendered.iter().find(|column| column.id == target_id);
        if let (Some(_), Some(target)) = (source, target) {
            let target_pin = target.pinned;
            if target_pin != self.layout.pin(&source_id) {
                self.layout.set_pin(&source_id, target_pin);
            }
            if !self.config.header_groups.is_empty() {
                let group = if target_pin.is_some() || ungroup {
                    None
                } else {
                    self.layout.effective_group(target).map(str::to_string)
                };
                if target_pin.is_some() {
                    self.layout.clear_group_override(&source_id);
                } else {
                    self.layout.set_group_override(&source_id, group.clone());
                }
                self.emit(GridEvent::ColumnGroupChanged {
                    column_id: source_id.clone(),
                    header_group_id: group,
                });
            }
        }

        self.reset_drag();
        EventResult::Consumed
    }

    /// Drop on a group band edge: lands next to the group's first or last
    /// column.
    pub fn drop_on_group_edge(&mut self, group_id: &str, edge: GroupEdge) -> EventResult {
        let members = self.group_members(group_id);
        let target = match edge {
            GroupEdge::Left => members.first(),
            GroupEdge::Right => members.last(),
        };
        match target {
            Some(target) => self.drop_column(target),
            None => EventResult::Ignored,
        }
    }

    /// Drop on the middle of a group band: lands after its last column.
    pub fn drop_on_group_middle(&mut self, group_id: &str) -> EventResult {
        self.drop_on_group_edge(group_id, GroupEdge::Right)
    }

    /// Drop anywhere else in the header (a drag gap, the header container):
    /// completes the drop on the current hint.
    pub fn drop_on_current_target(&mut self) -> EventResult {
        match self.drop_hint().map(|hint| hint.target_column_id.clone()) {
            Some(target) => self.drop_column(&target),
            None => EventResult::Ignored,
        }
    }

    /// Drag ended without a drop. Nothing is committed.
    pub fn end_column_drag(&mut self) {
        if let Some(drag) = &self.drag {
            debug!("Column drag of {} ended without drop", drag.column_id);
        }
        self.drag = None;
        self.reset_drag();
    }

    /// Tear down every gesture, as when the grid goes away mid-drag.
    pub fn cancel_gestures(&mut self) {
        self.resize = None;
        self.drag = None;
        self.reset_drag();
    }

    fn reset_drag(&mut self) {
        self.drag = None;
        let swept = self.animator.reset();
        if swept > 0 {
            debug!("Stopped {swept} reorder transitions");
        }
        self.settle();
    }

    // -------------------------------------------------------------------------
    // Group lookups
    // -------------------------------------------------------------------------

    /// Group the dragged column belonged to when the drag started: its
    /// override when it has one, else its declared group.
    fn dragging_original_group(&self) -> Option<String> {
        let drag = self.drag.as_ref()?;
        let column = self.find_column(&drag.column_id)?;
        self.layout.effective_group(column).map(str::to_string)
    }

    /// Center columns shown under `group_id`, in preview order. The dragged
    /// column is never a member.
    fn group_members(&self, group_id: &str) -> Vec<String> {
        let view = self.view();
        view.center_columns()
            .filter(|column| self.header_group_of(column) == Some(group_id))
            .map(|column| column.id.clone())
            .collect()
    }

    pub(super) fn drag_hints(&self, rendered: &[Column<T>]) -> DragHints {
        let Some(drag) = &self.drag else {
            return DragHints::default();
        };
        let group_of = |id: &str| {
            rendered
                .iter()
                .find(|column| column.id == id)
                .filter(|column| column.pinned.is_none())
                .and_then(|column| self.layout.effective_group(column))
                .map(str::to_string)
        };
        let original = self.dragging_original_group();
        DragHints {
            dragging_column_id: Some(drag.column_id.clone()),
            drop_target_column_id: drag.hint.as_ref().map(|hint| hint.target_column_id.clone()),
            dragging_original_group_id: original.clone(),
            drop_group_id: drag
                .hint
                .as_ref()
                .and_then(|hint| group_of(&hint.target_column_id)),
            dragging_column_source_group_id: original,
            drop_target_ungroup_at_edge: drag.hint.as_ref().is_some_and(|hint| hint.ungroup_at_edge),
        }
    }
}
