//! Header group bands for the center pane.
//!
//! Segmentation runs in two phases. Each center column first gets a key: its
//! declared group when that group exists, nothing for ungrouped columns, and
//! a drag-aware key for the column being dragged. Runs of equal keys are then
//! merged into [`HeaderGroupSegment`]s. Ungrouped columns produce no segment.
//!
//! [`compute_header_section_descriptors`] expands the segments into the
//! ordered sections a renderer walks.

use std::collections::HashMap;

use crate::column::HeaderGroupDef;

/// Segment id of the placeholder band shown above a column being dragged out
/// of a group.
pub const DRAG_GAP_ID: &str = "__drag-gap";

// =============================================================================
// Inputs
// =============================================================================

/// A center column as seen by the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentColumn<'a> {
    pub id: &'a str,
    /// Effective group: the drag override when present, else the declared one.
    pub header_group_id: Option<&'a str>,
}

impl<'a> SegmentColumn<'a> {
    pub fn new(id: &'a str, header_group_id: Option<&'a str>) -> Self {
        Self {
            id,
            header_group_id,
        }
    }
}

/// Drag state the segmenter needs to preview a column move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragHints {
    pub dragging_column_id: Option<String>,
    pub drop_target_column_id: Option<String>,
    /// Group of the dragged column when the drag started.
    pub dragging_original_group_id: Option<String>,
    /// Group of the column under the cursor.
    pub drop_group_id: Option<String>,
    /// Current group of the dragged column, ignoring the drop target.
    pub dragging_column_source_group_id: Option<String>,
    /// The drop would take the column out of its group.
    pub drop_target_ungroup_at_edge: bool,
}

// =============================================================================
// Outputs
// =============================================================================

/// One band in the group row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderGroupSegment {
    pub id: String,
    pub label: String,
    pub width: f64,
    pub column_start: usize,
    pub column_span: usize,
}

impl HeaderGroupSegment {
    pub fn is_drag_gap(&self) -> bool {
        self.id == DRAG_GAP_ID
    }
}

/// One logical section of the header row, in column order.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderSection {
    Group {
        id: String,
        label: String,
        column_start: usize,
        column_span: usize,
        column_ids: Vec<String>,
    },
    Ungrouped {
        column_start: usize,
        column_span: usize,
        column_ids: Vec<String>,
    },
    DragGap {
        column_start: usize,
        column_span: usize,
        width: f64,
    },
}

impl HeaderSection {
    pub fn column_span(&self) -> usize {
        match self {
            Self::Group { column_span, .. }
            | Self::Ungrouped { column_span, .. }
            | Self::DragGap { column_span, .. } => *column_span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentKey<'a> {
    Group(&'a str),
    DragGap,
}

// =============================================================================
// Segmentation
// =============================================================================

/// Compute the group bands over `center_columns`.
///
/// Widths are rounded per column before summing. When `total_width` is
/// positive, the last segment absorbs any difference between the segment sum
/// and `total_width` (never going below zero).
pub fn compute_header_group_segments(
    center_columns: &[SegmentColumn<'_>],
    width_of: impl Fn(&str) -> f64,
    header_groups: &[HeaderGroupDef],
    total_width: f64,
    hints: &DragHints,
) -> Vec<HeaderGroupSegment> {
    if header_groups.is_empty() || center_columns.is_empty() {
        return Vec::new();
    }

    let labels: HashMap<&str, &str> = header_groups
        .iter()
        .map(|group| (group.id.as_str(), group.label.as_str()))
        .collect();

    let keys: Vec<Option<SegmentKey<'_>>> = center_columns
        .iter()
        .map(|column| {
            if hints.dragging_column_id.as_deref() == Some(column.id) {
                Some(dragging_key(hints, &labels))
            } else {
                column
                    .header_group_id
                    .filter(|group| labels.contains_key(group))
                    .map(SegmentKey::Group)
            }
        })
        .collect();

    let mut segments = Vec::new();
    let mut index = 0;
    while index < center_columns.len() {
        let Some(key) = keys[index] else {
            index += 1;
            continue;
        };
        let start = index;
        let mut width = 0.0;
        while index < center_columns.len() && keys[index] == Some(key) {
            width += width_of(center_columns[index].id).round();
            index += 1;
        }
        let (id, label) = match key {
            SegmentKey::DragGap => (DRAG_GAP_ID.to_string(), String::new()),
            SegmentKey::Group(id) => (
                id.to_string(),
                labels.get(id).copied().unwrap_or(id).to_string(),
            ),
        };
        segments.push(HeaderGroupSegment {
            id,
            label,
            width,
            column_start: start,
            column_span: index - start,
        });
    }

    if total_width > 0.0 {
        let sum: f64 = segments.iter().map(|segment| segment.width).sum();
        let diff = total_width - sum;
        if diff != 0.0
            && let Some(last) = segments.last_mut()
        {
            last.width = (last.width + diff).max(0.0);
        }
    }

    segments
}

fn dragging_key<'h>(hints: &'h DragHints, labels: &HashMap<&str, &str>) -> SegmentKey<'h> {
    let original = hints.dragging_original_group_id.as_deref();
    let drop = hints.drop_group_id.as_deref();

    if let Some(original) = original
        && (drop.is_none() || drop == Some(original))
    {
        return SegmentKey::Group(original);
    }
    if hints.drop_target_ungroup_at_edge {
        return SegmentKey::DragGap;
    }
    if let Some(drop) = drop {
        return SegmentKey::Group(drop);
    }
    match hints.dragging_column_source_group_id.as_deref() {
        Some(source) if labels.contains_key(source) => SegmentKey::Group(source),
        _ => SegmentKey::DragGap,
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Expand segments into ordered header sections, filling the runs between
/// and around segments with ungrouped sections.
pub fn compute_header_section_descriptors(
    center_columns: &[SegmentColumn<'_>],
    segments: &[HeaderGroupSegment],
) -> Vec<HeaderSection> {
    let ids = |start: usize, end: usize| -> Vec<String> {
        center_columns[start.min(center_columns.len())..end.min(center_columns.len())]
            .iter()
            .map(|column| column.id.to_string())
            .collect()
    };

    let mut sections = Vec::new();
    let mut cursor = 0;

    for segment in segments {
        if segment.column_start > cursor {
            let column_ids = ids(cursor, segment.column_start);
            if !column_ids.is_empty() {
                sections.push(HeaderSection::Ungrouped {
                    column_start: cursor,
                    column_span: column_ids.len(),
                    column_ids,
                });
            }
        }

        if segment.is_drag_gap() {
            sections.push(HeaderSection::DragGap {
                column_start: segment.column_start,
                column_span: segment.column_span,
                width: segment.width,
            });
        } else {
            sections.push(HeaderSection::Group {
                id: segment.id.clone(),
                label: segment.label.clone(),
                column_start: segment.column_start,
                column_span: segment.column_span,
                column_ids: ids(
                    segment.column_start,
                    segment.column_start + segment.column_span,
                ),
            });
        }
        cursor = segment.column_start + segment.column_span;
    }

    if cursor < center_columns.len() {
        let column_ids = ids(cursor, center_columns.len());
        sections.push(HeaderSection::Ungrouped {
            column_start: cursor,
            column_span: column_ids.len(),
            column_ids,
        });
    }

    sections
}
