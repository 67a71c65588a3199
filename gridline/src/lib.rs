//! A data grid engine: filtering, sorting, pagination, virtualization, and
//! the column layout and interaction state behind a grid UI.
//!
//! The pure table functions live in [`engine`] and [`header_groups`]. The
//! stateful [`Grid`] drives them from user input and hands the renderer a
//! [`GridView`] snapshot.

pub mod animation;
pub mod column;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod grid;
pub mod header_groups;
pub mod layout;
pub mod measure;
pub mod row;
pub mod scroll;
pub mod selection;
pub mod transitions;
pub mod value;

pub use column::{Column, HeaderGroupDef, Pin};
pub use config::GridConfig;
pub use error::{ConfigError, GridError};
pub use event::{EventResult, GridEvent, Key, Modifiers};
pub use grid::{Grid, GridView};
pub use row::{GridRow, Record};

pub mod prelude {
    pub use crate::animation::{AnimationConfig, CellKey};
    pub use crate::column::{AutoSizeMode, Column, FilterType, HeaderGroupDef, Pin};
    pub use crate::config::GridConfig;
    pub use crate::engine::{FilterValue, SortDirection, SortState};
    pub use crate::error::{ConfigError, GridError};
    pub use crate::event::{CellEditEvent, EventResult, GridEvent, Key, Modifiers, PageState};
    pub use crate::grid::{
        CellPosition, FilterBound, FocusRequest, Grid, GridView, GroupEdge, HeaderMenu,
    };
    pub use crate::header_groups::{HeaderGroupSegment, HeaderSection};
    pub use crate::layout::DropHint;
    pub use crate::measure::{MonospaceMeasurer, TextMeasurer};
    pub use crate::row::{GridRow, Record};
    pub use crate::scroll::{ScrollSurface, SurfaceWrite};
    pub use crate::selection::SelectionMode;
}
