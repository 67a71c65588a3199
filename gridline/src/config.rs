//! Grid configuration.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationConfig;
use crate::column::HeaderGroupDef;
use crate::engine::DEFAULT_ROW_BUFFER;
use crate::error::{ConfigError, GridError};
use crate::selection::SelectionMode;

/// Numeric and boolean configuration for a grid.
///
/// Loadable from JSON with every field optional:
///
/// ```ignore
/// let config = GridConfig::from_json(r#"{"defaultPageSize": 50, "selectionMode": "single"}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Page sizes offered to the user.
    pub page_size_options: Vec<usize>,

    /// Page size the grid starts with.
    pub default_page_size: usize,

    /// When false, every sorted row is on a single page.
    pub pagination_enabled: bool,

    /// Fixed body row height in pixels.
    pub row_height: f64,

    pub quick_filter_placeholder: String,

    pub selection_mode: SelectionMode,

    /// Draw borders between all columns, not only at pane edges.
    pub show_vertical_borders: bool,

    /// Header cells grow with their content instead of using the row height.
    pub auto_header_height: bool,

    /// Bands columns can join through `header_group_id`.
    pub header_groups: Vec<HeaderGroupDef>,

    /// Rows rendered beyond each edge of the viewport.
    pub row_buffer: usize,

    /// Body viewport height used until the host reports a real one.
    pub initial_viewport_height: f64,

    pub animation: AnimationConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size_options: vec![10, 25, 50, 100],
            default_page_size: 25,
            pagination_enabled: true,
            row_height: 40.0,
            quick_filter_placeholder: "Search table...".to_string(),
            selection_mode: SelectionMode::Multiple,
            show_vertical_borders: false,
            auto_header_height: false,
            header_groups: Vec::new(),
            row_buffer: DEFAULT_ROW_BUFFER,
            initial_viewport_height: 540.0,
            animation: AnimationConfig::default(),
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive a grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.page_size_options.is_empty() || self.page_size_options.contains(&0) {
            return Err(ConfigError::InvalidPageSizeOptions(
                self.page_size_options.clone(),
            ));
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(ConfigError::InvalidRowHeight(self.row_height));
        }
        if !(self.initial_viewport_height.is_finite() && self.initial_viewport_height > 0.0) {
            return Err(ConfigError::InvalidViewportHeight(
                self.initial_viewport_height,
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for group in &self.header_groups {
            if !seen.insert(group.id.as_str()) {
                return Err(ConfigError::DuplicateHeaderGroupId(group.id.clone()));
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    pub fn default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    pub fn pagination(mut self, enabled: bool) -> Self {
        self.pagination_enabled = enabled;
        self
    }

    pub fn row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    pub fn quick_filter_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.quick_filter_placeholder = placeholder.into();
        self
    }

    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn vertical_borders(mut self, show: bool) -> Self {
        self.show_vertical_borders = show;
        self
    }

    pub fn auto_header_height(mut self, enabled: bool) -> Self {
        self.auto_header_height = enabled;
        self
    }

    pub fn header_groups(mut self, groups: Vec<HeaderGroupDef>) -> Self {
        self.header_groups = groups;
        self
    }

    pub fn row_buffer(mut self, rows: usize) -> Self {
        self.row_buffer = rows;
        self
    }

    pub fn initial_viewport_height(mut self, height: f64) -> Self {
        self.initial_viewport_height = height;
        self
    }

    pub fn animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GridConfig::from_json(r#"{"defaultPageSize": 50, "selectionMode": "single"}"#)
            .unwrap();
        assert_eq!(config.default_page_size, 50);
        assert_eq!(config.selection_mode, SelectionMode::Single);
        assert_eq!(config.row_height, 40.0);
        assert_eq!(config.animation.duration_ms, 220);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            GridConfig::from_json(r#"{"rowHeight": 0}"#),
            Err(GridError::Config(ConfigError::InvalidRowHeight(_)))
        ));
        assert!(matches!(
            GridConfig::from_json(r#"{"defaultPageSize": "x"}"#),
            Err(GridError::Parse(_))
        ));
        assert_eq!(
            GridConfig::new().default_page_size(0).validate(),
            Err(ConfigError::ZeroPageSize)
        );
    }
}
