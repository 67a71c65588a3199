//! Error types for grid construction and configuration.

use thiserror::Error;

/// A configuration value that cannot drive the grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("page size must be positive")]
    ZeroPageSize,

    #[error("page size options must be non-empty and positive, got {0:?}")]
    InvalidPageSizeOptions(Vec<usize>),

    #[error("row height must be a positive finite number, got {0}")]
    InvalidRowHeight(f64),

    #[error("viewport height must be a positive finite number, got {0}")]
    InvalidViewportHeight(f64),

    #[error("duplicate column id '{0}'")]
    DuplicateColumnId(String),

    #[error("duplicate header group id '{0}'")]
    DuplicateHeaderGroupId(String),
}

/// Errors surfaced at the grid's fallible boundaries.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid grid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to parse grid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
