//! Error types for inventory loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors that can occur while loading the inventory.
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Inventory file not found: {0}")]
    NotFound(PathBuf),

    #[error("Inventory row {index} has no lb_name")]
    MissingRowName { index: usize },

    #[error("Duplicate lb_name in inventory: {0}")]
    DuplicateRowName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
