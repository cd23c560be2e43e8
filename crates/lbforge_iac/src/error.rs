//! Error types for the IaC module.

use thiserror::Error;

/// Result type alias for IaC operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that can occur during IaC operations.
#[derive(Error, Debug)]
pub enum IacError {
    #[error("Terraform not available: {0}")]
    TerraformNotAvailable(String),

    #[error("Terraform workspace command failed: {0}")]
    WorkspaceFailed(String),

    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
