//! Error types for the validation engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rule operations.
pub type RulesResult<T> = Result<T, RulesError>;

/// Fatal validation-engine failures.
///
/// Per-row problems are never fatal; they accumulate as [`ValidationError`]s.
/// Only schema drift aborts the pass, since per-row checks are meaningless
/// against a source whose columns no longer match the schema.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Inventory source is missing schema columns: {}", columns.join(", "))]
    SchemaMismatch { columns: Vec<String> },

    #[error("Invalid pattern for field '{field}': {message}")]
    InvalidPattern { field: String, message: String },
}

/// Classification of a per-row validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    FieldMissing,
    FieldInvalid,
    CrossFieldConflict,
}

/// A single per-row validation error.
///
/// Every error carries the row's `lb_name` and the offending field so the
/// rendered message is self-contained: an operator can locate and fix the
/// inventory cell without cross-referencing anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub lb_name: String,
    pub field: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn missing(lb_name: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            lb_name: lb_name.to_string(),
            field: field.to_string(),
            kind: ErrorKind::FieldMissing,
            message: message.into(),
        }
    }

    pub fn invalid(lb_name: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            lb_name: lb_name.to_string(),
            field: field.to_string(),
            kind: ErrorKind::FieldInvalid,
            message: message.into(),
        }
    }

    pub fn conflict(lb_name: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            lb_name: lb_name.to_string(),
            field: field.to_string(),
            kind: ErrorKind::CrossFieldConflict,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.lb_name, self.field, self.message)
    }
}
