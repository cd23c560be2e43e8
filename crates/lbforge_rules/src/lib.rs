//! # lbforge_rules
//!
//! Declarative, dependency-aware validation engine for the lbforge inventory.
//!
//! Every mutating action runs each inventory row through this engine first.
//! Validation is a pure function of (row, schema): no state is retained between
//! invocations, no I/O is performed, and the error list is deterministic in both
//! content and order.
//!
//! The engine has three layers:
//!
//! - [`RuleSchema`]: an immutable table of per-field constraints: required
//!   flags, allowed-value sets, format patterns, and conditional triggers.
//! - [`RowValidator`]: evaluates the schema against one row, then the
//!   hostname-format checks on the domain list fields.
//! - [`crossfield`]: hand-coded invariants spanning multiple fields within a
//!   row that the flat schema cannot express.
//!
//! ## Example
//!
//! ```rust
//! use lbforge_inventory::InventoryRow;
//! use lbforge_rules::{RowValidator, RuleSchema};
//!
//! let schema = RuleSchema::standard();
//! let validator = RowValidator::new(&schema).unwrap();
//!
//! let row = InventoryRow::default()
//!     .with("lb_name", "web-01")
//!     .with("domains", "app.example.com");
//! let errors = validator.validate_row(&row);
//! assert!(errors.is_empty());
//! ```

pub mod crossfield;
pub mod error;
pub mod schema;
pub mod validator;

pub use error::{ErrorKind, RulesError, RulesResult, ValidationError};
pub use schema::{DependsOn, FieldRule, RuleSchema};
pub use validator::{validate_table, RowValidator};
