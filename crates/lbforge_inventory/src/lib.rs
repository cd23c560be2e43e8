//! # lbforge_inventory
//!
//! Typed inventory model and loader for lbforge.
//!
//! The inventory is an operator-maintained YAML document describing the desired
//! configuration of every load balancer, plus a single provider record. Rows are
//! sparse: most fields are optional and only meaningful under specific conditions,
//! so a row is modelled as a flat mapping of field name to scalar value rather
//! than a rigid struct.
//!
//! The inventory is re-read from disk on every validation cycle so that operator
//! corrections are picked up without restarting the tool.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lbforge_inventory::InventoryReader;
//!
//! let inventory = InventoryReader::load("inventory.yaml").unwrap();
//! for row in &inventory.load_balancers {
//!     println!("{}: create_origin_pool={}", row.name(), row.flag("create_origin_pool"));
//! }
//! ```

pub mod error;
pub mod models;
pub mod reader;

pub use error::{InventoryError, InventoryResult};
pub use models::{FieldValue, Inventory, InventoryRow, ProviderConfig};
pub use reader::InventoryReader;
