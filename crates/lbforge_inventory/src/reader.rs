//! Inventory file loading.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{InventoryError, InventoryResult};
use crate::models::Inventory;

/// Loader for the YAML inventory document.
///
/// Loading is intentionally cheap and stateless: callers re-load before every
/// validation cycle so operator edits are always picked up.
pub struct InventoryReader;

impl InventoryReader {
    /// Load and check the inventory at the given path.
    pub fn load(path: impl AsRef<Path>) -> InventoryResult<Inventory> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InventoryError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let inventory: Inventory = serde_yaml::from_str(&content)?;

        Self::check_row_names(&inventory)?;

        debug!(
            "Loaded {} rows from {:?}",
            inventory.load_balancers.len(),
            path
        );
        Ok(inventory)
    }

    /// Every row must carry a non-blank, table-unique `lb_name`: it is the
    /// display key and the Terraform workspace identifier.
    fn check_row_names(inventory: &Inventory) -> InventoryResult<()> {
        let mut seen = BTreeSet::new();
        for (index, row) in inventory.load_balancers.iter().enumerate() {
            let name = row.name();
            if name.trim().is_empty() {
                return Err(InventoryError::MissingRowName { index });
            }
            if !seen.insert(name.to_string()) {
                return Err(InventoryError::DuplicateRowName(name.to_string()));
            }
        }
        Ok(())
    }
}
