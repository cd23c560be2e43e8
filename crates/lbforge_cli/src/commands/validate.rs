//! Validate command - check the inventory without touching terraform.

use anyhow::Result;
use clap::Args;
use tracing::info;

use lbforge_rules::{validate_table, RuleSchema};

use super::Context;

#[derive(Debug, Args)]
pub struct ValidateArgs {}

pub async fn execute(ctx: &Context, _args: ValidateArgs) -> Result<()> {
    info!("Validating inventory at {:?}", ctx.inventory_path);

    let inventory = ctx.load_inventory()?;
    let schema = RuleSchema::standard();
    let errors = validate_table(&inventory, &schema)?;

    if errors.is_empty() {
        println!(
            "✅ Inventory validation passed ({} rows)",
            inventory.load_balancers.len()
        );
        return Ok(());
    }

    println!("❌ Inventory validation failed:");
    for error in &errors {
        println!("   - {}", error);
    }
    anyhow::bail!("validation failed with {} error(s)", errors.len());
}
