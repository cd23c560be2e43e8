//! Refresh command - re-render a .tfvars file without applying.

use anyhow::Result;
use clap::Args;

use super::{print_header, Context};

#[derive(Debug, Args)]
pub struct RefreshArgs {
    /// Load balancer to refresh; prompts interactively when omitted
    #[arg(short, long)]
    pub name: Option<String>,
}

pub async fn execute(ctx: &Context, args: RefreshArgs) -> Result<()> {
    print_header("Refresh .tfvars File from Inventory");
    println!("This updates the .tfvars file from the inventory without applying changes.");

    let inventory = ctx.validated_inventory()?;
    let Some(row) = ctx.select_row(&inventory, args.name.as_deref(), "Select an LB to refresh")?
    else {
        return Ok(());
    };

    let tfvar_file = ctx.write_tfvars(row, &inventory.provider)?;
    println!("✅ Successfully refreshed '{}'.", tfvar_file.display());
    println!("Run 'plan' or 'apply' to see or deploy the changes.");
    Ok(())
}
