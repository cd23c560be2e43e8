//! Apply command - deploy or modify a single load balancer.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{print_header, Context};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Load balancer to apply; prompts interactively when omitted
    #[arg(short, long)]
    pub name: Option<String>,
}

pub async fn execute(ctx: &Context, args: ApplyArgs) -> Result<()> {
    print_header("Apply a Single Deployment (Deploy or Modify)");

    let inventory = ctx.validated_inventory()?;
    let Some(row) = ctx.select_row(&inventory, args.name.as_deref(), "Select an LB to apply")?
    else {
        return Ok(());
    };
    let lb_name = row.name().to_string();

    let terraform = ctx.terraform();
    ctx.ensure_initialized(&terraform).await?;

    let existing = terraform.workspace_list().await?;
    if existing.contains(&lb_name) {
        println!("⚠️  Workspace '{lb_name}' already exists. This will apply modifications from the inventory.");
        if !ctx.confirm("Do you want to proceed?")? {
            println!("Apply cancelled.");
            return Ok(());
        }
    }

    let tfvar_file = ctx.write_tfvars(row, &inventory.provider)?;
    info!("Generated {:?}", tfvar_file);

    terraform.ensure_workspace(&lb_name).await?;
    let result = terraform.apply(&tfvar_file).await?;
    if !result.success {
        anyhow::bail!("terraform apply failed for '{}'", lb_name);
    }

    println!("✅ Apply complete for '{lb_name}'");
    Ok(())
}
