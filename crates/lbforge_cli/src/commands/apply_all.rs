//! Apply-all command - deploy every pending load balancer.

use anyhow::Result;
use clap::Args;
use tracing::info;

use lbforge_iac::is_deployed;

use super::{print_header, Context};

#[derive(Debug, Args)]
pub struct ApplyAllArgs {}

pub async fn execute(ctx: &Context, _args: ApplyAllArgs) -> Result<()> {
    print_header("Apply All Pending Deployments");

    let inventory = ctx.validated_inventory()?;
    let pending: Vec<_> = inventory
        .load_balancers
        .iter()
        .filter(|row| !is_deployed(&ctx.root, row.name()))
        .collect();

    if pending.is_empty() {
        println!("All load balancers in the inventory are already deployed. Nothing to do.");
        return Ok(());
    }

    println!("The following pending load balancers will be deployed:");
    for row in &pending {
        println!("  - {}", row.name());
    }
    if !ctx.confirm("Do you want to proceed?")? {
        println!("Bulk apply cancelled.");
        return Ok(());
    }

    let terraform = ctx.terraform();
    ctx.ensure_initialized(&terraform).await?;

    for row in pending {
        let lb_name = row.name().to_string();
        print_header(&format!("Deploying: {lb_name}"));

        let tfvar_file = ctx.write_tfvars(row, &inventory.provider)?;
        info!("Generated {:?}", tfvar_file);

        terraform.ensure_workspace(&lb_name).await?;
        let result = terraform.apply(&tfvar_file).await?;
        if !result.success {
            anyhow::bail!("terraform apply failed for '{}'", lb_name);
        }
        println!("✅ Deployed '{lb_name}'");
    }

    Ok(())
}
