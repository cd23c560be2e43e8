//! Status command - list deployment status for every inventory row.

use anyhow::Result;
use clap::Args;

use lbforge_iac::is_deployed;

use super::{print_header, Context};

#[derive(Debug, Args)]
pub struct StatusArgs {}

pub async fn execute(ctx: &Context, _args: StatusArgs) -> Result<()> {
    print_header("Deployment Status");

    let inventory = ctx.load_inventory()?;

    println!("{:<15} {:<30} {}", "Status", "Load Balancer Name", "Domains");
    println!("{}", "-".repeat(70));
    for row in &inventory.load_balancers {
        let status = if is_deployed(&ctx.root, row.name()) {
            "✅ Deployed"
        } else {
            "📝 Pending"
        };
        let domains = row.text("domains").unwrap_or_else(|| "N/A".to_string());
        println!("{:<15} {:<30} {}", status, row.name(), domains);
    }

    Ok(())
}
