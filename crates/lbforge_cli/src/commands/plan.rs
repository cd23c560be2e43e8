//! Plan command - show pending changes for a deployment.

use anyhow::Result;
use clap::Args;

use super::{print_header, prompt_select, Context};

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Workspace to check; prompts interactively when omitted
    #[arg(short, long)]
    pub name: Option<String>,
}

pub async fn execute(ctx: &Context, args: PlanArgs) -> Result<()> {
    print_header("Check Deployment Status (Plan)");

    let terraform = ctx.terraform();
    ctx.ensure_initialized(&terraform).await?;

    let active = terraform.active_workspaces().await?;
    if active.is_empty() {
        println!("No active deployments found to check.");
        return Ok(());
    }

    let workspace = match args.name {
        Some(name) => {
            if !active.contains(&name) {
                anyhow::bail!("deployment not found: {}", name);
            }
            name
        }
        None => {
            let Some(index) = prompt_select("Select a deployment to check", &active)? else {
                return Ok(());
            };
            active[index].clone()
        }
    };

    let tfvar_file = ctx.tfvar_file(&workspace);
    terraform.workspace_select(&workspace).await?;
    let result = terraform.plan(&tfvar_file).await?;
    if !result.success {
        anyhow::bail!("terraform plan failed for '{}'", workspace);
    }

    Ok(())
}
