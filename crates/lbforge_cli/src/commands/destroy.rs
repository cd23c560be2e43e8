//! Destroy command - tear down a deployed load balancer.

use std::fs;

use anyhow::Result;
use clap::Args;

use super::{print_header, prompt_select, Context};

#[derive(Debug, Args)]
pub struct DestroyArgs {
    /// Workspace to destroy; prompts interactively when omitted
    #[arg(short, long)]
    pub name: Option<String>,
}

pub async fn execute(ctx: &Context, args: DestroyArgs) -> Result<()> {
    print_header("Destroy a Load Balancer");

    let terraform = ctx.terraform();
    ctx.ensure_initialized(&terraform).await?;

    let active = terraform.active_workspaces().await?;
    if active.is_empty() {
        println!("No active deployments found to destroy.");
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
            let Some(index) = prompt_select("Select a deployment to destroy", &active)? else {
                return Ok(());
            };
            active[index].clone()
        }
    };

    let tfvar_file = ctx.tfvar_file(&workspace);
    terraform.workspace_select(&workspace).await?;
    let result = terraform.destroy(&tfvar_file).await?;
    if !result.success {
        anyhow::bail!("terraform destroy failed for '{}'", workspace);
    }

    if ctx.confirm("Destroy successful. Delete workspace and .tfvars file?")? {
        terraform.workspace_select("default").await?;
        terraform.workspace_delete(&workspace).await?;
        if tfvar_file.exists() {
            fs::remove_file(&tfvar_file)?;
        }
        println!("🧹 Workspace '{workspace}' and its .tfvars file removed.");
    }

    Ok(())
}
