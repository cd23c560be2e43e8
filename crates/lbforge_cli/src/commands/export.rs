//! Export command - bundle deployed workspaces into a tar archive.

use anyhow::Result;
use chrono::Utc;
use clap::Args;

use lbforge_iac::{export_deployments, export_filename};

use super::{print_header, Context};

#[derive(Debug, Args)]
pub struct ExportArgs {}

pub async fn execute(ctx: &Context, _args: ExportArgs) -> Result<()> {
    print_header("Export Deployments");

    let terraform = ctx.terraform();
    ctx.ensure_initialized(&terraform).await?;

    let active = terraform.active_workspaces().await?;
    if active.is_empty() {
        println!("No active deployments found to export.");
        return Ok(());
    }

    let bundle = export_filename(Utc::now());
    println!(
        "The following {} deployments will be exported to '{}':",
        active.len(),
        bundle
    );
    for workspace in &active {
        println!("  - {workspace}");
    }
    if !ctx.confirm("Do you want to proceed?")? {
        println!("Export cancelled.");
        return Ok(());
    }

    let summary = export_deployments(
        &ctx.root,
        &ctx.tfvars_dir,
        &active,
        std::path::Path::new(&bundle),
    )?;

    for workspace in &summary.missing_state {
        println!("  - Warning: state file not found for workspace '{workspace}'");
    }
    println!("\n✅ Successfully created export bundle: {bundle}");
    Ok(())
}
