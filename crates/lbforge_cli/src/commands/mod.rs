//! CLI command definitions.
//!
//! This module defines the command structure for the lbforge CLI.
//! Each subcommand maps to one deployment workflow; every mutating workflow
//! re-loads and re-validates the inventory before touching terraform.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Select};

use lbforge_iac::{ProcessRunner, TerraformRunner};
use lbforge_inventory::{Inventory, InventoryReader, InventoryRow, ProviderConfig};
use lbforge_rules::{validate_table, RuleSchema};

pub mod apply;
pub mod apply_all;
pub mod destroy;
pub mod export;
pub mod plan;
pub mod refresh;
pub mod show;
pub mod status;
pub mod validate;

/// lbforge - inventory-driven load balancer deployments
#[derive(Debug, Parser)]
#[command(name = "lbforge")]
#[command(version, about = "lbforge - inventory-driven load balancer deployments")]
#[command(long_about = r#"
lbforge deploys HTTP(S) load balancers from an operator-maintained inventory
file. Each row is validated, rendered into a Terraform variable file, and
applied in its own workspace.

WORKFLOWS:
  validate   → Validate the inventory without touching terraform
  apply      → Deploy or modify a single load balancer
  apply-all  → Deploy every pending load balancer
  destroy    → Destroy a deployed load balancer
  plan       → Show pending changes for a deployment
  status     → List deployment status for every row
  show       → Pretty-print one row's configuration
  refresh    → Re-render a .tfvars file without applying
  export     → Bundle tfvars and state files into a tar archive

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments / not found
  3 - Validation failure
  5 - Terraform error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the inventory file
    #[arg(long, global = true, default_value = "inventory.yaml")]
    pub inventory: PathBuf,

    /// Directory for generated .tfvars files
    #[arg(long, global = true, default_value = "tfvars")]
    pub tfvars_dir: PathBuf,

    /// Terraform project root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Terraform binary to run
    #[arg(long, global = true, default_value = "terraform")]
    pub terraform_bin: String,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the inventory against the rule schema
    Validate(validate::ValidateArgs),

    /// Deploy or modify a single load balancer
    Apply(apply::ApplyArgs),

    /// Deploy all pending load balancers
    #[command(name = "apply-all")]
    ApplyAll(apply_all::ApplyAllArgs),

    /// Destroy a deployed load balancer
    Destroy(destroy::DestroyArgs),

    /// Show pending changes for a deployment
    Plan(plan::PlanArgs),

    /// List deployment status for every inventory row
    Status(status::StatusArgs),

    /// Pretty-print one row's configuration
    Show(show::ShowArgs),

    /// Re-render a .tfvars file from the inventory without applying
    Refresh(refresh::RefreshArgs),

    /// Export deployed workspaces to a tar bundle
    Export(export::ExportArgs),
}

/// Shared command context derived from the global CLI flags.
pub struct Context {
    pub inventory_path: PathBuf,
    pub tfvars_dir: PathBuf,
    pub root: PathBuf,
    pub terraform_bin: String,
    pub assume_yes: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            inventory_path: cli.inventory.clone(),
            tfvars_dir: cli.tfvars_dir.clone(),
            root: cli.root.clone(),
            terraform_bin: cli.terraform_bin.clone(),
            assume_yes: cli.yes,
        }
    }

    pub fn terraform(&self) -> TerraformRunner {
        TerraformRunner::new(Arc::new(ProcessRunner::new()), &self.root)
            .with_binary(&self.terraform_bin)
    }

    /// Fresh load of the inventory; never cached, so operator edits are
    /// picked up between cycles.
    pub fn load_inventory(&self) -> Result<Inventory> {
        Ok(InventoryReader::load(&self.inventory_path)?)
    }

    /// Load and validate the inventory, blocking until it is clean.
    ///
    /// On errors the operator is offered a re-load → re-validate loop so the
    /// inventory can be fixed without restarting; declining (or running with
    /// --yes) aborts with a validation failure.
    pub fn validated_inventory(&self) -> Result<Inventory> {
        let schema = RuleSchema::standard();
        loop {
            let inventory = self.load_inventory()?;
            let errors = validate_table(&inventory, &schema)?;
            if errors.is_empty() {
                return Ok(inventory);
            }

            println!("❌ Inventory validation failed:");
            for error in &errors {
                println!("   - {}", error);
            }

            if self.assume_yes {
                anyhow::bail!("validation failed with {} error(s)", errors.len());
            }
            let retry = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Fix the inventory and re-validate?")
                .default(true)
                .interact()?;
            if !retry {
                anyhow::bail!("validation failed with {} error(s)", errors.len());
            }
        }
    }

    /// Run `terraform init` on first use of a fresh project root.
    pub async fn ensure_initialized(&self, terraform: &TerraformRunner) -> Result<()> {
        if terraform.is_initialized() {
            return Ok(());
        }
        println!("Terraform project not initialized. Running terraform init...");
        let result = terraform.init().await?;
        if !result.success {
            anyhow::bail!("terraform init failed:\n{}", result.output);
        }
        Ok(())
    }

    /// Render and write the row's variable file, returning its path.
    pub fn write_tfvars(&self, row: &InventoryRow, provider: &ProviderConfig) -> Result<PathBuf> {
        fs::create_dir_all(&self.tfvars_dir)?;
        let path = self.tfvar_file(row.name());
        fs::write(&path, lbforge_iac::render(row, provider))?;
        Ok(path)
    }

    pub fn tfvar_file(&self, name: &str) -> PathBuf {
        self.tfvars_dir.join(format!("{name}.tfvars"))
    }

    /// Confirmation prompt honoring --yes.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    /// Resolve a row either by --name or interactively.
    pub fn select_row<'a>(
        &self,
        inventory: &'a Inventory,
        name: Option<&str>,
        prompt: &str,
    ) -> Result<Option<&'a InventoryRow>> {
        if let Some(name) = name {
            return match inventory.row(name) {
                Some(row) => Ok(Some(row)),
                None => anyhow::bail!("load balancer not found in inventory: {}", name),
            };
        }

        let names: Vec<&str> = inventory.load_balancers.iter().map(|r| r.name()).collect();
        Ok(prompt_select(prompt, &names)?.map(|index| &inventory.load_balancers[index]))
    }
}

/// Numbered selection prompt; Esc returns None (back out without acting).
pub fn prompt_select<S: ToString>(prompt: &str, items: &[S]) -> Result<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()?;
    Ok(selection)
}

pub fn print_header(title: &str) {
    println!("\n{}", "=".repeat(50));
    println!(" {}", title);
    println!("{}", "=".repeat(50));
}
