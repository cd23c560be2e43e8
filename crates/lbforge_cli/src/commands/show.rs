//! Show command - pretty-print one row's configuration.

use anyhow::Result;
use clap::Args;

use lbforge_inventory::InventoryRow;

use super::{print_header, Context};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Load balancer to show; prompts interactively when omitted
    #[arg(short, long)]
    pub name: Option<String>,
}

const ORIGIN_POOL_KEYS: [&str; 12] = [
    "create_origin_pool",
    "origin_pool_name",
    "origin_server_type",
    "origin_port",
    "origin_labels",
    "network_type",
    "site_name",
    "dns_name_private",
    "k8s_service_name",
    "ip_address_private",
    "ip_address_public",
    "dns_name_public",
];

const HTTPS_KEYS: [&str; 6] = [
    "lb_type",
    "lb_port",
    "add_hsts",
    "http_redirect",
    "custom_cert_names",
    "custom_cert_namespace",
];

const HEALTHCHECK_KEYS: [&str; 4] = [
    "enable_healthcheck",
    "healthcheck_name",
    "healthcheck_type",
    "healthcheck_http_path",
];

pub async fn execute(ctx: &Context, args: ShowArgs) -> Result<()> {
    let inventory = ctx.load_inventory()?;
    let Some(row) = ctx.select_row(&inventory, args.name.as_deref(), "Select an LB to view")?
    else {
        return Ok(());
    };

    display_config(row);
    Ok(())
}

fn display_config(row: &InventoryRow) {
    print_header(&format!("Configuration for: {}", row.name()));

    println!("\n## Load Balancer Details");
    for (key, _) in &row.fields {
        let grouped = key == "lb_name"
            || ORIGIN_POOL_KEYS.contains(&key.as_str())
            || HTTPS_KEYS.contains(&key.as_str())
            || HEALTHCHECK_KEYS.contains(&key.as_str());
        if grouped {
            continue;
        }
        if let Some(value) = row.text(key) {
            println!("{:<30}: {}", key, value);
        }
    }

    println!("\n## HTTPS Configuration");
    for key in HTTPS_KEYS {
        if let Some(value) = row.text(key) {
            println!("{:<30}: {}", key, value);
        }
    }

    if row.flag("create_origin_pool") {
        println!("\n## New Origin Pool Details");
        for key in ORIGIN_POOL_KEYS {
            if let Some(value) = row.text(key) {
                println!("{:<30}: {}", key, value);
            }
        }

        if row.flag("enable_healthcheck") {
            println!("\n## Health Check Details");
            for key in HEALTHCHECK_KEYS {
                if let Some(value) = row.text(key) {
                    println!("{:<30}: {}", key, value);
                }
            }
        }
    } else if let Some(pool) = row.text("existing_origin_pool_name") {
        println!("\n## Existing Origin Pool: {}", pool);
    }
}
