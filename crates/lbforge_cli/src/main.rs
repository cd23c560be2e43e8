//! lbforge CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments / not found
//! - 3: Validation failure
//! - 5: Terraform error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands, Context};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TERRAFORM_ERROR: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.quiet {
        "lbforge=error"
    } else if cli.verbose {
        "lbforge=debug"
    } else {
        "lbforge=info"
    };
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive(default_level.parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let ctx = Context::from_cli(&cli);

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::execute(&ctx, args).await,
        Commands::Apply(args) => commands::apply::execute(&ctx, args).await,
        Commands::ApplyAll(args) => commands::apply_all::execute(&ctx, args).await,
        Commands::Destroy(args) => commands::destroy::execute(&ctx, args).await,
        Commands::Plan(args) => commands::plan::execute(&ctx, args).await,
        Commands::Status(args) => commands::status::execute(&ctx, args).await,
        Commands::Show(args) => commands::show::execute(&ctx, args).await,
        Commands::Refresh(args) => commands::refresh::execute(&ctx, args).await,
        Commands::Export(args) => commands::export::execute(&ctx, args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let msg = e.to_string().to_lowercase();

    if msg.contains("validation") || msg.contains("schema columns") {
        ExitCodes::VALIDATION_FAILURE
    } else if msg.contains("terraform") {
        ExitCodes::TERRAFORM_ERROR
    } else if msg.contains("not found") || msg.contains("argument") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
