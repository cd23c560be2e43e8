//! # lbforge_iac
//!
//! Terraform integration for lbforge.
//!
//! This crate owns everything downstream of validation: rendering a validated
//! inventory row plus the provider record into a `.tfvars` variable file, and
//! driving the `terraform` binary through its workspace / apply / plan /
//! destroy lifecycle, one isolated workspace per load balancer.
//!
//! Command execution goes through the [`CommandRunner`] trait so the Terraform
//! lifecycle can be tested against a mock without a real binary.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use lbforge_iac::{ProcessRunner, TerraformRunner};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let terraform = TerraformRunner::new(Arc::new(ProcessRunner::new()), Path::new("."));
//! let workspaces = terraform.workspace_list().await?;
//! println!("{} workspaces", workspaces.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;
pub mod mock;
pub mod process;
pub mod runner;
pub mod state;
pub mod terraform;
pub mod tfvars;

pub use error::{IacError, IacResult};
pub use export::{export_deployments, export_filename, ExportSummary};
pub use mock::{MockResponse, MockRunner};
pub use process::ProcessRunner;
pub use runner::{CommandRunner, ExecutionResult};
pub use state::{is_deployed, state_file_path};
pub use terraform::{TerraformResult, TerraformRunner};
pub use tfvars::render;
