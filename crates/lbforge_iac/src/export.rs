//! Deployment export bundles.
//!
//! Collects each active workspace's variable file and state file into a single
//! tar archive an operator can hand over or archive. Entries are added in
//! sorted workspace order so the bundle is deterministic.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use tar::Builder;
use tracing::{info, warn};

use crate::error::{IacError, IacResult};
use crate::state::state_file_path;

/// What an export actually captured.
#[derive(Debug, Default)]
pub struct ExportSummary {
    /// Workspaces with at least one file in the bundle.
    pub archived: Vec<String>,
    /// Workspaces whose state file was missing.
    pub missing_state: Vec<String>,
}

/// Timestamped bundle filename.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("deployments_export_{}.tar", now.format("%Y%m%d_%H%M%S"))
}

/// Export the given workspaces' tfvars and state files to a tar bundle.
pub fn export_deployments(
    root: &Path,
    tfvars_dir: &Path,
    workspaces: &[String],
    output: &Path,
) -> IacResult<ExportSummary> {
    let file = File::create(output).map_err(|e| {
        IacError::ExportFailed(format!("cannot create {}: {}", output.display(), e))
    })?;
    let mut builder = Builder::new(BufWriter::new(file));

    let mut sorted: Vec<&String> = workspaces.iter().collect();
    sorted.sort();

    let mut summary = ExportSummary::default();
    for workspace in sorted {
        let mut archived_any = false;

        let tfvar_file = tfvars_dir.join(format!("{workspace}.tfvars"));
        if tfvar_file.exists() {
            append_file(
                &mut builder,
                &tfvar_file,
                &format!("{workspace}/{workspace}.tfvars"),
            )?;
            archived_any = true;
        }

        let state_file = state_file_path(root, workspace);
        if state_file.exists() {
            append_file(
                &mut builder,
                &state_file,
                &format!("{workspace}/terraform.tfstate"),
            )?;
            archived_any = true;
        } else {
            warn!(
                "State file not found for workspace '{}' at {:?}",
                workspace, state_file
            );
            summary.missing_state.push(workspace.clone());
        }

        if archived_any {
            summary.archived.push(workspace.clone());
        }
    }

    builder
        .finish()
        .map_err(|e| IacError::ExportFailed(e.to_string()))?;

    info!(
        "Exported {} workspaces to {:?}",
        summary.archived.len(),
        output
    );
    Ok(summary)
}

fn append_file(
    builder: &mut Builder<BufWriter<File>>,
    source: &Path,
    archive_name: &str,
) -> IacResult<()> {
    builder
        .append_path_with_name(source, archive_name)
        .map_err(|e| IacError::ExportFailed(format!("cannot archive {archive_name}: {e}")))
}
