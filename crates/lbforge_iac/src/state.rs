//! Terraform state inspection.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Path of the state file for a workspace under the project root.
pub fn state_file_path(root: &Path, workspace: &str) -> PathBuf {
    root.join("terraform.tfstate.d")
        .join(workspace)
        .join("terraform.tfstate")
}

/// Check whether a deployment is truly complete.
///
/// A deployment counts as deployed only when its workspace state file exists
/// and holds a non-empty `resources` list. A missing, unreadable, or invalid
/// state file counts as not deployed, so half-finished runs show up as pending.
pub fn is_deployed(root: &Path, workspace: &str) -> bool {
    let path = state_file_path(root, workspace);

    let Ok(content) = fs::read_to_string(&path) else {
        return false;
    };
    let Ok(state) = serde_json::from_str::<Value>(&content) else {
        return false;
    };

    state
        .get("resources")
        .and_then(Value::as_array)
        .map(|resources| !resources.is_empty())
        .unwrap_or(false)
}
