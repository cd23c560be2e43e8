//! Terraform lifecycle driver.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{IacError, IacResult};
use crate::runner::CommandRunner;

/// Result of a Terraform operation.
#[derive(Debug)]
pub struct TerraformResult {
    pub success: bool,
    pub output: String,
    pub exit_code: i64,
}

/// Drives the terraform binary in a fixed project root.
///
/// Each load balancer gets its own workspace named after its `lb_name`, so
/// state is isolated per deployment.
pub struct TerraformRunner {
    runner: Arc<dyn CommandRunner>,
    binary: String,
    root: PathBuf,
}

impl TerraformRunner {
    /// Create a new Terraform runner for the given project root.
    pub fn new(runner: Arc<dyn CommandRunner>, root: impl AsRef<Path>) -> Self {
        Self {
            runner,
            binary: "terraform".to_string(),
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Use a custom terraform binary name or path.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `terraform init` has been run in the project root.
    pub fn is_initialized(&self) -> bool {
        self.root.join(".terraform").exists()
    }

    pub async fn is_available(&self) -> IacResult<bool> {
        self.runner.is_available(&self.binary).await
    }

    /// Run terraform init.
    pub async fn init(&self) -> IacResult<TerraformResult> {
        info!("Running terraform init in {:?}", self.root);
        self.run_command(&["init", "-input=false"]).await
    }

    /// Run 'terraform workspace list' and return the clean set of names.
    pub async fn workspace_list(&self) -> IacResult<BTreeSet<String>> {
        let result = self.run_command(&["workspace", "list"]).await?;
        if !result.success {
            return Err(IacError::WorkspaceFailed(result.output));
        }

        // Output marks the current workspace with '* '.
        let workspaces = result
            .output
            .lines()
            .map(|line| line.trim().trim_start_matches("* ").trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Ok(workspaces)
    }

    /// Active deployment workspaces: everything except 'default'.
    pub async fn active_workspaces(&self) -> IacResult<Vec<String>> {
        let mut active: Vec<String> = self
            .workspace_list()
            .await?
            .into_iter()
            .filter(|ws| ws != "default")
            .collect();
        active.sort();
        Ok(active)
    }

    pub async fn workspace_new(&self, name: &str) -> IacResult<TerraformResult> {
        info!("Creating workspace '{}'", name);
        self.run_command(&["workspace", "new", name]).await
    }

    pub async fn workspace_select(&self, name: &str) -> IacResult<TerraformResult> {
        debug!("Selecting workspace '{}'", name);
        self.run_command(&["workspace", "select", name]).await
    }

    pub async fn workspace_delete(&self, name: &str) -> IacResult<TerraformResult> {
        info!("Deleting workspace '{}'", name);
        self.run_command(&["workspace", "delete", name]).await
    }

    /// Select the workspace, creating it first if it does not exist yet.
    pub async fn ensure_workspace(&self, name: &str) -> IacResult<TerraformResult> {
        let existing = self.workspace_list().await?;
        if existing.contains(name) {
            self.workspace_select(name).await
        } else {
            self.workspace_new(name).await
        }
    }

    /// Run terraform apply against a variable file.
    pub async fn apply(&self, var_file: &Path) -> IacResult<TerraformResult> {
        info!("Running terraform apply with {:?}", var_file);
        let var_arg = format!("-var-file={}", var_file.display());
        self.run_command(&["apply", &var_arg, "-auto-approve"]).await
    }

    /// Run terraform destroy against a variable file.
    pub async fn destroy(&self, var_file: &Path) -> IacResult<TerraformResult> {
        info!("Running terraform destroy with {:?}", var_file);
        let var_arg = format!("-var-file={}", var_file.display());
        self.run_command(&["destroy", &var_arg, "-auto-approve"]).await
    }

    /// Run terraform plan against a variable file.
    pub async fn plan(&self, var_file: &Path) -> IacResult<TerraformResult> {
        info!("Running terraform plan with {:?}", var_file);
        let var_arg = format!("-var-file={}", var_file.display());
        self.run_command(&["plan", &var_arg, "-input=false", "-no-color"])
            .await
    }

    async fn run_command(&self, args: &[&str]) -> IacResult<TerraformResult> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        debug!("Executing {} {:?}", self.binary, args);

        let result = self.runner.run(&self.binary, &args, &self.root).await?;
        Ok(TerraformResult {
            success: result.success(),
            output: result.combined_output(),
            exit_code: result.exit_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockResponse, MockRunner};

    #[tokio::test]
    async fn workspace_list_strips_current_marker() {
        let mock = MockRunner::new();
        mock.push_response(MockResponse::success("  default\n* web-01\n  web-02\n"));
        let terraform = TerraformRunner::new(Arc::new(mock), ".");

        let workspaces = terraform.workspace_list().await.unwrap();
        let names: Vec<&str> = workspaces.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["default", "web-01", "web-02"]);
    }

    #[tokio::test]
    async fn active_workspaces_exclude_default() {
        let mock = MockRunner::new();
        mock.push_response(MockResponse::success("* default\n  web-02\n  web-01\n"));
        let terraform = TerraformRunner::new(Arc::new(mock), ".");

        let active = terraform.active_workspaces().await.unwrap();
        assert_eq!(active, vec!["web-01".to_string(), "web-02".to_string()]);
    }

    #[tokio::test]
    async fn workspace_list_failure_is_an_error() {
        let mock = MockRunner::new();
        mock.push_response(MockResponse::failure(1, "no backend"));
        let terraform = TerraformRunner::new(Arc::new(mock), ".");

        let err = terraform.workspace_list().await.unwrap_err();
        assert!(matches!(err, IacError::WorkspaceFailed(_)));
    }

    #[tokio::test]
    async fn ensure_workspace_creates_missing_workspace() {
        let mock = MockRunner::new();
        mock.push_response(MockResponse::success("* default\n"));
        mock.push_response(MockResponse::success("Created workspace"));
        let terraform = TerraformRunner::new(Arc::new(mock.clone()), ".");

        terraform.ensure_workspace("web-01").await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[1].args, vec!["workspace", "new", "web-01"]);
    }

    #[tokio::test]
    async fn ensure_workspace_selects_existing_workspace() {
        let mock = MockRunner::new();
        mock.push_response(MockResponse::success("* default\n  web-01\n"));
        mock.push_response(MockResponse::success("Switched"));
        let terraform = TerraformRunner::new(Arc::new(mock.clone()), ".");

        terraform.ensure_workspace("web-01").await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[1].args, vec!["workspace", "select", "web-01"]);
    }

    #[tokio::test]
    async fn apply_passes_var_file_and_auto_approve() {
        let mock = MockRunner::new();
        let terraform = TerraformRunner::new(Arc::new(mock.clone()), ".");

        terraform.apply(Path::new("tfvars/web-01.tfvars")).await.unwrap();

        let calls = mock.calls();
        assert_eq!(
            calls[0].args,
            vec!["apply", "-var-file=tfvars/web-01.tfvars", "-auto-approve"]
        );
    }
}
