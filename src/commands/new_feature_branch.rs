use anyhow::{Context, Result};
use console::style;
use git_process::config;
use git_process::workflows::{create_feature_branch, FeatureBranchOptions};

use super::{open_repository, print_json};

pub fn handle_new_feature_branch(
    name: &str,
    local: bool,
    integration_branch: Option<String>,
    remote: Option<String>,
    json: bool,
) -> Result<()> {
    let repo = open_repository()?;
    let settings = config::load(&repo).context("Failed to read configuration")?;

    let mut options = FeatureBranchOptions::from(&settings);
    options.local_only = local;
    if let Some(branch) = integration_branch {
        options.integration_branch = branch;
    }
    if remote.is_some() {
        options.remote_name = remote;
    }

    let branch = create_feature_branch(&repo, name, &options)
        .with_context(|| format!("Failed to create feature branch '{name}'"))?;

    if json {
        return print_json(&branch);
    }

    println!(
        "{} Created {} from {}",
        style("✓").green().bold(),
        style(&branch.name).cyan(),
        style(&options.integration_branch).cyan()
    );
    Ok(())
}
