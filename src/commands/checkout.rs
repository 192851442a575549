use anyhow::{bail, Context, Result};
use console::style;
use git_process::git::{CheckoutOptions, ErrorKind, ReadRepository, WorkingRepository};
use inquire::Select;

use super::{open_repository, print_json};

pub fn handle_checkout(branch: Option<&str>, json: bool) -> Result<()> {
    let repo = open_repository()?;

    let target = match branch {
        Some(name) => name.to_string(),
        None => pick_branch(&repo)?,
    };

    let branch = match repo.checkout(&CheckoutOptions::new(target.as_str())) {
        Ok(branch) => branch,
        Err(e) if e.kind() == ErrorKind::Conflict => {
            eprintln!(
                "{} Local changes would be overwritten; commit or stash them first",
                style("⚠").yellow().bold()
            );
            return Err(e).context(format!("Cannot switch to '{target}'"));
        }
        Err(e) => return Err(e).context(format!("Cannot switch to '{target}'")),
    };

    if json {
        return print_json(&branch);
    }

    println!(
        "{} Switched to branch: {}",
        style("✓").green().bold(),
        style(&branch.name).cyan()
    );
    Ok(())
}

fn pick_branch(repo: &dyn ReadRepository) -> Result<String> {
    let mut branches = repo.list_branches().context("Failed to list branches")?;
    if branches.is_empty() {
        bail!("No branches found");
    }
    branches.sort();

    Select::new("Select a branch:", branches)
        .prompt()
        .context("Selection cancelled")
}
