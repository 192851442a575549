use anyhow::{Context, Result};
use console::style;
use git_process::config;
use git_process::git::{FetchOptions, WorkingRepository};

use super::{open_repository, print_json};

pub fn handle_fetch(remote: Option<&str>, prune: bool, json: bool) -> Result<()> {
    let repo = open_repository()?;
    let settings = config::load(&repo).context("Failed to read configuration")?;

    let options = FetchOptions {
        remote_name: remote.map(str::to_string).or(settings.remote_name),
        prune,
    };
    repo.fetch(&options).context("Fetch failed")?;

    if json {
        return print_json(&options);
    }

    match &options.remote_name {
        Some(name) => println!(
            "{} Fetched from {}",
            style("✓").green().bold(),
            style(name).cyan()
        ),
        None => println!("{} Fetched", style("✓").green().bold()),
    }
    if prune {
        println!("  {} stale tracking branches pruned", style("•").dim());
    }
    Ok(())
}
