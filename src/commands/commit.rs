use anyhow::{Context, Result};
use console::style;
use git_process::git::{add_paths, Error, NewCommit, ReadRepository, WorkingRepository};

use super::{open_repository, print_json};

pub fn handle_commit(message: &str, paths: &[String], json: bool) -> Result<()> {
    let repo = open_repository()?;

    let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
    let tree = add_paths(&repo, &paths).context("Failed to stage changes")?;

    let mut request = NewCommit::new(message, tree);
    match repo.head() {
        Ok(head) => request = request.parent(head),
        Err(Error::RefNotFound { .. }) => {}
        Err(e) => return Err(e).context("Failed to resolve HEAD"),
    }

    let commit = repo.create_commit(request).context("Failed to create commit")?;
    let oid = commit.oid().context("Commit was not written")?;
    let info = repo
        .engine()
        .commit_info(oid)
        .context("Failed to read back commit")?;

    if json {
        return print_json(&info);
    }

    println!(
        "{} [{}] {}",
        style("✓").green().bold(),
        style(info.oid.short(7)).yellow(),
        info.message.lines().next().unwrap_or_default()
    );
    Ok(())
}
