pub mod checkout;
pub mod commit;
pub mod fetch;
pub mod new_feature_branch;

use anyhow::{Context, Result};
use git_process::Repository;
use serde::Serialize;

pub(crate) fn open_repository() -> Result<Repository> {
    Repository::open(".").context("Failed to open repository in current directory")
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
