use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::config::{Settings, DEFAULT_INTEGRATION_BRANCH};
use crate::git::remotes::DEFAULT_REMOTE;
use crate::git::{Branch, CheckoutOptions, Error, FetchOptions, Oid, Result, WorkingRepository};

/// Placeholder branch that is removed once real work starts elsewhere.
pub const PARKING_BRANCH: &str = "_parking_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureBranchOptions {
    pub integration_branch: String,
    /// Remote to fetch from; picked from the repository's remotes if unset.
    pub remote_name: Option<String>,
    /// Skip talking to the remote and branch off the local integration branch.
    pub local_only: bool,
}

impl Default for FeatureBranchOptions {
    fn default() -> Self {
        Self {
            integration_branch: DEFAULT_INTEGRATION_BRANCH.to_string(),
            remote_name: None,
            local_only: false,
        }
    }
}

impl From<&Settings> for FeatureBranchOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            integration_branch: settings.integration_branch.clone(),
            remote_name: settings.remote_name.clone(),
            local_only: false,
        }
    }
}

/// Create `name` from the latest integration branch and check it out.
///
/// Unless `local_only`, the remote is fetched (with pruning) first and the
/// new branch starts at its copy of the integration branch. The upstream of
/// the new branch is the integration branch it started from. Leaving
/// [`PARKING_BRANCH`] deletes it.
pub fn create_feature_branch(
    repo: &dyn WorkingRepository,
    name: &str,
    options: &FeatureBranchOptions,
) -> Result<Branch> {
    let span = info_span!("feature_branch", name);
    let _guard = span.enter();

    let previous = repo.current_branch()?;

    if !options.local_only {
        let fetch = FetchOptions {
            remote_name: options.remote_name.clone(),
            prune: true,
        };
        repo.fetch(&fetch)?;
    }

    let (base, upstream) = find_base(repo, options)?;
    info!(base = %base.short(7), %upstream, "creating feature branch");

    repo.create_branch(name, &base, Some(&upstream))?;
    let branch = repo.checkout(&CheckoutOptions::new(name))?;

    if let Some(previous) = previous.filter(|b| b.name == PARKING_BRANCH && b.name != name) {
        debug!("removing {}", previous.name);
        repo.delete_branch(&previous.name)?;
    }

    Ok(branch)
}

/// Start commit and upstream name for a new feature branch.
fn find_base(
    repo: &dyn WorkingRepository,
    options: &FeatureBranchOptions,
) -> Result<(Oid, String)> {
    let integration = options.integration_branch.as_str();

    if !options.local_only {
        let remote = options
            .remote_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_REMOTE);
        let tracking = format!("{remote}/{integration}");
        if let Some(oid) = repo.resolve_ref(&format!("refs/remotes/{tracking}"))? {
            return Ok((oid, tracking));
        }
        debug!(%tracking, "no remote integration branch, using local");
    }

    match repo.resolve_ref(&format!("refs/heads/{integration}"))? {
        Some(oid) => Ok((oid, integration.to_string())),
        None => Err(Error::BranchNotFound {
            name: integration.to_string(),
        }),
    }
}
