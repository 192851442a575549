use serde::{Deserialize, Serialize};

use crate::git::{ReadRepository, Result};

pub const INTEGRATION_BRANCH_KEY: &str = "gitProcess.integrationBranch";
pub const REMOTE_NAME_KEY: &str = "gitProcess.remoteName";
pub const DEFAULT_INTEGRATION_BRANCH: &str = "master";

/// Workflow settings read from git configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Branch new feature branches start from
    pub integration_branch: String,
    /// Remote to use instead of picking one from the configured remotes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            integration_branch: DEFAULT_INTEGRATION_BRANCH.to_string(),
            remote_name: None,
        }
    }
}

/// Load settings from the repository's configuration, falling back to the
/// defaults for anything unset or empty.
pub fn load(repo: &dyn ReadRepository) -> Result<Settings> {
    let defaults = Settings::default();

    Ok(Settings {
        integration_branch: repo
            .config_value(INTEGRATION_BRANCH_KEY)?
            .unwrap_or(defaults.integration_branch),
        remote_name: repo.config_value(REMOTE_NAME_KEY)?,
    })
}
