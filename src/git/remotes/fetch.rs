use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::git::error::Result;
use crate::git::remotes::operations::Remotes;
use crate::git::repository::factories::{Fetcher, RemoteFactory, RemotesFactory};

pub const DEFAULT_REMOTE: &str = "origin";

/// What to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Remote to fetch from, e.g. "origin". When unset the remote is picked
    /// from the repository's remotes.
    pub remote_name: Option<String>,

    /// Remove tracking branches for branches the remote no longer has.
    pub prune: bool,
}

impl FetchOptions {
    pub fn from_remote(name: impl Into<String>) -> Self {
        Self {
            remote_name: Some(name.into()),
            prune: false,
        }
    }

    pub fn with_prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }
}

/// Update the local repository with the contents of a remote.
///
/// With an explicit remote name the remote list is never consulted.
/// Otherwise "origin" is used when the repository has it; when no remote
/// is selected this is a no-op. Failures are returned as-is, and pruning
/// only happens after a successful fetch.
pub fn fetch(
    options: &FetchOptions,
    remote_factory: &dyn RemoteFactory,
    remotes_factory: &dyn RemotesFactory,
) -> Result<()> {
    let remote_name = match options.remote_name.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => Some(name.to_string()),
        None => {
            let remotes = remotes_factory.remotes().map_err(|e| {
                warn!(error = %e, "could not get remote names");
                e
            })?;
            normalize_remote_name(None, &remotes)
        }
    };

    let Some(remote_name) = remote_name else {
        info!("no remote to fetch from");
        return Ok(());
    };

    let remote = remote_factory.remote(&remote_name).map_err(|e| {
        warn!(remote = %remote_name, error = %e, "could not resolve remote");
        e
    })?;

    if let Err(e) = remote.fetch() {
        error!(remote = %remote_name, "could not fetch");
        return Err(e);
    }
    info!(remote = %remote_name, "fetched");

    if options.prune {
        info!(remote = %remote.name(), "pruning");
        remote.prune()?;
    }

    Ok(())
}

/// Pick the remote to use when none was named.
///
/// An explicit, non-empty name always wins. Otherwise "origin" is chosen if
/// present; any other remote set yields `None`.
// TODO: choose a default among non-"origin" remotes (sole remote, or the
// current branch's upstream remote) once the selection rule is agreed.
pub fn normalize_remote_name(name: Option<&str>, remotes: &Remotes) -> Option<String> {
    match name.filter(|name| !name.is_empty()) {
        Some(name) => Some(name.to_string()),
        None if remotes.contains_name(DEFAULT_REMOTE) => {
            info!("defaulting remote name to \"{DEFAULT_REMOTE}\"");
            Some(DEFAULT_REMOTE.to_string())
        }
        None => None,
    }
}

/// The default [`Fetcher`]: runs [`fetch`] against the repository's remotes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProtocolFetcher;

impl Fetcher for ProtocolFetcher {
    fn fetch(
        &self,
        options: &FetchOptions,
        remote_factory: &dyn RemoteFactory,
        remotes_factory: &dyn RemotesFactory,
    ) -> Result<()> {
        fetch(options, remote_factory, remotes_factory)
    }
}
