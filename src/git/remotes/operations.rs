use std::fmt;
use std::rc::Rc;

use git2::{Direction, ErrorCode};
use tracing::{debug, error, info};

use crate::git::engine::Engine;
use crate::git::error::{Error, Result};
use crate::git::repository::factories::{RemoteFactory, RemotesFactory};

/// A named connection to another repository.
pub trait Remote {
    fn name(&self) -> &str;

    /// Retrieve the latest objects and refs from the remote.
    fn fetch(&self) -> Result<()>;

    /// Remove tracking refs for branches the remote no longer has.
    fn prune(&self) -> Result<()>;
}

impl fmt::Debug for dyn Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Remote").field("name", &self.name()).finish()
    }
}

/// Ordered collection of remotes.
#[derive(Debug, Default)]
pub struct Remotes(Vec<Box<dyn Remote>>);

impl Remotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, remote: Box<dyn Remote>) {
        self.0.push(remote);
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.get_by_name(name).is_some()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&dyn Remote> {
        self.0
            .iter()
            .find(|remote| remote.name() == name)
            .map(|remote| remote.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|remote| remote.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Remote> {
        self.0.iter().map(|remote| remote.as_ref())
    }
}

impl From<Vec<Box<dyn Remote>>> for Remotes {
    fn from(remotes: Vec<Box<dyn Remote>>) -> Self {
        Self(remotes)
    }
}

/// [`Remote`] backed by a libgit2 remote of the same name.
///
/// The libgit2 remote is looked up on every call, so a `GitRemote` for a
/// name that is not configured only fails once it is used.
pub struct GitRemote {
    engine: Rc<Engine>,
    name: String,
}

impl GitRemote {
    pub fn new(engine: Rc<Engine>, name: impl Into<String>) -> Self {
        Self {
            engine,
            name: name.into(),
        }
    }
}

impl Remote for GitRemote {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<()> {
        info!(remote = %self.name, "fetching");
        self.engine.fetch_remote(&self.name).map_err(|e| {
            error!(remote = %self.name, error = %e, "could not fetch");
            e
        })
    }

    fn prune(&self) -> Result<()> {
        self.engine.prune_remote(&self.name)
    }
}

pub struct GitRemoteFactory {
    engine: Rc<Engine>,
}

impl GitRemoteFactory {
    pub fn new(engine: Rc<Engine>) -> Self {
        Self { engine }
    }
}

impl RemoteFactory for GitRemoteFactory {
    fn remote(&self, name: &str) -> Result<Box<dyn Remote>> {
        Ok(Box::new(GitRemote::new(Rc::clone(&self.engine), name)))
    }
}

/// Lists the remotes configured in the repository.
pub struct GitRemotesFactory {
    engine: Rc<Engine>,
    remote_factory: GitRemoteFactory,
}

impl GitRemotesFactory {
    pub fn new(engine: Rc<Engine>) -> Self {
        let remote_factory = GitRemoteFactory::new(Rc::clone(&engine));
        Self {
            engine,
            remote_factory,
        }
    }
}

impl RemotesFactory for GitRemotesFactory {
    fn remotes(&self) -> Result<Remotes> {
        let names = self.engine.remote_names()?;
        debug!(?names, "remotes");

        let mut remotes = Remotes::new();
        for name in names {
            remotes.push(self.remote_factory.remote(&name)?);
        }
        Ok(remotes)
    }
}

impl Engine {
    pub fn remote_names(&self) -> Result<Vec<String>> {
        let remotes = self.raw().remotes()?;
        Ok(remotes.iter().flatten().map(str::to_string).collect())
    }

    fn find_remote(&self, name: &str) -> Result<git2::Remote<'_>> {
        self.raw().find_remote(name).map_err(|e| match e.code() {
            ErrorCode::NotFound | ErrorCode::InvalidSpec => Error::RemoteNotFound {
                name: name.to_string(),
            },
            _ => e.into(),
        })
    }

    /// Fetch with the remote's configured refspecs.
    pub(crate) fn fetch_remote(&self, name: &str) -> Result<()> {
        let mut remote = self.find_remote(name)?;
        remote.fetch(&[] as &[&str], None, None)?;

        let stats = remote.stats();
        debug!(
            remote = name,
            received = stats.received_objects(),
            total = stats.total_objects(),
            "fetch finished"
        );
        Ok(())
    }

    pub(crate) fn prune_remote(&self, name: &str) -> Result<()> {
        let mut remote = self.find_remote(name)?;
        remote.connect(Direction::Fetch)?;
        let pruned = remote.prune(None);
        remote.disconnect()?;
        pruned?;
        Ok(())
    }
}
