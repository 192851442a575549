use std::cell::RefCell;
use std::rc::Rc;

use crate::git::error::Result;
use crate::git::remotes::{Remote, Remotes};
use crate::git::repository::factories::{RemoteFactory, RemotesFactory};

/// Shared record of calls made against stubbed collaborators.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.0.borrow_mut().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }

    /// A [`RemoteFactory`] that records "remote NAME" and builds the remote
    /// with `make`.
    pub fn remote_factory<F>(&self, make: F) -> impl RemoteFactory + 'static
    where
        F: Fn(&str, &CallLog) -> Box<dyn Remote> + 'static,
    {
        let log = self.clone();
        move |name: &str| -> Result<Box<dyn Remote>> {
            log.record(format!("remote {name}"));
            Ok(make(name, &log))
        }
    }

    /// A [`RemotesFactory`] that records "remotes" and lists stub remotes.
    pub fn remotes_factory(&self, names: &[&str]) -> impl RemotesFactory + 'static {
        let log = self.clone();
        let names: Vec<String> = names.iter().map(|name| name.to_string()).collect();
        move || -> Result<Remotes> {
            log.record("remotes");
            Ok(Remotes::from(
                names
                    .iter()
                    .map(|name| Box::new(RemoteStub::new(name)) as Box<dyn Remote>)
                    .collect::<Vec<_>>(),
            ))
        }
    }
}

/// Remote that succeeds and records "fetch NAME" / "prune NAME".
#[derive(Debug, Clone)]
pub struct RemoteStub {
    name: String,
    log: CallLog,
}

impl RemoteStub {
    pub fn new(name: &str) -> Self {
        Self::logged(name, &CallLog::default())
    }

    pub fn logged(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
        }
    }
}

impl Remote for RemoteStub {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<()> {
        self.log.record(format!("fetch {}", self.name));
        Ok(())
    }

    fn prune(&self) -> Result<()> {
        self.log.record(format!("prune {}", self.name));
        Ok(())
    }
}

/// Records the fetch, then fails it with "Boom".
#[derive(Debug)]
pub struct FetchFailStub(RemoteStub);

impl FetchFailStub {
    pub fn new(inner: RemoteStub) -> Self {
        Self(inner)
    }
}

impl Remote for FetchFailStub {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn fetch(&self) -> Result<()> {
        self.0.fetch()?;
        Err(git2::Error::from_str("Boom").into())
    }

    fn prune(&self) -> Result<()> {
        self.0.prune()
    }
}

/// Fetches fine, fails to prune.
#[derive(Debug)]
pub struct PruneFailStub(RemoteStub);

impl PruneFailStub {
    pub fn new(inner: RemoteStub) -> Self {
        Self(inner)
    }
}

impl Remote for PruneFailStub {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn fetch(&self) -> Result<()> {
        self.0.fetch()
    }

    fn prune(&self) -> Result<()> {
        self.0.prune()?;
        Err(git2::Error::from_str("prune failed").into())
    }
}
