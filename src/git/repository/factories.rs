//! Pluggable collaborators of a [`Repository`](super::core::Repository).
//!
//! Each trait is implemented by a libgit2-backed type (wired by default in
//! [`RepositoryBuilder`](super::core::RepositoryBuilder)) and by any closure
//! of the matching shape, so tests can substitute behavior inline.

use crate::git::commits::{Commit, NewCommit};
use crate::git::error::Result;
use crate::git::index::Tree;
use crate::git::remotes::{FetchOptions, Remote, Remotes};
use crate::git::repository::oid::Oid;

/// Acquires a [`Remote`] by name.
pub trait RemoteFactory {
    fn remote(&self, name: &str) -> Result<Box<dyn Remote>>;
}

/// Enumerates every remote the repository knows.
pub trait RemotesFactory {
    fn remotes(&self) -> Result<Remotes>;
}

/// Turns a tree id into a [`Tree`] handle.
pub trait TreeFactory {
    fn tree(&self, oid: &Oid) -> Result<Tree>;
}

/// Creates a commit and advances a ref to it.
pub trait Committer {
    fn commit(&self, request: NewCommit) -> Result<Commit>;
}

/// Brings the local repository up to date with a remote.
pub trait Fetcher {
    fn fetch(
        &self,
        options: &FetchOptions,
        remote_factory: &dyn RemoteFactory,
        remotes_factory: &dyn RemotesFactory,
    ) -> Result<()>;
}

impl<F> RemoteFactory for F
where
    F: Fn(&str) -> Result<Box<dyn Remote>>,
{
    fn remote(&self, name: &str) -> Result<Box<dyn Remote>> {
        self(name)
    }
}

impl<F> RemotesFactory for F
where
    F: Fn() -> Result<Remotes>,
{
    fn remotes(&self) -> Result<Remotes> {
        self()
    }
}

impl<F> TreeFactory for F
where
    F: Fn(&Oid) -> Result<Tree>,
{
    fn tree(&self, oid: &Oid) -> Result<Tree> {
        self(oid)
    }
}

impl<F> Committer for F
where
    F: Fn(NewCommit) -> Result<Commit>,
{
    fn commit(&self, request: NewCommit) -> Result<Commit> {
        self(request)
    }
}

impl<F> Fetcher for F
where
    F: Fn(&FetchOptions, &dyn RemoteFactory, &dyn RemotesFactory) -> Result<()>,
{
    fn fetch(
        &self,
        options: &FetchOptions,
        remote_factory: &dyn RemoteFactory,
        remotes_factory: &dyn RemotesFactory,
    ) -> Result<()> {
        self(options, remote_factory, remotes_factory)
    }
}
