//! Git operations module
//!
//! Every libgit2 call goes through [`Engine`]. The rest is split by topic:
//!
//! - `repository`: the [`Repository`] handle, its factories and value types
//! - `index`: staging and tree snapshots
//! - `commits`: the commit-creation protocol
//! - `remotes`: remotes, fetch and prune
//! - `branches`: local branches and checkout

pub mod branches;
pub mod commits;
pub mod engine;
pub mod error;
pub mod index;
pub mod remotes;
pub mod repository;

pub use branches::{Branch, CheckoutOptions};
pub use commits::{Commit, CommitInfo, NewCommit};
pub use engine::Engine;
pub use error::{Error, ErrorKind, Result};
pub use index::{add_paths, Index, Tree};
pub use remotes::{FetchOptions, Remote, Remotes};
pub use repository::{
    Committer, Fetcher, Oid, ReadRepository, RemoteFactory, RemotesFactory, Repository,
    RepositoryBuilder, Signature, TreeFactory, WorkingRepository,
};
