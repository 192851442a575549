//! The repository handle and the value types it hands out
//!
//! - `core`: [`Repository`], its builder and the read/write traits
//! - `factories`: injectable collaborators (remotes, trees, commits, fetch)
//! - `oid`, `signature`: engine-independent value types

pub mod core;
pub mod factories;
pub mod oid;
pub mod signature;

pub use self::core::{ReadRepository, Repository, RepositoryBuilder, WorkingRepository};
pub use factories::{Committer, Fetcher, RemoteFactory, RemotesFactory, TreeFactory};
pub use oid::Oid;
pub use signature::Signature;
