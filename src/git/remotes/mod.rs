//! Remotes and the fetch protocol
//!
//! - `operations`: the [`Remote`] capability, [`Remotes`] and their libgit2
//!   implementations
//! - `fetch`: remote selection, fetch and prune

pub mod fetch;
pub mod operations;

pub use fetch::{fetch, normalize_remote_name, FetchOptions, ProtocolFetcher, DEFAULT_REMOTE};
pub use operations::{GitRemote, GitRemoteFactory, GitRemotesFactory, Remote, Remotes};
