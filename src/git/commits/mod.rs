//! Commit values and the commit-creation protocol

pub mod operations;

pub use operations::{create_commit, Commit, CommitInfo, GitCommitter, NewCommit};
