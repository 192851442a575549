//! Branch lifecycle automation on top of libgit2.
//!
//! A [`Repository`](git::Repository) exposes fetch, checkout and commit
//! creation against a working copy; [`workflows`] compose those into
//! higher-level operations such as starting a feature branch.

pub mod config;
pub mod git;
pub mod workflows;

#[cfg(test)]
mod test_utils;

pub use config::Settings;
pub use git::{Error, ErrorKind, Repository, Result};
