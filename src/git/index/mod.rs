//! Staging area and tree snapshots
//!
//! - `operations`: the [`Index`] capability, its libgit2 implementation and
//!   the [`add_paths`] convenience
//! - `tree`: [`Tree`] handles and the libgit2 [`TreeFactory`](crate::git::TreeFactory)

pub mod operations;
pub mod tree;

pub use operations::{add_paths, GitIndex, Index};
pub use tree::{GitTreeFactory, Tree};
