use std::path::Path;

use tracing::{debug, warn};

use crate::git::error::Result;
use crate::git::index::tree::Tree;
use crate::git::repository::core::ReadRepository;
use crate::git::repository::oid::Oid;

/// The staging area of a working copy.
pub trait Index {
    /// Stage each path in order, stopping at the first failure. Paths staged
    /// before the failure stay staged.
    fn add_by_path(&mut self, paths: &[&str]) -> Result<()>;

    /// Write the staged state out as a tree object.
    fn write_tree(&mut self) -> Result<Tree>;
}

/// [`Index`] over the repository's libgit2 index.
pub struct GitIndex {
    index: git2::Index,
}

impl GitIndex {
    pub(crate) fn new(index: git2::Index) -> Self {
        Self { index }
    }
}

impl Index for GitIndex {
    fn add_by_path(&mut self, paths: &[&str]) -> Result<()> {
        for path in paths {
            debug!(path, "staging");
            if let Err(e) = self.index.add_path(Path::new(path)) {
                warn!(path, error = %e, "could not stage path");
                return Err(e.into());
            }
        }
        Ok(())
    }

    fn write_tree(&mut self) -> Result<Tree> {
        // Persist first so later checkouts, which re-read the index file,
        // see what was staged.
        self.index.write()?;
        let oid = Oid::from_git2(self.index.write_tree()?);
        debug!(tree = %oid.short(7), "wrote tree");
        Ok(Tree::new(oid))
    }
}

/// Stage `paths` in `repo`'s index and write the resulting tree.
///
/// Nothing is written when staging fails.
pub fn add_paths(repo: &dyn ReadRepository, paths: &[&str]) -> Result<Tree> {
    let mut index = repo.index()?;
    index.add_by_path(paths)?;
    index.write_tree()
}
