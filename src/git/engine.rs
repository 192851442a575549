//! The capability boundary onto libgit2.
//!
//! Every `git2` call goes through [`Engine`]; the value types of this crate
//! ([`Oid`], [`Signature`](crate::git::Signature)) are converted to their
//! native forms only here. Topical operations live next to the code that
//! uses them (`impl Engine` blocks in `branches`, `commits` and `remotes`).

use std::fmt;
use std::path::{Path, PathBuf};

use git2::ErrorCode;
use tracing::debug;

use crate::git::error::{Error, Result};
use crate::git::repository::oid::Oid;

pub const HEAD: &str = "HEAD";

pub struct Engine {
    path: PathBuf,
    repo: git2::Repository,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine").field("path", &self.path).finish()
    }
}

impl Engine {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening repository");
        let repo = git2::Repository::open(path).map_err(|source| Error::NotARepo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Access to the underlying libgit2 handle.
    pub(crate) fn raw(&self) -> &git2::Repository {
        &self.repo
    }

    /// Look up a string configuration value. Missing and empty values are
    /// both reported as `None`.
    pub fn config_string(&self, key: &str) -> Result<Option<String>> {
        let config = self.repo.config()?;
        match config.get_string(key) {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn index(&self) -> Result<git2::Index> {
        Ok(self.repo.index()?)
    }

    /// Confirm `oid` names a tree object.
    pub fn find_tree(&self, oid: &Oid) -> Result<()> {
        self.repo.find_tree(oid.to_git2()?)?;
        Ok(())
    }

    /// Resolve HEAD (following symbolic refs) to the commit it points at.
    pub fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.find_reference(HEAD)?;
        let resolved = head.resolve().map_err(|e| not_found_as_ref(e, HEAD))?;
        resolved
            .target()
            .map(Oid::from_git2)
            .ok_or_else(|| Error::RefNotFound {
                name: HEAD.to_string(),
            })
    }

    /// The ref HEAD points to, or `None` when HEAD is detached.
    pub fn head_symbolic_target(&self) -> Result<Option<String>> {
        let head = self.repo.find_reference(HEAD)?;
        Ok(head.symbolic_target().map(str::to_string))
    }

    /// Resolve a ref to the object it points at. `None` if the ref, or the
    /// ref a symbolic ref points to, is absent.
    pub fn resolve_ref(&self, refname: &str) -> Result<Option<Oid>> {
        let resolved = self
            .repo
            .find_reference(refname)
            .and_then(|reference| reference.resolve());
        match resolved {
            Ok(reference) => Ok(reference.target().map(Oid::from_git2)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

pub(crate) fn not_found_as_ref(err: git2::Error, name: &str) -> Error {
    if err.code() == ErrorCode::NotFound {
        Error::RefNotFound {
            name: name.to_string(),
        }
    } else {
        err.into()
    }
}
