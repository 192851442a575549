use git2::{BranchType, ErrorCode};
use serde::Serialize;
use tracing::{debug, info};

use crate::git::engine::Engine;
use crate::git::error::{Error, Result};
use crate::git::repository::oid::Oid;

const BRANCH_PREFIX: &str = "refs/heads/";

/// A local branch and the commit it points to. `oid` is `None` for an
/// unborn branch (HEAD of a repository without commits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub name: String,
    pub oid: Option<Oid>,
}

impl Branch {
    pub fn refname(&self) -> String {
        format!("{BRANCH_PREFIX}{}", self.name)
    }
}

/// The branch HEAD points to, `None` when HEAD is detached.
pub fn current_branch(engine: &Engine) -> Result<Option<Branch>> {
    let Some(target) = engine.head_symbolic_target()? else {
        return Ok(None);
    };
    let Some(name) = target.strip_prefix(BRANCH_PREFIX) else {
        return Ok(None);
    };
    Ok(Some(Branch {
        name: name.to_string(),
        oid: engine.resolve_ref(&target)?,
    }))
}

impl Engine {
    pub fn list_branches(&self) -> Result<Vec<String>> {
        let mut branches = Vec::new();

        for branch in self.raw().branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                branches.push(name.to_string());
            }
        }

        Ok(branches)
    }

    /// The commit a local branch points to.
    pub fn branch_target(&self, name: &str) -> Result<Oid> {
        let branch = self
            .raw()
            .find_branch(name, BranchType::Local)
            .map_err(|e| branch_not_found(e, name))?;
        let resolved = branch.get().resolve()?;
        resolved
            .target()
            .map(Oid::from_git2)
            .ok_or_else(|| Error::BranchNotFound {
                name: name.to_string(),
            })
    }

    pub(crate) fn create_branch(
        &self,
        name: &str,
        target: &Oid,
        upstream: Option<&str>,
    ) -> Result<Branch> {
        let repo = self.raw();
        let commit = repo.find_commit(target.to_git2()?)?;

        let mut branch = repo.branch(name, &commit, false).map_err(|e| {
            if e.code() == ErrorCode::Exists {
                Error::BranchExists {
                    name: name.to_string(),
                }
            } else {
                e.into()
            }
        })?;
        info!(branch = name, target = %target.short(7), "created branch");

        if let Some(upstream) = upstream {
            debug!(branch = name, upstream, "setting upstream");
            branch.set_upstream(Some(upstream))?;
        }

        Ok(Branch {
            name: name.to_string(),
            oid: Some(target.clone()),
        })
    }

    pub(crate) fn delete_branch(&self, name: &str) -> Result<()> {
        let mut branch = self
            .raw()
            .find_branch(name, BranchType::Local)
            .map_err(|e| branch_not_found(e, name))?;
        branch.delete()?;
        info!(branch = name, "deleted branch");
        Ok(())
    }

    /// Upstream of a local branch as `remote/branch` or `branch`.
    pub fn branch_upstream(&self, name: &str) -> Result<Option<String>> {
        let branch = self
            .raw()
            .find_branch(name, BranchType::Local)
            .map_err(|e| branch_not_found(e, name))?;
        match branch.upstream() {
            Ok(upstream) => Ok(upstream.name()?.map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Point HEAD at a local branch.
    pub(crate) fn set_head_to_branch(&self, name: &str) -> Result<()> {
        self.raw().set_head(&format!("{BRANCH_PREFIX}{name}"))?;
        Ok(())
    }

    /// Update the working tree and index to `target`, refusing to overwrite
    /// local modifications and recreating files that are missing.
    pub(crate) fn checkout_safe(&self, target: &Oid) -> Result<()> {
        if self.raw().is_bare() {
            return Ok(());
        }

        let object = self.raw().find_object(target.to_git2()?, None)?;
        let mut opts = git2::build::CheckoutBuilder::new();
        opts.safe().recreate_missing(true);

        self.raw()
            .checkout_tree(&object, Some(&mut opts))
            .map_err(|e| {
                if e.code() == ErrorCode::Conflict {
                    Error::Conflict {
                        message: e.message().to_string(),
                    }
                } else {
                    e.into()
                }
            })
    }
}

fn branch_not_found(err: git2::Error, name: &str) -> Error {
    if err.code() == ErrorCode::NotFound {
        Error::BranchNotFound {
            name: name.to_string(),
        }
    } else {
        err.into()
    }
}
