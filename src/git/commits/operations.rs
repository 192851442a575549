use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use tracing::info;

use crate::git::engine::{Engine, HEAD};
use crate::git::error::{Error, Result};
use crate::git::index::Tree;
use crate::git::repository::factories::Committer;
use crate::git::repository::oid::Oid;
use crate::git::repository::signature::Signature;

/// A history node. A commit without an oid is "unresolved" and is ignored
/// when used as a parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Commit {
    oid: Option<Oid>,
}

impl Commit {
    pub fn new(oid: Oid) -> Self {
        Self { oid: Some(oid) }
    }

    pub fn unresolved() -> Self {
        Self { oid: None }
    }

    pub fn oid(&self) -> Option<&Oid> {
        self.oid.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.oid.is_some()
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.oid {
            Some(oid) => write!(f, "Commit{{{oid}}}"),
            None => f.write_str("Commit{unresolved}"),
        }
    }
}

/// What the object database holds for a commit.
#[derive(Debug, Clone, Serialize)]
pub struct CommitInfo {
    pub oid: Oid,
    pub message: String,
    pub author: Signature,
    pub committer: Signature,
    pub tree: Oid,
    pub parents: Vec<Oid>,
}

/// Everything needed to create a commit.
///
/// Unset fields are defaulted by [`create_commit`]: the committer from the
/// configured identity, the author from the committer, the ref from HEAD.
#[derive(Debug, Clone, Default)]
pub struct NewCommit {
    pub refname: Option<String>,
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
    pub message: String,
    pub tree: Option<Tree>,
    pub parents: Vec<Commit>,
}

impl NewCommit {
    pub fn new(message: impl Into<String>, tree: Tree) -> Self {
        Self {
            message: message.into(),
            tree: Some(tree),
            ..Self::default()
        }
    }

    pub fn refname(mut self, refname: impl Into<String>) -> Self {
        self.refname = Some(refname.into());
        self
    }

    pub fn author(mut self, author: Signature) -> Self {
        self.author = Some(author);
        self
    }

    pub fn committer(mut self, committer: Signature) -> Self {
        self.committer = Some(committer);
        self
    }

    pub fn parent(mut self, parent: Commit) -> Self {
        self.parents.push(parent);
        self
    }
}

/// Create a commit object and advance its ref to it.
///
/// The tree is checked before anything touches the engine. Engine errors
/// are returned as-is and nothing is retried: a commit whose creation
/// failed ambiguously may already exist.
pub fn create_commit(engine: &Engine, request: NewCommit) -> Result<Commit> {
    let NewCommit {
        refname,
        author,
        committer,
        message,
        tree,
        parents,
    } = request;

    let tree = tree.ok_or(Error::MissingTree)?;

    let committer = match committer.filter(|sig| !sig.is_unset()) {
        Some(sig) => sig,
        None => engine.default_signature()?,
    };
    let author = author
        .filter(|sig| !sig.is_unset())
        .unwrap_or_else(|| committer.clone());

    // A symbolic ref such as HEAD advances the branch it points to, creating
    // it if it does not exist yet.
    let refname = refname
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| HEAD.to_string());

    let parents: Vec<Oid> = parents.iter().filter_map(Commit::oid).cloned().collect();

    info!(
        refname = %refname,
        committer = %committer,
        author = %author,
        parents = parents.len(),
        "creating commit"
    );

    let oid = engine.create_commit(&refname, &author, &committer, &message, tree.oid(), &parents)?;
    Ok(Commit::new(oid))
}

/// Creates commits in the repository's object database.
pub struct GitCommitter {
    engine: Rc<Engine>,
}

impl GitCommitter {
    pub fn new(engine: Rc<Engine>) -> Self {
        Self { engine }
    }
}

impl Committer for GitCommitter {
    fn commit(&self, request: NewCommit) -> Result<Commit> {
        create_commit(&self.engine, request)
    }
}

impl Engine {
    pub(crate) fn create_commit(
        &self,
        refname: &str,
        author: &Signature,
        committer: &Signature,
        message: &str,
        tree: &Oid,
        parents: &[Oid],
    ) -> Result<Oid> {
        let repo = self.raw();
        let tree = repo.find_tree(tree.to_git2()?)?;

        let mut parent_commits = Vec::with_capacity(parents.len());
        for parent in parents {
            parent_commits.push(repo.find_commit(parent.to_git2()?)?);
        }
        let parent_refs: Vec<&git2::Commit<'_>> = parent_commits.iter().collect();

        let oid = repo.commit(
            Some(refname),
            &author.to_git2()?,
            &committer.to_git2()?,
            message,
            &tree,
            &parent_refs,
        )?;

        Ok(Oid::from_git2(oid))
    }

    pub fn commit_info(&self, oid: &Oid) -> Result<CommitInfo> {
        let commit = self.raw().find_commit(oid.to_git2()?)?;
        let author = commit.author();
        let committer = commit.committer();
        let info = CommitInfo {
            oid: oid.clone(),
            message: commit.message().unwrap_or_default().to_string(),
            author: Signature::from_git2(&author),
            committer: Signature::from_git2(&committer),
            tree: Oid::from_git2(commit.tree_id()),
            parents: commit.parent_ids().map(Oid::from_git2).collect(),
        };
        Ok(info)
    }
}
