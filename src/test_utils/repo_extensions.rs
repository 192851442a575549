use std::path::Path;

use anyhow::{Context, Error};
use assert_fs::TempDir;

use crate::git::commits::{Commit, NewCommit};
use crate::git::index::add_paths;
use crate::git::repository::core::{ReadRepository, Repository, WorkingRepository};
use crate::git::Error as GitError;

fn init_repo(path: &Path, identity: (&str, &str)) {
    let mut opts = git2::RepositoryInitOptions::new();
    opts.initial_head("master");
    let raw = git2::Repository::init_opts(path, &opts).unwrap();

    // Written locally so a developer's global identity never leaks in; an
    // empty value reads as unset.
    let mut config = raw.config().unwrap();
    config.set_str("user.name", identity.0).unwrap();
    config.set_str("user.email", identity.1).unwrap();
}

/// Create a new temporary repository on `master` with user config set up
pub fn create_test_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().unwrap();
    init_repo(temp_dir.path(), ("Test User", "test@example.com"));
    let repo = Repository::open(temp_dir.path()).unwrap();
    (temp_dir, repo)
}

/// Create a new temporary repository whose identity reads as unset
pub fn create_test_repo_without_identity() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().unwrap();
    init_repo(temp_dir.path(), ("", ""));
    let repo = Repository::open(temp_dir.path()).unwrap();
    (temp_dir, repo)
}

/// Test-only trait that adds assertion methods to Repository
pub trait RepoAssertions {
    /// Assert that the current branch matches the expected branch name
    fn assert_current_branch(&self, branch_name: &str) -> &Self;

    /// Assert that a file exists in the working tree
    fn assert_file_exists(&self, filename: &str) -> &Self;

    /// Assert that a file does not exist in the working tree
    fn assert_file_not_exists(&self, filename: &str) -> &Self;

    /// Assert that commit messages reachable from HEAD match (newest first)
    fn assert_commit_messages(&self, expected_messages: &[&str]) -> &Self;
}

/// Test-only trait that adds test helper operations to Repository
pub trait RepoTestOperations {
    /// Write a file into the working tree (fluent)
    fn add_file(&self, filename: &str, content: &str) -> Result<&Self, Error>;

    /// Write, stage and commit a file on top of HEAD
    fn add_file_and_commit(
        &self,
        filename: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<Commit, Error>;

    fn add_remote(&self, name: &str, url: &str) -> Result<(), Error>;

    /// Add a remote pointing to another local Repository
    fn add_local_remote(&self, name: &str, other_repo: &Repository) -> Result<(), Error>;

    /// Force a local branch to `commit` without touching the working tree
    fn reset_branch(&self, name: &str, commit: &Commit) -> Result<(), Error>;

    fn detach_head(&self, commit: &Commit) -> Result<(), Error>;
}

impl RepoAssertions for Repository {
    fn assert_current_branch(&self, branch_name: &str) -> &Self {
        match self.current_branch() {
            Ok(Some(branch)) if branch.name == branch_name => {}
            Ok(Some(branch)) => panic!(
                "Current branch mismatch. Expected: '{branch_name}', Found: '{}'",
                branch.name
            ),
            Ok(None) => panic!("Expected branch '{branch_name}', but HEAD is detached"),
            Err(e) => panic!("Failed to get current branch: {e}"),
        }
        self
    }

    fn assert_file_exists(&self, filename: &str) -> &Self {
        let file_path = self.path().join(filename);
        if !file_path.exists() {
            panic!("Expected file '{filename}' to exist at path: {file_path:?}");
        }
        self
    }

    fn assert_file_not_exists(&self, filename: &str) -> &Self {
        let file_path = self.path().join(filename);
        if file_path.exists() {
            panic!("Expected file '{filename}' to not exist at path: {file_path:?}");
        }
        self
    }

    fn assert_commit_messages(&self, expected_messages: &[&str]) -> &Self {
        let raw = self.engine().raw();
        let mut revwalk = raw.revwalk().unwrap();
        revwalk.push_head().unwrap();
        let messages: Vec<String> = revwalk
            .map(|oid| {
                let commit = raw.find_commit(oid.unwrap()).unwrap();
                commit.message().unwrap_or_default().to_string()
            })
            .collect();

        if messages != expected_messages {
            panic!(
                "Commit messages mismatch. Expected: {expected_messages:?}, Found: {messages:?}"
            );
        }
        self
    }
}

impl RepoTestOperations for Repository {
    fn add_file(&self, filename: &str, content: &str) -> Result<&Self, Error> {
        let file_path = self.path().join(filename);
        std::fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file '{filename}'"))?;
        Ok(self)
    }

    fn add_file_and_commit(
        &self,
        filename: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<Commit, Error> {
        self.add_file(filename, content)?;
        let tree = add_paths(self, &[filename])?;

        let mut request = NewCommit::new(commit_message, tree);
        match self.head() {
            Ok(head) => request = request.parent(head),
            Err(GitError::RefNotFound { .. }) => {}
            Err(e) => return Err(e.into()),
        }

        Ok(self.create_commit(request)?)
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<(), Error> {
        self.engine()
            .raw()
            .remote(name, url)
            .with_context(|| format!("Failed to add remote '{name}'"))?;
        Ok(())
    }

    fn add_local_remote(&self, name: &str, other_repo: &Repository) -> Result<(), Error> {
        let remote_path = other_repo
            .path()
            .to_str()
            .context("Failed to convert remote repository path to string")?;

        self.add_remote(name, remote_path)
    }

    fn reset_branch(&self, name: &str, commit: &Commit) -> Result<(), Error> {
        let oid = commit.oid().context("Cannot reset to an unresolved commit")?;
        self.engine().raw().reference(
            &format!("refs/heads/{name}"),
            oid.to_git2()?,
            true,
            "test: reset branch",
        )?;
        Ok(())
    }

    fn detach_head(&self, commit: &Commit) -> Result<(), Error> {
        let oid = commit.oid().context("Cannot detach at an unresolved commit")?;
        self.engine().raw().set_head_detached(oid.to_git2()?)?;
        Ok(())
    }
}
