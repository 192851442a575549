use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{info, info_span, Span};

use crate::git::branches::{self, Branch, CheckoutOptions};
use crate::git::commits::{Commit, GitCommitter, NewCommit};
use crate::git::engine::Engine;
use crate::git::error::Result;
use crate::git::index::{GitIndex, GitTreeFactory, Index, Tree};
use crate::git::remotes::{FetchOptions, GitRemoteFactory, GitRemotesFactory, ProtocolFetcher};
use crate::git::repository::factories::{
    Committer, Fetcher, RemoteFactory, RemotesFactory, TreeFactory,
};
use crate::git::repository::oid::Oid;

/// Read side of a working copy.
pub trait ReadRepository {
    /// Filesystem path the repository was opened at.
    fn path(&self) -> &Path;

    /// Opens the staging area.
    fn index(&self) -> Result<Box<dyn Index>>;

    fn lookup_tree(&self, oid: &Oid) -> Result<Tree>;

    /// The commit HEAD resolves to.
    fn head(&self) -> Result<Commit>;

    /// The branch HEAD points to, `None` when detached.
    fn current_branch(&self) -> Result<Option<Branch>>;

    fn resolve_ref(&self, refname: &str) -> Result<Option<Oid>>;

    fn list_branches(&self) -> Result<Vec<String>>;

    fn config_value(&self, key: &str) -> Result<Option<String>>;
}

/// Write side of a working copy: everything that moves refs, the working
/// tree or talks to remotes.
pub trait WorkingRepository: ReadRepository {
    /// See [`fetch`](crate::git::remotes::fetch).
    fn fetch(&self, options: &FetchOptions) -> Result<()>;

    fn checkout(&self, options: &CheckoutOptions) -> Result<Branch>;

    /// See [`create_commit`](crate::git::commits::create_commit).
    fn create_commit(&self, request: NewCommit) -> Result<Commit>;

    /// Create a local branch at `target`, optionally tracking `upstream`.
    fn create_branch(&self, name: &str, target: &Oid, upstream: Option<&str>) -> Result<Branch>;

    fn delete_branch(&self, name: &str) -> Result<()>;
}

/// A working copy bound to one libgit2 repository.
///
/// The engine handle is opened once, at construction, and shared with the
/// default collaborators. The type is deliberately `!Send`: callers that
/// share a repository across threads must serialize access themselves.
pub struct Repository {
    path: PathBuf,
    engine: Rc<Engine>,
    span: Span,
    remote_factory: Box<dyn RemoteFactory>,
    remotes_factory: Box<dyn RemotesFactory>,
    tree_factory: Box<dyn TreeFactory>,
    committer: Box<dyn Committer>,
    fetcher: Box<dyn Fetcher>,
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Open the repository at `path` with the libgit2-backed collaborators.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder(path).build()
    }

    pub fn builder<P: AsRef<Path>>(path: P) -> RepositoryBuilder {
        RepositoryBuilder::new(path)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub(crate) fn shared_engine(&self) -> Rc<Engine> {
        Rc::clone(&self.engine)
    }
}

impl ReadRepository for Repository {
    fn path(&self) -> &Path {
        &self.path
    }

    fn index(&self) -> Result<Box<dyn Index>> {
        let _guard = self.span.enter();
        Ok(Box::new(GitIndex::new(self.engine.index()?)))
    }

    fn lookup_tree(&self, oid: &Oid) -> Result<Tree> {
        let _guard = self.span.enter();
        self.tree_factory.tree(oid)
    }

    fn head(&self) -> Result<Commit> {
        let _guard = self.span.enter();
        Ok(Commit::new(self.engine.head_oid()?))
    }

    fn current_branch(&self) -> Result<Option<Branch>> {
        let _guard = self.span.enter();
        branches::current_branch(&self.engine)
    }

    fn resolve_ref(&self, refname: &str) -> Result<Option<Oid>> {
        let _guard = self.span.enter();
        self.engine.resolve_ref(refname)
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        let _guard = self.span.enter();
        self.engine.list_branches()
    }

    fn config_value(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.span.enter();
        self.engine.config_string(key)
    }
}

impl WorkingRepository for Repository {
    fn fetch(&self, options: &FetchOptions) -> Result<()> {
        let _guard = self.span.enter();
        self.fetcher.fetch(
            options,
            self.remote_factory.as_ref(),
            self.remotes_factory.as_ref(),
        )
    }

    fn checkout(&self, options: &CheckoutOptions) -> Result<Branch> {
        let _guard = self.span.enter();
        branches::checkout(&self.engine, options).into_result()
    }

    fn create_commit(&self, request: NewCommit) -> Result<Commit> {
        let _guard = self.span.enter();
        self.committer.commit(request)
    }

    fn create_branch(&self, name: &str, target: &Oid, upstream: Option<&str>) -> Result<Branch> {
        let _guard = self.span.enter();
        self.engine.create_branch(name, target, upstream)
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        let _guard = self.span.enter();
        self.engine.delete_branch(name)
    }
}

/// Configures the collaborators of a [`Repository`] before opening it.
///
/// Anything not set explicitly gets its libgit2-backed default.
pub struct RepositoryBuilder {
    path: PathBuf,
    remote_factory: Option<Box<dyn RemoteFactory>>,
    remotes_factory: Option<Box<dyn RemotesFactory>>,
    tree_factory: Option<Box<dyn TreeFactory>>,
    committer: Option<Box<dyn Committer>>,
    fetcher: Option<Box<dyn Fetcher>>,
}

impl RepositoryBuilder {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            remote_factory: None,
            remotes_factory: None,
            tree_factory: None,
            committer: None,
            fetcher: None,
        }
    }

    pub fn remote_factory(mut self, factory: impl RemoteFactory + 'static) -> Self {
        self.remote_factory = Some(Box::new(factory));
        self
    }

    pub fn remotes_factory(mut self, factory: impl RemotesFactory + 'static) -> Self {
        self.remotes_factory = Some(Box::new(factory));
        self
    }

    pub fn tree_factory(mut self, factory: impl TreeFactory + 'static) -> Self {
        self.tree_factory = Some(Box::new(factory));
        self
    }

    pub fn committer(mut self, committer: impl Committer + 'static) -> Self {
        self.committer = Some(Box::new(committer));
        self
    }

    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn build(self) -> Result<Repository> {
        let span = info_span!("repository", path = %self.path.display());
        let engine = {
            let _guard = span.enter();
            info!("opening repository");
            Rc::new(Engine::open(&self.path)?)
        };

        let remote_factory = self
            .remote_factory
            .unwrap_or_else(|| Box::new(GitRemoteFactory::new(Rc::clone(&engine))));
        let remotes_factory = self
            .remotes_factory
            .unwrap_or_else(|| Box::new(GitRemotesFactory::new(Rc::clone(&engine))));
        let tree_factory = self
            .tree_factory
            .unwrap_or_else(|| Box::new(GitTreeFactory::new(Rc::clone(&engine))));
        let committer = self
            .committer
            .unwrap_or_else(|| Box::new(GitCommitter::new(Rc::clone(&engine))));
        let fetcher = self.fetcher.unwrap_or_else(|| Box::new(ProtocolFetcher));

        Ok(Repository {
            path: self.path,
            engine,
            span,
            remote_factory,
            remotes_factory,
            tree_factory,
            committer,
            fetcher,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use git2::Repository as RawRepository;
    use tracing::{span, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use tracing_subscriber::registry::LookupSpan;

    use super::{ReadRepository, Repository, WorkingRepository};
    use crate::git::commits::{Commit, NewCommit};
    use crate::git::index::Tree;
    use crate::git::remotes::{FetchOptions, Remote, Remotes};
    use crate::git::repository::factories::{RemoteFactory, RemotesFactory};
    use crate::git::repository::oid::Oid;
    use crate::git::{Error, Result};
    use crate::test_utils::{create_test_repo, RemoteStub};

    #[test]
    fn open_works() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let path = temp_dir.path();
        RawRepository::init(path).unwrap();
        let repo = Repository::open(path);

        assert_eq!(repo.unwrap().path(), temp_dir.path());
    }

    #[test]
    fn open_fails_in_non_git_folder() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let repo = Repository::open(temp_dir.path());

        assert!(matches!(repo, Err(Error::NotARepo { .. })));
    }

    #[test]
    fn injected_fetcher_receives_repository_factories() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        RawRepository::init(temp_dir.path()).unwrap();
        let seen = Rc::new(Cell::new(0));
        let seen_in_fetcher = Rc::clone(&seen);

        let repo = Repository::builder(temp_dir.path())
            .remotes_factory(|| -> Result<Remotes> {
                Ok(Remotes::from(vec![
                    Box::new(RemoteStub::new("upstream")) as Box<dyn Remote>
                ]))
            })
            .fetcher(
                move |_: &FetchOptions,
                      _: &dyn RemoteFactory,
                      remotes: &dyn RemotesFactory|
                      -> Result<()> {
                    seen_in_fetcher.set(remotes.remotes()?.len());
                    Ok(())
                },
            )
            .build()
            .unwrap();

        repo.fetch(&FetchOptions::default()).unwrap();
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn injected_tree_factory_and_committer_are_used() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        RawRepository::init(temp_dir.path()).unwrap();
        let fixed = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
        let fixed_for_committer = fixed.clone();

        let repo = Repository::builder(temp_dir.path())
            .tree_factory(|oid: &Oid| -> Result<Tree> { Ok(Tree::new(oid.clone())) })
            .committer(move |_: NewCommit| -> Result<Commit> {
                Ok(Commit::new(fixed_for_committer.clone()))
            })
            .build()
            .unwrap();

        let tree = repo.lookup_tree(&fixed).unwrap();
        assert_eq!(tree.oid(), &fixed);

        let commit = repo.create_commit(NewCommit::new("msg", tree)).unwrap();
        assert_eq!(commit.oid(), Some(&fixed));
    }

    /// Records the name of every span entered.
    #[derive(Clone, Default)]
    struct EnteredSpans(Arc<Mutex<Vec<&'static str>>>);

    impl<S> Layer<S> for EnteredSpans
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_enter(&self, id: &span::Id, ctx: Context<'_, S>) {
            if let Some(span) = ctx.span(id) {
                self.0.lock().unwrap().push(span.name());
            }
        }
    }

    #[test]
    fn queries_run_inside_the_repository_span() {
        let (temp_dir, _repo) = create_test_repo();
        let entered = EnteredSpans::default();
        let subscriber = tracing_subscriber::registry().with(entered.clone());

        tracing::subscriber::with_default(subscriber, || {
            let repo = Repository::open(temp_dir.path()).unwrap();
            entered.0.lock().unwrap().clear();

            repo.resolve_ref("refs/heads/master").unwrap();
            repo.list_branches().unwrap();
            repo.config_value("user.name").unwrap();
        });

        assert_eq!(*entered.0.lock().unwrap(), vec!["repository"; 3]);
    }

    #[test]
    fn head_fails_on_unborn_branch() {
        let (_temp_dir, repo) = create_test_repo();

        assert!(matches!(repo.head(), Err(Error::RefNotFound { .. })));
    }
}
